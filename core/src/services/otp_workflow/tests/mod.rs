//! Tests for the OTP verification workflow

#[cfg(test)]
mod state_tests;
#[cfg(test)]
mod workflow_tests;
