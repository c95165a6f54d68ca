//! Code assembly buffer for the six-slot OTP input.

use jb_shared::otp::{parse_pasted_code, OTP_LENGTH};
use jb_shared::validation::{validators, Validate, ValidationErrors};
use serde::{Deserialize, Serialize};

use crate::errors::CodeInputError;

/// Number of single-digit slots in the buffer
pub const CODE_LENGTH: usize = OTP_LENGTH;

/// Form field the buffer validates as
pub const FIELD_NAME: &str = "otp_code";

/// Message for an unfilled or malformed slot
pub const SLOT_MESSAGE: &str = "Must be 1 digit";

/// Message for an incomplete code
pub const INCOMPLETE_MESSAGE: &str = "OTP must be 6 digits";

/// Six single-character slots plus the slot that currently has input focus
///
/// A slot is either empty or holds exactly one ASCII decimal digit; the
/// fixed-size array keeps the length at six.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBuffer {
    slots: [Option<char>; CODE_LENGTH],
    focus: usize,
}

impl CodeBuffer {
    /// Create an empty buffer with focus on the first slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of every slot, in order
    pub fn slots(&self) -> [Option<char>; CODE_LENGTH] {
        self.slots
    }

    /// Slot that currently has input focus
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Move focus to a slot, as when the user clicks into it
    pub fn focus_slot(&mut self, index: usize) -> Result<usize, CodeInputError> {
        Self::check_index(index)?;
        self.focus = index;
        Ok(self.focus)
    }

    /// Set one slot from a keystroke
    ///
    /// Empty input clears the slot. A single digit is stored and, unless it
    /// went into the last slot, focus advances to the next slot. Anything
    /// else is rejected and the slot is left unchanged.
    ///
    /// Returns the focused slot after the change.
    pub fn set_digit(&mut self, index: usize, input: &str) -> Result<usize, CodeInputError> {
        Self::check_index(index)?;

        if input.is_empty() {
            self.slots[index] = None;
            self.focus = index;
        } else if validators::is_single_digit(input) {
            self.slots[index] = input.chars().next();
            self.focus = if index < CODE_LENGTH - 1 { index + 1 } else { index };
        } else {
            return Err(CodeInputError::NotADigit {
                input: input.to_string(),
            });
        }

        Ok(self.focus)
    }

    /// Handle the delete key on a slot
    ///
    /// On an empty slot (other than the first) focus moves back one slot and
    /// the previous slot keeps its digit. On a filled slot the digit is
    /// removed and focus stays.
    pub fn backspace(&mut self, index: usize) -> Result<usize, CodeInputError> {
        Self::check_index(index)?;

        if self.slots[index].is_some() {
            self.slots[index] = None;
            self.focus = index;
        } else if index > 0 {
            self.focus = index - 1;
        } else {
            self.focus = 0;
        }

        Ok(self.focus)
    }

    /// Fill every slot from clipboard text
    ///
    /// Whitespace is stripped first. Only an exact six-digit result is
    /// accepted; it overwrites all slots in order. Anything else leaves the
    /// buffer untouched. Returns whether the buffer was filled.
    pub fn paste_bulk(&mut self, text: &str) -> bool {
        let Some(code) = parse_pasted_code(text) else {
            return false;
        };

        for (slot, digit) in self.slots.iter_mut().zip(code.chars()) {
            *slot = Some(digit);
        }
        true
    }

    /// Whether all six slots are filled
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Concatenation of the filled slots, in order
    ///
    /// Shorter than six characters when the buffer is incomplete.
    pub fn assembled(&self) -> String {
        self.slots.iter().flatten().collect()
    }

    fn check_index(index: usize) -> Result<(), CodeInputError> {
        if index < CODE_LENGTH {
            Ok(())
        } else {
            Err(CodeInputError::IndexOutOfRange {
                index,
                len: CODE_LENGTH,
            })
        }
    }
}

impl Validate for CodeBuffer {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for (index, slot) in self.slots.iter().enumerate() {
            match slot {
                Some(c) if c.is_ascii_digit() => {}
                _ => errors.add_error(format!("{}[{}]", FIELD_NAME, index), SLOT_MESSAGE, "length"),
            }
        }

        if errors.has_errors() {
            errors.add_error(FIELD_NAME, INCOMPLETE_MESSAGE, "length");
            return Err(errors);
        }

        Ok(())
    }
}
