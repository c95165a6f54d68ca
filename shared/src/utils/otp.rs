//! One-time passcode format utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Number of digits in a one-time passcode
pub const OTP_LENGTH: usize = 6;

static OTP_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{6}$").unwrap());

/// Remove every whitespace character, as a clipboard paste is normalised
pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Check if a string is exactly six ASCII decimal digits
pub fn is_otp_code(code: &str) -> bool {
    // `\d` is Unicode-aware in the regex crate
    OTP_REGEX.is_match(code) && code.bytes().all(|b| b.is_ascii_digit())
}

/// Normalise pasted text into a code, if it is one
pub fn parse_pasted_code(text: &str) -> Option<String> {
    let stripped = strip_whitespace(text);
    is_otp_code(&stripped).then_some(stripped)
}
