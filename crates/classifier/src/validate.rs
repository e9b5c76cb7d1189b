//! Canonical positive-integer validation.
//!
//! Accepted tokens match `^[1-9][0-9]*$` exactly. There is no upper bound:
//! the digits are kept as-is and arithmetic is done by reducing them
//! modulo a small divisor, so arbitrarily long tokens stay exact.

use thiserror::Error;

/// Reasons a token is not a canonical positive integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("input is empty")]
    Empty,

    /// Covers both "0" and zero-padded forms such as "007".
    #[error("input must not start with '0'")]
    LeadingZero,

    #[error("invalid character {character:?} at position {index}")]
    InvalidCharacter { index: usize, character: char },
}

/// A validated positive integer, held as its decimal digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedNumber {
    digits: String,
}

impl ValidatedNumber {
    /// Decimal digits, most significant first. Never empty, never starts with '0'.
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// `self mod modulus`, computed digit by digit.
    ///
    /// # Panics
    /// Panics if `modulus` is zero.
    pub fn residue(&self, modulus: u32) -> u32 {
        let m = u64::from(modulus);
        self.digits
            .bytes()
            .fold(0u64, |acc, b| (acc * 10 + u64::from(b - b'0')) % m) as u32
    }

    /// The value as a `u64`, if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        self.digits.parse().ok()
    }
}

impl std::fmt::Display for ValidatedNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.digits)
    }
}

impl std::str::FromStr for ValidatedNumber {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)
    }
}

/// Validate a raw token as a canonical positive integer.
pub fn validate(token: &str) -> Result<ValidatedNumber, ValidationError> {
    if token.is_empty() {
        return Err(ValidationError::Empty);
    }

    if let Some((index, character)) = token.char_indices().find(|(_, c)| !c.is_ascii_digit()) {
        return Err(ValidationError::InvalidCharacter { index, character });
    }

    if token.starts_with('0') {
        return Err(ValidationError::LeadingZero);
    }

    Ok(ValidatedNumber {
        digits: token.to_string(),
    })
}
