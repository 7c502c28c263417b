//! Six digit verification codes for the registration step.

use rand::Rng;
use std::fmt;

pub const CODE_LENGTH: usize = 6;

const CODE_SPACE: u32 = 1_000_000;

/// A six digit numeric code; leading zeros are significant.
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Sample uniformly from `000000..=999999`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let value = rng.gen_range(0..CODE_SPACE);
        Self(format!("{value:0width$}", width = CODE_LENGTH))
    }

    /// Accept an existing code, e.g. one produced outside this crate.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        if code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(code.to_string()))
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Plain string equality against user input.
    #[must_use]
    pub fn matches(&self, entered: &str) -> bool {
        self.0 == entered
    }
}

// The code is shown to the user on purpose, but keep it out of debug logs.
impl fmt::Debug for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VerificationCode(******)")
    }
}

impl fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
