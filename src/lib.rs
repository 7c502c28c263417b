//! # CITIFIX accounts
//!
//! Login and two-step registration for the CITIFIX civic issue reporting
//! application.
//!
//! ## Login
//!
//! An Aadhaar-like identifier and a password are looked up among the stored
//! accounts. A failed attempt never says whether the identifier or the
//! password was wrong.
//!
//! ## Registration
//!
//! The profile form produces a six digit OTP that is shown straight back to
//! the user (there is no SMS gateway). Entering the same code creates the
//! account and logs the user in; going back discards the code.
//!
//! > **Warning:** passwords are stored and compared as plain text. This crate
//! > models a demo flow, not a credential store.

pub mod api;
pub mod auth;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
    }
}
