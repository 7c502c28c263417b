use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access user store {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("user store {path} is not valid json")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode users")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid verification code")]
    InvalidVerificationCode,
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("no registration is awaiting a code")]
    NoPendingRegistration,
    #[error("registration already completed")]
    AlreadyRegistered,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Short title and description a UI shows as a transient notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub description: String,
}

impl AuthError {
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::InvalidCredentials => Notice {
                title: "Login failed",
                description: "Invalid Aadhaar or password".to_string(),
            },
            Self::InvalidVerificationCode => Notice {
                title: "Invalid OTP",
                description: "Please check and try again".to_string(),
            },
            Self::MissingField(field) => Notice {
                title: "Missing details",
                description: format!("Please fill in your {field}"),
            },
            Self::NoPendingRegistration => Notice {
                title: "No OTP pending",
                description: "Submit your details to receive an OTP".to_string(),
            },
            Self::AlreadyRegistered => Notice {
                title: "Already registered",
                description: "This registration is complete".to_string(),
            },
            Self::Store(_) => Notice {
                title: "Something went wrong",
                description: "Please try again later".to_string(),
            },
        }
    }

    /// Failures the user can fix by re-entering input.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}
