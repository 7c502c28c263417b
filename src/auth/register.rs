//! Two step registration: profile first, then the mock OTP.
//!
//! ```text
//! CollectingProfile --submit--> AwaitingCode --verify(ok)--> Registered
//!        ^                        |    ^
//!        +---------back-----------+    +--verify(mismatch)
//! ```
//!
//! The code lives inside the `AwaitingCode` state and is dropped on any
//! transition out of it. A failed attempt leaves the state untouched, and the
//! store append only happens after a match.

use super::{
    code::VerificationCode,
    error::{AuthError, Notice},
    session::{Session, SessionBoundary},
    store::UserStore,
    user::{NewUser, Role, UserRecord},
};
use rand::Rng;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument, warn};

/// Step one form data.
#[derive(Debug)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub identifier: String,
    pub password: SecretString,
    pub role: Role,
}

impl Profile {
    /// Only presence is checked; formats are left to input collection.
    ///
    /// # Errors
    /// `MissingField` naming the first empty field.
    pub fn validate(&self) -> Result<(), AuthError> {
        let fields: [(&'static str, &str); 5] = [
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("phone", self.phone.as_str()),
            ("identifier", self.identifier.as_str()),
            ("password", self.password.expose_secret()),
        ];

        match fields.iter().find(|(_, value)| value.is_empty()) {
            Some((field, _)) => Err(AuthError::MissingField(*field)),
            None => Ok(()),
        }
    }

    fn to_new_user(&self) -> NewUser {
        NewUser {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            identifier: self.identifier.clone(),
            password: self.password.expose_secret().to_string(),
            role: Some(self.role),
        }
    }
}

#[derive(Debug)]
pub struct PendingRegistration {
    profile: Profile,
    code: VerificationCode,
}

impl PendingRegistration {
    #[must_use]
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    #[must_use]
    pub fn code(&self) -> &VerificationCode {
        &self.code
    }
}

#[derive(Debug)]
pub enum WizardState {
    /// `draft` holds the previous submission after a `back`.
    CollectingProfile { draft: Option<Profile> },
    AwaitingCode(PendingRegistration),
    Registered(UserRecord),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    CollectingProfile,
    AwaitingCode,
    Registered,
}

#[derive(Debug)]
pub struct RegistrationWizard {
    state: WizardState,
}

impl Default for RegistrationWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationWizard {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: WizardState::CollectingProfile { draft: None },
        }
    }

    #[must_use]
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    #[must_use]
    pub fn step(&self) -> Step {
        match self.state {
            WizardState::CollectingProfile { .. } => Step::CollectingProfile,
            WizardState::AwaitingCode(_) => Step::AwaitingCode,
            WizardState::Registered(_) => Step::Registered,
        }
    }

    #[must_use]
    pub fn pending(&self) -> Option<&PendingRegistration> {
        match &self.state {
            WizardState::AwaitingCode(pending) => Some(pending),
            _ => None,
        }
    }

    /// Profile to prefill the form with, from the pending or last submission.
    #[must_use]
    pub fn draft(&self) -> Option<&Profile> {
        match &self.state {
            WizardState::CollectingProfile { draft } => draft.as_ref(),
            WizardState::AwaitingCode(pending) => Some(&pending.profile),
            WizardState::Registered(_) => None,
        }
    }

    /// Submit step one and hold a freshly generated code.
    ///
    /// Resubmitting while a code is pending replaces it.
    ///
    /// # Errors
    /// `MissingField` for an incomplete profile, `AlreadyRegistered` once
    /// the wizard has finished. The state is unchanged on error.
    pub fn submit_profile<R: Rng + ?Sized>(
        &mut self,
        profile: Profile,
        rng: &mut R,
    ) -> Result<VerificationCode, AuthError> {
        self.submit_profile_with_code(profile, VerificationCode::generate(rng))
    }

    /// Like [`Self::submit_profile`] with a code chosen by the caller.
    ///
    /// # Errors
    /// Same as [`Self::submit_profile`].
    #[instrument(skip_all, fields(identifier = %profile.identifier))]
    pub fn submit_profile_with_code(
        &mut self,
        profile: Profile,
        code: VerificationCode,
    ) -> Result<VerificationCode, AuthError> {
        if matches!(self.state, WizardState::Registered(_)) {
            return Err(AuthError::AlreadyRegistered);
        }
        profile.validate()?;

        debug!("profile accepted, awaiting code");

        self.state = WizardState::AwaitingCode(PendingRegistration {
            profile,
            code: code.clone(),
        });

        Ok(code)
    }

    /// Compare the entered code and, on a match, create the account.
    ///
    /// # Errors
    /// `NoPendingRegistration` outside `AwaitingCode`,
    /// `InvalidVerificationCode` on mismatch, `Store` if the append fails.
    /// Only a match changes state.
    #[instrument(skip_all)]
    pub fn verify<S, B>(
        &mut self,
        entered: &str,
        store: &mut S,
        session: &mut B,
    ) -> Result<Session, AuthError>
    where
        S: UserStore + ?Sized,
        B: SessionBoundary + ?Sized,
    {
        let WizardState::AwaitingCode(pending) = &self.state else {
            return Err(AuthError::NoPendingRegistration);
        };

        if !pending.code.matches(entered) {
            warn!("verification code mismatch");
            return Err(AuthError::InvalidVerificationCode);
        }

        let record = store.add_user(pending.profile.to_new_user())?;
        session.establish_session(&record);

        debug!(identifier = %record.identifier, role = %record.role, "registration complete");

        let created = Session::from(&record);
        self.state = WizardState::Registered(record);

        Ok(created)
    }

    /// Leave `AwaitingCode`, discarding the code. No-op in other states.
    pub fn back(&mut self) {
        if matches!(self.state, WizardState::AwaitingCode(_)) {
            let previous = std::mem::replace(
                &mut self.state,
                WizardState::CollectingProfile { draft: None },
            );
            if let WizardState::AwaitingCode(pending) = previous {
                self.state = WizardState::CollectingProfile {
                    draft: Some(pending.profile),
                };
            }
        }
    }
}

#[must_use]
pub fn code_sent_notice(code: &VerificationCode) -> Notice {
    Notice {
        title: "OTP Sent!",
        description: format!("Mock OTP: {code} (for demo purposes)"),
    }
}

#[must_use]
pub fn registered_notice() -> Notice {
    Notice {
        title: "Registration successful!",
        description: "Welcome to CITIFIX".to_string(),
    }
}
