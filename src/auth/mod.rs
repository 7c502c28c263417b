//! Account core: the user store and session boundaries plus the two flows
//! (login and OTP registration) that sit on top of them.
//!
//! Both flows are synchronous and never call each other. Failures are
//! reported as [`AuthError`] values and leave persisted state untouched.

pub mod code;
pub mod error;
pub mod login;
pub mod register;
pub mod session;
pub mod store;
pub mod user;

pub use code::VerificationCode;
pub use error::{AuthError, Notice, StoreError};
pub use login::login;
pub use register::{PendingRegistration, Profile, RegistrationWizard, Step, WizardState};
pub use session::{Session, SessionBoundary, SessionContext};
pub use store::{JsonFileUserStore, MemoryUserStore, UserStore};
pub use user::{NewUser, Role, UserRecord};
