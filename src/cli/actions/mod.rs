pub mod login;
pub mod register;
pub mod server;
pub mod users;

use anyhow::Result;

#[derive(Debug)]
pub enum Action {
    Login(login::Args),
    Register(register::Args),
    Users(users::Args),
    Server(server::Args),
}

impl Action {
    /// Run the selected action.
    ///
    /// # Errors
    /// Returns an error if the action fails; rejected credentials and
    /// aborted registrations count as failures.
    pub async fn execute(self) -> Result<()> {
        match self {
            Self::Login(args) => login::execute(&args),
            Self::Register(args) => register::execute(&args),
            Self::Users(args) => users::execute(&args),
            Self::Server(args) => server::execute(args).await,
        }
    }
}
