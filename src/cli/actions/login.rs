use crate::auth::{
    self, login::welcome_notice, AuthError, JsonFileUserStore, SessionContext, UserStore,
};
use anyhow::{anyhow, Result};
use secrecy::{ExposeSecret, SecretString};
use std::{
    io::{self, Write},
    path::PathBuf,
};

#[derive(Debug)]
pub struct Args {
    pub store: PathBuf,
    pub identifier: String,
    pub password: SecretString,
}

/// Execute the login action.
/// # Errors
/// Returns an error if the credentials are rejected or the store is unreadable.
pub fn execute(args: &Args) -> Result<()> {
    let store = JsonFileUserStore::new(&args.store);
    let mut context = SessionContext::new();
    let stdout = io::stdout();
    run(&store, &mut context, args, &mut stdout.lock())
}

fn run<S, W>(store: &S, context: &mut SessionContext, args: &Args, out: &mut W) -> Result<()>
where
    S: UserStore + ?Sized,
    W: Write,
{
    match auth::login(
        store,
        context,
        &args.identifier,
        args.password.expose_secret(),
    ) {
        Ok(session) => {
            let notice = welcome_notice(&session);
            writeln!(out, "{}", notice.title)?;
            writeln!(out, "{}", notice.description)?;
            writeln!(out, "role: {}", session.role)?;
            writeln!(out, "redirect: {}", session.role.destination())?;
            Ok(())
        }
        Err(err @ AuthError::Store(_)) => Err(err.into()),
        Err(err) => {
            let notice = err.notice();
            Err(anyhow!("{}: {}", notice.title, notice.description))
        }
    }
}
