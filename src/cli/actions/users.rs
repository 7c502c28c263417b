use crate::auth::{JsonFileUserStore, UserStore};
use anyhow::{Context, Result};
use std::{
    io::{self, Write},
    path::PathBuf,
};

#[derive(Debug)]
pub struct Args {
    pub store: PathBuf,
}

/// List accounts without their passwords.
/// # Errors
/// Returns an error if the store cannot be read.
pub fn execute(args: &Args) -> Result<()> {
    let store = JsonFileUserStore::new(&args.store);
    let stdout = io::stdout();
    list(&store, &mut stdout.lock())
}

fn list<S: UserStore + ?Sized, W: Write>(store: &S, out: &mut W) -> Result<()> {
    let users = store.list_users().context("Could not read user store")?;

    for user in &users {
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            user.identifier, user.role, user.name, user.email
        )?;
    }
    writeln!(out, "{} account(s)", users.len())?;

    Ok(())
}
