use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

pub const ARG_STORE: &str = "store";

pub const DEFAULT_STORE: &str = "citifix-users.json";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_STORE)
            .short('s')
            .long("store")
            .help("Path of the JSON file holding registered users")
            .env("CITIFIX_STORE")
            .default_value(DEFAULT_STORE)
            .global(true)
            .value_parser(clap::value_parser!(PathBuf)),
    )
}

#[derive(Debug)]
pub struct Options {
    pub path: PathBuf,
}

impl Options {
    /// # Errors
    /// Returns an error if the store path is missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let path = matches
            .get_one::<PathBuf>(ARG_STORE)
            .cloned()
            .context("missing required argument: --store")?;
        Ok(Self { path })
    }
}
