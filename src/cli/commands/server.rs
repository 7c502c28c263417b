use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};

pub const CMD_SERVE: &str = "serve";

#[must_use]
pub fn command() -> Command {
    Command::new(CMD_SERVE)
        .about("Serve the login and registration API")
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("CITIFIX_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("frontend-base-url")
                .long("frontend-base-url")
                .help("Frontend base URL allowed by CORS")
                .env("CITIFIX_FRONTEND_BASE_URL")
                .default_value("http://localhost:5173"),
        )
}

#[derive(Debug)]
pub struct Options {
    pub port: u16,
    pub frontend_base_url: String,
}

impl Options {
    /// # Errors
    /// Returns an error if a defaulted argument is somehow absent.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        Ok(Self {
            port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
            frontend_base_url: matches
                .get_one::<String>("frontend-base-url")
                .cloned()
                .context("missing required argument: --frontend-base-url")?,
        })
    }
}
