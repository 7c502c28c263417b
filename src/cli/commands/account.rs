use crate::auth::{user::IDENTIFIER_MAX_LENGTH, Role};
use anyhow::{Context, Result};
use clap::{builder::ValueParser, Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const CMD_LOGIN: &str = "login";
pub const CMD_REGISTER: &str = "register";
pub const CMD_USERS: &str = "users";

/// Input collection caps the identifier like the form's `maxLength`.
#[must_use]
pub fn validator_identifier() -> ValueParser {
    ValueParser::from(move |identifier: &str| -> std::result::Result<String, String> {
        if identifier.chars().count() > IDENTIFIER_MAX_LENGTH {
            return Err(format!(
                "identifier must be at most {IDENTIFIER_MAX_LENGTH} characters"
            ));
        }
        Ok(identifier.to_string())
    })
}

#[must_use]
pub fn validator_role() -> ValueParser {
    ValueParser::from(move |role: &str| -> std::result::Result<Role, String> { role.parse() })
}

fn identifier_arg() -> Arg {
    Arg::new("identifier")
        .short('i')
        .long("identifier")
        .help("Aadhaar number (12 digits)")
        .required(true)
        .value_parser(validator_identifier())
}

fn password_arg() -> Arg {
    Arg::new("password")
        .long("password")
        .help("Account password")
        .env("CITIFIX_PASSWORD")
        .hide_env_values(true)
        .required(true)
}

#[must_use]
pub fn login_command() -> Command {
    Command::new(CMD_LOGIN)
        .about("Log in with an Aadhaar number and password")
        .arg(identifier_arg())
        .arg(password_arg())
}

#[must_use]
pub fn register_command() -> Command {
    Command::new(CMD_REGISTER)
        .about("Create an account, confirming it with a mock OTP")
        .arg(
            Arg::new("name")
                .long("name")
                .help("Full name")
                .required(true),
        )
        .arg(
            Arg::new("email")
                .long("email")
                .help("Email address")
                .required(true),
        )
        .arg(
            Arg::new("phone")
                .long("phone")
                .help("Phone number")
                .required(true),
        )
        .arg(identifier_arg())
        .arg(password_arg())
        .arg(
            Arg::new("role")
                .long("role")
                .help("Register as: citizen or admin")
                .default_value("citizen")
                .value_parser(validator_role()),
        )
}

#[must_use]
pub fn users_command() -> Command {
    Command::new(CMD_USERS).about("List registered accounts")
}

#[derive(Debug)]
pub struct LoginOptions {
    pub identifier: String,
    pub password: SecretString,
}

impl LoginOptions {
    /// # Errors
    /// Returns an error if a required argument is missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        Ok(Self {
            identifier: required(matches, "identifier")?,
            password: SecretString::from(required(matches, "password")?),
        })
    }
}

#[derive(Debug)]
pub struct RegisterOptions {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub identifier: String,
    pub password: SecretString,
    pub role: Role,
}

impl RegisterOptions {
    /// # Errors
    /// Returns an error if a required argument is missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        Ok(Self {
            name: required(matches, "name")?,
            email: required(matches, "email")?,
            phone: required(matches, "phone")?,
            identifier: required(matches, "identifier")?,
            password: SecretString::from(required(matches, "password")?),
            role: matches.get_one::<Role>("role").copied().unwrap_or_default(),
        })
    }
}

fn required(matches: &ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .with_context(|| format!("missing required argument: --{id}"))
}
