use crate::auth::{
    code::CODE_LENGTH,
    register::{code_sent_notice, registered_notice},
    AuthError, JsonFileUserStore, Profile, RegistrationWizard, Role, SessionBoundary,
    SessionContext, UserStore,
};
use anyhow::{anyhow, bail, Result};
use rand::Rng;
use secrecy::{ExposeSecret, SecretString};
use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};
use tracing::debug;

/// Typed at the code prompt to return to the profile step.
const BACK: &str = "back";

#[derive(Debug)]
pub struct Args {
    pub store: PathBuf,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub identifier: String,
    pub password: SecretString,
    pub role: Role,
}

impl Args {
    fn profile(&self) -> Profile {
        Profile {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            identifier: self.identifier.clone(),
            password: SecretString::from(self.password.expose_secret().to_string()),
            role: self.role,
        }
    }
}

/// Execute the register action, reading codes from stdin.
/// # Errors
/// Returns an error if the profile is incomplete, input ends before a code
/// matches, or the store cannot be written.
pub fn execute(args: &Args) -> Result<()> {
    let mut store = JsonFileUserStore::new(&args.store);
    let mut context = SessionContext::new();
    let stdin = io::stdin();
    let stdout = io::stdout();

    run(
        args,
        &mut store,
        &mut context,
        &mut stdin.lock(),
        &mut stdout.lock(),
        &mut rand::thread_rng(),
    )
}

fn run<S, B, I, O, R>(
    args: &Args,
    store: &mut S,
    session: &mut B,
    input: &mut I,
    out: &mut O,
    rng: &mut R,
) -> Result<()>
where
    S: UserStore + ?Sized,
    B: SessionBoundary + ?Sized,
    I: BufRead,
    O: Write,
    R: Rng + ?Sized,
{
    let mut wizard = RegistrationWizard::new();
    send_code(&mut wizard, args, out, rng)?;

    let mut line = String::new();
    loop {
        write!(out, "Enter OTP (or '{BACK}' for a new one): ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            bail!("Registration aborted: no OTP entered");
        }
        let entered = line.trim_end_matches(['\r', '\n']);

        if entered == BACK {
            wizard.back();
            debug!("code discarded, resubmitting profile");
            send_code(&mut wizard, args, out, rng)?;
            continue;
        }

        if entered.chars().count() > CODE_LENGTH {
            report(out, &AuthError::InvalidVerificationCode)?;
            continue;
        }

        match wizard.verify(entered, store, session) {
            Ok(created) => {
                let notice = registered_notice();
                writeln!(out, "{}", notice.title)?;
                writeln!(out, "{}", notice.description)?;
                writeln!(out, "role: {}", created.role)?;
                writeln!(out, "redirect: {}", created.role.destination())?;
                return Ok(());
            }
            Err(err @ AuthError::InvalidVerificationCode) => report(out, &err)?,
            Err(err) => return Err(err.into()),
        }
    }
}

fn send_code<O, R>(
    wizard: &mut RegistrationWizard,
    args: &Args,
    out: &mut O,
    rng: &mut R,
) -> Result<()>
where
    O: Write,
    R: Rng + ?Sized,
{
    match wizard.submit_profile(args.profile(), rng) {
        Ok(code) => {
            let notice = code_sent_notice(&code);
            writeln!(out, "{}", notice.title)?;
            writeln!(out, "{}", notice.description)?;
            Ok(())
        }
        Err(err @ AuthError::Store(_)) => Err(err.into()),
        Err(err) => {
            let notice = err.notice();
            Err(anyhow!("{}: {}", notice.title, notice.description))
        }
    }
}

fn report<O: Write>(out: &mut O, err: &AuthError) -> Result<()> {
    let notice = err.notice();
    writeln!(out, "{}", notice.title)?;
    writeln!(out, "{}", notice.description)?;
    Ok(())
}
