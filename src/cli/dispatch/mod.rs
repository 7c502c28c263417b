//! Map parsed CLI arguments to the action the binary runs.

use crate::cli::actions::{login, register, server, users, Action};
use crate::cli::commands::{account, server as serve, store};
use anyhow::{anyhow, Result};

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or the subcommand is unknown.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let store = store::Options::parse(matches)?.path;

    match matches.subcommand() {
        Some((account::CMD_LOGIN, sub_m)) => {
            let opts = account::LoginOptions::parse(sub_m)?;
            Ok(Action::Login(login::Args {
                store,
                identifier: opts.identifier,
                password: opts.password,
            }))
        }
        Some((account::CMD_REGISTER, sub_m)) => {
            let opts = account::RegisterOptions::parse(sub_m)?;
            Ok(Action::Register(register::Args {
                store,
                name: opts.name,
                email: opts.email,
                phone: opts.phone,
                identifier: opts.identifier,
                password: opts.password,
                role: opts.role,
            }))
        }
        Some((account::CMD_USERS, _)) => Ok(Action::Users(users::Args { store })),
        Some((serve::CMD_SERVE, sub_m)) => {
            let opts = serve::Options::parse(sub_m)?;
            Ok(Action::Server(server::Args {
                store,
                port: opts.port,
                frontend_base_url: opts.frontend_base_url,
            }))
        }
        Some((other, _)) => Err(anyhow!("unknown subcommand: {other}")),
        None => Err(anyhow!("missing subcommand")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use secrecy::ExposeSecret;
    use std::path::PathBuf;

    #[test]
    fn login_action() {
        temp_env::with_vars([("CITIFIX_STORE", None::<&str>)], || {
            let matches = crate::cli::commands::new().get_matches_from(vec![
                "citifix",
                "login",
                "-i",
                "111122223333",
                "--password",
                "secret",
            ]);
            let action = handler(&matches);
            assert!(matches!(
                &action,
                Ok(Action::Login(args))
                    if args.identifier == "111122223333"
                        && args.password.expose_secret() == "secret"
                        && args.store == PathBuf::from(store::DEFAULT_STORE)
            ));
        });
    }

    #[test]
    fn register_action() {
        let matches = crate::cli::commands::new().get_matches_from(vec![
            "citifix",
            "--store",
            "/tmp/users.json",
            "register",
            "--name",
            "Ravi",
            "--email",
            "r@x.com",
            "--phone",
            "1112223334",
            "--identifier",
            "111122223333",
            "--password",
            "secret",
            "--role",
            "admin",
        ]);
        let action = handler(&matches);
        assert!(matches!(
            &action,
            Ok(Action::Register(args))
                if args.role == Role::Admin && args.store == PathBuf::from("/tmp/users.json")
        ));
    }

    #[test]
    fn serve_action_defaults() {
        temp_env::with_vars(
            [
                ("CITIFIX_PORT", None::<&str>),
                ("CITIFIX_FRONTEND_BASE_URL", None::<&str>),
            ],
            || {
                let matches =
                    crate::cli::commands::new().get_matches_from(vec!["citifix", "serve"]);
                let action = handler(&matches);
                assert!(matches!(
                    &action,
                    Ok(Action::Server(args))
                        if args.port == 8080 && args.frontend_base_url == "http://localhost:5173"
                ));
            },
        );
    }
}
