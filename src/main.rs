//! e3db-cli - command line client for the e3db encrypted record store.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use e3db_cli::cli::output;
use e3db_cli::cli::{execute, Cli, Options};
use e3db_cli::core::constants;
use e3db_cli::error::{Error, ProfileError};

fn main() {
    let cli = Cli::parse();
    let opts = Options::from_cli(&cli);

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if opts.debug {
            EnvFilter::new("e3db_cli=debug")
        } else {
            EnvFilter::new("e3db_cli=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli.command, &opts) {
        let message = match hint(&e) {
            Some(hint) => format!("{} ({})", e, hint),
            None => e.to_string(),
        };
        output::error(&message);
        std::process::exit(1);
    }
}

fn hint(e: &Error) -> Option<&'static str> {
    match e {
        Error::Profile(ProfileError::NotFound(_)) => Some("run: e3db-cli register EMAIL"),
        Error::Profile(ProfileError::Conflict(_)) => {
            Some("choose another profile with: e3db-cli -p NAME register EMAIL")
        }
        _ => None,
    }
}
