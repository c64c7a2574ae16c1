//! Map validated CLI arguments to the action to run.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::backend;
use anyhow::Result;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);
    let backend_opts = backend::Options::parse(matches);

    Ok(Action::Server(Args {
        port,
        backend_url: backend_opts.url,
    }))
}
