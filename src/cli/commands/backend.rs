use clap::{Arg, ArgMatches, Command};

pub const ARG_BACKEND_URL: &str = "backend-url";

/// Auth backend options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub url: Option<String>,
}

impl Options {
    #[must_use]
    pub fn parse(matches: &ArgMatches) -> Self {
        Self {
            url: matches
                .get_one::<String>(ARG_BACKEND_URL)
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
        }
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_BACKEND_URL)
            .long(ARG_BACKEND_URL)
            .help("Base URL of the auth backend, example: https://api.testtribe.dev")
            .long_help(
                "Base URL of the auth backend. Optional at start-up: without it every /api/auth call answers 500.",
            )
            .env("NEXT_PUBLIC_BACKEND_URL"),
    )
}
