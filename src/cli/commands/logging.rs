use clap::{builder::ValueParser, Arg, ArgAction, Command};

pub const ARG_VERBOSITY: &str = "verbosity";

const LEVEL_NAMES: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Accepts a level name or a number up to 5 for `TESTTRIBE_LOG_LEVEL`.
#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(|level: &str| -> Result<u8, String> {
        if let Ok(parsed) = level.trim().parse::<u8>() {
            return if parsed <= 5 {
                Ok(parsed)
            } else {
                Err(format!("log level {parsed} out of range (0-5)"))
            };
        }

        let wanted = level.trim().to_ascii_lowercase();
        LEVEL_NAMES
            .iter()
            .position(|name| *name == wanted)
            .and_then(|index| u8::try_from(index).ok())
            .ok_or_else(|| format!("invalid log level: {level}"))
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
            .env("TESTTRIBE_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}
