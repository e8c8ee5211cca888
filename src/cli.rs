//! Command-line options.

use clap::{Parser, Subcommand};

use crate::types::TICK_MS;

#[derive(Debug, Parser)]
#[command(name = "blockfall", version, about = "Falling-block puzzle for the terminal")]
pub struct Cli {
    /// Piece sequence seed; random when omitted
    #[arg(long, global = true, env = "BLOCKFALL_SEED")]
    pub seed: Option<u64>,

    /// Frame period of the terminal loop in milliseconds
    #[arg(
        long,
        global = true,
        env = "BLOCKFALL_TICK_MS",
        default_value_t = TICK_MS,
        value_parser = clap::value_parser!(u32).range(1..=1000)
    )]
    pub tick_ms: u32,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Drive a session with line-delimited JSON on stdin/stdout
    Headless {
        /// Start the session before the first message
        #[arg(long)]
        autostart: bool,
    },
}

impl Cli {
    /// The configured seed, or a fresh random one.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_terminal_game() {
        let cli = Cli::try_parse_from(["blockfall"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.tick_ms, TICK_MS);
    }

    #[test]
    fn headless_with_global_seed() {
        let cli =
            Cli::try_parse_from(["blockfall", "headless", "--autostart", "--seed", "42"]).unwrap();
        assert_eq!(cli.command, Some(Command::Headless { autostart: true }));
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.resolve_seed(), 42);
    }

    #[test]
    fn tick_ms_is_range_checked() {
        assert!(Cli::try_parse_from(["blockfall", "--tick-ms", "0"]).is_err());
        assert!(Cli::try_parse_from(["blockfall", "--tick-ms", "33"]).is_ok());
    }
}
