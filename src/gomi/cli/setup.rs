use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gomi", bin_name = "gomi", version)]
#[command(about = "Track a garbage-collection round over fixed stops", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $GOMI_HOME, then the OS data directory)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub home: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Skip the startup alert about uncollected stops
    #[arg(long, global = true, help_heading = "Options")]
    pub no_alert: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show progress, pending stops and recent history (default)
    Status,

    /// Mark one or more stops collected
    #[command(alias = "c")]
    Collect {
        /// Stop ids, e.g. `a b`
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Clear all progress and history
    Reset {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// List every stop with its status
    Stops,

    /// Show completed rounds, newest first
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        limit: Option<usize>,
    },

    /// Write the map as GeoJSON
    Map {
        /// Write to this path instead of the configured one
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g. history-limit)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_status() {
        let cli = Cli::try_parse_from(["gomi"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.no_alert);
    }

    #[test]
    fn collect_alias_and_many_ids() {
        let cli = Cli::try_parse_from(["gomi", "c", "a", "b"]).unwrap();
        match cli.command {
            Some(Commands::Collect { ids }) => assert_eq!(ids, vec!["a", "b"]),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn collect_requires_an_id() {
        assert!(Cli::try_parse_from(["gomi", "collect"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["gomi", "reset", "-y", "--home", "/tmp/g", "--no-alert"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Reset { yes: true })));
        assert_eq!(cli.home, Some(PathBuf::from("/tmp/g")));
        assert!(cli.no_alert);
    }

    #[test]
    fn history_limit() {
        let cli = Cli::try_parse_from(["gomi", "history", "-n", "2"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::History { limit: Some(2) })
        ));
        assert!(Cli::try_parse_from(["gomi", "history", "-n", "0"]).is_err());
    }
}
