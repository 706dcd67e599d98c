//! Command line interface

use crate::config::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Chord fingerings for stringed instruments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Instrument preset (guitar, drop-d, ukulele, bass)
    #[arg(short, long)]
    pub instrument: Option<String>,

    /// Lowest fret the search may use
    #[arg(long, allow_negative_numbers = true)]
    pub min_fret: Option<i32>,

    /// Highest fret the search may use
    #[arg(long, allow_negative_numbers = true)]
    pub max_fret: Option<i32>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the interactive prompt (default)
    Repl,

    /// List the stock chords and their shapes
    List,

    /// Show one stock chord by name
    Show {
        /// Chord name, case-insensitive
        name: String,
    },

    /// Search for shapes of any chord
    Shape {
        /// Root note, e.g. C1 or F#2
        root: String,

        /// Quality (maj, min, 7, maj7, dim) or offsets such as 0,4,7,9
        pattern: String,

        /// Number of ranked shapes to print
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Print chords as JSON documents
    Export {
        /// Chord name; all chords when omitted
        name: Option<String>,
    },
}

impl Cli {
    /// Settings given as flags, to be layered over the config file
    pub fn overrides(&self) -> Config {
        Config {
            instrument: self.instrument.clone(),
            min_fret: self.min_fret,
            max_fret: self.max_fret,
            ..Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shape_subcommand() {
        let cli = Cli::parse_from(["fretboard", "--max-fret", "5", "shape", "G1", "maj", "-n", "2"]);
        assert_eq!(cli.max_fret, Some(5));
        assert_eq!(
            cli.command,
            Some(Commands::Shape {
                root: "G1".to_string(),
                pattern: "maj".to_string(),
                count: Some(2),
            })
        );
    }

    #[test]
    fn test_defaults_to_no_subcommand() {
        let cli = Cli::parse_from(["fretboard"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.overrides(), Config::default());
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
