//! # Fretboard
//!
//! Terminal front end for `fretboard-core`: a chord library for a tuned
//! stringed instrument, browsable from an interactive prompt or one-shot
//! commands.
//!
//! ## Modules
//!
//! - `cli`: command-line arguments.
//! - `commands`: REPL command registry and the chord, instrument and general
//!   commands.
//! - `config`: TOML configuration layered under command-line flags.
//! - `repl`: the Read-Eval-Print Loop.

pub mod cli;
pub mod commands;
pub mod config;
pub mod repl;

// Re-export commonly used types and functions for convenience
pub use crate::config::{Config, Settings};
pub use fretboard_core::{
    chord_of, find_shape, Chord, ChordRepository, FretWindow, Instrument, Note, Shape,
};
