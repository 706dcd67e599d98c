use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use fretboard::cli::{Cli, Commands};
use fretboard::commands::chords::{export_chords, list_chords, search_shapes, show_chord};
use fretboard::config::{Config, Settings};
use fretboard::repl;
use fretboard_core::ChordRepository;
use log::{info, warn};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let settings = file_config.merge(cli.overrides()).resolve()?;
    info!(
        "Using {} with frets {}-{}",
        settings.instrument,
        settings.window.min(),
        settings.window.max()
    );

    let repository = build_repository(&settings)?;

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => repl::start(repository, settings.shapes_shown)?,
        Commands::List => println!("{}", list_chords(&repository)),
        Commands::Show { name } => println!("{}", show_chord(&repository, &name)?),
        Commands::Shape {
            root,
            pattern,
            count,
        } => {
            let count = count.unwrap_or(settings.shapes_shown).max(1);
            println!("{}", search_shapes(&repository, &root, &pattern, count)?);
        }
        Commands::Export { name } => {
            println!("{}", export_chords(&repository, name.as_deref().unwrap_or(""))?)
        }
    }

    Ok(())
}

/// The stock chord library, re-resolved for the configured instrument and window
fn build_repository(settings: &Settings) -> Result<ChordRepository> {
    let mut repository = ChordRepository::standard().context("Failed to build chord library")?;
    let dropped = repository.reconfigure(settings.instrument.clone(), settings.window)?;
    if !dropped.is_empty() {
        warn!("No playable shape for: {}", dropped.join(", "));
    }
    Ok(repository)
}
