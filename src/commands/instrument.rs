//! Instrument and fret-window commands

use crate::commands::{CommandContext, CommandResult};
use colored::*;
use fretboard_core::{FretWindow, Instrument};

/// Handle `instrument [preset]` command
pub fn cmd_instrument(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!(
            "Instrument: {}\nPresets: {}",
            ctx.repository.instrument(),
            Instrument::PRESETS.join(", ")
        ));
    }

    let instrument = match Instrument::preset(args) {
        Ok(instrument) => instrument,
        Err(e) => return CommandResult::Error(e.to_string()),
    };
    let window = ctx.repository.window();
    reconfigure(ctx, instrument, window)
}

/// Handle `window [min max]` command
pub fn cmd_window(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let parts: Vec<&str> = args.split_whitespace().collect();
    let window = match parts.as_slice() {
        [] => {
            let window = ctx.repository.window();
            return CommandResult::Message(format!(
                "Fret window: {}-{}",
                window.min(),
                window.max()
            ));
        }
        [min, max] => match (min.parse::<i32>(), max.parse::<i32>()) {
            (Ok(min), Ok(max)) => match FretWindow::new(min, max) {
                Ok(window) => window,
                Err(e) => return CommandResult::Error(e.to_string()),
            },
            _ => return CommandResult::Error("Fret bounds must be integers".to_string()),
        },
        _ => return CommandResult::Error("Usage: window <min> <max>".to_string()),
    };

    let instrument = ctx.repository.instrument().clone();
    reconfigure(ctx, instrument, window)
}

fn reconfigure(ctx: &mut CommandContext, instrument: Instrument, window: FretWindow) -> CommandResult {
    let summary = format!(
        "{} on {}, frets {}-{}",
        "Now using".bright_green(),
        instrument,
        window.min(),
        window.max()
    );
    match ctx.repository.reconfigure(instrument, window) {
        Ok(dropped) if dropped.is_empty() => CommandResult::Message(summary),
        Ok(dropped) => CommandResult::Message(format!(
            "{}\n{} {}",
            summary,
            "No shape for:".yellow(),
            dropped.join(", ")
        )),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}
