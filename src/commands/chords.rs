//! Chord library commands (list, show, shape, add, remove, export, import)

use crate::commands::{CommandContext, CommandResult};
use anyhow::{anyhow, bail, Result};
use colored::*;
use fretboard_core::document::{read_chord, write_chord, ChordCollection};
use fretboard_core::{
    chord_of, find_shapes_in, Chord, ChordRepository, IntervalPattern, Note, Quality,
};

/// One line per chord, ordered by name
pub fn list_chords(repository: &ChordRepository) -> String {
    if repository.is_empty() {
        return "No chords defined".to_string();
    }
    repository
        .all()
        .map(|chord| format!("  {}", chord))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Multi-line description of a stored chord
pub fn describe_chord(chord: &Chord) -> String {
    let shape = chord.shape();
    format!(
        "{}\n  tones: {}\n  fingers: {}, span: {}",
        chord,
        chord.pitch_classes(),
        shape.finger_count(),
        shape.span()
    )
}

pub fn show_chord(repository: &ChordRepository, name: &str) -> Result<String> {
    repository
        .get(name)
        .map(describe_chord)
        .ok_or_else(|| anyhow!("No chord named '{}'", name))
}

/// Search shapes for `root` + `pattern` on the repository's instrument and window
pub fn search_shapes(
    repository: &ChordRepository,
    root: &str,
    pattern: &str,
    count: usize,
) -> Result<String> {
    let root: Note = root.parse()?;
    let pattern: IntervalPattern = pattern.parse()?;
    let required = chord_of(root, &pattern);
    let window = repository.window();

    let shapes = find_shapes_in(repository.instrument(), window, &required)?;
    if shapes.is_empty() {
        return Ok(format!(
            "{} {} has no playable shape within frets {}-{}",
            root,
            required,
            window.min(),
            window.max()
        ));
    }

    let mut output = format!(
        "{} {} {} ({} shapes found)",
        root.to_string().cyan(),
        pattern,
        required,
        shapes.len()
    );
    for (rank, shape) in shapes.iter().take(count).enumerate() {
        let notes: Vec<String> = shape.notes().iter().map(|n| n.to_string()).collect();
        output.push_str(&format!(
            "\n  {}. {}  fingers: {}, span: {}  [{}]",
            rank + 1,
            shape.to_string().bright_green(),
            shape.finger_count(),
            shape.span(),
            notes.join(", ")
        ));
    }
    Ok(output)
}

/// JSON for one chord, or for the whole collection when `name` is empty
pub fn export_chords(repository: &ChordRepository, name: &str) -> Result<String> {
    if name.is_empty() {
        return Ok(ChordCollection::from_repository(repository).to_json()?);
    }
    let chord = repository
        .get(name)
        .ok_or_else(|| anyhow!("No chord named '{}'", name))?;
    Ok(write_chord(chord)?)
}

/// Handle `list` command
pub fn cmd_list(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Message(list_chords(&ctx.repository))
}

/// Handle `show <name>` command
pub fn cmd_show(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: show <name>".to_string());
    }
    into_result(show_chord(&ctx.repository, args))
}

/// Handle `shape <root> <pattern> [count]` command
pub fn cmd_shape(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let parts: Vec<&str> = args.split_whitespace().collect();
    let (root, pattern, count) = match parts.as_slice() {
        [root, pattern] => (*root, *pattern, ctx.shapes_shown),
        [root, pattern, count] => match count.parse::<usize>() {
            Ok(count) if count > 0 => (*root, *pattern, count),
            _ => return CommandResult::Error(format!("Invalid count: {}", count)),
        },
        _ => return CommandResult::Error("Usage: shape <root> <pattern> [count]".to_string()),
    };
    into_result(search_shapes(&ctx.repository, root, pattern, count))
}

/// Handle `add <root> <quality>` or `add <name> <root> <pattern>` command
pub fn cmd_add(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let parts: Vec<&str> = args.split_whitespace().collect();
    into_result(add_chord(&mut ctx.repository, &parts))
}

fn add_chord(repository: &mut ChordRepository, parts: &[&str]) -> Result<String> {
    let chord = match parts {
        [root, quality] => {
            let root: Note = root.parse()?;
            let quality: Quality = quality.parse()?;
            repository.add_chord(root, quality)?
        }
        [name, root, pattern] => {
            let root: Note = root.parse()?;
            let pattern: IntervalPattern = pattern.parse()?;
            repository.add(name, chord_of(root, &pattern))?
        }
        _ => bail!("Usage: add <root> <quality> | add <name> <root> <pattern>"),
    };
    Ok(format!("{} {}", "Added".bright_green(), chord))
}

/// Handle `remove <name>` command
pub fn cmd_remove(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: remove <name>".to_string());
    }
    match ctx.repository.remove(args) {
        Some(chord) => CommandResult::Message(format!("Removed {}", chord.name())),
        None => CommandResult::Error(format!("No chord named '{}'", args)),
    }
}

/// Handle `export [name]` command
pub fn cmd_export(args: &str, ctx: &mut CommandContext) -> CommandResult {
    into_result(export_chords(&ctx.repository, args))
}

/// Handle `import <json>` command
pub fn cmd_import(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: import <json document>".to_string());
    }
    let chord = match read_chord(args, Some(ctx.repository.instrument())) {
        Ok(chord) => chord,
        Err(e) => return CommandResult::Error(e.to_string()),
    };
    let name = chord.name().to_string();
    match ctx.repository.insert(chord) {
        Ok(Some(_)) => CommandResult::Message(format!("Replaced {}", name)),
        Ok(None) => CommandResult::Message(format!("Imported {}", name)),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

fn into_result(result: Result<String>) -> CommandResult {
    match result {
        Ok(message) => CommandResult::Message(message),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}
