//! General REPL commands (help, quit)

use crate::commands::{CommandContext, CommandResult};
use colored::*;

/// Handle `help` command
pub fn cmd_help(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    print_help();
    CommandResult::Success
}

/// Handle `quit` or `exit` command
pub fn cmd_quit(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Exit
}

/// Print help information
fn print_help() {
    println!("{}", "🎸 Fretboard Help".bold());
    println!("{}", "=================".bold());
    println!();
    println!("{}", "Chord Library:".green());
    println!("  {}                    - List every chord and its shape", "list".cyan());
    println!("  {}             - Show one chord (or just type its name)", "show <name>".cyan());
    println!(
        "  {}  - Add a chord named from root and quality",
        "add <root> <quality>".cyan()
    );
    println!(
        "  {} - Add a chord under any name",
        "add <name> <root> <pattern>".cyan()
    );
    println!("  {}           - Remove a chord", "remove <name>".cyan());
    println!();
    println!("{}", "Shape Search:".green());
    println!(
        "  {} - Ranked shapes for any chord",
        "shape <root> <pattern> [count]".cyan()
    );
    println!("  Qualities: maj, min, 7, maj7, dim");
    println!("  Patterns:  a quality, or offsets without spaces such as 0,4,7,9");
    println!("  Roots:     note with octave, e.g. C1, F#2, Bb0");
    println!();
    println!("{}", "Documents:".green());
    println!("  {}           - Print one chord, or all, as JSON", "export [name]".cyan());
    println!("  {}           - Read a chord document", "import <json>".cyan());
    println!();
    println!("{}", "Instrument:".green());
    println!(
        "  {}     - Show or switch (guitar, drop-d, ukulele, bass)",
        "instrument [preset]".cyan()
    );
    println!("  {}       - Show or set the fret window", "window [min max]".cyan());
    println!();
    println!("{}", "Examples:".green());
    println!("  fretboard> {}", "shape C1 maj".cyan());
    println!("  fretboard> {}", "add A1 min".cyan());
    println!("  fretboard> {}", "add Csix C1 0,4,7,9".cyan());
    println!("  fretboard> {}", "window 0 5".cyan());
    println!();
    println!("{}", "Other Commands:".green());
    println!("  {}              - Show this help", "help".bright_green());
    println!("  {}              - Exit the REPL", "quit".bright_red());
}
