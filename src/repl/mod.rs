//! REPL (Read-Eval-Print Loop) for the chord library

use crate::commands::{create_registry, CommandContext, CommandRegistry, CommandResult};
use anyhow::Result;
use colored::*;
use fretboard_core::ChordRepository;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RustylineResult};

/// Interactive prompt over a chord repository
pub struct Repl {
    editor: DefaultEditor,
    registry: CommandRegistry,
    ctx: CommandContext,
}

impl Repl {
    /// Create a new REPL instance
    pub fn new(repository: ChordRepository, shapes_shown: usize) -> RustylineResult<Self> {
        let editor = DefaultEditor::new()?;
        Ok(Repl {
            editor,
            registry: create_registry(),
            ctx: CommandContext::new(repository, shapes_shown),
        })
    }

    /// Handle one line of input; `None` means the session should end
    pub fn handle_line(&mut self, line: &str) -> Option<String> {
        match self.registry.execute(line, &mut self.ctx) {
            CommandResult::Success => Some(String::new()),
            CommandResult::Message(msg) => Some(msg),
            CommandResult::Exit => None,
            CommandResult::Error(e) => Some(format!("{} {}", "Error:".bright_red().bold(), e.red())),
            CommandResult::NotACommand => {
                // A bare chord name shows that chord
                Some(match self.ctx.repository.get(line) {
                    Some(chord) => crate::commands::chords::describe_chord(chord),
                    None => format!(
                        "{} Unknown command or chord '{}'. Type '{}' for commands.",
                        "Error:".bright_red().bold(),
                        line,
                        "help".bright_green()
                    ),
                })
            }
        }
    }

    /// Start the REPL loop
    pub fn run(&mut self) -> Result<()> {
        println!(
            "{} {}",
            "🎸".bright_yellow(),
            "Fretboard chord shapes".bright_cyan().bold()
        );
        println!(
            "Instrument: {}, frets {}-{}",
            self.ctx.repository.instrument(),
            self.ctx.repository.window().min(),
            self.ctx.repository.window().max()
        );
        println!(
            "Try {}, {} or {}.",
            "list".cyan(),
            "CMaj".cyan(),
            "shape G1 maj".cyan()
        );
        println!(
            "Type '{}' for more information, '{}' or {} to exit.\n",
            "help".bright_green(),
            "quit".bright_red(),
            "Ctrl+C".bright_red()
        );

        loop {
            let prompt = format!("{} ", "fretboard>".bright_magenta().bold());
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    self.editor.add_history_entry(line.to_owned())?;

                    match self.handle_line(line) {
                        Some(output) if output.is_empty() => {}
                        Some(output) => println!("{}", output),
                        None => {
                            println!("{} 🎸", "Goodbye!".bright_cyan());
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    println!("{} 🎸", "Goodbye!".bright_cyan());
                    break;
                }
                Err(err) => {
                    println!(
                        "{} {}",
                        "Error reading input:".bright_red().bold(),
                        err.to_string().red()
                    );
                }
            }
        }

        Ok(())
    }
}

/// Convenience function to start the REPL
pub fn start(repository: ChordRepository, shapes_shown: usize) -> Result<()> {
    let mut repl = Repl::new(repository, shapes_shown)
        .map_err(|e| anyhow::anyhow!("Failed to initialize REPL: {}", e))?;
    repl.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repl() -> Repl {
        Repl::new(ChordRepository::standard().unwrap(), 3).unwrap()
    }

    #[test]
    fn test_chord_name_shows_chord() {
        let mut repl = repl();
        let output = repl.handle_line("amin").unwrap();
        assert!(output.contains("AMin"));
        assert!(output.contains("tones"));
    }

    #[test]
    fn test_unknown_input() {
        let mut repl = repl();
        let output = repl.handle_line("Gsus4").unwrap();
        assert!(output.contains("Unknown command or chord"));
    }

    #[test]
    fn test_quit_ends_session() {
        let mut repl = repl();
        assert!(repl.handle_line("quit").is_none());
    }
}
