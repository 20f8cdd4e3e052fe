//! REPL (Read-Eval-Print Loop) for the practice companion

use crate::audio::host::HostHandle;
use crate::commands::{create_registry, CommandContext, CommandRegistry, CommandResult};
use anyhow::{anyhow, Result};
use colored::*;
use crossbeam_channel::{unbounded, Receiver, Sender};
use etude_core::PlaybackEvent;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::thread;
use tracing::trace;

/// Types of events the REPL loop handles
enum ReplEvent {
    Input(Result<String, ReadlineError>),
}

/// Interactive REPL driving one playback host
pub struct Repl {
    editor: Option<DefaultEditor>,
    registry: CommandRegistry,
    ctx: CommandContext,

    tx_input: Sender<ReplEvent>,
    rx_input: Receiver<ReplEvent>,
}

impl Repl {
    pub fn new(host: HostHandle, beats_per_bar: u32) -> Result<Self> {
        let editor =
            DefaultEditor::new().map_err(|e| anyhow!("Failed to initialize REPL: {}", e))?;
        let (tx_input, rx_input) = unbounded();

        Ok(Repl {
            editor: Some(editor),
            registry: create_registry(),
            ctx: CommandContext::new(host, beats_per_bar),
            tx_input,
            rx_input,
        })
    }

    /// Start the REPL loop
    pub fn run(&mut self) -> Result<()> {
        println!(
            "{} {}",
            "🎵".bright_yellow(),
            "Etude ear-training companion".bright_cyan().bold()
        );
        println!(
            "Try: {}, {}, {}",
            "metronome 96".cyan(),
            "interval P5".cyan(),
            "quiz chord 5".cyan()
        );
        println!(
            "Type '{}' for more information, '{}' or {} to exit.\n",
            "help".bright_green(),
            "quit".bright_red(),
            "Ctrl+C".bright_red()
        );

        let mut editor = self
            .editor
            .take()
            .ok_or_else(|| anyhow!("REPL is already running"))?;
        let tx_input = self.tx_input.clone();

        thread::spawn(move || loop {
            let prompt = format!("{} ", "etude>".bright_magenta().bold());
            match editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if !line.is_empty() {
                        let _ = editor.add_history_entry(&line);
                    }
                    if tx_input.send(ReplEvent::Input(Ok(line))).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    let _ = tx_input.send(ReplEvent::Input(Err(err)));
                    break;
                }
            }
        });

        let playback = self.ctx.host.events().clone();

        loop {
            crossbeam_channel::select! {
                recv(self.rx_input) -> msg => match msg {
                    Ok(ReplEvent::Input(Ok(line))) => {
                        if line.is_empty() {
                            continue;
                        }
                        if !self.handle_line(&line) {
                            break;
                        }
                    }
                    Ok(ReplEvent::Input(Err(ReadlineError::Interrupted)))
                    | Ok(ReplEvent::Input(Err(ReadlineError::Eof))) => {
                        println!("{} 🎵", "Goodbye!".bright_cyan());
                        break;
                    }
                    Ok(ReplEvent::Input(Err(err))) => {
                        println!(
                            "{} {}",
                            "Error reading input:".bright_red().bold(),
                            err.to_string().red()
                        );
                        break;
                    }
                    Err(_) => break, // Channel closed
                },

                recv(playback) -> msg => match msg {
                    Ok(event) => {
                        if let Some(text) = event_message(&event) {
                            println!("{}", text);
                        }
                    }
                    Err(_) => break, // Playback thread gone
                }
            }
        }

        self.ctx.host.shutdown();
        Ok(())
    }

    /// Run one line; false means leave the REPL
    fn handle_line(&mut self, line: &str) -> bool {
        match self.registry.execute(line, &mut self.ctx) {
            CommandResult::Success => {}
            CommandResult::Message(msg) => println!("{}", msg),
            CommandResult::Exit => {
                println!("{} 🎵", "Goodbye!".bright_cyan());
                return false;
            }
            CommandResult::Error(e) => {
                println!("{} {}", "Error:".bright_red().bold(), e.red());
            }
            CommandResult::NotACommand => {
                println!(
                    "{} Unknown command '{}'. Type '{}' for a list.",
                    "?".bright_yellow(),
                    line,
                    "help".bright_green()
                );
            }
        }
        true
    }
}

/// What to print for a playback notification. Clicks and lifecycle changes
/// are already visible or audible, so only the end of a script is shown.
fn event_message(event: &PlaybackEvent) -> Option<String> {
    match event {
        PlaybackEvent::Completed { ends_at } => {
            trace!(ends_at, "script completed");
            Some(format!("{}", "✓ Done".dimmed()))
        }
        PlaybackEvent::Beat { index, at } => {
            trace!(index, at, "beat");
            None
        }
        PlaybackEvent::Started | PlaybackEvent::Stopped | PlaybackEvent::TempoChanged(_) => None,
    }
}

/// Convenience function to start the REPL
pub fn start(host: HostHandle, beats_per_bar: u32) -> Result<()> {
    let mut repl = Repl::new(host, beats_per_bar)?;
    repl.run()
}
