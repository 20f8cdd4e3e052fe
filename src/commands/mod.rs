//! Command registry for REPL commands
//!
//! Every line typed at the prompt is matched against the registered
//! prefixes, longest first, and handed to that command's handler.

pub mod general;
pub mod playback;
pub mod quiz;
pub mod technique;

use crate::audio::host::HostHandle;
use etude_core::Trainer;

/// Result of executing a command
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// Command executed successfully, continue REPL
    Success,
    /// Command executed, show this message
    Message(String),
    /// Exit the REPL
    Exit,
    /// No command matches the input
    NotACommand,
    /// Error occurred
    Error(String),
}

/// Context passed to command handlers
pub struct CommandContext {
    pub host: HostHandle,
    /// The quiz in progress, if any
    pub trainer: Option<Trainer>,
    pub beats_per_bar: u32,
}

impl CommandContext {
    pub fn new(host: HostHandle, beats_per_bar: u32) -> Self {
        Self {
            host,
            trainer: None,
            beats_per_bar,
        }
    }
}

/// A command handler function
pub type CommandHandler = fn(&str, &mut CommandContext) -> CommandResult;

/// Registry of available commands
pub struct CommandRegistry {
    /// Sorted by prefix length descending for longest-match-first lookup
    commands: Vec<(String, CommandHandler)>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Register a command with its prefix
    pub fn register(&mut self, prefix: &str, handler: CommandHandler) {
        self.commands.push((prefix.to_string(), handler));
        self.commands.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }

    /// Execute a command, returning NotACommand if no match found
    pub fn execute(&self, input: &str, ctx: &mut CommandContext) -> CommandResult {
        let input = input.trim();
        for (prefix, handler) in &self.commands {
            if input == prefix || input.starts_with(&format!("{} ", prefix)) {
                let args = input[prefix.len()..].trim();
                return handler(args, ctx);
            }
        }
        CommandResult::NotACommand
    }

    /// Get all registered command prefixes
    pub fn list_commands(&self) -> Vec<&str> {
        self.commands.iter().map(|(p, _)| p.as_str()).collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a fully populated command registry with all built-in commands
pub fn create_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    // Playback
    registry.register("metronome", playback::cmd_metronome);
    registry.register("start", playback::cmd_start);
    registry.register("stop", playback::cmd_stop);
    registry.register("tempo", playback::cmd_tempo);
    registry.register("dial", playback::cmd_dial);
    registry.register("status", playback::cmd_status);
    registry.register("interval", playback::cmd_interval);
    registry.register("chord", playback::cmd_chord);
    registry.register("progression", playback::cmd_progression);
    registry.register("melody", playback::cmd_melody);

    // Quiz
    registry.register("quiz", quiz::cmd_quiz);
    registry.register("guess", quiz::cmd_guess);
    registry.register("replay", quiz::cmd_replay);
    registry.register("answer", quiz::cmd_answer);
    registry.register("levels", quiz::cmd_levels);
    registry.register("technique", technique::cmd_technique);

    // General
    registry.register("help", general::cmd_help);
    registry.register("quit", general::cmd_quit);
    registry.register("exit", general::cmd_quit);

    registry
}


#[cfg(test)]
mod tests {
    use super::*;

    fn echo(args: &str, _ctx: &mut CommandContext) -> CommandResult {
        CommandResult::Message(args.to_string())
    }

    fn echo_long(args: &str, _ctx: &mut CommandContext) -> CommandResult {
        CommandResult::Message(format!("long:{args}"))
    }

    #[test]
    fn test_longest_prefix_wins() {
        let (mut ctx, _clock) = test_support::context();
        let mut registry = CommandRegistry::new();
        registry.register("play", echo);
        registry.register("play melody", echo_long);

        assert_eq!(
            registry.execute("play melody D major", &mut ctx),
            CommandResult::Message("long:D major".to_string())
        );
        assert_eq!(
            registry.execute("play C4", &mut ctx),
            CommandResult::Message("C4".to_string())
        );
        assert_eq!(registry.list_commands(), vec!["play melody", "play"]);
    }

    #[test]
    fn test_prefix_must_end_at_word_boundary() {
        let (mut ctx, _clock) = test_support::context();
        let mut registry = CommandRegistry::new();
        registry.register("stop", echo);
        assert_eq!(registry.execute("stopwatch", &mut ctx), CommandResult::NotACommand);
        assert_eq!(
            registry.execute("  stop  ", &mut ctx),
            CommandResult::Message(String::new())
        );
    }

    #[test]
    fn test_builtin_registry() {
        let registry = create_registry();
        let commands = registry.list_commands();
        for name in ["metronome", "tempo", "quiz", "guess", "help", "quit"] {
            assert!(commands.contains(&name), "missing {name}");
        }
        let (mut ctx, _clock) = test_support::context();
        assert_eq!(registry.execute("exit", &mut ctx), CommandResult::Exit);
        assert_eq!(registry.execute("sing", &mut ctx), CommandResult::NotACommand);
    }
}
