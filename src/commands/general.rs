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
    println!("{}", "🎵 Etude Help".bold());
    println!("{}", "=============".bold());
    println!();
    println!("{}", "Metronome:".green());
    println!("  {}     - Start the metronome, optionally at a tempo", "metronome [bpm]".cyan());
    println!("  {}               - Play the loaded program from the top", "start".cyan());
    println!("  {}                - Stop playback", "stop".cyan());
    println!("  {}         - Show or type a tempo (clamped to 40-200)", "tempo [bpm]".cyan());
    println!("  {}     - Turn the tempo knob (0° = slowest)", "dial <degrees>".cyan());
    println!("  {}              - Show playback state", "status".cyan());
    println!();
    println!("{}", "Listening:".green());
    println!(
        "  {}  - e.g. interval P5 G3 harmonic",
        "interval <name> [root] [ascending|descending|harmonic]".cyan()
    );
    println!(
        "  {}          - e.g. chord Dominant 7th (Root) A3 up",
        "chord <name> [root] [block|up|down]".cyan()
    );
    println!(
        "  {} - e.g. progression I IV V I in G3",
        "progression <numerals> [in <tonic> [major|minor]]".cyan()
    );
    println!("  {}        - e.g. melody D major", "melody <key>".cyan());
    println!();
    println!("{}", "Quiz:".green());
    println!(
        "  {} - Start a quiz or ask the next question",
        "quiz [interval|chord|progression|melody] [level] [playback...]".cyan()
    );
    println!("  {}      - Answer the current question", "guess <answer>".cyan());
    println!("  {}              - Hear the question again", "replay".cyan());
    println!("  {}              - Give up and show the answer", "answer".cyan());
    println!("  {}       - What each RCM level tests", "levels [kind]".cyan());
    println!();
    println!("{}", "Technique:".green());
    println!(
        "  {} - Draw an exercise and start the metronome at its tempo",
        "technique [level] [scales|chords|arpeggios] [root] [major|minor] [solid|broken] [inversions]".cyan()
    );
    println!();
    println!("{}", "Examples:".green());
    println!("  etude> {}", "metronome 96".cyan());
    println!("  etude> {}", "quiz chord 5 block up".cyan());
    println!("  etude> {}", "guess Dominant 7th (Root)".cyan());
    println!("  etude> {}", "quiz progression 8".cyan());
    println!("  etude> {}", "guess I vi IV V".cyan());
    println!("  etude> {}", "technique 8 scales Eb minor".cyan());
    println!();
    println!(
        "Type '{}' or press {} to exit.",
        "quit".bright_red(),
        "Ctrl+C".bright_red()
    );
}
