//! Technique practice: draw a scale, chord or arpeggio requirement and run
//! the metronome at its tempo

use crate::commands::{CommandContext, CommandResult};
use colored::*;
use etude_core::curriculum::technique::{
    key_root, random_exercise, ChordStyle, ExerciseFilter, TechniqueKind,
};
use etude_core::curriculum::{Level, Mode};
use etude_core::{Program, Trainer};

const USAGE: &str =
    "Usage: technique [level] [scales|chords|arpeggios] [root] [major|minor] [solid|broken] [inversions]";

/// Handle `technique [level] [type] [root] [mode] [style] [inversions]`
///
/// The level defaults to the quiz in progress, or the highest level.
pub fn cmd_technique(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let (level, filter) = match parse_options(args, ctx.trainer.as_ref()) {
        Ok(parsed) => parsed,
        Err(e) => return CommandResult::Error(e),
    };
    let exercise = match random_exercise(level, &filter) {
        Ok(exercise) => exercise,
        Err(e) => return CommandResult::Error(e.to_string()),
    };

    let program = Program::Metronome {
        beats_per_bar: ctx.beats_per_bar,
    };
    let started = ctx
        .host
        .set_tempo(i64::from(exercise.tempo))
        .and_then(|_| ctx.host.play(program));
    match started {
        Ok(()) => CommandResult::Message(format!(
            "{} {}\n{}",
            "🎹".bright_yellow(),
            exercise.to_string().bright_cyan(),
            format!("Metronome running at {} BPM ('stop' to end)", exercise.tempo).dimmed()
        )),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

fn parse_options(args: &str, trainer: Option<&Trainer>) -> Result<(Level, ExerciseFilter), String> {
    let mut level = trainer.map_or(Level::LAST, Trainer::level);
    let mut filter = ExerciseFilter::default();

    for word in args.split_whitespace() {
        if let Ok(l) = word.parse::<Level>() {
            level = l;
        } else if let Ok(kind) = word.parse::<TechniqueKind>() {
            filter.kind = Some(kind);
        } else if let Ok(mode) = word.parse::<Mode>() {
            filter.mode = Some(mode);
        } else {
            match word.to_ascii_lowercase().as_str() {
                "solid" | "block" | "blocked" => filter.style = Some(ChordStyle::Solid),
                "broken" => filter.style = Some(ChordStyle::Broken),
                "inversions" | "inv" => filter.inversions = true,
                _ => match key_root(word) {
                    Some(root) => filter.root = Some(root),
                    None => return Err(format!("Unknown technique option '{}'. {}", word, USAGE)),
                },
            }
        }
    }
    Ok((level, filter))
}
