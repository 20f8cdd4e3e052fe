//! Ear-training quiz commands

use crate::commands::{CommandContext, CommandResult};
use colored::*;
use etude_core::curriculum::chords::level_chords;
use etude_core::curriculum::intervals::level_intervals;
use etude_core::curriculum::melodies::RCM10_MELODIES;
use etude_core::curriculum::progressions::{level_chord_set, preset_progressions};
use etude_core::curriculum::{Level, Mode};
use etude_core::sequencer::{ChordPlayback, IntervalPlayback};
use etude_core::trainer::Feedback;
use etude_core::{FixedScript, Program, QuizKind, Trainer};

fn play(ctx: &mut CommandContext, script: FixedScript) -> Result<(), String> {
    ctx.host
        .play(Program::Script(script))
        .map_err(|e| e.to_string())
}

/// Handle `quiz [kind] [level] [playback modes...]`
///
/// With no arguments the current quiz moves on to its next question. Naming
/// a kind or level starts a fresh quiz and resets the score.
pub fn cmd_quiz(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if !args.is_empty() || ctx.trainer.is_none() {
        match new_trainer(args, ctx.trainer.as_ref()) {
            Ok(trainer) => {
                println!(
                    "{} {} quiz, {}",
                    "🎓".bright_yellow(),
                    trainer.kind().to_string().bright_cyan(),
                    trainer.level()
                );
                ctx.trainer = Some(trainer);
            }
            Err(e) => return CommandResult::Error(e),
        }
    }

    let Some(trainer) = ctx.trainer.as_mut() else {
        return CommandResult::Error("No quiz in progress".to_string());
    };
    let (prompt, script) = match trainer.next_question() {
        Ok(question) => (question.prompt.clone(), question.script.clone()),
        Err(e) => return CommandResult::Error(e.to_string()),
    };
    match play(ctx, script) {
        Ok(()) => CommandResult::Message(format!("{} {}", "?".bright_magenta().bold(), prompt)),
        Err(e) => CommandResult::Error(e),
    }
}

fn new_trainer(args: &str, current: Option<&Trainer>) -> Result<Trainer, String> {
    let mut kind = current.map_or(QuizKind::Interval, Trainer::kind);
    let mut level = current.map_or(Level::FIRST, Trainer::level);
    let mut intervals = Vec::new();
    let mut chords = Vec::new();

    for word in args.split_whitespace() {
        if let Ok(k) = word.parse::<QuizKind>() {
            kind = k;
        } else if let Ok(l) = word.parse::<Level>() {
            level = l;
        } else {
            match word.to_ascii_lowercase().as_str() {
                "ascending" | "asc" => intervals.push(IntervalPlayback::Ascending),
                "descending" | "desc" => intervals.push(IntervalPlayback::Descending),
                "harmonic" => intervals.push(IntervalPlayback::Harmonic),
                "block" => chords.push(ChordPlayback::Block),
                "up" | "broken" => chords.push(ChordPlayback::Up),
                "down" => chords.push(ChordPlayback::Down),
                _ => {
                    return Err(format!(
                        "Unknown quiz option '{}'. Usage: quiz [interval|chord|progression|melody] [level] [playback...]",
                        word
                    ))
                }
            }
        }
    }

    let mut trainer = Trainer::new(kind, level);
    trainer.set_interval_playback(intervals);
    trainer.set_chord_playback(chords);
    Ok(trainer)
}

/// Handle `guess <answer>`
pub fn cmd_guess(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: guess <answer>".to_string());
    }
    let Some(trainer) = ctx.trainer.as_mut() else {
        return CommandResult::Error("No quiz in progress. Start one with 'quiz'".to_string());
    };
    match trainer.guess(args) {
        Ok(feedback @ Feedback::Correct) => CommandResult::Message(format!(
            "{}  score {}  ({} for the next one)",
            feedback,
            trainer.score(),
            "quiz".bright_green()
        )),
        Ok(feedback @ Feedback::Step { .. }) => {
            let next = trainer.current().and_then(|q| q.next_chord()).cloned();
            match next.map_or(Ok(()), |chord| play(ctx, chord)) {
                Ok(()) => CommandResult::Message(feedback.to_string()),
                Err(e) => CommandResult::Error(e),
            }
        }
        Ok(feedback) => CommandResult::Message(feedback.to_string()),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `replay`
pub fn cmd_replay(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let Some(trainer) = ctx.trainer.as_mut() else {
        return CommandResult::Error("No quiz in progress".to_string());
    };
    let script = match trainer.replay() {
        Ok(script) => script,
        Err(e) => return CommandResult::Error(e.to_string()),
    };
    let left = trainer.current().and_then(|q| q.replays_left());
    match play(ctx, script) {
        Ok(()) => match left {
            Some(n) => CommandResult::Message(format!("{} replays left", n).dimmed().to_string()),
            None => CommandResult::Success,
        },
        Err(e) => CommandResult::Error(e),
    }
}

/// Handle `answer`: give up and show the answer
pub fn cmd_answer(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let Some(trainer) = ctx.trainer.as_mut() else {
        return CommandResult::Error("No quiz in progress".to_string());
    };
    match trainer.reveal() {
        Ok(answer) => CommandResult::Message(format!("{} {}", "Answer:".bold(), answer.bright_cyan())),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `levels [kind]`: what each level tests
pub fn cmd_levels(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let kind = if args.is_empty() {
        ctx.trainer.as_ref().map_or(QuizKind::Interval, Trainer::kind)
    } else {
        match args.parse::<QuizKind>() {
            Ok(kind) => kind,
            Err(e) => return CommandResult::Error(e.to_string()),
        }
    };
    CommandResult::Message(describe_levels(kind))
}

fn describe_levels(kind: QuizKind) -> String {
    let mut out = format!("{} levels", kind).bold().to_string();
    if kind == QuizKind::Melody {
        let keys: Vec<&str> = RCM10_MELODIES.iter().map(|m| m.key).collect();
        out.push_str(&format!("\n  {}: {}", Level::LAST, keys.join(", ")));
        return out;
    }
    for level in Level::all() {
        let items: Vec<String> = match kind {
            QuizKind::Interval => level_intervals(level)
                .iter()
                .map(|i| i.short.to_string())
                .collect(),
            QuizKind::Chord => level_chords(level).iter().map(|c| c.name.to_string()).collect(),
            QuizKind::Progression => {
                let presets = preset_progressions(level);
                if presets.is_empty() {
                    [Mode::Major, Mode::Minor]
                        .iter()
                        .map(|&mode| level_chord_set(level, mode).join(" "))
                        .filter(|set| !set.is_empty())
                        .collect()
                } else {
                    presets.iter().map(|p| p.join("-")).collect()
                }
            }
            QuizKind::Melody => Vec::new(),
        };
        if items.is_empty() {
            continue;
        }
        out.push_str(&format!("\n  {}: {}", level, items.join(", ").cyan()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context;

    #[test]
    fn test_quiz_needs_question_before_guess() {
        let (mut ctx, _clock) = context();
        assert!(matches!(cmd_guess("P5", &mut ctx), CommandResult::Error(_)));
        assert!(matches!(cmd_replay("", &mut ctx), CommandResult::Error(_)));
        assert!(matches!(cmd_answer("", &mut ctx), CommandResult::Error(_)));
    }

    #[test]
    fn test_quiz_plays_question() {
        let (mut ctx, _clock) = context();
        assert!(matches!(
            cmd_quiz("interval 2 harmonic", &mut ctx),
            CommandResult::Message(_)
        ));
        let trainer = ctx.trainer.as_ref().unwrap();
        assert_eq!(trainer.kind(), QuizKind::Interval);
        assert_eq!(trainer.level().number(), 2);
        assert!(ctx.host.status().unwrap().running);

        assert!(matches!(cmd_replay("", &mut ctx), CommandResult::Success));
        assert!(matches!(cmd_answer("", &mut ctx), CommandResult::Message(_)));
    }

    #[test]
    fn test_correct_guess_scores() {
        let (mut ctx, _clock) = context();
        cmd_quiz("chord 1", &mut ctx);
        let answer = match &ctx.trainer.as_ref().unwrap().current().unwrap().answer {
            etude_core::trainer::Answer::Chord(chord) => chord.name,
            other => panic!("unexpected answer {other:?}"),
        };
        assert!(matches!(cmd_guess(answer, &mut ctx), CommandResult::Message(_)));
        assert_eq!(ctx.trainer.as_ref().unwrap().score().correct, 1);

        // no arguments keeps the quiz and its score
        cmd_quiz("", &mut ctx);
        assert_eq!(ctx.trainer.as_ref().unwrap().score().total, 1);
    }

    #[test]
    fn test_progression_guess_scores_whole_progression() {
        let (mut ctx, _clock) = context();
        cmd_quiz("progression 5", &mut ctx);
        let symbols = match &ctx.trainer.as_ref().unwrap().current().unwrap().answer {
            etude_core::trainer::Answer::Progression { symbols, .. } => symbols.clone(),
            other => panic!("unexpected answer {other:?}"),
        };

        assert!(matches!(cmd_guess(symbols[0], &mut ctx), CommandResult::Message(_)));
        assert_eq!(ctx.trainer.as_ref().unwrap().score().total, 0);
        for symbol in &symbols[1..] {
            assert!(matches!(cmd_guess(symbol, &mut ctx), CommandResult::Message(_)));
        }
        let score = ctx.trainer.as_ref().unwrap().score();
        assert_eq!((score.correct, score.total), (1, 1));
    }

    #[test]
    fn test_bad_quiz_options() {
        let (mut ctx, _clock) = context();
        assert!(matches!(cmd_quiz("interval 11", &mut ctx), CommandResult::Error(_)));
        assert!(ctx.trainer.is_none());
        // progressions start at level 5
        assert!(matches!(cmd_quiz("progression 2", &mut ctx), CommandResult::Error(_)));
    }

    #[test]
    fn test_levels_listing() {
        let text = describe_levels(QuizKind::Interval);
        assert!(text.contains("m3"));
        let text = describe_levels(QuizKind::Progression);
        assert!(text.contains("I-IV-I"));
        let text = describe_levels(QuizKind::Melody);
        assert!(text.contains("F# minor"));
    }
}
