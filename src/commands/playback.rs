//! Playback commands: metronome, tempo and playing curriculum items

use crate::commands::{CommandContext, CommandResult};
use colored::*;
use etude_core::curriculum::chords::chord_named;
use etude_core::curriculum::intervals::interval_named;
use etude_core::curriculum::melodies::melody_in;
use etude_core::curriculum::progressions::voicing;
use etude_core::curriculum::Mode;
use etude_core::sequencer::{ChordPlayback, IntervalPlayback};
use etude_core::{FixedScript, Pitch, Program};

fn parse_interval_playback(word: &str) -> Option<IntervalPlayback> {
    match word.to_ascii_lowercase().as_str() {
        "ascending" | "asc" | "up" => Some(IntervalPlayback::Ascending),
        "descending" | "desc" | "down" => Some(IntervalPlayback::Descending),
        "harmonic" | "together" => Some(IntervalPlayback::Harmonic),
        _ => None,
    }
}

fn parse_chord_playback(word: &str) -> Option<ChordPlayback> {
    match word.to_ascii_lowercase().as_str() {
        "block" | "solid" => Some(ChordPlayback::Block),
        "up" | "broken" => Some(ChordPlayback::Up),
        "down" => Some(ChordPlayback::Down),
        _ => None,
    }
}

/// Split `<name words...> [root] [mode]` from the right. The name may contain
/// spaces, so only trailing words that parse are taken off.
fn split_trailing<M>(args: &str, mode: impl Fn(&str) -> Option<M>) -> (String, Option<Pitch>, Option<M>) {
    let mut words: Vec<&str> = args.split_whitespace().collect();
    let playback = match words.last().and_then(|w| mode(*w)) {
        Some(m) => {
            words.pop();
            Some(m)
        }
        None => None,
    };
    let root = match words.last().and_then(|w| w.parse::<Pitch>().ok()) {
        Some(p) if words.len() > 1 => {
            words.pop();
            Some(p)
        }
        _ => None,
    };
    (words.join(" "), root, playback)
}

/// `<name> [root] [ascending|descending|harmonic]`
pub fn interval_script(args: &str) -> Result<FixedScript, String> {
    let (name, root, playback) = split_trailing(args, parse_interval_playback);
    if name.is_empty() {
        return Err("Usage: interval <name> [root] [ascending|descending|harmonic]".to_string());
    }
    let interval = interval_named(&name).map_err(|e| e.to_string())?;
    FixedScript::interval(
        root.unwrap_or(Pitch::MIDDLE_C),
        interval.semitones,
        playback.unwrap_or(IntervalPlayback::Ascending),
    )
    .map(|s| s.with_label(format!("{} from {}", interval.name, root.unwrap_or(Pitch::MIDDLE_C))))
    .map_err(|e| e.to_string())
}

/// `<name> [root] [block|up|down]`
pub fn chord_script(args: &str) -> Result<FixedScript, String> {
    let (name, root, playback) = split_trailing(args, parse_chord_playback);
    if name.is_empty() {
        return Err("Usage: chord <name> [root] [block|up|down]".to_string());
    }
    let chord = chord_named(&name).map_err(|e| e.to_string())?;
    let root = root.unwrap_or(Pitch::MIDDLE_C);
    FixedScript::chord(root, chord.offsets, playback.unwrap_or(ChordPlayback::Block))
        .map(|s| s.with_label(format!("{} on {}", chord.name, root)))
        .map_err(|e| e.to_string())
}

/// `<symbols...> [in <tonic> [major|minor]]`
///
/// Without a mode, a progression starting on a lower-case numeral is minor.
pub fn progression_script(args: &str) -> Result<FixedScript, String> {
    let (symbols_part, key_part) = match args.split_once(" in ") {
        Some((symbols, key)) => (symbols, Some(key)),
        None => (args, None),
    };
    let symbols: Vec<&str> = symbols_part
        .split(|c: char| c.is_whitespace() || c == ',' || c == '-')
        .filter(|s| !s.is_empty())
        .collect();
    let first = symbols
        .first()
        .ok_or_else(|| "Usage: progression <symbols...> [in <tonic> [major|minor]]".to_string())?;

    let mut tonic = Pitch::MIDDLE_C;
    let mut mode = if first.starts_with('i') {
        Mode::Minor
    } else {
        Mode::Major
    };
    if let Some(key) = key_part {
        let mut words = key.split_whitespace();
        if let Some(word) = words.next() {
            tonic = word
                .parse()
                .map_err(|_| format!("'{}' is not a note like C4 or Bb3", word))?;
        }
        if let Some(word) = words.next() {
            mode = word.parse().map_err(|e: etude_core::CurriculumError| e.to_string())?;
        }
    }

    let voicings = symbols
        .iter()
        .map(|symbol| voicing(symbol, mode, tonic))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;
    FixedScript::progression(&voicings)
        .map(|s| s.with_label(format!("{} in {} {}", symbols.join(" - "), tonic, mode)))
        .map_err(|e| e.to_string())
}

/// `<key>`, one of the melody-playback keys; the tonic triad plays first
pub fn melody_script(args: &str) -> Result<FixedScript, String> {
    if args.is_empty() {
        return Err("Usage: melody <key>, e.g. melody D major".to_string());
    }
    let item = melody_in(args).map_err(|e| e.to_string())?;
    item.script(true).map_err(|e| e.to_string())
}

/// Program described by a command line such as `interval P5 G3 harmonic`
pub fn parse_program(input: &str, beats_per_bar: u32) -> Result<Program, String> {
    let input = input.trim();
    let (word, rest) = input.split_once(' ').unwrap_or((input, ""));
    let rest = rest.trim();
    let script = match word {
        "metronome" => return Ok(Program::Metronome { beats_per_bar }),
        "interval" => interval_script(rest)?,
        "chord" => chord_script(rest)?,
        "progression" => progression_script(rest)?,
        "melody" => melody_script(rest)?,
        _ => {
            return Err(format!(
                "Unknown program '{}'. Use metronome, interval, chord, progression or melody",
                word
            ))
        }
    };
    Ok(Program::Script(script))
}

fn play(ctx: &mut CommandContext, script: Result<FixedScript, String>) -> CommandResult {
    let script = match script {
        Ok(script) => script,
        Err(e) => return CommandResult::Error(e),
    };
    let label = script.label().to_string();
    match ctx.host.play(Program::Script(script)) {
        Ok(()) => CommandResult::Message(format!("{} {}", "▶ Playing".bright_green(), label)),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `metronome [bpm]`
pub fn cmd_metronome(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if !args.is_empty() {
        if let Err(e) = ctx.host.type_tempo(args) {
            return CommandResult::Error(e.to_string());
        }
    }
    let program = Program::Metronome {
        beats_per_bar: ctx.beats_per_bar,
    };
    match ctx.host.play(program).and_then(|_| ctx.host.status()) {
        Ok(status) => CommandResult::Message(
            format!(
                "🎵 Metronome at {} ({} beats per bar)",
                status.tempo, ctx.beats_per_bar
            )
            .bright_green()
            .to_string(),
        ),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `start`: play whatever is loaded from the top
pub fn cmd_start(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    match ctx.host.start() {
        Ok(()) => CommandResult::Success,
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `stop`
pub fn cmd_stop(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    match ctx.host.stop() {
        Ok(()) => CommandResult::Message("⏹ Stopped".yellow().to_string()),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `tempo [bpm]`. Typed values are clamped to the tempo range and
/// anything that is not a number keeps the current tempo.
pub fn cmd_tempo(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return match ctx.host.status() {
            Ok(status) => CommandResult::Message(format!("Current tempo: {}", status.tempo)),
            Err(e) => CommandResult::Error(e.to_string()),
        };
    }
    match ctx.host.type_tempo(args) {
        Ok(tempo) => CommandResult::Message(
            format!("🎵 Tempo set to {}", tempo).bright_green().to_string(),
        ),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `dial <degrees>`
pub fn cmd_dial(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let degrees = match args.parse::<f64>() {
        Ok(d) => d,
        Err(_) => return CommandResult::Error("Usage: dial <degrees>, e.g. dial 180".to_string()),
    };
    match ctx.host.dial(degrees) {
        Ok(tempo) => CommandResult::Message(format!(
            "{} {:.0}° → {}",
            "🎛".bright_cyan(),
            degrees.rem_euclid(360.0),
            tempo
        )),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `status`
pub fn cmd_status(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let status = match ctx.host.status() {
        Ok(status) => status,
        Err(e) => return CommandResult::Error(e.to_string()),
    };

    let state = if status.running {
        "playing".bright_green()
    } else {
        "stopped".yellow()
    };
    let mut out = format!(
        "{} {}\n  tempo: {} (dial at {:.0}°)",
        "Status:".bold(),
        state,
        status.tempo,
        status.dial_angle
    );
    if let Some(playing) = &status.playing {
        out.push_str(&format!("\n  program: {}", playing));
    }
    if status.metronome {
        if let Some(beat) = status.beat {
            out.push_str(&format!(
                "\n  beat: {} of {}",
                beat + 1,
                status.beats_per_bar
            ));
        }
    }
    if let Some(next) = status.next_event_time {
        out.push_str(&format!("\n  next event: {:.3}s", next));
    }
    if !status.ready {
        out.push_str(&format!("\n  {}", "sounds still loading".dimmed()));
    }
    CommandResult::Message(out)
}

/// Handle `interval <name> [root] [ascending|descending|harmonic]`
pub fn cmd_interval(args: &str, ctx: &mut CommandContext) -> CommandResult {
    play(ctx, interval_script(args))
}

/// Handle `chord <name> [root] [block|up|down]`
pub fn cmd_chord(args: &str, ctx: &mut CommandContext) -> CommandResult {
    play(ctx, chord_script(args))
}

/// Handle `progression <symbols...> [in <tonic> [major|minor]]`
pub fn cmd_progression(args: &str, ctx: &mut CommandContext) -> CommandResult {
    play(ctx, progression_script(args))
}

/// Handle `melody <key>`
pub fn cmd_melody(args: &str, ctx: &mut CommandContext) -> CommandResult {
    play(ctx, melody_script(args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context;

    #[test]
    fn test_interval_arguments() {
        let script = interval_script("Perfect 5th G3 harmonic").unwrap();
        assert_eq!(script.entries().len(), 1);
        let pitches = &script.entries()[0].pitches;
        assert_eq!(pitches[0], "G3".parse::<Pitch>().unwrap());
        assert_eq!(pitches[1], "D4".parse::<Pitch>().unwrap());

        let script = interval_script("m3").unwrap();
        assert_eq!(script.entries().len(), 2);
        assert_eq!(script.entries()[0].pitches, vec![Pitch::MIDDLE_C]);

        let script = interval_script("M3 descending").unwrap();
        assert_eq!(script.entries()[1].pitches, vec![Pitch::MIDDLE_C]);

        assert!(interval_script("").is_err());
        assert!(interval_script("Perfect 13th").is_err());
    }

    #[test]
    fn test_chord_arguments() {
        let script = chord_script("Dominant 7th (Root) A3 up").unwrap();
        assert_eq!(script.entries().len(), 4);
        assert_eq!(script.entries()[0].pitches, vec!["A3".parse::<Pitch>().unwrap()]);

        let script = chord_script("minor (root)").unwrap();
        assert_eq!(script.entries().len(), 1);
        assert_eq!(script.entries()[0].pitches.len(), 3);
    }

    #[test]
    fn test_progression_arguments() {
        let script = progression_script("I IV V I").unwrap();
        assert_eq!(script.entries().len(), 4);
        assert_eq!(script.entries()[0].pitches.len(), 4);

        let script = progression_script("i-iv-V-i in A3").unwrap();
        assert_eq!(script.entries().len(), 4);

        let script = progression_script("I V I in G3 major").unwrap();
        assert_eq!(script.entries().len(), 3);

        assert!(progression_script("").is_err());
        assert!(progression_script("I IV in H9").is_err());
        assert!(progression_script("I bogus").is_err());
    }

    #[test]
    fn test_parse_program() {
        assert_eq!(
            parse_program("metronome", 3).unwrap(),
            Program::Metronome { beats_per_bar: 3 }
        );
        assert!(matches!(
            parse_program("melody D major", 4).unwrap(),
            Program::Script(_)
        ));
        assert!(parse_program("melody Z major", 4).is_err());
        assert!(parse_program("drums", 4).is_err());
    }

    #[test]
    fn test_tempo_command() {
        let (mut ctx, _clock) = context();
        assert!(matches!(cmd_tempo("140", &mut ctx), CommandResult::Message(_)));
        assert_eq!(ctx.host.status().unwrap().tempo.bpm(), 140);

        cmd_tempo("fast", &mut ctx);
        assert_eq!(ctx.host.status().unwrap().tempo.bpm(), 140);

        cmd_tempo("999", &mut ctx);
        assert_eq!(ctx.host.status().unwrap().tempo.bpm(), 200);

        assert!(matches!(cmd_dial("nope", &mut ctx), CommandResult::Error(_)));
        cmd_dial("180", &mut ctx);
        assert_eq!(ctx.host.status().unwrap().tempo.bpm(), 120);
    }

    #[test]
    fn test_metronome_start_stop() {
        let (mut ctx, _clock) = context();
        assert!(matches!(
            cmd_metronome("90", &mut ctx),
            CommandResult::Message(_)
        ));
        let status = ctx.host.status().unwrap();
        assert!(status.running);
        assert!(status.metronome);
        assert_eq!(status.tempo.bpm(), 90);

        cmd_stop("", &mut ctx);
        assert!(!ctx.host.status().unwrap().running);
        assert!(matches!(cmd_status("", &mut ctx), CommandResult::Message(_)));
    }

    #[test]
    fn test_play_commands_report_errors() {
        let (mut ctx, _clock) = context();
        assert!(matches!(cmd_interval("", &mut ctx), CommandResult::Error(_)));
        assert!(matches!(cmd_melody("H minor", &mut ctx), CommandResult::Error(_)));
        assert!(!ctx.host.status().unwrap().running);

        assert!(matches!(cmd_chord("Major (Root)", &mut ctx), CommandResult::Message(_)));
        assert!(ctx.host.status().unwrap().running);
    }
}
