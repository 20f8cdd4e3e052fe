use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use crossbeam_channel::unbounded;
use etude::audio::engine::CpalBackend;
use etude::audio::host::PlaybackHost;
use etude::audio::sampler::SampleBank;
use etude::audio::voice::{EngineVoice, PianoSource};
use etude::commands::playback::parse_program;
use etude::timeline::{self, TempoChange};
use etude::repl;
use etude_core::SchedulerConfig;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Metronome and ear-training companion for piano students")]
struct Cli {
    #[command(flatten)]
    playback: PlaybackArgs,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the events a program would play, without opening an audio device.
    Timeline(TimelineArgs),
}

#[derive(Args)]
struct PlaybackArgs {
    /// Starting tempo in beats per minute (clamped to 40-200).
    #[arg(long, global = true, default_value_t = 100)]
    bpm: i64,
    /// How often the scheduler wakes up, in milliseconds.
    #[arg(long, global = true, default_value_t = 25)]
    tick_ms: u64,
    /// How far ahead of the audio clock events are committed, in milliseconds.
    #[arg(long, global = true, default_value_t = 100)]
    lookahead_ms: u64,
    /// Delay before the first event after starting, in seconds.
    #[arg(long, global = true, default_value_t = 0.0)]
    start_offset: f64,
    /// Metronome bar length; the first beat of each bar is accented.
    #[arg(long, global = true, default_value_t = 4)]
    beats_per_bar: u32,
    /// Directory of piano samples (C3v10.wav, Ds3v10.wav, ...). Without it a
    /// synthesized piano is used.
    #[arg(long, global = true)]
    samples: Option<PathBuf>,
}

impl PlaybackArgs {
    fn scheduler_config(&self) -> Result<SchedulerConfig> {
        let config = SchedulerConfig::default()
            .with_tick_period(Duration::from_millis(self.tick_ms))
            .with_lookahead(Duration::from_millis(self.lookahead_ms))
            .with_start_offset(self.start_offset)
            .with_default_tempo(self.bpm)
            .with_beats_per_bar(self.beats_per_bar);
        config.validate().context("invalid playback options")?;
        Ok(config)
    }
}

#[derive(Args)]
struct TimelineArgs {
    /// What to play, e.g. `metronome`, `interval P5 G3 harmonic`,
    /// `progression I IV V I in G3`, `melody D major`.
    #[arg(required = true, num_args = 1..)]
    program: Vec<String>,
    /// Length of the timeline in seconds.
    #[arg(long, default_value_t = 8.0)]
    seconds: f64,
    /// Tempo change as `seconds:bpm`; may be repeated.
    #[arg(long = "tempo-change")]
    tempo_changes: Vec<TempoChange>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .ok();

    let cli = Cli::parse();
    let config = cli.playback.scheduler_config()?;

    match cli.command {
        Some(Commands::Timeline(args)) => run_timeline(config, args),
        None => run_repl(config, cli.playback.samples),
    }
}

fn run_timeline(config: SchedulerConfig, args: TimelineArgs) -> Result<()> {
    let program = parse_program(&args.program.join(" "), config.beats_per_bar)
        .map_err(anyhow::Error::msg)?;
    let events = timeline::collect(config, program, &args.tempo_changes, args.seconds)?;
    print!("{}", timeline::format(&events));
    Ok(())
}

fn run_repl(config: SchedulerConfig, samples: Option<PathBuf>) -> Result<()> {
    let beats_per_bar = config.beats_per_bar;
    let host = PlaybackHost::spawn(config, move || {
        let (triggers, renderer) = unbounded();
        let piano = match samples {
            Some(dir) => {
                info!(dir = %dir.display(), "loading piano samples");
                PianoSource::Sampled(SampleBank::load_in_background(dir))
            }
            None => PianoSource::Synth,
        };
        Ok((CpalBackend::new(renderer), EngineVoice::new(triggers, piano)))
    })?;
    repl::start(host, beats_per_bar)
}
