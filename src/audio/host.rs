//! The playback thread
//!
//! One thread owns the playback controller. It waits on two things at once:
//! commands from the REPL and wake-ups from the tick timer. Both end up as
//! plain method calls on the controller, so there is never more than one
//! writer and tempo is read at the moment a tick uses it.

use super::wake::TickTimer;
use anyhow::{anyhow, Context, Result};
use crossbeam_channel::{bounded, select, unbounded, Receiver, Sender};
use etude_core::{
    AudioTime, ClockProvider, PlaybackController, PlaybackError, PlaybackEvent, Program,
    SchedulerConfig, Tempo, TempoDial, Voice,
};
use std::thread::{self, JoinHandle};
use tracing::{debug, info};

type Reply<T> = Sender<T>;

/// Requests handled on the playback thread
#[derive(Debug)]
pub enum HostCommand {
    Start(Reply<Result<(), PlaybackError>>),
    Stop,
    Restart(Reply<Result<(), PlaybackError>>),
    SetTempo(i64, Reply<Tempo>),
    /// Text typed into the tempo field
    TypeTempo(String, Reply<Tempo>),
    /// Knob position in degrees
    Dial(f64, Reply<Tempo>),
    Load(Program),
    Play(Program, Reply<Result<(), PlaybackError>>),
    Status(Reply<HostStatus>),
    Shutdown,
}

/// Snapshot of the controller for display
#[derive(Debug, Clone, PartialEq)]
pub struct HostStatus {
    pub running: bool,
    pub ready: bool,
    pub tempo: Tempo,
    pub dial_angle: f64,
    pub beat: Option<usize>,
    pub beats_per_bar: u32,
    pub metronome: bool,
    pub playing: Option<String>,
    pub next_event_time: Option<AudioTime>,
}

pub struct PlaybackHost;

impl PlaybackHost {
    /// Start the playback thread.
    ///
    /// `make` runs on the new thread and builds the clock provider and voice
    /// there, since audio streams are not always allowed to move between
    /// threads. An error from `make` is returned here.
    pub fn spawn<P, V, F>(config: SchedulerConfig, make: F) -> Result<HostHandle>
    where
        P: ClockProvider + 'static,
        V: Voice + 'static,
        F: FnOnce() -> Result<(P, V)> + Send + 'static,
    {
        config.validate().context("invalid scheduler configuration")?;

        let (command_tx, command_rx) = unbounded();
        let (event_tx, event_rx) = unbounded();
        let (ready_tx, ready_rx) = bounded(1);

        let thread = thread::Builder::new()
            .name("etude-playback".to_string())
            .spawn(move || {
                let (provider, voice) = match make() {
                    Ok(parts) => parts,
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };
                let dial = TempoDial::new(config.tempo_range);
                let mut controller =
                    PlaybackController::new(config, provider, voice, TickTimer::new());
                controller.subscribe(move |event: &PlaybackEvent| {
                    let _ = event_tx.send(event.clone());
                });
                let _ = ready_tx.send(Ok(()));
                HostLoop {
                    controller,
                    dial,
                    commands: command_rx,
                }
                .run();
            })
            .context("spawning playback thread")?;

        ready_rx
            .recv()
            .map_err(|_| anyhow!("playback thread exited during startup"))??;

        Ok(HostHandle {
            commands: command_tx,
            events: event_rx,
            thread: Some(thread),
        })
    }
}

struct HostLoop<P: ClockProvider, V: Voice> {
    controller: PlaybackController<P, V, TickTimer>,
    dial: TempoDial,
    commands: Receiver<HostCommand>,
}

impl<P: ClockProvider, V: Voice> HostLoop<P, V> {
    fn run(mut self) {
        debug!("playback thread running");
        loop {
            // re-read every time round: a cancelled timer hands out `never()`
            let ticks = self.controller.timer().receiver().clone();
            select! {
                recv(self.commands) -> msg => match msg {
                    Ok(HostCommand::Shutdown) | Err(_) => break,
                    Ok(command) => self.handle(command),
                },
                recv(ticks) -> _ => {
                    self.controller.tick();
                }
            }
        }
        self.controller.teardown();
        info!("playback thread stopped");
    }

    fn handle(&mut self, command: HostCommand) {
        let controller = &mut self.controller;
        match command {
            HostCommand::Start(reply) => {
                let _ = reply.send(controller.start());
            }
            HostCommand::Stop => controller.stop(),
            HostCommand::Restart(reply) => {
                let _ = reply.send(controller.restart());
            }
            HostCommand::SetTempo(bpm, reply) => {
                let _ = reply.send(controller.set_tempo(bpm));
            }
            HostCommand::TypeTempo(text, reply) => {
                let tempo = self.dial.commit_text(&text, controller.tempo());
                let _ = reply.send(controller.set_tempo(tempo.bpm() as i64));
            }
            HostCommand::Dial(degrees, reply) => {
                let tempo = self.dial.tempo_at_angle(degrees);
                let _ = reply.send(controller.set_tempo(tempo.bpm() as i64));
            }
            HostCommand::Load(program) => controller.load(program),
            HostCommand::Play(program, reply) => {
                let _ = reply.send(controller.play(program));
            }
            HostCommand::Status(reply) => {
                let _ = reply.send(HostStatus {
                    running: controller.is_running(),
                    ready: controller.is_ready(),
                    tempo: controller.tempo(),
                    dial_angle: self.dial.angle_of(controller.tempo()),
                    beat: controller.current_beat_index(),
                    beats_per_bar: controller.config().beats_per_bar,
                    metronome: controller.program().is_metronome(),
                    playing: controller.describe(),
                    next_event_time: controller.next_event_time(),
                });
            }
            HostCommand::Shutdown => {}
        }
    }
}

/// Synchronous front end to the playback thread
pub struct HostHandle {
    commands: Sender<HostCommand>,
    events: Receiver<PlaybackEvent>,
    thread: Option<JoinHandle<()>>,
}

impl HostHandle {
    fn send(&self, command: HostCommand) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| anyhow!("playback thread has shut down"))
    }

    fn request<T>(&self, command: impl FnOnce(Reply<T>) -> HostCommand) -> Result<T> {
        let (tx, rx) = bounded(1);
        self.send(command(tx))?;
        rx.recv()
            .map_err(|_| anyhow!("playback thread has shut down"))
    }

    pub fn start(&self) -> Result<()> {
        Ok(self.request(HostCommand::Start)??)
    }

    pub fn stop(&self) -> Result<()> {
        self.send(HostCommand::Stop)
    }

    pub fn restart(&self) -> Result<()> {
        Ok(self.request(HostCommand::Restart)??)
    }

    /// Set the tempo, clamped into range. Returns the tempo now in effect.
    pub fn set_tempo(&self, bpm: i64) -> Result<Tempo> {
        self.request(|reply| HostCommand::SetTempo(bpm, reply))
    }

    /// Commit typed tempo text; anything non-numeric keeps the current tempo
    pub fn type_tempo(&self, text: &str) -> Result<Tempo> {
        let text = text.to_string();
        self.request(|reply| HostCommand::TypeTempo(text, reply))
    }

    /// Turn the tempo knob to `degrees`
    pub fn dial(&self, degrees: f64) -> Result<Tempo> {
        self.request(|reply| HostCommand::Dial(degrees, reply))
    }

    /// Replace the program used by the next `start`
    pub fn load(&self, program: Program) -> Result<()> {
        self.send(HostCommand::Load(program))
    }

    /// Stop whatever is playing and play `program` from the top
    pub fn play(&self, program: Program) -> Result<()> {
        Ok(self.request(|reply| HostCommand::Play(program, reply))??)
    }

    pub fn status(&self) -> Result<HostStatus> {
        self.request(HostCommand::Status)
    }

    /// Playback notifications, in the order they happened
    pub fn events(&self) -> &Receiver<PlaybackEvent> {
        &self.events
    }

    /// Stop playback, release the audio device and join the thread
    pub fn shutdown(&mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = self.commands.send(HostCommand::Shutdown);
            let _ = thread.join();
        }
    }
}

impl Drop for HostHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use etude_core::sequencer::IntervalPlayback;
    use etude_core::{EventLog, FixedScript, ManualClockProvider, Pitch};
    use std::time::Duration;

    fn spawn() -> (HostHandle, etude_core::ManualClockHandle) {
        let (provider, clock) = ManualClockProvider::new(0.0);
        let host = PlaybackHost::spawn(SchedulerConfig::default(), move || {
            Ok((provider, EventLog::new()))
        })
        .unwrap();
        (host, clock)
    }

    #[test]
    fn test_start_stop_roundtrip() {
        let (mut host, clock) = spawn();
        host.start().unwrap();
        assert!(host.status().unwrap().running);
        assert_eq!(
            host.events().recv_timeout(Duration::from_secs(1)).unwrap(),
            PlaybackEvent::Started
        );

        host.stop().unwrap();
        assert!(!host.status().unwrap().running);

        host.shutdown();
        assert_eq!(clock.close_count(), 1);
        assert!(host.status().is_err());
    }

    #[test]
    fn test_tempo_requests_clamp() {
        let (host, _clock) = spawn();
        assert_eq!(host.set_tempo(500).unwrap().bpm(), 200);
        assert_eq!(host.type_tempo("abc").unwrap().bpm(), 200);
        assert_eq!(host.type_tempo("72 bpm").unwrap().bpm(), 72);
        assert_eq!(host.dial(0.0).unwrap().bpm(), 40);
        assert_eq!(host.status().unwrap().tempo.bpm(), 40);
    }

    #[test]
    fn test_play_script_reports_program() {
        let (host, _clock) = spawn();
        let script =
            FixedScript::interval(Pitch::MIDDLE_C, 7, IntervalPlayback::Harmonic).unwrap();
        host.play(Program::Script(script)).unwrap();

        let status = host.status().unwrap();
        assert!(status.running);
        assert!(!status.metronome);
        assert!(status.playing.is_some());
    }

    #[test]
    fn test_failed_startup_is_reported() {
        let result = PlaybackHost::spawn(SchedulerConfig::default(), || {
            Err::<(ManualClockProvider, EventLog), _>(anyhow!("no device"))
        });
        assert!(result.is_err());
    }
}
