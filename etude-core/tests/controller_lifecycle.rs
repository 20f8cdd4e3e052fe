#[cfg(test)]
mod tests {
    use etude_core::sequencer::IntervalPlayback;
    use etude_core::{
        EventLog, FixedScript, ManualClockHandle, ManualClockProvider, ManualTimer, Pitch,
        PlaybackController, PlaybackError, PlaybackEvent, Program, SchedulerConfig, TickOutcome,
        WakeTimer,
    };
    use std::sync::{Arc, Mutex};

    type Controller = PlaybackController<ManualClockProvider, EventLog, ManualTimer>;

    fn setup() -> (Controller, ManualClockHandle, Arc<Mutex<Vec<PlaybackEvent>>>) {
        let (provider, clock) = ManualClockProvider::new(0.0);
        let mut controller = PlaybackController::new(
            SchedulerConfig::default(),
            provider,
            EventLog::new(),
            ManualTimer::new(),
        );
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        controller.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
        (controller, clock, seen)
    }

    fn count(seen: &Arc<Mutex<Vec<PlaybackEvent>>>, wanted: &PlaybackEvent) -> usize {
        seen.lock().unwrap().iter().filter(|e| *e == wanted).count()
    }

    #[test]
    fn test_double_start_is_idempotent() {
        let (mut controller, clock, seen) = setup();
        controller.start().unwrap();
        controller.start().unwrap();

        assert_eq!(controller.timer().arm_count(), 1);
        assert_eq!(clock.acquisitions(), 1);
        assert_eq!(count(&seen, &PlaybackEvent::Started), 1);
        assert_eq!(controller.voice().len(), 1);
    }

    #[test]
    fn test_double_stop_is_idempotent() {
        let (mut controller, _clock, seen) = setup();
        controller.start().unwrap();
        controller.stop();
        controller.stop();

        assert_eq!(controller.timer().cancel_count(), 1);
        assert_eq!(count(&seen, &PlaybackEvent::Stopped), 1);
        assert!(!controller.is_running());
        assert_eq!(controller.next_event_time(), None);
    }

    #[test]
    fn test_stop_before_start_emits_nothing() {
        let (mut controller, _clock, seen) = setup();
        controller.stop();
        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(controller.tick(), None);
    }

    #[test]
    fn test_teardown_closes_clock_once() {
        let (mut controller, clock, _seen) = setup();
        controller.start().unwrap();
        controller.stop();
        controller.teardown();
        controller.teardown();

        assert!(controller.is_torn_down());
        assert!(clock.is_closed());
        assert_eq!(clock.close_count(), 1);
    }

    #[test]
    fn test_teardown_without_clock_closes_nothing() {
        let (mut controller, clock, _seen) = setup();
        controller.teardown();
        assert_eq!(clock.acquisitions(), 0);
        assert_eq!(clock.close_count(), 0);
        assert_eq!(controller.start(), Err(PlaybackError::TornDown));
    }

    #[test]
    fn test_loading_voice_refuses_start() {
        let (provider, clock) = ManualClockProvider::new(0.0);
        let mut controller = PlaybackController::new(
            SchedulerConfig::default(),
            provider,
            EventLog::loading(),
            ManualTimer::new(),
        );
        assert!(!controller.is_ready());
        assert_eq!(controller.start(), Err(PlaybackError::NotReady));
        assert!(!controller.timer().is_armed());
        assert_eq!(clock.acquisitions(), 0);
    }

    #[test]
    fn test_closed_clock_skips_ticks() {
        let (mut controller, clock, seen) = setup();
        controller.start().unwrap();
        let before = controller.voice().len();
        let events_before = seen.lock().unwrap().len();

        clock.close();
        clock.set(5.0);
        assert_eq!(controller.tick(), Some(TickOutcome::Skipped));
        assert_eq!(controller.voice().len(), before);
        assert_eq!(seen.lock().unwrap().len(), events_before);
        assert!(controller.is_running());
    }

    #[test]
    fn test_start_reacquires_closed_clock() {
        let (mut controller, clock, _seen) = setup();
        controller.start().unwrap();
        controller.stop();

        clock.close();
        clock.set(4.0);
        controller.start().unwrap();
        assert_eq!(clock.acquisitions(), 2);
        assert!(controller.is_running());
        assert_eq!(controller.voice().events().last().unwrap().target_time, 4.0);
    }

    #[test]
    fn test_tick_after_stop_is_idle() {
        let (mut controller, clock, _seen) = setup();
        controller.start().unwrap();
        controller.stop();
        clock.advance(3.0);
        assert_eq!(controller.tick(), None);
        assert_eq!(controller.voice().len(), 1);
    }

    #[test]
    fn test_tempo_set_while_stopped_applies_on_start() {
        let (mut controller, clock, seen) = setup();
        controller.set_tempo(150);
        controller.start().unwrap();
        clock.set(0.35);
        controller.tick();

        assert_eq!(controller.voice().beat_times(), vec![0.0, 0.4]);
        assert_eq!(
            count(&seen, &PlaybackEvent::TempoChanged(etude_core::Tempo::new(150))),
            1
        );
    }

    #[test]
    fn test_same_tempo_is_silent() {
        let (mut controller, _clock, seen) = setup();
        let current = controller.tempo().bpm() as i64;
        controller.set_tempo(current);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_restart_resets_bar() {
        let (mut controller, clock, _seen) = setup();
        controller.set_tempo(120);
        controller.start().unwrap();
        clock.set(0.45);
        controller.tick();
        assert_eq!(controller.current_beat_index(), Some(1));

        clock.set(1.0);
        controller.restart().unwrap();
        let last = controller.voice().events().last().cloned().unwrap();
        assert_eq!(last.target_time, 1.0);
        assert!(last.params.accent);
        assert_eq!(controller.current_beat_index(), Some(0));
        assert_eq!(clock.acquisitions(), 1);
    }

    #[test]
    fn test_play_replaces_metronome() {
        let (mut controller, clock, seen) = setup();
        controller.start().unwrap();
        clock.set(0.2);

        let script =
            FixedScript::interval(Pitch::MIDDLE_C, 7, IntervalPlayback::Harmonic).unwrap();
        controller.play(Program::Script(script)).unwrap();

        assert!(!controller.program().is_metronome());
        let last = controller.voice().events().last().cloned().unwrap();
        assert_eq!(last.target_time, 0.2);
        assert!(!last.is_beat());

        let seen = seen.lock().unwrap();
        assert_eq!(
            seen.iter()
                .filter(|e| matches!(e, PlaybackEvent::Started | PlaybackEvent::Stopped))
                .count(),
            3
        );
    }

    #[test]
    fn test_script_can_be_replayed_after_completion() {
        let (mut controller, clock, seen) = setup();
        let script =
            FixedScript::interval(Pitch::MIDDLE_C, 4, IntervalPlayback::Ascending).unwrap();
        controller.play(Program::Script(script)).unwrap();

        clock.set(2.05);
        let outcome = controller.tick();
        assert!(matches!(outcome, Some(TickOutcome::Exhausted { .. })));
        assert!(!controller.is_running());
        assert_eq!(controller.voice().len(), 2);

        controller.start().unwrap();
        clock.set(4.2);
        controller.tick();
        assert_eq!(controller.voice().len(), 4);
        assert!(!controller.is_running());
        assert_eq!(
            seen.lock()
                .unwrap()
                .iter()
                .filter(|e| matches!(e, PlaybackEvent::Completed { .. }))
                .count(),
            2
        );
    }
}
