//! Session lifecycle
//!
//! A `Session` owns the game state and player settings, drives one tick per
//! `update`, and hands each frame to a `FrameSink` (renderer, audio mixer,
//! logger, test recorder).

use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, Snapshot, TickInput, tick};
use crate::tuning::{Tuning, TuningError};

/// Consumer of the per-tick output
pub trait FrameSink {
    fn present(&mut self, snapshot: &Snapshot, events: &[GameEvent]);
}

/// Sink that discards every frame
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _snapshot: &Snapshot, _events: &[GameEvent]) {}
}

pub struct Session<S: FrameSink> {
    state: GameState,
    sink: S,
    started: bool,
}

impl<S: FrameSink> Session<S> {
    /// Build a session, rejecting tuning that would stall or break the tick
    pub fn new(seed: u64, tuning: Tuning, sink: S) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            state: GameState::new(seed, tuning),
            sink,
            started: false,
        })
    }

    /// Spawn the opening population. The session starts paused.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.state.start();
        self.started = true;
    }

    /// Apply settings toggles, run one tick, then present the frame
    pub fn update(&mut self, dt: f32, input: &TickInput) {
        if !self.started {
            self.start();
        }

        let settings = &mut self.state.settings;
        if input.fullscreen {
            settings.toggle_fullscreen();
        }
        if input.mute {
            settings.toggle_mute();
        }
        if input.fullscreen || input.mute {
            log::debug!("Settings changed: {:?}", self.state.settings);
            self.state.events.push(GameEvent::SettingsChanged);
        }

        tick(&mut self.state, input, dt);

        let events = self.state.drain_events();
        let snapshot = self.state.snapshot();
        self.sink.present(&snapshot, &events);
    }

    pub fn pause(&mut self) {
        self.state.pause();
    }

    pub fn resume(&mut self) {
        self.state.resume();
    }

    pub fn restart(&mut self) {
        self.state.restart();
        self.started = true;
    }

    pub fn transition_to_next_area(&mut self) {
        self.state.transition_to_next_area();
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.state.phase == GamePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DEFAULT_DT;
    use glam::Vec2;

    /// Records every presented frame
    #[derive(Default)]
    struct Recorder {
        frames: Vec<Snapshot>,
        events: Vec<GameEvent>,
    }

    impl FrameSink for Recorder {
        fn present(&mut self, snapshot: &Snapshot, events: &[GameEvent]) {
            self.frames.push(snapshot.clone());
            self.events.extend_from_slice(events);
        }
    }

    #[test]
    fn test_enemies_close_in_on_idle_player() {
        let mut session = Session::new(2024, Tuning::default(), Recorder::default()).unwrap();
        session.start();
        assert_eq!(session.phase(), GamePhase::Paused);
        let spawned: Vec<Vec2> = session.state().enemies.iter().map(|(_, e)| e.pos()).collect();
        let handles: Vec<_> = session.state().enemies.iter().map(|(h, _)| h).collect();
        assert_eq!(spawned.len(), 5);

        session.resume();
        for _ in 0..100 {
            session.update(DEFAULT_DT, &TickInput::default());
        }

        let state = session.state();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.pos(), Vec2::ZERO);
        for (handle, start) in handles.iter().zip(&spawned) {
            let enemy = state.enemies.get(*handle).expect("enemy survives");
            assert!(enemy.pos().distance(Vec2::ZERO) < start.distance(Vec2::ZERO));
        }
        assert_eq!(session.sink().frames.len(), 100);
    }

    #[test]
    fn test_restart_resets_session() {
        let mut session = Session::new(7, Tuning::default(), NullSink).unwrap();
        session.start();
        session.resume();
        for _ in 0..30 {
            session.update(DEFAULT_DT, &TickInput::default());
        }
        session.transition_to_next_area();
        session.restart();

        let state = session.state();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score(), 0);
        assert_eq!(state.difficulty.enemy_limit, 5);
        assert_eq!(state.enemies.len(), 5);
        assert_eq!(state.area_index, 0);
        assert_eq!(state.clock.now(), 0.0);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_settings_toggles_are_reported() {
        let mut session = Session::new(1, Tuning::default(), Recorder::default()).unwrap();
        let input = TickInput {
            mute: true,
            fullscreen: true,
            ..Default::default()
        };
        session.update(DEFAULT_DT, &input);
        assert!(session.settings().muted);
        assert!(session.settings().fullscreen);
        let reported = session
            .sink()
            .events
            .iter()
            .filter(|e| **e == GameEvent::SettingsChanged)
            .count();
        assert_eq!(reported, 1);
        let last = session.sink().frames.last().unwrap();
        assert!(last.output.fullscreen);
        assert_eq!(last.output.sfx_volume, 0.0);
    }

    #[test]
    fn test_invalid_tuning_is_rejected() {
        let mut tuning = Tuning::default();
        tuning.orb.green_score_interval = 0;
        let err = Session::new(1, tuning, NullSink).err();
        assert!(matches!(
            err,
            Some(TuningError::Invalid {
                field: "orb.green_score_interval",
                ..
            })
        ));
    }

    #[test]
    fn test_pause_freezes_frames() {
        let mut session = Session::new(3, Tuning::default(), Recorder::default()).unwrap();
        session.start();
        session.resume();
        session.update(DEFAULT_DT, &TickInput::default());
        session.pause();
        for _ in 0..5 {
            session.update(DEFAULT_DT, &TickInput::default());
        }
        let frames = &session.sink().frames;
        assert!(frames[1..].iter().all(|f| f.tick == 1));
        assert!(session.sink().events.contains(&GameEvent::Paused));
    }
}
