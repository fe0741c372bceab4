//! Host-facing game object
//!
//! Wraps a [`Session`] with the pieces a frame driver needs: elapsed-time
//! normalization, one-shot input latching, audio cue dispatch and render
//! snapshots. The host calls [`Game::step`] once per frame.

use crate::audio::AudioManager;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, RenderSnapshot, Session, SpriteMetrics, TickInput, tick};

/// Game instance holding all state
pub struct Game {
    settings: Settings,
    /// `None` until sprite metrics arrive
    session: Option<Session>,
    audio: AudioManager,
    input: TickInput,
    seed: u64,
    /// Events raised by the most recent step
    last_events: Vec<GameEvent>,
}

impl Game {
    pub fn new(settings: Settings, seed: u64, mut audio: AudioManager) -> Self {
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        let input = TickInput {
            idle_mode: settings.idle_mode,
            ..Default::default()
        };
        Self {
            settings,
            session: None,
            audio,
            input,
            seed,
            last_events: Vec::new(),
        }
    }

    /// Supply the bird sprite dimensions; the game is inert until this is called
    ///
    /// Calling it again rebuilds the session with the new hitbox, keeping the
    /// high score.
    pub fn load_sprite(&mut self, metrics: SpriteMetrics) {
        let mut session = Session::new(self.seed, self.settings.tuning.clone(), metrics);
        if let Some(old) = &self.session {
            session.high_score = old.high_score.max(old.score);
        }
        log::info!(
            "Session ready (seed {}, sprite {:?})",
            self.seed,
            metrics.size()
        );
        self.session = Some(session);
    }

    pub fn is_ready(&self) -> bool {
        self.session.is_some()
    }

    /// The one button: flap while playing, restart after game over
    pub fn press(&mut self) {
        match self.session.as_ref().map(|s| s.phase) {
            Some(GamePhase::Playing) => self.input.flap = true,
            Some(GamePhase::GameOver) => self.input.restart = true,
            None => {}
        }
    }

    /// Toggle the autopilot
    pub fn set_idle_mode(&mut self, on: bool) {
        self.input.idle_mode = on;
    }

    /// Advance one frame given wall-clock milliseconds since the previous one
    ///
    /// Returns false (and does nothing) before sprite metrics are loaded.
    pub fn step(&mut self, elapsed_ms: f32) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        if elapsed_ms > session.tuning.max_frame_ms {
            log::debug!(
                "Frame took {:.1}ms, capping to {}ms",
                elapsed_ms,
                session.tuning.max_frame_ms
            );
        }
        let dt = session.tuning.normalize_elapsed(elapsed_ms);
        tick(session, &self.input, dt);

        // Clear one-shot inputs after processing
        self.input.flap = false;
        self.input.restart = false;

        self.last_events = session.drain_events();
        self.audio.dispatch(&self.last_events);
        true
    }

    /// Render-state query; `None` before sprite metrics are loaded
    pub fn snapshot(&self) -> Option<RenderSnapshot> {
        self.session.as_ref().map(RenderSnapshot::capture)
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.last_events
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::Contact;

    fn ready_game() -> Game {
        let mut game = Game::new(Settings::default(), 1234, AudioManager::default());
        game.load_sprite(SpriteMetrics::default());
        game
    }

    #[test]
    fn test_inert_until_sprite_loaded() {
        let mut game = Game::new(Settings::default(), 1, AudioManager::default());
        assert!(!game.is_ready());
        game.press();
        assert!(!game.step(16.6));
        assert!(game.snapshot().is_none());

        game.load_sprite(SpriteMetrics::default());
        assert!(game.step(16.6));
        assert!(game.snapshot().is_some());
    }

    #[test]
    fn test_press_flaps_while_playing() {
        let mut game = ready_game();
        game.press();
        game.step(TARGET_FRAME_MS);
        assert!(game.events().contains(&GameEvent::Flapped));
        let bird = &game.session().unwrap().bird;
        assert!(bird.velocity < 0.0);

        // One-shot: the next frame does not flap again
        game.step(TARGET_FRAME_MS);
        assert!(!game.events().contains(&GameEvent::Flapped));
    }

    #[test]
    fn test_forced_ground_hit_then_press_restarts() {
        let mut game = ready_game();
        {
            let session = game.session_mut().unwrap();
            session.score = 6;
            session.bird.pos.y = PLAYFIELD_HEIGHT;
        }
        game.step(TARGET_FRAME_MS);
        assert!(game.events().contains(&GameEvent::Crashed {
            contact: Contact::Ground,
            score: 6
        }));
        let snap = game.snapshot().unwrap();
        assert!(snap.game_over);
        assert_eq!(snap.high_score, 6);
        assert!(!snap.bird.alive);

        game.press();
        game.step(TARGET_FRAME_MS);
        let snap = game.snapshot().unwrap();
        assert!(!snap.game_over);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.high_score, 6);
        assert_eq!(snap.pipes.len(), 1);
        assert!(game.events().contains(&GameEvent::Reset));
    }

    #[test]
    fn test_long_stall_is_clamped() {
        let mut game = ready_game();
        let y0 = game.session().unwrap().bird.pos.y;
        game.step(5_000.0);
        let session = game.session().unwrap();
        // One clamped step: at most max_frame_ms worth of motion
        let dt = MAX_FRAME_MS / TARGET_FRAME_MS;
        assert!(session.bird.pos.y - y0 <= GRAVITY * dt * dt + 1e-3);
        assert!(!session.is_game_over());
    }

    #[test]
    fn test_autopilot_scores_through_one_pipe() {
        let mut game = Game::new(
            Settings {
                idle_mode: true,
                ..Default::default()
            },
            1234,
            AudioManager::default(),
        );
        game.load_sprite(SpriteMetrics::default());
        let tuning = game.settings().tuning.clone();
        // Pin the first gap; later pipes never reach the bird within the window
        {
            let session = game.session_mut().unwrap();
            let pipe = crate::sim::Pipe::new(tuning.playfield_width, 260.0, &tuning);
            session.pipes = vec![pipe];
            session.bird.pos.y = 260.0;
        }
        let frames = (tuning.playfield_width / tuning.pipe_speed) as usize;
        let mut scored = 0;
        for _ in 0..frames {
            game.step(16.6);
            scored += game
                .events()
                .iter()
                .filter(|e| matches!(e, GameEvent::Scored { .. }))
                .count();
        }
        let session = game.session().unwrap();
        assert!(!session.is_game_over());
        assert_eq!(scored, 1);
        assert_eq!(session.score, 1);
        assert!(session.pipes[0].passed());
    }

    #[test]
    fn test_reloading_sprite_keeps_high_score() {
        let mut game = ready_game();
        game.session_mut().unwrap().high_score = 9;
        game.load_sprite(SpriteMetrics::new(30.0, 20.0).unwrap());
        let session = game.session().unwrap();
        assert_eq!(session.high_score, 9);
        assert_eq!(session.bird.size(), glam::Vec2::new(30.0, 20.0));
    }
}
