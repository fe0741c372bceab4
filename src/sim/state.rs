//! Game state and core simulation types
//!
//! The session owns every gameplay entity. A reset rebuilds the bird, the
//! pipes and the ground wholesale; only the high score and the decorative
//! clouds carry over.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Contact;
use super::geometry::Rect;
use super::rng::RandomSource;
use super::scenery::{Cloud, Ground, spawn_clouds};
use crate::approach;
use crate::consts::{BIRD_FRAME_COUNT, BIRD_SPRITE_SIZE};
use crate::tuning::Tuning;

/// Scenery stream seed for sessions built around an injected random source
const SCENERY_SEED: u64 = 0x5ca1_ab1e;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended; waiting for a restart
    GameOver,
}

/// Something the host may want to react to (sound cues, logging, HUD pops)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Bird flapped
    Flapped,
    /// A pipe was cleared; carries the new score
    Scored { score: u32 },
    /// Run ended
    Crashed { contact: Contact, score: u32 },
    /// A fresh run started
    Reset,
}

/// Pixel size of the bird's sprite frames
///
/// Hitbox sizing depends on it, so a session cannot be built until the host
/// has loaded its assets and can report real dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteMetrics {
    width: f32,
    height: f32,
}

impl Default for SpriteMetrics {
    fn default() -> Self {
        Self {
            width: BIRD_SPRITE_SIZE,
            height: BIRD_SPRITE_SIZE,
        }
    }
}

impl SpriteMetrics {
    /// Returns `None` unless both dimensions are finite and positive
    pub fn new(width: f32, height: f32) -> Option<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        (valid(width) && valid(height)).then_some(Self { width, height })
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// The player-controlled bird
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    /// Centre position (x never changes during a run)
    pub pos: Vec2,
    /// Vertical velocity, pixels per step (negative = up)
    pub velocity: f32,
    /// Tilt in degrees; cosmetic only
    pub angle: f32,
    pub alive: bool,
    /// Wing animation frame index
    pub frame: u8,
    frame_timer_ms: f32,
    /// Hitbox size, fixed at construction
    size: Vec2,
}

impl Bird {
    pub fn new(pos: Vec2, sprite: SpriteMetrics) -> Self {
        Self {
            pos,
            velocity: 0.0,
            angle: 0.0,
            alive: true,
            frame: 0,
            frame_timer_ms: 0.0,
            size: sprite.size(),
        }
    }

    /// Launch upward. Overwrites velocity; no-op once dead.
    ///
    /// Returns whether the flap happened.
    pub fn flap(&mut self, impulse: f32) -> bool {
        if !self.alive {
            return false;
        }
        self.velocity = impulse;
        true
    }

    /// Integrate one step of gravity scaled by `dt`
    pub fn advance(&mut self, dt: f32, tuning: &Tuning) {
        self.velocity = (self.velocity + tuning.gravity * dt).min(tuning.max_fall_speed);
        self.pos.y += self.velocity * dt;

        // Nose up while climbing, dive slowly while falling
        if self.velocity < 0.0 {
            self.angle = approach(self.angle, tuning.min_angle, tuning.rise_rotation_rate * dt);
        } else {
            self.angle = approach(self.angle, tuning.max_angle, tuning.dive_rotation_rate * dt);
        }
        self.angle = self.angle.clamp(tuning.min_angle, tuning.max_angle);
    }

    /// Cycle the wing frame. Runs in every phase.
    pub fn animate(&mut self, dt: f32, tuning: &Tuning) {
        self.frame_timer_ms += dt * tuning.target_frame_ms;
        while self.frame_timer_ms >= tuning.bird_frame_ms {
            self.frame_timer_ms -= tuning.bird_frame_ms;
            self.frame = (self.frame + 1) % BIRD_FRAME_COUNT;
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }
}

/// A top/bottom pipe pair with a gap between them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge
    pub x: f32,
    gap_center: f32,
    gap: f32,
    width: f32,
    /// Top of the ground; the bottom pipe ends here
    floor_y: f32,
    passed: bool,
}

impl Pipe {
    pub fn new(x: f32, gap_center: f32, tuning: &Tuning) -> Self {
        Self {
            x,
            gap_center,
            gap: tuning.pipe_gap,
            width: tuning.pipe_width,
            floor_y: tuning.ground_y(),
            passed: false,
        }
    }

    /// New pipe at `right_edge_x` with a random gap clear of both margins
    pub fn spawn(right_edge_x: f32, tuning: &Tuning, rng: &mut impl RandomSource) -> Self {
        let (lo, hi) = tuning.gap_center_range();
        let gap_center = rng.range_f32(lo, hi.max(lo));
        Self::new(right_edge_x, gap_center, tuning)
    }

    pub fn advance(&mut self, dt: f32, speed: f32) {
        self.x -= speed * dt;
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Fully past the left edge of the playfield
    pub fn is_offscreen(&self) -> bool {
        self.right() < 0.0
    }

    pub fn gap_center(&self) -> f32 {
        self.gap_center
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Latch the passed flag; true only on the first call
    pub fn mark_passed(&mut self) -> bool {
        !std::mem::replace(&mut self.passed, true)
    }

    /// From the ceiling down to the top of the gap
    pub fn top_rect(&self) -> Rect {
        Rect::from_span(self.x, self.width, 0.0, self.gap_center - self.gap / 2.0)
    }

    /// From the bottom of the gap down to the ground
    pub fn bottom_rect(&self) -> Rect {
        Rect::from_span(
            self.x,
            self.width,
            self.gap_center + self.gap / 2.0,
            self.floor_y,
        )
    }
}

/// One continuously running game: entities, score and phase
#[derive(Debug, Clone)]
pub struct Session<R: RandomSource = Pcg32> {
    pub tuning: Tuning,
    sprite: SpriteMetrics,
    pub phase: GamePhase,
    pub bird: Bird,
    /// Ordered by spawn time, so x increases along the vec
    pub pipes: Vec<Pipe>,
    pub ground: Ground,
    /// Decorative; never reset
    pub clouds: Vec<Cloud>,
    pub score: u32,
    pub high_score: u32,
    /// Runs started since construction (the first run is 1)
    pub runs: u32,
    /// Simulation step counter
    pub time_ticks: u64,
    /// Events raised since the last drain
    ///
    /// Nothing trims this queue; a host driving `tick` directly must call
    /// [`Session::drain_events`] once per frame.
    pub events: Vec<GameEvent>,
    rng: R,
    scenery_rng: Pcg32,
}

impl Session<Pcg32> {
    /// Create a session whose gaps and scenery both derive from `seed`
    ///
    /// `tuning` is passed through [`Tuning::sanitized`] first.
    pub fn new(seed: u64, tuning: Tuning, sprite: SpriteMetrics) -> Self {
        Self::build(
            Pcg32::seed_from_u64(seed),
            Pcg32::seed_from_u64(seed.wrapping_add(1)),
            tuning,
            sprite,
        )
    }
}

impl<R: RandomSource> Session<R> {
    /// Create a session drawing gap centres from `rng`
    pub fn with_source(rng: R, tuning: Tuning, sprite: SpriteMetrics) -> Self {
        Self::build(rng, Pcg32::seed_from_u64(SCENERY_SEED), tuning, sprite)
    }

    fn build(rng: R, mut scenery_rng: Pcg32, tuning: Tuning, sprite: SpriteMetrics) -> Self {
        let tuning = tuning.sanitized();
        let clouds = spawn_clouds(tuning.playfield_width, &mut scenery_rng);
        let mut session = Self {
            phase: GamePhase::Playing,
            bird: Bird::new(Vec2::ZERO, sprite),
            pipes: Vec::new(),
            ground: Ground::new(&tuning),
            clouds,
            score: 0,
            high_score: 0,
            runs: 0,
            time_ticks: 0,
            events: Vec::new(),
            tuning,
            sprite,
            rng,
            scenery_rng,
        };
        session.reset();
        session
    }

    /// Start a fresh run. High score and clouds survive.
    pub fn reset(&mut self) {
        self.high_score = self.high_score.max(self.score);
        let start = Vec2::new(self.tuning.bird_x, self.tuning.playfield_height / 2.0);
        self.bird = Bird::new(start, self.sprite);
        self.pipes.clear();
        let first = self.spawn_pipe();
        self.pipes.push(first);
        self.ground = Ground::new(&self.tuning);
        self.score = 0;
        self.phase = GamePhase::Playing;
        self.runs += 1;
        self.events.push(GameEvent::Reset);
        log::info!("Run {} started (high score {})", self.runs, self.high_score);
    }

    /// Flap the bird if it is alive
    pub fn flap(&mut self) {
        if self.bird.flap(self.tuning.flap_impulse) {
            self.events.push(GameEvent::Flapped);
        }
    }

    /// Fresh pipe at the right edge of the playfield
    pub fn spawn_pipe(&mut self) -> Pipe {
        let pipe = Pipe::spawn(self.tuning.playfield_width, &self.tuning, &mut self.rng);
        log::debug!("Spawned pipe with gap centre {:.1}", pipe.gap_center());
        pipe
    }

    /// Kill the bird and freeze gameplay
    pub fn end_run(&mut self, contact: Contact) {
        self.bird.alive = false;
        self.phase = GamePhase::GameOver;
        self.high_score = self.high_score.max(self.score);
        self.events.push(GameEvent::Crashed {
            contact,
            score: self.score,
        });
        log::info!(
            "Run {} over: hit {:?} with score {} (high score {})",
            self.runs,
            contact,
            self.score,
            self.high_score
        );
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn sprite(&self) -> SpriteMetrics {
        self.sprite
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn scenery_rng(&mut self) -> &mut Pcg32 {
        &mut self.scenery_rng
    }
}
