//! Data-driven game balance
//!
//! Every gameplay constant lives here so a settings file can retune a run
//! without a rebuild. Defaults come from [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tuning values
///
/// Speeds and accelerations are expressed per normalized step (one 60 Hz
/// frame); the driver scales them by the timestep multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,
    pub ground_height: f32,

    // === Frame timing ===
    pub target_frame_ms: f32,
    pub max_frame_ms: f32,

    // === Pipes ===
    pub pipe_gap: f32,
    pub pipe_width: f32,
    pub pipe_speed: f32,
    pub pipe_margin: f32,
    pub spawn_lead: f32,

    // === Bird ===
    pub bird_x: f32,
    pub gravity: f32,
    pub flap_impulse: f32,
    pub max_fall_speed: f32,
    pub rise_rotation_rate: f32,
    pub dive_rotation_rate: f32,
    pub min_angle: f32,
    pub max_angle: f32,
    pub bird_frame_ms: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            ground_height: GROUND_HEIGHT,

            target_frame_ms: TARGET_FRAME_MS,
            max_frame_ms: MAX_FRAME_MS,

            pipe_gap: PIPE_GAP,
            pipe_width: PIPE_WIDTH,
            pipe_speed: PIPE_SPEED,
            pipe_margin: PIPE_MARGIN,
            spawn_lead: SPAWN_LEAD,

            bird_x: BIRD_X,
            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,
            max_fall_speed: MAX_FALL_SPEED,
            rise_rotation_rate: RISE_ROTATION_RATE,
            dive_rotation_rate: DIVE_ROTATION_RATE,
            min_angle: MIN_ANGLE,
            max_angle: MAX_ANGLE,
            bird_frame_ms: BIRD_FRAME_MS,
        }
    }
}

impl Tuning {
    /// Y coordinate of the top of the ground (the collision plane)
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.playfield_height - self.ground_height
    }

    /// Inclusive range a gap centre may be drawn from
    pub fn gap_center_range(&self) -> (f32, f32) {
        let half_gap = self.pipe_gap / 2.0;
        (
            self.pipe_margin + half_gap,
            self.ground_y() - self.pipe_margin - half_gap,
        )
    }

    /// Milliseconds-per-frame → timestep multiplier
    ///
    /// Clamps to `[0, max_frame_ms]` first; NaN counts as zero.
    pub fn normalize_elapsed(&self, elapsed_ms: f32) -> f32 {
        let ms = if elapsed_ms.is_nan() { 0.0 } else { elapsed_ms };
        ms.clamp(0.0, self.max_frame_ms) / self.target_frame_ms
    }

    /// Repair values that would make the simulation unplayable
    ///
    /// A hand-edited settings file can contain anything; anything outside the
    /// usable envelope falls back to its default (logged at warn).
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        fn fix(name: &str, value: &mut f32, fallback: f32, ok: impl Fn(f32) -> bool) {
            if !value.is_finite() || !ok(*value) {
                log::warn!(
                    "Tuning: {} = {} is unusable, using {}",
                    name,
                    value,
                    fallback
                );
                *value = fallback;
            }
        }

        macro_rules! repair {
            ($field:ident, $ok:expr) => {
                repair!($field, defaults.$field, $ok)
            };
            ($field:ident, $fallback:expr, $ok:expr) => {
                fix(stringify!($field), &mut self.$field, $fallback, $ok)
            };
        }

        repair!(playfield_width, |v| v > 0.0);
        repair!(playfield_height, |v| v > 0.0);
        let height = self.playfield_height;
        let ground_fallback = defaults.ground_height.min(height / 2.0);
        repair!(ground_height, ground_fallback, |v| v >= 0.0 && v < height);
        repair!(target_frame_ms, |v| v > 0.0);
        let target = self.target_frame_ms;
        let max_frame_fallback = defaults.max_frame_ms.max(target);
        repair!(max_frame_ms, max_frame_fallback, |v| v >= target);
        repair!(pipe_width, |v| v > 0.0);
        repair!(pipe_speed, |v| v >= 0.0);
        repair!(pipe_margin, |v| v >= 0.0);
        repair!(spawn_lead, |v| v > 0.0);
        repair!(gravity, |_| true);
        repair!(flap_impulse, |_| true);
        repair!(max_fall_speed, |v| v > 0.0);
        repair!(rise_rotation_rate, |v| v >= 0.0);
        repair!(dive_rotation_rate, |v| v >= 0.0);
        repair!(bird_frame_ms, |v| v > 0.0);
        repair!(bird_x, |_| true);
        repair!(min_angle, |_| true);
        repair!(max_angle, |_| true);
        if self.min_angle > self.max_angle {
            log::warn!("Tuning: angle limits inverted, using defaults");
            self.min_angle = defaults.min_angle;
            self.max_angle = defaults.max_angle;
        }

        // Gap plus both margins must fit above the ground with room to spare
        let playable = self.ground_y();
        repair!(pipe_gap, |v| v > 0.0);
        if self.pipe_gap + 2.0 * self.pipe_margin >= playable {
            let margin = (playable * 0.1).min(defaults.pipe_margin);
            let gap = (playable - 2.0 * margin) * 0.5;
            log::warn!(
                "Tuning: gap {} with margin {} does not fit in {}px, using gap {} margin {}",
                self.pipe_gap,
                self.pipe_margin,
                playable,
                gap,
                margin
            );
            self.pipe_gap = gap;
            self.pipe_margin = margin;
        }

        self
    }
}
