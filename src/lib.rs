//! Flappy Sim - simulation core for a side-scrolling flap-through-the-pipes game
//!
//! Core modules:
//! - `sim`: Simulation (physics, pipe spawning, collisions, session state)
//! - `game`: Host-facing facade (frame step, input, render snapshot)
//! - `audio`: Fire-and-forget sound cue dispatch
//! - `settings`: Player preferences and persisted configuration
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod game;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const PLAYFIELD_WIDTH: f32 = 400.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;
    /// Height of the scrolling ground strip
    pub const GROUND_HEIGHT: f32 = 80.0;

    /// Target frame duration the physics constants are tuned against (60 Hz)
    pub const TARGET_FRAME_MS: f32 = 1000.0 / 60.0;
    /// Longest frame the simulation will integrate in one step
    pub const MAX_FRAME_MS: f32 = 50.0;

    /// Pipe defaults
    pub const PIPE_GAP: f32 = 160.0;
    pub const PIPE_WIDTH: f32 = 70.0;
    /// Pixels per normalized step
    pub const PIPE_SPEED: f32 = 3.0;
    /// Minimum clearance between a gap and the ceiling/ground
    pub const PIPE_MARGIN: f32 = 70.0;
    /// Newest pipe must travel this far from the right edge before the next spawns
    pub const SPAWN_LEAD: f32 = 200.0;

    /// Bird defaults
    pub const BIRD_X: f32 = 80.0;
    pub const GRAVITY: f32 = 0.35;
    pub const FLAP_IMPULSE: f32 = -7.5;
    pub const MAX_FALL_SPEED: f32 = 10.0;
    /// Degrees per step while climbing / diving
    pub const RISE_ROTATION_RATE: f32 = 5.0;
    pub const DIVE_ROTATION_RATE: f32 = 3.0;
    pub const MIN_ANGLE: f32 = -25.0;
    pub const MAX_ANGLE: f32 = 90.0;
    /// Default sprite size (the hitbox is derived from it)
    pub const BIRD_SPRITE_SIZE: f32 = 36.0;
    /// Wing animation
    pub const BIRD_FRAME_COUNT: u8 = 3;
    pub const BIRD_FRAME_MS: f32 = 110.0;

    /// Cloud recycle window
    pub const CLOUD_RESPAWN_X_MIN: f32 = 20.0;
    pub const CLOUD_RESPAWN_X_MAX: f32 = 120.0;
    pub const CLOUD_RESPAWN_Y_MIN: f32 = 40.0;
    pub const CLOUD_RESPAWN_Y_MAX: f32 = 240.0;
}

/// Move `current` toward `target` by at most `step`, never overshooting
#[inline]
pub fn approach(current: f32, target: f32, step: f32) -> f32 {
    if current < target {
        (current + step).min(target)
    } else {
        (current - step).max(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approach_stops_at_target() {
        assert_eq!(approach(0.0, 90.0, 3.0), 3.0);
        assert_eq!(approach(89.0, 90.0, 3.0), 90.0);
        assert_eq!(approach(-20.0, -25.0, 5.0), -25.0);
        assert_eq!(approach(10.0, 10.0, 5.0), 10.0);
    }
}
