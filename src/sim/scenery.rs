//! Scrolling ground and background clouds
//!
//! Neither affects gameplay except the ground's top edge, which is the
//! collision plane. Both keep moving after the run ends.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::consts::*;
use crate::tuning::Tuning;

/// Two playfield-wide ground segments that leapfrog each other
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ground {
    pub x1: f32,
    pub x2: f32,
    /// Top edge of the ground
    pub y: f32,
    pub width: f32,
    pub speed: f32,
}

impl Ground {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x1: 0.0,
            x2: tuning.playfield_width,
            y: tuning.ground_y(),
            width: tuning.playfield_width,
            speed: tuning.pipe_speed,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.x1 -= self.speed * dt;
        self.x2 -= self.speed * dt;
        if self.x1 + self.width < 0.0 {
            self.x1 = self.x2 + self.width;
        }
        if self.x2 + self.width < 0.0 {
            self.x2 = self.x1 + self.width;
        }
    }
}

/// One circle in a cloud, relative to the cloud centre
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Puff {
    pub dx: f32,
    pub dy: f32,
    pub radius: f32,
}

/// A layered cloud drifting left at its layer's speed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub base_radius: f32,
    pub speed: f32,
    pub puffs: Vec<Puff>,
}

/// Parallax layers: (speed, base radius, base y)
const CLOUD_LAYERS: [(f32, f32, f32); 3] = [
    (0.25, 56.0, 60.0),
    (0.4, 48.0, 110.0),
    (0.65, 36.0, 160.0),
];
const CLOUDS_PER_LAYER: usize = 3;

impl Cloud {
    #[inline]
    pub fn width(&self) -> f32 {
        self.base_radius * 3.5
    }

    /// Drift left; once fully off-screen, re-enter from the right at a new height
    pub fn advance(&mut self, dt: f32, playfield_width: f32, rng: &mut impl RandomSource) {
        self.x -= self.speed * dt;
        if self.x < -self.width() {
            self.x = playfield_width + rng.range_f32(CLOUD_RESPAWN_X_MIN, CLOUD_RESPAWN_X_MAX);
            self.y = rng.range_f32(CLOUD_RESPAWN_Y_MIN, CLOUD_RESPAWN_Y_MAX);
        }
    }
}

/// Lumpy outline: five puffs along the body plus one on top
fn cloud_puffs(base_radius: f32, rng: &mut impl RandomSource) -> Vec<Puff> {
    const TEMPLATE: [f32; 5] = [-1.2, -0.5, 0.0, 0.7, 1.3];

    let mut puffs = Vec::with_capacity(TEMPLATE.len() + 1);
    for (index, factor) in TEMPLATE.iter().enumerate() {
        let dx = factor * base_radius * 0.7 + rng.range_f32(-6.0, 6.0);
        let dy = rng.range_f32(-12.0, 12.0);
        let end = index == 0 || index == TEMPLATE.len() - 1;
        let min_scale = if end { 0.65 } else { 0.85 };
        let max_scale = if index == 2 { 1.15 } else { 1.0 };
        let radius = base_radius * rng.range_f32(min_scale, max_scale);
        puffs.push(Puff { dx, dy, radius });
    }
    puffs.push(Puff {
        dx: rng.range_f32(-0.3, 0.4) * base_radius,
        dy: -base_radius * 0.8,
        radius: base_radius * 0.45,
    });
    puffs
}

/// Scatter the initial cloud layers across the playfield
pub fn spawn_clouds(playfield_width: f32, rng: &mut Pcg32) -> Vec<Cloud> {
    let mut clouds = Vec::with_capacity(CLOUD_LAYERS.len() * CLOUDS_PER_LAYER);
    for &(speed, base_radius, base_y) in &CLOUD_LAYERS {
        for _ in 0..CLOUDS_PER_LAYER {
            let radius = rng.range_f32(base_radius * 0.85, base_radius * 1.15);
            let x = rng.range_f32(0.0, playfield_width);
            let y = rng.range_f32(base_y - 20.0, base_y + 40.0);
            let puffs = cloud_puffs(radius, rng);
            clouds.push(Cloud {
                x,
                y,
                base_radius: radius,
                speed,
                puffs,
            });
        }
    }
    clouds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::ScriptedSource;
    use rand::SeedableRng;

    #[test]
    fn test_ground_wraps_continuously() {
        let tuning = Tuning::default();
        let mut ground = Ground::new(&tuning);
        assert_eq!(ground.y, 520.0);
        for _ in 0..1000 {
            ground.advance(1.3);
            // Segments stay one width apart so the strip has no holes
            assert!(((ground.x1 - ground.x2).abs() - ground.width).abs() < 0.1);
            let left = ground.x1.min(ground.x2);
            assert!(left <= 0.0 && left >= -ground.width);
        }
    }

    #[test]
    fn test_cloud_recycles_offscreen() {
        let mut cloud = Cloud {
            x: -100.0,
            y: 80.0,
            base_radius: 30.0,
            speed: 0.5,
            puffs: Vec::new(),
        };
        let mut src = ScriptedSource::new(vec![0.0, 1.0]);
        cloud.advance(1.0, PLAYFIELD_WIDTH, &mut src);
        // width = 105, so -100.5 is still partly visible
        assert_eq!(cloud.x, -100.5);

        cloud.x = -105.0;
        cloud.advance(1.0, PLAYFIELD_WIDTH, &mut src);
        assert_eq!(cloud.x, PLAYFIELD_WIDTH + CLOUD_RESPAWN_X_MIN);
        assert_eq!(cloud.y, CLOUD_RESPAWN_Y_MAX);
    }

    #[test]
    fn test_spawn_clouds_layers() {
        let mut rng = Pcg32::seed_from_u64(3);
        let clouds = spawn_clouds(PLAYFIELD_WIDTH, &mut rng);
        assert_eq!(clouds.len(), 9);
        for cloud in &clouds {
            assert_eq!(cloud.puffs.len(), 6);
            assert!(cloud.x >= 0.0 && cloud.x <= PLAYFIELD_WIDTH);
        }
        // Far layers drift slower
        assert!(clouds[0].speed < clouds[8].speed);
    }
}
