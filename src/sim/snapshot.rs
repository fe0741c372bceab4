//! Read-only view of a session for renderers and HUDs

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::rng::RandomSource;
use super::scenery::Cloud;
use super::state::{GamePhase, Session};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirdView {
    pub pos: Vec2,
    /// Degrees, positive = nose down
    pub angle: f32,
    pub alive: bool,
    pub frame: u8,
    pub hitbox: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeView {
    pub x: f32,
    pub gap_center: f32,
    pub top: Rect,
    pub bottom: Rect,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundView {
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub bird: BirdView,
    pub pipes: Vec<PipeView>,
    pub ground: GroundView,
    pub clouds: Vec<Cloud>,
    pub score: u32,
    pub high_score: u32,
    pub game_over: bool,
}

impl RenderSnapshot {
    pub fn capture<R: RandomSource>(session: &Session<R>) -> Self {
        let bird = &session.bird;
        Self {
            bird: BirdView {
                pos: bird.pos,
                angle: bird.angle,
                alive: bird.alive,
                frame: bird.frame,
                hitbox: bird.hitbox(),
            },
            pipes: session
                .pipes
                .iter()
                .map(|pipe| PipeView {
                    x: pipe.x,
                    gap_center: pipe.gap_center(),
                    top: pipe.top_rect(),
                    bottom: pipe.bottom_rect(),
                    passed: pipe.passed(),
                })
                .collect(),
            ground: GroundView {
                x1: session.ground.x1,
                x2: session.ground.x2,
                y: session.ground.y,
            },
            clouds: session.clouds.clone(),
            score: session.score,
            high_score: session.high_score,
            game_over: session.phase == GamePhase::GameOver,
        }
    }
}
