//! Collision detection
//!
//! Discrete per-step tests only. The frame clamp keeps per-step displacement
//! well under the bird's height. Touching edges count as a hit.

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::state::{Bird, Pipe};

/// What the bird ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contact {
    Ceiling,
    Ground,
    /// Index into the active pipe list at the time of the hit
    Pipe { index: usize },
}

/// First surface the hitbox touches, checked ceiling → ground → pipes
pub fn first_contact(hitbox: &Rect, pipes: &[Pipe], ground_y: f32) -> Option<Contact> {
    if hitbox.top() <= 0.0 {
        return Some(Contact::Ceiling);
    }
    if hitbox.bottom() >= ground_y {
        return Some(Contact::Ground);
    }
    pipes
        .iter()
        .position(|pipe| {
            hitbox.intersects(&pipe.top_rect()) || hitbox.intersects(&pipe.bottom_rect())
        })
        .map(|index| Contact::Pipe { index })
}

/// Whether the bird touches the ceiling, the ground or any pipe
pub fn collides(bird: &Bird, pipes: &[Pipe], ground_y: f32) -> bool {
    first_contact(&bird.hitbox(), pipes, ground_y).is_some()
}
