//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Timestep supplied by the caller, already normalized
//! - Randomness only through an injected source
//! - Stable iteration order (pipes ordered by spawn time)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod geometry;
pub mod rng;
pub mod scenery;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Contact, collides, first_contact};
pub use geometry::Rect;
pub use rng::{RandomSource, ScriptedSource};
pub use scenery::{Cloud, Ground, Puff};
pub use snapshot::{BirdView, GroundView, PipeView, RenderSnapshot};
pub use state::{Bird, GameEvent, GamePhase, Pipe, Session, SpriteMetrics};
pub use tick::{TickInput, tick};
