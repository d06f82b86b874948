//! Frame simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - One `tick` per display frame, driven by elapsed seconds
//! - Seeded RNG only
//! - Stable iteration order (collection order)

pub mod autopilot;
pub mod collision;
pub mod rng;
pub mod state;
pub mod tick;
pub mod wave;

pub use collision::{GhostOutcome, aabb_hit};
pub use rng::GameRng;
pub use state::{
    Bullet, GameEvent, GamePhase, GameState, Ghost, Particle, Player, Shake, Star,
};
pub use tick::{TickInput, tick};
pub use wave::{WavePlan, next_wave, spawn_wave};
