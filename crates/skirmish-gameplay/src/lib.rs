//! # Skirmish Gameplay
//!
//! The simulation core of Skirmish: enemy AI, combat entity state,
//! projectile lifecycles, circle collision resolution, and the
//! per-frame [`session::GameSession`] update loop that ties them
//! together.
//!
//! Rendering, windowing, and input polling live outside this crate;
//! collaborators feed resolved input vectors and `dt` in, and read
//! positions, health, and events back out.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod collision;
pub mod config;
pub mod enemy;
pub mod events;
pub mod health;
pub mod player;
pub mod projectile;
pub mod session;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::collision::*;
    pub use crate::config::*;
    pub use crate::enemy::*;
    pub use crate::events::*;
    pub use crate::health::*;
    pub use crate::player::*;
    pub use crate::projectile::*;
    pub use crate::session::*;
}

pub use prelude::*;
