//! # Skirmish Common
//!
//! Foundational value types shared by all Skirmish crates:
//! - 2D vector math
//! - World bounds (culling and clamping)
//! - Entity IDs
//! - Injectable random source for deterministic simulation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod bounds;
pub mod ids;
pub mod rng;
pub mod vec2;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bounds::*;
    pub use crate::ids::*;
    pub use crate::rng::*;
    pub use crate::vec2::*;
}

pub use prelude::*;
