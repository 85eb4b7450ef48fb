//! Tunable parameters for the arena, enemies, and player.
//!
//! Speeds are authored against a 60-updates-per-second baseline; all
//! movement is scaled by `delta_time * frame_rate_norm` so the authored
//! values stay correct at any actual tick rate.

use serde::{Deserialize, Serialize};
use skirmish_common::Bounds;

/// Default orthographic aspect ratio (16:9 arena).
pub const DEFAULT_ASPECT: f32 = 16.0 / 9.0;

/// World-level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Arena rectangle; projectiles are culled and bodies clamped to it
    pub bounds: Bounds,
    /// Frame-rate normalization constant applied to all dt-scaled motion
    pub frame_rate_norm: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::from_half_extents(DEFAULT_ASPECT, 1.0),
            frame_rate_norm: 60.0,
        }
    }
}

impl WorldConfig {
    /// Creates a world config with the given arena bounds.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }
}

/// Behavior and combat tunables for one enemy.
///
/// Caller contract: `melee_range < shooting_range < detection_range`.
/// This ordering is configuration convention, never asserted; a
/// misconfigured set degrades to the attacking handler's close-distance
/// fallback rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyTunables {
    /// Collision radius
    pub radius: f32,
    /// Base movement speed (world units per normalized tick)
    pub speed: f32,
    /// Maximum health
    pub max_health: i32,
    /// Range at which the enemy notices the player
    pub detection_range: f32,
    /// Range at which the enemy starts shooting
    pub shooting_range: f32,
    /// Range at which the enemy swings instead of shooting
    pub melee_range: f32,
    /// Maximum roam distance from the home position
    pub wander_radius: f32,
    /// Seconds between wander target re-picks
    pub wander_interval: f32,
    /// Seconds between shots
    pub shooting_cooldown: f32,
    /// Seconds between melee swings
    pub melee_cooldown: f32,
    /// Damage of one melee swing
    pub melee_damage: i32,
    /// Damage of one arrow hit
    pub arrow_damage: i32,
    /// Arrow flight speed
    pub arrow_speed: f32,
    /// Arrow collision radius
    pub arrow_radius: f32,
    /// Maximum live arrows per enemy; oldest are discarded above this
    pub arrow_cap: usize,
    /// Look-ahead seconds for aim/search prediction
    pub prediction_horizon: f32,
    /// Health fraction below which the enemy flees
    pub low_health_fraction: f32,
    /// Speed fraction while wandering
    pub wander_speed_fraction: f32,
    /// Speed fraction while following
    pub follow_speed_fraction: f32,
    /// Fraction of following speed while moving to a last-known position
    pub detect_speed_fraction: f32,
    /// Speed multiplier while fleeing
    pub flee_speed_multiplier: f32,
    /// Preferred shooting distance as a fraction of shooting range
    pub optimal_distance_fraction: f32,
    /// Fraction of shooting range beyond which the shooter closes in
    pub close_in_fraction: f32,
    /// Weight of the home position in the flee direction blend
    pub flee_home_bias: f32,
}

impl Default for EnemyTunables {
    fn default() -> Self {
        Self {
            radius: 0.05,
            speed: 0.005,
            max_health: 30,
            detection_range: 0.9,
            shooting_range: 0.5,
            melee_range: 0.12,
            wander_radius: 0.4,
            wander_interval: 3.0,
            shooting_cooldown: 1.5,
            melee_cooldown: 1.0,
            melee_damage: 15,
            arrow_damage: 10,
            arrow_speed: 0.02,
            arrow_radius: 0.01,
            arrow_cap: 8,
            prediction_horizon: 0.25,
            low_health_fraction: 0.3,
            wander_speed_fraction: 0.4,
            follow_speed_fraction: 0.8,
            detect_speed_fraction: 0.6,
            flee_speed_multiplier: 1.2,
            optimal_distance_fraction: 0.7,
            close_in_fraction: 0.9,
            flee_home_bias: 0.3,
        }
    }
}

impl EnemyTunables {
    /// Sets the movement speed.
    #[must_use]
    pub const fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Sets the maximum health.
    #[must_use]
    pub const fn with_max_health(mut self, health: i32) -> Self {
        self.max_health = health;
        self
    }

    /// Sets the detection range.
    #[must_use]
    pub const fn with_detection_range(mut self, range: f32) -> Self {
        self.detection_range = range;
        self
    }

    /// Sets the shooting range.
    #[must_use]
    pub const fn with_shooting_range(mut self, range: f32) -> Self {
        self.shooting_range = range;
        self
    }

    /// Sets the melee range.
    #[must_use]
    pub const fn with_melee_range(mut self, range: f32) -> Self {
        self.melee_range = range;
        self
    }

    /// Sets the wander radius.
    #[must_use]
    pub const fn with_wander_radius(mut self, radius: f32) -> Self {
        self.wander_radius = radius;
        self
    }

    /// Sets the live-arrow cap.
    #[must_use]
    pub const fn with_arrow_cap(mut self, cap: usize) -> Self {
        self.arrow_cap = cap;
        self
    }
}

/// Tunables for the player character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerTunables {
    /// Collision radius
    pub radius: f32,
    /// Base movement speed (world units per normalized tick)
    pub speed: f32,
    /// Maximum health
    pub max_health: i32,
    /// Extra separation applied when pushing off an overlapping enemy
    pub push_force: f32,
    /// Arrow flight speed
    pub arrow_speed: f32,
    /// Arrow collision radius
    pub arrow_radius: f32,
    /// Damage of one player arrow
    pub arrow_damage: i32,
    /// Reach of a sword swing
    pub melee_range: f32,
    /// Damage of one sword swing
    pub melee_damage: i32,
    /// Seconds between sword swings
    pub melee_cooldown: f32,
    /// Seconds of invulnerability after taking non-fatal damage
    pub invulnerability_duration: f32,
}

impl Default for PlayerTunables {
    fn default() -> Self {
        Self {
            radius: 0.05,
            speed: 0.005,
            max_health: 100,
            push_force: 0.01,
            arrow_speed: 0.02,
            arrow_radius: 0.01,
            arrow_damage: 10,
            melee_range: 0.15,
            melee_damage: 20,
            melee_cooldown: 0.5,
            invulnerability_duration: 0.8,
        }
    }
}

impl PlayerTunables {
    /// Sets the maximum health.
    #[must_use]
    pub const fn with_max_health(mut self, health: i32) -> Self {
        self.max_health = health;
        self
    }

    /// Sets the movement speed.
    #[must_use]
    pub const fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_range_ordering() {
        let t = EnemyTunables::default();
        assert!(t.melee_range < t.shooting_range);
        assert!(t.shooting_range < t.detection_range);
    }

    #[test]
    fn test_world_config_defaults() {
        let w = WorldConfig::default();
        assert!((w.frame_rate_norm - 60.0).abs() < 1e-6);
        assert!((w.bounds.max_y - 1.0).abs() < 1e-6);
        assert!((w.bounds.max_x - DEFAULT_ASPECT).abs() < 1e-6);
    }

    #[test]
    fn test_builders() {
        let t = EnemyTunables::default()
            .with_speed(0.01)
            .with_max_health(50)
            .with_arrow_cap(4);
        assert_eq!(t.speed, 0.01);
        assert_eq!(t.max_health, 50);
        assert_eq!(t.arrow_cap, 4);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let t = EnemyTunables::default();
        let json = serde_json::to_string(&t).expect("serialize");
        let back: EnemyTunables = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(t, back);
    }
}
