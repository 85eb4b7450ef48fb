//! Per-owner projectile collection: spawning, advancement, culling,
//! cap enforcement, and hit testing.

use serde::{Deserialize, Serialize};
use skirmish_common::{Bounds, Vec2};

/// A single projectile in flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Current position
    pub position: Vec2,
    /// Velocity in world units per normalized tick
    pub velocity: Vec2,
    /// Collision radius
    pub radius: f32,
    /// Whether the projectile is still live
    pub active: bool,
}

impl Projectile {
    /// Creates a new live projectile.
    #[must_use]
    pub const fn new(position: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
            active: true,
        }
    }
}

/// Bounded, insertion-ordered projectile collection owned by one firer.
///
/// The player and every enemy each own one of these; damage per hit is
/// fixed per owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileManager {
    projectiles: Vec<Projectile>,
    damage: i32,
}

impl ProjectileManager {
    /// Creates an empty manager whose hits deal `damage`.
    #[must_use]
    pub const fn new(damage: i32) -> Self {
        Self {
            projectiles: Vec::new(),
            damage,
        }
    }

    /// Damage dealt by one hit from this collection.
    #[must_use]
    pub const fn damage(&self) -> i32 {
        self.damage
    }

    /// Number of live projectiles.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.projectiles.iter().filter(|p| p.active).count()
    }

    /// Whether no projectiles are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_count() == 0
    }

    /// Iterates the live projectiles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter().filter(|p| p.active)
    }

    /// Spawns one projectile aimed from `origin` at `aim`.
    ///
    /// Returns `false` without spawning when origin and aim coincide
    /// (no direction can be derived).
    pub fn spawn(&mut self, origin: Vec2, aim: Vec2, speed: f32, radius: f32) -> bool {
        let direction = (aim - origin).normalized();
        if direction == Vec2::ZERO {
            return false;
        }
        self.projectiles
            .push(Projectile::new(origin, direction * speed, radius));
        true
    }

    /// Advances all live projectiles and deactivates any that leave the
    /// world bounds.
    pub fn advance_all(&mut self, dt: f32, frame_rate_norm: f32, bounds: &Bounds) {
        for projectile in &mut self.projectiles {
            if !projectile.active {
                continue;
            }
            projectile.position += projectile.velocity * (dt * frame_rate_norm);
            if !bounds.contains_circle(projectile.position, projectile.radius) {
                projectile.active = false;
            }
        }
    }

    /// Removes inactive projectiles. Called every tick after advancing.
    pub fn prune_inactive(&mut self) {
        self.projectiles.retain(|p| p.active);
    }

    /// Discards the oldest projectiles until at most `max_count` remain.
    ///
    /// Clutter ceiling, not a gameplay rule: new spawns are never
    /// rejected, old entries are silently dropped.
    pub fn enforce_cap(&mut self, max_count: usize) {
        if self.projectiles.len() > max_count {
            let excess = self.projectiles.len() - max_count;
            self.projectiles.drain(0..excess);
        }
    }

    /// Tests the live projectiles against one target circle.
    ///
    /// The first projectile (insertion order) strictly closer than the
    /// sum of radii is deactivated and its damage returned. At most one
    /// hit per call; exact tangency is a miss.
    pub fn check_hit(&mut self, target_pos: Vec2, target_radius: f32) -> Option<i32> {
        for projectile in &mut self.projectiles {
            if !projectile.active {
                continue;
            }
            let dist = projectile.position.distance(target_pos);
            if dist < projectile.radius + target_radius {
                projectile.active = false;
                return Some(self.damage);
            }
        }
        None
    }

    /// Deactivates everything (owner died).
    pub fn clear(&mut self) {
        self.projectiles.clear();
    }
}
