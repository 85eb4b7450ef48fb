//! Player character: input-driven movement, single-arrow firing, and a
//! sword swing gate.

use serde::{Deserialize, Serialize};
use skirmish_common::{EntityId, Vec2};

use crate::config::{PlayerTunables, WorldConfig};
use crate::health::{CooldownGate, Health};
use crate::projectile::ProjectileManager;

/// The player character.
///
/// Holds at most one live arrow at a time; firing while one is in
/// flight is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier
    pub id: EntityId,
    /// Current position
    pub position: Vec2,
    /// Position delta of the last tick, for enemy aim prediction
    pub velocity: Vec2,
    /// Tunables
    pub tunables: PlayerTunables,
    /// Health with a post-hit invulnerability window
    pub health: Health,
    /// Sword swing gate
    pub melee_gate: CooldownGate,
    /// The player's arrow (cap 1)
    pub arrow: ProjectileManager,
}

impl Player {
    /// Spawns the player at `position` with full health.
    #[must_use]
    pub fn new(position: Vec2, tunables: PlayerTunables) -> Self {
        Self {
            id: EntityId::new(),
            position,
            velocity: Vec2::ZERO,
            health: Health::with_invulnerability(
                tunables.max_health,
                tunables.invulnerability_duration,
            ),
            melee_gate: CooldownGate::new(tunables.melee_cooldown),
            arrow: ProjectileManager::new(tunables.arrow_damage),
            tunables,
        }
    }

    /// Collision radius.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.tunables.radius
    }

    /// Whether the player is dead.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health.is_dead()
    }

    /// Applies damage. Returns `true` if it landed.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health.take_damage(amount)
    }

    /// Integrates one tick of resolved input.
    ///
    /// `direction` is the collaborator's already-resolved movement
    /// vector; it is normalized here so diagonal input is not faster.
    /// Dead players ignore input.
    pub fn apply_input(&mut self, direction: Vec2, dt: f32, world: &WorldConfig) {
        if self.is_dead() {
            self.velocity = Vec2::ZERO;
            return;
        }
        let dir = direction.normalized();
        let step = dir * (self.tunables.speed * dt * world.frame_rate_norm);
        self.velocity = step;
        self.position += step;
    }

    /// Fires the arrow toward `aim`.
    ///
    /// Ignored (returns `false`) while an arrow is already in flight,
    /// when the aim point coincides with the player, or when dead.
    pub fn fire_arrow(&mut self, aim: Vec2) -> bool {
        if self.is_dead() || !self.arrow.is_empty() {
            return false;
        }
        self.arrow.spawn(
            self.position,
            aim,
            self.tunables.arrow_speed,
            self.tunables.arrow_radius,
        )
    }

    /// Swings the sword.
    ///
    /// Returns the swing damage if the gate was open; the session tests
    /// reach against each enemy. Ignored when dead or on cooldown.
    pub fn swing_sword(&mut self) -> Option<i32> {
        if self.is_dead() || !self.melee_gate.is_ready() {
            return None;
        }
        self.melee_gate.consume();
        Some(self.tunables.melee_damage)
    }

    /// Whether `target` is within sword reach.
    #[must_use]
    pub fn in_sword_reach(&self, target_pos: Vec2, target_radius: f32) -> bool {
        self.position.distance(target_pos) < self.tunables.melee_range + target_radius
    }

    /// Ticks the invulnerability window and the sword gate.
    pub fn update_timers(&mut self, dt: f32) {
        self.health.tick(dt);
        self.melee_gate.tick(dt);
    }

    /// Advances and culls the player's arrow.
    pub fn update_arrow(&mut self, dt: f32, world: &WorldConfig) {
        self.arrow.advance_all(dt, world.frame_rate_norm, &world.bounds);
        self.arrow.prune_inactive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn player() -> Player {
        Player::new(Vec2::ZERO, PlayerTunables::default())
    }

    #[test]
    fn test_input_normalized() {
        let w = WorldConfig::default();
        let mut p = player();
        p.apply_input(Vec2::new(3.0, 4.0), DT, &w);

        let step = p.position.length();
        let expected = p.tunables.speed * DT * w.frame_rate_norm;
        assert!((step - expected).abs() < 1e-6);
        assert_eq!(p.velocity, p.position);
    }

    #[test]
    fn test_zero_input_stays_put() {
        let w = WorldConfig::default();
        let mut p = player();
        p.apply_input(Vec2::ZERO, DT, &w);
        assert_eq!(p.position, Vec2::ZERO);
        assert_eq!(p.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_single_arrow_rule() {
        let mut p = player();
        assert!(p.fire_arrow(Vec2::new(1.0, 0.0)));
        // Second fire while the first is live is ignored.
        assert!(!p.fire_arrow(Vec2::new(0.0, 1.0)));
        assert_eq!(p.arrow.live_count(), 1);

        // Once the arrow leaves the arena, firing works again.
        let w = WorldConfig::default();
        for _ in 0..200 {
            p.update_arrow(DT, &w);
        }
        assert!(p.arrow.is_empty());
        assert!(p.fire_arrow(Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn test_fire_at_own_position_ignored() {
        let mut p = player();
        assert!(!p.fire_arrow(Vec2::ZERO));
        assert!(p.arrow.is_empty());
    }

    #[test]
    fn test_sword_gate() {
        let mut p = player();
        assert_eq!(p.swing_sword(), Some(p.tunables.melee_damage));
        assert_eq!(p.swing_sword(), None);

        p.update_timers(p.tunables.melee_cooldown + 1e-3);
        assert!(p.swing_sword().is_some());
    }

    #[test]
    fn test_sword_reach() {
        let p = player();
        assert!(p.in_sword_reach(Vec2::new(0.1, 0.0), 0.05));
        assert!(!p.in_sword_reach(Vec2::new(0.5, 0.0), 0.05));
    }

    #[test]
    fn test_dead_player_inert() {
        let w = WorldConfig::default();
        let mut p = player();
        p.take_damage(1000);
        assert!(p.is_dead());

        p.apply_input(Vec2::new(1.0, 0.0), DT, &w);
        assert_eq!(p.position, Vec2::ZERO);
        assert!(!p.fire_arrow(Vec2::new(1.0, 0.0)));
        assert_eq!(p.swing_sword(), None);
    }

    #[test]
    fn test_invulnerability_window() {
        let mut p = player();
        assert!(p.take_damage(10));
        assert!(!p.take_damage(10));
        assert_eq!(p.health.current(), 90);

        p.update_timers(p.tunables.invulnerability_duration + 1e-3);
        assert!(p.take_damage(10));
        assert_eq!(p.health.current(), 80);
    }
}
