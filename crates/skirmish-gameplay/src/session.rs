//! Per-frame simulation loop tying player, enemies, projectiles, and
//! collision resolution together.

use thiserror::Error;
use tracing::debug;

use skirmish_common::{EntityId, RandomSource, Vec2};

use crate::collision;
use crate::config::{EnemyTunables, PlayerTunables, WorldConfig};
use crate::enemy::Enemy;
use crate::events::{CombatEvent, CombatEventBus};
use crate::player::Player;
use crate::projectile::Projectile;

/// Structural session errors. The numeric core itself is infallible and
/// degrades silently; errors only cover misuse of the query surface.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A targeted query named an enemy that does not exist.
    #[error("no enemy with id {0:?}")]
    EnemyNotFound(EntityId),
}

/// Result alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// One running game: the player, the enemies, and the fixed-phase
/// per-tick update.
///
/// Single-threaded by design. The only time source is the `dt` passed
/// to [`GameSession::update`]; all motion and timers are scaled by it.
pub struct GameSession {
    config: WorldConfig,
    enemy_tunables: EnemyTunables,
    player: Player,
    enemies: Vec<Enemy>,
    rng: Box<dyn RandomSource>,
    events: CombatEventBus,
    fire_intent: Option<Vec2>,
    melee_intent: bool,
}

impl GameSession {
    /// Creates a session with the player at the arena center.
    #[must_use]
    pub fn new(config: WorldConfig, rng: Box<dyn RandomSource>) -> Self {
        Self {
            config,
            enemy_tunables: EnemyTunables::default(),
            player: Player::new(Vec2::ZERO, PlayerTunables::default()),
            enemies: Vec::new(),
            rng,
            events: CombatEventBus::default(),
            fire_intent: None,
            melee_intent: false,
        }
    }

    /// Sets the tunables used for subsequently spawned enemies.
    #[must_use]
    pub fn with_enemy_tunables(mut self, tunables: EnemyTunables) -> Self {
        self.enemy_tunables = tunables;
        self
    }

    /// Replaces the player with one using the given tunables.
    #[must_use]
    pub fn with_player_tunables(mut self, tunables: PlayerTunables) -> Self {
        self.player = Player::new(self.player.position, tunables);
        self
    }

    /// World configuration.
    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// The player.
    #[must_use]
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// All enemies, dead ones included (they stay renderable in place).
    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter()
    }

    /// Number of enemies still alive.
    #[must_use]
    pub fn living_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| !e.is_dead()).count()
    }

    /// Looks up one enemy by id.
    pub fn enemy(&self, id: EntityId) -> SessionResult<&Enemy> {
        self.enemies
            .iter()
            .find(|e| e.id == id)
            .ok_or(SessionError::EnemyNotFound(id))
    }

    /// All live projectiles, the player's arrow first.
    pub fn live_projectiles(&self) -> impl Iterator<Item = &Projectile> {
        self.player
            .arrow
            .iter()
            .chain(self.enemies.iter().flat_map(|e| e.arrows.iter()))
    }

    /// Drains events accumulated since the last call.
    pub fn drain_events(&self) -> Vec<CombatEvent> {
        self.events.drain()
    }

    /// Receiver for an external event subscriber.
    #[must_use]
    pub fn subscribe_events(&self) -> crossbeam_channel::Receiver<CombatEvent> {
        self.events.subscribe()
    }

    /// Spawns one enemy at `position` with the session's tunables.
    pub fn spawn_enemy(&mut self, position: Vec2) -> EntityId {
        let enemy = Enemy::new(position, self.enemy_tunables);
        let id = enemy.id;
        self.enemies.push(enemy);
        id
    }

    /// Spawns `count` enemies at uniformly random points on the arena
    /// edges.
    pub fn spawn_edge_enemies(&mut self, count: usize) {
        let b = self.config.bounds;
        for _ in 0..count {
            let edge = self.rng.uniform(0.0, 4.0).floor() as u32 % 4;
            let position = match edge {
                0 => Vec2::new(b.min_x, self.rng.uniform(b.min_y, b.max_y)),
                1 => Vec2::new(b.max_x, self.rng.uniform(b.min_y, b.max_y)),
                2 => Vec2::new(self.rng.uniform(b.min_x, b.max_x), b.max_y),
                _ => Vec2::new(self.rng.uniform(b.min_x, b.max_x), b.min_y),
            };
            self.spawn_enemy(position);
        }
    }

    /// Queues a ranged-attack pulse for the next tick.
    ///
    /// The input collaborator debounces; a held button must call this
    /// once per press, not once per tick.
    pub fn queue_fire(&mut self, aim: Vec2) {
        self.fire_intent = Some(aim);
    }

    /// Queues a sword-swing pulse for the next tick.
    pub fn queue_melee(&mut self) {
        self.melee_intent = true;
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// Fixed phase order: player input and firing, enemy AI, projectile
    /// advancement, positional separation, hit application, boundary
    /// clamping. Negative `dt` is treated as zero.
    pub fn update(&mut self, dt: f32, player_input: Vec2) {
        let dt = dt.max(0.0);

        // Player phase.
        self.player.update_timers(dt);
        self.player.apply_input(player_input, dt, &self.config);
        if let Some(aim) = self.fire_intent.take() {
            if self.player.fire_arrow(aim) {
                self.events.publish(CombatEvent::ProjectileFired {
                    owner: self.player.id,
                });
            }
        }
        self.player.update_arrow(dt, &self.config);
        let sword_damage = if std::mem::take(&mut self.melee_intent) {
            self.player.swing_sword()
        } else {
            None
        };

        // Enemy AI phase. Melee swings are collected and applied in the
        // hit phase with everything else.
        let player_pos = self.player.position;
        let player_radius = self.player.radius();
        let mut pending_melee: Vec<(EntityId, i32)> = Vec::new();
        for enemy in &mut self.enemies {
            let out = enemy.update(player_pos, player_radius, dt, &self.config, self.rng.as_mut());
            if let Some((from, to)) = out.transition {
                debug!(enemy = ?enemy.id, ?from, ?to, "enemy state change");
                self.events.publish(CombatEvent::StateChanged {
                    entity: enemy.id,
                    from,
                    to,
                });
            }
            if out.fired {
                self.events.publish(CombatEvent::ProjectileFired { owner: enemy.id });
            }
            if let Some(damage) = out.melee_hit {
                pending_melee.push((enemy.id, damage));
            }
            enemy.update_arrows(dt, &self.config);
        }

        self.resolve_collisions();
        self.apply_hits(&pending_melee, sword_damage);
        self.clamp_to_bounds();
    }

    /// Positional separation: player against each living enemy with the
    /// asymmetric push, then living enemy pairs symmetrically in fixed
    /// `i < j` order, one pass.
    fn resolve_collisions(&mut self) {
        let push = self.player.tunables.push_force;
        let player_radius = self.player.radius();
        for enemy in &mut self.enemies {
            if enemy.is_dead() {
                continue;
            }
            // Both sides push off the pre-separation positions.
            let enemy_pos = enemy.position;
            let player_pos = self.player.position;
            let radius = enemy.radius();
            collision::separate_with_push(
                &mut enemy.position,
                radius,
                player_pos,
                player_radius,
                push,
            );
            collision::separate_with_push(
                &mut self.player.position,
                player_radius,
                enemy_pos,
                radius,
                push,
            );
        }

        for i in 0..self.enemies.len() {
            for j in (i + 1)..self.enemies.len() {
                let (left, right) = self.enemies.split_at_mut(j);
                let (a, b) = (&mut left[i], &mut right[0]);
                if a.is_dead() || b.is_dead() {
                    continue;
                }
                let (ra, rb) = (a.radius(), b.radius());
                collision::separate_symmetric(&mut a.position, ra, &mut b.position, rb);
            }
        }
    }

    /// Applies all damage for the tick: enemy arrows against the
    /// player, the player's arrow and sword against enemies, and the
    /// enemies' collected melee swings.
    fn apply_hits(&mut self, pending_melee: &[(EntityId, i32)], sword_damage: Option<i32>) {
        let player_pos = self.player.position;
        let player_radius = self.player.radius();
        let player_id = self.player.id;

        // Enemy arrows vs player. Arrows from dead enemies still fly.
        for enemy in &mut self.enemies {
            if let Some(damage) = enemy.arrows.check_hit(player_pos, player_radius) {
                if self.player.take_damage(damage) {
                    debug!(attacker = ?enemy.id, damage, "arrow hit player");
                    self.events.publish(CombatEvent::Hit {
                        attacker: enemy.id,
                        target: player_id,
                        damage,
                    });
                    if self.player.is_dead() {
                        self.events.publish(CombatEvent::Died { entity: player_id });
                    }
                }
            }
        }

        // Collected melee swings vs player.
        for &(attacker, damage) in pending_melee {
            if self.player.take_damage(damage) {
                debug!(?attacker, damage, "melee hit player");
                self.events.publish(CombatEvent::Hit {
                    attacker,
                    target: player_id,
                    damage,
                });
                if self.player.is_dead() {
                    self.events.publish(CombatEvent::Died { entity: player_id });
                }
            }
        }

        // Player arrow and sword vs enemies.
        for enemy in &mut self.enemies {
            if enemy.is_dead() {
                continue;
            }
            let radius = enemy.radius();
            let mut landed = None;
            if let Some(damage) = self.player.arrow.check_hit(enemy.position, radius) {
                if enemy.take_damage(damage) {
                    landed = Some(damage);
                }
            }
            if let Some(damage) = sword_damage {
                if self.player.in_sword_reach(enemy.position, radius) && enemy.take_damage(damage) {
                    landed = Some(damage);
                }
            }
            if let Some(damage) = landed {
                debug!(target = ?enemy.id, damage, "player hit enemy");
                self.events.publish(CombatEvent::Hit {
                    attacker: player_id,
                    target: enemy.id,
                    damage,
                });
                if enemy.is_dead() {
                    self.events.publish(CombatEvent::Died { entity: enemy.id });
                }
            }
        }
    }

    /// Clamps the player and living enemies into the arena.
    fn clamp_to_bounds(&mut self) {
        let bounds = self.config.bounds;
        self.player.position = bounds.clamp_circle(self.player.position, self.player.radius());
        for enemy in &mut self.enemies {
            if enemy.is_dead() {
                continue;
            }
            let radius = enemy.radius();
            enemy.position = bounds.clamp_circle(enemy.position, radius);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::EnemyState;
    use skirmish_common::SequenceRng;

    const DT: f32 = 1.0 / 60.0;

    fn session() -> GameSession {
        GameSession::new(
            WorldConfig::default(),
            Box::new(SequenceRng::new(vec![0.1, 0.4, 0.7, 0.2, 0.9])),
        )
    }

    fn run(session: &mut GameSession, ticks: usize) {
        for _ in 0..ticks {
            session.update(DT, Vec2::ZERO);
        }
    }

    #[test]
    fn test_spawn_edge_enemies_on_edges() {
        let mut s = session();
        s.spawn_edge_enemies(10);

        let b = s.config().bounds;
        assert_eq!(s.enemies().count(), 10);
        for enemy in s.enemies() {
            let p = enemy.position;
            let on_x_edge = (p.x - b.min_x).abs() < 1e-6 || (p.x - b.max_x).abs() < 1e-6;
            let on_y_edge = (p.y - b.min_y).abs() < 1e-6 || (p.y - b.max_y).abs() < 1e-6;
            assert!(on_x_edge || on_y_edge);
        }
    }

    #[test]
    fn test_enemy_lookup() {
        let mut s = session();
        let id = s.spawn_enemy(Vec2::new(0.5, 0.5));
        assert!(s.enemy(id).is_ok());
        assert!(matches!(
            s.enemy(EntityId::new()),
            Err(SessionError::EnemyNotFound(_))
        ));
    }

    #[test]
    fn test_enemy_approaches_player() {
        let mut s = session();
        let id = s.spawn_enemy(Vec2::new(0.8, 0.0));
        let start = s.enemy(id).expect("spawned").position;

        run(&mut s, 30);
        let now = s.enemy(id).expect("spawned").position;
        assert!(now.distance(Vec2::ZERO) < start.distance(Vec2::ZERO));

        // The wander-to-follow transition was published.
        let events = s.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            CombatEvent::StateChanged {
                to: EnemyState::Following,
                ..
            }
        )));
    }

    #[test]
    fn test_player_arrow_kills_weak_enemy() {
        let mut s = session()
            .with_enemy_tunables(EnemyTunables::default().with_max_health(10));
        let id = s.spawn_enemy(Vec2::new(0.4, 0.0));
        s.queue_fire(Vec2::new(1.0, 0.0));

        run(&mut s, 60);
        assert!(s.enemy(id).expect("still queryable").is_dead());
        assert_eq!(s.living_enemy_count(), 0);

        let events = s.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, CombatEvent::Died { entity } if *entity == id)));
    }

    #[test]
    fn test_melee_kill_scenario() {
        // Enemy swing damage 15 against a player with 15 health: a
        // single connecting swing is fatal, no invulnerability window.
        let mut s = session()
            .with_player_tunables(PlayerTunables::default().with_max_health(15));
        s.spawn_enemy(Vec2::new(0.08, 0.0));

        run(&mut s, 5);
        assert!(s.player().is_dead());
        assert_eq!(s.player().health.current(), 0);

        let events = s.drain_events();
        let player_id = s.player().id;
        assert!(events.iter().any(|e| matches!(
            e,
            CombatEvent::Hit { target, damage: 15, .. } if *target == player_id
        )));
        assert!(events
            .iter()
            .any(|e| matches!(e, CombatEvent::Died { entity } if *entity == player_id)));
    }

    #[test]
    fn test_sword_swing_hits_adjacent_enemy() {
        let mut s = session()
            .with_enemy_tunables(EnemyTunables::default().with_max_health(20));
        let id = s.spawn_enemy(Vec2::new(0.12, 0.0));
        s.queue_melee();
        s.update(DT, Vec2::ZERO);

        assert!(s.enemy(id).expect("spawned").is_dead());
    }

    #[test]
    fn test_separation_through_update() {
        let mut s = session();
        let a = s.spawn_enemy(Vec2::new(0.50, 0.5));
        let b = s.spawn_enemy(Vec2::new(0.52, 0.5));
        s.update(DT, Vec2::ZERO);

        let pa = s.enemy(a).expect("a").position;
        let pb = s.enemy(b).expect("b").position;
        let min_dist = s.enemy(a).expect("a").radius() + s.enemy(b).expect("b").radius();
        assert!(pa.distance(pb) >= min_dist - 1e-4);
    }

    #[test]
    fn test_player_pushed_off_enemy() {
        let mut s = session();
        s.spawn_enemy(Vec2::new(0.04, 0.0));
        s.update(DT, Vec2::ZERO);

        let enemy_pos = s.enemies().next().expect("one").position;
        let dist = s.player().position.distance(enemy_pos);
        assert!(dist > 0.04);
    }

    #[test]
    fn test_clamping_keeps_player_in_bounds() {
        let mut s = session();
        // Walk left for a long time; the edge stops the player.
        for _ in 0..2000 {
            s.update(DT, Vec2::new(-1.0, 0.0));
        }
        let b = s.config().bounds;
        let p = s.player();
        assert!(p.position.x >= b.min_x + p.radius() - 1e-6);
    }

    #[test]
    fn test_negative_dt_is_inert() {
        let mut s = session();
        let id = s.spawn_enemy(Vec2::new(0.8, 0.0));
        let before = s.enemy(id).expect("spawned").position;
        s.update(-0.5, Vec2::new(1.0, 0.0));
        assert_eq!(s.enemy(id).expect("spawned").position, before);
        assert_eq!(s.player().position, Vec2::ZERO);
    }

    #[test]
    fn test_fire_pulse_consumed_once() {
        let mut s = session();
        s.queue_fire(Vec2::new(1.0, 0.0));
        s.update(DT, Vec2::ZERO);
        assert_eq!(s.player().arrow.live_count(), 1);

        // No re-fire on later ticks without a new pulse; the single
        // live arrow also blocks a queued one.
        s.queue_fire(Vec2::new(0.0, 1.0));
        s.update(DT, Vec2::ZERO);
        assert_eq!(s.player().arrow.live_count(), 1);
        assert_eq!(s.live_projectiles().count(), 1);
    }

    #[test]
    fn test_deterministic_with_same_seed() {
        let build = || {
            let mut s = GameSession::new(
                WorldConfig::default(),
                Box::new(SequenceRng::new(vec![0.3, 0.6, 0.9, 0.2])),
            );
            s.spawn_edge_enemies(4);
            s
        };
        let mut a = build();
        let mut b = build();
        run(&mut a, 120);
        run(&mut b, 120);

        let pa: Vec<Vec2> = a.enemies().map(|e| e.position).collect();
        let pb: Vec<Vec2> = b.enemies().map(|e| e.position).collect();
        assert_eq!(pa, pb);
        assert_eq!(a.player().position, b.player().position);
    }
}
