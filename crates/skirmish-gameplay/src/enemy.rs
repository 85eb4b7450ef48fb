//! Enemy AI controller: five-state behavior machine with movement,
//! targeting, and attack cooldowns.

use serde::{Deserialize, Serialize};
use skirmish_common::{EntityId, RandomSource, Vec2, EPSILON};

use crate::config::{EnemyTunables, WorldConfig};
use crate::health::{CooldownGate, Health};
use crate::projectile::ProjectileManager;

/// Behavior state of an enemy. Always exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyState {
    /// Roaming near the home position
    Wandering,
    /// Aware of the player but without line of sight; heading to the
    /// last known position at reduced speed
    Detecting,
    /// Tracking the player via predicted position
    Following,
    /// In range; swinging, shooting, or closing distance
    Attacking,
    /// Low health and threatened; retreating with a homeward bias
    Fleeing,
}

/// Selects the behavior state for one tick.
///
/// Evaluation order is fixed: self-preservation first, then attack
/// ranges, then awareness, then wandering. Every input combination maps
/// to exactly one state.
#[must_use]
pub fn select_state(
    tunables: &EnemyTunables,
    dist_to_player: f32,
    health_fraction: f32,
    line_of_sight: bool,
) -> EnemyState {
    if health_fraction < tunables.low_health_fraction && dist_to_player < tunables.shooting_range {
        EnemyState::Fleeing
    } else if dist_to_player <= tunables.melee_range || dist_to_player <= tunables.shooting_range {
        EnemyState::Attacking
    } else if dist_to_player <= tunables.detection_range {
        if line_of_sight {
            EnemyState::Following
        } else {
            EnemyState::Detecting
        }
    } else {
        EnemyState::Wandering
    }
}

/// What one enemy tick produced, for the session to turn into events.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnemyTickOutput {
    /// State transition, if one happened this tick
    pub transition: Option<(EnemyState, EnemyState)>,
    /// Whether an arrow was fired
    pub fired: bool,
    /// Damage of a landed melee swing, if one connected
    pub melee_hit: Option<i32>,
}

/// An autonomous enemy combatant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Unique identifier
    pub id: EntityId,
    /// Current position
    pub position: Vec2,
    /// Behavior tunables
    pub tunables: EnemyTunables,
    /// Health and invulnerability state
    pub health: Health,
    /// Anchor for wandering, fixed at spawn
    pub home_position: Vec2,
    /// Current behavior state
    pub state: EnemyState,
    /// Seconds since the last state transition
    pub state_timer: f32,
    /// Ranged attack gate
    pub shoot_gate: CooldownGate,
    /// Melee attack gate
    pub melee_gate: CooldownGate,
    /// Current roam destination
    pub wander_target: Vec2,
    /// Seconds since the last wander re-pick
    pub wander_timer: f32,
    /// Player position from the last tick with line of sight
    pub last_known_player_position: Vec2,
    /// This enemy's live arrows
    pub arrows: ProjectileManager,
}

impl Enemy {
    /// Spawns a new enemy at `position` with full health.
    #[must_use]
    pub fn new(position: Vec2, tunables: EnemyTunables) -> Self {
        Self {
            id: EntityId::new(),
            position,
            health: Health::new(tunables.max_health),
            home_position: position,
            state: EnemyState::Wandering,
            state_timer: 0.0,
            shoot_gate: CooldownGate::new(tunables.shooting_cooldown),
            melee_gate: CooldownGate::new(tunables.melee_cooldown),
            wander_target: position,
            wander_timer: tunables.wander_interval, // retarget on first tick
            last_known_player_position: Vec2::ZERO,
            arrows: ProjectileManager::new(tunables.arrow_damage),
            tunables,
        }
    }

    /// Collision radius.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.tunables.radius
    }

    /// Whether this enemy is dead.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health.is_dead()
    }

    /// Applies damage. Returns `true` if it landed.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health.take_damage(amount)
    }

    /// Line-of-sight check.
    ///
    /// Currently identical to the detection-range check: there is no
    /// occluder model, so sight is a pure range test.
    #[must_use]
    pub fn has_line_of_sight(&self, dist_to_player: f32) -> bool {
        dist_to_player <= self.tunables.detection_range
    }

    /// Pure melee hit query: open gate and target within reach.
    ///
    /// Does not apply damage and does not close the gate; the attacking
    /// handler consumes the gate so a single swing is never spent twice.
    #[must_use]
    pub fn check_melee_hit(&self, target_pos: Vec2, target_radius: f32) -> Option<i32> {
        if !self.melee_gate.is_ready() {
            return None;
        }
        let dist = self.position.distance(target_pos);
        if dist < self.tunables.melee_range + target_radius {
            Some(self.tunables.melee_damage)
        } else {
            None
        }
    }

    /// Runs one AI tick: cooldowns, state selection, and the selected
    /// behavior handler. Dead enemies only keep their passive state.
    pub fn update(
        &mut self,
        player_pos: Vec2,
        player_radius: f32,
        dt: f32,
        world: &WorldConfig,
        rng: &mut dyn RandomSource,
    ) -> EnemyTickOutput {
        let mut output = EnemyTickOutput::default();
        if self.is_dead() {
            return output;
        }

        self.health.tick(dt);
        self.shoot_gate.tick(dt);
        self.melee_gate.tick(dt);
        self.state_timer += dt;

        let dist = self.position.distance(player_pos);
        let los = self.has_line_of_sight(dist);
        let next = select_state(&self.tunables, dist, self.health.percent(), los);
        if next != self.state {
            output.transition = Some((self.state, next));
            self.state = next;
            self.state_timer = 0.0;
        }

        match self.state {
            EnemyState::Wandering => self.wander(dt, world, rng),
            EnemyState::Detecting => self.detect(dt, world),
            EnemyState::Following => self.follow(player_pos, dt, world),
            EnemyState::Attacking => {
                self.attack(player_pos, player_radius, dist, dt, world, &mut output);
            },
            EnemyState::Fleeing => self.flee(player_pos, dt, world),
        }

        if los {
            self.last_known_player_position = player_pos;
        }

        output
    }

    /// Advances, culls, prunes, and caps this enemy's arrows.
    ///
    /// Runs even for dead enemies so arrows already in flight finish
    /// their trajectory.
    pub fn update_arrows(&mut self, dt: f32, world: &WorldConfig) {
        self.arrows.advance_all(dt, world.frame_rate_norm, &world.bounds);
        self.arrows.prune_inactive();
        self.arrows.enforce_cap(self.tunables.arrow_cap);
    }

    /// Roam near home: re-pick the target on interval expiry or arrival,
    /// then drift toward it at reduced speed.
    fn wander(&mut self, dt: f32, world: &WorldConfig, rng: &mut dyn RandomSource) {
        self.wander_timer += dt;
        let arrived = self.position.distance(self.wander_target) < self.tunables.radius;
        if self.wander_timer >= self.tunables.wander_interval || arrived {
            self.wander_target = self.pick_wander_target(rng);
            self.wander_timer = 0.0;
        }
        let speed = self.tunables.speed * self.tunables.wander_speed_fraction;
        self.move_toward(self.wander_target, speed, dt, world);
    }

    /// Samples a roam point uniformly in angle and in
    /// `[0.3, 1.0] x wander_radius` of home.
    fn pick_wander_target(&self, rng: &mut dyn RandomSource) -> Vec2 {
        let angle = rng.uniform(0.0, std::f32::consts::TAU);
        let dist = rng.uniform(
            0.3 * self.tunables.wander_radius,
            self.tunables.wander_radius,
        );
        self.home_position + Vec2::new(angle.cos() * dist, angle.sin() * dist)
    }

    /// Lost the trail: head to the last sighting at reduced speed.
    fn detect(&mut self, dt: f32, world: &WorldConfig) {
        let speed = self.tunables.speed
            * self.tunables.follow_speed_fraction
            * self.tunables.detect_speed_fraction;
        self.move_toward(self.last_known_player_position, speed, dt, world);
    }

    /// Chase the player's predicted position.
    fn follow(&mut self, player_pos: Vec2, dt: f32, world: &WorldConfig) {
        let predicted = self.predict_player_position(player_pos, dt);
        let speed = self.tunables.speed * self.tunables.follow_speed_fraction;
        self.move_toward(predicted, speed, dt, world);
    }

    /// Extrapolates the player's motion one prediction horizon ahead
    /// from the last-frame velocity estimate.
    fn predict_player_position(&self, player_pos: Vec2, dt: f32) -> Vec2 {
        if dt <= EPSILON {
            return player_pos;
        }
        let velocity = (player_pos - self.last_known_player_position) * (1.0 / dt);
        player_pos + velocity * self.tunables.prediction_horizon
    }

    /// In range: swing, shoot with an optimal-distance nudge, or close
    /// the gap.
    fn attack(
        &mut self,
        player_pos: Vec2,
        player_radius: f32,
        dist: f32,
        dt: f32,
        world: &WorldConfig,
        output: &mut EnemyTickOutput,
    ) {
        let t = self.tunables;
        if dist <= t.melee_range && self.melee_gate.is_ready() {
            // Swing in place. The hit query stays pure; the gate is
            // consumed here whether or not the swing connects.
            output.melee_hit = self.check_melee_hit(player_pos, player_radius);
            self.melee_gate.consume();
        } else if dist <= t.shooting_range && self.shoot_gate.is_ready() {
            let aim = self.predict_player_position(player_pos, dt);
            if self.arrows.spawn(self.position, aim, t.arrow_speed, t.arrow_radius) {
                output.fired = true;
            }
            self.arrows.enforce_cap(t.arrow_cap);
            self.shoot_gate.consume();

            // Hold the preferred band: back off when crowded, close in
            // when drifting out of it.
            let optimal = t.shooting_range * t.optimal_distance_fraction;
            if dist < optimal {
                let away = self.position + (self.position - player_pos);
                self.move_toward(away, t.speed, dt, world);
            } else if dist > t.shooting_range * t.close_in_fraction {
                self.move_toward(player_pos, t.speed, dt, world);
            }
        } else {
            // Both gates closed, or ranges misconfigured so neither
            // sub-branch applies: close distance.
            self.move_toward(player_pos, t.speed, dt, world);
        }
    }

    /// Panic retreat: mostly away from the player, biased toward home.
    fn flee(&mut self, player_pos: Vec2, dt: f32, world: &WorldConfig) {
        let away_dir = (self.position - player_pos).normalized();
        let away_point = self.position + away_dir * self.tunables.wander_radius;
        let target = away_point.lerp(self.home_position, self.tunables.flee_home_bias);
        let speed = self.tunables.speed * self.tunables.flee_speed_multiplier;
        self.move_toward(target, speed, dt, world);
    }

    /// Movement primitive: normalized step toward a destination, scaled
    /// by speed, dt, and the frame-rate normalization constant.
    fn move_toward(&mut self, destination: Vec2, speed: f32, dt: f32, world: &WorldConfig) {
        let direction = (destination - self.position).normalized();
        if direction == Vec2::ZERO {
            return;
        }
        self.position += direction * (speed * dt * world.frame_rate_norm);
    }
}
