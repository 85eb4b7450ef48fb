//! Combat entity state: health, invulnerability, and cooldown gates.

use serde::{Deserialize, Serialize};

/// Health pool with an invulnerability window and a one-way death flag.
///
/// Damage while dead or invulnerable is ignored. Health is floored at
/// zero, and the death transition happens exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    max: i32,
    current: i32,
    invulnerability_duration: f32,
    invulnerability_timer: f32,
    dead: bool,
}

impl Health {
    /// Creates a full health pool with no invulnerability window.
    #[must_use]
    pub fn new(max: i32) -> Self {
        Self::with_invulnerability(max, 0.0)
    }

    /// Creates a full health pool that grants `duration` seconds of
    /// invulnerability after each non-fatal hit.
    #[must_use]
    pub fn with_invulnerability(max: i32, duration: f32) -> Self {
        Self {
            max: max.max(0),
            current: max.max(0),
            invulnerability_duration: duration.max(0.0),
            invulnerability_timer: 0.0,
            dead: max <= 0,
        }
    }

    /// Current health.
    #[must_use]
    pub const fn current(&self) -> i32 {
        self.current
    }

    /// Maximum health.
    #[must_use]
    pub const fn max(&self) -> i32 {
        self.max
    }

    /// Health as a fraction in `[0, 1]`.
    #[must_use]
    pub fn percent(&self) -> f32 {
        if self.max <= 0 {
            0.0
        } else {
            (self.current as f32 / self.max as f32).clamp(0.0, 1.0)
        }
    }

    /// Whether the death transition has happened.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.dead
    }

    /// Whether an invulnerability window is active.
    #[must_use]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerability_timer > 0.0
    }

    /// Applies damage. Returns `true` if the damage landed.
    ///
    /// A landed non-fatal hit starts the invulnerability window; a fatal
    /// hit floors health at zero and sets the death flag.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if self.dead || self.is_invulnerable() || amount <= 0 {
            return false;
        }
        self.current = (self.current - amount).max(0);
        if self.current == 0 {
            self.dead = true;
        } else {
            self.invulnerability_timer = self.invulnerability_duration;
        }
        true
    }

    /// Restores health, clamped at the maximum. Ignored when dead.
    pub fn heal(&mut self, amount: i32) {
        if self.dead || amount <= 0 {
            return;
        }
        self.current = (self.current + amount).min(self.max);
    }

    /// Counts the invulnerability window down.
    pub fn tick(&mut self, dt: f32) {
        if self.invulnerability_timer > 0.0 {
            self.invulnerability_timer = (self.invulnerability_timer - dt).max(0.0);
        }
    }
}

/// Binary action gate with a reopening timer.
///
/// Closed on use; while closed, `tick` accumulates elapsed time and the
/// gate reopens once the cooldown has passed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CooldownGate {
    ready: bool,
    timer: f32,
    cooldown: f32,
}

impl CooldownGate {
    /// Creates an open gate with the given cooldown.
    #[must_use]
    pub fn new(cooldown: f32) -> Self {
        Self {
            ready: true,
            timer: 0.0,
            cooldown: cooldown.max(0.0),
        }
    }

    /// Whether the gate is open.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    /// Seconds accumulated since the gate closed.
    #[must_use]
    pub const fn elapsed(&self) -> f32 {
        self.timer
    }

    /// Closes the gate. No effect if already closed.
    pub fn consume(&mut self) {
        self.ready = false;
        self.timer = 0.0;
    }

    /// Advances the timer; reopens the gate once the cooldown elapses.
    pub fn tick(&mut self, dt: f32) {
        if self.ready {
            return;
        }
        self.timer += dt;
        if self.timer >= self.cooldown {
            self.ready = true;
            self.timer = 0.0;
        }
    }
}
