//! Pure game state and combat rules.
//!
//! Nothing in this module touches the DOM, canvas or audio, so the whole
//! thing runs under native `cargo test`. The wasm layer in `game::mod` owns
//! one [`GameSession`] in a thread-local cell and feeds it click timestamps;
//! everything it needs to present a hit comes back in a [`HitOutcome`].

use crate::game::particles::{self, Particle};
use crate::game::weapons;

/// Boss health at the start of a session.
pub const MAX_HEALTH: u32 = 100;
/// Starting wallet.
pub const START_MONEY: u64 = 1000;
/// Idle gap after which the combo chain is dropped.
pub const COMBO_WINDOW_MS: f64 = 1500.0;
/// Combo count at which the damage multiplier stops growing (2x cap).
pub const COMBO_CAP: u32 = 10;
/// Health percentage at or below which finish-him mode latches (while alive).
pub const FINISH_HIM_PCT: f64 = 7.0;

/// A catalog weapon. `cost` is the only mutable field: a successful purchase
/// zeroes it for the rest of the session.
#[derive(Clone, Debug, PartialEq)]
pub struct Weapon {
    pub id: &'static str,
    pub name: &'static str,
    pub damage: u32,
    pub cost: u64,
    pub icon: &'static str,
    pub color: &'static str,
    pub particle_count: usize,
    pub description: &'static str,
    pub rarity: &'static str,
    pub fire_rate: &'static str,
}

/// What a single resolved hit did, for the presentation layer to react to.
#[derive(Clone, Copy, Debug, Default)]
pub struct HitOutcome {
    pub damage: u32,
    /// Combo count including this hit.
    pub combo: u32,
    /// True exactly once per session: the hit that latched finish-him mode.
    pub finish_him_activated: bool,
    pub died: bool,
}

/// Runtime session state: health/money/combo bookkeeping, the owned weapon
/// list (catalog copy with mutable costs) and the live particle field.
pub struct GameSession {
    pub health: u32,
    pub max_health: u32,
    pub total_damage: u64,
    pub money: u64,
    pub combo_count: u32,
    pub last_hit_ms: f64,
    pub is_game_over: bool,
    pub is_finish_him_mode: bool,
    /// Index into `weapons` of the active weapon.
    pub selected: usize,
    pub weapons: Vec<Weapon>,
    pub particles: Vec<Particle>,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
            total_damage: 0,
            money: START_MONEY,
            combo_count: 0,
            last_hit_ms: 0.0,
            is_game_over: false,
            is_finish_him_mode: false,
            selected: 0,
            weapons: weapons::CATALOG.to_vec(),
            particles: Vec::new(),
        }
    }

    pub fn selected_weapon(&self) -> &Weapon {
        &self.weapons[self.selected]
    }

    pub fn health_percent(&self) -> f64 {
        self.health as f64 / self.max_health as f64 * 100.0
    }

    /// Resolve one click on the boss at `now_ms`.
    ///
    /// Returns `None` once game-over has latched (clicks are ignored until
    /// restart); otherwise updates combo, health, damage and money, latches
    /// finish-him / game-over where due, and reports what happened.
    pub fn resolve_hit(&mut self, now_ms: f64) -> Option<HitOutcome> {
        if self.is_game_over {
            return None;
        }

        // Combo chain: drop it after a 1.5s idle gap, then count this hit.
        if now_ms - self.last_hit_ms > COMBO_WINDOW_MS {
            self.combo_count = 0;
        }
        self.combo_count += 1;
        self.last_hit_ms = now_ms;

        let multiplier = 1.0 + f64::from(self.combo_count.min(COMBO_CAP)) * 0.1;
        let damage = (f64::from(self.selected_weapon().damage) * multiplier).floor() as u32;

        self.health = self.health.saturating_sub(damage);
        self.total_damage += u64::from(damage);
        self.money += u64::from(damage);

        let pct = self.health_percent();
        let mut finish_him_activated = false;
        if pct > 0.0 && pct <= FINISH_HIM_PCT && !self.is_finish_him_mode {
            self.is_finish_him_mode = true;
            finish_him_activated = true;
        }

        let died = self.health == 0;
        if died {
            self.is_game_over = true;
        }

        Some(HitOutcome {
            damage,
            combo: self.combo_count,
            finish_him_activated,
            died,
        })
    }

    /// Drop the combo chain (the 1.5s idle timer fired).
    pub fn reset_combo(&mut self) {
        self.combo_count = 0;
    }

    /// Buy and select a weapon. Free weapons always succeed; priced weapons
    /// succeed only when affordable and become free from then on. A failed
    /// purchase changes nothing, selection included.
    pub fn purchase(&mut self, index: usize) -> bool {
        let Some(weapon) = self.weapons.get_mut(index) else {
            return false;
        };
        if weapon.cost > 0 {
            if self.money < weapon.cost {
                return false;
            }
            self.money -= weapon.cost;
            weapon.cost = 0; // once bought, it's free
        }
        self.selected = index;
        true
    }

    pub fn can_afford(&self, index: usize) -> bool {
        self.weapons
            .get(index)
            .is_some_and(|w| w.cost == 0 || self.money >= w.cost)
    }

    /// Back to a fresh fight: full health, starting money, catalog prices.
    pub fn restart(&mut self) {
        *self = Self::new();
    }

    /// Advance the particle burst simulation one frame.
    pub fn step_particles(&mut self) {
        particles::step(&mut self.particles);
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
