//! Data-driven game balance
//!
//! Everything a designer may want to tweak without touching the simulation.
//! Loaded from JSON; missing fields fall back to the defaults below.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Balance values for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Base ===
    /// Base center
    pub base_position: Vec2,
    /// Starting (and maximum) base hit points
    pub base_hp: i32,

    // === Players ===
    /// One player unit is spawned per entry
    pub player_spawns: Vec<Vec2>,
    /// Pixels per tick
    pub player_speed: f32,
    /// Damage per player projectile
    pub player_attack: i32,
    /// Ticks between player shots
    pub player_fire_interval: u32,

    // === Combat ===
    /// Pixels per tick
    pub projectile_speed: f32,
    /// Auto-fire range for players and enemies
    pub attack_range: f32,
    /// Damage an enemy projectile deals to the base
    pub enemy_projectile_damage: i32,

    // === Walls ===
    /// How long a wall slows an enemy
    pub slow_duration_ticks: u32,

    // === Loss condition ===
    /// Enemies reaching the base corner before the run is lost
    pub reached_limit: u32,
    /// An enemy past this point on both axes has reached the base
    pub reach_threshold: Vec2,

    // === Shop ===
    /// Price of one base repair
    pub recover_cost: u32,
    /// Hit points restored per repair
    pub recover_amount: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_position: Vec2::new(616.0, 456.0),
            base_hp: 20,

            player_spawns: vec![Vec2::new(320.0, 240.0)],
            player_speed: 4.0,
            player_attack: 1,
            player_fire_interval: 30,

            projectile_speed: 8.0,
            attack_range: 100.0,
            enemy_projectile_damage: 1,

            slow_duration_ticks: 60,

            reached_limit: 3,
            reach_threshold: Vec2::new(640.0, 480.0),

            recover_cost: 10,
            recover_amount: 10,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.player_spawns.is_empty() {
            return Err(TuningError::Invalid("at least one player spawn is required".into()));
        }
        if self.player_speed <= 0.0 || self.projectile_speed <= 0.0 {
            return Err(TuningError::Invalid("speeds must be positive".into()));
        }
        if self.attack_range <= 0.0 {
            return Err(TuningError::Invalid("attack range must be positive".into()));
        }
        if self.base_hp <= 0 {
            return Err(TuningError::Invalid("base HP must be positive".into()));
        }
        if self.player_attack <= 0 || self.enemy_projectile_damage <= 0 {
            return Err(TuningError::Invalid("damage values must be positive".into()));
        }
        if self.recover_amount <= 0 {
            return Err(TuningError::Invalid("recover amount must be positive".into()));
        }
        if self.slow_duration_ticks == 0 {
            return Err(TuningError::Invalid("slow duration must be at least 1 tick".into()));
        }
        if self.reached_limit == 0 {
            return Err(TuningError::Invalid("reached limit must be at least 1".into()));
        }
        Ok(())
    }
}
