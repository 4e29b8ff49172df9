//! Game state and core simulation types
//!
//! The session (`GameState`) owns every entity collection. Cross-entity links
//! (projectile targets, selection) are ids resolved each tick, never borrows.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::input::PointerTracker;
use super::selection::Selection;
use super::wave::{EnemySpec, Stage, WaveScheduler};
use crate::Tuning;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Paused until the first click
    Waiting,
    /// Active gameplay
    Playing,
    /// Base destroyed or too many enemies got through
    GameOver,
    /// All waves survived
    GameClear,
}

/// Stable identity; ids are never reused within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Which side fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

/// What a projectile homes in on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    Base,
    Player(EntityId),
    Enemy(EntityId),
}

/// Frame-counted weapon cooldown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FireCooldown {
    /// Ticks since the last shot
    pub since_last: u32,
    /// Ticks required between shots
    pub interval: u32,
}

impl FireCooldown {
    pub fn new(interval: u32) -> Self {
        Self {
            since_last: 0,
            interval,
        }
    }

    #[inline]
    pub fn ready(&self) -> bool {
        self.since_last >= self.interval
    }

    #[inline]
    pub fn reset(&mut self) {
        self.since_last = 0;
    }

    #[inline]
    pub fn advance(&mut self) {
        self.since_last = self.since_last.saturating_add(1);
    }
}

/// The structure being defended
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Base {
    pub pos: Vec2,
    pub hp: i32,
    pub max_hp: i32,
    pub radius: f32,
}

impl Base {
    pub fn new(pos: Vec2, hp: i32) -> Self {
        Self {
            pos,
            hp,
            max_hp: hp,
            radius: BASE_RADIUS,
        }
    }

    /// Apply damage, clamping at zero; negative amounts are ignored
    pub fn take_damage(&mut self, amount: i32) {
        self.hp = self.hp.saturating_sub(amount.max(0)).max(0);
    }

    /// Restore hit points up to the starting value; negative amounts are ignored
    pub fn repair(&mut self, amount: i32) {
        self.hp = self.hp.saturating_add(amount.max(0)).min(self.max_hp);
    }

    pub fn is_destroyed(&self) -> bool {
        self.hp <= 0
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(self.radius * 2.0))
    }
}

/// A player-controlled unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub pos: Vec2,
    /// Where the unit is walking to
    pub target: Vec2,
    /// Pixels per tick
    pub speed: f32,
    /// Damage dealt per projectile
    pub attack: i32,
    pub fire: FireCooldown,
}

impl Player {
    pub fn new(id: EntityId, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            id,
            pos,
            target: pos,
            speed: tuning.player_speed,
            attack: tuning.player_attack,
            fire: FireCooldown::new(tuning.player_fire_interval),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(PLAYER_RADIUS * 2.0))
    }
}

/// A wave enemy walking toward the base
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub pos: Vec2,
    /// Current speed (halved while slowed)
    pub speed: f32,
    /// Speed to restore once a slow wears off
    pub normal_speed: f32,
    pub hp: i32,
    /// Money credited when destroyed
    pub reward: u32,
    pub active: bool,
    /// Made it to the base corner; only ever goes false -> true
    pub reached: bool,
    /// Ticks of slow effect left
    pub slow_ticks: u32,
    pub fire: FireCooldown,
    /// Walls that already slowed this enemy (each one works once)
    pub triggered_walls: Vec<EntityId>,
}

impl Enemy {
    pub fn spawn(id: EntityId, pos: Vec2, spec: &EnemySpec) -> Self {
        Self {
            id,
            pos,
            speed: spec.speed,
            normal_speed: spec.speed,
            hp: spec.hp,
            reward: spec.reward,
            active: true,
            reached: false,
            slow_ticks: 0,
            fire: FireCooldown::new(spec.fire_interval),
            triggered_walls: Vec::new(),
        }
    }

    pub fn is_slowed(&self) -> bool {
        self.slow_ticks > 0
    }

    /// Box used for wall contact and selection
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(ENEMY_SIZE))
    }
}

/// A homing shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Pixels per tick
    pub speed: f32,
    /// Last heading; kept when the target disappears
    pub dir: Vec2,
    pub side: Side,
    pub target: Target,
    pub damage: i32,
    pub active: bool,
}

impl Projectile {
    pub fn new(
        side: Side,
        pos: Vec2,
        target: Target,
        target_pos: Vec2,
        speed: f32,
        damage: i32,
    ) -> Self {
        Self {
            pos,
            speed,
            dir: (target_pos - pos).normalize_or_zero(),
            side,
            target,
            damage,
            active: true,
        }
    }
}

/// A player-drawn wall segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: EntityId,
    pub start: Vec2,
    pub end: Vec2,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Balance values this session was built from
    pub tuning: Tuning,
    /// Spawn plan
    pub stage: Stage,
    /// Current phase
    pub phase: GamePhase,
    /// Simulation tick counter (Playing ticks only)
    pub time_ticks: u64,
    pub base: Base,
    pub players: Vec<Player>,
    /// Insertion ordered
    pub enemies: Vec<Enemy>,
    pub player_projectiles: Vec<Projectile>,
    pub enemy_projectiles: Vec<Projectile>,
    /// Insertion ordered; ids unique
    pub obstacles: Vec<Obstacle>,
    pub scheduler: WaveScheduler,
    /// Enemies that made it to the base corner
    pub reached_count: u32,
    /// Currency from kills
    pub money: u32,
    /// Entity shown in the info panel
    pub selected: Option<Selection>,
    /// Primary pointer edge tracking (survives resets)
    pub pointer: PointerTracker,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh session in the Waiting phase
    pub fn new(tuning: Tuning, stage: Stage) -> Self {
        let mut state = Self {
            base: Base::new(tuning.base_position, tuning.base_hp),
            tuning,
            stage,
            phase: GamePhase::Waiting,
            time_ticks: 0,
            players: Vec::new(),
            enemies: Vec::new(),
            player_projectiles: Vec::new(),
            enemy_projectiles: Vec::new(),
            obstacles: Vec::new(),
            scheduler: WaveScheduler::new(),
            reached_count: 0,
            money: 0,
            selected: None,
            pointer: PointerTracker::default(),
            next_id: 1,
        };

        for spawn in state.tuning.player_spawns.clone() {
            let id = state.next_entity_id();
            let player = Player::new(id, spawn, &state.tuning);
            state.players.push(player);
        }

        state
    }

    /// Rebuild the whole session and start playing right away
    pub fn reset(&mut self) {
        let pointer = self.pointer.clone();
        let fresh = Self::new(self.tuning.clone(), self.stage.clone());
        *self = fresh;
        self.pointer = pointer;
        self.phase = GamePhase::Playing;
        log::info!("Session reset");
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a wave enemy at the entry point
    pub fn spawn_enemy(&mut self, spec: &EnemySpec) -> EntityId {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::spawn(id, ENTRY_POINT, spec));
        id
    }

    /// Add a wall; ids come from the session so they cannot collide
    pub fn add_obstacle(&mut self, start: Vec2, end: Vec2) -> EntityId {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle { id, start, end });
        id
    }

    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id && e.active)
    }

    pub fn player(&self, id: EntityId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }
}
