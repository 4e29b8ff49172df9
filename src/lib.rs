//! Base Defense - a real-time base defense arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, AI, collisions, waves, phases)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, raw input polling and window bootstrap live outside this crate;
//! they drive [`sim::tick`] once per frame and read [`sim::GameState::view`].

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Field and layout constants
pub mod consts {
    use glam::Vec2;

    /// Full screen, including the info strip at the bottom
    pub const SCREEN_WIDTH: f32 = 640.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Info strip (selection panel + buttons)
    pub const INFO_AREA_HEIGHT: f32 = 120.0;
    pub const MARGIN_BOTTOM: f32 = 10.0;
    pub const SIDE_MARGIN: f32 = 10.0;
    pub const INFO_AREA_X: f32 = SIDE_MARGIN;
    pub const INFO_AREA_Y: f32 = SCREEN_HEIGHT - INFO_AREA_HEIGHT - MARGIN_BOTTOM;

    /// Playfield (projectiles expire outside of it)
    pub const FIELD_WIDTH: f32 = 640.0;
    pub const FIELD_HEIGHT: f32 = 480.0;

    /// Where every wave enemy enters the field
    pub const ENTRY_POINT: Vec2 = Vec2::ZERO;

    /// Collision radii (per entity type)
    pub const BASE_RADIUS: f32 = 16.0;
    pub const ENEMY_RADIUS: f32 = 8.0;
    pub const PLAYER_RADIUS: f32 = 8.0;
    pub const PROJECTILE_RADIUS: f32 = 2.0;

    /// Enemy bounding box edge, used for wall contact and selection
    pub const ENEMY_SIZE: f32 = 16.0;

    /// A drag shorter than this on both axes is not a wall
    pub const MIN_WALL_EXTENT: f32 = 10.0;

    /// Fixed tick rate the frame counts in stages assume
    pub const TICKS_PER_SECOND: u32 = 60;
}

/// Move `from` toward `to` by at most `max_step`, snapping when close enough
#[inline]
pub fn step_toward(from: Vec2, to: Vec2, max_step: f32) -> Vec2 {
    let delta = to - from;
    let distance = delta.length();
    if distance > max_step {
        from + delta * (max_step / distance)
    } else {
        to
    }
}

/// True if `a` and `b` are strictly closer than `range` (no square root)
#[inline]
pub fn within_range(a: Vec2, b: Vec2, range: f32) -> bool {
    a.distance_squared(b) < range * range
}

/// True if `pos` lies inside the playfield (edges inclusive)
#[inline]
pub fn in_field(pos: Vec2) -> bool {
    pos.x >= 0.0 && pos.x <= consts::FIELD_WIDTH && pos.y >= 0.0 && pos.y <= consts::FIELD_HEIGHT
}
