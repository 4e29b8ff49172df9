//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only (all timers are frame counts)
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod geometry;
pub mod input;
pub mod selection;
pub mod state;
pub mod tick;
pub mod view;
pub mod wave;

pub use collision::HitReport;
pub use geometry::{Rect, circles_overlap, segment_intersects_rect, segments_intersect};
pub use input::{DragGesture, PointerTracker};
pub use selection::{Button, Selection, UnitInfo};
pub use state::{
    Base, Enemy, EntityId, FireCooldown, GamePhase, GameState, Obstacle, Player, Projectile, Side,
    Target,
};
pub use tick::{TickInput, tick};
pub use view::FrameView;
pub use wave::{EnemySpec, SpawnEntry, Stage, StageError, Wave, WaveScheduler};
