//! Info-panel selection
//!
//! Everything the pointer can pick is one variant of [`Selection`]. A selection
//! only names its entity; if the entity is gone the selection resolves to
//! nothing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::state::{EntityId, GameState};
use crate::consts::*;

/// Buttons drawn in the info strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Button {
    /// Spend money to repair the base
    RecoverBase,
}

impl Button {
    pub fn bounds(&self) -> Rect {
        match self {
            Button::RecoverBase => Rect::from_corner(
                Vec2::new(INFO_AREA_X + SIDE_MARGIN + 100.0, INFO_AREA_Y + 5.0),
                Vec2::new(100.0, INFO_AREA_HEIGHT - 10.0),
            ),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Button::RecoverBase => "Recover HP",
        }
    }

    /// Second caption line (price / effect)
    pub fn detail(&self, state: &GameState) -> String {
        match self {
            Button::RecoverBase => format!(
                "+{}HP / ${}",
                state.tuning.recover_amount, state.tuning.recover_cost
            ),
        }
    }

    /// Perform the button's action; false if it could not be afforded
    pub fn press(&self, state: &mut GameState) -> bool {
        match self {
            Button::RecoverBase => {
                let cost = state.tuning.recover_cost;
                if state.money < cost {
                    log::debug!("Recover declined: ${} < ${}", state.money, cost);
                    return false;
                }
                state.money -= cost;
                state.base.repair(state.tuning.recover_amount);
                log::debug!("Base repaired to {} HP", state.base.hp);
                true
            }
        }
    }
}

/// Something the pointer can pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    Player(EntityId),
    Enemy(EntityId),
    Base,
    Button(Button),
}

/// Label and stat lines for the info panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitInfo {
    pub label: &'static str,
    pub stats: Vec<String>,
}

impl Selection {
    /// Current on-screen box, if the thing still exists
    pub fn bounds(&self, state: &GameState) -> Option<Rect> {
        match self {
            Selection::Player(id) => state.player(*id).map(|p| p.bounds()),
            Selection::Enemy(id) => state.enemy(*id).map(|e| e.bounds()),
            Selection::Base => Some(state.base.bounds()),
            Selection::Button(button) => Some(button.bounds()),
        }
    }

    pub fn info(&self, state: &GameState) -> Option<UnitInfo> {
        match self {
            Selection::Player(id) => state.player(*id).map(|p| UnitInfo {
                label: "Player",
                stats: vec![format!("ATK: {}", p.attack)],
            }),
            Selection::Enemy(id) => state.enemy(*id).map(|e| UnitInfo {
                label: "Enemy",
                stats: vec![format!("HP: {}", e.hp)],
            }),
            Selection::Base => Some(UnitInfo {
                label: "Base",
                stats: vec![format!("HP: {}", state.base.hp)],
            }),
            Selection::Button(button) => Some(UnitInfo {
                label: button.title(),
                stats: vec![button.detail(state)],
            }),
        }
    }

    /// Buttons shown in the info strip while this is selected
    pub fn buttons(&self) -> &'static [Button] {
        match self {
            Selection::Base => &[Button::RecoverBase],
            _ => &[],
        }
    }

    /// Still refers to something alive
    pub fn is_live(&self, state: &GameState) -> bool {
        self.bounds(state).is_some()
    }
}

/// What is under `point`: visible buttons first, then players, enemies and the base
pub fn hit_test(state: &GameState, point: Vec2) -> Option<Selection> {
    if let Some(selected) = state.selected {
        if let Some(button) = selected.buttons().iter().find(|b| b.bounds().contains(point)) {
            return Some(Selection::Button(*button));
        }
    }

    if let Some(player) = state.players.iter().find(|p| p.bounds().contains(point)) {
        return Some(Selection::Player(player.id));
    }
    if let Some(enemy) = state
        .enemies
        .iter()
        .find(|e| e.active && e.bounds().contains(point))
    {
        return Some(Selection::Enemy(enemy.id));
    }
    if state.base.bounds().contains(point) {
        return Some(Selection::Base);
    }
    None
}
