//! Read-only per-frame view for the renderer

use super::input::DragGesture;
use super::selection::{Button, UnitInfo};
use super::state::{Base, Enemy, GamePhase, GameState, Obstacle, Player, Projectile};

/// Everything a renderer needs after a tick; shared borrows only
#[derive(Debug)]
pub struct FrameView<'a> {
    pub phase: GamePhase,
    pub base: &'a Base,
    pub players: &'a [Player],
    pub enemies: &'a [Enemy],
    pub player_projectiles: &'a [Projectile],
    pub enemy_projectiles: &'a [Projectile],
    pub obstacles: &'a [Obstacle],
    pub money: u32,
    /// 1-based wave number for display, clamped to the stage length
    pub wave: usize,
    pub wave_count: usize,
    /// Info panel content for the current selection
    pub selection: Option<UnitInfo>,
    /// Buttons to draw in the info strip
    pub buttons: &'static [Button],
    /// Wall being dragged out, if any
    pub drag_preview: Option<DragGesture>,
}

impl GameState {
    pub fn view(&self) -> FrameView<'_> {
        let wave_count = self.stage.waves.len();
        FrameView {
            phase: self.phase,
            base: &self.base,
            players: &self.players,
            enemies: &self.enemies,
            player_projectiles: &self.player_projectiles,
            enemy_projectiles: &self.enemy_projectiles,
            obstacles: &self.obstacles,
            money: self.money,
            wave: (self.scheduler.wave_index + 1).min(wave_count),
            wave_count,
            selection: self.selected.and_then(|s| s.info(self)),
            buttons: self.selected.map(|s| s.buttons()).unwrap_or(&[]),
            drag_preview: self.pointer.drag_preview(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Tuning;
    use crate::sim::selection::Selection;
    use crate::sim::state::{GamePhase, GameState};
    use crate::sim::wave::Stage;
    use glam::Vec2;

    #[test]
    fn test_view_reflects_state() {
        let mut state = GameState::new(Tuning::default(), Stage::sample());
        let view = state.view();
        assert_eq!(view.phase, GamePhase::Waiting);
        assert_eq!(view.players.len(), 1);
        assert_eq!(view.wave, 1);
        assert_eq!(view.wave_count, 3);
        assert!(view.selection.is_none());
        assert!(view.buttons.is_empty());
        assert!(view.drag_preview.is_none());

        state.selected = Some(Selection::Base);
        state.scheduler.wave_index = 3;
        let view = state.view();
        assert_eq!(view.selection.unwrap().label, "Base");
        assert_eq!(view.buttons.len(), 1);
        assert_eq!(view.wave, 3);
    }

    #[test]
    fn test_view_shows_wall_being_dragged() {
        let mut state = GameState::new(Tuning::default(), Stage::sample());
        state.phase = GamePhase::Playing;
        state.pointer.update(true, Some(Vec2::new(50.0, 50.0)));
        state.pointer.update(true, Some(Vec2::new(90.0, 50.0)));

        let preview = state.view().drag_preview.unwrap();
        assert_eq!(preview.start, Vec2::new(50.0, 50.0));
        assert_eq!(preview.end, Vec2::new(90.0, 50.0));
        assert!(preview.is_wall());
    }
}
