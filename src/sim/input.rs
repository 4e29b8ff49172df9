//! Pointer polling -> discrete events
//!
//! The host polls the pointer every frame. Holding the button down yields the
//! same sample tick after tick, so presses and drags are derived from edges
//! here and fire exactly once.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MIN_WALL_EXTENT;

/// Pick the active pointer: the mouse while its button is held, else the first touch
pub fn pointer_position(mouse: Vec2, mouse_down: bool, touches: &[Vec2]) -> Option<Vec2> {
    if mouse_down {
        return Some(mouse);
    }
    touches.first().copied()
}

/// A completed press-drag-release
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragGesture {
    pub start: Vec2,
    pub end: Vec2,
}

impl DragGesture {
    /// Long enough on at least one axis to become a wall
    pub fn is_wall(&self) -> bool {
        let delta = (self.end - self.start).abs();
        !(delta.x < MIN_WALL_EXTENT && delta.y < MIN_WALL_EXTENT)
    }
}

/// Edges detected on one poll
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerEdges {
    /// Button went down this tick, at this position
    pub pressed: Option<Vec2>,
    /// Button came up this tick, closing a drag
    pub released: Option<DragGesture>,
}

/// Remembers the previous poll so edges can be told apart from holds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerTracker {
    was_down: bool,
    drag_start: Option<Vec2>,
    last_pos: Option<Vec2>,
}

impl PointerTracker {
    /// Feed one poll of the primary pointer
    pub fn update(&mut self, down: bool, pos: Option<Vec2>) -> PointerEdges {
        let mut edges = PointerEdges::default();
        if pos.is_some() {
            self.last_pos = pos;
        }

        match (self.was_down, down) {
            (false, true) => {
                edges.pressed = self.last_pos;
                self.drag_start = self.last_pos;
            }
            (true, false) => {
                // Touch release reports no position; fall back to the last one seen
                if let (Some(start), Some(end)) = (self.drag_start.take(), self.last_pos) {
                    edges.released = Some(DragGesture { start, end });
                }
            }
            _ => {}
        }

        self.was_down = down;
        edges
    }

    /// Drop the drag in progress (its press was used for something else)
    pub fn cancel_drag(&mut self) {
        self.drag_start = None;
    }

    /// Drag in progress, ending at the latest pointer position
    pub fn drag_preview(&self) -> Option<DragGesture> {
        Some(DragGesture {
            start: self.drag_start?,
            end: self.last_pos?,
        })
    }

    pub fn dragging_from(&self) -> Option<Vec2> {
        self.drag_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_registers_once() {
        let mut tracker = PointerTracker::default();
        let pos = Some(Vec2::new(10.0, 20.0));
        assert_eq!(tracker.update(true, pos).pressed, pos);
        for _ in 0..10 {
            let edges = tracker.update(true, pos);
            assert!(edges.pressed.is_none());
            assert!(edges.released.is_none());
        }
        assert_eq!(tracker.dragging_from(), pos);
    }

    #[test]
    fn test_drag_preview_follows_pointer() {
        let mut tracker = PointerTracker::default();
        assert!(tracker.drag_preview().is_none());
        tracker.update(true, Some(Vec2::new(10.0, 10.0)));
        tracker.update(true, Some(Vec2::new(60.0, 30.0)));
        assert_eq!(
            tracker.drag_preview(),
            Some(DragGesture {
                start: Vec2::new(10.0, 10.0),
                end: Vec2::new(60.0, 30.0),
            })
        );
        tracker.update(false, None);
        assert!(tracker.drag_preview().is_none());
    }

    #[test]
    fn test_release_closes_drag() {
        let mut tracker = PointerTracker::default();
        tracker.update(true, Some(Vec2::new(100.0, 100.0)));
        tracker.update(true, Some(Vec2::new(110.0, 100.0)));
        let edges = tracker.update(false, Some(Vec2::new(120.0, 100.0)));
        assert_eq!(
            edges.released,
            Some(DragGesture {
                start: Vec2::new(100.0, 100.0),
                end: Vec2::new(120.0, 100.0),
            })
        );
        assert!(tracker.update(false, None).released.is_none());
    }

    #[test]
    fn test_touch_release_uses_last_position() {
        let mut tracker = PointerTracker::default();
        tracker.update(true, Some(Vec2::new(0.0, 0.0)));
        tracker.update(true, Some(Vec2::new(0.0, 40.0)));
        let gesture = tracker.update(false, None).released.unwrap();
        assert_eq!(gesture.end, Vec2::new(0.0, 40.0));
    }

    #[test]
    fn test_cancelled_drag_yields_nothing() {
        let mut tracker = PointerTracker::default();
        tracker.update(true, Some(Vec2::new(0.0, 0.0)));
        tracker.cancel_drag();
        assert!(tracker.update(false, Some(Vec2::new(50.0, 50.0))).released.is_none());
    }

    #[test]
    fn test_short_drag_is_not_a_wall() {
        let gesture = DragGesture {
            start: Vec2::new(100.0, 100.0),
            end: Vec2::new(105.0, 102.0),
        };
        assert!(!gesture.is_wall());
    }

    #[test]
    fn test_long_drag_on_one_axis_is_a_wall() {
        let gesture = DragGesture {
            start: Vec2::new(100.0, 100.0),
            end: Vec2::new(120.0, 100.0),
        };
        assert!(gesture.is_wall());
    }

    #[test]
    fn test_pointer_prefers_mouse_then_touch() {
        let mouse = Vec2::new(1.0, 2.0);
        let touches = [Vec2::new(5.0, 6.0), Vec2::new(7.0, 8.0)];
        assert_eq!(pointer_position(mouse, true, &touches), Some(mouse));
        assert_eq!(pointer_position(mouse, false, &touches), Some(touches[0]));
        assert_eq!(pointer_position(mouse, false, &[]), None);
    }
}
