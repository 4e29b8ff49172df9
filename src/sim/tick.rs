//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically. One call per
//! frame runs the whole pipeline: spawn -> AI/movement -> fire -> collision ->
//! prune -> phase check.

use glam::Vec2;

use super::ai::{self, TargetLookup};
use super::collision;
use super::input::{DragGesture, pointer_position};
use super::selection::{Selection, hit_test};
use super::state::{GamePhase, GameState};

/// Input sampled for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Primary button (left click / touch) is held
    pub pointer_down: bool,
    /// Pointer position, if any pointer is present
    pub pointer: Option<Vec2>,
    /// Secondary action (right click): move the selected player here
    pub secondary: bool,
}

impl TickInput {
    /// Build from raw device state; a touch counts as the primary button
    pub fn from_devices(mouse: Vec2, left_down: bool, right_down: bool, touches: &[Vec2]) -> Self {
        let pointer = pointer_position(mouse, left_down, touches).or(Some(mouse));
        Self {
            pointer_down: left_down || !touches.is_empty(),
            pointer,
            secondary: right_down,
        }
    }
}

/// Advance the session by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    let edges = state.pointer.update(input.pointer_down, input.pointer);

    match state.phase {
        GamePhase::Waiting => {
            if edges.pressed.is_some() {
                state.pointer.cancel_drag();
                state.phase = GamePhase::Playing;
                log::info!("Game started");
            }
            return;
        }
        GamePhase::GameOver | GamePhase::GameClear => {
            if edges.pressed.is_some() {
                state.reset();
                state.pointer.cancel_drag();
            }
            return;
        }
        GamePhase::Playing => {}
    }

    if let Some(point) = edges.pressed {
        handle_press(state, point);
    }
    if let Some(gesture) = edges.released {
        place_wall(state, gesture);
    }

    state.time_ticks += 1;

    // Wave spawns
    for spec in state.scheduler.step(&state.stage) {
        state.spawn_enemy(&spec);
    }

    // Enemy AI
    for enemy in state.enemies.iter_mut() {
        let update = ai::update_enemy(enemy, &state.obstacles, &state.base, &state.tuning);
        if let Some(shot) = update.shot {
            state.enemy_projectiles.push(shot);
        }
        if update.reached {
            enemy.active = false;
            state.reached_count += 1;
            log::info!(
                "Enemy reached the base ({}/{})",
                state.reached_count,
                state.tuning.reached_limit
            );
        }
    }

    // Player movement (right click steers the selected unit only)
    let selected_player = match state.selected {
        Some(Selection::Player(id)) => Some(id),
        _ => None,
    };
    for player in state.players.iter_mut() {
        let retarget = if input.secondary && selected_player == Some(player.id) {
            input.pointer
        } else {
            None
        };
        ai::update_player(player, retarget);
    }

    let shots = ai::player_auto_fire(&mut state.players, &state.enemies, &state.tuning);
    state.player_projectiles.extend(shots);

    // Homing
    let lookup = TargetLookup {
        base: &state.base,
        players: &state.players,
        enemies: &state.enemies,
    };
    ai::steer_projectiles(&mut state.player_projectiles, &lookup);
    ai::steer_projectiles(&mut state.enemy_projectiles, &lookup);

    // Collisions
    let report = collision::resolve_player_hits(&mut state.player_projectiles, &mut state.enemies);
    state.money = state.money.saturating_add(report.reward);
    collision::resolve_base_hits(&mut state.enemy_projectiles, &mut state.base);

    collision::prune(state);

    evaluate_phase(state);
}

/// Pointer press while playing: buttons act, entities become selected
fn handle_press(state: &mut GameState, point: Vec2) {
    match hit_test(state, point) {
        Some(Selection::Button(button)) => {
            state.pointer.cancel_drag();
            button.press(state);
        }
        Some(selection) => state.selected = Some(selection),
        None => {}
    }
}

/// Completed drag: long enough gestures become walls
fn place_wall(state: &mut GameState, gesture: DragGesture) {
    if !gesture.is_wall() {
        return;
    }
    let id = state.add_obstacle(gesture.start, gesture.end);
    log::debug!("Wall {:?} placed: {} -> {}", id, gesture.start, gesture.end);
}

/// Loss is checked before win
fn evaluate_phase(state: &mut GameState) {
    if state.reached_count >= state.tuning.reached_limit || state.base.is_destroyed() {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over at tick {} (reached {}, base HP {})",
            state.time_ticks,
            state.reached_count,
            state.base.hp
        );
    } else if state.scheduler.is_exhausted(&state.stage) && state.enemies.is_empty() {
        state.phase = GamePhase::GameClear;
        log::info!("Stage clear at tick {} (${})", state.time_ticks, state.money);
    }
}
