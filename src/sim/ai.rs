//! Per-tick movement and targeting decisions
//!
//! Players walk to their target point and auto-fire at enemies in range.
//! Enemies walk toward the base, get slowed by walls, and shoot once in range.
//! Projectiles home in on whatever they were fired at.

use glam::Vec2;

use super::geometry::segment_intersects_rect;
use super::state::{Base, Enemy, Obstacle, Player, Projectile, Side, Target};
use crate::Tuning;
use crate::{in_field, step_toward, within_range};

/// Read-only position lookup for projectile targets
pub struct TargetLookup<'a> {
    pub base: &'a Base,
    pub players: &'a [Player],
    pub enemies: &'a [Enemy],
}

impl TargetLookup<'_> {
    /// Live position of a target, or None once it is gone
    pub fn position(&self, target: Target) -> Option<Vec2> {
        match target {
            Target::Base => Some(self.base.pos),
            Target::Player(id) => self.players.iter().find(|p| p.id == id).map(|p| p.pos),
            Target::Enemy(id) => self
                .enemies
                .iter()
                .find(|e| e.id == id && e.active)
                .map(|e| e.pos),
        }
    }
}

/// Walk toward the target point; `retarget` replaces it first
pub fn update_player(player: &mut Player, retarget: Option<Vec2>) {
    if let Some(target) = retarget {
        player.target = target;
    }
    player.pos = step_toward(player.pos, player.target, player.speed);
    player.fire.advance();
}

/// Every player shoots at enemies in range whenever its cooldown allows
pub fn player_auto_fire(
    players: &mut [Player],
    enemies: &[Enemy],
    tuning: &Tuning,
) -> Vec<Projectile> {
    let mut shots = Vec::new();
    for player in players.iter_mut() {
        for enemy in enemies.iter().filter(|e| e.active) {
            if within_range(player.pos, enemy.pos, tuning.attack_range) && player.fire.ready() {
                shots.push(Projectile::new(
                    Side::Player,
                    player.pos,
                    Target::Enemy(enemy.id),
                    enemy.pos,
                    tuning.projectile_speed,
                    player.attack,
                ));
                player.fire.reset();
            }
        }
    }
    shots
}

/// Outcome of one enemy update
#[derive(Debug, Default)]
pub struct EnemyUpdate {
    /// Shot fired at the base this tick
    pub shot: Option<Projectile>,
    /// The enemy reached the base corner this tick
    pub reached: bool,
}

/// Slow the enemy on first contact with each wall; true if a wall triggered
pub fn apply_wall_slow(enemy: &mut Enemy, obstacles: &[Obstacle], duration: u32) -> bool {
    let bounds = enemy.bounds();
    let hit = obstacles.iter().find(|wall| {
        !enemy.triggered_walls.contains(&wall.id)
            && segment_intersects_rect(wall.start, wall.end, &bounds)
    });

    let Some(wall) = hit else {
        return false;
    };

    enemy.triggered_walls.push(wall.id);
    if duration == 0 {
        // Nothing would ever restore the speed
        return false;
    }
    // Overlapping walls refresh the timer but never stack the halving
    if !enemy.is_slowed() {
        enemy.normal_speed = enemy.speed;
        enemy.speed /= 2.0;
    }
    enemy.slow_ticks = duration;
    log::debug!("Enemy {:?} slowed by wall {:?}", enemy.id, wall.id);
    true
}

/// Run one enemy's AI: walls, slow countdown, attack-or-advance, reached check
pub fn update_enemy(
    enemy: &mut Enemy,
    obstacles: &[Obstacle],
    base: &Base,
    tuning: &Tuning,
) -> EnemyUpdate {
    let mut update = EnemyUpdate::default();
    if !enemy.active {
        return update;
    }

    apply_wall_slow(enemy, obstacles, tuning.slow_duration_ticks);

    if enemy.slow_ticks > 0 {
        enemy.slow_ticks -= 1;
        if enemy.slow_ticks == 0 {
            enemy.speed = enemy.normal_speed;
        }
    }

    if within_range(enemy.pos, base.pos, tuning.attack_range) {
        // In range: hold position and shoot
        if enemy.fire.ready() {
            update.shot = Some(Projectile::new(
                Side::Enemy,
                enemy.pos,
                Target::Base,
                base.pos,
                tuning.projectile_speed,
                tuning.enemy_projectile_damage,
            ));
            enemy.fire.reset();
        }
    } else {
        let dir = (base.pos - enemy.pos).normalize_or_zero();
        enemy.pos += dir * enemy.speed;
    }

    let threshold = tuning.reach_threshold;
    if !enemy.reached && enemy.pos.x >= threshold.x && enemy.pos.y >= threshold.y {
        enemy.reached = true;
        update.reached = true;
    }

    enemy.fire.advance();
    update
}

/// Steer toward the target's live position and advance; expire outside the field
pub fn steer_projectile(projectile: &mut Projectile, target_pos: Option<Vec2>) {
    if !projectile.active {
        return;
    }

    match target_pos {
        Some(target) => {
            // Sitting exactly on the target keeps the old heading
            if let Some(dir) = (target - projectile.pos).try_normalize() {
                projectile.dir = dir;
            }
        }
        None if projectile.dir == Vec2::ZERO => {
            // Target gone and nowhere to fly
            projectile.active = false;
            return;
        }
        None => {}
    }

    projectile.pos += projectile.dir * projectile.speed;

    if !in_field(projectile.pos) {
        projectile.active = false;
    }
}

pub fn steer_projectiles(projectiles: &mut [Projectile], lookup: &TargetLookup) {
    for projectile in projectiles.iter_mut() {
        let target_pos = lookup.position(projectile.target);
        steer_projectile(projectile, target_pos);
    }
}
