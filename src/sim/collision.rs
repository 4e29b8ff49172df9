//! Projectile hit resolution and pruning
//!
//! Runs after all movement. Player shots are resolved against enemies first,
//! then enemy shots against the base. Each projectile registers at most one
//! hit: the first live enemy in list order that it overlaps.

use super::geometry::circles_overlap;
use super::state::{Base, Enemy, GameState, Projectile};
use crate::consts::*;

/// Totals from one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitReport {
    pub hits: u32,
    pub kills: u32,
    /// Money earned from kills
    pub reward: u32,
}

/// Player projectiles against enemies
pub fn resolve_player_hits(projectiles: &mut [Projectile], enemies: &mut [Enemy]) -> HitReport {
    let mut report = HitReport::default();

    for projectile in projectiles.iter_mut().filter(|p| p.active) {
        let Some(enemy) = enemies
            .iter_mut()
            .filter(|e| e.active)
            .find(|e| circles_overlap(e.pos, ENEMY_RADIUS, projectile.pos, PROJECTILE_RADIUS))
        else {
            continue;
        };

        projectile.active = false;
        enemy.hp -= projectile.damage;
        report.hits += 1;

        if enemy.hp <= 0 {
            enemy.active = false;
            report.kills += 1;
            report.reward = report.reward.saturating_add(enemy.reward);
            log::debug!("Enemy {:?} destroyed (+${})", enemy.id, enemy.reward);
        }
    }

    report
}

/// Enemy projectiles against the base; returns the number of hits
pub fn resolve_base_hits(projectiles: &mut [Projectile], base: &mut Base) -> u32 {
    let mut hits = 0;

    for projectile in projectiles.iter_mut().filter(|p| p.active) {
        if base.is_destroyed() {
            break;
        }
        if circles_overlap(base.pos, base.radius, projectile.pos, PROJECTILE_RADIUS) {
            projectile.active = false;
            base.take_damage(projectile.damage);
            hits += 1;
            if base.is_destroyed() {
                log::info!("Base destroyed");
            }
        }
    }

    hits
}

/// Drop inactive enemies and projectiles, keeping the survivors' order
pub fn prune(state: &mut GameState) {
    state.enemies.retain(|e| e.active);
    state.player_projectiles.retain(|p| p.active);
    state.enemy_projectiles.retain(|p| p.active);

    if let Some(selected) = state.selected {
        if !selected.is_live(state) {
            state.selected = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::sim::selection::Selection;
    use crate::sim::state::{EntityId, Side, Target};
    use crate::sim::wave::{EnemySpec, Stage};
    use glam::Vec2;

    fn enemy(id: u32, pos: Vec2, hp: i32) -> Enemy {
        let spec = EnemySpec {
            hp,
            ..EnemySpec::default()
        };
        let mut enemy = Enemy::spawn(EntityId(id), pos, &spec);
        enemy.pos = pos;
        enemy
    }

    fn shot(pos: Vec2, target: Target, damage: i32) -> Projectile {
        Projectile::new(Side::Player, pos, target, pos, 8.0, damage)
    }

    #[test]
    fn test_first_enemy_in_list_wins() {
        let pos = Vec2::new(100.0, 100.0);
        let mut enemies = vec![enemy(1, pos, 3), enemy(2, pos, 3)];
        let mut projectiles = vec![shot(pos, Target::Enemy(EntityId(2)), 1)];

        let report = resolve_player_hits(&mut projectiles, &mut enemies);
        assert_eq!(report.hits, 1);
        assert!(!projectiles[0].active);
        assert_eq!(enemies[0].hp, 2);
        assert_eq!(enemies[1].hp, 3);
    }

    #[test]
    fn test_flat_damage_takes_three_hits() {
        let pos = Vec2::new(100.0, 100.0);
        let mut enemies = vec![enemy(1, pos, 3)];
        let mut projectiles: Vec<_> = (0..3)
            .map(|_| shot(pos, Target::Enemy(EntityId(1)), 1))
            .collect();

        let report = resolve_player_hits(&mut projectiles, &mut enemies);
        assert_eq!(report.hits, 3);
        assert_eq!(report.kills, 1);
        assert_eq!(report.reward, 10);
        assert!(!enemies[0].active);
    }

    #[test]
    fn test_attack_scaled_damage_one_shots() {
        let pos = Vec2::new(100.0, 100.0);
        let mut enemies = vec![enemy(1, pos, 3)];
        let mut projectiles = vec![
            shot(pos, Target::Enemy(EntityId(1)), 3),
            shot(pos, Target::Enemy(EntityId(1)), 3),
        ];

        let report = resolve_player_hits(&mut projectiles, &mut enemies);
        // Second shot finds no live enemy and flies on
        assert_eq!(report.hits, 1);
        assert_eq!(report.kills, 1);
        assert!(projectiles[1].active);
        assert_eq!(enemies[0].hp, 0);
    }

    #[test]
    fn test_miss_leaves_projectile_active() {
        let mut enemies = vec![enemy(1, Vec2::new(100.0, 100.0), 3)];
        let mut projectiles = vec![shot(Vec2::new(110.0, 100.0), Target::Enemy(EntityId(1)), 1)];
        assert_eq!(resolve_player_hits(&mut projectiles, &mut enemies).hits, 0);
        assert!(projectiles[0].active);
    }

    #[test]
    fn test_base_hit_uses_base_radius() {
        let mut base = Base::new(Vec2::new(616.0, 456.0), 20);
        // 17 away: outside an enemy-sized circle, inside the base's
        let pos = base.pos + Vec2::new(17.0, 0.0);
        let mut projectiles = vec![Projectile::new(
            Side::Enemy,
            pos,
            Target::Base,
            base.pos,
            8.0,
            1,
        )];

        assert_eq!(resolve_base_hits(&mut projectiles, &mut base), 1);
        assert_eq!(base.hp, 19);
        assert!(!projectiles[0].active);
    }

    #[test]
    fn test_base_hp_clamps_at_zero() {
        let mut base = Base::new(Vec2::new(616.0, 456.0), 2);
        let mut projectiles: Vec<_> = (0..5)
            .map(|_| Projectile::new(Side::Enemy, base.pos, Target::Base, base.pos, 8.0, 1))
            .collect();

        assert_eq!(resolve_base_hits(&mut projectiles, &mut base), 2);
        assert_eq!(base.hp, 0);
        assert_eq!(projectiles.iter().filter(|p| p.active).count(), 3);
    }

    #[test]
    fn test_negative_damage_never_heals_base() {
        let mut base = Base::new(Vec2::new(616.0, 456.0), 20);
        base.hp = 10;
        let mut projectiles = vec![Projectile::new(
            Side::Enemy,
            base.pos,
            Target::Base,
            base.pos,
            8.0,
            -5,
        )];

        resolve_base_hits(&mut projectiles, &mut base);
        assert_eq!(base.hp, 10);
        base.repair(-3);
        assert_eq!(base.hp, 10);
    }

    #[test]
    fn test_prune_keeps_order_and_clears_stale_selection() {
        let mut state = GameState::new(Tuning::default(), Stage::debug());
        let a = state.spawn_enemy(&EnemySpec::default());
        let b = state.spawn_enemy(&EnemySpec::default());
        let c = state.spawn_enemy(&EnemySpec::default());
        state.enemies[1].active = false;
        state.selected = Some(Selection::Enemy(b));

        prune(&mut state);
        let ids: Vec<_> = state.enemies.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a, c]);
        assert_eq!(state.selected, None);
    }
}
