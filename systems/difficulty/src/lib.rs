#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Idempotent difficulty scaling for live enemies.
//!
//! Enemies carry their archetype and the floor-plan multipliers captured at
//! spawn time, so effective stats are always recomputed from base values
//! rather than adjusted in place. Applying the same difficulty twice is
//! therefore exactly the same as applying it once, and switching
//! difficulties never compounds earlier scaling.

use maze_crawler_core::{Difficulty, Enemy};

/// Rescales every enemy to the provided difficulty.
///
/// Effective health and damage are pure functions of
/// `(archetype base, level multiplier, difficulty multiplier)`; current
/// health snaps to the recomputed maximum.
pub fn apply(enemies: &mut [Enemy], difficulty: &Difficulty) {
    for enemy in enemies.iter_mut() {
        let base_health = enemy.archetype.base_health() * enemy.level_health_mult;
        let base_damage = enemy.archetype.base_damage() * enemy.level_damage_mult;

        enemy.max_health = base_health * difficulty.enemy_multiplier;
        enemy.health = enemy.max_health;
        enemy.damage = base_damage * difficulty.damage_multiplier;
    }
}
