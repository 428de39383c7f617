use glam::Vec2;
use maze_crawler_core::{floor_plan, CellCoord, GridSpec, Player, TileRect};
use maze_crawler_system_collision as collision;
use maze_crawler_system_generation as generation;
use maze_crawler_system_placement::{
    bootstrap_inventory, place_enemies, place_exit, place_items, place_player,
    ENEMY_MIN_PLAYER_DISTANCE, EXIT_MIN_PLAYER_DISTANCE, PLAYER_SAFE_CELL,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn generated_walls(seed: u64) -> (GridSpec, Vec<TileRect>) {
    let spec = GridSpec::default();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let layout =
        generation::generate(spec.columns(), spec.rows(), &mut rng).expect("default spec generates");
    let walls = layout
        .wall_cells()
        .map(|cell| TileRect::from_cell(cell, spec.tile_length()))
        .collect();
    (spec, walls)
}

/// Every interior cell walled off except (2,2), on the smallest legal grid.
fn single_floor_cell_walls(spec: &GridSpec) -> Vec<TileRect> {
    let mut walls = Vec::new();
    for row in 0..spec.rows() {
        for column in 0..spec.columns() {
            let cell = CellCoord::new(column, row);
            if cell != CellCoord::new(2, 2) {
                walls.push(TileRect::from_cell(cell, spec.tile_length()));
            }
        }
    }
    walls
}

#[test]
fn player_spawn_clears_all_walls() {
    for seed in 0..8 {
        let (spec, walls) = generated_walls(seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0x9e37_79b9);
        let placement = place_player(&spec, &walls, Player::HITBOX, Player::HITBOX, &mut rng);

        assert!(!placement.exhausted, "seed {seed}: budget should suffice");
        assert!(!collision::collides(
            &walls,
            Vec2::new(placement.x, placement.y),
            Player::HITBOX,
            Player::HITBOX
        ));
        assert_eq!(spec.cell_of(placement.x, placement.y), placement.cell);
    }
}

#[test]
fn player_snaps_to_safe_cell_when_every_cell_collides() {
    let spec = GridSpec::new(6, 6, 64.0).expect("valid spec");
    let mut walls = Vec::new();
    for row in 0..6 {
        for column in 0..6 {
            walls.push(TileRect::from_cell(CellCoord::new(column, row), 64.0));
        }
    }

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let placement = place_player(&spec, &walls, Player::HITBOX, Player::HITBOX, &mut rng);

    assert!(placement.exhausted);
    assert_eq!(placement.cell, PLAYER_SAFE_CELL);
}

#[test]
fn enemies_occupy_distinct_cells_away_from_the_player() {
    for seed in 0..8 {
        let (spec, walls) = generated_walls(seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_mul(31) + 5);
        let player = place_player(&spec, &walls, Player::HITBOX, Player::HITBOX, &mut rng);
        let plan = floor_plan(2);

        let placement = place_enemies(&spec, &walls, player.cell, plan, &mut rng);
        assert_eq!(placement.fallback_count, 0, "seed {seed}");
        assert_eq!(placement.enemies.len(), plan.enemy_count as usize);

        let cells: Vec<CellCoord> = placement
            .enemies
            .iter()
            .map(|enemy| spec.cell_of(enemy.x, enemy.y))
            .collect();
        for (index, cell) in cells.iter().enumerate() {
            assert!(
                !cells[..index].contains(cell),
                "seed {seed}: enemies share cell {cell:?}"
            );
            assert!(player.cell.distance(*cell) >= ENEMY_MIN_PLAYER_DISTANCE);
        }
    }
}

#[test]
fn enemy_stats_follow_the_floor_plan_multipliers() {
    let (spec, walls) = generated_walls(3);
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let player = place_player(&spec, &walls, Player::HITBOX, Player::HITBOX, &mut rng);

    let plan = floor_plan(1);
    let placement = place_enemies(&spec, &walls, player.cell, plan, &mut rng);

    for enemy in &placement.enemies {
        let base = enemy.archetype;
        assert_eq!(enemy.max_health, base.base_health() * 0.8);
        assert_eq!(enemy.health, enemy.max_health);
        assert_eq!(enemy.damage, base.base_damage() * 0.8);
        assert_eq!(enemy.level_health_mult, plan.enemy_health_mult);
        assert_eq!(enemy.level_damage_mult, plan.enemy_damage_mult);
        assert_eq!(enemy.experience, base.experience());
        assert!(enemy.target.is_none());
        assert!(enemy.attack_elapsed.is_zero());
    }
}

#[test]
fn enemy_fallback_rescues_onto_the_only_floor_cell() {
    let spec = GridSpec::new(6, 6, 64.0).expect("valid spec");
    let walls = single_floor_cell_walls(&spec);
    let plan = floor_plan(1);
    let mut rng = ChaCha8Rng::seed_from_u64(13);

    // Player right next to the floor cell: the distance constraint can
    // never hold, so every enemy exhausts its budget.
    let mut placement = place_enemies(&spec, &walls, CellCoord::new(3, 3), plan, &mut rng);
    assert_eq!(placement.fallback_count, plan.enemy_count);

    let first = placement.enemies.remove(0);
    assert_eq!(spec.cell_of(first.x, first.y), CellCoord::new(2, 2));
}

#[test]
fn items_occupy_distinct_floor_cells_and_start_uncollected() {
    for seed in 0..8 {
        let (spec, walls) = generated_walls(seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed + 99);
        let placement = place_items(&spec, &walls, floor_plan(3).item_count, &mut rng);

        assert_eq!(placement.fallback_count, 0, "seed {seed}");
        assert_eq!(placement.items.len(), floor_plan(3).item_count as usize);

        let cells: Vec<CellCoord> = placement
            .items
            .iter()
            .map(|item| spec.cell_of(item.x, item.y))
            .collect();
        for (index, cell) in cells.iter().enumerate() {
            assert!(!cells[..index].contains(cell), "seed {seed}");
        }
        for item in &placement.items {
            assert!(!item.collected);
            assert_eq!(item.quantity, 1);
        }
    }
}

#[test]
fn exit_keeps_its_distance_from_the_player() {
    for seed in 0..8 {
        let (spec, walls) = generated_walls(seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed + 1_000);
        let player = place_player(&spec, &walls, Player::HITBOX, Player::HITBOX, &mut rng);

        let placement = place_exit(&spec, &walls, player.cell, &mut rng);
        assert!(!placement.exhausted, "seed {seed}");
        assert!(player.cell.distance(placement.cell) >= EXIT_MIN_PLAYER_DISTANCE);
        assert_eq!(placement.exit.width, spec.tile_length());
        assert_eq!(
            spec.cell_of(placement.exit.x, placement.exit.y),
            placement.cell
        );
    }
}

#[test]
fn exit_fallback_rescues_onto_a_floor_cell() {
    let spec = GridSpec::new(6, 6, 64.0).expect("valid spec");
    let walls = single_floor_cell_walls(&spec);
    let mut rng = ChaCha8Rng::seed_from_u64(17);

    let placement = place_exit(&spec, &walls, CellCoord::new(3, 3), &mut rng);
    assert!(placement.exhausted);
    assert_eq!(placement.cell, CellCoord::new(2, 2));
}

#[test]
fn bootstrap_inventory_matches_the_fixed_loadout() {
    let bootstrap = bootstrap_inventory();
    assert_eq!(bootstrap.items[0].id, bootstrap.equipped_weapon);
    assert_eq!(bootstrap.items.len(), 2);
}
