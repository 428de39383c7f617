use maze_crawler_core::{
    floor_plan, CellCoord, Command, DifficultyId, Event, ItemArchetype, MinimapTile,
};
use maze_crawler_world::{self as world, query, World};

fn enter_floor(world: &mut World, floor: u32) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::EnterFloor { floor }, &mut events);
    events
}

#[test]
fn a_fresh_world_is_immediately_usable() {
    let world = World::new();
    let spec = query::grid_spec(&world);

    let cell_count = (spec.columns() * spec.rows()) as usize;
    assert_eq!(query::walls(&world).len() + query::floors(&world).len(), cell_count);

    let plan = floor_plan(1);
    assert_eq!(query::enemies(&world).len(), plan.enemy_count as usize);
    assert_eq!(query::items(&world).len(), plan.item_count as usize);
    assert!(query::exit(&world).is_some());
    assert_eq!(query::current_floor(&world), 1);
    assert_eq!(query::difficulty(&world), DifficultyId::Normal);
    assert_eq!(query::welcome_banner(&world), "Welcome to the crawl.");
}

#[test]
fn grid_rectangles_are_tile_aligned_and_disjoint() {
    let world = World::new();
    let spec = query::grid_spec(&world);
    let tile = spec.tile_length();

    let wall_cells: Vec<CellCoord> = query::walls(&world)
        .iter()
        .map(|wall| wall.cell(tile))
        .collect();
    for wall in query::walls(&world) {
        assert_eq!(wall.width, tile);
        assert_eq!(wall.height, tile);
        assert_eq!(wall.x % tile, 0.0);
        assert_eq!(wall.y % tile, 0.0);
    }
    for floor in query::floors(&world) {
        assert!(!wall_cells.contains(&floor.cell(tile)));
    }
}

#[test]
fn the_player_spawns_on_a_floor_cell() {
    let world = World::new();
    let spec = query::grid_spec(&world);
    let player_cell = query::player_cell(&world);

    assert!(query::walls(&world)
        .iter()
        .all(|wall| wall.cell(spec.tile_length()) != player_cell));
}

#[test]
fn entering_a_floor_rebuilds_entities_and_preserves_the_player() {
    let mut world = World::new();
    let inventory_before = query::player(&world).inventory.clone();
    let health_before = query::player(&world).health;

    let events = enter_floor(&mut world, 2);

    assert_eq!(query::current_floor(&world), 2);
    let plan = floor_plan(2);
    assert_eq!(query::enemies(&world).len(), plan.enemy_count as usize);
    assert_eq!(query::items(&world).len(), plan.item_count as usize);

    let player = query::player(&world);
    assert_eq!(player.inventory, inventory_before);
    assert_eq!(player.health, health_before);

    assert!(matches!(events.first(), Some(Event::FloorEntered { floor: 2 })));
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::PlayerSpawned { .. })));
}

#[test]
fn floor_zero_clamps_to_floor_one() {
    let mut world = World::new();
    let _ = enter_floor(&mut world, 0);
    assert_eq!(query::current_floor(&world), 1);
}

#[test]
fn floor_entry_broadcasts_one_event_per_spawn() {
    let mut world = World::new();
    let events = enter_floor(&mut world, 3);
    let plan = floor_plan(3);

    let enemy_events = events
        .iter()
        .filter(|event| matches!(event, Event::EnemySpawned { .. }))
        .count();
    let item_events = events
        .iter()
        .filter(|event| matches!(event, Event::ItemSpawned { .. }))
        .count();
    let exit_events = events
        .iter()
        .filter(|event| matches!(event, Event::ExitSpawned { .. }))
        .count();

    assert_eq!(enemy_events, plan.enemy_count as usize);
    assert_eq!(item_events, plan.item_count as usize);
    assert_eq!(exit_events, 1);
}

#[test]
fn new_game_restores_the_bootstrap_inventory() {
    let mut world = World::new();
    let _ = enter_floor(&mut world, 4);

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::NewGame {
            difficulty: DifficultyId::Hard,
        },
        &mut events,
    );

    assert_eq!(query::current_floor(&world), 1);
    assert_eq!(query::difficulty(&world), DifficultyId::Hard);

    let player = query::player(&world);
    assert_eq!(player.inventory.len(), 2);
    assert_eq!(player.inventory[0].archetype, ItemArchetype::RustySword);
    assert!(player.inventory[0].equipped);
    assert_eq!(player.inventory[1].archetype, ItemArchetype::HealthPotion);
    assert_eq!(player.inventory[1].quantity, 3);
    assert_eq!(player.equipped_weapon, Some(player.inventory[0].id));
}

#[test]
fn floor_one_enemies_match_the_example_scaling() {
    // Grid 20x20, tile 64, difficulty normal, floor 1 multipliers 0.8/0.8:
    // every enemy's stats equal archetype base times 0.8 times 1.0.
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::NewGame {
            difficulty: DifficultyId::Normal,
        },
        &mut events,
    );

    assert_eq!(query::enemies(&world).len(), 3);
    for enemy in query::enemies(&world) {
        assert_eq!(enemy.max_health, enemy.archetype.base_health() * 0.8 * 1.0);
        assert_eq!(enemy.damage, enemy.archetype.base_damage() * 0.8 * 1.0);
    }
}

#[test]
fn difficulty_application_is_idempotent_through_commands() {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SetDifficulty {
            difficulty: DifficultyId::Expert,
        },
        &mut events,
    );
    let once: Vec<_> = query::enemies(&world).to_vec();

    world::apply(
        &mut world,
        Command::SetDifficulty {
            difficulty: DifficultyId::Expert,
        },
        &mut events,
    );

    assert_eq!(query::enemies(&world), once.as_slice());
    for enemy in query::enemies(&world) {
        let expected = enemy.archetype.base_health() * enemy.level_health_mult * 2.0;
        assert_eq!(enemy.max_health, expected);
    }
}

#[test]
fn moving_into_a_wall_is_blocked_and_slid() {
    let mut world = World::new();
    let wall = query::walls(&world)[0];
    let target_x = wall.x + wall.width / 2.0;
    let target_y = wall.y + wall.height / 2.0;

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::MovePlayer {
            x: target_x,
            y: target_y,
        },
        &mut events,
    );

    match events.last() {
        Some(Event::PlayerMoved {
            x,
            y,
            blocked_x,
            blocked_y,
        }) => {
            assert!(blocked_x | blocked_y, "a wall-center move must collide");
            assert!((*x, *y) != (target_x, target_y));
            assert_eq!(query::player(&world).x, *x);
            assert_eq!(query::player(&world).y, *y);
        }
        other => panic!("expected PlayerMoved, got {other:?}"),
    }
}

#[test]
fn moving_in_place_is_unobstructed() {
    let mut world = World::new();
    let (x, y) = (query::player(&world).x, query::player(&world).y);

    let mut events = Vec::new();
    world::apply(&mut world, Command::MovePlayer { x, y }, &mut events);

    assert_eq!(
        events.last(),
        Some(&Event::PlayerMoved {
            x,
            y,
            blocked_x: false,
            blocked_y: false,
        })
    );
}

#[test]
fn minimap_projection_reflects_the_entities() {
    let world = World::new();
    let spec = query::grid_spec(&world);
    let minimap = query::minimap(&world);

    assert_eq!(minimap.columns(), spec.columns());
    assert_eq!(minimap.rows(), spec.rows());
    assert_eq!(
        minimap.tile(query::player_cell(&world)),
        Some(MinimapTile::Player)
    );

    let player_cell = query::player_cell(&world);
    let enemy_cells: Vec<CellCoord> = query::enemies(&world)
        .iter()
        .map(|enemy| spec.cell_of(enemy.x, enemy.y))
        .collect();
    let item_cells: Vec<CellCoord> = query::items(&world)
        .iter()
        .map(|item| spec.cell_of(item.x, item.y))
        .collect();

    if let Some(exit) = query::exit(&world) {
        let exit_cell = spec.cell_of(exit.x, exit.y);
        let covered = exit_cell == player_cell
            || enemy_cells.contains(&exit_cell)
            || item_cells.contains(&exit_cell);
        if !covered {
            assert_eq!(minimap.tile(exit_cell), Some(MinimapTile::Exit));
        }
    }

    let tile_length = spec.tile_length();
    let uncontested_wall = query::walls(&world)
        .iter()
        .map(|wall| wall.cell(tile_length))
        .find(|cell| {
            *cell != player_cell && !enemy_cells.contains(cell) && !item_cells.contains(cell)
        })
        .expect("a 20x20 maze always has an uncontested wall cell");
    assert_eq!(minimap.tile(uncontested_wall), Some(MinimapTile::Wall));
}

#[test]
fn identical_seeds_replay_identically() {
    let mut first = World::with_seed(0x5eed);
    let mut second = World::with_seed(0x5eed);

    let script = [
        Command::EnterFloor { floor: 2 },
        Command::SetDifficulty {
            difficulty: DifficultyId::Hard,
        },
        Command::EnterFloor { floor: 3 },
    ];

    let mut first_events = Vec::new();
    let mut second_events = Vec::new();
    for command in &script {
        world::apply(&mut first, command.clone(), &mut first_events);
        world::apply(&mut second, command.clone(), &mut second_events);
    }

    assert_eq!(first_events, second_events);
    assert_eq!(query::enemies(&first), query::enemies(&second));
    assert_eq!(query::walls(&first), query::walls(&second));
    assert_eq!(query::minimap(&first), query::minimap(&second));
}

#[test]
fn different_seeds_diverge() {
    let first = World::with_seed(1);
    let second = World::with_seed(2);
    assert_ne!(query::walls(&first), query::walls(&second));
}
