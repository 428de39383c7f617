#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Symbolic minimap projection of the current world state.
//!
//! Every call rebuilds the full grid from scratch; the projection carries
//! no history and is never persisted. Cell precedence is
//! player > enemy > item > exit > wall > empty, so at most one symbol is
//! shown per cell and the player wins every tie.

use maze_crawler_core::{
    CellCoord, Enemy, ExitPortal, GridSpec, GroundItem, MinimapGrid, MinimapTile, TileRect,
};

/// Projects the grid and entity collections into a render-ready minimap.
///
/// A dense wall mask is derived from the wall rectangles once per call, so
/// the per-cell cost depends only on the entity counts.
#[must_use]
pub fn project(
    spec: &GridSpec,
    walls: &[TileRect],
    player_cell: CellCoord,
    enemies: &[Enemy],
    items: &[GroundItem],
    exit: Option<&ExitPortal>,
) -> MinimapGrid {
    let mut minimap = MinimapGrid::new(spec.columns(), spec.rows());

    let mut wall_mask = vec![false; spec.columns() as usize * spec.rows() as usize];
    for wall in walls {
        let cell = wall.cell(spec.tile_length());
        if cell.column() < spec.columns() && cell.row() < spec.rows() {
            let index = cell.row() as usize * spec.columns() as usize + cell.column() as usize;
            wall_mask[index] = true;
        }
    }

    let exit_cell = exit.map(|portal| spec.cell_of(portal.x, portal.y));

    for row in 0..spec.rows() {
        for column in 0..spec.columns() {
            let cell = CellCoord::new(column, row);

            let has_enemy = enemies
                .iter()
                .any(|enemy| spec.cell_of(enemy.x, enemy.y) == cell);
            let has_item = items
                .iter()
                .any(|item| !item.collected && spec.cell_of(item.x, item.y) == cell);
            let is_wall = wall_mask[row as usize * spec.columns() as usize + column as usize];

            let tile = if cell == player_cell {
                MinimapTile::Player
            } else if has_enemy {
                MinimapTile::Enemy
            } else if has_item {
                MinimapTile::Item
            } else if exit_cell == Some(cell) {
                MinimapTile::Exit
            } else if is_wall {
                MinimapTile::Wall
            } else {
                MinimapTile::Empty
            };

            minimap.set(cell, tile);
        }
    }

    minimap
}
