#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Procedural maze layout generation.
//!
//! Classifies every cell of a rectangular grid as wall or floor and then
//! carves a biased random walk between two fixed interior cells, which is
//! the sole connectivity guarantee of the layout. Callers that need a
//! provably fully-connected grid fall back to [`trivial`].

use maze_crawler_core::{CellCoord, GridSpec};
use rand::Rng;
use thiserror::Error;

/// Probability that an interior cell starts out as a wall.
pub const WALL_PROBABILITY: f64 = 0.3;

/// Probability that a carving step moves greedily toward the target rather
/// than drifting in a uniformly random direction.
pub const GREEDY_STEP_PROBABILITY: f64 = 0.7;

/// Hard cap on carving steps; together with the forced target cell this
/// bounds generation time regardless of how the walk wanders.
pub const CARVE_STEP_LIMIT: u32 = 1000;

/// Wall/floor classification of every cell in a rectangular grid.
///
/// The two cell classes are disjoint and jointly cover the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeLayout {
    columns: u32,
    rows: u32,
    wall: Vec<bool>,
}

impl MazeLayout {
    fn open(columns: u32, rows: u32) -> Self {
        let capacity = columns as usize * rows as usize;
        Self {
            columns,
            rows,
            wall: vec![false; capacity],
        }
    }

    /// Number of columns contained in the layout.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the layout.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the provided cell is a wall.
    ///
    /// Cells outside the layout bounds count as walls.
    #[must_use]
    pub fn is_wall(&self, cell: CellCoord) -> bool {
        self.index(cell).map_or(true, |index| self.wall[index])
    }

    /// Iterates over every wall cell in row-major order.
    pub fn wall_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells().filter(|cell| self.is_wall(*cell))
    }

    /// Iterates over every floor cell in row-major order.
    pub fn floor_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells().filter(|cell| !self.is_wall(*cell))
    }

    fn cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| (0..columns).map(move |column| CellCoord::new(column, row)))
    }

    fn set_wall(&mut self, cell: CellCoord, wall: bool) {
        if let Some(index) = self.index(cell) {
            self.wall[index] = wall;
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            Some(cell.row() as usize * self.columns as usize + cell.column() as usize)
        } else {
            None
        }
    }
}

/// Faults that prevent the carving walk from running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The grid is too small for the carving endpoints to stay interior.
    #[error("maze generation requires at least a 5x5 grid (received {columns}x{rows})")]
    DimensionsTooSmall {
        /// Requested number of columns.
        columns: u32,
        /// Requested number of rows.
        rows: u32,
    },
}

/// Fixed interior cell where the carving walk begins.
#[must_use]
pub const fn carve_start() -> CellCoord {
    CellCoord::new(1, 1)
}

/// Fixed interior cell the carving walk steers toward.
#[must_use]
pub const fn carve_target(columns: u32, rows: u32) -> CellCoord {
    CellCoord::new(columns - 2, rows - 2)
}

/// Generates a maze layout for the provided dimensions.
///
/// Border cells are always walls; interior cells are walls with
/// [`WALL_PROBABILITY`]. A carving walk then forces a floor corridor from
/// [`carve_start`] to [`carve_target`], guaranteeing the two endpoints are
/// connected. The corridor may be meandering; no further connectivity is
/// promised.
pub fn generate<R: Rng>(columns: u32, rows: u32, rng: &mut R) -> Result<MazeLayout, GenerationError> {
    if columns < GridSpec::MIN_DIMENSION || rows < GridSpec::MIN_DIMENSION {
        return Err(GenerationError::DimensionsTooSmall { columns, rows });
    }

    let mut layout = MazeLayout::open(columns, rows);
    for row in 0..rows {
        for column in 0..columns {
            let border = column == 0 || row == 0 || column == columns - 1 || row == rows - 1;
            let wall = border || rng.gen_bool(WALL_PROBABILITY);
            layout.set_wall(CellCoord::new(column, row), wall);
        }
    }

    carve(&mut layout, rng);
    Ok(layout)
}

/// Builds the trivially connected fallback layout: walls on the border,
/// floor everywhere inside.
///
/// This is the safe degeneration path when regular generation cannot run;
/// every floor cell is reachable from every other.
#[must_use]
pub fn trivial(columns: u32, rows: u32) -> MazeLayout {
    let mut layout = MazeLayout::open(columns, rows);
    for row in 0..rows {
        for column in 0..columns {
            let border = column == 0 || row == 0 || column == columns - 1 || row == rows - 1;
            layout.set_wall(CellCoord::new(column, row), border);
        }
    }
    layout
}

fn carve<R: Rng>(layout: &mut MazeLayout, rng: &mut R) {
    let columns = layout.columns();
    let rows = layout.rows();
    let target = carve_target(columns, rows);
    let mut current = carve_start();

    for _ in 0..CARVE_STEP_LIMIT {
        layout.set_wall(current, false);
        if current == target {
            break;
        }

        current = if rng.gen_bool(GREEDY_STEP_PROBABILITY) {
            greedy_step(current, target)
        } else {
            random_step(current, columns, rows, rng)
        };
    }

    // The walk is step-capped, so the target floor is forced unconditionally.
    layout.set_wall(target, false);
}

fn greedy_step(current: CellCoord, target: CellCoord) -> CellCoord {
    let column_offset = i64::from(target.column()) - i64::from(current.column());
    let row_offset = i64::from(target.row()) - i64::from(current.row());

    if column_offset.abs() >= row_offset.abs() && column_offset != 0 {
        let column = i64::from(current.column()) + column_offset.signum();
        CellCoord::new(column as u32, current.row())
    } else {
        let row = i64::from(current.row()) + row_offset.signum();
        CellCoord::new(current.column(), row as u32)
    }
}

fn random_step<R: Rng>(current: CellCoord, columns: u32, rows: u32, rng: &mut R) -> CellCoord {
    const DIRECTIONS: [(i64, i64); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
    let (column_delta, row_delta) = DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())];

    let column = (i64::from(current.column()) + column_delta).clamp(1, i64::from(columns) - 2);
    let row = (i64::from(current.row()) + row_delta).clamp(1, i64::from(rows) - 2);
    CellCoord::new(column as u32, row as u32)
}
