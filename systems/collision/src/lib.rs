#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Axis-aligned collision testing and sliding movement resolution.
//!
//! Entities are centered AABBs; walls are the grid's tile rectangles.
//! Overlap uses strict inequalities on both axes, so boxes that merely
//! touch edges do not collide. Resolution pushes the entity out of each
//! overlapping wall along the axis of shallower penetration, which yields
//! the familiar slide-along-wall response instead of a hard stop.

use glam::Vec2;
use maze_crawler_core::TileRect;

/// Gap left between a resolved entity and the wall it was pushed out of,
/// in world units.
pub const WALL_CLEARANCE: f32 = 1.0;

/// Outcome of resolving an attempted move against the wall set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementResolution {
    /// Whether any wall forced a horizontal correction.
    pub collided_x: bool,
    /// Whether any wall forced a vertical correction.
    pub collided_y: bool,
    /// The attempted center with per-axis corrections applied.
    ///
    /// Axes without a collision keep their attempted value, so callers can
    /// store this position directly.
    pub position: Vec2,
}

/// Reports whether the centered AABB overlaps any wall rectangle.
#[must_use]
pub fn collides(walls: &[TileRect], center: Vec2, width: f32, height: f32) -> bool {
    let half_width = width / 2.0;
    let half_height = height / 2.0;
    walls
        .iter()
        .any(|wall| overlaps(wall, center, half_width, half_height))
}

/// Resolves an attempted move against every overlapping wall.
///
/// Each overlapping wall is handled independently: the four directional
/// penetration depths are computed, the axis with the shallower minimum
/// penetration is chosen, and the entity center is pushed to the wall's
/// boundary plus [`WALL_CLEARANCE`]. When several walls overlap, the last
/// wall processed wins on its resolution axis.
#[must_use]
pub fn resolve(walls: &[TileRect], attempted: Vec2, width: f32, height: f32) -> MovementResolution {
    let half_width = width / 2.0;
    let half_height = height / 2.0;
    let mut collided_x = false;
    let mut collided_y = false;
    let mut position = attempted;

    for wall in walls {
        if !overlaps(wall, attempted, half_width, half_height) {
            continue;
        }

        let overlap_left = (attempted.x + half_width) - wall.x;
        let overlap_right = wall.right() - (attempted.x - half_width);
        let overlap_top = (attempted.y + half_height) - wall.y;
        let overlap_bottom = wall.bottom() - (attempted.y - half_height);

        let min_overlap_x = overlap_left.min(overlap_right);
        let min_overlap_y = overlap_top.min(overlap_bottom);

        if min_overlap_x < min_overlap_y {
            position.x = if overlap_left < overlap_right {
                wall.x - half_width - WALL_CLEARANCE
            } else {
                wall.right() + half_width + WALL_CLEARANCE
            };
            collided_x = true;
        } else {
            position.y = if overlap_top < overlap_bottom {
                wall.y - half_height - WALL_CLEARANCE
            } else {
                wall.bottom() + half_height + WALL_CLEARANCE
            };
            collided_y = true;
        }
    }

    MovementResolution {
        collided_x,
        collided_y,
        position,
    }
}

fn overlaps(wall: &TileRect, center: Vec2, half_width: f32, half_height: f32) -> bool {
    center.x + half_width > wall.x
        && center.x - half_width < wall.right()
        && center.y + half_height > wall.y
        && center.y - half_height < wall.bottom()
}
