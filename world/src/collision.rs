//! Sample-point overlap between pixel rectangles and the tile grid.
//!
//! A rectangle is reduced to a handful of points on its boundary and each point
//! is looked up in the grid. Rectangles that fit inside one tile use their four
//! corners. Larger rectangles are sampled at a stride of one pixel less than
//! the tile side so consecutive samples can never straddle a whole tile. This
//! is an approximation of full coverage, and collision response depends on the
//! exact stride and the one-pixel inset on the trailing edges.

use gridwalk_core::{PixelPoint, PixelRect, TileCoord, EMPTY_TILE};

use crate::TileGrid;

/// Boundary points used to approximate which tiles `rect` overlaps.
///
/// The right and bottom samples are inset by one pixel because both edges are
/// exclusive.
#[must_use]
pub fn sample_points(rect: &PixelRect, tile_side: i32) -> Vec<PixelPoint> {
    let last_x = rect.right().saturating_sub(1);
    let last_y = rect.bottom().saturating_sub(1);

    if rect.width() <= tile_side && rect.height() <= tile_side {
        return vec![
            PixelPoint::new(rect.left(), rect.top()),
            PixelPoint::new(rect.left(), last_y),
            PixelPoint::new(last_x, rect.top()),
            PixelPoint::new(last_x, last_y),
        ];
    }

    let stride = usize::try_from(tile_side - 1).unwrap_or(1).max(1);
    let x_offsets: Vec<i32> = (0..rect.width() - 1).step_by(stride).collect();
    let y_offsets: Vec<i32> = (0..rect.height() - 1).step_by(stride).collect();

    let capacity = 2 + (x_offsets.len() + 1) * (y_offsets.len() + 1);
    let mut points = Vec::with_capacity(capacity);
    points.push(PixelPoint::new(last_x, rect.top()));
    points.push(PixelPoint::new(last_x, last_y));
    for dx in &x_offsets {
        for dy in &y_offsets {
            points.push(PixelPoint::new(
                rect.left().saturating_add(*dx),
                rect.top().saturating_add(*dy),
            ));
        }
    }
    for dx in &x_offsets {
        points.push(PixelPoint::new(rect.left().saturating_add(*dx), last_y));
    }
    for dy in &y_offsets {
        points.push(PixelPoint::new(last_x, rect.top().saturating_add(*dy)));
    }
    points
}

/// Blocking tiles touched by the boundary samples of `rect`.
///
/// Tiles are reported once per sample that lands on them, in sampling order,
/// so the same coordinate may appear several times. Samples outside the grid
/// are treated as passable.
#[must_use]
pub fn rect_collisions(grid: &TileGrid, rect: &PixelRect) -> Vec<TileCoord> {
    let tile_side = grid.tile_side();
    sample_points(rect, tile_side)
        .into_iter()
        .map(|point| point.tile(tile_side))
        .filter(|tile| grid.get_or(*tile, EMPTY_TILE) != EMPTY_TILE)
        .collect()
}
