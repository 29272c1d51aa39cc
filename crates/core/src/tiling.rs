//! Slippy-map tile partitioning of job polygons.
//!
//! The world (Web Mercator, EPSG:3857) is split into `2^zoom x 2^zoom`
//! square tiles. `x` counts eastward from the antimeridian and `y` counts
//! southward from the top edge of the projection, matching the XYZ scheme
//! used by OSM tile servers.

use serde::Serialize;

use crate::geometry::{clip_ring, ring_area, BoundingBox, Polygon};

/// Half the width of the Web Mercator world, in meters.
pub const WORLD_HALF_EXTENT: f64 = 20_037_508.342_789_244;

/// Highest zoom the tiler accepts. Beyond this tile indices stop fitting
/// comfortably in `f64` mantissa precision.
pub const MAX_TILER_ZOOM: u32 = 30;

/// Overlap area, as a fraction of the smaller of one tile and the polygon,
/// below which a candidate tile is treated as merely touching the polygon.
const MIN_OVERLAP_FRACTION: f64 = 1e-9;

/// Distance, in tile units, within which a position snaps onto the nearest
/// tile boundary. Absorbs rounding in `x * tile_size` style inputs.
const BOUNDARY_SNAP: f64 = 1e-6;

/// Grid cell coordinate of a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TileCoord {
    pub x: i64,
    pub y: i64,
}

impl TileCoord {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Inclusive index ranges of the tiles covering a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    pub x_min: i64,
    pub x_max: i64,
    pub y_min: i64,
    pub y_max: i64,
}

impl TileRange {
    /// Number of tiles in the range.
    pub fn len(&self) -> u64 {
        let columns = (self.x_max - self.x_min + 1) as u64;
        let rows = (self.y_max - self.y_min + 1) as u64;
        columns * rows
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Edge length of one tile at `zoom`, in meters.
pub fn tile_size(zoom: u32) -> f64 {
    2.0 * WORLD_HALF_EXTENT / tiles_per_side(zoom) as f64
}

fn tiles_per_side(zoom: u32) -> u64 {
    1u64 << zoom.min(MAX_TILER_ZOOM)
}

/// Fractional position of `x` across the world, `0.0` at the west edge.
///
/// Dividing by the full world width keeps grid-aligned inputs exact: the
/// projection origin maps to exactly `0.5`.
fn world_fraction_x(x: f64) -> f64 {
    (x + WORLD_HALF_EXTENT) / (2.0 * WORLD_HALF_EXTENT)
}

/// Fractional position of `y` down the world, `0.0` at the north edge.
fn world_fraction_y(y: f64) -> f64 {
    (WORLD_HALF_EXTENT - y) / (2.0 * WORLD_HALF_EXTENT)
}

/// Index range along one axis for the span `[low, high]` in tile units.
///
/// A span ending exactly on a tile boundary does not claim the next tile.
/// A zero-width span still claims the tile it sits in.
fn axis_range(low: f64, high: f64, last: i64) -> (i64, i64) {
    let (low, high) = (snap_to_boundary(low), snap_to_boundary(high));
    let first = (low.floor() as i64).clamp(0, last);
    let end = if high > low {
        (high.ceil() as i64 - 1).clamp(0, last)
    } else {
        first
    };
    (first, end.max(first))
}

fn snap_to_boundary(position: f64) -> f64 {
    let nearest = position.round();
    if (position - nearest).abs() < BOUNDARY_SNAP {
        nearest
    } else {
        position
    }
}

/// Tiles whose squares the bounding box covers at `zoom`.
///
/// Coordinates outside the world clamp to the edge tiles.
pub fn tile_range(bbox: &BoundingBox, zoom: u32) -> TileRange {
    let zoom = zoom.min(MAX_TILER_ZOOM);
    let side = tiles_per_side(zoom) as f64;
    let last = tiles_per_side(zoom) as i64 - 1;

    let (x_min, x_max) = axis_range(
        world_fraction_x(bbox.min_x) * side,
        world_fraction_x(bbox.max_x) * side,
        last,
    );
    // North (max_y) is the low end of the y axis.
    let (y_min, y_max) = axis_range(
        world_fraction_y(bbox.max_y) * side,
        world_fraction_y(bbox.min_y) * side,
        last,
    );

    TileRange {
        x_min,
        x_max,
        y_min,
        y_max,
    }
}

/// Projected bounds of one tile.
pub fn tile_bounds(coord: TileCoord, zoom: u32) -> BoundingBox {
    let size = tile_size(zoom);
    let min_x = -WORLD_HALF_EXTENT + coord.x as f64 * size;
    let max_y = WORLD_HALF_EXTENT - coord.y as f64 * size;
    BoundingBox {
        min_x,
        min_y: max_y - size,
        max_x: min_x + size,
        max_y,
    }
}

/// Upper bound on the number of tiles [`generate_tiles`] can return.
///
/// Callers use this to reject oversized jobs before any allocation happens.
pub fn count_tiles_upper_bound(polygon: &Polygon, zoom: u32) -> u64 {
    tile_range(&polygon.bbox(), zoom).len()
}

/// Partition a polygon into the tiles it overlaps at `zoom`.
///
/// Candidates are the tiles covering the polygon's bounding box. When the
/// polygon encloses a non-zero area, candidates whose interior does not
/// overlap the polygon are dropped. A zero-area polygon keeps every
/// candidate, so the result is never empty. Output is ordered by `x`, then
/// `y`, and is identical for identical inputs.
pub fn generate_tiles(polygon: &Polygon, zoom: u32) -> Vec<TileCoord> {
    let zoom = zoom.min(MAX_TILER_ZOOM);
    let range = tile_range(&polygon.bbox(), zoom);
    let polygon_area = polygon.exterior_area();
    let filter_by_area = polygon_area > 0.0;
    let min_overlap = tile_size(zoom).powi(2).min(polygon_area) * MIN_OVERLAP_FRACTION;

    let mut tiles = Vec::with_capacity(range.len() as usize);
    for x in range.x_min..=range.x_max {
        for y in range.y_min..=range.y_max {
            let coord = TileCoord::new(x, y);
            if filter_by_area {
                let clipped = clip_ring(&polygon.exterior, &tile_bounds(coord, zoom));
                if ring_area(&clipped) <= min_overlap {
                    continue;
                }
            }
            tiles.push(coord);
        }
    }
    tiles
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::parse_polygon;

    fn polygon(wkt: &str) -> Polygon {
        parse_polygon(wkt).expect("test polygon should parse")
    }

    // -- generate_tiles --

    #[test]
    fn hundred_meter_square_at_zoom_20_is_three_by_three() {
        let square = polygon("POLYGON((0 0, 100 0, 100 100, 0 100, 0 0))");
        let tiles = generate_tiles(&square, 20);
        assert_eq!(tiles.len(), 9);

        let xs: Vec<i64> = tiles.iter().map(|t| t.x).collect();
        assert_eq!(xs.iter().min(), Some(&524_288));
        assert_eq!(xs.iter().max(), Some(&524_290));

        let ys: Vec<i64> = tiles.iter().map(|t| t.y).collect();
        assert_eq!(ys.iter().min(), Some(&524_285));
        assert_eq!(ys.iter().max(), Some(&524_287));
    }

    #[test]
    fn output_is_deterministic_and_sorted() {
        let square = polygon("POLYGON((0 0, 100 0, 100 100, 0 100, 0 0))");
        let first = generate_tiles(&square, 20);
        let second = generate_tiles(&square, 20);
        assert_eq!(first, second);

        let mut sorted = first.clone();
        sorted.sort();
        assert_eq!(first, sorted);
    }

    #[test]
    fn zoom_zero_is_single_world_tile() {
        let square = polygon("POLYGON((0 0, 100 0, 100 100, 0 100, 0 0))");
        assert_eq!(generate_tiles(&square, 0), vec![TileCoord::new(0, 0)]);
    }

    #[test]
    fn degenerate_point_polygon_yields_one_tile() {
        let point = polygon("POLYGON((10 10, 10 10, 10 10, 10 10))");
        let tiles = generate_tiles(&point, 20);
        assert_eq!(tiles, vec![TileCoord::new(524_288, 524_287)]);
    }

    #[test]
    fn degenerate_line_polygon_keeps_bbox_tiles() {
        let line = polygon("POLYGON((0 10, 100 10, 0 10, 0 10))");
        let tiles = generate_tiles(&line, 20);
        assert_eq!(tiles.len(), 3);
        assert!(tiles.iter().all(|t| t.y == 524_287));
    }

    #[test]
    fn triangle_drops_tiles_outside_hypotenuse() {
        // Right triangle over the 3x3 block: tiles above the hypotenuse
        // touch it at a corner or not at all.
        let size = tile_size(20);
        let edge = 3.0 * size;
        let wkt = format!("POLYGON((0 0, {edge} 0, 0 {edge}, 0 0))");
        let tiles = generate_tiles(&polygon(&wkt), 20);
        assert_eq!(tiles.len(), 6);
        // North-east corner tile of the block is excluded.
        assert!(!tiles.contains(&TileCoord::new(524_290, 524_285)));
    }

    #[test]
    fn coordinates_beyond_world_clamp_to_edges() {
        let huge = polygon("POLYGON((-3e7 -3e7, 3e7 -3e7, 3e7 3e7, -3e7 3e7, -3e7 -3e7))");
        let tiles = generate_tiles(&huge, 1);
        assert_eq!(
            tiles,
            vec![
                TileCoord::new(0, 0),
                TileCoord::new(0, 1),
                TileCoord::new(1, 0),
                TileCoord::new(1, 1),
            ]
        );
    }

    // -- tile_range / tile_bounds --

    #[test]
    fn grid_aligned_edges_do_not_claim_neighbours() {
        let size = tile_size(20);
        let bbox = BoundingBox {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 2.0 * size,
            max_y: 2.0 * size,
        };
        let range = tile_range(&bbox, 20);
        assert_eq!(range.len(), 4);
    }

    #[test]
    fn tile_bounds_round_trip_through_range() {
        let coord = TileCoord::new(524_289, 524_286);
        let bounds = tile_bounds(coord, 20);
        let range = tile_range(&bounds, 20);
        assert_eq!((range.x_min, range.x_max), (coord.x, coord.x));
        assert_eq!((range.y_min, range.y_max), (coord.y, coord.y));
    }

    #[test]
    fn upper_bound_matches_bbox_range() {
        let square = polygon("POLYGON((0 0, 100 0, 100 100, 0 100, 0 0))");
        assert_eq!(count_tiles_upper_bound(&square, 20), 9);
        assert_eq!(count_tiles_upper_bound(&square, 0), 1);
    }
}
