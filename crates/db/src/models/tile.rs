//! Tile entity models and DTOs.

use osmtm_core::tiling::TileCoord;
use osmtm_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `tiles` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Tile {
    pub id: DbId,
    pub job_id: DbId,
    pub x: i64,
    pub y: i64,
    /// Number of users currently working this tile.
    pub checkin: i32,
}

/// DTO for inserting a tile under a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewTile {
    pub x: i64,
    pub y: i64,
    pub checkin: i32,
}

impl NewTile {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y, checkin: 0 }
    }
}

impl From<TileCoord> for NewTile {
    fn from(coord: TileCoord) -> Self {
        Self::new(coord.x, coord.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tile_has_no_checkins() {
        let tile = NewTile::new(1, 2);
        assert_eq!(tile.x, 1);
        assert_eq!(tile.y, 2);
        assert_eq!(tile.checkin, 0);
    }

    #[test]
    fn from_coord() {
        let tile = NewTile::from(TileCoord::new(7, 9));
        assert_eq!(tile, NewTile::new(7, 9));
    }
}
