//! Point-in-world collision queries against the layered tile grid.

use maze_escape_core::{Footprint, Position, TileGrid, TileLayer, ENTITY_FOOTPRINT};

/// Read-only collision oracle wrapping an immutable [`TileGrid`].
///
/// A query samples the centre of an entity's footprint rather than its
/// corner, so collision is symmetric around the entity. A point is blocked
/// when any tile layer holds a tile there that is collidable on its own or
/// lives on a layer flagged collidable as a whole. Cells that do not exist
/// (object layers, negative indices, indices past the layer edge) never
/// block.
#[derive(Clone, Debug)]
pub struct TileCollisionMap {
    grid: TileGrid,
}

impl TileCollisionMap {
    /// Wraps a loaded grid.
    #[must_use]
    pub fn new(grid: TileGrid) -> Self {
        Self { grid }
    }

    /// Provides read-only access to the wrapped grid.
    #[must_use]
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Reports whether an entity with `footprint` anchored at `position` collides.
    #[must_use]
    pub fn is_blocked(&self, position: Position, footprint: Footprint) -> bool {
        let half = footprint.half();
        let sample_x = position.x() + half;
        let sample_y = position.y() + half;
        self.grid
            .tile_layers()
            .any(|layer| layer_blocks(layer, sample_x, sample_y))
    }

    /// Reports whether a standard-sized entity anchored at `(x, y)` collides.
    #[must_use]
    pub fn is_cell_blocked(&self, x: f32, y: f32) -> bool {
        self.is_blocked(Position::new(x, y), ENTITY_FOOTPRINT)
    }
}

fn layer_blocks(layer: &TileLayer, sample_x: f32, sample_y: f32) -> bool {
    let (Some(column), Some(row)) = (
        tile_index(sample_x, layer.tile_width()),
        tile_index(sample_y, layer.tile_height()),
    ) else {
        return false;
    };

    layer
        .tile(column, row)
        .map_or(false, |tile| tile.is_collidable() || layer.is_collidable())
}

fn tile_index(sample: f32, tile_size: f32) -> Option<u32> {
    let index = (sample / tile_size).floor();
    if !index.is_finite() || index < 0.0 {
        return None;
    }
    // Float-to-int casts saturate; anything past the layer edge is rejected by `TileLayer::tile`.
    Some(index as u32)
}
