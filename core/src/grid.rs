//! Layered tile-grid data model produced by map loaders.
//!
//! The grid is immutable once constructed: loaders assemble layers up front and
//! hand the finished [`TileGrid`] to the world, which only ever reads it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Rect;

/// Single tile placed into a layer cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    id: u32,
    collidable: bool,
}

impl Tile {
    /// Creates a tile with the provided tileset identifier and collision flag.
    #[must_use]
    pub const fn new(id: u32, collidable: bool) -> Self {
        Self { id, collidable }
    }

    /// Identifier of the tile within its tileset.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Whether the tile itself is tagged as collidable.
    #[must_use]
    pub const fn is_collidable(&self) -> bool {
        self.collidable
    }
}

/// Reasons a layer cannot be assembled from loader data.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GridError {
    /// The number of supplied cells does not match the declared dimensions.
    #[error("layer `{layer}` declares {expected} cells but {actual} were supplied")]
    CellCountMismatch {
        /// Name of the offending layer.
        layer: String,
        /// Cell count implied by `columns * rows`.
        expected: usize,
        /// Cell count actually supplied.
        actual: usize,
    },
    /// Tile dimensions must be finite and strictly positive.
    #[error("layer `{layer}` has invalid tile size {width}x{height}")]
    InvalidTileSize {
        /// Name of the offending layer.
        layer: String,
        /// Declared tile width.
        width: f32,
        /// Declared tile height.
        height: f32,
    },
}

/// Grid plane of uniformly sized tiles.
///
/// Cells are stored row-major with row zero at the bottom of the map so that
/// row indices grow with world-space y.
#[derive(Clone, Debug, PartialEq)]
pub struct TileLayer {
    name: String,
    columns: u32,
    rows: u32,
    tile_width: f32,
    tile_height: f32,
    collidable: bool,
    cells: Vec<Option<Tile>>,
}

impl TileLayer {
    /// Assembles a layer from `columns * rows` cells.
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] when the cell count disagrees with the declared
    /// dimensions or the tile size is not a positive finite value.
    pub fn new(
        name: impl Into<String>,
        (columns, rows): (u32, u32),
        (tile_width, tile_height): (f32, f32),
        cells: Vec<Option<Tile>>,
    ) -> Result<Self, GridError> {
        let name = name.into();
        if !(tile_width.is_finite() && tile_height.is_finite())
            || tile_width <= 0.0
            || tile_height <= 0.0
        {
            return Err(GridError::InvalidTileSize {
                layer: name,
                width: tile_width,
                height: tile_height,
            });
        }

        let expected = usize::try_from(u64::from(columns) * u64::from(rows)).unwrap_or(usize::MAX);
        if cells.len() != expected {
            return Err(GridError::CellCountMismatch {
                layer: name,
                expected,
                actual: cells.len(),
            });
        }

        Ok(Self {
            name,
            columns,
            rows,
            tile_width,
            tile_height,
            collidable: false,
            cells,
        })
    }

    /// Marks every tile of the layer as collidable, regardless of per-tile flags.
    #[must_use]
    pub fn with_collidable(mut self, collidable: bool) -> Self {
        self.collidable = collidable;
        self
    }

    /// Name assigned to the layer by the map author.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Width of a single tile in world units.
    #[must_use]
    pub const fn tile_width(&self) -> f32 {
        self.tile_width
    }

    /// Height of a single tile in world units.
    #[must_use]
    pub const fn tile_height(&self) -> f32 {
        self.tile_height
    }

    /// Whether the layer-wide collision flag is set.
    #[must_use]
    pub const fn is_collidable(&self) -> bool {
        self.collidable
    }

    /// Returns the tile stored at the provided cell, if any.
    ///
    /// Cells outside the layer report `None`.
    #[must_use]
    pub fn tile(&self, column: u32, row: u32) -> Option<Tile> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        let row = usize::try_from(row).ok()?;
        let column = usize::try_from(column).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        self.cells.get(row * width + column).copied().flatten()
    }
}

/// Named rectangular region authored on an object layer.
#[derive(Clone, Debug, PartialEq)]
pub struct EventRegion {
    name: String,
    bounds: Rect,
}

impl EventRegion {
    /// Creates a named region.
    #[must_use]
    pub fn new(name: impl Into<String>, bounds: Rect) -> Self {
        Self {
            name: name.into(),
            bounds,
        }
    }

    /// Name used to look the region up.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Area covered by the region in world units.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// Layer carrying free-form regions rather than a tile grid.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectLayer {
    name: String,
    regions: Vec<EventRegion>,
}

impl ObjectLayer {
    /// Creates an object layer from its regions.
    #[must_use]
    pub fn new(name: impl Into<String>, regions: Vec<EventRegion>) -> Self {
        Self {
            name: name.into(),
            regions,
        }
    }

    /// Name assigned to the layer by the map author.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Regions authored on the layer in file order.
    #[must_use]
    pub fn regions(&self) -> &[EventRegion] {
        &self.regions
    }
}

/// Single layer of a [`TileGrid`].
#[derive(Clone, Debug, PartialEq)]
pub enum Layer {
    /// Grid of tiles that participates in collision.
    Tiles(TileLayer),
    /// Grid-less layer of named regions.
    Objects(ObjectLayer),
}

impl Layer {
    /// Name assigned to the layer by the map author.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Tiles(layer) => layer.name(),
            Self::Objects(layer) => layer.name(),
        }
    }
}

/// Ordered stack of layers forming a level.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TileGrid {
    layers: Vec<Layer>,
}

impl TileGrid {
    /// Creates a grid from layers ordered bottom to top.
    #[must_use]
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    /// All layers in authoring order.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Iterator over the tile layers, skipping object layers.
    pub fn tile_layers(&self) -> impl Iterator<Item = &TileLayer> {
        self.layers.iter().filter_map(|layer| match layer {
            Layer::Tiles(tiles) => Some(tiles),
            Layer::Objects(_) => None,
        })
    }

    /// Looks up the first region with the provided name across object layers.
    #[must_use]
    pub fn region(&self, name: &str) -> Option<&EventRegion> {
        self.layers
            .iter()
            .filter_map(|layer| match layer {
                Layer::Objects(objects) => Some(objects),
                Layer::Tiles(_) => None,
            })
            .flat_map(|objects| objects.regions().iter())
            .find(|region| region.name() == name)
    }

    /// Extent of the widest tile layer in world units as `(width, height)`.
    #[must_use]
    pub fn extent(&self) -> (f32, f32) {
        self.tile_layers().fold((0.0_f32, 0.0_f32), |(width, height), layer| {
            (
                width.max(layer.columns() as f32 * layer.tile_width()),
                height.max(layer.rows() as f32 * layer.tile_height()),
            )
        })
    }
}
