#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Loader turning Tiled JSON maps into the engine's layered tile grid.
//!
//! Only orthogonal, finite maps with embedded tilesets and CSV-style layer
//! data are accepted. Tiled stores rows top-down and objects with a top-left
//! origin; both are flipped so that the resulting grid grows upwards.

mod format;

use std::{collections::HashMap, fs, path::Path};

use log::{debug, info};
use maze_escape_core::{
    EventRegion, GridError, Layer, ObjectLayer, Rect, Tile, TileGrid, TileLayer,
};
use thiserror::Error;

use crate::format::{LayerData, LayerFile, MapFile, ObjectGroupFile, TileLayerFile, TilesetFile};

const FLIP_FLAGS_MASK: u32 = 0x0FFF_FFFF;

/// Errors raised while loading a Tiled map.
#[derive(Debug, Error)]
pub enum MapError {
    /// The map file could not be read.
    #[error("failed to read map file {path}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid Tiled JSON.
    #[error("failed to parse map json")]
    Json(#[from] serde_json::Error),
    /// Only orthogonal maps are supported.
    #[error("unsupported map orientation `{0}`")]
    UnsupportedOrientation(String),
    /// Infinite, chunked maps are not supported.
    #[error("infinite maps are not supported")]
    InfiniteMap,
    /// Tilesets stored in separate files are not supported.
    #[error("external tileset `{0}` is not supported; embed it in the map")]
    ExternalTileset(String),
    /// Compressed or base64 layer data is not supported.
    #[error("layer `{layer}` uses unsupported `{encoding}` encoding ({bytes} bytes)")]
    UnsupportedEncoding {
        /// Name of the offending layer.
        layer: String,
        /// Encoding declared by the layer.
        encoding: String,
        /// Size of the encoded payload.
        bytes: usize,
    },
    /// A cell references a global tile id no tileset covers.
    #[error("layer `{layer}` references unknown tile gid {gid}")]
    UnknownTile {
        /// Name of the offending layer.
        layer: String,
        /// Global tile identifier, flip flags removed.
        gid: u32,
    },
    /// A tileset's local tile id does not fit in the global id space.
    #[error("tile {id} of the tileset starting at gid {first_gid} overflows the gid range")]
    TileIdOverflow {
        /// First global id of the tileset.
        first_gid: u32,
        /// Local id of the offending tile.
        id: u32,
    },
    /// The layer data did not form a valid grid.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Reads and parses the Tiled JSON map at `path`.
///
/// # Errors
///
/// Returns [`MapError`] when the file cannot be read or does not describe a
/// supported map.
pub fn load_map(path: &Path) -> Result<TileGrid, MapError> {
    let contents = fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let grid = parse_map(&contents)?;
    info!(
        "loaded map {} with {} layers",
        path.display(),
        grid.layers().len()
    );
    Ok(grid)
}

/// Parses a Tiled JSON document into a [`TileGrid`].
///
/// # Errors
///
/// Returns [`MapError`] when the document is malformed or uses features the
/// loader does not support.
pub fn parse_map(json: &str) -> Result<TileGrid, MapError> {
    let map: MapFile = serde_json::from_str(json)?;
    if map.orientation != "orthogonal" {
        return Err(MapError::UnsupportedOrientation(map.orientation));
    }
    if map.infinite {
        return Err(MapError::InfiniteMap);
    }

    let tilesets = Tilesets::new(&map.tilesets)?;
    let map_height = map.height as f32 * map.tile_height;

    let mut layers = Vec::with_capacity(map.layers.len());
    for layer in map.layers {
        match layer {
            LayerFile::Tiles(tiles) => layers.push(Layer::Tiles(convert_tile_layer(
                tiles,
                (map.tile_width, map.tile_height),
                &tilesets,
            )?)),
            LayerFile::Objects(objects) => {
                layers.push(Layer::Objects(convert_object_group(objects, map_height)));
            }
            LayerFile::Unsupported => debug!("skipping unsupported layer type"),
        }
    }

    Ok(TileGrid::new(layers))
}

/// Embedded tilesets ordered by first global id.
struct Tilesets {
    first_gids: Vec<u32>,
    collidable: HashMap<u32, bool>,
}

impl Tilesets {
    fn new(files: &[TilesetFile]) -> Result<Self, MapError> {
        let mut first_gids = Vec::with_capacity(files.len());
        let mut collidable = HashMap::new();
        for tileset in files {
            if let Some(source) = &tileset.source {
                return Err(MapError::ExternalTileset(source.clone()));
            }
            first_gids.push(tileset.first_gid);
            for tile in &tileset.tiles {
                let gid = tileset.first_gid.checked_add(tile.id).ok_or(
                    MapError::TileIdOverflow {
                        first_gid: tileset.first_gid,
                        id: tile.id,
                    },
                )?;
                let _ = collidable.insert(gid, format::is_collidable(&tile.properties));
            }
        }
        first_gids.sort_unstable();
        Ok(Self {
            first_gids,
            collidable,
        })
    }

    /// Resolves a global id to a tile, using the tileset with the largest first id not above it.
    fn tile(&self, gid: u32) -> Option<Tile> {
        let first_gid = self
            .first_gids
            .iter()
            .rev()
            .find(|first| **first <= gid)?;
        let collidable = self.collidable.get(&gid).copied().unwrap_or(false);
        Some(Tile::new(gid - first_gid, collidable))
    }
}

fn convert_tile_layer(
    layer: TileLayerFile,
    tile_size: (f32, f32),
    tilesets: &Tilesets,
) -> Result<TileLayer, MapError> {
    let data = match layer.data {
        LayerData::Cells(data) => data,
        LayerData::Encoded(payload) => {
            return Err(MapError::UnsupportedEncoding {
                layer: layer.name,
                encoding: layer.encoding.unwrap_or_else(|| "unknown".to_owned()),
                bytes: payload.len(),
            });
        }
    };

    let columns = usize::try_from(layer.width).unwrap_or(usize::MAX);
    let mut cells = Vec::with_capacity(data.len());
    // Tiled lists rows top-down; the grid stores them bottom-up.
    for row in data.chunks(columns.max(1)).rev() {
        for &raw in row {
            let gid = raw & FLIP_FLAGS_MASK;
            if gid == 0 {
                cells.push(None);
                continue;
            }
            let tile = tilesets.tile(gid).ok_or_else(|| MapError::UnknownTile {
                layer: layer.name.clone(),
                gid,
            })?;
            cells.push(Some(tile));
        }
    }

    let collidable = format::is_collidable(&layer.properties);
    debug!(
        "tile layer `{}`: {}x{} cells, layer collidable: {collidable}",
        layer.name, layer.width, layer.height
    );
    Ok(TileLayer::new(layer.name, (layer.width, layer.height), tile_size, cells)?
        .with_collidable(collidable))
}

fn convert_object_group(group: ObjectGroupFile, map_height: f32) -> ObjectLayer {
    let regions = group
        .objects
        .into_iter()
        .map(|object| {
            let y = map_height - object.y - object.height;
            EventRegion::new(
                object.name,
                Rect::new(object.x, y, object.width, object.height),
            )
        })
        .collect();
    ObjectLayer::new(group.name, regions)
}
