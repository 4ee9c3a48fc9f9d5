//! Subset of the Tiled JSON map format read by the loader.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(crate) struct MapFile {
    #[serde(default = "orthogonal")]
    pub(crate) orientation: String,
    #[serde(default)]
    pub(crate) infinite: bool,
    pub(crate) height: u32,
    #[serde(rename = "tilewidth")]
    pub(crate) tile_width: f32,
    #[serde(rename = "tileheight")]
    pub(crate) tile_height: f32,
    #[serde(default)]
    pub(crate) layers: Vec<LayerFile>,
    #[serde(default)]
    pub(crate) tilesets: Vec<TilesetFile>,
}

fn orthogonal() -> String {
    "orthogonal".to_owned()
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub(crate) enum LayerFile {
    #[serde(rename = "tilelayer")]
    Tiles(TileLayerFile),
    #[serde(rename = "objectgroup")]
    Objects(ObjectGroupFile),
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TileLayerFile {
    pub(crate) name: String,
    pub(crate) width: u32,
    pub(crate) height: u32,
    #[serde(default)]
    pub(crate) encoding: Option<String>,
    pub(crate) data: LayerData,
    #[serde(default)]
    pub(crate) properties: Vec<PropertyFile>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum LayerData {
    Cells(Vec<u32>),
    Encoded(String),
}

#[derive(Debug, Deserialize)]
pub(crate) struct ObjectGroupFile {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) objects: Vec<ObjectFile>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ObjectFile {
    #[serde(default)]
    pub(crate) name: String,
    pub(crate) x: f32,
    pub(crate) y: f32,
    #[serde(default)]
    pub(crate) width: f32,
    #[serde(default)]
    pub(crate) height: f32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TilesetFile {
    #[serde(rename = "firstgid")]
    pub(crate) first_gid: u32,
    #[serde(default)]
    pub(crate) source: Option<String>,
    #[serde(default)]
    pub(crate) tiles: Vec<TileFile>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TileFile {
    pub(crate) id: u32,
    #[serde(default)]
    pub(crate) properties: Vec<PropertyFile>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PropertyFile {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) value: Value,
}

/// Whether a property list marks its owner as collidable.
///
/// The key alone counts; only an explicit `false` value opts out.
pub(crate) fn is_collidable(properties: &[PropertyFile]) -> bool {
    properties
        .iter()
        .any(|property| property.name == "collidable" && property.value != Value::Bool(false))
}
