use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Downloadable model layers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Buildings,
    Terrain,
    Vegetation,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    #[default]
    Stl,
    Obj,
    Gltf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    NotFound { what: &'static str, value: String },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::NotFound { what, value } => {
                write!(f, "unsupported model {what}: {value:?}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [
        ModelKind::Buildings,
        ModelKind::Terrain,
        ModelKind::Vegetation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ModelKind::Buildings => "buildings",
            ModelKind::Terrain => "terrain",
            ModelKind::Vegetation => "vegetation",
        }
    }
}

impl ModelFormat {
    pub const ALL: [ModelFormat; 3] = [ModelFormat::Stl, ModelFormat::Obj, ModelFormat::Gltf];

    pub fn extension(self) -> &'static str {
        match self {
            ModelFormat::Stl => "stl",
            ModelFormat::Obj => "obj",
            ModelFormat::Gltf => "gltf",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ModelFormat::Stl => "model/stl",
            ModelFormat::Obj => "model/obj",
            ModelFormat::Gltf => "model/gltf+json",
        }
    }
}

impl FromStr for ModelKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ModelError::NotFound {
                what: "type",
                value: s.to_string(),
            })
    }
}

impl FromStr for ModelFormat {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelFormat::ALL
            .into_iter()
            .find(|f| f.extension() == s)
            .ok_or_else(|| ModelError::NotFound {
                what: "format",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Parses a `(type, format)` download request; a missing format means STL.
pub fn parse_model_request(
    kind: &str,
    format: Option<&str>,
) -> Result<(ModelKind, ModelFormat), ModelError> {
    let kind = kind.parse()?;
    let format = match format {
        Some(f) => f.parse()?,
        None => ModelFormat::default(),
    };
    Ok((kind, format))
}

/// Client-side file name for a downloaded model, e.g. `terrain_model.obj`.
pub fn download_file_name(kind: ModelKind, format: ModelFormat) -> String {
    format!("{kind}_model.{format}")
}
