/// Why a single footprint was dropped from a build. Never fatal to the batch.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("invalid geometry: {reason}")]
    InvalidGeometry { reason: String },
    #[error("invalid height: {height} (must be positive and finite)")]
    InvalidHeight { height: f64 },
}

impl GeometryError {
    pub fn geometry(reason: impl Into<String>) -> Self {
        GeometryError::InvalidGeometry {
            reason: reason.into(),
        }
    }
}

/// Failure of a whole build call.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error("coordinate scale must be positive and finite, got {0}")]
    InvalidScale(f64),
}
