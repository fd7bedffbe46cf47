//! Error types for CSG operations.

use thiserror::Error;

use crate::csg::{BooleanOp, Step};

/// Result type for CSG operations.
pub type Result<T> = std::result::Result<T, CsgError>;

/// Errors that can occur while building, clipping or combining BSP trees.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CsgError {
    /// A polygon is malformed (too few vertices, non-finite data, degenerate plane).
    #[error("invalid polygon: {reason}")]
    InvalidPolygon { reason: String },

    /// Splitting produced a signed distance that is NaN or infinite.
    #[error("non-finite signed distance {distance} while splitting polygon")]
    NonFiniteDistance { distance: f64 },

    /// A failure inside `clip_polygons`, tagged with the depth where it happened.
    #[error("clip failed at depth {depth}")]
    Clip {
        depth: usize,
        #[source]
        source: Box<CsgError>,
    },

    /// A failure inside `build`.
    #[error("build failed")]
    Build {
        #[source]
        source: Box<CsgError>,
    },

    /// A sub-step of a composed boolean operation failed.
    #[error("{op} failed at step {index} ({step})")]
    Step {
        op: BooleanOp,
        step: Step,
        index: usize,
        #[source]
        source: Box<CsgError>,
    },
}

impl CsgError {
    pub(crate) fn invalid_polygon(reason: impl Into<String>) -> Self {
        Self::InvalidPolygon {
            reason: reason.into(),
        }
    }

    /// Returns the innermost error in a chain of tagged failures.
    pub fn root_cause(&self) -> &CsgError {
        let mut current = self;
        loop {
            match current {
                Self::Clip { source, .. } | Self::Build { source } | Self::Step { source, .. } => {
                    current = &**source;
                }
                _ => return current,
            }
        }
    }
}
