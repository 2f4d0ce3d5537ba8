// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for extraction and cropping

use thiserror::Error;

/// Unmet precondition of an operator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Precondition {
    #[error("no active object is selected")]
    NoActiveObject,

    #[error("the scene has no camera")]
    NoSceneCamera,

    #[error("the scene camera needs to be in orthographic mode")]
    CameraNotOrthographic,

    #[error("object '{object}' has no Width/Height, run set width & height first")]
    FrameSizeMissing { object: String },

    #[error("orthocrop has not been initialized")]
    NotInitialized,
}

/// Errors raised by the orthocrop operators
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrthocropError {
    #[error("precondition failed: {0}")]
    Precondition(#[from] Precondition),

    #[error("object '{object}' has no points to measure")]
    EmptyShape { object: String },

    #[error("invalid configuration: {field} must be a positive number (got {value})")]
    Configuration { field: &'static str, value: f64 },
}

impl OrthocropError {
    /// Short category name used in log lines
    pub fn category(&self) -> &'static str {
        match self {
            Self::Precondition(_) => "precondition",
            Self::EmptyShape { .. } => "empty-shape",
            Self::Configuration { .. } => "configuration",
        }
    }
}

pub type Result<T> = std::result::Result<T, OrthocropError>;

/// Reject zero, negative and non-finite values for a named setting
pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(OrthocropError::Configuration { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_converts() {
        let err: OrthocropError = Precondition::NoSceneCamera.into();
        assert_eq!(err.category(), "precondition");
        assert_eq!(err.to_string(), "precondition failed: the scene has no camera");
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive("block_size", 0.1).is_ok());
        assert!(require_positive("block_size", 0.0).is_err());
        assert!(require_positive("block_size", -1.0).is_err());
        assert!(require_positive("block_size", f64::NAN).is_err());
        assert!(require_positive("block_size", f64::INFINITY).is_err());
    }
}
