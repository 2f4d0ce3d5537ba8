// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Camera placement and render border for cropping to an object
//!
//! The crop window is anchored to the top right corner of the camera frame:
//! the border always ends at `(1, 1)` and the camera is moved so that the
//! object's top right corner, plus half the margin, lands there.

use crate::bounds::ObjectFrameSpec;
use crate::config::GridConfig;
use crate::error::{require_positive, Result};
use crate::utils::{in_plane, with_in_plane};
use log::{debug, warn};
use nalgebra::{Point3, Vector2};
use serde::{Deserialize, Serialize};

/// Render resolution in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderResolution {
    pub x: u32,
    pub y: u32,
}

impl RenderResolution {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Normalized sub-rectangle of the render frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderBorder {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl RenderBorder {
    /// The whole frame
    pub fn full() -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 1.0,
            max_y: 1.0,
        }
    }
}

impl Default for RenderBorder {
    fn default() -> Self {
        Self::full()
    }
}

/// How many blocks the camera frame spans along each in-plane axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpan {
    pub blocks_x: f64,
    pub blocks_y: f64,
}

impl GridSpan {
    /// The wider render dimension spans the full ortho scale and the other
    /// one is shortened by the aspect ratio. Square frames take the
    /// vertical branch.
    pub fn from_resolution(resolution: RenderResolution, ortho_scale: f64, block_size: f64) -> Self {
        let (res_x, res_y) = (f64::from(resolution.x), f64::from(resolution.y));
        let full = ortho_scale / block_size;

        if res_y < res_x {
            let aspect = res_y / res_x;
            Self {
                blocks_x: full,
                blocks_y: aspect * full,
            }
        } else {
            let aspect = res_x / res_y;
            Self {
                blocks_x: aspect * full,
                blocks_y: full,
            }
        }
    }

    /// Size of one block in normalized frame units
    pub fn block_fraction(&self) -> Vector2<f64> {
        Vector2::new(1.0 / self.blocks_x, 1.0 / self.blocks_y)
    }
}

/// Everything a crop writes back to the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropResult {
    pub camera_location: Point3<f64>,
    pub border: RenderBorder,
    pub resolution_percentage: f64,
    pub span: GridSpan,
}

/// Compute the camera location, render border and resolution percentage
/// that crop the render to `frame`.
///
/// The camera is displaced from `camera_position` by the object offset,
/// so only X and Z change; Y (depth) is carried over.
pub fn compute_crop(
    frame: &ObjectFrameSpec,
    object_position: &Point3<f64>,
    camera_position: &Point3<f64>,
    ortho_scale: f64,
    grid: &GridConfig,
    resolution: RenderResolution,
) -> Result<CropResult> {
    grid.validate()?;
    require_positive("ortho_scale", ortho_scale)?;
    require_positive("resolution_x", f64::from(resolution.x))?;
    require_positive("resolution_y", f64::from(resolution.y))?;

    let block_size = grid.block_size;
    let resolution_factor = ortho_scale / grid.reference_ortho_scale;
    let span = GridSpan::from_resolution(resolution, ortho_scale, block_size);

    let object_plane = in_plane(object_position);
    let camera_plane = in_plane(camera_position);
    let size = Vector2::new(f64::from(frame.width_blocks), f64::from(frame.height_blocks));
    let margin = f64::from(frame.margin_blocks);

    let to_object = object_plane - camera_plane;
    let offset = -Vector2::new(span.blocks_x / 2.0, span.blocks_y / 2.0) + size / 2.0;
    let mut plane = camera_plane + to_object + offset * block_size;
    plane += Vector2::new(margin / 2.0, margin / 2.0) * block_size;

    let block = span.block_fraction();
    let covered = block * margin + size.component_mul(&block);
    if covered.x > 1.0 || covered.y > 1.0 {
        warn!(
            "crop window of {}x{} blocks (+{} margin) exceeds the camera frame of {:.2}x{:.2} blocks",
            frame.width_blocks, frame.height_blocks, frame.margin_blocks, span.blocks_x, span.blocks_y
        );
    }

    let border = RenderBorder {
        min_x: (1.0 - covered.x).clamp(0.0, 1.0),
        min_y: (1.0 - covered.y).clamp(0.0, 1.0),
        max_x: 1.0,
        max_y: 1.0,
    };

    let result = CropResult {
        camera_location: with_in_plane(camera_position, &plane),
        border,
        resolution_percentage: 100.0 * resolution_factor,
        span,
    };
    debug!("computed crop: {:?}", result);

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OrthocropError;
    use approx::assert_relative_eq;

    fn frame(width: u32, height: u32, margin: u32) -> ObjectFrameSpec {
        ObjectFrameSpec {
            width_blocks: width,
            height_blocks: height,
            margin_blocks: margin,
        }
    }

    #[test]
    fn test_square_resolution_span() {
        let span = GridSpan::from_resolution(RenderResolution::new(1920, 1920), 6.0, 0.1);
        assert_relative_eq!(span.blocks_x, 60.0, epsilon = 1e-9);
        assert_relative_eq!(span.blocks_y, 60.0, epsilon = 1e-9);
    }

    #[test]
    fn test_landscape_span() {
        let span = GridSpan::from_resolution(RenderResolution::new(1920, 1080), 6.0, 0.1);
        assert_relative_eq!(span.blocks_x, 60.0, epsilon = 1e-9);
        assert_relative_eq!(span.blocks_y, 33.75, epsilon = 1e-9);
    }

    #[test]
    fn test_portrait_span() {
        let span = GridSpan::from_resolution(RenderResolution::new(1080, 1920), 6.0, 0.1);
        assert_relative_eq!(span.blocks_x, 33.75, epsilon = 1e-9);
        assert_relative_eq!(span.blocks_y, 60.0, epsilon = 1e-9);
    }

    #[test]
    fn test_border_with_margin() {
        let result = compute_crop(
            &frame(20, 10, 2),
            &Point3::origin(),
            &Point3::new(0.0, -10.0, 0.0),
            6.0,
            &GridConfig::default(),
            RenderResolution::new(1920, 1920),
        )
        .unwrap();

        assert_relative_eq!(result.border.min_x, 1.0 - 22.0 / 60.0, epsilon = 1e-9);
        assert_relative_eq!(result.border.min_y, 1.0 - 12.0 / 60.0, epsilon = 1e-9);
        assert_eq!(result.border.max_x, 1.0);
        assert_eq!(result.border.max_y, 1.0);
        assert_relative_eq!(result.resolution_percentage, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_camera_moves_in_plane_only() {
        let result = compute_crop(
            &frame(20, 10, 2),
            &Point3::new(1.0, 0.0, 2.0),
            &Point3::new(5.0, -10.0, 5.0),
            6.0,
            &GridConfig::default(),
            RenderResolution::new(1920, 1920),
        )
        .unwrap();

        // object + (-30 + 10 + 1) blocks in x, (-30 + 5 + 1) blocks in z
        assert_relative_eq!(result.camera_location.x, 1.0 - 1.9, epsilon = 1e-9);
        assert_relative_eq!(result.camera_location.z, 2.0 - 2.4, epsilon = 1e-9);
        assert_eq!(result.camera_location.y, -10.0);
    }

    #[test]
    fn test_resolution_follows_ortho_scale() {
        let result = compute_crop(
            &frame(4, 4, 0),
            &Point3::origin(),
            &Point3::origin(),
            3.0,
            &GridConfig::default(),
            RenderResolution::new(1000, 500),
        )
        .unwrap();

        assert_relative_eq!(result.resolution_percentage, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_oversized_object_clamps_border() {
        let result = compute_crop(
            &frame(100, 100, 4),
            &Point3::origin(),
            &Point3::origin(),
            6.0,
            &GridConfig::default(),
            RenderResolution::new(1920, 1080),
        )
        .unwrap();

        assert_eq!(result.border.min_x, 0.0);
        assert_eq!(result.border.min_y, 0.0);
    }

    #[test]
    fn test_rejects_zero_resolution() {
        let err = compute_crop(
            &frame(1, 1, 0),
            &Point3::origin(),
            &Point3::origin(),
            6.0,
            &GridConfig::default(),
            RenderResolution::new(0, 1080),
        );
        assert!(matches!(
            err,
            Err(OrthocropError::Configuration {
                field: "resolution_x",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_bad_grid() {
        let err = compute_crop(
            &frame(1, 1, 0),
            &Point3::origin(),
            &Point3::origin(),
            6.0,
            &GridConfig::new(0.1, 0.0),
            RenderResolution::new(1920, 1080),
        );
        assert!(matches!(err, Err(OrthocropError::Configuration { .. })));
    }
}
