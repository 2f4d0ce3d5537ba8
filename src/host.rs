// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Query and mutation surface provided by the host application

use crate::bounds::FrameAttributes;
use crate::crop::{CropResult, RenderBorder};
use crate::geometry::ShapeRepresentation;
use nalgebra::{Matrix4, Point3};
use serde::{Deserialize, Serialize};

/// Camera projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Projection {
    Orthographic { scale: f64 },
    Perspective { focal_length: f64 },
}

impl Projection {
    /// Ortho scale, or `None` for a perspective camera
    pub fn ortho_scale(&self) -> Option<f64> {
        match self {
            Projection::Orthographic { scale } => Some(*scale),
            Projection::Perspective { .. } => None,
        }
    }
}

/// The scene camera as seen by the operators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub location: Point3<f64>,
    pub projection: Projection,
}

impl CameraState {
    pub fn orthographic(location: Point3<f64>, scale: f64) -> Self {
        Self {
            location,
            projection: Projection::Orthographic { scale },
        }
    }
}

/// Output render settings touched by a crop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    pub resolution_x: u32,
    pub resolution_y: u32,
    pub resolution_percentage: f64,
    pub border: RenderBorder,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            resolution_x: 1920,
            resolution_y: 1080,
            resolution_percentage: 100.0,
            border: RenderBorder::full(),
        }
    }
}

/// Borrowed view of the active object
#[derive(Debug, Clone, Copy)]
pub struct ObjectView<'a> {
    pub name: &'a str,
    pub shape: &'a ShapeRepresentation,
    pub matrix_world: &'a Matrix4<f64>,
    pub attributes: &'a FrameAttributes,
}

impl ObjectView<'_> {
    /// World-space location, the translation of the world matrix
    pub fn location(&self) -> Point3<f64> {
        Point3::new(
            self.matrix_world[(0, 3)],
            self.matrix_world[(1, 3)],
            self.matrix_world[(2, 3)],
        )
    }
}

/// Everything the operators read from and write to the host.
///
/// Writes are only issued after all validation has passed.
pub trait Host {
    fn active_object(&self) -> Option<ObjectView<'_>>;

    fn scene_camera(&self) -> Option<CameraState>;

    fn render_settings(&self) -> RenderSettings;

    fn cursor_location(&self) -> Point3<f64>;

    /// Store Width/Height (and margin) on the active object
    fn write_frame_attributes(&mut self, attributes: FrameAttributes);

    /// Write camera in-plane location, resolution percentage and border together
    fn apply_crop(&mut self, crop: &CropResult);

    fn set_cursor_location(&mut self, location: Point3<f64>);

    /// Move the active object's origin to the cursor without moving its geometry
    fn set_origin_to_cursor(&mut self);
}
