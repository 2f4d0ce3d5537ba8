// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! In-memory scene document implementing [`Host`]
//!
//! Used by the command line tool, which reads and writes scenes as JSON, and
//! by the tests.

use crate::bounds::FrameAttributes;
use crate::crop::CropResult;
use crate::geometry::ShapeRepresentation;
use crate::host::{CameraState, Host, ObjectView, RenderSettings};
use anyhow::{Context, Result};
use log::{debug, warn};
use nalgebra::{Matrix4, Point3};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn identity() -> Matrix4<f64> {
    Matrix4::identity()
}

fn origin() -> Point3<f64> {
    Point3::origin()
}

/// An object with measurable geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub shape: ShapeRepresentation,
    #[serde(default = "identity")]
    pub matrix_world: Matrix4<f64>,
    #[serde(default)]
    pub attributes: FrameAttributes,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, shape: ShapeRepresentation) -> Self {
        Self {
            name: name.into(),
            shape,
            matrix_world: Matrix4::identity(),
            attributes: FrameAttributes::default(),
        }
    }

    pub fn with_matrix_world(mut self, matrix_world: Matrix4<f64>) -> Self {
        self.matrix_world = matrix_world;
        self
    }

    pub fn location(&self) -> Point3<f64> {
        self.view().location()
    }

    fn view(&self) -> ObjectView<'_> {
        ObjectView {
            name: &self.name,
            shape: &self.shape,
            matrix_world: &self.matrix_world,
            attributes: &self.attributes,
        }
    }

    /// Put the origin at `target` (world space) while keeping the geometry
    /// where it is in the world.
    pub fn set_origin(&mut self, target: &Point3<f64>) {
        let Some(inverse) = self.matrix_world.try_inverse() else {
            warn!("'{}': world matrix is not invertible, origin left in place", self.name);
            return;
        };
        let local = inverse.transform_point(target);
        let shift = local.coords;

        self.shape.translate(&-shift);
        let world_shift = self.matrix_world.transform_vector(&shift);
        self.matrix_world[(0, 3)] += world_shift.x;
        self.matrix_world[(1, 3)] += world_shift.y;
        self.matrix_world[(2, 3)] += world_shift.z;
    }
}

/// A scene: objects, the scene camera, render settings and the 3D cursor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub objects: Vec<SceneObject>,
    /// Name of the active object
    #[serde(default)]
    pub active: Option<String>,
    #[serde(default)]
    pub camera: Option<CameraState>,
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default = "origin")]
    pub cursor: Point3<f64>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            active: None,
            camera: None,
            render: RenderSettings::default(),
            cursor: Point3::origin(),
        }
    }
}

impl Scene {
    /// Load a scene from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read scene file: {:?}", path.as_ref()))?;
        let scene = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse scene file: {:?}", path.as_ref()))?;
        Ok(scene)
    }

    /// Save the scene as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize scene")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write scene file: {:?}", path.as_ref()))?;
        Ok(())
    }

    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    pub fn object(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    fn active_mut(&mut self) -> Option<&mut SceneObject> {
        let name = self.active.as_deref()?;
        self.objects.iter_mut().find(|o| o.name == name)
    }
}

impl Host for Scene {
    fn active_object(&self) -> Option<ObjectView<'_>> {
        self.object(self.active.as_deref()?).map(SceneObject::view)
    }

    fn scene_camera(&self) -> Option<CameraState> {
        self.camera
    }

    fn render_settings(&self) -> RenderSettings {
        self.render
    }

    fn cursor_location(&self) -> Point3<f64> {
        self.cursor
    }

    fn write_frame_attributes(&mut self, attributes: FrameAttributes) {
        if let Some(object) = self.active_mut() {
            object.attributes = attributes;
        }
    }

    fn apply_crop(&mut self, crop: &CropResult) {
        let Some(camera) = self.camera.as_mut() else {
            return;
        };
        camera.location.x = crop.camera_location.x;
        camera.location.z = crop.camera_location.z;
        self.render.resolution_percentage = crop.resolution_percentage;
        self.render.border = crop.border;
    }

    fn set_cursor_location(&mut self, location: Point3<f64>) {
        self.cursor = location;
    }

    fn set_origin_to_cursor(&mut self) {
        let cursor = self.cursor;
        if let Some(object) = self.active_mut() {
            debug!("'{}': origin -> {}", object.name, cursor);
            object.set_origin(&cursor);
        }
    }
}
