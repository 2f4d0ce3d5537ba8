// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Operator entry points and grid configuration lifecycle

use crate::bounds::{self, FrameAttributes, ObjectFrameSpec};
use crate::config::GridConfig;
use crate::crop::{self, CropResult, RenderResolution};
use crate::error::{OrthocropError, Precondition, Result};
use crate::host::{CameraState, Host, ObjectView};
use log::{debug, info, warn};
use nalgebra::Point3;
use serde::Serialize;

/// Outcome of [`Orthocrop::set_width_and_height`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extraction {
    pub frame: ObjectFrameSpec,
    /// World point the origin was moved to. `None` when recentering is
    /// disabled or the object's world matrix is singular.
    pub origin: Option<Point3<f64>>,
}

/// What the property panel shows for the current selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PanelStatus {
    Ready {
        grid: GridConfig,
        margin: Option<u32>,
        frame: Option<ObjectFrameSpec>,
    },
    NeedsOrthographicCamera,
}

/// Owns the scene-wide [`GridConfig`] between `initialize` and `teardown`
#[derive(Debug, Default)]
pub struct Orthocrop {
    config: Option<GridConfig>,
}

impl Orthocrop {
    /// Create an uninitialized instance
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Validate and install the grid configuration
    pub fn initialize(&mut self, config: GridConfig) -> Result<()> {
        config.validate()?;
        info!(
            "orthocrop initialized: block size {}, reference ortho scale {}",
            config.block_size, config.reference_ortho_scale
        );
        self.config = Some(config);
        Ok(())
    }

    /// Drop the grid configuration; operators fail until re-initialized
    pub fn teardown(&mut self) -> Option<GridConfig> {
        info!("orthocrop torn down");
        self.config.take()
    }

    pub fn is_initialized(&self) -> bool {
        self.config.is_some()
    }

    pub fn config(&self) -> Result<&GridConfig> {
        self.config
            .as_ref()
            .ok_or(OrthocropError::Precondition(Precondition::NotInitialized))
    }

    /// Replace settings on a running instance
    pub fn update_config(&mut self, config: GridConfig) -> Result<()> {
        self.config()?;
        config.validate()?;
        self.config = Some(config);
        Ok(())
    }

    /// Operators are available while an object is selected
    pub fn poll<H: Host>(&self, host: &H) -> bool {
        host.active_object().is_some()
    }

    /// Stamp Width/Height on the active object and optionally move its
    /// origin to the center of its bounds.
    pub fn set_width_and_height<H: Host>(&self, host: &mut H) -> Result<Extraction> {
        let config = self.config()?;

        let (name, attributes, frame, origin) = {
            let object = active_object(host)?;
            let extent = bounds::planar_extent(object.shape).ok_or_else(|| {
                OrthocropError::EmptyShape {
                    object: object.name.to_string(),
                }
            })?;
            debug!(
                "'{}': {} points, extent x [{}, {}] z [{}, {}]",
                object.name,
                object.shape.point_count(),
                extent.min_x,
                extent.max_x,
                extent.min_z,
                extent.max_z
            );

            let frame = bounds::frame_from_extent(
                &extent,
                config.block_size,
                object.attributes,
                config.overwrite_on_extract,
            );
            let origin = if config.set_origin_on_extract {
                let target = bounds::origin_target(&extent, object.matrix_world);
                if target.is_none() {
                    warn!(
                        "'{}': world matrix is not invertible, origin left in place",
                        object.name
                    );
                }
                target
            } else {
                None
            };
            (object.name.to_string(), *object.attributes, frame, origin)
        };

        host.write_frame_attributes(FrameAttributes {
            width: Some(frame.width_blocks),
            height: Some(frame.height_blocks),
            margin: attributes.margin,
        });
        if let Some(target) = origin {
            host.set_cursor_location(target);
            host.set_origin_to_cursor();
        }

        info!(
            "'{}': width {} height {} blocks",
            name, frame.width_blocks, frame.height_blocks
        );
        Ok(Extraction { frame, origin })
    }

    /// Move the scene camera and set the render border so the render is
    /// cropped to the active object.
    pub fn crop_to_active<H: Host>(&self, host: &mut H) -> Result<CropResult> {
        let config = self.config()?;

        let (name, result) = {
            let object = active_object(host)?;
            let frame = object.attributes.frame_spec().ok_or_else(|| {
                Precondition::FrameSizeMissing {
                    object: object.name.to_string(),
                }
            })?;
            let camera = host.scene_camera().ok_or(Precondition::NoSceneCamera)?;
            let ortho_scale = orthographic_scale(&camera)?;
            let render = host.render_settings();

            let result = crop::compute_crop(
                &frame,
                &object.location(),
                &camera.location,
                ortho_scale,
                config,
                RenderResolution::new(render.resolution_x, render.resolution_y),
            )?;
            (object.name.to_string(), result)
        };

        host.apply_crop(&result);
        info!(
            "cropped to '{}': border x [{:.4}, 1] y [{:.4}, 1] at {}%",
            name, result.border.min_x, result.border.min_y, result.resolution_percentage
        );
        Ok(result)
    }

    /// Panel contents for the current host state
    pub fn panel_status<H: Host>(&self, host: &H) -> Result<PanelStatus> {
        let grid = self.config()?.clone();
        let orthographic = host
            .scene_camera()
            .is_some_and(|camera| camera.projection.ortho_scale().is_some());
        if !orthographic {
            return Ok(PanelStatus::NeedsOrthographicCamera);
        }

        let object = host.active_object();
        Ok(PanelStatus::Ready {
            grid,
            margin: object.map(|o| o.attributes.margin),
            frame: object.and_then(|o| o.attributes.frame_spec()),
        })
    }
}

fn active_object<H: Host>(host: &H) -> Result<ObjectView<'_>> {
    host.active_object()
        .ok_or(OrthocropError::Precondition(Precondition::NoActiveObject))
}

fn orthographic_scale(camera: &CameraState) -> Result<f64> {
    camera
        .projection
        .ortho_scale()
        .ok_or(OrthocropError::Precondition(Precondition::CameraNotOrthographic))
}
