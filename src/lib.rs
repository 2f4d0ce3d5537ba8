// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Orthocrop
//!
//! Crops an orthographic camera's render to a single object, snapped to a
//! grid of fixed-size blocks. Width/Height in blocks are measured once from
//! the object's bounds on the X/Z plane; the camera location, render border
//! and resolution percentage are then derived from them.

pub mod bounds;
pub mod config;
pub mod crop;
pub mod error;
pub mod geometry;
pub mod host;
pub mod kernel;
pub mod scene;
pub mod utils;

pub use bounds::{compute_frame, FrameAttributes, ObjectFrameSpec};
pub use config::GridConfig;
pub use crop::{compute_crop, CropResult, GridSpan, RenderBorder, RenderResolution};
pub use error::{OrthocropError, Precondition};
pub use geometry::{BoundingBox, PlanarExtent, ShapeRepresentation};
pub use host::{CameraState, Host, Projection, RenderSettings};
pub use kernel::{Extraction, Orthocrop, PanelStatus};
pub use scene::{Scene, SceneObject};

/// Run extraction followed by a crop on a scene with the given settings
pub fn extract_and_crop(scene: &mut Scene, config: GridConfig) -> error::Result<CropResult> {
    let mut orthocrop = Orthocrop::new();
    orthocrop.initialize(config)?;
    orthocrop.set_width_and_height(scene)?;
    let result = orthocrop.crop_to_active(scene);
    orthocrop.teardown();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_extract_and_crop() {
        let mut scene = Scene::default();
        scene.add_object(SceneObject::new(
            "Box",
            ShapeRepresentation::solid(&BoundingBox::new(
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 1.0),
            )),
        ));
        scene.active = Some("Box".into());
        scene.camera = Some(CameraState::orthographic(Point3::new(0.0, -5.0, 0.0), 6.0));

        let result = extract_and_crop(&mut scene, GridConfig::default());
        assert!(result.is_ok());
    }
}
