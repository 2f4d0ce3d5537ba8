// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Width/Height extraction from an object's in-plane bounds

use crate::error::{require_positive, OrthocropError, Result};
use crate::geometry::{PlanarExtent, ShapeRepresentation};
use crate::utils::block_count;
use nalgebra::{Matrix4, Point3};
use serde::{Deserialize, Serialize};

/// Margin applied to objects that never had one set
pub const DEFAULT_MARGIN_BLOCKS: u32 = 2;

/// Frame attributes stored on an object.
///
/// `width` and `height` stay `None` until extraction has run once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default = "default_margin")]
    pub margin: u32,
}

fn default_margin() -> u32 {
    DEFAULT_MARGIN_BLOCKS
}

impl Default for FrameAttributes {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            margin: DEFAULT_MARGIN_BLOCKS,
        }
    }
}

impl FrameAttributes {
    /// Resolved frame, `None` while Width or Height is missing
    pub fn frame_spec(&self) -> Option<ObjectFrameSpec> {
        Some(ObjectFrameSpec {
            width_blocks: self.width?,
            height_blocks: self.height?,
            margin_blocks: self.margin,
        })
    }
}

impl From<ObjectFrameSpec> for FrameAttributes {
    fn from(spec: ObjectFrameSpec) -> Self {
        Self {
            width: Some(spec.width_blocks),
            height: Some(spec.height_blocks),
            margin: spec.margin_blocks,
        }
    }
}

/// Object size in blocks plus the margin to keep around it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectFrameSpec {
    pub width_blocks: u32,
    pub height_blocks: u32,
    pub margin_blocks: u32,
}

/// In-plane extent of a shape over all of its points
pub fn planar_extent(shape: &ShapeRepresentation) -> Option<PlanarExtent> {
    PlanarExtent::from_points(shape.extent_points())
}

/// Compute Width/Height in blocks for `shape`.
///
/// With `overwrite` unset, each of Width and Height already present in
/// `existing` is kept as is and only missing ones are computed.
pub fn compute_frame(
    object: &str,
    shape: &ShapeRepresentation,
    block_size: f64,
    existing: &FrameAttributes,
    overwrite: bool,
) -> Result<ObjectFrameSpec> {
    require_positive("block_size", block_size)?;
    let extent = planar_extent(shape).ok_or_else(|| OrthocropError::EmptyShape {
        object: object.to_string(),
    })?;
    Ok(frame_from_extent(&extent, block_size, existing, overwrite))
}

pub(crate) fn frame_from_extent(
    extent: &PlanarExtent,
    block_size: f64,
    existing: &FrameAttributes,
    overwrite: bool,
) -> ObjectFrameSpec {
    let mut attributes = *existing;
    if overwrite {
        attributes.width = None;
        attributes.height = None;
    }
    let width = *attributes
        .width
        .get_or_insert_with(|| block_count(extent.width(), block_size));
    let height = *attributes
        .height
        .get_or_insert_with(|| block_count(extent.height(), block_size));

    ObjectFrameSpec {
        width_blocks: width,
        height_blocks: height,
        margin_blocks: attributes.margin,
    }
}

/// World-space point the object's origin should move to.
///
/// The in-plane midpoint of the local extent is transformed into world
/// space; the depth (Y) is the object's own world depth. `None` when the
/// world matrix is singular, since the origin then cannot be moved without
/// moving the geometry.
pub fn origin_target(extent: &PlanarExtent, matrix_world: &Matrix4<f64>) -> Option<Point3<f64>> {
    if matrix_world.try_inverse().is_none() {
        return None;
    }
    let mid = extent.midpoint();
    let mut world = matrix_world.transform_point(&Point3::new(mid.x, 0.0, mid.y));
    world.y = matrix_world[(1, 3)];
    Some(world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BoundingBox, Stroke, StrokeFrame, StrokeLayer};
    use nalgebra::Vector3;

    fn panel(min: (f64, f64), max: (f64, f64)) -> ShapeRepresentation {
        ShapeRepresentation::solid(&BoundingBox::new(
            Point3::new(min.0, -0.1, min.1),
            Point3::new(max.0, 0.1, max.1),
        ))
    }

    #[test]
    fn test_width_and_height_from_solid() {
        let shape = panel((-1.0, -0.5), (1.0, 0.5));
        let spec = compute_frame("Panel", &shape, 0.1, &FrameAttributes::default(), true).unwrap();

        assert_eq!(spec.width_blocks, 20);
        assert_eq!(spec.height_blocks, 10);
        assert_eq!(spec.margin_blocks, DEFAULT_MARGIN_BLOCKS);
    }

    #[test]
    fn test_single_point_is_one_block() {
        let shape = ShapeRepresentation::Strokes(vec![StrokeLayer {
            name: "Dot".into(),
            frames: vec![StrokeFrame {
                frame_number: 0,
                strokes: vec![Stroke::new(vec![Point3::new(3.0, 0.0, 3.0)])],
            }],
        }]);
        let spec = compute_frame("Dot", &shape, 0.1, &FrameAttributes::default(), true).unwrap();

        assert_eq!(spec.width_blocks, 1);
        assert_eq!(spec.height_blocks, 1);
    }

    #[test]
    fn test_empty_strokes_fail() {
        let shape = ShapeRepresentation::Strokes(vec![]);
        let err = compute_frame("Blank", &shape, 0.1, &FrameAttributes::default(), true);

        assert_eq!(
            err,
            Err(OrthocropError::EmptyShape {
                object: "Blank".into()
            })
        );
    }

    #[test]
    fn test_overwrite_replaces_both() {
        let shape = panel((0.0, 0.0), (0.5, 0.3));
        let existing = FrameAttributes {
            width: Some(7),
            height: Some(9),
            margin: 0,
        };
        let spec = compute_frame("Panel", &shape, 0.1, &existing, true).unwrap();

        assert_eq!((spec.width_blocks, spec.height_blocks), (5, 3));
        assert_eq!(spec.margin_blocks, 0);
    }

    #[test]
    fn test_keep_existing_width_only() {
        let shape = panel((0.0, 0.0), (0.5, 0.3));
        let existing = FrameAttributes {
            width: Some(7),
            height: None,
            margin: 1,
        };
        let spec = compute_frame("Panel", &shape, 0.1, &existing, false).unwrap();

        assert_eq!(spec.width_blocks, 7);
        assert_eq!(spec.height_blocks, 3);
    }

    #[test]
    fn test_rejects_bad_block_size() {
        let shape = panel((0.0, 0.0), (1.0, 1.0));
        let err = compute_frame("Panel", &shape, 0.0, &FrameAttributes::default(), true);
        assert!(matches!(err, Err(OrthocropError::Configuration { .. })));
    }

    #[test]
    fn test_frame_spec_requires_both() {
        let mut attributes = FrameAttributes::default();
        assert!(attributes.frame_spec().is_none());
        attributes.width = Some(4);
        assert!(attributes.frame_spec().is_none());
        attributes.height = Some(2);
        assert_eq!(
            attributes.frame_spec(),
            Some(ObjectFrameSpec {
                width_blocks: 4,
                height_blocks: 2,
                margin_blocks: DEFAULT_MARGIN_BLOCKS
            })
        );
    }

    #[test]
    fn test_origin_target_uses_world_depth() {
        let extent = PlanarExtent {
            min_x: 0.0,
            max_x: 2.0,
            min_z: 0.0,
            max_z: 1.0,
        };
        let matrix_world = Matrix4::new_translation(&Vector3::new(10.0, 4.0, -3.0));

        let target = origin_target(&extent, &matrix_world);
        assert_eq!(target, Some(Point3::new(11.0, 4.0, -2.5)));
    }

    #[test]
    fn test_origin_target_applies_scale() {
        let extent = PlanarExtent {
            min_x: 0.0,
            max_x: 2.0,
            min_z: -1.0,
            max_z: 1.0,
        };
        let matrix_world = Matrix4::new_translation(&Vector3::new(0.0, 1.0, 0.0))
            * Matrix4::new_nonuniform_scaling(&Vector3::new(2.0, 2.0, 2.0));

        let target = origin_target(&extent, &matrix_world);
        assert_eq!(target, Some(Point3::new(2.0, 1.0, 0.0)));
    }

    #[test]
    fn test_origin_target_singular_matrix() {
        let extent = PlanarExtent {
            min_x: 0.0,
            max_x: 2.0,
            min_z: 0.0,
            max_z: 1.0,
        };
        let flattened = Matrix4::new_translation(&Vector3::new(1.0, 0.0, 1.0))
            * Matrix4::new_nonuniform_scaling(&Vector3::new(1.0, 0.0, 1.0));

        assert_eq!(origin_target(&extent, &flattened), None);
    }
}
