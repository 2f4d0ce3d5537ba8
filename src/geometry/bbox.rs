// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bounding box utilities

use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in an object's local space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Self {
        let mut bbox = Self::empty();
        for point in points {
            bbox.expand_to_include(point);
        }
        bbox
    }

    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);

        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// The eight corners in the host's bound-box order
    pub fn corners(&self) -> [Point3<f64>; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Point3::new(lo.x, lo.y, lo.z),
            Point3::new(lo.x, lo.y, hi.z),
            Point3::new(lo.x, hi.y, hi.z),
            Point3::new(lo.x, hi.y, lo.z),
            Point3::new(hi.x, lo.y, lo.z),
            Point3::new(hi.x, lo.y, hi.z),
            Point3::new(hi.x, hi.y, hi.z),
            Point3::new(hi.x, hi.y, lo.z),
        ]
    }
}

/// Extent of a point set on the X/Z viewing plane.
///
/// Points are given as `Point2 { x, y }` where `y` carries the world Z
/// coordinate, see [`crate::utils::in_plane`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarExtent {
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl PlanarExtent {
    /// Accumulate min/max in a single pass. `None` when there are no points.
    pub fn from_points(points: impl IntoIterator<Item = Point2<f64>>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut extent = Self {
            min_x: first.x,
            max_x: first.x,
            min_z: first.y,
            max_z: first.y,
        };
        for p in points {
            extent.min_x = extent.min_x.min(p.x);
            extent.max_x = extent.max_x.max(p.x);
            extent.min_z = extent.min_z.min(p.y);
            extent.max_z = extent.max_z.max(p.y);
        }
        Some(extent)
    }

    pub fn width(&self) -> f64 {
        (self.max_x - self.min_x).abs()
    }

    pub fn height(&self) -> f64 {
        (self.max_z - self.min_z).abs()
    }

    pub fn midpoint(&self) -> Point2<f64> {
        Point2::new(
            self.min_x + self.width() / 2.0,
            self.min_z + self.height() / 2.0,
        )
    }
}
