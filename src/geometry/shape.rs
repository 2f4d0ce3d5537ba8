// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Shape representations that can be measured on the viewing plane

use super::BoundingBox;
use crate::utils::in_plane;
use nalgebra::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A single drawn stroke
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub points: Vec<Point3<f64>>,
}

impl Stroke {
    pub fn new(points: Vec<Point3<f64>>) -> Self {
        Self { points }
    }
}

/// Strokes drawn on one animation frame of a layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrokeFrame {
    pub frame_number: i32,
    pub strokes: Vec<Stroke>,
}

/// A stroke layer holding any number of animation frames
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrokeLayer {
    pub name: String,
    pub frames: Vec<StrokeFrame>,
}

/// The measurable geometry of an object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ShapeRepresentation {
    /// Stroke-based drawing; every point of every frame of every layer counts
    Strokes(Vec<StrokeLayer>),
    /// Solid object measured by the eight corners of its local bounding box
    SolidBounds([Point3<f64>; 8]),
}

impl ShapeRepresentation {
    /// Solid shape from a local-space bounding box
    pub fn solid(bbox: &BoundingBox) -> Self {
        ShapeRepresentation::SolidBounds(bbox.corners())
    }

    /// All points of the shape in local space
    pub fn points(&self) -> Box<dyn Iterator<Item = &Point3<f64>> + '_> {
        match self {
            ShapeRepresentation::Strokes(layers) => Box::new(
                layers
                    .iter()
                    .flat_map(|layer| layer.frames.iter())
                    .flat_map(|frame| frame.strokes.iter())
                    .flat_map(|stroke| stroke.points.iter()),
            ),
            ShapeRepresentation::SolidBounds(corners) => Box::new(corners.iter()),
        }
    }

    /// In-plane (X, Z) projection of every point, across all frames at once
    pub fn extent_points(&self) -> impl Iterator<Item = Point2<f64>> + '_ {
        self.points().map(in_plane)
    }

    pub fn point_count(&self) -> usize {
        self.points().count()
    }

    /// Move every point by `offset`
    pub fn translate(&mut self, offset: &Vector3<f64>) {
        match self {
            ShapeRepresentation::Strokes(layers) => {
                for stroke in layers
                    .iter_mut()
                    .flat_map(|layer| layer.frames.iter_mut())
                    .flat_map(|frame| frame.strokes.iter_mut())
                {
                    for point in stroke.points.iter_mut() {
                        *point += *offset;
                    }
                }
            }
            ShapeRepresentation::SolidBounds(corners) => {
                for corner in corners.iter_mut() {
                    *corner += *offset;
                }
            }
        }
    }
}
