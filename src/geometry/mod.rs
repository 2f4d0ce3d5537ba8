// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - bounding boxes and measurable shapes

mod bbox;
mod shape;

pub use bbox::{BoundingBox, PlanarExtent};
pub use shape::{ShapeRepresentation, Stroke, StrokeFrame, StrokeLayer};
