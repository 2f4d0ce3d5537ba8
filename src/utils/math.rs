// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

use nalgebra::{Point2, Point3};

/// Project a world or local point onto the X/Z viewing plane.
/// The returned `y` component holds the Z coordinate.
pub fn in_plane(p: &Point3<f64>) -> Point2<f64> {
    Point2::new(p.x, p.z)
}

/// Replace the X and Z components of `p`, keeping its depth (Y)
pub fn with_in_plane(p: &Point3<f64>, plane: &Point2<f64>) -> Point3<f64> {
    Point3::new(plane.x, p.y, plane.y)
}

/// Number of whole blocks covering `length`, never less than one.
///
/// Rounds half to even, the same as the host's arithmetic `round`.
pub fn block_count(length: f64, block_size: f64) -> u32 {
    let blocks = (length.abs() / block_size).round_ties_even();
    if blocks >= 1.0 {
        blocks as u32
    } else {
        1
    }
}
