// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Shared helpers

mod math;

pub use math::{block_count, in_plane, with_in_plane};
