// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-asset-type placement offset tables for door/window fixtures

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Placement corrections for one fixture asset type.
///
/// Asset meshes rarely sit exactly on their pivot, so each type carries
/// tuning offsets applied when computing the paired interior/exterior
/// transforms. Units are world units, rotation degrees about vertical.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FixtureOffsets {
    /// Additive position correction (x, y, z)
    pub position_offset: [f64; 3],
    /// Yaw correction added to the user rotation
    pub rotation_offset_deg: f64,
    /// How far the interior copy sits off the wall centerline, along
    /// the wall normal
    pub interior_depth_offset: f64,
    /// Same for the exterior copy (opposite side of the centerline)
    pub exterior_depth_offset: f64,
    /// Uniform scale multiplier applied on top of the user scale
    pub scale_multiplier: f64,
    /// Vertical correction applied after door floor alignment
    pub vertical_offset: f64,
}

impl Default for FixtureOffsets {
    fn default() -> Self {
        Self {
            position_offset: [0.0; 3],
            rotation_offset_deg: 0.0,
            interior_depth_offset: 0.0,
            exterior_depth_offset: 0.0,
            scale_multiplier: 1.0,
            vertical_offset: 0.0,
        }
    }
}

/// Offset table keyed by asset type name
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FixtureOffsetTable {
    pub offsets: FxHashMap<String, FixtureOffsets>,
}

impl FixtureOffsetTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, asset_type: impl Into<String>, offsets: FixtureOffsets) {
        self.offsets.insert(asset_type.into(), offsets);
    }

    /// Offsets for an asset type, falling back to identity offsets for
    /// unknown types so placement still succeeds
    pub fn get(&self, asset_type: &str) -> FixtureOffsets {
        self.offsets.get(asset_type).copied().unwrap_or_default()
    }
}
