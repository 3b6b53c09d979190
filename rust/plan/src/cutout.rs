// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Door and window cutout records

use crate::types::Point2D;
use serde::{Deserialize, Serialize};

/// Kind of wall opening
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CutoutKind {
    Door,
    Window,
}

/// A rectangular opening to subtract from a wall face.
///
/// The anchor is a 2D plan position; the kernel projects it onto the
/// nearest wall edge when resolving the cutout. `sill_height` is 0 for
/// doors and a positive offset from the floor for windows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cutout {
    pub id: String,
    pub kind: CutoutKind,
    /// Asset type key into the fixture offset table
    pub asset_type: String,
    /// Plan position of the opening center
    pub anchor: Point2D,
    /// Opening width along the wall, world units
    pub width: f64,
    /// Opening height, world units
    pub height: f64,
    /// Floor-to-opening-bottom offset
    pub sill_height: f64,
    /// User-applied yaw in degrees, on top of the asset's own offset
    pub rotation_deg: f64,
    /// User-applied uniform scale, on top of the asset's own multiplier
    pub scale: f64,
}

impl Cutout {
    pub fn door(id: impl Into<String>, asset_type: impl Into<String>, anchor: Point2D, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            kind: CutoutKind::Door,
            asset_type: asset_type.into(),
            anchor,
            width,
            height,
            sill_height: 0.0,
            rotation_deg: 0.0,
            scale: 1.0,
        }
    }

    pub fn window(
        id: impl Into<String>,
        asset_type: impl Into<String>,
        anchor: Point2D,
        width: f64,
        height: f64,
        sill_height: f64,
    ) -> Self {
        Self {
            id: id.into(),
            kind: CutoutKind::Window,
            asset_type: asset_type.into(),
            anchor,
            width,
            height,
            sill_height,
            rotation_deg: 0.0,
            scale: 1.0,
        }
    }
}
