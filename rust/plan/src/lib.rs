// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planmesh plan data model
//!
//! Plain data describing a 2D floor plan: room polygons in the x/z
//! ground plane, wall dimensions, per-edge materials, and door/window
//! cutout records. The geometry kernel (`planmesh-geometry`) consumes
//! these types read-only; nothing here owns GPU buffers or assets.

pub mod cutout;
pub mod fixture;
pub mod types;

pub use cutout::{Cutout, CutoutKind};
pub use fixture::{FixtureOffsetTable, FixtureOffsets};
pub use types::{BuildingBounds, FaceSide, FloorPlan, MaterialKey, Point2D, Polygon, Room};
