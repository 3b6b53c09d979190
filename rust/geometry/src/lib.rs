// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planmesh geometry kernel
//!
//! Converts a 2D floor plan (room polygons, wall dimensions,
//! door/window cutouts) into watertight 3D wall, floor and ceiling
//! geometry with per-material buffers and paired interior/exterior
//! fixture transforms. Purely synchronous: every build call is a
//! function of its inputs and returns fresh buffers, so callers can
//! rebuild on any edit and full-replace what they had. Rendering,
//! asset loading and export live elsewhere.

pub mod builder;
pub mod classify;
pub mod cover;
pub mod cutout;
pub mod error;
pub mod fixture;
pub mod interval;
pub mod mesh;
pub mod miter;
pub mod triangulation;
pub mod walls;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point2, Point3, Vector2, Vector3};

pub use builder::{build_plan, PlanDiagnostic, PlanGeometry, RoomGeometry};
pub use classify::{classify_edges, WallClass};
pub use cover::{build_cover, RoomCover};
pub use cutout::{resolve_cutout, wall_edges, CutoutRegistry, ResolvedCutout, WallEdge};
pub use error::{Error, Result};
pub use fixture::{
    align_to_floor, compute_dual_transforms, DualTransforms, FixtureRecord, Transform,
};
pub use interval::{subtract_openings, FaceRect, OpeningSpan};
pub use mesh::GeometryBuffer;
pub use miter::{compute_offsets, OffsetPoint};
pub use triangulation::triangulate_polygon;
pub use walls::{build_walls, CutoutIssue, WallGeometry};
