// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dual-fixture placement
//!
//! Door and window assets are rendered twice: an interior copy facing
//! the room and an exterior copy on the far side of the wall
//! centerline. This module computes both world transforms from a
//! resolved cutout and the asset type's offset table. The math never
//! touches the asset mesh itself, so a placeholder mesh can be swapped
//! for the real asset later without re-running placement; only the
//! door floor-alignment pass needs the (current) mesh's vertical
//! extent, and it can be re-applied when the real asset arrives.

use crate::cutout::ResolvedCutout;
use nalgebra::{Matrix4, Rotation3, Vector3};
use planmesh_plan::{CutoutKind, FixtureOffsets};

/// Gap kept between a door's lowest point and the floor to avoid
/// z-fighting
pub const FLOOR_CLEARANCE: f64 = 0.01;

/// Decomposed world transform: translation, yaw about +y, uniform scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vector3<f64>,
    pub rotation_deg: f64,
    pub scale: f64,
}

impl Transform {
    pub fn to_matrix(&self) -> Matrix4<f64> {
        let rotation =
            Rotation3::from_axis_angle(&Vector3::y_axis(), self.rotation_deg.to_radians());
        Matrix4::new_translation(&self.translation)
            * rotation.to_homogeneous()
            * Matrix4::new_scaling(self.scale)
    }
}

/// Paired transforms for the two copies of one fixture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DualTransforms {
    pub interior: Transform,
    pub exterior: Transform,
}

/// A fixture ready for the rendering layer: stable id plus the two
/// placement transforms. The caller indexes its live objects by this
/// id; the kernel never walks a scene graph.
#[derive(Debug, Clone)]
pub struct FixtureRecord {
    pub id: String,
    pub kind: CutoutKind,
    pub asset_type: String,
    pub transforms: DualTransforms,
}

/// Compute interior and exterior transforms for a resolved cutout.
///
/// The wall normal is the left perpendicular of the edge direction,
/// which points into the room for counter-clockwise outlines (the plan
/// convention). The interior copy sits `interior_depth_offset` along
/// it, the exterior copy `exterior_depth_offset` against it.
pub fn compute_dual_transforms(
    resolved: &ResolvedCutout,
    offsets: &FixtureOffsets,
) -> DualTransforms {
    let anchor2d = resolved.edge.point_at(resolved.position_along_edge);
    let (dir, normal) = match resolved.edge.direction() {
        Some(d) => (
            Vector3::new(d.x, 0.0, d.y),
            Vector3::new(-d.y, 0.0, d.x), // left of travel
        ),
        None => (Vector3::x(), Vector3::z()),
    };

    // Yaw that aligns the asset's local x axis with the wall direction
    let wall_yaw_deg = (-dir.z).atan2(dir.x).to_degrees();

    let position_offset = Vector3::new(
        offsets.position_offset[0],
        offsets.position_offset[1],
        offsets.position_offset[2],
    );
    let anchor = Vector3::new(anchor2d.x, 0.0, anchor2d.z) + position_offset;

    let cutout = &resolved.cutout;
    let rotation_deg = wall_yaw_deg + cutout.rotation_deg + offsets.rotation_offset_deg;
    let scale = cutout.scale * offsets.scale_multiplier;

    DualTransforms {
        interior: Transform {
            translation: anchor + normal * offsets.interior_depth_offset,
            rotation_deg,
            scale,
        },
        exterior: Transform {
            translation: anchor - normal * offsets.exterior_depth_offset,
            rotation_deg,
            scale,
        },
    }
}

/// Door floor alignment: translate vertically so the fixture's lowest
/// world point rests on the floor plus the anti-z-fighting clearance
/// plus the asset type's vertical correction.
///
/// `world_min_y` is the minimum y of the fixture's geometry under the
/// current transform. Doors only; windows keep their sill placement.
pub fn align_to_floor(transform: &mut Transform, world_min_y: f64, offsets: &FixtureOffsets) {
    let target = FLOOR_CLEARANCE + offsets.vertical_offset;
    transform.translation.y += target - world_min_y;
}
