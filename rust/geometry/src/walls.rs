// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall face geometry
//!
//! Turns a room polygon plus its resolved cutouts into per-material
//! vertex/index buffers: one inner and one outer vertical surface per
//! edge (built from the interval-subtracted rectangles), plus a top cap
//! closing the wall between the two offset lines. Buffers are grouped
//! by material key so the rendering layer can batch draw calls.

use crate::classify::{classify_edges, WallClass};
use crate::cutout::CutoutRegistry;
use crate::error::{Error, Result};
use crate::interval::{subtract_openings, FaceRect, OpeningSpan};
use crate::mesh::GeometryBuffer;
use crate::miter::{compute_offsets, OffsetPoint};
use nalgebra::{Point2, Point3, Vector3};
use planmesh_plan::{BuildingBounds, MaterialKey, Room};
use rustc_hash::FxHashMap;

/// Ground-plane texture tiling scale for top caps (world units per
/// texture repeat)
const CAP_UV_SCALE: f64 = 100.0;

/// A cutout skipped during a wall build, with the reason
#[derive(Debug, Clone, PartialEq)]
pub struct CutoutIssue {
    pub cutout_id: String,
    pub error: Error,
}

/// Result of building one room's walls
#[derive(Debug, Clone, Default)]
pub struct WallGeometry {
    /// One buffer per material key, ready for upload
    pub buffers: FxHashMap<MaterialKey, GeometryBuffer>,
    /// Cutouts that could not be applied; sibling cutouts and all wall
    /// faces are still built
    pub skipped: Vec<CutoutIssue>,
}

impl WallGeometry {
    pub fn total_triangles(&self) -> usize {
        self.buffers.values().map(|b| b.triangle_count()).sum()
    }
}

/// Build inner/outer wall faces and top caps for one room.
///
/// Aborts (Err) only for room-level problems: a degenerate polygon or
/// material arrays that do not match the edge count. Individual bad
/// cutouts are skipped and reported in `WallGeometry::skipped`.
pub fn build_walls(
    room: &Room,
    building_bounds: Option<&BuildingBounds>,
    cutouts: &CutoutRegistry,
) -> Result<WallGeometry> {
    let n = room.polygon.len();
    if n < 3 {
        return Err(Error::DegeneratePolygon(n));
    }
    if room.inner_materials.len() != n {
        return Err(Error::MaterialCountMismatch {
            side: "inner",
            materials: room.inner_materials.len(),
            edges: n,
        });
    }
    if room.outer_materials.len() != n {
        return Err(Error::MaterialCountMismatch {
            side: "outer",
            materials: room.outer_materials.len(),
            edges: n,
        });
    }

    let offsets = compute_offsets(&room.polygon, room.wall_thickness)?;
    let classes = classify_edges(&room.polygon, building_bounds);
    let ccw = room.polygon.is_ccw();

    let mut geometry = WallGeometry::default();

    for i in 0..n {
        let (start, end) = room.polygon.edge(i);
        let length = room.polygon.edge_length(i);
        if length < 1e-10 {
            continue; // duplicate consecutive corners
        }

        let dir = Vector3::new((end.x - start.x) / length, 0.0, (end.z - start.z) / length);
        // Left of travel; equals the room interior for CCW outlines
        let left = Vector3::new(-dir.z, 0.0, dir.x);
        let inward = if ccw { left } else { -left };

        let start_offset = offsets[i];
        let end_offset = offsets[(i + 1) % n];

        // Collect valid opening spans on this edge, recording the rest
        let mut spans: Vec<OpeningSpan> = Vec::new();
        for resolved in cutouts.query(i) {
            if let Err(error) = validate_span(resolved, length, room.wall_height) {
                geometry.skipped.push(CutoutIssue {
                    cutout_id: resolved.cutout.id.clone(),
                    error,
                });
                continue;
            }
            spans.push(OpeningSpan::from(resolved));
        }

        let rects = subtract_openings(length, room.wall_height, &spans);

        let inner_key = &room.inner_materials[i];
        // Internal walls show the room finish on both sides
        let outer_key = match classes[i] {
            WallClass::External => &room.outer_materials[i],
            WallClass::Internal => &room.inner_materials[i],
        };

        for rect in &rects {
            emit_face_quad(
                geometry.buffers.entry(inner_key.clone()).or_default(),
                &start_offset,
                &end_offset,
                FaceKind::Inner,
                length,
                rect,
                inward,
                ccw,
            );
            emit_face_quad(
                geometry.buffers.entry(outer_key.clone()).or_default(),
                &start_offset,
                &end_offset,
                FaceKind::Outer,
                length,
                rect,
                -inward,
                ccw,
            );
        }

        emit_top_cap(
            geometry.buffers.entry(inner_key.clone()).or_default(),
            &start_offset,
            &end_offset,
            room.wall_height,
            ccw,
        );
    }

    Ok(geometry)
}

fn validate_span(
    resolved: &crate::cutout::ResolvedCutout,
    edge_length: f64,
    wall_height: f64,
) -> Result<()> {
    let cutout = &resolved.cutout;
    if cutout.width <= 0.0 || cutout.height <= 0.0 {
        return Err(Error::InvalidCutoutSpan {
            id: cutout.id.clone(),
            reason: "non-positive width or height".to_string(),
        });
    }
    if cutout.width >= edge_length {
        return Err(Error::InvalidCutoutSpan {
            id: cutout.id.clone(),
            reason: format!(
                "width {:.3} >= edge length {:.3}",
                cutout.width, edge_length
            ),
        });
    }
    if cutout.sill_height + cutout.height > wall_height {
        return Err(Error::InvalidCutoutSpan {
            id: cutout.id.clone(),
            reason: format!(
                "sill {:.3} + height {:.3} exceeds wall height {:.3}",
                cutout.sill_height, cutout.height, wall_height
            ),
        });
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq)]
enum FaceKind {
    Inner,
    Outer,
}

/// Interpolate along the offset surface line at fraction `u / length`,
/// lifted to height `v`
#[inline]
fn face_point(start: &Point3<f64>, end: &Point3<f64>, length: f64, u: f64, v: f64) -> Point3<f64> {
    let t = u / length;
    Point3::new(
        start.x + (end.x - start.x) * t,
        v,
        start.z + (end.z - start.z) * t,
    )
}

/// Emit one rectangle of a wall face as a quad.
///
/// Vertex layout: 0 = (u0, v0), 1 = (u0, v1), 2 = (u1, v0),
/// 3 = (u1, v1). Inner faces wind (0,2,1),(1,2,3) and outer faces
/// (0,1,2),(1,3,2), which makes the geometric triangle normal of an
/// inner face point into the room and an outer face away from it (the
/// pair is swapped for clockwise outlines, where "left of travel" is
/// the exterior).
#[allow(clippy::too_many_arguments)]
fn emit_face_quad(
    buffer: &mut GeometryBuffer,
    start_offset: &OffsetPoint,
    end_offset: &OffsetPoint,
    kind: FaceKind,
    length: f64,
    rect: &FaceRect,
    normal: Vector3<f64>,
    ccw: bool,
) {
    let (line_start, line_end) = match kind {
        FaceKind::Inner => (&start_offset.inner, &end_offset.inner),
        FaceKind::Outer => (&start_offset.outer, &end_offset.outer),
    };

    let base = buffer.vertex_count() as u32;
    let (w, h) = (rect.width(), rect.height());

    for (u, v, tu, tv) in [
        (rect.u0, rect.v0, 0.0, 0.0),
        (rect.u0, rect.v1, 0.0, h),
        (rect.u1, rect.v0, w, 0.0),
        (rect.u1, rect.v1, w, h),
    ] {
        buffer.add_vertex(
            face_point(line_start, line_end, length, u, v),
            normal,
            Point2::new(tu, tv),
        );
    }

    let inner_winding = kind == FaceKind::Inner;
    // Clockwise outlines mirror the u axis relative to the interior
    let forward = inner_winding == ccw;

    if forward {
        buffer.add_triangle(base, base + 2, base + 1);
        buffer.add_triangle(base + 1, base + 2, base + 3);
    } else {
        buffer.add_triangle(base, base + 1, base + 2);
        buffer.add_triangle(base + 1, base + 3, base + 2);
    }
}

/// Close the top of the wall between the inner and outer offset lines
fn emit_top_cap(
    buffer: &mut GeometryBuffer,
    start_offset: &OffsetPoint,
    end_offset: &OffsetPoint,
    height: f64,
    ccw: bool,
) {
    let base = buffer.vertex_count() as u32;
    let up = Vector3::new(0.0, 1.0, 0.0);

    for p in [
        &start_offset.inner,
        &start_offset.outer,
        &end_offset.inner,
        &end_offset.outer,
    ] {
        buffer.add_vertex(
            Point3::new(p.x, height, p.z),
            up,
            Point2::new(p.x / CAP_UV_SCALE, p.z / CAP_UV_SCALE),
        );
    }

    if ccw {
        buffer.add_triangle(base, base + 2, base + 1);
        buffer.add_triangle(base + 1, base + 2, base + 3);
    } else {
        buffer.add_triangle(base, base + 1, base + 2);
        buffer.add_triangle(base + 1, base + 3, base + 2);
    }
}
