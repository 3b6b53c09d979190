// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mitered corner offsets
//!
//! For each polygon corner this computes the pair of points where the
//! room-facing and outward-facing wall surfaces meet, so adjoining wall
//! segments join without gaps or overlaps. Offsets live in the x/z
//! ground plane at y = 0; the wall builder extrudes them vertically.

use crate::error::{Error, Result};
use nalgebra::{Point3, Vector2};
use planmesh_plan::Polygon;

/// Corners closer than this (radians) to a straight line or a full
/// fold-back are treated as straight runs
const STRAIGHT_TOLERANCE: f64 = 0.2;

/// Miter length is clamped to this multiple of the wall thickness to
/// bound spikes at acute corners
const MITER_CLAMP_FACTOR: f64 = 2.0;

const DEGENERATE_EPSILON: f64 = 1e-10;

/// Inner/outer wall surface points for one polygon corner.
///
/// Computed once per (polygon, thickness) build and discarded with the
/// build; never cached across rebuilds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetPoint {
    /// Point on the room-facing surface
    pub inner: Point3<f64>,
    /// Point on the outward-facing surface
    pub outer: Point3<f64>,
}

/// Compute the mitered offset pair for every corner of `polygon`.
///
/// Guarantees: wall thickness measured perpendicular to any straight
/// edge equals `thickness`, and no miter extends further than
/// `2 * thickness` from its corner.
pub fn compute_offsets(polygon: &Polygon, thickness: f64) -> Result<Vec<OffsetPoint>> {
    let n = polygon.len();
    if n < 3 {
        return Err(Error::DegeneratePolygon(n));
    }

    // Interior is to the left of travel for counter-clockwise outlines
    let orientation = if polygon.is_ccw() { 1.0 } else { -1.0 };
    let half = thickness / 2.0;

    let mut offsets = Vec::with_capacity(n);

    for i in 0..n {
        let prev = polygon.corners[(i + n - 1) % n];
        let cur = polygon.corners[i];
        let next = polygon.corners[(i + 1) % n];

        let to_prev = Vector2::new(prev.x - cur.x, prev.z - cur.z);
        let to_next = Vector2::new(next.x - cur.x, next.z - cur.z);

        let v1 = match try_unit(to_prev) {
            Some(v) => v,
            None => match try_unit(to_next) {
                Some(v) => -v,
                None => {
                    // Both neighbors coincide with this corner
                    let p = Point3::new(cur.x, 0.0, cur.z);
                    offsets.push(OffsetPoint { inner: p, outer: p });
                    continue;
                }
            },
        };
        let v2 = try_unit(to_next).unwrap_or(-v1);

        let angle = v1.dot(&v2).clamp(-1.0, 1.0).acos();

        let (inner2d, outer2d) = if angle < STRAIGHT_TOLERANCE
            || (std::f64::consts::PI - angle) < STRAIGHT_TOLERANCE
        {
            // Straight run: offset perpendicular to the averaged travel
            // direction
            let travel = match try_unit(v2 - v1) {
                Some(t) => t,
                None => v2, // prev and next fold back onto each other
            };
            // Left of travel is polygon interior for CCW outlines
            let inward = Vector2::new(-travel.y, travel.x) * orientation;
            (
                Vector2::new(cur.x, cur.z) + inward * half,
                Vector2::new(cur.x, cur.z) - inward * half,
            )
        } else {
            // Proper corner: walk the angle bisector
            let bisector = match try_unit(v1 + v2) {
                Some(b) => b,
                None => Vector2::new(-v2.y, v2.x) * orientation,
            };

            let miter = (half / (angle / 2.0).sin()).min(MITER_CLAMP_FACTOR * thickness);

            // The bisector points into the wedge between the two edge
            // directions; that wedge is the polygon interior exactly at
            // convex corners
            let cross = v1.x * v2.y - v1.y * v2.x;
            let convex = orientation * cross < 0.0;

            let center = Vector2::new(cur.x, cur.z);
            if convex {
                (center + bisector * miter, center - bisector * miter)
            } else {
                (center - bisector * miter, center + bisector * miter)
            }
        };

        offsets.push(OffsetPoint {
            inner: Point3::new(inner2d.x, 0.0, inner2d.y),
            outer: Point3::new(outer2d.x, 0.0, outer2d.y),
        });
    }

    Ok(offsets)
}

#[inline]
fn try_unit(v: Vector2<f64>) -> Option<Vector2<f64>> {
    let len = v.norm();
    (len > DEGENERATE_EPSILON).then(|| v / len)
}
