// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Internal/external wall edge classification
//!
//! An edge is external when both endpoints hug the building footprint's
//! bounding rectangle. This is a heuristic: on non-rectangular
//! footprints (L-shaped buildings) some genuinely external walls sit
//! away from the bounds and classify as internal. Known limitation,
//! kept as-is; classification only drives which material lands on the
//! outward-facing surface.

use planmesh_plan::{BuildingBounds, Polygon};

/// Distance tolerance (world units) for "endpoint lies on a bounds side"
pub const EXTERNAL_TOLERANCE: f64 = 2.0;

/// Classification of a single wall edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallClass {
    /// Wall between two rooms; both faces get the room's inner material
    Internal,
    /// Wall on the building perimeter; the outward face gets the outer
    /// material
    External,
}

/// Classify every edge of `polygon`.
///
/// When no building-wide bounds are supplied the polygon's own bounding
/// box stands in, scoping the rule to the single room.
pub fn classify_edges(polygon: &Polygon, building_bounds: Option<&BuildingBounds>) -> Vec<WallClass> {
    let own_bounds;
    let bounds = match building_bounds {
        Some(b) => b,
        None => {
            own_bounds = polygon.bounds();
            &own_bounds
        }
    };

    let n = polygon.len();
    let mut classes = Vec::with_capacity(n);

    for i in 0..n {
        let (start, end) = polygon.edge(i);
        let external = bounds.distance_to_nearest_side(&start) <= EXTERNAL_TOLERANCE
            && bounds.distance_to_nearest_side(&end) <= EXTERNAL_TOLERANCE;
        classes.push(if external {
            WallClass::External
        } else {
            WallClass::Internal
        });
    }

    classes
}
