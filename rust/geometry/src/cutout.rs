// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cutout resolution against wall edges
//!
//! A raw cutout carries only a 2D anchor; before any geometry can be
//! cut it must be pinned to a concrete wall edge and a position along
//! it. Anchors further than the placement threshold from every
//! candidate edge are rejected, not silently placed.

use crate::error::{Error, Result};
use nalgebra::Vector2;
use planmesh_plan::{Cutout, Point2D, Polygon};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::cmp::Ordering;

/// Maximum anchor-to-edge distance (world units) for placement
pub const PLACEMENT_THRESHOLD: f64 = 5.0;

/// One wall edge of a room polygon, as a plan-space segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallEdge {
    pub index: usize,
    pub start: Point2D,
    pub end: Point2D,
}

impl WallEdge {
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Unit direction from start to end, or None for a zero-length edge
    pub fn direction(&self) -> Option<Vector2<f64>> {
        let d = Vector2::new(self.end.x - self.start.x, self.end.z - self.start.z);
        let len = d.norm();
        (len > 1e-10).then(|| d / len)
    }

    /// Plan point at distance `u` from the edge start
    pub fn point_at(&self, u: f64) -> Point2D {
        match self.direction() {
            Some(dir) => Point2D::new(self.start.x + dir.x * u, self.start.z + dir.y * u),
            None => self.start,
        }
    }
}

/// Derive the wall edge list from a room polygon
pub fn wall_edges(polygon: &Polygon) -> Vec<WallEdge> {
    (0..polygon.len())
        .map(|i| {
            let (start, end) = polygon.edge(i);
            WallEdge { index: i, start, end }
        })
        .collect()
}

/// A cutout pinned to its nearest wall edge
#[derive(Debug, Clone)]
pub struct ResolvedCutout {
    pub cutout: Cutout,
    pub edge: WallEdge,
    /// Scalar distance from the edge start to the projected anchor
    pub position_along_edge: f64,
    /// Perpendicular distance from the anchor to the edge
    pub distance: f64,
}

/// Clamped projection of `p` onto the segment: returns (position along
/// the edge, distance to the closest segment point)
fn project_onto_edge(p: &Point2D, edge: &WallEdge) -> (f64, f64) {
    let length = edge.length();
    let Some(dir) = edge.direction() else {
        return (0.0, p.distance_to(&edge.start));
    };

    let to_anchor = Vector2::new(p.x - edge.start.x, p.z - edge.start.z);
    let t = to_anchor.dot(&dir).clamp(0.0, length);
    let closest = edge.point_at(t);
    (t, p.distance_to(&closest))
}

/// Resolve a cutout to the nearest of `candidate_edges`.
///
/// Returns `NoWallWithinThreshold` when every candidate is further than
/// the placement threshold. Among equidistant edges the first wins, so
/// resolution is deterministic for a fixed edge order.
pub fn resolve_cutout(cutout: &Cutout, candidate_edges: &[WallEdge]) -> Result<ResolvedCutout> {
    let mut best: Option<(f64, f64, WallEdge)> = None;

    for edge in candidate_edges {
        let (position, distance) = project_onto_edge(&cutout.anchor, edge);
        let closer = match &best {
            Some((_, best_distance, _)) => distance < *best_distance,
            None => true,
        };
        if closer {
            best = Some((position, distance, *edge));
        }
    }

    match best {
        Some((position, distance, edge)) if distance <= PLACEMENT_THRESHOLD => Ok(ResolvedCutout {
            cutout: cutout.clone(),
            edge,
            position_along_edge: position,
            distance,
        }),
        Some((_, distance, _)) => Err(Error::NoWallWithinThreshold {
            id: cutout.id.clone(),
            nearest: distance,
            threshold: PLACEMENT_THRESHOLD,
        }),
        None => Err(Error::NoWallWithinThreshold {
            id: cutout.id.clone(),
            nearest: f64::INFINITY,
            threshold: PLACEMENT_THRESHOLD,
        }),
    }
}

/// Per-edge store of resolved cutouts, kept sorted by position so the
/// interval engine sees a deterministic order
#[derive(Debug, Clone, Default)]
pub struct CutoutRegistry {
    by_edge: FxHashMap<usize, SmallVec<[ResolvedCutout; 4]>>,
}

impl CutoutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve and store a cutout against the candidate edges
    pub fn register(&mut self, cutout: &Cutout, candidate_edges: &[WallEdge]) -> Result<()> {
        let resolved = resolve_cutout(cutout, candidate_edges)?;
        self.insert(resolved);
        Ok(())
    }

    /// Store an already-resolved cutout
    pub fn insert(&mut self, resolved: ResolvedCutout) {
        let list = self.by_edge.entry(resolved.edge.index).or_default();
        list.push(resolved);
        // Stable sort keeps registration order for equal positions
        list.sort_by(|a, b| {
            a.position_along_edge
                .partial_cmp(&b.position_along_edge)
                .unwrap_or(Ordering::Equal)
        });
    }

    /// Cutouts on one edge, ordered by position along the edge
    pub fn query(&self, edge_index: usize) -> &[ResolvedCutout] {
        self.by_edge
            .get(&edge_index)
            .map(|list| list.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.by_edge.is_empty()
    }

    /// All resolved cutouts across all edges
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedCutout> {
        self.by_edge.values().flat_map(|list| list.iter())
    }
}
