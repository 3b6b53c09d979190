// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plan-level build orchestration
//!
//! Walks a whole floor plan: resolves every cutout to its nearest wall
//! across all rooms, builds walls and covers per room, and computes the
//! paired fixture transforms. A failing room or cutout is logged,
//! recorded as a diagnostic, and skipped; everything else still builds.
//! Each call is a pure function of the plan, so identical plans yield
//! identical buffers and the caller can full-replace prior geometry.

use crate::cover::{build_cover, RoomCover};
use crate::cutout::{resolve_cutout, wall_edges, CutoutRegistry, ResolvedCutout};
use crate::error::Error;
use crate::fixture::{compute_dual_transforms, DualTransforms, FixtureRecord};
use crate::walls::{build_walls, WallGeometry};
use planmesh_plan::FloorPlan;
use rustc_hash::FxHashMap;
use tracing::warn;

/// Built geometry for one room
#[derive(Debug, Clone)]
pub struct RoomGeometry {
    pub room_id: String,
    pub walls: WallGeometry,
    pub cover: RoomCover,
}

/// A problem encountered while building; identifies the room or cutout
/// that was skipped
#[derive(Debug, Clone, PartialEq)]
pub struct PlanDiagnostic {
    pub subject: String,
    pub error: Error,
}

/// Everything built from one plan pass
#[derive(Debug, Clone, Default)]
pub struct PlanGeometry {
    pub rooms: Vec<RoomGeometry>,
    pub fixtures: Vec<FixtureRecord>,
    pub diagnostics: Vec<PlanDiagnostic>,
}

impl PlanGeometry {
    /// Stable fixture id -> transforms mapping for the caller to index
    /// its live objects by
    pub fn fixture_transforms(&self) -> FxHashMap<&str, &DualTransforms> {
        self.fixtures
            .iter()
            .map(|f| (f.id.as_str(), &f.transforms))
            .collect()
    }
}

/// Build all geometry for a floor plan.
///
/// Never panics and never aborts the whole plan: the worst outcome is
/// an empty result with diagnostics explaining what was skipped.
pub fn build_plan(plan: &FloorPlan) -> PlanGeometry {
    let bounds = plan.building_bounds();
    let mut result = PlanGeometry::default();

    // Per-room edge lists, reused for resolution and wall builds
    let room_edges: Vec<_> = plan.rooms.iter().map(|r| wall_edges(&r.polygon)).collect();

    // Pin each cutout to the nearest wall across every room
    let mut registries: Vec<CutoutRegistry> = vec![CutoutRegistry::new(); plan.rooms.len()];
    let mut resolved_cutouts: Vec<ResolvedCutout> = Vec::with_capacity(plan.cutouts.len());

    for cutout in &plan.cutouts {
        let mut best: Option<(usize, ResolvedCutout)> = None;
        let mut nearest_miss = f64::INFINITY;

        for (room_index, edges) in room_edges.iter().enumerate() {
            match resolve_cutout(cutout, edges) {
                Ok(resolved) => {
                    let closer = match &best {
                        Some((_, current)) => resolved.distance < current.distance,
                        None => true,
                    };
                    if closer {
                        best = Some((room_index, resolved));
                    }
                }
                Err(Error::NoWallWithinThreshold { nearest, .. }) => {
                    nearest_miss = nearest_miss.min(nearest);
                }
                Err(_) => {}
            }
        }

        match best {
            Some((room_index, resolved)) => {
                registries[room_index].insert(resolved.clone());
                resolved_cutouts.push(resolved);
            }
            None => {
                let error = Error::NoWallWithinThreshold {
                    id: cutout.id.clone(),
                    nearest: nearest_miss,
                    threshold: crate::cutout::PLACEMENT_THRESHOLD,
                };
                warn!(cutout = %cutout.id, %error, "cutout not placed");
                result.diagnostics.push(PlanDiagnostic {
                    subject: cutout.id.clone(),
                    error,
                });
            }
        }
    }

    // Build each room independently; one bad room never takes down the
    // rest of the plan
    for (room, registry) in plan.rooms.iter().zip(&registries) {
        let walls = match build_walls(room, bounds.as_ref(), registry) {
            Ok(walls) => walls,
            Err(error) => {
                warn!(room = %room.id, %error, "skipping room walls");
                result.diagnostics.push(PlanDiagnostic {
                    subject: room.id.clone(),
                    error,
                });
                continue;
            }
        };

        for issue in &walls.skipped {
            result.diagnostics.push(PlanDiagnostic {
                subject: issue.cutout_id.clone(),
                error: issue.error.clone(),
            });
        }

        let cover = match build_cover(
            &room.polygon,
            room.wall_height,
            &room.floor_material,
            &room.ceiling_material,
        ) {
            Ok(cover) => cover,
            Err(error) => {
                warn!(room = %room.id, %error, "skipping room cover");
                result.diagnostics.push(PlanDiagnostic {
                    subject: room.id.clone(),
                    error,
                });
                continue;
            }
        };

        result.rooms.push(RoomGeometry {
            room_id: room.id.clone(),
            walls,
            cover,
        });
    }

    // Fixture placement transforms; floor alignment for doors is the
    // caller's pass once asset extents are known
    for resolved in &resolved_cutouts {
        let offsets = plan.fixture_offsets.get(&resolved.cutout.asset_type);
        result.fixtures.push(FixtureRecord {
            id: resolved.cutout.id.clone(),
            kind: resolved.cutout.kind,
            asset_type: resolved.cutout.asset_type.clone(),
            transforms: compute_dual_transforms(resolved, &offsets),
        });
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use planmesh_plan::{Cutout, MaterialKey, Point2D, Polygon, Room};

    fn room(id: &str, x0: f64, z0: f64, x1: f64, z1: f64) -> Room {
        let polygon = Polygon::new(vec![
            Point2D::new(x0, z0),
            Point2D::new(x1, z0),
            Point2D::new(x1, z1),
            Point2D::new(x0, z1),
        ]);
        let n = polygon.len();
        Room {
            id: id.to_string(),
            polygon,
            wall_thickness: 0.3,
            wall_height: 3.0,
            inner_materials: vec![MaterialKey::new(format!("{id}-inner")); n],
            outer_materials: vec![MaterialKey::new(format!("{id}-outer")); n],
            floor_material: MaterialKey::new(format!("{id}-floor")),
            ceiling_material: MaterialKey::new(format!("{id}-ceiling")),
        }
    }

    #[test]
    fn test_two_room_plan_builds_both() {
        let plan = FloorPlan {
            rooms: vec![room("a", 0.0, 0.0, 10.0, 10.0), room("b", 10.0, 0.0, 20.0, 10.0)],
            cutouts: vec![Cutout::door(
                "d1",
                "panel-door",
                Point2D::new(10.0, 5.0),
                1.2,
                2.1,
            )],
            ..Default::default()
        };

        let built = build_plan(&plan);
        assert_eq!(built.rooms.len(), 2);
        assert_eq!(built.fixtures.len(), 1);
        assert!(built.diagnostics.is_empty());
    }

    #[test]
    fn test_bad_room_skipped_sibling_survives() {
        let mut broken = room("broken", 0.0, 0.0, 10.0, 10.0);
        broken.inner_materials.pop();
        let plan = FloorPlan {
            rooms: vec![broken, room("ok", 20.0, 0.0, 30.0, 10.0)],
            ..Default::default()
        };

        let built = build_plan(&plan);
        assert_eq!(built.rooms.len(), 1);
        assert_eq!(built.rooms[0].room_id, "ok");
        assert_eq!(built.diagnostics.len(), 1);
        assert_eq!(built.diagnostics[0].subject, "broken");
    }

    #[test]
    fn test_unplaceable_cutout_reported() {
        let plan = FloorPlan {
            rooms: vec![room("a", 0.0, 0.0, 10.0, 10.0)],
            cutouts: vec![Cutout::door(
                "far",
                "panel-door",
                Point2D::new(50.0, 50.0),
                1.2,
                2.1,
            )],
            ..Default::default()
        };

        let built = build_plan(&plan);
        assert_eq!(built.rooms.len(), 1);
        assert!(built.fixtures.is_empty());
        assert_eq!(built.diagnostics.len(), 1);
        assert!(matches!(
            built.diagnostics[0].error,
            Error::NoWallWithinThreshold { .. }
        ));
    }

    #[test]
    fn test_fixture_transform_map() {
        let plan = FloorPlan {
            rooms: vec![room("a", 0.0, 0.0, 10.0, 10.0)],
            cutouts: vec![
                Cutout::door("d1", "panel-door", Point2D::new(5.0, 0.0), 1.2, 2.1),
                Cutout::window("w1", "casement", Point2D::new(5.0, 10.0), 1.0, 1.2, 0.9),
            ],
            ..Default::default()
        };

        let built = build_plan(&plan);
        let map = built.fixture_transforms();
        assert_eq!(map.len(), 2);
        assert!(map.contains_key("d1"));
        assert!(map.contains_key("w1"));
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let plan = FloorPlan {
            rooms: vec![room("a", 0.0, 0.0, 10.0, 10.0)],
            cutouts: vec![Cutout::door(
                "d1",
                "panel-door",
                Point2D::new(5.0, 0.0),
                1.2,
                2.1,
            )],
            ..Default::default()
        };

        let first = build_plan(&plan);
        let second = build_plan(&plan);

        assert_eq!(first.rooms.len(), second.rooms.len());
        for (a, b) in first.rooms.iter().zip(&second.rooms) {
            assert_eq!(a.walls.total_triangles(), b.walls.total_triangles());
            assert_eq!(a.cover.floor.positions, b.cover.floor.positions);
        }
    }
}
