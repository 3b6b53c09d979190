// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core plan types: points, polygons, rooms, materials, bounds

use crate::cutout::Cutout;
use crate::fixture::FixtureOffsetTable;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// A floor-plan coordinate in the x/z ground plane (y is up)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub z: f64,
}

impl Point2D {
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Map to a nalgebra point with plan-x as x and plan-z as y
    pub fn to_nalgebra(&self) -> Point2<f64> {
        Point2::new(self.x, self.z)
    }

    pub fn from_nalgebra(p: &Point2<f64>) -> Self {
        Self { x: p.x, z: p.y }
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }
}

/// Closed room outline: ordered corners, edge N-1 -> 0 implied.
///
/// Corners are owned by the room; plans never share corner storage
/// between rooms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Polygon {
    pub corners: Vec<Point2D>,
}

impl Polygon {
    pub fn new(corners: Vec<Point2D>) -> Self {
        Self { corners }
    }

    /// Number of corners, which is also the number of wall edges
    pub fn len(&self) -> usize {
        self.corners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corners.is_empty()
    }

    /// Endpoints of edge `i` (corner i to corner (i+1) mod N)
    pub fn edge(&self, i: usize) -> (Point2D, Point2D) {
        let n = self.corners.len();
        (self.corners[i], self.corners[(i + 1) % n])
    }

    pub fn edge_length(&self, i: usize) -> f64 {
        let (a, b) = self.edge(i);
        a.distance_to(&b)
    }

    /// Shoelace area in the x/z plane. Positive for counter-clockwise
    /// winding under the (x right, z up-the-page) plan convention.
    pub fn signed_area(&self) -> f64 {
        let n = self.corners.len();
        if n < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..n {
            let a = &self.corners[i];
            let b = &self.corners[(i + 1) % n];
            sum += a.x * b.z - b.x * a.z;
        }
        sum * 0.5
    }

    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Axis-aligned bounds of this polygon alone
    pub fn bounds(&self) -> BuildingBounds {
        let mut bounds = BuildingBounds::empty();
        for corner in &self.corners {
            bounds.extend(corner);
        }
        bounds
    }
}

/// Which vertical surface of a wall segment a face belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FaceSide {
    /// Room-facing surface
    Inner,
    /// Surface pointing away from the room
    Outer,
}

/// Opaque material/texture grouping identifier.
///
/// The kernel never interprets the content; it only batches geometry
/// sharing the same key into one buffer. Resolution to an actual
/// material descriptor happens in the rendering layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialKey(pub String);

impl MaterialKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MaterialKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Axis-aligned extent of the whole building footprint in the ground
/// plane. Used only by the internal/external wall classifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BuildingBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl BuildingBounds {
    pub fn empty() -> Self {
        Self {
            min_x: f64::MAX,
            max_x: f64::MIN,
            min_z: f64::MAX,
            max_z: f64::MIN,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.min_x <= self.max_x && self.min_z <= self.max_z
    }

    pub fn extend(&mut self, p: &Point2D) {
        self.min_x = self.min_x.min(p.x);
        self.max_x = self.max_x.max(p.x);
        self.min_z = self.min_z.min(p.z);
        self.max_z = self.max_z.max(p.z);
    }

    /// Bounds spanning every room polygon in a plan
    pub fn from_rooms(rooms: &[Room]) -> Option<Self> {
        let mut bounds = Self::empty();
        for room in rooms {
            for corner in &room.polygon.corners {
                bounds.extend(corner);
            }
        }
        bounds.is_valid().then_some(bounds)
    }

    /// Distance from `p` to the nearest side of the bounding rectangle
    pub fn distance_to_nearest_side(&self, p: &Point2D) -> f64 {
        let dx = (p.x - self.min_x).abs().min((self.max_x - p.x).abs());
        let dz = (p.z - self.min_z).abs().min((self.max_z - p.z).abs());
        dx.min(dz)
    }
}

/// A single room: outline plus wall dimensions and per-edge materials.
///
/// `inner_materials` / `outer_materials` must have exactly one entry
/// per polygon edge; the geometry build aborts for that room otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub polygon: Polygon,
    /// Wall thickness in world units
    pub wall_thickness: f64,
    /// Wall height in world units
    pub wall_height: f64,
    /// Per-edge material for the room-facing wall surface
    pub inner_materials: Vec<MaterialKey>,
    /// Per-edge material for the outward-facing wall surface
    pub outer_materials: Vec<MaterialKey>,
    pub floor_material: MaterialKey,
    pub ceiling_material: MaterialKey,
}

impl Room {
    /// Number of wall edges (same as corner count)
    pub fn edge_count(&self) -> usize {
        self.polygon.len()
    }
}

/// A whole plan: rooms, door/window cutouts, and fixture offset tables
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FloorPlan {
    pub rooms: Vec<Room>,
    pub cutouts: Vec<Cutout>,
    pub fixture_offsets: FixtureOffsetTable,
}

impl FloorPlan {
    /// Building-wide bounds over all room polygons, or None for an
    /// empty plan
    pub fn building_bounds(&self) -> Option<BuildingBounds> {
        BuildingBounds::from_rooms(&self.rooms)
    }
}
