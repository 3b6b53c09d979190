// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor and ceiling covers
//!
//! Both meshes come from one ear-clipping triangulation of the room
//! outline. The floor sits a hair above y = 0 and faces up; the
//! ceiling sits a hair below the wall top and faces down. Simple
//! concave outlines are fine; self-intersecting outlines are not
//! validated and produce whatever the triangulation produces.

use crate::error::{Error, Result};
use crate::mesh::GeometryBuffer;
use crate::triangulation::triangulate_polygon;
use nalgebra::{Point2, Point3, Vector3};
use planmesh_plan::{MaterialKey, Polygon};

/// Lift above the ground plane to avoid z-fighting with terrain
pub const FLOOR_EPSILON: f64 = 0.01;

/// Drop below the wall top to avoid z-fighting with wall caps
pub const CEILING_EPSILON: f64 = 0.01;

/// Ground-plane texture tiling: world units per texture repeat
pub const COVER_UV_SCALE: f64 = 100.0;

/// Floor and ceiling buffers for one room
#[derive(Debug, Clone)]
pub struct RoomCover {
    pub floor_material: MaterialKey,
    pub ceiling_material: MaterialKey,
    pub floor: GeometryBuffer,
    pub ceiling: GeometryBuffer,
}

/// Build floor and ceiling meshes for a room outline.
///
/// An N-corner simple polygon yields exactly N-2 triangles per mesh.
pub fn build_cover(
    polygon: &Polygon,
    wall_height: f64,
    floor_material: &MaterialKey,
    ceiling_material: &MaterialKey,
) -> Result<RoomCover> {
    if polygon.len() < 3 {
        return Err(Error::DegeneratePolygon(polygon.len()));
    }

    let indices = triangulate_polygon(&polygon.corners)?;
    let ccw = polygon.is_ccw();

    // In the x/z ground plane, forward triangle winding of a CCW
    // outline faces down; the floor reverses it to face up
    let floor = cover_mesh(polygon, &indices, FLOOR_EPSILON, Vector3::y(), !ccw);
    let ceiling = cover_mesh(
        polygon,
        &indices,
        wall_height - CEILING_EPSILON,
        -Vector3::y(),
        ccw,
    );

    Ok(RoomCover {
        floor_material: floor_material.clone(),
        ceiling_material: ceiling_material.clone(),
        floor,
        ceiling,
    })
}

fn cover_mesh(
    polygon: &Polygon,
    indices: &[usize],
    y: f64,
    normal: Vector3<f64>,
    forward: bool,
) -> GeometryBuffer {
    let mut buffer = GeometryBuffer::with_capacity(polygon.len(), indices.len());

    for corner in &polygon.corners {
        buffer.add_vertex(
            Point3::new(corner.x, y, corner.z),
            normal,
            Point2::new(corner.x / COVER_UV_SCALE, corner.z / COVER_UV_SCALE),
        );
    }

    for tri in indices.chunks_exact(3) {
        if forward {
            buffer.add_triangle(tri[0] as u32, tri[1] as u32, tri[2] as u32);
        } else {
            buffer.add_triangle(tri[0] as u32, tri[2] as u32, tri[1] as u32);
        }
    }

    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use planmesh_plan::Point2D;

    fn key(name: &str) -> MaterialKey {
        MaterialKey::new(name)
    }

    fn square(size: f64) -> Polygon {
        Polygon::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(size, 0.0),
            Point2D::new(size, size),
            Point2D::new(0.0, size),
        ])
    }

    fn geometric_normal(buffer: &GeometryBuffer, tri: usize) -> Vector3<f64> {
        let fetch = |idx: u32| {
            let i = idx as usize * 3;
            Point3::new(
                buffer.positions[i] as f64,
                buffer.positions[i + 1] as f64,
                buffer.positions[i + 2] as f64,
            )
        };
        let (a, b, c) = (
            fetch(buffer.indices[tri * 3]),
            fetch(buffer.indices[tri * 3 + 1]),
            fetch(buffer.indices[tri * 3 + 2]),
        );
        (b - a).cross(&(c - a)).normalize()
    }

    #[test]
    fn test_triangle_counts() {
        let cover = build_cover(&square(10.0), 10.0, &key("floor"), &key("ceiling")).unwrap();
        assert_eq!(cover.floor.triangle_count(), 2);
        assert_eq!(cover.ceiling.triangle_count(), 2);

        // Concave L-shape, 6 corners -> 4 triangles per mesh
        let l_shape = Polygon::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 4.0),
            Point2D::new(4.0, 4.0),
            Point2D::new(4.0, 10.0),
            Point2D::new(0.0, 10.0),
        ]);
        let cover = build_cover(&l_shape, 10.0, &key("floor"), &key("ceiling")).unwrap();
        assert_eq!(cover.floor.triangle_count(), 4);
        assert_eq!(cover.ceiling.triangle_count(), 4);
    }

    #[test]
    fn test_floor_faces_up_ceiling_faces_down() {
        let cover = build_cover(&square(10.0), 10.0, &key("floor"), &key("ceiling")).unwrap();

        for tri in 0..cover.floor.triangle_count() {
            assert_relative_eq!(geometric_normal(&cover.floor, tri).y, 1.0, epsilon = 1e-6);
        }
        for tri in 0..cover.ceiling.triangle_count() {
            assert_relative_eq!(geometric_normal(&cover.ceiling, tri).y, -1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_winding_holds_for_clockwise_outline() {
        let mut polygon = square(10.0);
        polygon.corners.reverse();
        let cover = build_cover(&polygon, 10.0, &key("floor"), &key("ceiling")).unwrap();

        assert_relative_eq!(geometric_normal(&cover.floor, 0).y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(geometric_normal(&cover.ceiling, 0).y, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_cover_heights() {
        let cover = build_cover(&square(10.0), 3.0, &key("floor"), &key("ceiling")).unwrap();

        let floor_y = cover.floor.positions[1] as f64;
        let ceiling_y = cover.ceiling.positions[1] as f64;
        assert_relative_eq!(floor_y, FLOOR_EPSILON, epsilon = 1e-6);
        assert_relative_eq!(ceiling_y, 3.0 - CEILING_EPSILON, epsilon = 1e-6);
    }

    #[test]
    fn test_uv_tiling_scale() {
        let cover = build_cover(&square(50.0), 10.0, &key("floor"), &key("ceiling")).unwrap();

        // Corner (50, 50) maps to uv (0.5, 0.5)
        let uvs = &cover.floor.uvs;
        assert!(uvs
            .chunks_exact(2)
            .any(|uv| (uv[0] - 0.5).abs() < 1e-6 && (uv[1] - 0.5).abs() < 1e-6));
    }

    #[test]
    fn test_degenerate_polygon_rejected() {
        let polygon = Polygon::new(vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)]);
        let err = build_cover(&polygon, 10.0, &key("floor"), &key("ceiling")).unwrap_err();
        assert_eq!(err, Error::DegeneratePolygon(2));
    }
}
