// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry buffer data structures

use nalgebra::{Point2, Point3, Vector3};

/// Flat triangle-mesh buffers ready for upload by a rendering layer.
///
/// Produced fresh on every build; the kernel never mutates a buffer it
/// has already handed out.
#[derive(Debug, Clone, Default)]
pub struct GeometryBuffer {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Vertex normals (nx, ny, nz)
    pub normals: Vec<f32>,
    /// Texture coordinates (u, v)
    pub uvs: Vec<f32>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
}

impl GeometryBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer with capacity
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            uvs: Vec::with_capacity(vertex_count * 2),
            indices: Vec::with_capacity(index_count),
        }
    }

    /// Add a vertex with normal and texture coordinate
    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>, normal: Vector3<f64>, uv: Point2<f64>) {
        self.positions.push(position.x as f32);
        self.positions.push(position.y as f32);
        self.positions.push(position.z as f32);

        self.normals.push(normal.x as f32);
        self.normals.push(normal.y as f32);
        self.normals.push(normal.z as f32);

        self.uvs.push(uv.x as f32);
        self.uvs.push(uv.y as f32);
    }

    /// Add a triangle
    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }

    /// Merge another buffer into this one
    #[inline]
    pub fn merge(&mut self, other: &GeometryBuffer) {
        if other.is_empty() {
            return;
        }

        let vertex_offset = (self.positions.len() / 3) as u32;

        self.positions.reserve(other.positions.len());
        self.normals.reserve(other.normals.len());
        self.uvs.reserve(other.uvs.len());
        self.indices.reserve(other.indices.len());

        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);

        self.indices
            .extend(other.indices.iter().map(|&i| i + vertex_offset));
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if buffer is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Calculate bounds (min, max)
    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        if self.is_empty() {
            return (Point3::origin(), Point3::origin());
        }

        let mut min = Point3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Point3::new(f32::MIN, f32::MIN, f32::MIN);

        self.positions.chunks_exact(3).for_each(|chunk| {
            let (x, y, z) = (chunk[0], chunk[1], chunk[2]);
            min.x = min.x.min(x);
            min.y = min.y.min(y);
            min.z = min.z.min(z);
            max.x = max.x.max(x);
            max.y = max.y.max(y);
            max.z = max.z.max(z);
        });

        (min, max)
    }

    /// Vertical extent (min_y, max_y) of the buffer, used for fixture
    /// floor alignment
    pub fn vertical_extent(&self) -> (f32, f32) {
        let (min, max) = self.bounds();
        (min.y, max.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_creation() {
        let buffer = GeometryBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.vertex_count(), 0);
        assert_eq!(buffer.triangle_count(), 0);
    }

    #[test]
    fn test_add_vertex() {
        let mut buffer = GeometryBuffer::new();
        buffer.add_vertex(
            Point3::new(1.0, 2.0, 3.0),
            Vector3::new(0.0, 1.0, 0.0),
            Point2::new(0.5, 0.25),
        );
        assert_eq!(buffer.vertex_count(), 1);
        assert_eq!(buffer.positions, vec![1.0, 2.0, 3.0]);
        assert_eq!(buffer.normals, vec![0.0, 1.0, 0.0]);
        assert_eq!(buffer.uvs, vec![0.5, 0.25]);
    }

    #[test]
    fn test_merge_offsets_indices() {
        let mut a = GeometryBuffer::new();
        a.add_vertex(Point3::origin(), Vector3::y(), Point2::origin());
        a.add_triangle(0, 1, 2);

        let mut b = GeometryBuffer::new();
        b.add_vertex(Point3::new(1.0, 1.0, 1.0), Vector3::x(), Point2::origin());
        b.add_triangle(0, 1, 2);

        a.merge(&b);
        assert_eq!(a.vertex_count(), 2);
        assert_eq!(a.triangle_count(), 2);
        assert_eq!(&a.indices[3..], &[1, 2, 3]);
    }

    #[test]
    fn test_vertical_extent() {
        let mut buffer = GeometryBuffer::new();
        buffer.add_vertex(Point3::new(0.0, -1.5, 0.0), Vector3::y(), Point2::origin());
        buffer.add_vertex(Point3::new(0.0, 4.0, 0.0), Vector3::y(), Point2::origin());
        let (min_y, max_y) = buffer.vertical_extent();
        assert!((min_y + 1.5).abs() < 1e-6);
        assert!((max_y - 4.0).abs() < 1e-6);
    }
}
