use std::f32::consts::{PI, TAU};

/// Interleaved-free sphere geometry ready for upload as three buffers.
#[derive(Clone, PartialEq, Debug)]
pub struct SphereMesh {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u16>,
}

impl SphereMesh {
    /// UV sphere with `segments` rings and `segments` slices. Vertex count
    /// is `(segments + 1)^2`, so `segments` must stay below 255 for `u16`
    /// indices.
    pub fn uv(radius: f32, segments: u16) -> Self {
        let segments = segments.clamp(3, 254);
        let ring = segments + 1;
        let vertex_count = usize::from(ring) * usize::from(ring);

        let mut positions = Vec::with_capacity(vertex_count * 3);
        let mut normals = Vec::with_capacity(vertex_count * 3);

        for lat in 0..=segments {
            let phi = f32::from(lat) / f32::from(segments) * PI;
            for lon in 0..=segments {
                let theta = f32::from(lon) / f32::from(segments) * TAU;
                let nx = -phi.sin() * theta.cos();
                let ny = phi.cos();
                let nz = phi.sin() * theta.sin();

                normals.extend_from_slice(&[nx, ny, nz]);
                positions.extend_from_slice(&[nx * radius, ny * radius, nz * radius]);
            }
        }

        let mut indices = Vec::with_capacity(usize::from(segments) * usize::from(segments) * 6);
        for lat in 0..segments {
            for lon in 0..segments {
                let a = lat * ring + lon;
                let b = a + ring;
                indices.extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
            }
        }

        Self {
            positions,
            normals,
            indices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_and_index_counts_follow_segments() {
        let mesh = SphereMesh::uv(1.0, 8);
        assert_eq!(mesh.vertex_count(), 81);
        assert_eq!(mesh.normals.len(), mesh.positions.len());
        assert_eq!(mesh.indices.len(), 8 * 8 * 6);
    }

    #[test]
    fn indices_stay_in_range() {
        let mesh = SphereMesh::uv(2.0, 64);
        let max = mesh.vertex_count() as u16;
        assert!(mesh.indices.iter().all(|index| *index < max));
    }

    #[test]
    fn positions_sit_at_radius() {
        let mesh = SphereMesh::uv(2.2, 16);
        for vertex in mesh.positions.chunks(3) {
            let length = (vertex[0] * vertex[0] + vertex[1] * vertex[1] + vertex[2] * vertex[2]).sqrt();
            assert!((length - 2.2).abs() < 1e-4);
        }
    }
}
