//! Geometry-derived data: vertex normals and Laplacian relaxation.

use std::ops::{Add, Mul};

use glam::Vec3;

use super::SculptMesh;
use crate::types::Face;

impl SculptMesh {
    /// Recompute geometry-derived caches after positions changed.
    pub fn update_geometry(&mut self) {
        self.compute_normals();
    }

    /// Area-weighted vertex normals.
    ///
    /// Quads use the cross product of their diagonals, which is twice the
    /// area vector for planar quads and a stable average for warped ones.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.vertex_count()];

        for face in &self.faces {
            let area_normal = self.face_area_normal(face);
            for &v in face.vertices() {
                normals[v as usize] += area_normal;
            }
        }

        for n in &mut normals {
            *n = n.normalize_or_zero();
        }
        self.normals = normals;
    }

    /// Area-weighted normal of one vertex from its adjacent faces.
    ///
    /// Used when the stored normal is missing. Needs topology.
    pub fn area_weighted_normal(&self, vertex: u32) -> Vec3 {
        self.vertex_faces(vertex)
            .iter()
            .map(|&f| self.face_area_normal(&self.faces[f as usize]))
            .sum::<Vec3>()
            .normalize_or_zero()
    }

    fn face_area_normal(&self, face: &Face) -> Vec3 {
        match *face {
            Face::Triangle([a, b, c]) => {
                let (pa, pb, pc) = (self.position(a), self.position(b), self.position(c));
                (pb - pa).cross(pc - pa)
            }
            Face::Quad([a, b, c, d]) => {
                let (pa, pb, pc, pd) = (
                    self.position(a),
                    self.position(b),
                    self.position(c),
                    self.position(d),
                );
                (pc - pa).cross(pd - pb)
            }
        }
    }

    fn position(&self, vertex: u32) -> Vec3 {
        self.positions[vertex as usize]
    }

    /// Average of each vertex's neighbors over a per-vertex channel.
    ///
    /// Vertices on an open edge only average neighbors that are also on an
    /// open edge so borders do not shrink inward. A vertex without usable
    /// neighbors keeps its own value.
    pub fn laplacian<T>(&self, vertices: &[u32], values: &[T]) -> Vec<T>
    where
        T: Copy + Default + Add<Output = T> + Mul<f32, Output = T>,
    {
        vertices
            .iter()
            .map(|&v| {
                let on_edge = self.is_on_edge(v);
                let mut sum = T::default();
                let mut count = 0usize;
                for &neighbor in self.vertex_ring(v) {
                    if on_edge && !self.is_on_edge(neighbor) {
                        continue;
                    }
                    sum = sum + values[neighbor as usize];
                    count += 1;
                }
                if count == 0 {
                    values[v as usize]
                } else {
                    sum * (1.0 / count as f32)
                }
            })
            .collect()
    }

    /// One Laplacian relaxation pass on positions.
    ///
    /// Two-pass: all targets are computed before any vertex moves.
    pub fn smooth_positions(&mut self, vertices: &[u32], intensity: f32) {
        let targets = self.laplacian(vertices, &self.positions);
        for (&v, target) in vertices.iter().zip(targets) {
            let p = &mut self.positions[v as usize];
            *p = p.lerp(target, intensity);
        }
    }
}
