//! Adjacency construction and topology queries for SculptMesh.
//!
//! All queries return duplicate-free lists in traversal order. Extraction
//! relies on that order to build its local index table, so none of these
//! functions sort their output.

use std::collections::HashMap;

use super::SculptMesh;

impl SculptMesh {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Build vertex→face rings, vertex→vertex rings and open-edge flags.
    pub fn init_topology(&mut self) {
        let n = self.vertex_count();
        let mut vertex_faces: Vec<Vec<u32>> = vec![Vec::new(); n];
        let mut vertex_rings: Vec<Vec<u32>> = vec![Vec::new(); n];
        let mut edge_use: HashMap<(u32, u32), u32> = HashMap::new();

        for (face_id, face) in self.faces.iter().enumerate() {
            for &v in face.vertices() {
                vertex_faces[v as usize].push(face_id as u32);
            }

            for (a, b) in face.edges() {
                let key = if a < b { (a, b) } else { (b, a) };
                *edge_use.entry(key).or_default() += 1;

                if !vertex_rings[a as usize].contains(&b) {
                    vertex_rings[a as usize].push(b);
                }
                if !vertex_rings[b as usize].contains(&a) {
                    vertex_rings[b as usize].push(a);
                }
            }
        }

        let mut vertices_on_edge = vec![0u32; n];
        for (&(a, b), &count) in &edge_use {
            if count == 1 {
                vertices_on_edge[a as usize] += 1;
                vertices_on_edge[b as usize] += 1;
            }
        }

        self.vertex_faces = vertex_faces;
        self.vertex_rings = vertex_rings;
        self.vertices_on_edge = vertices_on_edge;
    }

    // ========================================================================
    // Topology Queries
    // ========================================================================

    /// Faces around a vertex.
    pub fn vertex_faces(&self, vertex: u32) -> &[u32] {
        self.vertex_faces
            .get(vertex as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Vertices sharing an edge with a vertex.
    pub fn vertex_ring(&self, vertex: u32) -> &[u32] {
        self.vertex_rings
            .get(vertex as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether a vertex touches an open edge of the mesh.
    pub fn is_on_edge(&self, vertex: u32) -> bool {
        self.vertices_on_edge
            .get(vertex as usize)
            .is_some_and(|&count| count > 0)
    }

    /// All faces touching any of the given vertices.
    pub fn faces_from_vertices(&self, vertices: &[u32]) -> Vec<u32> {
        let mut tagged = vec![false; self.face_count()];
        let mut faces = Vec::new();

        for &v in vertices {
            for &f in self.vertex_faces(v) {
                if !tagged[f as usize] {
                    tagged[f as usize] = true;
                    faces.push(f);
                }
            }
        }

        faces
    }

    /// All vertices used by the given faces.
    pub fn vertices_from_faces(&self, faces: &[u32]) -> Vec<u32> {
        let mut tagged = vec![false; self.vertex_count()];
        let mut vertices = Vec::new();

        for &f in faces {
            let Some(face) = self.faces.get(f as usize) else {
                continue;
            };
            for &v in face.vertices() {
                if !tagged[v as usize] {
                    tagged[v as usize] = true;
                    vertices.push(v);
                }
            }
        }

        vertices
    }

    /// Grow a vertex set by `rings` topological rings.
    ///
    /// The input vertices keep their order at the front of the result.
    pub fn expand_vertices(&self, vertices: &[u32], rings: usize) -> Vec<u32> {
        let mut tagged = vec![false; self.vertex_count()];
        let mut expanded = Vec::with_capacity(vertices.len());

        for &v in vertices {
            if !tagged[v as usize] {
                tagged[v as usize] = true;
                expanded.push(v);
            }
        }

        let mut ring_start = 0;
        for _ in 0..rings {
            let ring_end = expanded.len();
            for i in ring_start..ring_end {
                let v = expanded[i];
                for &neighbor in self.vertex_ring(v) {
                    if !tagged[neighbor as usize] {
                        tagged[neighbor as usize] = true;
                        expanded.push(neighbor);
                    }
                }
            }
            if expanded.len() == ring_end {
                break;
            }
            ring_start = ring_end;
        }

        expanded
    }
}
