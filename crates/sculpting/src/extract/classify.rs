//! Face classification for solid extraction.
//!
//! Each face touching the masked region is copied into a front layer and a
//! mirrored back layer. Edges on the border of the region get a bridge that
//! later becomes a side-wall quad between the two layers.
//!
//! A corner is *inside* when its mask is at or above the clamp, or when it
//! lies on an open edge of the source mesh. An edge gets a wall when both its
//! corners are inside and no other classified face shares it, so walls only
//! appear where the region ends (at unselected faces or at the open border).

use std::collections::HashMap;

use crate::mesh::SculptMesh;
use crate::types::Face;

/// A border edge to close with a side wall.
///
/// `start -> end` runs opposite to the edge's direction in its front face, so
/// the wall quad `(start, end, end', start')` matches the front layer's winding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bridge {
    pub start: u32,
    pub end: u32,
}

/// Classified faces, still using source vertex indices.
#[derive(Debug, Default)]
pub struct FaceGroups {
    pub front: Vec<Face>,
    pub back: Vec<Face>,
    pub bridges: Vec<Bridge>,
}

impl FaceGroups {
    /// Total number of faces the shell will have.
    pub fn face_count(&self) -> usize {
        self.front.len() + self.back.len() + self.bridges.len()
    }
}

fn is_inside(mesh: &SculptMesh, vertex: u32, mask_clamp: f32) -> bool {
    mesh.masks[vertex as usize] >= mask_clamp || mesh.is_on_edge(vertex)
}

fn edge_key(a: u32, b: u32) -> (u32, u32) {
    if a < b { (a, b) } else { (b, a) }
}

/// Undirected edge use counts within a face subset.
fn count_edge_uses(mesh: &SculptMesh, faces: &[u32]) -> HashMap<(u32, u32), u32> {
    let mut edge_use = HashMap::with_capacity(faces.len() * 4);
    for &f in faces {
        for (a, b) in mesh.faces[f as usize].edges() {
            *edge_use.entry(edge_key(a, b)).or_default() += 1;
        }
    }
    edge_use
}

/// Build front, back and bridge groups for the given source faces.
pub fn classify_faces(mesh: &SculptMesh, faces: &[u32], mask_clamp: f32) -> FaceGroups {
    // Worst case every quad bridges all four edges
    let mut groups = FaceGroups {
        front: Vec::with_capacity(faces.len()),
        back: Vec::with_capacity(faces.len()),
        bridges: Vec::with_capacity(faces.len() * 4),
    };
    let inside = |v: u32| is_inside(mesh, v, mask_clamp);
    let edge_use = count_edge_uses(mesh, faces);

    for &f in faces {
        let face = mesh.faces[f as usize];
        groups.front.push(face);
        groups.back.push(face.reversed());

        let bridges = &mut groups.bridges;
        let mut bridge = |start: u32, end: u32| {
            if edge_use.get(&edge_key(start, end)) == Some(&1) {
                bridges.push(Bridge { start, end });
            }
        };

        match face {
            Face::Triangle([v1, v2, v3]) => {
                let (b1, b2, b3) = (inside(v1), inside(v2), inside(v3));
                if b2 {
                    if b1 {
                        bridge(v2, v1);
                    }
                    if b3 {
                        bridge(v3, v2);
                    }
                }
                if b1 && b3 {
                    bridge(v1, v3);
                }
            }
            Face::Quad([v1, v2, v3, v4]) => {
                let (b1, b2, b3, b4) = (inside(v1), inside(v2), inside(v3), inside(v4));
                if b2 {
                    if b1 {
                        bridge(v2, v1);
                    }
                    if b3 {
                        bridge(v3, v2);
                    }
                }
                if b4 {
                    if b1 {
                        bridge(v1, v4);
                    }
                    if b3 {
                        bridge(v4, v3);
                    }
                }
            }
        }
    }

    groups
}
