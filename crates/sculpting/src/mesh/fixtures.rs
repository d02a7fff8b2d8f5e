//! Small meshes shared by unit tests.

use glam::Vec3;

use super::SculptMesh;
use crate::types::Face;

/// Flat grid of `cells × cells` quads in the XY plane, normals along +Z.
///
/// Vertex `(i, j)` has index `j * (cells + 1) + i`.
pub(crate) fn quad_grid(cells: u32) -> SculptMesh {
    let side = cells + 1;
    let mut positions = Vec::with_capacity((side * side) as usize);
    for j in 0..side {
        for i in 0..side {
            positions.push(Vec3::new(i as f32, j as f32, 0.0));
        }
    }

    let mut faces = Vec::with_capacity((cells * cells) as usize);
    for j in 0..cells {
        for i in 0..cells {
            let v = j * side + i;
            faces.push(Face::Quad([v, v + 1, v + side + 1, v + side]));
        }
    }

    SculptMesh::from_parts(positions, faces).unwrap()
}

/// Grid vertex index helper matching [`quad_grid`].
pub(crate) fn grid_index(cells: u32, i: u32, j: u32) -> u32 {
    j * (cells + 1) + i
}

/// Unit square split into two triangles along the 0-2 diagonal.
pub(crate) fn two_triangle_square() -> SculptMesh {
    let positions = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ];
    let faces = vec![Face::Triangle([0, 1, 2]), Face::Triangle([0, 2, 3])];
    SculptMesh::from_parts(positions, faces).unwrap()
}

/// Closed octahedron made of triangles (no open edges).
pub(crate) fn octahedron() -> SculptMesh {
    let positions = vec![
        Vec3::X,
        Vec3::NEG_X,
        Vec3::Y,
        Vec3::NEG_Y,
        Vec3::Z,
        Vec3::NEG_Z,
    ];
    let faces = vec![
        Face::Triangle([0, 2, 4]),
        Face::Triangle([2, 1, 4]),
        Face::Triangle([1, 3, 4]),
        Face::Triangle([3, 0, 4]),
        Face::Triangle([2, 0, 5]),
        Face::Triangle([1, 2, 5]),
        Face::Triangle([3, 1, 5]),
        Face::Triangle([0, 3, 5]),
    ];
    SculptMesh::from_parts(positions, faces).unwrap()
}
