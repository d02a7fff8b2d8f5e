//! Vertex selection by mask value.

use crate::mesh::{SculptMesh, UNMASKED};

/// Vertices whose mask lies in `(min_exclusive, max_inclusive]`, in index order.
pub fn filter_masked_vertices(mesh: &SculptMesh, min_exclusive: f32, max_inclusive: f32) -> Vec<u32> {
    mesh.masks()
        .iter()
        .enumerate()
        .filter(|&(_, &m)| m > min_exclusive && m <= max_inclusive)
        .map(|(i, _)| i as u32)
        .collect()
}

/// Vertices carrying any mask at all (value below the unmasked default).
pub fn masked_vertices(mesh: &SculptMesh) -> Vec<u32> {
    mesh.masks()
        .iter()
        .enumerate()
        .filter(|&(_, &m)| m < UNMASKED)
        .map(|(i, _)| i as u32)
        .collect()
}
