//! Relaxation of the seam between the shells and the side walls.

use tracing::trace;

use crate::mesh::SculptMesh;

/// Smooth positions around the side walls of an extracted shell.
///
/// Side walls occupy the faces from `bridge_start` to the end of the face
/// array. Their vertices plus one ring are relaxed `iterations` times at full
/// intensity. Returns the number of vertices in the smoothed region.
pub fn smooth_border(mesh: &mut SculptMesh, bridge_start: usize, iterations: usize) -> usize {
    let face_count = mesh.face_count();
    if bridge_start >= face_count {
        return 0;
    }

    let bridges: Vec<u32> = (bridge_start as u32..face_count as u32).collect();
    let region = mesh.expand_vertices(&mesh.vertices_from_faces(&bridges), 1);
    trace!(
        "Smoothing {} border vertices around {} walls",
        region.len(),
        bridges.len()
    );

    for _ in 0..iterations {
        mesh.smooth_positions(&region, 1.0);
    }

    region.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::fixtures;

    #[test]
    fn test_no_walls_no_smoothing() {
        let mut mesh = fixtures::octahedron();
        let before = mesh.positions().to_vec();
        let face_count = mesh.face_count();
        assert_eq!(smooth_border(&mut mesh, face_count, 3), 0);
        assert_eq!(mesh.positions(), before.as_slice());
    }

    #[test]
    fn test_region_limited_to_walls_and_one_ring() {
        let mut mesh = fixtures::quad_grid(4);
        let before = mesh.positions().to_vec();

        // Treat the last face (top-right corner quad) as a wall
        let last = mesh.face_count() - 1;
        let region = smooth_border(&mut mesh, last, 1);
        assert_eq!(region, 8);

        // The opposite corner never moves
        assert_eq!(mesh.positions()[0], before[0]);
    }
}
