//! Normal-based offset of the selected vertices into two shells.

use glam::{Mat3, Mat4, Vec3};

use crate::mesh::SculptMesh;

/// Matrix transforming normals: inverse-transpose of the linear part.
///
/// Falls back to the linear part itself when it cannot be inverted.
pub fn normal_matrix(transform: Mat4) -> Mat3 {
    let linear = Mat3::from_mat4(transform);
    if linear.determinant().abs() > f32::EPSILON {
        linear.inverse().transpose()
    } else {
        linear
    }
}

/// World-space front and back positions for the selection.
///
/// `front = world + epsilon * n`, `back = front + offset * n`, with `n` the
/// renormalized world-space normal. Returns `2 * selection.len()` positions:
/// the front block followed by the back block.
///
/// The mesh must have its topology built. A vertex whose stored normal is
/// zero (geometry never updated) gets one from its adjacent faces.
pub fn extrude_vertices(mesh: &SculptMesh, selection: &[u32], epsilon: f32, offset: f32) -> Vec<Vec3> {
    let transform = mesh.transform();
    let normals = normal_matrix(transform);
    let n = selection.len();
    let mut positions = vec![Vec3::ZERO; n * 2];

    for (i, &v) in selection.iter().enumerate() {
        let stored = mesh.normals[v as usize];
        let local = if stored == Vec3::ZERO {
            mesh.area_weighted_normal(v)
        } else {
            stored
        };
        let normal = (normals * local).normalize_or_zero();
        let front = transform.transform_point3(mesh.positions[v as usize]) + normal * epsilon;
        positions[i] = front;
        positions[i + n] = front + normal * offset;
    }

    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::fixtures;

    #[test]
    fn test_identity_offsets_along_normal() {
        let mesh = fixtures::quad_grid(1);
        let positions = extrude_vertices(&mesh, &[0, 3], 0.01, 0.2);

        assert_eq!(positions.len(), 4);
        assert!((positions[0] - Vec3::new(0.0, 0.0, 0.01)).length() < 1e-6);
        assert!((positions[1] - Vec3::new(1.0, 1.0, 0.01)).length() < 1e-6);
        assert!((positions[2] - Vec3::new(0.0, 0.0, 0.21)).length() < 1e-6);
        assert!((positions[3] - Vec3::new(1.0, 1.0, 0.21)).length() < 1e-6);
    }

    #[test]
    fn test_transform_applies_to_position_and_normal() {
        let mut mesh = fixtures::quad_grid(1);
        let transform = Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0))
            * Mat4::from_rotation_x(std::f32::consts::FRAC_PI_2)
            * Mat4::from_scale(Vec3::new(2.0, 2.0, 2.0));
        mesh.set_transform(transform);

        let positions = extrude_vertices(&mesh, &[1], 0.01, 1.0);
        // (1, 0, 0) scaled to (2, 0, 0), unaffected by rotation about X, moved
        // to (7, 0, 0). The +Z normal rotates to -Y and stays unit length.
        let expected_front = Vec3::new(7.0, -0.01, 0.0);
        assert!((positions[0] - expected_front).length() < 1e-5);
        assert!((positions[1] - (expected_front + Vec3::NEG_Y)).length() < 1e-5);
    }

    #[test]
    fn test_non_uniform_scale_keeps_normals_perpendicular() {
        let mut mesh = fixtures::octahedron();
        mesh.set_transform(Mat4::from_scale(Vec3::new(1.0, 3.0, 1.0)));
        let n = normal_matrix(mesh.transform()) * Vec3::new(1.0, 1.0, 0.0);
        // Tangent (1, -1, 0) maps to (1, -3, 0), which stays perpendicular
        let tangent = Mat3::from_mat4(mesh.transform()) * Vec3::new(1.0, -1.0, 0.0);
        assert!(n.dot(tangent).abs() < 1e-5);
    }

    #[test]
    fn test_missing_normals_are_derived_from_faces() {
        let mut mesh = fixtures::quad_grid(1);
        mesh.set_normals(vec![Vec3::ZERO; 4]).unwrap();

        let positions = extrude_vertices(&mesh, &[0, 2], 0.01, 0.5);
        assert!((positions[0] - Vec3::new(0.0, 0.0, 0.01)).length() < 1e-6);
        assert!(((positions[2] - positions[0]).length() - 0.5).abs() < 1e-6);
        assert!(((positions[3] - positions[1]).length() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_singular_transform_is_finite() {
        let mut mesh = fixtures::quad_grid(1);
        mesh.set_transform(Mat4::from_scale(Vec3::new(1.0, 1.0, 0.0)));
        let positions = extrude_vertices(&mesh, &[0, 1, 2, 3], 0.01, 1.0);
        assert!(positions.iter().all(|p| p.is_finite()));
    }
}
