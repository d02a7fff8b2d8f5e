//! Construction of the extracted mesh from flat shell arrays.

use crate::error::MeshError;
use crate::mesh::{RenderSync, SculptMesh};

use super::border::smooth_border;
use super::ShellGeometry;

/// Build a standalone mesh from shell geometry.
///
/// Goes through the same flat-array entry points a host would use, smooths
/// the seam before normals are computed, and copies the source's render
/// settings. The result keeps no reference to `source`.
///
/// Returns the mesh and the number of vertices relaxed along the seam.
pub fn assemble_shell(
    source: &SculptMesh,
    geometry: &ShellGeometry,
    border_smooth_iterations: usize,
) -> Result<(SculptMesh, usize), MeshError> {
    let mut mesh = SculptMesh::new();
    mesh.set_vertices(&geometry.vertices)?;
    mesh.set_faces(&geometry.faces)?;

    mesh.init_colors_and_materials();
    mesh.init_topology();
    let smoothed = smooth_border(&mut mesh, geometry.bridge_start, border_smooth_iterations);
    mesh.update_geometry();

    mesh.copy_render_config(source);
    mesh.update_buffers();
    Ok((mesh, smoothed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_index_is_rejected() {
        let source = SculptMesh::new();
        let geometry = ShellGeometry {
            vertices: vec![0.0; 9],
            faces: vec![0, 1, 3, -1],
            bridge_start: 1,
        };
        assert!(matches!(
            assemble_shell(&source, &geometry, 3),
            Err(MeshError::FaceIndexOutOfRange { index: 3, .. })
        ));
    }

    #[test]
    fn test_assembled_mesh_is_initialized() {
        let mut source = SculptMesh::new();
        source.render_config_mut().show_wireframe = true;
        let geometry = ShellGeometry {
            vertices: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            faces: vec![0, 1, 2, -1],
            bridge_start: 1,
        };

        let (mesh, smoothed) = assemble_shell(&source, &geometry, 3).unwrap();
        assert_eq!(smoothed, 0);
        assert_eq!(mesh.masks(), &[1.0, 1.0, 1.0]);
        assert!(mesh.render_config().show_wireframe);
        assert!(mesh.buffer_state().full_rebuild);
        assert!(mesh.normals().iter().all(|n| (n.z - 1.0).abs() < 1e-6));
    }
}
