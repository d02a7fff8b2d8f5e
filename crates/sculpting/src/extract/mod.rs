//! Solid extraction from a masked region.
//!
//! Turns the masked part of a mesh into a closed, two-sided solid:
//! 1. Select masked vertices, the faces touching them and the vertices those
//!    faces span
//! 2. Classify faces into front, mirrored back and side-wall groups
//! 3. Compact indices into a front block and a back block
//! 4. Offset the vertices along their world-space normals
//! 5. Assemble a new mesh and relax the seam around the side walls
//!
//! Nothing is produced when no vertex is masked.

mod assemble;
mod border;
mod classify;
mod extrude;
mod remap;

use sculpting_config::ExtractConfig;
use tracing::{debug, info};

use crate::error::MeshError;
use crate::mask::{filter_masked_vertices, Masking};
use crate::mesh::SculptMesh;
use crate::types::faces_to_slots;

pub use assemble::assemble_shell;
pub use border::smooth_border;
pub use classify::{classify_faces, Bridge, FaceGroups};
pub use extrude::{extrude_vertices, normal_matrix};
pub use remap::{orient_outward, remap_and_mirror, LocalIndexTable};

/// Flat arrays describing an extracted shell.
///
/// `vertices` holds `[x, y, z]` triples, front block then back block.
/// `faces` holds four slots per face: front faces, back faces, then side
/// walls starting at face `bridge_start`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellGeometry {
    pub vertices: Vec<f32>,
    pub faces: Vec<i32>,
    pub bridge_start: usize,
}

impl ShellGeometry {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn face_count(&self) -> usize {
        self.faces.len() / 4
    }
}

/// Counts describing one extraction.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractStats {
    /// Vertices passing the mask threshold
    pub masked_vertices: usize,
    /// Source faces touching the masked vertices
    pub source_faces: usize,
    /// Distinct vertices spanned by those faces (one shell block)
    pub shell_vertices: usize,
    /// Side-wall faces
    pub bridge_faces: usize,
    /// Vertices relaxed along the seam
    pub smoothed_vertices: usize,
}

/// Result of a successful extraction.
#[derive(Debug)]
pub struct ExtractedShell {
    pub mesh: SculptMesh,
    pub stats: ExtractStats,
}

/// Compute the shell arrays for the masked region of `mesh`.
///
/// Returns `None` when no vertex is masked.
pub fn build_shell_geometry(
    mesh: &SculptMesh,
    config: &ExtractConfig,
) -> Option<(ShellGeometry, ExtractStats)> {
    let masked = filter_masked_vertices(mesh, f32::NEG_INFINITY, config.mask_clamp);
    if masked.is_empty() {
        debug!("Extract: no masked vertices");
        return None;
    }

    let source_faces = mesh.faces_from_vertices(&masked);
    let selection = mesh.vertices_from_faces(&source_faces);

    let groups = classify_faces(mesh, &source_faces, config.mask_clamp);
    let table = LocalIndexTable::build(&selection, mesh.vertex_count());
    let mut faces = remap_and_mirror(&groups, &table);

    let offset = config.shell_offset();
    orient_outward(&mut faces, offset);

    let positions = extrude_vertices(mesh, &selection, config.signed_epsilon(), offset);

    let stats = ExtractStats {
        masked_vertices: masked.len(),
        source_faces: source_faces.len(),
        shell_vertices: selection.len(),
        bridge_faces: groups.bridges.len(),
        smoothed_vertices: 0,
    };
    debug!(
        "Extract: {} masked vertices, {} faces, {} walls",
        stats.masked_vertices, stats.source_faces, stats.bridge_faces
    );

    let geometry = ShellGeometry {
        vertices: positions.iter().flat_map(|p| p.to_array()).collect(),
        faces: faces_to_slots(&faces),
        bridge_start: source_faces.len() * 2,
    };
    Some((geometry, stats))
}

/// Extract the masked region of `mesh` as a new closed mesh.
///
/// `Ok(None)` when nothing is masked. Errors only if the shell arrays are
/// inconsistent, which indicates a bug in classification.
pub fn extract_solid(
    mesh: &SculptMesh,
    config: &ExtractConfig,
) -> Result<Option<ExtractedShell>, MeshError> {
    let Some((geometry, mut stats)) = build_shell_geometry(mesh, config) else {
        return Ok(None);
    };

    let (shell, smoothed) = assemble_shell(mesh, &geometry, config.border_smooth_iterations)?;
    stats.smoothed_vertices = smoothed;

    info!(
        "Extracted shell: {} vertices, {} faces (thickness {})",
        shell.vertex_count(),
        shell.face_count(),
        config.thickness
    );
    Ok(Some(ExtractedShell { mesh: shell, stats }))
}

impl Masking {
    /// Extract the masked region with the tool's extraction settings.
    pub fn extract(&self, mesh: &SculptMesh) -> Result<Option<ExtractedShell>, MeshError> {
        extract_solid(mesh, &self.extract)
    }
}
