//! Indexed sculpt mesh used as the host for masking and extraction.
//!
//! Stores per-vertex attributes as parallel arrays (positions, normals,
//! colors, materials, mask) and faces as [`Face`] values. Adjacency is built
//! once by [`SculptMesh::init_topology`] and queried through the methods in
//! `topology.rs`.

mod buffers;
mod geometry;
mod topology;

#[cfg(test)]
pub(crate) mod fixtures;

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::MeshError;
use crate::types::{faces_from_slots, Face};

pub use buffers::{BufferState, RenderSync};

/// Default vertex color (white)
pub const DEFAULT_COLOR: Vec3 = Vec3::ONE;

/// Mask value of an untouched vertex. 1.0 means unmasked.
pub const UNMASKED: f32 = 1.0;

/// Per-vertex PBR material channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VertexMaterial {
    pub roughness: f32,
    pub metalness: f32,
}

impl Default for VertexMaterial {
    fn default() -> Self {
        Self {
            roughness: 0.18,
            metalness: 0.08,
        }
    }
}

/// Shading mode used when rendering a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShadingMode {
    #[default]
    Pbr,
    Matcap,
    Normal,
    Uv,
}

/// Per-mesh render settings, copied onto meshes derived from another one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub shading: ShadingMode,
    pub flat_shading: bool,
    pub show_wireframe: bool,
    pub matcap_index: u32,
    pub alpha: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shading: ShadingMode::default(),
            flat_shading: false,
            show_wireframe: false,
            matcap_index: 0,
            alpha: 1.0,
        }
    }
}

/// Indexed triangle/quad mesh with a mask channel.
#[derive(Debug, Clone)]
pub struct SculptMesh {
    pub(crate) positions: Vec<Vec3>,
    pub(crate) normals: Vec<Vec3>,
    pub(crate) colors: Vec<Vec3>,
    pub(crate) materials: Vec<VertexMaterial>,
    pub(crate) masks: Vec<f32>,
    pub(crate) faces: Vec<Face>,
    /// Faces around each vertex
    pub(crate) vertex_faces: Vec<Vec<u32>>,
    /// Vertices sharing an edge with each vertex
    pub(crate) vertex_rings: Vec<Vec<u32>>,
    /// Number of open (single-face) edges touching each vertex
    pub(crate) vertices_on_edge: Vec<u32>,
    transform: Mat4,
    render_config: RenderConfig,
    dynamic_topology: bool,
    pub(crate) buffer_state: BufferState,
}

impl Default for SculptMesh {
    fn default() -> Self {
        Self::new()
    }
}

impl SculptMesh {
    /// Create an empty mesh with an identity transform.
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            colors: Vec::new(),
            materials: Vec::new(),
            masks: Vec::new(),
            faces: Vec::new(),
            vertex_faces: Vec::new(),
            vertex_rings: Vec::new(),
            vertices_on_edge: Vec::new(),
            transform: Mat4::IDENTITY,
            render_config: RenderConfig::default(),
            dynamic_topology: false,
            buffer_state: BufferState::default(),
        }
    }

    /// Build a fully initialized mesh from positions and faces.
    pub fn from_parts(positions: Vec<Vec3>, faces: Vec<Face>) -> Result<Self, MeshError> {
        let mut mesh = Self::new();
        mesh.set_positions(positions);
        mesh.set_face_list(faces)?;
        mesh.init();
        Ok(mesh)
    }

    /// Initialize attributes, adjacency and normals.
    pub fn init(&mut self) {
        self.init_colors_and_materials();
        self.init_topology();
        self.update_geometry();
    }

    // ========================================================================
    // Array entry points
    // ========================================================================

    /// Set positions from a flat `[x, y, z, ...]` array.
    pub fn set_vertices(&mut self, flat: &[f32]) -> Result<(), MeshError> {
        if flat.len() % 3 != 0 {
            return Err(MeshError::InvalidVertexArray(flat.len()));
        }
        let positions = flat
            .chunks_exact(3)
            .map(|p| Vec3::new(p[0], p[1], p[2]))
            .collect();
        self.set_positions(positions);
        Ok(())
    }

    /// Set positions, resizing the other per-vertex arrays to match.
    pub fn set_positions(&mut self, positions: Vec<Vec3>) {
        let n = positions.len();
        self.positions = positions;
        self.normals.resize(n, Vec3::ZERO);
        self.colors.resize(n, DEFAULT_COLOR);
        self.materials.resize(n, VertexMaterial::default());
        self.masks.resize(n, UNMASKED);
        self.vertex_faces.clear();
        self.vertex_rings.clear();
        self.vertices_on_edge.clear();
    }

    /// Set faces from a flat four-slot array (`-1` in the last slot for triangles).
    pub fn set_faces(&mut self, flat: &[i32]) -> Result<(), MeshError> {
        let faces = faces_from_slots(flat)?;
        self.set_face_list(faces)
    }

    /// Set faces, checking every index against the vertex count.
    pub fn set_face_list(&mut self, faces: Vec<Face>) -> Result<(), MeshError> {
        let vertex_count = self.vertex_count();
        for (face, f) in faces.iter().enumerate() {
            if let Some(&index) = f.vertices().iter().find(|&&v| v as usize >= vertex_count) {
                return Err(MeshError::FaceIndexOutOfRange {
                    face,
                    index,
                    vertex_count,
                });
            }
        }
        self.faces = faces;
        self.vertex_faces.clear();
        self.vertex_rings.clear();
        self.vertices_on_edge.clear();
        Ok(())
    }

    /// Replace vertex normals.
    pub fn set_normals(&mut self, normals: Vec<Vec3>) -> Result<(), MeshError> {
        if normals.len() != self.vertex_count() {
            return Err(MeshError::AttributeLength {
                name: "normals",
                len: normals.len(),
                expected: self.vertex_count(),
            });
        }
        self.normals = normals;
        Ok(())
    }

    /// Replace the mask channel. Values are clamped to [0, 1].
    pub fn set_masks(&mut self, masks: Vec<f32>) -> Result<(), MeshError> {
        if masks.len() != self.vertex_count() {
            return Err(MeshError::AttributeLength {
                name: "masks",
                len: masks.len(),
                expected: self.vertex_count(),
            });
        }
        self.masks = masks.into_iter().map(|m| m.clamp(0.0, 1.0)).collect();
        Ok(())
    }

    /// Reset colors, materials and mask to their defaults.
    pub fn init_colors_and_materials(&mut self) {
        let n = self.vertex_count();
        self.colors = vec![DEFAULT_COLOR; n];
        self.materials = vec![VertexMaterial::default(); n];
        self.masks = vec![UNMASKED; n];
    }

    /// Copy the render settings of another mesh.
    pub fn copy_render_config(&mut self, other: &SculptMesh) {
        self.render_config = other.render_config.clone();
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    pub fn materials(&self) -> &[VertexMaterial] {
        &self.materials
    }

    pub fn masks(&self) -> &[f32] {
        &self.masks
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Open-edge count per vertex (0 for interior vertices).
    pub fn vertices_on_edge(&self) -> &[u32] {
        &self.vertices_on_edge
    }

    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    pub fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
    }

    pub fn render_config(&self) -> &RenderConfig {
        &self.render_config
    }

    pub fn render_config_mut(&mut self) -> &mut RenderConfig {
        &mut self.render_config
    }

    /// Enable the dynamic topology capability (full buffer rebuilds).
    pub fn set_dynamic_topology(&mut self, enabled: bool) {
        self.dynamic_topology = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_entry_points() {
        let mut mesh = SculptMesh::new();
        mesh.set_vertices(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0])
            .unwrap();
        mesh.set_faces(&[0, 1, 2, -1]).unwrap();
        mesh.init();

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.faces()[0], Face::Triangle([0, 1, 2]));
        assert!(mesh.masks().iter().all(|&m| m == UNMASKED));
    }

    #[test]
    fn test_bad_vertex_array() {
        let mut mesh = SculptMesh::new();
        assert!(matches!(
            mesh.set_vertices(&[0.0, 1.0]),
            Err(MeshError::InvalidVertexArray(2))
        ));
    }

    #[test]
    fn test_face_index_out_of_range() {
        let mut mesh = SculptMesh::new();
        mesh.set_vertices(&[0.0; 9]).unwrap();
        let err = mesh.set_faces(&[0, 1, 2, -1, 0, 1, 3, -1]).unwrap_err();
        assert!(matches!(
            err,
            MeshError::FaceIndexOutOfRange {
                face: 1,
                index: 3,
                vertex_count: 3
            }
        ));
    }

    #[test]
    fn test_set_masks_clamps() {
        let mut mesh = fixtures::two_triangle_square();
        mesh.set_masks(vec![-0.5, 0.25, 1.0, 7.0]).unwrap();
        assert_eq!(mesh.masks(), &[0.0, 0.25, 1.0, 1.0]);
        assert!(mesh.set_masks(vec![0.0]).is_err());
    }

    #[test]
    fn test_copy_render_config() {
        let mut source = fixtures::two_triangle_square();
        source.render_config_mut().flat_shading = true;
        source.render_config_mut().shading = ShadingMode::Matcap;

        let mut copy = SculptMesh::new();
        copy.copy_render_config(&source);
        assert_eq!(copy.render_config(), source.render_config());
    }
}
