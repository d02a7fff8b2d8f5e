//! Render buffer synchronization hooks.
//!
//! The crate never talks to the GPU. Operations that change mesh data tell the
//! mesh which buffers are stale through [`RenderSync`], and the host drains the
//! pending state once per frame. Meshes with dynamic topology always need a
//! full rebuild because their index buffers may have changed.

use super::SculptMesh;

/// Buffer updates requested since the host last synchronized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferState {
    /// Positions, normals and indices must be rebuilt
    pub full_rebuild: bool,
    /// Only the color/material/mask buffer changed
    pub materials_dirty: bool,
}

impl BufferState {
    /// Check if any update is pending.
    pub fn is_dirty(&self) -> bool {
        self.full_rebuild || self.materials_dirty
    }
}

/// Capability interface for meshes that feed render buffers.
pub trait RenderSync {
    /// Whether the mesh can change topology between frames.
    fn dynamic_topology(&self) -> bool {
        false
    }

    /// Request a full rebuild of every buffer.
    fn update_buffers(&mut self);

    /// Request an upload of the color/material/mask buffer only.
    fn update_material_buffer(&mut self);

    /// Request the cheapest update that covers a mask change.
    fn update_mask_buffers(&mut self) {
        if self.dynamic_topology() {
            self.update_buffers();
        } else {
            self.update_material_buffer();
        }
    }
}

impl RenderSync for SculptMesh {
    fn dynamic_topology(&self) -> bool {
        self.dynamic_topology
    }

    fn update_buffers(&mut self) {
        self.buffer_state.full_rebuild = true;
        self.buffer_state.materials_dirty = true;
    }

    fn update_material_buffer(&mut self) {
        self.buffer_state.materials_dirty = true;
    }
}

impl SculptMesh {
    /// Pending buffer updates.
    pub fn buffer_state(&self) -> BufferState {
        self.buffer_state
    }

    /// Take the pending buffer updates, leaving the mesh clean.
    pub fn take_buffer_state(&mut self) -> BufferState {
        std::mem::take(&mut self.buffer_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::fixtures;

    #[test]
    fn test_static_mesh_updates_materials_only() {
        let mut mesh = fixtures::two_triangle_square();
        mesh.update_mask_buffers();

        let state = mesh.take_buffer_state();
        assert!(state.materials_dirty);
        assert!(!state.full_rebuild);
        assert!(!mesh.buffer_state().is_dirty());
    }

    #[test]
    fn test_dynamic_topology_rebuilds() {
        let mut mesh = fixtures::two_triangle_square();
        mesh.set_dynamic_topology(true);
        mesh.update_mask_buffers();
        assert!(mesh.buffer_state().full_rebuild);
    }
}
