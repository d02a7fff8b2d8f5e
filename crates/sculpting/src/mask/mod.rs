//! Mask field operations.
//!
//! The mask is a per-vertex scalar in [0, 1] where 1.0 means unmasked and
//! lower values protect the surface. Every mutating operation records an undo
//! entry before touching the mask, clamps the result and requests a buffer
//! update afterwards.

mod select;

use glam::Vec3;
use sculpting_config::{ExtractConfig, MaskingConfig};
use tracing::{debug, trace};

use crate::brush::{MaskBrush, PickSource};
use crate::mesh::{RenderSync, SculptMesh, UNMASKED};
use crate::undo::{invert_masks, MaskHistory, MaskUndoEntry};

pub use select::{filter_masked_vertices, masked_vertices};

/// Values above this are pushed up by `sharpen`, the rest down.
const SHARPEN_PIVOT: f32 = 0.5;
const SHARPEN_RAISE: f32 = 0.1;
const SHARPEN_LOWER: f32 = 1.0;

/// One mask dab, already placed on the surface.
#[derive(Debug, Clone, Copy)]
pub struct MaskDab {
    /// Dab center in mesh-local space
    pub center: Vec3,
    /// Squared brush radius
    pub radius_squared: f32,
    /// Dab strength (unsigned; the brush decides the direction)
    pub intensity: f32,
    /// Falloff hardness in [0, 1]
    pub hardness: f32,
}

/// Masking tool: mask painting, mask filters and solid extraction.
#[derive(Debug)]
pub struct Masking {
    pub brush: MaskBrush,
    pub extract: ExtractConfig,
    pub history: MaskHistory,
}

impl Default for Masking {
    fn default() -> Self {
        Self::new(&MaskingConfig::default())
    }
}

impl Masking {
    pub fn new(config: &MaskingConfig) -> Self {
        Self {
            brush: MaskBrush::from_config(&config.brush),
            extract: config.extract.clone(),
            history: MaskHistory::new(config.max_undo_levels),
        }
    }

    /// Dab using the brush's own intensity and hardness.
    pub fn dab(&self, center: Vec3, radius: f32) -> MaskDab {
        MaskDab {
            center,
            radius_squared: radius * radius,
            intensity: self.brush.intensity,
            hardness: self.brush.hardness,
        }
    }

    // ========================================================================
    // Painting
    // ========================================================================

    /// Start a paint stroke. All dabs until `end_stroke` undo together.
    pub fn begin_stroke(&mut self) {
        self.history.begin_stroke();
    }

    pub fn end_stroke(&mut self) {
        self.history.end_stroke();
    }

    /// Brute-force candidate gathering for a dab.
    ///
    /// With culling enabled and a view direction given, vertices whose normal
    /// points along the view direction (away from the viewer) are skipped.
    pub fn vertices_in_sphere(
        &self,
        mesh: &SculptMesh,
        center: Vec3,
        radius_squared: f32,
        view_direction: Option<Vec3>,
    ) -> Vec<u32> {
        let cull_direction = view_direction.filter(|_| self.brush.culling);
        mesh.positions()
            .iter()
            .zip(mesh.normals())
            .enumerate()
            .filter(|&(_, (p, n))| {
                p.distance_squared(center) <= radius_squared
                    && cull_direction.is_none_or(|dir| n.dot(dir) <= 0.0)
            })
            .map(|(i, _)| i as u32)
            .collect()
    }

    /// Paint the mask of candidate vertices.
    ///
    /// `mask += falloff(dist) * intensity * alpha`, negated for a negative
    /// brush, then clamped to [0, 1].
    pub fn paint(
        &mut self,
        mesh: &mut SculptMesh,
        candidates: &[u32],
        dab: &MaskDab,
        pick: &dyn PickSource,
    ) {
        if candidates.is_empty() || dab.radius_squared <= 0.0 {
            return;
        }
        self.history.capture_values(mesh, candidates);

        let radius = dab.radius_squared.sqrt();
        let intensity = self.brush.signed_intensity(dab.intensity);
        for &i in candidates {
            let position = mesh.positions[i as usize];
            let dist = position.distance(dab.center) / radius;
            let delta = MaskBrush::falloff(dist, dab.hardness) * intensity * pick.alpha(position);
            let mask = &mut mesh.masks[i as usize];
            *mask = (*mask + delta).clamp(0.0, 1.0);
        }
        trace!("Mask dab painted {} vertices", candidates.len());

        mesh.update_mask_buffers();
    }

    // ========================================================================
    // Filters
    // ========================================================================

    /// Spread the mask one ring outward and smooth it.
    ///
    /// Returns false (and records nothing) when no vertex is masked.
    pub fn blur(&mut self, mesh: &mut SculptMesh) -> bool {
        let masked = masked_vertices(mesh);
        if masked.is_empty() {
            return false;
        }
        let vertices = mesh.expand_vertices(&masked, 1);
        self.history.push(MaskUndoEntry::capture(mesh, &vertices));

        let smoothed = mesh.laplacian(&vertices, &mesh.masks);
        for (&v, value) in vertices.iter().zip(smoothed) {
            mesh.masks[v as usize] = value.clamp(0.0, 1.0);
        }
        debug!("Mask blur over {} vertices", vertices.len());

        mesh.update_mask_buffers();
        true
    }

    /// Push masked values toward 0 or 1.
    ///
    /// Values above 0.5 gain 0.1, the others drop by 1.0; both clamped.
    pub fn sharpen(&mut self, mesh: &mut SculptMesh) -> bool {
        let masked = masked_vertices(mesh);
        if masked.is_empty() {
            return false;
        }
        self.history.push(MaskUndoEntry::capture(mesh, &masked));

        for &v in &masked {
            let mask = &mut mesh.masks[v as usize];
            *mask = if *mask > SHARPEN_PIVOT {
                (*mask + SHARPEN_RAISE).min(1.0)
            } else {
                (*mask - SHARPEN_LOWER).max(0.0)
            };
        }
        debug!("Mask sharpen over {} vertices", masked.len());

        mesh.update_mask_buffers();
        true
    }

    /// Remove the mask: every masked vertex goes back to 1.0.
    pub fn clear(&mut self, mesh: &mut SculptMesh) -> bool {
        let masked = masked_vertices(mesh);
        if masked.is_empty() {
            return false;
        }
        self.history.push(MaskUndoEntry::capture(mesh, &masked));

        for &v in &masked {
            mesh.masks[v as usize] = UNMASKED;
        }
        debug!("Mask cleared on {} vertices", masked.len());

        mesh.update_mask_buffers();
        true
    }

    /// `1 - m` over the whole mesh.
    pub fn invert(&mut self, mesh: &mut SculptMesh) {
        self.history.push(MaskUndoEntry::Invert);
        invert_masks(mesh);
        debug!("Mask inverted on {} vertices", mesh.vertex_count());
        mesh.update_mask_buffers();
    }

    // ========================================================================
    // History
    // ========================================================================

    pub fn undo(&mut self, mesh: &mut SculptMesh) -> bool {
        self.history.undo(mesh)
    }

    pub fn redo(&mut self, mesh: &mut SculptMesh) -> bool {
        self.history.redo(mesh)
    }
}
