//! Undo history for mask operations.
//!
//! Every entry carries the data needed to reverse itself: either the mask
//! values of the touched vertices before the change, or a marker for a full
//! inversion (which is its own inverse). Undoing an entry produces the
//! matching redo entry and vice versa.

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use crate::mesh::{RenderSync, SculptMesh};

/// A reversible mask change.
#[derive(Debug, Clone, PartialEq)]
pub enum MaskUndoEntry {
    /// Mask values of `indices` before the change
    Values { indices: Vec<u32>, values: Vec<f32> },
    /// The whole mask was inverted
    Invert,
}

impl MaskUndoEntry {
    /// Capture the current mask values of some vertices.
    pub fn capture(mesh: &SculptMesh, indices: &[u32]) -> Self {
        let values = indices.iter().map(|&i| mesh.masks[i as usize]).collect();
        MaskUndoEntry::Values {
            indices: indices.to_vec(),
            values,
        }
    }

    /// Apply the entry to the mesh and return the entry that reverses it.
    fn apply(self, mesh: &mut SculptMesh) -> Self {
        match self {
            MaskUndoEntry::Values { indices, values } => {
                let inverse = Self::capture(mesh, &indices);
                for (&i, value) in indices.iter().zip(values) {
                    mesh.masks[i as usize] = value;
                }
                inverse
            }
            MaskUndoEntry::Invert => {
                invert_masks(mesh);
                MaskUndoEntry::Invert
            }
        }
    }

    /// Number of vertices the entry restores.
    pub fn len(&self) -> usize {
        match self {
            MaskUndoEntry::Values { indices, .. } => indices.len(),
            MaskUndoEntry::Invert => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, MaskUndoEntry::Values { indices, .. } if indices.is_empty())
    }
}

/// `1 - m` over the whole mask channel.
pub(crate) fn invert_masks(mesh: &mut SculptMesh) {
    for m in &mut mesh.masks {
        *m = 1.0 - *m;
    }
}

/// Values captured during an active stroke.
#[derive(Debug, Default)]
struct StrokeCapture {
    captured: HashSet<u32>,
    indices: Vec<u32>,
    values: Vec<f32>,
}

/// Bounded undo/redo stacks of mask changes.
#[derive(Debug)]
pub struct MaskHistory {
    undo_stack: VecDeque<MaskUndoEntry>,
    redo_stack: Vec<MaskUndoEntry>,
    max_levels: usize,
    stroke: Option<StrokeCapture>,
}

impl Default for MaskHistory {
    fn default() -> Self {
        Self::new(sculpting_config::DEFAULT_MAX_UNDO_LEVELS)
    }
}

impl MaskHistory {
    pub fn new(max_levels: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_levels: max_levels.max(1),
            stroke: None,
        }
    }

    /// Record an entry. Clears the redo stack.
    pub fn push(&mut self, entry: MaskUndoEntry) {
        if entry.is_empty() {
            return;
        }
        self.redo_stack.clear();
        self.undo_stack.push_back(entry);
        while self.undo_stack.len() > self.max_levels {
            self.undo_stack.pop_front();
        }
    }

    /// Start grouping captures into a single entry.
    pub fn begin_stroke(&mut self) {
        if self.stroke.is_some() {
            self.end_stroke();
        }
        self.stroke = Some(StrokeCapture::default());
    }

    /// Finish the active stroke and record its entry.
    pub fn end_stroke(&mut self) {
        let Some(stroke) = self.stroke.take() else {
            return;
        };
        debug!("Mask stroke captured {} vertices", stroke.indices.len());
        self.push(MaskUndoEntry::Values {
            indices: stroke.indices,
            values: stroke.values,
        });
    }

    pub fn is_stroking(&self) -> bool {
        self.stroke.is_some()
    }

    /// Save the current mask values of vertices about to change.
    ///
    /// During a stroke each vertex is captured once, on first touch.
    /// Outside a stroke the capture is recorded as its own entry.
    pub fn capture_values(&mut self, mesh: &SculptMesh, indices: &[u32]) {
        match &mut self.stroke {
            Some(stroke) => {
                for &i in indices {
                    if stroke.captured.insert(i) {
                        stroke.indices.push(i);
                        stroke.values.push(mesh.masks[i as usize]);
                    }
                }
            }
            None => self.push(MaskUndoEntry::capture(mesh, indices)),
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Undo the last entry.
    ///
    /// Returns true if an undo was performed, false if no undo available
    pub fn undo(&mut self, mesh: &mut SculptMesh) -> bool {
        let Some(entry) = self.undo_stack.pop_back() else {
            debug!("Mask undo: no entries available");
            return false;
        };
        debug!("Mask undo: restoring {} vertices", entry.len());
        let redo = entry.apply(mesh);
        self.redo_stack.push(redo);
        mesh.update_mask_buffers();
        true
    }

    /// Redo the last undone entry.
    pub fn redo(&mut self, mesh: &mut SculptMesh) -> bool {
        let Some(entry) = self.redo_stack.pop() else {
            debug!("Mask redo: no entries available");
            return false;
        };
        let undo = entry.apply(mesh);
        self.undo_stack.push_back(undo);
        mesh.update_mask_buffers();
        true
    }

    /// Drop all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.stroke = None;
    }
}
