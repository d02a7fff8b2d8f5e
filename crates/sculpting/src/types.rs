//! Core face types.
//!
//! Faces are triangles or quads. Hosts exchange them as four `i32` slots per
//! face with a negative sentinel in the last slot for triangles; inside the
//! crate the two shapes are an explicit enum and the sentinel only exists at
//! the array boundary.

use serde::{Deserialize, Serialize};

use crate::error::MeshError;

/// Fourth-slot value marking a triangle in the flat face array.
pub const TRIANGLE_SENTINEL: i32 = -1;

/// A mesh face referencing vertices by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    Triangle([u32; 3]),
    Quad([u32; 4]),
}

impl Face {
    /// Decode one flat face record.
    ///
    /// Returns `None` if one of the first three slots is negative.
    pub fn from_slots(slots: [i32; 4]) -> Option<Self> {
        let [a, b, c, d] = slots;
        if a < 0 || b < 0 || c < 0 {
            return None;
        }
        let tri = [a as u32, b as u32, c as u32];
        if d < 0 {
            Some(Face::Triangle(tri))
        } else {
            Some(Face::Quad([tri[0], tri[1], tri[2], d as u32]))
        }
    }

    /// Encode as a flat face record.
    pub fn to_slots(&self) -> [i32; 4] {
        match *self {
            Face::Triangle([a, b, c]) => [a as i32, b as i32, c as i32, TRIANGLE_SENTINEL],
            Face::Quad([a, b, c, d]) => [a as i32, b as i32, c as i32, d as i32],
        }
    }

    /// Corner indices in winding order.
    pub fn vertices(&self) -> &[u32] {
        match self {
            Face::Triangle(v) => v,
            Face::Quad(v) => v,
        }
    }

    pub fn is_quad(&self) -> bool {
        matches!(self, Face::Quad(_))
    }

    /// Same face with the opposite winding.
    ///
    /// Swaps the first and third corner: `(1 2 3) -> (3 2 1)` and
    /// `(1 2 3 4) -> (3 2 1 4)`.
    pub fn reversed(&self) -> Self {
        match *self {
            Face::Triangle([a, b, c]) => Face::Triangle([c, b, a]),
            Face::Quad([a, b, c, d]) => Face::Quad([c, b, a, d]),
        }
    }

    /// Apply an index mapping to every corner, keeping the shape.
    pub fn map(&self, mut f: impl FnMut(u32) -> u32) -> Self {
        match *self {
            Face::Triangle([a, b, c]) => Face::Triangle([f(a), f(b), f(c)]),
            Face::Quad([a, b, c, d]) => Face::Quad([f(a), f(b), f(c), f(d)]),
        }
    }

    /// Directed edges in winding order, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let verts = self.vertices();
        let n = verts.len();
        (0..n).map(move |i| (verts[i], verts[(i + 1) % n]))
    }
}

/// Decode a flat face array (four slots per face).
pub fn faces_from_slots(slots: &[i32]) -> Result<Vec<Face>, MeshError> {
    let records: &[[i32; 4]] = bytemuck::try_cast_slice(slots)
        .map_err(|_| MeshError::InvalidFaceArray(slots.len()))?;

    records
        .iter()
        .enumerate()
        .map(|(face, &record)| {
            Face::from_slots(record).ok_or(MeshError::NegativeFaceIndex { face })
        })
        .collect()
}

/// Encode faces into a flat face array (four slots per face).
pub fn faces_to_slots(faces: &[Face]) -> Vec<i32> {
    let records: Vec<[i32; 4]> = faces.iter().map(Face::to_slots).collect();
    bytemuck::cast_slice(&records).to_vec()
}
