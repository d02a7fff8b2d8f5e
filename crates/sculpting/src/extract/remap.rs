//! Compaction of source vertex indices into the shell's vertex blocks.
//!
//! The shell stores the front copy of the selection in `0..N` and the back
//! copy in `N..2N`. The table is filled completely before any face is
//! rewritten, then all groups are remapped in one pass.

use super::classify::FaceGroups;
use crate::types::Face;

const UNMAPPED: u32 = u32::MAX;

/// Source index → local index, valid for one extraction.
#[derive(Debug)]
pub struct LocalIndexTable {
    local: Vec<u32>,
    len: u32,
}

impl LocalIndexTable {
    /// Number the selection in order. `source_vertex_count` sizes the lookup.
    pub fn build(selection: &[u32], source_vertex_count: usize) -> Self {
        let mut local = vec![UNMAPPED; source_vertex_count];
        for (i, &v) in selection.iter().enumerate() {
            local[v as usize] = i as u32;
        }
        Self {
            local,
            len: selection.len() as u32,
        }
    }

    /// Size of one vertex block.
    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Local index in the front block.
    ///
    /// Faces only ever reference vertices of their own selection; an unmapped
    /// vertex stays out of range so mesh assembly rejects it.
    pub fn front(&self, vertex: u32) -> u32 {
        let local = self.local[vertex as usize];
        debug_assert!(local != UNMAPPED, "vertex {vertex} is not in the selection");
        local
    }

    /// Local index in the back block.
    pub fn back(&self, vertex: u32) -> u32 {
        self.front(vertex).saturating_add(self.len)
    }
}

/// Rewrite classified faces into shell-local indices.
///
/// Output order: front faces, back faces (offset into the back block), then
/// side walls `(start, end, end + N, start + N)`. Triangles stay triangles.
pub fn remap_and_mirror(groups: &FaceGroups, table: &LocalIndexTable) -> Vec<Face> {
    let mut faces = Vec::with_capacity(groups.face_count());

    faces.extend(groups.front.iter().map(|f| f.map(|v| table.front(v))));
    faces.extend(groups.back.iter().map(|f| f.map(|v| table.back(v))));
    faces.extend(groups.bridges.iter().map(|b| {
        Face::Quad([
            table.front(b.start),
            table.front(b.end),
            table.back(b.end),
            table.back(b.start),
        ])
    }));

    faces
}

/// Flip every face when the back shell lies along the normal.
///
/// Front faces keep the source winding, which then points into the solid.
pub fn orient_outward(faces: &mut [Face], shell_offset: f32) {
    if shell_offset > 0.0 {
        for face in faces.iter_mut() {
            *face = face.reversed();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::classify::Bridge;

    #[test]
    fn test_table_follows_selection_order() {
        let table = LocalIndexTable::build(&[7, 2, 5], 8);
        assert_eq!(table.len(), 3);
        assert_eq!(table.front(7), 0);
        assert_eq!(table.front(2), 1);
        assert_eq!(table.back(5), 5);
    }

    #[test]
    fn test_remap_offsets_back_block() {
        let groups = FaceGroups {
            front: vec![Face::Triangle([10, 11, 12]), Face::Quad([12, 11, 13, 14])],
            back: vec![
                Face::Triangle([10, 11, 12]).reversed(),
                Face::Quad([12, 11, 13, 14]).reversed(),
            ],
            bridges: vec![Bridge { start: 11, end: 10 }],
        };
        let table = LocalIndexTable::build(&[10, 11, 12, 13, 14], 15);
        let faces = remap_and_mirror(&groups, &table);

        assert_eq!(
            faces,
            vec![
                Face::Triangle([0, 1, 2]),
                Face::Quad([2, 1, 3, 4]),
                Face::Triangle([7, 6, 5]),
                Face::Quad([8, 6, 7, 9]),
                Face::Quad([1, 0, 5, 6]),
            ]
        );
    }

    #[test]
    fn test_triangle_stays_triangle_at_vertex_zero() {
        let groups = FaceGroups {
            front: vec![Face::Triangle([3, 4, 5])],
            back: vec![Face::Triangle([5, 4, 3])],
            bridges: Vec::new(),
        };
        let table = LocalIndexTable::build(&[3, 4, 5], 6);
        let faces = remap_and_mirror(&groups, &table);

        // Local vertex 0 is a real corner; the sentinel only exists on the wire
        assert_eq!(faces[0].to_slots(), [0, 1, 2, -1]);
        assert_eq!(faces[1].to_slots(), [5, 4, 3, -1]);
    }

    #[test]
    fn test_orient_outward_only_for_positive_offset() {
        let mut faces = vec![Face::Triangle([0, 1, 2])];
        orient_outward(&mut faces, -0.5);
        assert_eq!(faces[0], Face::Triangle([0, 1, 2]));
        orient_outward(&mut faces, 0.5);
        assert_eq!(faces[0], Face::Triangle([2, 1, 0]));
    }
}
