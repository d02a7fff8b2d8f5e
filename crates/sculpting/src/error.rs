//! Error types for mesh construction.

/// Errors raised when a host hands over malformed vertex or face arrays.
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("Vertex array length {0} is not a multiple of 3")]
    InvalidVertexArray(usize),
    #[error("Face array length {0} is not a multiple of 4")]
    InvalidFaceArray(usize),
    #[error("Face {face} has a negative index in a required slot")]
    NegativeFaceIndex { face: usize },
    #[error("Face {face} references vertex {index} but the mesh has {vertex_count} vertices")]
    FaceIndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },
    #[error("Attribute {name} has {len} entries, expected {expected}")]
    AttributeLength {
        name: &'static str,
        len: usize,
        expected: usize,
    },
}
