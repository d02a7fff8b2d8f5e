//! Mask painting and solid extraction for sculpted meshes.
//!
//! A mesh carries a per-vertex mask in [0, 1]. The [`mask::Masking`] tool
//! paints, blurs, sharpens, clears and inverts that mask with undo support,
//! and [`extract::extract_solid`] turns the masked region into a separate
//! closed mesh with a configurable thickness.
//!
//! ## Key Components
//!
//! - **Mesh**: Indexed triangle/quad mesh with adjacency and render-sync hooks
//! - **Brush**: Falloff and picking used by mask dabs
//! - **Mask**: Mask field operations and vertex selection
//! - **Undo**: Bounded mask history with stroke grouping
//! - **Extract**: Classification, remapping, extrusion and assembly of shells

pub mod brush;
pub mod error;
pub mod extract;
pub mod mask;
pub mod mesh;
pub mod types;
pub mod undo;

pub use brush::{MaskBrush, PickSource, UniformAlpha};
pub use error::MeshError;
pub use extract::{extract_solid, ExtractStats, ExtractedShell, ShellGeometry};
pub use mask::{filter_masked_vertices, masked_vertices, MaskDab, Masking};
pub use mesh::{BufferState, RenderConfig, RenderSync, SculptMesh, ShadingMode, VertexMaterial};
pub use types::{faces_from_slots, faces_to_slots, Face, TRIANGLE_SENTINEL};
pub use undo::{MaskHistory, MaskUndoEntry};

pub use sculpting_config::{ExtractConfig, MaskBrushConfig, MaskingConfig};
