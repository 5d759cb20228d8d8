//! Core document model and validation for GLB container analysis.
//!
//! This crate owns the typed scene description (nodes, meshes, materials,
//! animations, accessors, buffers, buffer views), the JSON projection that
//! builds it, the cross-reference validation pass, and the name-to-index
//! lookup layer. The binary envelope itself is handled by the companion
//! `glb-io` crate.

pub mod document;
pub mod error;
pub mod scene_index;
pub mod validate;

pub use document::Document;
pub use error::{GlbError, Result};
pub use scene_index::{Collection, SceneIndex};
