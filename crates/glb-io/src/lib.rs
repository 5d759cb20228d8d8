//! GLB container reading and analysis.
//!
//! This crate handles the binary side of GLB analysis: splitting the
//! length-prefixed envelope into its chunks, assembling a validated
//! [`Container`], and projecting the read-only [`Summary`] consumers see.
//! The typed document model and its validation live in `glb-core`.
//!
//! # Example
//!
//! ```ignore
//! // File reading stays with the caller; this crate is pure parsing.
//! let bytes = std::fs::read("model.glb")?;
//! let summary = glb_io::load(&bytes)?;
//! for animation in &summary.animations {
//!     println!("{}: {} channels", animation.name, animation.channels);
//! }
//! ```

pub mod analyze;
pub mod chunk;
pub mod container;

pub use analyze::{load, summarize, AnimationSummary, Summary, UNNAMED_ANIMATION};
pub use chunk::{split_chunks, Chunks};
pub use container::Container;
pub use glb_core::{Collection, Document, GlbError, Result, SceneIndex};
