//! Load-and-summarize entry point.
//!
//! [`load`] is the one consumer-facing operation: bytes in, [`Summary`] or a
//! typed error out. The summary is a pure read-through projection over the
//! already-validated container; no further checking happens here.

use glb_core::{Collection, Result, SceneIndex};
use serde::Serialize;

use crate::container::Container;

/// Display name substituted for animations with no name.
pub const UNNAMED_ANIMATION: &str = "Unnamed Animation";

/// Per-animation summary entry. Counts are the true sequence lengths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnimationSummary {
    pub name: String,
    pub channels: usize,
    pub samplers: usize,
}

/// Summary of a validated container, in original index order. The name lists
/// omit unnamed entities (listing, not indexing).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub nodes: Vec<String>,
    pub meshes: Vec<String>,
    pub materials: Vec<String>,
    pub animations: Vec<AnimationSummary>,
}

/// Parse, validate and summarize a GLB container in one step.
pub fn load(data: &[u8]) -> Result<Summary> {
    let container = Container::from_bytes(data)?;
    Ok(summarize(&container))
}

/// Project a summary from an already-validated container.
pub fn summarize(container: &Container) -> Summary {
    let doc = container.document();
    let index = SceneIndex::new(doc);
    let present = |collection| {
        index
            .names_of(collection)
            .into_iter()
            .flatten()
            .map(str::to_owned)
            .collect()
    };

    Summary {
        nodes: present(Collection::Nodes),
        meshes: present(Collection::Meshes),
        materials: present(Collection::Materials),
        animations: doc
            .animations
            .iter()
            .map(|animation| AnimationSummary {
                name: animation
                    .name
                    .clone()
                    .unwrap_or_else(|| UNNAMED_ANIMATION.to_string()),
                channels: animation.channels.len(),
                samplers: animation.samplers.len(),
            })
            .collect(),
    }
}
