//! Cross-reference validation over a parsed [`Document`].
//!
//! Every index-typed field in the document is checked against the bounds of
//! its target sequence in one uniform pass; the first violation wins. The
//! node graph is then walked depth-first from every node to reject
//! self-references and cycles.

use crate::document::Document;
use crate::error::{GlbError, Result};

/// Validate every cross-reference in the document.
///
/// Checked references: node→mesh, node→children, primitive→accessor
/// (attributes and indices), primitive→material, channel→sampler (within its
/// animation), channel→target node, sampler→input/output accessor,
/// accessor→buffer view, buffer view→buffer.
pub fn validate(doc: &Document) -> Result<()> {
    for node in &doc.nodes {
        if let Some(mesh) = node.mesh {
            check("nodes", "mesh", mesh, doc.meshes.len())?;
        }
        for &child in &node.children {
            check("nodes", "children", child, doc.nodes.len())?;
        }
    }

    for mesh in &doc.meshes {
        for primitive in &mesh.primitives {
            for &accessor in primitive.attributes.values() {
                check("meshes", "primitives.attributes", accessor, doc.accessors.len())?;
            }
            if let Some(indices) = primitive.indices {
                check("meshes", "primitives.indices", indices, doc.accessors.len())?;
            }
            if let Some(material) = primitive.material {
                check("meshes", "primitives.material", material, doc.materials.len())?;
            }
        }
    }

    for animation in &doc.animations {
        for channel in &animation.channels {
            check(
                "animations",
                "channels.sampler",
                channel.sampler,
                animation.samplers.len(),
            )?;
            if let Some(node) = channel.target_node {
                check("animations", "channels.target.node", node, doc.nodes.len())?;
            }
        }
        for sampler in &animation.samplers {
            check("animations", "samplers.input", sampler.input, doc.accessors.len())?;
            check("animations", "samplers.output", sampler.output, doc.accessors.len())?;
        }
    }

    for accessor in &doc.accessors {
        if let Some(view) = accessor.buffer_view {
            check("accessors", "bufferView", view, doc.buffer_views.len())?;
        }
    }

    for view in &doc.buffer_views {
        check("bufferViews", "buffer", view.buffer, doc.buffers.len())?;
    }

    check_node_graph(doc)
}

fn check(entity: &'static str, field: &'static str, index: usize, bound: usize) -> Result<()> {
    if index < bound {
        Ok(())
    } else {
        Err(GlbError::DanglingReference { entity, field, index, bound })
    }
}

const WHITE: u8 = 0; // not yet visited
const GREY: u8 = 1; // on the current walk path
const BLACK: u8 = 2; // subtree completed, known acyclic

/// Depth-first walk over the node graph. Reaching a grey node (one still on
/// the walk path) means the child lists form a cycle; black subtrees are
/// already proven acyclic and are skipped, so the pass is linear in nodes
/// plus edges. The walk keeps its own frame stack rather than recursing, so
/// arbitrarily deep (but valid) node chains cannot exhaust the thread stack.
/// Child indices are already bounds-checked when this runs.
fn check_node_graph(doc: &Document) -> Result<()> {
    let mut color = vec![WHITE; doc.nodes.len()];
    // (node, position of the next child to visit)
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for start in 0..doc.nodes.len() {
        if color[start] != WHITE {
            continue;
        }
        color[start] = GREY;
        stack.push((start, 0));

        while let Some(frame) = stack.last_mut() {
            let (node, cursor) = *frame;
            match doc.nodes[node].children.get(cursor) {
                Some(&child) => {
                    frame.1 += 1;
                    match color[child] {
                        GREY => return Err(GlbError::CyclicNodeGraph { node: child }),
                        WHITE => {
                            color[child] = GREY;
                            stack.push((child, 0));
                        }
                        _ => {}
                    }
                }
                None => {
                    color[node] = BLACK;
                    stack.pop();
                }
            }
        }
    }
    Ok(())
}
