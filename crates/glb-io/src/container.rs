//! Validated container assembly.

use glb_core::{Document, GlbError, Result};

use crate::chunk;

/// A fully parsed and validated GLB asset: the typed document plus the
/// optional binary blob. Immutable after construction; the whole container
/// is discarded as a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    document: Document,
    binary: Option<Vec<u8>>,
}

impl Container {
    /// Parse a container from the complete file contents.
    ///
    /// Runs the envelope validation, the document projection and the
    /// cross-reference pass, then checks the container-level invariant: a
    /// buffer with no `uri` is backed by the binary chunk, so that chunk
    /// must be present.
    pub fn from_bytes(data: &[u8]) -> Result<Container> {
        let chunks = chunk::split_chunks(data)?;
        let document = Document::from_json(chunks.document)?;

        if chunks.binary.is_none() {
            if let Some(buffer) = document.buffers.iter().position(|b| b.uri.is_none()) {
                return Err(GlbError::MissingBinaryChunk { buffer });
            }
        }

        Ok(Container {
            document,
            binary: chunks.binary.map(<[u8]>::to_vec),
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn binary(&self) -> Option<&[u8]> {
        self.binary.as_deref()
    }
}
