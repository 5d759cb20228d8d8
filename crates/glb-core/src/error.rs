//! Error taxonomy for GLB container analysis.
//!
//! Every failure mode has its own inspectable variant so callers (and tests)
//! can match on the exact kind rather than string-compare messages. Each
//! variant carries the offset or field context that triggered it.

use thiserror::Error;

/// Errors that can occur while validating the envelope, parsing the document
/// chunk, or resolving cross-references.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GlbError {
    #[error("container is {len} bytes, too short for the 12-byte GLB header")]
    TruncatedHeader { len: usize },

    #[error("bad magic: expected b\"glTF\", found {found:02x?}")]
    BadMagic { found: [u8; 4] },

    #[error("declared total length {declared} does not match container size {actual}")]
    LengthMismatch { declared: u32, actual: usize },

    #[error("unsupported GLB version {found} (only version 2 is supported)")]
    UnsupportedVersion { found: u32 },

    #[error("chunk at offset {offset} declares length {length}, not a multiple of 4")]
    BadChunkAlignment { offset: usize, length: u32 },

    #[error("first chunk is not the JSON document chunk")]
    MissingDocumentChunk,

    #[error("unexpected chunk type {tag:#010x} at offset {offset}")]
    UnexpectedChunkType { offset: usize, tag: u32 },

    #[error("chunks cover {consumed} bytes but the container declares {declared}")]
    TrailingOrMissingBytes { consumed: usize, declared: usize },

    #[error("malformed document at {path}: {detail}")]
    MalformedDocument { path: String, detail: String },

    #[error("missing required field {path}")]
    MissingRequiredField { path: String },

    #[error("{path} is not a non-negative integer index")]
    InvalidIndex { path: String },

    #[error("{entity}.{field} index {index} is out of bounds (sequence length {bound})")]
    DanglingReference {
        entity: &'static str,
        field: &'static str,
        index: usize,
        bound: usize,
    },

    #[error("node graph contains a cycle through node {node}")]
    CyclicNodeGraph { node: usize },

    #[error("buffer {buffer} has no uri but the container has no binary chunk")]
    MissingBinaryChunk { buffer: usize },
}

pub type Result<T> = std::result::Result<T, GlbError>;
