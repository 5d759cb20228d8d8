//! GLB envelope parsing.
//!
//! A GLB container is a 12-byte header (magic, version, total length)
//! followed by length-prefixed, type-tagged chunks. The first chunk must be
//! the JSON document chunk; an optional second chunk carries raw binary
//! data. Chunks beyond those two are ignored for forward compatibility.
//!
//! [`split_chunks`] is a pure function over the caller's byte slice and
//! returns borrowed sub-slices; the (potentially large) binary chunk is
//! never copied here.

use byteorder::{ByteOrder, LittleEndian};
use glb_core::{GlbError, Result};

/// GLB magic: "glTF" (0x46546C67 little-endian).
pub const GLB_MAGIC: [u8; 4] = *b"glTF";
/// The one supported major version.
pub const GLB_VERSION: u32 = 2;
/// "JSON" chunk type tag.
pub const CHUNK_JSON: u32 = 0x4E4F_534A;
/// "BIN\0" chunk type tag.
pub const CHUNK_BIN: u32 = 0x004E_4942;

const HEADER_LEN: usize = 12;
const CHUNK_HEADER_LEN: usize = 8;

/// The validated chunk payloads of a container, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunks<'a> {
    /// Payload of the JSON document chunk.
    pub document: &'a [u8],
    /// Payload of the binary chunk, if present.
    pub binary: Option<&'a [u8]>,
}

/// Validate the envelope and split it into its chunk payloads.
///
/// Validation is fail-fast in a fixed order: header size, magic, declared
/// total length, version, then per-chunk alignment, type and extent.
pub fn split_chunks(data: &[u8]) -> Result<Chunks<'_>> {
    if data.len() < HEADER_LEN {
        return Err(GlbError::TruncatedHeader { len: data.len() });
    }

    if data[0..4] != GLB_MAGIC {
        let mut found = [0u8; 4];
        found.copy_from_slice(&data[0..4]);
        return Err(GlbError::BadMagic { found });
    }

    let declared = LittleEndian::read_u32(&data[8..12]);
    if declared as usize != data.len() {
        return Err(GlbError::LengthMismatch { declared, actual: data.len() });
    }

    let version = LittleEndian::read_u32(&data[4..8]);
    if version != GLB_VERSION {
        return Err(GlbError::UnsupportedVersion { found: version });
    }

    let mut document = None;
    let mut binary = None;
    let mut offset = HEADER_LEN;
    let mut chunk_count = 0usize;

    while offset < data.len() {
        if data.len() - offset < CHUNK_HEADER_LEN {
            // A stray tail too short to be a chunk sub-header.
            return Err(GlbError::TrailingOrMissingBytes {
                consumed: offset,
                declared: data.len(),
            });
        }
        let length = LittleEndian::read_u32(&data[offset..offset + 4]);
        let tag = LittleEndian::read_u32(&data[offset + 4..offset + 8]);
        if length % 4 != 0 {
            return Err(GlbError::BadChunkAlignment { offset, length });
        }

        let payload_start = offset + CHUNK_HEADER_LEN;
        // checked_add: on 32-bit targets the extent sum can wrap.
        let payload_end = payload_start
            .checked_add(length as usize)
            .filter(|&end| end <= data.len())
            .ok_or(GlbError::TrailingOrMissingBytes {
                consumed: payload_start.saturating_add(length as usize),
                declared: data.len(),
            })?;
        let payload = &data[payload_start..payload_end];

        match chunk_count {
            0 => {
                if tag != CHUNK_JSON {
                    return Err(GlbError::MissingDocumentChunk);
                }
                document = Some(payload);
            }
            1 => {
                if tag != CHUNK_BIN {
                    return Err(GlbError::UnexpectedChunkType { offset, tag });
                }
                binary = Some(payload);
            }
            // Forward compatibility: further chunks are ignored.
            _ => {}
        }

        chunk_count += 1;
        offset = payload_end;
    }

    let document = document.ok_or(GlbError::MissingDocumentChunk)?;
    Ok(Chunks { document, binary })
}
