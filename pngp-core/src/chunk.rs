//! Chunk type tags. Only the tags the rewriter acts on get their own variant;
//! everything else is carried as opaque bytes.

use std::fmt;

use crate::wire::TYPE_SIZE;

/// Tag of the header chunk (always first after the signature).
pub const HEADER_TAG: [u8; TYPE_SIZE] = *b"IHDR";
/// Tag of the terminal chunk.
pub const END_TAG: [u8; TYPE_SIZE] = *b"IEND";
/// Tag of the chunk this tool injects.
pub const SECRET_TAG: [u8; TYPE_SIZE] = *b"jOJO";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkType {
    Header,
    End,
    Secret,
    Opaque([u8; TYPE_SIZE]),
}

impl ChunkType {
    pub fn from_bytes(tag: [u8; TYPE_SIZE]) -> Self {
        match tag {
            HEADER_TAG => ChunkType::Header,
            END_TAG => ChunkType::End,
            SECRET_TAG => ChunkType::Secret,
            other => ChunkType::Opaque(other),
        }
    }

    pub fn to_bytes(self) -> [u8; TYPE_SIZE] {
        match self {
            ChunkType::Header => HEADER_TAG,
            ChunkType::End => END_TAG,
            ChunkType::Secret => SECRET_TAG,
            ChunkType::Opaque(tag) => tag,
        }
    }

    /// Tag as text. Bytes outside ASCII are replaced, never rejected.
    pub fn as_text(self) -> String {
        String::from_utf8_lossy(&self.to_bytes()).into_owned()
    }
}

impl From<[u8; TYPE_SIZE]> for ChunkType {
    fn from(tag: [u8; TYPE_SIZE]) -> Self {
        ChunkType::from_bytes(tag)
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}
