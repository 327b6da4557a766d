//! PNG chunk stream rewriter.
//! Copies a PNG chunk by chunk and injects one extra chunk carrying a secret
//! right after the header chunk. Pixel data is never decoded.

pub mod chunk;
pub mod error;
pub mod file;
pub mod inject;
pub mod reveal;
pub mod signature;
pub mod transcode;
pub mod wire;

pub use chunk::ChunkType;
pub use error::{Direction, Error, Field, Resource, Result};
pub use file::{embed_file, embed_stream, reveal_file};
pub use inject::{ChecksumMode, InjectedChunk, SEPARATOR};
pub use reveal::reveal;
pub use signature::SIGNATURE;
pub use transcode::{transcode, ChunkReport, EmbedOptions, TranscodeReport, Transcoder};
