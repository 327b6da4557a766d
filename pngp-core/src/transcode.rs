//! Chunk stream transcoder: copies every chunk verbatim and splices the
//! secret chunk in right after the header chunk.

use std::io::{Read, Write};

use tracing::{debug, info};

use crate::chunk::ChunkType;
use crate::error::{Field, Result};
use crate::inject::{ChecksumMode, InjectedChunk};
use crate::signature;
use crate::wire::{self, CRC_SIZE, LEN_SIZE, TYPE_SIZE};

/// Knobs for an embed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmbedOptions {
    pub checksum: ChecksumMode,
}

/// Diagnostics for one original chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkReport {
    pub length: u32,
    pub chunk_type: ChunkType,
    pub crc: [u8; CRC_SIZE],
}

impl ChunkReport {
    pub fn crc_hex(&self) -> String {
        hex::encode(self.crc)
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscodeReport {
    /// Original chunks in stream order. The injected chunk is not listed.
    pub chunks: Vec<ChunkReport>,
    /// Sum of the length fields of all original chunks.
    pub total_payload: u64,
    /// Whether a header chunk was seen and the secret chunk written.
    pub injected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Streaming,
    Done,
}

/// Single-use rewriter. Construct with the secret, then `run` it over a
/// reader/writer pair.
pub struct Transcoder {
    injected: InjectedChunk,
    state: State,
    report: TranscodeReport,
}

impl Transcoder {
    pub fn new(secret: &[u8], options: &EmbedOptions) -> Result<Self> {
        Ok(Self {
            injected: InjectedChunk::new(secret, options.checksum)?,
            state: State::Streaming,
            report: TranscodeReport::default(),
        })
    }

    /// Validate the signature, then copy chunks until the end chunk has been
    /// written. Nothing is written if the signature is rejected. Bytes after
    /// the end chunk are left unread.
    pub fn run<R, W>(mut self, reader: &mut R, writer: &mut W) -> Result<TranscodeReport>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        let sig = signature::read_signature(reader)?;
        wire::write_field(writer, &sig, Field::Signature)?;

        while self.state == State::Streaming {
            self.step(reader, writer)?;
        }

        info!(total = self.report.total_payload, "total payload bytes");
        Ok(self.report)
    }

    fn step<R, W>(&mut self, reader: &mut R, writer: &mut W) -> Result<()>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        let length = wire::decode_length(wire::copy_array::<LEN_SIZE, R, W>(
            reader,
            writer,
            Field::Length,
        )?);
        let chunk_type =
            ChunkType::from_bytes(wire::copy_array::<TYPE_SIZE, R, W>(reader, writer, Field::Type)?);
        wire::copy_vec(reader, writer, length, Field::Payload)?;
        let crc = wire::copy_array::<CRC_SIZE, R, W>(reader, writer, Field::Checksum)?;

        let chunk = ChunkReport {
            length,
            chunk_type,
            crc,
        };
        info!(length, chunk_type = %chunk_type, crc = %chunk.crc_hex(), "chunk");
        self.report.total_payload += u64::from(length);
        self.report.chunks.push(chunk);

        match chunk_type {
            ChunkType::Header if !self.report.injected => {
                self.injected.write_to(writer)?;
                self.report.injected = true;
                debug!(length = self.injected.length(), "injected secret chunk");
            }
            ChunkType::End => self.state = State::Done,
            _ => {}
        }
        Ok(())
    }
}

/// Stream-to-stream embed: the whole operation in one call.
pub fn transcode<R, W>(
    reader: &mut R,
    writer: &mut W,
    secret: &[u8],
    options: &EmbedOptions,
) -> Result<TranscodeReport>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    Transcoder::new(secret, options)?.run(reader, writer)
}
