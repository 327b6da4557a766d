//! Injected chunk: separator + secret, with a zero or CRC-32 checksum.

use std::io::Write;

use serde::Deserialize;

use crate::chunk::SECRET_TAG;
use crate::error::{Error, Field, Result};
use crate::wire::{self, CRC_SIZE};

/// Byte placed in front of the secret in the injected payload.
pub const SEPARATOR: u8 = b'_';

/// How the injected chunk's checksum field is filled. Original chunks are
/// always copied verbatim regardless of this setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumMode {
    /// Four zero bytes. CRC-validating readers will reject the chunk.
    #[default]
    Zero,
    /// PNG CRC-32 over type tag and payload.
    Crc32,
}

/// PNG chunk CRC: CRC-32 (IEEE) over type tag then payload.
pub fn chunk_crc(tag: &[u8], payload: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(tag);
    hasher.update(payload);
    hasher.finalize()
}

/// Check a stored checksum field against tag and payload.
pub fn verify_crc(tag: &[u8], payload: &[u8], stored: [u8; CRC_SIZE]) -> bool {
    chunk_crc(tag, payload).to_be_bytes() == stored
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectedChunk {
    payload: Vec<u8>,
    checksum: [u8; CRC_SIZE],
}

impl InjectedChunk {
    pub fn new(secret: &[u8], mode: ChecksumMode) -> Result<Self> {
        if secret.len() >= u32::MAX as usize {
            return Err(Error::SecretTooLarge { len: secret.len() });
        }
        let mut payload = Vec::with_capacity(secret.len() + 1);
        payload.push(SEPARATOR);
        payload.extend_from_slice(secret);
        let checksum = match mode {
            ChecksumMode::Zero => [0u8; CRC_SIZE],
            ChecksumMode::Crc32 => chunk_crc(&SECRET_TAG, &payload).to_be_bytes(),
        };
        Ok(Self { payload, checksum })
    }

    /// Declared length: secret length + 1 for the separator.
    pub fn length(&self) -> u32 {
        // bounded in new()
        self.payload.len() as u32
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn checksum(&self) -> [u8; CRC_SIZE] {
        self.checksum
    }

    /// Emit as four consecutive field writes: length, tag, payload, checksum.
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        wire::write_field(writer, &wire::encode_length(self.length()), Field::Length)?;
        wire::write_field(writer, &SECRET_TAG, Field::Type)?;
        wire::write_field(writer, &self.payload, Field::Payload)?;
        wire::write_field(writer, &self.checksum, Field::Checksum)
    }
}
