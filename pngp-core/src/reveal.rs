//! Read back a secret written by the transcoder.

use std::io::Read;

use tracing::debug;

use crate::chunk::ChunkType;
use crate::error::{Field, Result};
use crate::inject::SEPARATOR;
use crate::signature;
use crate::wire::{self, CRC_SIZE, LEN_SIZE, TYPE_SIZE};

/// Walk the chunk stream up to the end chunk and return the first secret
/// chunk's payload without its separator. `None` if there is no secret chunk.
pub fn reveal<R: Read + ?Sized>(reader: &mut R) -> Result<Option<Vec<u8>>> {
    signature::read_signature(reader)?;

    let mut found = None;
    loop {
        let length = wire::decode_length(wire::read_array::<LEN_SIZE, R>(reader, Field::Length)?);
        let chunk_type =
            ChunkType::from_bytes(wire::read_array::<TYPE_SIZE, R>(reader, Field::Type)?);
        let payload = wire::read_vec(reader, length, Field::Payload)?;
        wire::read_array::<CRC_SIZE, R>(reader, Field::Checksum)?;

        match chunk_type {
            ChunkType::Secret if found.is_none() => {
                debug!(length, "found secret chunk");
                found = Some(strip_separator(payload));
            }
            ChunkType::End => return Ok(found),
            _ => {}
        }
    }
}

fn strip_separator(mut payload: Vec<u8>) -> Vec<u8> {
    if payload.first() == Some(&SEPARATOR) {
        payload.remove(0);
    }
    payload
}
