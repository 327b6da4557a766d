//! Field codec: big-endian chunk lengths and exact-size field transfer.
//!
//! Every read gets its own buffer sized for that field. A short read is an
//! error tagged with the field; nothing is retried.

use std::io::{self, Read, Write};

use crate::error::{Error, Field, Result};

pub const LEN_SIZE: usize = 4;
pub const TYPE_SIZE: usize = 4;
pub const CRC_SIZE: usize = 4;

/// Decode a chunk length field (4 bytes BE).
pub fn decode_length(bytes: [u8; LEN_SIZE]) -> u32 {
    u32::from_be_bytes(bytes)
}

/// Encode a chunk length field (4 bytes BE).
pub fn encode_length(len: u32) -> [u8; LEN_SIZE] {
    len.to_be_bytes()
}

/// Read exactly `N` bytes for `field`.
pub fn read_array<const N: usize, R: Read + ?Sized>(reader: &mut R, field: Field) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    reader
        .read_exact(&mut buf)
        .map_err(|e| Error::read(field, e))?;
    Ok(buf)
}

/// Read exactly `len` bytes for `field`.
/// The buffer grows with the bytes actually read, so a bogus length on a short
/// stream fails with `UnexpectedEof` instead of allocating the declared size up front.
pub fn read_vec<R: Read + ?Sized>(reader: &mut R, len: u32, field: Field) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let n = reader
        .take(u64::from(len))
        .read_to_end(&mut buf)
        .map_err(|e| Error::read(field, e))?;
    if n < len as usize {
        return Err(Error::read(
            field,
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("expected {len} bytes, got {n}"),
            ),
        ));
    }
    Ok(buf)
}

pub fn write_field<W: Write + ?Sized>(writer: &mut W, bytes: &[u8], field: Field) -> Result<()> {
    writer
        .write_all(bytes)
        .map_err(|e| Error::write(field, e))
}

/// Read `N` bytes and write them straight back out. Returns what was copied.
pub fn copy_array<const N: usize, R, W>(reader: &mut R, writer: &mut W, field: Field) -> Result<[u8; N]>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let buf = read_array::<N, R>(reader, field)?;
    write_field(writer, &buf, field)?;
    Ok(buf)
}

/// Read `len` bytes and write them straight back out.
pub fn copy_vec<R, W>(reader: &mut R, writer: &mut W, len: u32, field: Field) -> Result<Vec<u8>>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let buf = read_vec(reader, len, field)?;
    write_field(writer, &buf, field)?;
    Ok(buf)
}
