//! File-level wrappers. Both handles are owned locals, so they are closed on
//! every return path. A failed run may leave a partial output file behind.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::{Error, Field, Resource, Result};
use crate::reveal::reveal;
use crate::transcode::{transcode, EmbedOptions, TranscodeReport};

fn open_input(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| Error::ResourceOpen {
            resource: Resource::Input,
            path: path.to_path_buf(),
            source,
        })
}

fn create_output(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| Error::ResourceOpen {
            resource: Resource::Output,
            path: path.to_path_buf(),
            source,
        })
}

/// Copy `input` to `output`, injecting `secret` after the header chunk.
pub fn embed_file(
    input: &Path,
    output: &Path,
    secret: &[u8],
    options: &EmbedOptions,
) -> Result<TranscodeReport> {
    let mut reader = open_input(input)?;
    let mut writer = create_output(output)?;
    embed_stream(&mut reader, &mut writer, secret, options)
}

/// Transcode, then flush the writer. A flush failure is a write error on
/// `Field::Flush`.
pub fn embed_stream<R, W>(
    reader: &mut R,
    writer: &mut W,
    secret: &[u8],
    options: &EmbedOptions,
) -> Result<TranscodeReport>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let report = transcode(reader, writer, secret, options)?;
    writer.flush().map_err(|e| Error::write(Field::Flush, e))?;
    Ok(report)
}

/// Secret stored in the file at `path`, if any.
pub fn reveal_file(path: &Path) -> Result<Option<Vec<u8>>> {
    let mut reader = open_input(path)?;
    reveal(&mut reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Direction;
    use crate::signature::SIGNATURE;
    use std::io::{self, Cursor};

    /// Buffers writes in memory; every flush fails.
    struct NoFlush(Vec<u8>);

    impl Write for NoFlush {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "device gone"))
        }
    }

    fn minimal_png() -> Vec<u8> {
        let mut out = SIGNATURE.to_vec();
        out.extend_from_slice(&13u32.to_be_bytes());
        out.extend_from_slice(b"IHDR");
        out.extend_from_slice(&[0; 13]);
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(&0u32.to_be_bytes());
        out.extend_from_slice(b"IEND");
        out.extend_from_slice(&[0xae, 0x42, 0x60, 0x82]);
        out
    }

    #[test]
    fn flush_failure_is_write_error_on_flush() {
        let mut r = Cursor::new(minimal_png());
        let mut w = NoFlush(Vec::new());
        let err = embed_stream(&mut r, &mut w, b"hi", &EmbedOptions::default()).unwrap_err();
        match err {
            Error::Io {
                direction: Direction::Write,
                field: Field::Flush,
                source,
            } => assert_eq!(source.to_string(), "device gone"),
            other => panic!("unexpected: {other:?}"),
        }
        // every chunk was written before the flush failed
        assert_eq!(w.0.len(), minimal_png().len() + 15);
    }

    #[test]
    fn flushes_buffered_output_on_success() {
        let mut r = Cursor::new(minimal_png());
        let mut w = BufWriter::with_capacity(1 << 16, Vec::new());
        let report = embed_stream(&mut r, &mut w, b"", &EmbedOptions::default()).unwrap();
        assert_eq!(report.total_payload, 13);
        assert_eq!(w.buffer().len(), 0);
        assert_eq!(w.get_ref().len(), minimal_png().len() + 13);
    }
}
