//! Error types for chunk stream transcoding.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Which way bytes were moving when an I/O call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Read,
    Write,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Read => f.write_str("read"),
            Direction::Write => f.write_str("write"),
        }
    }
}

/// Structural field being transferred when an I/O call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Signature,
    Length,
    Type,
    Payload,
    Checksum,
    /// Draining buffered output at the end of a run.
    Flush,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Signature => "signature",
            Field::Length => "chunk length",
            Field::Type => "chunk type",
            Field::Payload => "chunk payload",
            Field::Checksum => "chunk checksum",
            Field::Flush => "output flush",
        };
        f.write_str(name)
    }
}

/// Which of the two files could not be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Input,
    Output,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Input => f.write_str("input"),
            Resource::Output => f.write_str("output"),
        }
    }
}

/// Errors that abort a transcode or reveal run.
#[derive(Debug, Error)]
pub enum Error {
    /// The first 8 bytes are not the PNG signature.
    #[error("invalid PNG signature {found:?}")]
    SignatureMismatch {
        /// Bytes actually found at the start of the stream.
        found: [u8; 8],
    },

    /// A short read, failed read or failed write on one of the streams.
    #[error("failed to {direction} {field}: {source}")]
    Io {
        direction: Direction,
        field: Field,
        #[source]
        source: io::Error,
    },

    /// Input could not be opened, or output could not be created.
    #[error("failed to open {resource} file {}: {source}", .path.display())]
    ResourceOpen {
        resource: Resource,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Secret plus separator does not fit a 32-bit chunk length.
    #[error("secret of {len} bytes does not fit in a chunk")]
    SecretTooLarge { len: usize },
}

impl Error {
    pub(crate) fn read(field: Field, source: io::Error) -> Self {
        Error::Io {
            direction: Direction::Read,
            field,
            source,
        }
    }

    pub(crate) fn write(field: Field, source: io::Error) -> Self {
        Error::Io {
            direction: Direction::Write,
            field,
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
