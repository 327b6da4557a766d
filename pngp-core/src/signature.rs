//! PNG signature check.

use std::io::Read;

use crate::error::{Error, Field, Result};
use crate::wire;

pub const SIGNATURE_LEN: usize = 8;
pub const SIGNATURE: [u8; SIGNATURE_LEN] = [137, 80, 78, 71, 13, 10, 26, 10];

/// True if `candidate` starts with the signature. Only the first
/// `SIGNATURE_LEN` bytes of the candidate are looked at.
pub fn matches(candidate: &[u8]) -> bool {
    candidate.len() >= SIGNATURE_LEN && candidate[..SIGNATURE_LEN] == SIGNATURE
}

/// Consume exactly 8 bytes and check them. Nothing is written; the caller
/// forwards the signature only after this returns Ok.
pub fn read_signature<R: Read + ?Sized>(reader: &mut R) -> Result<[u8; SIGNATURE_LEN]> {
    let found = wire::read_array::<SIGNATURE_LEN, R>(reader, Field::Signature)?;
    if !matches(&found) {
        return Err(Error::SignatureMismatch { found });
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Direction;
    use std::io::Cursor;

    #[test]
    fn accepts_signature_and_consumes_eight_bytes() {
        let mut bytes = SIGNATURE.to_vec();
        bytes.extend_from_slice(b"rest");
        let mut r = Cursor::new(bytes);
        assert_eq!(read_signature(&mut r).unwrap(), SIGNATURE);
        assert_eq!(r.position(), 8);
    }

    #[test]
    fn rejects_wrong_bytes() {
        let mut r = Cursor::new(b"GIF89a\0\0".to_vec());
        match read_signature(&mut r) {
            Err(Error::SignatureMismatch { found }) => assert_eq!(&found, b"GIF89a\0\0"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn rejects_single_flipped_byte() {
        let mut bytes = SIGNATURE;
        bytes[7] ^= 1;
        assert!(!matches(&bytes));
    }

    #[test]
    fn short_stream_is_read_error() {
        let mut r = Cursor::new(SIGNATURE[..5].to_vec());
        assert!(matches!(
            read_signature(&mut r),
            Err(Error::Io {
                direction: Direction::Read,
                field: Field::Signature,
                ..
            })
        ));
    }

    #[test]
    fn longer_candidate_compares_prefix_only() {
        let mut long = SIGNATURE.to_vec();
        long.extend_from_slice(&[0, 0, 0, 13]);
        assert!(matches(&long));
        assert!(!matches(&SIGNATURE[..7]));
    }
}
