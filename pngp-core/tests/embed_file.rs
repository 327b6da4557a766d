use std::fs;
use std::path::Path;

use pngp_core::{embed_file, reveal_file, ChecksumMode, EmbedOptions, Error, Resource, SIGNATURE};
use tempfile::TempDir;

fn chunk(tag: &[u8; 4], payload: &[u8], crc: [u8; 4]) -> Vec<u8> {
    let mut out = (payload.len() as u32).to_be_bytes().to_vec();
    out.extend_from_slice(tag);
    out.extend_from_slice(payload);
    out.extend_from_slice(&crc);
    out
}

/// 1x1 RGBA image with a real IDAT so the file is a plausible PNG.
fn sample_png() -> Vec<u8> {
    let mut out = SIGNATURE.to_vec();
    out.extend(chunk(
        b"IHDR",
        &[0, 0, 0, 1, 0, 0, 0, 1, 8, 6, 0, 0, 0],
        [0x1f, 0x15, 0xc4, 0x89],
    ));
    out.extend(chunk(
        b"IDAT",
        &[0x78, 0x9c, 0x63, 0x60, 0x00, 0x02, 0x00, 0x00, 0x05, 0x00, 0x01],
        [0x0d, 0x0a, 0x2d, 0xb4],
    ));
    out.extend(chunk(b"IEND", &[], [0xae, 0x42, 0x60, 0x82]));
    out
}

fn write_input(dir: &TempDir, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join("input.png");
    fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn embeds_and_reveals_through_files() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, &sample_png());
    let output = dir.path().join("output.png");

    let report = embed_file(&input, &output, b"hi", &EmbedOptions::default()).unwrap();
    assert_eq!(report.total_payload, 13 + 11);
    assert_eq!(report.chunks.len(), 3);

    let written = fs::read(&output).unwrap();
    assert_eq!(written.len(), sample_png().len() + 15);
    assert_eq!(reveal_file(&output).unwrap(), Some(b"hi".to_vec()));
    // the cover itself is untouched
    assert_eq!(fs::read(&input).unwrap(), sample_png());
}

#[test]
fn crc_mode_through_files() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, &sample_png());
    let output = dir.path().join("out.png");
    let options = EmbedOptions {
        checksum: ChecksumMode::Crc32,
    };
    embed_file(&input, &output, b"hi", &options).unwrap();

    let written = fs::read(&output).unwrap();
    let at = 8 + 25;
    let crc = &written[at + 11..at + 15];
    assert_eq!(
        crc,
        &pngp_core::inject::chunk_crc(b"jOJO", b"_hi").to_be_bytes()[..]
    );
}

#[test]
fn missing_input_is_open_error() {
    let dir = TempDir::new().unwrap();
    let err = embed_file(
        &dir.path().join("nope.png"),
        &dir.path().join("out.png"),
        b"",
        &EmbedOptions::default(),
    )
    .unwrap_err();
    match err {
        Error::ResourceOpen { resource, path, .. } => {
            assert_eq!(resource, Resource::Input);
            assert!(path.ends_with("nope.png"));
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert!(!dir.path().join("out.png").exists());
}

#[test]
fn uncreatable_output_is_open_error() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, &sample_png());
    let output = dir.path().join("no/such/dir/out.png");
    let err = embed_file(&input, &output, b"", &EmbedOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::ResourceOpen {
            resource: Resource::Output,
            ..
        }
    ));
}

#[test]
fn rejected_signature_leaves_empty_output() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, b"GIF89a..........");
    let output = dir.path().join("out.png");
    let err = embed_file(&input, &output, b"x", &EmbedOptions::default()).unwrap_err();
    assert!(matches!(err, Error::SignatureMismatch { .. }));
    assert_eq!(fs::metadata(&output).unwrap().len(), 0);
}

#[test]
fn truncated_input_leaves_partial_output() {
    let dir = TempDir::new().unwrap();
    let mut bytes = sample_png();
    bytes.truncate(bytes.len() - 12);
    let input = write_input(&dir, &bytes);
    let output = dir.path().join("out.png");

    let err = embed_file(&input, &output, b"x", &EmbedOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(Path::new(&output).exists());
}
