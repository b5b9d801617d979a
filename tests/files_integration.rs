use std::fs;

use fixture_files::{
    create_random_file, create_random_hashed_file, create_random_hashed_file_with_hash_size,
    hash_data, read_file, read_hashed_file, ChunkedFiles, FixtureDir, FixtureError,
    TransferConfig,
};
use proptest::prelude::*;

#[test]
fn random_file_has_requested_size_on_disk() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("temp.bin");
    let written = create_random_file(&path, 2048).expect("create random file");
    assert_eq!(written, 2048);
    assert_eq!(fs::metadata(&path).expect("stat").len(), 2048);
}

#[test]
fn empty_random_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("empty.bin");
    assert_eq!(create_random_file(&path, 0).expect("create"), 0);
    assert_eq!(fs::metadata(&path).expect("stat").len(), 0);
    let (read, digest) = read_hashed_file(&path, 0).expect("read hashed");
    assert_eq!(read, 0);
    assert_eq!(digest, hash_data(&[], 0).expect("hash"));
}

#[test]
fn hashed_write_matches_hashed_read() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("temp.bin");
    let (written, write_digest) = create_random_hashed_file(&path, 2048).expect("write");
    let (read, read_digest) = read_hashed_file(&path, 2048).expect("read");
    assert_eq!(written, read);
    assert_eq!(write_digest, read_digest);
}

#[test]
fn partial_hash_matches_prefix_read_only() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("h.bin");
    let (written, d1) =
        create_random_hashed_file_with_hash_size(&path, 2048, 1024).expect("write");
    assert_eq!(written, 2048);

    let (_, d2) = read_hashed_file(&path, 1024).expect("read prefix");
    assert_eq!(d1, d2);

    let (_, d3) = read_hashed_file(&path, 2048).expect("read full");
    assert_ne!(d1, d3);

    let bytes = read_file(&path, 2048).expect("read bytes");
    assert_eq!(hash_data(&bytes, 1024).expect("hash"), d1);
}

#[test]
fn zero_hash_size_is_empty_digest() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("h.bin");
    let (_, digest) = create_random_hashed_file_with_hash_size(&path, 1500, 0).expect("write");
    assert_eq!(digest, hash_data(b"ignored", 0).expect("hash"));
    assert_eq!(fs::metadata(&path).expect("stat").len(), 1500);
}

#[test]
fn short_file_read_is_size_mismatch() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("short.bin");
    create_random_file(&path, 512).expect("create");
    let err = read_file(&path, 1024).expect_err("short read must fail");
    assert!(err.is_size_mismatch());
}

#[test]
fn small_chunk_size_does_not_leak_into_later_calls() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let small = ChunkedFiles::new(TransferConfig::new(3).expect("config"));
    small
        .create_random_file(dir.path().join("tiny.bin"), 10)
        .expect("create tiny");
    assert_eq!(small.config().chunk_size(), 3);

    let defaults = ChunkedFiles::default();
    assert_eq!(defaults.config().chunk_size(), 1024);
    let written = defaults
        .create_random_file(dir.path().join("big.bin"), 4097)
        .expect("create big");
    assert_eq!(written, 4097);
}

#[test]
fn fixture_dir_round_trip() {
    let fixtures = FixtureDir::temp().expect("temp fixtures");
    let data = fixtures.create_file("plain.bin", 1024).expect("create");
    assert_eq!(fixtures.read_file("plain.bin", 1024).expect("read"), data);

    let (_, d1) = fixtures
        .create_random_hashed_file_with_hash_size("nested/h.bin", 2048, 1000)
        .expect("write");
    let (_, d2) = fixtures.read_hashed_file("nested/h.bin", 1000).expect("read");
    assert_eq!(d1, d2);
    assert_eq!(fixtures.hash_file_prefix("nested/h.bin", 1000).expect("hash"), d1);

    let err = fixtures.read_file("../plain.bin", 1).expect_err("escape");
    assert!(matches!(err, FixtureError::InvalidName { .. }));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn chunked_write_size_and_digest_agree(
        filesize in 0u64..5000,
        chunk_size in 1u64..2048,
        hash_fraction in 0.0f64..=1.0,
    ) {
        let hash_size = ((filesize as f64) * hash_fraction) as u64;
        let hash_size = hash_size.min(filesize);
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("prop.bin");
        let files = ChunkedFiles::new(TransferConfig::new(chunk_size).expect("config"));

        let (written, write_digest) = files
            .create_random_hashed_file_with_hash_size(&path, filesize, hash_size)
            .expect("write");
        prop_assert_eq!(written, filesize);
        prop_assert_eq!(fs::metadata(&path).expect("stat").len(), filesize);

        let (read, read_digest) = files.read_hashed_file(&path, hash_size).expect("read");
        prop_assert_eq!(read, hash_size);
        prop_assert_eq!(write_digest, read_digest);

        let bytes = fs::read(&path).expect("read bytes");
        prop_assert_eq!(hash_data(&bytes, hash_size as usize).expect("hash"), write_digest);
    }

    #[test]
    fn hash_size_past_file_size_is_rejected(filesize in 0u64..1000, extra in 1u64..100) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("prop.bin");
        let result = create_random_hashed_file_with_hash_size(&path, filesize, filesize + extra);
        let rejected = matches!(result, Err(FixtureError::HashSizeExceedsFileSize { .. }));
        prop_assert!(rejected);
    }
}
