use std::fs;

use dnacomp::_internal_test_data::{MULTI_RECORD_SEQUENCE_STR, SEQ_1M};
use dnacomp::codec::{DnaCompressor, DnaDecompressor};
use dnacomp::fasta::writer::FastaWriter;
use dnacomp::{compress, decompress, DecompressorError};
use tempfile::TempDir;

#[test]
fn test_compress_simple_1m() {
    let data = DnaCompressor::new().compress_sequence(&SEQ_1M).unwrap();

    assert!(!data.is_empty());
    assert!(data.len() < SEQ_1M.len() / 4);
}

#[test_log::test]
fn test_round_trip_file_1m() {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("seq_1m.fa");
    let compressed_path = dir.path().join("seq_1m.dnac");
    let output_path = dir.path().join("seq_1m.out.fa");

    let mut text = Vec::new();
    FastaWriter::new(&mut text).write_sequence(&SEQ_1M).unwrap();
    fs::write(&input_path, &text).unwrap();

    compress(&input_path, &compressed_path).unwrap();
    decompress(&compressed_path, &output_path).unwrap();

    assert_eq!(fs::read(&output_path).unwrap(), text);
    assert!(fs::metadata(&compressed_path).unwrap().len() < text.len() as u64 / 4);
}

#[test]
fn test_round_trip_multi_record_file() {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("multi.fa");
    let compressed_path = dir.path().join("multi.dnac");
    let output_path = dir.path().join("multi.out.fa");
    fs::write(&input_path, MULTI_RECORD_SEQUENCE_STR).unwrap();

    compress(&input_path, &compressed_path).unwrap();
    decompress(&compressed_path, &output_path).unwrap();

    assert_eq!(
        fs::read_to_string(&output_path).unwrap(),
        ">first record\nACGTACGGTT\n"
    );
}

#[test]
fn test_truncated_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let compressed_path = dir.path().join("seq_1m.dnac");
    let output_path = dir.path().join("seq_1m.out.fa");

    let data = DnaCompressor::new().compress_sequence(&SEQ_1M).unwrap();
    fs::write(&compressed_path, &data[..data.len() - 4]).unwrap();

    let result = decompress(&compressed_path, &output_path);

    assert!(matches!(result, Err(DecompressorError::CorruptStream(_))));
    assert!(!output_path.exists());
}

#[test]
fn test_decompress_bytes_matches_sequence() {
    let data = DnaCompressor::new().compress_sequence(&SEQ_1M).unwrap();

    let sequence = DnaDecompressor::new().decompress_bytes(&data).unwrap();

    assert_eq!(sequence, *SEQ_1M);
}
