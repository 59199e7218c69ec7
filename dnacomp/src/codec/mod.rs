//! File-level compression and decompression of FASTA data.

mod common;
pub mod compressor;
pub mod decompressor;

pub use compressor::{compress, CompressorError, CompressorParams, DnaCompressor};
pub use decompressor::{
    decompress, CorruptStreamError, DecompressorError, DecompressorParams, DnaDecompressor,
};
