pub mod codec;
pub mod compressor;
pub mod container;
pub mod context;
pub mod fasta;
pub mod model;
pub mod progress;
pub mod sequence;
pub mod sequence_compressor;

#[doc(hidden)]
pub mod _internal_test_data;

pub use codec::{compress, decompress, CompressorError, DecompressorError};
