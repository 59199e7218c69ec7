//! FASTA-like text format: an optional `>` header line followed by sequence
//! lines.

mod consts;
pub mod reader;
pub mod writer;

pub use consts::FASTA_LINE_WIDTH;
pub(crate) use consts::{FASTA_ACID_TO_BYTE, FASTA_BYTE_TO_ACID, FASTA_HEADER_PREFIX};
