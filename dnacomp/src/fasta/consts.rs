use crate::sequence::Acid;

pub(crate) const FASTA_HEADER_PREFIX: u8 = b'>';

/// Number of acids per line in FASTA files produced by the decompressor.
pub const FASTA_LINE_WIDTH: usize = 70;

const FASTA_ACID_NUM: usize = 4;

/// Acid for every input byte; lowercase letters are treated as uppercase and
/// every other byte maps to `None`.
pub(crate) const FASTA_BYTE_TO_ACID: [Option<Acid>; 256] = {
    let mut acids = [None; 256];

    acids[b'A' as usize] = Some(Acid::A);
    acids[b'C' as usize] = Some(Acid::C);
    acids[b'G' as usize] = Some(Acid::G);
    acids[b'T' as usize] = Some(Acid::T);
    acids[b'a' as usize] = Some(Acid::A);
    acids[b'c' as usize] = Some(Acid::C);
    acids[b'g' as usize] = Some(Acid::G);
    acids[b't' as usize] = Some(Acid::T);

    acids
};

pub(crate) const FASTA_ACID_TO_BYTE: [u8; FASTA_ACID_NUM] = {
    let mut bytes = [0; FASTA_ACID_NUM];

    bytes[Acid::A as usize] = b'A';
    bytes[Acid::C as usize] = b'C';
    bytes[Acid::G as usize] = b'G';
    bytes[Acid::T as usize] = b'T';

    bytes
};
