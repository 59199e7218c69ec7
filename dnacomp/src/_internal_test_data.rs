use itertools::Itertools;
use lazy_static::lazy_static;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::sequence::{Acid, Sequence, Symbol};

pub const SIMPLE_TEST_SEQUENCE_STR: &str = concat!(
    ">SEQ_ID Escherichia coli fragment\n",
    "GATTTGGGGTTCAAAGCAGTATCGATCAAATAGTAAATCCATTTGTTCAACTCACAGTTTGATCCGTAAC\n",
    "TTGACCA\n",
);

pub const MULTI_RECORD_SEQUENCE_STR: &str = ">first record
ACGT
ac
>second record
GGnnTT
";

lazy_static! {
    pub static ref SIMPLE_TEST_SEQUENCE: Sequence = Sequence::new(
        ">SEQ_ID Escherichia coli fragment",
        acids_from_str(concat!(
            "GATTTGGGGTTCAAAGCAGTATCGATCAAATAGTAAATCCATTTGTTCAACTCACAGTTTGATCCGTAAC",
            "TTGACCA",
        )),
    );
    pub static ref MULTI_RECORD_SEQUENCE: Sequence =
        Sequence::new(">first record", acids_from_str("ACGTACGGTT"));
    pub static ref SEQ_100K: Sequence =
        Sequence::new(">SEQ_100K", repetitive_acids(100_000, 1337));
    pub static ref SEQ_1M: Sequence = Sequence::new(">SEQ_1M", repetitive_acids(1_000_000, 2022));
}

/// Converts a string of `ACGT` characters into acids.
///
/// # Panics
/// This function panics if the string contains any other character.
#[must_use]
pub fn acids_from_str(s: &str) -> Vec<Acid> {
    s.chars()
        .map(|ch| match ch {
            'A' => Acid::A,
            'C' => Acid::C,
            'G' => Acid::G,
            'T' => Acid::T,
            _ => panic!("Invalid acid: {}", ch),
        })
        .collect_vec()
}

/// Returns uniformly distributed acids.
#[must_use]
pub fn random_acids(len: usize, seed: u64) -> Vec<Acid> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

    (0..len)
        .map(|_| Acid::from_usize(rng.gen_range(0..Acid::SIZE)))
        .collect_vec()
}

/// Returns acids built of randomly mutated copies of a few short motifs, so
/// that the context model has something to learn.
#[must_use]
pub fn repetitive_acids(len: usize, seed: u64) -> Vec<Acid> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let motifs = (0..8)
        .map(|_| {
            let motif_len = rng.gen_range(20..200);
            (0..motif_len)
                .map(|_| Acid::from_usize(rng.gen_range(0..Acid::SIZE)))
                .collect_vec()
        })
        .collect_vec();

    let mut acids = Vec::with_capacity(len);
    while acids.len() < len {
        let motif = &motifs[rng.gen_range(0..motifs.len())];
        for &acid in motif {
            if rng.gen_ratio(1, 50) {
                acids.push(Acid::from_usize(rng.gen_range(0..Acid::SIZE)));
            } else {
                acids.push(acid);
            }
        }
    }
    acids.truncate(len);

    acids
}
