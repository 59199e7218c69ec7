use std::fmt::{Display, Formatter};
use std::hash::Hash;

use crate::progress::ByteNum;

pub trait Symbol: PartialEq + Eq + Hash + Copy {
    const SIZE: usize;

    fn to_usize(&self) -> usize;
    fn from_usize(value: usize) -> Self;
}

/// Header (title line) of a nucleotide sequence, including the leading `>`.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Default)]
pub struct SequenceHeader(pub String);

impl SequenceHeader {
    /// Empty header.
    pub const EMPTY: SequenceHeader = SequenceHeader(String::new());

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns this header as string.
    #[inline]
    #[must_use]
    pub fn str(&self) -> &str {
        &self.0
    }
}

impl Display for SequenceHeader {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SequenceHeader {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for SequenceHeader {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Nucleotide sequence: a single header and a flat list of bases.
///
/// All the records of a multi-record FASTA file end up merged into one
/// `Sequence`, keeping only the first header.
#[derive(Clone, Debug, Eq)]
pub struct Sequence {
    header: SequenceHeader,
    acids: Vec<Acid>,
    size: ByteNum,
}

impl Sequence {
    /// Creates a new instance of `Sequence`.
    ///
    /// # Examples
    /// ```
    /// use dnacomp::sequence::{Acid, Sequence};
    ///
    /// let seq = Sequence::new(">SEQ_1", [Acid::A, Acid::C, Acid::G]);
    /// assert_eq!(seq.len(), 3);
    /// ```
    #[must_use]
    pub fn new<T, U>(header: T, acids: U) -> Self
    where
        T: Into<SequenceHeader>,
        U: Into<Vec<Acid>>,
    {
        let header = header.into();
        let acids = acids.into();

        let approximate_size = header.len() + acids.len() + 1;
        Self::with_size(header, acids, ByteNum::new(approximate_size))
    }

    #[must_use]
    pub fn with_size<T, U>(header: T, acids: U, size: ByteNum) -> Self
    where
        T: Into<SequenceHeader>,
        U: Into<Vec<Acid>>,
    {
        Self {
            header: header.into(),
            acids: acids.into(),
            size,
        }
    }

    /// Returns the header of this sequence.
    ///
    /// # Examples
    /// ```
    /// use dnacomp::sequence::{Sequence, SequenceHeader};
    ///
    /// let seq = Sequence::new(">SEQ_1", []);
    /// assert_eq!(seq.header(), &SequenceHeader::from(">SEQ_1"));
    /// ```
    #[must_use]
    pub fn header(&self) -> &SequenceHeader {
        &self.header
    }

    /// Returns the list of acids of this sequence.
    ///
    /// # Examples
    /// ```
    /// use dnacomp::sequence::{Acid, Sequence};
    ///
    /// let seq = Sequence::new("", [Acid::A]);
    /// assert_eq!(seq.acids(), &[Acid::A]);
    /// ```
    #[must_use]
    pub fn acids(&self) -> &[Acid] {
        &self.acids
    }

    /// Returns the number of acids in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.acids.len()
    }

    /// Approximate size of the text representation this sequence was read
    /// from, in bytes.
    #[must_use]
    pub fn size(&self) -> ByteNum {
        self.size
    }

    /// Returns `true` if the sequence contains no acids.
    ///
    /// # Examples
    /// ```
    /// use dnacomp::sequence::{Acid, Sequence};
    ///
    /// assert!(Sequence::new(">empty", []).is_empty());
    /// assert!(!Sequence::new("", [Acid::T]).is_empty());
    /// ```
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.acids.is_empty()
    }
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header && self.acids == other.acids
    }
}

/// Nucleic acid.
///
/// The discriminants are the symbol indices used by the context model and the
/// entropy coder, so they are part of the compressed format.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Acid {
    /// Adenine.
    #[default]
    A = 0,
    /// Cytosine.
    C = 1,
    /// Guanine.
    G = 2,
    /// Thymine.
    T = 3,
}

impl Acid {
    /// Returns the acid with given symbol index, or `None` if the index is
    /// outside of `0..4`.
    #[inline]
    #[must_use]
    pub fn try_from_usize(value: usize) -> Option<Self> {
        match value {
            0 => Some(Acid::A),
            1 => Some(Acid::C),
            2 => Some(Acid::G),
            3 => Some(Acid::T),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_char(&self) -> char {
        match self {
            Acid::A => 'A',
            Acid::C => 'C',
            Acid::G => 'G',
            Acid::T => 'T',
        }
    }
}

impl Symbol for Acid {
    const SIZE: usize = 4;

    #[inline]
    fn to_usize(&self) -> usize {
        *self as usize
    }

    #[inline]
    fn from_usize(value: usize) -> Self {
        Self::try_from_usize(value).expect("Invalid acid symbol index")
    }
}

impl Display for Acid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
