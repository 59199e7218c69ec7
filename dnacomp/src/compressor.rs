//! Stack-based rANS entropy coder.
//!
//! The coder keeps a 64-bit state and spills 32-bit words onto a stack. The
//! last symbol put is the first one retrieved, so the compressor has to be fed
//! symbols in reverse order for the decompressor to return them in document
//! order.

use std::error::Error;
use std::fmt::{Display, Formatter};

use log::trace;

use crate::model::{Distribution, SCALE_BITS, SCALE_TOTAL};
use crate::sequence::{Acid, Symbol};

/// Lower bound of the normalized state interval `[RANS_L, 2^63)`.
const RANS_L: u64 = 1 << 31;
const WORD_BITS: u32 = u32::BITS;

/// Error occurring when encoding or decoding the rANS word stream.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RansError {
    /// Requested to encode a symbol with zero (or out-of-range) frequency.
    InvalidFrequency(usize),
    /// The word stream is too short to hold the coder state.
    MissingState(usize),
    /// The stored coder state is outside of the normalized interval.
    InvalidState(u64),
    /// The word stream ended before all the symbols were decoded.
    StreamExhausted,
    /// Symbol lookup failed for given cumulative frequency slot.
    InvalidSymbol(u32),
    /// Some of the words were not consumed after decoding all the symbols.
    TrailingWords(usize),
    /// The coder did not return to its initial state after decoding.
    InvalidFinalState(u64),
}

impl Display for RansError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RansError::InvalidFrequency(symbol_index) => write!(
                f,
                "Symbol {} has zero probability and cannot be encoded",
                symbol_index
            ),
            RansError::MissingState(len) => write!(
                f,
                "Code word stream too short to hold the coder state ({} words)",
                len
            ),
            RansError::InvalidState(state) => write!(f, "Invalid coder state: {:016X}", state),
            RansError::StreamExhausted => write!(f, "Code word stream exhausted"),
            RansError::InvalidSymbol(slot) => {
                write!(f, "No symbol for cumulative frequency {}", slot)
            }
            RansError::TrailingWords(num) => {
                write!(f, "{} code words left after decoding the sequence", num)
            }
            RansError::InvalidFinalState(state) => {
                write!(f, "Invalid coder state after decoding: {:016X}", state)
            }
        }
    }
}

impl Error for RansError {}

pub type RansResult<T> = Result<T, RansError>;

/// Encoding half of the coder.
#[derive(Debug)]
pub struct RansCompressor {
    state: u64,
    words: Vec<u32>,
}

impl RansCompressor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RANS_L,
            words: Vec::new(),
        }
    }

    #[inline]
    pub fn reset(&mut self) {
        self.state = RANS_L;
        self.words.clear();
    }

    /// Pushes a single symbol onto the stack.
    #[inline]
    pub fn put(&mut self, distribution: &Distribution, symbol_index: usize) -> RansResult<()> {
        if symbol_index >= Acid::SIZE || distribution.freq(symbol_index) == 0 {
            return Err(RansError::InvalidFrequency(symbol_index));
        }

        let freq = distribution.freq(symbol_index) as u64;
        let start = distribution.cum_freq(symbol_index) as u64;

        let x_max = ((RANS_L >> SCALE_BITS) << WORD_BITS) * freq;
        let mut x = self.state;
        if x >= x_max {
            self.words.push(x as u32);
            x >>= WORD_BITS;
        }

        self.state = ((x / freq) << SCALE_BITS) + (x % freq) + start;
        Ok(())
    }

    /// Pushes all the `(symbol, distribution)` pairs, given in document order,
    /// starting from the last one.
    pub fn push_reverse<'a, I>(&mut self, pairs: I) -> RansResult<()>
    where
        I: IntoIterator<Item = &'a (Acid, Distribution)>,
        I::IntoIter: DoubleEndedIterator,
    {
        for (acid, distribution) in pairs.into_iter().rev() {
            trace!("Putting {}: freqs {:?}", acid, distribution.freqs());
            self.put(distribution, acid.to_usize())?;
        }

        Ok(())
    }

    /// Spills the final state onto the stack and returns the complete word
    /// stream, bottom of the stack first.
    #[must_use]
    pub fn finalize(&mut self) -> Vec<u32> {
        self.words.push(self.state as u32);
        self.words.push((self.state >> WORD_BITS) as u32);
        self.state = RANS_L;

        std::mem::take(&mut self.words)
    }
}

impl Default for RansCompressor {
    fn default() -> Self {
        Self::new()
    }
}

/// Decoding half of the coder, popping words from the end of the stream.
#[derive(Debug)]
pub struct RansDecompressor<'a> {
    state: u64,
    words: &'a [u32],
}

impl<'a> RansDecompressor<'a> {
    /// Restores the coder to its end-of-encoding state.
    pub fn new(words: &'a [u32]) -> RansResult<Self> {
        let len = words.len();
        if len < 2 {
            return Err(RansError::MissingState(len));
        }

        let state = ((words[len - 1] as u64) << WORD_BITS) | words[len - 2] as u64;
        if state < RANS_L || state >> (2 * WORD_BITS - 1) != 0 {
            return Err(RansError::InvalidState(state));
        }

        Ok(Self {
            state,
            words: &words[..len - 2],
        })
    }

    /// Pops the next symbol (in document order) decoded with given
    /// distribution.
    #[inline]
    pub fn get(&mut self, distribution: &Distribution) -> RansResult<usize> {
        let slot = (self.state & (SCALE_TOTAL as u64 - 1)) as u32;
        let symbol_index = distribution
            .cum_freq_to_symbol_index(slot)
            .ok_or(RansError::InvalidSymbol(slot))?;

        let freq = distribution.freq(symbol_index) as u64;
        let start = distribution.cum_freq(symbol_index) as u64;
        let mut x = freq * (self.state >> SCALE_BITS) + slot as u64 - start;

        if x < RANS_L {
            let (&word, rest) = self.words.split_last().ok_or(RansError::StreamExhausted)?;
            self.words = rest;
            x = (x << WORD_BITS) | word as u64;
        }

        self.state = x;
        Ok(symbol_index)
    }

    /// Checks that the whole stream was consumed and the coder is back in the
    /// state the compressor started from.
    pub fn finish(self) -> RansResult<()> {
        if !self.words.is_empty() {
            return Err(RansError::TrailingWords(self.words.len()));
        }
        if self.state != RANS_L {
            return Err(RansError::InvalidFinalState(self.state));
        }

        Ok(())
    }
}
