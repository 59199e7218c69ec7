use std::collections::HashMap;

use crate::context::ContextKey;
use crate::sequence::{Acid, Symbol};

/// Number of bits of the fixed-point probabilities used by the entropy coder.
pub const SCALE_BITS: u32 = 24;

/// Sum of all the frequencies of a [`Distribution`].
pub const SCALE_TOTAL: u32 = 1 << SCALE_BITS;

/// Per-symbol occurrence counts of a single context.
///
/// Every count starts at 1 (add-one smoothing), so no symbol ever gets a zero
/// probability.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SymbolCounts([u32; Acid::SIZE]);

impl SymbolCounts {
    /// Counts of a context seen for the first time.
    pub const INITIAL: SymbolCounts = SymbolCounts([1; Acid::SIZE]);

    #[inline]
    #[must_use]
    pub fn get(&self) -> &[u32; Acid::SIZE] {
        &self.0
    }

    #[inline]
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&count| count as u64).sum()
    }

    #[inline]
    fn increment(&mut self, symbol_index: usize) {
        self.0[symbol_index] = self.0[symbol_index].saturating_add(1);
    }

    /// Returns the probability of each symbol, as `count / total`.
    ///
    /// # Examples
    /// ```
    /// use dnacomp::model::SymbolCounts;
    ///
    /// assert_eq!(SymbolCounts::INITIAL.probabilities(), [0.25; 4]);
    /// ```
    #[must_use]
    pub fn probabilities(&self) -> [f64; Acid::SIZE] {
        let total = self.total() as f64;
        self.0.map(|count| count as f64 / total)
    }

    /// Quantizes the counts into a fixed-point [`Distribution`] summing up to
    /// [`SCALE_TOTAL`].
    ///
    /// Only integer arithmetic is used, so the result is the same on every
    /// platform. Each symbol gets `1 + count * (SCALE_TOTAL - 4) / total`; the
    /// rounding remainder goes to the first of the most frequent symbols.
    ///
    /// # Examples
    /// ```
    /// use dnacomp::model::{SymbolCounts, SCALE_TOTAL};
    ///
    /// let distribution = SymbolCounts::INITIAL.distribution();
    /// assert_eq!(distribution.freqs(), &[SCALE_TOTAL / 4; 4]);
    /// ```
    #[must_use]
    pub fn distribution(&self) -> Distribution {
        let total = self.total();
        let spread = (SCALE_TOTAL as u64) - Acid::SIZE as u64;

        let mut freqs = [0u32; Acid::SIZE];
        for (freq, &count) in freqs.iter_mut().zip(self.0.iter()) {
            *freq = 1 + (count as u64 * spread / total) as u32;
        }

        let assigned: u32 = freqs.iter().sum();
        let most_frequent = self
            .0
            .iter()
            .enumerate()
            .fold(0, |best, (i, &count)| if count > self.0[best] { i } else { best });
        freqs[most_frequent] += SCALE_TOTAL - assigned;

        Distribution::from_freqs(freqs)
    }
}

impl Default for SymbolCounts {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl From<[u32; Acid::SIZE]> for SymbolCounts {
    /// # Panics
    /// This function panics if any of the counts is zero.
    fn from(counts: [u32; Acid::SIZE]) -> Self {
        assert!(counts.iter().all(|&count| count >= 1));

        Self(counts)
    }
}

/// Fixed-point probability distribution over the four acids, as consumed by
/// the entropy coder.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Distribution {
    freqs: [u32; Acid::SIZE],
    cum_freqs: [u32; Acid::SIZE],
}

impl Distribution {
    /// Creates a distribution from symbol frequencies.
    ///
    /// The frequencies are expected to add up to [`SCALE_TOTAL`]; the entropy
    /// coder refuses to encode symbols with zero frequency.
    #[must_use]
    pub fn from_freqs(freqs: [u32; Acid::SIZE]) -> Self {
        let mut cum_freqs = freqs;
        Self::freq_to_cum_freq(&mut cum_freqs);

        Self { freqs, cum_freqs }
    }

    #[inline]
    #[must_use]
    pub fn freqs(&self) -> &[u32; Acid::SIZE] {
        &self.freqs
    }

    #[inline]
    #[must_use]
    pub fn cum_freqs(&self) -> &[u32; Acid::SIZE] {
        &self.cum_freqs
    }

    #[inline]
    #[must_use]
    pub fn freq(&self, symbol_index: usize) -> u32 {
        self.freqs[symbol_index]
    }

    #[inline]
    #[must_use]
    pub fn cum_freq(&self, symbol_index: usize) -> u32 {
        self.cum_freqs[symbol_index]
    }

    /// Returns the index of the symbol whose frequency range contains
    /// `cum_freq`.
    #[inline]
    #[must_use]
    pub fn cum_freq_to_symbol_index(&self, cum_freq: u32) -> Option<usize> {
        (0..Acid::SIZE).find(|&i| {
            cum_freq >= self.cum_freqs[i] && cum_freq - self.cum_freqs[i] < self.freqs[i]
        })
    }

    fn freq_to_cum_freq(freq: &mut [u32]) {
        let mut acc: u32 = 0;
        for val in freq {
            let old_val = *val;
            *val = acc;
            acc += old_val;
        }
    }
}

/// Adaptive order-k context model.
///
/// Maps each context ever seen to its [`SymbolCounts`]. Rows are created on
/// first access and never removed; counts only grow. Compression and
/// decompression must issue exactly the same sequence of calls for the
/// tables to stay in sync.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ContextModel {
    contexts: HashMap<ContextKey, SymbolCounts>,
}

impl ContextModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the counts of given context, creating the row with all-ones
    /// counts if the context has not been seen yet.
    pub fn counts(&mut self, key: ContextKey) -> &SymbolCounts {
        self.contexts.entry(key).or_default()
    }

    /// Returns the probabilities of each symbol in given context.
    pub fn probabilities(&mut self, key: ContextKey) -> [f64; Acid::SIZE] {
        self.counts(key).probabilities()
    }

    /// Returns the fixed-point distribution of given context.
    pub fn distribution(&mut self, key: ContextKey) -> Distribution {
        self.counts(key).distribution()
    }

    /// Records an occurrence of the symbol in given context.
    pub fn update(&mut self, key: ContextKey, symbol: Acid) {
        self.contexts
            .entry(key)
            .or_default()
            .increment(symbol.to_usize());
    }

    /// Returns the counts of given context without creating it.
    #[must_use]
    pub fn get(&self, key: ContextKey) -> Option<&SymbolCounts> {
        self.contexts.get(&key)
    }

    /// Returns the number of contexts in the model.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    pub fn clear(&mut self) {
        self.contexts.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ContextKey, &SymbolCounts)> {
        self.contexts.iter()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use crate::context::{ContextKey, ContextWindow};
    use crate::model::{ContextModel, Distribution, SymbolCounts, SCALE_TOTAL};
    use crate::sequence::Acid;

    #[test]
    fn new_context_has_uniform_probabilities() {
        let mut model = ContextModel::new();

        let probs = model.probabilities(ContextKey::INITIAL);

        assert_eq!(probs, [0.25; 4]);
        assert_eq!(model.len(), 1);
        assert_eq!(model.get(ContextKey::INITIAL), Some(&SymbolCounts::INITIAL));
    }

    #[test]
    fn reading_distribution_does_not_change_counts() {
        let mut model = ContextModel::new();
        model.update(ContextKey::INITIAL, Acid::G);

        let before = model.clone();
        let _ = model.distribution(ContextKey::INITIAL);
        let _ = model.probabilities(ContextKey::INITIAL);

        assert_eq!(model, before);
    }

    #[test]
    fn update_creates_row_and_increments() {
        let mut model = ContextModel::new();

        model.update(ContextKey::INITIAL, Acid::C);
        model.update(ContextKey::INITIAL, Acid::C);
        model.update(ContextKey::INITIAL, Acid::T);

        assert_eq!(model.get(ContextKey::INITIAL).unwrap().get(), &[1, 3, 1, 2]);
        let probs = model.probabilities(ContextKey::INITIAL);
        assert_abs_diff_eq!(probs[0], 1.0 / 7.0);
        assert_abs_diff_eq!(probs[1], 3.0 / 7.0);
        assert_abs_diff_eq!(probs[2], 1.0 / 7.0);
        assert_abs_diff_eq!(probs[3], 2.0 / 7.0);
    }

    #[test]
    fn counts_are_monotonic_and_positive() {
        let acids = [Acid::A, Acid::C, Acid::G, Acid::T, Acid::A, Acid::A, Acid::G];
        let mut model = ContextModel::new();
        let mut window = ContextWindow::new();

        for _ in 0..50 {
            for &acid in &acids {
                let before = model.clone();
                let _ = model.distribution(window.key());
                model.update(window.key(), acid);
                window.push(acid);

                for (key, counts) in model.iter() {
                    assert!(counts.get().iter().all(|&count| count >= 1));
                    if let Some(old) = before.get(*key) {
                        assert!(old.get().iter().zip(counts.get()).all(|(a, b)| a <= b));
                    }
                }
                for (key, _) in before.iter() {
                    assert!(model.get(*key).is_some());
                }
            }
        }
    }

    #[test]
    fn initial_distribution_is_uniform() {
        let distribution = SymbolCounts::INITIAL.distribution();

        assert_eq!(distribution.freqs(), &[SCALE_TOTAL / 4; 4]);
        assert_eq!(
            distribution.cum_freqs(),
            &[0, SCALE_TOTAL / 4, SCALE_TOTAL / 2, 3 * (SCALE_TOTAL / 4)]
        );
    }

    #[test]
    fn skewed_distribution_keeps_all_symbols_encodable() {
        let counts = SymbolCounts([1, 1, 4_000_000_000, 1]);

        let distribution = counts.distribution();

        assert!(distribution.freqs().iter().all(|&freq| freq >= 1));
        assert_eq!(distribution.freqs().iter().sum::<u32>(), SCALE_TOTAL);
        assert!(distribution.freq(2) > distribution.freq(0));
    }

    #[test]
    fn distribution_always_sums_to_total() {
        for a in [1, 2, 3, 17, 1000] {
            for b in [1, 5, 99, 12345] {
                let counts = SymbolCounts([a, b, a + b, 7]);
                let distribution = counts.distribution();

                assert_eq!(distribution.freqs().iter().sum::<u32>(), SCALE_TOTAL);
                assert!(distribution.freqs().iter().all(|&freq| freq >= 1));
            }
        }
    }

    #[test]
    fn remainder_goes_to_first_most_frequent_symbol() {
        let counts = SymbolCounts([1, 2, 2, 2]);

        let distribution = counts.distribution();

        let spread = (SCALE_TOTAL - 4) as u64;
        let base = [1 + spread / 7, 1 + 2 * spread / 7, 1 + 2 * spread / 7, 1 + 2 * spread / 7];
        let remainder = SCALE_TOTAL as u64 - base.iter().sum::<u64>();
        assert_eq!(distribution.freq(0) as u64, base[0]);
        assert_eq!(distribution.freq(1) as u64, base[1] + remainder);
        assert_eq!(distribution.freq(2) as u64, base[2]);
    }

    #[test]
    fn cum_freq_lookup() {
        let distribution = Distribution::from_freqs([2, 3, 1, 10]);

        assert_eq!(distribution.cum_freqs(), &[0, 2, 5, 6]);
        assert_eq!(distribution.cum_freq_to_symbol_index(0), Some(0));
        assert_eq!(distribution.cum_freq_to_symbol_index(1), Some(0));
        assert_eq!(distribution.cum_freq_to_symbol_index(2), Some(1));
        assert_eq!(distribution.cum_freq_to_symbol_index(5), Some(2));
        assert_eq!(distribution.cum_freq_to_symbol_index(15), Some(3));
        assert_eq!(distribution.cum_freq_to_symbol_index(16), None);
    }
}
