use std::fmt::{Display, Formatter};

use crate::sequence::{Acid, Symbol};

/// Number of preceding acids the context model conditions on.
pub const CONTEXT_LENGTH: usize = 10;

/// Number of distinct values a single context slot can hold: the four acids
/// plus the placeholder used before the sequence start.
const SLOT_VALUES: u32 = Acid::SIZE as u32 + 1;

/// Slot value used for positions before the first acid of the sequence.
pub const PLACEHOLDER: u32 = Acid::SIZE as u32;

/// Lookup key for the context model: the last [`CONTEXT_LENGTH`] slots of a
/// [`ContextWindow`], encoded as a base-5 integer (oldest slot is the most
/// significant digit).
///
/// Keys containing [`PLACEHOLDER`] slots are ordinary keys.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(transparent)]
pub struct ContextKey(u32);

impl ContextKey {
    /// Key made of placeholders only, i.e. the context of the very first
    /// acid.
    pub const INITIAL: ContextKey = ContextKey(Self::calc_initial_state(0, CONTEXT_LENGTH));

    /// Number of distinct keys.
    pub const NUM: u32 = SLOT_VALUES.pow(CONTEXT_LENGTH as u32);

    #[inline]
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    const fn calc_initial_state(cur_state: u32, length: usize) -> u32 {
        if length == 0 {
            cur_state
        } else {
            Self::calc_initial_state(cur_state * SLOT_VALUES + PLACEHOLDER, length - 1)
        }
    }

    /// Returns the slot values of this key, oldest first.
    #[must_use]
    pub fn slots(&self) -> [u32; CONTEXT_LENGTH] {
        let mut slots = [0; CONTEXT_LENGTH];
        let mut value = self.0;
        for slot in slots.iter_mut().rev() {
            *slot = value % SLOT_VALUES;
            value /= SLOT_VALUES;
        }

        slots
    }
}

impl Display for ContextKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for slot in self.slots() {
            let ch = match Acid::try_from_usize(slot as usize) {
                Some(acid) => acid.as_char(),
                None => 'N',
            };
            write!(f, "{}", ch)?;
        }

        Ok(())
    }
}

/// Sliding FIFO window over the last [`CONTEXT_LENGTH`] acids.
///
/// Pushing an acid drops the oldest slot and appends the new acid at the end.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ContextWindow {
    key: ContextKey,
}

impl ContextWindow {
    const LAST_POW: u32 = SLOT_VALUES.pow(CONTEXT_LENGTH as u32 - 1);

    /// Creates a new window filled with placeholders.
    #[must_use]
    pub fn new() -> Self {
        Self {
            key: ContextKey::INITIAL,
        }
    }

    /// Key of the current window contents.
    #[inline]
    #[must_use]
    pub fn key(&self) -> ContextKey {
        self.key
    }

    #[inline]
    pub fn push(&mut self, acid: Acid) {
        let value = self.key.0 % Self::LAST_POW * SLOT_VALUES + acid.to_usize() as u32;
        self.key = ContextKey(value);
    }
}

impl Default for ContextWindow {
    fn default() -> Self {
        Self::new()
    }
}
