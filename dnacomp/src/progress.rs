use std::fmt::{Debug, Display, Formatter};

use derive_more::{Add, AddAssign};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Add, AddAssign)]
#[repr(transparent)]
pub struct ByteNum(usize);

impl ByteNum {
    #[inline]
    #[must_use]
    pub const fn new(bytes: usize) -> Self {
        Self(bytes)
    }

    #[inline]
    #[must_use]
    pub const fn get(&self) -> usize {
        self.0
    }
}

/// Checkpoint of a compression or decompression run.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Stage {
    /// First compression pass: running the context model over the sequence.
    Analysis,
    /// Second compression pass: feeding the entropy coder in reverse order.
    Encoding,
    /// Joint model + entropy coder pass of decompression.
    Decoding,
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Analysis => "analysis",
            Stage::Encoding => "encoding",
            Stage::Decoding => "decoding",
        };

        write!(f, "{}", name)
    }
}

/// Number of bases processed between two consecutive
/// [`ProgressNotifier::processed_bases`] calls.
pub const PROGRESS_BATCH: usize = 64 * 1024;

/// Observer notified by the compressor and the decompressor at defined
/// checkpoints.
pub trait ProgressNotifier: Debug + Send + Sync {
    fn stage_started(&self, stage: Stage, total_bases: u64);

    fn processed_bases(&self, bases: u64);

    fn stage_finished(&self, stage: Stage);
}

impl<T: ProgressNotifier> ProgressNotifier for &T {
    fn stage_started(&self, stage: Stage, total_bases: u64) {
        T::stage_started(self, stage, total_bases)
    }

    fn processed_bases(&self, bases: u64) {
        T::processed_bases(self, bases)
    }

    fn stage_finished(&self, stage: Stage) {
        T::stage_finished(self, stage)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct DummyProgressNotifier;

impl ProgressNotifier for DummyProgressNotifier {
    fn stage_started(&self, _stage: Stage, _total_bases: u64) {
        // do nothing
    }

    fn processed_bases(&self, _bases: u64) {
        // do nothing
    }

    fn stage_finished(&self, _stage: Stage) {
        // do nothing
    }
}

/// Reports progress of a loop over `total` bases in [`PROGRESS_BATCH`]-sized
/// steps, bracketed by the stage start and finish notifications.
pub(crate) struct StageProgress<'a> {
    notifier: &'a dyn ProgressNotifier,
    stage: Stage,
    pending: usize,
}

impl<'a> StageProgress<'a> {
    pub fn start(notifier: &'a dyn ProgressNotifier, stage: Stage, total: usize) -> Self {
        notifier.stage_started(stage, total as u64);

        Self {
            notifier,
            stage,
            pending: 0,
        }
    }

    #[inline]
    pub fn inc(&mut self) {
        self.inc_by(1);
    }

    #[inline]
    pub fn inc_by(&mut self, bases: usize) {
        self.pending += bases;
        if self.pending >= PROGRESS_BATCH {
            self.notifier.processed_bases(self.pending as u64);
            self.pending = 0;
        }
    }

    pub fn finish(self) {
        if self.pending > 0 {
            self.notifier.processed_bases(self.pending as u64);
        }
        self.notifier.stage_finished(self.stage);
    }
}
