use log::{debug, trace};

use crate::compressor::{RansCompressor, RansDecompressor, RansError, RansResult};
use crate::context::ContextWindow;
use crate::model::{ContextModel, Distribution};
use crate::progress::{ProgressNotifier, Stage, StageProgress, PROGRESS_BATCH};
use crate::sequence::Acid;

/// Maximum number of acids allocated before decoding starts, regardless of
/// the declared sequence length.
const MAX_PREALLOCATED_ACIDS: usize = 16 * 1024 * 1024;

/// Turns a list of acids into the rANS word stream.
///
/// Runs in two passes. The first one walks the sequence in document order,
/// recording the distribution the adaptive model assigns to each acid before
/// updating it. The second one pushes the recorded pairs onto the coder stack
/// starting from the last acid.
#[derive(Debug)]
pub struct SequenceCompressor {
    model: ContextModel,
    compressor: RansCompressor,
}

impl SequenceCompressor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            model: ContextModel::new(),
            compressor: RansCompressor::new(),
        }
    }

    pub fn compress(
        &mut self,
        acids: &[Acid],
        notifier: &dyn ProgressNotifier,
    ) -> RansResult<Vec<u32>> {
        self.model.clear();
        self.compressor.reset();

        let pairs = self.analyze(acids, notifier);
        debug!(
            "Analyzed {} acids; {} contexts seen",
            acids.len(),
            self.model.len()
        );

        let mut progress = StageProgress::start(notifier, Stage::Encoding, pairs.len());
        for chunk in pairs.rchunks(PROGRESS_BATCH) {
            self.compressor.push_reverse(chunk)?;
            progress.inc_by(chunk.len());
        }
        progress.finish();

        Ok(self.compressor.finalize())
    }

    fn analyze(
        &mut self,
        acids: &[Acid],
        notifier: &dyn ProgressNotifier,
    ) -> Vec<(Acid, Distribution)> {
        let mut pairs = Vec::with_capacity(acids.len());
        let mut window = ContextWindow::new();

        let mut progress = StageProgress::start(notifier, Stage::Analysis, acids.len());
        for &acid in acids {
            let key = window.key();
            pairs.push((acid, self.model.distribution(key)));
            self.model.update(key, acid);
            window.push(acid);
            progress.inc();
        }
        progress.finish();

        pairs
    }

    /// Returns the model state left by the last [`Self::compress`] call.
    #[must_use]
    pub fn model(&self) -> &ContextModel {
        &self.model
    }
}

impl Default for SequenceCompressor {
    fn default() -> Self {
        Self::new()
    }
}

/// Restores a list of acids from the rANS word stream, mirroring the model
/// updates [`SequenceCompressor`] performed.
#[derive(Debug)]
pub struct SequenceDecompressor {
    model: ContextModel,
}

impl SequenceDecompressor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            model: ContextModel::new(),
        }
    }

    pub fn decompress(
        &mut self,
        words: &[u32],
        length: usize,
        notifier: &dyn ProgressNotifier,
    ) -> RansResult<Vec<Acid>> {
        self.model.clear();

        let mut decompressor = RansDecompressor::new(words)?;
        let mut window = ContextWindow::new();
        let mut acids = Vec::with_capacity(length.min(MAX_PREALLOCATED_ACIDS));

        let mut progress = StageProgress::start(notifier, Stage::Decoding, length);
        for _ in 0..length {
            let key = window.key();
            let distribution = self.model.distribution(key);
            let symbol_index = decompressor.get(&distribution)?;
            let acid = Acid::try_from_usize(symbol_index)
                .ok_or(RansError::InvalidSymbol(symbol_index as u32))?;
            trace!("Got {}: context `{}`", acid, key);

            acids.push(acid);
            self.model.update(key, acid);
            window.push(acid);
            progress.inc();
        }
        decompressor.finish()?;
        progress.finish();

        Ok(acids)
    }

    /// Returns the model state left by the last [`Self::decompress`] call.
    #[must_use]
    pub fn model(&self) -> &ContextModel {
        &self.model
    }
}

impl Default for SequenceDecompressor {
    fn default() -> Self {
        Self::new()
    }
}
