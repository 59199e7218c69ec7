use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use dnacomp::codec::{CompressorParams, DnaCompressor};
use dnacomp::progress::ProgressNotifier;

pub fn compress(
    input: &Path,
    output: &Path,
    no_header: bool,
    progress_notifier: Arc<dyn ProgressNotifier>,
) -> anyhow::Result<()> {
    let params = CompressorParams::builder()
        .progress_notifier(progress_notifier)
        .include_header(!no_header)
        .build();

    DnaCompressor::with_params(params)
        .compress_file(input, output)
        .with_context(|| {
            format!(
                "Could not compress {} into {}",
                input.display(),
                output.display()
            )
        })?;

    Ok(())
}
