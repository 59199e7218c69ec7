use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use dnacomp::codec::{DecompressorParams, DnaDecompressor};
use dnacomp::progress::ProgressNotifier;

pub fn decompress(
    input: &Path,
    output: &Path,
    progress_notifier: Arc<dyn ProgressNotifier>,
) -> anyhow::Result<()> {
    let params = DecompressorParams::builder()
        .progress_notifier(progress_notifier)
        .build();

    DnaDecompressor::with_params(params)
        .decompress_file(input, output)
        .with_context(|| {
            format!(
                "Could not decompress {} into {}",
                input.display(),
                output.display()
            )
        })?;

    Ok(())
}
