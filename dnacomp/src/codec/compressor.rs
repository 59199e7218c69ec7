use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use log::{debug, info};

use crate::codec::common::{bits_per_acid, format_bytes, format_stats, write_atomically};
use crate::compressor::RansError;
use crate::container;
use crate::container::{CompressedRecord, ContainerError};
use crate::fasta::reader::{FastaReader, FastaReaderError};
use crate::progress::{ByteNum, DummyProgressNotifier, ProgressNotifier};
use crate::sequence::{Sequence, SequenceHeader};
use crate::sequence_compressor::SequenceCompressor;

/// Error occurring during compression of a FASTA file.
#[derive(Debug)]
pub enum CompressorError {
    /// The input file could not be opened.
    InputNotFound(PathBuf, std::io::Error),
    /// I/O error occurred when writing the output.
    IoError(std::io::Error),
    /// Error occurred when reading the FASTA input.
    ReadError(FastaReaderError),
    /// The compressed record could not be framed.
    Container(ContainerError),
    /// The entropy coder was asked to encode a symbol it cannot represent.
    EncodingInvariantViolation(RansError),
}

impl CompressorError {
    #[must_use]
    pub fn input_not_found<P: Into<PathBuf>>(path: P, e: std::io::Error) -> Self {
        Self::InputNotFound(path.into(), e)
    }
}

impl From<std::io::Error> for CompressorError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

impl From<FastaReaderError> for CompressorError {
    fn from(e: FastaReaderError) -> Self {
        Self::ReadError(e)
    }
}

impl From<ContainerError> for CompressorError {
    fn from(e: ContainerError) -> Self {
        Self::Container(e)
    }
}

impl From<RansError> for CompressorError {
    fn from(e: RansError) -> Self {
        Self::EncodingInvariantViolation(e)
    }
}

impl Display for CompressorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CompressorError::InputNotFound(path, e) => {
                write!(f, "Could not open input file {}: {}", path.display(), e)
            }
            CompressorError::IoError(e) => write!(f, "IO error: {}", e),
            CompressorError::ReadError(e) => write!(f, "Could not read FASTA input: {}", e),
            CompressorError::Container(e) => write!(f, "Container error: {}", e),
            CompressorError::EncodingInvariantViolation(e) => {
                write!(f, "Encoding invariant violated: {}", e)
            }
        }
    }
}

impl Error for CompressorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CompressorError::InputNotFound(_, e) => Some(e),
            CompressorError::IoError(e) => Some(e),
            CompressorError::ReadError(e) => Some(e),
            CompressorError::Container(e) => Some(e),
            CompressorError::EncodingInvariantViolation(e) => Some(e),
        }
    }
}

/// The result of compressing a FASTA file.
pub type CompressResult<T> = Result<T, CompressorError>;

#[derive(Debug, Clone)]
pub struct CompressorParams {
    progress_notifier: Arc<dyn ProgressNotifier>,
    include_header: bool,
}

impl CompressorParams {
    #[must_use]
    pub fn builder() -> CompressorParamsBuilder {
        CompressorParamsBuilder::new()
    }
}

impl Default for CompressorParams {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Debug, Clone)]
pub struct CompressorParamsBuilder {
    progress_notifier: Arc<dyn ProgressNotifier>,
    include_header: bool,
}

impl CompressorParamsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            progress_notifier: Arc::new(DummyProgressNotifier),
            include_header: true,
        }
    }

    pub fn progress_notifier(&mut self, progress_notifier: Arc<dyn ProgressNotifier>) -> &mut Self {
        let mut new = self;
        new.progress_notifier = progress_notifier;
        new
    }

    /// Whether to store the FASTA header. If disabled, the decompressed file
    /// has no header line.
    pub fn include_header(&mut self, include_header: bool) -> &mut Self {
        let mut new = self;
        new.include_header = include_header;
        new
    }

    #[must_use]
    pub fn build(&self) -> CompressorParams {
        CompressorParams {
            progress_notifier: self.progress_notifier.clone(),
            include_header: self.include_header,
        }
    }
}

impl Default for CompressorParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// FASTA to compressed container converter.
///
/// # Examples
/// ```
/// use dnacomp::codec::compressor::DnaCompressor;
/// use dnacomp::sequence::Sequence;
///
/// let data = DnaCompressor::new()
///     .compress_sequence(&Sequence::new("", []))
///     .unwrap();
/// assert_eq!(data, [0; 8]);
/// ```
#[derive(Debug)]
pub struct DnaCompressor {
    params: CompressorParams,
}

impl DnaCompressor {
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(CompressorParams::default())
    }

    #[must_use]
    pub fn with_params(params: CompressorParams) -> Self {
        Self { params }
    }

    /// Compresses the FASTA file at `input` and atomically writes the
    /// container to `output`.
    pub fn compress_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> CompressResult<()> {
        let input = input.as_ref();
        let output = output.as_ref();
        let start_time = Instant::now();

        let file =
            File::open(input).map_err(|e| CompressorError::input_not_found(input, e))?;
        let sequence = FastaReader::new(BufReader::new(file)).read_sequence()?;
        debug!(
            "Read {} acids from {}; header: `{}`",
            sequence.len(),
            input.display(),
            sequence.header()
        );

        let data = self.compress_sequence(&sequence)?;
        write_atomically(output, |writer| -> CompressResult<()> {
            writer.write_all(&data)?;
            Ok(())
        })?;

        info!(
            "Compressed {}",
            format_stats(start_time, sequence.size())
        );
        info!(
            "File: {:>9} -> {:>9}",
            format_bytes(sequence.size()),
            format_bytes(ByteNum::new(data.len()))
        );

        Ok(())
    }

    /// Compresses a sequence into the container bytes.
    pub fn compress_sequence(&self, sequence: &Sequence) -> CompressResult<Vec<u8>> {
        let notifier = self.params.progress_notifier.as_ref();

        let code_words = if sequence.is_empty() {
            Vec::new()
        } else {
            SequenceCompressor::new().compress(sequence.acids(), notifier)?
        };
        let code_bytes = code_words.len() * 4;

        let header = if self.params.include_header {
            sequence.header().clone()
        } else {
            SequenceHeader::EMPTY
        };
        let record = CompressedRecord {
            sequence_length: sequence.len() as u64,
            header,
            code_words,
        };
        let data = container::encode(&record)?;

        info!(
            "Acid: {:>9} -> {:>9} ({:.3} bpv)",
            sequence.len(),
            code_bytes,
            bits_per_acid(code_bytes, sequence.len())
        );

        Ok(data)
    }
}

impl Default for DnaCompressor {
    fn default() -> Self {
        Self::new()
    }
}

/// Compresses the FASTA file at `input` into `output` with default settings.
///
/// # Errors
/// Returns [`CompressorError::InputNotFound`] if `input` cannot be opened.
/// Nothing is written to `output` unless the whole operation succeeds.
pub fn compress<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> CompressResult<()> {
    DnaCompressor::new().compress_file(input, output)
}
