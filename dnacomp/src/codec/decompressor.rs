use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use log::{debug, info};

use crate::codec::common::{format_stats, write_atomically};
use crate::compressor::RansError;
use crate::container;
use crate::container::ContainerError;
use crate::fasta::writer::{FastaWriter, FastaWriterError};
use crate::progress::{ByteNum, DummyProgressNotifier, ProgressNotifier};
use crate::sequence::Sequence;
use crate::sequence_compressor::SequenceDecompressor;

/// Reason a compressed stream was rejected.
#[derive(Debug)]
pub enum CorruptStreamError {
    /// The container framing is invalid.
    Container(ContainerError),
    /// The code words do not decode into the declared number of acids.
    CodeWords(RansError),
    /// The declared sequence length does not fit in memory.
    SequenceTooLong(u64),
}

impl Display for CorruptStreamError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CorruptStreamError::Container(e) => write!(f, "{}", e),
            CorruptStreamError::CodeWords(e) => write!(f, "{}", e),
            CorruptStreamError::SequenceTooLong(len) => {
                write!(f, "Declared sequence length too large: {}", len)
            }
        }
    }
}

impl Error for CorruptStreamError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CorruptStreamError::Container(e) => Some(e),
            CorruptStreamError::CodeWords(e) => Some(e),
            CorruptStreamError::SequenceTooLong(_) => None,
        }
    }
}

/// Error occurring during decompression of a container file.
#[derive(Debug)]
pub enum DecompressorError {
    /// The input file could not be opened.
    InputNotFound(PathBuf, std::io::Error),
    /// I/O error occurred when reading the input or writing the output.
    IoError(std::io::Error),
    /// The input is not a valid compressed stream.
    CorruptStream(CorruptStreamError),
}

impl DecompressorError {
    #[must_use]
    pub fn input_not_found<P: Into<PathBuf>>(path: P, e: std::io::Error) -> Self {
        Self::InputNotFound(path.into(), e)
    }

    #[must_use]
    pub fn is_corrupt_stream(&self) -> bool {
        matches!(self, Self::CorruptStream(_))
    }
}

impl From<std::io::Error> for DecompressorError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

impl From<FastaWriterError> for DecompressorError {
    fn from(e: FastaWriterError) -> Self {
        match e {
            FastaWriterError::IoError(e) => Self::IoError(e),
        }
    }
}

impl From<ContainerError> for DecompressorError {
    fn from(e: ContainerError) -> Self {
        Self::CorruptStream(CorruptStreamError::Container(e))
    }
}

impl From<RansError> for DecompressorError {
    fn from(e: RansError) -> Self {
        Self::CorruptStream(CorruptStreamError::CodeWords(e))
    }
}

impl Display for DecompressorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DecompressorError::InputNotFound(path, e) => {
                write!(f, "Could not open input file {}: {}", path.display(), e)
            }
            DecompressorError::IoError(e) => write!(f, "IO error: {}", e),
            DecompressorError::CorruptStream(e) => write!(f, "Corrupt stream: {}", e),
        }
    }
}

impl Error for DecompressorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DecompressorError::InputNotFound(_, e) => Some(e),
            DecompressorError::IoError(e) => Some(e),
            DecompressorError::CorruptStream(e) => Some(e),
        }
    }
}

/// The result of decompressing a container file.
pub type DecompressResult<T> = Result<T, DecompressorError>;

#[derive(Debug, Clone)]
pub struct DecompressorParams {
    progress_notifier: Arc<dyn ProgressNotifier>,
}

impl DecompressorParams {
    #[must_use]
    pub fn builder() -> DecompressorParamsBuilder {
        DecompressorParamsBuilder::new()
    }
}

impl Default for DecompressorParams {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Debug, Clone)]
pub struct DecompressorParamsBuilder {
    progress_notifier: Arc<dyn ProgressNotifier>,
}

impl DecompressorParamsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            progress_notifier: Arc::new(DummyProgressNotifier),
        }
    }

    pub fn progress_notifier(&mut self, progress_notifier: Arc<dyn ProgressNotifier>) -> &mut Self {
        let mut new = self;
        new.progress_notifier = progress_notifier;
        new
    }

    #[must_use]
    pub fn build(&self) -> DecompressorParams {
        DecompressorParams {
            progress_notifier: self.progress_notifier.clone(),
        }
    }
}

impl Default for DecompressorParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Compressed container to FASTA converter.
#[derive(Debug)]
pub struct DnaDecompressor {
    params: DecompressorParams,
}

impl DnaDecompressor {
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(DecompressorParams::default())
    }

    #[must_use]
    pub fn with_params(params: DecompressorParams) -> Self {
        Self { params }
    }

    /// Decompresses the container at `input` and atomically writes the FASTA
    /// text to `output`.
    pub fn decompress_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> DecompressResult<()> {
        let input = input.as_ref();
        let output = output.as_ref();
        let start_time = Instant::now();

        let mut file =
            File::open(input).map_err(|e| DecompressorError::input_not_found(input, e))?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        debug!("Read {} bytes from {}", data.len(), input.display());

        let sequence = self.decompress_bytes(&data)?;
        write_atomically(output, |writer| -> DecompressResult<()> {
            let mut fasta_writer = FastaWriter::new(writer);
            fasta_writer.write_sequence(&sequence)?;
            fasta_writer.flush()?;
            Ok(())
        })?;

        info!(
            "Decompressed {}",
            format_stats(start_time, ByteNum::new(data.len()))
        );

        Ok(())
    }

    /// Decodes the container bytes into a sequence.
    pub fn decompress_bytes(&self, data: &[u8]) -> DecompressResult<Sequence> {
        let record = container::decode(data)?;
        if record.sequence_length == 0 {
            return Ok(Sequence::new(record.header, []));
        }

        let length = usize::try_from(record.sequence_length).map_err(|_| {
            DecompressorError::CorruptStream(CorruptStreamError::SequenceTooLong(
                record.sequence_length,
            ))
        })?;
        let acids = SequenceDecompressor::new().decompress(
            &record.code_words,
            length,
            self.params.progress_notifier.as_ref(),
        )?;
        debug!("Decoded {} acids", acids.len());

        Ok(Sequence::new(record.header, acids))
    }
}

impl Default for DnaDecompressor {
    fn default() -> Self {
        Self::new()
    }
}

/// Decompresses the container at `input` into `output` with default
/// settings.
///
/// # Errors
/// Returns [`DecompressorError::InputNotFound`] if `input` cannot be opened
/// and [`DecompressorError::CorruptStream`] if its contents are invalid.
/// Nothing is written to `output` unless the whole operation succeeds.
pub fn decompress<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> DecompressResult<()> {
    DnaDecompressor::new().decompress_file(input, output)
}
