use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::BufRead;

use log::debug;

use crate::fasta::{FASTA_BYTE_TO_ACID, FASTA_HEADER_PREFIX};
use crate::progress::ByteNum;
use crate::sequence::{Acid, Sequence};

/// Error occurring during parsing a FASTA file.
#[derive(Debug)]
pub enum FastaReaderError {
    /// I/O error occurred when reading the FASTA file.
    IoError(std::io::Error),
}

impl From<std::io::Error> for FastaReaderError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

impl Display for FastaReaderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FastaReaderError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl Error for FastaReaderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FastaReaderError::IoError(e) => Some(e),
        }
    }
}

/// The result of a FASTA reading operation.
pub type FastaResult<T> = Result<T, FastaReaderError>;

/// FASTA format reader collapsing the whole input into a single
/// [`Sequence`].
///
/// Lines are skipped until the first `>` line, which becomes the header. Every
/// line after it is scanned for `A`, `C`, `G` and `T` (case-insensitive); all
/// the other characters are dropped. Further `>` lines are skipped, so
/// multiple records are merged into one sequence. An input without any `>`
/// line yields an empty sequence.
#[derive(Debug)]
pub struct FastaReader<R> {
    reader: R,
    bytes_read: usize,
    buffer: Vec<u8>,
}

impl<R: BufRead> FastaReader<R> {
    /// Creates new `FastaReader` instance.
    ///
    /// # Examples
    /// ```
    /// use dnacomp::fasta::reader::FastaReader;
    ///
    /// let buf = Vec::new();
    /// let _reader = FastaReader::new(buf.as_slice());
    /// ```
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            bytes_read: 0,
            buffer: Vec::with_capacity(4096),
        }
    }

    /// Reads the whole input as a single sequence.
    ///
    /// # Examples
    /// ```
    /// use dnacomp::fasta::reader::FastaReader;
    ///
    /// let input = ">seq\nACGT\nacNNgt\n";
    /// let sequence = FastaReader::new(input.as_bytes()).read_sequence().unwrap();
    /// assert_eq!(sequence.header().str(), ">seq");
    /// assert_eq!(sequence.len(), 8);
    /// ```
    pub fn read_sequence(&mut self) -> FastaResult<Sequence> {
        self.bytes_read = 0;
        let mut header: Option<String> = None;
        let mut acids = Vec::new();

        loop {
            let line = Self::read_line(&mut self.reader, &mut self.buffer, &mut self.bytes_read)?;
            let line = match line {
                Some(line) => line,
                None => break,
            };

            if line.first() == Some(&FASTA_HEADER_PREFIX) {
                if header.is_none() {
                    let title = String::from_utf8_lossy(line).trim_end().to_owned();
                    debug!("Read FASTA header: {}", title);
                    header = Some(title);
                }
                continue;
            }

            if header.is_some() {
                Self::parse_acids(line, &mut acids);
            }
        }

        let header = header.unwrap_or_default();
        Ok(Sequence::with_size(
            header,
            acids,
            ByteNum::new(self.bytes_read),
        ))
    }

    fn parse_acids(line: &[u8], acids: &mut Vec<Acid>) {
        acids.extend(
            line.iter()
                .filter_map(|&ch| FASTA_BYTE_TO_ACID[ch as usize]),
        );
    }

    fn read_line<'a, T: BufRead>(
        mut buf_reader: T,
        buffer: &'a mut Vec<u8>,
        total_bytes_read: &mut usize,
    ) -> FastaResult<Option<&'a [u8]>> {
        buffer.clear();
        let bytes_read = buf_reader.read_until(b'\n', buffer)?;
        if bytes_read == 0 {
            return Ok(None);
        }
        *total_bytes_read += bytes_read;

        let mut buffer = buffer.as_slice();
        while let Some(&last) = buffer.last() {
            if last == b'\n' || last == b'\r' {
                buffer = &buffer[..buffer.len() - 1];
            } else {
                break;
            }
        }

        Ok(Some(buffer))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::io::ErrorKind::NotFound;

    use crate::_internal_test_data::{
        MULTI_RECORD_SEQUENCE, MULTI_RECORD_SEQUENCE_STR, SIMPLE_TEST_SEQUENCE,
        SIMPLE_TEST_SEQUENCE_STR,
    };
    use crate::fasta::reader::{FastaReader, FastaReaderError};
    use crate::sequence::Acid::{A, C, G, T};
    use crate::sequence::Sequence;

    fn read(input: &str) -> Sequence {
        FastaReader::new(input.as_bytes()).read_sequence().unwrap()
    }

    #[test]
    fn should_return_empty_seq_for_empty_file() {
        let sequence = read("");

        assert_eq!(sequence, Sequence::new("", []));
    }

    #[test]
    fn should_return_header_only() {
        let sequence = read(">only a header\n");

        assert_eq!(sequence, Sequence::new(">only a header", []));
    }

    #[test]
    fn read_returns_simple_seq() {
        let sequence = read(SIMPLE_TEST_SEQUENCE_STR);

        assert_eq!(sequence, *SIMPLE_TEST_SEQUENCE);
    }

    #[test]
    fn read_merges_multiple_records() {
        let sequence = read(MULTI_RECORD_SEQUENCE_STR);

        assert_eq!(sequence, *MULTI_RECORD_SEQUENCE);
    }

    #[test]
    fn drops_non_acid_characters_and_uppercases() {
        let sequence = read(">seq\nacgtNNRY\n  A-C*G T\n1234\n");

        assert_eq!(sequence.acids(), &[A, C, G, T, A, C, G, T]);
    }

    #[test]
    fn handles_crlf_line_endings() {
        let sequence = read(">seq 1  \r\nAC\r\nGT\r\n");

        assert_eq!(sequence, Sequence::new(">seq 1", [A, C, G, T]));
    }

    #[test]
    fn headerless_file_yields_empty_sequence() {
        let sequence = read("ACGT\nTTAA");

        assert_eq!(sequence, Sequence::new("", []));
    }

    #[test]
    fn lines_before_header_are_skipped() {
        let sequence = read("AC\n\n>late header\nGT\n");

        assert_eq!(sequence, Sequence::new(">late header", [G, T]));
    }

    #[test]
    fn counts_bytes_read() {
        let input = ">seq\nACGT\n";
        let sequence = read(input);

        assert_eq!(sequence.size().get(), input.len());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            format!("{}", FastaReaderError::from(std::io::Error::from(NotFound))),
            "IO error: entity not found"
        );
    }

    #[test]
    fn test_error_source() {
        assert!(FastaReaderError::from(std::io::Error::from(NotFound))
            .source()
            .is_some());
    }
}
