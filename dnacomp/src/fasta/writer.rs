use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;

use crate::fasta::{FASTA_ACID_TO_BYTE, FASTA_LINE_WIDTH};
use crate::sequence::{Acid, Sequence};

#[derive(Debug)]
pub enum FastaWriterError {
    IoError(std::io::Error),
}

impl From<std::io::Error> for FastaWriterError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

impl Display for FastaWriterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FastaWriterError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl Error for FastaWriterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FastaWriterError::IoError(e) => Some(e),
        }
    }
}

pub type FastaWriteResult<T> = Result<T, FastaWriterError>;

/// Writes a [`Sequence`] as FASTA text: the header line (if the header is not
/// empty), then the acids wrapped at [`FASTA_LINE_WIDTH`]. Every line,
/// including the last, shorter one, ends with a newline.
#[derive(Debug)]
pub struct FastaWriter<W> {
    writer: W,
}

impl<W: Write> FastaWriter<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_sequence(&mut self, sequence: &Sequence) -> FastaWriteResult<()> {
        self.output_header(sequence)?;
        self.output_acids(sequence.acids())?;

        Ok(())
    }

    fn output_header(&mut self, sequence: &Sequence) -> FastaWriteResult<()> {
        if !sequence.header().is_empty() {
            writeln!(&mut self.writer, "{}", sequence.header())?;
        }

        Ok(())
    }

    fn output_acids(&mut self, acids: &[Acid]) -> FastaWriteResult<()> {
        let mut data = Vec::with_capacity(FASTA_LINE_WIDTH + 1);
        for line in acids.chunks(FASTA_LINE_WIDTH) {
            data.clear();
            data.extend(line.iter().map(|&acid| FASTA_ACID_TO_BYTE[acid as usize]));
            data.push(b'\n');
            self.writer.write_all(&data)?;
        }

        Ok(())
    }

    pub fn flush(&mut self) -> FastaWriteResult<()> {
        self.writer.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::io::ErrorKind::NotFound;

    use crate::_internal_test_data::{SIMPLE_TEST_SEQUENCE, SIMPLE_TEST_SEQUENCE_STR};
    use crate::fasta::writer::{FastaWriter, FastaWriterError};
    use crate::sequence::Acid::{A, C, G, T};
    use crate::sequence::Sequence;

    fn write(sequence: &Sequence) -> String {
        let mut buf = Vec::new();
        FastaWriter::new(&mut buf).write_sequence(sequence).unwrap();

        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn should_write_nothing_for_empty_seq() {
        assert_eq!(write(&Sequence::new("", [])), "");
    }

    #[test]
    fn should_write_header_only() {
        assert_eq!(write(&Sequence::new(">hdr", [])), ">hdr\n");
    }

    #[test]
    fn should_return_simple_seq() {
        assert_eq!(write(&SIMPLE_TEST_SEQUENCE), SIMPLE_TEST_SEQUENCE_STR);
    }

    #[test]
    fn wraps_at_70_acids() {
        let sequence = Sequence::new(">long", vec![G; 150]);

        let text = write(&sequence);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], ">long");
        assert_eq!(lines[1].len(), 70);
        assert_eq!(lines[2].len(), 70);
        assert_eq!(lines[3], "GGGGGGGGGG");
        assert!(text.ends_with("GGGG\n"));
    }

    #[test]
    fn exact_multiple_has_no_empty_line() {
        let sequence = Sequence::new("", vec![A; 140]);

        let text = write(&sequence);

        assert_eq!(text.lines().count(), 2);
        assert_eq!(text.len(), 142);
    }

    #[test]
    fn empty_header_has_no_blank_line() {
        assert_eq!(write(&Sequence::new("", [A, C, G, T])), "ACGT\n");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            format!("{}", FastaWriterError::from(std::io::Error::from(NotFound))),
            "IO error: entity not found"
        )
    }

    #[test]
    fn test_error_source() {
        assert!(FastaWriterError::from(std::io::Error::from(NotFound))
            .source()
            .is_some());
    }
}
