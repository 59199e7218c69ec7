//! Binary framing of a compressed sequence.
//!
//! ```text
//! offset 0   : u64  sequence length
//! offset 8   : u16  header byte count (N)
//! offset 10  : N bytes header (UTF-8)
//! offset 10+N: u32 code words until the end of the data
//! ```
//!
//! All the fields are big-endian. A record with no acids and no header is
//! written as 8 zero bytes instead.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Cursor;
use std::string::FromUtf8Error;

use binrw::{binrw, BinRead, BinWrite};
use byteorder::{BigEndian, ByteOrder};
use log::debug;

use crate::sequence::SequenceHeader;

/// Size of the empty-sequence shorthand, in bytes.
pub const EMPTY_CONTAINER_LEN: usize = 8;
const FIXED_FIELDS_LEN: usize = 10;
const WORD_LEN: usize = 4;

#[binrw]
#[brw(big)]
#[derive(Debug)]
struct ContainerHeader {
    sequence_length: u64,
    header_length: u16,

    #[br(count = header_length)]
    header: Vec<u8>,
}

/// Error occurring when framing or parsing a compressed record.
#[derive(Debug)]
pub enum ContainerError {
    /// The header does not fit in the 16-bit length field.
    HeaderTooLong(usize),
    /// Fewer bytes are present than the fields declare.
    Truncated { expected: usize, actual: usize },
    /// The code word region is not a whole number of words.
    MisalignedWords(usize),
    /// The header is not valid UTF-8.
    InvalidHeader(FromUtf8Error),
    /// A record declares an empty sequence, but carries code words.
    UnexpectedCodeWords(usize),
    /// Error occurred trying to (de)serialize the fixed fields.
    SerializeError(binrw::Error),
}

impl From<binrw::Error> for ContainerError {
    fn from(e: binrw::Error) -> Self {
        Self::SerializeError(e)
    }
}

impl From<FromUtf8Error> for ContainerError {
    fn from(e: FromUtf8Error) -> Self {
        Self::InvalidHeader(e)
    }
}

impl Display for ContainerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainerError::HeaderTooLong(len) => write!(
                f,
                "Header too long ({} bytes, limit: {})",
                len,
                u16::MAX
            ),
            ContainerError::Truncated { expected, actual } => write!(
                f,
                "Truncated data (expected at least {} bytes, got {})",
                expected, actual
            ),
            ContainerError::MisalignedWords(len) => write!(
                f,
                "Code word region of {} bytes is not a multiple of {}",
                len, WORD_LEN
            ),
            ContainerError::InvalidHeader(e) => write!(f, "Invalid header: {}", e),
            ContainerError::UnexpectedCodeWords(num) => {
                write!(f, "Empty sequence with {} code words", num)
            }
            ContainerError::SerializeError(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl Error for ContainerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ContainerError::InvalidHeader(e) => Some(e),
            ContainerError::SerializeError(e) => Some(e),
            _ => None,
        }
    }
}

pub type ContainerResult<T> = Result<T, ContainerError>;

/// Everything needed to restore a sequence: its length, its header and the
/// entropy coder's word stream.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct CompressedRecord {
    pub sequence_length: u64,
    pub header: SequenceHeader,
    pub code_words: Vec<u32>,
}

impl CompressedRecord {
    #[must_use]
    pub fn new<T: Into<SequenceHeader>>(
        sequence_length: u64,
        header: T,
        code_words: Vec<u32>,
    ) -> Self {
        Self {
            sequence_length,
            header: header.into(),
            code_words,
        }
    }

    #[must_use]
    fn is_empty_shorthand(&self) -> bool {
        self.sequence_length == 0 && self.header.is_empty() && self.code_words.is_empty()
    }
}

/// Serializes the record into bytes.
///
/// # Examples
/// ```
/// use dnacomp::container::{encode, CompressedRecord};
///
/// let data = encode(&CompressedRecord::default()).unwrap();
/// assert_eq!(data, [0; 8]);
/// ```
pub fn encode(record: &CompressedRecord) -> ContainerResult<Vec<u8>> {
    if record.is_empty_shorthand() {
        return Ok(vec![0; EMPTY_CONTAINER_LEN]);
    }

    let header_bytes = record.header.str().as_bytes();
    let header_length = u16::try_from(header_bytes.len())
        .map_err(|_| ContainerError::HeaderTooLong(header_bytes.len()))?;

    let header = ContainerHeader {
        sequence_length: record.sequence_length,
        header_length,
        header: header_bytes.to_vec(),
    };

    let total_len = FIXED_FIELDS_LEN + header_bytes.len() + record.code_words.len() * WORD_LEN;
    let mut writer = Cursor::new(Vec::with_capacity(total_len));
    header.write(&mut writer)?;

    let mut data = writer.into_inner();
    let words_start = data.len();
    data.resize(words_start + record.code_words.len() * WORD_LEN, 0);
    BigEndian::write_u32_into(&record.code_words, &mut data[words_start..]);

    Ok(data)
}

/// Parses bytes produced by [`encode`].
pub fn decode(data: &[u8]) -> ContainerResult<CompressedRecord> {
    if data.len() == EMPTY_CONTAINER_LEN && data.iter().all(|&byte| byte == 0) {
        debug!("Read empty-sequence container");
        return Ok(CompressedRecord::default());
    }

    if data.len() < FIXED_FIELDS_LEN {
        return Err(ContainerError::Truncated {
            expected: FIXED_FIELDS_LEN,
            actual: data.len(),
        });
    }
    let header_length = BigEndian::read_u16(&data[8..FIXED_FIELDS_LEN]) as usize;
    let words_start = FIXED_FIELDS_LEN + header_length;
    if data.len() < words_start {
        return Err(ContainerError::Truncated {
            expected: words_start,
            actual: data.len(),
        });
    }

    let header = ContainerHeader::read(&mut Cursor::new(&data[..words_start]))?;
    debug!(
        "Read container: sequence length {}; header length {}",
        header.sequence_length, header.header_length
    );

    let words_data = &data[words_start..];
    if words_data.len() % WORD_LEN != 0 {
        return Err(ContainerError::MisalignedWords(words_data.len()));
    }
    let mut code_words = vec![0; words_data.len() / WORD_LEN];
    BigEndian::read_u32_into(words_data, &mut code_words);

    if header.sequence_length == 0 && !code_words.is_empty() {
        return Err(ContainerError::UnexpectedCodeWords(code_words.len()));
    }

    Ok(CompressedRecord {
        sequence_length: header.sequence_length,
        header: String::from_utf8(header.header)?.into(),
        code_words,
    })
}

#[cfg(test)]
mod tests {
    use crate::container::{decode, encode, CompressedRecord, ContainerError};

    #[test]
    fn empty_record_is_eight_zero_bytes() {
        let data = encode(&CompressedRecord::default()).unwrap();

        assert_eq!(data, [0; 8]);
        assert_eq!(decode(&data).unwrap(), CompressedRecord::default());
    }

    #[test]
    fn empty_sequence_keeps_header() {
        let record = CompressedRecord::new(0, ">lonely header", vec![]);

        let data = encode(&record).unwrap();

        assert_eq!(data.len(), 10 + 14);
        assert_eq!(decode(&data).unwrap(), record);
    }

    #[test]
    fn layout_is_big_endian() {
        let record = CompressedRecord::new(0x0102, ">ab", vec![0xDEADBEEF, 0x80000000]);

        let data = encode(&record).unwrap();

        assert_eq!(
            data,
            [
                0, 0, 0, 0, 0, 0, 0x01, 0x02, // sequence length
                0, 3, // header length
                b'>', b'a', b'b', // header
                0xDE, 0xAD, 0xBE, 0xEF, // words
                0x80, 0, 0, 0,
            ]
        );
        assert_eq!(decode(&data).unwrap(), record);
    }

    #[test]
    fn header_too_long() {
        let record = CompressedRecord::new(1, ">".repeat(70_000), vec![0, 1]);

        assert!(matches!(
            encode(&record),
            Err(ContainerError::HeaderTooLong(70_000))
        ));
    }

    #[test]
    fn max_header_length_fits() {
        let record = CompressedRecord::new(1, "x".repeat(u16::MAX as usize), vec![7, 8]);

        let data = encode(&record).unwrap();

        assert_eq!(decode(&data).unwrap(), record);
    }

    #[test]
    fn truncated_fixed_fields() {
        assert!(matches!(
            decode(&[0, 0, 0, 1]),
            Err(ContainerError::Truncated {
                expected: 10,
                actual: 4
            })
        ));
        assert!(matches!(
            decode(&[0, 0, 0, 0, 0, 0, 0, 1]),
            Err(ContainerError::Truncated { .. })
        ));
    }

    #[test]
    fn truncated_header() {
        let data = encode(&CompressedRecord::new(5, ">header", vec![1, 2])).unwrap();

        assert!(matches!(
            decode(&data[..14]),
            Err(ContainerError::Truncated {
                expected: 17,
                actual: 14
            })
        ));
    }

    #[test]
    fn misaligned_words() {
        let data = encode(&CompressedRecord::new(5, ">h", vec![1, 2, 3])).unwrap();

        assert!(matches!(
            decode(&data[..data.len() - 1]),
            Err(ContainerError::MisalignedWords(11))
        ));
    }

    #[test]
    fn invalid_utf8_header() {
        let data = [0, 0, 0, 0, 0, 0, 0, 1, 0, 2, 0xFF, 0xFE, 0, 0, 0, 1];

        assert!(matches!(
            decode(&data),
            Err(ContainerError::InvalidHeader(_))
        ));
    }

    #[test]
    fn empty_sequence_with_words_is_rejected() {
        let data = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1];

        assert!(matches!(
            decode(&data),
            Err(ContainerError::UnexpectedCodeWords(1))
        ));
    }
}
