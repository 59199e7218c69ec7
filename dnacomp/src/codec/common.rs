use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use number_prefix::NumberPrefix;
use tempfile::NamedTempFile;

use crate::progress::ByteNum;

/// Writes the output through a temporary file placed next to `path`, then
/// renames it onto `path`. If `write` fails, the temporary file is removed
/// and `path` is left untouched.
pub(super) fn write_atomically<F, E>(path: &Path, write: F) -> Result<(), E>
where
    F: FnOnce(&mut dyn Write) -> Result<(), E>,
    E: From<std::io::Error>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(&mut file);
        write(&mut writer)?;
        writer.flush()?;
    }
    file.persist(path).map_err(|e| e.error)?;

    Ok(())
}

#[must_use]
pub(crate) fn format_stats(start_time: Instant, bytes_processed: ByteNum) -> String {
    let elapsed = start_time.elapsed();

    let size_human = format_bytes(bytes_processed);

    let rate = bytes_processed.get() as f32 / elapsed.as_secs_f32();
    let rate_human = match NumberPrefix::decimal(rate) {
        NumberPrefix::Standalone(bytes) => {
            format!("{:.0} B/s", bytes)
        }
        NumberPrefix::Prefixed(prefix, n) => {
            format!("{:.3} {}B/s", n, prefix)
        }
    };

    format!(
        "{} in {:.2}s ({})",
        size_human,
        elapsed.as_secs_f32(),
        rate_human,
    )
}

#[must_use]
pub(crate) fn format_bytes(bytes: ByteNum) -> String {
    match NumberPrefix::decimal(bytes.get() as f32) {
        NumberPrefix::Standalone(bytes) => {
            format!("{} bytes", bytes)
        }
        NumberPrefix::Prefixed(prefix, n) => {
            format!("{:.2} {}B", n, prefix)
        }
    }
}

/// Number of code bits spent per acid.
#[must_use]
pub(super) fn bits_per_acid(code_bytes: usize, acids: usize) -> f32 {
    if acids == 0 {
        0.0
    } else {
        code_bytes as f32 * 8.0 / acids as f32
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Write;

    use tempfile::TempDir;

    use crate::codec::common::{bits_per_acid, format_bytes, write_atomically};
    use crate::progress::ByteNum;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(ByteNum::new(999)), "999 bytes");
        assert_eq!(format_bytes(ByteNum::new(1_500)), "1.50 kB");
        assert_eq!(format_bytes(ByteNum::new(2_000_000)), "2.00 MB");
    }

    #[test]
    fn test_bits_per_acid() {
        assert_eq!(bits_per_acid(0, 0), 0.0);
        assert_eq!(bits_per_acid(25, 100), 2.0);
    }

    #[test]
    fn atomic_write_replaces_target() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "old").unwrap();

        write_atomically(&path, |writer| writer.write_all(b"new")).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn failed_atomic_write_keeps_target() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "old").unwrap();

        let result = write_atomically(&path, |writer| {
            writer.write_all(b"partial")?;
            Err(std::io::Error::from(std::io::ErrorKind::InvalidData))
        });

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
