use std::fmt::Display;
use std::path::{Path, PathBuf};

use log::info;

#[derive(Debug, Clone)]
pub struct InputFile {
    path: PathBuf,
}

impl Display for InputFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

pub fn input_file(path: &str) -> Result<InputFile, String> {
    if path.is_empty() {
        return Err("Input path cannot be empty".to_owned());
    }

    let result = InputFile {
        path: PathBuf::from(path),
    };

    Ok(result)
}

impl InputFile {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the size of the file, or `None` if it cannot be determined
    /// (e.g. the file does not exist).
    #[must_use]
    pub fn length(&self) -> Option<u64> {
        self.path.metadata().map(|metadata| metadata.len()).ok()
    }

    /// Returns the path given explicitly by the user, or the input path with
    /// its extension replaced by `new_extension`.
    #[must_use]
    pub fn output_path(&self, output: &Option<PathBuf>, new_extension: &str) -> PathBuf {
        let path = match output {
            Some(path) => path.clone(),
            None => self.path.with_extension(new_extension),
        };
        info!("Output file: {}", path.display());

        path
    }
}
