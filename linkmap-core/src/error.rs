use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapError {
    /// The link or category source could not be read. Halts the pipeline.
    #[error("Input unavailable ({}): {source}", path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),
}

impl MapError {
    pub fn input_unavailable(path: &Path, source: rusqlite::Error) -> Self {
        MapError::InputUnavailable {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn is_input_unavailable(&self) -> bool {
        matches!(self, MapError::InputUnavailable { .. })
    }
}

pub type Result<T> = std::result::Result<T, MapError>;
