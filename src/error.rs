// src/error.rs
// Error kinds shared by the engine and the batch writer

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, KochError>;

#[derive(Debug, Error)]
pub enum KochError {
    /// A configuration or call argument is out of range.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter { name: &'static str, message: String },

    #[error("character {0:?} has no Morse code")]
    UnknownCharacter(char),

    /// The buffer was empty or silent, so there is nothing to normalize.
    #[error("audio buffer for {} is empty or silent", path.display())]
    EmptyAudioBuffer { path: PathBuf },

    #[error("failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl KochError {
    pub fn invalid_param(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }

    pub(crate) fn file_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Folds a WAV encoder failure into the I/O error kind.
    pub(crate) fn wav_write(path: impl Into<PathBuf>, err: hound::Error) -> Self {
        let source = match err {
            hound::Error::IoError(e) => e,
            other => io::Error::other(other),
        };
        Self::file_write(path, source)
    }

    /// Only bad configuration aborts a run. Everything else is skipped per item.
    pub fn is_fatal(&self) -> bool {
        matches!(self, KochError::InvalidParameter { .. })
    }
}
