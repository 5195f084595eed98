//! Error types for glossarc operations.
//!
//! Stream codecs (gzip, bzip2, xz) report malformed data as [`io::Error`],
//! which is carried unchanged in [`GlossArcError::Io`]. Zip failures keep the
//! zip crate's own error in [`GlossArcError::Zip`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use zip::result::ZipError;

/// The main error type for glossarc operations.
#[derive(Debug, Error)]
pub enum GlossArcError {
    /// I/O error from the filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reported while writing or re-reading a zip archive.
    #[error("Zip error: {0}")]
    Zip(#[from] ZipError),

    /// A finished archive does not read back as it was written.
    #[error("Corrupt archive {}: {message}", path.display())]
    CorruptArchive {
        /// The zip file that failed verification.
        path: PathBuf,
        /// What did not match.
        message: String,
    },

    /// The compression tag is not supported by the requested operation.
    #[error("Unsupported compression {tag:?} for {operation}")]
    UnsupportedCompression {
        /// The rejected tag, as given by the caller.
        tag: String,
        /// The operation that rejected it.
        operation: &'static str,
    },

    /// A caller passed an argument the operation can never accept.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the misuse.
        message: String,
    },

    /// An archive entry is neither a regular file nor a directory.
    #[error("Not a file or directory: {}", path.display())]
    NotFileOrDirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// Writing a zip archive failed.
    #[error("Failed to archive {}: {source}", path.display())]
    Archival {
        /// The file or directory being archived.
        path: PathBuf,
        /// The underlying failure.
        source: Box<GlossArcError>,
    },
}

/// Result type alias for glossarc operations.
pub type Result<T> = std::result::Result<T, GlossArcError>;

impl GlossArcError {
    /// Create an unsupported compression error.
    pub fn unsupported(tag: impl Into<String>, operation: &'static str) -> Self {
        Self::UnsupportedCompression {
            tag: tag.into(),
            operation,
        }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a not-a-file-or-directory error.
    pub fn not_file_or_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotFileOrDirectory { path: path.into() }
    }

    /// Create a corrupt archive error.
    pub fn corrupt_archive(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::CorruptArchive {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Wrap a failure that happened while archiving `path`.
    pub fn archival(path: impl Into<PathBuf>, source: GlossArcError) -> Self {
        Self::Archival {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Whether this is an [`GlossArcError::UnsupportedCompression`].
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedCompression { .. })
    }

    /// The innermost error, looking through [`GlossArcError::Archival`].
    pub fn root_cause(&self) -> &GlossArcError {
        match self {
            Self::Archival { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl From<GlossArcError> for io::Error {
    fn from(err: GlossArcError) -> Self {
        match err {
            GlossArcError::Io(e) => e,
            GlossArcError::NotFileOrDirectory { .. } => {
                io::Error::new(io::ErrorKind::InvalidInput, err)
            }
            GlossArcError::UnsupportedCompression { .. }
            | GlossArcError::InvalidArgument { .. } => {
                io::Error::new(io::ErrorKind::Unsupported, err)
            }
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}
