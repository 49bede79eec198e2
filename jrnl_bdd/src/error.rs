//! Error types for the behavioural harness.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Infrastructure failures that abort a scenario outright.
///
/// These indicate a broken test environment — missing fixtures, an
/// unreadable manifest, filesystem trouble — never a defect in the
/// application under test. They are fatal and unrecovered: a scenario cannot
/// run without its environment, so nothing is retried. Unmet assertions are
/// the other error class and travel separately as descriptive
/// [`anyhow`] failures.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("fixture missing at {0}")]
    MissingFixture(Utf8PathBuf),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("path is not valid UTF-8: {0}")]
    NonUtf8Path(String),

    #[error("cannot tokenise command {0:?}")]
    Tokenise(String),

    #[error("cannot read version from manifest {path}: {message}")]
    Manifest { path: Utf8PathBuf, message: String },
}

impl HarnessError {
    pub(crate) fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
