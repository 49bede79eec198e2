//! Captured outcome of one entry-point invocation.

use std::borrow::Cow;

/// Exit status plus captured output for a single scenario invocation.
///
/// Created exactly once by [`crate::invoke::invoke`] and read by every
/// assertion afterwards; nothing mutates it. Each scenario gets its own
/// record, discarded when the scenario ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliRun {
    status: i32,
    stdout: String,
    stderr: String,
}

impl CliRun {
    pub(crate) fn from_capture(status: i32, stdout: Vec<u8>, stderr: Vec<u8>) -> Self {
        Self {
            status,
            stdout: normalise_newlines(String::from_utf8_lossy(&stdout)),
            stderr: normalise_newlines(String::from_utf8_lossy(&stderr)),
        }
    }

    /// Exit status the entry point reported; 0 on a normal return.
    #[must_use]
    pub fn status(&self) -> i32 {
        self.status
    }

    /// Everything written to standard output during the invocation.
    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Everything written to standard error during the invocation.
    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}

/// Converts Windows newlines to their Unix equivalent so substring and
/// equality assertions behave identically across platforms.
fn normalise_newlines(text: Cow<'_, str>) -> String {
    if !text.contains('\r') {
        return text.into_owned();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
