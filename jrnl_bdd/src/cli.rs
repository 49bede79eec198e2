//! The surface the harness drives in place of a real shell.
//!
//! The journaling application historically discovered its arguments and its
//! configuration file through ambient process state. Here that surface is
//! explicit: an [`EntryPoint`] receives its argument list, a pinned
//! [`ConfigOverride`], and a [`CliIo`] buffer pair, so nothing has to be
//! substituted globally and restored afterwards.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};

/// Explicit termination status signalled by the entry point.
///
/// Returning `Err(Exit)` from [`EntryPoint::run`] is the application's
/// normal way of handing an exit code to the shell, not a fault: the harness
/// records the code verbatim. A panic, by contrast, is a crash and unwinds
/// through the harness untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exit(i32);

impl Exit {
    /// Wraps an exit code.
    #[must_use]
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    /// The wrapped code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self.0
    }
}

/// Output streams handed to the entry point for the duration of one call.
///
/// The harness allocates a fresh buffer pair per invocation, so the capture
/// cannot include writes made before or after the call.
pub struct CliIo<'a> {
    /// Standard output sink.
    pub stdout: &'a mut dyn Write,
    /// Standard error sink.
    pub stderr: &'a mut dyn Write,
}

/// Pinned configuration lookup handed to the entry point.
///
/// The application normally searches for its configuration file through
/// environment variables and platform default locations. Scenarios bypass
/// that search entirely: both the primary lookup and the first-run install
/// lookup resolve to fixed paths, keeping every run hermetic and independent
/// of the host environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigOverride {
    primary: Utf8PathBuf,
    install: Utf8PathBuf,
}

impl ConfigOverride {
    /// Pins both lookups to the same path, which is what staging produces.
    #[must_use]
    pub fn pinned(path: impl Into<Utf8PathBuf>) -> Self {
        let path = path.into();
        Self {
            install: path.clone(),
            primary: path,
        }
    }

    /// Path of the primary configuration file.
    #[must_use]
    pub fn primary(&self) -> &Utf8Path {
        &self.primary
    }

    /// Path the application writes its configuration to on first run.
    #[must_use]
    pub fn install(&self) -> &Utf8Path {
        &self.install
    }
}

/// Callable entry point of the application under test.
///
/// Implementations behave as if launched from a command line: `args` holds
/// the tokens that would follow the program name, and all terminal output
/// goes through `io`.
pub trait EntryPoint {
    /// Version identifier the application reports for itself.
    fn version(&self) -> &str;

    /// Runs one command.
    ///
    /// `Ok(())` means a clean exit with status 0; `Err(exit)` carries an
    /// explicit status code.
    fn run(
        &self,
        args: &[String],
        config: &ConfigOverride,
        io: &mut CliIo<'_>,
    ) -> Result<(), Exit>;
}
