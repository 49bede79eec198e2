//! Runs the entry point as if launched from a command line.

use tracing::debug;

use crate::cli::{CliIo, ConfigOverride, EntryPoint};
use crate::error::HarnessError;
use crate::record::CliRun;
use crate::split::split_args;

/// Invokes `app` once with the given command string and pinned configuration.
///
/// `command` is the text that would follow the program name on a real
/// command line; it is tokenised with [`split_args`] before the call. The
/// entry point writes into a fresh buffer pair, so the returned [`CliRun`]
/// holds exactly the output of this one call and nothing else.
///
/// A normal return records status 0; an explicit [`Exit`](crate::cli::Exit)
/// records its code verbatim. Panics are deliberately not caught: an
/// unwinding entry point is a crash, not an exit, and must surface as one.
///
/// # Errors
///
/// Returns [`HarnessError::Tokenise`] when the command string cannot be
/// split.
pub fn invoke(
    app: &dyn EntryPoint,
    command: &str,
    config: &ConfigOverride,
) -> Result<CliRun, HarnessError> {
    let args = split_args(command)?;
    debug!(?args, config = %config.primary(), "invoking entry point");
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let status = {
        let mut io = CliIo {
            stdout: &mut stdout,
            stderr: &mut stderr,
        };
        match app.run(&args, config, &mut io) {
            Ok(()) => 0,
            Err(exit) => exit.code(),
        }
    };
    Ok(CliRun::from_capture(status, stdout, stderr))
}
