//! Shell-style tokenization of scenario command strings.

use crate::error::HarnessError;

/// Splits a human-authored command string into an argument list.
///
/// Tokenization is pure and uniform across hosts: POSIX quoting rules apply
/// everywhere, so a scenario file produces the same argument list on every
/// platform. Arguments quoted with `'` or `"` keep embedded spaces; blank
/// input yields an empty list.
///
/// # Errors
///
/// Returns [`HarnessError::Tokenise`] when the string cannot be tokenised,
/// for example on an unterminated quote.
pub fn split_args(command: &str) -> Result<Vec<String>, HarnessError> {
    let trimmed = command.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    shlex::split(trimmed).ok_or_else(|| HarnessError::Tokenise(command.to_owned()))
}
