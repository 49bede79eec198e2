//! Assertions over a captured [`CliRun`].
//!
//! Each check is a read-only predicate: it never mutates the record, checks
//! are order-independent, and every failure message carries both sides of
//! the comparison so a scenario can be diagnosed without re-running it.

use anyhow::{ensure, Context, Result};
use regex::Regex;

use crate::record::CliRun;

impl CliRun {
    /// The invocation must have exited with status 0 exactly.
    ///
    /// # Errors
    ///
    /// Fails with the actual status (and whatever reached stderr) otherwise.
    pub fn assert_success(&self) -> Result<()> {
        ensure!(
            self.status() == 0,
            "expected exit status 0, got {}; stderr was:\n{}",
            self.status(),
            self.stderr(),
        );
        Ok(())
    }

    /// `pattern` must match somewhere in standard output.
    ///
    /// # Errors
    ///
    /// Fails when the pattern does not compile, or finds no match; the
    /// failure reports the pattern, the full output, and the empty match
    /// list.
    pub fn assert_stdout_matches(&self, pattern: &str) -> Result<()> {
        let regex =
            Regex::new(pattern).with_context(|| format!("invalid output pattern {pattern:?}"))?;
        let matches: Vec<&str> = regex.find_iter(self.stdout()).map(|m| m.as_str()).collect();
        ensure!(
            !matches.is_empty(),
            "regex found no match:\n{pattern}\n{}\n{matches:?}",
            self.stdout(),
        );
        Ok(())
    }

    /// The non-empty `expected` text must appear verbatim in standard output.
    ///
    /// # Errors
    ///
    /// Fails when `expected` is empty, or is not a literal substring of the
    /// captured output.
    pub fn assert_stdout_contains(&self, expected: &str) -> Result<()> {
        ensure!(!expected.is_empty(), "expected output must not be empty");
        ensure!(
            self.stdout().contains(expected),
            "output did not contain {expected:?}; output was:\n{}",
            self.stdout(),
        );
        Ok(())
    }

    /// Standard output must equal `expected` exactly, after trimming leading
    /// and trailing whitespace from both sides.
    ///
    /// # Errors
    ///
    /// Fails with both trimmed texts when they differ.
    pub fn assert_stdout_eq(&self, expected: &str) -> Result<()> {
        let expected = expected.trim();
        let actual = self.stdout().trim();
        ensure!(
            expected == actual,
            "output does not match.\nExpected:\n{expected}\n---end---\nActual:\n{actual}\n---end---",
        );
        Ok(())
    }

    /// `expected` must appear verbatim on standard error.
    ///
    /// This is the only check that reads the error stream.
    ///
    /// # Errors
    ///
    /// Fails with the expected text and the full stderr capture.
    pub fn assert_stderr_contains(&self, expected: &str) -> Result<()> {
        ensure!(
            self.stderr().contains(expected),
            "message {expected:?} not seen on stderr; stderr was:\n{}",
            self.stderr(),
        );
        Ok(())
    }
}
