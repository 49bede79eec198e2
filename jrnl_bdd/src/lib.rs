//! In-process behavioural harness for a command-line journaling application.
//!
//! The crate supplies the glue that lets Gherkin scenarios drive a journaling
//! CLI without spawning a process: [`stage_config`] builds a hermetic
//! scenario directory from the fixture tree, [`invoke`] runs the
//! application's entry point with pinned configuration paths and captures
//! both output streams, and the assertion methods on [`CliRun`] check the
//! captured outcome. Step definitions binding the scenario vocabulary to
//! these pieces live in the crate's behavioural test suite; pattern matching
//! and step lookup are delegated to `rstest-bdd`.
//!
//! The application under test is reached through the [`EntryPoint`] trait:
//! arguments, configuration lookup, and output streams are all passed in
//! explicitly, so an invocation substitutes no process-global state beyond
//! the working directory, which is scoped by [`CwdGuard`].

mod assert;
pub mod cli;
pub mod cwd;
pub mod error;
pub mod invoke;
pub mod manifest;
pub mod record;
pub mod split;
pub mod stage;

pub use cli::{CliIo, ConfigOverride, EntryPoint, Exit};
pub use cwd::CwdGuard;
pub use error::HarnessError;
pub use invoke::invoke;
pub use manifest::manifest_version;
pub use record::CliRun;
pub use split::split_args;
pub use stage::{stage_config, StagedConfig};

/// Version identifier the harness carries for itself.
///
/// Staging appends this to legacy configuration copies as their upgrade
/// marker, and it matches the version declared in the workspace manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
