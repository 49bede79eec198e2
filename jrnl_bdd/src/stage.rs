//! Hermetic scenario staging.
//!
//! Every scenario starts from a fresh temporary directory populated with one
//! named configuration file and the fixed journal fixture tree. The process
//! moves into that directory for the remainder of the scenario because the
//! application under test resolves journal paths relative to its working
//! directory.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use tempfile::TempDir;
use tracing::debug;

use crate::cwd::CwdGuard;
use crate::error::HarnessError;

/// Directory inside the fixture root holding named configuration files.
const CONFIG_FIXTURES: &str = "configs";
/// Directory inside the fixture root holding journal files.
const JOURNAL_FIXTURES: &str = "journals";
/// Where the journal fixtures land inside the scenario directory.
const JOURNAL_DEST: &str = "features/journals";
/// Configuration files with this suffix still require an appended upgrade
/// marker; no other format receives one.
const LEGACY_CONFIG_SUFFIX: &str = ".yaml";

/// A staged scenario directory.
///
/// Owns the temporary directory, the working-directory guard, and the path
/// of the copied configuration file. The configuration path never changes
/// once staging returns. Dropping the value restores the prior working
/// directory and removes the scenario directory.
#[derive(Debug)]
pub struct StagedConfig {
    // The guard must restore the prior working directory before the
    // temporary directory underneath it is removed; field order is the drop
    // order.
    _cwd: CwdGuard,
    _dir: TempDir,
    root: Utf8PathBuf,
    config_path: Utf8PathBuf,
}

impl StagedConfig {
    /// Absolute path of the configuration copy inside the scenario directory.
    #[must_use]
    pub fn config_path(&self) -> &Utf8Path {
        &self.config_path
    }

    /// Absolute path of the scenario directory itself.
    #[must_use]
    pub fn dir(&self) -> &Utf8Path {
        &self.root
    }
}

/// Builds a hermetic working directory for one scenario.
///
/// Copies `<fixtures>/configs/<config_file>` into a fresh temporary
/// directory, copies the whole `<fixtures>/journals` tree to
/// `features/journals` beneath it, and moves the process into the new
/// directory for the remainder of the scenario. Configuration files in the
/// legacy `.yaml` format get a trailing `version: <version>` marker, which
/// older configuration schemas require after an upgrade.
///
/// # Errors
///
/// A missing fixture or any filesystem failure is fatal: the scenario cannot
/// run without its environment, so nothing is retried or recovered.
pub fn stage_config(
    fixtures: &Utf8Path,
    config_file: &str,
    version: &str,
) -> Result<StagedConfig, HarnessError> {
    let temp = TempDir::new().map_err(|source| HarnessError::io(".", source))?;
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
        .map_err(|raw| HarnessError::NonUtf8Path(raw.display().to_string()))?;
    let cwd = CwdGuard::enter(&root)?;

    let scenario = Dir::open_ambient_dir(&root, ambient_authority())
        .map_err(|source| HarnessError::io(root.clone(), source))?;

    let config_source = fixtures.join(CONFIG_FIXTURES).join(config_file);
    let configs = open_fixture_dir(&fixtures.join(CONFIG_FIXTURES))?;
    configs
        .copy(config_file, &scenario, config_file)
        .map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                HarnessError::MissingFixture(config_source.clone())
            } else {
                HarnessError::io(config_source.clone(), source)
            }
        })?;

    let journal_source = fixtures.join(JOURNAL_FIXTURES);
    let journals = open_fixture_dir(&journal_source)?;
    scenario
        .create_dir_all(JOURNAL_DEST)
        .map_err(|source| HarnessError::io(root.join(JOURNAL_DEST), source))?;
    let journal_dest = scenario
        .open_dir(JOURNAL_DEST)
        .map_err(|source| HarnessError::io(root.join(JOURNAL_DEST), source))?;
    copy_tree(&journals, &journal_dest, &journal_source)?;

    if config_file.ends_with(LEGACY_CONFIG_SUFFIX) {
        append_version_marker(&scenario, config_file, version, &root)?;
    }

    let config_path = root.join(config_file);
    debug!(config = %config_path, "staged scenario directory");
    Ok(StagedConfig {
        _cwd: cwd,
        _dir: temp,
        root,
        config_path,
    })
}

fn open_fixture_dir(path: &Utf8Path) -> Result<Dir, HarnessError> {
    Dir::open_ambient_dir(path, ambient_authority()).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            HarnessError::MissingFixture(path.to_owned())
        } else {
            HarnessError::io(path.to_owned(), source)
        }
    })
}

/// Copies every entry of `source` into `dest`, recursing into directories.
fn copy_tree(source: &Dir, dest: &Dir, context: &Utf8Path) -> Result<(), HarnessError> {
    let entries = source
        .read_dir(".")
        .map_err(|source| HarnessError::io(context.to_owned(), source))?;
    for entry in entries {
        let entry = entry.map_err(|source| HarnessError::io(context.to_owned(), source))?;
        let name = entry
            .file_name()
            .map_err(|source| HarnessError::io(context.to_owned(), source))?;
        let at = context.join(&name);
        let kind = entry
            .file_type()
            .map_err(|source| HarnessError::io(at.clone(), source))?;
        if kind.is_dir() {
            dest.create_dir(&name)
                .map_err(|source| HarnessError::io(at.clone(), source))?;
            let sub_source = source
                .open_dir(&name)
                .map_err(|source| HarnessError::io(at.clone(), source))?;
            let sub_dest = dest
                .open_dir(&name)
                .map_err(|source| HarnessError::io(at.clone(), source))?;
            copy_tree(&sub_source, &sub_dest, &at)?;
        } else {
            source
                .copy(&name, dest, &name)
                .map_err(|source| HarnessError::io(at.clone(), source))?;
        }
    }
    Ok(())
}

/// Appends the upgrade marker legacy configuration schemas expect.
fn append_version_marker(
    scenario: &Dir,
    config_file: &str,
    version: &str,
    root: &Utf8Path,
) -> Result<(), HarnessError> {
    let at = root.join(config_file);
    let mut contents = scenario
        .read_to_string(config_file)
        .map_err(|source| HarnessError::io(at.clone(), source))?;
    if !contents.is_empty() && !contents.ends_with('\n') {
        contents.push('\n');
    }
    contents.push_str(&format!("version: {version}\n"));
    scenario
        .write(config_file, &contents)
        .map_err(|source| HarnessError::io(at, source))
}
