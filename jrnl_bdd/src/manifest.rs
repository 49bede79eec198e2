//! Reads the declared project version from the build manifest.

use camino::Utf8Path;
use serde::Deserialize;

use crate::error::HarnessError;

#[derive(Debug, Deserialize)]
struct RootManifest {
    workspace: WorkspaceSection,
}

#[derive(Debug, Deserialize)]
struct WorkspaceSection {
    package: WorkspacePackage,
}

#[derive(Debug, Deserialize)]
struct WorkspacePackage {
    version: String,
}

/// Returns the version declared at `workspace.package.version` in the
/// manifest at `path`.
///
/// Read fresh on every call; version assertions want whatever the manifest
/// says right now, not a value cached at compile time.
///
/// # Errors
///
/// An unreadable or structurally unexpected manifest is an infrastructure
/// failure: the harness cannot assert on a version it cannot read.
pub fn manifest_version(path: &Utf8Path) -> Result<String, HarnessError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|source| HarnessError::io(path.to_owned(), source))?;
    let manifest: RootManifest =
        toml::from_str(&contents).map_err(|source| HarnessError::Manifest {
            path: path.to_owned(),
            message: source.to_string(),
        })?;
    Ok(manifest.workspace.package.version)
}
