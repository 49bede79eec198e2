//! Minimal journaling application driven by the behavioural suite.
//!
//! Just enough command surface to exercise every step: version reporting,
//! listing the default journal, composing an entry from positional
//! arguments, a stderr error path with an explicit exit code, and a
//! first-run branch that writes a starter configuration to the install
//! path. Journal paths from the configuration are resolved relative to the
//! working directory, which is why staging moves into the scenario
//! directory.

use std::collections::BTreeMap;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use jrnl_bdd::{CliIo, ConfigOverride, EntryPoint, Exit};
use serde::Deserialize;

/// Exit code for configuration trouble.
const BAD_CONFIG: i32 = 1;
/// Exit code for command-line misuse.
const BAD_USAGE: i32 = 2;

/// Fixed timestamp stamped onto composed entries; scenarios need
/// deterministic output.
const ENTRY_STAMP: &str = "[2099-12-31 23:59]";

#[derive(Debug, Deserialize)]
struct JournalConfig {
    journals: BTreeMap<String, String>,
    #[serde(default)]
    version: Option<String>,
}

/// Stub implementation of the journal command line.
#[derive(Debug, Default)]
pub struct StubJournal;

impl EntryPoint for StubJournal {
    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn run(
        &self,
        args: &[String],
        config: &ConfigOverride,
        io: &mut CliIo<'_>,
    ) -> Result<(), Exit> {
        if args.first().is_some_and(|arg| arg == "--version") {
            out(io, &format!("jrnl {}\n", self.version()));
            return Ok(());
        }
        let journal = default_journal(config, io)?;
        match args.first().map(String::as_str) {
            None => list_journal(&journal, io),
            Some(flag) if flag.starts_with('-') => {
                err(io, &format!("unknown flag: {flag}\n"));
                Err(Exit::new(BAD_USAGE))
            }
            Some(_) => add_entry(&journal, args, io),
        }
    }
}

fn out(io: &mut CliIo<'_>, text: &str) {
    io.stdout
        .write_all(text.as_bytes())
        .expect("write to capture buffer");
}

fn err(io: &mut CliIo<'_>, text: &str) {
    io.stderr
        .write_all(text.as_bytes())
        .expect("write to capture buffer");
}

/// Loads the configuration and resolves the default journal path.
///
/// A missing primary configuration is treated as a first run: a starter
/// configuration is written to the install path instead of failing. An
/// existing configuration must carry the `version:` upgrade marker that
/// staging appends.
fn default_journal(config: &ConfigOverride, io: &mut CliIo<'_>) -> Result<Utf8PathBuf, Exit> {
    let path = config.primary();
    let first_run = !path.exists();
    let contents = if first_run {
        let starter = "journals:\n  default: journal.txt\n";
        if let Err(error) = std::fs::write(config.install(), starter) {
            err(io, &format!("cannot install config at {}: {error}\n", config.install()));
            return Err(Exit::new(BAD_CONFIG));
        }
        out(io, &format!("journal configuration created at {}\n", config.install()));
        starter.to_owned()
    } else {
        match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) => {
                err(io, &format!("cannot read config {path}: {error}\n"));
                return Err(Exit::new(BAD_CONFIG));
            }
        }
    };

    let parsed: JournalConfig = match serde_yaml::from_str(&contents) {
        Ok(parsed) => parsed,
        Err(error) => {
            err(io, &format!("cannot parse config {path}: {error}\n"));
            return Err(Exit::new(BAD_CONFIG));
        }
    };
    if !first_run && parsed.version.is_none() {
        err(io, &format!("config {path} is missing its version marker\n"));
        return Err(Exit::new(BAD_CONFIG));
    }
    match parsed.journals.get("default") {
        Some(journal) => Ok(Utf8PathBuf::from(journal)),
        None => {
            err(io, "no default journal configured\n");
            Err(Exit::new(BAD_CONFIG))
        }
    }
}

/// Prints the journal as stored; a journal that does not exist yet is empty.
fn list_journal(journal: &Utf8Path, io: &mut CliIo<'_>) -> Result<(), Exit> {
    let contents = std::fs::read_to_string(journal).unwrap_or_default();
    out(io, &contents);
    Ok(())
}

/// Appends one entry composed from the positional arguments.
fn add_entry(journal: &Utf8Path, args: &[String], io: &mut CliIo<'_>) -> Result<(), Exit> {
    let text = args.join(" ");
    let mut contents = std::fs::read_to_string(journal).unwrap_or_default();
    if !contents.is_empty() {
        if !contents.ends_with('\n') {
            contents.push('\n');
        }
        contents.push('\n');
    }
    contents.push_str(&format!("{ENTRY_STAMP} {text}\n"));
    match std::fs::write(journal, contents) {
        Ok(()) => {
            out(io, "Entry added to the default journal\n");
            Ok(())
        }
        Err(error) => {
            err(io, &format!("cannot write journal {journal}: {error}\n"));
            Err(Exit::new(BAD_CONFIG))
        }
    }
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;
    use jrnl_bdd::{cwd, invoke, ConfigOverride};
    use tempfile::TempDir;

    use super::StubJournal;

    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let temp = TempDir::new().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf-8 root");
        (temp, root)
    }

    #[test]
    fn version_flag_reports_the_package_version() {
        let config = ConfigOverride::pinned("/nowhere/ignored.yaml");
        let run = invoke(&StubJournal, "--version", &config).expect("invoke");
        assert_eq!(run.status(), 0);
        assert_eq!(run.stdout(), format!("jrnl {}\n", env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn unknown_flag_exits_with_usage_error() {
        let (_temp, root) = temp_root();
        let config_path = root.join("config.yaml");
        std::fs::write(
            &config_path,
            "journals:\n  default: journal.txt\nversion: 0.0.0\n",
        )
        .expect("write config");
        let config = ConfigOverride::pinned(config_path);
        let run = invoke(&StubJournal, "--nonexistent", &config).expect("invoke");
        assert_eq!(run.status(), 2);
        assert!(run.stderr().contains("unknown flag: --nonexistent"));
        assert_eq!(run.stdout(), "");
    }

    #[test]
    fn a_config_without_the_version_marker_is_rejected() {
        let (_temp, root) = temp_root();
        let config_path = root.join("config.yaml");
        std::fs::write(&config_path, "journals:\n  default: journal.txt\n")
            .expect("write config");
        let config = ConfigOverride::pinned(config_path);
        let run = invoke(&StubJournal, "", &config).expect("invoke");
        assert_eq!(run.status(), 1);
        assert!(run.stderr().contains("missing its version marker"));
    }

    #[test]
    fn a_missing_config_triggers_the_first_run_install() {
        cwd::with_lock(|| {
            let (_temp, root) = temp_root();
            let guard = jrnl_bdd::CwdGuard::enter(&root).expect("enter temp dir");
            let config = ConfigOverride::pinned(root.join("fresh.yaml"));
            let run = invoke(&StubJournal, "", &config).expect("invoke");
            assert_eq!(run.status(), 0);
            assert!(run.stdout().contains("journal configuration created at"));
            assert!(config.install().exists(), "starter config must be written");
            drop(guard);
        });
    }

    #[test]
    fn composed_entries_land_in_the_default_journal() {
        cwd::with_lock(|| {
            let (_temp, root) = temp_root();
            let guard = jrnl_bdd::CwdGuard::enter(&root).expect("enter temp dir");
            let config_path = root.join("config.yaml");
            std::fs::write(
                &config_path,
                "journals:\n  default: journal.txt\nversion: 0.0.0\n",
            )
            .expect("write config");
            let config = ConfigOverride::pinned(config_path);

            let run = invoke(&StubJournal, "'today: two words each'", &config).expect("invoke");
            assert_eq!(run.status(), 0);
            assert!(run.stdout().contains("Entry added"));
            let journal = std::fs::read_to_string(root.join("journal.txt")).expect("read journal");
            assert!(journal.contains("today: two words each"));
            drop(guard);
        });
    }
}
