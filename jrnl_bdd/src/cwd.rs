//! Scoped substitution of the process working directory.
//!
//! Scenarios run inside their own temporary directory because the
//! application under test resolves relative paths from wherever it was
//! launched. The working directory is process-global state, so the guard
//! also holds a global re-entrant mutex for its lifetime: scenarios that
//! substitute it are serialised rather than interleaved, and nested guards
//! on one thread restore in LIFO order.

use std::sync::LazyLock;

use camino::{Utf8Path, Utf8PathBuf};
use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

use crate::error::HarnessError;

static CWD_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// RAII guard restoring the prior working directory on drop.
///
/// Restoration also runs during panic unwinding, so a crashing entry point
/// cannot leave the process stranded in a scenario directory.
#[must_use = "dropping restores the prior working directory"]
pub struct CwdGuard {
    original: Utf8PathBuf,
    _lock: ReentrantMutexGuard<'static, ()>,
}

impl CwdGuard {
    /// Locks the working directory, moves into `path`, and returns the guard
    /// that will move back.
    ///
    /// The original directory is captured and validated before anything
    /// changes, so a failure never leaves the process half-moved.
    ///
    /// # Errors
    ///
    /// Returns an error when the current directory cannot be read, is not
    /// valid UTF-8, or the target cannot be entered.
    pub fn enter(path: impl AsRef<Utf8Path>) -> Result<Self, HarnessError> {
        let path = path.as_ref();
        let lock = CWD_MUTEX.lock();
        let original = std::env::current_dir().map_err(|source| HarnessError::io(".", source))?;
        let original = Utf8PathBuf::from_path_buf(original)
            .map_err(|raw| HarnessError::NonUtf8Path(raw.display().to_string()))?;
        std::env::set_current_dir(path)
            .map_err(|source| HarnessError::io(path.to_owned(), source))?;
        Ok(Self {
            original,
            _lock: lock,
        })
    }

    /// The directory the guard will restore.
    #[must_use]
    pub fn original(&self) -> &Utf8Path {
        &self.original
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        // Best-effort restoration; there is nothing further to clean up if
        // the original directory has vanished.
        let _unused = std::env::set_current_dir(&self.original);
    }
}

impl std::fmt::Debug for CwdGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CwdGuard")
            .field("original", &self.original)
            .finish_non_exhaustive()
    }
}

/// Runs a closure while holding the working-directory lock.
///
/// Tests that read the working directory without taking a [`CwdGuard`] use
/// this to avoid racing guards held on other threads. The lock is
/// re-entrant, so the closure may itself create guards.
pub fn with_lock<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = CWD_MUTEX.lock();
    f()
}
