//! Branch stack store
//!
//! Branch metadata lives in a single JSON document under the git dir.
//! All access goes through a transaction:
//! - [`ReadTx`] is a snapshot of committed state
//! - [`WriteTx`] is an exclusive working copy that is discarded on drop
//!   unless [`WriteTx::commit`] is called

use crate::error::{Error, Result};
use crate::types::Branch;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// File name of the store inside `<git-dir>/stackup/`
pub const DB_FILE_NAME: &str = "stackup.db";

/// On-disk document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct DbState {
    #[serde(default)]
    branches: BTreeMap<String, Branch>,
}

/// Read access shared by both transaction kinds
pub trait BranchRead {
    /// Look up a branch by name
    fn get(&self, name: &str) -> Option<&Branch>;

    /// All branches, ordered by name
    fn branches(&self) -> impl Iterator<Item = &Branch>;
}

/// Transactional store of branch metadata
pub struct Db {
    path: Option<PathBuf>,
    state: Mutex<DbState>,
    writer_active: AtomicBool,
}

impl Db {
    /// Open the store at `path`, treating a missing file as empty
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| Error::Store(format!("corrupt store {}: {e}", path.display())))?,
            Err(err) if err.kind() == ErrorKind::NotFound => DbState::default(),
            Err(err) => return Err(err.into()),
        };

        debug!(
            "Opened store {} ({} branches)",
            path.display(),
            state.branches.len()
        );

        Ok(Self::with_state(Some(path), state))
    }

    /// Open the store for a repository given its git dir
    pub fn open_in_git_dir(git_dir: &Path) -> Result<Self> {
        Self::open(git_dir.join("stackup").join(DB_FILE_NAME))
    }

    /// Create a store that is never written to disk
    pub fn in_memory() -> Self {
        Self::with_state(None, DbState::default())
    }

    const fn with_state(path: Option<PathBuf>, state: DbState) -> Self {
        Self {
            path,
            state: Mutex::new(state),
            writer_active: AtomicBool::new(false),
        }
    }

    /// Snapshot of the committed state
    pub fn read_tx(&self) -> ReadTx {
        ReadTx {
            state: self.lock().clone(),
        }
    }

    /// Begin the (single) write transaction
    pub fn write_tx(&self) -> Result<WriteTx<'_>> {
        if self
            .writer_active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(Error::Store(
                "another write transaction is already open".to_string(),
            ));
        }

        Ok(WriteTx {
            db: self,
            state: self.lock().clone(),
            finished: false,
        })
    }

    fn lock(&self) -> MutexGuard<'_, DbState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, state: &DbState) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        // Write-then-rename so a crash never leaves a half-written store
        let tmp = path.with_extension("db.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(state)?)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

/// Read-only snapshot of committed branch metadata
#[derive(Debug, Clone)]
pub struct ReadTx {
    state: DbState,
}

impl BranchRead for ReadTx {
    fn get(&self, name: &str) -> Option<&Branch> {
        self.state.branches.get(name)
    }

    fn branches(&self) -> impl Iterator<Item = &Branch> {
        self.state.branches.values()
    }
}

/// Exclusive write transaction
///
/// Writes are staged in a private copy of the store and become visible
/// only on [`commit`](Self::commit). Dropping the transaction without
/// committing aborts it.
pub struct WriteTx<'db> {
    db: &'db Db,
    state: DbState,
    finished: bool,
}

impl WriteTx<'_> {
    /// Stage a branch record, replacing any existing one with the same name
    pub fn put(&mut self, branch: Branch) {
        self.state.branches.insert(branch.name.clone(), branch);
    }

    /// Persist all staged writes
    ///
    /// On failure nothing is persisted and the transaction is aborted.
    pub fn commit(mut self) -> Result<()> {
        self.db.persist(&self.state)?;
        *self.db.lock() = std::mem::take(&mut self.state);
        self.finished = true;
        debug!("Committed store transaction");
        Ok(())
    }

    /// Discard all staged writes
    pub fn abort(self) {
        drop(self);
    }
}

impl BranchRead for WriteTx<'_> {
    fn get(&self, name: &str) -> Option<&Branch> {
        self.state.branches.get(name)
    }

    fn branches(&self) -> impl Iterator<Item = &Branch> {
        self.state.branches.values()
    }
}

impl Drop for WriteTx<'_> {
    fn drop(&mut self) {
        if !self.finished {
            debug!("Aborting store transaction");
        }
        self.db.writer_active.store(false, Ordering::SeqCst);
    }
}
