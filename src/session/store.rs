// src/session/store.rs

use std::fmt::Debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context};
use tracing::warn;

use crate::errors::Result;
use crate::types::Role;

/// Where the logged-in role flag lives.
pub trait RoleStore: Send + Sync + Debug {
    /// Stored role, or `None` when logged out. Unreadable flags count as
    /// logged out.
    fn load(&self) -> Result<Option<Role>>;
    fn save(&self, role: Role) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Role flag persisted as a single line in a file.
#[derive(Debug, Clone)]
pub struct FileRoleStore {
    path: PathBuf,
}

impl FileRoleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RoleStore for FileRoleStore {
    fn load(&self) -> Result<Option<Role>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(anyhow::Error::from(e)
                    .context(format!("reading role flag {:?}", self.path))
                    .into());
            }
        };

        match contents.parse::<Role>() {
            Ok(role) => Ok(Some(role)),
            Err(reason) => {
                warn!(path = ?self.path, %reason, "ignoring unreadable role flag");
                Ok(None)
            }
        }
    }

    fn save(&self, role: Role) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| format!("creating dir {:?}", parent))?;
            }
        }
        fs::write(&self.path, role.as_str())
            .with_context(|| format!("writing role flag {:?}", self.path))?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::Error::from(e)
                .context(format!("removing role flag {:?}", self.path))
                .into()),
        }
    }
}

/// In-memory role flag. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct MemoryRoleStore {
    role: Arc<Mutex<Option<Role>>>,
}

impl MemoryRoleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role(role: Role) -> Self {
        Self {
            role: Arc::new(Mutex::new(Some(role))),
        }
    }

    fn set(&self, role: Option<Role>) -> Result<()> {
        let mut guard = self
            .role
            .lock()
            .map_err(|_| anyhow!("role store lock poisoned"))?;
        *guard = role;
        Ok(())
    }
}

impl RoleStore for MemoryRoleStore {
    fn load(&self) -> Result<Option<Role>> {
        let guard = self
            .role
            .lock()
            .map_err(|_| anyhow!("role store lock poisoned"))?;
        Ok(*guard)
    }

    fn save(&self, role: Role) -> Result<()> {
        self.set(Some(role))
    }

    fn clear(&self) -> Result<()> {
        self.set(None)
    }
}
