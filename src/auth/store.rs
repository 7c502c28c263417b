//! Persistence boundary for user records.
//!
//! Records are kept in insertion order and never updated or removed by the
//! login and registration flows.

use super::error::StoreError;
use super::user::{NewUser, UserRecord};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::{debug, instrument};

pub trait UserStore: Send {
    /// Read every stored account.
    ///
    /// # Errors
    /// Returns an error if the backing medium cannot be read.
    fn list_users(&self) -> Result<Vec<UserRecord>, StoreError>;

    /// Append one account, applying store defaults (`role` → citizen).
    ///
    /// # Errors
    /// Returns an error if the record cannot be persisted; nothing is
    /// appended in that case.
    fn add_user(&mut self, user: NewUser) -> Result<UserRecord, StoreError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryUserStore {
    users: Vec<UserRecord>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_users(users: Vec<UserRecord>) -> Self {
        Self { users }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserStore for MemoryUserStore {
    fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        Ok(self.users.clone())
    }

    fn add_user(&mut self, user: NewUser) -> Result<UserRecord, StoreError> {
        let record = user.into_record();
        self.users.push(record.clone());
        Ok(record)
    }
}

/// Users kept as a JSON array in a single file.
///
/// A missing file is an empty store. Every append rewrites the file through
/// a sibling temp file and a rename, so readers never see half a list.
///
/// All access is blocking `std::fs` I/O. Async callers hold the store lock
/// for the duration of each read or rewrite.
#[derive(Debug, Clone)]
pub struct JsonFileUserStore {
    path: PathBuf,
}

impl JsonFileUserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn write_all(&self, users: &[UserRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(users)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            self.io_error(e)
        })
    }
}

impl UserStore for JsonFileUserStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("user store not found, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    #[instrument(skip(self, user), fields(path = %self.path.display()))]
    fn add_user(&mut self, user: NewUser) -> Result<UserRecord, StoreError> {
        let mut users = self.list_users()?;
        let record = user.into_record();
        users.push(record.clone());
        self.write_all(&users)?;

        debug!(users = users.len(), "user appended");

        Ok(record)
    }
}
