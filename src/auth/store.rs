//! Persistent credential storage.
//!
//! Two named slots (`access_token`, `refresh_token`) behind a trait so
//! the pipeline never touches ambient storage directly and tests can
//! swap in an in-memory fake. The pair is set together at login and
//! cleared together at teardown; renewal replaces the access slot only.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// Storage primitive shared by the pipeline, the login flow, and logout.
/// Nothing else writes credentials.
pub trait TokenStore: Send + Sync {
    /// Current access credential, if any.
    fn access(&self) -> Option<String>;

    /// Current refresh credential, if any.
    fn refresh(&self) -> Option<String>;

    /// Set both slots together (login/registration exchange).
    fn store_pair(&self, access: &str, refresh: &str);

    /// Replace the access slot only (successful renewal).
    fn store_access(&self, access: &str);

    /// Clear both slots together. Safe to call on an empty store.
    fn clear_all(&self);
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct Slots {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

/// Credential store that lives and dies with the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slots: Mutex<Slots>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn access(&self) -> Option<String> {
        self.slots.lock().expect("token store mutex poisoned").access_token.clone()
    }

    fn refresh(&self) -> Option<String> {
        self.slots.lock().expect("token store mutex poisoned").refresh_token.clone()
    }

    fn store_pair(&self, access: &str, refresh: &str) {
        let mut slots = self.slots.lock().expect("token store mutex poisoned");
        slots.access_token = Some(access.to_string());
        slots.refresh_token = Some(refresh.to_string());
    }

    fn store_access(&self, access: &str) {
        let mut slots = self.slots.lock().expect("token store mutex poisoned");
        slots.access_token = Some(access.to_string());
    }

    fn clear_all(&self) {
        let mut slots = self.slots.lock().expect("token store mutex poisoned");
        *slots = Slots::default();
    }
}

/// Credential store backed by a JSON file, so sessions survive process
/// restarts. A missing, unreadable, or corrupt file loads as empty.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    slots: Mutex<Slots>,
}

impl FileTokenStore {
    /// Open the store at `path`, loading whatever credentials are there.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let slots = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(slots) => slots,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Corrupt credentials file, starting with an empty store"
                    );
                    Slots::default()
                }
            },
            Err(_) => Slots::default(),
        };
        Self {
            path,
            slots: Mutex::new(slots),
        }
    }

    /// Persistence failures are logged, not propagated: the in-memory
    /// slots stay authoritative for the life of the process.
    fn persist(&self, slots: &Slots) {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                let _ = fs::create_dir_all(parent);
            }
        }
        match serde_json::to_vec_pretty(slots) {
            Ok(bytes) => {
                if let Err(e) = fs::write(&self.path, bytes) {
                    tracing::warn!(
                        path = %self.path.display(),
                        error = %e,
                        "Failed to persist credentials"
                    );
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize credentials");
            }
        }
    }
}

impl TokenStore for FileTokenStore {
    fn access(&self) -> Option<String> {
        self.slots.lock().expect("token store mutex poisoned").access_token.clone()
    }

    fn refresh(&self) -> Option<String> {
        self.slots.lock().expect("token store mutex poisoned").refresh_token.clone()
    }

    fn store_pair(&self, access: &str, refresh: &str) {
        let mut slots = self.slots.lock().expect("token store mutex poisoned");
        slots.access_token = Some(access.to_string());
        slots.refresh_token = Some(refresh.to_string());
        self.persist(&slots);
    }

    fn store_access(&self, access: &str) {
        let mut slots = self.slots.lock().expect("token store mutex poisoned");
        slots.access_token = Some(access.to_string());
        self.persist(&slots);
    }

    fn clear_all(&self) {
        let mut slots = self.slots.lock().expect("token store mutex poisoned");
        *slots = Slots::default();
        self.persist(&slots);
    }
}
