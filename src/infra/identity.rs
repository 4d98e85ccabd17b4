// src/infra/identity.rs — Stable client-side user identifier
//
// One UUID-v4 string kept in a small file. Read on every start, regenerated
// only when the file is missing or holds something that is not a v4 UUID.

use std::path::{Path, PathBuf};

use uuid::{Uuid, Version};

use crate::infra::paths;

#[derive(Debug, Clone)]
pub struct IdentityStore {
    path: PathBuf,
}

impl IdentityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location (`<data_dir>/user_id`).
    pub fn default_location() -> Self {
        Self::new(paths::identity_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the persisted identifier, creating and persisting a fresh one
    /// if needed. Storage failures are logged; the id is returned regardless.
    pub fn get_user_id(&self) -> String {
        if let Ok(raw) = std::fs::read_to_string(&self.path) {
            let candidate = raw.trim();
            if is_uuid_v4(candidate) {
                return candidate.to_string();
            }
            tracing::debug!("Discarding malformed user id in {}", self.path.display());
        }

        let id = Uuid::new_v4().to_string();
        if let Err(e) = self.persist(&id) {
            tracing::warn!(
                "Could not persist user id to {}: {}",
                self.path.display(),
                e
            );
        }
        id
    }

    fn persist(&self, id: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, id)
    }
}

/// Whether `s` is a hyphenated random (version 4) UUID.
pub fn is_uuid_v4(s: &str) -> bool {
    if s.len() != 36 {
        return false;
    }
    match Uuid::parse_str(s) {
        Ok(u) => u.get_version() == Some(Version::Random),
        Err(_) => false,
    }
}
