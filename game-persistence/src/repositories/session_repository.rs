use anyhow::Result;
use spellout_core::SessionStore;
use spellout_types::{SNAPSHOT_VERSION, SessionSnapshot};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::files;

/// Save slot backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonSessionStore {
    path: PathBuf,
}

impl JsonSessionStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for JsonSessionStore {
    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<()> {
        files::write_json(&self.path, snapshot)?;
        debug!("Wrote save slot {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> Option<SessionSnapshot> {
        match files::read_json::<SessionSnapshot>(&self.path) {
            Ok(Some(snapshot)) if snapshot.version == SNAPSHOT_VERSION => Some(snapshot),
            Ok(Some(snapshot)) => {
                warn!(
                    "Ignoring save slot {} with version {}",
                    self.path.display(),
                    snapshot.version
                );
                None
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Ignoring unreadable save slot: {:#}", e);
                None
            }
        }
    }

    fn clear(&mut self) -> Result<()> {
        files::remove(&self.path)
    }
}
