//! File-backed key/value store, the local counterpart of the hosted backend.
//!
//! Each logical collection key maps to one JSON file inside the store
//! directory, so collections never collide and data survives restarts.
//! Writes go through a temp file + rename to avoid torn files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::shared::error::StorageError;

pub struct LocalStore {
    dir: PathBuf,
    // Serializes writers within this process; cross-process writers are
    // last-write-wins by design.
    write_guard: Mutex<()>,
}

impl LocalStore {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .map_err(|e| StorageError::new("local_store.open", format!("{}: {e}", dir.display())))?;

        Ok(Self {
            dir,
            write_guard: Mutex::new(()),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&path)
            .map_err(|e| StorageError::new(format!("local_store.get({key})"), e))?;

        let value = serde_json::from_str(&raw)
            .map_err(|e| StorageError::new(format!("local_store.get({key})"), e))?;

        Ok(Some(value))
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let _guard = self.write_guard.lock().unwrap_or_else(|e| e.into_inner());

        let raw = serde_json::to_string(value)
            .map_err(|e| StorageError::new(format!("local_store.set({key})"), e))?;

        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));

        fs::write(&tmp, raw).map_err(|e| StorageError::new(format!("local_store.set({key})"), e))?;
        fs::rename(&tmp, &path)
            .map_err(|e| StorageError::new(format!("local_store.set({key})"), e))?;

        Ok(())
    }

    /// Returns true when the key existed. Idempotent.
    pub fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let _guard = self.write_guard.lock().unwrap_or_else(|e| e.into_inner());

        let path = self.path_for(key);
        if !path.exists() {
            return Ok(false);
        }

        fs::remove_file(&path)
            .map_err(|e| StorageError::new(format!("local_store.remove({key})"), e))?;
        Ok(true)
    }

    /// Drops every stored collection. Test isolation only.
    pub fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.write_guard.lock().unwrap_or_else(|e| e.into_inner());

        let entries = fs::read_dir(&self.dir)
            .map_err(|e| StorageError::new("local_store.clear", e))?;

        for entry in entries {
            let entry = entry.map_err(|e| StorageError::new("local_store.clear", e))?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                fs::remove_file(&path).map_err(|e| StorageError::new("local_store.clear", e))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        created_at: DateTime<Utc>,
    }

    fn store() -> (tempfile::TempDir, LocalStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn get_missing_key_is_none() {
        let (_dir, store) = store();
        let got: Option<Vec<Sample>> = store.get("portfolio_messages").unwrap();
        assert!(got.is_none());
    }

    #[test]
    fn round_trip_rehydrates_timestamps() {
        let (_dir, store) = store();
        let sample = Sample {
            name: "Black Friday Banner".to_string(),
            created_at: Utc::now(),
        };

        store.set("portfolio_projects", &vec![sample.clone()]).unwrap();
        let got: Vec<Sample> = store.get("portfolio_projects").unwrap().unwrap();

        // Every field survives exactly, including a real timestamp value.
        assert_eq!(got, vec![sample]);
    }

    #[test]
    fn data_survives_reopening_the_store() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = LocalStore::open(dir.path()).unwrap();
            store.set("portfolio_admin_auth", &true).unwrap();
        }

        let reopened = LocalStore::open(dir.path()).unwrap();
        let flag: Option<bool> = reopened.get("portfolio_admin_auth").unwrap();
        assert_eq!(flag, Some(true));
    }

    #[test]
    fn collections_do_not_collide() {
        let (_dir, store) = store();
        store.set("portfolio_categories", &vec!["Banner"]).unwrap();
        store.set("portfolio_messages", &Vec::<String>::new()).unwrap();

        let categories: Vec<String> = store.get("portfolio_categories").unwrap().unwrap();
        assert_eq!(categories, vec!["Banner"]);
    }

    #[test]
    fn remove_is_idempotent() {
        let (_dir, store) = store();
        store.set("portfolio_resume", &"doc").unwrap();

        assert!(store.remove("portfolio_resume").unwrap());
        assert!(!store.remove("portfolio_resume").unwrap());
    }

    #[test]
    fn clear_drops_everything() {
        let (_dir, store) = store();
        store.set("portfolio_categories", &vec!["Banner"]).unwrap();
        store.set("portfolio_db_initialized", &true).unwrap();

        store.clear().unwrap();

        let categories: Option<Vec<String>> = store.get("portfolio_categories").unwrap();
        assert!(categories.is_none());
        let seeded: Option<bool> = store.get("portfolio_db_initialized").unwrap();
        assert!(seeded.is_none());
    }
}
