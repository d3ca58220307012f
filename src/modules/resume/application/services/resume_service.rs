use std::sync::Arc;

use crate::resume::domain::entities::{default_resume, ResumeData};
use crate::shared::error::RepositoryError;
use crate::shared::local_store::LocalStore;

const KEY: &str = "portfolio_resume";

/// Singleton-document service. The résumé lives in the local store only,
/// regardless of which backend holds the collections.
#[derive(Clone)]
pub struct ResumeService {
    store: Arc<LocalStore>,
}

impl ResumeService {
    pub fn new(store: Arc<LocalStore>) -> Self {
        Self { store }
    }

    /// The stored document, or the built-in default when nothing was saved.
    pub fn get_resume(&self) -> Result<ResumeData, RepositoryError> {
        Ok(self
            .store
            .get::<ResumeData>(KEY)?
            .unwrap_or_else(default_resume))
    }

    /// Full overwrite; the previous document is not merged with.
    pub fn update_resume(&self, resume: &ResumeData) -> Result<(), RepositoryError> {
        Ok(self.store.set(KEY, resume)?)
    }

    /// Drops the stored copy and hands back the default.
    pub fn reset_resume(&self) -> Result<ResumeData, RepositoryError> {
        self.store.remove(KEY)?;
        Ok(default_resume())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> (tempfile::TempDir, ResumeService) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(LocalStore::open(dir.path()).unwrap());
        (dir, ResumeService::new(store))
    }

    #[test]
    fn unset_resume_falls_back_to_the_default() {
        let (_dir, service) = service();
        let resume = service.get_resume().unwrap();
        assert_eq!(resume.name, default_resume().name);
        assert!(!resume.experiences.is_empty());
    }

    #[test]
    fn update_is_a_full_overwrite() {
        let (_dir, service) = service();

        let mut resume = service.get_resume().unwrap();
        resume.name = "New Name".to_string();
        resume.experiences.clear();
        service.update_resume(&resume).unwrap();

        let stored = service.get_resume().unwrap();
        assert_eq!(stored.name, "New Name");
        assert!(stored.experiences.is_empty());
    }

    #[test]
    fn reset_drops_the_stored_copy() {
        let (_dir, service) = service();

        let mut resume = service.get_resume().unwrap();
        resume.name = "New Name".to_string();
        service.update_resume(&resume).unwrap();

        let reset = service.reset_resume().unwrap();
        assert_eq!(reset.name, default_resume().name);
        assert_eq!(service.get_resume().unwrap().name, default_resume().name);
    }
}
