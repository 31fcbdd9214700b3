//! Submission repository for JSON storage
//!
//! Manages loading and saving sell requests to sell_requests.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{BuybackError, BuybackResult};
use crate::models::{StoredSubmission, SubmissionDocument, SubmissionId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable submission data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct SubmissionData {
    sell_requests: Vec<StoredSubmission>,
}

/// Repository for submitted sell requests
pub struct SubmissionRepository {
    path: PathBuf,
    data: RwLock<HashMap<SubmissionId, StoredSubmission>>,
}

impl SubmissionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load submissions from disk
    pub fn load(&self) -> BuybackResult<()> {
        let file_data: SubmissionData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| BuybackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for stored in file_data.sell_requests {
            data.insert(stored.id.clone(), stored);
        }

        Ok(())
    }

    /// Save submissions to disk, oldest first
    pub fn save(&self) -> BuybackResult<()> {
        let file_data = SubmissionData {
            sell_requests: self.get_all()?,
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Store a document under a freshly generated id
    pub fn insert(&self, document: SubmissionDocument) -> BuybackResult<SubmissionId> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BuybackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let id = SubmissionId::generate();
        data.insert(
            id.clone(),
            StoredSubmission {
                id: id.clone(),
                document,
            },
        );
        Ok(id)
    }

    #[cfg(test)]
    pub fn get(&self, id: &SubmissionId) -> BuybackResult<Option<StoredSubmission>> {
        let data = self
            .data
            .read()
            .map_err(|e| BuybackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(id).cloned())
    }

    /// All submissions sorted by creation time
    pub fn get_all(&self) -> BuybackResult<Vec<StoredSubmission>> {
        let data = self
            .data
            .read()
            .map_err(|e| BuybackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut all: Vec<_> = data.values().cloned().collect();
        all.sort_by(|a, b| {
            a.document
                .created_at
                .cmp(&b.document.created_at)
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });
        Ok(all)
    }

    #[cfg(test)]
    pub fn count(&self) -> BuybackResult<usize> {
        let data = self
            .data
            .read()
            .map_err(|e| BuybackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SectionName, SectionPatch, SectionedFormData, SubmissionStatus};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, SubmissionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sell_requests.json");
        (temp_dir, SubmissionRepository::new(path))
    }

    fn sample_document() -> SubmissionDocument {
        let mut payload = SectionedFormData::default();
        payload.apply(
            SectionPatch::from_fields(SectionName::DeviceDetails, [("brand", "Apple")]).unwrap(),
        );
        SubmissionDocument::new(payload)
    }

    #[test]
    fn test_insert_and_get() {
        let (_temp_dir, repo) = create_test_repo();

        let id = repo.insert(sample_document()).unwrap();
        let stored = repo.get(&id).unwrap().unwrap();

        assert_eq!(stored.id, id);
        assert_eq!(stored.document.status, SubmissionStatus::Pending);
        assert_eq!(
            stored.document.payload.device_details.brand.as_deref(),
            Some("Apple")
        );
    }

    #[test]
    fn test_save_and_load() {
        let (temp_dir, repo) = create_test_repo();

        let first = repo.insert(sample_document()).unwrap();
        let second = repo.insert(sample_document()).unwrap();
        assert_ne!(first, second);
        repo.save().unwrap();

        let repo2 = SubmissionRepository::new(temp_dir.path().join("sell_requests.json"));
        repo2.load().unwrap();

        assert_eq!(repo2.count().unwrap(), 2);
        assert!(repo2.get(&first).unwrap().is_some());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }
}
