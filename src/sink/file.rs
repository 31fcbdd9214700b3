//! Local JSON document store sink

use std::path::PathBuf;

use super::SubmissionSink;
use crate::error::{BuybackError, BuybackResult};
use crate::models::{SubmissionDocument, SubmissionId};
use crate::storage::SubmissionRepository;

/// Appends documents to `sell_requests.json` under generated ids
pub struct FileSink {
    repository: SubmissionRepository,
}

impl FileSink {
    pub fn new(path: PathBuf) -> Self {
        Self {
            repository: SubmissionRepository::new(path),
        }
    }
}

impl SubmissionSink for FileSink {
    fn submit(&mut self, document: &SubmissionDocument) -> BuybackResult<SubmissionId> {
        let wrap = |e: BuybackError| BuybackError::Submission(e.to_string());

        // Reload so concurrent invocations don't drop each other's requests
        self.repository.load().map_err(wrap)?;
        let id = self.repository.insert(document.clone()).map_err(wrap)?;
        self.repository.save().map_err(wrap)?;
        Ok(id)
    }
}
