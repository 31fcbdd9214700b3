//! Remote JSON endpoint sink

use std::time::Duration;

use serde::Deserialize;

use super::SubmissionSink;
use crate::error::{BuybackError, BuybackResult};
use crate::models::{SubmissionDocument, SubmissionId};

#[derive(Debug, Deserialize)]
struct CreatedResponse {
    id: String,
}

/// POSTs each document as JSON; the endpoint answers `{"id": "..."}`
#[derive(Debug, Clone)]
pub struct HttpSink {
    endpoint: String,
    timeout: Duration,
}

impl HttpSink {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
        }
    }
}

impl SubmissionSink for HttpSink {
    fn submit(&mut self, document: &SubmissionDocument) -> BuybackResult<SubmissionId> {
        let agent = ureq::AgentBuilder::new().timeout(self.timeout).build();

        let body = serde_json::to_value(document)
            .map_err(|e| BuybackError::Submission(format!("Failed to encode document: {}", e)))?;

        let response = agent
            .post(&self.endpoint)
            .send_json(body)
            .map_err(|e| BuybackError::Submission(format!("POST {} failed: {}", self.endpoint, e)))?;

        let created: CreatedResponse = response.into_json().map_err(|e| {
            BuybackError::Submission(format!("Unexpected response from {}: {}", self.endpoint, e))
        })?;

        created
            .id
            .parse()
            .map_err(BuybackError::Submission)
    }
}
