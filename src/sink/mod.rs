//! Submission sinks
//!
//! A sink receives the finished wizard payload as one document and returns
//! the id it was stored under. The backend is chosen in settings: a local
//! JSON document store or a remote JSON endpoint.

pub mod file;
pub mod http;

pub use file::FileSink;
pub use http::HttpSink;

use std::time::Duration;

use crate::config::{BuybackPaths, Settings, SinkKind};
use crate::error::{BuybackError, BuybackResult};
use crate::models::{SubmissionDocument, SubmissionId};

/// Destination for finished sell requests
pub trait SubmissionSink {
    /// Persist `document`; on error nothing is considered submitted
    fn submit(&mut self, document: &SubmissionDocument) -> BuybackResult<SubmissionId>;
}

impl<T: SubmissionSink + ?Sized> SubmissionSink for Box<T> {
    fn submit(&mut self, document: &SubmissionDocument) -> BuybackResult<SubmissionId> {
        (**self).submit(document)
    }
}

/// Build the sink selected by `settings`
pub fn from_settings(
    settings: &Settings,
    paths: &BuybackPaths,
) -> BuybackResult<Box<dyn SubmissionSink>> {
    match settings.submission.sink {
        SinkKind::File => Ok(Box::new(FileSink::new(paths.submissions_file()))),
        SinkKind::Http => {
            let endpoint = settings
                .submission
                .endpoint
                .as_deref()
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .ok_or_else(|| {
                    BuybackError::Config("submission.endpoint is required for the http sink".into())
                })?;
            Ok(Box::new(HttpSink::new(
                endpoint,
                Duration::from_secs(settings.submission.timeout_secs),
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SectionedFormData;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings_use_file_sink() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BuybackPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut sink = from_settings(&Settings::default(), &paths).unwrap();
        sink.submit(&SubmissionDocument::new(SectionedFormData::default()))
            .unwrap();

        assert!(paths.submissions_file().exists());
    }

    #[test]
    fn test_http_sink_requires_endpoint() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BuybackPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.submission.sink = SinkKind::Http;
        assert!(from_settings(&settings, &paths).is_err());

        settings.submission.endpoint = Some("http://localhost:9/sell".into());
        assert!(from_settings(&settings, &paths).is_ok());
    }
}
