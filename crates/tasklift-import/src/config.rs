//! Run configuration

use std::time::Duration;

use tasklift_import_monday::DEFAULT_MONDAY_API_URL;
use tasklift_nozbe::DEFAULT_NOZBE_API_URL;

/// Endpoints and client settings for one import run
#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub destination_url: String,
    pub source_url: String,
    pub request_timeout: Duration,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            destination_url: DEFAULT_NOZBE_API_URL.to_string(),
            source_url: DEFAULT_MONDAY_API_URL.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ImportConfig {
    pub fn with_destination_url(mut self, url: impl Into<String>) -> Self {
        self.destination_url = url.into();
        self
    }

    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
