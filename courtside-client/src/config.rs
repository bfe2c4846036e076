//! Client configuration

use std::time::Duration;

/// Configuration for connecting to the Courtside service
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8000")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Page size for the paged (non-cursor) list endpoints
    pub page_size: u32,

    /// Debounce window for re-running an active search after a
    /// scope/status toggle
    pub search_debounce: Duration,

    /// Capacity of the username -> nickname lookup cache
    pub nickname_cache_size: usize,
}

impl ClientConfig {
    /// Create a new configuration for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            page_size: 10,
            search_debounce: Duration::from_millis(100),
            nickname_cache_size: 256,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the page size for paged list endpoints
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the search re-run debounce window
    pub fn with_search_debounce(mut self, debounce: Duration) -> Self {
        self.search_debounce = debounce;
        self
    }

    /// Set the nickname cache capacity
    pub fn with_nickname_cache_size(mut self, size: usize) -> Self {
        self.nickname_cache_size = size;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000")
    }
}
