//! Typed endpoint access
//!
//! One method per remote operation, grouped by domain. Methods return
//! decoded payloads; composite operations (match create/update) sequence
//! their dependent calls here, mirroring the service layer this client
//! fronts.

mod forum;
mod matches;
mod tags;
mod users;

pub use forum::{PagedComments, PagedPosts, PagedReports};
pub use matches::{LikeCount, ReconcilePlan, reconcile_participants};
pub use users::RegisterRequest;

use crate::http::{HttpApi, NetworkHttpApi};
use crate::{ClientConfig, ClientResult};

/// Typed API facade over a transport
#[derive(Debug, Clone)]
pub struct CourtsideApi<H: HttpApi> {
    http: H,
    page_size: u32,
}

impl CourtsideApi<NetworkHttpApi> {
    /// Build a network-backed API client from configuration
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            http: NetworkHttpApi::new(config)?,
            page_size: config.page_size,
        })
    }
}

impl<H: HttpApi> CourtsideApi<H> {
    /// Wrap an existing transport
    pub fn new(http: H) -> Self {
        Self {
            http,
            page_size: 10,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Page size used by the paged (non-cursor) list endpoints
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// The underlying transport
    pub fn http(&self) -> &H {
        &self.http
    }
}
