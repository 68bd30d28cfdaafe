//! Transfer service port
//!
//! Defines the interface the store uses to read and write scheduled
//! transfers on the remote service (HTTP, in-memory fakes for tests, ...)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::result::ServiceError;
use crate::domain::{Pagination, ScheduledTransfer, TransferDraft, TransferId};

/// Default page size for transfer listings
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Parameters of a transfer listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub size: u32,
    /// Account the listing is scoped to; `None` when nobody is logged in
    pub origin_account: Option<String>,
}

impl ListQuery {
    pub fn new(page: u32, size: u32, origin_account: Option<&str>) -> Self {
        Self {
            page,
            size,
            origin_account: origin_account.map(str::to_string),
        }
    }
}

/// Paged envelope returned by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    pub content: Vec<ScheduledTransfer>,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
}

impl PageResponse {
    /// Pagination carried by the envelope's sibling fields
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.number, self.total_pages, self.total_elements)
    }
}

/// Body of a listing response.
///
/// The service either wraps the items in a page envelope (with a `content`
/// field) or returns the bare collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListResponse {
    Page(PageResponse),
    Raw(Vec<ScheduledTransfer>),
}

impl ListResponse {
    pub fn items(&self) -> &[ScheduledTransfer] {
        match self {
            ListResponse::Page(page) => &page.content,
            ListResponse::Raw(items) => items,
        }
    }
}

/// Transfer service client trait
///
/// Every failure is reported as a [`ServiceError`]; implementations do not
/// retry.
#[async_trait]
pub trait TransferService: Send + Sync {
    /// Fetch one page of scheduled transfers
    async fn list(&self, query: &ListQuery) -> Result<ListResponse, ServiceError>;

    /// Create a scheduled transfer, returning the record the service stored
    async fn create(&self, draft: &TransferDraft) -> Result<ScheduledTransfer, ServiceError>;

    /// Delete a scheduled transfer
    async fn delete(&self, id: &TransferId) -> Result<(), ServiceError>;
}
