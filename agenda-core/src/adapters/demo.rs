//! In-memory demo transfer service
//!
//! Serves a handful of scheduled transfers for the demo account without any
//! network access. Data lives only as long as the service value; a restart
//! brings the seed back.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::json;

use crate::domain::result::ServiceError;
use crate::domain::{ScheduledTransfer, TransferDraft, TransferId};
use crate::ports::{ListQuery, ListResponse, PageResponse, TransferService};

/// Account the demo transfers are debited from
pub const DEMO_ACCOUNT: &str = "1234567890";

#[derive(Debug, Default)]
struct DemoState {
    transfers: Vec<ScheduledTransfer>,
    next_id: u64,
}

/// Demo implementation of [`TransferService`]
#[derive(Debug, Default)]
pub struct DemoTransferService {
    state: Mutex<DemoState>,
}

impl DemoTransferService {
    /// An empty service
    pub fn new() -> Self {
        Self::default()
    }

    /// A service pre-loaded with demo transfers for [`DEMO_ACCOUNT`]
    pub fn seeded() -> Self {
        let service = Self::new();
        for transfer in generate_demo_transfers() {
            service.insert(transfer);
        }
        service
    }

    fn insert(&self, draft: TransferDraft) -> ScheduledTransfer {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.next_id += 1;
        let transfer = ScheduledTransfer {
            id: Some(TransferId::from(state.next_id)),
            origin_account: draft.origin_account,
            details: draft.details,
        };
        state.transfers.push(transfer.clone());
        transfer
    }

    /// Number of stored transfers across all accounts
    pub fn len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .transfers
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TransferService for DemoTransferService {
    async fn list(&self, query: &ListQuery) -> Result<ListResponse, ServiceError> {
        if query.size == 0 {
            return Err(ServiceError::Status {
                status: 400,
                body: "page size must be positive".to_string(),
            });
        }

        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let matching: Vec<&ScheduledTransfer> = state
            .transfers
            .iter()
            .filter(|t| t.origin_account.as_deref() == query.origin_account.as_deref())
            .collect();

        let total_elements = matching.len() as u64;
        let size = query.size as usize;
        let total_pages = matching.len().div_ceil(size) as u32;
        let content = matching
            .into_iter()
            .skip(query.page as usize * size)
            .take(size)
            .cloned()
            .collect();

        Ok(ListResponse::Page(PageResponse {
            content,
            number: query.page,
            total_pages,
            total_elements,
        }))
    }

    async fn create(&self, draft: &TransferDraft) -> Result<ScheduledTransfer, ServiceError> {
        if draft.origin_account.is_none() {
            return Err(ServiceError::Status {
                status: 400,
                body: "contaOrigem is required".to_string(),
            });
        }
        Ok(self.insert(draft.clone()))
    }

    async fn delete(&self, id: &TransferId) -> Result<(), ServiceError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let before = state.transfers.len();
        state.transfers.retain(|t| t.id.as_ref() != Some(id));
        if state.transfers.len() == before {
            return Err(ServiceError::Status {
                status: 404,
                body: format!("scheduled transfer {} not found", id),
            });
        }
        Ok(())
    }
}

/// Generate demo transfer drafts
pub fn generate_demo_transfers() -> Vec<TransferDraft> {
    let rows = [
        ("0987654321", 150.00, "2026-11-02"),
        ("1122334455", 1200.50, "2026-11-10"),
        ("5566778899", 89.90, "2026-11-15"),
        ("0987654321", 320.00, "2026-12-01"),
        ("9988776655", 45.00, "2026-12-05"),
        ("1122334455", 760.25, "2026-12-20"),
        ("5566778899", 15.75, "2027-01-03"),
        ("0987654321", 2500.00, "2027-01-15"),
        ("9988776655", 99.99, "2027-02-01"),
        ("1122334455", 430.10, "2027-02-14"),
        ("5566778899", 600.00, "2027-03-01"),
        ("0987654321", 75.30, "2027-03-12"),
    ];

    rows.iter()
        .map(|(destination, amount, date)| {
            TransferDraft::new()
                .with("contaOrigem", DEMO_ACCOUNT)
                .with("contaDestino", *destination)
                .with("valor", json!(amount))
                .with("dataTransferencia", *date)
        })
        .collect()
}
