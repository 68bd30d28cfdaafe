//! Agenda Core - session, data sync and notifications for scheduled transfers
//!
//! This crate follows hexagonal architecture:
//!
//! - **domain**: Core entities (Session, ScheduledTransfer, ToastState, errors)
//! - **ports**: Trait definitions for external dependencies (TransferService)
//! - **services**: The store, the navigation guard/router and the notifier
//! - **adapters**: Concrete implementations (HTTP client, in-memory demo)

pub mod domain;
pub mod ports;
pub mod services;
pub mod adapters;
pub mod config;

use std::sync::Arc;

use tracing::debug;

use adapters::demo::DemoTransferService;
use adapters::http::HttpTransferService;
use config::Config;
use ports::TransferService;
use services::{Notifier, Router, Store};

// Re-export commonly used types at crate root
pub use domain::{
    Pagination, ScheduledTransfer, Session, Severity, ToastState, TransferDraft, TransferId,
    TransferPage,
};
pub use domain::result::{Error, NavigationError, Result, ServiceError};

/// Main context for Agenda operations
///
/// Owns one store, one router reading that store's session, and one
/// notifier. Nothing here is global: build as many contexts as needed.
pub struct AgendaContext {
    pub config: Config,
    pub store: Arc<Store>,
    pub router: Router<Arc<Store>>,
    pub notifier: Notifier,
}

impl AgendaContext {
    /// Create a context talking to the service described by `config`
    pub fn new(config: Config) -> Result<Self> {
        let service: Arc<dyn TransferService> = if config.demo_mode {
            debug!("using in-memory demo transfer service");
            Arc::new(DemoTransferService::seeded())
        } else {
            debug!(base_url = %config.client.base_url, "using HTTP transfer service");
            Arc::new(HttpTransferService::new(&config.client)?)
        };
        Ok(Self::with_service(config, service))
    }

    /// Create a context over an already built service
    pub fn with_service(config: Config, service: Arc<dyn TransferService>) -> Self {
        let store = Arc::new(Store::new(service));
        let router = Router::with_default_routes(Arc::clone(&store));
        let notifier = Notifier::with_default_duration(config.toast_duration);

        Self {
            config,
            store,
            router,
            notifier,
        }
    }

    /// Fetch a page using the configured page size
    pub async fn fetch_page(&self, page: u32) -> std::result::Result<(), ServiceError> {
        self.store.fetch_transfers(page, self.config.page_size).await
    }
}
