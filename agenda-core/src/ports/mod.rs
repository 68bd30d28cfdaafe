//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The store depends
//! only on these traits, not on concrete implementations.

mod transfer_service;

pub use transfer_service::{
    ListQuery, ListResponse, PageResponse, TransferService, DEFAULT_PAGE_SIZE,
};
