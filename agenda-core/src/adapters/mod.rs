//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - reqwest HTTP client for the TransferService port
//! - In-memory demo service for offline use and tests

pub mod demo;
pub mod http;
