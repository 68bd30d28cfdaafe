//! Core domain entities
//!
//! Plain data: the session, scheduled transfers and their page, toast state,
//! and the error types. No I/O happens here.

mod session;
mod toast;
mod transfer;
pub mod result;

pub use session::{is_admissible, Session, ACCOUNT_DIGITS};
pub use toast::{Severity, ToastState};
pub use transfer::{
    Pagination, ScheduledTransfer, TransferDraft, TransferId, TransferPage, ORIGIN_ACCOUNT_FIELD,
};
