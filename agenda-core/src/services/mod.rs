//! Service layer - state, navigation and notifications
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific concern of the client.

pub mod navigation;
mod notifier;
mod store;

pub use navigation::{
    GuardDecision, Location, Navigation, NavigationGuard, RouteRecord, RouteTable, Router,
    SessionReader, LANDING_PATH, LOGIN_PATH, NEW_TRANSFER_PATH,
};
pub use notifier::{Notifier, DEFAULT_TOAST_DURATION};
pub use store::{reduce, Action, ActionOutcome, Mutation, Store, StoreState};
