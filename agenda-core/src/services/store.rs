//! Store - session and scheduled-transfer state
//!
//! The store is the single owner of the session and of the current page of
//! scheduled transfers. Every state change goes through [`reduce`]; every
//! remote call goes through the injected [`TransferService`].
//!
//! Failures of remote calls are logged here and returned to the caller as
//! is. Local state is never touched on failure, and writes never patch the
//! local page: after a successful create or delete the caller refreshes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::domain::result::ServiceError;
use crate::domain::{
    is_admissible, ScheduledTransfer, Session, TransferDraft, TransferId, TransferPage,
};
use crate::ports::{ListQuery, ListResponse, TransferService, DEFAULT_PAGE_SIZE};

/// Everything the store owns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    pub session: Session,
    pub transfers: TransferPage,
    /// Ticket of the fetch whose result is currently committed
    committed_fetch: u64,
}

/// A single state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Login { origin_account: String },
    Logout,
    /// Replace items and pagination together
    ReplacePage(TransferPage),
    /// Replace items, keep the current pagination
    ReplaceItems(Vec<ScheduledTransfer>),
}

/// Apply a mutation to the state. Returns whether anything changed.
///
/// A login with an inadmissible account is a no-op, so the session
/// invariant holds whatever is fed in.
pub fn reduce(state: &mut StoreState, mutation: Mutation) -> bool {
    match mutation {
        Mutation::Login { origin_account } => match Session::logged_in(&origin_account) {
            Some(session) => {
                let changed = state.session != session;
                state.session = session;
                changed
            }
            None => false,
        },
        Mutation::Logout => {
            let changed = state.session.is_logged_in();
            state.session = Session::logged_out();
            changed
        }
        Mutation::ReplacePage(page) => {
            state.transfers = page;
            true
        }
        Mutation::ReplaceItems(items) => {
            state.transfers.items = items;
            true
        }
    }
}

/// Store actions, for callers that route everything through one entry point
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Login { account: String },
    Logout,
    FetchTransfers { page: u32, size: u32 },
    CreateTransfer(TransferDraft),
    DeleteTransfer(TransferId),
}

/// Result of a dispatched [`Action`]
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// Whether the admission check passed
    LoggedIn(bool),
    LoggedOut,
    Fetched,
    Created(ScheduledTransfer),
    Deleted,
}

/// Session and scheduled-transfer store
pub struct Store {
    service: Arc<dyn TransferService>,
    state: watch::Sender<StoreState>,
    fetch_tickets: AtomicU64,
}

impl Store {
    pub fn new(service: Arc<dyn TransferService>) -> Self {
        let (state, _) = watch::channel(StoreState::default());
        Self {
            service,
            state,
            fetch_tickets: AtomicU64::new(0),
        }
    }

    /// Observe state changes
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    /// Copy of the whole state
    pub fn snapshot(&self) -> StoreState {
        self.state.borrow().clone()
    }

    pub fn session(&self) -> Session {
        self.state.borrow().session.clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.borrow().session.is_logged_in()
    }

    pub fn origin_account(&self) -> Option<String> {
        self.state
            .borrow()
            .session
            .origin_account()
            .map(str::to_string)
    }

    /// The currently committed page of transfers
    pub fn page(&self) -> TransferPage {
        self.state.borrow().transfers.clone()
    }

    fn commit(&self, mutation: Mutation) {
        self.state.send_if_modified(|state| reduce(state, mutation));
    }

    /// Log in as `account` if it passes the admission check.
    ///
    /// No request is made: this only checks the account looks like ten
    /// digits. Returns false and leaves the session alone otherwise.
    pub fn login(&self, account: &str) -> bool {
        if !is_admissible(account) {
            debug!("login rejected by admission check");
            return false;
        }
        self.commit(Mutation::Login {
            origin_account: account.to_string(),
        });
        info!("session opened");
        true
    }

    pub fn logout(&self) {
        self.commit(Mutation::Logout);
        info!("session closed");
    }

    /// Fetch a page of transfers for the logged-in account and commit it.
    ///
    /// When several fetches overlap, a response only commits if no fetch
    /// issued after it has committed already; late stale responses are
    /// dropped.
    pub async fn fetch_transfers(&self, page: u32, size: u32) -> Result<(), ServiceError> {
        let ticket = self.fetch_tickets.fetch_add(1, Ordering::SeqCst) + 1;
        let query = ListQuery::new(page, size, self.origin_account().as_deref());

        let response = match self.service.list(&query).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, page, size, "failed to fetch scheduled transfers");
                return Err(e);
            }
        };

        let mutation = match response {
            ListResponse::Page(envelope) => {
                let pagination = envelope.pagination();
                Mutation::ReplacePage(TransferPage {
                    items: envelope.content,
                    pagination,
                })
            }
            ListResponse::Raw(items) => Mutation::ReplaceItems(items),
        };

        let committed = self.state.send_if_modified(|state| {
            if ticket <= state.committed_fetch {
                return false;
            }
            state.committed_fetch = ticket;
            reduce(state, mutation)
        });
        if !committed {
            debug!(ticket, "discarded stale transfer page");
        }
        Ok(())
    }

    /// Fetch the first page with the default size
    pub async fn refresh(&self) -> Result<(), ServiceError> {
        self.fetch_transfers(0, DEFAULT_PAGE_SIZE).await
    }

    /// Create a scheduled transfer debited from the logged-in account.
    ///
    /// The draft's origin account is replaced with the session's, whatever
    /// the caller set. The local page is not updated.
    pub async fn create_transfer(
        &self,
        draft: TransferDraft,
    ) -> Result<ScheduledTransfer, ServiceError> {
        let stamped = draft.stamped(self.origin_account().as_deref());
        match self.service.create(&stamped).await {
            Ok(created) => {
                debug!(id = ?created.id, "scheduled transfer created");
                Ok(created)
            }
            Err(e) => {
                error!(error = %e, "failed to create scheduled transfer");
                Err(e)
            }
        }
    }

    /// Delete a scheduled transfer. The local page is not updated.
    pub async fn delete_transfer(&self, id: &TransferId) -> Result<(), ServiceError> {
        match self.service.delete(id).await {
            Ok(()) => {
                debug!(%id, "scheduled transfer deleted");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, %id, "failed to delete scheduled transfer");
                Err(e)
            }
        }
    }

    /// Run an action
    pub async fn dispatch(&self, action: Action) -> Result<ActionOutcome, ServiceError> {
        match action {
            Action::Login { account } => Ok(ActionOutcome::LoggedIn(self.login(&account))),
            Action::Logout => {
                self.logout();
                Ok(ActionOutcome::LoggedOut)
            }
            Action::FetchTransfers { page, size } => {
                self.fetch_transfers(page, size).await?;
                Ok(ActionOutcome::Fetched)
            }
            Action::CreateTransfer(draft) => {
                Ok(ActionOutcome::Created(self.create_transfer(draft).await?))
            }
            Action::DeleteTransfer(id) => {
                self.delete_transfer(&id).await?;
                Ok(ActionOutcome::Deleted)
            }
        }
    }
}
