//! Navigation - route table, authentication guard and router
//!
//! Every transition runs through [`NavigationGuard::check`], which only needs
//! to know whether the session is logged in. The router commits the new
//! location once all redirects are resolved, so a caller never observes a
//! half-finished navigation.

use std::sync::Arc;

use tracing::debug;

use crate::domain::result::NavigationError;
use crate::services::Store;

/// Path of the login view
pub const LOGIN_PATH: &str = "/login";

/// Where authenticated users land by default
pub const LANDING_PATH: &str = "/agendamentos";

/// Path of the new-transfer form
pub const NEW_TRANSFER_PATH: &str = "/novo-agendamento";

/// Redirects followed before a navigation is declared a loop
pub const MAX_REDIRECTS: usize = 8;

/// Read access to the authentication flag
pub trait SessionReader: Send + Sync {
    fn is_logged_in(&self) -> bool;
}

impl SessionReader for Store {
    fn is_logged_in(&self) -> bool {
        Store::is_logged_in(self)
    }
}

impl<T: SessionReader + ?Sized> SessionReader for Arc<T> {
    fn is_logged_in(&self) -> bool {
        (**self).is_logged_in()
    }
}

impl<T: SessionReader + ?Sized> SessionReader for &T {
    fn is_logged_in(&self) -> bool {
        (**self).is_logged_in()
    }
}

/// One entry of the route table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    pub path: String,
    pub name: Option<String>,
    pub requires_auth: bool,
    /// Static redirect applied before the guard runs
    pub redirect: Option<String>,
}

impl RouteRecord {
    pub fn view(path: &str, name: &str, requires_auth: bool) -> Self {
        Self {
            path: path.to_string(),
            name: Some(name.to_string()),
            requires_auth,
            redirect: None,
        }
    }

    pub fn redirect(path: &str, to: &str) -> Self {
        Self {
            path: path.to_string(),
            name: None,
            requires_auth: false,
            redirect: Some(to.to_string()),
        }
    }

    fn matches(&self, path: &str) -> bool {
        self.path.eq_ignore_ascii_case(path)
    }
}

/// Route table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    records: Vec<RouteRecord>,
}

impl RouteTable {
    /// Build a table, rejecting duplicate paths and dangling redirects
    pub fn new(records: Vec<RouteRecord>) -> Result<Self, NavigationError> {
        let table = Self { records };
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<(), NavigationError> {
        for (i, record) in self.records.iter().enumerate() {
            if self.records[..i].iter().any(|r| r.matches(&record.path)) {
                return Err(NavigationError::DuplicateRoute(record.path.clone()));
            }
            if let Some(to) = &record.redirect {
                if self.resolve(to).is_none() {
                    return Err(NavigationError::UnknownRedirect {
                        from: record.path.clone(),
                        to: to.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Route record matching `path`, if any
    pub fn resolve(&self, path: &str) -> Option<&RouteRecord> {
        let path = normalize(path);
        self.records.iter().find(|r| r.matches(&path))
    }

    pub fn records(&self) -> &[RouteRecord] {
        &self.records
    }
}

impl Default for RouteTable {
    /// Root redirect, login, transfer list and new-transfer form
    fn default() -> Self {
        Self {
            records: vec![
                RouteRecord::redirect("/", LOGIN_PATH),
                RouteRecord::view(LOGIN_PATH, "Login", false),
                RouteRecord::view(LANDING_PATH, "TransferList", true),
                RouteRecord::view(NEW_TRANSFER_PATH, "NewTransfer", true),
            ],
        }
    }
}

/// Strip query and fragment, drop a trailing slash
fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Outcome of a guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(String),
}

/// Authentication guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationGuard {
    login_path: String,
    landing_path: String,
}

impl NavigationGuard {
    pub fn new(login_path: &str, landing_path: &str) -> Self {
        Self {
            login_path: login_path.to_string(),
            landing_path: landing_path.to_string(),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn landing_path(&self) -> &str {
        &self.landing_path
    }

    /// Decide a transition.
    ///
    /// | requires auth | logged in | login route | outcome           |
    /// |---------------|-----------|-------------|-------------------|
    /// | yes           | no        | -           | redirect to login |
    /// | yes           | yes       | -           | proceed           |
    /// | no            | yes       | yes         | redirect to landing |
    /// | no            | any       | no          | proceed           |
    pub fn check(&self, requires_auth: bool, is_logged_in: bool, is_login_route: bool) -> GuardDecision {
        if requires_auth && !is_logged_in {
            GuardDecision::Redirect(self.login_path.clone())
        } else if is_login_route && is_logged_in {
            GuardDecision::Redirect(self.landing_path.clone())
        } else {
            GuardDecision::Proceed
        }
    }
}

impl Default for NavigationGuard {
    fn default() -> Self {
        Self::new(LOGIN_PATH, LANDING_PATH)
    }
}

/// Where the router currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    /// Name of the matched route; `None` for unknown paths
    pub name: Option<String>,
}

/// A completed navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub location: Location,
    /// The requested path, when redirects led somewhere else
    pub redirected_from: Option<String>,
}

/// Router resolving paths against the route table and the guard
pub struct Router<S: SessionReader> {
    routes: RouteTable,
    guard: NavigationGuard,
    session: S,
    current: Option<Location>,
}

impl<S: SessionReader> Router<S> {
    /// Build a router. The guard's login and landing paths must be routes.
    pub fn new(routes: RouteTable, guard: NavigationGuard, session: S) -> Result<Self, NavigationError> {
        for path in [guard.login_path(), guard.landing_path()] {
            if routes.resolve(path).is_none() {
                return Err(NavigationError::UnknownRedirect {
                    from: "guard".to_string(),
                    to: path.to_string(),
                });
            }
        }
        Ok(Self {
            routes,
            guard,
            session,
            current: None,
        })
    }

    /// Router over the default route table and guard
    pub fn with_default_routes(session: S) -> Self {
        Self {
            routes: RouteTable::default(),
            guard: NavigationGuard::default(),
            session,
            current: None,
        }
    }

    /// Current location; `None` before the first navigation
    pub fn current(&self) -> Option<&Location> {
        self.current.as_ref()
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Navigate to `path`, following static and guard redirects.
    ///
    /// The current location only changes when the navigation succeeds.
    pub fn push(&mut self, path: &str) -> Result<Navigation, NavigationError> {
        let navigation = self.resolve(path)?;
        self.current = Some(navigation.location.clone());
        Ok(navigation)
    }

    /// Work out where navigating to `path` would end up, without moving
    pub fn resolve(&self, path: &str) -> Result<Navigation, NavigationError> {
        let requested = normalize(path);
        let mut target = requested.clone();

        for _ in 0..=MAX_REDIRECTS {
            let route = self.routes.resolve(&target);

            if let Some(to) = route.and_then(|r| r.redirect.as_ref()) {
                target = normalize(to);
                continue;
            }

            let requires_auth = route.is_some_and(|r| r.requires_auth);
            let is_login_route = route.is_some_and(|r| r.matches(self.guard.login_path()));

            match self
                .guard
                .check(requires_auth, self.session.is_logged_in(), is_login_route)
            {
                GuardDecision::Proceed => {
                    let location = Location {
                        path: route.map_or(target.clone(), |r| r.path.clone()),
                        name: route.and_then(|r| r.name.clone()),
                    };
                    let redirected_from = (location.path != requested).then_some(requested);
                    return Ok(Navigation {
                        location,
                        redirected_from,
                    });
                }
                GuardDecision::Redirect(to) => {
                    debug!(from = %target, to = %to, "navigation redirected by guard");
                    target = normalize(&to);
                }
            }
        }

        Err(NavigationError::RedirectLoop {
            path: requested,
            hops: MAX_REDIRECTS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct FakeSession(AtomicBool);

    impl FakeSession {
        fn new(logged_in: bool) -> Self {
            Self(AtomicBool::new(logged_in))
        }

        fn set(&self, logged_in: bool) {
            self.0.store(logged_in, Ordering::SeqCst);
        }
    }

    impl SessionReader for FakeSession {
        fn is_logged_in(&self) -> bool {
            self.0.load(Ordering::SeqCst)
        }
    }

    #[test]
    fn test_guard_table() {
        let guard = NavigationGuard::default();

        assert_eq!(
            guard.check(true, false, false),
            GuardDecision::Redirect(LOGIN_PATH.to_string())
        );
        assert_eq!(guard.check(true, true, false), GuardDecision::Proceed);
        assert_eq!(
            guard.check(false, true, true),
            GuardDecision::Redirect(LANDING_PATH.to_string())
        );
        assert_eq!(guard.check(false, false, false), GuardDecision::Proceed);
        assert_eq!(guard.check(false, true, false), GuardDecision::Proceed);
        assert_eq!(guard.check(false, false, true), GuardDecision::Proceed);
    }

    #[test]
    fn test_default_routes_are_valid() {
        let table = RouteTable::default();
        assert_eq!(RouteTable::new(table.records().to_vec()), Ok(table));
    }

    #[test]
    fn test_route_table_rejects_duplicates() {
        let result = RouteTable::new(vec![
            RouteRecord::view("/a", "A", false),
            RouteRecord::view("/A", "Other", true),
        ]);
        assert_eq!(result, Err(NavigationError::DuplicateRoute("/A".to_string())));
    }

    #[test]
    fn test_route_table_rejects_dangling_redirect() {
        let result = RouteTable::new(vec![RouteRecord::redirect("/", "/missing")]);
        assert!(matches!(result, Err(NavigationError::UnknownRedirect { .. })));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("/login/"), "/login");
        assert_eq!(normalize("/agendamentos?page=2#top"), "/agendamentos");
        assert_eq!(normalize("login"), "/login");
    }

    #[test]
    fn test_logged_out_is_sent_to_login() {
        let session = FakeSession::new(false);
        let mut router = Router::with_default_routes(&session);

        for path in [LANDING_PATH, NEW_TRANSFER_PATH, "/", "/agendamentos/"] {
            let nav = router.push(path).unwrap();
            assert_eq!(nav.location.path, LOGIN_PATH, "from {}", path);
            assert_eq!(nav.location.name.as_deref(), Some("Login"));
        }

        let nav = router.push(LOGIN_PATH).unwrap();
        assert_eq!(nav.redirected_from, None);
    }

    #[test]
    fn test_logged_in_skips_login() {
        let session = FakeSession::new(true);
        let mut router = Router::with_default_routes(&session);

        let nav = router.push(LOGIN_PATH).unwrap();
        assert_eq!(nav.location.path, LANDING_PATH);
        assert_eq!(nav.redirected_from.as_deref(), Some(LOGIN_PATH));

        // Root redirects to login, which bounces to the landing page
        let nav = router.push("/").unwrap();
        assert_eq!(nav.location.path, LANDING_PATH);

        let nav = router.push(NEW_TRANSFER_PATH).unwrap();
        assert_eq!(nav.location.name.as_deref(), Some("NewTransfer"));
        assert_eq!(nav.redirected_from, None);
    }

    #[test]
    fn test_unknown_path_proceeds_without_route() {
        let session = FakeSession::new(false);
        let mut router = Router::with_default_routes(&session);
        let nav = router.push("/nowhere").unwrap();
        assert_eq!(nav.location.path, "/nowhere");
        assert_eq!(nav.location.name, None);
    }

    #[test]
    fn test_guard_reads_session_on_every_transition() {
        let session = FakeSession::new(false);
        let mut router = Router::with_default_routes(&session);
        assert_eq!(router.push(LANDING_PATH).unwrap().location.path, LOGIN_PATH);

        session.set(true);
        assert_eq!(router.push(LANDING_PATH).unwrap().location.path, LANDING_PATH);

        session.set(false);
        assert_eq!(router.push(NEW_TRANSFER_PATH).unwrap().location.path, LOGIN_PATH);
    }

    #[test]
    fn test_redirect_loop_keeps_current_location() {
        // Login itself requires auth: logged-out users bounce forever
        let routes = RouteTable::new(vec![
            RouteRecord::view("/login", "Login", true),
            RouteRecord::view("/home", "Home", true),
        ])
        .unwrap();
        let session = FakeSession::new(false);
        let mut router = Router::new(routes, NavigationGuard::new("/login", "/home"), &session).unwrap();

        let err = router.push("/home").unwrap_err();
        assert!(matches!(err, NavigationError::RedirectLoop { .. }));
        assert_eq!(router.current(), None);
    }

    #[test]
    fn test_router_rejects_guard_paths_outside_table() {
        let session = FakeSession::new(false);
        let result = Router::new(
            RouteTable::default(),
            NavigationGuard::new("/signin", LANDING_PATH),
            &session,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_failed_push_does_not_move() {
        let session = FakeSession::new(true);
        let routes = RouteTable::new(vec![
            RouteRecord::view("/login", "Login", false),
            RouteRecord::view("/home", "Home", false),
            RouteRecord::view("/secret", "Secret", true),
        ])
        .unwrap();
        // Landing is the login route itself, so a logged-in user can never settle
        let mut router =
            Router::new(routes, NavigationGuard::new("/login", "/login"), &session).unwrap();

        router.push("/home").unwrap();
        assert!(router.push("/login").is_err());
        assert_eq!(router.current().map(|l| l.path.as_str()), Some("/home"));
    }
}
