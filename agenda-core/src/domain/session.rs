//! Session domain model

/// Number of digits in an origin account identifier
pub const ACCOUNT_DIGITS: usize = 10;

/// Authenticated identity of the running client.
///
/// The origin account is present exactly when the session is logged in, so
/// the logged-in flag is derived from it rather than stored next to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    origin_account: Option<String>,
}

impl Session {
    /// A logged-out session
    pub fn logged_out() -> Self {
        Self::default()
    }

    /// A session logged in as `account`, if it passes the admission check
    pub fn logged_in(account: &str) -> Option<Self> {
        is_admissible(account).then(|| Self {
            origin_account: Some(account.to_string()),
        })
    }

    pub fn is_logged_in(&self) -> bool {
        self.origin_account.is_some()
    }

    pub fn origin_account(&self) -> Option<&str> {
        self.origin_account.as_deref()
    }
}

/// Local admission check standing in for a real login exchange.
///
/// Accepts exactly ten ASCII decimal digits. Nothing is verified against
/// the service; callers must not treat a pass as authentication.
pub fn is_admissible(candidate: &str) -> bool {
    candidate.len() == ACCOUNT_DIGITS && candidate.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admission_accepts_ten_digits() {
        assert!(is_admissible("1234567890"));
        assert!(is_admissible("0000000000"));
    }

    #[test]
    fn test_admission_rejects_wrong_length() {
        assert!(!is_admissible(""));
        assert!(!is_admissible("123456789"));
        assert!(!is_admissible("12345678901"));
    }

    #[test]
    fn test_admission_rejects_non_digits() {
        assert!(!is_admissible("12345abcde"));
        assert!(!is_admissible("12345 7890"));
        assert!(!is_admissible("-123456789"));
        assert!(!is_admissible("１２３４５６７８９０"));
        // Ten chars but one is a multi-byte digit from another script
        assert!(!is_admissible("123456789٠"));
    }

    #[test]
    fn test_session_invariant() {
        let out = Session::logged_out();
        assert!(!out.is_logged_in());
        assert_eq!(out.origin_account(), None);

        let session = Session::logged_in("1234567890").unwrap();
        assert!(session.is_logged_in());
        assert_eq!(session.origin_account(), Some("1234567890"));

        assert!(Session::logged_in("nope").is_none());
    }
}
