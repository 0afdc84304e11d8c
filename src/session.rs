use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::gate::ConfirmationGate;

/// An administrator or user API key held in memory. Wiped on drop and
/// redacted in `Debug` so it cannot leak through logs.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// A secret the API returns exactly once (the key of a freshly created
/// user, or a regenerated key), staged for a single display.
#[derive(Debug)]
pub struct IssuedSecret {
    pub label: String,
    pub secret: ApiKey,
}

/// Per-operator-session state. Nothing here survives the process: the
/// remote API owns all durable state.
#[derive(Debug, Default)]
pub struct Session {
    api_key: Option<ApiKey>,
    pub gate: ConfirmationGate,
    issued_secret: Option<IssuedSecret>,
    selected_account: Option<i64>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once the login probe has accepted the key.
    pub fn authenticate(&mut self, key: ApiKey) {
        self.api_key = Some(key);
    }

    pub fn is_authenticated(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    /// Full reset to the default state, not a partial clear.
    pub fn logout(&mut self) {
        *self = Session::default();
    }

    /// Stage a just-issued key for its one display.
    pub fn put_issued_secret(&mut self, label: impl Into<String>, secret: String) {
        self.issued_secret = Some(IssuedSecret {
            label: label.into(),
            secret: ApiKey::new(secret),
        });
    }

    /// At-most-once display semantics: the first read clears the secret.
    pub fn take_issued_secret(&mut self) -> Option<IssuedSecret> {
        self.issued_secret.take()
    }

    /// Record which account is under edit. Returns `true` when the
    /// selection changed, which is the caller's cue to drop any cached
    /// permission view for the previous account.
    pub fn select_account(&mut self, account_id: i64) -> bool {
        let changed = self.selected_account != Some(account_id);
        self.selected_account = Some(account_id);
        changed
    }

    pub fn selected_account(&self) -> Option<i64> {
        self.selected_account
    }
}

// ── Tests ─────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::DestructiveAction;

    #[test]
    fn logout_is_a_full_reset() {
        let mut session = Session::new();
        session.authenticate(ApiKey::new("sk-admin"));
        session.put_issued_secret("user 3", "sk-user".to_string());
        session.select_account(7);
        session.gate.arm(
            DestructiveAction::DeletePrompt { prompt_id: 1 },
            "delete prompt 1",
        );

        session.logout();

        assert!(!session.is_authenticated());
        assert!(session.take_issued_secret().is_none());
        assert!(session.selected_account().is_none());
        assert!(!session.gate.is_armed());
    }

    #[test]
    fn issued_secret_reads_at_most_once() {
        let mut session = Session::new();
        session.put_issued_secret("Ana Souza", "sk-new".to_string());

        let first = session.take_issued_secret().unwrap();
        assert_eq!(first.label, "Ana Souza");
        assert_eq!(first.secret.expose(), "sk-new");
        assert!(session.take_issued_secret().is_none());
    }

    #[test]
    fn newer_secret_replaces_an_undisplayed_one() {
        let mut session = Session::new();
        session.put_issued_secret("user 1", "sk-a".to_string());
        session.put_issued_secret("user 2", "sk-b".to_string());

        let shown = session.take_issued_secret().unwrap();
        assert_eq!(shown.secret.expose(), "sk-b");
        assert!(session.take_issued_secret().is_none());
    }

    #[test]
    fn account_selection_reports_changes() {
        let mut session = Session::new();
        assert!(session.select_account(7));
        assert!(!session.select_account(7));
        assert!(session.select_account(8));
    }

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("sk-very-secret");
        let rendered = format!("{key:?}");
        assert!(!rendered.contains("sk-very-secret"));
        assert!(rendered.contains("redacted"));
    }
}
