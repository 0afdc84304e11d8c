use crate::errors::AdminError;

/// The four effects dangerous enough to require a second acknowledgement
/// before any request is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestructiveAction {
    SetAccountStatus { account_id: i64, active: bool },
    SetUserStatus { user_id: i64, active: bool },
    RegenerateApiKey { user_id: i64 },
    DeletePrompt { prompt_id: i64 },
}

impl DestructiveAction {
    pub fn target_id(&self) -> i64 {
        match *self {
            Self::SetAccountStatus { account_id, .. } => account_id,
            Self::SetUserStatus { user_id, .. } | Self::RegenerateApiKey { user_id } => user_id,
            Self::DeletePrompt { prompt_id } => prompt_id,
        }
    }
}

/// A recorded first click: the effect is known but not yet performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirmation {
    pub action: DestructiveAction,
    pub label: String,
}

/// Two-step guard in front of destructive actions.
///
/// `Idle` → `arm` → `Armed` → `confirm`/`cancel` → `Idle`. A pure value
/// type with no I/O: `confirm` hands the pending action back to the caller
/// to execute, so the transitions are testable without any UI or network.
#[derive(Debug, Default)]
pub struct ConfirmationGate {
    pending: Option<PendingConfirmation>,
}

impl ConfirmationGate {
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&PendingConfirmation> {
        self.pending.as_ref()
    }

    /// Record a destructive action without performing it. Arming while
    /// already armed replaces the pending record: only one destructive
    /// control is reachable at a time, so last-armed wins.
    pub fn arm(&mut self, action: DestructiveAction, label: impl Into<String>) -> &PendingConfirmation {
        if let Some(old) = &self.pending {
            tracing::debug!(discarded = %old.label, "replacing pending confirmation");
        }
        self.pending.insert(PendingConfirmation {
            action,
            label: label.into(),
        })
    }

    /// Clear without effect, returning the record that was discarded.
    pub fn cancel(&mut self) -> Option<PendingConfirmation> {
        self.pending.take()
    }

    /// Pop the pending action for execution. The gate is back to `Idle`
    /// before the caller performs the call, so a failed effect never leaves
    /// a stale pending record behind.
    pub fn confirm(&mut self) -> Result<DestructiveAction, AdminError> {
        self.pending
            .take()
            .map(|p| p.action)
            .ok_or(AdminError::NothingPending)
    }
}

// ── Tests ─────────────────────────────────────────────────────
