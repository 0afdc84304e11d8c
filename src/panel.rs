//! The event layer between a view and the API client.
//!
//! Every method is one discrete operator action: the view calls it, awaits
//! the result, re-renders. State transitions (session, gate, cache) happen
//! here explicitly instead of being implied by a page re-run, so they are
//! testable without any UI harness.

use crate::cache::{keys, ReadCache};
use crate::client::AdminClient;
use crate::config::Config;
use crate::errors::AdminError;
use crate::gate::{DestructiveAction, PendingConfirmation};
use crate::models::{
    Account, BillingReport, DetailedBillingReport, NewAccount, NewUser, PermissionSet, Prompt,
    PromptBody, ReportQuery, User,
};
use crate::session::{ApiKey, IssuedSecret, Session};

pub struct AdminPanel {
    config: Config,
    client: Option<AdminClient>,
    session: Session,
    cache: ReadCache,
}

impl AdminPanel {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            client: None,
            session: Session::new(),
            cache: ReadCache::new(),
        }
    }

    // ── Authentication ────────────────────────────────────────

    /// Probe-based login: a privileged listing answering 200 is the proof
    /// that `key` is an administrator key. `Unauthorized` here means
    /// "invalid key", not a revoked session.
    pub async fn login(&mut self, key: &str) -> Result<(), AdminError> {
        require(key, "the API key")?;

        let client = AdminClient::new(&self.config.api_url, key, self.config.login_timeout());
        client.probe().await?;

        self.session.authenticate(ApiKey::new(key));
        self.client = Some(client);
        tracing::info!("operator authenticated");
        Ok(())
    }

    pub fn logout(&mut self) {
        self.client = None;
        self.session.logout();
        self.cache.clear();
        tracing::info!("session reset");
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn cache(&self) -> &ReadCache {
        &self.cache
    }

    fn client(&self) -> Result<&AdminClient, AdminError> {
        self.client.as_ref().ok_or(AdminError::NotAuthenticated)
    }

    /// A key that stops being accepted server-side ends the session; every
    /// other failure leaves it intact for a manual re-trigger.
    fn fail(&mut self, err: AdminError) -> AdminError {
        if err.is_unauthorized() {
            tracing::warn!("administrator key rejected, ending session");
            self.logout();
        }
        err
    }

    // ── Cached reads ──────────────────────────────────────────

    pub async fn accounts(&mut self) -> Result<Vec<Account>, AdminError> {
        if let Some(cached) = self.cache.get::<Vec<Account>>(keys::ACCOUNTS) {
            return Ok(cached);
        }
        let accounts = match self.client()?.list_accounts().await {
            Ok(accounts) => accounts,
            Err(e) => return Err(self.fail(e)),
        };
        self.cache
            .set(keys::ACCOUNTS, &accounts, self.config.cache_ttl());
        Ok(accounts)
    }

    pub async fn users(&mut self, account_id: i64) -> Result<Vec<User>, AdminError> {
        let key = keys::users(account_id);
        if let Some(cached) = self.cache.get::<Vec<User>>(&key) {
            return Ok(cached);
        }
        let users = match self.client()?.list_users(account_id).await {
            Ok(users) => users,
            Err(e) => return Err(self.fail(e)),
        };
        self.cache.set(&key, &users, self.config.cache_ttl());
        Ok(users)
    }

    pub async fn prompts(&mut self) -> Result<Vec<Prompt>, AdminError> {
        if let Some(cached) = self.cache.get::<Vec<Prompt>>(keys::PROMPTS) {
            return Ok(cached);
        }
        let prompts = match self.client()?.list_prompts().await {
            Ok(prompts) => prompts,
            Err(e) => return Err(self.fail(e)),
        };
        self.cache
            .set(keys::PROMPTS, &prompts, self.config.prompt_cache_ttl());
        Ok(prompts)
    }

    /// Permission view for the account under edit. Switching to a different
    /// account drops that account's cached view first, so the editor never
    /// opens on permissions fetched for an earlier visit.
    pub async fn permissions(&mut self, account_id: i64) -> Result<PermissionSet, AdminError> {
        let key = keys::permissions(account_id);
        if self.session.select_account(account_id) {
            self.cache.invalidate(&key);
        }
        if let Some(cached) = self.cache.get::<PermissionSet>(&key) {
            return Ok(cached);
        }
        let permissions = match self.client()?.get_permissions(account_id).await {
            Ok(permissions) => permissions,
            Err(e) => return Err(self.fail(e)),
        };
        self.cache
            .set(&key, &permissions, self.config.prompt_cache_ttl());
        Ok(permissions)
    }

    // ── Mutations (no gate: creation is not destructive) ──────

    pub async fn create_account(&mut self, account: NewAccount) -> Result<Account, AdminError> {
        require(&account.name, "the account name")?;

        let created = match self.client()?.create_account(&account).await {
            Ok(created) => created,
            Err(e) => return Err(self.fail(e)),
        };
        self.cache.clear();
        tracing::info!(account_id = created.id, "account created");
        Ok(created)
    }

    /// Creates the user and stages their one-time API key for a single
    /// display. The returned record has the key stripped: the only way to
    /// read it is [`AdminPanel::take_issued_secret`].
    pub async fn create_user(&mut self, user: NewUser) -> Result<User, AdminError> {
        require(&user.full_name, "the full name")?;
        require(&user.email, "the email")?;
        require(&user.password, "the password")?;

        let mut created = match self.client()?.create_user(&user).await {
            Ok(created) => created,
            Err(e) => return Err(self.fail(e)),
        };
        self.cache.clear();
        if let Some(key) = created.api_key.take() {
            self.session.put_issued_secret(created.full_name.clone(), key);
        }
        tracing::info!(user_id = created.id, account_id = created.account_id, "user created");
        Ok(created)
    }

    pub async fn create_prompt(&mut self, prompt: PromptBody) -> Result<Prompt, AdminError> {
        require(&prompt.name, "the prompt name")?;
        require(&prompt.prompt_text, "the prompt text")?;

        let created = match self.client()?.create_prompt(&prompt).await {
            Ok(created) => created,
            Err(e) => return Err(self.fail(e)),
        };
        self.cache.clear();
        tracing::info!(prompt_id = created.id, "prompt created");
        Ok(created)
    }

    pub async fn update_prompt(&mut self, prompt_id: i64, prompt: PromptBody) -> Result<(), AdminError> {
        require(&prompt.name, "the prompt name")?;
        require(&prompt.prompt_text, "the prompt text")?;

        match self.client()?.update_prompt(prompt_id, &prompt).await {
            Ok(()) => {}
            Err(e) => return Err(self.fail(e)),
        }
        self.cache.clear();
        tracing::info!(prompt_id, "prompt updated");
        Ok(())
    }

    /// Full replace of the account's permission set.
    pub async fn sync_permissions(
        &mut self,
        account_id: i64,
        permissions: PermissionSet,
    ) -> Result<(), AdminError> {
        match self
            .client()?
            .sync_permissions(account_id, &permissions)
            .await
        {
            Ok(()) => {}
            Err(e) => return Err(self.fail(e)),
        }
        self.cache.clear();
        tracing::info!(account_id, granted = permissions.prompt_ids.len(), "permissions synced");
        Ok(())
    }

    // ── Confirmation-gated actions ────────────────────────────

    /// First click: record the destructive action without performing it.
    pub fn arm(&mut self, action: DestructiveAction) -> &PendingConfirmation {
        let label = describe(action);
        self.session.gate.arm(action, label)
    }

    /// Clear the pending action with no effect.
    pub fn cancel(&mut self) -> Option<PendingConfirmation> {
        self.session.gate.cancel()
    }

    /// Second click: perform exactly one API call for the pending action.
    /// The gate is idle again afterwards whether the call worked or not;
    /// a regenerated key is staged as the session's issued secret.
    pub async fn confirm(&mut self) -> Result<DestructiveAction, AdminError> {
        let action = self.session.gate.confirm()?;
        let client = self.client.as_ref().ok_or(AdminError::NotAuthenticated)?;

        let outcome = match action {
            DestructiveAction::SetAccountStatus { account_id, active } => client
                .set_account_status(account_id, active)
                .await
                .map(|()| None),
            DestructiveAction::SetUserStatus { user_id, active } => client
                .set_user_status(user_id, active)
                .await
                .map(|()| None),
            DestructiveAction::RegenerateApiKey { user_id } => client
                .regenerate_api_key(user_id)
                .await
                .map(|key| Some((user_id, key))),
            DestructiveAction::DeletePrompt { prompt_id } => {
                client.delete_prompt(prompt_id).await.map(|()| None)
            }
        };

        match outcome {
            Ok(issued) => {
                self.cache.clear();
                if let Some((user_id, key)) = issued {
                    self.session
                        .put_issued_secret(format!("user {user_id}"), key);
                }
                tracing::info!(target_id = action.target_id(), "confirmed action performed");
                Ok(action)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// One-shot read of a just-issued key; gone after this call.
    pub fn take_issued_secret(&mut self) -> Option<IssuedSecret> {
        self.session.take_issued_secret()
    }

    // ── Billing (never cached) ────────────────────────────────

    pub async fn billing_report(&mut self, query: &ReportQuery) -> Result<BillingReport, AdminError> {
        match self.client()?.billing_report(query).await {
            Ok(report) => Ok(report),
            Err(e) => Err(self.fail(e)),
        }
    }

    pub async fn detailed_billing_report(
        &mut self,
        query: &ReportQuery,
    ) -> Result<DetailedBillingReport, AdminError> {
        if query.account_id.is_none() {
            return Err(AdminError::InvalidInput(
                "the detailed report requires an account filter".to_string(),
            ));
        }
        match self.client()?.detailed_billing_report(query).await {
            Ok(report) => Ok(report),
            Err(e) => Err(self.fail(e)),
        }
    }
}

fn require(value: &str, what: &str) -> Result<(), AdminError> {
    if value.trim().is_empty() {
        return Err(AdminError::InvalidInput(format!("{what} must not be empty")));
    }
    Ok(())
}

fn describe(action: DestructiveAction) -> String {
    match action {
        DestructiveAction::SetAccountStatus { account_id, active: false } => {
            format!("deactivate account {account_id}")
        }
        DestructiveAction::SetAccountStatus { account_id, active: true } => {
            format!("reactivate account {account_id}")
        }
        DestructiveAction::SetUserStatus { user_id, active: false } => {
            format!("deactivate user {user_id}")
        }
        DestructiveAction::SetUserStatus { user_id, active: true } => {
            format!("reactivate user {user_id}")
        }
        DestructiveAction::RegenerateApiKey { user_id } => {
            format!("regenerate the API key of user {user_id}")
        }
        DestructiveAction::DeletePrompt { prompt_id } => {
            format!("permanently delete prompt {prompt_id}")
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────
