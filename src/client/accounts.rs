use reqwest::Method;

use super::AdminClient;
use crate::errors::AdminError;
use crate::models::{Account, NewAccount};

impl AdminClient {
    pub async fn list_accounts(&self) -> Result<Vec<Account>, AdminError> {
        let resp = self
            .execute(self.request(Method::GET, "/admin/accounts/"))
            .await?;
        Self::read_json(resp).await
    }

    pub async fn create_account(&self, account: &NewAccount) -> Result<Account, AdminError> {
        let resp = self
            .execute(self.request(Method::POST, "/admin/accounts/").json(account))
            .await?;
        Self::read_json(resp).await
    }

    /// Toggle an account. Accounts are never deleted through this panel,
    /// only deactivated.
    pub async fn set_account_status(&self, account_id: i64, active: bool) -> Result<(), AdminError> {
        let path = format!("/admin/accounts/{account_id}/status");
        self.execute(
            self.request(Method::PUT, &path)
                .query(&[("active_status", active)]),
        )
        .await
        .map(drop)
    }
}
