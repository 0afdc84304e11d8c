use reqwest::Method;

use super::AdminClient;
use crate::errors::AdminError;
use crate::models::{NewUser, RegeneratedKey, User};

impl AdminClient {
    pub async fn list_users(&self, account_id: i64) -> Result<Vec<User>, AdminError> {
        let path = format!("/admin/accounts/{account_id}/users/");
        let resp = self.execute(self.request(Method::GET, &path)).await?;
        Self::read_json(resp).await
    }

    /// The response is the only place the new user's API key ever appears.
    pub async fn create_user(&self, user: &NewUser) -> Result<User, AdminError> {
        let resp = self
            .execute(self.request(Method::POST, "/admin/users/").json(user))
            .await?;
        Self::read_json(resp).await
    }

    pub async fn set_user_status(&self, user_id: i64, active: bool) -> Result<(), AdminError> {
        let path = format!("/admin/users/{user_id}/status");
        self.execute(
            self.request(Method::PUT, &path)
                .query(&[("active_status", active)]),
        )
        .await
        .map(drop)
    }

    /// Invalidates the user's previous key server-side and returns the
    /// replacement exactly once.
    pub async fn regenerate_api_key(&self, user_id: i64) -> Result<String, AdminError> {
        let path = format!("/admin/users/{user_id}/regenerate-api-key");
        let resp = self.execute(self.request(Method::POST, &path)).await?;
        let key: RegeneratedKey = Self::read_json(resp).await?;
        Ok(key.api_key)
    }
}
