use reqwest::Method;

use super::AdminClient;
use crate::errors::AdminError;
use crate::models::PermissionSet;

impl AdminClient {
    pub async fn get_permissions(&self, account_id: i64) -> Result<PermissionSet, AdminError> {
        let path = format!("/admin/accounts/{account_id}/permissions");
        let resp = self.execute(self.request(Method::GET, &path)).await?;
        Self::read_json(resp).await
    }

    /// Full replace: the server ends up with exactly `permissions.prompt_ids`,
    /// nothing is diffed client-side.
    pub async fn sync_permissions(
        &self,
        account_id: i64,
        permissions: &PermissionSet,
    ) -> Result<(), AdminError> {
        let path = format!("/admin/accounts/{account_id}/permissions");
        self.execute(self.request(Method::PUT, &path).json(permissions))
            .await
            .map(drop)
    }
}
