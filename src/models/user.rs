use serde::{Deserialize, Serialize};

/// An operator-visible user belonging to exactly one account.
///
/// `api_key` is only populated in the create-user response; it is never
/// returned by listing endpoints and never stored beyond one display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub is_active: bool,
    pub account_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Request body for user creation.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub account_id: i64,
}

/// Response of the regenerate-api-key endpoint.
#[derive(Debug, Deserialize)]
pub struct RegeneratedKey {
    pub api_key: String,
}
