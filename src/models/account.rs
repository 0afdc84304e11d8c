use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tenant account ("cartório"). Authoritative state lives server-side;
/// this is the shape the admin API returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cod_tri7: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uf: Option<String>,
}

/// Request body for account creation.
#[derive(Debug, Clone, Serialize)]
pub struct NewAccount {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cod_tri7: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uf: Option<String>,
}

impl NewAccount {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cod_tri7: None,
            cidade: None,
            uf: None,
        }
    }
}
