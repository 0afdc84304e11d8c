use serde::{Deserialize, Serialize};

/// The set of prompts an account may use.
///
/// Sync is a full replace: the server stores exactly the IDs sent, nothing
/// is diffed client-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PermissionSet {
    pub prompt_ids: Vec<i64>,
}

impl PermissionSet {
    pub fn new(prompt_ids: Vec<i64>) -> Self {
        Self { prompt_ids }
    }
}
