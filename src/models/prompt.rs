use serde::{Deserialize, Serialize};

/// A reusable text template from the prompt catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    pub id: i64,
    pub name: String,
    pub prompt_text: String,
}

/// Body for both prompt creation and prompt update (PUT replaces the whole
/// record).
#[derive(Debug, Clone, Serialize)]
pub struct PromptBody {
    pub name: String,
    pub prompt_text: String,
}
