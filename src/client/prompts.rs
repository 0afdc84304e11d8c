use reqwest::Method;

use super::AdminClient;
use crate::errors::AdminError;
use crate::models::{Prompt, PromptBody};

impl AdminClient {
    pub async fn list_prompts(&self) -> Result<Vec<Prompt>, AdminError> {
        let resp = self
            .execute(self.request(Method::GET, "/admin/prompts/"))
            .await?;
        Self::read_json(resp).await
    }

    pub async fn create_prompt(&self, prompt: &PromptBody) -> Result<Prompt, AdminError> {
        let resp = self
            .execute(self.request(Method::POST, "/admin/prompts/").json(prompt))
            .await?;
        Self::read_json(resp).await
    }

    pub async fn update_prompt(&self, prompt_id: i64, prompt: &PromptBody) -> Result<(), AdminError> {
        let path = format!("/admin/prompts/{prompt_id}");
        self.execute(self.request(Method::PUT, &path).json(prompt))
            .await
            .map(drop)
    }

    pub async fn delete_prompt(&self, prompt_id: i64) -> Result<(), AdminError> {
        let path = format!("/admin/prompts/{prompt_id}");
        self.execute(self.request(Method::DELETE, &path))
            .await
            .map(drop)
    }
}
