//! Typed client for the SetDoc admin API.
//!
//! One logical operation is exactly one HTTP request: no retries, no
//! backoff, a single failure is terminal for that invocation. Every
//! request carries the operator's administrator key in the `x-api-key`
//! header; authentication is stateless per request.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::errors::AdminError;

mod accounts;
mod billing;
mod permissions;
mod prompts;
mod users;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Path probed at login. A 200 from this privileged listing is the proof
/// that the supplied key is a valid administrator key.
pub const PROBE_PATH: &str = "/admin/accounts/";

pub struct AdminClient {
    http: Client,
    base_url: String,
    api_key: String,
    login_timeout: Duration,
}

impl AdminClient {
    /// Build a client for `base_url`. `login_timeout` only applies to the
    /// login probe; all other calls rely on the transport default.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        login_timeout: Duration,
    ) -> Self {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .user_agent(concat!("setdoc-admin/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            login_timeout,
        }
    }

    /// Login probe: a privileged listing that answers 200 only to an
    /// administrator key. The only request with a client-enforced timeout.
    pub async fn probe(&self) -> Result<(), AdminError> {
        let req = self
            .request(Method::GET, PROBE_PATH)
            .timeout(self.login_timeout);
        self.execute(req).await.map(drop)
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.http
            .request(method, url)
            .header(API_KEY_HEADER, &self.api_key)
    }

    /// Issue the request and fail on transport errors and non-2xx statuses,
    /// extracting the server's `detail` message when present.
    pub(crate) async fn execute(&self, req: RequestBuilder) -> Result<Response, AdminError> {
        let req = req.build().map_err(AdminError::Transport)?;
        let method = req.method().clone();
        let path = req.url().path().to_string();

        let resp = self.http.execute(req).await.map_err(|e| {
            tracing::warn!(%method, path, error = %e, "admin API unreachable");
            AdminError::Transport(e)
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(%method, path, status = status.as_u16(), "admin API call failed");
            return Err(AdminError::from_status(status, &body));
        }

        tracing::debug!(%method, path, status = status.as_u16(), "admin API call ok");
        Ok(resp)
    }

    /// Decode a 2xx body, failing closed when the shape doesn't match.
    pub(crate) async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, AdminError> {
        let body = resp.text().await.map_err(AdminError::Transport)?;
        Ok(serde_json::from_str(&body)?)
    }
}

// ── Tests ─────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_on_base_url_is_normalized() {
        let client = AdminClient::new(
            "https://api.example.com/",
            "sk-admin",
            Duration::from_secs(10),
        );
        assert_eq!(client.base_url, "https://api.example.com");
    }

    #[test]
    fn requests_carry_the_key_header() {
        let client =
            AdminClient::new("https://api.example.com", "sk-admin", Duration::from_secs(10));
        let req = client.request(Method::GET, PROBE_PATH).build().unwrap();
        assert_eq!(req.url().as_str(), "https://api.example.com/admin/accounts/");
        assert_eq!(
            req.headers().get(API_KEY_HEADER).unwrap().to_str().unwrap(),
            "sk-admin"
        );
    }
}
