//! HTTP client for the backend project API.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use serde::Deserialize;

use crate::config::RemoteConfig;
use crate::domain::entities::RemoteBackendSnapshot;
use crate::domain::ports::{BackendService, OperationHandle, RemoteError, RemoteResult};

/// Every endpoint wraps the project in a `details` envelope
#[derive(Debug, Deserialize)]
struct DetailsEnvelope {
    details: Option<RemoteBackendSnapshot>,
}

/// Blocking API client implementing the BackendService port.
pub struct HttpBackendService {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBackendService {
    /// Creates a client from the remote configuration.
    ///
    /// # Errors
    ///
    /// `NotConfigured` without an endpoint; `Transport` if the HTTP client
    /// cannot be constructed.
    pub fn new(config: &RemoteConfig) -> RemoteResult<Self> {
        let base_url = config
            .endpoint
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .ok_or(RemoteError::NotConfigured)?
            .to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("backsync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            token: config.token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn project_url(&self, project_id: &str) -> String {
        format!("{}/projects/{project_id}", self.base_url)
    }

    fn send(&self, req: RequestBuilder) -> RemoteResult<RemoteBackendSnapshot> {
        let req = match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        };

        let response = req
            .send()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        tracing::trace!(status, bytes = body.len(), "api response");
        decode_details(status, &body)
    }
}

/// Turn a raw response into a snapshot.
fn decode_details(status: u16, body: &str) -> RemoteResult<RemoteBackendSnapshot> {
    if !(200..300).contains(&status) {
        return Err(RemoteError::Api {
            status,
            body: body.to_string(),
        });
    }

    let envelope: DetailsEnvelope =
        serde_json::from_str(body).map_err(|e| RemoteError::Malformed(e.to_string()))?;
    envelope
        .details
        .ok_or_else(|| RemoteError::Malformed("response has no details".to_string()))
}

impl BackendService for HttpBackendService {
    fn create_project(&self, name: &str) -> RemoteResult<RemoteBackendSnapshot> {
        let url = format!("{}/projects", self.base_url);
        tracing::debug!(%url, name, "creating backend project");
        self.send(
            self.client
                .post(&url)
                .json(&serde_json::json!({ "name": name })),
        )
    }

    fn describe_project(&self, project_id: &str) -> RemoteResult<RemoteBackendSnapshot> {
        let url = self.project_url(project_id);
        tracing::debug!(%url, "describing backend project");
        self.send(self.client.get(&url))
    }

    fn update_project(&self, project_id: &str, contents: &[u8]) -> RemoteResult<OperationHandle> {
        let url = format!("{}/contents", self.project_url(project_id));
        tracing::debug!(%url, bytes = contents.len(), "uploading backend content");
        let accepted = self.send(
            self.client
                .post(&url)
                .header(reqwest::header::CONTENT_TYPE, "application/zip")
                .body(contents.to_vec()),
        )?;
        Ok(OperationHandle {
            project_id: project_id.to_string(),
            accepted,
        })
    }

    fn query_operation(&self, handle: &OperationHandle) -> RemoteResult<RemoteBackendSnapshot> {
        let url = self.project_url(&handle.project_id);
        self.send(
            self.client
                .get(&url)
                .query(&[("syncFromResources", "true")]),
        )
    }
}
