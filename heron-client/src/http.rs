//! HTTP client for the HR backend API
//!
//! Thin typed wrapper over `reqwest`: base-URL joining, bearer token header
//! and decoding of the `{success, data, count, message}` envelope every
//! endpoint replies with.

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::client::{LoginRequest, LoginResponse};
use shared::models::{LeaveCreate, LeaveRecord, LeaveUpdate, StaffMember, StatusChange};
use shared::response::ApiEnvelope;

/// HTTP client for making network requests to the HR backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replace the authentication token in place (after login/logout)
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Send a request and decode the response envelope.
    ///
    /// Non-2xx statuses map to the error taxonomy: 404 becomes `NotFound`
    /// with `not_found_label`, anything else surfaces the backend message
    /// when one can be decoded. A 2xx envelope with `success: false` is a
    /// backend-reported failure.
    async fn send_envelope<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        not_found_label: &str,
    ) -> ClientResult<ApiEnvelope<T>> {
        let mut request = request;
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(format!("{} not found", not_found_label)));
        }

        if !status.is_success() {
            // The backend reports failures inside the envelope even on
            // non-2xx statuses; fall back to the raw status otherwise.
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&text)
                .ok()
                .and_then(|env| env.message)
                .unwrap_or_else(|| format!("Request failed with status {}", status));
            return Err(ClientError::Backend(message));
        }

        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        if !envelope.success {
            return Err(ClientError::Backend(envelope.message_or_default()));
        }

        Ok(envelope)
    }

    fn take_data<T>(envelope: ApiEnvelope<T>) -> ClientResult<T> {
        envelope
            .data
            .ok_or_else(|| ClientError::InvalidResponse("missing data field".to_string()))
    }

    // ========== Auth API ==========

    /// Login with username and password
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let request = self.client.post(self.url("/api/auth/login")).json(&body);
        let envelope = self.send_envelope::<LoginResponse>(request, "User").await?;
        Self::take_data(envelope)
    }

    // ========== Leave API ==========

    /// List leave records, optionally filtered by status and/or leave type.
    ///
    /// Absent filter values are omitted from the query string entirely.
    /// Returns the records and the backend's authoritative count.
    pub async fn list_leaves(
        &self,
        status: Option<&str>,
        leave_type: Option<&str>,
    ) -> ClientResult<(Vec<LeaveRecord>, u64)> {
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(status) = status {
            query.push(("status", status));
        }
        if let Some(leave_type) = leave_type {
            query.push(("leave_type", leave_type));
        }

        let request = self.client.get(self.url("/api/leaves")).query(&query);
        let envelope = self
            .send_envelope::<Vec<LeaveRecord>>(request, "Leave records")
            .await?;

        let count = envelope.count;
        let records = Self::take_data(envelope)?;
        let count = count.unwrap_or(records.len() as u64);
        Ok((records, count))
    }

    /// Fetch a single leave record by id
    pub async fn get_leave(&self, id: &str) -> ClientResult<LeaveRecord> {
        let request = self.client.get(self.url(&format!("/api/leaves/{}", id)));
        let envelope = self
            .send_envelope::<LeaveRecord>(request, &format!("Leave record {}", id))
            .await?;
        Self::take_data(envelope)
    }

    /// Create a leave record; returns the backend's version of it
    pub async fn create_leave(&self, payload: &LeaveCreate) -> ClientResult<LeaveRecord> {
        let request = self.client.post(self.url("/api/leaves")).json(payload);
        let envelope = self
            .send_envelope::<LeaveRecord>(request, "Leave record")
            .await?;
        Self::take_data(envelope)
    }

    /// Replace the editable fields of a leave record
    pub async fn update_leave(&self, id: &str, payload: &LeaveUpdate) -> ClientResult<()> {
        let request = self
            .client
            .put(self.url(&format!("/api/leaves/{}", id)))
            .json(payload);
        self.send_envelope::<serde_json::Value>(request, &format!("Leave record {}", id))
            .await?;
        Ok(())
    }

    /// Approve a pending leave record
    pub async fn approve_leave(&self, id: &str, payload: &StatusChange) -> ClientResult<()> {
        let request = self
            .client
            .put(self.url(&format!("/api/leaves/{}/approve", id)))
            .json(payload);
        self.send_envelope::<serde_json::Value>(request, &format!("Leave record {}", id))
            .await?;
        Ok(())
    }

    /// Reject a pending leave record
    pub async fn reject_leave(&self, id: &str, payload: &StatusChange) -> ClientResult<()> {
        let request = self
            .client
            .put(self.url(&format!("/api/leaves/{}/reject", id)))
            .json(payload);
        self.send_envelope::<serde_json::Value>(request, &format!("Leave record {}", id))
            .await?;
        Ok(())
    }

    /// Delete a leave record
    pub async fn delete_leave(&self, id: &str) -> ClientResult<()> {
        let request = self.client.delete(self.url(&format!("/api/leaves/{}", id)));
        self.send_envelope::<serde_json::Value>(request, &format!("Leave record {}", id))
            .await?;
        Ok(())
    }

    // ========== Staff API ==========

    /// Fetch the staff directory.
    ///
    /// Failures are non-fatal to callers: they are logged and degrade to an
    /// empty list so the submission form still renders.
    pub async fn list_staff(&self) -> Vec<StaffMember> {
        let request = self.client.get(self.url("/api/staff"));
        match self.send_envelope::<Vec<StaffMember>>(request, "Staff").await {
            Ok(envelope) => envelope.data.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Failed to load staff directory: {}", e);
                Vec::new()
            }
        }
    }
}
