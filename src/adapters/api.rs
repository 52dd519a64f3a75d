use crate::domain::model::{RegisteredStudent, RegistrationPayload};
use crate::domain::ports::RegistrationApi;
use crate::utils::error::{EnrollError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Client for the studio's student registration endpoint:
/// `POST {base}/api/students` with the camelCase JSON payload.
#[derive(Debug, Clone)]
pub struct StudentApiClient {
    client: Client,
    base_url: String,
}

impl StudentApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl RegistrationApi for StudentApiClient {
    async fn register(&self, payload: &RegistrationPayload) -> Result<RegisteredStudent> {
        let url = format!("{}/api/students", self.base_url.trim_end_matches('/'));
        tracing::debug!("POST {}", url);

        let response = self.client.post(&url).json(payload).send().await?;
        let status = response.status();

        // 4xx carries a server-side validation message; everything else
        // non-success is a transport-level failure.
        if status.is_client_error() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            return Err(EnrollError::SubmissionRejected { message });
        }

        let response = response.error_for_status()?;
        tracing::debug!("registration accepted with status {}", status);
        Ok(response.json().await.unwrap_or_default())
    }
}
