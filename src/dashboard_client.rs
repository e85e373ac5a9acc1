use crate::errors::AppError;
use crate::models::{
    ApiErrorBody, CompanyInfo, QsaRequest, QsaResponse, VerificationRecord, VerificationRequest,
};
use async_trait::async_trait;
use std::time::Duration;

const VERIFY_FALLBACK_ERROR: &str = "Erro ao realizar verificação";

/// Backend operations the dashboard depends on.
///
/// `DashboardClient` talks to the real HTTP API; tests plug in fakes.
#[async_trait]
pub trait DashboardApi: Send + Sync + 'static {
    /// `POST /api/verify`. The error carries the server-provided message.
    async fn submit_verification(&self, request: &VerificationRequest) -> Result<(), AppError>;

    /// `GET /api/status`, newest record first.
    async fn fetch_status(&self) -> Result<Vec<VerificationRecord>, AppError>;

    /// `DELETE /api/status`.
    async fn clear_status(&self) -> Result<(), AppError>;

    /// `POST /api/qsa` with a digits-only CNPJ.
    async fn lookup_qsa(&self, cnpj: &str) -> Result<CompanyInfo, AppError>;
}

/// Client for the verification dashboard HTTP API.
#[derive(Clone)]
pub struct DashboardClient {
    client: reqwest::Client,
    base_url: String,
}

impl DashboardClient {
    /// Creates a new `DashboardClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the dashboard backend, without trailing slash.
    /// * `timeout` - Optional per-request timeout; `None` waits indefinitely.
    pub fn new(base_url: String, timeout: Option<Duration>) -> Result<Self, AppError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            AppError::Request(format!("Failed to create dashboard client: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Pulls the `error` field out of a failed response, falling back to `fallback`.
async fn error_message(response: reqwest::Response, fallback: &str) -> String {
    let status = response.status();
    match response.json::<ApiErrorBody>().await {
        Ok(ApiErrorBody {
            error: Some(message),
        }) if !message.trim().is_empty() => message,
        _ => {
            tracing::debug!("No error message in {} response body", status);
            fallback.to_string()
        }
    }
}

#[async_trait]
impl DashboardApi for DashboardClient {
    async fn submit_verification(&self, request: &VerificationRequest) -> Result<(), AppError> {
        let url = self.url("/api/verify");
        tracing::info!(
            "Submitting verification: instagram='{}', domain='{}'",
            request.instagram_username,
            request.domain
        );

        let response = self.client.post(&url).json(request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = error_message(response, VERIFY_FALLBACK_ERROR).await;
            tracing::warn!("Verification rejected with {}: {}", status, message);
            return Err(AppError::Request(message));
        }

        tracing::info!("✓ Verification accepted");
        Ok(())
    }

    async fn fetch_status(&self) -> Result<Vec<VerificationRecord>, AppError> {
        let url = self.url("/api/status");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Poll(format!("Status request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Poll(format!(
                "Status endpoint returned {}: {}",
                status, error_text
            )));
        }

        let records: Vec<VerificationRecord> = response
            .json()
            .await
            .map_err(|e| AppError::Poll(format!("Failed to parse status response: {}", e)))?;

        tracing::debug!("Fetched {} verification records", records.len());
        Ok(records)
    }

    async fn clear_status(&self) -> Result<(), AppError> {
        let url = self.url("/api/status");
        tracing::info!("Clearing verification history");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| AppError::Reset(format!("Clear request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Reset(format!(
                "Status endpoint returned {} on delete",
                response.status()
            )));
        }

        Ok(())
    }

    async fn lookup_qsa(&self, cnpj: &str) -> Result<CompanyInfo, AppError> {
        let url = self.url("/api/qsa");
        tracing::info!("Looking up QSA for CNPJ {}", cnpj);

        let response = self
            .client
            .post(&url)
            .json(&QsaRequest {
                cnpj: cnpj.to_string(),
            })
            .send()
            .await?;

        // The body decides success: the backend reports lookup failures as
        // `{error}` and may do so with a 200
        let status = response.status();
        let body: QsaResponse = response.json().await.map_err(|e| {
            AppError::Request(format!("Resposta inválida da consulta ({}): {}", status, e))
        })?;

        if let Some(message) = body.error {
            tracing::warn!("QSA lookup for {} failed: {}", cnpj, message);
            return Err(AppError::Request(message));
        }

        let company = CompanyInfo {
            razao_social: body.razao_social.unwrap_or_else(|| "N/A".to_string()),
            qsa: body.qsa.unwrap_or_default(),
        };

        tracing::info!(
            "✓ QSA for {}: {} ({} partners)",
            cnpj,
            company.razao_social,
            company.qsa.len()
        );
        Ok(company)
    }
}
