//! In-memory backend shared by the controller tests.
#![allow(dead_code)]

use async_trait::async_trait;
use rust_ads_dashboard::dashboard::Dashboard;
use rust_ads_dashboard::dashboard_client::DashboardApi;
use rust_ads_dashboard::errors::AppError;
use rust_ads_dashboard::models::{AdStatus, CompanyInfo, VerificationRecord, VerificationRequest};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const POLL_INTERVAL: Duration = Duration::from_secs(3);

#[derive(Default)]
pub struct FakeApi {
    pub records: Mutex<Vec<VerificationRecord>>,
    pub submit_error: Mutex<Option<AppError>>,
    pub fetch_delay: Mutex<Option<Duration>>,
    pub fail_fetch: AtomicBool,
    pub fail_clear: AtomicBool,
    pub qsa_result: Mutex<Option<Result<CompanyInfo, AppError>>>,
    pub submitted: Mutex<Vec<VerificationRequest>>,
    pub fetches: AtomicUsize,
    pub clears: AtomicUsize,
    pub qsa_calls: AtomicUsize,
}

impl FakeApi {
    pub fn set_records(&self, records: Vec<VerificationRecord>) {
        *self.records.lock().unwrap() = records;
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DashboardApi for FakeApi {
    async fn submit_verification(&self, request: &VerificationRequest) -> Result<(), AppError> {
        self.submitted.lock().unwrap().push(request.clone());
        match self.submit_error.lock().unwrap().clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn fetch_status(&self) -> Result<Vec<VerificationRecord>, AppError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        // Snapshot taken when the request is issued, like a real server
        let records = self.records.lock().unwrap().clone();
        let delay = *self.fetch_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(AppError::Poll("connection refused".to_string()));
        }
        Ok(records)
    }

    async fn clear_status(&self) -> Result<(), AppError> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        if self.fail_clear.load(Ordering::SeqCst) {
            return Err(AppError::Reset("connection refused".to_string()));
        }
        self.records.lock().unwrap().clear();
        Ok(())
    }

    async fn lookup_qsa(&self, _cnpj: &str) -> Result<CompanyInfo, AppError> {
        self.qsa_calls.fetch_add(1, Ordering::SeqCst);
        self.qsa_result
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(AppError::Request("QSA não encontrado".to_string())))
    }
}

pub fn record(facebook: AdStatus, google: AdStatus) -> VerificationRecord {
    VerificationRecord {
        instagram_username: Some("mbras".to_string()),
        domain: Some("mbras.com.br".to_string()),
        facebook_status: facebook,
        google_status: google,
        timestamp: Some("2024-03-01 14:05:09".to_string()),
    }
}

pub fn dashboard() -> (Arc<FakeApi>, Dashboard<FakeApi>) {
    let api = Arc::new(FakeApi::default());
    let dashboard = Dashboard::new(Arc::clone(&api), POLL_INTERVAL, Duration::from_secs(3600));
    (api, dashboard)
}

/// Lets spawned tasks run and advances the paused clock by `duration`.
pub async fn advance(duration: Duration) {
    tokio::time::sleep(duration).await;
}
