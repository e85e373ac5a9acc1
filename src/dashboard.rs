use crate::cnpj::{cnpj_digits, format_cnpj_input};
use crate::config::Config;
use crate::dashboard_client::{DashboardApi, DashboardClient};
use crate::errors::AppError;
use crate::models::{
    all_complete, CompanyInfo, LeadScoreInput, LeadScoreResult, VerificationRequest,
};
use crate::polling::{Generation, PollingSession};
use crate::scoring::score;
use crate::view::{DashboardView, FormButton, VerificationForm};
use moka::future::Cache;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};

const VERIFY_FALLBACK_ALERT: &str = "Ocorreu um erro durante a verificação";
const QSA_FALLBACK_ALERT: &str = "Ocorreu um erro durante a consulta";
const QSA_EMPTY_ALERT: &str = "Por favor, informe o CNPJ";

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Puts a button in its busy state and restores it on drop, whichever way
/// the request ends (including the handler future being dropped).
struct BusyGuard {
    view: Arc<Mutex<DashboardView>>,
    button: FormButton,
}

impl BusyGuard {
    fn engage(view: &Arc<Mutex<DashboardView>>, button: FormButton) -> Self {
        lock(view).button_mut(button).set_busy(true);
        Self {
            view: Arc::clone(view),
            button,
        }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        lock(&self.view).button_mut(self.button).set_busy(false);
    }
}

/// Dashboard controller.
///
/// Owns the UI state, the polling session and the backend handle. Cloning is
/// cheap and every clone drives the same page. Dropping the last clone closes
/// the page: the polling timer only holds a weak reference and exits on its
/// next tick.
///
/// Methods that start polling spawn tokio tasks and must be called from
/// within a tokio runtime.
pub struct Dashboard<A: DashboardApi> {
    shared: Arc<Shared<A>>,
}

struct Shared<A: DashboardApi> {
    api: Arc<A>,
    view: Arc<Mutex<DashboardView>>,
    session: Mutex<PollingSession>,
    poll_interval: Duration,
    company_cache: Cache<String, CompanyInfo>,
}

impl<A: DashboardApi> Clone for Dashboard<A> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Dashboard<DashboardClient> {
    /// Builds a dashboard backed by the HTTP API described in `config`.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = DashboardClient::new(config.api_base_url.clone(), config.request_timeout())?;
        Ok(Self::new(
            Arc::new(client),
            config.poll_interval(),
            config.qsa_cache_ttl(),
        ))
    }
}

impl<A: DashboardApi> Dashboard<A> {
    pub fn new(api: Arc<A>, poll_interval: Duration, company_cache_ttl: Duration) -> Self {
        Self {
            shared: Arc::new(Shared {
                api,
                view: Arc::new(Mutex::new(DashboardView::default())),
                session: Mutex::new(PollingSession::new()),
                poll_interval,
                company_cache: Cache::builder()
                    .time_to_live(company_cache_ttl)
                    .max_capacity(1_000)
                    .build(),
            }),
        }
    }

    /// Snapshot of the current UI state.
    pub fn view(&self) -> DashboardView {
        lock(&self.shared.view).clone()
    }

    /// Runs `f` against the live UI state.
    pub fn with_view<R>(&self, f: impl FnOnce(&mut DashboardView) -> R) -> R {
        f(&mut lock(&self.shared.view))
    }

    pub fn fill_verification_form(&self, instagram_username: &str, domain: &str) {
        self.with_view(|view| {
            view.verification_form = VerificationForm {
                instagram_username: instagram_username.to_string(),
                domain: domain.to_string(),
            }
        });
    }

    // ============ Verification poller ============

    /// Submits the verification form and starts polling on success.
    ///
    /// Empty input is rejected with an alert and no request is made. A
    /// backend rejection is shown verbatim and leaves polling untouched.
    pub async fn submit(&self) -> Result<(), AppError> {
        let form = self.with_view(|view| view.verification_form.clone());
        let request = match VerificationRequest::new(&form.instagram_username, &form.domain) {
            Ok(request) => request,
            Err(e) => {
                self.with_view(|view| view.alert(e.user_message()));
                return Err(e);
            }
        };

        let _busy = BusyGuard::engage(&self.shared.view, FormButton::Verify);

        match self.shared.api.submit_verification(&request).await {
            Ok(()) => {
                self.start_polling();
                self.with_view(|view| view.verification_form = VerificationForm::default());
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Verification submission failed: {}", e);
                let message = match e.user_message() {
                    "" => VERIFY_FALLBACK_ALERT,
                    message => message,
                };
                self.with_view(|view| view.alert(message));
                Err(e)
            }
        }
    }

    /// Starts (or restarts) the polling session.
    ///
    /// Any running timer is cancelled first. One status fetch happens right
    /// away and then one per poll interval until every record is complete or
    /// the session is stopped. Each tick spawns its own fetch, so a slow
    /// backend can have several fetches in flight.
    pub fn start_polling(&self) {
        let period = self.shared.poll_interval;
        let page = Arc::downgrade(&self.shared);
        let generation = lock(&self.shared.session).start(|generation| {
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
                loop {
                    ticker.tick().await;
                    let Some(shared) = page.upgrade() else {
                        tracing::debug!("Dashboard dropped, polling timer exiting");
                        break;
                    };
                    let tick = Dashboard { shared };
                    tokio::spawn(async move { tick.fetch_and_reconcile(generation).await });
                }
            })
        });

        let dashboard = self.clone();
        tokio::spawn(async move { dashboard.fetch_and_reconcile(generation).await });
    }

    pub fn stop_polling(&self) {
        lock(&self.shared.session).stop();
    }

    pub fn is_polling(&self) -> bool {
        lock(&self.shared.session).is_active()
    }

    /// One poll tick: fetch every record, redraw, and stop once nothing is pending.
    async fn fetch_and_reconcile(&self, generation: Generation) {
        tracing::debug!("Polling verification status (generation {})", generation);
        let result = self.shared.api.fetch_status().await;

        let mut session = lock(&self.shared.session);
        if !session.is_current(generation) {
            tracing::debug!(
                "Discarding status response from superseded generation {}",
                generation
            );
            return;
        }

        match result {
            Ok(records) => {
                lock(&self.shared.view).show_records(&records);

                // An empty history keeps the session alive until records show up
                if !records.is_empty() && all_complete(&records) {
                    session.stop_if_current(generation);
                    tracing::info!(
                        "All {} verifications complete, polling stopped",
                        records.len()
                    );
                }
            }
            Err(e) => {
                tracing::warn!("Error fetching verification status: {}", e);
            }
        }
    }

    /// Fetches and draws the current records once, outside any polling session.
    pub async fn refresh(&self) -> Result<(), AppError> {
        let records = self.shared.api.fetch_status().await?;
        self.with_view(|view| view.show_records(&records));
        Ok(())
    }

    /// Stops polling, clears every panel and asks the backend to forget its
    /// history. A failed delete is only logged.
    pub async fn reset(&self) {
        self.stop_polling();
        self.with_view(DashboardView::reset);

        if let Err(e) = self.shared.api.clear_status().await {
            tracing::error!("Error clearing verification history: {}", e);
        }
    }

    /// Stops background polling; the dashboard can be dropped afterwards.
    pub fn shutdown(&self) {
        self.stop_polling();
    }

    // ============ Company lookup ============

    /// Applies the CNPJ mask to typed input and stores it in the form.
    pub fn set_cnpj_input(&self, raw: &str) -> String {
        let masked = format_cnpj_input(raw);
        self.with_view(|view| view.qsa.cnpj_input = masked.clone());
        masked
    }

    /// Looks up the partners (QSA) of the company in the CNPJ field.
    pub async fn lookup_company(&self) -> Result<CompanyInfo, AppError> {
        let cnpj = self.with_view(|view| cnpj_digits(&view.qsa.cnpj_input));
        if cnpj.is_empty() {
            self.with_view(|view| view.alert(QSA_EMPTY_ALERT));
            return Err(AppError::Validation(QSA_EMPTY_ALERT.to_string()));
        }

        let _busy = BusyGuard::engage(&self.shared.view, FormButton::Qsa);
        self.with_view(DashboardView::hide_company);

        let result = match self.shared.company_cache.get(&cnpj).await {
            Some(company) => {
                tracing::debug!("QSA cache hit for {}", cnpj);
                Ok(company)
            }
            None => {
                let result = self.shared.api.lookup_qsa(&cnpj).await;
                if let Ok(ref company) = result {
                    self.shared.company_cache.insert(cnpj.clone(), company.clone()).await;
                }
                result
            }
        };

        match result {
            Ok(company) => {
                self.with_view(|view| view.show_company(company.clone()));
                Ok(company)
            }
            Err(e) => {
                let message = match e.user_message() {
                    "" => QSA_FALLBACK_ALERT,
                    message => message,
                };
                self.with_view(|view| view.alert(message));
                Err(e)
            }
        }
    }

    // ============ Lead scoring ============

    pub fn set_lead_form(&self, input: LeadScoreInput) {
        self.with_view(|view| view.lead_form = input);
    }

    /// Scores the lead form and shows the result panel.
    pub fn calculate_lead(&self) -> LeadScoreResult {
        let input = self.with_view(|view| view.lead_form.clone());
        let result = score(&input);
        tracing::debug!(
            "Lead scored: total={}, tier={:?}, ceiling={:?}",
            result.total,
            result.tier,
            result.ceiling
        );
        self.with_view(|view| view.show_score(&result));
        result
    }
}
