use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp format the verification backend stamps on each record.
pub const RECORD_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============ Verification ============

/// Body of `POST /api/verify`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationRequest {
    /// Instagram handle, without the leading `@`.
    pub instagram_username: String,
    /// Site domain checked against the Google Ads Transparency Center.
    pub domain: String,
}

impl VerificationRequest {
    /// Builds a request from raw form input.
    ///
    /// Both fields are trimmed; the request is rejected when both end up empty.
    pub fn new(
        instagram_username: &str,
        domain: &str,
    ) -> Result<Self, crate::errors::AppError> {
        let instagram_username = instagram_username.trim().to_string();
        let domain = domain.trim().to_string();

        if instagram_username.is_empty() && domain.is_empty() {
            return Err(crate::errors::AppError::Validation(
                "Por favor, preencha pelo menos um dos campos: Usuário do Instagram ou Domínio"
                    .to_string(),
            ));
        }

        Ok(Self {
            instagram_username,
            domain,
        })
    }
}

/// Per-platform progress reported by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdStatus {
    Active,
    Inactive,
    Pending,
    Error,
    NotChecked,
    /// Anything the backend sends outside the five known values.
    #[default]
    #[serde(other)]
    Unknown,
}

impl AdStatus {
    /// Wire value, also used as the CSS-like status class suffix.
    pub fn as_str(&self) -> &'static str {
        match self {
            AdStatus::Active => "active",
            AdStatus::Inactive => "inactive",
            AdStatus::Pending => "pending",
            AdStatus::Error => "error",
            AdStatus::NotChecked => "not_checked",
            AdStatus::Unknown => "unknown",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, AdStatus::Pending)
    }
}

/// Snapshot of one verification as returned by `GET /api/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationRecord {
    #[serde(default)]
    pub instagram_username: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub facebook_status: AdStatus,
    #[serde(default)]
    pub google_status: AdStatus,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl VerificationRecord {
    /// True once neither platform is still being checked.
    pub fn is_complete(&self) -> bool {
        !self.facebook_status.is_pending() && !self.google_status.is_pending()
    }

    /// Parsed submission time, if the backend sent a well-formed one.
    pub fn submitted_at(&self) -> Option<NaiveDateTime> {
        self.timestamp
            .as_deref()
            .and_then(|ts| NaiveDateTime::parse_from_str(ts.trim(), RECORD_TIMESTAMP_FORMAT).ok())
    }
}

/// Completion predicate evaluated after every poll tick.
pub fn all_complete(records: &[VerificationRecord]) -> bool {
    records.iter().all(VerificationRecord::is_complete)
}

// ============ Company lookup (QSA) ============

/// Body of `POST /api/qsa`.
#[derive(Debug, Clone, Serialize)]
pub struct QsaRequest {
    pub cnpj: String,
}

/// A partner/administrator entry of the company's QSA.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    #[serde(default)]
    pub nome: String,
    /// Qualification, e.g. "49-Sócio-Administrador".
    #[serde(default)]
    pub qual: String,
}

/// Successful company lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub razao_social: String,
    pub qsa: Vec<Partner>,
}

/// Raw `POST /api/qsa` response; either `error` or the company fields are set.
#[derive(Debug, Clone, Deserialize)]
pub struct QsaResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub razao_social: Option<String>,
    #[serde(default)]
    pub qsa: Option<Vec<Partner>>,
}

/// Error body shared by every endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

// ============ Lead scoring ============

/// One checklist item of the lead qualification form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadFactor {
    pub label: String,
    pub weight: i64,
    pub checked: bool,
}

/// Raw lead form input; the monetary fields hold whatever the user typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadScoreInput {
    pub valor_inicial: String,
    pub valor_atual: String,
    pub factors: Vec<LeadFactor>,
}

/// Qualification bucket derived from the checklist total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    /// "Compre já": bid up to 1.8x the initial value.
    Buy,
    /// Follow the lead up to 1.3x the initial value.
    WatchHigh,
    /// Bid no more than the initial value.
    WatchAtInitial,
    Discard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadScoreResult {
    pub total: i64,
    pub tier: Tier,
    /// Suggested maximum price; `None` for discarded leads.
    pub ceiling: Option<f64>,
    pub over_ceiling_warning: bool,
    /// Parsed `valor_atual`, kept for the overshoot message.
    pub current_value: f64,
}
