use crate::models::{CompanyInfo, LeadScoreInput, LeadScoreResult, VerificationRecord};
use crate::render::{render_company, render_records, VerificationCard};
use crate::scoring::render_score;

pub const VERIFY_IDLE_LABEL: &str = "Verificar Anúncios";
pub const VERIFY_BUSY_LABEL: &str = "Verificando...";
pub const QSA_IDLE_LABEL: &str = "Consultar QSA";
pub const QSA_BUSY_LABEL: &str = "Consultando...";

/// A submit button with its spinner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    pub disabled: bool,
    pub label: &'static str,
    pub spinner_visible: bool,
    idle_label: &'static str,
    busy_label: &'static str,
}

impl ButtonState {
    fn new(idle_label: &'static str, busy_label: &'static str) -> Self {
        Self {
            disabled: false,
            label: idle_label,
            spinner_visible: false,
            idle_label,
            busy_label,
        }
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.disabled = busy;
        self.spinner_visible = busy;
        self.label = if busy { self.busy_label } else { self.idle_label };
    }

    pub fn is_busy(&self) -> bool {
        self.disabled
    }
}

/// Buttons that show a busy state while their request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormButton {
    Verify,
    Qsa,
}

/// Raw contents of the verification form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationForm {
    pub instagram_username: String,
    pub domain: String,
}

/// Company lookup panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QsaPanel {
    /// Masked CNPJ as shown in the input.
    pub cnpj_input: String,
    pub results_visible: bool,
    pub company: Option<CompanyInfo>,
    pub lines: Vec<String>,
}

/// All UI state of the dashboard page.
///
/// Constructed once and owned by the `Dashboard` controller; every handler
/// mutates it in place and a front end only has to draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub verification_form: VerificationForm,
    pub verify_button: ButtonState,
    pub cards: Vec<VerificationCard>,
    pub empty_placeholder_visible: bool,
    pub qsa: QsaPanel,
    pub qsa_button: ButtonState,
    pub lead_form: LeadScoreInput,
    pub lead_result: Vec<String>,
    /// Alerts shown to the user, oldest first.
    pub alerts: Vec<String>,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self {
            verification_form: VerificationForm::default(),
            verify_button: ButtonState::new(VERIFY_IDLE_LABEL, VERIFY_BUSY_LABEL),
            cards: Vec::new(),
            empty_placeholder_visible: true,
            qsa: QsaPanel::default(),
            qsa_button: ButtonState::new(QSA_IDLE_LABEL, QSA_BUSY_LABEL),
            lead_form: LeadScoreInput::default(),
            lead_result: Vec::new(),
            alerts: Vec::new(),
        }
    }
}

impl DashboardView {
    pub fn alert(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("Alert: {}", message);
        self.alerts.push(message);
    }

    pub fn button_mut(&mut self, button: FormButton) -> &mut ButtonState {
        match button {
            FormButton::Verify => &mut self.verify_button,
            FormButton::Qsa => &mut self.qsa_button,
        }
    }

    pub fn last_alert(&self) -> Option<&str> {
        self.alerts.last().map(String::as_str)
    }

    /// Full replace of the result cards; an empty list brings back the placeholder.
    pub fn show_records(&mut self, records: &[VerificationRecord]) {
        if records.is_empty() {
            self.show_empty();
        } else {
            self.empty_placeholder_visible = false;
            self.cards = render_records(records);
        }
    }

    pub fn show_empty(&mut self) {
        self.cards.clear();
        self.empty_placeholder_visible = true;
    }

    pub fn show_company(&mut self, company: CompanyInfo) {
        self.qsa.lines = render_company(&company);
        self.qsa.company = Some(company);
        self.qsa.results_visible = true;
    }

    pub fn hide_company(&mut self) {
        self.qsa.results_visible = false;
    }

    pub fn show_score(&mut self, result: &LeadScoreResult) {
        self.lead_result = render_score(result);
    }

    /// Clears every panel back to a freshly loaded page. Alert history is kept.
    pub fn reset(&mut self) {
        self.verification_form = VerificationForm::default();
        self.show_empty();
        self.qsa = QsaPanel::default();
        self.lead_form = LeadScoreInput::default();
        self.lead_result.clear();
    }
}
