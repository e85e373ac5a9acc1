use crate::models::{AdStatus, CompanyInfo, VerificationRecord};
use std::fmt;

/// Label used for any status outside the five known values.
pub const UNKNOWN_STATUS_LABEL: &str = "Desconhecido";

/// Human-readable label for a platform status.
pub fn status_label(status: AdStatus) -> &'static str {
    match status {
        AdStatus::Active => "Ativo",
        AdStatus::Inactive => "Inativo",
        AdStatus::Pending => "Verificando...",
        AdStatus::Error => "Erro",
        AdStatus::NotChecked => "Não verificado",
        AdStatus::Unknown => UNKNOWN_STATUS_LABEL,
    }
}

/// Status indicator of one platform inside a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    pub platform: &'static str,
    /// `status-<wire value>`, matches the dashboard stylesheet.
    pub css_class: String,
    pub label: &'static str,
}

impl StatusBadge {
    fn new(platform: &'static str, status: AdStatus) -> Self {
        Self {
            platform,
            css_class: format!("status-{}", status.as_str()),
            label: status_label(status),
        }
    }
}

/// One rendered verification card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationCard {
    /// `@handle`, only when the record has a non-blank username.
    pub instagram: Option<String>,
    pub domain: Option<String>,
    /// `dd/mm/YYYY HH:MM:SS`, when the backend stamped the record.
    pub submitted_at: Option<String>,
    pub facebook: StatusBadge,
    pub google: StatusBadge,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<&VerificationRecord> for VerificationCard {
    fn from(record: &VerificationRecord) -> Self {
        Self {
            instagram: non_blank(record.instagram_username.as_deref())
                .map(|handle| format!("@{}", handle)),
            domain: non_blank(record.domain.as_deref()).map(str::to_string),
            submitted_at: record
                .submitted_at()
                .map(|ts| ts.format("%d/%m/%Y %H:%M:%S").to_string()),
            facebook: StatusBadge::new("Facebook Ads", record.facebook_status),
            google: StatusBadge::new("Google Ads", record.google_status),
        }
    }
}

/// Renders the full card list from scratch.
pub fn render_records(records: &[VerificationRecord]) -> Vec<VerificationCard> {
    records.iter().map(VerificationCard::from).collect()
}

impl fmt::Display for VerificationCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref instagram) = self.instagram {
            writeln!(f, "Instagram: {}", instagram)?;
        }
        if let Some(ref domain) = self.domain {
            writeln!(f, "Domínio: {}", domain)?;
        }
        if let Some(ref submitted_at) = self.submitted_at {
            writeln!(f, "Enviado em: {}", submitted_at)?;
        }
        writeln!(f, "  {}: {}", self.facebook.platform, self.facebook.label)?;
        write!(f, "  {}: {}", self.google.platform, self.google.label)
    }
}

/// Lines of the QSA panel: company name followed by one entry per partner.
pub fn render_company(company: &CompanyInfo) -> Vec<String> {
    let mut lines = vec![format!("Razão Social: {}", company.razao_social)];
    lines.extend(
        company
            .qsa
            .iter()
            .map(|partner| format!("{} (Qualificação: {})", partner.nome, partner.qual)),
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Partner;

    fn record(instagram: Option<&str>, domain: Option<&str>) -> VerificationRecord {
        VerificationRecord {
            instagram_username: instagram.map(str::to_string),
            domain: domain.map(str::to_string),
            facebook_status: AdStatus::Active,
            google_status: AdStatus::NotChecked,
            timestamp: Some("2024-03-01 14:05:09".to_string()),
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(status_label(AdStatus::Active), "Ativo");
        assert_eq!(status_label(AdStatus::Inactive), "Inativo");
        assert_eq!(status_label(AdStatus::Pending), "Verificando...");
        assert_eq!(status_label(AdStatus::Error), "Erro");
        assert_eq!(status_label(AdStatus::NotChecked), "Não verificado");
        assert_eq!(status_label(AdStatus::Unknown), "Desconhecido");
    }

    #[test]
    fn test_blank_fields_hidden() {
        let card = VerificationCard::from(&record(Some("mbras"), Some("   ")));
        assert_eq!(card.instagram.as_deref(), Some("@mbras"));
        assert_eq!(card.domain, None);

        let card = VerificationCard::from(&record(None, Some("mbras.com.br")));
        assert_eq!(card.instagram, None);
        assert_eq!(card.domain.as_deref(), Some("mbras.com.br"));
    }

    #[test]
    fn test_card_text() {
        let card = VerificationCard::from(&record(Some("mbras"), Some("mbras.com.br")));
        assert_eq!(card.facebook.css_class, "status-active");
        assert_eq!(
            card.to_string(),
            "Instagram: @mbras\nDomínio: mbras.com.br\nEnviado em: 01/03/2024 14:05:09\n  Facebook Ads: Ativo\n  Google Ads: Não verificado"
        );
    }

    #[test]
    fn test_render_company() {
        let company = CompanyInfo {
            razao_social: "MBRAS EMPREENDIMENTOS LTDA".to_string(),
            qsa: vec![Partner {
                nome: "FULANO DE TAL".to_string(),
                qual: "49-Sócio-Administrador".to_string(),
            }],
        };
        assert_eq!(
            render_company(&company),
            vec![
                "Razão Social: MBRAS EMPREENDIMENTOS LTDA",
                "FULANO DE TAL (Qualificação: 49-Sócio-Administrador)"
            ]
        );
    }
}
