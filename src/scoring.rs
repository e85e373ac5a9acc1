//! Lead qualification scoring.
//!
//! Maps the weighted checklist of the lead form plus the initial and current
//! bid values into a qualification tier and a suggested price ceiling:
//!
//! | total      | tier           | ceiling               |
//! |------------|----------------|-----------------------|
//! | >= 130     | Buy            | valor_inicial * 1.8   |
//! | >= 100     | WatchHigh      | valor_inicial * 1.3   |
//! | >= 80      | WatchAtInitial | valor_inicial         |
//! | otherwise  | Discard        | none                  |
//!
//! Scoring never fails: unparseable amounts count as zero.

use crate::models::{LeadScoreInput, LeadScoreResult, Tier};
use regex::Regex;
use std::sync::LazyLock;

pub const BUY_THRESHOLD: i64 = 130;
pub const WATCH_HIGH_THRESHOLD: i64 = 100;
pub const WATCH_AT_INITIAL_THRESHOLD: i64 = 80;

const BUY_MULTIPLIER: f64 = 1.8;
const WATCH_HIGH_MULTIPLIER: f64 = 1.3;

/// Longest leading decimal literal, exponent included.
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?").expect("valid amount regex")
});

/// Scores a lead. Pure and synchronous.
pub fn score(input: &LeadScoreInput) -> LeadScoreResult {
    let initial = parse_amount(&input.valor_inicial);
    let current = parse_amount(&input.valor_atual);

    let total: i64 = input
        .factors
        .iter()
        .filter(|factor| factor.checked)
        .map(|factor| factor.weight)
        .fold(0i64, i64::saturating_add);

    let (tier, ceiling) = classify(total, initial);

    // Only evaluated when a ceiling exists, i.e. never for discarded leads
    let over_ceiling_warning = ceiling.is_some_and(|ceiling| current > ceiling);

    LeadScoreResult {
        total,
        tier,
        ceiling,
        over_ceiling_warning,
        current_value: current,
    }
}

/// Descending-threshold ladder; first match wins.
pub fn classify(total: i64, initial_value: f64) -> (Tier, Option<f64>) {
    if total >= BUY_THRESHOLD {
        (Tier::Buy, Some(initial_value * BUY_MULTIPLIER))
    } else if total >= WATCH_HIGH_THRESHOLD {
        (Tier::WatchHigh, Some(initial_value * WATCH_HIGH_MULTIPLIER))
    } else if total >= WATCH_AT_INITIAL_THRESHOLD {
        (Tier::WatchAtInitial, Some(initial_value))
    } else {
        (Tier::Discard, None)
    }
}

/// Parses a monetary form value the way a browser `parseFloat` does: the
/// longest leading decimal number wins and trailing garbage is ignored.
///
/// Empty, unparseable or non-finite input yields `0.0`.
pub fn parse_amount(raw: &str) -> f64 {
    LEADING_NUMBER
        .find(raw.trim_start())
        .and_then(|number| number.as_str().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Formats a monetary value as `R$ 1234.50` (always two decimals).
pub fn format_brl(value: f64) -> String {
    format!("R$ {:.2}", value)
}

/// Lines of the result panel shown under the lead form.
pub fn render_score(result: &LeadScoreResult) -> Vec<String> {
    let mut lines = vec![format!("Pontuação total: {} pontos", result.total)];

    let ceiling = result.ceiling.unwrap_or_default();
    lines.push(match result.tier {
        Tier::Buy => "🟢 COMPRE JÁ liberado".to_string(),
        Tier::WatchHigh => format!("🟡 Acompanhar até {}", format_brl(ceiling)),
        Tier::WatchAtInitial => {
            format!("⚠️ Lance até o valor inicial: {}", format_brl(ceiling))
        }
        Tier::Discard => "🔴 Descartar Lead".to_string(),
    });

    if result.over_ceiling_warning {
        lines.push(format!(
            "❗ Valor atual de {} já ultrapassou o teto sugerido de {}. Reavaliar risco!",
            format_brl(result.current_value),
            format_brl(ceiling)
        ));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeadFactor;

    fn input(initial: &str, current: &str, weights: &[(i64, bool)]) -> LeadScoreInput {
        LeadScoreInput {
            valor_inicial: initial.to_string(),
            valor_atual: current.to_string(),
            factors: weights
                .iter()
                .enumerate()
                .map(|(i, (weight, checked))| LeadFactor {
                    label: format!("fator {}", i),
                    weight: *weight,
                    checked: *checked,
                })
                .collect(),
        }
    }

    #[test]
    fn test_buy_tier() {
        let result = score(&input("1000", "1000", &[(100, true), (50, true)]));
        assert_eq!(result.total, 150);
        assert_eq!(result.tier, Tier::Buy);
        assert_eq!(format!("{:.2}", result.ceiling.unwrap()), "1800.00");
        assert!(!result.over_ceiling_warning);
    }

    #[test]
    fn test_watch_high_with_overshoot() {
        let result = score(&input("1000", "1400", &[(60, true), (50, true), (40, false)]));
        assert_eq!(result.total, 110);
        assert_eq!(result.tier, Tier::WatchHigh);
        assert_eq!(format!("{:.2}", result.ceiling.unwrap()), "1300.00");
        assert!(result.over_ceiling_warning);
    }

    #[test]
    fn test_watch_at_initial() {
        let result = score(&input("1000", "900", &[(90, true)]));
        assert_eq!(result.tier, Tier::WatchAtInitial);
        assert_eq!(result.ceiling, Some(1000.0));
        assert!(!result.over_ceiling_warning);
    }

    #[test]
    fn test_discard_never_warns() {
        let result = score(&input("1000", "5000", &[(50, true), (200, false)]));
        assert_eq!(result.total, 50);
        assert_eq!(result.tier, Tier::Discard);
        assert_eq!(result.ceiling, None);
        assert!(!result.over_ceiling_warning);
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        assert_eq!(classify(130, 10.0).0, Tier::Buy);
        assert_eq!(classify(129, 10.0).0, Tier::WatchHigh);
        assert_eq!(classify(100, 10.0).0, Tier::WatchHigh);
        assert_eq!(classify(99, 10.0).0, Tier::WatchAtInitial);
        assert_eq!(classify(80, 10.0).0, Tier::WatchAtInitial);
        assert_eq!(classify(79, 10.0).0, Tier::Discard);
    }

    #[test]
    fn test_malformed_amounts_are_zero() {
        let result = score(&input("abc", "", &[(90, true)]));
        assert_eq!(result.ceiling, Some(0.0));
        assert_eq!(result.current_value, 0.0);
        assert!(!result.over_ceiling_warning);

        // current value above a zero ceiling still warns
        let result = score(&input("not a number", "10", &[(90, true)]));
        assert!(result.over_ceiling_warning);
    }

    #[test]
    fn test_huge_weights_saturate() {
        let result = score(&input("1000", "0", &[(i64::MAX, true), (1, true)]));
        assert_eq!(result.total, i64::MAX);
        assert_eq!(result.tier, Tier::Buy);
    }

    #[test]
    fn test_parse_amount_prefix_semantics() {
        assert_eq!(parse_amount("1500.75"), 1500.75);
        assert_eq!(parse_amount("  42abc"), 42.0);
        assert_eq!(parse_amount("1.000,50"), 1.0);
        assert_eq!(parse_amount(".5"), 0.5);
        assert_eq!(parse_amount("-3"), -3.0);
        assert_eq!(parse_amount("7."), 7.0);
        assert_eq!(parse_amount("2e3"), 2000.0);
        assert_eq!(parse_amount("2e"), 2.0);
        assert_eq!(parse_amount("R$ 100"), 0.0);
        assert_eq!(parse_amount("."), 0.0);
        assert_eq!(parse_amount("1e999"), 0.0);
        assert_eq!(parse_amount("+.25e2x"), 25.0);
        assert_eq!(parse_amount("3E-1"), 0.3);
    }

    #[test]
    fn test_render_score_lines() {
        let result = score(&input("1000", "1400", &[(110, true)]));
        let lines = render_score(&result);

        assert_eq!(lines[0], "Pontuação total: 110 pontos");
        assert_eq!(lines[1], "🟡 Acompanhar até R$ 1300.00");
        assert_eq!(
            lines[2],
            "❗ Valor atual de R$ 1400.00 já ultrapassou o teto sugerido de R$ 1300.00. Reavaliar risco!"
        );
    }

    #[test]
    fn test_render_discard_has_no_ceiling() {
        let result = score(&input("1000", "5000", &[(10, true)]));
        assert_eq!(
            render_score(&result),
            vec!["Pontuação total: 10 pontos", "🔴 Descartar Lead"]
        );
    }
}
