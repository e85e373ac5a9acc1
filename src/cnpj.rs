//! CNPJ input helpers for the company lookup form.
//!
//! The mask is cosmetic: digits are grouped as `00.000.000/0000-00` while the
//! user types, but no check-digit validation happens here.

use regex::Regex;
use std::sync::LazyLock;

/// Number of digits in a complete CNPJ.
pub const CNPJ_DIGITS: usize = 14;

static FIRST_DOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})(\d)").expect("valid CNPJ mask regex"));
static SECOND_DOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})\.(\d{3})(\d)").expect("valid CNPJ mask regex"));
static SLASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(\d{3})(\d)").expect("valid CNPJ mask regex"));
static DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})(\d)").expect("valid CNPJ mask regex"));

/// Keeps only ASCII digits.
pub fn cnpj_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Progressive mask applied on every keystroke.
///
/// Separators only appear once the digit after them has been typed, so
/// `"1234"` becomes `"12.34"` and a full CNPJ becomes `"12.345.678/0001-95"`.
/// Input longer than 14 digits is returned as bare digits.
pub fn format_cnpj_input(raw: &str) -> String {
    let digits = cnpj_digits(raw);
    if digits.len() > CNPJ_DIGITS {
        return digits;
    }

    // Each step rewrites only the first match
    let value = FIRST_DOT.replace(&digits, "${1}.${2}");
    let value = SECOND_DOT.replace(&value, "${1}.${2}.${3}");
    let value = SLASH.replace(&value, ".${1}/${2}");
    let value = DASH.replace(&value, "${1}-${2}");
    value.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cnpj_mask() {
        assert_eq!(format_cnpj_input("12345678000195"), "12.345.678/0001-95");
    }

    #[test]
    fn test_progressive_mask() {
        assert_eq!(format_cnpj_input(""), "");
        assert_eq!(format_cnpj_input("12"), "12");
        assert_eq!(format_cnpj_input("123"), "12.3");
        assert_eq!(format_cnpj_input("123456"), "12.345.6");
        assert_eq!(format_cnpj_input("123456789"), "12.345.678/9");
        assert_eq!(format_cnpj_input("1234567800019"), "12.345.678/0001-9");
    }

    #[test]
    fn test_remask_is_stable() {
        let masked = format_cnpj_input("12345678000195");
        assert_eq!(format_cnpj_input(&masked), masked);
    }

    #[test]
    fn test_overlong_input_left_unmasked() {
        assert_eq!(format_cnpj_input("123456780001951"), "123456780001951");
    }

    #[test]
    fn test_digits_strip_mask() {
        assert_eq!(cnpj_digits(" 12.345.678/0001-95 "), "12345678000195");
    }
}
