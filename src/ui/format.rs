//! Display formatting for volumes and money.

use crate::domain::wire::parse_amount;
use crate::domain::format_amount;

const CM3_PER_M3: f64 = 1_000_000.0;

/// `12500000` → `"12.50 m³"`.
pub fn volume_m3(volume_cm3: Option<u64>) -> String {
    match volume_cm3 {
        Some(volume) => format!("{} m³", format_amount(volume as f64 / CM3_PER_M3)),
        None => "—".to_string(),
    }
}

pub fn money(value: Option<f64>) -> String {
    value.map(|value| group_thousands(&format_amount(value)))
        .unwrap_or_else(|| "—".to_string())
}

/// Money already encoded as a decimal string on the wire.
pub fn money_str(raw: Option<&str>) -> String {
    money(raw.and_then(parse_amount))
}

fn group_thousands(fixed: &str) -> String {
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_in_cubic_metres() {
        assert_eq!(volume_m3(Some(12_500_000)), "12.50 m³");
        assert_eq!(volume_m3(Some(0)), "0.00 m³");
        assert_eq!(volume_m3(None), "—");
    }

    #[test]
    fn test_money_groups_thousands() {
        assert_eq!(money(Some(1_234_567.891)), "1 234 567.89");
        assert_eq!(money(Some(950.0)), "950.00");
        assert_eq!(money(Some(-4200.5)), "-4 200.50");
        assert_eq!(money_str(Some("19600.00")), "19 600.00");
        assert_eq!(money_str(Some("n/a")), "—");
        assert_eq!(money_str(None), "—");
    }
}
