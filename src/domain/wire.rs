//! Serde helpers for backend payloads that mix strings and numbers.

use std::fmt;

use serde::de::{self, Visitor};
use serde::Deserializer;

/// Largest money amount accepted from the backend or written back to it.
pub const MAX_AMOUNT: f64 = 1_000_000_000_000.0;

/// Formats a money or quantity value as a two-decimal fixed string. Out-of-range input is
/// clamped to [`MAX_AMOUNT`] and NaN becomes zero, so the output is always numeric.
pub fn format_amount(value: f64) -> String {
    let value = if value.is_nan() {
        0.0
    } else {
        value.clamp(-MAX_AMOUNT, MAX_AMOUNT)
    };
    let rounded = (value * 100.0).round() / 100.0;
    // Avoid "-0.00" for tiny negative rounding noise.
    if rounded == 0.0 {
        return "0.00".to_string();
    }
    format!("{rounded:.2}")
}

/// Parses a two-decimal string produced by [`format_amount`] (or any float literal).
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

pub fn string_from_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrNumber;

    impl<'de> Visitor<'de> for StringOrNumber {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or number")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(StringOrNumber)
}

/// Accepts `null`, a JSON number, or a numeric string ("12.50", "") as an optional float.
pub fn number_from_json<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OptionalNumber;

    impl<'de> Visitor<'de> for OptionalNumber {
        type Value = Option<f64>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number, a numeric string, or null")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(OptionalNumber)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value as f64))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value as f64))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(OptionalNumber)
}

/// Optional whole-cm³ volume from a number or numeric string. Negative values are rejected.
pub fn volume_from_json<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match number_from_json(deserializer)? {
        Some(volume) if !volume.is_finite() || volume < 0.0 => Err(de::Error::invalid_value(
            de::Unexpected::Float(volume),
            &"a non-negative volume",
        )),
        Some(volume) => Ok(Some(volume.round() as u64)),
        None => Ok(None),
    }
}

/// Optional amount kept in its two-decimal string form; numbers are formatted on the way in.
pub fn amount_from_json<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_from_json(deserializer)?.map(format_amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "number_from_json")]
        amount: Option<f64>,
    }

    fn probe(json: &str) -> Option<f64> {
        serde_json::from_str::<Probe>(json).unwrap().amount
    }

    #[test]
    fn test_format_amount_two_decimals() {
        assert_eq!(format_amount(8000.0), "8000.00");
        assert_eq!(format_amount(1234.567), "1234.57");
        assert_eq!(format_amount(-0.001), "0.00");
    }

    #[test]
    fn test_format_amount_stays_numeric() {
        assert_eq!(format_amount(f64::INFINITY), "1000000000000.00");
        assert_eq!(format_amount(f64::NEG_INFINITY), "-1000000000000.00");
        assert_eq!(format_amount(f64::NAN), "0.00");
        assert_eq!(format_amount(1e308 * 2.0), format_amount(MAX_AMOUNT));
        assert!(parse_amount(&format_amount(f64::INFINITY)).is_some());
    }

    #[test]
    fn test_number_from_json_accepts_mixed_inputs() {
        assert_eq!(probe(r#"{"amount": 12}"#), Some(12.0));
        assert_eq!(probe(r#"{"amount": 12.5}"#), Some(12.5));
        assert_eq!(probe(r#"{"amount": "3000.00"}"#), Some(3000.0));
        assert_eq!(probe(r#"{"amount": ""}"#), None);
        assert_eq!(probe(r#"{"amount": null}"#), None);
        assert_eq!(probe(r#"{}"#), None);
    }

    #[derive(Deserialize)]
    struct VolumeProbe {
        #[serde(default, deserialize_with = "volume_from_json")]
        volume: Option<u64>,
        #[serde(default, deserialize_with = "amount_from_json")]
        distance: Option<String>,
    }

    #[test]
    fn test_volume_and_amount_helpers() {
        let probe: VolumeProbe =
            serde_json::from_str(r#"{"volume": "1200.6", "distance": 12.4}"#).unwrap();
        assert_eq!(probe.volume, Some(1201));
        assert_eq!(probe.distance.as_deref(), Some("12.40"));
        assert!(serde_json::from_str::<VolumeProbe>(r#"{"volume": -4}"#).is_err());
    }

    #[test]
    fn test_number_from_json_rejects_garbage() {
        assert!(serde_json::from_str::<Probe>(r#"{"amount": "lots"}"#).is_err());
    }
}
