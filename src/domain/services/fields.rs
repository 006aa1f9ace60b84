//! Ordered fallback lookup over loosely-typed API records
//!
//! The BDNS payloads use several names for the same concept depending on the
//! endpoint and the API version. Every read goes through `first_present`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

/// Placeholder shown when no field of a chain is present
pub const NOT_SPECIFIED: &str = "No especificado";

/// Placeholder for dates
pub const DATE_NOT_SPECIFIED: &str = "No especificada";

static SPANISH_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("static regex"));

/// A value counts as present when it is a non-empty string, a number or `true`
pub fn present_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// First present field of `fields`, in order
pub fn find_present(record: &Map<String, Value>, fields: &[&str]) -> Option<String> {
    fields
        .iter()
        .filter_map(|field| record.get(*field))
        .find_map(present_value)
}

/// First present field of `fields`, or `default`
pub fn first_present(record: &Map<String, Value>, fields: &[&str], default: &str) -> String {
    find_present(record, fields).unwrap_or_else(|| default.to_string())
}

/// Normalize API dates for display
///
/// `DD/MM/YYYY HH:mm:ss` keeps the date part, `YYYY-MM-DD` becomes `DD/MM/YYYY`,
/// anything else is shown verbatim.
pub fn format_fecha(raw: Option<&str>) -> String {
    let raw = match raw.map(str::trim) {
        Some(r) if !r.is_empty() => r,
        _ => return DATE_NOT_SPECIFIED.to_string(),
    };

    if let Some(first) = raw.split(' ').next() {
        if SPANISH_DATE.is_match(first) {
            return first.to_string();
        }
    }

    if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%d/%m/%Y").to_string();
    }

    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test record must be an object"),
        }
    }

    #[test]
    fn test_first_present_respects_order() {
        let r = record(json!({ "titulo": "B", "tituloConvocatoria": "A" }));
        assert_eq!(first_present(&r, &["tituloConvocatoria", "titulo"], "-"), "A");
        assert_eq!(first_present(&r, &["titulo", "tituloConvocatoria"], "-"), "B");
    }

    #[test]
    fn test_first_present_skips_empty_and_null() {
        let r = record(json!({ "BDNS": "", "idConvocatoria": null, "id": 42 }));
        assert_eq!(find_present(&r, &["BDNS", "idConvocatoria", "id"]), Some("42".to_string()));
    }

    #[test]
    fn test_first_present_default() {
        let r = record(json!({ "other": "x" }));
        assert_eq!(first_present(&r, &["organo"], NOT_SPECIFIED), "No especificado");
        assert_eq!(find_present(&r, &[]), None);
    }

    #[test]
    fn test_format_fecha_keeps_spanish_date() {
        assert_eq!(format_fecha(Some("05/03/2024 10:00:00")), "05/03/2024");
        assert_eq!(format_fecha(Some("05/03/2024")), "05/03/2024");
    }

    #[test]
    fn test_format_fecha_converts_iso_date() {
        assert_eq!(format_fecha(Some("2024-03-05")), "05/03/2024");
    }

    #[test]
    fn test_format_fecha_fallbacks() {
        assert_eq!(format_fecha(None), "No especificada");
        assert_eq!(format_fecha(Some("  ")), "No especificada");
        assert_eq!(format_fecha(Some("2024-03-05T10:00:00Z")), "2024-03-05T10:00:00Z");
    }
}
