//! Helpers for extracting typed parameters from a `serde_json::Value` object.
//!
//! A missing key, or a value of the wrong JSON type, yields the default.
//! Only [`param_color`] can fail, when a string is present but does not
//! parse as a color.

use serde_json::Value;

use crate::color::Srgb;
use crate::error::EffectError;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// JSON integers are accepted and converted.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing or wrong type.
///
/// Only non-negative integers are accepted.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// Extracts a `String` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

/// Extracts a hex color from `params[name]`.
///
/// Missing or non-string values yield `default`; a string that is not a
/// valid `#rrggbb` color is an `EffectError::InvalidColor`.
pub fn param_color(params: &Value, name: &str, default: Srgb) -> Result<Srgb, EffectError> {
    match params.get(name).and_then(Value::as_str) {
        Some(hex) => Srgb::from_hex(hex),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_f64_extracts_float_and_integer() {
        let params = json!({"speed": 2.5, "count": 10});
        assert_eq!(param_f64(&params, "speed", 1.0), 2.5);
        assert_eq!(param_f64(&params, "count", 0.0), 10.0);
    }

    #[test]
    fn param_f64_falls_back_on_missing_wrong_type_and_null() {
        let params = json!({"speed": "fast", "gone": null});
        assert_eq!(param_f64(&params, "speed", 1.0), 1.0);
        assert_eq!(param_f64(&params, "gone", 5.0), 5.0);
        assert_eq!(param_f64(&params, "absent", 3.0), 3.0);
        assert_eq!(param_f64(&json!("not an object"), "speed", 7.0), 7.0);
    }

    #[test]
    fn param_usize_extracts_non_negative_integers_only() {
        let params = json!({"count": 42, "frac": 2.5, "neg": -1, "word": "many"});
        assert_eq!(param_usize(&params, "count", 0), 42);
        assert_eq!(param_usize(&params, "frac", 99), 99);
        assert_eq!(param_usize(&params, "neg", 5), 5);
        assert_eq!(param_usize(&params, "word", 8), 8);
    }

    #[test]
    fn param_string_extracts_or_defaults() {
        let params = json!({"name": "ember", "num": 42, "empty": ""});
        assert_eq!(param_string(&params, "name", "x"), "ember");
        assert_eq!(param_string(&params, "num", "fallback"), "fallback");
        assert_eq!(param_string(&params, "empty", "default"), "");
    }

    #[test]
    fn param_color_parses_hex() {
        let params = json!({"color": "#ffffff"});
        assert_eq!(param_color(&params, "color", Srgb::BLACK).unwrap(), Srgb::WHITE);
    }

    #[test]
    fn param_color_defaults_when_missing_or_not_a_string() {
        assert_eq!(
            param_color(&json!({}), "color", Srgb::BLACK).unwrap(),
            Srgb::BLACK
        );
        assert_eq!(
            param_color(&json!({"color": 3}), "color", Srgb::WHITE).unwrap(),
            Srgb::WHITE
        );
    }

    #[test]
    fn param_color_rejects_malformed_string() {
        let params = json!({"color": "#12"});
        assert!(matches!(
            param_color(&params, "color", Srgb::BLACK),
            Err(EffectError::InvalidColor(_))
        ));
    }
}
