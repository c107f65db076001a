//! Tolerant typed extraction from a `serde_json::Value` parameter object.
//!
//! A missing key or a value of the wrong type yields the caller's default.
//! Range checking is left to [`FieldConfig::validate`](crate::config::FieldConfig::validate).

use serde_json::Value;

/// Extracts an `f64` from `params[name]`; integers are accepted.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a non-negative integer from `params[name]`.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// Extracts a string from `params[name]`.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_f64_accepts_integers() {
        let params = json!({"size_min": 3});
        assert_eq!(param_f64(&params, "size_min", 4.0), 3.0);
    }

    #[test]
    fn param_f64_falls_back_on_wrong_type() {
        let params = json!({"spin_max": "fast"});
        assert_eq!(param_f64(&params, "spin_max", 0.05), 0.05);
    }

    #[test]
    fn param_f64_falls_back_for_non_object() {
        assert_eq!(param_f64(&json!([1, 2]), "vy_min", 2.0), 2.0);
    }

    #[test]
    fn param_usize_extracts_count() {
        let params = json!({"particle_count": 300});
        assert_eq!(param_usize(&params, "particle_count", 150), 300);
    }

    #[test]
    fn param_usize_rejects_negative_and_fractional() {
        assert_eq!(param_usize(&json!({"n": -1}), "n", 7), 7);
        assert_eq!(param_usize(&json!({"n": 2.5}), "n", 7), 7);
    }

    #[test]
    fn param_string_extracts_and_falls_back() {
        let params = json!({"palette": "party", "other": 1});
        assert_eq!(param_string(&params, "palette", "confetti"), "party");
        assert_eq!(param_string(&params, "other", "confetti"), "confetti");
        assert_eq!(param_string(&params, "missing", "confetti"), "confetti");
    }
}
