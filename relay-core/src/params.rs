//! Request parameter rendering
//!
//! Task request values arrive as dynamically typed JSON scalars but must be
//! sent to the API as plain query-string text. Numbers are rendered with six
//! fractional digits, then trailing zeros and a trailing decimal point are
//! stripped, so `3.140000` becomes `3.14` and `5.000000` becomes `5`.

use serde_json::Value;

/// Renders a task request value as query-string text
pub fn render_param(value: &Value) -> String {
    match value {
        Value::Number(n) => render_number(n),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn render_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    let rendered = format!("{:.6}", n.as_f64().unwrap_or_default());
    let rendered = rendered.trim_end_matches('0');
    rendered.trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strips_trailing_zeros() {
        assert_eq!(render_param(&json!(3.14)), "3.14");
        assert_eq!(render_param(&json!(1.5)), "1.5");
        assert_eq!(render_param(&json!(0.5)), "0.5");
    }

    #[test]
    fn test_strips_dangling_decimal_point() {
        assert_eq!(render_param(&json!(5.0)), "5");
        assert_eq!(render_param(&json!(120.0)), "120");
    }

    #[test]
    fn test_keeps_leading_zeros_intact() {
        // Stripping is trailing-only: 0.5 must not collapse to "5".
        assert_eq!(render_param(&json!(0.25)), "0.25");
        assert_eq!(render_param(&json!(100.0)), "100");
    }

    #[test]
    fn test_integers_render_without_fraction() {
        assert_eq!(render_param(&json!(1)), "1");
        assert_eq!(render_param(&json!(-42)), "-42");
        assert_eq!(render_param(&json!(0)), "0");
    }

    #[test]
    fn test_negative_floats() {
        assert_eq!(render_param(&json!(-2.5)), "-2.5");
    }

    #[test]
    fn test_values_below_rendering_precision_round_to_zero() {
        assert_eq!(render_param(&json!(1e-8)), "0");
    }

    #[test]
    fn test_strings_pass_through_verbatim() {
        assert_eq!(render_param(&json!("sw1.example.net")), "sw1.example.net");
        assert_eq!(render_param(&json!("")), "");
    }

    #[test]
    fn test_other_scalars() {
        assert_eq!(render_param(&json!(true)), "true");
        assert_eq!(render_param(&json!(null)), "");
    }
}
