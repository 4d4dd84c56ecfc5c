use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::NewSession;

/// A numeric form field that may arrive as a JSON number or as raw text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Session fields as entered by the user, before coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInput {
    pub date: NaiveDate,
    pub model: String,
    pub tokens_in: Option<NumericInput>,
    pub tokens_out: Option<NumericInput>,
    pub cost_usd: Option<NumericInput>,
    pub label: Option<String>,
    pub session_id: Option<String>,
}

impl SessionInput {
    pub fn into_new_session(self) -> NewSession {
        NewSession {
            date: self.date,
            model: self.model,
            tokens_in: coerce_tokens(self.tokens_in.as_ref()),
            tokens_out: coerce_tokens(self.tokens_out.as_ref()),
            cost_usd: coerce_cost(self.cost_usd.as_ref()),
            label: non_blank(self.label),
            session_id: non_blank(self.session_id),
        }
    }
}

/// Largest token count a store can hold (SQLite integers are signed 64-bit).
pub const MAX_TOKENS: u64 = i64::MAX as u64;

/// Integer coercion: leading integer prefix of text, truncation of numbers.
/// Anything unparsable or negative becomes 0; large values saturate at
/// [`MAX_TOKENS`].
pub fn coerce_tokens(input: Option<&NumericInput>) -> u64 {
    match input {
        Some(NumericInput::Number(value)) if value.is_finite() && *value > 0.0 => {
            (value.trunc() as u64).min(MAX_TOKENS)
        }
        Some(NumericInput::Text(text)) => leading_integer(text)
            .and_then(|value| u64::try_from(value).ok())
            .unwrap_or(0),
        _ => 0,
    }
}

/// Decimal coercion: leading decimal prefix of text. Anything unparsable,
/// non-finite or negative becomes 0.
pub fn coerce_cost(input: Option<&NumericInput>) -> f64 {
    let value = match input {
        Some(NumericInput::Number(value)) => *value,
        Some(NumericInput::Text(text)) => leading_decimal(text).unwrap_or(0.0),
        None => 0.0,
    };
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    text[..end].parse::<i64>().ok()
}

fn leading_decimal(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - (end + 1);
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    text[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Option<NumericInput> {
        Some(NumericInput::from(value))
    }

    #[test]
    fn coerce_tokens_reads_leading_integer() {
        assert_eq!(coerce_tokens(text("12abc").as_ref()), 12);
        assert_eq!(coerce_tokens(text(" 1500 ").as_ref()), 1500);
        assert_eq!(coerce_tokens(text("1.9").as_ref()), 1);
        assert_eq!(coerce_tokens(text("abc").as_ref()), 0);
        assert_eq!(coerce_tokens(text("").as_ref()), 0);
        assert_eq!(coerce_tokens(text("-3").as_ref()), 0);
        assert_eq!(coerce_tokens(Some(&NumericInput::Number(42.7))), 42);
        assert_eq!(coerce_tokens(None), 0);
    }

    #[test]
    fn coerce_tokens_saturates_at_store_limit() {
        assert_eq!(coerce_tokens(Some(&NumericInput::Number(1e19))), MAX_TOKENS);
        assert_eq!(coerce_tokens(Some(&NumericInput::Number(f64::MAX))), MAX_TOKENS);
        assert_eq!(
            coerce_tokens(text("9223372036854775807").as_ref()),
            MAX_TOKENS
        );
    }

    #[test]
    fn coerce_cost_reads_leading_decimal() {
        assert_eq!(coerce_cost(text("0.25usd").as_ref()), 0.25);
        assert_eq!(coerce_cost(text(".5").as_ref()), 0.5);
        assert_eq!(coerce_cost(text("3.").as_ref()), 3.0);
        assert_eq!(coerce_cost(text("1e2").as_ref()), 100.0);
        assert_eq!(coerce_cost(text("2e").as_ref()), 2.0);
        assert_eq!(coerce_cost(text("free").as_ref()), 0.0);
        assert_eq!(coerce_cost(text(".").as_ref()), 0.0);
        assert_eq!(coerce_cost(text("-4").as_ref()), 0.0);
        assert_eq!(coerce_cost(Some(&NumericInput::Number(f64::NAN))), 0.0);
        assert_eq!(coerce_cost(Some(&NumericInput::Number(1.75))), 1.75);
    }

    #[test]
    fn session_input_drops_blank_label() {
        let input = SessionInput {
            date: NaiveDate::from_ymd_opt(2024, 3, 15).expect("date"),
            model: "opus".to_string(),
            tokens_in: text("100"),
            tokens_out: None,
            cost_usd: text("1.5"),
            label: Some("   ".to_string()),
            session_id: None,
        };
        let session = input.into_new_session();
        assert_eq!(session.tokens_in, 100);
        assert_eq!(session.tokens_out, 0);
        assert_eq!(session.cost_usd, 1.5);
        assert_eq!(session.label, None);
    }

    #[test]
    fn numeric_input_accepts_numbers_and_text() {
        let parsed: Vec<NumericInput> =
            serde_json::from_str(r#"[12, "7.5", 0.25]"#).expect("parse");
        assert_eq!(
            parsed,
            vec![
                NumericInput::Number(12.0),
                NumericInput::Text("7.5".to_string()),
                NumericInput::Number(0.25),
            ]
        );
    }
}
