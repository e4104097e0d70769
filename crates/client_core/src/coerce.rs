use serde_json::Value;
use shared::protocol::plain_number;

/// `Number(x || 0)`: falsy and non-numeric input becomes 0.
pub fn number(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => numeric_string(s),
        Some(Value::Bool(true)) => 1.0,
        _ => 0.0,
    };
    if parsed.is_finite() {
        parsed
    } else {
        0.0
    }
}

/// Like [`number`] but never below zero.
pub fn non_negative(value: Option<&Value>) -> f64 {
    number(value).max(0.0)
}

/// Truncates toward zero; negatives and garbage become 0.
pub fn whole_number(value: Option<&Value>) -> u32 {
    let n = number(value).trunc();
    if n <= 0.0 {
        0
    } else if n >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        n as u32
    }
}

/// JavaScript truthiness.
pub fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// `x || fallback` for display strings: only non-empty text and non-zero
/// numbers produce a label.
pub fn display_text(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => n
            .as_f64()
            .filter(|f| *f != 0.0 && f.is_finite())
            .map(plain_number),
        _ => None,
    }
}

/// `Number("...")` on a string: surrounding whitespace is ignored, the empty
/// string is 0, anything that is not entirely a number is 0.
fn numeric_string(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match parse_float_prefix(trimmed) {
        Some((value, consumed)) if consumed == trimmed.len() => value,
        _ => 0.0,
    }
}

/// `parseFloat`: the longest numeric prefix after leading whitespace, or
/// `None` when there is none.
pub fn parse_float(input: &str) -> Option<f64> {
    parse_float_prefix(input.trim_start()).map(|(value, _)| value)
}

fn parse_float_prefix(s: &str) -> Option<(f64, usize)> {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        let consumed = end + "Infinity".len();
        let value = if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        return Some((value, consumed));
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
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

    s[..end].parse::<f64>().ok().map(|value| (value, end))
}

#[cfg(test)]
#[path = "tests/coerce_tests.rs"]
mod tests;
