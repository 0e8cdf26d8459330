//! Source literals for observed values.
//!
//! Renders values the way the target test language prints them, so that a
//! generated `assert_equal <literal>, <expr>` reads back as the same value.

use super::accessor::key_literal;
use crate::value::node::Value;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Timelike};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Renders any value as a literal.
///
/// # Example
///
/// ```
/// use assertgen::generator::literal::value;
/// use assertgen::value::node::Value;
///
/// assert_eq!(value(&Value::from("Hello")), "\"Hello\"");
/// assert_eq!(value(&Value::Integer(100)), "100");
/// assert_eq!(value(&Value::Symbol("ok".into())), ":ok");
/// ```
pub fn value(v: &Value) -> String {
    match v {
        Value::Null => "nil".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => float(*f),
        Value::Decimal(d) => decimal(d),
        Value::String(s) => string(s),
        Value::Symbol(s) => symbol(s),
        Value::Date(d) => date(*d),
        Value::DateTime(dt) => datetime(dt),
        Value::Sequence(items) | Value::Set(items) => {
            let parts: Vec<String> = items.iter().map(value).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Mapping(map) => {
            let parts: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{} => {}", key_literal(k), value(v)))
                .collect();
            format!("{{{}}}", parts.join(", "))
        }
        Value::Record(record) => {
            let parts: Vec<String> = record
                .fields()
                .iter()
                .map(|(name, v)| format!("{} => {}", symbol(name), value(v)))
                .collect();
            format!("{{{}}}", parts.join(", "))
        }
        Value::Range { first, last } => format!("({}..{})", value(first), value(last)),
    }
}

/// Double-quoted string with escapes.
pub fn string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\u{0C}' => out.push_str("\\f"),
            '\u{0B}' => out.push_str("\\v"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{1B}' => out.push_str("\\e"),
            // `#{`, `#$` and `#@` would interpolate inside double quotes
            '#' if matches!(chars.peek(), Some('{' | '$' | '@')) => out.push_str("\\#"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Symbol literal: `:name` for bare words, `:"..."` otherwise.
pub fn symbol(name: &str) -> String {
    if is_bare_word(name) {
        format!(":{}", name)
    } else {
        format!(":{}", string(name))
    }
}

/// Whether `name` can follow a `.` as a plain method call.
///
/// Setter-style names (`name=`) only parse as assignments, so they are
/// excluded.
pub fn is_method_name(name: &str) -> bool {
    !name.ends_with('=') && is_bare_word(name)
}

fn is_bare_word(name: &str) -> bool {
    let body = name
        .strip_suffix(['?', '!', '='])
        .unwrap_or(name);
    let mut chars = body.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Float literal using the shortest digits that read back as the same value.
///
/// Integral values keep a `.0` suffix; very large and very small magnitudes
/// use exponent form (`1.0e+20`, `1.0e-05`).
pub fn float(v: f64) -> String {
    if v.is_nan() {
        return "Float::NAN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 {
            "Float::INFINITY".to_string()
        } else {
            "-Float::INFINITY".to_string()
        };
    }
    if v == 0.0 {
        return if v.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let sci = format!("{:e}", v);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if (-4..16).contains(&exp) {
        let plain = v.to_string();
        if plain.contains('.') {
            plain
        } else {
            format!("{}.0", plain)
        }
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        if mantissa.contains('.') {
            format!("{}e{}{:02}", mantissa, sign, exp.abs())
        } else {
            format!("{}.0e{}{:02}", mantissa, sign, exp.abs())
        }
    }
}

pub fn decimal(d: &Decimal) -> String {
    d.to_string()
}

pub fn date(d: NaiveDate) -> String {
    format!("Date.new({}, {}, {})", d.year(), d.month(), d.day())
}

/// Timestamp literal down to whole seconds, with the zone offset as `'+HH:MM'`.
pub fn datetime(dt: &DateTime<FixedOffset>) -> String {
    format!(
        "DateTime.new({}, {}, {}, {}, {}, {}, '{}')",
        dt.year(),
        dt.month(),
        dt.day(),
        dt.hour(),
        dt.minute(),
        dt.second(),
        dt.offset()
    )
}

/// Rounds half away from zero to `precision` decimal places.
///
/// Rounding works on the shortest decimal form of `v`, so `0.285` rounds to
/// `0.29` even though its binary value sits just below the midpoint. Returns
/// the value unchanged when precision is above 15 or when `v` has no decimal
/// form (non-finite or out of range).
pub fn round_float(v: f64, precision: u32) -> f64 {
    if precision > 15 || !v.is_finite() {
        return v;
    }
    match Decimal::from_str(&v.to_string()) {
        Ok(d) => d
            .round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
            .to_string()
            .parse::<f64>()
            .unwrap_or(v),
        Err(_) => v,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn test_string_escapes() {
        assert_eq!(string("Hello"), "\"Hello\"");
        assert_eq!(string("(2 + 3) = 5"), "\"(2 + 3) = 5\"");
        assert_eq!(string("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(string("a\\b"), "\"a\\\\b\"");
        assert_eq!(string("line\nnext\t!"), "\"line\\nnext\\t!\"");
        assert_eq!(string("\u{1}"), "\"\\u0001\"");
        assert_eq!(string("#{x} #$y #@z #ok"), "\"\\#{x} \\#$y \\#@z #ok\"");
        assert_eq!(string("héllo"), "\"héllo\"");
    }

    #[test]
    fn test_symbols() {
        assert_eq!(symbol("name"), ":name");
        assert_eq!(symbol("_private"), ":_private");
        assert_eq!(symbol("valid?"), ":valid?");
        assert_eq!(symbol("save!"), ":save!");
        assert_eq!(symbol("two words"), ":\"two words\"");
        assert_eq!(symbol("9lives"), ":\"9lives\"");
        assert_eq!(symbol(""), ":\"\"");
    }

    #[test]
    fn test_floats() {
        assert_eq!(float(1.234), "1.234");
        assert_eq!(float(1.0), "1.0");
        assert_eq!(float(-2.5), "-2.5");
        assert_eq!(float(100.0), "100.0");
        assert_eq!(float(0.0001), "0.0001");
        assert_eq!(float(0.00001), "1.0e-05");
        assert_eq!(float(1e15), "1000000000000000.0");
        assert_eq!(float(1e20), "1.0e+20");
        assert_eq!(float(1.5e300), "1.5e+300");
        assert_eq!(float(0.0), "0.0");
        assert_eq!(float(f64::NAN), "Float::NAN");
        assert_eq!(float(f64::NEG_INFINITY), "-Float::INFINITY");
    }

    #[test]
    fn test_round_float() {
        assert_eq!(round_float(1.234, 2), 1.23);
        assert_eq!(round_float(1.235_000_1, 2), 1.24);
        assert_eq!(round_float(-1.5, 0), -2.0);
        assert_eq!(round_float(2.0, 3), 2.0);
        assert_eq!(round_float(1.234, 40), 1.234);
        assert_eq!(round_float(f64::MAX, 10), f64::MAX);
        assert_eq!(round_float(0.285, 2), 0.29);
        assert_eq!(round_float(-0.285, 2), -0.29);
        assert_eq!(round_float(1.005, 2), 1.01);
        assert_eq!(round_float(f64::INFINITY, 2), f64::INFINITY);
    }

    #[test]
    fn test_dates() {
        let d = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        assert_eq!(date(d), "Date.new(2019, 1, 1)");

        let dt = DateTime::parse_from_rfc3339("2018-03-01T17:00:00+00:00").unwrap();
        assert_eq!(datetime(&dt), "DateTime.new(2018, 3, 1, 17, 0, 0, '+00:00')");

        let dt = DateTime::parse_from_rfc3339("2020-12-31T23:59:58.75-05:30").unwrap();
        assert_eq!(
            datetime(&dt),
            "DateTime.new(2020, 12, 31, 23, 59, 58, '-05:30')"
        );
    }

    #[test]
    fn test_container_literals() {
        let mut map = IndexMap::new();
        map.insert(crate::value::node::Key::symbol("a"), Value::Integer(1));
        map.insert(crate::value::node::Key::string("b"), Value::Null);
        assert_eq!(value(&Value::Mapping(map)), "{:a => 1, 'b' => nil}");
        assert_eq!(
            value(&Value::Sequence(vec![Value::Bool(true), Value::Float(0.5)])),
            "[true, 0.5]"
        );
        assert_eq!(value(&Value::range(1_i64, 4_i64)), "(1..4)");
        assert_eq!(
            value(&Value::Decimal(Decimal::from_str("1.50").unwrap())),
            "1.50"
        );
    }
}
