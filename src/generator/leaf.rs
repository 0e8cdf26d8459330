//! Assertion lines for leaf values.

use super::literal;
use super::options::{Options, RelativeDates, DEFAULT_PRECISION};
use crate::value::shape::{Number, Scalar};
use chrono::NaiveDate;
use rust_decimal::RoundingStrategy;
use std::cmp::Ordering;

/// Formats the single assertion for a leaf at `accessor`.
///
/// Precedence: absent, true, false, timestamp, date, float/decimal, then
/// literal equality for everything else.
pub fn assertion(scalar: Scalar<'_>, accessor: &str, options: &Options) -> String {
    match scalar {
        Scalar::Null => format!("assert_nil {}", accessor),
        Scalar::Bool(true) => format!("assert {}", accessor),
        Scalar::Bool(false) => format!("refute {}", accessor),
        Scalar::DateTime(dt) => match &options.relative_dates {
            Some(anchor) => relative_date(dt.date_naive(), anchor, accessor),
            None => format!("assert_equal {}, {}", literal::datetime(dt), accessor),
        },
        Scalar::Date(d) => match &options.relative_dates {
            Some(anchor) => relative_date(d, anchor, accessor),
            None => format!("assert_equal {}, {}", literal::date(d), accessor),
        },
        Scalar::Number(number) => number_assertion(number, accessor, options.precision),
        Scalar::Other(value) => format!("assert_equal {}, {}", literal::value(value), accessor),
    }
}

fn relative_date(date: NaiveDate, anchor: &RelativeDates, accessor: &str) -> String {
    let diff = date.signed_duration_since(anchor.today).num_days();
    match diff.cmp(&0) {
        Ordering::Equal => format!("assert_equal {}, {}", anchor.expr, accessor),
        Ordering::Greater => format!("assert_equal {} + {}.days, {}", anchor.expr, diff, accessor),
        Ordering::Less => format!(
            "assert_equal {} - {}.days, {}",
            anchor.expr,
            diff.unsigned_abs(),
            accessor
        ),
    }
}

fn number_assertion(number: Number<'_>, accessor: &str, precision: Option<u32>) -> String {
    let Some(precision) = precision else {
        let exact = match number {
            Number::Float(f) => literal::float(f),
            Number::Decimal(d) => literal::decimal(d),
        };
        return format!("assert_equal {}, {}", exact, accessor);
    };

    let rounded = match number {
        Number::Float(f) => literal::float(literal::round_float(f, precision)),
        Number::Decimal(d) => literal::decimal(
            &d.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero),
        ),
    };
    if precision == DEFAULT_PRECISION {
        format!("assert_equal_d {}, {}", rounded, accessor)
    } else {
        format!("assert_equal_d {}, {}, {}", rounded, precision, accessor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::node::Value;
    use chrono::DateTime;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn anchored(today: NaiveDate) -> Options {
        Options {
            relative_dates: Some(RelativeDates::new("Date.today", today)),
            ..Options::default()
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_booleans_and_null() {
        let options = Options::default();
        assert_eq!(assertion(Scalar::Null, "h[:n]", &options), "assert_nil h[:n]");
        assert_eq!(assertion(Scalar::Bool(true), "h[:t]", &options), "assert h[:t]");
        assert_eq!(assertion(Scalar::Bool(false), "h[:f]", &options), "refute h[:f]");
    }

    #[test]
    fn test_relative_dates() {
        let options = anchored(date(2024, 2, 20));
        assert_eq!(
            assertion(Scalar::Date(date(2024, 2, 20)), "date", &options),
            "assert_equal Date.today, date"
        );
        assert_eq!(
            assertion(Scalar::Date(date(2024, 3, 6)), "date", &options),
            "assert_equal Date.today + 15.days, date"
        );
        assert_eq!(
            assertion(Scalar::Date(date(2024, 2, 17)), "date", &options),
            "assert_equal Date.today - 3.days, date"
        );
    }

    #[test]
    fn test_datetime_uses_its_own_calendar_date_when_anchored() {
        let options = anchored(date(2024, 2, 20));
        let dt = DateTime::parse_from_rfc3339("2024-02-21T01:30:00+09:00").unwrap();
        assert_eq!(
            assertion(Scalar::DateTime(&dt), "at", &options),
            "assert_equal Date.today + 1.days, at"
        );
    }

    #[test]
    fn test_float_precision() {
        let default = Options::default();
        assert_eq!(
            assertion(Scalar::Number(Number::Float(1.234)), "x", &default),
            "assert_equal_d 1.23, x"
        );

        let three = Options {
            precision: Some(3),
            ..Options::default()
        };
        assert_eq!(
            assertion(Scalar::Number(Number::Float(1.23456)), "x", &three),
            "assert_equal_d 1.235, 3, x"
        );

        let exact = Options {
            precision: None,
            ..Options::default()
        };
        assert_eq!(
            assertion(Scalar::Number(Number::Float(1.23456)), "x", &exact),
            "assert_equal 1.23456, x"
        );
    }

    #[test]
    fn test_decimal_precision() {
        let d = Decimal::from_str("10.4567").unwrap();
        assert_eq!(
            assertion(Scalar::Number(Number::Decimal(&d)), "total", &Options::default()),
            "assert_equal_d 10.46, total"
        );
        let exact = Options {
            precision: None,
            ..Options::default()
        };
        assert_eq!(
            assertion(Scalar::Number(Number::Decimal(&d)), "total", &exact),
            "assert_equal 10.4567, total"
        );
    }

    #[test]
    fn test_other_values_use_literals() {
        let options = Options::default();
        let s = Value::from("Hello");
        assert_eq!(
            assertion(Scalar::Other(&s), "h[:s]", &options),
            "assert_equal \"Hello\", h[:s]"
        );
        let i = Value::Integer(100);
        assert_eq!(
            assertion(Scalar::Other(&i), "h[:a]", &options),
            "assert_equal 100, h[:a]"
        );
    }
}
