//! Health metric observations and the rules that validate them.
//!
//! An [`Entry`] is only ever built from input that passed every check in
//! this module: a `YYYY-MM-DD` calendar date, a non-blank metric name, and
//! a finite non-negative value.

use crate::error::{Result, TrackerError};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// The only accepted textual date layout.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single validated (date, metric, value) observation.
///
/// Fields are private so an entry cannot change after it is recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    date: NaiveDate,
    metric: String,
    value: f64,
}

impl Entry {
    /// Validate raw input in order (date, metric, value) and build an entry.
    pub(crate) fn validated<'v>(
        date: &str,
        metric: &str,
        value: impl Into<RawValue<'v>>,
    ) -> Result<Self> {
        let date = parse_date(date)?;
        validate_metric(metric)?;
        let value = value.into().to_measurement()?;

        Ok(Self {
            date,
            metric: metric.to_string(),
            value,
        })
    }

    /// Calendar date of the observation.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Metric name exactly as it was recorded.
    pub fn metric(&self) -> &str {
        &self.metric
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Date rendered as `YYYY-MM-DD`.
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}={}", self.date_string(), self.metric, self.value)
    }
}

/// A value as supplied by the caller, before validation.
///
/// Numbers are checked directly; text is parsed as a decimal number first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue<'a> {
    Number(f64),
    Text(&'a str),
}

impl RawValue<'_> {
    /// Convert to a finite, non-negative measurement.
    pub fn to_measurement(self) -> Result<f64> {
        let number = match self {
            RawValue::Number(n) => n,
            RawValue::Text(s) => s.trim().parse::<f64>().map_err(|_| self.rejected())?,
        };

        if !number.is_finite() || number < 0.0 {
            return Err(self.rejected());
        }

        // -0.0 passes the sign check; store it as 0.
        Ok(if number == 0.0 { 0.0 } else { number })
    }

    fn rejected(self) -> TrackerError {
        tracing::warn!(value = %self, "rejected value");
        TrackerError::InvalidValue {
            input: self.to_string(),
        }
    }
}

impl fmt::Display for RawValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Number(n) => write!(f, "{n}"),
            RawValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for RawValue<'_> {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<f32> for RawValue<'_> {
    fn from(value: f32) -> Self {
        RawValue::Number(f64::from(value))
    }
}

impl From<i32> for RawValue<'_> {
    fn from(value: i32) -> Self {
        RawValue::Number(f64::from(value))
    }
}

impl From<u32> for RawValue<'_> {
    fn from(value: u32) -> Self {
        RawValue::Number(f64::from(value))
    }
}

impl From<i64> for RawValue<'_> {
    fn from(value: i64) -> Self {
        RawValue::Number(value as f64)
    }
}

impl From<u64> for RawValue<'_> {
    fn from(value: u64) -> Self {
        RawValue::Number(value as f64)
    }
}

impl<'a> From<&'a str> for RawValue<'a> {
    fn from(value: &'a str) -> Self {
        RawValue::Text(value)
    }
}

impl<'a> From<&'a String> for RawValue<'a> {
    fn from(value: &'a String) -> Self {
        RawValue::Text(value.as_str())
    }
}

/// Parse a strict `YYYY-MM-DD` date.
///
/// chrono alone accepts single-digit months and days, so the shape is
/// checked before parsing.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let bytes = input.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    let parsed = if well_formed {
        NaiveDate::parse_from_str(input, DATE_FORMAT).ok()
    } else {
        None
    };

    parsed.ok_or_else(|| {
        tracing::warn!(date = input, "rejected date");
        TrackerError::InvalidDate {
            input: input.to_string(),
        }
    })
}

/// Check that a metric name is non-blank.
pub fn validate_metric(metric: &str) -> Result<()> {
    if metric.trim().is_empty() {
        tracing::warn!(metric, "rejected metric");
        return Err(TrackerError::InvalidMetric {
            input: metric.to_string(),
        });
    }
    Ok(())
}
