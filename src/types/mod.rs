//! Conversion of typed values into property values.
//!
//! A [`Value`] knows its RFC 5545 value type and how it is written. Dates, durations
//! and offsets come out as [`PropertyValue::Formatted`], strings as
//! [`PropertyValue::Text`] so that they get escaped.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use derive_more::{Display, From};
use std::fmt::Write;

use crate::property::PropertyValue;

pub trait Value {
    /// Value type as used in the `VALUE` parameter, e.g. `DATE-TIME`.
    fn value_type(&self) -> &'static str;

    fn value(&self) -> PropertyValue;

    /// Snapshot of the value to be staged on a component.
    fn to_typed(&self) -> TypedValue {
        TypedValue {
            value_type: self.value_type(),
            value: self.value(),
        }
    }
}

/// A value with its type, already converted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypedValue {
    pub value_type: &'static str,
    pub value: PropertyValue,
}

impl Value for TypedValue {
    fn value_type(&self) -> &'static str {
        self.value_type
    }

    fn value(&self) -> PropertyValue {
        self.value.clone()
    }
}

impl<V: Value + ?Sized> Value for &V {
    fn value_type(&self) -> &'static str {
        (**self).value_type()
    }

    fn value(&self) -> PropertyValue {
        (**self).value()
    }
}

impl Value for str {
    fn value_type(&self) -> &'static str {
        "TEXT"
    }

    fn value(&self) -> PropertyValue {
        PropertyValue::Text(self.to_owned())
    }
}

impl Value for String {
    fn value_type(&self) -> &'static str {
        "TEXT"
    }

    fn value(&self) -> PropertyValue {
        PropertyValue::Text(self.clone())
    }
}

impl Value for u32 {
    fn value_type(&self) -> &'static str {
        "INTEGER"
    }

    fn value(&self) -> PropertyValue {
        PropertyValue::Formatted(self.to_string())
    }
}

impl Value for NaiveDate {
    fn value_type(&self) -> &'static str {
        "DATE"
    }

    fn value(&self) -> PropertyValue {
        PropertyValue::Formatted(self.format("%Y%m%d").to_string())
    }
}

/// Floating (local) time
impl Value for NaiveDateTime {
    fn value_type(&self) -> &'static str {
        "DATE-TIME"
    }

    fn value(&self) -> PropertyValue {
        PropertyValue::Formatted(self.format("%Y%m%dT%H%M%S").to_string())
    }
}

impl Value for DateTime<Utc> {
    fn value_type(&self) -> &'static str {
        "DATE-TIME"
    }

    fn value(&self) -> PropertyValue {
        PropertyValue::Formatted(self.format("%Y%m%dT%H%M%SZ").to_string())
    }
}

impl Value for Duration {
    fn value_type(&self) -> &'static str {
        "DURATION"
    }

    fn value(&self) -> PropertyValue {
        PropertyValue::Formatted(format_duration(self))
    }
}

impl Value for FixedOffset {
    fn value_type(&self) -> &'static str {
        "UTC-OFFSET"
    }

    fn value(&self) -> PropertyValue {
        PropertyValue::Formatted(format_utc_offset(self))
    }
}

/// A URI, written without escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From)]
pub struct Uri(pub String);

impl Value for Uri {
    fn value_type(&self) -> &'static str {
        "URI"
    }

    fn value(&self) -> PropertyValue {
        PropertyValue::Formatted(self.0.clone())
    }
}

/// An already formatted recurrence rule, e.g. `FREQ=YEARLY;BYMONTH=10;BYDAY=-1SU`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From)]
pub struct Recurrence(pub String);

impl Value for Recurrence {
    fn value_type(&self) -> &'static str {
        "RECUR"
    }

    fn value(&self) -> PropertyValue {
        PropertyValue::Formatted(self.0.clone())
    }
}

/// Format as `dur-value`. Whole weeks use the week form, sub-second precision is
/// dropped.
pub fn format_duration(duration: &Duration) -> String {
    let seconds = duration.num_seconds().unsigned_abs();
    if seconds == 0 {
        return "PT0S".to_owned();
    }

    let mut out = String::new();
    if duration.num_seconds() < 0 {
        out.push('-');
    }
    out.push('P');

    if seconds % (7 * 86400) == 0 {
        let _ = write!(out, "{}W", seconds / (7 * 86400));
        return out;
    }

    let days = seconds / 86400;
    let hours = seconds % 86400 / 3600;
    let minutes = seconds % 3600 / 60;
    let seconds = seconds % 60;

    if days > 0 {
        let _ = write!(out, "{days}D");
    }
    if hours > 0 || minutes > 0 || seconds > 0 {
        out.push('T');
        if hours > 0 {
            let _ = write!(out, "{hours}H");
        }
        // dur-hour may only be followed by dur-minute
        if minutes > 0 || (hours > 0 && seconds > 0) {
            let _ = write!(out, "{minutes}M");
        }
        if seconds > 0 {
            let _ = write!(out, "{seconds}S");
        }
    }
    out
}

pub fn format_utc_offset(offset: &FixedOffset) -> String {
    let total = offset.local_minus_utc();
    let sign = if total < 0 { '-' } else { '+' };
    let total = total.unsigned_abs();
    let (hours, minutes, seconds) = (total / 3600, total % 3600 / 60, total % 60);
    if seconds == 0 {
        format!("{sign}{hours:02}{minutes:02}")
    } else {
        format!("{sign}{hours:02}{minutes:02}{seconds:02}")
    }
}
