//! Validation of strings that carry a timestamp.

use chrono::{DateTime, NaiveDateTime, Utc};

use super::errors;
use super::field::Field;

/// Accepted textual layouts for time strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeLayout {
    /// Device-local wall clock time without any offset, e.g.
    /// `2016-05-04T08:18:06`. Fractional seconds are accepted; a trailing
    /// `Z` or numeric offset is not.
    Naive,
    /// Full RFC 3339 timestamp with offset, e.g. `2016-05-04T15:18:06Z`.
    Rfc3339,
}

impl TimeLayout {
    /// The layout as shown in error details.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Naive => "%Y-%m-%dT%H:%M:%S",
            Self::Rfc3339 => "%Y-%m-%dT%H:%M:%S%:z",
        }
    }

    /// Parse a string in this layout. Naive times are taken as UTC so they
    /// can be compared with offset-qualified bounds.
    pub fn parse(&self, value: &str) -> Option<DateTime<Utc>> {
        match self {
            Self::Naive => NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc()),
            Self::Rfc3339 => DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|time| time.with_timezone(&Utc)),
        }
    }

    /// Format a bound for an error detail.
    pub fn format(&self, time: &DateTime<Utc>) -> String {
        match self {
            Self::Naive => time.naive_utc().format("%Y-%m-%dT%H:%M:%S").to_string(),
            Self::Rfc3339 => time.to_rfc3339(),
        }
    }
}

impl std::fmt::Display for TimeLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constraint chain over an optional time string.
///
/// The string is parsed when the chain is created; a present string that
/// does not match the layout is reported right away and fails the chain.
#[derive(Debug, Clone)]
pub struct TimeChain<'s, 'v> {
    field: Field<'s>,
    value: Option<&'v str>,
    time: Option<DateTime<Utc>>,
    layout: TimeLayout,
}

impl<'s, 'v> TimeChain<'s, 'v> {
    pub(crate) fn new(mut field: Field<'s>, value: Option<&'v str>, layout: TimeLayout) -> Self {
        let time = value.and_then(|v| {
            let time = layout.parse(v);
            if time.is_none() {
                field.fail(errors::time_not_valid(v, layout.as_str()));
            }
            time
        });
        Self {
            field,
            value,
            time,
            layout,
        }
    }

    /// The parsed time, when the string was present and valid.
    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.time
    }

    pub fn failed(&self) -> bool {
        self.field.failed()
    }

    fn when(
        mut self,
        ok: impl FnOnce(DateTime<Utc>) -> bool,
        detail: impl FnOnce(&str) -> crate::context::ErrorDetail,
    ) -> Self {
        if let (Some(time), Some(value)) = (self.time, self.value) {
            let passes = ok(time);
            self.field.check(passes, || detail(value));
        }
        self
    }

    pub fn exists(mut self) -> Self {
        self.field.check(self.value.is_some(), errors::value_not_exists);
        self
    }

    pub fn not_exists(mut self) -> Self {
        self.field.check(self.value.is_none(), errors::value_exists);
        self
    }

    pub fn after(self, limit: DateTime<Utc>) -> Self {
        let bound = self.layout.format(&limit);
        self.when(|t| t > limit, |v| errors::time_not_after(v, &bound))
    }

    pub fn after_now(self) -> Self {
        self.when(|t| t > Utc::now(), errors::time_not_after_now)
    }

    pub fn before(self, limit: DateTime<Utc>) -> Self {
        let bound = self.layout.format(&limit);
        self.when(|t| t < limit, |v| errors::time_not_before(v, &bound))
    }

    pub fn before_now(self) -> Self {
        self.when(|t| t < Utc::now(), errors::time_not_before_now)
    }
}
