//! Calendar helpers anchoring due-date triage to a single civil timezone.
//!
//! "Today" is computed in a configured IANA timezone rather than in server
//! local time or UTC, so a deployment in any region buckets tasks the same way.

use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::domain::types::TypeConstraintError;

/// Timezone used when none is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Toronto;

/// Wire format of calendar dates (`YYYY-MM-DD`, zero padded).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fallback returned when a date cannot be parsed or computed.
pub fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default()
}

/// Current civil date in `tz`.
pub fn today_in(tz: Tz) -> NaiveDate {
    today_at(Utc::now(), tz)
}

/// Civil date in `tz` at the instant `now`.
pub fn today_at(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Strictly parses a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, TypeConstraintError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| TypeConstraintError::InvalidDate(raw.to_string()))
}

/// Moves `date` by `days` calendar days (negative goes backwards).
///
/// Works on calendar components, so daylight-saving transitions never shift
/// the result. Out of range results degrade to [`epoch`].
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.unwrap_or_else(|| {
        log::warn!("Date arithmetic out of range: {date} + {days} days");
        epoch()
    })
}

/// Parses an IANA timezone name such as `America/Toronto`.
pub fn parse_timezone(name: &str) -> Result<Tz, TypeConstraintError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| TypeConstraintError::InvalidValue(format!("unknown timezone {name}")))
}
