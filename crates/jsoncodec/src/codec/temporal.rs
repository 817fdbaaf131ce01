//! Codecs for identifiers and date/time types, all JSON strings.
//!
//! Formats are culture-invariant and chosen to round-trip: hyphenated UUID,
//! RFC 3339 for offset-carrying timestamps, ISO-8601 for naive date, time
//! and datetime, and the invariant `[-][d:]h:mm:ss[.fffffff]` general form
//! for durations (fractional part in 100 ns steps, trailing zeros trimmed).

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use uuid::Uuid;

use crate::{
    codec::ValueCodec, error::CodecError, reader::TokenCursor, token::TokenType,
    writer::JsonWriter,
};

fn string_token<'c>(
    cursor: &'c TokenCursor<'_, '_>,
    type_name: &'static str,
) -> Result<std::borrow::Cow<'c, str>, CodecError> {
    match cursor.token_type() {
        TokenType::String => cursor.string_value(),
        other => Err(CodecError::unexpected(other, type_name)),
    }
}

/// `uuid::Uuid` as a hyphenated JSON string.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidCodec;

impl ValueCodec for UuidCodec {
    type Value = Uuid;

    fn read(
        &self,
        cursor: &mut TokenCursor<'_, '_>,
        _existing: Option<Uuid>,
    ) -> Result<Uuid, CodecError> {
        let text = string_token(cursor, "Uuid")?;
        text.parse()
            .map_err(|_| CodecError::format(text.into_owned(), "Uuid"))
    }

    fn write(&self, writer: &mut JsonWriter<'_>, value: &Uuid) -> Result<(), CodecError> {
        writer.string(&value.hyphenated().to_string())?;
        Ok(())
    }
}

/// `chrono::NaiveDateTime` as an ISO-8601 JSON string without offset.
#[derive(Debug, Default, Clone, Copy)]
pub struct DateTimeCodec;

impl ValueCodec for DateTimeCodec {
    type Value = NaiveDateTime;

    fn read(
        &self,
        cursor: &mut TokenCursor<'_, '_>,
        _existing: Option<NaiveDateTime>,
    ) -> Result<NaiveDateTime, CodecError> {
        let text = string_token(cursor, "NaiveDateTime")?;
        text.parse()
            .map_err(|_| CodecError::format(text.into_owned(), "NaiveDateTime"))
    }

    fn write(&self, writer: &mut JsonWriter<'_>, value: &NaiveDateTime) -> Result<(), CodecError> {
        writer.string(&value.format("%Y-%m-%dT%H:%M:%S%.f").to_string())?;
        Ok(())
    }
}

/// `chrono::DateTime<FixedOffset>` as an RFC 3339 JSON string.
#[derive(Debug, Default, Clone, Copy)]
pub struct DateTimeOffsetCodec;

impl ValueCodec for DateTimeOffsetCodec {
    type Value = DateTime<FixedOffset>;

    fn read(
        &self,
        cursor: &mut TokenCursor<'_, '_>,
        _existing: Option<DateTime<FixedOffset>>,
    ) -> Result<DateTime<FixedOffset>, CodecError> {
        let text = string_token(cursor, "DateTime<FixedOffset>")?;
        DateTime::parse_from_rfc3339(&text)
            .map_err(|_| CodecError::format(text.into_owned(), "DateTime<FixedOffset>"))
    }

    fn write(
        &self,
        writer: &mut JsonWriter<'_>,
        value: &DateTime<FixedOffset>,
    ) -> Result<(), CodecError> {
        writer.string(&value.to_rfc3339())?;
        Ok(())
    }
}

/// `chrono::NaiveDate` as an ISO-8601 (`YYYY-MM-DD`) JSON string.
#[derive(Debug, Default, Clone, Copy)]
pub struct DateCodec;

impl ValueCodec for DateCodec {
    type Value = NaiveDate;

    fn read(
        &self,
        cursor: &mut TokenCursor<'_, '_>,
        _existing: Option<NaiveDate>,
    ) -> Result<NaiveDate, CodecError> {
        let text = string_token(cursor, "NaiveDate")?;
        text.parse()
            .map_err(|_| CodecError::format(text.into_owned(), "NaiveDate"))
    }

    fn write(&self, writer: &mut JsonWriter<'_>, value: &NaiveDate) -> Result<(), CodecError> {
        writer.string(&value.format("%Y-%m-%d").to_string())?;
        Ok(())
    }
}

/// `chrono::NaiveTime` as an ISO-8601 (`HH:MM:SS[.fff]`) JSON string.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeCodec;

impl ValueCodec for TimeCodec {
    type Value = NaiveTime;

    fn read(
        &self,
        cursor: &mut TokenCursor<'_, '_>,
        _existing: Option<NaiveTime>,
    ) -> Result<NaiveTime, CodecError> {
        let text = string_token(cursor, "NaiveTime")?;
        text.parse()
            .map_err(|_| CodecError::format(text.into_owned(), "NaiveTime"))
    }

    fn write(&self, writer: &mut JsonWriter<'_>, value: &NaiveTime) -> Result<(), CodecError> {
        writer.string(&value.format("%H:%M:%S%.f").to_string())?;
        Ok(())
    }
}

/// `chrono::TimeDelta` in the invariant general duration format.
#[derive(Debug, Default, Clone, Copy)]
pub struct DurationCodec;

impl ValueCodec for DurationCodec {
    type Value = TimeDelta;

    fn read(
        &self,
        cursor: &mut TokenCursor<'_, '_>,
        _existing: Option<TimeDelta>,
    ) -> Result<TimeDelta, CodecError> {
        let text = string_token(cursor, "TimeDelta")?;
        parse_duration(&text).ok_or_else(|| CodecError::format(text.into_owned(), "TimeDelta"))
    }

    fn write(&self, writer: &mut JsonWriter<'_>, value: &TimeDelta) -> Result<(), CodecError> {
        writer.string(&format_duration(*value))?;
        Ok(())
    }
}

fn format_duration(delta: TimeDelta) -> String {
    use std::fmt::Write as _;

    let negative = delta < TimeDelta::zero();
    let abs = if negative { -delta } else { delta };
    let days = abs.num_days();
    let hours = abs.num_hours() - days * 24;
    let minutes = abs.num_minutes() - abs.num_hours() * 60;
    let seconds = abs.num_seconds() - abs.num_minutes() * 60;
    let ticks = i64::from(abs.subsec_nanos()) / 100;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if days > 0 {
        let _ = write!(out, "{days}:");
    }
    let _ = write!(out, "{hours}:{minutes:02}:{seconds:02}");
    if ticks > 0 {
        let mut frac = format!("{ticks:07}");
        while frac.ends_with('0') {
            frac.pop();
        }
        out.push('.');
        out.push_str(&frac);
    }
    out
}

fn parse_duration(text: &str) -> Option<TimeDelta> {
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (main, frac) = match rest.split_once('.') {
        Some((main, frac)) => (main, Some(frac)),
        None => (rest, None),
    };

    let parts: Vec<&str> = main.split(':').collect();
    let (days, hours, minutes, seconds): (i64, i64, i64, i64) = match parts.as_slice() {
        [h, m, s] => (0, h.parse().ok()?, m.parse().ok()?, s.parse().ok()?),
        [d, h, m, s] => (
            d.parse().ok()?,
            h.parse().ok()?,
            m.parse().ok()?,
            s.parse().ok()?,
        ),
        _ => return None,
    };
    if !(0..60).contains(&minutes) || !(0..60).contains(&seconds) || hours < 0 || days < 0 {
        return None;
    }

    let mut nanos: i64 = 0;
    if let Some(frac) = frac {
        if frac.is_empty() || frac.len() > 7 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let ticks: i64 = format!("{frac:0<7}").parse().ok()?;
        nanos = ticks * 100;
    }

    // Checked throughout: a syntactically valid document can still name a
    // duration outside TimeDelta's range, which must read as a format error
    // rather than a panic.
    let total_seconds = days
        .checked_mul(24)
        .and_then(|h| h.checked_add(hours))
        .and_then(|h| h.checked_mul(60))
        .and_then(|m| m.checked_add(minutes))
        .and_then(|m| m.checked_mul(60))
        .and_then(|s| s.checked_add(seconds))?;
    let mut delta = TimeDelta::try_seconds(total_seconds)? + TimeDelta::nanoseconds(nanos);
    if negative {
        delta = -delta;
    }
    Some(delta)
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::{format_duration, parse_duration};

    #[test]
    fn duration_general_format() {
        assert_eq!(format_duration(TimeDelta::seconds(3661)), "1:01:01");
        assert_eq!(format_duration(TimeDelta::seconds(90_061)), "1:1:01:01");
        assert_eq!(format_duration(-TimeDelta::seconds(61)), "-0:01:01");
        assert_eq!(
            format_duration(TimeDelta::seconds(1) + TimeDelta::milliseconds(500)),
            "0:00:01.5"
        );
    }

    #[test]
    fn duration_parses_back() {
        for text in ["1:01:01", "1:1:01:01", "-0:01:01", "0:00:01.5", "0:00:00.0000001"] {
            let delta = parse_duration(text).unwrap();
            assert_eq!(format_duration(delta), text.to_string());
        }
        assert!(parse_duration("1:99:00").is_none());
        assert!(parse_duration("abc").is_none());
    }

    #[test]
    fn duration_outside_timedelta_range_is_rejected() {
        // Well-formed text whose total seconds overflow i64 or exceed the
        // TimeDelta range must fail cleanly.
        assert!(parse_duration("1000000000000:0:00:00").is_none());
        assert!(parse_duration("9223372036854775807:0:00:00").is_none());
        assert!(parse_duration("-1000000000000:0:00:00").is_none());
    }
}
