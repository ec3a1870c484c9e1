//! Raw query-string parsing
//!
//! Query parameters arrive as optional strings. Blank values count as
//! absent; a non-blank value that does not parse is a validation error
//! naming the parameter.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::shared::types::{DomainError, DomainResult, PageRequest, PaginationSettings};

/// Which end of a date range a date-only value stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    Start,
    End,
}

/// Trimmed, non-empty text or `None`.
pub fn text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn parse_number<T: FromStr>(name: &str, value: Option<&str>) -> DomainResult<Option<T>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw.parse::<T>().map(Some).map_err(|_| {
            DomainError::validation(format!("{} must be a valid number, got '{}'", name, raw))
        }),
    }
}

/// Like [`parse_number`] for decimals, rejecting NaN and infinities.
pub fn parse_decimal(name: &str, value: Option<&str>) -> DomainResult<Option<f64>> {
    match parse_number::<f64>(name, value)? {
        Some(n) if !n.is_finite() => Err(DomainError::validation(format!(
            "{} must be a finite number",
            name
        ))),
        other => Ok(other),
    }
}

/// Accepts `YYYY-MM-DD` or RFC 3339 and keeps only the calendar date.
pub fn parse_date(name: &str, value: Option<&str>) -> DomainResult<Option<NaiveDate>> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| Some(dt.with_timezone(&Utc).date_naive()))
        .map_err(|_| invalid_date(name, raw))
}

/// Accepts RFC 3339 as-is; a date-only value expands to the first instant
/// (`Start`) or the last millisecond (`End`) of that day in UTC.
pub fn parse_date_bound(
    name: &str,
    value: Option<&str>,
    bound: RangeBound,
) -> DomainResult<Option<DateTime<Utc>>> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| invalid_date(name, raw))?;
    let time = match bound {
        RangeBound::Start => NaiveTime::MIN,
        RangeBound::End => NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
            .ok_or_else(|| invalid_date(name, raw))?,
    };
    Ok(Some(Utc.from_utc_datetime(&date.and_time(time))))
}

fn invalid_date(name: &str, raw: &str) -> DomainError {
    DomainError::validation(format!(
        "{} must be a date (YYYY-MM-DD) or an RFC 3339 timestamp, got '{}'",
        name, raw
    ))
}

/// Build a [`PageRequest`] from raw `page`/`limit` values.
pub fn page_request(
    page: Option<&str>,
    limit: Option<&str>,
    settings: PaginationSettings,
) -> DomainResult<PageRequest> {
    let page = parse_number::<i64>("page", page)?.unwrap_or(1);
    let limit = parse_number::<i64>("limit", limit)?.unwrap_or(settings.default_limit as i64);
    PageRequest::bounded(page, limit, settings.max_limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn blank_text_is_absent() {
        assert_eq!(text(None), None);
        assert_eq!(text(Some("   ".into())), None);
        assert_eq!(text(Some(" Ana ".into())), Some("Ana".into()));
    }

    #[test]
    fn numbers_parse_or_name_the_parameter() {
        assert_eq!(parse_number::<i64>("classId", Some(" 12 ")).unwrap(), Some(12));
        assert_eq!(parse_number::<i64>("classId", Some("")).unwrap(), None);
        let err = parse_number::<i64>("classId", Some("doze")).unwrap_err();
        assert!(err.to_string().contains("classId"));
    }

    #[test]
    fn decimals_must_be_finite() {
        assert_eq!(parse_decimal("minGrade", Some("9.5")).unwrap(), Some(9.5));
        assert!(parse_decimal("minGrade", Some("NaN")).is_err());
        assert!(parse_decimal("minGrade", Some("inf")).is_err());
    }

    #[test]
    fn date_only_bounds_cover_the_whole_day() {
        let from = parse_date_bound("from", Some("2024-03-01"), RangeBound::Start)
            .unwrap()
            .unwrap();
        let to = parse_date_bound("to", Some("2024-03-01"), RangeBound::End)
            .unwrap()
            .unwrap();

        assert_eq!((from.hour(), from.minute(), from.second()), (0, 0, 0));
        assert_eq!((to.hour(), to.minute(), to.second()), (23, 59, 59));
        assert_eq!(to.day(), 1);
    }

    #[test]
    fn rfc3339_bounds_are_kept() {
        let at = parse_date_bound("from", Some("2024-03-01T10:30:00+01:00"), RangeBound::Start)
            .unwrap()
            .unwrap();
        assert_eq!(at.hour(), 9);
    }

    #[test]
    fn invalid_dates_are_rejected() {
        assert!(parse_date_bound("to", Some("01/03/2024"), RangeBound::End).is_err());
        assert!(parse_date("from", Some("2024-13-01")).is_err());
        assert_eq!(
            parse_date("from", Some("2024-02-29")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }

    #[test]
    fn page_request_uses_defaults() {
        let settings = PaginationSettings::default();
        let req = page_request(None, None, settings).unwrap();
        assert_eq!((req.page(), req.limit()), (1, 10));

        let req = page_request(Some("3"), Some("25"), settings).unwrap();
        assert_eq!((req.page(), req.offset()), (3, 50));
    }

    #[test]
    fn page_request_rejects_bad_input() {
        let settings = PaginationSettings::default();
        assert!(page_request(Some("0"), None, settings).is_err());
        assert!(page_request(Some("-2"), None, settings).is_err());
        assert!(page_request(None, Some("0"), settings).is_err());
        assert!(page_request(None, Some("500"), settings).is_err());
        assert!(page_request(Some("first"), None, settings).is_err());
        assert!(page_request(Some("1000000000000000000"), Some("10"), settings).is_err());
    }
}
