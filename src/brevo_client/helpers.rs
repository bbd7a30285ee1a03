use std::env;
use std::fmt;

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;

use crate::types::BrevoError;

/// Brevo API key, passed explicitly to every call.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Use the caller's key, or `BREVO_API_KEY` when none was supplied.
    pub fn resolve(explicit: Option<&str>) -> Result<Self, BrevoError> {
        if let Some(value) = explicit.map(str::trim).filter(|v| !v.is_empty()) {
            return Ok(Self::new(value));
        }
        if let Ok(value) = env::var("BREVO_API_KEY") {
            if !value.trim().is_empty() {
                return Ok(Self::new(value.trim()));
            }
        }
        Err(BrevoError::MissingApiKey)
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Sort direction accepted by the contacts-in-list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Result<Self, BrevoError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(BrevoError::InvalidInput(format!(
                "sort must be `asc` or `desc`, got `{other}`"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Wire format Brevo expects for instants: `2025-03-01T09:00:00.000Z`.
pub fn to_brevo_timestamp(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Interpret a host date parameter as an instant.
///
/// Values carrying an offset are taken as-is; naive date-times and plain
/// dates are read in the document timezone.
pub fn parse_host_datetime(raw: &str, zone: Tz) -> Result<DateTime<Utc>, BrevoError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BrevoError::InvalidInput("Invalid date format provided".to_string()));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    let naive = parse_naive(trimmed).ok_or_else(|| {
        BrevoError::InvalidInput(format!("Invalid date format provided: `{trimmed}`"))
    })?;

    match zone.from_local_datetime(&naive) {
        LocalResult::Single(local) => Ok(local.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(BrevoError::InvalidInput(format!(
            "`{trimmed}` does not exist in timezone {zone}"
        ))),
    }
}

fn parse_naive(value: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Cheap shape check run before any request touches the network.
pub fn validate_email(email: &str) -> Result<&str, BrevoError> {
    let trimmed = email.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(trimmed),
        _ => Err(BrevoError::InvalidInput(format!(
            "`{trimmed}` is not an email address"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_dates_convert_to_utc_millis() {
        let instant = parse_host_datetime("2025-03-01T10:30:00+01:00", chrono_tz::UTC).unwrap();
        assert_eq!(to_brevo_timestamp(&instant), "2025-03-01T09:30:00.000Z");
    }

    #[test]
    fn naive_dates_use_document_timezone() {
        let winter = parse_host_datetime("2025-01-15 18:00", chrono_tz::Europe::Paris).unwrap();
        assert_eq!(to_brevo_timestamp(&winter), "2025-01-15T17:00:00.000Z");

        let summer = parse_host_datetime("2025-07-15T18:00:00", chrono_tz::Europe::Paris).unwrap();
        assert_eq!(to_brevo_timestamp(&summer), "2025-07-15T16:00:00.000Z");

        let day = parse_host_datetime("2025-07-15", chrono_tz::America::New_York).unwrap();
        assert_eq!(to_brevo_timestamp(&day), "2025-07-15T04:00:00.000Z");
    }

    #[test]
    fn rejects_garbage_and_skipped_local_times() {
        assert!(matches!(
            parse_host_datetime("next tuesday", chrono_tz::UTC),
            Err(BrevoError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_host_datetime("", chrono_tz::UTC),
            Err(BrevoError::InvalidInput(_))
        ));
        // Clocks jump from 02:00 to 03:00 in Paris on this date.
        assert!(matches!(
            parse_host_datetime("2025-03-30 02:30", chrono_tz::Europe::Paris),
            Err(BrevoError::InvalidInput(_))
        ));
    }

    #[test]
    fn sort_order_is_case_insensitive() {
        assert_eq!(SortOrder::parse("DESC").unwrap(), SortOrder::Desc);
        assert_eq!(SortOrder::parse("asc").unwrap().as_str(), "asc");
        assert!(SortOrder::parse("newest").is_err());
    }

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("xkeysib-123");
        assert_eq!(format!("{key:?}"), "ApiKey(***)");
        assert_eq!(ApiKey::resolve(Some("  abc ")).unwrap().expose(), "abc");
    }

    #[test]
    fn email_shape_check() {
        assert_eq!(validate_email(" new@x.com ").unwrap(), "new@x.com");
        assert!(validate_email("nobody").is_err());
        assert!(validate_email("@x.com").is_err());
    }
}
