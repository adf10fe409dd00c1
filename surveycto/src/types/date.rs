use crate::errors::SctoError;
use std::str::FromStr;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

/// Lower bound for the completion date of returned submissions.
///
/// Dates without a time are taken as midnight, and date-times without
/// an offset are taken as UTC.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CompletionDate {
    Date(Date),
    DateTime(PrimitiveDateTime),
    Timestamp(OffsetDateTime),
}

impl CompletionDate {
    /// The date as a UTC date-time.
    pub fn to_utc(&self) -> PrimitiveDateTime {
        match self {
            Self::Date(d) => PrimitiveDateTime::new(*d, Time::MIDNIGHT),
            Self::DateTime(dt) => *dt,
            Self::Timestamp(ts) => {
                let utc = ts.to_offset(UtcOffset::UTC);
                PrimitiveDateTime::new(utc.date(), utc.time())
            }
        }
    }

    /// Value of the `date` query parameter of the v2 API, percent-encoded,
    /// e.g. `Jan%2012%2C%202020%201%3A42%3A42%20PM`
    pub fn to_query(&self) -> Result<String, SctoError> {
        let format = format_description!(
            "[month repr:short] [day padding:none], [year] [hour repr:12 padding:none]:[minute]:[second] [period]"
        );
        let formatted = self
            .to_utc()
            .format(format)
            .map_err(|e| SctoError::TypeMismatch(e.to_string()))?;
        Ok(urlencoding::encode(&formatted).into_owned())
    }
}

impl From<Date> for CompletionDate {
    fn from(value: Date) -> Self {
        Self::Date(value)
    }
}

impl From<PrimitiveDateTime> for CompletionDate {
    fn from(value: PrimitiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<OffsetDateTime> for CompletionDate {
    fn from(value: OffsetDateTime) -> Self {
        Self::Timestamp(value)
    }
}

impl FromStr for CompletionDate {
    type Err = SctoError;

    /// Parse an ISO-8601 date (`2020-01-12`), date-time (`2020-01-12T13:42:42`)
    /// or RFC 3339 timestamp (`2020-01-12T13:42:42+02:00`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(ts) = OffsetDateTime::parse(s, &Rfc3339) {
            return Ok(Self::Timestamp(ts));
        }
        if let Ok(dt) =
            PrimitiveDateTime::parse(s, format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"))
        {
            return Ok(Self::DateTime(dt));
        }
        Date::parse(s, format_description!("[year]-[month]-[day]"))
            .map(Self::Date)
            .map_err(|_| {
                SctoError::TypeMismatch(format!(
                    "'oldest_completion_date' argument is expected to be a date or date-time, got \"{}\"",
                    s
                ))
            })
    }
}
