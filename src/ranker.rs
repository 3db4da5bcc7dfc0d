use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Why a single order-by value could not be turned into an instant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("field is missing")]
    Missing,
    #[error("expected a date-time string or epoch number, found {0}")]
    WrongType(&'static str),
    #[error("{0:?} is not a valid date-time")]
    Invalid(String),
    #[error("epoch value {0} is out of range")]
    OutOfRange(String),
}

/// A record whose order-by field is missing or is not a point in time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("record at position {index} has a malformed `{key}` field: {reason}")]
pub struct MalformedRecordError {
    pub index: usize,
    pub key: String,
    #[source]
    pub reason: TimestampError,
}

/// Anything the ranker can read a named field from.
///
/// The ranker only ever borrows the record, so implementors never need to
/// hand out mutable access.
pub trait Record {
    fn field(&self, key: &str) -> Option<&Value>;
}

impl Record for Value {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl Record for Map<String, Value> {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl Record for HashMap<String, Value> {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl Record for BTreeMap<String, Value> {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, key: &str) -> Option<&Value> {
        (**self).field(key)
    }
}

/// Interprets a JSON value as a UTC instant.
///
/// Strings may be RFC 3339 date-times, offset-less `YYYY-MM-DDTHH:MM:SS`
/// (taken as UTC) or plain `YYYY-MM-DD` dates (midnight UTC). Numbers are
/// seconds since the Unix epoch.
pub fn parse_timestamp(value: &Value) -> Result<DateTime<Utc>, TimestampError> {
    match value {
        Value::String(s) => parse_timestamp_str(s),
        Value::Number(n) => {
            if let Some(secs) = n.as_i64() {
                return DateTime::from_timestamp(secs, 0)
                    .ok_or_else(|| TimestampError::OutOfRange(n.to_string()));
            }
            let Some(f) = n.as_f64() else {
                return Err(TimestampError::OutOfRange(n.to_string()));
            };
            let secs = f.floor();
            if secs < i64::MIN as f64 || secs >= i64::MAX as f64 {
                return Err(TimestampError::OutOfRange(n.to_string()));
            }
            let nanos = (((f - secs) * 1e9) as u32).min(999_999_999);
            DateTime::from_timestamp(secs as i64, nanos)
                .ok_or_else(|| TimestampError::OutOfRange(n.to_string()))
        }
        Value::Null => Err(TimestampError::WrongType("null")),
        Value::Bool(_) => Err(TimestampError::WrongType("a boolean")),
        Value::Array(_) => Err(TimestampError::WrongType("an array")),
        Value::Object(_) => Err(TimestampError::WrongType("an object")),
    }
}

fn parse_timestamp_str(raw: &str) -> Result<DateTime<Utc>, TimestampError> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    Err(TimestampError::Invalid(raw.to_string()))
}

/// Input to the ranker: which records, which field, how many.
#[derive(Debug, Clone, Copy)]
pub struct RankRequest<'a, R> {
    pub records: &'a [R],
    pub order_by_key: &'a str,
    pub count: usize,
}

impl<'a, R: Record> RankRequest<'a, R> {
    pub fn new(records: &'a [R], order_by_key: &'a str, count: usize) -> Self {
        Self {
            records,
            order_by_key,
            count,
        }
    }

    pub fn rank(&self) -> Result<Vec<&'a R>, MalformedRecordError> {
        rank_by_recency(self.records, self.order_by_key, self.count)
    }
}

/// Returns at most `count` records, most recent `order_by_key` first.
///
/// Every record is validated before anything is ordered, so a malformed
/// record fails the call even when `count` would have cut it off. The
/// reported position is the first malformed record in input order. Records
/// with equal timestamps keep their input order.
pub fn rank_by_recency<'a, R: Record>(
    records: &'a [R],
    order_by_key: &str,
    count: usize,
) -> Result<Vec<&'a R>, MalformedRecordError> {
    let mut keyed = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            record
                .field(order_by_key)
                .ok_or(TimestampError::Missing)
                .and_then(parse_timestamp)
                .map(|at| (at, record))
                .map_err(|reason| MalformedRecordError {
                    index,
                    key: order_by_key.to_string(),
                    reason,
                })
        })
        .collect::<Result<Vec<(DateTime<Utc>, &R)>, _>>()?;

    // sort_by is stable
    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    keyed.truncate(count);

    Ok(keyed.into_iter().map(|(_, record)| record).collect())
}

/// Same as [`rank_by_recency`] but hands back owned copies.
pub fn rank_by_recency_owned<R: Record + Clone>(
    records: &[R],
    order_by_key: &str,
    count: usize,
) -> Result<Vec<R>, MalformedRecordError> {
    Ok(rank_by_recency(records, order_by_key, count)?
        .into_iter()
        .cloned()
        .collect())
}
