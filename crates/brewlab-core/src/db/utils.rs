//! Column conversion helpers shared by the query modules.

use std::{fmt::Display, str::FromStr};

use jiff::{Timestamp, civil::Date};
use rusqlite::{Row, types::Type};
use uuid::Uuid;

fn conversion_error<E: Display>(idx: usize, value: &str, err: E) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        Type::Text,
        Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Invalid value '{value}': {err}"),
        )),
    )
}

/// Read a TEXT column holding a UUID.
pub(crate) fn uuid_column(row: &Row, idx: usize) -> rusqlite::Result<Uuid> {
    let text: String = row.get(idx)?;
    Uuid::parse_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Read a nullable TEXT column holding a UUID.
pub(crate) fn optional_uuid_column(row: &Row, idx: usize) -> rusqlite::Result<Option<Uuid>> {
    let text: Option<String> = row.get(idx)?;
    text.map(|t| {
        Uuid::parse_str(&t)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    })
    .transpose()
}

/// Read a TEXT column holding an RFC 3339 timestamp.
pub(crate) fn timestamp_column(row: &Row, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Read a TEXT column holding a `YYYY-MM-DD` date.
pub(crate) fn date_column(row: &Row, idx: usize) -> rusqlite::Result<Date> {
    row.get::<_, String>(idx)?
        .parse::<Date>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Read a TEXT column into any enum with a string `FromStr` impl.
pub(crate) fn parsed_column<T>(row: &Row, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let text: String = row.get(idx)?;
    text.parse::<T>()
        .map_err(|e| conversion_error(idx, &text, e))
}

/// Read a pair of nullable REAL columns as a `(low, high)` range.
pub(crate) fn range_columns(row: &Row, low: usize) -> rusqlite::Result<Option<(f64, f64)>> {
    let lo: Option<f64> = row.get(low)?;
    let hi: Option<f64> = row.get(low + 1)?;
    Ok(lo.zip(hi))
}

/// Read an INTEGER column holding a tasting score.
pub(crate) fn score_column(row: &Row, idx: usize) -> rusqlite::Result<u8> {
    let value: i64 = row.get(idx)?;
    u8::try_from(value).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e))
    })
}
