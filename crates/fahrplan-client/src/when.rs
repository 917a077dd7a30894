//! Resolving `-d/--date` into the reference time.
//!
//! The flag takes up to five numbers `[[[[[year] month] day] hour] minute]`.
//! Given values replace the trailing components of "now"; seconds are always
//! zero.

use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Timelike};

use crate::error::{ClientError, ClientResult};

/// Replaces the trailing date components of `now` with `parts`.
pub fn resolve_reference(
    parts: &[u32],
    now: DateTime<FixedOffset>,
) -> ClientResult<DateTime<FixedOffset>> {
    if parts.len() > 5 {
        return Err(ClientError::Date(format!(
            "expected at most 5 values, got {}",
            parts.len()
        )));
    }

    let mut components = [
        u32::try_from(now.year()).unwrap_or(0),
        now.month(),
        now.day(),
        now.hour(),
        now.minute(),
    ];
    let first = components.len() - parts.len();
    components[first..].copy_from_slice(parts);
    let [year, month, day, hour, minute] = components;

    let year = i32::try_from(year)
        .map_err(|_| ClientError::Date(format!("year {} out of range", year)))?;

    now.offset()
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .ok_or_else(|| {
            ClientError::Date(format!(
                "{:04}-{:02}-{:02} {:02}:{:02} does not exist",
                year, month, day, hour, minute
            ))
        })
}
