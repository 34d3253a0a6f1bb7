/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Date and time plugins for the `stencil` template engine.
//!
//! Ordinary implementations of the [`Plugin`] contract: parsing,
//! formatting, and arithmetic on calendar values, opt-in like any other
//! plugin pack.
//!
//! ```
//! use std::collections::HashMap;
//! use stencil::{FormatOptions, format_with};
//! use stencil_date::date_plugins;
//!
//! let values = HashMap::from([("date", "2023-03-25T12:00:00Z")]);
//! let options = FormatOptions::new().with_plugins(date_plugins());
//! assert_eq!(
//!     format_with("{{ date | toUnixTimestamp }}", &values, &options).unwrap(),
//!     "1679745600"
//! );
//! ```
//!
//! Inputs are ISO-8601 / RFC 3339 strings; a bare date is read as midnight
//! UTC. Outputs are RFC 3339 UTC with a `Z` suffix. Unparseable input is a
//! plugin error naming the offending text, surfaced unchanged by `format`.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, SecondsFormat, Utc};
use std::sync::Arc;

use stencil::{Plugin, PluginError, PluginRegistry, TransformFn};

/// The date plugin pack, under its template-facing names.
pub fn date_plugins() -> PluginRegistry {
    let mut plugins = PluginRegistry::new();
    plugins.register("toUnixTimestamp", Plugin::try_transform(to_unix_timestamp));
    plugins.register(
        "fromUnixTimestamp",
        Plugin::try_transform(from_unix_timestamp),
    );
    plugins.register("formatDate", Plugin::factory(format_date));
    plugins.register("addDays", Plugin::factory(add_days));
    plugins
}

/// ISO date string to Unix seconds.
fn to_unix_timestamp(input: &str) -> Result<String, PluginError> {
    Ok(parse_iso(input)?.timestamp().to_string())
}

/// Unix seconds to an RFC 3339 UTC string.
fn from_unix_timestamp(input: &str) -> Result<String, PluginError> {
    let seconds: i64 = input.trim().parse().map_err(|_| {
        PluginError::new(format!("could not parse \"{}\" as a Unix timestamp", input))
    })?;
    let date = DateTime::<Utc>::from_timestamp(seconds, 0)
        .ok_or_else(|| PluginError::new(format!("timestamp {} is out of range", seconds)))?;
    Ok(render(date))
}

/// `formatDate <fmt…>`: strftime formatting of an ISO input. Option tokens
/// are rejoined with single spaces.
fn format_date(opts: &[String]) -> Result<TransformFn, PluginError> {
    let fmt = opts.join(" ");
    let has_error = StrftimeItems::new(&fmt).any(|item| matches!(item, Item::Error));
    if has_error {
        return Err(PluginError::new(format!(
            "formatDate: invalid format string \"{}\"",
            fmt
        )));
    }
    Ok(Arc::new(move |text: &str| {
        let date = parse_iso(text)?;
        Ok(date.format(&fmt).to_string())
    }))
}

/// `addDays <n>`: shift an ISO input by whole days, negative allowed.
fn add_days(opts: &[String]) -> Result<TransformFn, PluginError> {
    let raw = opts
        .first()
        .ok_or_else(|| PluginError::new("addDays requires a day count"))?;
    let days: i64 = raw
        .parse()
        .map_err(|_| PluginError::new(format!("addDays: invalid day count \"{}\"", raw)))?;
    let delta = Duration::try_days(days)
        .ok_or_else(|| PluginError::new(format!("addDays: day count {} is out of range", days)))?;
    Ok(Arc::new(move |text: &str| {
        let date = parse_iso(text)?;
        let shifted = date.checked_add_signed(delta).ok_or_else(|| {
            PluginError::new(format!("addDays: {} days from \"{}\" is out of range", days, text))
        })?;
        Ok(render(shifted))
    }))
}

fn parse_iso(input: &str) -> Result<DateTime<Utc>, PluginError> {
    let trimmed = input.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(date.with_timezone(&Utc));
    }
    // A bare date reads as midnight UTC.
    if let Ok(date) = trimmed.parse::<NaiveDate>() {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    Err(PluginError::new(format!(
        "could not parse \"{}\" as an ISO-8601 date",
        input
    )))
}

fn render(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_accepts_rfc3339() {
        let date = parse_iso("2023-03-25T12:00:00Z").unwrap();
        assert_eq!(date.timestamp(), 1679745600);
    }

    #[test]
    fn test_parse_iso_accepts_offsets() {
        let date = parse_iso("2023-03-25T14:00:00+02:00").unwrap();
        assert_eq!(render(date), "2023-03-25T12:00:00Z");
    }

    #[test]
    fn test_parse_iso_accepts_bare_dates() {
        let date = parse_iso("2023-03-25").unwrap();
        assert_eq!(render(date), "2023-03-25T00:00:00Z");
    }

    #[test]
    fn test_parse_iso_rejects_garbage_with_input_in_message() {
        let err = parse_iso("abc").unwrap_err();
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_from_unix_timestamp_renders_z_suffix() {
        assert_eq!(
            from_unix_timestamp("1679745600").unwrap(),
            "2023-03-25T12:00:00Z"
        );
    }

    #[test]
    fn test_from_unix_timestamp_rejects_garbage_with_input_in_message() {
        let err = from_unix_timestamp("xyz").unwrap_err();
        assert!(err.to_string().contains("xyz"));
    }

    #[test]
    fn test_format_date_factory_validates_format() {
        assert!(format_date(&["%Y/%m/%d".to_string()]).is_ok());
        assert!(format_date(&["%Q".to_string()]).is_err());
    }

    #[test]
    fn test_format_date_applies_format() {
        let transform = format_date(&["%Y/%m/%d".to_string()]).unwrap();
        assert_eq!(transform("2023-03-25T12:00:00Z").unwrap(), "2023/03/25");
    }

    #[test]
    fn test_format_date_rejoins_options_with_spaces() {
        let transform =
            format_date(&["%b".to_string(), "%d,".to_string(), "%Y".to_string()]).unwrap();
        assert_eq!(transform("2023-03-25T12:00:00Z").unwrap(), "Mar 25, 2023");
    }

    #[test]
    fn test_add_days_shifts_forward_and_backward() {
        let forward = add_days(&["3".to_string()]).unwrap();
        assert_eq!(
            forward("2023-03-25T12:00:00Z").unwrap(),
            "2023-03-28T12:00:00Z"
        );

        let backward = add_days(&["-1".to_string()]).unwrap();
        assert_eq!(
            backward("2023-03-25T12:00:00Z").unwrap(),
            "2023-03-24T12:00:00Z"
        );
    }

    #[test]
    fn test_add_days_rejects_bad_count() {
        assert!(add_days(&["soon".to_string()]).is_err());
    }
}
