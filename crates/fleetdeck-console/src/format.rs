//! Display helpers shared by the explorer and the dashboards.

use std::fmt::Display;

use chrono::{DateTime, Local, Utc};

/// Placeholder for missing or unparsable values.
pub const NOT_AVAILABLE: &str = "N/A";

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Human-readable size using 1024-based units and at most two decimals.
#[must_use]
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes_to_f64(bytes);
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", SIZE_UNITS[unit])
}

fn bytes_to_f64(value: u64) -> f64 {
    let high = u32::try_from(value >> 32).unwrap_or(u32::MAX);
    let low = u32::try_from(value & 0xFFFF_FFFF).unwrap_or(u32::MAX);
    f64::from(high) * 4_294_967_296.0 + f64::from(low)
}

/// Unix seconds rendered in local time.
#[must_use]
pub fn format_timestamp(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0).map_or_else(
        || NOT_AVAILABLE.to_string(),
        |utc| {
            utc.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        },
    )
}

/// RFC 3339 timestamp rendered relative to `now`.
#[must_use]
pub fn format_relative_time(value: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(parsed) = value.and_then(|raw| DateTime::parse_from_rfc3339(raw).ok()) else {
        return NOT_AVAILABLE.to_string();
    };
    let at = parsed.with_timezone(&Utc);
    let elapsed = now.signed_duration_since(at);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();
    if minutes < 1 {
        "Just now".to_string()
    } else if hours < 1 {
        format!("{minutes}m ago")
    } else if days < 1 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        at.with_timezone(&Local).format("%Y-%m-%d").to_string()
    }
}

/// `value`, or `N/A` when missing or blank.
#[must_use]
pub fn or_na(value: Option<&str>) -> String {
    value
        .filter(|text| !text.trim().is_empty())
        .map_or_else(|| NOT_AVAILABLE.to_string(), str::to_string)
}

/// `value` formatted with `Display`, or `N/A` when missing.
#[must_use]
pub fn display_or_na<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |inner| inner.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn format_size_uses_binary_units() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1_572_864), "1.5 MB");
        assert_eq!(format_size(1_288_490_189), "1.2 GB");
        assert_eq!(format_size(5 * 1024_u64.pow(4)), "5 TB");
    }

    #[test]
    fn format_size_caps_at_terabytes() {
        assert_eq!(format_size(2048 * 1024_u64.pow(4)), "2048 TB");
    }

    #[test]
    fn relative_time_buckets() {
        let now = Utc::now();
        let at = |delta: Duration| Some((now - delta).to_rfc3339());

        assert_eq!(
            format_relative_time(at(Duration::seconds(20)).as_deref(), now),
            "Just now"
        );
        assert_eq!(
            format_relative_time(at(Duration::minutes(5)).as_deref(), now),
            "5m ago"
        );
        assert_eq!(
            format_relative_time(at(Duration::hours(3)).as_deref(), now),
            "3h ago"
        );
        assert_eq!(
            format_relative_time(at(Duration::days(2)).as_deref(), now),
            "2d ago"
        );
        let old = format_relative_time(at(Duration::days(30)).as_deref(), now);
        assert!(!old.ends_with("ago"));
        assert_eq!(old.len(), "2026-01-01".len());
    }

    #[test]
    fn invalid_inputs_render_not_available() {
        let now = Utc::now();
        assert_eq!(format_relative_time(None, now), "N/A");
        assert_eq!(format_relative_time(Some("yesterday"), now), "N/A");
        assert_eq!(format_timestamp(i64::MAX), "N/A");
        assert_eq!(or_na(Some("  ")), "N/A");
        assert_eq!(or_na(Some("1.20")), "1.20");
        assert_eq!(display_or_na::<u32>(None), "N/A");
        assert_eq!(display_or_na(Some(7)), "7");
    }

    #[test]
    fn timestamp_renders_date_and_time() {
        let rendered = format_timestamp(1_700_000_000);
        assert_eq!(rendered.len(), "2023-11-14 22:13:20".len());
    }
}
