//! Small text helpers: human-readable sizes, uptime, timestamps, digit grouping.

use chrono::{DateTime, Local, TimeZone, Utc};

const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Binary-scaled size with one decimal, e.g. `1536 -> "1.5KB"`.
pub fn format_byte_count(bytes: u64) -> String {
    let mut v = bytes as f64;
    for unit in &UNITS[..UNITS.len() - 1] {
        // compare the value as it will be printed, so 1023.96 moves up a unit
        if (v * 10.0).round() / 10.0 < 1024.0 {
            return format!("{v:.1}{unit}");
        }
        v /= 1024.0;
    }
    format!("{v:.1}PB")
}

/// Elapsed time between `boot` and `now`, largest units first.
pub fn format_uptime(boot: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - boot).num_seconds().max(0);
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

pub fn boot_instant(boot_epoch_secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(boot_epoch_secs, 0)
        .single()
        .unwrap_or_default()
}

/// Local wall-clock rendering used for the "Boot Time" line.
pub fn format_local_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// `1234567 -> "1,234,567"`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
