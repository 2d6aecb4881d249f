use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

/// Digits in a Brazilian mobile number with country and area code.
const BR_MOBILE_DIGITS: usize = 13;

/// Format a phone number as `(AA) NNNNN-NNNN`.
///
/// Only 13-digit numbers (`55` + area code + 9-digit mobile) are formatted;
/// anything else is returned as given.
pub fn format_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != BR_MOBILE_DIGITS {
        return phone.to_string();
    }
    format!("({}) {}-{}", &digits[2..4], &digits[4..9], &digits[9..13])
}

/// Relative time against the wall clock, dates in the host's local zone.
pub fn format_relative_time_now(ts: DateTime<Utc>) -> String {
    format_relative_time(ts, Utc::now(), &Local)
}

/// Short "time ago" label for the conversation list.
///
/// Anything older than a week is shown as a `dd/mm` date in the viewer's
/// timezone `tz`.
pub fn format_relative_time<Tz>(ts: DateTime<Utc>, now: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let elapsed = now - ts;
    let mins = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if mins < 1 {
        "agora".to_string()
    } else if mins < 60 {
        format!("{mins}min")
    } else if hours < 24 {
        format!("{hours}h")
    } else if days < 7 {
        format!("{days}d")
    } else {
        ts.with_timezone(tz).format("%d/%m").to_string()
    }
}
