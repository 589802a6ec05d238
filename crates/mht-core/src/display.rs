// crates/mht-core/src/display.rs
//! Fallback-aware formatting for record fields shown to users.

pub const UNKNOWN_DATE: &str = "Unknown Date";

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Format an ISO `YYYY-MM-DD` date as `15 Jan 2024`. Anything that does not
/// parse as a plausible calendar date yields [`UNKNOWN_DATE`].
pub fn format_last_updated(date: &str) -> String {
    parse_iso_date(date)
        .map(|(year, month, day)| format!("{} {} {}", day, MONTHS[month as usize - 1], year))
        .unwrap_or_else(|| UNKNOWN_DATE.to_string())
}

fn parse_iso_date(date: &str) -> Option<(u16, u8, u8)> {
    let mut parts = date.trim().splitn(3, '-');
    let year: u16 = parts.next()?.parse().ok()?;
    let month: u8 = parts.next()?.parse().ok()?;
    let day: u8 = parts.next()?.parse().ok()?;

    if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
        return None;
    }
    Some((year, month, day))
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}
