// Parseo de franjas horarias del catálogo ("9:00 am - 9:50 am") a minutos del día.
use crate::models::TimeWindow;
use regex::Regex;
use std::sync::OnceLock;

fn clock_re() -> &'static Regex {
    static CLOCK_RE: OnceLock<Regex> = OnceLock::new();
    CLOCK_RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*(\d{1,2}):(\d{2})\s*(am|pm)").expect("clock regex is valid")
    })
}

/// Parse a single 12-hour clock time ("9:05 am", "12:30PM") into a
/// minute-of-day offset. Only the prefix has to match, so "9:00 am (lab)"
/// still parses. Hours outside 1..=12 and minutes past 59 are rejected.
pub fn parse_clock_time(text: &str) -> Option<u16> {
    let caps = clock_re().captures(text)?;
    let mut hour: u16 = caps[1].parse().ok()?;
    let minute: u16 = caps[2].parse().ok()?;
    if !(1..=12).contains(&hour) || minute > 59 {
        return None;
    }
    let pm = caps[3].eq_ignore_ascii_case("pm");
    if pm && hour != 12 {
        hour += 12;
    }
    if !pm && hour == 12 {
        hour = 0;
    }
    Some(hour * 60 + minute)
}

/// Parse `"<start> - <end>"` into a [`TimeWindow`].
///
/// The " - " separator is tried first and a bare "-" second. Any failure on
/// either side, or a second separator, gives `TimeWindow::Unknown` for the
/// whole range.
pub fn parse_time_range(text: &str) -> TimeWindow {
    let lower = text.to_lowercase();
    let halves = lower
        .split_once(" - ")
        .or_else(|| lower.split_once('-'));
    let (start_txt, end_txt) = match halves {
        Some(h) => h,
        None => return TimeWindow::Unknown,
    };
    if end_txt.contains('-') {
        return TimeWindow::Unknown;
    }
    match (parse_clock_time(start_txt), parse_clock_time(end_txt)) {
        (Some(start), Some(end)) => TimeWindow::Known { start, end },
        _ => TimeWindow::Unknown,
    }
}

/// Same as [`parse_time_range`] for a field that may be absent.
pub fn parse_optional_time_range(text: Option<&str>) -> TimeWindow {
    text.map(parse_time_range).unwrap_or(TimeWindow::Unknown)
}

/// Parse a 24-hour "HH:MM" filter value (as sent by the course listing query).
pub fn parse_24h(text: &str) -> Option<u16> {
    let (h, m) = text.trim().split_once(':')?;
    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !digits(h) || !digits(m) {
        return None;
    }
    let hour: u16 = h.parse().ok()?;
    let minute: u16 = m.parse().ok()?;
    if hour > 23 || minute > 59 || m.len() != 2 {
        return None;
    }
    Some(hour * 60 + minute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_time_conversion() {
        assert_eq!(parse_clock_time("9:00 am"), Some(540));
        assert_eq!(parse_clock_time("9:50am"), Some(590));
        assert_eq!(parse_clock_time("12:00 pm"), Some(720));
        assert_eq!(parse_clock_time("12:15 AM"), Some(15));
        assert_eq!(parse_clock_time("1:30 PM"), Some(810));
        assert_eq!(parse_clock_time(" 11:59 pm "), Some(1439));
        assert_eq!(parse_clock_time("10:00 am (lab)"), Some(600));
    }

    #[test]
    fn clock_time_rejects_garbage() {
        assert_eq!(parse_clock_time(""), None);
        assert_eq!(parse_clock_time("9:00"), None);
        assert_eq!(parse_clock_time("9 am"), None);
        assert_eq!(parse_clock_time("13:00 pm"), None);
        assert_eq!(parse_clock_time("0:30 am"), None);
        assert_eq!(parse_clock_time("9:75 am"), None);
    }

    #[test]
    fn range_with_both_separators() {
        assert_eq!(
            parse_time_range("9:00 am - 9:50 am"),
            TimeWindow::Known { start: 540, end: 590 }
        );
        assert_eq!(
            parse_time_range("1:30 PM-2:45 PM"),
            TimeWindow::Known { start: 810, end: 885 }
        );
    }

    #[test]
    fn range_failures_are_unknown() {
        assert_eq!(parse_time_range("garbled"), TimeWindow::Unknown);
        assert_eq!(parse_time_range(""), TimeWindow::Unknown);
        assert_eq!(parse_time_range("9:00 am - soon"), TimeWindow::Unknown);
        assert_eq!(parse_time_range("TBA"), TimeWindow::Unknown);
        assert_eq!(parse_optional_time_range(None), TimeWindow::Unknown);
    }

    #[test]
    fn two_ranges_in_one_field_are_unknown() {
        assert_eq!(
            parse_time_range("9:00 am - 9:50 am, 1:00 pm - 2:00 pm"),
            TimeWindow::Unknown
        );
        assert_eq!(parse_time_range("9:00 am-9:50 am-10:00 am"), TimeWindow::Unknown);
    }

    #[test]
    fn twenty_four_hour_filter_values() {
        assert_eq!(parse_24h("09:00"), Some(540));
        assert_eq!(parse_24h("13:30"), Some(810));
        assert_eq!(parse_24h("24:00"), None);
        assert_eq!(parse_24h("9:5"), None);
        assert_eq!(parse_24h("noon"), None);
        assert_eq!(parse_24h("+9:05"), None);
        assert_eq!(parse_24h("9:+5"), None);
        assert_eq!(parse_24h(":30"), None);
    }
}
