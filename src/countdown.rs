use chrono::{NaiveDateTime, Timelike};

const FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    pub fn is_over(&self) -> bool {
        *self == Countdown::default()
    }

    /// `DD days HH:MM:SS`, every unit at least two digits.
    pub fn display(&self) -> String {
        format!(
            "{:02} days {:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

pub fn parse_event_time(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
}

/// Time left until `event`; all zeros once it has started.
pub fn countdown_until(event: NaiveDateTime, now: NaiveDateTime) -> Countdown {
    let left = (event - now).num_seconds();
    if left <= 0 {
        return Countdown::default();
    }
    Countdown {
        days: left / 86_400,
        hours: (left % 86_400) / 3_600,
        minutes: (left % 3_600) / 60,
        seconds: left % 60,
    }
}

/// e.g. `Thursday, November 27, 2025 at 9:00 AM`. Unparseable input is echoed back.
pub fn format_event_time(raw: &str) -> String {
    match parse_event_time(raw) {
        Some(dt) if dt.minute() == 0 && dt.hour() == 0 => dt.format("%A, %B %-d, %Y").to_string(),
        Some(dt) => dt.format("%A, %B %-d, %Y at %-I:%M %p").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(raw: &str) -> NaiveDateTime {
        parse_event_time(raw).unwrap()
    }

    #[test]
    fn splits_remaining_time() {
        let left = countdown_until(at("2025-11-27T09:00:00"), at("2025-11-25T06:58:30"));
        assert_eq!(
            left,
            Countdown {
                days: 2,
                hours: 2,
                minutes: 1,
                seconds: 30
            }
        );
        assert_eq!(left.display(), "02 days 02:01:30");
    }

    #[test]
    fn past_events_read_zero() {
        let left = countdown_until(at("2024-11-28 09:00"), at("2025-01-01T00:00"));
        assert!(left.is_over());
        assert_eq!(left.display(), "00 days 00:00:00");
    }

    #[test]
    fn formats_long_date() {
        assert_eq!(
            format_event_time("2025-11-27T09:00:00"),
            "Thursday, November 27, 2025 at 9:00 AM"
        );
        assert_eq!(format_event_time("soon"), "soon");
    }
}
