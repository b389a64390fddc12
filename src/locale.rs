use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, NaiveTime, Utc, Weekday};

pub const TIMESTAMP_PLACEHOLDER: &str = "N/A";

/// Weekday abbreviations indexed by days since Sunday.
pub const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sab"];

/// Locale-dependent rendering of dates, times and weekday names.
pub trait LocaleFormatter: Send + Sync {
    /// Short weekday name as used in schedule entries.
    fn weekday_abbreviation(&self, weekday: Weekday) -> &'static str;

    /// Full date and time for the status timestamp, or the placeholder when
    /// the timestamp is missing or cannot be parsed.
    fn format_timestamp(&self, raw: Option<&str>) -> String;

    /// Hour and minute for a schedule row.
    fn format_time_of_day(&self, time: NaiveTime) -> String;
}

/// Wall-clock source, expressed in the display time zone.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Brazilian Portuguese formatting: `dd/mm/yyyy, HH:MM:SS` and `HH:MM`, 24-hour.
#[derive(Debug, Clone, Copy, Default)]
pub struct PtBrFormatter {
    display_offset: Option<FixedOffset>,
}

impl PtBrFormatter {
    pub fn new(display_offset: Option<FixedOffset>) -> Self {
        Self { display_offset }
    }

    fn display_time(&self, timestamp: DateTime<FixedOffset>) -> NaiveDateTime {
        match self.display_offset {
            Some(offset) => timestamp.with_timezone(&offset).naive_local(),
            None => timestamp.with_timezone(&Local).naive_local(),
        }
    }
}

impl LocaleFormatter for PtBrFormatter {
    fn weekday_abbreviation(&self, weekday: Weekday) -> &'static str {
        WEEKDAY_ABBREVIATIONS[weekday.num_days_from_sunday() as usize]
    }

    fn format_timestamp(&self, raw: Option<&str>) -> String {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return TIMESTAMP_PLACEHOLDER.to_string();
        };
        let display_time = match parse_timestamp(raw) {
            Some(ParsedTimestamp::Zoned(timestamp)) => self.display_time(timestamp),
            // no offset on the wire means it is already wall-clock time
            Some(ParsedTimestamp::Naive(timestamp)) => timestamp,
            None => return TIMESTAMP_PLACEHOLDER.to_string(),
        };
        display_time.format("%d/%m/%Y, %H:%M:%S").to_string()
    }

    fn format_time_of_day(&self, time: NaiveTime) -> String {
        time.format("%H:%M").to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedTimestamp {
    Zoned(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

/// Accepts RFC 3339 with an offset, or a bare ISO-8601 date-time.
pub fn parse_timestamp(raw: &str) -> Option<ParsedTimestamp> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(ParsedTimestamp::Zoned(timestamp));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(ParsedTimestamp::Naive)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    offset: Option<FixedOffset>,
}

impl SystemClock {
    pub fn new(offset: Option<FixedOffset>) -> Self {
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        match self.offset {
            Some(offset) => Utc::now().with_timezone(&offset).naive_local(),
            None => Local::now().naive_local(),
        }
    }
}

#[cfg(test)]
pub struct FixedClock(pub NaiveDateTime);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
