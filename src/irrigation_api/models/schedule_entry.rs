use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize};

/// One recurring watering rule as served by `/api/horarios`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// `HH:MM`, wall-clock time.
    #[serde(rename = "hora")]
    pub time: String,
    /// Minutes.
    #[serde(rename = "duracao", default)]
    pub duration: f64,
    #[serde(rename = "dias_semana", default, deserialize_with = "deserialize_weekdays")]
    pub weekdays: Vec<String>,
}

impl ScheduleEntry {
    /// Parses `time` leniently: each part may carry surrounding whitespace and a
    /// trailing `:SS` is ignored. Out-of-range hours or minutes yield `None`.
    pub fn time_of_day(&self) -> Option<NaiveTime> {
        let mut parts = self.time.split(':');
        let hour = parts.next()?.trim().parse::<u32>().ok()?;
        let minute = parts.next()?.trim().parse::<u32>().ok()?;
        NaiveTime::from_hms_opt(hour, minute, 0)
    }

    pub fn runs_on(&self, weekday_abbreviation: &str) -> bool {
        self.weekdays.iter().any(|day| day == weekday_abbreviation)
    }

    pub fn weekdays_label(&self) -> String {
        self.weekdays.join(", ")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WeekdaysRepr {
    List(Vec<String>),
    Csv(String),
}

// The controller stores the set as "Seg,Qua" and serves it as-is.
fn deserialize_weekdays<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<WeekdaysRepr>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(WeekdaysRepr::List(days)) => days,
        Some(WeekdaysRepr::Csv(days)) => days
            .split(',')
            .map(str::trim)
            .filter(|day| !day.is_empty())
            .map(str::to_string)
            .collect(),
    })
}
