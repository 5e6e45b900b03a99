use std::fmt;

use chrono::NaiveDate;

/// Provider-specific condition identifier, resolved through the tables in `codes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeOrIconId {
    /// wttr.in / WorldWeatherOnline code string, e.g. "113"
    Wttr(String),
    /// WMO 4677 numeric code as used by Open-Meteo
    Wmo(u16),
    /// OpenWeatherMap icon id, e.g. "10d"
    OwmIcon(String),
}

impl fmt::Display for CodeOrIconId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeOrIconId::Wttr(code) => write!(f, "wttr:{code}"),
            CodeOrIconId::Wmo(code) => write!(f, "wmo:{code}"),
            CodeOrIconId::OwmIcon(icon) => write!(f, "owm:{icon}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourSample {
    pub hour_of_day: u8,
    pub temp_c: f64,
    pub code: CodeOrIconId,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    pub hourly: Vec<HourSample>,
    pub noon_code: CodeOrIconId,
}

/// A fully parsed report. `days[0]` is today, `days[1]` tomorrow.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub current_temperature_c: f64,
    pub current_code: CodeOrIconId,
    pub feels_like_c: f64,
    pub area_name: String,
    pub days: Vec<DaySummary>,
}

impl WeatherReport {
    pub fn today(&self) -> Option<&DaySummary> {
        self.days.first()
    }

    pub fn tomorrow(&self) -> Option<&DaySummary> {
        self.days.get(1)
    }
}

/// Picks the code describing midday: the 12:00 sample if there is one,
/// otherwise the middle sample of the day.
pub fn noon_code(hourly: &[HourSample]) -> Option<CodeOrIconId> {
    hourly
        .iter()
        .find(|h| h.hour_of_day == 12)
        .or_else(|| hourly.get(hourly.len() / 2))
        .map(|h| h.code.clone())
}
