use std::fmt::Display;

use serde::Serialize;

use crate::codes::{self, Language};
use crate::units::{temperature, time, weekday};
use crate::weather::{CodeOrIconId, DaySummary, HourSample, WeatherReport};

pub const CLASS: &str = "weather";

/// Number of upcoming hourly slots shown in the tooltip.
pub const NEXT_SLOTS: usize = 3;

const ERROR_TEXT: &str = "Err";

const FALLBACK_JSON: &str =
    r#"{"text":"Err","tooltip":"failed to serialize payload","class":"weather"}"#;

/// One line of Waybar custom-module JSON.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DisplayPayload {
    pub text: String,
    pub tooltip: String,
    pub class: String,
}

impl DisplayPayload {
    pub fn error(message: impl Display) -> Self {
        let mut tooltip = message.to_string();
        if tooltip.trim().is_empty() {
            tooltip = "unknown error".to_string();
        }
        Self {
            text: ERROR_TEXT.to_string(),
            tooltip,
            class: CLASS.to_string(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            log::error!("failed to serialize payload: {e}");
            FALLBACK_JSON.to_string()
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub language: Language,
    pub show_feels_like: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayTag {
    Today,
    Tomorrow,
}

/// An hourly sample on the combined today/tomorrow timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot<'a> {
    pub sample: &'a HourSample,
    pub day: DayTag,
}

impl Slot<'_> {
    fn is_after(&self, now_hour: u8) -> bool {
        match self.day {
            DayTag::Tomorrow => true,
            DayTag::Today => self.sample.hour_of_day > now_hour,
        }
    }
}

struct Labels {
    trend: &'static str,
    daily: &'static str,
    feels_like: &'static str,
}

fn labels(language: Language) -> Labels {
    match language {
        Language::Zh => Labels {
            trend: "未来趋势",
            daily: "每日概览",
            feels_like: "体感",
        },
        Language::En => Labels {
            trend: "Next hours",
            daily: "Daily overview",
            feels_like: "feels like",
        },
    }
}

fn timeline(day: Option<&DaySummary>, tag: DayTag) -> impl Iterator<Item = Slot<'_>> {
    day.into_iter()
        .flat_map(|d| d.hourly.iter())
        .map(move |sample| Slot { sample, day: tag })
}

/// Selects up to `limit` samples later than `now_hour`, walking today's
/// samples and then tomorrow's. Tomorrow's samples are always later.
pub fn select_next_slots(report: &WeatherReport, now_hour: u8, limit: usize) -> Vec<Slot<'_>> {
    let slots: Vec<Slot<'_>> = timeline(report.today(), DayTag::Today)
        .chain(timeline(report.tomorrow(), DayTag::Tomorrow))
        .filter(|slot| slot.is_after(now_hour))
        .take(limit)
        .collect();
    log::trace!("selected {} slot(s) after {now_hour}:00", slots.len());
    slots
}

/// Escapes text for Pango markup.
fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn describe(code: &CodeOrIconId, provided: Option<&str>, language: Language) -> String {
    let text = match (codes::lookup(code, language), provided) {
        (Some(resolved), _) => resolved.description,
        (None, Some(text)) if !text.trim().is_empty() => text.trim(),
        (None, _) => codes::fallback(language).description,
    };
    escape_markup(text)
}

fn header(report: &WeatherReport, options: &RenderOptions) -> String {
    let mut line = format!(
        "<b>📍 {}</b>: {}",
        escape_markup(&report.area_name),
        describe(&report.current_code, None, options.language)
    );
    if options.show_feels_like {
        line.push_str(&format!(
            " ({} {}°C)",
            labels(options.language).feels_like,
            temperature::display(report.feels_like_c)
        ));
    }
    line
}

fn slot_line(slot: &Slot, language: Language) -> String {
    let sample = slot.sample;
    format!(
        "<tt>{} | {}°C | {}</tt>",
        time::clock_label(sample.hour_of_day),
        temperature::display(sample.temp_c),
        describe(&sample.code, sample.description.as_deref(), language)
    )
}

fn day_line(day: &DaySummary, language: Language) -> String {
    format!(
        "<b>{}</b>: {}~{}°C {}",
        weekday::label(day.date, language),
        temperature::display(day.min_temp_c),
        temperature::display(day.max_temp_c),
        describe(&day.noon_code, None, language)
    )
}

/// Renders the bar text and the tooltip for a report.
///
/// # Arguments
///
/// * 'report' - the parsed report
/// * 'now_hour' - current local hour (0-23), used to pick upcoming slots
/// * 'options' - language and header options
pub fn render(report: &WeatherReport, now_hour: u8, options: &RenderOptions) -> DisplayPayload {
    let language = options.language;
    let labels = labels(language);
    let current = codes::resolve(&report.current_code, language);
    let text = format!(
        "{}{}°C",
        current.icon,
        temperature::display(report.current_temperature_c)
    );

    let mut lines = vec![header(report, options)];

    lines.push(format!("<b>🕐 {}:</b>", labels.trend));
    lines.extend(
        select_next_slots(report, now_hour, NEXT_SLOTS)
            .iter()
            .map(|slot| slot_line(slot, language)),
    );

    lines.push(format!("<b>🗓️ {}:</b>", labels.daily));
    lines.extend(report.days.iter().skip(1).map(|day| day_line(day, language)));

    DisplayPayload {
        text,
        tooltip: lines.join("\n"),
        class: CLASS.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn sample(hour: u8, temp: f64, code: &str) -> HourSample {
        HourSample {
            hour_of_day: hour,
            temp_c: temp,
            code: CodeOrIconId::Wttr(code.to_string()),
            description: None,
        }
    }

    fn day(date: (i32, u32, u32), hours: &[u8]) -> DaySummary {
        DaySummary {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            min_temp_c: 8.0,
            max_temp_c: 17.0,
            hourly: hours
                .iter()
                .map(|h| sample(*h, f64::from(*h), "113"))
                .collect(),
            noon_code: CodeOrIconId::Wttr("116".to_string()),
        }
    }

    /// Today is Monday 2024-01-01.
    fn report() -> WeatherReport {
        WeatherReport {
            current_temperature_c: 12.0,
            current_code: CodeOrIconId::Wttr("113".to_string()),
            feels_like_c: 10.4,
            area_name: "Chengdu".to_string(),
            days: vec![
                day((2024, 1, 1), &[14, 17, 20, 23]),
                day((2024, 1, 2), &[2, 5, 8]),
                day((2024, 1, 3), &[2, 5, 8]),
            ],
        }
    }

    fn picked(slots: &[Slot]) -> Vec<(u8, DayTag)> {
        slots.iter().map(|s| (s.sample.hour_of_day, s.day)).collect()
    }

    #[test]
    fn test_select_stays_within_today() {
        let report = report();
        let slots = select_next_slots(&report, 15, NEXT_SLOTS);
        assert_eq!(
            picked(&slots),
            vec![
                (17, DayTag::Today),
                (20, DayTag::Today),
                (23, DayTag::Today)
            ]
        );
    }

    #[test]
    fn test_select_crosses_midnight() {
        let report = report();
        let slots = select_next_slots(&report, 22, NEXT_SLOTS);
        assert_eq!(
            picked(&slots),
            vec![
                (23, DayTag::Today),
                (2, DayTag::Tomorrow),
                (5, DayTag::Tomorrow)
            ]
        );
    }

    #[test]
    fn test_select_after_last_sample_of_today() {
        let report = report();
        let slots = select_next_slots(&report, 23, NEXT_SLOTS);
        assert_eq!(
            picked(&slots),
            vec![
                (2, DayTag::Tomorrow),
                (5, DayTag::Tomorrow),
                (8, DayTag::Tomorrow)
            ]
        );
    }

    #[test]
    fn test_select_never_exceeds_limit_or_admits_past_hours() {
        let report = report();
        for now in 0..24u8 {
            let slots = select_next_slots(&report, now, NEXT_SLOTS);
            assert!(slots.len() <= NEXT_SLOTS);
            assert!(slots
                .iter()
                .all(|s| s.day == DayTag::Tomorrow || s.sample.hour_of_day > now));
        }
    }

    #[test]
    fn test_select_with_short_timeline() {
        let mut report = report();
        report.days.truncate(1);
        let slots = select_next_slots(&report, 18, NEXT_SLOTS);
        assert_eq!(
            picked(&slots),
            vec![(20, DayTag::Today), (23, DayTag::Today)]
        );

        report.days.clear();
        assert!(select_next_slots(&report, 0, NEXT_SLOTS).is_empty());
    }

    #[test]
    fn test_render_zh() {
        let payload = render(&report(), 22, &RenderOptions::default());
        assert_eq!(payload.text, "☀️ 12°C");
        assert_eq!(payload.class, "weather");
        assert_eq!(
            payload.tooltip,
            [
                "<b>📍 Chengdu</b>: 晴",
                "<b>🕐 未来趋势:</b>",
                "<tt>23:00 | 23°C | 晴</tt>",
                "<tt>02:00 | 2°C | 晴</tt>",
                "<tt>05:00 | 5°C | 晴</tt>",
                "<b>🗓️ 每日概览:</b>",
                "<b>周二</b>: 8~17°C 多云",
                "<b>周三</b>: 8~17°C 多云",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_render_en_with_feels_like() {
        let options = RenderOptions {
            language: Language::En,
            show_feels_like: true,
        };
        let payload = render(&report(), 15, &options);
        let lines: Vec<&str> = payload.tooltip.lines().collect();
        assert_eq!(lines[0], "<b>📍 Chengdu</b>: Sunny (feels like 10°C)");
        assert_eq!(lines[1], "<b>🕐 Next hours:</b>");
        assert_eq!(lines[2], "<tt>17:00 | 17°C | Sunny</tt>");
        assert_eq!(lines[5], "<b>🗓️ Daily overview:</b>");
        assert_eq!(lines[6], "<b>Tue</b>: 8~17°C Partly cloudy");
    }

    #[test]
    fn test_daily_section_skips_today() {
        let report = report();
        let payload = render(&report, 0, &RenderOptions::default());
        let daily: Vec<&str> = payload
            .tooltip
            .lines()
            .skip_while(|l| !l.contains("每日概览"))
            .skip(1)
            .collect();
        assert_eq!(daily.len(), report.days.len() - 1);
        assert!(daily[0].starts_with("<b>周二</b>"));
        assert!(daily[1].starts_with("<b>周三</b>"));
    }

    #[test]
    fn test_unknown_codes_render_placeholder() {
        let mut report = report();
        report.current_code = CodeOrIconId::Wttr("999".to_string());
        report.days[0].hourly[3].code = CodeOrIconId::Wmo(42);
        report.days[1].hourly[0].code = CodeOrIconId::OwmIcon("zz".to_string());
        report.days[1].hourly[0].description = Some("light haze".to_string());

        let payload = render(&report, 22, &RenderOptions::default());
        assert_eq!(payload.text, "12°C");
        let lines: Vec<&str> = payload.tooltip.lines().collect();
        assert_eq!(lines[0], "<b>📍 Chengdu</b>: 未知");
        assert_eq!(lines[2], "<tt>23:00 | 23°C | 未知</tt>");
        assert_eq!(lines[3], "<tt>02:00 | 2°C | light haze</tt>");
    }

    #[test]
    fn test_markup_characters_are_escaped() {
        let mut report = report();
        report.area_name = "Fish & Chips <Bay>".to_string();
        report.days[1].hourly[0].code = CodeOrIconId::OwmIcon("zz".to_string());
        report.days[1].hourly[0].description = Some("rain & <wind>".to_string());

        let payload = render(&report, 22, &RenderOptions::default());
        let lines: Vec<&str> = payload.tooltip.lines().collect();
        assert_eq!(lines[0], "<b>📍 Fish &amp; Chips &lt;Bay&gt;</b>: 晴");
        assert_eq!(lines[3], "<tt>02:00 | 2°C | rain &amp; &lt;wind&gt;</tt>");
        assert_eq!(escape_markup("晴"), "晴");
    }

    #[test]
    fn test_error_payload_is_valid_json() {
        let json = DisplayPayload::error("connection refused").to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["text"], "Err");
        assert_eq!(value["tooltip"], "connection refused");
        assert_eq!(value["class"], "weather");
        assert_eq!(value.as_object().unwrap().len(), 3);

        let blank = DisplayPayload::error("");
        assert!(!blank.tooltip.is_empty());
    }

    #[test]
    fn test_payload_json_escapes_markup_and_newlines() {
        let payload = render(&report(), 22, &RenderOptions::default());
        let value: serde_json::Value = serde_json::from_str(&payload.to_json()).unwrap();
        assert_eq!(value["tooltip"].as_str().unwrap(), payload.tooltip);
        assert!(!payload.to_json().contains('\n'));
    }
}
