use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use reqwest::blocking::Client;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::codes::Language;
use crate::config::{Config, Provider};
use crate::errors::WxError;
use crate::weather::{noon_code, CodeOrIconId, DaySummary, HourSample, WeatherReport};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const SEARCH_URL: &str = "https://www.bing.com/search";

/// Something that can produce a `WeatherReport` and a web page for its location.
pub trait WeatherSource {
    fn fetch(&self) -> Result<WeatherReport, WxError>;

    fn page_url(&self) -> Result<String, WxError>;
}

/// Builds the configured source with a shared blocking client.
pub fn from_config(config: &Config) -> Result<Box<dyn WeatherSource>, WxError> {
    let client = build_client(config.timeout_secs)?;
    let source: Box<dyn WeatherSource> = match config.provider {
        Provider::Wttr => Box::new(wttr::Wttr::new(client, &config.location, config.language)),
        Provider::OpenMeteo => {
            let (lat, lon) = config.coordinates().ok_or_else(|| {
                WxError::Config("open-meteo needs latitude and longitude".to_string())
            })?;
            let area = config
                .area_name
                .clone()
                .unwrap_or_else(|| format!("{lat},{lon}"));
            Box::new(open_meteo::OpenMeteo::new(client, lat, lon, area))
        }
        Provider::OpenWeatherMap => {
            let key = config
                .api_key
                .clone()
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| WxError::Config("openweathermap needs an api_key".to_string()))?;
            let place = match config.coordinates() {
                Some((lat, lon)) => owm::Place::Coordinates(lat, lon),
                None if !config.location.trim().is_empty() => {
                    owm::Place::City(config.location.trim().to_string())
                }
                None => {
                    return Err(WxError::Config(
                        "openweathermap needs a location or coordinates".to_string(),
                    ))
                }
            };
            Box::new(owm::OpenWeatherMap::new(client, place, key, config.language))
        }
    };
    Ok(source)
}

/// Generic web search for the place, used when the provider page can't be resolved.
pub fn search_url(term: &str) -> String {
    Url::parse_with_params(SEARCH_URL, &[("q", term)])
        .map(String::from)
        .unwrap_or_else(|_| SEARCH_URL.to_string())
}

fn build_client(timeout_secs: u64) -> Result<Client, WxError> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .build()?;
    Ok(client)
}

/// Query parameters never written to the log.
const SECRET_PARAMS: [&str; 1] = ["appid"];

fn redacted(url: &Url) -> String {
    if url.query().is_none() {
        return url.to_string();
    }
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if SECRET_PARAMS.iter().any(|secret| *secret == k) {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    let mut shown = url.clone();
    shown.query_pairs_mut().clear().extend_pairs(pairs);
    shown.to_string()
}

fn get_web_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    query: &[(&str, String)],
) -> Result<T, WxError> {
    let request = client.get(url).query(query).build()?;
    log::debug!("GET {}", redacted(request.url()));
    let body = client.execute(request)?.error_for_status()?.text()?;
    Ok(serde_json::from_str(&body)?)
}

fn number(field: &str, value: &str) -> Result<f64, WxError> {
    value
        .trim()
        .parse()
        .map_err(|_| WxError::Report(format!("{field} is not a number: {value:?}")))
}

fn date(value: &str) -> Result<NaiveDate, WxError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| WxError::Report(format!("bad date {value:?}: {e}")))
}

fn require_days(report: WeatherReport) -> Result<WeatherReport, WxError> {
    if report.days.is_empty() {
        Err(WxError::Report("no forecast days in response".to_string()))
    } else {
        Ok(report)
    }
}

pub mod wttr {
    use super::*;
    use crate::units::time::hour_of;

    const BASE_URL: &str = "https://wttr.in";

    #[derive(Deserialize, Debug)]
    pub struct Value {
        pub value: String,
    }

    fn first(values: &[Value]) -> Option<&str> {
        values.first().map(|v| v.value.as_str())
    }

    #[derive(Deserialize, Debug)]
    pub struct Condition {
        #[serde(rename = "temp_C")]
        pub temp_c: String,

        #[serde(rename = "FeelsLikeC")]
        pub feels_like_c: String,

        #[serde(rename = "weatherCode")]
        pub weather_code: String,
    }

    #[derive(Deserialize, Debug)]
    pub struct Area {
        #[serde(rename = "areaName")]
        pub area_name: Vec<Value>,
    }

    #[derive(Deserialize, Debug)]
    pub struct Hourly {
        pub time: String,

        #[serde(rename = "tempC")]
        pub temp_c: String,

        #[serde(rename = "weatherCode")]
        pub weather_code: String,

        #[serde(rename = "weatherDesc", default)]
        pub weather_desc: Vec<Value>,

        #[serde(rename = "lang_zh", default)]
        pub lang_zh: Vec<Value>,
    }

    #[derive(Deserialize, Debug)]
    pub struct Day {
        pub date: String,

        #[serde(rename = "mintempC")]
        pub min_temp_c: String,

        #[serde(rename = "maxtempC")]
        pub max_temp_c: String,

        pub hourly: Vec<Hourly>,
    }

    /// The `format=j1` document
    #[derive(Deserialize, Debug)]
    pub struct Report {
        pub current_condition: Vec<Condition>,

        #[serde(default)]
        pub nearest_area: Vec<Area>,

        pub weather: Vec<Day>,
    }

    impl Report {
        pub fn area(&self) -> Option<&str> {
            self.nearest_area.first().and_then(|a| first(&a.area_name))
        }

        pub fn into_report(self, language: Language) -> Result<WeatherReport, WxError> {
            let area_name = self.area().unwrap_or_default().to_string();
            let current = self
                .current_condition
                .first()
                .ok_or_else(|| WxError::Report("missing current_condition".to_string()))?;

            let days = self
                .weather
                .iter()
                .map(|day| day.to_summary(language))
                .collect::<Result<Vec<_>, _>>()?;

            require_days(WeatherReport {
                current_temperature_c: number("temp_C", &current.temp_c)?,
                current_code: CodeOrIconId::Wttr(current.weather_code.clone()),
                feels_like_c: number("FeelsLikeC", &current.feels_like_c)?,
                area_name,
                days,
            })
        }
    }

    impl Day {
        fn to_summary(&self, language: Language) -> Result<DaySummary, WxError> {
            let hourly = self
                .hourly
                .iter()
                .map(|h| h.to_sample(language))
                .collect::<Result<Vec<_>, _>>()?;
            let noon = noon_code(&hourly)
                .ok_or_else(|| WxError::Report(format!("no hourly data for {}", self.date)))?;

            Ok(DaySummary {
                date: date(&self.date)?,
                min_temp_c: number("mintempC", &self.min_temp_c)?,
                max_temp_c: number("maxtempC", &self.max_temp_c)?,
                hourly,
                noon_code: noon,
            })
        }
    }

    impl Hourly {
        fn to_sample(&self, language: Language) -> Result<HourSample, WxError> {
            let hour_of_day = hour_of(&self.time)
                .ok_or_else(|| WxError::Report(format!("bad hourly time {:?}", self.time)))?;
            let description = match language {
                Language::Zh => first(&self.lang_zh).or_else(|| first(&self.weather_desc)),
                Language::En => first(&self.weather_desc),
            };

            Ok(HourSample {
                hour_of_day,
                temp_c: number("tempC", &self.temp_c)?,
                code: CodeOrIconId::Wttr(self.weather_code.clone()),
                description: description.map(str::to_string),
            })
        }
    }

    pub struct Wttr {
        client: Client,
        location: String,
        language: Language,
    }

    impl Wttr {
        pub fn new(client: Client, location: &str, language: Language) -> Self {
            Self {
                client,
                location: location.trim().to_string(),
                language,
            }
        }

        fn request(&self) -> Result<Report, WxError> {
            let url = location_url(&self.location)?;
            let mut query = vec![("format", "j1".to_string())];
            if self.language == Language::Zh {
                query.push(("lang", "zh".to_string()));
            }
            get_web_json(&self.client, url.as_str(), &query)
        }
    }

    /// wttr.in url for a place, with the place encoded as a single path segment.
    fn location_url(location: &str) -> Result<Url, WxError> {
        let mut url = Url::parse(BASE_URL).map_err(|e| WxError::Url(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| WxError::Url(format!("{BASE_URL} cannot take a path")))?
            .pop_if_empty()
            .push(location);
        Ok(url)
    }

    impl WeatherSource for Wttr {
        fn fetch(&self) -> Result<WeatherReport, WxError> {
            self.request()?.into_report(self.language)
        }

        fn page_url(&self) -> Result<String, WxError> {
            let report = self.request()?;
            let area = report
                .area()
                .filter(|a| !a.trim().is_empty())
                .ok_or_else(|| WxError::Report("wttr.in returned no nearest area".to_string()))?;
            Ok(location_url(area)?.into())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        const FIXTURE: &str = r#"{
            "current_condition": [
                {"temp_C": "12", "FeelsLikeC": "10", "weatherCode": "116",
                 "weatherDesc": [{"value": "Partly cloudy"}]}
            ],
            "nearest_area": [{"areaName": [{"value": "Chenghua"}]}],
            "weather": [
                {"date": "2024-01-01", "mintempC": "6", "maxtempC": "14", "hourly": [
                    {"time": "0", "tempC": "7", "weatherCode": "113",
                     "weatherDesc": [{"value": "Clear"}], "lang_zh": [{"value": "晴朗"}]},
                    {"time": "1200", "tempC": "13", "weatherCode": "116",
                     "weatherDesc": [{"value": "Partly cloudy"}]},
                    {"time": "2100", "tempC": "8", "weatherCode": "119",
                     "weatherDesc": [{"value": "Cloudy"}]}
                ]},
                {"date": "2024-01-02", "mintempC": "-1", "maxtempC": "9", "hourly": [
                    {"time": "300", "tempC": "0", "weatherCode": "326",
                     "weatherDesc": [{"value": "Light snow"}]},
                    {"time": "1200", "tempC": "8", "weatherCode": "302",
                     "weatherDesc": [{"value": "Moderate rain"}]}
                ]}
            ]
        }"#;

        fn parsed() -> Report {
            serde_json::from_str(FIXTURE).unwrap()
        }

        #[test]
        fn test_into_report() {
            let report = parsed().into_report(Language::Zh).unwrap();
            assert_eq!(report.area_name, "Chenghua");
            assert_eq!(report.current_temperature_c, 12.0);
            assert_eq!(report.feels_like_c, 10.0);
            assert_eq!(report.current_code, CodeOrIconId::Wttr("116".into()));
            assert_eq!(report.days.len(), 2);

            let today = &report.days[0];
            assert_eq!(today.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
            let hours: Vec<u8> = today.hourly.iter().map(|h| h.hour_of_day).collect();
            assert_eq!(hours, vec![0, 12, 21]);
            assert_eq!(today.hourly[0].description.as_deref(), Some("晴朗"));
            let noon = &today.hourly[1];
            assert_eq!(noon.description.as_deref(), Some("Partly cloudy"));

            let tomorrow = &report.days[1];
            assert_eq!(tomorrow.min_temp_c, -1.0);
            assert_eq!(tomorrow.hourly[0].hour_of_day, 3);
            assert_eq!(tomorrow.noon_code, CodeOrIconId::Wttr("302".into()));
        }

        #[test]
        fn test_english_descriptions() {
            let report = parsed().into_report(Language::En).unwrap();
            let midnight = &report.days[0].hourly[0];
            assert_eq!(midnight.description.as_deref(), Some("Clear"));
        }

        #[test]
        fn test_malformed_values_are_errors() {
            let mut report = parsed();
            report.current_condition[0].temp_c = "warm".to_string();
            assert!(matches!(report.into_report(Language::Zh), Err(WxError::Report(_))));

            let mut report = parsed();
            report.weather.clear();
            assert!(matches!(report.into_report(Language::Zh), Err(WxError::Report(_))));

            let mut report = parsed();
            report.weather[1].hourly.clear();
            assert!(matches!(report.into_report(Language::Zh), Err(WxError::Report(_))));
        }

        #[test]
        fn test_location_is_one_path_segment() {
            let url = location_url("a?b#c/d").unwrap();
            assert_eq!(url.as_str(), "https://wttr.in/a%3Fb%23c%2Fd");
            assert_eq!(url.query(), None);

            let plain = location_url("Paris").unwrap();
            assert_eq!(plain.as_str(), "https://wttr.in/Paris");
            let empty = location_url("").unwrap();
            assert_eq!(empty.as_str(), "https://wttr.in/");
            let chinese = location_url("成华,成都").unwrap();
            assert!(chinese.as_str().starts_with("https://wttr.in/%E6%88%90"));
        }

        #[test]
        fn test_missing_keys_fail_to_parse() {
            let result: Result<Report, _> = serde_json::from_str(r#"{"weather": []}"#);
            assert!(result.is_err());
        }
    }
}

pub mod open_meteo {
    use super::*;

    const BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

    const FORECAST_DAYS: u8 = 3;

    #[derive(Deserialize, Debug)]
    pub struct Current {
        pub temperature_2m: f64,
        pub apparent_temperature: f64,
        pub weather_code: u16,
    }

    #[derive(Deserialize, Debug)]
    pub struct Hourly {
        pub time: Vec<String>,
        pub temperature_2m: Vec<f64>,
        pub weather_code: Vec<u16>,
    }

    #[derive(Deserialize, Debug)]
    pub struct Daily {
        pub time: Vec<String>,
        pub weather_code: Vec<u16>,
        pub temperature_2m_min: Vec<f64>,
        pub temperature_2m_max: Vec<f64>,
    }

    #[derive(Deserialize, Debug)]
    pub struct Response {
        pub current: Current,
        pub hourly: Hourly,
        pub daily: Daily,
    }

    fn at<T: Copy>(values: &[T], i: usize, field: &str) -> Result<T, WxError> {
        values
            .get(i)
            .copied()
            .ok_or_else(|| WxError::Report(format!("{field} has no entry {i}")))
    }

    impl Response {
        fn hourly_samples(&self) -> Result<Vec<(NaiveDate, HourSample)>, WxError> {
            self.hourly
                .time
                .iter()
                .enumerate()
                .map(|(i, stamp)| -> Result<(NaiveDate, HourSample), WxError> {
                    let at_time = NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M")
                        .map_err(|e| WxError::Report(format!("bad hourly time {stamp:?}: {e}")))?;
                    let temp_c = at(&self.hourly.temperature_2m, i, "hourly.temperature_2m")?;
                    let code = at(&self.hourly.weather_code, i, "hourly.weather_code")?;
                    let sample = HourSample {
                        hour_of_day: at_time.hour() as u8,
                        temp_c,
                        code: CodeOrIconId::Wmo(code),
                        description: None,
                    };
                    Ok((at_time.date(), sample))
                })
                .collect()
        }

        pub fn into_report(self, area_name: &str) -> Result<WeatherReport, WxError> {
            let samples = self.hourly_samples()?;

            let mut days = Vec::with_capacity(self.daily.time.len());
            for (i, stamp) in self.daily.time.iter().enumerate() {
                let day = date(stamp)?;
                let hourly = samples
                    .iter()
                    .filter(|(d, _)| *d == day)
                    .map(|(_, s)| s.clone())
                    .collect();
                let daily = &self.daily;
                days.push(DaySummary {
                    date: day,
                    min_temp_c: at(&daily.temperature_2m_min, i, "daily.temperature_2m_min")?,
                    max_temp_c: at(&daily.temperature_2m_max, i, "daily.temperature_2m_max")?,
                    hourly,
                    noon_code: CodeOrIconId::Wmo(at(&daily.weather_code, i, "daily.weather_code")?),
                });
            }

            require_days(WeatherReport {
                current_temperature_c: self.current.temperature_2m,
                current_code: CodeOrIconId::Wmo(self.current.weather_code),
                feels_like_c: self.current.apparent_temperature,
                area_name: area_name.to_string(),
                days,
            })
        }
    }

    pub struct OpenMeteo {
        client: Client,
        lat: f64,
        lon: f64,
        area_name: String,
    }

    impl OpenMeteo {
        pub fn new(client: Client, lat: f64, lon: f64, area_name: String) -> Self {
            Self {
                client,
                lat,
                lon,
                area_name,
            }
        }
    }

    impl WeatherSource for OpenMeteo {
        fn fetch(&self) -> Result<WeatherReport, WxError> {
            let query = [
                ("latitude", self.lat.to_string()),
                ("longitude", self.lon.to_string()),
                ("current", "temperature_2m,apparent_temperature,weather_code".to_string()),
                ("hourly", "temperature_2m,weather_code".to_string()),
                ("daily", "weather_code,temperature_2m_min,temperature_2m_max".to_string()),
                ("timezone", "auto".to_string()),
                ("forecast_days", FORECAST_DAYS.to_string()),
            ];
            let response: Response = get_web_json(&self.client, BASE_URL, &query)?;
            response.into_report(&self.area_name)
        }

        fn page_url(&self) -> Result<String, WxError> {
            let url = Url::parse_with_params(
                "https://open-meteo.com/en/docs",
                &[
                    ("latitude", self.lat.to_string()),
                    ("longitude", self.lon.to_string()),
                ],
            )
            .map_err(|e| WxError::Url(e.to_string()))?;
            Ok(url.into())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        const FIXTURE: &str = r#"{
            "latitude": 30.66, "longitude": 104.06,
            "current": {"time": "2024-01-01T15:00", "temperature_2m": 11.6,
                        "apparent_temperature": 9.2, "weather_code": 2},
            "hourly": {
                "time": ["2024-01-01T00:00", "2024-01-01T12:00", "2024-01-01T23:00",
                         "2024-01-02T00:00", "2024-01-02T01:00"],
                "temperature_2m": [5.0, 12.5, 7.1, 6.8, 6.2],
                "weather_code": [0, 2, 3, 61, 63]
            },
            "daily": {
                "time": ["2024-01-01", "2024-01-02"],
                "weather_code": [2, 63],
                "temperature_2m_min": [4.9, 5.5],
                "temperature_2m_max": [13.0, 9.4]
            }
        }"#;

        fn parsed() -> Response {
            serde_json::from_str(FIXTURE).unwrap()
        }

        fn hours(day: &DaySummary) -> Vec<u8> {
            day.hourly.iter().map(|h| h.hour_of_day).collect()
        }

        #[test]
        fn test_into_report() {
            let report = parsed().into_report("Chengdu").unwrap();
            assert_eq!(report.area_name, "Chengdu");
            assert_eq!(report.current_code, CodeOrIconId::Wmo(2));
            assert_eq!(report.feels_like_c, 9.2);
            assert_eq!(report.days.len(), 2);

            assert_eq!(hours(&report.days[0]), vec![0, 12, 23]);
            assert_eq!(hours(&report.days[1]), vec![0, 1]);
            assert_eq!(report.days[1].hourly[1].code, CodeOrIconId::Wmo(63));
            assert_eq!(report.days[1].noon_code, CodeOrIconId::Wmo(63));
            assert_eq!(report.days[1].max_temp_c, 9.4);
        }

        #[test]
        fn test_short_arrays_are_errors() {
            let mut response = parsed();
            response.hourly.temperature_2m.pop();
            assert!(matches!(response.into_report("x"), Err(WxError::Report(_))));

            let mut response = parsed();
            response.daily.temperature_2m_max.clear();
            assert!(matches!(response.into_report("x"), Err(WxError::Report(_))));
        }
    }
}

pub mod owm {
    use chrono::{DateTime, FixedOffset};

    use super::*;

    const BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

    #[derive(Debug, Clone, PartialEq)]
    pub enum Place {
        City(String),
        Coordinates(f64, f64),
    }

    #[derive(Deserialize, Debug)]
    pub struct Condition {
        pub icon: String,

        #[serde(default)]
        pub description: String,
    }

    #[derive(Deserialize, Debug)]
    pub struct Main {
        pub temp: f64,

        #[serde(default)]
        pub feels_like: f64,
    }

    /// `/weather` response
    #[derive(Deserialize, Debug)]
    pub struct Current {
        pub id: u64,
        pub name: String,
        pub dt: i64,
        pub timezone: i32,
        pub main: Main,
        pub weather: Vec<Condition>,
    }

    #[derive(Deserialize, Debug)]
    pub struct Entry {
        pub dt: i64,
        pub main: Main,
        pub weather: Vec<Condition>,
    }

    #[derive(Deserialize, Debug)]
    pub struct City {
        pub name: String,
        pub timezone: i32,
    }

    /// `/forecast` response, 3-hour steps
    #[derive(Deserialize, Debug)]
    pub struct Forecast {
        pub list: Vec<Entry>,
        pub city: City,
    }

    fn local_time(dt: i64, offset: &FixedOffset) -> Result<DateTime<FixedOffset>, WxError> {
        DateTime::from_timestamp(dt, 0)
            .map(|t| t.with_timezone(offset))
            .ok_or_else(|| WxError::Report(format!("bad timestamp {dt}")))
    }

    fn offset(seconds: i32) -> Result<FixedOffset, WxError> {
        FixedOffset::east_opt(seconds)
            .ok_or_else(|| WxError::Report(format!("bad utc offset {seconds}")))
    }

    fn condition(weather: &[Condition]) -> Result<&Condition, WxError> {
        weather
            .first()
            .ok_or_else(|| WxError::Report("missing weather condition".to_string()))
    }

    fn summarize(date: NaiveDate, hourly: Vec<HourSample>) -> Result<DaySummary, WxError> {
        let noon = noon_code(&hourly)
            .ok_or_else(|| WxError::Report(format!("no forecast slots for {date}")))?;
        let (min, max) = hourly
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), h| {
                (lo.min(h.temp_c), hi.max(h.temp_c))
            });
        Ok(DaySummary {
            date,
            min_temp_c: min,
            max_temp_c: max,
            hourly,
            noon_code: noon,
        })
    }

    /// Buckets forecast slots into local days and makes sure `days[0]` is today,
    /// even late in the evening when no slot of today is left.
    pub fn into_report(current: Current, forecast: Forecast) -> Result<WeatherReport, WxError> {
        let tz = offset(forecast.city.timezone)?;
        let now = condition(&current.weather)?;
        let today = local_time(current.dt, &offset(current.timezone)?)?.date_naive();

        let mut buckets: Vec<(NaiveDate, Vec<HourSample>)> = Vec::new();
        for entry in &forecast.list {
            let at_time = local_time(entry.dt, &tz)?;
            let cond = condition(&entry.weather)?;
            let sample = HourSample {
                hour_of_day: at_time.hour() as u8,
                temp_c: entry.main.temp,
                code: CodeOrIconId::OwmIcon(cond.icon.clone()),
                description: Some(cond.description.clone()).filter(|d| !d.is_empty()),
            };
            let day = at_time.date_naive();
            match buckets.last_mut() {
                Some((date, samples)) if *date == day => samples.push(sample),
                _ => buckets.push((day, vec![sample])),
            }
        }
        buckets.retain(|(date, _)| *date >= today);

        let mut days = Vec::with_capacity(buckets.len() + 1);
        if buckets.first().map(|(date, _)| *date) != Some(today) {
            days.push(DaySummary {
                date: today,
                min_temp_c: current.main.temp,
                max_temp_c: current.main.temp,
                hourly: Vec::new(),
                noon_code: CodeOrIconId::OwmIcon(now.icon.clone()),
            });
        }
        for (date, hourly) in buckets {
            days.push(summarize(date, hourly)?);
        }

        let area_name = if current.name.is_empty() {
            forecast.city.name
        } else {
            current.name
        };

        require_days(WeatherReport {
            current_temperature_c: current.main.temp,
            current_code: CodeOrIconId::OwmIcon(now.icon.clone()),
            feels_like_c: current.main.feels_like,
            area_name,
            days,
        })
    }

    pub struct OpenWeatherMap {
        client: Client,
        place: Place,
        api_key: String,
        language: Language,
    }

    impl OpenWeatherMap {
        pub fn new(client: Client, place: Place, api_key: String, language: Language) -> Self {
            Self {
                client,
                place,
                api_key,
                language,
            }
        }

        fn query(&self) -> Vec<(&'static str, String)> {
            let mut query = match &self.place {
                Place::City(name) => vec![("q", name.clone())],
                Place::Coordinates(lat, lon) => {
                    vec![("lat", lat.to_string()), ("lon", lon.to_string())]
                }
            };
            let lang = match self.language {
                Language::Zh => "zh_cn",
                Language::En => "en",
            };
            query.push(("units", "metric".to_string()));
            query.push(("lang", lang.to_string()));
            query.push(("appid", self.api_key.clone()));
            query
        }

        fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, WxError> {
            let url = format!("{BASE_URL}/{endpoint}");
            get_web_json(&self.client, &url, &self.query()).map_err(WxError::without_url)
        }
    }

    impl WeatherSource for OpenWeatherMap {
        fn fetch(&self) -> Result<WeatherReport, WxError> {
            let current: Current = self.get("weather")?;
            let forecast: Forecast = self.get("forecast")?;
            into_report(current, forecast)
        }

        fn page_url(&self) -> Result<String, WxError> {
            let current: Current = self.get("weather")?;
            Ok(format!("https://openweathermap.org/city/{}", current.id))
        }
    }

}
