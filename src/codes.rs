use serde::Deserialize;

use crate::weather::CodeOrIconId;

/// Display language of descriptions, weekday names and section titles.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Zh,
    En,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub icon: &'static str,
    pub description: &'static str,
}

/// wttr.in codes: (code, icon, zh, en)
const WTTR_CODES: &[(&str, &str, &str, &str)] = &[
    ("113", "☀️ ", "晴", "Sunny"),
    ("116", "⛅ ", "多云", "Partly cloudy"),
    ("119", "☁️ ", "阴", "Cloudy"),
    ("122", "☁️ ", "阴", "Overcast"),
    ("143", "🌫 ", "薄雾", "Mist"),
    ("176", "🌦 ", "局部小雨", "Patchy rain possible"),
    ("179", "🌧 ", "小雪", "Patchy snow possible"),
    ("182", "🌧 ", "小雨夹雪", "Patchy sleet possible"),
    ("185", "🌧 ", "冻雨", "Patchy freezing drizzle"),
    ("200", "⛈ ", "雷阵雨", "Thundery outbreaks possible"),
    ("227", "🌨 ", "吹雪", "Blowing snow"),
    ("230", "❄️ ", "暴风雪", "Blizzard"),
    ("248", "🌫 ", "雾", "Fog"),
    ("260", "🌫 ", "冻雾", "Freezing fog"),
    ("263", "🌦 ", "小雨", "Patchy light drizzle"),
    ("266", "🌦 ", "小雨", "Light drizzle"),
    ("281", "🌧 ", "冻雨", "Freezing drizzle"),
    ("284", "🌧 ", "冻雨", "Heavy freezing drizzle"),
    ("293", "🌦 ", "局部小雨", "Patchy light rain"),
    ("296", "🌧 ", "小雨", "Light rain"),
    ("299", "🌧 ", "小雨", "Moderate rain at times"),
    ("302", "🌧 ", "中雨", "Moderate rain"),
    ("305", "🌧 ", "中雨", "Heavy rain at times"),
    ("308", "🌧 ", "大雨", "Heavy rain"),
    ("311", "🌧 ", "冻雨", "Light freezing rain"),
    ("314", "🌧 ", "小雨", "Moderate or heavy freezing rain"),
    ("317", "🌧 ", "小雨夹雪", "Light sleet"),
    ("320", "🌨 ", "小雨夹雪", "Moderate or heavy sleet"),
    ("323", "🌨 ", "小雪", "Patchy light snow"),
    ("326", "🌨 ", "小雪", "Light snow"),
    ("329", "❄️ ", "中雪", "Patchy moderate snow"),
    ("332", "❄️ ", "中雪", "Moderate snow"),
    ("335", "❄️ ", "大雪", "Patchy heavy snow"),
    ("338", "❄️ ", "大雪", "Heavy snow"),
    ("350", "🌧 ", "冰雹", "Ice pellets"),
    ("353", "🌦 ", "小雨", "Light rain shower"),
    ("356", "🌧 ", "中雨", "Moderate or heavy rain shower"),
    ("359", "🌧 ", "大雨", "Torrential rain shower"),
    ("362", "🌧 ", "雨夹雪", "Light sleet showers"),
    ("365", "🌧 ", "雨夹雪", "Moderate or heavy sleet showers"),
    ("368", "🌨 ", "小雪", "Light snow showers"),
    ("371", "🌨 ", "中雪", "Moderate or heavy snow showers"),
    ("374", "🌧 ", "小冰雹", "Light showers of ice pellets"),
    ("377", "🌧 ", "冰雹", "Moderate or heavy showers of ice pellets"),
    ("386", "⛈ ", "雷阵雨", "Patchy light rain with thunder"),
    ("389", "⛈ ", "雷暴", "Moderate or heavy rain with thunder"),
    ("392", "⛈ ", "雷雪", "Patchy light snow with thunder"),
    ("395", "❄️ ", "大雪", "Moderate or heavy snow with thunder"),
];

/// WMO 4677 codes as reported by Open-Meteo: (code, icon, zh, en)
const WMO_CODES: &[(u16, &str, &str, &str)] = &[
    (0, "☀️ ", "晴", "Clear sky"),
    (1, "🌤 ", "大部晴朗", "Mainly clear"),
    (2, "⛅ ", "多云", "Partly cloudy"),
    (3, "☁️ ", "阴", "Overcast"),
    (45, "🌫 ", "雾", "Fog"),
    (48, "🌫 ", "冻雾", "Depositing rime fog"),
    (51, "🌦 ", "小毛毛雨", "Light drizzle"),
    (53, "🌦 ", "毛毛雨", "Moderate drizzle"),
    (55, "🌧 ", "大毛毛雨", "Dense drizzle"),
    (56, "🌧 ", "冻毛毛雨", "Light freezing drizzle"),
    (57, "🌧 ", "冻毛毛雨", "Dense freezing drizzle"),
    (61, "🌦 ", "小雨", "Slight rain"),
    (63, "🌧 ", "中雨", "Moderate rain"),
    (65, "🌧 ", "大雨", "Heavy rain"),
    (66, "🌧 ", "冻雨", "Light freezing rain"),
    (67, "🌧 ", "冻雨", "Heavy freezing rain"),
    (71, "🌨 ", "小雪", "Slight snow fall"),
    (73, "🌨 ", "中雪", "Moderate snow fall"),
    (75, "❄️ ", "大雪", "Heavy snow fall"),
    (77, "🌨 ", "雪粒", "Snow grains"),
    (80, "🌦 ", "小阵雨", "Slight rain showers"),
    (81, "🌧 ", "阵雨", "Moderate rain showers"),
    (82, "🌧 ", "强阵雨", "Violent rain showers"),
    (85, "🌨 ", "小阵雪", "Slight snow showers"),
    (86, "❄️ ", "大阵雪", "Heavy snow showers"),
    (95, "⛈ ", "雷阵雨", "Thunderstorm"),
    (96, "⛈ ", "雷阵雨伴小冰雹", "Thunderstorm with slight hail"),
    (99, "⛈ ", "雷阵雨伴大冰雹", "Thunderstorm with heavy hail"),
];

/// OpenWeatherMap icon groups: (prefix, day icon, night icon, zh, en)
const OWM_ICONS: &[(&str, &str, &str, &str, &str)] = &[
    ("01", "☀️ ", "🌙 ", "晴", "Clear sky"),
    ("02", "⛅ ", "☁️ ", "少云", "Few clouds"),
    ("03", "☁️ ", "☁️ ", "多云", "Scattered clouds"),
    ("04", "☁️ ", "☁️ ", "阴", "Broken clouds"),
    ("09", "🌧 ", "🌧 ", "阵雨", "Shower rain"),
    ("10", "🌦 ", "🌧 ", "雨", "Rain"),
    ("11", "⛈ ", "⛈ ", "雷暴", "Thunderstorm"),
    ("13", "❄️ ", "❄️ ", "雪", "Snow"),
    ("50", "🌫 ", "🌫 ", "雾", "Mist"),
];

fn pick(language: Language, zh: &'static str, en: &'static str) -> &'static str {
    match language {
        Language::Zh => zh,
        Language::En => en,
    }
}

/// Placeholder for identifiers missing from every table.
pub fn fallback(language: Language) -> Resolved {
    Resolved {
        icon: "",
        description: pick(language, "未知", "Unknown"),
    }
}

/// Looks an identifier up in its provider's table.
pub fn lookup(id: &CodeOrIconId, language: Language) -> Option<Resolved> {
    match id {
        CodeOrIconId::Wttr(code) => WTTR_CODES
            .iter()
            .find(|(c, ..)| *c == code.trim())
            .map(|&(_, icon, zh, en)| Resolved {
                icon,
                description: pick(language, zh, en),
            }),
        CodeOrIconId::Wmo(code) => WMO_CODES
            .iter()
            .find(|(c, ..)| c == code)
            .map(|&(_, icon, zh, en)| Resolved {
                icon,
                description: pick(language, zh, en),
            }),
        CodeOrIconId::OwmIcon(icon_id) => {
            let prefix = icon_id.get(..2)?;
            let night = icon_id.ends_with('n');
            OWM_ICONS
                .iter()
                .find(|(p, ..)| *p == prefix)
                .map(|&(_, day_icon, night_icon, zh, en)| Resolved {
                    icon: if night { night_icon } else { day_icon },
                    description: pick(language, zh, en),
                })
        }
    }
}

/// Total lookup: unknown identifiers resolve to the fallback.
pub fn resolve(id: &CodeOrIconId, language: Language) -> Resolved {
    lookup(id, language).unwrap_or_else(|| fallback(language))
}
