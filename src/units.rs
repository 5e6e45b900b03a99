pub mod time {
    /// Normalizes a provider clock value ("0", "300", "2100") to "HH:00".
    pub fn parse_time(raw: &str) -> String {
        let padded = format!("{:0>4}", raw.trim());
        let hour: String = padded.chars().take(2).collect();
        format!("{hour}:00")
    }

    /// Hour of day encoded in a provider clock value.
    pub fn hour_of(raw: &str) -> Option<u8> {
        parse_time(raw)
            .get(..2)
            .and_then(|h| h.parse::<u8>().ok())
            .filter(|h| *h < 24)
    }

    pub fn clock_label(hour: u8) -> String {
        format!("{hour:02}:00")
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("300"), "03:00");
        assert_eq!(parse_time("0"), "00:00");
        assert_eq!(parse_time("2100"), "21:00");
        assert_eq!(parse_time("0300"), "03:00");
        assert_eq!(parse_time(&parse_time("900").replace(':', "")), "09:00");
    }

    #[test]
    fn test_hour_of() {
        assert_eq!(hour_of("0"), Some(0));
        assert_eq!(hour_of("1200"), Some(12));
        assert_eq!(hour_of("2100"), Some(21));
        assert_eq!(hour_of("2500"), None);
        assert_eq!(hour_of("abc"), None);
    }

    #[test]
    fn test_clock_label() {
        assert_eq!(clock_label(3), "03:00");
        assert_eq!(clock_label(23), "23:00");
    }
}

pub mod temperature {
    /// Whole-degree display value, never "-0".
    pub fn display(temp_c: f64) -> String {
        let rounded = temp_c.round() as i64;
        rounded.to_string()
    }

    #[test]
    fn test_display() {
        assert_eq!(display(12.0), "12");
        assert_eq!(display(12.6), "13");
        assert_eq!(display(-3.4), "-3");
        assert_eq!(display(-0.4), "0");
    }
}

pub mod weekday {
    use chrono::NaiveDate;

    use crate::codes::Language;

    const WEEK_MAP: [(&str, &str); 7] = [
        ("Mon", "周一"),
        ("Tue", "周二"),
        ("Wed", "周三"),
        ("Thu", "周四"),
        ("Fri", "周五"),
        ("Sat", "周六"),
        ("Sun", "周日"),
    ];

    /// Translates an English short weekday name; unknown names pass through.
    pub fn translate(en: &str, language: Language) -> String {
        match language {
            Language::En => en.to_string(),
            Language::Zh => WEEK_MAP
                .iter()
                .find(|(name, _)| *name == en)
                .map(|(_, zh)| zh.to_string())
                .unwrap_or_else(|| en.to_string()),
        }
    }

    pub fn label(date: NaiveDate, language: Language) -> String {
        translate(&date.format("%a").to_string(), language)
    }

    #[test]
    fn test_translate() {
        assert_eq!(translate("Mon", Language::Zh), "周一");
        assert_eq!(translate("Sun", Language::Zh), "周日");
        assert_eq!(translate("Mon", Language::En), "Mon");
        assert_eq!(translate("Montag", Language::Zh), "Montag");
    }

    #[test]
    fn test_label() {
        // 2024-01-01 was a Monday
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(label(date, Language::Zh), "周一");
        assert_eq!(label(date, Language::En), "Mon");
    }
}
