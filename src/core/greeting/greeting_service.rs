use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

/// Spanish greeting for an hour of the day (0-23).
pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        6..=11 => "Buenos días",
        12..=17 => "Buenas tardes",
        _ => "Buenas noches",
    }
}

/// Hour of `now` in the given IANA zone. Unknown or missing zones use UTC.
pub fn local_hour(tz_id: Option<&str>, now: DateTime<Utc>) -> u32 {
    let tz: Tz = tz_id
        .and_then(|id| id.parse().ok())
        .unwrap_or(chrono_tz::UTC);
    now.with_timezone(&tz).hour()
}

/// Caption for the homepage cat, e.g. "Buenas tardes, docs".
pub fn homepage_caption(host_app: &str, tz_id: Option<&str>, now: DateTime<Utc>) -> String {
    let greeting = greeting_for_hour(local_hour(tz_id, now));
    format!("{}, {}", greeting, host_app.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, hour, 30, 0).unwrap()
    }

    #[test]
    fn hour_boundaries() {
        assert_eq!(greeting_for_hour(5), "Buenas noches");
        assert_eq!(greeting_for_hour(6), "Buenos días");
        assert_eq!(greeting_for_hour(11), "Buenos días");
        assert_eq!(greeting_for_hour(12), "Buenas tardes");
        assert_eq!(greeting_for_hour(17), "Buenas tardes");
        assert_eq!(greeting_for_hour(18), "Buenas noches");
        assert_eq!(greeting_for_hour(0), "Buenas noches");
    }

    #[test]
    fn local_hour_applies_zone() {
        // Madrid is UTC+1 in January.
        assert_eq!(local_hour(Some("Europe/Madrid"), at(10)), 11);
        assert_eq!(local_hour(Some("America/Mexico_City"), at(10)), 4);
    }

    #[test]
    fn unknown_zone_falls_back_to_utc() {
        assert_eq!(local_hour(Some("Mars/Olympus"), at(10)), 10);
        assert_eq!(local_hour(None, at(23)), 23);
    }

    #[test]
    fn caption_lowercases_host() {
        assert_eq!(
            homepage_caption("DOCS", Some("Europe/Madrid"), at(13)),
            "Buenas tardes, docs"
        );
        assert_eq!(homepage_caption("Drive", None, at(7)), "Buenos días, drive");
    }
}
