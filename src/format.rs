//! Display helpers: local date/time strings from Unix timestamps, unit
//! conversion, and the air-quality lookup table.

use chrono::{DateTime, Datelike, Timelike, Utc};

pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Icon shown instead of the provider's code for "broken clouds".
pub const BROKEN_CLOUDS_ICON: &str = "04.0d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AqiText {
    pub level: &'static str,
    pub message: &'static str,
}

const AQI_TABLE: [AqiText; 5] = [
    AqiText {
        level: "Good",
        message: "Air quality is considered satisfactory, and air pollution poses little or no risk",
    },
    AqiText {
        level: "Fair",
        message: "Air quality is acceptable; however, for some pollutants there may be a moderate health concern for a very small number of people who are unusually sensitive to air pollution.",
    },
    AqiText {
        level: "Moderate",
        message: "Members of sensitive groups may experience health effects. The general public is not likely to be affected.",
    },
    AqiText {
        level: "Poor",
        message: "Everyone may begin to experience health effects; members of sensitive groups may experience more serious health effects",
    },
    AqiText {
        level: "Very Poor",
        message: "Health warnings of emergency conditions. The entire population is more likely to be affected.",
    },
];

/// Shifts a UTC timestamp by the location's offset so the UTC fields read as
/// local wall-clock time.
fn local(unix: i64, tz_offset_seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(unix.saturating_add(tz_offset_seconds), 0).unwrap_or_default()
}

fn twelve_hour(hour: u32) -> (u32, &'static str) {
    let period = if hour >= 12 { "PM" } else { "AM" };
    let h = hour % 12;
    (if h == 0 { 12 } else { h }, period)
}

/// `"Sunday 19, Oct"`
pub fn get_date(unix: i64, tz_offset_seconds: i64) -> String {
    let date = local(unix, tz_offset_seconds);
    let weekday = WEEKDAY_NAMES[date.weekday().num_days_from_sunday() as usize];
    let month = MONTH_NAMES[date.month0() as usize];
    format!("{} {}, {}", weekday, date.day(), month)
}

/// `"6:05 AM"`
pub fn get_time(unix: i64, tz_offset_seconds: i64) -> String {
    let date = local(unix, tz_offset_seconds);
    let (hour, period) = twelve_hour(date.hour());
    format!("{}:{:02} {}", hour, date.minute(), period)
}

/// `"6 PM"`
pub fn get_hours(unix: i64, tz_offset_seconds: i64) -> String {
    let date = local(unix, tz_offset_seconds);
    let (hour, period) = twelve_hour(date.hour());
    format!("{} {}", hour, period)
}

/// Short weekday and day-of-month for the 5-day list, e.g. `("Sunday", "19 Oct")`.
pub fn get_day_label(unix: i64, tz_offset_seconds: i64) -> (&'static str, String) {
    let date = local(unix, tz_offset_seconds);
    let weekday = WEEKDAY_NAMES[date.weekday().num_days_from_sunday() as usize];
    let month = MONTH_NAMES[date.month0() as usize];
    (weekday, format!("{} {}", date.day(), month))
}

pub fn mps_to_kmh(mps: f64) -> f64 {
    mps * 3600.0 / 1000.0
}

pub fn aqi_text(index: u8) -> Option<AqiText> {
    match index {
        1..=5 => Some(AQI_TABLE[usize::from(index) - 1]),
        _ => None,
    }
}

pub fn resolve_icon<'a>(description: &str, icon: &'a str) -> &'a str {
    if description == "broken clouds" {
        BROKEN_CLOUDS_ICON
    } else {
        icon
    }
}

/// Maps an OpenWeatherMap icon code to a terminal glyph.
pub fn icon_glyph(icon: &str) -> &'static str {
    match icon.get(..2) {
        Some("01") => "☀",
        Some("02") => "⛅",
        Some("03") | Some("04") => "☁",
        Some("09") | Some("10") => "🌧",
        Some("11") => "⛈",
        Some("13") => "❄",
        Some("50") => "🌫",
        _ => "·",
    }
}
