//! Weather text normalization and icon classification.
//!
//! JMA weather descriptions come as dense compound phrases ("晴時々くもり",
//! "雨後くもり所により雷"). Normalization inserts reading separators and
//! unifies the "later" connective so the display layer shows one stable
//! shape.

use serde::{Deserialize, Serialize};

/// Ordered substitution table. Applied exactly once, top to bottom; later
/// entries must not re-match text inserted by earlier ones.
const SUBSTITUTIONS: [(&str, &str); 4] = [
    ("\u{3000}", ""),        // drop full-width spaces
    ("時々", "、時々"),      // separator before "sometimes"
    ("所により", "、所により"), // separator before "in some places"
    ("後", "のち"),          // "later" -> "followed by"
];

/// Normalize an upstream weather description.
pub fn normalize(text: &str) -> String {
    SUBSTITUTIONS
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Weather categories in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherKind {
    Snow,
    Thunderstorm,
    Rain,
    Cloudy,
    Clear,
    Unknown,
}

impl WeatherKind {
    /// Classify a weather description by substring containment.
    ///
    /// The first matching category in priority order wins, so
    /// "大雪のち晴れ" is [`WeatherKind::Snow`] even though a clear-sky
    /// substring is also present.
    pub fn classify(text: &str) -> Self {
        if text.contains('雪') {
            Self::Snow
        } else if text.contains('雷') {
            Self::Thunderstorm
        } else if text.contains('雨') {
            Self::Rain
        } else if text.contains("くもり") || text.contains('曇') {
            Self::Cloudy
        } else if text.contains('晴') {
            Self::Clear
        } else {
            Self::Unknown
        }
    }

    /// Display glyph for the category.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Snow => "❄️",
            Self::Thunderstorm => "⛈",
            Self::Rain => "🌧",
            Self::Cloudy => "☁️",
            Self::Clear => "☀️",
            Self::Unknown => "🌈",
        }
    }

    /// Short machine-readable label, used in logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Snow => "snow",
            Self::Thunderstorm => "thunderstorm",
            Self::Rain => "rain",
            Self::Cloudy => "cloudy",
            Self::Clear => "clear",
            Self::Unknown => "unknown",
        }
    }
}
