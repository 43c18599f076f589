use crate::cli::IconMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCategory {
    Sunny,
    Cloudy,
    Rain,
    Snow,
}

impl WeatherCategory {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::Cloudy => "cloudy",
            Self::Rain => "rain",
            Self::Snow => "snow",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionIcon {
    Sun,
    PartlyCloudy,
    Fog,
    Rain,
    Snow,
    Storm,
    Fallback,
}

impl ConditionIcon {
    #[must_use]
    pub fn glyph(self, mode: IconMode) -> &'static str {
        let (ascii, emoji, unicode) = icon_tokens(self);
        match mode {
            IconMode::Ascii => ascii,
            IconMode::Emoji => emoji,
            IconMode::Unicode => unicode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub icon: ConditionIcon,
    pub category: WeatherCategory,
}

/// Maps a provider weather code onto an icon and coarse category.
///
/// Total over `i32`; the rules are checked in order, so codes 1–3 win over
/// the fog band and anything unmatched falls back to a cloudy icon.
#[must_use]
pub fn classify(code: i32) -> Classification {
    let (icon, category) = match code {
        0 => (ConditionIcon::Sun, WeatherCategory::Sunny),
        1..=3 => (ConditionIcon::PartlyCloudy, WeatherCategory::Cloudy),
        45..=48 => (ConditionIcon::Fog, WeatherCategory::Cloudy),
        51..=67 | 80..=82 => (ConditionIcon::Rain, WeatherCategory::Rain),
        71..=77 => (ConditionIcon::Snow, WeatherCategory::Snow),
        95.. => (ConditionIcon::Storm, WeatherCategory::Rain),
        _ => (ConditionIcon::Fallback, WeatherCategory::Cloudy),
    };
    Classification { icon, category }
}

fn icon_tokens(icon: ConditionIcon) -> (&'static str, &'static str, &'static str) {
    match icon {
        ConditionIcon::Sun => ("SUN", "☀️", "☀"),
        ConditionIcon::PartlyCloudy => ("PCL", "⛅", "⛅"),
        ConditionIcon::Fog => ("FOG", "🌫️", "░"),
        ConditionIcon::Rain => ("RAN", "🌧️", "☂"),
        ConditionIcon::Snow => ("SNW", "❄️", "❄"),
        ConditionIcon::Storm => ("THN", "⛈️", "⚡"),
        ConditionIcon::Fallback => ("CLD", "🌤️", "☁"),
    }
}
