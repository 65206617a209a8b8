// =============================================================================
// WEATHER ICONS
// =============================================================================
// OpenWeather reports conditions as two digits plus a day/night suffix
// ("01d", "10n", ...). The display uses Font Awesome classes. Both sides are
// closed sets, so the mapping is an exhaustive match rather than a lookup
// table that can silently miss a key.
// =============================================================================

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Provider condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionCode {
    ClearDay,
    ClearNight,
    FewCloudsDay,
    FewCloudsNight,
    ScatteredCloudsDay,
    ScatteredCloudsNight,
    BrokenCloudsDay,
    BrokenCloudsNight,
    ShowerRainDay,
    ShowerRainNight,
    RainDay,
    RainNight,
    ThunderstormDay,
    ThunderstormNight,
    SnowDay,
    SnowNight,
    MistDay,
    MistNight,
}

impl FromStr for ConditionCode {
    type Err = UnknownCondition;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        use ConditionCode::*;

        Ok(match code {
            "01d" => ClearDay,
            "01n" => ClearNight,
            "02d" => FewCloudsDay,
            "02n" => FewCloudsNight,
            "03d" => ScatteredCloudsDay,
            "03n" => ScatteredCloudsNight,
            "04d" => BrokenCloudsDay,
            "04n" => BrokenCloudsNight,
            "09d" => ShowerRainDay,
            "09n" => ShowerRainNight,
            "10d" => RainDay,
            "10n" => RainNight,
            "11d" => ThunderstormDay,
            "11n" => ThunderstormNight,
            "13d" => SnowDay,
            "13n" => SnowNight,
            "50d" => MistDay,
            "50n" => MistNight,
            other => return Err(UnknownCondition(other.to_string())),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown weather condition code {0:?}")]
pub struct UnknownCondition(pub String);

/// Icon shown on the display. Serialized as its Font Awesome class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherIcon {
    #[serde(rename = "fas fa-sun")]
    Sun,
    #[serde(rename = "fas fa-moon")]
    Moon,
    #[serde(rename = "fas fa-cloud-sun")]
    CloudSun,
    #[serde(rename = "fas fa-cloud-moon")]
    CloudMoon,
    #[serde(rename = "fas fa-cloud")]
    Cloud,
    #[serde(rename = "fas fa-cloud-rain")]
    CloudRain,
    #[serde(rename = "fas fa-cloud-sun-rain")]
    CloudSunRain,
    #[serde(rename = "fas fa-cloud-moon-rain")]
    CloudMoonRain,
    #[serde(rename = "fas fa-bolt")]
    Bolt,
    #[serde(rename = "fas fa-snowflake")]
    Snowflake,
    #[serde(rename = "fas fa-smog")]
    Smog,
}

impl WeatherIcon {
    /// Used for codes the provider adds after this table was written.
    pub const DEFAULT: WeatherIcon = WeatherIcon::Cloud;

    const ALL: [WeatherIcon; 11] = [
        WeatherIcon::Sun,
        WeatherIcon::Moon,
        WeatherIcon::CloudSun,
        WeatherIcon::CloudMoon,
        WeatherIcon::Cloud,
        WeatherIcon::CloudRain,
        WeatherIcon::CloudSunRain,
        WeatherIcon::CloudMoonRain,
        WeatherIcon::Bolt,
        WeatherIcon::Snowflake,
        WeatherIcon::Smog,
    ];

    /// Maps a raw provider code, falling back to `DEFAULT`.
    pub fn from_code(code: &str) -> Self {
        code.parse::<ConditionCode>()
            .map(Self::from)
            .unwrap_or(Self::DEFAULT)
    }

    pub fn css_class(self) -> &'static str {
        match self {
            WeatherIcon::Sun => "fas fa-sun",
            WeatherIcon::Moon => "fas fa-moon",
            WeatherIcon::CloudSun => "fas fa-cloud-sun",
            WeatherIcon::CloudMoon => "fas fa-cloud-moon",
            WeatherIcon::Cloud => "fas fa-cloud",
            WeatherIcon::CloudRain => "fas fa-cloud-rain",
            WeatherIcon::CloudSunRain => "fas fa-cloud-sun-rain",
            WeatherIcon::CloudMoonRain => "fas fa-cloud-moon-rain",
            WeatherIcon::Bolt => "fas fa-bolt",
            WeatherIcon::Snowflake => "fas fa-snowflake",
            WeatherIcon::Smog => "fas fa-smog",
        }
    }

    pub fn from_css_class(class: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|icon| icon.css_class() == class)
    }

    /// Terminal stand-in for the icon font.
    pub fn glyph(self) -> &'static str {
        match self {
            WeatherIcon::Sun => "☀",
            WeatherIcon::Moon => "☾",
            WeatherIcon::CloudSun | WeatherIcon::CloudMoon => "⛅",
            WeatherIcon::Cloud => "☁",
            WeatherIcon::CloudRain | WeatherIcon::CloudSunRain | WeatherIcon::CloudMoonRain => "☂",
            WeatherIcon::Bolt => "⚡",
            WeatherIcon::Snowflake => "❄",
            WeatherIcon::Smog => "≋",
        }
    }
}

impl From<ConditionCode> for WeatherIcon {
    fn from(code: ConditionCode) -> Self {
        use ConditionCode::*;

        match code {
            ClearDay => WeatherIcon::Sun,
            ClearNight => WeatherIcon::Moon,
            FewCloudsDay => WeatherIcon::CloudSun,
            FewCloudsNight => WeatherIcon::CloudMoon,
            ScatteredCloudsDay | ScatteredCloudsNight | BrokenCloudsDay | BrokenCloudsNight => {
                WeatherIcon::Cloud
            }
            ShowerRainDay | ShowerRainNight => WeatherIcon::CloudRain,
            RainDay => WeatherIcon::CloudSunRain,
            RainNight => WeatherIcon::CloudMoonRain,
            ThunderstormDay | ThunderstormNight => WeatherIcon::Bolt,
            SnowDay | SnowNight => WeatherIcon::Snowflake,
            MistDay | MistNight => WeatherIcon::Smog,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_day_and_night_pair() {
        assert_eq!(WeatherIcon::from_code("01d"), WeatherIcon::Sun);
        assert_eq!(WeatherIcon::from_code("01n"), WeatherIcon::Moon);
    }

    #[test]
    fn test_day_night_variants_share_icon() {
        for (day, night) in [("03d", "03n"), ("04d", "04n"), ("09d", "09n"), ("11d", "11n"), ("13d", "13n"), ("50d", "50n")] {
            assert_eq!(WeatherIcon::from_code(day), WeatherIcon::from_code(night), "{day}/{night}");
        }
    }

    #[test]
    fn test_unknown_code_maps_to_default() {
        assert_eq!(WeatherIcon::from_code("99x"), WeatherIcon::Cloud);
        assert_eq!(WeatherIcon::from_code(""), WeatherIcon::DEFAULT);
        assert!("07d".parse::<ConditionCode>().is_err());
    }

    #[test]
    fn test_serializes_as_css_class() {
        for icon in WeatherIcon::ALL {
            let json = serde_json::to_value(icon).unwrap();
            assert_eq!(json, icon.css_class());
            assert_eq!(WeatherIcon::from_css_class(icon.css_class()), Some(icon));
        }
    }
}
