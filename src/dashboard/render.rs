//! Plain-text frame for the terminal kiosk.

use std::fmt::Write;

use super::panels::DashboardView;
use crate::weather::WeatherIcon;

const WIDTH: usize = 60;

/// Glyph for a Font Awesome class; blank for anything unknown.
fn glyph(class: &str) -> &'static str {
    WeatherIcon::from_css_class(class)
        .map(WeatherIcon::glyph)
        .unwrap_or(" ")
}

pub fn render(view: &DashboardView) -> String {
    let mut out = String::new();
    let rule = "─".repeat(WIDTH);

    // write! into a String cannot fail
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, " NEOX Hotel Experience{:>w$}", view.clock.time, w = WIDTH - 22);
    let _ = writeln!(out, " {}", view.clock.date);
    if view.offline {
        let _ = writeln!(out, " [offline: showing last known values]");
    }
    let _ = writeln!(out, "{rule}");

    let _ = writeln!(out, " {}", view.guest.guest_name);
    let _ = writeln!(out, " {}", view.guest.room_label);
    let _ = writeln!(out);

    let env = &view.environment;
    let comfort = env
        .comfort
        .map(|c| format!(" ({})", c.label()))
        .unwrap_or_default();
    let _ = writeln!(out, " Room       {}{comfort}", env.temperature);
    let _ = writeln!(out, " Humidity   {}", env.humidity);
    let _ = writeln!(out, " Air        {}", env.air_quality);
    let _ = writeln!(out);

    let weather = &view.weather;
    let _ = writeln!(
        out,
        " {} {}  {}  {}",
        glyph(&weather.icon),
        weather.temperature,
        weather.description,
        weather.location
    );
    if !weather.forecast.is_empty() {
        let line = weather
            .forecast
            .iter()
            .map(|f| format!("{} {} {}", f.time, glyph(&f.icon), f.temperature))
            .collect::<Vec<_>>()
            .join("   ");
        let _ = writeln!(out, " {line}");
    }
    for recommendation in &weather.recommendations {
        let _ = writeln!(out, "  • {}", recommendation.text);
    }
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        " Pillow {}  ·  Mattress {}",
        view.preferences.pillow_type, view.preferences.mattress_type
    );
    let _ = writeln!(out, "{rule}");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::panels::{
        EnvironmentPanel, ForecastLine, GuestPanel, RecommendationLine, WeatherPanel,
    };

    #[test]
    fn test_loading_frame() {
        let frame = render(&DashboardView::loading("401", "Budapest"));
        assert!(frame.contains("--:--"));
        assert!(frame.contains("Room 401"));
        assert!(frame.contains("Budapest"));
        assert!(frame.contains("Pillow Soft"));
        assert!(!frame.contains("offline"));
    }

    #[test]
    fn test_full_frame() {
        let mut view = DashboardView::loading("401", "Budapest");
        view.guest = GuestPanel {
            guest_name: "Mr. and Mrs. Johnson".to_string(),
            room_label: "Presidential Suite 401".to_string(),
        };
        view.environment = EnvironmentPanel::fallback();
        view.weather = WeatherPanel {
            temperature: "24°C".to_string(),
            description: "Sunny".to_string(),
            location: "Budapest".to_string(),
            icon: "fas fa-sun".to_string(),
            forecast: vec![ForecastLine {
                time: "12:00".to_string(),
                temperature: "26°C".to_string(),
                icon: "fas fa-cloud-sun".to_string(),
            }],
            recommendations: vec![RecommendationLine {
                icon: "fas fa-umbrella-beach".to_string(),
                text: "Perfect weather for exploring the city".to_string(),
            }],
        };
        view.offline = true;

        let frame = render(&view);
        assert!(frame.contains("Presidential Suite 401"));
        assert!(frame.contains("☀ 24°C  Sunny  Budapest"));
        assert!(frame.contains("12:00 ⛅ 26°C"));
        assert!(frame.contains("• Perfect weather for exploring the city"));
        assert!(frame.contains("offline"));
    }
}
