//! Formatting of a [`WeatherSnapshot`] into display strings.

use chrono::{NaiveDate, NaiveDateTime};

use crate::{
    model::{CurrentConditions, DailyBlock, ForecastDay, WeatherSnapshot},
    wmo::{self, Theme},
};

const PLACEHOLDER: &str = "—";

/// Round half up, so -2.5 becomes -2 and 2.5 becomes 3.
fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

pub fn fmt_temp(v: f64) -> String {
    format!("{}°C", round_half_up(v))
}

pub fn fmt_percent(v: f64) -> String {
    format!("{}%", round_half_up(v))
}

pub fn fmt_wind(v: f64) -> String {
    format!("{} km/h", round_half_up(v))
}

pub fn fmt_mm(v: Option<f64>) -> String {
    format!("{:.1} mm", v.unwrap_or(0.0))
}

fn fmt_degrees(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{}°", round_half_up(v)),
        None => format!("{PLACEHOLDER}°"),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentView {
    pub temperature: String,
    pub description: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind: String,
    pub precipitation: String,
}

impl CurrentView {
    pub fn from_conditions(c: &CurrentConditions) -> Self {
        Self {
            temperature: fmt_temp(c.temperature),
            description: wmo::describe(c.weather_code).unwrap_or(PLACEHOLDER).to_string(),
            feels_like: fmt_temp(c.apparent_temperature),
            humidity: fmt_percent(c.humidity),
            wind: fmt_wind(c.wind_speed),
            precipitation: fmt_mm(c.precipitation),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDayView {
    /// Weekday abbreviation, e.g. "Mon".
    pub weekday: String,
    /// Month and day, e.g. "Jun 3".
    pub month_day: String,
    /// Empty when the code is not in the table.
    pub description: String,
    /// "hi° / lo°"
    pub temperatures: String,
    /// "💧 x.x mm"
    pub precipitation: String,
}

impl ForecastDayView {
    pub fn from_day(day: &ForecastDay) -> Self {
        let (weekday, month_day) = match NaiveDate::parse_from_str(&day.date, "%Y-%m-%d") {
            Ok(date) => (date.format("%a").to_string(), date.format("%b %-d").to_string()),
            Err(_) => (day.date.clone(), day.date.clone()),
        };

        Self {
            weekday,
            month_day,
            description: day
                .weather_code
                .and_then(wmo::describe)
                .unwrap_or_default()
                .to_string(),
            temperatures: format!("{} / {}", fmt_degrees(day.high), fmt_degrees(day.low)),
            precipitation: format!("💧 {}", fmt_mm(day.precipitation_sum)),
        }
    }
}

pub fn render_forecast(daily: &DailyBlock) -> Vec<ForecastDayView> {
    daily.days().iter().map(ForecastDayView::from_day).collect()
}

/// Everything the view root shows for one successful fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub current: CurrentView,
    pub theme: Theme,
    pub forecast: Vec<ForecastDayView>,
    pub timezone: String,
    pub updated_at: String,
}

pub fn render(snapshot: &WeatherSnapshot) -> Rendered {
    Rendered {
        current: CurrentView::from_conditions(&snapshot.current),
        theme: Theme::from_code(snapshot.current.weather_code),
        forecast: render_forecast(&snapshot.daily),
        timezone: snapshot.timezone.clone(),
        updated_at: fmt_observation_time(&snapshot.current.time),
    }
}

/// Open-Meteo reports local time as "YYYY-MM-DDTHH:MM"; anything else passes through.
pub fn fmt_observation_time(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
