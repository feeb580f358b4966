//! Plain-text rendering of the headless [`View`].

use std::fmt::{self, Write};

use skycast_core::{StatusKind, View};

pub fn status_line(view: &View) -> String {
    match view.status.kind {
        StatusKind::Info => view.status.text.clone(),
        StatusKind::Loading => format!("… {}", view.status.text),
        StatusKind::Error => format!("error: {}", view.status.text),
    }
}

pub fn suggestions(view: &View) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for (i, label) in view.suggestions.labels().iter().enumerate() {
        writeln!(out, "{:>2}. {label}", i + 1)?;
    }
    Ok(out)
}

/// The weather card: place, current conditions, theme and forecast.
pub fn weather_card(view: &View) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let Some(current) = &view.current else {
        return Ok(out);
    };

    writeln!(out, "{}  ({})", view.place_title, view.coordinates)?;
    if let Some(theme) = view.theme() {
        writeln!(out, "[{theme}]  {}", view.timezone)?;
    }
    writeln!(out)?;
    writeln!(out, "  {}  {}", current.temperature, current.description)?;
    writeln!(out, "  Feels like     {}", current.feels_like)?;
    writeln!(out, "  Humidity       {}", current.humidity)?;
    writeln!(out, "  Wind           {}", current.wind)?;
    writeln!(out, "  Precipitation  {}", current.precipitation)?;

    if !view.forecast.is_empty() {
        writeln!(out)?;
        for day in &view.forecast {
            writeln!(
                out,
                "  {:<4}{:<8}{:<30}{:<12}{}",
                day.weekday, day.month_day, day.description, day.temperatures, day.precipitation
            )?;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_view_has_no_card() {
        assert_eq!(weather_card(&View::default()), Ok(String::new()));
    }

    #[test]
    fn no_suggestions_render_nothing() {
        assert_eq!(suggestions(&View::default()), Ok(String::new()));
    }

    #[test]
    fn status_prefix_follows_kind() {
        let mut view = View::default();
        view.set_status("Search failed. Check your connection.", StatusKind::Error);
        assert_eq!(status_line(&view), "error: Search failed. Check your connection.");

        view.set_status("Pick a place from the list.", StatusKind::Info);
        assert_eq!(status_line(&view), "Pick a place from the list.");
    }
}
