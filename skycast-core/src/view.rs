//! Headless model of the single screen: the search input, the suggestion
//! panel, the status line and the weather card.

use crate::{
    model::Place,
    render::{CurrentView, ForecastDayView, Rendered},
    wmo::Theme,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Info,
    Loading,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Status {
    pub text: String,
    pub kind: StatusKind,
}

#[derive(Debug, Clone, Default)]
pub struct SuggestionPanel {
    items: Vec<Place>,
    visible: bool,
}

impl SuggestionPanel {
    /// Replace the candidates; the panel is only shown when there are any.
    pub fn show(&mut self, items: Vec<Place>) {
        self.visible = !items.is_empty();
        self.items = items;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn get(&self, index: usize) -> Option<&Place> {
        self.items.get(index)
    }

    pub fn labels(&self) -> Vec<String> {
        self.items.iter().map(Place::display_name).collect()
    }
}

/// Where a pointer click landed, for outside-click dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    SearchInput,
    SuggestionPanel,
    Elsewhere,
}

#[derive(Debug, Clone, Default)]
pub struct View {
    pub query: String,
    pub status: Status,
    pub suggestions: SuggestionPanel,
    pub place_title: String,
    pub coordinates: String,
    pub timezone: String,
    pub current: Option<CurrentView>,
    pub forecast: Vec<ForecastDayView>,
    theme: Option<Theme>,
}

impl View {
    pub fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Status { text: text.into(), kind };
    }

    pub fn show_place(&mut self, place: &Place) {
        self.place_title = place.display_name();
        self.coordinates = place.coordinates_label();
    }

    /// The single thematic class on the view root, if any weather has been shown.
    pub fn theme(&self) -> Option<Theme> {
        self.theme
    }

    /// Replaces whatever category was active; there is never more than one.
    pub fn apply_theme(&mut self, theme: Theme) {
        self.theme = Some(theme);
    }

    /// Swap in a freshly rendered snapshot; nothing of the previous one is kept.
    pub fn apply(&mut self, rendered: Rendered) {
        self.current = Some(rendered.current);
        self.apply_theme(rendered.theme);
        self.forecast = rendered.forecast;
        self.timezone = rendered.timezone;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(name: &str) -> Place {
        Place {
            name: name.into(),
            admin1: None,
            country: Some("India".into()),
            latitude: 1.0,
            longitude: 2.0,
            timezone: None,
        }
    }

    #[test]
    fn empty_results_keep_panel_hidden() {
        let mut panel = SuggestionPanel::default();
        panel.show(vec![]);
        assert!(!panel.is_visible());

        panel.show(vec![place("Pune"), place("Puri")]);
        assert!(panel.is_visible());
        assert_eq!(panel.labels(), vec!["Pune, India", "Puri, India"]);
    }

    #[test]
    fn only_one_theme_is_ever_active() {
        let mut view = View::default();
        assert_eq!(view.theme(), None);

        view.apply_theme(Theme::Rainy);
        view.apply_theme(Theme::Sunny);
        assert_eq!(view.theme(), Some(Theme::Sunny));
    }
}
