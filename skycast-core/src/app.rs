//! The search → select → render flow over a shared [`View`].
//!
//! [`App`] is a cheap handle; clones share one view and one search session.
//! Locks are never held across an `.await`.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use crate::{
    Config,
    error::{GeolocationError, WeatherError},
    geolocation::{FixedPosition, Locator, PositionOptions, PositionSource},
    model::Place,
    provider::{ForecastProvider, Geocoder, open_meteo_from_config},
    render,
    search::{DEFAULT_DEBOUNCE, SearchSession},
    view::{ClickTarget, StatusKind, View},
};

pub const MSG_SEARCHING: &str = "Searching places…";
pub const MSG_PICK: &str = "Pick a place from the list.";
pub const MSG_NO_MATCHES: &str = "No matches. Try a different query.";
pub const MSG_SEARCH_FAILED: &str = "Search failed. Check your connection.";
pub const MSG_FETCHING: &str = "Fetching latest weather…";
pub const MSG_WEATHER_FAILED: &str = "Failed to fetch weather. Try another location.";
pub const MSG_LOCATING: &str = "Getting your location…";
pub const MSG_GEO_UNSUPPORTED: &str = "Geolocation is not supported on this device.";
pub const MSG_GEO_DENIED: &str = "Location access denied. Search by name instead.";

/// Delay before a clicked suggestion list closes, so the click completes first.
pub const DISMISS_DELAY: Duration = Duration::from_millis(120);

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub debounce: Duration,
    pub dismiss_delay: Duration,
    pub default_place: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            dismiss_delay: DISMISS_DELAY,
            default_place: "Kolkata".to_string(),
        }
    }
}

#[derive(Debug)]
struct Inner {
    geocoder: Arc<dyn Geocoder>,
    forecasts: Arc<dyn ForecastProvider>,
    locator: Locator,
    settings: AppSettings,
    view: Mutex<View>,
    session: Mutex<SearchSession>,
}

#[derive(Debug, Clone)]
pub struct App {
    inner: Arc<Inner>,
}

impl App {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        forecasts: Arc<dyn ForecastProvider>,
        locator: Locator,
        settings: AppSettings,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                geocoder,
                forecasts,
                locator,
                settings,
                view: Mutex::new(View::default()),
                session: Mutex::new(SearchSession::default()),
            }),
        }
    }

    /// Wire the Open-Meteo client and, if configured, a fixed position source.
    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        let open_meteo = open_meteo_from_config(config)?;

        let source = config.location.map(|loc| {
            Arc::new(FixedPosition {
                latitude: loc.latitude,
                longitude: loc.longitude,
            }) as Arc<dyn PositionSource>
        });

        let settings = AppSettings {
            debounce: config.debounce(),
            default_place: config.default_place.clone(),
            ..AppSettings::default()
        };

        Ok(Self::new(
            open_meteo.clone(),
            open_meteo,
            Locator::new(source, PositionOptions::default()),
            settings,
        ))
    }

    fn view(&self) -> MutexGuard<'_, View> {
        self.inner.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn session(&self) -> MutexGuard<'_, SearchSession> {
        self.inner.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current screen state.
    pub fn snapshot(&self) -> View {
        self.view().clone()
    }

    fn set_status(&self, text: &str, kind: StatusKind) {
        self.view().set_status(text, kind);
    }

    /// The search input changed. Must be called from within a tokio runtime.
    ///
    /// Restarts the debounce timer; an empty query hides the suggestions instead.
    pub fn on_input(&self, text: &str) {
        self.view().query = text.to_string();

        let query = text.trim().to_string();
        if query.is_empty() {
            self.session().reset();
            let mut view = self.view();
            view.suggestions.hide();
            if view.status.text == MSG_SEARCHING {
                view.set_status("", StatusKind::Info);
            }
            return;
        }

        let app = self.clone();
        let debounce = self.inner.settings.debounce;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            // Detached so a later keystroke aborts only the timer, never the request.
            let search = tokio::spawn(async move { app.run_search(query).await });
            let _ = search.await;
        });
        self.session().replace_pending(handle);
    }

    /// Wait for the pending debounced search, if any, to run to completion.
    pub async fn flush_search(&self) {
        let pending = self.session().take_pending();
        if let Some(handle) = pending {
            // An aborted timer is not an error here.
            let _ = handle.await;
        }
    }

    async fn run_search(&self, query: String) {
        let token = {
            let mut session = self.session();
            if !session.begin_dispatch(&query) {
                tracing::debug!(%query, "query unchanged, skipping search");
                return;
            }
            session.searches.issue()
        };

        self.set_status(MSG_SEARCHING, StatusKind::Loading);
        let result = self.inner.geocoder.search(&query).await;

        if !self.session().searches.is_latest(token) {
            tracing::debug!(%query, token, "discarding stale search response");
            return;
        }

        let mut view = self.view();
        match result {
            Ok(places) => {
                let found = !places.is_empty();
                view.suggestions.show(places);
                if found {
                    view.set_status(MSG_PICK, StatusKind::Info);
                } else {
                    view.set_status(MSG_NO_MATCHES, StatusKind::Info);
                }
            }
            Err(err) => {
                tracing::warn!(%query, error = %err, "place search failed");
                view.set_status(MSG_SEARCH_FAILED, StatusKind::Error);
            }
        }
    }

    /// A click somewhere on the screen; outside the input and the panel it closes the panel.
    pub fn on_click(&self, target: ClickTarget) {
        if target == ClickTarget::Elsewhere {
            self.view().suggestions.hide();
        }
    }

    /// Commit the suggestion at `index`. Returns `false` if there is no such suggestion.
    pub async fn choose_suggestion(&self, index: usize) -> bool {
        let place = {
            let mut view = self.view();
            let Some(place) = view.suggestions.get(index).cloned() else {
                return false;
            };
            view.query = place.display_name();
            place
        };

        let app = self.clone();
        let delay = self.inner.settings.dismiss_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            app.view().suggestions.hide();
        });

        self.select_place(place).await;
        true
    }

    /// Fetch and render weather for `place`.
    ///
    /// On failure the previously rendered weather stays on screen.
    pub async fn select_place(&self, place: Place) {
        let token = self.session().weather.issue();
        {
            let mut view = self.view();
            view.show_place(&place);
            view.set_status(MSG_FETCHING, StatusKind::Loading);
        }

        let result = self.inner.forecasts.forecast(&place).await;

        if !self.session().weather.is_latest(token) {
            tracing::debug!(place = %place.name, token, "discarding stale weather response");
            return;
        }

        match result {
            Ok(snapshot) => {
                let rendered = render::render(&snapshot);
                let status = format!("Updated: {}", rendered.updated_at);
                tracing::info!(place = %place.display_name(), theme = %rendered.theme, "weather updated");

                let mut view = self.view();
                view.apply(rendered);
                view.set_status(status, StatusKind::Info);
            }
            Err(err) => {
                tracing::error!(place = %place.display_name(), error = %err, "weather fetch failed");
                self.set_status(MSG_WEATHER_FAILED, StatusKind::Error);
            }
        }
    }

    /// The "use my location" entry point.
    pub async fn use_location(&self) {
        if !self.inner.locator.is_supported() {
            self.set_status(MSG_GEO_UNSUPPORTED, StatusKind::Error);
            return;
        }

        self.set_status(MSG_LOCATING, StatusKind::Loading);
        let position = match self.inner.locator.locate().await {
            Ok(position) => position,
            Err(GeolocationError::Unsupported) => {
                self.set_status(MSG_GEO_UNSUPPORTED, StatusKind::Error);
                return;
            }
            Err(err) => {
                tracing::warn!(error = %err, "geolocation failed");
                self.set_status(MSG_GEO_DENIED, StatusKind::Error);
                return;
            }
        };

        let place = match self
            .inner
            .geocoder
            .reverse(position.latitude, position.longitude)
            .await
        {
            Ok(Some(place)) => place,
            Ok(None) => Place::current_location(position.latitude, position.longitude),
            Err(err) => {
                tracing::debug!(error = %err, "reverse geocoding failed, using raw coordinates");
                Place::current_location(position.latitude, position.longitude)
            }
        };

        self.select_place(place).await;
    }

    /// Prefill the input with the default place and show its weather.
    ///
    /// A failed or empty lookup is silently ignored.
    pub async fn startup(&self) {
        let default_place = self.inner.settings.default_place.clone();
        self.view().query = default_place.clone();

        match self.inner.geocoder.search(&default_place).await {
            Ok(places) => {
                if let Some(first) = places.into_iter().next() {
                    self.select_place(first).await;
                }
            }
            Err(err) => {
                tracing::debug!(place = %default_place, error = %err, "startup lookup failed");
            }
        }
    }
}
