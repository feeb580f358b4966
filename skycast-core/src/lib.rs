//! Core library for the `skycast` tool.
//!
//! This crate defines:
//! - Configuration handling
//! - The Open-Meteo geocoding and forecast client, behind provider traits
//! - Shared domain models and the WMO weather code tables
//! - The debounced search → select → render flow over a headless view
//!
//! It is used by `skycast-cli`, but the [`App`] flow can drive any front end.

pub mod app;
pub mod config;
pub mod error;
pub mod geolocation;
pub mod model;
pub mod provider;
pub mod render;
pub mod search;
pub mod view;
pub mod wmo;

pub use app::{App, AppSettings};
pub use config::{Config, LocationConfig};
pub use error::{GeolocationError, WeatherError};
pub use model::{Place, WeatherSnapshot};
pub use provider::{ForecastProvider, Geocoder};
pub use view::{ClickTarget, StatusKind, View};
pub use wmo::Theme;
