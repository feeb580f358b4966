use crate::{
    Config,
    error::WeatherError,
    model::{Place, WeatherSnapshot},
    provider::open_meteo::OpenMeteoProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod open_meteo;

/// Resolves place names to coordinates and back.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Candidates for a free-text query, in the order the service ranks them.
    async fn search(&self, query: &str) -> Result<Vec<Place>, WeatherError>;

    /// Best match for a coordinate pair, if the service knows one.
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<Place>, WeatherError>;
}

#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn forecast(&self, place: &Place) -> Result<WeatherSnapshot, WeatherError>;
}

/// Construct the Open-Meteo client described by `config`.
pub fn open_meteo_from_config(config: &Config) -> Result<Arc<OpenMeteoProvider>, WeatherError> {
    let provider = OpenMeteoProvider::new()?
        .with_base_urls(&config.geocoding_base_url, &config.forecast_base_url)
        .with_language(&config.language)
        .with_result_count(config.result_count);

    Ok(Arc::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_default_config_uses_public_endpoints() {
        let cfg = Config::default();
        let provider = open_meteo_from_config(&cfg).expect("client should build");

        assert_eq!(provider.geocoding_base(), "https://geocoding-api.open-meteo.com");
        assert_eq!(provider.forecast_base(), "https://api.open-meteo.com");
    }

    #[test]
    fn provider_from_config_trims_trailing_slashes() {
        let cfg = Config {
            geocoding_base_url: "http://127.0.0.1:9000/".into(),
            forecast_base_url: "http://127.0.0.1:9001//".into(),
            ..Config::default()
        };
        let provider = open_meteo_from_config(&cfg).expect("client should build");

        assert_eq!(provider.geocoding_base(), "http://127.0.0.1:9000");
        assert_eq!(provider.forecast_base(), "http://127.0.0.1:9001");
    }
}
