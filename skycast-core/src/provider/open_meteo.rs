use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    error::WeatherError,
    model::{Place, WeatherSnapshot},
};

use super::{ForecastProvider, Geocoder};

pub const DEFAULT_GEOCODING_BASE: &str = "https://geocoding-api.open-meteo.com";
pub const DEFAULT_FORECAST_BASE: &str = "https://api.open-meteo.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,weather_code,wind_speed_10m,precipitation";
const HOURLY_FIELDS: &str = "temperature_2m,precipitation_probability,weather_code";
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum,weather_code";

#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    http: Client,
    geocoding_base: String,
    forecast_base: String,
    language: String,
    result_count: u8,
}

impl OpenMeteoProvider {
    pub fn new() -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(WeatherError::Client)?;

        Ok(Self {
            http,
            geocoding_base: DEFAULT_GEOCODING_BASE.to_string(),
            forecast_base: DEFAULT_FORECAST_BASE.to_string(),
            language: "en".to_string(),
            result_count: 8,
        })
    }

    pub fn with_base_urls(mut self, geocoding: &str, forecast: &str) -> Self {
        self.geocoding_base = geocoding.trim_end_matches('/').to_string();
        self.forecast_base = forecast.trim_end_matches('/').to_string();
        self
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    pub fn with_result_count(mut self, count: u8) -> Self {
        self.result_count = count;
        self
    }

    pub fn geocoding_base(&self) -> &str {
        &self.geocoding_base
    }

    pub fn forecast_base(&self) -> &str {
        &self.forecast_base
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        tracing::debug!(endpoint, url, "sending request");

        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| WeatherError::Request { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| WeatherError::Request { endpoint, source })?;

        if !status.is_success() {
            return Err(WeatherError::Status {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| WeatherError::Decode { endpoint, source })
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    // Absent entirely when nothing matches.
    #[serde(default)]
    results: Vec<Place>,
}

#[async_trait]
impl Geocoder for OpenMeteoProvider {
    async fn search(&self, query: &str) -> Result<Vec<Place>, WeatherError> {
        let url = format!("{}/v1/search", self.geocoding_base);
        let parsed: GeocodingResponse = self
            .get_json(
                "geocoding search",
                &url,
                &[
                    ("name", query.to_string()),
                    ("count", self.result_count.to_string()),
                    ("language", self.language.clone()),
                    ("format", "json".to_string()),
                ],
            )
            .await?;

        tracing::debug!(query, results = parsed.results.len(), "geocoding search done");
        Ok(parsed.results)
    }

    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<Place>, WeatherError> {
        let url = format!("{}/v1/reverse", self.geocoding_base);
        let parsed: GeocodingResponse = self
            .get_json(
                "reverse geocoding",
                &url,
                &[
                    ("latitude", latitude.to_string()),
                    ("longitude", longitude.to_string()),
                    ("language", self.language.clone()),
                    ("format", "json".to_string()),
                ],
            )
            .await?;

        Ok(parsed.results.into_iter().next())
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoProvider {
    async fn forecast(&self, place: &Place) -> Result<WeatherSnapshot, WeatherError> {
        let url = format!("{}/v1/forecast", self.forecast_base);
        let timezone = place
            .timezone
            .as_deref()
            .filter(|tz| !tz.is_empty())
            .unwrap_or("auto");

        self.get_json(
            "forecast",
            &url,
            &[
                ("latitude", place.latitude.to_string()),
                ("longitude", place.longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", timezone.to_string()),
            ],
        )
        .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
