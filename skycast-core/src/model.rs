use serde::Deserialize;

/// A geocoded place as returned by the Open-Meteo geocoding API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Place {
    pub name: String,
    #[serde(default)]
    pub admin1: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub timezone: Option<String>,
}

impl Place {
    /// Synthetic place used when reverse geocoding gives us nothing.
    pub fn current_location(latitude: f64, longitude: f64) -> Self {
        Self {
            name: "Current location".to_string(),
            admin1: None,
            country: None,
            latitude,
            longitude,
            timezone: None,
        }
    }

    /// "name, region, country", skipping absent or empty parts.
    pub fn display_name(&self) -> String {
        [Some(self.name.as_str()), self.admin1.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn coordinates_label(&self) -> String {
        format!("{:.3}, {:.3}", self.latitude, self.longitude)
    }
}

/// Everything the forecast endpoint returns for one place.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherSnapshot {
    pub timezone: String,
    pub current: CurrentConditions,
    /// Requested alongside the rest but not rendered.
    #[serde(default)]
    pub hourly: Option<HourlyBlock>,
    pub daily: DailyBlock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentConditions {
    /// Local ISO 8601 time without offset, e.g. "2024-06-01T14:15".
    pub time: String,
    #[serde(rename = "temperature_2m")]
    pub temperature: f64,
    pub apparent_temperature: f64,
    #[serde(rename = "relative_humidity_2m")]
    pub humidity: f64,
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed: f64,
    #[serde(default)]
    pub precipitation: Option<f64>,
    pub weather_code: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HourlyBlock {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default, rename = "temperature_2m")]
    pub temperature: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_probability: Vec<Option<f64>>,
    #[serde(default)]
    pub weather_code: Vec<Option<i32>>,
}

/// Daily forecast as parallel arrays indexed by day.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyBlock {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub weather_code: Vec<Option<i32>>,
    #[serde(default, rename = "temperature_2m_max")]
    pub temperature_max: Vec<Option<f64>>,
    #[serde(default, rename = "temperature_2m_min")]
    pub temperature_min: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_sum: Vec<Option<f64>>,
}

/// One day of the forecast, i.e. the i-th entry of every daily array.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: String,
    pub weather_code: Option<i32>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub precipitation_sum: Option<f64>,
}

impl DailyBlock {
    /// Zip the parallel arrays into per-day records, stopping at the shortest array.
    pub fn days(&self) -> Vec<ForecastDay> {
        self.time
            .iter()
            .zip(&self.weather_code)
            .zip(&self.temperature_max)
            .zip(&self.temperature_min)
            .zip(&self.precipitation_sum)
            .map(|((((date, code), high), low), precipitation)| ForecastDay {
                date: date.clone(),
                weather_code: *code,
                high: *high,
                low: *low,
                precipitation_sum: *precipitation,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(admin1: Option<&str>, country: Option<&str>) -> Place {
        Place {
            name: "Kolkata".into(),
            admin1: admin1.map(Into::into),
            country: country.map(Into::into),
            latitude: 22.56263,
            longitude: 88.36304,
            timezone: None,
        }
    }

    #[test]
    fn display_name_joins_present_parts() {
        assert_eq!(
            place(Some("West Bengal"), Some("India")).display_name(),
            "Kolkata, West Bengal, India"
        );
        assert_eq!(place(None, Some("India")).display_name(), "Kolkata, India");
        assert_eq!(place(Some(""), None).display_name(), "Kolkata");
    }

    #[test]
    fn coordinates_use_three_decimals() {
        assert_eq!(place(None, None).coordinates_label(), "22.563, 88.363");
    }

    #[test]
    fn place_parses_with_extra_fields() {
        let json = r#"{
            "id": 1275004, "name": "Kolkata", "latitude": 22.56263, "longitude": 88.36304,
            "elevation": 9.0, "country_code": "IN", "timezone": "Asia/Kolkata",
            "country": "India", "admin1": "West Bengal"
        }"#;
        let p: Place = serde_json::from_str(json).expect("valid place");
        assert_eq!(p.admin1.as_deref(), Some("West Bengal"));
        assert_eq!(p.timezone.as_deref(), Some("Asia/Kolkata"));
    }

    #[test]
    fn days_pairs_ith_entries() {
        let daily = DailyBlock {
            time: vec!["2024-06-01".into(), "2024-06-02".into(), "2024-06-03".into()],
            weather_code: vec![Some(0), Some(61), Some(95)],
            temperature_max: vec![Some(30.0), Some(28.4), Some(27.0)],
            temperature_min: vec![Some(20.0), Some(21.0), Some(19.5)],
            precipitation_sum: vec![Some(0.0), Some(3.14), None],
        };

        let days = daily.days();
        assert_eq!(days.len(), 3);
        assert_eq!(days[1].date, "2024-06-02");
        assert_eq!(days[1].weather_code, Some(61));
        assert_eq!(days[1].high, Some(28.4));
        assert_eq!(days[1].low, Some(21.0));
        assert_eq!(days[1].precipitation_sum, Some(3.14));
        assert_eq!(days[2].precipitation_sum, None);
    }

    #[test]
    fn days_stops_at_shortest_array() {
        let daily = DailyBlock {
            time: vec!["2024-06-01".into(), "2024-06-02".into()],
            weather_code: vec![Some(0)],
            temperature_max: vec![Some(1.0), Some(2.0)],
            temperature_min: vec![Some(1.0), Some(2.0)],
            precipitation_sum: vec![None, None],
        };
        assert_eq!(daily.days().len(), 1);
    }
}
