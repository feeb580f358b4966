//! Static WMO weather code tables used by the Open-Meteo API.
//!
//! See <https://open-meteo.com/en/docs#weathervariables>.

/// Human-readable description of a WMO code, `None` for codes outside the table.
pub fn describe(code: i32) -> Option<&'static str> {
    let text = match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow",
        73 => "Moderate snow",
        75 => "Heavy snow",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => return None,
    };
    Some(text)
}

/// Thematic category applied to the view root for the current conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Sunny,
    Cloudy,
    Foggy,
    Drizzle,
    Rainy,
    Snowy,
    Stormy,
}

impl Theme {
    /// Map a WMO code onto its category. Codes outside every group are `Cloudy`.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 | 1 => Theme::Sunny,
            2 | 3 => Theme::Cloudy,
            45 | 48 => Theme::Foggy,
            51 | 53 | 55 => Theme::Drizzle,
            61 | 63 | 65 | 80 | 81 | 82 => Theme::Rainy,
            71 | 73 | 75 | 85 | 86 => Theme::Snowy,
            95 | 96 | 99 => Theme::Stormy,
            _ => Theme::Cloudy,
        }
    }

    pub fn as_class(&self) -> &'static str {
        match self {
            Theme::Sunny => "sunny",
            Theme::Cloudy => "cloudy",
            Theme::Foggy => "foggy",
            Theme::Drizzle => "drizzle",
            Theme::Rainy => "rainy",
            Theme::Snowy => "snowy",
            Theme::Stormy => "stormy",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_class())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_maps_to_its_group() {
        let groups: [(Theme, &[i32]); 7] = [
            (Theme::Sunny, &[0, 1]),
            (Theme::Cloudy, &[2, 3]),
            (Theme::Foggy, &[45, 48]),
            (Theme::Drizzle, &[51, 53, 55]),
            (Theme::Rainy, &[61, 63, 65, 80, 81, 82]),
            (Theme::Snowy, &[71, 73, 75, 85, 86]),
            (Theme::Stormy, &[95, 96, 99]),
        ];

        for code in 0..=99 {
            let expected = groups
                .iter()
                .find(|(_, codes)| codes.contains(&code))
                .map_or(Theme::Cloudy, |(theme, _)| *theme);
            assert_eq!(Theme::from_code(code), expected, "code {code}");
        }
    }

    #[test]
    fn grouped_codes() {
        assert_eq!(Theme::from_code(1), Theme::Sunny);
        assert_eq!(Theme::from_code(2), Theme::Cloudy);
        assert_eq!(Theme::from_code(48), Theme::Foggy);
        assert_eq!(Theme::from_code(55), Theme::Drizzle);
        assert_eq!(Theme::from_code(81), Theme::Rainy);
        assert_eq!(Theme::from_code(86), Theme::Snowy);
        assert_eq!(Theme::from_code(99), Theme::Stormy);
    }

    #[test]
    fn codes_outside_the_groups_default_to_cloudy() {
        // Freezing drizzle/rain and snow grains have descriptions but no group.
        for code in [56, 57, 66, 67, 77, 4, 100, -1] {
            assert_eq!(Theme::from_code(code), Theme::Cloudy, "code {code}");
        }
    }

    #[test]
    fn describe_known_and_unknown() {
        assert_eq!(describe(0), Some("Clear sky"));
        assert_eq!(describe(96), Some("Thunderstorm with slight hail"));
        assert_eq!(describe(4), None);
    }

    #[test]
    fn class_names_are_lowercase() {
        assert_eq!(Theme::Stormy.as_class(), "stormy");
        assert_eq!(Theme::Drizzle.to_string(), "drizzle");
    }
}
