use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
#[display(fmt = "{:.1}°C", _0)]
#[serde(transparent)]
pub struct Temperature(pub f32);

#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
#[display(fmt = "{:.1}%", _0)]
#[serde(transparent)]
pub struct Humidity(pub f32);

/// One measurement as the sensor reports it. Either field may be missing.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Sample {
    pub temperature: Option<Temperature>,
    pub humidity: Option<Humidity>,
}

impl Sample {
    pub fn new(temperature: Temperature, humidity: Humidity) -> Self {
        Sample {
            temperature: Some(temperature),
            humidity: Some(humidity),
        }
    }
}

/// The payload posted upstream each cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub temperature: Temperature,
    pub humidity: Humidity,
    pub location: String,
}

impl Reading {
    pub fn new(temperature: Temperature, humidity: Humidity, location: impl Into<String>) -> Self {
        Reading {
            temperature,
            humidity,
            location: location.into(),
        }
    }
}

/// What the receiving endpoint keeps and hands back on `GET`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestReading {
    pub temperature: Temperature,
    pub humidity: Humidity,
    pub timestamp: String,
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_serializes_to_three_fields_in_order() {
        let reading = Reading::new(Temperature(24.0), Humidity(55.0), "Cold Storage - Mumbai");

        let json = serde_json::to_string(&reading).unwrap();

        assert_eq!(
            json,
            r#"{"temperature":24.0,"humidity":55.0,"location":"Cold Storage - Mumbai"}"#
        );
    }

    #[test]
    fn display_rounds_to_one_decimal() {
        assert_eq!(Temperature(23.46).to_string(), "23.5°C");
        assert_eq!(Humidity(65.0).to_string(), "65.0%");
    }

    #[test]
    fn latest_reading_parses_api_shape() {
        let body = r#"{"temperature":23.5,"humidity":65,"timestamp":"2026-10-15T08:00:00.000Z","location":"Test Location"}"#;

        let latest: LatestReading = serde_json::from_str(body).unwrap();

        assert_eq!(latest.temperature, Temperature(23.5));
        assert_eq!(latest.humidity, Humidity(65.0));
        assert_eq!(latest.location, "Test Location");
    }
}
