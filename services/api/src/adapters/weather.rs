//! services/api/src/adapters/weather.rs
//!
//! This module contains the adapter for the OpenWeather current-conditions API.
//! It implements the `WeatherService` port from the `core` crate.

use async_trait::async_trait;
use seniorsync_core::{
    domain::WeatherSnapshot,
    ports::{PortError, PortResult, WeatherService},
};
use serde::Deserialize;

const OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

//=========================================================================================
// Upstream Wire Types
//=========================================================================================

#[derive(Debug, Deserialize)]
struct OpenWeatherReply {
    main: OpenWeatherMain,
    weather: Vec<OpenWeatherCondition>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherCondition {
    description: String,
    icon: String,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `WeatherService` port against OpenWeather.
#[derive(Clone)]
pub struct OpenWeatherAdapter {
    http: reqwest::Client,
    api_key: String,
}

impl OpenWeatherAdapter {
    /// Creates a new `OpenWeatherAdapter`. The client carries the shared
    /// 10 second bound on every request.
    pub fn new(http: reqwest::Client, api_key: String) -> Self {
        Self { http, api_key }
    }

    /// Title-cases an upstream description ("scattered clouds" -> "Scattered Clouds").
    fn title_case(description: &str) -> String {
        description
            .split_whitespace()
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn map_transport_error(e: reqwest::Error) -> PortError {
        if e.is_timeout() {
            PortError::Timeout
        } else {
            PortError::Upstream(e.to_string())
        }
    }
}

//=========================================================================================
// `WeatherService` Trait Implementation
//=========================================================================================

#[async_trait]
impl WeatherService for OpenWeatherAdapter {
    /// Fetches current conditions in metric units, rounding temperature and
    /// feels-like to the nearest whole degree.
    async fn current(&self, latitude: f64, longitude: f64) -> PortResult<WeatherSnapshot> {
        let response = self
            .http
            .get(OPENWEATHER_URL)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        if !response.status().is_success() {
            return Err(PortError::Upstream(format!(
                "OpenWeather returned status {}",
                response.status()
            )));
        }

        let reply: OpenWeatherReply = response
            .json()
            .await
            .map_err(|e| PortError::Upstream(e.to_string()))?;

        let condition = reply.weather.first().ok_or_else(|| {
            PortError::Upstream("OpenWeather reply contained no conditions".to_string())
        })?;

        Ok(WeatherSnapshot {
            temperature: reply.main.temp.round() as i32,
            description: Self::title_case(&condition.description),
            icon: condition.icon.clone(),
            humidity: reply.main.humidity,
            feels_like: reply.main.feels_like.round() as i32,
            city: reply.name.unwrap_or_else(|| "Your location".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptions_are_title_cased() {
        assert_eq!(OpenWeatherAdapter::title_case("scattered clouds"), "Scattered Clouds");
        assert_eq!(OpenWeatherAdapter::title_case("rain"), "Rain");
        assert_eq!(OpenWeatherAdapter::title_case(""), "");
    }

    #[test]
    fn upstream_reply_rounds_to_whole_degrees() {
        let reply: OpenWeatherReply = serde_json::from_str(
            r#"{"main":{"temp":14.6,"feels_like":13.2,"humidity":71},
                "weather":[{"description":"light rain","icon":"10d"}],
                "name":"Bratislava"}"#,
        )
        .unwrap();
        assert_eq!(reply.main.temp.round() as i32, 15);
        assert_eq!(reply.main.feels_like.round() as i32, 13);
        assert_eq!(reply.name.as_deref(), Some("Bratislava"));
    }
}
