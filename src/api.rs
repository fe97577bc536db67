use crate::config::ApiConfig;
use crate::error::{Result, WeatherError};
use crate::models::{
    AirPollutionResponse, Coordinates, CurrentWeatherResponse, ForecastResponse, GeocodingDto,
    Location,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Builds OpenWeatherMap request URLs. The API key is appended last so
/// [`redact`] can cut it off for logging.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base_url: String,
    api_key: String,
    units: String,
}

impl Endpoints {
    pub fn new(base_url: &str, api_key: &str, units: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            units: units.to_string(),
        }
    }

    pub fn current_weather(&self, at: Coordinates) -> String {
        format!(
            "{}/data/2.5/weather?lat={}&lon={}&units={}&appid={}",
            self.base_url, at.lat, at.lon, self.units, self.api_key
        )
    }

    pub fn forecast(&self, at: Coordinates) -> String {
        format!(
            "{}/data/2.5/forecast?lat={}&lon={}&units={}&appid={}",
            self.base_url, at.lat, at.lon, self.units, self.api_key
        )
    }

    pub fn air_pollution(&self, at: Coordinates) -> String {
        format!(
            "{}/data/2.5/air_pollution?lat={}&lon={}&appid={}",
            self.base_url, at.lat, at.lon, self.api_key
        )
    }

    pub fn reverse_geo(&self, at: Coordinates) -> String {
        format!(
            "{}/geo/1.0/reverse?lat={}&lon={}&limit=5&appid={}",
            self.base_url, at.lat, at.lon, self.api_key
        )
    }

    pub fn geo(&self, query: &str) -> String {
        format!(
            "{}/geo/1.0/direct?q={}&limit=5&appid={}",
            self.base_url,
            urlencoding::encode(query),
            self.api_key
        )
    }
}

/// Strips the `appid` parameter from a URL.
pub fn redact(url: &str) -> &str {
    url.split("&appid=").next().unwrap_or(url)
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    endpoints: Endpoints,
}

impl WeatherClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoints: Endpoints::new(&config.base_url, &config.key, &config.units),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// GETs `url` and decodes the JSON body into `T`.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET {}", redact(url));
        let res = self.client.get(url).send().await?;

        let status = res.status();
        if !status.is_success() {
            warn!("{} returned HTTP {}", redact(url), status);
            return Err(WeatherError::Status {
                status: status.as_u16(),
                url: redact(url).to_string(),
            });
        }

        let body = res.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| WeatherError::Decode(e.to_string()))
    }

    pub async fn current_weather(&self, at: Coordinates) -> Result<CurrentWeatherResponse> {
        self.fetch_json(&self.endpoints.current_weather(at)).await
    }

    pub async fn forecast(&self, at: Coordinates) -> Result<ForecastResponse> {
        self.fetch_json(&self.endpoints.forecast(at)).await
    }

    pub async fn air_pollution(&self, at: Coordinates) -> Result<AirPollutionResponse> {
        self.fetch_json(&self.endpoints.air_pollution(at)).await
    }

    pub async fn reverse_geo(&self, at: Coordinates) -> Result<Vec<Location>> {
        let raw: Vec<GeocodingDto> = self.fetch_json(&self.endpoints.reverse_geo(at)).await?;
        Ok(raw.into_iter().map(Location::from).collect())
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Location>> {
        let raw: Vec<GeocodingDto> = self.fetch_json(&self.endpoints.geo(query)).await?;
        Ok(raw.into_iter().map(Location::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> Endpoints {
        Endpoints::new("https://api.openweathermap.org/", "KEY", "metric")
    }

    #[test]
    fn weather_urls_carry_coordinates_units_and_key() {
        let at = Coordinates::new(51.5073219, -0.1276474);
        assert_eq!(
            endpoints().current_weather(at),
            "https://api.openweathermap.org/data/2.5/weather?lat=51.5073219&lon=-0.1276474&units=metric&appid=KEY"
        );
        assert_eq!(
            endpoints().forecast(at),
            "https://api.openweathermap.org/data/2.5/forecast?lat=51.5073219&lon=-0.1276474&units=metric&appid=KEY"
        );
    }

    #[test]
    fn air_pollution_has_no_units() {
        let url = endpoints().air_pollution(Coordinates::new(1.0, 2.0));
        assert_eq!(
            url,
            "https://api.openweathermap.org/data/2.5/air_pollution?lat=1&lon=2&appid=KEY"
        );
    }

    #[test]
    fn geocoding_urls() {
        assert_eq!(
            endpoints().reverse_geo(Coordinates::new(1.5, 2.5)),
            "https://api.openweathermap.org/geo/1.0/reverse?lat=1.5&lon=2.5&limit=5&appid=KEY"
        );
        assert_eq!(
            endpoints().geo("São Paulo"),
            "https://api.openweathermap.org/geo/1.0/direct?q=S%C3%A3o%20Paulo&limit=5&appid=KEY"
        );
    }

    #[test]
    fn redact_drops_the_key() {
        let url = endpoints().geo("London");
        assert_eq!(
            redact(&url),
            "https://api.openweathermap.org/geo/1.0/direct?q=London&limit=5"
        );
        assert_eq!(redact("http://x/y"), "http://x/y");
    }
}
