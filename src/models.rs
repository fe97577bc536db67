//! Wire types for the OpenWeatherMap API and the domain types the dashboard
//! renders.
//!
//! The `*Response` structs mirror the JSON the provider returns. They are
//! converted into the flat domain structs through `From` so the rest of the
//! crate never touches nested upstream shapes.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

// Upstream payloads

#[derive(Debug, Clone, Deserialize)]
pub struct ConditionDto {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainDto {
    pub temp: f64,
    pub feels_like: f64,
    #[serde(default)]
    pub temp_max: f64,
    pub pressure: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SysDto {
    pub sunrise: i64,
    pub sunset: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WindDto {
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub deg: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeatherResponse {
    pub weather: Vec<ConditionDto>,
    pub main: MainDto,
    #[serde(default)]
    pub visibility: f64,
    pub sys: SysDto,
    pub timezone: i64,
    pub dt: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastItemDto {
    pub dt: i64,
    pub main: MainDto,
    pub weather: Vec<ConditionDto>,
    #[serde(default)]
    pub wind: WindDto,
    #[serde(default)]
    pub dt_txt: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CityDto {
    #[serde(default)]
    pub timezone: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastItemDto>,
    pub city: CityDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AirIndexDto {
    pub aqi: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComponentsDto {
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub pm2_5: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AirPollutionItemDto {
    pub main: AirIndexDto,
    pub components: ComponentsDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AirPollutionResponse {
    pub list: Vec<AirPollutionItemDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingDto {
    pub name: String,
    #[serde(default)]
    pub country: String,
    pub state: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

// Domain types

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub state: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// "State, Country" when a state is known, otherwise just the country.
    pub fn region_label(&self) -> String {
        match self.state.as_deref() {
            Some(state) if !state.is_empty() => format!("{}, {}", state, self.country),
            _ => self.country.clone(),
        }
    }

    /// "Name, Country", as shown in the dashboard header.
    pub fn place_label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

impl From<GeocodingDto> for Location {
    fn from(dto: GeocodingDto) -> Self {
        Self {
            name: dto.name,
            country: dto.country,
            state: dto.state,
            latitude: dto.lat,
            longitude: dto.lon,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    pub description: String,
    pub icon_id: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub pressure: f64,
    pub humidity: f64,
    pub visibility_meters: f64,
    pub sunrise_unix: i64,
    pub sunset_unix: i64,
    pub timezone_offset_seconds: i64,
    pub observed_at_unix: i64,
}

impl From<CurrentWeatherResponse> for CurrentWeather {
    fn from(res: CurrentWeatherResponse) -> Self {
        let (description, icon_id) = first_condition(res.weather);
        Self {
            description,
            icon_id,
            temperature: res.main.temp,
            feels_like: res.main.feels_like,
            pressure: res.main.pressure,
            humidity: res.main.humidity,
            visibility_meters: res.visibility,
            sunrise_unix: res.sys.sunrise,
            sunset_unix: res.sys.sunset,
            timezone_offset_seconds: res.timezone,
            observed_at_unix: res.dt,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyForecastEntry {
    pub timestamp_unix: i64,
    pub temperature: f64,
    pub icon_id: String,
    pub description: String,
    pub wind_direction_degrees: f64,
    pub wind_speed_mps: f64,
}

impl From<&ForecastItemDto> for HourlyForecastEntry {
    fn from(item: &ForecastItemDto) -> Self {
        let (description, icon_id) = first_condition(item.weather.clone());
        Self {
            timestamp_unix: item.dt,
            temperature: item.main.temp,
            icon_id,
            description,
            wind_direction_degrees: item.wind.deg,
            wind_speed_mps: item.wind.speed,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecastEntry {
    pub date_text: String,
    pub timestamp_unix: i64,
    pub max_temperature: f64,
    pub icon_id: String,
    pub description: String,
}

impl From<&ForecastItemDto> for DailyForecastEntry {
    fn from(item: &ForecastItemDto) -> Self {
        let (description, icon_id) = first_condition(item.weather.clone());
        Self {
            date_text: item.dt_txt.clone(),
            timestamp_unix: item.dt,
            max_temperature: item.main.temp_max,
            icon_id,
            description,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AirQuality {
    pub aqi_index: u8,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub pm2_5: f64,
}

impl From<&AirPollutionItemDto> for AirQuality {
    fn from(item: &AirPollutionItemDto) -> Self {
        Self {
            aqi_index: item.main.aqi,
            no2: item.components.no2,
            o3: item.components.o3,
            so2: item.components.so2,
            pm2_5: item.components.pm2_5,
        }
    }
}

fn first_condition(conditions: Vec<ConditionDto>) -> (String, String) {
    conditions
        .into_iter()
        .next()
        .map(|c| (c.description, c.icon))
        .unwrap_or_default()
}
