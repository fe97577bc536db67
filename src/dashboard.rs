//! The weather loading chain: current conditions, then the 5-day/3-hour
//! forecast, then air quality.
//!
//! Each step is awaited in order and reported through a stage callback as
//! soon as it lands, so the view fills in incrementally. The whole chain runs
//! under one error boundary and stops early when its cancellation token fires.

use crate::api::WeatherClient;
use crate::error::{Result, WeatherError};
use crate::models::{
    AirQuality, Coordinates, CurrentWeather, DailyForecastEntry, ForecastItemDto,
    HourlyForecastEntry,
};
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

pub const HOURLY_LIMIT: usize = 8;
pub const DAILY_START: usize = 7;
pub const DAILY_STEP: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    Current(CurrentWeather),
    Forecast {
        hourly: Vec<HourlyForecastEntry>,
        daily: Vec<DailyForecastEntry>,
        timezone_offset_seconds: i64,
    },
    AirQuality(AirQuality),
}

pub fn hourly_entries(list: &[ForecastItemDto]) -> Vec<HourlyForecastEntry> {
    list.iter()
        .take(HOURLY_LIMIT)
        .map(HourlyForecastEntry::from)
        .collect()
}

/// One entry per day: indices 7, 15, 23, ... of the 3-hour list.
pub fn daily_entries(list: &[ForecastItemDto]) -> Vec<DailyForecastEntry> {
    list.iter()
        .skip(DAILY_START)
        .step_by(DAILY_STEP)
        .map(DailyForecastEntry::from)
        .collect()
}

async fn cancellable<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(WeatherError::Cancelled),
        res = fut => res,
    }
}

/// Runs the full chain for `at`, calling `on_stage` after each step.
pub async fn load_weather<F>(
    client: &WeatherClient,
    at: Coordinates,
    cancel: &CancellationToken,
    mut on_stage: F,
) -> Result<()>
where
    F: FnMut(Stage),
{
    info!("Loading weather for ({}, {})", at.lat, at.lon);

    let current = cancellable(cancel, client.current_weather(at)).await?;
    on_stage(Stage::Current(CurrentWeather::from(current)));

    let forecast = cancellable(cancel, client.forecast(at)).await?;
    let hourly = hourly_entries(&forecast.list);
    let daily = daily_entries(&forecast.list);
    debug!(
        "Forecast: {} items, {} hourly, {} daily",
        forecast.list.len(),
        hourly.len(),
        daily.len()
    );
    on_stage(Stage::Forecast {
        hourly,
        daily,
        timezone_offset_seconds: forecast.city.timezone,
    });

    let air = cancellable(cancel, client.air_pollution(at)).await?;
    let air = air
        .list
        .first()
        .map(AirQuality::from)
        .ok_or_else(|| WeatherError::Decode("air pollution list is empty".to_string()))?;
    on_stage(Stage::AirQuality(air));

    info!("Weather loaded for ({}, {})", at.lat, at.lon);
    Ok(())
}
