//! Integration tests for the weather loading chain and the background worker
//! using wiremock.

use nimbus_tui::api::WeatherClient;
use nimbus_tui::app::Command;
use nimbus_tui::config::{ApiConfig, LocationConfig};
use nimbus_tui::dashboard::{load_weather, Stage};
use nimbus_tui::error::WeatherError;
use nimbus_tui::events::Event;
use nimbus_tui::format::resolve_icon;
use nimbus_tui::models::Coordinates;
use nimbus_tui::search::SearchRequest;
use nimbus_tui::worker::Worker;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AT: Coordinates = Coordinates {
    lat: 51.5,
    lon: -0.12,
};

fn client(server: &MockServer) -> WeatherClient {
    let config = ApiConfig {
        key: "test-key".to_string(),
        base_url: server.uri(),
        units: "metric".to_string(),
        timeout_seconds: 5,
    };
    WeatherClient::new(&config).unwrap()
}

fn current_body() -> serde_json::Value {
    serde_json::json!({
        "weather": [{ "id": 803, "main": "Clouds", "description": "broken clouds", "icon": "01d" }],
        "main": { "temp": 14.2, "feels_like": 13.6, "temp_min": 12.0, "temp_max": 15.1, "pressure": 1012, "humidity": 81 },
        "visibility": 10000,
        "wind": { "speed": 4.1, "deg": 240 },
        "sys": { "country": "GB", "sunrise": 1697695200, "sunset": 1697733000 },
        "timezone": 3600,
        "dt": 1697710000,
        "name": "London"
    })
}

fn forecast_body(n: usize) -> serde_json::Value {
    let list: Vec<serde_json::Value> = (0..n)
        .map(|i| {
            serde_json::json!({
                "dt": 1697716800 + (i as i64) * 10800,
                "main": { "temp": i as f64, "feels_like": i as f64, "temp_max": i as f64 + 1.0, "pressure": 1010, "humidity": 70 },
                "weather": [{ "description": "light rain", "icon": "10d" }],
                "wind": { "speed": 3.0, "deg": 180 },
                "dt_txt": format!("slot {}", i)
            })
        })
        .collect();
    serde_json::json!({ "cnt": n, "list": list, "city": { "name": "London", "timezone": 3600 } })
}

fn air_body() -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": -0.12, "lat": 51.5 },
        "list": [{
            "main": { "aqi": 3 },
            "components": { "co": 230.3, "no": 0.1, "no2": 21.4, "o3": 48.6, "so2": 2.3, "pm2_5": 9.7, "pm10": 12.0, "nh3": 0.9 },
            "dt": 1697710000
        }]
    })
}

async fn mount(server: &MockServer, endpoint: &str, status: u16, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_all(server: &MockServer) {
    mount(server, "/data/2.5/weather", 200, current_body()).await;
    mount(server, "/data/2.5/forecast", 200, forecast_body(40)).await;
    mount(server, "/data/2.5/air_pollution", 200, air_body()).await;
}

#[tokio::test]
async fn test_chain_reports_stages_in_order() {
    let server = MockServer::start().await;
    mount_all(&server).await;

    let mut stages = Vec::new();
    load_weather(&client(&server), AT, &CancellationToken::new(), |s| stages.push(s))
        .await
        .unwrap();

    assert_eq!(stages.len(), 3);
    match &stages[0] {
        Stage::Current(current) => {
            assert_eq!(current.description, "broken clouds");
            assert_eq!(resolve_icon(&current.description, &current.icon_id), "04.0d");
            assert_eq!(current.humidity, 81.0);
        }
        other => panic!("expected current stage, got {:?}", other),
    }
    match &stages[1] {
        Stage::Forecast {
            hourly,
            daily,
            timezone_offset_seconds,
        } => {
            assert_eq!(hourly.len(), 8);
            assert_eq!(hourly[7].temperature, 7.0);
            let picked: Vec<&str> = daily.iter().map(|d| d.date_text.as_str()).collect();
            assert_eq!(picked, ["slot 7", "slot 15", "slot 23", "slot 31", "slot 39"]);
            assert_eq!(*timezone_offset_seconds, 3600);
        }
        other => panic!("expected forecast stage, got {:?}", other),
    }
    match &stages[2] {
        Stage::AirQuality(air) => {
            assert_eq!(air.aqi_index, 3);
            assert_eq!(air.pm2_5, 9.7);
        }
        other => panic!("expected air quality stage, got {:?}", other),
    }
}

#[tokio::test]
async fn test_short_forecast_limits_hourly() {
    let server = MockServer::start().await;
    mount(&server, "/data/2.5/weather", 200, current_body()).await;
    mount(&server, "/data/2.5/forecast", 200, forecast_body(5)).await;
    mount(&server, "/data/2.5/air_pollution", 200, air_body()).await;

    let mut stages = Vec::new();
    load_weather(&client(&server), AT, &CancellationToken::new(), |s| stages.push(s))
        .await
        .unwrap();

    match &stages[1] {
        Stage::Forecast { hourly, daily, .. } => {
            assert_eq!(hourly.len(), 5);
            assert!(daily.is_empty());
        }
        other => panic!("expected forecast stage, got {:?}", other),
    }
}

#[tokio::test]
async fn test_forecast_failure_stops_the_chain() {
    let server = MockServer::start().await;
    mount(&server, "/data/2.5/weather", 200, current_body()).await;
    mount(&server, "/data/2.5/forecast", 500, serde_json::json!({ "cod": 500 })).await;
    mount(&server, "/data/2.5/air_pollution", 200, air_body()).await;

    let mut stages = Vec::new();
    let err = load_weather(&client(&server), AT, &CancellationToken::new(), |s| stages.push(s))
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Status { status: 500, .. }));
    assert!(!err.to_string().contains("test-key"));
    assert_eq!(stages.len(), 1);
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    mount(&server, "/data/2.5/weather", 200, serde_json::json!({ "unexpected": true })).await;

    let mut stages = Vec::new();
    let err = load_weather(&client(&server), AT, &CancellationToken::new(), |s| stages.push(s))
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Decode(_)));
    assert!(stages.is_empty());
}

#[tokio::test]
async fn test_cancelled_chain_reports_nothing() {
    let server = MockServer::start().await;
    mount_all(&server).await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let mut stages = Vec::new();
    let err = load_weather(&client(&server), AT, &cancel, |s| stages.push(s))
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert!(stages.is_empty());
}

#[tokio::test]
async fn test_search_sends_query_and_maps_locations() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "New York"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "name": "New York", "lat": 40.71, "lon": -74.0, "country": "US", "state": "New York" },
            { "name": "New York", "lat": 53.07, "lon": -0.14, "country": "GB", "state": "England" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let results = client(&server).search("New York").await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[1].region_label(), "England, GB");
}

#[tokio::test]
async fn test_worker_runs_chain_and_reverse_geocode() {
    let server = MockServer::start().await;
    mount_all(&server).await;
    mount(
        &server,
        "/geo/1.0/reverse",
        200,
        serde_json::json!([{ "name": "City of Westminster", "lat": 51.5, "lon": -0.12, "country": "GB", "state": "England" }]),
    )
    .await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let worker = Worker::new(client(&server), LocationConfig::default(), tx);

    worker
        .run(Command::LoadWeather {
            generation: 4,
            at: AT,
            cancel: CancellationToken::new(),
        })
        .await;
    worker
        .run(Command::ReverseGeocode {
            generation: 4,
            at: AT,
        })
        .await;

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }

    assert_eq!(events.len(), 5);
    assert!(matches!(events[0], Event::Weather { generation: 4, stage: Stage::Current(_) }));
    assert!(matches!(events[1], Event::Weather { generation: 4, stage: Stage::Forecast { .. } }));
    assert!(matches!(events[2], Event::Weather { generation: 4, stage: Stage::AirQuality(_) }));
    assert!(matches!(events[3], Event::WeatherDone { generation: 4 }));
    match &events[4] {
        Event::PlaceResolved { generation, name } => {
            assert_eq!(*generation, 4);
            assert_eq!(name, "City of Westminster, GB");
        }
        other => panic!("expected place, got {:?}", other),
    }
}

#[tokio::test]
async fn test_worker_reports_failures_but_not_cancellation() {
    let server = MockServer::start().await;
    mount(&server, "/data/2.5/weather", 401, serde_json::json!({ "cod": 401 })).await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let worker = Worker::new(client(&server), LocationConfig::default(), tx);

    worker
        .run(Command::LoadWeather {
            generation: 1,
            at: AT,
            cancel: CancellationToken::new(),
        })
        .await;
    match rx.try_recv() {
        Ok(Event::WeatherFailed { generation, message }) => {
            assert_eq!(generation, 1);
            assert!(message.contains("401"));
        }
        other => panic!("expected failure, got {:?}", other),
    }

    let cancel = CancellationToken::new();
    cancel.cancel();
    worker
        .run(Command::LoadWeather {
            generation: 2,
            at: AT,
            cancel,
        })
        .await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_worker_search_tags_results_with_request_id() {
    let server = MockServer::start().await;
    mount(&server, "/geo/1.0/direct", 200, serde_json::json!([])).await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let worker = Worker::new(client(&server), LocationConfig::default(), tx);
    worker
        .run(Command::Search(SearchRequest {
            id: 9,
            query: "Atlantis".to_string(),
        }))
        .await;

    match rx.try_recv() {
        Ok(Event::SearchResults { id, results }) => {
            assert_eq!(id, 9);
            assert_eq!(results.map(|r| r.len()), Ok(0));
        }
        other => panic!("expected search results, got {:?}", other),
    }
}
