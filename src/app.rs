use crate::config::Config;
use crate::dashboard::Stage;
use crate::models::{
    AirQuality, Coordinates, CurrentWeather, DailyForecastEntry, HourlyForecastEntry, Location,
};
use crate::route::Route;
use crate::search::{SearchRequest, SearchState};
use crate::tabs::TabSwitcher;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Background work the main loop should spawn.
#[derive(Debug, Clone)]
pub enum Command {
    Locate {
        generation: u64,
    },
    LoadWeather {
        generation: u64,
        at: Coordinates,
        cancel: CancellationToken,
    },
    ReverseGeocode {
        generation: u64,
        at: Coordinates,
    },
    Search(SearchRequest),
}

/// Everything the dashboard panels show. Rebuilt from scratch on every
/// location change.
#[derive(Debug, Clone, Default)]
pub struct WeatherView {
    pub current: Option<CurrentWeather>,
    pub place: Option<String>,
    pub hourly: Vec<HourlyForecastEntry>,
    pub daily: Vec<DailyForecastEntry>,
    pub forecast_timezone: i64,
    pub air: Option<AirQuality>,
    pub loading: bool,
    pub container_visible: bool,
    pub error_panel: bool,
    pub failure: Option<String>,
}

impl WeatherView {
    fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    /// The highlights card needs the current conditions and air quality.
    pub fn has_highlights(&self) -> bool {
        self.current.is_some() && self.air.is_some()
    }
}

pub struct App {
    pub route: Route,
    pub view: WeatherView,
    pub search: SearchState,
    pub tabs: TabSwitcher,
    /// Where the "go home" key leads from the not-found panel.
    pub home: Route,
    pub generation: u64,
    pub tick_count: usize,
    pub should_quit: bool,
    pub last_update: Option<Instant>,
    /// Coordinates of the chain currently in flight.
    pub active_at: Option<Coordinates>,
    cancel: Option<CancellationToken>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            route: Route::CurrentLocation,
            view: WeatherView::default(),
            search: SearchState::new(config.search.debounce()),
            tabs: TabSwitcher::new(config.ui.tab_reveal_ticks),
            home: Self::initial_route(config, None),
            generation: 0,
            tick_count: 0,
            should_quit: false,
            last_update: None,
            active_at: None,
            cancel: None,
        }
    }

    /// Route the dashboard starts on.
    pub fn initial_route(config: &Config, arg: Option<&str>) -> Route {
        match arg {
            Some(hash) => Route::parse(hash),
            None if config.location.auto_locate => Route::CurrentLocation,
            None => Route::weather(config.location.default_coordinates()),
        }
    }

    /// The "current location" control is disabled while already on that route.
    pub fn current_location_enabled(&self) -> bool {
        !self.route.is_current_location()
    }

    pub fn navigate(&mut self, route: Route) -> Vec<Command> {
        info!("Navigating to {}", route);
        self.route = route;
        match route {
            Route::CurrentLocation => {
                self.begin();
                vec![Command::Locate {
                    generation: self.generation,
                }]
            }
            Route::Weather(at) => vec![self.update_weather(at)],
            Route::NotFound => {
                self.cancel_in_flight();
                self.generation += 1;
                self.error404();
                Vec::new()
            }
        }
    }

    /// Invalidates whatever is in flight and resets the view to its loading state.
    fn begin(&mut self) -> CancellationToken {
        self.cancel_in_flight();
        self.generation += 1;
        self.view = WeatherView::loading();
        self.active_at = None;
        let token = CancellationToken::new();
        self.cancel = Some(token.clone());
        token
    }

    fn cancel_in_flight(&mut self) {
        if let Some(token) = self.cancel.take() {
            debug!("Cancelling weather chain {}", self.generation);
            token.cancel();
        }
    }

    pub fn update_weather(&mut self, at: Coordinates) -> Command {
        let cancel = self.begin();
        self.active_at = Some(at);
        Command::LoadWeather {
            generation: self.generation,
            at,
            cancel,
        }
    }

    /// Shows the not-found panel. Used only for unmatched routes.
    pub fn error404(&mut self) {
        self.view.error_panel = true;
        self.view.loading = false;
    }

    pub fn located(&mut self, generation: u64, at: Coordinates) -> Vec<Command> {
        if generation != self.generation {
            return Vec::new();
        }
        vec![self.update_weather(at)]
    }

    pub fn apply_stage(&mut self, generation: u64, stage: Stage) -> Vec<Command> {
        if generation != self.generation {
            debug!("Dropping stale stage from chain {}", generation);
            return Vec::new();
        }

        match stage {
            Stage::Current(current) => {
                self.view.current = Some(current);
                if let Some(at) = self.active_at {
                    return vec![Command::ReverseGeocode { generation, at }];
                }
            }
            Stage::Forecast {
                hourly,
                daily,
                timezone_offset_seconds,
            } => {
                self.view.hourly = hourly;
                self.view.daily = daily;
                self.view.forecast_timezone = timezone_offset_seconds;
                self.view.loading = false;
                self.view.container_visible = true;
            }
            Stage::AirQuality(air) => self.view.air = Some(air),
        }
        Vec::new()
    }

    pub fn weather_done(&mut self, generation: u64) {
        if generation != self.generation {
            return;
        }
        self.cancel = None;
        self.last_update = Some(Instant::now());
    }

    pub fn weather_failed(&mut self, generation: u64, message: String) {
        if generation != self.generation {
            return;
        }
        warn!("Weather chain {} failed: {}", generation, message);
        self.cancel = None;
        self.view.loading = false;
        self.view.failure = Some(message);
    }

    pub fn place_resolved(&mut self, generation: u64, name: String) {
        if generation == self.generation {
            self.view.place = Some(name);
        }
    }

    pub fn search_results(&mut self, id: u64, results: Result<Vec<Location>, String>) {
        if !self.search.apply_results(id, results) {
            debug!("Dropping stale search results for request {}", id);
        }
    }

    /// Re-runs the current route after a failure.
    pub fn retry(&mut self) -> Vec<Command> {
        if self.view.failure.is_none() {
            return Vec::new();
        }
        self.navigate(self.route)
    }

    pub fn on_tick(&mut self, now: Instant) -> Vec<Command> {
        self.tick_count += 1;
        self.tabs.on_tick();
        self.search.poll(now).map(Command::Search).into_iter().collect()
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Vec<Command> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Vec::new();
        }

        if self.search.open {
            return self.handle_search_key(key, now);
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') | KeyCode::Char('s') => self.search.open(),
            KeyCode::Char('c') if self.current_location_enabled() => {
                return self.navigate(Route::CurrentLocation);
            }
            KeyCode::Char('r') => return self.retry(),
            KeyCode::Char('h') if self.view.error_panel => {
                return self.navigate(self.home);
            }
            KeyCode::Tab | KeyCode::Char('t') => self.tabs.next(),
            KeyCode::Char('1') => self.tabs.select(0),
            KeyCode::Char('2') => self.tabs.select(1),
            _ => {}
        }
        Vec::new()
    }

    fn handle_search_key(&mut self, key: KeyEvent, now: Instant) -> Vec<Command> {
        match key.code {
            KeyCode::Esc => self.search.close(),
            KeyCode::Enter => {
                if let Some(route) = self.search.choose() {
                    return self.navigate(route);
                }
            }
            KeyCode::Down => self.search.select_next(),
            KeyCode::Up => self.search.select_prev(),
            KeyCode::Backspace => self.search.backspace(now),
            KeyCode::Char(ch) => self.search.push(ch, now),
            _ => {}
        }
        Vec::new()
    }
}
