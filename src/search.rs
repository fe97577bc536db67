//! Location search with a keystroke debounce.
//!
//! Every edit pushes the debounce deadline forward; [`SearchState::poll`]
//! hands out a single request once the deadline passes, so only the final
//! query of a burst of typing reaches the geocoding endpoint.

use crate::models::Location;
use crate::route::Route;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub id: u64,
    pub query: String,
}

#[derive(Debug, Clone)]
pub struct SearchState {
    pub open: bool,
    pub query: String,
    pub results: Vec<Location>,
    pub results_active: bool,
    pub searching: bool,
    pub selected: usize,
    pub error: Option<String>,
    debounce: Duration,
    deadline: Option<Instant>,
    latest_request: u64,
}

impl SearchState {
    pub fn new(debounce: Duration) -> Self {
        Self {
            open: false,
            query: String::new(),
            results: Vec::new(),
            results_active: false,
            searching: false,
            selected: 0,
            error: None,
            debounce,
            deadline: None,
            latest_request: 0,
        }
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hides the panel. The typed query and results stay for the next open.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn push(&mut self, ch: char, now: Instant) {
        self.query.push(ch);
        self.on_input(now);
    }

    pub fn backspace(&mut self, now: Instant) {
        self.query.pop();
        self.on_input(now);
    }

    pub fn set_query(&mut self, query: &str, now: Instant) {
        self.query = query.to_string();
        self.on_input(now);
    }

    fn on_input(&mut self, now: Instant) {
        self.error = None;
        // Anything still in flight belongs to a query that no longer exists.
        self.latest_request += 1;
        if self.query.trim().is_empty() {
            self.results.clear();
            self.results_active = false;
            self.searching = false;
            self.selected = 0;
            self.deadline = None;
        } else {
            self.searching = true;
            self.deadline = Some(now + self.debounce);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns the request to issue once the debounce delay has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<SearchRequest> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.searching = true;
                self.latest_request += 1;
                Some(SearchRequest {
                    id: self.latest_request,
                    query: self.query.trim().to_string(),
                })
            }
            _ => None,
        }
    }

    /// Applies results for request `id`. Returns false if the response is
    /// stale and was dropped.
    pub fn apply_results(&mut self, id: u64, results: Result<Vec<Location>, String>) -> bool {
        if id != self.latest_request {
            return false;
        }

        self.searching = false;
        self.results_active = true;
        self.selected = 0;
        match results {
            Ok(locations) => {
                self.results = locations;
                self.error = None;
            }
            Err(e) => {
                self.results.clear();
                self.error = Some(e);
            }
        }
        true
    }

    pub fn select_next(&mut self) {
        if !self.results.is_empty() {
            self.selected = (self.selected + 1) % self.results.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.results.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.results.len() - 1);
        }
    }

    pub fn selected_location(&self) -> Option<&Location> {
        self.results.get(self.selected)
    }

    /// Picks the highlighted result, closes the panel and returns the route
    /// to navigate to.
    pub fn choose(&mut self) -> Option<Route> {
        let route = self
            .selected_location()
            .map(|loc| Route::weather(loc.coordinates()))?;
        self.close();
        Some(route)
    }
}
