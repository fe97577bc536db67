//! Hash-style routes (`#/current-location`, `#/weather?lat=..&lon=..`) that
//! select what the dashboard shows. Anything unrecognised maps to
//! [`Route::NotFound`].

use crate::models::Coordinates;
use std::fmt;

pub const CURRENT_LOCATION: &str = "#/current-location";
pub const DEFAULT_ROUTE: &str = CURRENT_LOCATION;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Route {
    CurrentLocation,
    Weather(Coordinates),
    NotFound,
}

impl Route {
    pub fn parse(hash: &str) -> Self {
        let hash = hash.trim();
        let hash = if hash.is_empty() || hash == "#" || hash == "#/" {
            DEFAULT_ROUTE
        } else {
            hash
        };

        let (path, query) = match hash.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (hash, None),
        };

        match (path, query) {
            ("#/current-location", None) => Route::CurrentLocation,
            ("#/weather", Some(query)) => match parse_coordinates(query) {
                Some(at) => Route::Weather(at),
                None => Route::NotFound,
            },
            _ => Route::NotFound,
        }
    }

    pub fn weather(at: Coordinates) -> Self {
        Route::Weather(at)
    }

    pub fn is_current_location(&self) -> bool {
        matches!(self, Route::CurrentLocation)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::CurrentLocation => f.write_str(CURRENT_LOCATION),
            Route::Weather(at) => write!(f, "#/weather?lat={}&lon={}", at.lat, at.lon),
            Route::NotFound => f.write_str("#/404"),
        }
    }
}

fn parse_coordinates(query: &str) -> Option<Coordinates> {
    let mut lat = None;
    let mut lon = None;
    for pair in query.split('&') {
        match pair.split_once('=') {
            Some(("lat", v)) => lat = v.parse::<f64>().ok(),
            Some(("lon", v)) => lon = v.parse::<f64>().ok(),
            _ => {}
        }
    }

    let (lat, lon) = (lat?, lon?);
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return None;
    }
    Some(Coordinates::new(lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hash_is_current_location() {
        assert_eq!(Route::parse(""), Route::CurrentLocation);
        assert_eq!(Route::parse("#/"), Route::CurrentLocation);
        assert_eq!(Route::parse("#/current-location"), Route::CurrentLocation);
    }

    #[test]
    fn weather_route_with_coordinates() {
        assert_eq!(
            Route::parse("#/weather?lat=40.7128&lon=-74.006"),
            Route::Weather(Coordinates::new(40.7128, -74.006))
        );
        assert_eq!(
            Route::parse("#/weather?lon=2&lat=1"),
            Route::Weather(Coordinates::new(1.0, 2.0))
        );
    }

    #[test]
    fn malformed_routes_are_not_found() {
        assert_eq!(Route::parse("#/weather"), Route::NotFound);
        assert_eq!(Route::parse("#/weather?lat=abc&lon=1"), Route::NotFound);
        assert_eq!(Route::parse("#/weather?lat=91&lon=1"), Route::NotFound);
        assert_eq!(Route::parse("#/forecast?lat=1&lon=1"), Route::NotFound);
        assert_eq!(Route::parse("#/current-location?x=1"), Route::NotFound);
    }

    #[test]
    fn display_round_trips_weather_route() {
        let route = Route::weather(Coordinates::new(51.5073219, -0.1276474));
        assert_eq!(route.to_string(), "#/weather?lat=51.5073219&lon=-0.1276474");
        assert_eq!(Route::parse(&route.to_string()), route);
    }
}
