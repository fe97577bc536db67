//! Current-location resolution for the dashboard.
//!
//! [`get_current_location`] backs the `#/current-location` route. It asks an
//! IP geolocation service for the caller's approximate position and falls back
//! to the configured default location when the lookup fails.

use crate::config::LocationConfig;
use crate::models::Coordinates;
use ipgeolocate::{Locator, Service};
use tracing::{error, info};

/// Resolves the user's approximate location via IP geolocation.
///
/// Uses the [IpApi](https://ip-api.com/) service. `config.lookup_ip` selects
/// the address to look up; an empty string lets the service use the address
/// the request comes from.
///
/// # Returns
///
/// Latitude and longitude in decimal degrees (WGS84). On network or service
/// failure, or if the service returns unparsable numbers, the configured
/// default coordinates are returned instead.
pub async fn get_current_location(config: &LocationConfig) -> Coordinates {
    match Locator::get(&config.lookup_ip, Service::IpApi).await {
        Ok(loc) => match parse_coordinates(&loc.latitude, &loc.longitude) {
            Some(at) => {
                info!(
                    "Geolocation successful - {} ({}, {})",
                    loc.city, at.lat, at.lon
                );
                at
            }
            None => {
                error!(
                    "Geolocation returned unusable coordinates ({:?}, {:?}). Using default location.",
                    loc.latitude, loc.longitude
                );
                config.default_coordinates()
            }
        },
        Err(e) => {
            error!(
                "Error using geolocation service: {}. Using default location.",
                e
            );
            config.default_coordinates()
        }
    }
}

fn parse_coordinates(lat: &str, lon: &str) -> Option<Coordinates> {
    let lat = lat.trim().parse::<f64>().ok()?;
    let lon = lon.trim().parse::<f64>().ok()?;
    Some(Coordinates::new(lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_service_strings() {
        assert_eq!(
            parse_coordinates("37.7749", " -122.4194"),
            Some(Coordinates::new(37.7749, -122.4194))
        );
        assert_eq!(parse_coordinates("", "1"), None);
        assert_eq!(parse_coordinates("north", "1"), None);
    }
}
