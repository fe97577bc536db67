//! Runs [`Command`]s on the tokio runtime and reports back as [`Event`]s.

use crate::api::WeatherClient;
use crate::app::Command;
use crate::config::LocationConfig;
use crate::dashboard::load_weather;
use crate::events::Event;
use crate::location::get_current_location;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct Worker {
    client: WeatherClient,
    location: LocationConfig,
    tx: UnboundedSender<Event>,
}

impl Worker {
    pub fn new(client: WeatherClient, location: LocationConfig, tx: UnboundedSender<Event>) -> Self {
        Self {
            client,
            location,
            tx,
        }
    }

    pub fn spawn_all(&self, commands: Vec<Command>) {
        for command in commands {
            self.spawn(command);
        }
    }

    pub fn spawn(&self, command: Command) {
        let worker = self.clone();
        tokio::spawn(async move { worker.run(command).await });
    }

    /// Executes one command to completion. Send errors mean the UI loop is
    /// gone, so they are ignored.
    pub async fn run(&self, command: Command) {
        match command {
            Command::Locate { generation } => {
                let at = get_current_location(&self.location).await;
                let _ = self.tx.send(Event::Located { generation, at });
            }
            Command::LoadWeather {
                generation,
                at,
                cancel,
            } => {
                let tx = self.tx.clone();
                let result = load_weather(&self.client, at, &cancel, |stage| {
                    let _ = tx.send(Event::Weather { generation, stage });
                })
                .await;

                let event = match result {
                    Ok(()) => Event::WeatherDone { generation },
                    Err(e) if e.is_cancelled() => {
                        debug!("Weather chain {} cancelled", generation);
                        return;
                    }
                    Err(e) => Event::WeatherFailed {
                        generation,
                        message: e.to_string(),
                    },
                };
                let _ = self.tx.send(event);
            }
            Command::ReverseGeocode { generation, at } => {
                match self.client.reverse_geo(at).await {
                    Ok(places) => {
                        if let Some(place) = places.first() {
                            let _ = self.tx.send(Event::PlaceResolved {
                                generation,
                                name: place.place_label(),
                            });
                        }
                    }
                    Err(e) => warn!("Reverse geocoding failed: {}", e),
                }
            }
            Command::Search(request) => {
                let results = self
                    .client
                    .search(&request.query)
                    .await
                    .map_err(|e| e.to_string());
                let _ = self.tx.send(Event::SearchResults {
                    id: request.id,
                    results,
                });
            }
        }
    }
}
