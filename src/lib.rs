//! Terminal weather dashboard backed by the OpenWeatherMap API.

pub mod api;
pub mod app;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod format;
pub mod location;
pub mod logging;
pub mod models;
pub mod route;
pub mod search;
pub mod tabs;
pub mod ui;
pub mod worker;
