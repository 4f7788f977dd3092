//! Wind forecasts.
//!
//! This module fetches hourly wind speed and direction from Open-Meteo.

pub mod open_meteo;

pub use open_meteo::OpenMeteoForecast;
