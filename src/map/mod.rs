//! Map output.
//!
//! This module renders filtered segments and the wind marker as a standalone
//! Leaflet page on OpenStreetMap tiles.

pub mod leaflet;

pub use leaflet::LeafletRenderer;
