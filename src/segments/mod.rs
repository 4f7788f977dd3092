//! Route segment lookup.
//!
//! This module fetches riding segments inside a bounding box from the
//! Doogal Strava segment explorer.

pub mod doogal;

pub use doogal::DoogalSegments;
