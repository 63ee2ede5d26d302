//! Geocoding module
//!
//! Contains types, the completion gateway, and the pipeline stages that turn
//! a city name into a persisted GeoJSON document.

pub mod extractor;
pub mod feature;
pub mod gateway;
pub mod types;
pub mod writer;
