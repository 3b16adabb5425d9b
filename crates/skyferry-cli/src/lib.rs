//! Skyferry CLI - batch dispatch of a day's drone deliveries.
//!
//! Fetches the day's orders and operating-area geometry from the data
//! service, validates and routes every order, and writes the delivery,
//! flightpath and GeoJSON result files.

pub mod config;
pub mod dispatch;
pub mod output;
