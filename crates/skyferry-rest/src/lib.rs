//! Skyferry REST - delivery data service client
//!
//! Handles all communication with the REST service that publishes
//! orders, restaurants and operating-area geometry.

pub mod client;

pub use client::RestClient;
