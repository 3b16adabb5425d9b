//! Delivery data service HTTP client.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use skyferry_core::models::{Order, Region, Restaurant, CENTRAL_REGION_NAME};
use std::time::Duration;

/// HTTP client for the delivery data service.
pub struct RestClient {
    client: Client,
    base_url: String,
}

impl RestClient {
    /// Create a new client. Trailing slashes on the base URL are
    /// normalized away so endpoint paths can be joined naively.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.into().trim().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the orders placed on `date`.
    ///
    /// The service publishes its entire order book; narrowing to the
    /// requested day happens here.
    pub async fn get_orders(&self, date: NaiveDate) -> Result<Vec<Order>> {
        let orders: Vec<Order> = self.get_json("orders").await?;
        let day_orders: Vec<Order> = orders
            .into_iter()
            .filter(|order| order.order_date == date)
            .collect();
        tracing::debug!("{} orders on {}", day_orders.len(), date);
        Ok(day_orders)
    }

    /// Fetch the restaurant roster.
    pub async fn get_restaurants(&self) -> Result<Vec<Restaurant>> {
        self.get_json("restaurants").await
    }

    /// Fetch every no-fly polygon.
    pub async fn get_no_fly_zones(&self) -> Result<Vec<Region>> {
        self.get_json("noFlyZones").await
    }

    /// Fetch the central-area polygon.
    ///
    /// The region is re-tagged with the canonical central name on the
    /// way in, whatever the service called it, so it always satisfies
    /// the planner's naming contract.
    pub async fn get_central_area(&self) -> Result<Region> {
        let region: Region = self.get_json("centralArea").await?;
        Ok(Region::new(CENTRAL_REGION_NAME, region.vertices))
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;
        response
            .error_for_status()
            .with_context(|| format!("{} returned an error status", endpoint))?
            .json()
            .await
            .with_context(|| format!("failed to decode {} response", endpoint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_url() -> String {
        std::env::var("SKYFERRY_TEST_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
    }

    #[test]
    fn base_url_is_normalized() {
        let client = RestClient::new("http://localhost:8080///");
        assert_eq!(client.base_url, "http://localhost:8080");

        let padded = RestClient::new("  http://localhost:8080/ ");
        assert_eq!(padded.base_url, "http://localhost:8080");
    }

    /// Live smoke test against a running data service.
    /// Run with: cargo test -p skyferry-rest -- --ignored
    #[tokio::test]
    #[ignore]
    async fn live_service_publishes_consistent_data() {
        let client = RestClient::new(test_url());

        let restaurants = client.get_restaurants().await.unwrap();
        assert!(!restaurants.is_empty());
        assert!(restaurants.iter().all(|r| !r.menu.is_empty()));

        let central = client.get_central_area().await.unwrap();
        assert_eq!(central.name, CENTRAL_REGION_NAME);
        assert!(central.vertices.len() >= 3);

        let zones = client.get_no_fly_zones().await.unwrap();
        assert!(zones.iter().all(|zone| zone.vertices.len() >= 3));
    }
}
