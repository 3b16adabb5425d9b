//! Day-level dispatch: validate, route and record every order.

use crate::output::{self, DeliveryRecord, MoveRecord};
use anyhow::Result;
use chrono::NaiveDate;
use skyferry_core::models::{LngLat, Order, OrderStatus, OrderValidationCode, Restaurant};
use skyferry_core::planner::RoutePlanner;
use skyferry_core::validation::{find_restaurant, validate_order};
use skyferry_rest::RestClient;
use std::path::Path;

/// Fixed launch and return point for every delivery.
pub const HOME_POSITION: LngLat = LngLat {
    lng: -3.186874,
    lat: 55.944494,
};

/// Accumulated results for one processed day.
#[derive(Debug, Default)]
pub struct DayResults {
    pub deliveries: Vec<DeliveryRecord>,
    pub moves: Vec<MoveRecord>,
    pub flightpath: Vec<LngLat>,
}

/// Fetch, dispatch and record one day of orders.
///
/// Result files are written even when the day turns out empty, so a
/// quiet day still leaves a verifiable record.
pub async fn process_day_orders(
    client: &RestClient,
    planner: &RoutePlanner,
    date: NaiveDate,
    out_dir: &Path,
) -> Result<()> {
    tracing::info!("Processing orders for {}", date);

    let orders = client.get_orders(date).await?;
    let restaurants = client.get_restaurants().await?;
    if orders.is_empty() {
        tracing::info!("No orders for {}", date);
    }

    let results = dispatch_orders(planner, &orders, &restaurants);
    output::write_results(
        out_dir,
        date,
        &results.deliveries,
        &results.moves,
        &results.flightpath,
    )?;
    tracing::info!(
        "Wrote {} deliveries and {} moves for {}",
        results.deliveries.len(),
        results.moves.len(),
        date
    );
    Ok(())
}

/// Run every order through validation and routing, accumulating the
/// day's records. Every order produces a delivery record; only fully
/// routed orders contribute moves.
pub fn dispatch_orders(
    planner: &RoutePlanner,
    orders: &[Order],
    restaurants: &[Restaurant],
) -> DayResults {
    let mut results = DayResults::default();
    for (index, order) in orders.iter().enumerate() {
        let validated = validate_order(order, restaurants);
        let processed = route_valid_order(planner, validated, restaurants, &mut results);
        results.deliveries.push(DeliveryRecord::from_order(&processed));
        tracing::debug!("Processed order {} of {}", index + 1, orders.len());
    }
    results
}

/// Route both legs of a validated order and mark it delivered.
///
/// Orders are only marked `Delivered` when both legs routed: a half
/// flight would strand the drone, so an order with an unroutable leg
/// contributes no moves and stays `ValidButNotDelivered`.
fn route_valid_order(
    planner: &RoutePlanner,
    mut order: Order,
    restaurants: &[Restaurant],
    results: &mut DayResults,
) -> Order {
    if order.order_validation_code != OrderValidationCode::NoError {
        tracing::info!(
            "Order {} rejected: {:?}",
            order.order_no,
            order.order_validation_code
        );
        return order;
    }

    let Some(restaurant) = find_restaurant(&order, restaurants) else {
        // Validation passed, so the roster must have changed under us.
        tracing::warn!("No restaurant resolves order {}", order.order_no);
        order.order_status = OrderStatus::Invalid;
        return order;
    };

    let outbound = planner.find_path(HOME_POSITION, restaurant.location, false);
    let inbound = planner.find_path(restaurant.location, HOME_POSITION, true);
    if outbound.is_empty() || inbound.is_empty() {
        tracing::warn!(
            "No feasible route between home and {} for order {}",
            restaurant.name,
            order.order_no
        );
        return order;
    }

    output::append_path_moves(&mut results.moves, &outbound, &order.order_no);
    output::append_hover(&mut results.moves, restaurant.location, &order.order_no);
    output::append_path_moves(&mut results.moves, &inbound, &order.order_no);
    output::append_hover(&mut results.moves, HOME_POSITION, &order.order_no);
    results.flightpath.extend_from_slice(&outbound);
    results.flightpath.extend_from_slice(&inbound);

    order.order_status = OrderStatus::Delivered;
    order
}
