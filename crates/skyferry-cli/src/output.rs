//! Result-file records and writers for a processed day.
//!
//! Three files per day: the delivery outcomes, the move-by-move
//! flightpath, and the whole day's route as a GeoJSON LineString.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use skyferry_core::models::{LngLat, Order, OrderStatus, OrderValidationCode};
use skyferry_core::spatial::calculate_angle;
use std::fs;
use std::path::Path;

/// Angle recorded for a hover, which has no compass heading.
pub const HOVER_ANGLE: f64 = 999.0;

/// One drone move in the flightpath file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    pub order_no: String,
    pub from_longitude: f64,
    pub from_latitude: f64,
    pub angle: f64,
    pub to_longitude: f64,
    pub to_latitude: f64,
}

/// Outcome of one processed order in the deliveries file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRecord {
    pub order_no: String,
    pub order_status: OrderStatus,
    pub order_validation_code: OrderValidationCode,
    pub cost_in_pence: u32,
}

impl DeliveryRecord {
    pub fn from_order(order: &Order) -> Self {
        Self {
            order_no: order.order_no.clone(),
            order_status: order.order_status,
            order_validation_code: order.order_validation_code,
            cost_in_pence: order.price_total_in_pence,
        }
    }
}

/// Append one record per consecutive pair of path coordinates, with the
/// snapped compass heading of each step.
pub fn append_path_moves(moves: &mut Vec<MoveRecord>, path: &[LngLat], order_no: &str) {
    for pair in path.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        moves.push(MoveRecord {
            order_no: order_no.to_string(),
            from_longitude: from.lng,
            from_latitude: from.lat,
            angle: calculate_angle(from, to),
            to_longitude: to.lng,
            to_latitude: to.lat,
        });
    }
}

/// Append a hover at `location`: one move's worth of holding position.
///
/// The record repeats the previous move's origin and carries the hover
/// angle instead of a heading. With no previous move there is nothing to
/// hover over and the call does nothing.
pub fn append_hover(moves: &mut Vec<MoveRecord>, location: LngLat, order_no: &str) {
    let Some(last) = moves.last() else {
        return;
    };
    let hover = MoveRecord {
        order_no: order_no.to_string(),
        from_longitude: last.from_longitude,
        from_latitude: last.from_latitude,
        angle: HOVER_ANGLE,
        to_longitude: location.lng,
        to_latitude: location.lat,
    };
    moves.push(hover);
}

/// The whole day's route as a GeoJSON `Feature` wrapping a `LineString`.
pub fn flightpath_geojson(path: &[LngLat]) -> serde_json::Value {
    let coordinates: Vec<_> = path.iter().map(|point| json!([point.lng, point.lat])).collect();
    json!({
        "type": "Feature",
        "properties": {},
        "geometry": {
            "type": "LineString",
            "coordinates": coordinates,
        },
    })
}

/// Write the three result files for `date` under `out_dir`, creating the
/// directory if needed. Files are written even when the day was empty.
pub fn write_results(
    out_dir: &Path,
    date: NaiveDate,
    deliveries: &[DeliveryRecord],
    moves: &[MoveRecord],
    flightpath: &[LngLat],
) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    write_pretty_json(&out_dir.join(format!("deliveries-{}.json", date)), &deliveries)?;
    write_pretty_json(&out_dir.join(format!("flightpath-{}.json", date)), &moves)?;
    write_pretty_json(
        &out_dir.join(format!("drone-{}.geojson", date)),
        &flightpath_geojson(flightpath),
    )?;
    Ok(())
}

fn write_pretty_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let body = serde_json::to_string_pretty(value)
        .with_context(|| format!("failed to serialize {}", path.display()))?;
    fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))
}
