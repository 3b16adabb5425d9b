//! Core data models for the skyferry delivery system.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Distance covered by a single drone move, in degrees.
pub const DRONE_MOVE_DISTANCE: f64 = 0.00015;

/// Two positions closer than this are treated as the same place.
pub const DRONE_IS_CLOSE_DISTANCE: f64 = 0.00015;

/// Name the central-area region must carry.
pub const CENTRAL_REGION_NAME: &str = "central";

/// Flat delivery charge added to every order total, in pence.
pub const ORDER_CHARGE_IN_PENCE: u32 = 100;

/// Largest number of pizzas a single order may carry.
pub const MAX_PIZZAS_PER_ORDER: usize = 4;

// ========== GEOMETRY MODELS ==========

/// A longitude/latitude pair treated as a point on a flat plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Bit patterns of both components.
    ///
    /// Cache keys and search-node identity use this: two coordinates are
    /// the same point only when they match bit for bit, never by
    /// proximity.
    pub fn bits(&self) -> (u64, u64) {
        (self.lng.to_bits(), self.lat.to_bits())
    }
}

/// A named simple polygon.
///
/// The boundary is implicitly closed: the edge from the last vertex back
/// to the first belongs to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub vertices: Vec<LngLat>,
}

impl Region {
    pub fn new(name: impl Into<String>, vertices: Vec<LngLat>) -> Self {
        Self {
            name: name.into(),
            vertices,
        }
    }

    /// Whether this region carries the reserved central-area name.
    pub fn is_central(&self) -> bool {
        self.name == CENTRAL_REGION_NAME
    }
}

// ========== ORDER MODELS ==========

/// Lifecycle state of an order as it moves through dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Undefined,
    Invalid,
    Valid,
    ValidButNotDelivered,
    Delivered,
}

/// Outcome of the order validation rule chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderValidationCode {
    #[default]
    Undefined,
    NoError,
    CardNumberInvalid,
    CvvInvalid,
    ExpiryDateInvalid,
    TotalIncorrect,
    PizzaNotDefined,
    MaxPizzaCountExceeded,
    PizzaFromMultipleRestaurants,
    RestaurantClosed,
}

/// Days a restaurant can be open, in the wire format's spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Mon => DayOfWeek::Monday,
            chrono::Weekday::Tue => DayOfWeek::Tuesday,
            chrono::Weekday::Wed => DayOfWeek::Wednesday,
            chrono::Weekday::Thu => DayOfWeek::Thursday,
            chrono::Weekday::Fri => DayOfWeek::Friday,
            chrono::Weekday::Sat => DayOfWeek::Saturday,
            chrono::Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

/// A menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pizza {
    pub name: String,
    pub price_in_pence: u32,
}

/// Payment details exactly as submitted with the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardInformation {
    pub credit_card_number: String,
    pub credit_card_expiry: String,
    pub cvv: String,
}

/// A restaurant in the service roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub name: String,
    pub location: LngLat,
    pub opening_days: Vec<DayOfWeek>,
    pub menu: Vec<Pizza>,
}

impl Restaurant {
    /// Whether this restaurant's menu lists a pizza by name.
    pub fn serves(&self, pizza_name: &str) -> bool {
        self.menu.iter().any(|pizza| pizza.name == pizza_name)
    }
}

/// A customer order as published by the data service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_no: String,
    pub order_date: NaiveDate,
    #[serde(default)]
    pub order_status: OrderStatus,
    #[serde(default)]
    pub order_validation_code: OrderValidationCode,
    pub price_total_in_pence: u32,
    pub pizzas_in_order: Vec<Pizza>,
    pub credit_card_information: CreditCardInformation,
}
