//! Core logic for the skyferry drone delivery dispatcher: planar
//! geometry, constrained route planning, path memoization and order
//! validation.

pub mod cache;
pub mod models;
pub mod planner;
pub mod spatial;
pub mod validation;

pub use cache::PathCache;
pub use models::{
    CreditCardInformation, DayOfWeek, LngLat, Order, OrderStatus, OrderValidationCode, Pizza,
    Region, Restaurant, CENTRAL_REGION_NAME, DRONE_IS_CLOSE_DISTANCE, DRONE_MOVE_DISTANCE,
    MAX_PIZZAS_PER_ORDER, ORDER_CHARGE_IN_PENCE,
};
pub use planner::{PlannerConfig, RoutePlanner};
pub use spatial::{
    calculate_angle, distance, is_close, is_in_central_area, is_in_region, next_position,
    region_boundary_intersects, segments_intersect, RegionError, COMPASS_HEADINGS,
};
pub use validation::{find_restaurant, validate_order};
