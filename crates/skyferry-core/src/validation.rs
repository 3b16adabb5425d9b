//! Order validation rule chain.
//!
//! Rules run in a fixed sequence and short-circuit on the first failure,
//! so an order with several problems reports only the earliest one.

use crate::models::{
    DayOfWeek, Order, OrderStatus, OrderValidationCode, Restaurant, MAX_PIZZAS_PER_ORDER,
    ORDER_CHARGE_IN_PENCE,
};
use chrono::Datelike;

/// Resolve the restaurant an order belongs to by its first pizza.
///
/// The roster is scanned in order and the first restaurant serving that
/// pizza wins, mirroring how the multiple-restaurants rule attributes
/// pizzas.
pub fn find_restaurant<'a>(order: &Order, restaurants: &'a [Restaurant]) -> Option<&'a Restaurant> {
    let first = order.pizzas_in_order.first()?;
    restaurants
        .iter()
        .find(|restaurant| restaurant.serves(&first.name))
}

/// Run the rule chain over an order, stamping status and validation code.
///
/// A clean order comes back `ValidButNotDelivered` with `NoError`;
/// anything else is `Invalid` with the first failing rule's code.
pub fn validate_order(order: &Order, restaurants: &[Restaurant]) -> Order {
    let mut validated = order.clone();
    let code = first_failure(order, restaurants);
    validated.order_validation_code = code;
    validated.order_status = if code == OrderValidationCode::NoError {
        OrderStatus::ValidButNotDelivered
    } else {
        OrderStatus::Invalid
    };
    validated
}

fn first_failure(order: &Order, restaurants: &[Restaurant]) -> OrderValidationCode {
    if is_card_number_invalid(order) {
        return OrderValidationCode::CardNumberInvalid;
    }
    if is_cvv_invalid(order) {
        return OrderValidationCode::CvvInvalid;
    }
    if is_expiry_invalid(order) {
        return OrderValidationCode::ExpiryDateInvalid;
    }
    if order.pizzas_in_order.len() > MAX_PIZZAS_PER_ORDER {
        return OrderValidationCode::MaxPizzaCountExceeded;
    }
    if has_undefined_pizza(order, restaurants) {
        return OrderValidationCode::PizzaNotDefined;
    }
    if spans_multiple_restaurants(order, restaurants) {
        return OrderValidationCode::PizzaFromMultipleRestaurants;
    }
    if is_restaurant_closed(order, restaurants) {
        return OrderValidationCode::RestaurantClosed;
    }
    if is_total_incorrect(order, restaurants) {
        return OrderValidationCode::TotalIncorrect;
    }
    OrderValidationCode::NoError
}

/// Card numbers must be exactly sixteen ASCII digits.
pub fn is_card_number_invalid(order: &Order) -> bool {
    let number = &order.credit_card_information.credit_card_number;
    number.len() != 16 || !number.bytes().all(|b| b.is_ascii_digit())
}

/// CVVs must be exactly three ASCII digits.
pub fn is_cvv_invalid(order: &Order) -> bool {
    let cvv = &order.credit_card_information.cvv;
    cvv.len() != 3 || !cvv.bytes().all(|b| b.is_ascii_digit())
}

/// Expiry dates are `MM/yy`. A card whose expiry month precedes the
/// order month is invalid, as is anything unparseable. Cards are valid
/// through the last day of their expiry month.
pub fn is_expiry_invalid(order: &Order) -> bool {
    match parse_expiry(&order.credit_card_information.credit_card_expiry) {
        Some((year, month)) => (order.order_date.year(), order.order_date.month()) > (year, month),
        None => true,
    }
}

fn parse_expiry(expiry: &str) -> Option<(i32, u32)> {
    let (month_str, year_str) = expiry.split_once('/')?;
    if month_str.len() != 2
        || year_str.len() != 2
        || !month_str.bytes().chain(year_str.bytes()).all(|b| b.is_ascii_digit())
    {
        return None;
    }
    let month: u32 = month_str.parse().ok()?;
    let year: u32 = year_str.parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some((2000 + year as i32, month))
}

/// Whether any pizza in the order appears on no restaurant's menu.
pub fn has_undefined_pizza(order: &Order, restaurants: &[Restaurant]) -> bool {
    order.pizzas_in_order.iter().any(|pizza| {
        !restaurants
            .iter()
            .any(|restaurant| restaurant.serves(&pizza.name))
    })
}

/// Whether the order's pizzas resolve to more than one restaurant.
/// Pizzas that resolve nowhere are ignored here; the undefined-pizza
/// rule has already covered them.
pub fn spans_multiple_restaurants(order: &Order, restaurants: &[Restaurant]) -> bool {
    let mut first_match: Option<usize> = None;
    for pizza in &order.pizzas_in_order {
        let Some(position) = restaurants.iter().position(|r| r.serves(&pizza.name)) else {
            continue;
        };
        match first_match {
            None => first_match = Some(position),
            Some(existing) if existing != position => return true,
            Some(_) => {}
        }
    }
    false
}

/// Whether the order's restaurant is closed on the order date. Orders
/// that resolve to no restaurant at all count as closed.
pub fn is_restaurant_closed(order: &Order, restaurants: &[Restaurant]) -> bool {
    let Some(restaurant) = find_restaurant(order, restaurants) else {
        return true;
    };
    let weekday = DayOfWeek::from(order.order_date.weekday());
    !restaurant.opening_days.contains(&weekday)
}

/// Whether the claimed total disagrees with the menu prices plus the
/// flat delivery charge.
pub fn is_total_incorrect(order: &Order, restaurants: &[Restaurant]) -> bool {
    let Some(restaurant) = find_restaurant(order, restaurants) else {
        return true;
    };
    let mut expected = ORDER_CHARGE_IN_PENCE;
    for pizza in &order.pizzas_in_order {
        match restaurant.menu.iter().find(|item| item.name == pizza.name) {
            Some(item) => expected += item.price_in_pence,
            None => return true,
        }
    }
    expected != order.price_total_in_pence
}
