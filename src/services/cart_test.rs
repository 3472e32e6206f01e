use super::*;
use crate::services::catalog::Catalog;

fn product(id: &str) -> Product {
    Catalog::seed().get(id).cloned().expect("seed product should exist")
}

#[test]
fn new_cart_is_empty_with_zero_totals() {
    let cart = Cart::new();
    assert!(cart.is_empty());
    assert_eq!(cart.item_count(), 0);
    assert_eq!(cart.total(), Cents::ZERO);
}

#[test]
fn repeated_add_counts_calls() {
    let trufas = product("1");
    let mut cart = Cart::new();
    for _ in 0..5 {
        cart.add(&trufas);
    }
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.get("1").map(|i| i.quantity), Some(5));
    assert_eq!(cart.item_count(), 5);
    assert_eq!(cart.total(), trufas.price.times(5));
}

#[test]
fn add_snapshots_product_fields() {
    let mut trufas = product("1");
    let mut cart = Cart::new();
    cart.add(&trufas);

    trufas.price = Cents::new(99, 0);
    trufas.name = "Renamed".into();
    cart.add(&trufas);

    let line = cart.get("1").unwrap();
    assert_eq!(line.price, Cents::new(24, 90));
    assert_eq!(line.name, "Trufas Gourmet");
    assert_eq!(line.quantity, 2);
    assert_eq!(cart.total(), Cents::new(49, 80));
}

#[test]
fn lines_keep_insertion_order() {
    let mut cart = Cart::new();
    cart.add(&product("3"));
    cart.add(&product("1"));
    cart.add(&product("3"));
    let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["3", "1"]);
}

#[test]
fn totals_span_multiple_lines() {
    let mut cart = Cart::new();
    cart.add(&product("1"));
    cart.add(&product("3"));
    cart.add(&product("3"));
    assert_eq!(cart.item_count(), 3);
    assert_eq!(cart.total(), Cents::new(24, 90) + Cents::new(37, 0));
}

#[test]
fn remove_deletes_line() {
    let mut cart = Cart::new();
    cart.add(&product("1"));
    cart.add(&product("2"));
    let removed = cart.remove("1");
    assert_eq!(removed.map(|i| i.id), Some("1".to_owned()));
    assert!(cart.get("1").is_none());
    assert_eq!(cart.items().len(), 1);
}

#[test]
fn remove_missing_is_noop() {
    let mut cart = Cart::new();
    cart.add(&product("1"));
    let before = cart.clone();
    assert!(cart.remove("42").is_none());
    assert_eq!(cart, before);
}

#[test]
fn update_quantity_sets_value() {
    let mut cart = Cart::new();
    cart.add(&product("2"));
    let change = cart.update_quantity("2", 4);
    assert!(matches!(change, CartChange::Updated(ref item) if item.quantity == 4));
    assert_eq!(cart.total(), Cents::new(32, 90).times(4));
}

#[test]
fn update_quantity_zero_removes_and_is_idempotent() {
    let mut cart = Cart::new();
    cart.add(&product("2"));
    cart.add(&product("4"));

    assert!(matches!(cart.update_quantity("2", 0), CartChange::Removed(_)));
    let after_first = cart.clone();
    assert!(cart.get("2").is_none());

    assert_eq!(cart.update_quantity("2", 0), CartChange::Missing);
    assert_eq!(cart, after_first);
}

#[test]
fn update_quantity_missing_is_noop() {
    let mut cart = Cart::new();
    assert_eq!(cart.update_quantity("1", 3), CartChange::Missing);
    assert!(cart.is_empty());
}

#[test]
fn add_increment_decrement_zero_scenario() {
    let trufas = product("1");
    let mut cart = Cart::new();

    cart.add(&trufas);
    assert_eq!((cart.item_count(), cart.total()), (1, Cents::new(24, 90)));

    cart.add(&trufas);
    assert_eq!((cart.item_count(), cart.total()), (2, Cents::new(49, 80)));

    let decremented = clamp_quantity(cart.get("1").unwrap().quantity, -1);
    cart.update_quantity("1", decremented);
    assert_eq!((cart.item_count(), cart.total()), (1, Cents::new(24, 90)));

    cart.update_quantity("1", 0);
    assert!(cart.is_empty());
}

#[test]
fn clamp_quantity_stops_at_zero() {
    assert_eq!(clamp_quantity(1, -1), 0);
    assert_eq!(clamp_quantity(0, -1), 0);
    assert_eq!(clamp_quantity(2, -10), 0);
    assert_eq!(clamp_quantity(2, 3), 5);
    assert_eq!(clamp_quantity(u32::MAX, 1), MAX_QUANTITY);
    assert_eq!(clamp_quantity(MAX_QUANTITY - 1, i64::MAX), MAX_QUANTITY);
}

#[test]
fn quantities_are_capped_per_line() {
    let trufas = product("1");
    let macarons = product("2");
    let mut cart = Cart::new();
    cart.add(&trufas);
    cart.add(&macarons);

    assert!(matches!(cart.update_quantity("1", u32::MAX), CartChange::Updated(item) if item.quantity == MAX_QUANTITY));
    cart.add(&trufas);
    assert_eq!(cart.get("1").map(|i| i.quantity), Some(MAX_QUANTITY));

    assert_eq!(cart.item_count(), MAX_QUANTITY + 1);
    assert_eq!(cart.total(), trufas.price.times(MAX_QUANTITY) + macarons.price);
}
