//! End-to-end cart scenarios through the store.

use foodie_cart::prelude::*;
use foodie_storage::Storage;

fn open() -> CartStore {
    CartStore::open(Storage::in_memory(), &CartConfig::default())
}

fn item(id: &str, price: i64) -> NewItem {
    NewItem::new(id, id, Money::from_major(price), "r-1", "Spice Route")
}

fn capped_twenty() -> Coupon {
    Coupon::percentage("TWENTY", "20% off, up to 30", 20.0)
        .with_min_order(Money::from_major(200))
        .with_max_discount(Money::from_major(30))
}

#[test]
fn adding_the_same_item_twice_merges_into_one_line() {
    let mut cart = open();
    cart.add_item(item("x1", 100));
    let state = cart.add_item(item("x1", 100));

    assert_eq!(state.items().len(), 1);
    assert_eq!(state.items()[0].id.as_str(), "x1");
    assert_eq!(state.items()[0].quantity, 2);
    assert_eq!(state.total(), Money::from_major(200));
}

#[test]
fn percentage_coupon_is_capped() {
    let mut cart = open();
    cart.add_item(item("x1", 100));
    cart.add_item(item("x1", 100));

    let state = cart.apply_coupon(capped_twenty());
    assert_eq!(state.discount(), Money::from_major(30));
}

#[test]
fn dropping_below_min_order_zeroes_discount_but_keeps_coupon() {
    let mut cart = open();
    cart.add_item(item("a", 150));
    cart.add_item(item("b", 50));
    cart.apply_coupon(capped_twenty());
    assert_eq!(cart.state().discount(), Money::from_major(30));

    let state = cart.remove_item("b");
    assert_eq!(state.total(), Money::from_major(150));
    assert_eq!(state.discount(), Money::ZERO);
    assert_eq!(state.applied_coupon().map(|c| c.code.as_str()), Some("TWENTY"));
}

#[test]
fn flat_coupon_is_uncapped() {
    let mut cart = open();
    cart.add_item(item("a", 300));

    let flat = Coupon::flat("BIG150", "Flat 150 off", Money::from_major(150))
        .with_min_order(Money::from_major(100));
    assert_eq!(cart.apply_coupon(flat).discount(), Money::from_major(150));
}

#[test]
fn legacy_coupon_over_one_hundred_decodes_as_flat() {
    let legacy: Coupon = serde_json::from_str(
        r#"{"id":"L150","code":"L150","description":"legacy","discount":150,
            "minOrder":100,"isActive":true}"#,
    )
    .unwrap();
    assert_eq!(legacy.value, CouponValue::Flat(Money::from_major(150)));

    let mut cart = open();
    cart.add_item(item("a", 300));
    assert_eq!(cart.apply_coupon(legacy).discount(), Money::from_major(150));
}

#[test]
fn updating_an_unknown_item_changes_nothing() {
    let mut cart = open();
    cart.add_item(item("a", 300));
    cart.apply_coupon(capped_twenty());
    let before = cart.state().clone();

    assert_eq!(*cart.update_quantity("zz", 5), before);
    assert_eq!(*cart.remove_item("zz"), before);
}

#[test]
fn clearing_resets_to_empty() {
    let mut cart = open();
    cart.add_item(item("a", 300));
    cart.apply_coupon(capped_twenty());

    let state = cart.clear();
    assert!(state.items().is_empty());
    assert_eq!(state.total(), Money::ZERO);
    assert!(state.applied_coupon().is_none());
    assert_eq!(state.discount(), Money::ZERO);
    assert_eq!(*state, CartState::new());
}

#[test]
fn applying_the_same_coupon_twice_is_idempotent() {
    let mut cart = open();
    cart.add_item(item("a", 250));

    let once = cart.apply_coupon(capped_twenty()).clone();
    let twice = cart.apply_coupon(capped_twenty()).clone();
    assert_eq!(once, twice);
}

#[test]
fn checkout_summary_matches_cart() {
    let config = CartConfig::default();
    let book = config.coupon_book();
    let mut cart = CartStore::open(Storage::in_memory(), &config);

    cart.add_item(item("thali", 180));
    cart.add_item(item("lassi", 60));
    cart.update_quantity("lassi", 2);
    cart.redeem(&book, "WELCOME20").unwrap();

    let summary = OrderSummary::for_cart(cart.state(), &config.pricing);
    // subtotal 300, 20% = 60 under the 100 cap, taxes 54
    assert_eq!(summary.subtotal, Money::from_major(300));
    assert_eq!(summary.discount, Money::from_major(60));
    assert_eq!(summary.grand_total, Money::from_major(334));
    assert_eq!(summary.points_earned, 33);

    let lines = cart.state().order_lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].quantity, 2);
}

#[test]
fn persisted_layout_matches_web_client() {
    let storage = Storage::in_memory();
    let mut cart = CartStore::open(storage.clone(), &CartConfig::default());
    cart.add_item(item("x1", 100).with_veg(true));

    let raw = storage.get_raw("foodie-cart").unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(json["total"], 100);
    assert_eq!(json["discount"], 0);
    assert!(json["appliedCoupon"].is_null());
    let line = &json["items"][0];
    assert_eq!(line["id"], "x1");
    assert_eq!(line["quantity"], 1);
    assert_eq!(line["isVeg"], true);
    assert_eq!(line["restaurantName"], "Spice Route");
}

#[test]
fn web_client_snapshot_hydrates() {
    let storage = Storage::in_memory();
    storage
        .set_raw(
            "foodie-cart",
            r#"{"items":[{"id":"m1","name":"Masala Dosa","description":"Crisp","price":120,
                "image":"/dosa.jpg","category":"South Indian","isVeg":true,"quantity":3,
                "restaurantId":"r-9","restaurantName":"Udupi"}],
                "total":360,
                "appliedCoupon":{"id":"WELCOME20","code":"WELCOME20","description":"20% off",
                    "discount":20,"minOrder":200,"maxDiscount":100,"isActive":true},
                "discount":72}"#,
        )
        .unwrap();

    let cart = CartStore::open(storage, &CartConfig::default());
    let state = cart.state();
    assert_eq!(state.item_count(), 3);
    assert_eq!(state.total(), Money::from_major(360));
    assert_eq!(state.discount(), Money::from_major(72));
}
