//! Randomized operation sequences checked against the cart invariants.

use foodie_cart::cart::discount_for;
use foodie_cart::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

const SEEDS: u64 = 32;
const STEPS: usize = 200;

fn coupons() -> Vec<Coupon> {
    vec![
        Coupon::percentage("P20", "20% up to 30", 20.0)
            .with_min_order(Money::from_major(200))
            .with_max_discount(Money::from_major(30)),
        Coupon::percentage("P15", "15%", 15.0).with_min_order(Money::from_major(500)),
        Coupon::percentage("P12", "12.5%", 12.5),
        Coupon::flat("F150", "Flat 150", Money::from_major(150)).with_min_order(Money::from_major(100)),
        Coupon::flat("F25", "Flat 25", Money::from_minor(2550)).deactivated(),
    ]
}

fn random_action(rng: &mut StdRng, coupons: &[Coupon]) -> CartAction {
    let id = ItemId::new(format!("item-{}", rng.gen_range(0..6)));
    match rng.gen_range(0..10) {
        0..=3 => {
            let price = Money::from_minor(rng.gen_range(0..50_000));
            CartAction::AddItem(NewItem::new(id, "Dish", price, "r-1", "Kitchen"))
        }
        4 => CartAction::RemoveItem(id),
        5 | 6 => CartAction::UpdateQuantity {
            id,
            quantity: rng.gen_range(-2..12),
        },
        7 => CartAction::ApplyCoupon(coupons[rng.gen_range(0..coupons.len())].clone()),
        8 => CartAction::RemoveCoupon,
        _ => {
            if rng.gen_bool(0.2) {
                CartAction::Clear
            } else {
                CartAction::RemoveCoupon
            }
        }
    }
}

fn assert_invariants(state: &CartState) {
    let expected_total = state
        .items()
        .iter()
        .map(|i| i.price.saturating_mul(i.quantity))
        .fold(Money::ZERO, |acc, m| acc + m);
    assert_eq!(state.total(), expected_total, "total must equal sum of lines");

    assert_eq!(
        state.discount(),
        discount_for(state.applied_coupon(), state.total()),
        "discount must follow the applied coupon"
    );

    let ids: HashSet<_> = state.items().iter().map(|i| &i.id).collect();
    assert_eq!(ids.len(), state.items().len(), "item ids must be unique");

    assert!(state.items().iter().all(|i| i.quantity >= 1));
}

#[test]
fn invariants_hold_for_random_sequences() {
    let coupons = coupons();
    let limits = CartLimits {
        max_quantity_per_item: 10,
    };

    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = CartState::new();

        for _ in 0..STEPS {
            let action = random_action(&mut rng, &coupons);
            state = state.reduce(action, &limits);
            assert_invariants(&state);
            assert!(state.items().iter().all(|i| i.quantity <= 10));
        }
    }
}

#[test]
fn every_reachable_state_roundtrips() {
    let coupons = coupons();
    let limits = CartLimits::default();

    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed ^ 0xCA27);
        let mut state = CartState::new();

        for _ in 0..STEPS / 4 {
            state = state.reduce(random_action(&mut rng, &coupons), &limits);

            let encoded = state.encode().unwrap();
            let decoded = CartState::decode(&encoded).unwrap();
            assert_eq!(decoded, state);
            assert_eq!(decoded.encode().unwrap(), encoded);
        }
    }
}

#[test]
fn reapplying_a_coupon_is_idempotent() {
    let coupons = coupons();
    let limits = CartLimits::default();

    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed.wrapping_mul(7919));
        let mut state = CartState::new();
        for _ in 0..20 {
            state = state.reduce(random_action(&mut rng, &coupons), &limits);
        }

        let coupon = coupons[rng.gen_range(0..coupons.len())].clone();
        let once = state.reduce(CartAction::ApplyCoupon(coupon.clone()), &limits);
        let twice = once.clone().reduce(CartAction::ApplyCoupon(coupon), &limits);
        assert_eq!(once, twice);
    }
}
