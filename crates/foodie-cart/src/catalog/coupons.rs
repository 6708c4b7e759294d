//! The coupon book: authored coupons and the redemption gate.

use crate::cart::Coupon;
use crate::error::CouponError;
use crate::money::Money;

/// The set of coupons customers can redeem.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponBook {
    coupons: Vec<Coupon>,
}

impl CouponBook {
    /// Create a book from authored coupons.
    pub fn new(coupons: Vec<Coupon>) -> Self {
        Self { coupons }
    }

    /// The launch catalog.
    ///
    /// FLAT50 and POINTS100 are flat amounts. Older clients stored them as
    /// bare numbers under 100 and therefore charged them as percentages.
    pub fn standard() -> Self {
        Self::new(vec![
            Coupon::percentage("WELCOME20", "20% off on your first order", 20.0)
                .with_min_order(Money::from_major(200))
                .with_max_discount(Money::from_major(100)),
            Coupon::percentage("SAVE15", "15% off on orders above \u{20b9}500", 15.0)
                .with_min_order(Money::from_major(500))
                .with_max_discount(Money::from_major(150)),
            Coupon::flat(
                "FLAT50",
                "Flat \u{20b9}50 off on orders above \u{20b9}300",
                Money::from_major(50),
            )
            .with_min_order(Money::from_major(300)),
            Coupon::flat(
                "POINTS100",
                "Redeem 100 points for \u{20b9}25 off",
                Money::from_major(25),
            )
            .with_min_order(Money::from_major(100)),
        ])
    }

    /// Every coupon, active or not.
    pub fn all(&self) -> &[Coupon] {
        &self.coupons
    }

    /// Coupons that can be offered to customers.
    pub fn available(&self) -> impl Iterator<Item = &Coupon> {
        self.coupons.iter().filter(|c| c.is_active)
    }

    /// Find an active coupon by exact, case-sensitive code.
    pub fn find(&self, code: &str) -> Option<&Coupon> {
        self.available().find(|c| c.code == code)
    }

    /// Gate a code against a cart total before applying it.
    pub fn check_eligibility(&self, code: &str, total: Money) -> Result<&Coupon, CouponError> {
        let coupon = self
            .find(code)
            .ok_or_else(|| CouponError::UnknownCode(code.to_string()))?;

        if !coupon.is_eligible_for(total) {
            return Err(CouponError::BelowMinimumOrder {
                code: coupon.code.clone(),
                minimum: coupon.min_order,
            });
        }

        Ok(coupon)
    }
}

impl Default for CouponBook {
    fn default() -> Self {
        Self::standard()
    }
}
