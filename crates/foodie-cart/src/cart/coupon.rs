//! Coupon types and the discount rule.

use crate::ids::CouponId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Legacy coupons encode percentages as `discount <= 100` and flat amounts
/// above it.
pub const LEGACY_PERCENTAGE_CEILING: f64 = 100.0;

/// How much a coupon takes off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CouponValue {
    /// Percentage of the cart total, optionally capped.
    Percentage {
        /// Percent off (e.g. `20.0` for 20%).
        percent: f64,
        /// Upper bound on the computed discount.
        max_discount: Option<Money>,
    },
    /// Fixed amount off, uncapped.
    Flat(Money),
}

impl CouponValue {
    /// Decode a coupon that predates explicit kinds.
    ///
    /// Values up to 100 are read as percentages and anything larger as a flat
    /// amount, so a legacy "flat 50 off" coupon decodes as 50% off. Only
    /// snapshots without a `kind` tag take this path.
    pub fn from_legacy(discount: f64, max_discount: Option<Money>) -> Self {
        if discount <= LEGACY_PERCENTAGE_CEILING {
            CouponValue::Percentage {
                percent: discount,
                max_discount,
            }
        } else {
            CouponValue::Flat(Money::from_decimal(discount))
        }
    }

    /// Calculate the discount amount for a total that already meets the
    /// coupon's minimum order.
    pub fn calculate(&self, total: Money) -> Money {
        match *self {
            CouponValue::Percentage {
                percent,
                max_discount,
            } => {
                let discount = total.percentage(percent);
                match max_discount {
                    Some(cap) if discount > cap => cap,
                    _ => discount,
                }
            }
            CouponValue::Flat(amount) => amount,
        }
    }

    /// The wire kind tag.
    pub fn kind(&self) -> CouponKind {
        match self {
            CouponValue::Percentage { .. } => CouponKind::Percentage,
            CouponValue::Flat(_) => CouponKind::Flat,
        }
    }
}

/// Explicit discount kind written alongside the legacy `discount` number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponKind {
    Percentage,
    Flat,
}

/// A discount rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CouponRecord", into = "CouponRecord")]
pub struct Coupon {
    /// Unique coupon identifier.
    pub id: CouponId,
    /// User-facing code, matched exactly and case-sensitively.
    pub code: String,
    /// Display text.
    pub description: String,
    /// Magnitude of the discount.
    pub value: CouponValue,
    /// Minimum cart total for the coupon to yield anything.
    pub min_order: Money,
    /// Inactive coupons are never offered or redeemed.
    pub is_active: bool,
}

impl Coupon {
    /// Create an active percentage coupon whose ID equals its code.
    pub fn percentage(code: impl Into<String>, description: impl Into<String>, percent: f64) -> Self {
        Self::with_value(
            code,
            description,
            CouponValue::Percentage {
                percent,
                max_discount: None,
            },
        )
    }

    /// Create an active flat-amount coupon whose ID equals its code.
    pub fn flat(code: impl Into<String>, description: impl Into<String>, amount: Money) -> Self {
        Self::with_value(code, description, CouponValue::Flat(amount))
    }

    fn with_value(code: impl Into<String>, description: impl Into<String>, value: CouponValue) -> Self {
        let code = code.into();
        Self {
            id: CouponId::new(code.clone()),
            code,
            description: description.into(),
            value,
            min_order: Money::ZERO,
            is_active: true,
        }
    }

    /// Set the minimum order amount.
    pub fn with_min_order(mut self, amount: Money) -> Self {
        self.min_order = amount;
        self
    }

    /// Cap a percentage discount. No effect on flat coupons.
    pub fn with_max_discount(mut self, cap: Money) -> Self {
        if let CouponValue::Percentage { max_discount, .. } = &mut self.value {
            *max_discount = Some(cap);
        }
        self
    }

    /// Mark the coupon inactive.
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Whether `total` meets the minimum order.
    pub fn is_eligible_for(&self, total: Money) -> bool {
        total >= self.min_order
    }

    /// The discount this coupon yields against `total`.
    ///
    /// Below the minimum order the coupon yields zero rather than being
    /// rejected; it stays applied and starts paying out again once the total
    /// recovers.
    pub fn discount_for(&self, total: Money) -> Money {
        if !self.is_eligible_for(total) {
            return Money::ZERO;
        }
        self.value.calculate(total)
    }
}

/// The discount for an optional coupon; zero when none is applied.
pub fn discount_for(coupon: Option<&Coupon>, total: Money) -> Money {
    coupon.map_or(Money::ZERO, |c| c.discount_for(total))
}

/// Persisted coupon layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CouponRecord {
    id: CouponId,
    code: String,
    description: String,
    discount: f64,
    min_order: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_discount: Option<Money>,
    is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kind: Option<CouponKind>,
}

impl TryFrom<CouponRecord> for Coupon {
    type Error = String;

    fn try_from(record: CouponRecord) -> Result<Self, Self::Error> {
        let value = match record.kind {
            Some(CouponKind::Percentage) => CouponValue::Percentage {
                percent: record.discount,
                max_discount: record.max_discount,
            },
            Some(CouponKind::Flat) => {
                if record.max_discount.is_some() {
                    return Err(format!(
                        "coupon {}: maxDiscount is only valid for percentage coupons",
                        record.code
                    ));
                }
                CouponValue::Flat(Money::from_decimal(record.discount))
            }
            None => CouponValue::from_legacy(record.discount, record.max_discount),
        };

        Ok(Coupon {
            id: record.id,
            code: record.code,
            description: record.description,
            value,
            min_order: record.min_order,
            is_active: record.is_active,
        })
    }
}

impl From<Coupon> for CouponRecord {
    fn from(coupon: Coupon) -> Self {
        let kind = Some(coupon.value.kind());
        let (discount, max_discount) = match coupon.value {
            CouponValue::Percentage {
                percent,
                max_discount,
            } => (percent, max_discount),
            CouponValue::Flat(amount) => (amount.to_decimal(), None),
        };
        Self {
            id: coupon.id,
            code: coupon.code,
            description: coupon.description,
            discount,
            min_order: coupon.min_order,
            max_discount,
            is_active: coupon.is_active,
            kind,
        }
    }
}
