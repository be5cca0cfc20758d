use serde::{Deserialize, Serialize};

use super::value_objects::CartItem;

// ============================================================================
// Cart Pricing - Threshold and Coupon Discounts
// ============================================================================
//
// Order of evaluation:
// 1. total              = sum of item prices
// 2. threshold discount = 10% of total once total exceeds 300
// 3. taxable            = total - threshold discount
// 4. coupon discount    = percentage of taxable, or a flat amount
// 5. payable            = total - both discounts, floored at zero
//
// The coupon discount itself is never capped; only payable is clamped.
//
// ============================================================================

/// Subtotal above which the threshold discount kicks in (exclusive)
pub const THRESHOLD_AMOUNT: f64 = 300.0;

/// Share of the subtotal taken off once the threshold is exceeded
pub const THRESHOLD_RATE: f64 = 0.10;

/// How a coupon code reduces the taxable amount
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coupon {
    /// Fraction of the taxable amount
    Percentage(f64),
    /// Fixed amount, independent of the taxable amount
    Flat(f64),
}

const COUPONS: &[(&str, Coupon)] = &[
    ("SAVE20", Coupon::Percentage(0.20)),
    ("WELCOME10", Coupon::Percentage(0.10)),
    ("FLAT50", Coupon::Flat(50.0)),
];

impl Coupon {
    /// Exact, case-sensitive lookup. Unknown codes carry no discount.
    pub fn lookup(code: &str) -> Option<Coupon> {
        COUPONS
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, coupon)| *coupon)
    }

    pub fn discount_on(&self, taxable: f64) -> f64 {
        match self {
            Coupon::Percentage(rate) => taxable * rate,
            Coupon::Flat(amount) => *amount,
        }
    }
}

/// Monetary values derived from the cart's items and coupon code
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CartTotals {
    pub total: f64,
    pub threshold_discount: f64,
    pub coupon_discount: f64,
    pub payable: f64,
}

impl CartTotals {
    pub fn calculate(items: &[CartItem], coupon_code: Option<&str>) -> Self {
        let total = items.iter().fold(0.0, |sum, item| sum + item.price);

        let threshold_discount = if total > THRESHOLD_AMOUNT {
            total * THRESHOLD_RATE
        } else {
            0.0
        };

        let taxable = total - threshold_discount;
        let coupon_discount = coupon_code
            .and_then(Coupon::lookup)
            .map(|coupon| coupon.discount_on(taxable))
            .unwrap_or(0.0);

        let payable = (total - threshold_discount - coupon_discount).max(0.0);

        Self {
            total,
            threshold_discount,
            coupon_discount,
            payable,
        }
    }

    /// Amount the coupon discount is computed against
    pub fn taxable(&self) -> f64 {
        self.total - self.threshold_discount
    }
}
