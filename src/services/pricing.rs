use crate::data::models::product::Condition;
use bigdecimal::{BigDecimal, RoundingMode};

/// Strategy seam for the condition-dependent discount. Checkout only
/// depends on this trait, so the schedule can change without touching
/// the placement flow.
pub trait DiscountPolicy: Send + Sync {
    /// Effective unit price for a listing in the given wear grade.
    fn unit_price(&self, base: &BigDecimal, condition: Condition) -> BigDecimal;
}

/// Default schedule: a flat percentage off by wear grade.
pub struct ConditionDiscount;

impl ConditionDiscount {
    fn percent_off(condition: Condition) -> i32 {
        match condition {
            Condition::New => 0,
            Condition::LikeNew => 5,
            Condition::Good => 10,
            Condition::Fair => 20,
            Condition::Poor => 30,
        }
    }
}

impl DiscountPolicy for ConditionDiscount {
    fn unit_price(&self, base: &BigDecimal, condition: Condition) -> BigDecimal {
        let keep = BigDecimal::from(100 - Self::percent_off(condition));
        (base * keep / BigDecimal::from(100)).with_scale_round(2, RoundingMode::HalfUp)
    }
}

/// Flat delivery surcharge added to every order's grand total.
pub fn flat_shipping_fee() -> BigDecimal {
    BigDecimal::from(50).with_scale(2)
}
