use bigdecimal::BigDecimal;
use resale_server_lib::data::models::product::Condition;
use resale_server_lib::services::pricing::{
    ConditionDiscount, DiscountPolicy, flat_shipping_fee,
};
use std::str::FromStr;

fn price(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

#[test]
fn test_new_condition_keeps_full_price() {
    let policy = ConditionDiscount;
    assert_eq!(
        policy.unit_price(&price("1000.00"), Condition::New),
        price("1000.00")
    );
}

#[test]
fn test_discount_schedule_by_condition() {
    let policy = ConditionDiscount;
    let base = price("1000.00");

    assert_eq!(policy.unit_price(&base, Condition::LikeNew), price("950.00"));
    assert_eq!(policy.unit_price(&base, Condition::Good), price("900.00"));
    assert_eq!(policy.unit_price(&base, Condition::Fair), price("800.00"));
    assert_eq!(policy.unit_price(&base, Condition::Poor), price("700.00"));
}

#[test]
fn test_discount_rounds_to_cents() {
    let policy = ConditionDiscount;

    // 99.99 * 0.95 = 94.9905, which must land on a two-decimal price.
    assert_eq!(
        policy.unit_price(&price("99.99"), Condition::LikeNew),
        price("94.99")
    );
    // 33.33 * 0.90 = 29.997 rounds up.
    assert_eq!(
        policy.unit_price(&price("33.33"), Condition::Good),
        price("30.00")
    );
}

#[test]
fn test_flat_shipping_fee() {
    assert_eq!(flat_shipping_fee(), price("50.00"));
}

#[test]
fn test_custom_policy_is_swappable() {
    struct NoDiscount;
    impl DiscountPolicy for NoDiscount {
        fn unit_price(&self, base: &BigDecimal, _condition: Condition) -> BigDecimal {
            base.clone()
        }
    }

    let policy: Box<dyn DiscountPolicy> = Box::new(NoDiscount);
    assert_eq!(
        policy.unit_price(&price("123.45"), Condition::Poor),
        price("123.45")
    );
}
