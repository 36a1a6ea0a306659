use crate::types::{MonetaryError, Quantity};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serializer;
use std::str::FromStr;

/// Places used whenever an amount is rendered for people or report files.
const DISPLAY_PLACES: u32 = 2;

pub type Money = Decimal;

/// Parses an amount that must be zero or positive.
///
/// Scientific notation and currency symbols are rejected, only plain decimal
/// literals such as `9.99`, `+10` or `0.125` are accepted.
pub fn parse_non_negative(value: &str) -> Result<Money, MonetaryError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(MonetaryError::InvalidFormat("Value is an empty string".to_string()));
    }

    let amount = Decimal::from_str(value)
        .map_err(|error| MonetaryError::InvalidFormat(format!("Value [{value}] is not a decimal: {error}")))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(MonetaryError::Negative(value.to_string()));
    }

    Ok(amount)
}

/// Multiplies a unit price by a quantity without losing precision.
pub fn line_total(unit_price: Money, quantity: Quantity) -> Result<Money, MonetaryError> {
    unit_price.checked_mul(Decimal::from(quantity)).ok_or(MonetaryError::Overflow)
}

pub fn format_money(amount: &Money) -> String {
    let rounded = amount.round_dp_with_strategy(DISPLAY_PLACES, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.width$}", rounded, width = DISPLAY_PLACES as usize)
}

pub fn serialize_money<S: Serializer>(amount: &Money, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_money(amount))
}
