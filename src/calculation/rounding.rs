//! Currency rounding.
//!
//! Calculators keep intermediate values at full `Decimal` precision and
//! round each reported component exactly once through [`round_currency`].

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount to cents, half-up (midpoint away from zero).
///
/// The result always carries two decimal places.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rounded = round_currency(Decimal::from_str("7400.9375").unwrap());
/// assert_eq!(rounded.to_string(), "7400.94");
///
/// let padded = round_currency(Decimal::from(25000));
/// assert_eq!(padded.to_string(), "25000.00");
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
