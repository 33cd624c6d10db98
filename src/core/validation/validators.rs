//! Reusable field validators
//!
//! Each validator returns `Err(message)` naming the offending field.

use rust_decimal::Decimal;

/// Validator: text must contain something other than whitespace
pub fn required_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} is required", field))
    } else {
        Ok(())
    }
}

/// Validator: number must be strictly positive
pub fn positive(field: &str, value: Decimal) -> Result<(), String> {
    if value <= Decimal::ZERO {
        Err(format!("{} must be greater than zero (got {})", field, value))
    } else {
        Ok(())
    }
}

/// Validator: number must not be negative
pub fn non_negative(field: &str, value: Decimal) -> Result<(), String> {
    if value < Decimal::ZERO {
        Err(format!("{} must not be negative (got {})", field, value))
    } else {
        Ok(())
    }
}

/// Validator: list must contain at least one element
pub fn non_empty<T>(field: &str, values: &[T]) -> Result<(), String> {
    if values.is_empty() {
        Err(format!("{} must not be empty", field))
    } else {
        Ok(())
    }
}
