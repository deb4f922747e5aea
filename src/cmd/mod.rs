pub mod land;
pub mod property;
pub mod rates;
pub mod schema;
pub mod transport;

use crate::tax::kz::TaxYear;
use crate::tax::land::{LandCategory, LandPurpose};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Earliest manufacture year accepted for a vehicle
const MIN_MANUFACTURE_YEAR: i32 = 1900;

/// Largest area accepted for a plot (ha) or a property (m²)
pub const MAX_AREA: Decimal = dec!(1000000000000);

/// Invalid command line input, rejected before any calculation
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("{name} must be greater than zero, got {value}")]
    NotPositive { name: &'static str, value: Decimal },
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: Decimal },
    #[error("{name} must not exceed {max}, got {value}")]
    TooLarge {
        name: &'static str,
        value: Decimal,
        max: Decimal,
    },
    #[error("purpose '{purpose:?}' is not available for category '{category:?}'")]
    PurposeNotInCategory {
        purpose: LandPurpose,
        category: LandCategory,
    },
    #[error("manufacture year {year} must be between {min} and {max}")]
    ManufactureYearOutOfRange { year: i32, min: i32, max: i32 },
}

pub fn ensure_positive(name: &'static str, value: Decimal) -> Result<Decimal, InputError> {
    if value > Decimal::ZERO {
        Ok(value)
    } else {
        Err(InputError::NotPositive { name, value })
    }
}

pub fn ensure_non_negative(name: &'static str, value: Decimal) -> Result<Decimal, InputError> {
    if value.is_sign_negative() && !value.is_zero() {
        Err(InputError::Negative { name, value })
    } else {
        Ok(value)
    }
}

pub fn ensure_at_most(
    name: &'static str,
    value: Decimal,
    max: Decimal,
) -> Result<Decimal, InputError> {
    if value > max {
        Err(InputError::TooLarge { name, value, max })
    } else {
        Ok(value)
    }
}

/// Area must be positive and no larger than [`MAX_AREA`]
pub fn ensure_area(value: Decimal) -> Result<Decimal, InputError> {
    ensure_positive("area", value)?;
    ensure_at_most("area", value, MAX_AREA)
}

pub fn ensure_purpose_in_category(
    purpose: LandPurpose,
    category: LandCategory,
) -> Result<(), InputError> {
    if purpose.category() == category {
        Ok(())
    } else {
        Err(InputError::PurposeNotInCategory { purpose, category })
    }
}

pub fn ensure_manufacture_year(year: i32) -> Result<i32, InputError> {
    let max = TaxYear::current().0;
    if (MIN_MANUFACTURE_YEAR..=max).contains(&year) {
        Ok(year)
    } else {
        Err(InputError::ManufactureYearOutOfRange {
            year,
            min: MIN_MANUFACTURE_YEAR,
            max,
        })
    }
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
