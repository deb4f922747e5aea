//! Vehicle tax, charged in multiples of the monthly calculation index

use crate::tax::kz::TaxYear;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Vehicles this old or older pay half
pub const AGE_DISCOUNT_YEARS: i32 = 10;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleType {
    Passenger,
    Truck,
    Motorcycle,
    Bus,
    Special,
    Trailer,
}

impl VehicleType {
    pub const ALL: [VehicleType; 6] = [
        VehicleType::Passenger,
        VehicleType::Truck,
        VehicleType::Motorcycle,
        VehicleType::Bus,
        VehicleType::Special,
        VehicleType::Trailer,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            VehicleType::Passenger => "Легковой автомобиль",
            VehicleType::Truck => "Грузовой автомобиль",
            VehicleType::Motorcycle => "Мототранспорт",
            VehicleType::Bus => "Автобус",
            VehicleType::Special => "Спецтехника",
            VehicleType::Trailer => "Прицеп",
        }
    }

    /// What the measured quantity means for this vehicle type
    pub fn quantity_name(&self) -> &'static str {
        match self {
            VehicleType::Passenger | VehicleType::Motorcycle => "Объём двигателя",
            VehicleType::Truck | VehicleType::Trailer => "Грузоподъёмность",
            VehicleType::Bus => "Посадочных мест",
            VehicleType::Special => "Мощность",
        }
    }

    pub fn quantity_unit(&self) -> &'static str {
        match self {
            VehicleType::Passenger | VehicleType::Motorcycle => "см³",
            VehicleType::Truck | VehicleType::Trailer => "тонн",
            VehicleType::Bus => "",
            VehicleType::Special => "л.с.",
        }
    }

    /// Brackets ordered by ascending upper bound; the last is unbounded
    pub fn brackets(&self) -> &'static [RateBracket] {
        match self {
            VehicleType::Passenger => PASSENGER,
            VehicleType::Truck => TRUCK,
            VehicleType::Motorcycle => MOTORCYCLE,
            VehicleType::Bus => BUS,
            VehicleType::Special => SPECIAL,
            VehicleType::Trailer => TRAILER,
        }
    }

    /// First bracket whose upper bound is at least `quantity`
    pub fn bracket_for(&self, quantity: Decimal) -> Option<&'static RateBracket> {
        self.brackets()
            .iter()
            .find(|b| b.max.is_none_or(|max| quantity <= max))
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateBracket {
    /// Inclusive upper bound, `None` for the top bracket
    pub max: Option<Decimal>,
    /// Rate in monthly calculation indices
    pub rate: Decimal,
    pub label: &'static str,
}

const fn bracket(max: Option<Decimal>, rate: Decimal, label: &'static str) -> RateBracket {
    RateBracket { max, rate, label }
}

static PASSENGER: &[RateBracket] = &[
    bracket(Some(dec!(1500)), dec!(5), "до 1500 см³"),
    bracket(Some(dec!(2000)), dec!(7), "1501-2000 см³"),
    bracket(Some(dec!(2500)), dec!(10), "2001-2500 см³"),
    bracket(Some(dec!(3000)), dec!(15), "2501-3000 см³"),
    bracket(Some(dec!(4000)), dec!(20), "3001-4000 см³"),
    bracket(None, dec!(30), "свыше 4000 см³"),
];

static TRUCK: &[RateBracket] = &[
    bracket(Some(dec!(2)), dec!(7), "до 2 тонн"),
    bracket(Some(dec!(5)), dec!(10), "2-5 тонн"),
    bracket(Some(dec!(10)), dec!(15), "5-10 тонн"),
    bracket(Some(dec!(20)), dec!(20), "10-20 тонн"),
    bracket(None, dec!(25), "свыше 20 тонн"),
];

static MOTORCYCLE: &[RateBracket] = &[
    bracket(Some(dec!(250)), dec!(2), "до 250 см³"),
    bracket(Some(dec!(500)), dec!(4), "250-500 см³"),
    bracket(Some(dec!(750)), dec!(6), "500-750 см³"),
    bracket(None, dec!(8), "свыше 750 см³"),
];

static BUS: &[RateBracket] = &[
    bracket(Some(dec!(20)), dec!(10), "до 20 мест"),
    bracket(Some(dec!(40)), dec!(15), "20-40 мест"),
    bracket(None, dec!(20), "свыше 40 мест"),
];

static SPECIAL: &[RateBracket] = &[
    bracket(Some(dec!(100)), dec!(8), "до 100 л.с."),
    bracket(Some(dec!(200)), dec!(12), "100-200 л.с."),
    bracket(None, dec!(18), "свыше 200 л.с."),
];

static TRAILER: &[RateBracket] = &[
    bracket(Some(dec!(3)), dec!(5), "до 3 тонн"),
    bracket(Some(dec!(8)), dec!(8), "3-8 тонн"),
    bracket(None, dec!(12), "свыше 8 тонн"),
];

/// 0.5 for vehicles at least ten years old in the given tax year, else 1.0
pub fn age_coefficient(tax_year: TaxYear, manufacture_year: i32) -> Decimal {
    if tax_year.years_since(manufacture_year) >= AGE_DISCOUNT_YEARS {
        dec!(0.5)
    } else {
        dec!(1.0)
    }
}

#[derive(Debug, Clone)]
pub struct TransportTaxInput {
    pub vehicle_type: VehicleType,
    /// Engine volume (cm³), capacity (tonnes), seats or horsepower
    pub quantity: Decimal,
    pub manufacture_year: i32,
}

/// Transport tax breakdown
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct TransportTax {
    pub tax_year: i32,
    pub vehicle_age: i32,
    #[schemars(with = "f64")]
    pub monthly_calculation_index: Decimal,
    /// Bracket rate in monthly calculation indices
    #[schemars(with = "f64")]
    pub bracket_rate: Decimal,
    pub bracket_label: String,
    #[schemars(with = "f64")]
    pub base_tax: Decimal,
    #[schemars(with = "f64")]
    pub age_coefficient: Decimal,
    #[schemars(with = "f64")]
    pub tax: Decimal,
}

impl TransportTax {
    pub fn has_age_discount(&self) -> bool {
        self.age_coefficient < Decimal::ONE
    }
}

/// Calculate transport tax for one vehicle
pub fn calculate_transport_tax(input: &TransportTaxInput) -> TransportTax {
    let tax_year = TaxYear::current();
    let mci = tax_year.monthly_calculation_index();
    let vehicle_age = tax_year.years_since(input.manufacture_year);

    // Every table ends with an unbounded bracket, so this only misses on
    // an empty table.
    let Some(bracket) = input.vehicle_type.bracket_for(input.quantity) else {
        return TransportTax {
            tax_year: tax_year.0,
            vehicle_age,
            monthly_calculation_index: mci,
            bracket_rate: Decimal::ZERO,
            bracket_label: String::new(),
            base_tax: Decimal::ZERO,
            age_coefficient: Decimal::ONE,
            tax: Decimal::ZERO,
        };
    };

    let base_tax = (bracket.rate * mci).normalize();
    let coefficient = age_coefficient(tax_year, input.manufacture_year);
    let tax = (base_tax * coefficient).normalize();
    log::debug!(
        "Transport {:?} {}: bracket '{}', rate {} MCI, age {}, coefficient {}, tax {}",
        input.vehicle_type,
        input.quantity,
        bracket.label,
        bracket.rate,
        vehicle_age,
        coefficient,
        tax
    );

    TransportTax {
        tax_year: tax_year.0,
        vehicle_age,
        monthly_calculation_index: mci,
        bracket_rate: bracket.rate,
        bracket_label: bracket.label.to_string(),
        base_tax,
        age_coefficient: coefficient,
        tax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(vehicle_type: VehicleType, quantity: Decimal, year: i32) -> TransportTaxInput {
        TransportTaxInput {
            vehicle_type,
            quantity,
            manufacture_year: year,
        }
    }

    #[test]
    fn passenger_1800cc_from_2010() {
        let result = calculate_transport_tax(&vehicle(VehicleType::Passenger, dec!(1800), 2010));
        assert_eq!(result.bracket_label, "1501-2000 см³");
        assert_eq!(result.bracket_rate, dec!(7));
        assert_eq!(result.base_tax, dec!(29722));
        assert_eq!(result.vehicle_age, 16);
        assert_eq!(result.age_coefficient, dec!(0.5));
        assert_eq!(result.tax, dec!(14861));
        assert_eq!(result.tax.to_string(), "14861");
        assert_eq!(result.base_tax.to_string(), "29722");
    }

    #[test]
    fn age_boundary_is_inclusive() {
        assert_eq!(age_coefficient(TaxYear::Y2026, 2016), dec!(0.5));
        assert_eq!(age_coefficient(TaxYear::Y2026, 2017), dec!(1.0));
        assert_eq!(age_coefficient(TaxYear::Y2026, 2026), dec!(1.0));
    }

    #[test]
    fn new_vehicle_pays_full_rate() {
        let result = calculate_transport_tax(&vehicle(VehicleType::Passenger, dec!(2500), 2024));
        assert_eq!(result.bracket_rate, dec!(10));
        assert_eq!(result.tax, dec!(42460));
        assert!(!result.has_age_discount());
    }

    #[test]
    fn exact_bound_selects_that_bracket() {
        let cases = [
            (VehicleType::Passenger, dec!(1500), dec!(5)),
            (VehicleType::Passenger, dec!(1501), dec!(7)),
            (VehicleType::Truck, dec!(2), dec!(7)),
            (VehicleType::Truck, dec!(2.01), dec!(10)),
            (VehicleType::Motorcycle, dec!(750), dec!(6)),
            (VehicleType::Bus, dec!(40), dec!(15)),
            (VehicleType::Special, dec!(100), dec!(8)),
            (VehicleType::Trailer, dec!(8), dec!(8)),
        ];
        for (vehicle_type, quantity, rate) in cases {
            let bracket = vehicle_type.bracket_for(quantity).unwrap();
            assert_eq!(bracket.rate, rate, "{:?} {}", vehicle_type, quantity);
        }
    }

    #[test]
    fn top_bracket_is_unbounded() {
        for vehicle_type in VehicleType::ALL {
            let bracket = vehicle_type.bracket_for(dec!(1000000)).unwrap();
            assert_eq!(bracket.max, None);
        }
    }

    #[test]
    fn brackets_ascend() {
        for vehicle_type in VehicleType::ALL {
            let bounds: Vec<_> = vehicle_type.brackets().iter().filter_map(|b| b.max).collect();
            assert!(bounds.windows(2).all(|w| w[0] < w[1]));
            assert_eq!(bounds.len() + 1, vehicle_type.brackets().len());
        }
    }

    #[test]
    fn old_bus() {
        let result = calculate_transport_tax(&vehicle(VehicleType::Bus, dec!(45), 2000));
        assert_eq!(result.bracket_label, "свыше 40 мест");
        assert_eq!(result.base_tax, dec!(84920));
        assert_eq!(result.tax, dec!(42460));
        assert!(result.has_age_discount());
    }
}
