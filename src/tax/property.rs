//! Property tax for individuals, by assessed value or by floor area

use crate::tax::kz::TaxYear;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One tier of the progressive value scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueBracket {
    /// Inclusive upper bound in tenge, `None` for the top tier
    pub threshold: Option<Decimal>,
    pub rate: Decimal,
    /// Tax accumulated by the lower tiers
    pub base_tax: Decimal,
}

impl ValueBracket {
    fn contains(&self, value: Decimal) -> bool {
        self.threshold.is_none_or(|t| value <= t)
    }
}

pub static VALUE_BRACKETS: &[ValueBracket] = &[
    ValueBracket {
        threshold: Some(dec!(52000000)),
        rate: dec!(0),
        base_tax: dec!(0),
    },
    ValueBracket {
        threshold: Some(dec!(104000000)),
        rate: dec!(0.0005),
        base_tax: dec!(0),
    },
    ValueBracket {
        threshold: Some(dec!(156000000)),
        rate: dec!(0.0007),
        base_tax: dec!(26000),
    },
    ValueBracket {
        threshold: None,
        rate: dec!(0.001),
        base_tax: dec!(62400),
    },
];

/// Value below which property is not taxed
pub fn exemption_threshold() -> Decimal {
    VALUE_BRACKETS[0].threshold.unwrap_or(Decimal::ZERO)
}

/// Bracket details for a taxed value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
pub struct BracketBreakdown {
    /// Index into the value scale, 1 to 3
    pub index: usize,
    /// Amount above the previous threshold
    #[schemars(with = "f64")]
    pub excess: Decimal,
    #[schemars(with = "f64")]
    pub rate: Decimal,
    #[schemars(with = "f64")]
    pub rate_percent: Decimal,
    #[schemars(with = "f64")]
    pub base_tax: Decimal,
}

/// Property tax by assessed value
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ValueTax {
    pub tax_year: i32,
    #[schemars(with = "f64")]
    pub value: Decimal,
    /// Value is below the exemption threshold
    pub exempt: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bracket: Option<BracketBreakdown>,
    /// Tax before any benefit
    #[schemars(with = "f64")]
    pub gross_tax: Decimal,
    /// A benefit holder's full exemption was applied
    pub benefit_applied: bool,
    #[schemars(with = "f64")]
    pub tax: Decimal,
}

impl ValueTax {
    /// Benefit holders (pensioners, disability groups I and II, mothers of
    /// large families) pay nothing once any tax is due.
    pub fn with_benefit(mut self, has_benefit: bool) -> Self {
        if has_benefit && self.gross_tax > Decimal::ZERO {
            log::debug!("Property benefit: tax {} waived", self.gross_tax);
            self.benefit_applied = true;
            self.tax = Decimal::ZERO;
        }
        self
    }
}

/// Calculate property tax on the progressive value scale
pub fn calculate_by_value(value: Decimal) -> ValueTax {
    let tax_year = TaxYear::current().0;
    let untaxed = ValueTax {
        tax_year,
        value,
        exempt: true,
        bracket: None,
        gross_tax: Decimal::ZERO,
        benefit_applied: false,
        tax: Decimal::ZERO,
    };

    if value < exemption_threshold() {
        return untaxed;
    }

    for (index, pair) in VALUE_BRACKETS.windows(2).enumerate() {
        let (previous, current) = (&pair[0], &pair[1]);
        if !current.contains(value) {
            continue;
        }
        let previous_threshold = previous.threshold.unwrap_or(Decimal::ZERO);
        let excess = value - previous_threshold;
        let tax = current
            .base_tax
            .saturating_add(excess.saturating_mul(current.rate))
            .normalize();
        log::debug!(
            "Property value {}: bracket {}, excess {}, rate {}, tax {}",
            value,
            index + 1,
            excess,
            current.rate,
            tax
        );
        return ValueTax {
            tax_year,
            value,
            exempt: false,
            bracket: Some(BracketBreakdown {
                index: index + 1,
                excess,
                rate: current.rate,
                rate_percent: (current.rate * dec!(100)).normalize(),
                base_tax: current.base_tax,
            }),
            gross_tax: tax,
            benefit_applied: false,
            tax,
        };
    }

    // Top tier is unbounded
    ValueTax {
        exempt: false,
        ..untaxed
    }
}

/// Settlement tier used for the per-square-metre rate
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum CityTier {
    Astana,
    Almaty,
    Shymkent,
    /// Oblast centres
    Regional,
    /// District centres
    District,
    Rural,
}

impl CityTier {
    pub const ALL: [CityTier; 6] = [
        CityTier::Astana,
        CityTier::Almaty,
        CityTier::Shymkent,
        CityTier::Regional,
        CityTier::District,
        CityTier::Rural,
    ];

    /// Tenge per square metre
    pub fn base_rate(&self) -> Decimal {
        match self {
            CityTier::Astana => dec!(240),
            CityTier::Almaty => dec!(240),
            CityTier::Shymkent => dec!(180),
            CityTier::Regional => dec!(140),
            CityTier::District => dec!(90),
            CityTier::Rural => dec!(55),
        }
    }

    /// Untaxed square metres for benefit holders
    pub fn benefit_area(&self) -> Decimal {
        match self {
            CityTier::Astana => dec!(65),
            CityTier::Almaty => dec!(65),
            CityTier::Shymkent => dec!(70),
            CityTier::Regional => dec!(80),
            CityTier::District => dec!(100),
            CityTier::Rural => dec!(150),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CityTier::Astana => "Астана",
            CityTier::Almaty => "Алматы",
            CityTier::Shymkent => "Шымкент",
            CityTier::Regional => "Областной центр",
            CityTier::District => "Районный центр",
            CityTier::Rural => "Сельская местность",
        }
    }
}

impl std::fmt::Display for CityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyType {
    Apartment,
    House,
    Dacha,
    Garage,
}

impl PropertyType {
    pub const ALL: [PropertyType; 4] = [
        PropertyType::Apartment,
        PropertyType::House,
        PropertyType::Dacha,
        PropertyType::Garage,
    ];

    pub fn multiplier(&self) -> Decimal {
        match self {
            PropertyType::Apartment => dec!(1.0),
            PropertyType::House => dec!(1.3),
            PropertyType::Dacha => dec!(0.75),
            PropertyType::Garage => dec!(0.55),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "Квартира",
            PropertyType::House => "Жилой дом",
            PropertyType::Dacha => "Дача",
            PropertyType::Garage => "Гараж",
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone)]
pub struct AreaTaxInput {
    /// Total floor area in square metres
    pub area: Decimal,
    pub property_type: PropertyType,
    pub city: CityTier,
    pub has_benefit: bool,
}

/// Property tax by floor area
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct AreaTax {
    pub tax_year: i32,
    #[schemars(with = "f64")]
    pub base_rate: Decimal,
    #[schemars(with = "f64")]
    pub multiplier: Decimal,
    #[schemars(with = "f64")]
    pub total_area: Decimal,
    #[schemars(with = "f64")]
    pub benefit_area: Decimal,
    #[schemars(with = "f64")]
    pub taxable_area: Decimal,
    #[schemars(with = "f64")]
    pub tax: Decimal,
}

/// Calculate property tax from floor area, settlement tier and property type
pub fn calculate_by_area(input: &AreaTaxInput) -> AreaTax {
    let base_rate = input.city.base_rate();
    let multiplier = input.property_type.multiplier();
    let benefit_area = if input.has_benefit {
        input.city.benefit_area()
    } else {
        Decimal::ZERO
    };
    let taxable_area = (input.area - benefit_area).max(Decimal::ZERO).normalize();
    let tax = taxable_area
        .saturating_mul(base_rate)
        .saturating_mul(multiplier)
        .normalize();
    log::debug!(
        "Property area {:?}/{:?}: rate={}, multiplier={}, taxable={}, tax={}",
        input.city,
        input.property_type,
        base_rate,
        multiplier,
        taxable_area,
        tax
    );

    AreaTax {
        tax_year: TaxYear::current().0,
        base_rate,
        multiplier,
        total_area: input.area,
        benefit_area,
        taxable_area,
        tax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_threshold_is_exempt() {
        let result = calculate_by_value(dec!(30000000));
        assert!(result.exempt);
        assert_eq!(result.tax, Decimal::ZERO);
        assert_eq!(result.bracket, None);
    }

    #[test]
    fn sixty_million() {
        let result = calculate_by_value(dec!(60000000));
        assert!(!result.exempt);
        let bracket = result.bracket.unwrap();
        assert_eq!(bracket.index, 1);
        assert_eq!(bracket.excess, dec!(8000000));
        assert_eq!(bracket.rate, dec!(0.0005));
        assert_eq!(bracket.rate_percent, dec!(0.05));
        assert_eq!(bracket.base_tax, Decimal::ZERO);
        assert_eq!(result.tax, dec!(4000));
    }

    #[test]
    fn first_threshold_is_taxed_at_zero() {
        let result = calculate_by_value(dec!(52000000));
        assert!(!result.exempt);
        assert_eq!(result.bracket.unwrap().index, 1);
        assert_eq!(result.tax, Decimal::ZERO);
    }

    #[test]
    fn continuous_at_thresholds() {
        // Tax at each threshold equals the next tier's base tax
        for pair in VALUE_BRACKETS.windows(2) {
            let threshold = pair[0].threshold.unwrap();
            let at = calculate_by_value(threshold);
            assert_eq!(at.tax, pair[1].base_tax, "threshold {}", threshold);

            // One tenge above moves into the next tier with excess 1
            let above = calculate_by_value(threshold + dec!(1));
            assert_eq!(above.tax, pair[1].base_tax + pair[1].rate);
        }
    }

    #[test]
    fn upper_tiers() {
        let result = calculate_by_value(dec!(104000000));
        assert_eq!(result.bracket.unwrap().index, 1);
        assert_eq!(result.tax, dec!(26000));

        let result = calculate_by_value(dec!(130000000));
        let bracket = result.bracket.unwrap();
        assert_eq!(bracket.index, 2);
        assert_eq!(bracket.excess, dec!(26000000));
        assert_eq!(result.tax, dec!(44200));

        let result = calculate_by_value(dec!(156000000));
        assert_eq!(result.bracket.unwrap().index, 2);
        assert_eq!(result.tax, dec!(62400));

        let result = calculate_by_value(dec!(200000000));
        let bracket = result.bracket.unwrap();
        assert_eq!(bracket.index, 3);
        assert_eq!(bracket.base_tax, dec!(62400));
        assert_eq!(result.tax, dec!(106400));
    }

    #[test]
    fn benefit_waives_positive_tax() {
        for value in [dec!(60000000), dec!(120000000), dec!(500000000)] {
            let result = calculate_by_value(value).with_benefit(true);
            assert!(result.gross_tax > Decimal::ZERO);
            assert!(result.benefit_applied);
            assert_eq!(result.tax, Decimal::ZERO);
        }
    }

    #[test]
    fn benefit_not_applied_when_nothing_due() {
        let result = calculate_by_value(dec!(10000000)).with_benefit(true);
        assert!(!result.benefit_applied);
        assert!(result.exempt);

        let result = calculate_by_value(dec!(60000000)).with_benefit(false);
        assert!(!result.benefit_applied);
        assert_eq!(result.tax, dec!(4000));
    }

    #[test]
    fn area_without_benefit() {
        let result = calculate_by_area(&AreaTaxInput {
            area: dec!(100),
            property_type: PropertyType::House,
            city: CityTier::Astana,
            has_benefit: false,
        });
        assert_eq!(result.base_rate, dec!(240));
        assert_eq!(result.multiplier, dec!(1.3));
        assert_eq!(result.benefit_area, Decimal::ZERO);
        assert_eq!(result.taxable_area, dec!(100));
        assert_eq!(result.tax, dec!(31200));
    }

    #[test]
    fn area_with_benefit() {
        let result = calculate_by_area(&AreaTaxInput {
            area: dec!(120),
            property_type: PropertyType::Apartment,
            city: CityTier::Regional,
            has_benefit: true,
        });
        assert_eq!(result.benefit_area, dec!(80));
        assert_eq!(result.taxable_area, dec!(40));
        assert_eq!(result.tax, dec!(5600));
    }

    #[test]
    fn records_carry_normalized_amounts() {
        let bracket = calculate_by_value(dec!(60000000)).bracket.unwrap();
        assert_eq!(bracket.rate_percent.to_string(), "0.05");

        let result = calculate_by_area(&AreaTaxInput {
            area: dec!(100),
            property_type: PropertyType::House,
            city: CityTier::Astana,
            has_benefit: false,
        });
        assert_eq!(result.tax.to_string(), "31200");
    }

    #[test]
    fn huge_values_saturate_instead_of_overflowing() {
        let result = calculate_by_area(&AreaTaxInput {
            area: Decimal::MAX,
            property_type: PropertyType::House,
            city: CityTier::Astana,
            has_benefit: false,
        });
        assert_eq!(result.tax, Decimal::MAX);

        let result = calculate_by_value(Decimal::MAX);
        assert_eq!(result.bracket.unwrap().index, 3);
        assert!(result.tax > dec!(62400));
    }

    #[test]
    fn area_benefit_floors_at_zero() {
        let result = calculate_by_area(&AreaTaxInput {
            area: dec!(90),
            property_type: PropertyType::Dacha,
            city: CityTier::Rural,
            has_benefit: true,
        });
        assert_eq!(result.benefit_area, dec!(150));
        assert_eq!(result.taxable_area, Decimal::ZERO);
        assert_eq!(result.tax, Decimal::ZERO);
    }
}
