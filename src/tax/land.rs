//! Land tax (земельный налог) for 2026

use crate::tax::kz::TaxYear;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Land category as listed in the Land Code
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum LandCategory {
    Agricultural,
    Settlement,
    Industrial,
    Forest,
    Water,
    Reserve,
}

impl LandCategory {
    pub const ALL: [LandCategory; 6] = [
        LandCategory::Agricultural,
        LandCategory::Settlement,
        LandCategory::Industrial,
        LandCategory::Forest,
        LandCategory::Water,
        LandCategory::Reserve,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LandCategory::Agricultural => "Земли сельскохозяйственного назначения",
            LandCategory::Settlement => "Земли населённых пунктов",
            LandCategory::Industrial => "Земли промышленности, транспорта, связи",
            LandCategory::Forest => "Земли лесного фонда",
            LandCategory::Water => "Земли водного фонда",
            LandCategory::Reserve => "Земли запаса",
        }
    }

    /// Purposes that may be selected for this category, in display order
    pub fn purposes(&self) -> &'static [LandPurpose] {
        use LandPurpose::*;
        match self {
            LandCategory::Agricultural => &[Arable, Hayfield, Pasture, Fallow, Perennial],
            LandCategory::Settlement => &[Residential, Commercial, Garden, Personal, Recreation],
            LandCategory::Industrial => &[Industry, Transport, Communication, Energy, Defense],
            LandCategory::Forest => &[Forest, Protection],
            LandCategory::Water => &[Water, Fishing],
            LandCategory::Reserve => &[Reserve],
        }
    }

    /// Rate for regions without their own entry
    pub fn default_rate(&self) -> Decimal {
        self.rate_table().default
    }

    fn rate_table(&self) -> RateTable {
        match self {
            LandCategory::Agricultural => RateTable {
                regional: AGRICULTURAL_RATES,
                default: dec!(35),
            },
            LandCategory::Settlement => RateTable {
                regional: SETTLEMENT_RATES,
                default: dec!(180),
            },
            LandCategory::Industrial => RateTable {
                regional: INDUSTRIAL_RATES,
                default: dec!(180),
            },
            LandCategory::Forest => RateTable {
                regional: &[],
                default: dec!(24),
            },
            LandCategory::Water => RateTable {
                regional: &[],
                default: dec!(18),
            },
            LandCategory::Reserve => RateTable {
                regional: &[],
                default: dec!(12),
            },
        }
    }
}

impl std::fmt::Display for LandCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Cities of republican significance and oblasts
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    Astana,
    Almaty,
    Shymkent,
    Akmola,
    Aktobe,
    AlmatyRegion,
    Atyrau,
    Vko,
    Zhambyl,
    Zko,
    Karaganda,
    Kostanay,
    Kyzylorda,
    Mangystau,
    Pavlodar,
    Sko,
    Turkestan,
}

impl Region {
    pub const ALL: [Region; 17] = [
        Region::Astana,
        Region::Almaty,
        Region::Shymkent,
        Region::Akmola,
        Region::Aktobe,
        Region::AlmatyRegion,
        Region::Atyrau,
        Region::Vko,
        Region::Zhambyl,
        Region::Zko,
        Region::Karaganda,
        Region::Kostanay,
        Region::Kyzylorda,
        Region::Mangystau,
        Region::Pavlodar,
        Region::Sko,
        Region::Turkestan,
    ];

    /// Astana, Almaty and Shymkent get the smaller urban benefit allowance
    pub fn is_urban(&self) -> bool {
        matches!(self, Region::Astana | Region::Almaty | Region::Shymkent)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Region::Astana => "Астана",
            Region::Almaty => "Алматы",
            Region::Shymkent => "Шымкент",
            Region::Akmola => "Акмолинская область",
            Region::Aktobe => "Актюбинская область",
            Region::AlmatyRegion => "Алматинская область",
            Region::Atyrau => "Атырауская область",
            Region::Vko => "Восточно-Казахстанская область",
            Region::Zhambyl => "Жамбылская область",
            Region::Zko => "Западно-Казахстанская область",
            Region::Karaganda => "Карагандинская область",
            Region::Kostanay => "Костанайская область",
            Region::Kyzylorda => "Кызылординская область",
            Region::Mangystau => "Мангистауская область",
            Region::Pavlodar => "Павлодарская область",
            Region::Sko => "Северо-Казахстанская область",
            Region::Turkestan => "Туркестанская область",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Intended use of the plot. Each purpose belongs to exactly one category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum LandPurpose {
    Arable,
    Hayfield,
    Pasture,
    Fallow,
    Perennial,
    Residential,
    Commercial,
    Garden,
    Personal,
    Recreation,
    Industry,
    Transport,
    Communication,
    Energy,
    Defense,
    Forest,
    Protection,
    Water,
    Fishing,
    Reserve,
}

impl LandPurpose {
    pub fn category(&self) -> LandCategory {
        use LandPurpose::*;
        match self {
            Arable | Hayfield | Pasture | Fallow | Perennial => LandCategory::Agricultural,
            Residential | Commercial | Garden | Personal | Recreation => LandCategory::Settlement,
            Industry | Transport | Communication | Energy | Defense => LandCategory::Industrial,
            Forest | Protection => LandCategory::Forest,
            Water | Fishing => LandCategory::Water,
            Reserve => LandCategory::Reserve,
        }
    }

    pub fn multiplier(&self) -> Decimal {
        use LandPurpose::*;
        match self {
            Arable => dec!(1.0),
            Hayfield => dec!(0.55),
            Pasture => dec!(0.35),
            Fallow => dec!(0.25),
            Perennial => dec!(1.2),
            Residential => dec!(1.0),
            Commercial => dec!(1.6),
            Garden => dec!(0.45),
            Personal => dec!(0.35),
            Recreation => dec!(0.8),
            Industry => dec!(1.0),
            Transport => dec!(0.75),
            Communication => dec!(0.55),
            Energy => dec!(0.85),
            Defense => dec!(0.5),
            Forest => dec!(1.0),
            Protection => dec!(0.5),
            Water => dec!(1.0),
            Fishing => dec!(0.8),
            Reserve => dec!(1.0),
        }
    }

    pub fn label(&self) -> &'static str {
        use LandPurpose::*;
        match self {
            Arable => "Пахотные земли",
            Hayfield => "Сенокосы",
            Pasture => "Пастбища",
            Fallow => "Залежные земли",
            Perennial => "Многолетние насаждения",
            Residential => "Жилищное строительство",
            Commercial => "Коммерческое использование",
            Garden => "Садоводство",
            Personal => "Личное подсобное хозяйство",
            Recreation => "Рекреационное использование",
            Industry => "Промышленность",
            Transport => "Транспорт",
            Communication => "Связь",
            Energy => "Энергетика",
            Defense => "Оборона",
            Forest => "Лесные насаждения",
            Protection => "Защитные леса",
            Water => "Водные объекты",
            Fishing => "Рыбное хозяйство",
            Reserve => "Земли запаса",
        }
    }
}

impl std::fmt::Display for LandPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Regional rates for one category plus the fallback for regions not listed
struct RateTable {
    regional: &'static [(Region, Decimal)],
    default: Decimal,
}

impl RateTable {
    fn rate(&self, region: Region) -> Decimal {
        self.regional
            .iter()
            .find(|(r, _)| *r == region)
            .map(|(_, rate)| *rate)
            .unwrap_or(self.default)
    }
}

// Tenge per hectare
static AGRICULTURAL_RATES: &[(Region, Decimal)] = &[
    (Region::Astana, dec!(58)),
    (Region::Almaty, dec!(70)),
    (Region::Shymkent, dec!(52)),
    (Region::Akmola, dec!(46)),
    (Region::Aktobe, dec!(46)),
    (Region::AlmatyRegion, dec!(52)),
    (Region::Atyrau, dec!(58)),
    (Region::Vko, dec!(46)),
    (Region::Zhambyl, dec!(46)),
    (Region::Zko, dec!(40)),
    (Region::Karaganda, dec!(46)),
    (Region::Kostanay, dec!(46)),
    (Region::Kyzylorda, dec!(40)),
    (Region::Mangystau, dec!(52)),
    (Region::Pavlodar, dec!(46)),
    (Region::Sko, dec!(40)),
    (Region::Turkestan, dec!(46)),
];

static SETTLEMENT_RATES: &[(Region, Decimal)] = &[
    (Region::Astana, dec!(700)),
    (Region::Almaty, dec!(700)),
    (Region::Shymkent, dec!(480)),
    (Region::Akmola, dec!(290)),
    (Region::Aktobe, dec!(290)),
    (Region::AlmatyRegion, dec!(350)),
    (Region::Atyrau, dec!(350)),
    (Region::Vko, dec!(290)),
    (Region::Zhambyl, dec!(290)),
    (Region::Zko, dec!(260)),
    (Region::Karaganda, dec!(320)),
    (Region::Kostanay, dec!(290)),
    (Region::Kyzylorda, dec!(260)),
    (Region::Mangystau, dec!(350)),
    (Region::Pavlodar, dec!(290)),
    (Region::Sko, dec!(260)),
    (Region::Turkestan, dec!(290)),
];

static INDUSTRIAL_RATES: &[(Region, Decimal)] = &[
    (Region::Astana, dec!(480)),
    (Region::Almaty, dec!(480)),
    (Region::Shymkent, dec!(360)),
    (Region::Akmola, dec!(240)),
    (Region::Aktobe, dec!(240)),
    (Region::AlmatyRegion, dec!(300)),
    (Region::Atyrau, dec!(300)),
    (Region::Vko, dec!(240)),
    (Region::Zhambyl, dec!(240)),
    (Region::Zko, dec!(200)),
    (Region::Karaganda, dec!(260)),
    (Region::Kostanay, dec!(240)),
    (Region::Kyzylorda, dec!(200)),
    (Region::Mangystau, dec!(280)),
    (Region::Pavlodar, dec!(240)),
    (Region::Sko, dec!(200)),
    (Region::Turkestan, dec!(240)),
];

/// Untaxed area in hectares granted to benefit holders
const URBAN_BENEFIT_AREA: Decimal = dec!(0.25);
const RURAL_BENEFIT_AREA: Decimal = dec!(1.0);

/// Parameters for a land tax estimate
#[derive(Debug, Clone)]
pub struct LandTaxInput {
    /// Plot area in hectares
    pub area: Decimal,
    pub category: LandCategory,
    pub region: Region,
    pub purpose: LandPurpose,
    /// Taxpayer qualifies for the untaxed area allowance
    pub has_benefit: bool,
}

/// Land tax breakdown
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct LandTax {
    pub tax_year: i32,
    /// Tenge per hectare after the purpose multiplier
    #[schemars(with = "f64")]
    pub base_rate: Decimal,
    #[schemars(with = "f64")]
    pub total_area: Decimal,
    #[schemars(with = "f64")]
    pub benefit_area: Decimal,
    #[schemars(with = "f64")]
    pub taxable_area: Decimal,
    #[schemars(with = "f64")]
    pub tax: Decimal,
}

impl LandTax {
    /// Tax on the whole plot, as if no benefit applied
    pub fn tax_without_benefit(&self) -> Decimal {
        self.total_area.saturating_mul(self.base_rate).normalize()
    }

    /// Tax saved by the benefit allowance
    pub fn benefit_saving(&self) -> Decimal {
        self.tax_without_benefit().saturating_sub(self.tax)
    }

    pub fn has_benefit(&self) -> bool {
        self.benefit_area > Decimal::ZERO
    }

    /// The allowance covers the entire plot
    pub fn fully_exempt(&self) -> bool {
        self.has_benefit() && self.taxable_area.is_zero()
    }
}

/// Rate per hectare for a category, region and purpose multiplier,
/// rounded to whole tenge.
///
/// Regions without their own entry use the category default.
pub fn base_rate(category: LandCategory, region: Region, multiplier: Decimal) -> Decimal {
    let table_rate = category.rate_table().rate(region);
    let rate = published_rate(table_rate, multiplier);
    log::debug!(
        "Land rate {:?}/{:?}: table={}, multiplier={}, base={}",
        category,
        region,
        table_rate,
        multiplier,
        rate
    );
    rate
}

/// The published rates are the binary floating point product rounded to
/// whole tenge: 350 x 0.35 is 122.49999999999999 and publishes as 122.
fn published_rate(table_rate: Decimal, multiplier: Decimal) -> Decimal {
    let product = match (table_rate.to_f64(), multiplier.to_f64()) {
        (Some(rate), Some(multiplier)) => Decimal::from_f64((rate * multiplier).round()),
        _ => None,
    };
    product
        .unwrap_or_else(|| {
            table_rate
                .saturating_mul(multiplier)
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        })
        .normalize()
}

/// Apply the benefit allowance (if any) and the base rate to the plot area
pub fn apply_benefit(
    area: Decimal,
    base_rate: Decimal,
    has_benefit: bool,
    region: Region,
) -> LandTax {
    let benefit_area = if has_benefit {
        if region.is_urban() {
            URBAN_BENEFIT_AREA
        } else {
            RURAL_BENEFIT_AREA
        }
    } else {
        Decimal::ZERO
    };
    let taxable_area = (area - benefit_area).max(Decimal::ZERO).normalize();
    if has_benefit {
        log::debug!(
            "Land benefit {:?}: area={}, allowance={}, taxable={}",
            region,
            area,
            benefit_area,
            taxable_area
        );
    }

    LandTax {
        tax_year: TaxYear::current().0,
        base_rate,
        total_area: area,
        benefit_area,
        taxable_area,
        tax: taxable_area.saturating_mul(base_rate).normalize(),
    }
}

/// Calculate land tax for a plot
pub fn calculate_land_tax(input: &LandTaxInput) -> LandTax {
    let rate = base_rate(input.category, input.region, input.purpose.multiplier());
    apply_benefit(input.area, rate, input.has_benefit, input.region)
}
