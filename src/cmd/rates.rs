//! Rates command - print the 2026 rate tables

use crate::money::{display_amount, format_number};
use crate::tax::land::{self, LandCategory, Region};
use crate::tax::property::{CityTier, PropertyType, VALUE_BRACKETS};
use crate::tax::transport::VehicleType;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::io;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct RatesCommand {
    /// Which table to print
    #[arg(value_enum)]
    table: RateTableKind,

    /// Output as CSV instead of formatted table
    #[arg(long)]
    csv: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RateTableKind {
    /// Land rates per hectare by region and category
    Land,
    /// Land purposes and their multipliers
    LandPurposes,
    /// Progressive property scale by value
    PropertyValue,
    /// Property rates per square metre
    PropertyArea,
    /// Vehicle brackets in monthly calculation indices
    Transport,
}

impl RatesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.table {
            RateTableKind::Land => self.output(&land_rate_rows()),
            RateTableKind::LandPurposes => self.output(&land_purpose_rows()),
            RateTableKind::PropertyValue => self.output(&property_value_rows()),
            RateTableKind::PropertyArea => self.output(&property_area_rows()),
            RateTableKind::Transport => self.output(&transport_rows()),
        }
    }

    fn output<R: Tabled + Serialize>(&self, rows: &[R]) -> anyhow::Result<()> {
        log::info!("Printing {} rate rows", rows.len());
        if self.csv {
            write_csv(rows, io::stdout())
        } else {
            let table = Table::new(rows)
                .with(Style::rounded())
                .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
                .to_string();
            println!("{}", table);
            Ok(())
        }
    }
}

fn write_csv<R: Serialize, W: io::Write>(rows: &[R], writer: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct LandRateRow {
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Agricultural")]
    agricultural: String,
    #[tabled(rename = "Settlement")]
    settlement: String,
    #[tabled(rename = "Industrial")]
    industrial: String,
    #[tabled(rename = "Forest")]
    forest: String,
    #[tabled(rename = "Water")]
    water: String,
    #[tabled(rename = "Reserve")]
    reserve: String,
}

pub fn land_rate_rows() -> Vec<LandRateRow> {
    let rate = |category: LandCategory, region: Region| {
        format_number(land::base_rate(category, region, dec!(1)))
    };
    let default = |category: LandCategory| format_number(category.default_rate());
    let mut rows: Vec<LandRateRow> = Region::ALL
        .iter()
        .map(|&region| LandRateRow {
            region: region.label().to_string(),
            agricultural: rate(LandCategory::Agricultural, region),
            settlement: rate(LandCategory::Settlement, region),
            industrial: rate(LandCategory::Industrial, region),
            forest: rate(LandCategory::Forest, region),
            water: rate(LandCategory::Water, region),
            reserve: rate(LandCategory::Reserve, region),
        })
        .collect();
    // Rate used for any region a category's table does not list
    rows.push(LandRateRow {
        region: "default".to_string(),
        agricultural: default(LandCategory::Agricultural),
        settlement: default(LandCategory::Settlement),
        industrial: default(LandCategory::Industrial),
        forest: default(LandCategory::Forest),
        water: default(LandCategory::Water),
        reserve: default(LandCategory::Reserve),
    });
    rows
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct LandPurposeRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Purpose")]
    purpose: String,
    #[tabled(rename = "Multiplier")]
    multiplier: String,
}

pub fn land_purpose_rows() -> Vec<LandPurposeRow> {
    LandCategory::ALL
        .iter()
        .flat_map(|category| {
            category.purposes().iter().map(move |purpose| LandPurposeRow {
                category: category.label().to_string(),
                purpose: purpose.label().to_string(),
                multiplier: display_amount(purpose.multiplier()),
            })
        })
        .collect()
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PropertyValueRow {
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Rate %")]
    rate_percent: String,
    #[tabled(rename = "Base Tax")]
    base_tax: String,
}

pub fn property_value_rows() -> Vec<PropertyValueRow> {
    let mut from = Decimal::ZERO;
    VALUE_BRACKETS
        .iter()
        .map(|bracket| {
            let row = PropertyValueRow {
                from: format_number(from),
                to: bracket.threshold.map_or("-".to_string(), format_number),
                rate_percent: display_amount(bracket.rate * dec!(100)),
                base_tax: format_number(bracket.base_tax),
            };
            if let Some(threshold) = bracket.threshold {
                from = threshold;
            }
            row
        })
        .collect()
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PropertyAreaRow {
    #[tabled(rename = "Settlement")]
    settlement: String,
    #[tabled(rename = "Rate per m²")]
    rate: String,
    #[tabled(rename = "Benefit m²")]
    benefit_area: String,
    #[tabled(rename = "Apartment")]
    apartment: String,
    #[tabled(rename = "House")]
    house: String,
    #[tabled(rename = "Dacha")]
    dacha: String,
    #[tabled(rename = "Garage")]
    garage: String,
}

pub fn property_area_rows() -> Vec<PropertyAreaRow> {
    CityTier::ALL
        .iter()
        .map(|city| {
            let effective = |property_type: PropertyType| {
                display_amount(city.base_rate() * property_type.multiplier())
            };
            PropertyAreaRow {
                settlement: city.label().to_string(),
                rate: format_number(city.base_rate()),
                benefit_area: display_amount(city.benefit_area()),
                apartment: effective(PropertyType::Apartment),
                house: effective(PropertyType::House),
                dacha: effective(PropertyType::Dacha),
                garage: effective(PropertyType::Garage),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct TransportRow {
    #[tabled(rename = "Vehicle")]
    vehicle: String,
    #[tabled(rename = "Bracket")]
    bracket: String,
    #[tabled(rename = "Up To")]
    max: String,
    #[tabled(rename = "Rate (MCI)")]
    rate: String,
}

pub fn transport_rows() -> Vec<TransportRow> {
    VehicleType::ALL
        .iter()
        .flat_map(|vehicle| {
            vehicle.brackets().iter().map(move |bracket| TransportRow {
                vehicle: vehicle.label().to_string(),
                bracket: bracket.label.to_string(),
                max: bracket.max.map_or("-".to_string(), display_amount),
                rate: display_amount(bracket.rate),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn land_table_has_every_region() {
        let rows = land_rate_rows();
        assert_eq!(rows.len(), Region::ALL.len() + 1);
        assert_eq!(rows[0].region, "Астана");
        assert_eq!(rows[0].agricultural, "58");
        assert_eq!(rows[0].forest, "24");
    }

    #[test]
    fn land_table_ends_with_default_rates() {
        let rows = land_rate_rows();
        let last = rows.last().unwrap();
        assert_eq!(last.region, "default");
        assert_eq!(
            [
                last.agricultural.as_str(),
                last.settlement.as_str(),
                last.industrial.as_str(),
                last.forest.as_str(),
                last.water.as_str(),
                last.reserve.as_str(),
            ],
            ["35", "180", "180", "24", "18", "12"]
        );
    }

    #[test]
    fn land_purposes_cover_all_categories() {
        let rows = land_purpose_rows();
        assert_eq!(rows.len(), 20);
        assert_eq!(rows[1].purpose, "Сенокосы");
        assert_eq!(rows[1].multiplier, "0.55");
    }

    #[test]
    fn property_value_scale_rows() {
        let rows = property_value_rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1].from, "52 000 000");
        assert_eq!(rows[1].to, "104 000 000");
        assert_eq!(rows[1].rate_percent, "0.05");
        assert_eq!(rows[3].to, "-");
        assert_eq!(rows[3].base_tax, "62 400");
    }

    #[test]
    fn property_area_effective_rates() {
        let rows = property_area_rows();
        assert_eq!(rows[0].house, "312");
        assert_eq!(rows[5].garage, "30.25");
    }

    #[test]
    fn transport_rows_per_bracket() {
        let rows = transport_rows();
        let total: usize = VehicleType::ALL.iter().map(|v| v.brackets().len()).sum();
        assert_eq!(rows.len(), total);
        assert_eq!(rows[1].bracket, "1501-2000 см³");
        assert_eq!(rows[1].max, "2000");
        assert_eq!(rows[1].rate, "7");
    }

    #[test]
    fn csv_output_has_header() {
        let mut buf = Vec::new();
        write_csv(&transport_rows(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("vehicle,bracket,max,rate\n"));
    }
}
