//! Transport command - annual tax for one vehicle

use crate::cmd::{ensure_manufacture_year, ensure_positive, print_json};
use crate::money::{display_amount, format_number, format_tenge, TENGE};
use crate::tax::transport::{
    calculate_transport_tax, TransportTax, TransportTaxInput, VehicleType, AGE_DISCOUNT_YEARS,
};
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct TransportCommand {
    /// Vehicle type
    #[arg(short = 't', long, value_enum)]
    vehicle: VehicleType,

    /// Engine volume (cm³) for passenger cars and motorcycles, capacity
    /// (tonnes) for trucks and trailers, seats for buses, horsepower for
    /// special machinery
    #[arg(short, long)]
    quantity: Decimal,

    /// Year of manufacture
    #[arg(short, long)]
    year: i32,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl TransportCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        ensure_positive("quantity", self.quantity)?;
        ensure_manufacture_year(self.year)?;

        let input = TransportTaxInput {
            vehicle_type: self.vehicle,
            quantity: self.quantity,
            manufacture_year: self.year,
        };
        let result = calculate_transport_tax(&input);
        log::info!("Transport tax {}: {}", result.tax_year, result.tax);

        if self.json {
            print_json(&result)
        } else {
            print!("{}", render(&input, &result));
            Ok(())
        }
    }
}

pub fn render(input: &TransportTaxInput, result: &TransportTax) -> String {
    let vehicle = input.vehicle_type;
    let mut lines = vec![
        String::new(),
        format!("TRANSPORT TAX ({})", result.tax_year),
        String::new(),
        format!("  Vehicle: {}", vehicle),
        format!(
            "  {}: {} {}",
            vehicle.quantity_name(),
            display_amount(input.quantity),
            vehicle.quantity_unit()
        ),
        format!(
            "  Manufactured: {} (age {} years)",
            input.manufacture_year, result.vehicle_age
        ),
        format!("  Bracket: {}", result.bracket_label),
        format!("  Rate: {} MCI", display_amount(result.bracket_rate)),
        format!(
            "  MCI {}: {} {}",
            result.tax_year,
            format_number(result.monthly_calculation_index),
            TENGE
        ),
    ];

    if result.has_age_discount() {
        lines.push(String::new());
        lines.push(format!("  Base tax: {}", format_tenge(result.base_tax)));
        lines.push(format!("  Age discount (over {} years): -50%", AGE_DISCOUNT_YEARS));
    } else if result.base_tax > Decimal::ZERO {
        lines.push(format!("  Base tax: {}", format_tenge(result.base_tax)));
    }

    lines.push(String::new());
    lines.push(format!("TAX: {}", format_tenge(result.tax)));
    lines.push(String::new());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn render_old_passenger_car() {
        let input = TransportTaxInput {
            vehicle_type: VehicleType::Passenger,
            quantity: dec!(1800),
            manufacture_year: 2010,
        };
        let text = render(&input, &calculate_transport_tax(&input));
        assert!(text.contains("Объём двигателя: 1800 см³"));
        assert!(text.contains("Manufactured: 2010 (age 16 years)"));
        assert!(text.contains("Bracket: 1501-2000 см³"));
        assert!(text.contains("Rate: 7 MCI"));
        assert!(text.contains("MCI 2026: 4 246 ₸"));
        assert!(text.contains("Base tax: 29 722 ₸"));
        assert!(text.contains("Age discount"));
        assert!(text.contains("TAX: 14 861 ₸"));
    }

    #[test]
    fn render_new_truck() {
        let input = TransportTaxInput {
            vehicle_type: VehicleType::Truck,
            quantity: dec!(3.5),
            manufacture_year: 2022,
        };
        let text = render(&input, &calculate_transport_tax(&input));
        assert!(text.contains("Bracket: 2-5 тонн"));
        assert!(!text.contains("Age discount"));
        assert!(text.contains("TAX: 42 460 ₸"));
    }
}
