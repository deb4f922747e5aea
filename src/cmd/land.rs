//! Land command - land tax for one plot

use crate::cmd::{ensure_area, ensure_purpose_in_category, print_json};
use crate::money::{display_amount, format_number, format_tenge, TENGE};
use crate::tax::land::{
    calculate_land_tax, LandCategory, LandPurpose, LandTax, LandTaxInput, Region,
};
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const SOTOK_PER_HECTARE: Decimal = dec!(100);

#[derive(Args, Debug)]
pub struct LandCommand {
    /// Plot area in hectares
    #[arg(short, long)]
    area: Decimal,

    /// Land category
    #[arg(short, long, value_enum)]
    category: LandCategory,

    /// Region (city of republican significance or oblast)
    #[arg(short, long, value_enum)]
    region: Region,

    /// Intended use; must belong to the chosen category
    #[arg(short, long, value_enum)]
    purpose: LandPurpose,

    /// Apply the untaxed area allowance (0.25 ha in cities, 1 ha elsewhere)
    #[arg(short, long)]
    benefit: bool,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl LandCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        ensure_area(self.area)?;
        ensure_purpose_in_category(self.purpose, self.category)?;

        let input = LandTaxInput {
            area: self.area,
            category: self.category,
            region: self.region,
            purpose: self.purpose,
            has_benefit: self.benefit,
        };
        let result = calculate_land_tax(&input);
        log::info!("Land tax {}: {}", result.tax_year, result.tax);

        if self.json {
            print_json(&result)
        } else {
            print!("{}", render(&input, &result));
            Ok(())
        }
    }
}

/// Text breakdown of a land tax estimate
pub fn render(input: &LandTaxInput, result: &LandTax) -> String {
    let mut lines = vec![
        String::new(),
        format!("LAND TAX ({})", result.tax_year),
        String::new(),
        format!("  Category: {}", input.category),
        format!("  Purpose: {}", input.purpose),
        format!(
            "  Area: {} ha ({} sotok)",
            display_amount(result.total_area),
            format_number(result.total_area.saturating_mul(SOTOK_PER_HECTARE))
        ),
        format!("  Region: {}", input.region),
        format!("  Base rate: {} {}/ha", format_number(result.base_rate), TENGE),
    ];

    if result.has_benefit() {
        lines.push(String::new());
        lines.push(format!(
            "  Benefit area: {} ha ({} sotok)",
            display_amount(result.benefit_area),
            format_number(result.benefit_area.saturating_mul(SOTOK_PER_HECTARE))
        ));
        lines.push(format!("  Taxable area: {} ha", display_amount(result.taxable_area)));
        if result.taxable_area > Decimal::ZERO {
            lines.push(format!(
                "  Tax without benefit: {}",
                format_tenge(result.tax_without_benefit())
            ));
            lines.push(format!("  Benefit saving: {}", format_tenge(result.benefit_saving())));
        } else {
            lines.push("  Benefit covers the whole plot, no tax is due".to_string());
        }
    }

    lines.push(String::new());
    lines.push(format!("TAX: {}", format_tenge(result.tax)));
    lines.push(String::new());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
