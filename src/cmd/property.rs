//! Property command - property tax by assessed value or by floor area

use crate::cmd::{ensure_area, ensure_non_negative, print_json};
use crate::money::{display_amount, format_number, format_tenge, TENGE};
use crate::tax::property::{
    calculate_by_area, calculate_by_value, exemption_threshold, AreaTax, AreaTaxInput, CityTier,
    PropertyType, ValueTax,
};
use clap::{Args, Subcommand};
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct PropertyCommand {
    #[command(subcommand)]
    method: PropertyMethod,
}

#[derive(Subcommand, Debug)]
enum PropertyMethod {
    /// Progressive scale on the assessed value
    Value(ValueArgs),
    /// Per square metre rate by settlement and property type
    Area(AreaArgs),
}

#[derive(Args, Debug)]
struct ValueArgs {
    /// Assessed value in tenge
    #[arg(long)]
    value: Decimal,

    /// Taxpayer belongs to an exempt group (full exemption)
    #[arg(short, long)]
    benefit: bool,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct AreaArgs {
    /// Total floor area in square metres
    #[arg(short, long)]
    area: Decimal,

    /// Property type
    #[arg(short = 't', long, value_enum)]
    property_type: PropertyType,

    /// Settlement tier
    #[arg(short, long, value_enum)]
    city: CityTier,

    /// Apply the untaxed floor area allowance
    #[arg(short, long)]
    benefit: bool,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl PropertyCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match &self.method {
            PropertyMethod::Value(args) => args.exec(),
            PropertyMethod::Area(args) => args.exec(),
        }
    }
}

impl ValueArgs {
    fn exec(&self) -> anyhow::Result<()> {
        ensure_non_negative("value", self.value)?;
        let result = calculate_by_value(self.value).with_benefit(self.benefit);
        log::info!("Property tax by value {}: {}", result.tax_year, result.tax);

        if self.json {
            print_json(&result)
        } else {
            print!("{}", render_value(&result));
            Ok(())
        }
    }
}

impl AreaArgs {
    fn exec(&self) -> anyhow::Result<()> {
        ensure_area(self.area)?;
        let input = AreaTaxInput {
            area: self.area,
            property_type: self.property_type,
            city: self.city,
            has_benefit: self.benefit,
        };
        let result = calculate_by_area(&input);
        log::info!("Property tax by area {}: {}", result.tax_year, result.tax);

        if self.json {
            print_json(&result)
        } else {
            print!("{}", render_area(&input, &result));
            Ok(())
        }
    }
}

pub fn render_value(result: &ValueTax) -> String {
    let mut lines = vec![
        String::new(),
        format!("PROPERTY TAX BY VALUE ({})", result.tax_year),
        String::new(),
        format!("  Assessed value: {}", format_tenge(result.value)),
    ];

    if result.exempt {
        lines.push(format!(
            "  Exempt: value is below {}",
            format_tenge(exemption_threshold())
        ));
    } else if let Some(bracket) = &result.bracket {
        lines.push(format!("  Excess over threshold: {}", format_tenge(bracket.excess)));
        lines.push(format!("  Rate: {}%", display_amount(bracket.rate_percent)));
        if bracket.base_tax > Decimal::ZERO {
            lines.push(format!("  Base tax: {}", format_tenge(bracket.base_tax)));
        }
    }

    if result.benefit_applied {
        lines.push(String::new());
        lines.push(format!("  Tax before benefit: {}", format_tenge(result.gross_tax)));
        lines.push("  Benefit applied, no tax is due".to_string());
    }

    finish(lines, result.tax)
}

pub fn render_area(input: &AreaTaxInput, result: &AreaTax) -> String {
    let mut lines = vec![
        String::new(),
        format!("PROPERTY TAX BY AREA ({})", result.tax_year),
        String::new(),
        format!("  Property type: {}", input.property_type),
        format!("  Settlement: {}", input.city),
        format!("  Total area: {} m²", display_amount(result.total_area)),
        format!("  Base rate: {} {}/m²", format_number(result.base_rate), TENGE),
        format!("  Type multiplier: {}", display_amount(result.multiplier)),
    ];
    if result.benefit_area > Decimal::ZERO {
        lines.push(format!(
            "  Benefit area: {} m² (untaxed)",
            display_amount(result.benefit_area)
        ));
    }
    lines.push(format!("  Taxable area: {} m²", display_amount(result.taxable_area)));

    finish(lines, result.tax)
}

/// Closing `TAX:` line framed by blank lines
fn finish(mut lines: Vec<String>, tax: Decimal) -> String {
    lines.push(String::new());
    lines.push(format!("TAX: {}", format_tenge(tax)));
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
    fn render_exempt_value() {
        let text = render_value(&calculate_by_value(dec!(40000000)));
        assert!(text.contains("Exempt: value is below 52 000 000 ₸"));
        assert!(text.contains("TAX: 0 ₸"));
    }

    #[test]
    fn render_taxed_value() {
        let text = render_value(&calculate_by_value(dec!(60000000)));
        assert!(text.contains("Excess over threshold: 8 000 000 ₸"));
        assert!(text.contains("Rate: 0.05%"));
        assert!(!text.contains("Base tax"));
        assert!(text.contains("TAX: 4 000 ₸"));
    }

    #[test]
    fn render_value_with_base_tax_and_benefit() {
        let text = render_value(&calculate_by_value(dec!(130000000)).with_benefit(true));
        assert!(text.contains("Base tax: 26 000 ₸"));
        assert!(text.contains("Tax before benefit: 44 200 ₸"));
        assert!(text.contains("TAX: 0 ₸"));
    }

    #[test]
    fn render_value_framing() {
        let text = render_value(&calculate_by_value(dec!(60000000)));
        assert!(text.starts_with("\nPROPERTY TAX BY VALUE (2026)\n\n"));
        assert!(text.ends_with("\n\nTAX: 4 000 ₸\n\n"));
    }

    #[test]
    fn render_area_with_benefit() {
        let input = AreaTaxInput {
            area: dec!(120),
            property_type: PropertyType::Apartment,
            city: CityTier::Regional,
            has_benefit: true,
        };
        let text = render_area(&input, &calculate_by_area(&input));
        assert!(text.contains("Base rate: 140 ₸/m²"));
        assert!(text.contains("Type multiplier: 1"));
        assert!(text.contains("Benefit area: 80 m² (untaxed)"));
        assert!(text.contains("Taxable area: 40 m²"));
        assert!(text.contains("TAX: 5 600 ₸"));
    }
}
