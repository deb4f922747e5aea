use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Kazakhstan tax year (calendar year).
///
/// Only 2026 is supported: every rate table in this crate is stated for 2026.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaxYear(pub i32);

impl TaxYear {
    pub const Y2026: TaxYear = TaxYear(2026);

    /// The year the rate tables apply to
    pub fn current() -> Self {
        Self::Y2026
    }

    /// Monthly calculation index (МРП) in tenge, fixed by the annual budget law
    pub fn monthly_calculation_index(&self) -> Decimal {
        dec!(4246)
    }

    /// Whole years between the given year and this tax year
    pub fn years_since(&self, year: i32) -> i32 {
        self.0 - year
    }

    pub fn display(&self) -> String {
        format!("{}", self.0)
    }
}

impl Default for TaxYear {
    fn default() -> Self {
        Self::current()
    }
}

impl std::fmt::Display for TaxYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}
