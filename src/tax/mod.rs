pub mod kz;
pub mod land;
pub mod property;
pub mod transport;

pub use kz::TaxYear;
pub use land::{calculate_land_tax, LandTax, LandTaxInput};
pub use property::{calculate_by_area, calculate_by_value, AreaTax, AreaTaxInput, ValueTax};
pub use transport::{calculate_transport_tax, TransportTax, TransportTaxInput};
