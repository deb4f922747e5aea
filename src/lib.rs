//! Kazakhstan land, property and transport tax estimates for 2026.
//!
//! The calculators in [`tax`] are pure functions over static rate tables.
//! [`cmd`] holds the command line front end built on top of them.

pub mod cmd;
pub mod money;
pub mod tax;
