//! Schema command - print the JSON output formats

use crate::tax::land::LandTax;
use crate::tax::property::{AreaTax, ValueTax};
use crate::tax::transport::TransportTax;
use clap::Args;
use schemars::{schema::RootSchema, schema_for};

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Result record to describe
    #[arg(value_enum)]
    record: SchemaRecord,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaRecord {
    /// Output of `land --json`
    Land,
    /// Output of `property value --json`
    PropertyValue,
    /// Output of `property area --json`
    PropertyArea,
    /// Output of `transport --json`
    Transport,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(&schema(self.record))?);
        Ok(())
    }
}

pub fn schema(record: SchemaRecord) -> RootSchema {
    match record {
        SchemaRecord::Land => schema_for!(LandTax),
        SchemaRecord::PropertyValue => schema_for!(ValueTax),
        SchemaRecord::PropertyArea => schema_for!(AreaTax),
        SchemaRecord::Transport => schema_for!(TransportTax),
    }
}
