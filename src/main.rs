use clap::{Parser, Subcommand};
use kztax::cmd::{
    land::LandCommand, property::PropertyCommand, rates::RatesCommand, schema::SchemaCommand,
    transport::TransportCommand,
};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(
    name = "kztax",
    version,
    about = "Estimate Kazakhstan land, property and transport tax for 2026"
)]
struct Cli {
    /// Log calculation steps
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Land tax for a plot
    Land(LandCommand),
    /// Property tax by value or by area
    Property(PropertyCommand),
    /// Annual transport tax for a vehicle
    Transport(TransportCommand),
    /// Print the rate tables
    Rates(RatesCommand),
    /// Print the JSON schema of a result record
    Schema(SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        pretty_env_logger::formatted_builder()
            .filter_level(LevelFilter::Debug)
            .init();
    } else {
        pretty_env_logger::init();
    }

    match cli.command {
        Command::Land(cmd) => cmd.exec(),
        Command::Property(cmd) => cmd.exec(),
        Command::Transport(cmd) => cmd.exec(),
        Command::Rates(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
    }
}
