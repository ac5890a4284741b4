//! Netspice - circuit JSON to SPICE netlist converter
//!
//! # Usage
//!
//! ```bash
//! netspice circuit.json -o circuit.cir
//! cat circuit.json | netspice --floating-ports ground | ngspice -b
//! ```

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use netspice_core::{
    circuit::FloatingPortPolicy,
    convert::{circuit_json_to_spice_with_options, ConversionOptions, MosfetModel},
    error::{NetspiceError, Result},
};

/// Convert a circuit JSON document into a SPICE netlist
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Circuit JSON file; reads stdin when omitted or `-`
    #[arg(value_name = "CIRCUIT_JSON")]
    input: Option<PathBuf>,

    /// Write the netlist here instead of stdout
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Title line of the netlist
    #[arg(long)]
    title: Option<String>,

    /// Node given to ports that no trace touches
    #[arg(long, value_enum, default_value_t = FloatingPorts::Unique)]
    floating_ports: FloatingPorts,

    /// How MOSFETs are modelled
    #[arg(long, value_enum, default_value_t = Mosfet::Switch)]
    mosfet_model: Mosfet,

    /// Log conversion decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FloatingPorts {
    Unique,
    Ground,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mosfet {
    Switch,
    Level1,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let input = read_input(args.input.as_deref())?;

    let mut options = ConversionOptions::new()
        .with_floating_ports(match args.floating_ports {
            FloatingPorts::Unique => FloatingPortPolicy::Unique,
            FloatingPorts::Ground => FloatingPortPolicy::Ground,
        })
        .with_mosfet_model(match args.mosfet_model {
            Mosfet::Switch => MosfetModel::Switch,
            Mosfet::Level1 => MosfetModel::Level1,
        });
    if let Some(title) = args.title {
        options = options.with_title(title);
    }

    let netlist = circuit_json_to_spice_with_options(&input, &options)?;
    info!(
        components = netlist.components().len(),
        nodes = netlist.nodes().len(),
        "converted circuit"
    );

    let text = format!("{}\n", netlist);
    match args.output {
        Some(path) => {
            fs::write(&path, text).map_err(|source| NetspiceError::OutputError { source })?
        }
        None => io::stdout()
            .lock()
            .write_all(text.as_bytes())
            .map_err(|source| NetspiceError::OutputError { source })?,
    }

    Ok(())
}

fn read_input(path: Option<&std::path::Path>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            fs::read_to_string(path).map_err(|source| NetspiceError::FileReadError {
                path: path.display().to_string(),
                source,
            })
        }
        _ => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .map_err(|source| NetspiceError::FileReadError {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            Ok(input)
        }
    }
}
