//! # Netspice Core
//!
//! Converts circuit JSON graphs (components, ports, nets, traces and
//! simulation directives) into SPICE netlists.
//!
//! ## Architecture
//!
//! - [`circuit`] - Input records, connectivity and node assignment
//! - [`spice`] - Number and identifier formatting
//! - [`commands`] - One renderer per SPICE element kind
//! - [`netlist`] - The netlist accumulator and serializer
//! - [`convert`] - Component and simulation directive translation
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! netspice circuit.json > circuit.cir
//! ```
//!
//! ### Library
//!
//! ```
//! let json = r#"[
//!   {"type": "source_component", "source_component_id": "R1", "name": "R1",
//!    "ftype": "simple_resistor", "resistance": 1000},
//!   {"type": "source_port", "source_port_id": "R1_p1", "source_component_id": "R1", "pin_number": 1},
//!   {"type": "source_port", "source_port_id": "R1_p2", "source_component_id": "R1", "pin_number": 2},
//!   {"type": "source_trace", "connected_source_port_ids": ["R1_p2"], "connected_source_net_ids": ["gnd"]},
//!   {"type": "source_net", "source_net_id": "gnd", "name": "GND"}
//! ]"#;
//!
//! let netlist = netspice_core::circuit_json_to_spice(json).unwrap();
//! assert!(netlist.to_spice_string().contains("RR1 N1 0 1K"));
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { circuitJsonToSpice } from 'netspice_core';
//!
//! const netlist = circuitJsonToSpice(JSON.stringify(circuitJson));
//! ```
//!
//! ## Node Naming
//!
//! Ground nets become node `0`. Nets probed by a named single-ended voltage
//! probe take the probe's name. Every other net is numbered `N1`, `N2`, ...
//! in port order, starting above any `N<k>` name a probe already claimed.
//! A probe name already used for one net does not name a second one.
//!
//! Ports that no trace touches are floating. By default
//! ([`FloatingPortPolicy::Unique`](circuit::FloatingPortPolicy)) each gets its
//! own fresh `N<k>`, so a lone resistor renders as `RR1 N1 N2 1K`.
//! [`FloatingPortPolicy::Ground`](circuit::FloatingPortPolicy) ties them to
//! `0` instead, giving `RR1 0 0 1K`:
//!
//! ```
//! use netspice_core::circuit::FloatingPortPolicy;
//! use netspice_core::{circuit_json_to_spice_with_options, ConversionOptions};
//!
//! let json = r#"[
//!   {"type": "source_component", "source_component_id": "R1", "name": "R1",
//!    "ftype": "simple_resistor", "resistance": 1000},
//!   {"type": "source_port", "source_port_id": "R1_p1", "source_component_id": "R1", "pin_number": 1},
//!   {"type": "source_port", "source_port_id": "R1_p2", "source_component_id": "R1", "pin_number": 2}
//! ]"#;
//!
//! let unique = circuit_json_to_spice_with_options(json, &ConversionOptions::new()).unwrap();
//! assert!(unique.to_spice_string().contains("RR1 N1 N2 1K"));
//!
//! let options = ConversionOptions::new().with_floating_ports(FloatingPortPolicy::Ground);
//! let grounded = circuit_json_to_spice_with_options(json, &options).unwrap();
//! assert!(grounded.to_spice_string().contains("RR1 0 0 1K"));
//! ```

pub mod circuit;
pub mod commands;
pub mod convert;
pub mod error;
pub mod netlist;
pub mod spice;

// Re-export main types for convenience
pub use circuit::CircuitGraph;
pub use convert::{circuit_json_to_spice, circuit_json_to_spice_with_options, ConversionOptions};
pub use error::{NetspiceError, Result};
pub use netlist::{SpiceComponent, SpiceNetlist, SpiceSubcircuit};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;
