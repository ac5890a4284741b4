//! Error types for the circuit JSON to SPICE converter.
//!
//! Conversion is forgiving: components or sources with missing
//! fields are dropped and unresolved ports fall back to ground. The variants
//! here cover the few conditions that do abort a conversion, plus the I/O
//! failures of the command-line front end.

use thiserror::Error;

/// Result type alias using [`NetspiceError`].
pub type Result<T> = std::result::Result<T, NetspiceError>;

/// Unified error type for all Netspice operations.
#[derive(Error, Debug)]
pub enum NetspiceError {
    // ============ Input Errors ============
    /// The input document is not a JSON array of circuit records
    #[error("Invalid circuit JSON: {source}")]
    InvalidCircuitJson {
        #[source]
        source: serde_json::Error,
    },

    // ============ Conversion Errors ============
    /// A bipolar transistor lacks one of its collector, base or emitter ports
    #[error("Transistor {name} is missing required ports (collector, base, emitter)")]
    MissingTransistorPorts { name: String },

    // ============ I/O Errors ============
    /// Error reading the circuit file
    #[error("Failed to read circuit file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing the netlist
    #[error("Failed to write netlist: {source}")]
    OutputError {
        #[source]
        source: std::io::Error,
    },
}

impl NetspiceError {
    /// Create a missing transistor ports error
    pub fn missing_transistor_ports(name: impl Into<String>) -> Self {
        Self::MissingTransistorPorts { name: name.into() }
    }

    /// Create an invalid circuit JSON error
    pub fn invalid_json(source: serde_json::Error) -> Self {
        Self::InvalidCircuitJson { source }
    }
}
