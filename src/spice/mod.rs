//! SPICE text helpers: numeric literals and identifiers.

mod identifier;
mod values;

pub use identifier::sanitize_identifier;
pub use values::{
    format_capacitance, format_inductance, format_number, format_number_for_spice,
    format_resistance, round_for_spice,
};
