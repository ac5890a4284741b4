//! SPICE element statements.
//!
//! Each element kind renders one fixed-grammar line:
//! - Linear: `R`, `C`, `L`, `K` (inductor coupling)
//! - Semiconductors: `D`, `Q`, `M`, `J`
//! - Sources: `V`, `I`
//! - Controls: `S` (voltage-controlled switch)
//! - Lines and hierarchy: `T`, `X`
//!
//! Node names and values are already-formatted strings; the commands only
//! concern themselves with statement grammar.

mod controls;
mod hierarchy;
mod linear;
mod semiconductors;
mod sources;

pub use controls::SwitchCommand;
pub use hierarchy::{LineTiming, SubcircuitCallCommand, TransmissionLineCommand};
pub use linear::{CapacitorCommand, InductorCommand, InductorCouplingCommand, ResistorCommand};
pub use semiconductors::{BjtCommand, DiodeCommand, JfetCommand, MosfetCommand, MosfetGeometry};
pub use sources::{CurrentSourceCommand, VoltageSourceCommand, Waveform};

use std::fmt;

/// A renderable SPICE element statement.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementCommand {
    Resistor(ResistorCommand),
    Capacitor(CapacitorCommand),
    Inductor(InductorCommand),
    InductorCoupling(InductorCouplingCommand),
    Diode(DiodeCommand),
    Bjt(BjtCommand),
    Mosfet(MosfetCommand),
    Jfet(JfetCommand),
    VoltageSource(VoltageSourceCommand),
    CurrentSource(CurrentSourceCommand),
    Switch(SwitchCommand),
    TransmissionLine(TransmissionLineCommand),
    SubcircuitCall(SubcircuitCallCommand),
}

impl ElementCommand {
    /// The single-letter SPICE element prefix.
    pub fn prefix(&self) -> char {
        match self {
            ElementCommand::Resistor(_) => 'R',
            ElementCommand::Capacitor(_) => 'C',
            ElementCommand::Inductor(_) => 'L',
            ElementCommand::InductorCoupling(_) => 'K',
            ElementCommand::Diode(_) => 'D',
            ElementCommand::Bjt(_) => 'Q',
            ElementCommand::Mosfet(_) => 'M',
            ElementCommand::Jfet(_) => 'J',
            ElementCommand::VoltageSource(_) => 'V',
            ElementCommand::CurrentSource(_) => 'I',
            ElementCommand::Switch(_) => 'S',
            ElementCommand::TransmissionLine(_) => 'T',
            ElementCommand::SubcircuitCall(_) => 'X',
        }
    }
}

impl fmt::Display for ElementCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementCommand::Resistor(c) => c.fmt(f),
            ElementCommand::Capacitor(c) => c.fmt(f),
            ElementCommand::Inductor(c) => c.fmt(f),
            ElementCommand::InductorCoupling(c) => c.fmt(f),
            ElementCommand::Diode(c) => c.fmt(f),
            ElementCommand::Bjt(c) => c.fmt(f),
            ElementCommand::Mosfet(c) => c.fmt(f),
            ElementCommand::Jfet(c) => c.fmt(f),
            ElementCommand::VoltageSource(c) => c.fmt(f),
            ElementCommand::CurrentSource(c) => c.fmt(f),
            ElementCommand::Switch(c) => c.fmt(f),
            ElementCommand::TransmissionLine(c) => c.fmt(f),
            ElementCommand::SubcircuitCall(c) => c.fmt(f),
        }
    }
}

macro_rules! impl_from_command {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ElementCommand {
                fn from(command: $ty) -> Self {
                    ElementCommand::$variant(command)
                }
            }
        )*
    };
}

impl_from_command! {
    Resistor => ResistorCommand,
    Capacitor => CapacitorCommand,
    Inductor => InductorCommand,
    InductorCoupling => InductorCouplingCommand,
    Diode => DiodeCommand,
    Bjt => BjtCommand,
    Mosfet => MosfetCommand,
    Jfet => JfetCommand,
    VoltageSource => VoltageSourceCommand,
    CurrentSource => CurrentSourceCommand,
    Switch => SwitchCommand,
    TransmissionLine => TransmissionLineCommand,
    SubcircuitCall => SubcircuitCallCommand,
}

/// Write ` <value>` when the option holds a non-empty string.
pub(crate) fn write_opt(f: &mut fmt::Formatter<'_>, value: &Option<String>) -> fmt::Result {
    match value.as_deref() {
        Some(v) if !v.is_empty() => write!(f, " {}", v),
        _ => Ok(()),
    }
}

/// Write ` KEY=<value>` when the option holds a non-empty string.
pub(crate) fn write_param(
    f: &mut fmt::Formatter<'_>,
    key: &str,
    value: &Option<String>,
) -> fmt::Result {
    match value.as_deref() {
        Some(v) if !v.is_empty() => write!(f, " {}={}", key, v),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_matches_rendering() {
        let commands: Vec<ElementCommand> = vec![
            ResistorCommand::new("R1", "a", "b", "1K").into(),
            DiodeCommand::new("D1", "a", "b", "D").into(),
            SwitchCommand::new("SW1", "a", "b", "c", "0", "SW_SW1").into(),
            SubcircuitCallCommand::new("U1", vec!["a".into()], "OPAMP").into(),
        ];
        for command in commands {
            let line = command.to_string();
            assert!(line.starts_with(command.prefix()), "{}", line);
        }
    }
}
