//! Resistors, capacitors and inductors.
//!
//! Each needs its value and a name; without either nothing is emitted.

use tracing::debug;

use super::{two_terminal_nodes, ConversionContext};
use crate::circuit::{SourceComponent, SourcePort};
use crate::commands::{CapacitorCommand, InductorCommand, ResistorCommand};
use crate::netlist::SpiceComponent;
use crate::spice::{format_capacitance, format_inductance, format_resistance};

pub(crate) fn resistor(
    ctx: &ConversionContext<'_>,
    component: &SourceComponent,
    ports: &[&SourcePort],
    resistance: Option<f64>,
) -> Option<SpiceComponent> {
    let (name, value) = required(component, resistance, "resistance")?;
    let (nodes, positive, negative) = two_terminal_nodes(ctx, ports);
    let command = ResistorCommand::new(name, positive, negative, format_resistance(value));
    Some(SpiceComponent::new(name, command, nodes))
}

pub(crate) fn capacitor(
    ctx: &ConversionContext<'_>,
    component: &SourceComponent,
    ports: &[&SourcePort],
    capacitance: Option<f64>,
) -> Option<SpiceComponent> {
    let (name, value) = required(component, capacitance, "capacitance")?;
    let (nodes, positive, negative) = two_terminal_nodes(ctx, ports);
    let command = CapacitorCommand::new(name, positive, negative, format_capacitance(value));
    Some(SpiceComponent::new(name, command, nodes))
}

pub(crate) fn inductor(
    ctx: &ConversionContext<'_>,
    component: &SourceComponent,
    ports: &[&SourcePort],
    inductance: Option<f64>,
) -> Option<SpiceComponent> {
    let (name, value) = required(component, inductance, "inductance")?;
    let (nodes, positive, negative) = two_terminal_nodes(ctx, ports);
    let command = InductorCommand::new(name, positive, negative, format_inductance(value));
    Some(SpiceComponent::new(name, command, nodes))
}

fn required<'c>(
    component: &'c SourceComponent,
    value: Option<f64>,
    field: &str,
) -> Option<(&'c str, f64)> {
    match (component.display_name(), value) {
        (Some(name), Some(value)) => Some((name, value)),
        (None, _) => {
            debug!(component = %component.source_component_id, "skipping unnamed component");
            None
        }
        (_, None) => {
            debug!(
                component = %component.source_component_id,
                field,
                "skipping component without value"
            );
            None
        }
    }
}
