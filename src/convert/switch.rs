//! Simple switches and their synthetic control sources.
//!
//! A switch `SW1` becomes three statements:
//!
//! ```text
//! .MODEL SW_SW1 SW(Ron=0.1 Roff=1e9 Vt=2.5 Vh=0.1)
//! VCTRL_SW1 NCTRL_SW1 0 PULSE(0 5 0 1n 1n 0.0005 0.001)
//! SSW1 N2 N1 NCTRL_SW1 0 SW_SW1
//! ```
//!
//! The control source's waveform comes from the matching
//! `simulation_switch` record, if any.

use super::{two_terminal_nodes, ConversionContext};
use crate::circuit::{SimulationSwitch, SourceComponent, SourcePort, GROUND_NODE};
use crate::commands::{SwitchCommand, VoltageSourceCommand, Waveform};
use crate::netlist::SpiceComponent;
use crate::spice::{round_for_spice, sanitize_identifier};

const HIGH_LEVEL: f64 = 5.0;
const LOW_LEVEL: f64 = 0.0;
const MIN_PULSE_WIDTH: f64 = 1e-9;

/// Emit the switch model and control source, returning the switch element.
pub(crate) fn switch(
    ctx: &mut ConversionContext<'_>,
    component: &SourceComponent,
    ports: &[&SourcePort],
) -> SpiceComponent {
    let base = sanitize_identifier(
        Some(
            component
                .name
                .as_deref()
                .unwrap_or(&component.source_component_id),
        ),
        "SW",
    );
    let (_, positive, negative) = two_terminal_nodes(ctx, ports);
    let control_node = format!("NCTRL_{}", base);
    let model = format!("SW_{}", base);

    ctx.netlist.add_model(
        model.clone(),
        format!(".MODEL {} SW(Ron=0.1 Roff=1e9 Vt=2.5 Vh=0.1)", model),
    );

    let waveform = switch_control_waveform(ctx.simulation_switch_for(component));
    let control_name = format!("CTRL_{}", base);
    let control = VoltageSourceCommand::new(&control_name, &control_node, GROUND_NODE)
        .with_waveform(waveform);
    ctx.netlist.add_component(SpiceComponent::new(
        control_name,
        control,
        vec![control_node.clone(), GROUND_NODE.to_string()],
    ));

    let nodes = vec![
        positive.clone(),
        negative.clone(),
        control_node.clone(),
        GROUND_NODE.to_string(),
    ];
    let command = SwitchCommand::new(&base, positive, negative, control_node, GROUND_NODE, model);
    SpiceComponent::new(base, command, nodes)
}

/// Control voltage for a switch: 5V closes it, 0V opens it.
///
/// - With a switching frequency `f`: period `1/f`, width from the close/open
///   gap capped at the period, else half a period.
/// - With `opens_at` after `closes_at`: width is the gap, period
///   `closes_at + 2 * width`.
/// - With only `closes_at > 0`: period `2 * closes_at`, width half of it.
/// - Otherwise a constant level for the initial state.
///
/// Pulses start at `closes_at`; a switch that starts closed inverts the levels.
pub fn switch_control_waveform(switch: Option<&SimulationSwitch>) -> Waveform {
    let Some(switch) = switch else {
        return Waveform::Dc(LOW_LEVEL);
    };

    let starts_closed = switch.starts_closed.unwrap_or(false);
    let closes_at = switch.closes_at.unwrap_or(0.0);
    let (initial, pulsed) = if starts_closed {
        (HIGH_LEVEL, LOW_LEVEL)
    } else {
        (LOW_LEVEL, HIGH_LEVEL)
    };
    let pulse = |width: f64, period: f64| Waveform::Pulse {
        initial,
        pulsed,
        delay: round_for_spice(closes_at),
        width: round_for_spice(width),
        period: round_for_spice(period),
    };

    if let Some(frequency) = switch.switching_frequency.filter(|f| *f > 0.0) {
        let period = 1.0 / frequency;
        let width = switch
            .opens_at
            .filter(|opens| *opens != 0.0 && *opens > closes_at)
            .map(|opens| (opens - closes_at).min(period))
            .filter(|w| *w > 0.0)
            .unwrap_or_else(|| (period / 2.0).max(MIN_PULSE_WIDTH));
        return pulse(width, period);
    }

    if let Some(opens) = switch.opens_at.filter(|opens| *opens > closes_at) {
        let width = (opens - closes_at).max(MIN_PULSE_WIDTH);
        return pulse(width, closes_at + width * 2.0);
    }

    if closes_at > 0.0 {
        let period = closes_at * 2.0;
        return pulse((period / 2.0).max(MIN_PULSE_WIDTH), period);
    }

    Waveform::Dc(if starts_closed { HIGH_LEVEL } else { LOW_LEVEL })
}
