//! Simulation voltage and current sources.
//!
//! DC sources (`is_dc_source` true or absent) render `DC <level>`. Other
//! sources pick their waveform from `wave_shape`:
//!
//! | shape | waveform |
//! |---|---|
//! | `sinewave` | `SIN(0 <amplitude> <freq> 0 0 <phase>)`, or `DC` at zero frequency |
//! | `square` | `PULSE(0 <level> 0 1n 1n <period * duty> <period>)` |
//! | other | `DC <level>` for a voltage source with a level, else nothing |
//!
//! Sources missing a terminal or a level are left out.

use tracing::debug;

use crate::circuit::{CircuitGraph, NodeMap, WaveShape};
use crate::commands::{CurrentSourceCommand, VoltageSourceCommand, Waveform};
use crate::netlist::{NetlistMutation, SpiceComponent};

/// Source fields shared by voltage and current sources.
struct SourceSpec<'g> {
    id: &'g str,
    positive: Option<&'g str>,
    negative: Option<&'g str>,
    is_dc: bool,
    shape: WaveShape,
    /// DC level (`voltage` / `current`)
    level: Option<f64>,
    /// Sine amplitude
    amplitude: f64,
    /// Square pulsed level
    pulsed: f64,
    /// Level for a time-varying source whose shape is neither sine nor square
    shapeless_level: Option<f64>,
    frequency: Option<f64>,
    phase: Option<f64>,
    duty_cycle: Option<f64>,
    period: Option<f64>,
}

impl SourceSpec<'_> {
    fn waveform(&self) -> Option<Waveform> {
        if self.is_dc {
            return self.level.map(Waveform::Dc);
        }
        match self.shape {
            WaveShape::Sinewave => {
                let frequency = self.frequency.unwrap_or(0.0);
                if frequency > 0.0 {
                    Some(Waveform::Sine {
                        offset: 0.0,
                        amplitude: self.amplitude,
                        frequency,
                        delay: 0.0,
                        damping: 0.0,
                        phase: self.phase.unwrap_or(0.0),
                    })
                } else {
                    Some(Waveform::Dc(self.amplitude))
                }
            }
            WaveShape::Square => {
                let period = self.period.unwrap_or_else(|| match self.frequency.unwrap_or(0.0) {
                    f if f == 0.0 => f64::INFINITY,
                    f => 1.0 / f,
                });
                Some(Waveform::Pulse {
                    initial: 0.0,
                    pulsed: self.pulsed,
                    delay: 0.0,
                    width: period * self.duty_cycle.unwrap_or(0.5),
                    period,
                })
            }
            WaveShape::Other => self.shapeless_level.map(Waveform::Dc),
        }
    }

    fn terminals(&self) -> Option<(&str, &str)> {
        Some((self.positive?, self.negative?))
    }
}

pub(crate) fn voltage_sources(graph: &CircuitGraph, node_map: &NodeMap) -> Vec<NetlistMutation> {
    graph
        .simulation_voltage_sources()
        .filter_map(|source| {
            let spec = SourceSpec {
                id: &source.simulation_voltage_source_id,
                positive: source.positive_port_id(),
                negative: source.negative_port_id(),
                is_dc: source.is_dc(),
                shape: source.wave_shape(),
                level: source.voltage,
                amplitude: source.voltage.unwrap_or(0.0),
                pulsed: source.voltage.unwrap_or(0.0),
                shapeless_level: source.voltage,
                frequency: source.frequency,
                phase: source.phase,
                duty_cycle: source.duty_cycle,
                period: source.period,
            };
            let (id, positive, negative, waveform) = resolve(&spec, node_map)?;
            let command =
                VoltageSourceCommand::new(id, &positive, &negative).with_waveform(waveform);
            Some(NetlistMutation::AddComponent(SpiceComponent::new(
                id,
                command,
                vec![positive, negative],
            )))
        })
        .collect()
}

pub(crate) fn current_sources(graph: &CircuitGraph, node_map: &NodeMap) -> Vec<NetlistMutation> {
    graph
        .simulation_current_sources()
        .filter_map(|source| {
            let peak_to_peak = source.peak_to_peak_current.unwrap_or(0.0);
            let spec = SourceSpec {
                id: &source.simulation_current_source_id,
                positive: source.positive_port_id(),
                negative: source.negative_port_id(),
                is_dc: source.is_dc(),
                shape: source.wave_shape(),
                level: source.current,
                amplitude: peak_to_peak / 2.0,
                pulsed: peak_to_peak,
                shapeless_level: None,
                frequency: source.frequency,
                phase: source.phase,
                duty_cycle: source.duty_cycle,
                period: source.period,
            };
            let (id, positive, negative, waveform) = resolve(&spec, node_map)?;
            let command =
                CurrentSourceCommand::new(id, &positive, &negative).with_waveform(waveform);
            Some(NetlistMutation::AddComponent(SpiceComponent::new(
                id,
                command,
                vec![positive, negative],
            )))
        })
        .collect()
}

fn resolve<'g>(
    spec: &SourceSpec<'g>,
    node_map: &NodeMap,
) -> Option<(&'g str, String, String, Waveform)> {
    let Some((positive, negative)) = spec.terminals() else {
        debug!(source = spec.id, "skipping source without both terminals");
        return None;
    };
    let Some(waveform) = spec.waveform() else {
        debug!(source = spec.id, "skipping source without a level");
        return None;
    };
    Some((
        spec.id,
        node_map.resolve(Some(positive)),
        node_map.resolve(Some(negative)),
        waveform,
    ))
}
