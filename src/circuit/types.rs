//! Core types for the circuit JSON input records.
//!
//! Every record in a circuit JSON document is an object tagged by `"type"`.
//! Only the record kinds that take part in SPICE conversion are modelled;
//! everything else decodes to [`CircuitElement::Other`] and is ignored.

use std::fmt;

use serde::Deserialize;

/// Opaque identifier of an electrical net, as handed out by a
/// [`ConnectivityResolver`](super::ConnectivityResolver).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetId(pub usize);

impl fmt::Display for NetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "net{}", self.0)
    }
}

/// A single record of a circuit JSON document.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CircuitElement {
    SourceComponent(SourceComponent),
    SourcePort(SourcePort),
    SourceNet(SourceNet),
    SourceTrace(SourceTrace),
    SimulationVoltageSource(SimulationVoltageSource),
    SimulationCurrentSource(SimulationCurrentSource),
    SimulationOpAmp(SimulationOpAmp),
    SimulationSwitch(SimulationSwitch),
    SimulationVoltageProbe(SimulationVoltageProbe),
    SimulationExperiment(SimulationExperiment),
    /// Layout, schematic and any other records irrelevant to SPICE
    #[serde(other)]
    Other,
}

/// A schematic-level component (resistor, diode, switch, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct SourceComponent {
    pub source_component_id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Explicit link to a `simulation_switch` record (switches only)
    #[serde(default)]
    pub simulation_switch_id: Option<String>,
    #[serde(flatten)]
    pub kind: ComponentKind,
}

impl SourceComponent {
    /// The component name, if one was given and it is not empty.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}

/// Component kinds, discriminated by the `ftype` field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "ftype", rename_all = "snake_case")]
pub enum ComponentKind {
    SimpleResistor {
        #[serde(default)]
        resistance: Option<f64>,
    },
    SimpleCapacitor {
        #[serde(default)]
        capacitance: Option<f64>,
    },
    SimpleInductor {
        #[serde(default)]
        inductance: Option<f64>,
    },
    SimpleDiode,
    SimpleSwitch,
    SimpleMosfet {
        #[serde(default)]
        channel_type: Option<ChannelType>,
        #[serde(default)]
        mosfet_mode: Option<MosfetMode>,
    },
    SimpleTransistor {
        #[serde(default)]
        transistor_type: Option<TransistorType>,
    },
    /// Any `ftype` without a SPICE rendering (chips, connectors, LEDs, ...)
    #[serde(other)]
    Unsupported,
}

/// MOSFET channel polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelType {
    #[default]
    N,
    P,
}

impl ChannelType {
    /// SPICE model type keyword (`NMOS` / `PMOS`).
    pub fn model_type(&self) -> &'static str {
        match self {
            ChannelType::N => "NMOS",
            ChannelType::P => "PMOS",
        }
    }
}

/// MOSFET conduction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MosfetMode {
    #[default]
    Enhancement,
    Depletion,
}

impl MosfetMode {
    pub fn as_upper(&self) -> &'static str {
        match self {
            MosfetMode::Enhancement => "ENHANCEMENT",
            MosfetMode::Depletion => "DEPLETION",
        }
    }
}

/// Bipolar transistor polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransistorType {
    #[default]
    Npn,
    Pnp,
}

impl TransistorType {
    /// SPICE model type keyword (`NPN` / `PNP`), also used as the model name.
    pub fn model_type(&self) -> &'static str {
        match self {
            TransistorType::Npn => "NPN",
            TransistorType::Pnp => "PNP",
        }
    }
}

/// A pin of a source component.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcePort {
    pub source_port_id: String,
    #[serde(default)]
    pub source_component_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub port_hints: Option<Vec<String>>,
    #[serde(default)]
    pub pin_number: Option<i64>,
}

impl SourcePort {
    pub fn hints(&self) -> &[String] {
        self.port_hints.as_deref().unwrap_or(&[])
    }
}

/// A named net (e.g. `GND`, `VCC`).
#[derive(Debug, Clone, Deserialize)]
pub struct SourceNet {
    pub source_net_id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// A logical connection joining ports and nets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceTrace {
    #[serde(default)]
    pub source_trace_id: Option<String>,
    #[serde(default)]
    pub connected_source_port_ids: Vec<String>,
    #[serde(default)]
    pub connected_source_net_ids: Vec<String>,
}

/// Shape of a time-varying simulation source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveShape {
    Sinewave,
    Square,
    /// Any other (or missing) shape; rendered as a DC level when possible
    Other,
}

impl WaveShape {
    fn parse(shape: Option<&str>) -> Self {
        match shape {
            Some("sinewave") => WaveShape::Sinewave,
            Some("square") => WaveShape::Square,
            _ => WaveShape::Other,
        }
    }
}

/// A simulation-only voltage source.
///
/// DC sources name their terminals `positive_source_port_id` /
/// `negative_source_port_id`; AC sources and older documents use
/// `terminal1_source_port_id` / `terminal2_source_port_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationVoltageSource {
    pub simulation_voltage_source_id: String,
    #[serde(default)]
    pub is_dc_source: Option<bool>,
    #[serde(default)]
    pub positive_source_port_id: Option<String>,
    #[serde(default)]
    pub negative_source_port_id: Option<String>,
    #[serde(default)]
    pub terminal1_source_port_id: Option<String>,
    #[serde(default)]
    pub terminal2_source_port_id: Option<String>,
    #[serde(default)]
    pub voltage: Option<f64>,
    #[serde(default)]
    pub wave_shape: Option<String>,
    #[serde(default)]
    pub frequency: Option<f64>,
    #[serde(default)]
    pub phase: Option<f64>,
    #[serde(default)]
    pub duty_cycle: Option<f64>,
    #[serde(default)]
    pub period: Option<f64>,
}

impl SimulationVoltageSource {
    pub fn positive_port_id(&self) -> Option<&str> {
        non_empty(&self.positive_source_port_id).or(non_empty(&self.terminal1_source_port_id))
    }

    pub fn negative_port_id(&self) -> Option<&str> {
        non_empty(&self.negative_source_port_id).or(non_empty(&self.terminal2_source_port_id))
    }

    /// Absent `is_dc_source` means DC.
    pub fn is_dc(&self) -> bool {
        self.is_dc_source != Some(false)
    }

    pub fn wave_shape(&self) -> WaveShape {
        WaveShape::parse(self.wave_shape.as_deref())
    }
}

/// A simulation-only current source.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationCurrentSource {
    pub simulation_current_source_id: String,
    #[serde(default)]
    pub is_dc_source: Option<bool>,
    #[serde(default)]
    pub positive_source_port_id: Option<String>,
    #[serde(default)]
    pub negative_source_port_id: Option<String>,
    #[serde(default)]
    pub terminal1_source_port_id: Option<String>,
    #[serde(default)]
    pub terminal2_source_port_id: Option<String>,
    /// DC current in amperes
    #[serde(default)]
    pub current: Option<f64>,
    #[serde(default)]
    pub peak_to_peak_current: Option<f64>,
    #[serde(default)]
    pub wave_shape: Option<String>,
    #[serde(default)]
    pub frequency: Option<f64>,
    #[serde(default)]
    pub phase: Option<f64>,
    #[serde(default)]
    pub duty_cycle: Option<f64>,
    #[serde(default)]
    pub period: Option<f64>,
}

impl SimulationCurrentSource {
    pub fn positive_port_id(&self) -> Option<&str> {
        non_empty(&self.positive_source_port_id).or(non_empty(&self.terminal1_source_port_id))
    }

    pub fn negative_port_id(&self) -> Option<&str> {
        non_empty(&self.negative_source_port_id).or(non_empty(&self.terminal2_source_port_id))
    }

    pub fn is_dc(&self) -> bool {
        self.is_dc_source != Some(false)
    }

    pub fn wave_shape(&self) -> WaveShape {
        WaveShape::parse(self.wave_shape.as_deref())
    }
}

/// A simulation-only ideal operational amplifier.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationOpAmp {
    pub simulation_op_amp_id: String,
    #[serde(default)]
    pub non_inverting_input_source_port_id: Option<String>,
    #[serde(default)]
    pub inverting_input_source_port_id: Option<String>,
    #[serde(default)]
    pub positive_supply_source_port_id: Option<String>,
    #[serde(default)]
    pub negative_supply_source_port_id: Option<String>,
    #[serde(default)]
    pub output_source_port_id: Option<String>,
}

/// Timing of a switch during simulation. Times are in seconds.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimulationSwitch {
    pub simulation_switch_id: String,
    /// The `simple_switch` component this record drives
    #[serde(default)]
    pub source_component_id: Option<String>,
    #[serde(default)]
    pub starts_closed: Option<bool>,
    #[serde(default)]
    pub closes_at: Option<f64>,
    #[serde(default)]
    pub opens_at: Option<f64>,
    /// Hz
    #[serde(default)]
    pub switching_frequency: Option<f64>,
}

/// A request to report a node voltage during simulation.
///
/// The signal may be given by port or by net; a reference terminal turns the
/// probe into a differential one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimulationVoltageProbe {
    #[serde(default)]
    pub simulation_voltage_probe_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub signal_input_source_port_id: Option<String>,
    #[serde(default)]
    pub signal_input_source_net_id: Option<String>,
    #[serde(default)]
    pub reference_input_source_port_id: Option<String>,
    #[serde(default)]
    pub reference_input_source_net_id: Option<String>,
    // Older documents
    #[serde(default)]
    pub source_port_id: Option<String>,
    #[serde(default)]
    pub source_net_id: Option<String>,
}

impl SimulationVoltageProbe {
    pub fn signal_port_id(&self) -> Option<&str> {
        non_empty(&self.signal_input_source_port_id).or(non_empty(&self.source_port_id))
    }

    pub fn signal_net_id(&self) -> Option<&str> {
        non_empty(&self.signal_input_source_net_id).or(non_empty(&self.source_net_id))
    }

    pub fn reference_port_id(&self) -> Option<&str> {
        non_empty(&self.reference_input_source_port_id)
    }

    pub fn reference_net_id(&self) -> Option<&str> {
        non_empty(&self.reference_input_source_net_id)
    }

    /// True when no reference terminal is given.
    pub fn is_single_ended(&self) -> bool {
        self.reference_port_id().is_none() && self.reference_net_id().is_none()
    }

    pub fn display_name(&self) -> Option<&str> {
        non_empty(&self.name)
    }
}

/// Analysis parameters. Times are in milliseconds.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimulationExperiment {
    #[serde(default)]
    pub simulation_experiment_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub experiment_type: Option<String>,
    #[serde(default)]
    pub time_per_step: Option<f64>,
    #[serde(default)]
    pub start_time_ms: Option<f64>,
    #[serde(default)]
    pub end_time_ms: Option<f64>,
}

impl SimulationExperiment {
    pub fn is_transient(&self) -> bool {
        self.experiment_type
            .as_deref()
            .is_some_and(|t| t.contains("transient"))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_resistor_component() {
        let element: CircuitElement = serde_json::from_value(json!({
            "type": "source_component",
            "source_component_id": "R1",
            "name": "R1",
            "ftype": "simple_resistor",
            "resistance": 1000,
        }))
        .unwrap();
        match element {
            CircuitElement::SourceComponent(c) => {
                assert_eq!(c.source_component_id, "R1");
                assert_eq!(
                    c.kind,
                    ComponentKind::SimpleResistor {
                        resistance: Some(1000.0)
                    }
                );
            }
            other => panic!("unexpected element {:?}", other),
        }
    }

    #[test]
    fn test_unknown_ftype_is_unsupported() {
        let element: CircuitElement = serde_json::from_value(json!({
            "type": "source_component",
            "source_component_id": "U1",
            "ftype": "simple_chip",
        }))
        .unwrap();
        match element {
            CircuitElement::SourceComponent(c) => assert_eq!(c.kind, ComponentKind::Unsupported),
            other => panic!("unexpected element {:?}", other),
        }
    }

    #[test]
    fn test_unknown_record_type_is_other() {
        let element: CircuitElement = serde_json::from_value(json!({
            "type": "pcb_trace",
            "pcb_trace_id": "t1",
        }))
        .unwrap();
        assert!(matches!(element, CircuitElement::Other));
    }

    #[test]
    fn test_voltage_source_terminal_fallback() {
        let source: SimulationVoltageSource = serde_json::from_value(json!({
            "simulation_voltage_source_id": "V1",
            "terminal1_source_port_id": "a",
            "terminal2_source_port_id": "b",
            "voltage": 3.3,
        }))
        .unwrap();
        assert_eq!(source.positive_port_id(), Some("a"));
        assert_eq!(source.negative_port_id(), Some("b"));
        assert!(source.is_dc());
    }

    #[test]
    fn test_probe_legacy_fields() {
        let probe: SimulationVoltageProbe = serde_json::from_value(json!({
            "source_port_id": "R1_p2",
            "name": "probe1",
        }))
        .unwrap();
        assert_eq!(probe.signal_port_id(), Some("R1_p2"));
        assert!(probe.is_single_ended());
    }
}
