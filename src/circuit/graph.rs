//! Circuit graph structure.

use std::collections::HashMap;

use tracing::warn;

use super::types::{
    CircuitElement, SimulationCurrentSource, SimulationExperiment, SimulationOpAmp,
    SimulationSwitch, SimulationVoltageProbe, SimulationVoltageSource, SourceComponent,
    SourceNet, SourcePort, SourceTrace,
};
use crate::error::{NetspiceError, Result};

/// A circuit JSON document, kept in its original record order.
#[derive(Debug, Clone, Default)]
pub struct CircuitGraph {
    elements: Vec<CircuitElement>,
}

impl CircuitGraph {
    /// Build a graph from already-decoded records.
    pub fn from_elements(elements: Vec<CircuitElement>) -> Self {
        Self { elements }
    }

    /// Parse a circuit JSON document.
    ///
    /// The document must be a JSON array. Records that carry a known `type`
    /// but cannot be decoded are skipped with a warning rather than failing
    /// the whole document.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(input).map_err(NetspiceError::invalid_json)?;
        Self::from_json_value(value)
    }

    /// Build a graph from a parsed JSON value (must be an array).
    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        let records: Vec<serde_json::Value> =
            serde_json::from_value(value).map_err(NetspiceError::invalid_json)?;

        let mut elements = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            match serde_json::from_value::<CircuitElement>(record) {
                Ok(CircuitElement::Other) => {}
                Ok(element) => elements.push(element),
                Err(err) => warn!(index, error = %err, "skipping undecodable circuit record"),
            }
        }

        Ok(Self { elements })
    }

    /// All records, in document order.
    pub fn elements(&self) -> &[CircuitElement] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn source_components(&self) -> impl Iterator<Item = &SourceComponent> {
        self.elements.iter().filter_map(|e| match e {
            CircuitElement::SourceComponent(c) => Some(c),
            _ => None,
        })
    }

    pub fn source_ports(&self) -> impl Iterator<Item = &SourcePort> {
        self.elements.iter().filter_map(|e| match e {
            CircuitElement::SourcePort(p) => Some(p),
            _ => None,
        })
    }

    pub fn source_nets(&self) -> impl Iterator<Item = &SourceNet> {
        self.elements.iter().filter_map(|e| match e {
            CircuitElement::SourceNet(n) => Some(n),
            _ => None,
        })
    }

    pub fn source_traces(&self) -> impl Iterator<Item = &SourceTrace> {
        self.elements.iter().filter_map(|e| match e {
            CircuitElement::SourceTrace(t) => Some(t),
            _ => None,
        })
    }

    pub fn simulation_voltage_sources(&self) -> impl Iterator<Item = &SimulationVoltageSource> {
        self.elements.iter().filter_map(|e| match e {
            CircuitElement::SimulationVoltageSource(s) => Some(s),
            _ => None,
        })
    }

    pub fn simulation_current_sources(&self) -> impl Iterator<Item = &SimulationCurrentSource> {
        self.elements.iter().filter_map(|e| match e {
            CircuitElement::SimulationCurrentSource(s) => Some(s),
            _ => None,
        })
    }

    pub fn simulation_op_amps(&self) -> impl Iterator<Item = &SimulationOpAmp> {
        self.elements.iter().filter_map(|e| match e {
            CircuitElement::SimulationOpAmp(o) => Some(o),
            _ => None,
        })
    }

    pub fn simulation_switches(&self) -> impl Iterator<Item = &SimulationSwitch> {
        self.elements.iter().filter_map(|e| match e {
            CircuitElement::SimulationSwitch(s) => Some(s),
            _ => None,
        })
    }

    pub fn simulation_voltage_probes(&self) -> impl Iterator<Item = &SimulationVoltageProbe> {
        self.elements.iter().filter_map(|e| match e {
            CircuitElement::SimulationVoltageProbe(p) => Some(p),
            _ => None,
        })
    }

    /// The first simulation experiment in the document, if any.
    pub fn simulation_experiment(&self) -> Option<&SimulationExperiment> {
        self.elements.iter().find_map(|e| match e {
            CircuitElement::SimulationExperiment(x) => Some(x),
            _ => None,
        })
    }

    /// Ports belonging to a component, ordered by pin number.
    ///
    /// Ports without a pin number sort as pin 0; ties keep document order.
    pub fn ports_of(&self, source_component_id: &str) -> Vec<&SourcePort> {
        let mut ports: Vec<&SourcePort> = self
            .source_ports()
            .filter(|p| p.source_component_id.as_deref() == Some(source_component_id))
            .collect();
        ports.sort_by_key(|p| p.pin_number.unwrap_or(0));
        ports
    }

    /// First port of the first trace that touches the given net.
    pub fn first_port_on_net(&self, source_net_id: &str) -> Option<&str> {
        self.source_traces()
            .find(|t| t.connected_source_net_ids.iter().any(|n| n == source_net_id))
            .and_then(|t| t.connected_source_port_ids.first())
            .map(String::as_str)
    }

    /// Index of simulation switches by id.
    ///
    /// Each switch is reachable by its `simulation_switch_id` and also by the
    /// `source_component_id` it drives, unless that alias collides with a
    /// real switch id.
    pub fn simulation_switch_map(&self) -> HashMap<&str, &SimulationSwitch> {
        let mut map = HashMap::new();
        for switch in self.simulation_switches() {
            map.insert(switch.simulation_switch_id.as_str(), switch);
        }
        for switch in self.simulation_switches() {
            if let Some(component_id) = switch.source_component_id.as_deref() {
                map.entry(component_id).or_insert(switch);
            }
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn graph(value: serde_json::Value) -> CircuitGraph {
        CircuitGraph::from_json_value(value).unwrap()
    }

    #[test]
    fn test_rejects_non_array() {
        let err = CircuitGraph::from_json_str("{\"type\": \"source_port\"}").unwrap_err();
        assert!(matches!(err, NetspiceError::InvalidCircuitJson { .. }));
    }

    #[test]
    fn test_skips_undecodable_records() {
        let g = graph(json!([
            { "type": "source_port" },
            { "type": "source_port", "source_port_id": "p1" },
            { "type": "schematic_box" },
        ]));
        assert_eq!(g.elements().len(), 1);
        assert_eq!(g.source_ports().count(), 1);
    }

    #[test]
    fn test_ports_sorted_by_pin_number() {
        let g = graph(json!([
            { "type": "source_port", "source_port_id": "b", "source_component_id": "R1", "pin_number": 2 },
            { "type": "source_port", "source_port_id": "a", "source_component_id": "R1", "pin_number": 1 },
            { "type": "source_port", "source_port_id": "x", "source_component_id": "R2", "pin_number": 1 },
        ]));
        let ids: Vec<_> = g.ports_of("R1").iter().map(|p| p.source_port_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_switch_map_aliases_component_id() {
        let g = graph(json!([
            { "type": "simulation_switch", "simulation_switch_id": "switch_SW1", "source_component_id": "SW1" },
        ]));
        let map = g.simulation_switch_map();
        assert!(map.contains_key("switch_SW1"));
        assert!(map.contains_key("SW1"));
    }

    #[test]
    fn test_first_port_on_net() {
        let g = graph(json!([
            { "type": "source_trace", "connected_source_port_ids": [], "connected_source_net_ids": ["n1"] },
            { "type": "source_trace", "connected_source_port_ids": ["p1", "p2"], "connected_source_net_ids": ["n1"] },
        ]));
        // Only the first trace touching the net is consulted
        assert_eq!(g.first_port_on_net("n1"), None);
        assert_eq!(g.first_port_on_net("n2"), None);

        let g = graph(json!([
            { "type": "source_trace", "connected_source_port_ids": ["p1", "p2"], "connected_source_net_ids": ["n1"] },
        ]));
        assert_eq!(g.first_port_on_net("n1"), Some("p1"));
    }
}
