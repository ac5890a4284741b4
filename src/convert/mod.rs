//! Circuit JSON to SPICE conversion.
//!
//! Conversion runs in three steps over one [`ConversionContext`]:
//!
//! 1. build the [`NodeMap`] from the graph's connectivity
//! 2. translate every `source_component` in document order
//! 3. run the simulation directive passes in [`DIRECTIVE_PASSES`] order
//!
//! Components and directives missing required fields are left out of the
//! deck (logged at `debug`). The only hard failure is a transistor without
//! collector, base and emitter ports.

mod experiment;
mod opamp;
mod options;
mod passives;
mod ports;
mod semiconductors;
mod sources;
mod switch;

pub use opamp::{OPAMP_SUBCIRCUIT_DEFINITION, OPAMP_SUBCIRCUIT_NAME};
pub use options::{ConversionOptions, MosfetModel, DEFAULT_TITLE};
pub use ports::{find_port_by_role, RoleRule};
pub use switch::switch_control_waveform;

use std::collections::HashMap;

use tracing::{debug, info_span};

use crate::circuit::{
    build_node_map, CircuitGraph, ComponentKind, ConnectivityMap, ConnectivityResolver, NodeMap,
    SimulationSwitch, SourceComponent, SourcePort, GROUND_NODE,
};
use crate::error::Result;
use crate::netlist::{NetlistMutation, SpiceNetlist};

/// A simulation directive pass: reads the graph, proposes netlist changes.
pub type DirectivePass = fn(&CircuitGraph, &NodeMap) -> Vec<NetlistMutation>;

/// Directive passes, applied in this order after all components.
pub const DIRECTIVE_PASSES: [(&str, DirectivePass); 4] = [
    ("simulation_voltage_source", sources::voltage_sources),
    ("simulation_current_source", sources::current_sources),
    ("simulation_op_amp", opamp::op_amps),
    ("simulation_experiment", experiment::experiment),
];

/// State owned by a single conversion.
pub struct ConversionContext<'a> {
    pub graph: &'a CircuitGraph,
    pub node_map: NodeMap,
    pub options: &'a ConversionOptions,
    switches: HashMap<&'a str, &'a SimulationSwitch>,
    pub netlist: SpiceNetlist,
}

impl<'a> ConversionContext<'a> {
    pub fn new(
        graph: &'a CircuitGraph,
        resolver: &dyn ConnectivityResolver,
        options: &'a ConversionOptions,
    ) -> Self {
        let node_map = build_node_map(graph, resolver, options.floating_ports);
        debug!(ports = node_map.len(), "built node map");
        Self {
            graph,
            node_map,
            options,
            switches: graph.simulation_switch_map(),
            netlist: SpiceNetlist::new(options.title.clone()),
        }
    }

    /// The simulation switch driving a component, if any.
    ///
    /// Tried in order: the component's explicit switch id, its own id, then
    /// its name.
    pub fn simulation_switch_for(
        &self,
        component: &SourceComponent,
    ) -> Option<&'a SimulationSwitch> {
        [
            component.simulation_switch_id.as_deref(),
            Some(component.source_component_id.as_str()),
            component.name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|id| !id.is_empty())
        .find_map(|id| self.switches.get(id).copied())
    }

    /// Node of an optional port, `"0"` when absent or unknown.
    pub fn node_of(&self, port: Option<&SourcePort>) -> String {
        self.node_map.resolve(port.map(|p| p.source_port_id.as_str()))
    }

    /// Translate one source component, appending its element(s).
    pub fn add_source_component(&mut self, component: &SourceComponent) -> Result<()> {
        let ports = self.graph.ports_of(&component.source_component_id);

        let element = match &component.kind {
            ComponentKind::SimpleResistor { resistance } => {
                passives::resistor(self, component, &ports, *resistance)
            }
            ComponentKind::SimpleCapacitor { capacitance } => {
                passives::capacitor(self, component, &ports, *capacitance)
            }
            ComponentKind::SimpleInductor { inductance } => {
                passives::inductor(self, component, &ports, *inductance)
            }
            ComponentKind::SimpleDiode => semiconductors::diode(self, component, &ports),
            ComponentKind::SimpleMosfet {
                channel_type,
                mosfet_mode,
            } => semiconductors::mosfet(
                self,
                component,
                &ports,
                channel_type.unwrap_or_default(),
                mosfet_mode.unwrap_or_default(),
            ),
            ComponentKind::SimpleTransistor { transistor_type } => semiconductors::transistor(
                self,
                component,
                &ports,
                transistor_type.unwrap_or_default(),
            )?,
            ComponentKind::SimpleSwitch => Some(switch::switch(self, component, &ports)),
            ComponentKind::Unsupported => {
                debug!(
                    component = %component.source_component_id,
                    "no SPICE rendering for component kind"
                );
                None
            }
        };

        if let Some(element) = element {
            self.netlist.add_component(element);
        }
        Ok(())
    }

    /// Run every directive pass and apply its mutations.
    pub fn apply_directives(&mut self) {
        for (tag, pass) in DIRECTIVE_PASSES {
            let mutations = pass(self.graph, &self.node_map);
            debug!(directive = tag, mutations = mutations.len(), "applied directive pass");
            for mutation in mutations {
                self.netlist.apply(mutation);
            }
        }
    }

    pub fn into_netlist(self) -> SpiceNetlist {
        self.netlist
    }
}

/// Convert a circuit JSON document with default options.
pub fn circuit_json_to_spice(circuit_json: &str) -> Result<SpiceNetlist> {
    circuit_json_to_spice_with_options(circuit_json, &ConversionOptions::default())
}

/// Convert a circuit JSON document.
pub fn circuit_json_to_spice_with_options(
    circuit_json: &str,
    options: &ConversionOptions,
) -> Result<SpiceNetlist> {
    let graph = CircuitGraph::from_json_str(circuit_json)?;
    convert_circuit(&graph, options)
}

/// Convert an already-parsed graph, computing connectivity from its traces.
pub fn convert_circuit(graph: &CircuitGraph, options: &ConversionOptions) -> Result<SpiceNetlist> {
    let connectivity = ConnectivityMap::from_graph(graph);
    convert_circuit_with_resolver(graph, &connectivity, options)
}

/// Convert a graph using caller-supplied connectivity.
pub fn convert_circuit_with_resolver(
    graph: &CircuitGraph,
    resolver: &dyn ConnectivityResolver,
    options: &ConversionOptions,
) -> Result<SpiceNetlist> {
    let span = info_span!("circuit_json_to_spice", records = graph.elements().len());
    let _enter = span.enter();

    let mut ctx = ConversionContext::new(graph, resolver, options);
    for component in graph.source_components() {
        ctx.add_source_component(component)?;
    }
    ctx.apply_directives();

    let netlist = ctx.into_netlist();
    debug!(
        components = netlist.components().len(),
        nodes = netlist.nodes().len(),
        "conversion finished"
    );
    Ok(netlist)
}

/// Nodes of a component's ports in pin order.
///
/// Also returns the first two nodes, each falling back to ground.
pub(crate) fn two_terminal_nodes(
    ctx: &ConversionContext<'_>,
    ports: &[&SourcePort],
) -> (Vec<String>, String, String) {
    let nodes: Vec<String> = ports.iter().map(|p| ctx.node_of(Some(p))).collect();
    let terminal = |i: usize| nodes.get(i).cloned().unwrap_or_else(|| GROUND_NODE.to_string());
    let (positive, negative) = (terminal(0), terminal(1));
    (nodes, positive, negative)
}
