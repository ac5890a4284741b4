//! Simulation op-amps, instantiated from a shared generic subcircuit.

use crate::circuit::{CircuitGraph, NodeMap};
use crate::commands::SubcircuitCallCommand;
use crate::netlist::{NetlistMutation, SpiceComponent};

pub const OPAMP_SUBCIRCUIT_NAME: &str = "GENERIC_OPAMP";

/// High-gain VCVS with input/output resistance, clamped to the rails.
pub const OPAMP_SUBCIRCUIT_DEFINITION: &str = "\
.SUBCKT GENERIC_OPAMP non_inverting_input inverting_input positive_supply negative_supply output
* Generic Op-Amp Model
E1 internal_output 0 non_inverting_input inverting_input 100k
Rin non_inverting_input inverting_input 10Meg
Rout internal_output output 75
D1 output positive_supply opamp_diode
D2 negative_supply output opamp_diode
.model opamp_diode D
.ENDS GENERIC_OPAMP";

pub(crate) fn op_amps(graph: &CircuitGraph, node_map: &NodeMap) -> Vec<NetlistMutation> {
    let mut mutations = Vec::new();

    for op_amp in graph.simulation_op_amps() {
        if mutations.is_empty() {
            // Definition sits with the models, ahead of every element
            mutations.push(NetlistMutation::AddModel {
                name: OPAMP_SUBCIRCUIT_NAME.to_string(),
                definition: OPAMP_SUBCIRCUIT_DEFINITION.to_string(),
            });
        }

        let nodes: Vec<String> = [
            &op_amp.non_inverting_input_source_port_id,
            &op_amp.inverting_input_source_port_id,
            &op_amp.positive_supply_source_port_id,
            &op_amp.negative_supply_source_port_id,
            &op_amp.output_source_port_id,
        ]
        .into_iter()
        .map(|port| node_map.resolve(port.as_deref()))
        .collect();

        let id = &op_amp.simulation_op_amp_id;
        let command = SubcircuitCallCommand::new(id, nodes.clone(), OPAMP_SUBCIRCUIT_NAME);
        mutations.push(NetlistMutation::AddComponent(SpiceComponent::new(
            id, command, nodes,
        )));
    }

    mutations
}
