//! Voltage probes and transient analysis timing.

use indexmap::IndexSet;
use tracing::debug;

use crate::circuit::{CircuitGraph, NodeMap, SimulationExperiment, GROUND_NODE};
use crate::netlist::NetlistMutation;
use crate::spice::format_number_for_spice;

pub(crate) fn experiment(graph: &CircuitGraph, node_map: &NodeMap) -> Vec<NetlistMutation> {
    let Some(experiment) = graph.simulation_experiment() else {
        return Vec::new();
    };

    let mut mutations = Vec::new();

    let targets = probe_targets(graph, node_map);
    if !targets.is_empty() && experiment.is_transient() {
        let joined: Vec<&str> = targets.iter().map(String::as_str).collect();
        mutations.push(NetlistMutation::AddPrintStatement(format!(
            ".PRINT TRAN {}",
            joined.join(" ")
        )));
    }

    match tran_command(experiment) {
        Some(tran) => mutations.push(NetlistMutation::SetTranCommand(tran)),
        None => debug!("experiment lacks time_per_step or end_time_ms, no .tran emitted"),
    }

    mutations
}

/// `V(node)` / `V(node,ref)` targets for every probe, deduplicated in order.
///
/// Probes on ground are dropped; a reference on ground makes the probe
/// single-ended.
pub fn probe_targets(graph: &CircuitGraph, node_map: &NodeMap) -> IndexSet<String> {
    let mut targets = IndexSet::new();

    for probe in graph.simulation_voltage_probes() {
        let signal = probe
            .signal_port_id()
            .or_else(|| probe.signal_net_id().and_then(|net| graph.first_port_on_net(net)))
            .and_then(|port| node_map.get(port));
        let Some(signal) = signal else {
            debug!(probe = ?probe.display_name(), "skipping probe with unresolved signal");
            continue;
        };

        let reference = probe
            .reference_port_id()
            .or_else(|| probe.reference_net_id().and_then(|net| graph.first_port_on_net(net)))
            .and_then(|port| node_map.get(port))
            .filter(|node| *node != GROUND_NODE);

        match reference {
            Some(reference) => {
                targets.insert(format!("V({},{})", signal, reference));
            }
            None if signal != GROUND_NODE => {
                targets.insert(format!("V({})", signal));
            }
            None => {}
        }
    }

    targets
}

/// `.tran <step> <end> [<start>] UIC`, times converted from ms to seconds.
///
/// Needs a non-zero step and end time; a zero start is omitted.
pub fn tran_command(experiment: &SimulationExperiment) -> Option<String> {
    let step = experiment.time_per_step.filter(|v| *v != 0.0)?;
    let end = experiment.end_time_ms.filter(|v| *v != 0.0)?;
    let start = experiment.start_time_ms.unwrap_or(0.0) / 1000.0;

    let mut tran = format!(
        ".tran {} {}",
        format_number_for_spice(step / 1000.0),
        format_number_for_spice(end / 1000.0)
    );
    if start > 0.0 {
        tran.push(' ');
        tran.push_str(&format_number_for_spice(start));
    }
    tran.push_str(" UIC");
    Some(tran)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn experiment(step: Option<f64>, start: Option<f64>, end: Option<f64>) -> SimulationExperiment {
        SimulationExperiment {
            experiment_type: Some("spice_transient_analysis".to_string()),
            time_per_step: step,
            start_time_ms: start,
            end_time_ms: end,
            ..Default::default()
        }
    }

    #[test]
    fn test_tran_units() {
        let tran = tran_command(&experiment(Some(1.0), None, Some(100.0)));
        assert_eq!(tran.as_deref(), Some(".tran 0.001 0.1 UIC"));
    }

    #[test]
    fn test_tran_with_start() {
        let tran = tran_command(&experiment(Some(1.0), Some(10.0), Some(100.0)));
        assert_eq!(tran.as_deref(), Some(".tran 0.001 0.1 0.01 UIC"));
    }

    #[test]
    fn test_tran_zero_start_omitted() {
        let tran = tran_command(&experiment(Some(0.05), Some(0.0), Some(5.0)));
        assert_eq!(tran.as_deref(), Some(".tran 0.00005 0.005 UIC"));
    }

    #[test]
    fn test_tran_requires_step_and_end() {
        assert!(tran_command(&experiment(None, None, Some(100.0))).is_none());
        assert!(tran_command(&experiment(Some(1.0), None, None)).is_none());
        assert!(tran_command(&experiment(Some(0.0), None, Some(100.0))).is_none());
    }
}
