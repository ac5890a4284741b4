//! Port to SPICE node resolution.
//!
//! [`build_node_map`] assigns every port of the circuit a node name:
//!
//! 1. Nets selected by the [`GroundRule`]s become node `"0"`.
//! 2. Named single-ended voltage probes claim their net (or, when floating,
//!    their port) under the probe's name. A name binds one node only; a
//!    later probe reusing it on another net leaves that net unnamed.
//! 3. Every other net gets `N<k>`, numbered in port order. Numbering starts
//!    above any `N<digits>` name claimed in step 2.
//! 4. Ports on no net follow the [`FloatingPortPolicy`].

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::hash::Hash;

use tracing::{debug, trace};

use super::connectivity::ConnectivityResolver;
use super::graph::CircuitGraph;
use super::types::NetId;
use crate::spice::sanitize_identifier;

/// The reserved SPICE ground node.
pub const GROUND_NODE: &str = "0";

/// What node a port on no net resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FloatingPortPolicy {
    /// A fresh `N<k>` per floating port
    #[default]
    Unique,
    /// Ground (`"0"`)
    Ground,
}

/// Rules that mark a net as ground, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundRule {
    /// A trace touching a source net whose name contains `gnd` (any case)
    GndNamedNet,
    /// A port named exactly `gnd` (any case)
    GndNamedPort,
    /// The negative terminal of a simulation voltage source
    SourceNegativeTerminal,
}

impl GroundRule {
    pub const ALL: [GroundRule; 3] = [
        GroundRule::GndNamedNet,
        GroundRule::GndNamedPort,
        GroundRule::SourceNegativeTerminal,
    ];

    /// Nets this rule marks as ground.
    pub fn nets(
        &self,
        graph: &CircuitGraph,
        resolver: &dyn ConnectivityResolver,
    ) -> BTreeSet<NetId> {
        match self {
            GroundRule::GndNamedNet => {
                let gnd_net_ids: Vec<&str> = graph
                    .source_nets()
                    .filter(|n| {
                        n.name
                            .as_deref()
                            .is_some_and(|name| name.to_lowercase().contains("gnd"))
                    })
                    .map(|n| n.source_net_id.as_str())
                    .collect();
                if gnd_net_ids.is_empty() {
                    return BTreeSet::new();
                }
                graph
                    .source_traces()
                    .filter(|t| {
                        t.connected_source_net_ids
                            .iter()
                            .any(|id| gnd_net_ids.contains(&id.as_str()))
                    })
                    .filter_map(|t| t.connected_source_port_ids.first())
                    .filter_map(|port_id| resolver.net_of(port_id))
                    .collect()
            }
            GroundRule::GndNamedPort => graph
                .source_ports()
                .filter(|p| p.name.as_deref().is_some_and(|n| n.eq_ignore_ascii_case("gnd")))
                .filter_map(|p| resolver.net_of(&p.source_port_id))
                .collect(),
            GroundRule::SourceNegativeTerminal => graph
                .simulation_voltage_sources()
                .filter_map(|s| s.negative_port_id())
                .filter_map(|port_id| resolver.net_of(port_id))
                .collect(),
        }
    }
}

/// Union of the nets selected by every [`GroundRule`].
pub fn ground_nets(graph: &CircuitGraph, resolver: &dyn ConnectivityResolver) -> BTreeSet<NetId> {
    GroundRule::ALL
        .iter()
        .flat_map(|rule| rule.nets(graph, resolver))
        .collect()
}

/// Mapping from port id to SPICE node name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeMap {
    nodes: HashMap<String, String>,
}

impl NodeMap {
    /// Node name assigned to a port.
    pub fn get(&self, port_id: &str) -> Option<&str> {
        self.nodes.get(port_id).map(String::as_str)
    }

    /// Node name for an optional port reference, falling back to ground.
    ///
    /// Unknown ports silently become `"0"`.
    pub fn resolve(&self, port_id: Option<&str>) -> String {
        port_id
            .and_then(|id| self.get(id))
            .filter(|node| !node.is_empty())
            .unwrap_or(GROUND_NODE)
            .to_string()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.nodes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Sequential `N<k>` node names that never repeat a name already taken.
#[derive(Debug)]
struct NodeNamer {
    next: u128,
    taken: HashSet<String>,
}

impl NodeNamer {
    /// Start numbering above every `N<digits>` name already in use.
    fn above(taken: HashSet<String>) -> Self {
        let highest = taken.iter().filter_map(|name| auto_node_number(name)).max();
        Self {
            next: highest.map_or(1, |n| n.saturating_add(1)),
            taken,
        }
    }

    fn fresh(&mut self) -> String {
        loop {
            let name = format!("N{}", self.next);
            // Past u128::MAX numbering restarts at 1, still skipping taken names
            self.next = self.next.checked_add(1).unwrap_or(1);
            if !self.taken.contains(&name) {
                return name;
            }
        }
    }
}

/// The `<digits>` of a name shaped like `N<digits>` (any case).
///
/// Suffixes too large for `u128` are `None`: no generated name can equal them.
fn auto_node_number(name: &str) -> Option<u128> {
    let digits = name.strip_prefix('N').or_else(|| name.strip_prefix('n'))?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Build the node map for every port in the graph.
pub fn build_node_map(
    graph: &CircuitGraph,
    resolver: &dyn ConnectivityResolver,
    floating_ports: FloatingPortPolicy,
) -> NodeMap {
    let mut net_names: HashMap<NetId, String> = HashMap::new();
    let mut port_names: HashMap<String, String> = HashMap::new();

    for net in ground_nets(graph, resolver) {
        net_names.insert(net, GROUND_NODE.to_string());
    }

    // Probe names already bound to a node
    let mut claimed: HashSet<String> = HashSet::new();

    for probe in graph.simulation_voltage_probes() {
        let Some(name) = probe.display_name() else {
            continue;
        };
        if !probe.is_single_ended() {
            continue;
        }
        let name = sanitize_identifier(Some(name), "N");
        let net = probe
            .signal_port_id()
            .and_then(|id| resolver.net_of(id))
            .or_else(|| probe.signal_net_id().and_then(|id| resolver.net_of(id)));

        let seeded = if claimed.contains(&name) {
            debug!(probe = %name, "probe name already in use, not seeding");
            false
        } else {
            match (net, probe.signal_port_id()) {
                (Some(net), _) => seed(&mut net_names, net, &name),
                (None, Some(port_id)) => seed(&mut port_names, port_id.to_string(), &name),
                (None, None) => false,
            }
        };
        if seeded {
            claimed.insert(name);
        }
    }

    let mut namer = NodeNamer::above(claimed);

    let mut nodes = HashMap::new();

    for port in graph.source_ports() {
        let port_id = &port.source_port_id;
        if let Some(name) = port_names.get(port_id) {
            nodes.insert(port_id.clone(), name.clone());
            continue;
        }
        if let Some(net) = resolver.net_of(port_id) {
            let name = net_names.entry(net).or_insert_with(|| namer.fresh()).clone();
            trace!(port = %port_id, %net, node = %name, "assigned node");
            nodes.insert(port_id.clone(), name);
        }
    }

    for port in graph.source_ports() {
        if nodes.contains_key(&port.source_port_id) {
            continue;
        }
        let name = match floating_ports {
            FloatingPortPolicy::Unique => namer.fresh(),
            FloatingPortPolicy::Ground => GROUND_NODE.to_string(),
        };
        trace!(port = %port.source_port_id, node = %name, "assigned floating port");
        nodes.insert(port.source_port_id.clone(), name);
    }

    NodeMap { nodes }
}

/// Bind `name` to `key` unless the key is already named.
fn seed<K: Hash + Eq>(names: &mut HashMap<K, String>, key: K, name: &str) -> bool {
    match names.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(name.to_string());
            true
        }
        Entry::Occupied(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::ConnectivityMap;
    use serde_json::json;

    fn node_map(value: serde_json::Value) -> NodeMap {
        node_map_with(value, FloatingPortPolicy::Unique)
    }

    fn node_map_with(value: serde_json::Value, policy: FloatingPortPolicy) -> NodeMap {
        let graph = CircuitGraph::from_json_value(value).unwrap();
        let connectivity = ConnectivityMap::from_graph(&graph);
        build_node_map(&graph, &connectivity, policy)
    }

    fn port(id: &str) -> serde_json::Value {
        json!({ "type": "source_port", "source_port_id": id, "name": id })
    }

    fn trace(ports: &[&str], nets: &[&str]) -> serde_json::Value {
        json!({
            "type": "source_trace",
            "connected_source_port_ids": ports,
            "connected_source_net_ids": nets,
        })
    }

    #[test]
    fn test_floating_ports_are_distinct() {
        let map = node_map(json!([
            port("a"),
            port("b"),
            port("c"),
            port("d"),
            trace(&["b", "c"], &[]),
        ]));
        assert_eq!(map.get("b"), Some("N1"));
        assert_eq!(map.get("c"), Some("N1"));
        assert_eq!(map.get("a"), Some("N2"));
        assert_eq!(map.get("d"), Some("N3"));
    }

    #[test]
    fn test_floating_ports_to_ground() {
        let map = node_map_with(
            json!([port("a"), port("b"), port("c"), trace(&["b", "c"], &[])]),
            FloatingPortPolicy::Ground,
        );
        assert_eq!(map.get("a"), Some("0"));
        assert_eq!(map.get("b"), Some("N1"));
    }

    #[test]
    fn test_gnd_named_net_propagates() {
        let map = node_map(json!([
            port("a"),
            port("b"),
            port("c"),
            { "type": "source_net", "source_net_id": "net_gnd", "name": "AGND" },
            trace(&["a"], &["net_gnd"]),
            trace(&["a", "b"], &[]),
        ]));
        assert_eq!(map.get("a"), Some("0"));
        assert_eq!(map.get("b"), Some("0"));
        assert_eq!(map.get("c"), Some("N1"));
    }

    #[test]
    fn test_gnd_named_port() {
        let map = node_map(json!([
            port("GND"),
            port("x"),
            trace(&["GND", "x"], &[]),
        ]));
        assert_eq!(map.get("x"), Some("0"));
    }

    #[test]
    fn test_source_negative_terminal_is_ground() {
        let map = node_map(json!([
            port("p"),
            port("n"),
            port("load"),
            trace(&["p"], &[]),
            trace(&["n", "load"], &[]),
            {
                "type": "simulation_voltage_source",
                "simulation_voltage_source_id": "V1",
                "positive_source_port_id": "p",
                "negative_source_port_id": "n",
                "voltage": 5,
            },
        ]));
        assert_eq!(map.get("n"), Some("0"));
        assert_eq!(map.get("load"), Some("0"));
        assert_eq!(map.get("p"), Some("N1"));
    }

    #[test]
    fn test_probe_names_seed_nets() {
        let map = node_map(json!([
            port("a"),
            port("b"),
            port("c"),
            trace(&["a", "b"], &[]),
            trace(&["c"], &[]),
            { "type": "simulation_voltage_probe", "name": "VP_OUT", "signal_input_source_port_id": "b" },
        ]));
        assert_eq!(map.get("a"), Some("VP_OUT"));
        assert_eq!(map.get("b"), Some("VP_OUT"));
        assert_eq!(map.get("c"), Some("N1"));
    }

    #[test]
    fn test_probe_name_collision_avoided() {
        let map = node_map(json!([
            port("a"),
            port("b"),
            port("c"),
            trace(&["a"], &[]),
            trace(&["b"], &[]),
            { "type": "simulation_voltage_probe", "name": "N3", "signal_input_source_port_id": "a" },
        ]));
        assert_eq!(map.get("a"), Some("N3"));
        assert_eq!(map.get("b"), Some("N4"));
        assert_eq!(map.get("c"), Some("N5"));
    }

    #[test]
    fn test_probe_on_floating_port() {
        let map = node_map(json!([
            port("a"),
            { "type": "simulation_voltage_probe", "name": "n7", "signal_input_source_port_id": "a" },
            port("b"),
        ]));
        assert_eq!(map.get("a"), Some("n7"));
        assert_eq!(map.get("b"), Some("N8"));
    }

    #[test]
    fn test_differential_probe_does_not_seed() {
        let map = node_map(json!([
            port("a"),
            port("b"),
            trace(&["a"], &[]),
            trace(&["b"], &[]),
            {
                "type": "simulation_voltage_probe",
                "name": "VDIFF",
                "signal_input_source_port_id": "a",
                "reference_input_source_port_id": "b",
            },
        ]));
        assert_eq!(map.get("a"), Some("N1"));
        assert_eq!(map.get("b"), Some("N2"));
    }

    #[test]
    fn test_ground_wins_over_probe_name() {
        let map = node_map(json!([
            port("gnd"),
            trace(&["gnd"], &[]),
            { "type": "simulation_voltage_probe", "name": "VP_GND", "signal_input_source_port_id": "gnd" },
        ]));
        assert_eq!(map.get("gnd"), Some("0"));
    }

    #[test]
    fn test_resolve_falls_back_to_ground() {
        let map = node_map(json!([port("a")]));
        assert_eq!(map.resolve(Some("a")), "N1");
        assert_eq!(map.resolve(Some("missing")), "0");
        assert_eq!(map.resolve(None), "0");
    }

    #[test]
    fn test_auto_node_number() {
        assert_eq!(auto_node_number("N12"), Some(12));
        assert_eq!(auto_node_number("n3"), Some(3));
        assert_eq!(auto_node_number("N"), None);
        assert_eq!(auto_node_number("NET1"), None);
        assert_eq!(auto_node_number("VP_N3"), None);
        assert_eq!(auto_node_number("N18446744073709551615"), Some(u64::MAX as u128));
        assert_eq!(auto_node_number("N9999999999999999999999999999999999999999"), None);
    }

    #[test]
    fn test_repeated_probe_name_does_not_merge_nets() {
        let map = node_map(json!([
            port("a"),
            port("b"),
            trace(&["a"], &[]),
            trace(&["b"], &[]),
            { "type": "simulation_voltage_probe", "name": "VOUT", "signal_input_source_port_id": "a" },
            { "type": "simulation_voltage_probe", "name": "VOUT", "signal_input_source_port_id": "b" },
        ]));
        assert_eq!(map.get("a"), Some("VOUT"));
        assert_eq!(map.get("b"), Some("N1"));
    }

    #[test]
    fn test_repeated_probe_name_on_floating_ports() {
        let map = node_map(json!([
            port("a"),
            port("b"),
            { "type": "simulation_voltage_probe", "name": "VOUT", "signal_input_source_port_id": "a" },
            { "type": "simulation_voltage_probe", "name": "VOUT", "signal_input_source_port_id": "b" },
        ]));
        assert_eq!(map.get("a"), Some("VOUT"));
        assert_eq!(map.get("b"), Some("N1"));
    }

    #[test]
    fn test_probe_number_at_u64_max() {
        let map = node_map(json!([
            port("a"),
            port("b"),
            port("c"),
            trace(&["a"], &[]),
            trace(&["b"], &[]),
            { "type": "simulation_voltage_probe", "name": "N18446744073709551615", "signal_input_source_port_id": "a" },
        ]));
        assert_eq!(map.get("a"), Some("N18446744073709551615"));
        assert_eq!(map.get("b"), Some("N18446744073709551616"));
        assert_eq!(map.get("c"), Some("N18446744073709551617"));
    }

    #[test]
    fn test_probe_number_at_u128_max_skips_taken_name() {
        let map = node_map(json!([
            port("a"),
            port("b"),
            trace(&["a"], &[]),
            trace(&["b"], &[]),
            {
                "type": "simulation_voltage_probe",
                "name": "N340282366920938463463374607431768211455",
                "signal_input_source_port_id": "a",
            },
        ]));
        assert_eq!(map.get("a"), Some("N340282366920938463463374607431768211455"));
        assert_eq!(map.get("b"), Some("N1"));
    }
}
