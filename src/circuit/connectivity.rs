//! Port/net connectivity.
//!
//! Traces join ports and named nets into electrical equivalence classes.
//! [`ConnectivityMap`] computes those classes with a union-find over every id
//! mentioned by a trace; ids that no trace mentions have no net.

use std::collections::HashMap;

use super::graph::CircuitGraph;
use super::types::{NetId, SourceTrace};

/// Answers "which net is this port (or source net) on?".
pub trait ConnectivityResolver {
    /// Net containing the given port id or source-net id, if any.
    fn net_of(&self, id: &str) -> Option<NetId>;
}

/// Connectivity computed from the traces of a circuit.
#[derive(Debug, Clone, Default)]
pub struct ConnectivityMap {
    nets: HashMap<String, NetId>,
}

impl ConnectivityMap {
    /// Build the map from every trace in the graph.
    pub fn from_graph(graph: &CircuitGraph) -> Self {
        Self::from_traces(graph.source_traces())
    }

    pub fn from_traces<'a>(traces: impl IntoIterator<Item = &'a SourceTrace>) -> Self {
        let mut sets = DisjointSets::default();

        for trace in traces {
            let mut ids = trace
                .connected_source_port_ids
                .iter()
                .chain(trace.connected_source_net_ids.iter());
            let Some(first) = ids.next() else {
                continue;
            };
            let first = sets.index_of(first);
            for id in ids {
                let other = sets.index_of(id);
                sets.union(first, other);
            }
        }

        let ids = std::mem::take(&mut sets.ids);
        let nets = ids
            .into_iter()
            .map(|(id, index)| (id, NetId(sets.find(index))))
            .collect();

        Self { nets }
    }

    /// Number of ids (ports and nets) that belong to some net.
    pub fn len(&self) -> usize {
        self.nets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nets.is_empty()
    }
}

impl ConnectivityResolver for ConnectivityMap {
    fn net_of(&self, id: &str) -> Option<NetId> {
        self.nets.get(id).copied()
    }
}

/// A fixed id-to-net table, for callers that already know their nets.
impl ConnectivityResolver for HashMap<String, NetId> {
    fn net_of(&self, id: &str) -> Option<NetId> {
        self.get(id).copied()
    }
}

#[derive(Debug, Default)]
struct DisjointSets {
    ids: HashMap<String, usize>,
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSets {
    fn index_of(&mut self, id: &str) -> usize {
        if let Some(&index) = self.ids.get(id) {
            return index;
        }
        let index = self.parent.len();
        self.parent.push(index);
        self.rank.push(0);
        self.ids.insert(id.to_string(), index);
        index
    }

    fn find(&mut self, mut index: usize) -> usize {
        let mut root = index;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Path compression
        while self.parent[index] != root {
            let next = self.parent[index];
            self.parent[index] = root;
            index = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }
}
