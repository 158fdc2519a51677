use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::amount::{self, Amount};
use crate::edge::FlowEdge;
use crate::error::TopologyError;
use crate::id::Id;

pub type EdgeId = EdgeIndex<u32>;

/// An edge of the capacity network, in terms of dense node indices.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeSpec<TokenId> {
    pub from: usize,
    pub to: usize,
    pub token_owner: TokenId,
    #[serde(with = "amount::decimal")]
    pub capacity: Amount,
}

impl<TokenId> EdgeSpec<TokenId> {
    pub fn new(from: usize, to: usize, token_owner: TokenId, capacity: Amount) -> Self {
        Self {
            from,
            to,
            token_owner,
            capacity,
        }
    }
}

/// The flow network built from one snapshot of the trust graph.
///
/// Edges are stored once, in the arena of a `petgraph` graph. Every node keeps the ids of the
/// edges touching it (in both directions) in insertion order, which is the order the solver
/// explores them in.
#[derive(Clone, Debug)]
pub struct FlowNetwork<TokenId> {
    graph: DiGraph<(), FlowEdge<TokenId>>,
    adjacency: Vec<Vec<EdgeId>>,
}

impl<TokenId: Id> FlowNetwork<TokenId> {
    /// Builds a network of `node_count` nodes.
    ///
    /// Rejects edges with an out-of-range endpoint, self-loops and more than one edge per
    /// `(from, to, token_owner)`.
    pub fn new<I>(node_count: usize, edges: I) -> Result<Self, TopologyError>
    where
        I: IntoIterator<Item = EdgeSpec<TokenId>>,
    {
        let edges = edges.into_iter();
        let mut graph = DiGraph::with_capacity(node_count, edges.size_hint().0);
        let mut adjacency = Vec::with_capacity(node_count);
        for _ in 0..node_count {
            graph.add_node(());
            adjacency.push(Vec::new());
        }

        let mut seen = BTreeSet::new();
        for EdgeSpec {
            from,
            to,
            token_owner,
            capacity,
        } in edges
        {
            check_node(from, node_count)?;
            check_node(to, node_count)?;
            if from == to {
                return Err(TopologyError::SelfLoop(from));
            }
            if !seen.insert((from, to, token_owner.clone())) {
                return Err(TopologyError::DuplicateEdge { from, to });
            }

            let id = graph.add_edge(
                NodeIndex::new(from),
                NodeIndex::new(to),
                FlowEdge::new(from, to, token_owner, capacity),
            );
            adjacency[from].push(id);
            adjacency[to].push(id);
        }

        log::trace!(
            "built flow network with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(Self { graph, adjacency })
    }
}

impl<TokenId> FlowNetwork<TokenId> {
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn check_node(&self, node: usize) -> Result<(), TopologyError> {
        check_node(node, self.node_count())
    }

    pub fn edge(&self, id: EdgeId) -> &FlowEdge<TokenId> {
        &self.graph[id]
    }

    pub(crate) fn edge_mut(&mut self, id: EdgeId) -> &mut FlowEdge<TokenId> {
        &mut self.graph[id]
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &FlowEdge<TokenId>)> + '_ {
        self.graph
            .edge_indices()
            .map(move |id| (id, &self.graph[id]))
    }

    /// Ids of the edges touching `node`, in insertion order.
    ///
    /// Panics if `node` is out of range.
    pub fn adjacency(&self, node: usize) -> &[EdgeId] {
        &self.adjacency[node]
    }

    /// The first edge (in insertion order) connecting `v` and `w`, in either direction.
    pub fn find_edge(&self, v: usize, w: usize) -> Option<EdgeId> {
        self.adjacency(v)
            .iter()
            .copied()
            .find(|id| self.graph[*id].other(v) == w)
    }

    /// Total flow entering and leaving `node`.
    pub fn flow_balance(&self, node: usize) -> (Amount, Amount) {
        self.adjacency(node).iter().fold(
            (Amount::default(), Amount::default()),
            |(mut inflow, mut outflow), id| {
                let edge = &self.graph[*id];
                if edge.to() == node {
                    inflow += edge.flow();
                } else {
                    outflow += edge.flow();
                }
                (inflow, outflow)
            },
        )
    }
}

fn check_node(node: usize, node_count: usize) -> Result<(), TopologyError> {
    if node < node_count {
        Ok(())
    } else {
        Err(TopologyError::NodeOutOfRange { node, node_count })
    }
}
