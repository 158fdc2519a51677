use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::min;
use core::marker::PhantomData;

use num_traits::Zero;

use crate::algo::{MaxFlow, MaxFlowResult};
use crate::amount::{max_token_amount, Amount};
use crate::config::Config;
use crate::error::Error;
use crate::id::Id;
use crate::network::{EdgeId, FlowNetwork};

/// Edmonds-Karp max flow: augment along shortest (in hops) residual paths until none is left.
///
/// Among paths of equal length, the one found first by a breadth-first search that visits
/// adjacent edges in insertion order wins, so identical networks always yield identical flows.
#[derive(Clone, Debug)]
pub struct EdmondsKarp<TokenId> {
    bottleneck_seed: Amount,
    max_augmentations: Option<usize>,
    target: Option<Amount>,
    _phantom: PhantomData<TokenId>,
}

impl<TokenId> EdmondsKarp<TokenId> {
    /// `bottleneck_seed` is the amount treated as unbounded when scanning a path for its
    /// bottleneck; no single augmentation pushes more than this.
    pub fn new(bottleneck_seed: Amount) -> Self {
        Self {
            bottleneck_seed,
            max_augmentations: None,
            target: None,
            _phantom: PhantomData,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let algo = Self::new(config.bottleneck_seed.clone());
        match config.max_augmentations {
            Some(limit) => algo.with_max_augmentations(limit),
            None => algo,
        }
    }

    /// Fail with [`Error::IterationLimitExceeded`] instead of augmenting more than `limit`
    /// times. Defaults to `V * E + 1`.
    ///
    /// Pushes cut short by the bottleneck seed are not counted, so capacities above the seed
    /// only cost extra rounds.
    pub fn with_max_augmentations(mut self, limit: usize) -> Self {
        self.max_augmentations = Some(limit);
        self
    }

    /// Stop augmenting once `target` has been reached, so the resulting flow never exceeds it.
    pub fn with_target(mut self, target: Amount) -> Self {
        self.target = Some(target);
        self
    }
}

impl<TokenId> Default for EdmondsKarp<TokenId> {
    fn default() -> Self {
        Self::new(max_token_amount())
    }
}

impl<TokenId: Id> MaxFlow for EdmondsKarp<TokenId> {
    type TokenId = TokenId;
    type Amount = Amount;
    type Error = Error;

    fn max_flow(
        &mut self,
        network: &mut FlowNetwork<TokenId>,
        source: usize,
        sink: usize,
    ) -> Result<MaxFlowResult<Amount>, Error> {
        network.check_node(source)?;
        network.check_node(sink)?;
        if source == sink {
            return Ok(MaxFlowResult {
                value: Amount::zero(),
                commits: vec![],
            });
        }

        let limit = self.max_augmentations.unwrap_or_else(|| {
            network
                .node_count()
                .saturating_mul(network.edge_count())
                .saturating_add(1)
        });

        let mut state = State::new(network, source, sink);
        let mut augmentations = 0;
        let mut clipped = 0usize;
        loop {
            let remaining = match &self.target {
                Some(target) if state.value >= *target => break,
                Some(target) => Some(target - &state.value),
                None => None,
            };
            if !state.search() {
                break;
            }

            // A push held back by the seed leaves the path open and is not one of the V * E
            // augmentations the guard bounds.
            let path = state.path();
            let bottleneck = state.bottleneck(&path);
            if bottleneck > self.bottleneck_seed {
                clipped += 1;
                state.augment(path, self.bottleneck_seed.clone(), remaining);
                continue;
            }
            if augmentations == limit {
                log::warn!("giving up after {limit} augmentations");
                return Err(Error::IterationLimitExceeded { limit });
            }
            augmentations += 1;
            state.augment(path, bottleneck, remaining);
        }

        log::debug!(
            "max flow {} -> {} = {} after {} augmentations ({} clipped by the seed)",
            source,
            sink,
            state.value,
            augmentations,
            clipped
        );

        Ok(state.into_result())
    }
}

struct State<'a, TokenId> {
    network: &'a mut FlowNetwork<TokenId>,
    source: usize,
    sink: usize,
    marked: Vec<bool>,
    edge_to: Vec<Option<EdgeId>>,
    committed: Vec<bool>,
    commits: Vec<EdgeId>,
    value: Amount,
}

impl<'a, TokenId> State<'a, TokenId> {
    fn new(network: &'a mut FlowNetwork<TokenId>, source: usize, sink: usize) -> Self {
        let node_count = network.node_count();
        let edge_count = network.edge_count();
        Self {
            network,
            source,
            sink,
            marked: vec![false; node_count],
            edge_to: vec![None; node_count],
            committed: vec![false; edge_count],
            commits: Vec::new(),
            value: Amount::zero(),
        }
    }

    // Returns true if the sink is reachable through the residual network.
    fn search(&mut self) -> bool {
        self.marked.iter_mut().for_each(|m| *m = false);
        self.edge_to.iter_mut().for_each(|e| *e = None);
        bfs(
            self.network,
            self.source,
            Some(self.sink),
            &mut self.marked,
            &mut self.edge_to,
        )
    }

    // The edges of the last path found, from source to sink, each paired with the node it
    // leads to.
    fn path(&self) -> Vec<(EdgeId, usize)> {
        let mut path = Vec::new();
        let mut node = self.sink;
        while let Some(id) = self.edge_to[node] {
            path.push((id, node));
            node = self.network.edge(id).other(node);
        }
        debug_assert_eq!(node, self.source);
        path.reverse();
        path
    }

    // The residual capacity of `path`, i.e. the most it can carry.
    fn bottleneck(&self, path: &[(EdgeId, usize)]) -> Amount {
        path.iter()
            .map(|(id, node)| self.network.edge(*id).residual_capacity_to(*node))
            .min()
            .unwrap_or_default()
    }

    fn augment(
        &mut self,
        path: Vec<(EdgeId, usize)>,
        amount: Amount,
        remaining: Option<Amount>,
    ) {
        let amount = match remaining {
            Some(remaining) => min(amount, remaining),
            None => amount,
        };
        log::trace!("augmenting {} along {} edges", amount, path.len());

        for (id, node) in path {
            let edge = self.network.edge_mut(id);
            edge.add_residual_flow_to(node, &amount);
            if edge.to() == node && !self.committed[id.index()] {
                self.committed[id.index()] = true;
                self.commits.push(id);
            }
        }
        self.value += amount;
    }

    fn into_result(self) -> MaxFlowResult<Amount> {
        MaxFlowResult {
            value: self.value,
            commits: self.commits,
        }
    }
}

fn bfs<TokenId>(
    network: &FlowNetwork<TokenId>,
    source: usize,
    sink: Option<usize>,
    marked: &mut [bool],
    edge_to: &mut [Option<EdgeId>],
) -> bool {
    let mut queue = VecDeque::new();
    marked[source] = true;
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        for &id in network.adjacency(v) {
            let edge = network.edge(id);
            let w = edge.other(v);
            if marked[w] || !edge.has_residual_capacity_to(w) {
                continue;
            }
            edge_to[w] = Some(id);
            marked[w] = true;
            if Some(w) == sink {
                return true;
            }
            queue.push_back(w);
        }
    }

    false
}

/// The edges leading from the part of the network still reachable from `source` through
/// residual capacity to the part that is not.
///
/// After a max flow run these edges form a minimum cut: they are all saturated and their
/// capacities add up to the flow value.
///
/// Panics if `source` is out of range.
pub fn min_cut<TokenId>(network: &FlowNetwork<TokenId>, source: usize) -> Vec<EdgeId> {
    let mut marked = vec![false; network.node_count()];
    let mut edge_to = vec![None; network.node_count()];
    bfs(network, source, None, &mut marked, &mut edge_to);

    network
        .edges()
        .filter(|(_, e)| marked[e.from()] && !marked[e.to()])
        .map(|(id, _)| id)
        .collect()
}
