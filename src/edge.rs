use num_traits::Zero;

use crate::amount::Amount;

/// A directed, capacitated edge of the flow network.
///
/// The edge is reachable from the adjacency lists of both endpoints, so the flow it carries can
/// be pushed forward (towards `to`) or cancelled (towards `from`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowEdge<TokenId> {
    from: usize,
    to: usize,
    token_owner: TokenId,
    capacity: Amount,
    flow: Amount,
}

impl<TokenId> FlowEdge<TokenId> {
    pub fn new(from: usize, to: usize, token_owner: TokenId, capacity: Amount) -> Self {
        Self {
            from,
            to,
            token_owner,
            capacity,
            flow: Amount::zero(),
        }
    }

    pub fn from(&self) -> usize {
        self.from
    }

    pub fn to(&self) -> usize {
        self.to
    }

    pub fn token_owner(&self) -> &TokenId {
        &self.token_owner
    }

    pub fn capacity(&self) -> &Amount {
        &self.capacity
    }

    pub fn flow(&self) -> &Amount {
        &self.flow
    }

    /// The endpoint opposite to `node`.
    pub fn other(&self, node: usize) -> usize {
        debug_assert!(node == self.from || node == self.to);
        if node == self.from {
            self.to
        } else {
            self.from
        }
    }

    /// The amount that can still be moved towards `node`: the cancellable flow when `node` is
    /// the tail, the unused capacity otherwise.
    pub fn residual_capacity_to(&self, node: usize) -> Amount {
        if node == self.from {
            self.flow.clone()
        } else {
            &self.capacity - &self.flow
        }
    }

    /// Same as `residual_capacity_to(node) > 0`, without allocating.
    pub fn has_residual_capacity_to(&self, node: usize) -> bool {
        if node == self.from {
            !self.flow.is_zero()
        } else {
            self.flow < self.capacity
        }
    }

    /// Moves `delta` towards `node`.
    ///
    /// The caller must never exceed `residual_capacity_to(node)`.
    pub fn add_residual_flow_to(&mut self, node: usize, delta: &Amount) {
        debug_assert!(*delta <= self.residual_capacity_to(node));
        if node == self.from {
            self.flow -= delta;
        } else if node == self.to {
            self.flow += delta;
        }
        debug_assert!(self.flow <= self.capacity);
    }
}
