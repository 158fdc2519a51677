pub mod circulation;
pub mod edmonds_karp;

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::network::{EdgeId, FlowNetwork};

/// The outcome of a max flow run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaxFlowResult<Amount> {
    /// Total flow pushed from the source into the sink.
    pub value: Amount,
    /// Edges carrying flow, in the order they first received it.
    pub commits: Vec<EdgeId>,
}

/// The max flow algorithm.
pub trait MaxFlow {
    type TokenId;
    type Amount;
    type Error: Debug;

    /// Run the algorithm over `network`, leaving the final flow assignment on its edges.
    fn max_flow(
        &mut self,
        network: &mut FlowNetwork<Self::TokenId>,
        source: usize,
        sink: usize,
    ) -> Result<MaxFlowResult<Self::Amount>, Self::Error>;
}
