use displaydoc::Display;

use crate::amount::Amount;

#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum Error {
    /// Invalid network topology: {0}
    InvalidTopology(TopologyError),
    /// Invalid pathfinder configuration: {0}
    InvalidConfig(ConfigError),
    /// Insufficient flow: at most {max_flow} can be transferred, {requested} was requested
    InsufficientFlow { max_flow: Amount, requested: Amount },
    /// Transfer plan needs {steps} steps, but only {max_steps} are allowed
    StepLimitExceeded { steps: usize, max_steps: usize },
    /// Max flow algorithm did not terminate within {limit} augmentations
    IterationLimitExceeded { limit: usize },
    /// Transfer step {step} spends more than its sender holds at that point
    UnfundedStep { step: usize },
    /// Transfer plan does not move exactly its flow value from source to sink
    FlowNotConserved,
}

#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum TopologyError {
    /// node {node} is out of range for a network of {node_count} nodes
    NodeOutOfRange { node: usize, node_count: usize },
    /// duplicate edge {from} -> {to} for the same token owner
    DuplicateEdge { from: usize, to: usize },
    /// edge from node {0} to itself
    SelfLoop(usize),
}

#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum ConfigError {
    /// the maximum number of transfer steps must be positive
    ZeroMaxSteps,
    /// the bottleneck seed must be positive
    ZeroBottleneckSeed,
    /// the augmentation limit must be positive
    ZeroAugmentationLimit,
}

impl From<TopologyError> for Error {
    fn from(e: TopologyError) -> Self {
        Self::InvalidTopology(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::InvalidConfig(e)
    }
}
