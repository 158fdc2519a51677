//! Transitive transfer pathfinding over a mutual-credit trust network.
//!
//! Given one snapshot of the network (per-edge capacities already derived from trust limits and
//! balances), compute the maximum value that can move from a sender to a receiver and the
//! ordered list of elementary token transfers realizing it.
//!
//! ```
//! use trustflow::{find_transfer_path, Amount, Config, SimpleEdge};
//!
//! let edges = vec![
//!     SimpleEdge::new("alice", "bob", "alice", Amount::from(10u32)),
//!     SimpleEdge::new("bob", "carol", "bob", Amount::from(7u32)),
//! ];
//! let plan = find_transfer_path(edges, &"alice", &"carol", &Amount::from(5u32), Config::default())
//!     .unwrap();
//! assert_eq!(plan.max_flow_value, Amount::from(7u32));
//! assert_eq!(plan.transfer_steps.len(), 2);
//! ```
#![no_std]
#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    rust_2018_idioms
)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod address_book;
pub mod algo;
pub mod amount;
pub mod capacity;
pub mod config;
pub mod dot;
pub mod edge;
pub mod error;
pub mod id;
pub mod impls;
pub mod network;
pub mod transfer;

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

pub use crate::address_book::AddressBook;
pub use crate::algo::edmonds_karp::{min_cut, EdmondsKarp};
pub use crate::algo::{MaxFlow, MaxFlowResult};
pub use crate::amount::Amount;
pub use crate::capacity::{derive_capacity, CapacityEdge, SimpleEdge, TrustEdge};
pub use crate::config::Config;
pub use crate::dot::transfers_to_dot;
pub use crate::edge::FlowEdge;
pub use crate::error::{ConfigError, Error, TopologyError};
pub use crate::id::Id;
pub use crate::impls::address_map::AddressMappedPathfinder;
pub use crate::impls::default::DefaultPathfinder;
pub use crate::network::{EdgeId, EdgeSpec, FlowNetwork};
pub use crate::transfer::{TransferPlan, TransferStep};

/// A snapshot of the capacity network in terms of dense node indices `0..node_count`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot<TokenId> {
    pub node_count: usize,
    pub edges: Vec<EdgeSpec<TokenId>>,
}

/// Finds transfer plans between two accounts of a snapshot.
pub trait Pathfinder {
    type AccountId;
    type TokenId;
    type Edges;
    type Error;

    /// Computes the max flow from `source` to `sink` and the transfer steps realizing it.
    ///
    /// Fails with [`Error::InsufficientFlow`] if the max flow is below `value`, and with
    /// [`Error::StepLimitExceeded`] if the plan needs more steps than configured.
    fn find_path(
        &mut self,
        edges: Self::Edges,
        source: &Self::AccountId,
        sink: &Self::AccountId,
        value: &Amount,
    ) -> Result<TransferPlan<Self::AccountId, Self::TokenId>, Self::Error>;

    /// Replays `plan` and checks it is executable in order and moves exactly its flow value
    /// from `source` to `sink`.
    fn check(
        &self,
        plan: &TransferPlan<Self::AccountId, Self::TokenId>,
        source: &Self::AccountId,
        sink: &Self::AccountId,
    ) -> Result<(), Self::Error>;
}

/// One-shot pathfinding over an address-keyed snapshot.
pub fn find_transfer_path<E>(
    edges: Vec<E>,
    source: &E::AccountId,
    sink: &E::AccountId,
    value: &Amount,
    config: Config,
) -> Result<TransferPlan<E::AccountId, E::TokenId>, Error>
where
    E: CapacityEdge,
    E::AccountId: Id,
    E::TokenId: Id,
{
    AddressMappedPathfinder::<_, E>::wrapping(DefaultPathfinder::<E::TokenId>::new(config))
        .find_path(edges, source, sink, value)
}
