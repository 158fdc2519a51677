use alloc::format;
use alloc::string::String;

use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::address_book::AddressBook;
use crate::id::Id;
use crate::transfer::TransferStep;

/// Renders transfer steps as a Graphviz digraph, one edge per step labelled with its value and
/// token owner.
pub fn transfers_to_dot<AccountId, TokenId>(steps: &[TransferStep<AccountId, TokenId>]) -> String
where
    AccountId: Id + core::fmt::Display,
    TokenId: core::fmt::Display,
{
    let accounts: AddressBook<&AccountId> = steps
        .iter()
        .flat_map(|s| [s.from(), s.to()])
        .collect();

    let mut graph = DiGraph::<String, String>::with_capacity(accounts.len(), steps.len());
    for idx in 0..accounts.len() {
        graph.add_node(format!("{}", accounts[idx]));
    }
    for step in steps {
        let from = accounts.index_of(&step.from());
        let to = accounts.index_of(&step.to());
        if let (Some(from), Some(to)) = (from, to) {
            graph.add_edge(
                NodeIndex::new(from),
                NodeIndex::new(to),
                format!("{} x {}", step.value(), step.token_owner()),
            );
        }
    }

    format!("{}", Dot::new(&graph))
}
