use alloc::vec;
use alloc::vec::Vec;

use num_traits::Zero;

use crate::network::{EdgeId, FlowNetwork};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Removes every cycle from the flow assignment of `network` by lowering the flow along it by
/// its smallest edge flow.
///
/// The flow value is unchanged (source and sink never lie on a cycle) and the remaining flow is
/// acyclic, which is what lets a transfer plan be executed in order. Returns the number of
/// cycles cancelled.
pub fn cancel_circulations<TokenId>(network: &mut FlowNetwork<TokenId>) -> usize {
    let mut cancelled = 0;
    while let Some(cycle) = find_flow_cycle(network) {
        let amount = match cycle.iter().map(|id| network.edge(*id).flow()).min() {
            Some(amount) => amount.clone(),
            None => break,
        };
        log::trace!("cancelling {} around a cycle of {} edges", amount, cycle.len());

        for id in cycle {
            let from = network.edge(id).from();
            network.edge_mut(id).add_residual_flow_to(from, &amount);
        }
        cancelled += 1;
    }

    if cancelled > 0 {
        log::debug!("cancelled {cancelled} flow cycles");
    }
    cancelled
}

// Depth-first search over edges carrying flow, nodes and edges in insertion order.
fn find_flow_cycle<TokenId>(network: &FlowNetwork<TokenId>) -> Option<Vec<EdgeId>> {
    let node_count = network.node_count();
    let mut color = vec![Color::White; node_count];
    let mut parent: Vec<Option<EdgeId>> = vec![None; node_count];

    for root in 0..node_count {
        if color[root] != Color::White {
            continue;
        }
        color[root] = Color::Gray;
        let mut stack = vec![(root, 0usize)];

        while let Some(top) = stack.last_mut() {
            let (v, pos) = *top;
            top.1 += 1;

            let adjacency = network.adjacency(v);
            if pos >= adjacency.len() {
                color[v] = Color::Black;
                stack.pop();
                continue;
            }

            let id = adjacency[pos];
            let edge = network.edge(id);
            if edge.from() != v || edge.flow().is_zero() {
                continue;
            }

            let w = edge.to();
            match color[w] {
                Color::White => {
                    color[w] = Color::Gray;
                    parent[w] = Some(id);
                    stack.push((w, 0));
                }
                Color::Gray => {
                    // w is on the current search path, walk back to it
                    let mut cycle = vec![id];
                    let mut node = v;
                    while node != w {
                        match parent[node] {
                            Some(pid) => {
                                cycle.push(pid);
                                node = network.edge(pid).from();
                            }
                            None => break,
                        }
                    }
                    cycle.reverse();
                    return Some(cycle);
                }
                Color::Black => {}
            }
        }
    }

    None
}
