use num_traits::Zero;
use trustflow::algo::circulation::cancel_circulations;
use trustflow::transfer::{replay, synthesize};
use trustflow::{
    find_transfer_path, min_cut, Amount, Config, DefaultPathfinder, EdgeSpec, EdmondsKarp,
    Error, FlowNetwork, MaxFlow, Pathfinder, SimpleEdge, Snapshot, TransferStep, TrustEdge,
};

const A: usize = 0;
const B: usize = 1;
const C: usize = 2;
const D: usize = 3;

fn amount(n: u64) -> Amount {
    Amount::from(n)
}

fn snapshot(node_count: usize, edges: &[(usize, usize, u64)]) -> Snapshot<usize> {
    Snapshot {
        node_count,
        edges: edges
            .iter()
            .map(|&(from, to, cap)| EdgeSpec::new(from, to, from, amount(cap)))
            .collect(),
    }
}

#[test]
fn disjoint_paths() {
    let edges = snapshot(4, &[(A, B, 10), (B, D, 10), (A, C, 5), (C, D, 5)]);
    let mut pathfinder = DefaultPathfinder::default();
    let plan = pathfinder.find_path(edges, &A, &D, &amount(15)).unwrap();

    assert_eq!(plan.max_flow_value, amount(15));
    assert_eq!(
        plan.transfer_steps,
        vec![
            TransferStep::new(A, B, amount(10), A),
            TransferStep::new(B, D, amount(10), B),
            TransferStep::new(A, C, amount(5), A),
            TransferStep::new(C, D, amount(5), C),
        ]
    );

    let delivered: Amount = plan
        .transfer_steps
        .iter()
        .filter(|s| *s.to() == D)
        .map(|s| s.value())
        .sum();
    assert_eq!(delivered, amount(15));
    assert_eq!(pathfinder.check(&plan, &A, &D), Ok(()));
}

#[test]
fn disconnected_graph() {
    let edges = snapshot(4, &[(A, B, 10), (C, D, 10)]);

    let mut network = FlowNetwork::new(edges.node_count, edges.edges.clone()).unwrap();
    let result = EdmondsKarp::default().max_flow(&mut network, A, D).unwrap();
    assert!(result.value.is_zero());
    assert_eq!(synthesize(&network, &result.commits, A), Ok(vec![]));

    let err = DefaultPathfinder::default()
        .find_path(edges, &A, &D, &amount(1))
        .unwrap_err();
    assert_eq!(
        err,
        Error::InsufficientFlow {
            max_flow: amount(0),
            requested: amount(1)
        }
    );
}

#[test]
fn zero_request_on_disconnected_graph_is_an_empty_plan() {
    let plan = DefaultPathfinder::default()
        .find_path(snapshot(2, &[]), &A, &B, &amount(0))
        .unwrap();
    assert!(plan.max_flow_value.is_zero());
    assert!(plan.transfer_steps.is_empty());
}

#[test]
fn large_capacities_stay_exact() {
    let max = trustflow::amount::max_token_amount();
    let near_max = &max - 1u32;
    let edges = Snapshot {
        node_count: 4,
        edges: vec![
            EdgeSpec::new(A, B, A, max.clone()),
            EdgeSpec::new(B, D, B, near_max.clone()),
            EdgeSpec::new(A, C, A, max.clone()),
            EdgeSpec::new(C, D, C, max.clone()),
        ],
    };

    let plan = DefaultPathfinder::default()
        .find_path(edges, &A, &D, &amount(1))
        .unwrap();

    assert_eq!(plan.max_flow_value, &near_max + &max);
    assert!(plan.max_flow_value > max);
    assert_eq!(plan.transfer_steps[0].value(), &near_max);
    assert_eq!(plan.transfer_steps[2].value(), &max);
}

#[test]
fn capacities_above_the_bottleneck_seed_are_routed_in_full() {
    let huge = Amount::from(1u32) << 258usize;
    let edges = Snapshot {
        node_count: 2,
        edges: vec![EdgeSpec::new(A, B, A, huge.clone())],
    };

    let plan = DefaultPathfinder::default()
        .find_path(edges, &A, &B, &amount(1))
        .unwrap();
    assert_eq!(plan.max_flow_value, huge);
    assert_eq!(plan.transfer_steps, vec![TransferStep::new(A, B, huge, A)]);
}

#[test]
fn step_limit_rejects_instead_of_truncating() {
    let edges = snapshot(6, &[(0, 1, 4), (1, 2, 4), (2, 3, 4), (3, 4, 4), (4, 5, 4)]);
    let mut pathfinder = DefaultPathfinder::new(Config::default().with_max_steps(3));
    let err = pathfinder
        .find_path(edges.clone(), &0, &5, &amount(4))
        .unwrap_err();
    assert_eq!(
        err,
        Error::StepLimitExceeded {
            steps: 5,
            max_steps: 3
        }
    );

    let mut pathfinder = DefaultPathfinder::new(Config::default().with_max_steps(5));
    let plan = pathfinder.find_path(edges, &0, &5, &amount(4)).unwrap();
    assert_eq!(plan.transfer_steps.len(), 5);
}

#[test]
fn max_flow_equals_known_min_cut() {
    // classic textbook network, min cut {1->3, 4->3, 4->5} = 12 + 7 + 4 = 23
    let edges = snapshot(
        6,
        &[
            (0, 1, 16),
            (0, 2, 13),
            (1, 2, 10),
            (2, 1, 4),
            (1, 3, 12),
            (3, 2, 9),
            (2, 4, 14),
            (4, 3, 7),
            (3, 5, 20),
            (4, 5, 4),
        ],
    );
    let mut network = FlowNetwork::new(edges.node_count, edges.edges).unwrap();
    let result = EdmondsKarp::default().max_flow(&mut network, 0, 5).unwrap();
    assert_eq!(result.value, amount(23));

    let cut: Vec<_> = min_cut(&network, 0)
        .into_iter()
        .map(|id| {
            let e = network.edge(id);
            (e.from(), e.to())
        })
        .collect();
    assert_eq!(cut, vec![(1, 3), (4, 3), (4, 5)]);
}

#[test]
fn bidirectional_trust_is_routed_without_cycles() {
    // alice <-> bob trust each other through their own tokens
    let edges = vec![
        SimpleEdge::new("alice", "bob", "alice", amount(5)),
        SimpleEdge::new("bob", "alice", "bob", amount(5)),
        SimpleEdge::new("bob", "carol", "bob", amount(3)),
        SimpleEdge::new("alice", "carol", "alice", amount(1)),
    ];
    let plan =
        find_transfer_path(edges, &"alice", &"carol", &amount(4), Config::default()).unwrap();

    assert_eq!(plan.max_flow_value, amount(4));
    assert!(plan.transfer_steps.iter().all(|s| *s.to() != "alice"));
    assert!(replay(&plan.transfer_steps, &"alice").is_ok());
}

#[test]
fn capacities_come_from_trust_and_balance() {
    let edges = vec![
        TrustEdge {
            from: "alice",
            to: "bob",
            token_owner: "alice",
            trust_limit: amount(100),
            spendable_balance: amount(30),
        },
        TrustEdge {
            from: "bob",
            to: "carol",
            token_owner: "bob",
            trust_limit: amount(20),
            spendable_balance: amount(500),
        },
    ];
    let plan =
        find_transfer_path(edges, &"alice", &"carol", &amount(20), Config::default()).unwrap();
    assert_eq!(plan.max_flow_value, amount(20));
}

#[test]
fn identical_input_gives_identical_plans() {
    let edges = snapshot(
        5,
        &[
            (0, 1, 3),
            (0, 2, 3),
            (1, 2, 2),
            (2, 1, 2),
            (1, 3, 2),
            (2, 3, 2),
            (1, 4, 2),
            (3, 4, 5),
        ],
    );
    let first = DefaultPathfinder::default()
        .find_path(edges.clone(), &0, &4, &amount(1))
        .unwrap();
    let second = DefaultPathfinder::default()
        .find_path(edges, &0, &4, &amount(1))
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn cycles_left_by_augmentation_are_cancelled_before_synthesis() {
    // s=0 a=1 b=2 t=3 x=4 y=5; a and b are linked both ways through different tokens, so the
    // second augmenting path takes b -> a forward instead of cancelling a -> b
    let edges = vec![
        EdgeSpec::new(0, 1, 'a', amount(1)),
        EdgeSpec::new(0, 4, 's', amount(1)),
        EdgeSpec::new(2, 1, 'c', amount(1)),
        EdgeSpec::new(1, 2, 'b', amount(1)),
        EdgeSpec::new(4, 2, 'x', amount(1)),
        EdgeSpec::new(2, 3, 'b', amount(1)),
        EdgeSpec::new(1, 5, 'a', amount(1)),
        EdgeSpec::new(5, 3, 'y', amount(1)),
    ];
    let mut network = FlowNetwork::new(6, edges).unwrap();
    let result = EdmondsKarp::default().max_flow(&mut network, 0, 3).unwrap();
    assert_eq!(result.value, amount(2));
    assert_eq!(result.commits.len(), 8);

    assert_eq!(cancel_circulations(&mut network), 1);
    let steps = synthesize(&network, &result.commits, 0).unwrap();
    assert_eq!(steps.len(), 6);
    assert!(steps.iter().all(|s| *s.token_owner() != 'c'));

    let balances = replay(&steps, &0).unwrap();
    assert_eq!(balances[&3], amount(2));
    assert!(balances
        .iter()
        .filter(|(node, _)| **node != 3)
        .all(|(_, balance)| balance.is_zero()));
}

#[test]
fn plans_serialize_amounts_as_decimal_strings() {
    let plan = DefaultPathfinder::default()
        .find_path(snapshot(2, &[(0, 1, 7)]), &0, &1, &amount(7))
        .unwrap();
    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["max_flow_value"], "7");
    assert_eq!(json["transfer_steps"][0]["value"], "7");

    let back: trustflow::TransferPlan<usize, usize> = serde_json::from_value(json).unwrap();
    assert_eq!(back, plan);
}
