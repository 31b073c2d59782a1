use hns_registry::{Registry, RegistryError};
use hns_types::{Node, Principal};
use proptest::prelude::*;
use std::collections::HashMap;

// Property-based tests for the ownership tree.
// A plain map model tracks the expected owner of every node while random
// operation streams from a handful of principals run against the registry.

const LABELS: [&str; 3] = ["eth", "test", "alpha"];

#[derive(Debug, Clone)]
enum Op {
    SetOwner {
        caller: usize,
        node: usize,
        new_owner: usize,
    },
    SetSubnodeOwner {
        caller: usize,
        parent: usize,
        label: usize,
        new_owner: usize,
    },
    SetTtl {
        caller: usize,
        node: usize,
        ttl: u64,
    },
}

fn principals() -> Vec<Principal> {
    (0..4u8)
        .map(|i| Principal::from_seed(&[b'p', i]))
        .collect()
}

/// Root plus every node reachable through at most two labels.
fn nodes() -> Vec<Node> {
    let mut nodes = vec![Node::ROOT];
    for first in LABELS {
        let child = Node::ROOT.child(first);
        nodes.push(child);
        for second in LABELS {
            nodes.push(child.child(second));
        }
    }
    nodes
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    let node_count = nodes().len();
    prop_oneof![
        (0usize..4, 0..node_count, 0usize..4).prop_map(|(caller, node, new_owner)| {
            Op::SetOwner {
                caller,
                node,
                new_owner,
            }
        }),
        (0usize..4, 0..node_count, 0..LABELS.len(), 0usize..4).prop_map(
            |(caller, parent, label, new_owner)| Op::SetSubnodeOwner {
                caller,
                parent,
                label,
                new_owner,
            }
        ),
        (0usize..4, 0..node_count, 0u64..1_000).prop_map(|(caller, node, ttl)| Op::SetTtl {
            caller,
            node,
            ttl,
        }),
    ]
}

proptest! {
    #[test]
    fn owner_tracks_last_successful_assignment(
        ops in prop::collection::vec(arbitrary_op(), 1..60),
    ) {
        let principals = principals();
        let nodes = nodes();
        let registry = Registry::new(principals[0]);
        let mut model: HashMap<Node, Principal> = HashMap::new();
        model.insert(Node::ROOT, principals[0]);

        for op in ops {
            let snapshot: Vec<_> = nodes.iter().map(|n| registry.record(n)).collect();
            let owner_of = |model: &HashMap<Node, Principal>, node: &Node| {
                model.get(node).copied().unwrap_or(Principal::ZERO)
            };

            let (result, target, caller) = match op {
                Op::SetOwner { caller, node, new_owner } => {
                    let caller = principals[caller];
                    let node = nodes[node];
                    let result = registry.set_owner(&caller, &node, principals[new_owner]);
                    if result.is_ok() {
                        model.insert(node, principals[new_owner]);
                    }
                    (result.map(|_| ()), node, caller)
                }
                Op::SetSubnodeOwner { caller, parent, label, new_owner } => {
                    let caller = principals[caller];
                    let parent = nodes[parent];
                    let result =
                        registry.set_subnode_owner(&caller, &parent, LABELS[label], principals[new_owner]);
                    if let Ok(child) = result {
                        prop_assert_eq!(child, parent.child(LABELS[label]));
                        model.insert(child, principals[new_owner]);
                    }
                    (result.map(|_| ()), parent, caller)
                }
                Op::SetTtl { caller, node, ttl } => {
                    let caller = principals[caller];
                    let node = nodes[node];
                    let result = registry.set_ttl(&caller, &node, ttl);
                    if result.is_ok() {
                        prop_assert_eq!(registry.ttl(&node), ttl);
                    }
                    (result, node, caller)
                }
            };

            match result {
                Ok(()) => {}
                Err(err) => {
                    // Failure happens exactly when the caller did not own the target.
                    prop_assert_ne!(owner_of(&model, &target), caller);
                    prop_assert_eq!(err, RegistryError::Unauthorized { node: target, caller });
                    let after: Vec<_> = nodes.iter().map(|n| registry.record(n)).collect();
                    prop_assert_eq!(snapshot, after);
                }
            }

            for node in &nodes {
                prop_assert_eq!(registry.owner(node), owner_of(&model, node));
            }
        }
    }
}

proptest! {
    #[test]
    fn owner_can_always_mutate_own_node(
        node in 0usize..13,
        ttl in any::<u64>(),
    ) {
        let principals = principals();
        let nodes = nodes();
        let node = nodes[node];
        let owner = principals[1];
        let registry = Registry::new(owner);
        if !node.is_root() {
            // Walk the delegation chain down to the target node.
            let index = nodes.iter().position(|n| *n == node).unwrap();
            let (label_a, label_b) = match index {
                i if i % 4 == 1 => (LABELS[(i - 1) / 4], None),
                i => (LABELS[(i - 1) / 4], Some(LABELS[(i - 1) % 4 - 1])),
            };
            let child = registry.set_subnode_owner(&owner, &Node::ROOT, label_a, owner).unwrap();
            if let Some(label_b) = label_b {
                registry.set_subnode_owner(&owner, &child, label_b, owner).unwrap();
            }
        }

        prop_assert_eq!(registry.owner(&node), owner);
        prop_assert!(registry.set_ttl(&owner, &node, ttl).is_ok());
        prop_assert!(registry.set_resolver(&owner, &node, Some(principals[2])).is_ok());
        prop_assert!(registry.set_owner(&owner, &node, principals[3]).is_ok());
        prop_assert_eq!(registry.owner(&node), principals[3]);
    }
}
