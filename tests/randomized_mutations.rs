use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use phenome_topology::prelude::*;

/// Drives a graph the way a mutation policy would: always ask first, then act.
fn evolve(rng: &mut SmallRng, g: &mut TopologyGraph, steps: usize) {
    for _ in 0..steps {
        let n = g.node_count() as u32;
        let (s, t) = (NodeId::new(rng.gen_range(0..n)), NodeId::new(rng.gen_range(0..n)));
        match rng.gen_range(0..10) {
            0 => {
                g.insert_node();
            }
            1 if n > 4 => {
                g.erase_node(s).unwrap();
            }
            2 => {
                if g.exists(LinkType::Forward, s, t) {
                    g.split_link(s, t).unwrap();
                }
            }
            3 | 4 => {
                let kind = if rng.gen_bool(0.5) { LinkType::Forward } else { LinkType::Recurrent };
                if g.is_eraseable(kind, s, t) {
                    assert_eq!(g.erase_link(kind, s, t), Ok(true));
                }
            }
            _ => {
                let kind = if rng.gen_bool(0.8) { LinkType::Forward } else { LinkType::Recurrent };
                if g.is_allowed(kind, s, t) {
                    g.add_link(kind, s, t).unwrap();
                } else {
                    assert!(g.add_link(kind, s, t).is_err());
                }
            }
        }
    }
}

#[test]
fn seeded_evolution_preserves_invariants() {
    for seed in 0..16u64 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut g = TopologyGraph::with_nodes(4);
        for _ in 0..25 {
            evolve(&mut rng, &mut g, 20);
            g.validate_invariants().unwrap();
            let order = g.topological_order(true).unwrap();
            assert_eq!(order.len(), g.node_count());
            for node in g.nodes() {
                for src in g.get(LinkType::ForwardReverse, node) {
                    assert!(g.exists(LinkType::Forward, src, node));
                }
            }
        }
    }
}

#[test]
fn same_seed_same_topology() {
    let run = |seed| {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut g = TopologyGraph::with_nodes(4);
        evolve(&mut rng, &mut g, 300);
        (g.snapshot(), g.topological_order(true).unwrap())
    };
    assert_eq!(run(42), run(42));
}
