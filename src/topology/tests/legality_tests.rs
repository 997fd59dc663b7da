use crate::topology::{LinkType, NodeId, TopologyGraph};
use crate::topology_error::{Rejection, TopologyError};

fn nid(raw: u32) -> NodeId {
    NodeId::new(raw)
}

fn chain3() -> TopologyGraph {
    let mut g = TopologyGraph::with_nodes(3);
    g.add_link(LinkType::Forward, nid(0), nid(1)).unwrap();
    g.add_link(LinkType::Forward, nid(1), nid(2)).unwrap();
    g
}

#[test]
fn closing_a_forward_cycle_is_rejected_without_mutation() {
    let mut g = chain3();
    let before = g.clone();
    assert!(g.forms_cycle(nid(2), nid(0)));
    assert!(!g.is_allowed(LinkType::Forward, nid(2), nid(0)));
    assert_eq!(
        g.add_link(LinkType::Forward, nid(2), nid(0)),
        Err(TopologyError::IllegalMutation(Rejection::FormsCycle {
            src: nid(2),
            tgt: nid(0)
        }))
    );
    assert_eq!(g, before);
    assert!(g.topological_order(true).is_ok());
}

#[test]
fn the_same_pair_is_legal_as_recurrent() {
    let mut g = chain3();
    assert!(g.is_allowed(LinkType::Recurrent, nid(2), nid(0)));
    g.add_link(LinkType::Recurrent, nid(2), nid(0)).unwrap();
    // recurrent links do not take part in ordering
    assert_eq!(g.topological_order(true).unwrap(), vec![nid(0), nid(1), nid(2)]);
}

#[test]
fn shortcut_forward_link_is_allowed() {
    let g = chain3();
    assert!(!g.forms_cycle(nid(0), nid(2)));
    assert!(g.is_allowed(LinkType::Forward, nid(0), nid(2)));
}

#[test]
fn forms_cycle_leaves_the_cache_alone() {
    let g = chain3();
    g.evaluation_order().unwrap();
    assert!(g.forms_cycle(nid(2), nid(0)));
    assert!(g.has_cached_order());
}

#[test]
fn sole_forward_in_link_is_protected() {
    let mut g = TopologyGraph::with_nodes(2);
    g.add_link(LinkType::Forward, nid(0), nid(1)).unwrap();
    assert!(!g.is_eraseable(LinkType::Forward, nid(0), nid(1)));
}

#[test]
fn fan_in_and_fan_out_must_both_survive() {
    // 0 -> 2, 1 -> 2, 0 -> 3
    let mut g = TopologyGraph::with_nodes(4);
    for (s, t) in [(0, 2), (1, 2), (0, 3)] {
        g.add_link(LinkType::Forward, nid(s), nid(t)).unwrap();
    }
    // node 0 keeps 0 -> 3, node 2 keeps 1 -> 2
    assert!(g.is_eraseable(LinkType::Forward, nid(0), nid(2)));
    // node 1 would lose its only out-link
    assert!(!g.is_eraseable(LinkType::Forward, nid(1), nid(2)));
    // node 3 would lose its only in-link
    assert!(!g.is_eraseable(LinkType::Forward, nid(0), nid(3)));
    // absent link
    assert!(!g.is_eraseable(LinkType::Forward, nid(1), nid(3)));
}

#[test]
fn erase_link_does_not_enforce_fan_rules() {
    let mut g = TopologyGraph::with_nodes(2);
    g.add_link(LinkType::Forward, nid(0), nid(1)).unwrap();
    assert_eq!(g.erase_link(LinkType::Forward, nid(0), nid(1)), Ok(true));
    assert_eq!(g.in_degree(nid(1)), 0);
}

#[test]
fn erasing_an_absent_link_is_a_no_op() {
    let mut g = chain3();
    g.add_link(LinkType::Recurrent, nid(2), nid(1)).unwrap();
    g.evaluation_order().unwrap();
    let before = g.clone();

    assert_eq!(g.erase_link(LinkType::Forward, nid(0), nid(2)), Ok(false));
    assert_eq!(g.erase_link(LinkType::Recurrent, nid(1), nid(2)), Ok(false));
    assert_eq!(g.erase_link(LinkType::Forward, nid(1), nid(0)), Ok(false));

    assert_eq!(g, before);
    assert_eq!(g.snapshot(), before.snapshot());
    assert!(g.has_cached_order());
}

#[test]
fn unknown_endpoints_never_form_a_cycle() {
    let g = chain3();
    assert!(!g.forms_cycle(nid(0), nid(99)));
    assert!(!g.forms_cycle(nid(99), nid(0)));
    assert!(!g.forms_cycle(nid(99), nid(99)));
    assert!(!g.is_allowed(LinkType::Forward, nid(0), nid(99)));
}
