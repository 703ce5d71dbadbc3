use std::cell::Cell;
use std::rc::Rc;

use arbor_bt::{
    ActionNode, BehaviorNode, Blackboard, MemSelector, MemSequence, NodeStatus, Selector,
    Sequence, TickContext,
};

use NodeStatus::{Failure, Running, Success};

/// Action replaying `script` one entry per tick (the last entry repeats) and
/// counting how often it was called.
fn scripted(
    name: &'static str,
    script: Vec<NodeStatus>,
) -> (Box<dyn BehaviorNode>, Rc<Cell<u32>>) {
    let calls = Rc::new(Cell::new(0u32));
    let counter = calls.clone();
    let node = ActionNode::new(name, move |_bb: &mut Blackboard, _dt: f32| {
        let i = counter.get() as usize;
        counter.set(counter.get() + 1);
        script[i.min(script.len() - 1)]
    });
    (Box::new(node), calls)
}

fn child_statuses(node: &dyn BehaviorNode) -> Vec<Option<NodeStatus>> {
    let mut out = Vec::new();
    node.visit_children(&mut |child| out.push(child.status()));
    out
}

#[test]
fn sequence_reticks_resolved_children_until_completion() {
    let (a, a_calls) = scripted("a", vec![Success]);
    let (b, b_calls) = scripted("b", vec![Success]);
    let (c, c_calls) = scripted("c", vec![Running, Success]);
    let mut seq = Sequence::new(vec![a, b, c]);

    let mut bb = Blackboard::new();
    let ctx = TickContext::with_dt(0.1);

    assert_eq!(seq.tick(&ctx, &mut bb), Running);
    assert_eq!((a_calls.get(), b_calls.get(), c_calls.get()), (1, 1, 1));
    assert_eq!(
        child_statuses(&seq),
        vec![Some(Success), Some(Success), Some(Running)]
    );

    assert_eq!(seq.tick(&ctx, &mut bb), Success);
    // The first two children were evaluated again on the second tick.
    assert_eq!((a_calls.get(), b_calls.get(), c_calls.get()), (2, 2, 2));
    assert_eq!(child_statuses(&seq), vec![None, None, None]);
    assert_eq!(seq.status(), Some(Success));
}

#[test]
fn sequence_failure_stops_and_resets_children() {
    let (a, _) = scripted("a", vec![Success]);
    let (b, _) = scripted("b", vec![Failure]);
    let (c, c_calls) = scripted("c", vec![Success]);
    let mut seq = Sequence::new(vec![a, b, c]);

    let mut bb = Blackboard::new();
    assert_eq!(seq.tick(&TickContext::with_dt(0.1), &mut bb), Failure);
    assert_eq!(c_calls.get(), 0);
    assert_eq!(child_statuses(&seq), vec![None, None, None]);
}

#[test]
fn selector_stops_at_running_child() {
    let (a, a_calls) = scripted("a", vec![Failure]);
    let (b, b_calls) = scripted("b", vec![Running]);
    let (c, c_calls) = scripted("c", vec![Success]);
    let mut sel = Selector::new(vec![a, b, c]);

    let mut bb = Blackboard::new();
    assert_eq!(sel.tick(&TickContext::with_dt(0.1), &mut bb), Running);
    assert_eq!((a_calls.get(), b_calls.get(), c_calls.get()), (1, 1, 0));

    // Earlier children are not reset and are walked again next tick.
    assert_eq!(child_statuses(&sel)[0], Some(Failure));
    assert_eq!(sel.tick(&TickContext::with_dt(0.1), &mut bb), Running);
    assert_eq!((a_calls.get(), b_calls.get(), c_calls.get()), (2, 2, 0));
}

#[test]
fn selector_success_resets_all_children() {
    let (a, _) = scripted("a", vec![Failure]);
    let (b, _) = scripted("b", vec![Success]);
    let mut sel = Selector::new(vec![a, b]);

    let mut bb = Blackboard::new();
    assert_eq!(sel.tick(&TickContext::with_dt(0.1), &mut bb), Success);
    assert_eq!(child_statuses(&sel), vec![None, None]);
}

#[test]
fn selector_all_failures_leave_children_settled() {
    let (a, _) = scripted("a", vec![Failure]);
    let (b, _) = scripted("b", vec![Failure]);
    let mut sel = Selector::new(vec![a, b]);

    let mut bb = Blackboard::new();
    assert_eq!(sel.tick(&TickContext::with_dt(0.1), &mut bb), Failure);
    assert_eq!(child_statuses(&sel), vec![Some(Failure), Some(Failure)]);

    sel.reset();
    assert_eq!(sel.status(), None);
    assert_eq!(child_statuses(&sel), vec![None, None]);
}

#[test]
fn empty_composites_follow_vacuous_truth() {
    let mut bb = Blackboard::new();
    let ctx = TickContext::with_dt(0.1);
    assert_eq!(Sequence::empty().tick(&ctx, &mut bb), Success);
    assert_eq!(Selector::empty().tick(&ctx, &mut bb), Failure);
    assert_eq!(MemSequence::empty().tick(&ctx, &mut bb), Success);
    assert_eq!(MemSelector::empty().tick(&ctx, &mut bb), Failure);
}

#[test]
fn mem_sequence_resumes_at_running_child() {
    let (a, a_calls) = scripted("a", vec![Success]);
    let (b, b_calls) = scripted("b", vec![Running, Running, Success]);
    let mut seq = MemSequence::new(vec![a, b]);

    let mut bb = Blackboard::new();
    let ctx = TickContext::with_dt(0.1);
    assert_eq!(seq.tick(&ctx, &mut bb), Running);
    assert_eq!(seq.tick(&ctx, &mut bb), Running);
    assert_eq!(seq.tick(&ctx, &mut bb), Success);

    assert_eq!(a_calls.get(), 1);
    assert_eq!(b_calls.get(), 3);
}

#[test]
fn mem_selector_resumes_at_running_child() {
    let (a, a_calls) = scripted("a", vec![Failure]);
    let (b, b_calls) = scripted("b", vec![Running, Failure]);
    let (c, c_calls) = scripted("c", vec![Success]);
    let mut sel = MemSelector::new(vec![a, b, c]);

    let mut bb = Blackboard::new();
    let ctx = TickContext::with_dt(0.1);
    assert_eq!(sel.tick(&ctx, &mut bb), Running);
    assert_eq!(sel.tick(&ctx, &mut bb), Success);
    assert_eq!((a_calls.get(), b_calls.get(), c_calls.get()), (1, 2, 1));
}

#[test]
fn children_share_writes_within_one_tick() {
    let writer = ActionNode::new("spot", |bb: &mut Blackboard, _dt: f32| {
        bb.set("player_visible", true);
        Success
    });
    let reader = arbor_bt::ConditionNode::new("visible?", |bb: &Blackboard| {
        bb.get("player_visible", false)
    });
    let mut seq = Sequence::new(vec![Box::new(writer), Box::new(reader)]).named("spot then check");

    let mut bb = Blackboard::new();
    assert_eq!(seq.tick(&TickContext::with_dt(0.1), &mut bb), Success);
    assert_eq!(seq.name(), "spot then check");
}
