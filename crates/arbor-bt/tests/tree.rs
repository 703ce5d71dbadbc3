use std::cell::Cell;
use std::rc::Rc;

use arbor_bt::builder::{action, condition, flag, selector, sequence};
use arbor_bt::{BehaviorNode, BehaviorTree, Blackboard, NodeStatus};
use arbor_tools::SharedTraceSink;

use NodeStatus::{Failure, Running, Success};

fn counter() -> (Rc<Cell<u32>>, Rc<Cell<u32>>) {
    let calls = Rc::new(Cell::new(0u32));
    (calls.clone(), calls)
}

fn descendant_statuses(node: &dyn BehaviorNode, out: &mut Vec<Option<NodeStatus>>) {
    node.visit_children(&mut |child| {
        out.push(child.status());
        descendant_statuses(child, out);
    });
}

#[test]
fn tree_without_root_reports_nothing() {
    let mut tree = BehaviorTree::empty();
    assert_eq!(tree.tick(0.1), None);
    assert_eq!(tree.last_status(), None);
    assert!(tree.root().is_none());
}

#[test]
fn terminal_root_is_reset_in_the_same_tick() {
    let (calls, seen) = counter();
    let root = sequence(vec![
        condition("check", move |_bb| {
            seen.set(seen.get() + 1);
            true
        }),
        action("finish", |_bb, _dt| Success),
    ]);
    let mut tree = BehaviorTree::new(root);

    assert_eq!(tree.tick(0.1), Some(Success));
    let root = tree.root().expect("root installed");
    assert_eq!(root.status(), None);
    let mut statuses = Vec::new();
    descendant_statuses(root, &mut statuses);
    assert!(statuses.iter().all(Option::is_none));

    assert_eq!(tree.tick(0.1), Some(Success));
    assert_eq!(calls.get(), 2);
    assert_eq!(tree.tick_count(), 2);
}

#[test]
fn failed_selector_children_are_cleared_by_the_driver() {
    let root = selector(vec![flag("a"), flag("b")]);
    let mut tree = BehaviorTree::new(root);

    assert_eq!(tree.tick(0.1), Some(Failure));
    let mut statuses = Vec::new();
    descendant_statuses(tree.root().expect("root installed"), &mut statuses);
    assert_eq!(statuses, vec![None, None]);
}

#[test]
fn running_root_is_kept_between_ticks() {
    let root = action("walk", |bb, dt| {
        let walked = bb.get("walked", 0.0f32) + dt;
        bb.set("walked", walked);
        if walked >= 1.0 {
            Success
        } else {
            Running
        }
    });
    let mut tree = BehaviorTree::new(root);

    assert_eq!(tree.tick(0.5), Some(Running));
    assert_eq!(tree.root().and_then(|r| r.status()), Some(Running));
    assert_eq!(tree.tick(0.5), Some(Success));
    assert_eq!(tree.last_status(), Some(Success));
}

#[test]
fn external_writes_are_seen_by_the_next_tick() {
    let mut tree = BehaviorTree::new(flag("player_visible"));
    assert_eq!(tree.tick(0.1), Some(Failure));

    tree.blackboard_mut().set("player_visible", true);
    assert_eq!(tree.tick(0.1), Some(Success));
}

#[test]
fn reset_abandons_pass_and_clears_blackboard() {
    let mut seed = Blackboard::new();
    seed.set("hp", 10);
    let mut tree = BehaviorTree::new(action("wait", |_bb, _dt| Running)).with_blackboard(seed);

    assert_eq!(tree.tick(0.1), Some(Running));
    tree.reset();
    assert!(tree.blackboard().is_empty());
    assert_eq!(tree.last_status(), None);
    assert_eq!(tree.root().and_then(|r| r.status()), None);
}

#[test]
fn reset_root_keeps_blackboard() {
    let mut tree = BehaviorTree::new(action("wait", |_bb, _dt| Running));
    tree.blackboard_mut().set("hp", 10);
    tree.tick(0.1);

    tree.reset_root();
    assert_eq!(tree.blackboard().get("hp", 0), 10);
    assert_eq!(tree.root().and_then(|r| r.status()), None);
}

#[test]
fn set_root_replaces_previous_root() {
    let mut tree = BehaviorTree::new(flag("a"));
    let previous = tree.set_root(action("ok", |_bb, _dt| Success));
    assert_eq!(previous.map(|n| n.name().to_owned()), Some("a".to_owned()));
    assert_eq!(tree.tick(0.1), Some(Success));
}

#[test]
fn trace_sink_records_ticks_and_resets() {
    let sink = SharedTraceSink::default();
    let mut tree = BehaviorTree::new(action("wait", |_bb, _dt| Running))
        .with_trace_sink(Box::new(sink.clone()));

    tree.tick(0.1);
    tree.tick(0.1);
    tree.reset_root();

    let log = sink.snapshot();
    let tags: Vec<_> = log.events.iter().map(|e| &*e.tag).collect();
    assert_eq!(tags, vec!["tree.tick", "tree.tick", "tree.reset"]);
    assert_eq!(log.events[1].tick, 1);
    assert_eq!(log.events[0].status(), Some(Running));
}
