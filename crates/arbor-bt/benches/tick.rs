use arbor_bt::builder::{action, condition, sequence, Node};
use arbor_bt::{BehaviorTree, NodeStatus};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_bt_tick(c: &mut Criterion) {
    let conditions = (0..32)
        .map(|_| condition("always", |_bb| true))
        .collect::<Vec<Node>>();

    let mut tree = BehaviorTree::new(sequence(conditions));
    c.bench_function("arbor-bt/tick(conditions=32)", |b| {
        b.iter(|| black_box(tree.tick(0.1)))
    });
}

fn bench_running_leaf(c: &mut Criterion) {
    let mut children: Vec<Node> = (0..31)
        .map(|i| condition("flag", move |bb| bb.get("flags", 0) >= i))
        .collect();
    children.push(action("busy", |bb, dt| {
        let t = bb.get("t", 0.0f32) + dt;
        bb.set("t", t);
        NodeStatus::Running
    }));

    let mut tree = BehaviorTree::new(sequence(children));
    tree.blackboard_mut().set("flags", 64);
    c.bench_function("arbor-bt/tick(reticked_prefix=31)", |b| {
        b.iter(|| black_box(tree.tick(0.016)))
    });
}

criterion_group!(benches, bench_bt_tick, bench_running_leaf);
criterion_main!(benches);
