use std::io::Write;

use arbor_bt::{ActionFn, BehaviorNode, Blackboard, NodeStatus};
use arbor_config::{
    load_tree, tree_from_str, BindingRegistry, BuildMode, ConfigError, TreeBuilder, TreeDocument,
};

use NodeStatus::{Failure, Running, Success};

const GUARD: &str = r#"
root: guard
blackboard:
  bools: { player_visible: false }
trees:
  guard:
    selector:
      children:
        - sequence:
            children:
              - condition: { binding: player_visible }
              - action: { binding: chase }
        - action: { binding: patrol }
"#;

fn intent(name: &'static str) -> impl Fn(&mut Blackboard, f32) -> NodeStatus {
    move |bb: &mut Blackboard, _dt: f32| {
        bb.set_str("intent", name);
        Success
    }
}

fn guard_registry() -> BindingRegistry {
    BindingRegistry::new()
        .condition("player_visible", |bb| bb.get("player_visible", false))
        .action("chase", intent("chase"))
        .action("patrol", intent("patrol"))
}

fn root_name(tree: &arbor_bt::BehaviorTree) -> String {
    tree.root().map(|r| r.name().to_owned()).unwrap_or_default()
}

#[test]
fn built_tree_follows_blackboard() {
    let registry = guard_registry();
    let mut tree = tree_from_str(GUARD, &registry).unwrap();

    assert_eq!(tree.tick(0.1), Some(Success));
    assert_eq!(tree.blackboard().get_str("intent"), Some("patrol"));

    tree.blackboard_mut().set("player_visible", true);
    assert_eq!(tree.tick(0.1), Some(Success));
    assert_eq!(tree.blackboard().get_str("intent"), Some("chase"));
}

#[test]
fn single_key_node_maps_build_at_the_root() {
    let registry = BindingRegistry::new().condition("ok", |_| true);
    let source = "root: main\ntrees:\n  main:\n    condition: { binding: ok }\n";
    let mut tree = tree_from_str(source, &registry).unwrap();
    assert_eq!(tree.tick(0.1), Some(Success));
    assert_eq!(root_name(&tree), "ok");
}

#[test]
fn built_tree_debug_output_names_root() {
    let registry = guard_registry();
    let built = tree_from_str(GUARD, &registry);
    let debug = format!("{built:?}");
    assert!(debug.contains("BehaviorTree"), "{debug}");
    assert!(debug.contains("Selector"), "{debug}");
}

#[test]
fn leaves_default_to_binding_names() {
    let registry = guard_registry();
    let tree = tree_from_str(GUARD, &registry).unwrap();

    let mut names = Vec::new();
    fn collect(node: &dyn BehaviorNode, names: &mut Vec<String>) {
        names.push(node.name().to_owned());
        node.visit_children(&mut |child| collect(child, names));
    }
    collect(tree.root().unwrap(), &mut names);
    assert_eq!(
        names,
        vec!["Selector", "Sequence", "player_visible", "chase", "patrol"]
    );
}

#[test]
fn strict_mode_rejects_unknown_bindings() {
    let registry = BindingRegistry::new().action("chase", intent("chase"));
    let err = tree_from_str(GUARD, &registry).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownCondition(ref b) if b == "player_visible"));

    let registry = BindingRegistry::new().condition("player_visible", |_| true);
    let err = tree_from_str(GUARD, &registry).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownAction(ref b) if b == "chase"));
}

#[test]
fn lenient_mode_builds_failing_leaves() {
    let registry = BindingRegistry::new().action("patrol", intent("patrol"));
    let doc = TreeDocument::from_yaml_str(GUARD).unwrap();
    let builder = TreeBuilder::new(&registry).lenient();
    assert_eq!(builder.mode(), BuildMode::Lenient);

    let mut tree = builder.build(&doc).unwrap();
    tree.blackboard_mut().set("player_visible", true);
    // The unbound condition fails, so the selector falls back to patrol.
    assert_eq!(tree.tick(0.1), Some(Success));
    assert_eq!(tree.blackboard().get_str("intent"), Some("patrol"));
}

#[test]
fn unknown_root_is_reported() {
    let registry = guard_registry();
    let err = tree_from_str("root: nowhere\ntrees: {}\n", &registry).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownRoot(ref r) if r == "nowhere"));
}

#[test]
fn unknown_subtree_is_reported() {
    let registry = guard_registry();
    let err = tree_from_str(
        "root: a\ntrees:\n  a:\n    subtree: { tree: b }\n",
        &registry,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::UnknownTree(ref t) if t == "b"));
}

#[test]
fn subtree_cycles_are_rejected() {
    let registry = guard_registry();
    let source = r#"
root: a
trees:
  a:
    sequence:
      children:
        - subtree: { tree: b }
  b:
    inverter:
      child: { subtree: { tree: a } }
"#;
    let err = tree_from_str(source, &registry).unwrap_err();
    match err {
        ConfigError::SubtreeCycle(ref path) => assert_eq!(path, &["a", "b", "a"]),
        ref other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.to_string(), "subtree cycle: a -> b -> a");
}

#[test]
fn negative_timer_duration_is_rejected() {
    let registry = guard_registry();
    let err = tree_from_str(
        "root: t\ntrees:\n  t:\n    timer: { name: cooldown, duration: -1.0 }\n",
        &registry,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidDuration { ref name, duration } if name == "cooldown" && duration < 0.0
    ));
}

#[test]
fn memory_flag_selects_memory_composites() {
    let registry = guard_registry();
    let tree = tree_from_str(
        "root: m\ntrees:\n  m:\n    sequence: { memory: true }\n",
        &registry,
    )
    .unwrap();
    assert_eq!(root_name(&tree), "MemSequence");

    let tree = tree_from_str(
        "root: m\ntrees:\n  m:\n    selector: { memory: true, name: fallback }\n",
        &registry,
    )
    .unwrap();
    assert_eq!(root_name(&tree), "fallback");
}

#[test]
fn each_subtree_reference_gets_its_own_state() {
    let registry = BindingRegistry::new().action_factory("count", || {
        let mut calls = 0;
        Box::new(move |bb: &mut Blackboard, _dt: f32| {
            calls += 1;
            bb.set("calls", calls);
            Success
        }) as ActionFn
    });
    let source = r#"
root: main
trees:
  main:
    sequence:
      children:
        - subtree: { tree: counter }
        - subtree: { tree: counter }
  counter:
    action: { binding: count }
"#;
    let mut tree = tree_from_str(source, &registry).unwrap();
    tree.tick(0.1);
    assert_eq!(tree.blackboard().get("calls", 0), 1);
    tree.tick(0.1);
    assert_eq!(tree.blackboard().get("calls", 0), 2);
}

#[test]
fn isolated_subtree_keeps_writes_private() {
    let registry = guard_registry();
    let source = r#"
root: main
trees:
  main:
    subtree: { tree: side, blackboard: isolated, name: side job }
  side:
    action: { binding: patrol }
"#;
    let mut tree = tree_from_str(source, &registry).unwrap();
    assert_eq!(tree.tick(0.1), Some(Success));
    assert_eq!(tree.blackboard().get_str("intent"), None);
    assert_eq!(root_name(&tree), "side job");
}

#[test]
fn repeater_and_timer_build_from_yaml() {
    let registry = BindingRegistry::new()
        .action("step", |_bb, _dt| Success)
        .action("wait", |_bb, _dt| Running);
    let source = r#"
root: main
trees:
  main:
    sequence:
      children:
        - repeater: { limit: 2, child: { action: { binding: step } } }
        - timer: { duration: 0.5, child: { action: { binding: wait } } }
"#;
    let mut tree = tree_from_str(source, &registry).unwrap();
    let statuses: Vec<_> = (0..4).map(|_| tree.tick(0.25)).collect();
    // The sequence re-walks the repeater every tick, so the timer only
    // advances on the ticks where the repeater completes.
    assert_eq!(
        statuses,
        vec![Some(Running), Some(Running), Some(Running), Some(Success)]
    );
}

#[test]
fn missing_decorator_child_fails() {
    let registry = guard_registry();
    let mut tree = tree_from_str("root: i\ntrees:\n  i:\n    inverter: {}\n", &registry).unwrap();
    assert_eq!(tree.tick(0.1), Some(Failure));
}

#[test]
fn load_tree_reads_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(GUARD.as_bytes()).unwrap();

    let mut tree = load_tree(file.path(), &guard_registry()).unwrap();
    assert!(tree.blackboard().contains::<bool>("player_visible"));
    assert_eq!(tree.tick(0.1), Some(Success));
}
