use std::collections::HashMap;
use std::rc::Rc;

use arbor_bt::{ActionFn, ConditionFn};
use arbor_core::{Blackboard, NodeStatus};

type ConditionFactory = Rc<dyn Fn() -> ConditionFn>;
type ActionFactory = Rc<dyn Fn() -> ActionFn>;

/// Named closures that tree documents bind their leaves to.
///
/// Every leaf built from a document gets its own closure instance, so a
/// binding registered with [`action_factory`](Self::action_factory) can carry
/// per-leaf state. Plain [`action`](Self::action) and
/// [`condition`](Self::condition) bindings are shared behind an `Rc`.
#[derive(Default, Clone)]
pub struct BindingRegistry {
    conditions: HashMap<String, ConditionFactory>,
    actions: HashMap<String, ActionFactory>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn condition(
        mut self,
        name: impl Into<String>,
        predicate: impl Fn(&Blackboard) -> bool + 'static,
    ) -> Self {
        self.register_condition(name, predicate);
        self
    }

    pub fn action(
        mut self,
        name: impl Into<String>,
        action: impl Fn(&mut Blackboard, f32) -> NodeStatus + 'static,
    ) -> Self {
        self.register_action(name, action);
        self
    }

    /// Registers a factory called once per built leaf.
    pub fn action_factory(
        mut self,
        name: impl Into<String>,
        factory: impl Fn() -> ActionFn + 'static,
    ) -> Self {
        self.actions.insert(name.into(), Rc::new(factory));
        self
    }

    pub fn register_condition(
        &mut self,
        name: impl Into<String>,
        predicate: impl Fn(&Blackboard) -> bool + 'static,
    ) {
        let predicate = Rc::new(predicate);
        self.conditions.insert(
            name.into(),
            Rc::new(move || {
                let predicate = predicate.clone();
                Box::new(move |bb: &Blackboard| predicate(bb)) as ConditionFn
            }),
        );
    }

    pub fn register_action(
        &mut self,
        name: impl Into<String>,
        action: impl Fn(&mut Blackboard, f32) -> NodeStatus + 'static,
    ) {
        let action = Rc::new(action);
        self.actions.insert(
            name.into(),
            Rc::new(move || {
                let action = action.clone();
                Box::new(move |bb: &mut Blackboard, dt: f32| action(bb, dt)) as ActionFn
            }),
        );
    }

    pub fn has_condition(&self, name: &str) -> bool {
        self.conditions.contains_key(name)
    }

    pub fn has_action(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// A fresh closure for `name`, or `None` if nothing is registered.
    pub fn make_condition(&self, name: &str) -> Option<ConditionFn> {
        self.conditions.get(name).map(|factory| factory())
    }

    pub fn make_action(&self, name: &str) -> Option<ActionFn> {
        self.actions.get(name).map(|factory| factory())
    }
}

impl std::fmt::Debug for BindingRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut conditions: Vec<_> = self.conditions.keys().collect();
        let mut actions: Vec<_> = self.actions.keys().collect();
        conditions.sort();
        actions.sort();
        f.debug_struct("BindingRegistry")
            .field("conditions", &conditions)
            .field("actions", &actions)
            .finish()
    }
}
