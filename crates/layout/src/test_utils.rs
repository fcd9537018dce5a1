use crate::context::LayoutContext;
use crate::propagation::LayoutElement;
use std::cell::RefCell;
use std::rc::Rc;
use trellis_types::{Size, TraitSnapshot};

/// A minimal in-memory element tree for propagation tests.
pub struct TestElement {
    pub name: String,
    pub context: LayoutContext,
    pub applied: usize,
    pub children: Vec<TestElement>,
    log: Rc<RefCell<Vec<String>>>,
}

impl TestElement {
    pub fn leaf(name: &str, context: LayoutContext) -> Self {
        Self {
            name: name.to_string(),
            context,
            applied: 0,
            children: Vec::new(),
            log: Rc::default(),
        }
    }

    pub fn with_children(mut self, children: Vec<TestElement>) -> Self {
        self.children = children;
        self.share_log(Rc::clone(&self.log));
        self
    }

    /// A single path of `depth` nodes, built without recursion.
    pub fn chain(depth: usize) -> Self {
        let context = LayoutContext::unconstrained(TraitSnapshot::DEFAULT);
        let mut node = TestElement::leaf("n0", context);
        for i in 1..depth {
            let mut parent = TestElement::leaf(&format!("n{i}"), context);
            parent.children.push(node);
            node = parent;
        }
        node
    }

    pub fn count(&self) -> usize {
        let mut n = 0;
        self.walk(&mut |_| n += 1);
        n
    }

    /// Pre-order traversal.
    pub fn walk(&self, f: &mut dyn FnMut(&TestElement)) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }

    /// Names in the order `apply_traits` reached them.
    pub fn visit_log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    fn share_log(&mut self, log: Rc<RefCell<Vec<String>>>) {
        for child in &mut self.children {
            child.log = Rc::clone(&log);
            child.share_log(Rc::clone(&log));
        }
    }
}

impl Drop for TestElement {
    fn drop(&mut self) {
        // Flatten deep chains so dropping them does not overflow the stack.
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl LayoutElement for TestElement {
    fn layout_context(&self) -> LayoutContext {
        self.context
    }

    fn apply_traits(&mut self, traits: TraitSnapshot) {
        self.context = self.context.with_traits(traits);
        self.applied += 1;
        self.log.borrow_mut().push(self.name.clone());
    }

    fn children_mut(&mut self) -> Vec<&mut dyn LayoutElement> {
        self.children
            .iter_mut()
            .map(|child| child as &mut dyn LayoutElement)
            .collect()
    }
}

/// root
/// ├── a
/// │   ├── a1
/// │   └── a2
/// └── b
///     └── b1
pub fn sample_tree() -> TestElement {
    let traits = TraitSnapshot::DEFAULT;
    let ctx = |w: f32, h: f32| LayoutContext::new(Size::ZERO, Size::new(w, h), traits);

    TestElement::leaf("root", ctx(320.0, 480.0)).with_children(vec![
        TestElement::leaf("a", ctx(320.0, 200.0)).with_children(vec![
            TestElement::leaf("a1", LayoutContext::exact(Size::new(40.0, 40.0), traits)),
            TestElement::leaf("a2", ctx(280.0, 200.0)),
        ]),
        TestElement::leaf("b", LayoutContext::unconstrained(traits))
            .with_children(vec![TestElement::leaf("b1", ctx(10.0, 10.0))]),
    ])
}
