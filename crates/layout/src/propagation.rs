//! Pushing a new trait snapshot down an element tree.
use crate::context::LayoutContext;
use trellis_types::TraitSnapshot;

/// The capabilities an element tree must expose for trait propagation.
///
/// Implementors keep their own [`LayoutContext`]; `apply_traits` replaces
/// only its traits and must leave `min`/`max` untouched.
pub trait LayoutElement {
    fn layout_context(&self) -> LayoutContext;

    fn apply_traits(&mut self, traits: TraitSnapshot);

    fn children_mut(&mut self) -> Vec<&mut dyn LayoutElement>;
}

/// Applies `traits` to `root` and every descendant, depth-first, visiting each
/// node exactly once. Returns the number of nodes visited.
///
/// The walk holds `&mut` access to the subtree only, so read-only queries on
/// disjoint subtrees may run on other threads at the same time.
pub fn propagate_traits_down(root: &mut dyn LayoutElement, traits: TraitSnapshot) -> usize {
    let mut visited = 0;
    let mut stack: Vec<&mut dyn LayoutElement> = vec![root];

    while let Some(element) = stack.pop() {
        let before = element.layout_context();
        element.apply_traits(traits);
        debug_assert_eq!(
            (before.min(), before.max()),
            (element.layout_context().min(), element.layout_context().max()),
            "trait propagation must not change size bounds"
        );
        visited += 1;

        let mut children = element.children_mut();
        // Reverse so the first child is visited first.
        children.reverse();
        stack.extend(children);
    }

    log::debug!("propagated traits {} to {} elements", traits, visited);
    visited
}
