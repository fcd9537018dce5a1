#![allow(dead_code)]

use trellis::{
    InterfaceIdiom, LayoutCacheSlot, LayoutContext, LayoutElement, LayoutSize, LayoutVersion,
    Size, SizeClass, TraitSnapshot,
};

/// Traits of a typical phone window.
pub fn phone_traits() -> TraitSnapshot {
    TraitSnapshot::DEFAULT
        .with_display_scale(3.0)
        .with_size_classes(SizeClass::Compact, SizeClass::Regular)
        .with_interface_idiom(InterfaceIdiom::Phone)
        .with_container_size(Size::new(390.0, 844.0))
}

/// The same window after rotating to landscape.
pub fn landscape_traits() -> TraitSnapshot {
    phone_traits()
        .with_size_classes(SizeClass::Regular, SizeClass::Compact)
        .with_container_size(Size::new(844.0, 390.0))
}

pub fn range(min: (f32, f32), max: (f32, f32)) -> LayoutContext {
    LayoutContext::new(Size::new(min.0, min.1), Size::new(max.0, max.1), phone_traits())
}

/// Sizes covering the interesting regions of a `[10, 100]` range.
pub fn probe_sizes() -> Vec<Size> {
    let values = [0.0, 5.0, 10.0, 55.5, 100.0, 150.0, 1e9, f32::INFINITY];
    values
        .iter()
        .flat_map(|&w| values.iter().map(move |&h| Size::new(w, h)))
        .collect()
}

/// What a measurement produced, tagged with the inputs that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Measured {
    pub size: Size,
    pub version: u64,
    pub context: LayoutContext,
}

/// An element as a host tree would hold it.
pub struct Element {
    pub name: &'static str,
    pub preferred: LayoutSize,
    pub context: LayoutContext,
    pub version: LayoutVersion,
    pub slot: LayoutCacheSlot<Measured>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: &'static str, preferred: LayoutSize, context: LayoutContext) -> Self {
        Self {
            name,
            preferred,
            slot: LayoutCacheSlot::new(*context.traits()),
            context,
            version: LayoutVersion::new(),
            children: Vec::new(),
        }
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
        self.version.bump();
    }

    pub fn visit(&self, f: &mut dyn FnMut(&Element)) {
        f(self);
        for child in &self.children {
            child.visit(f);
        }
    }
}

impl LayoutElement for Element {
    fn layout_context(&self) -> LayoutContext {
        self.context
    }

    fn apply_traits(&mut self, traits: TraitSnapshot) {
        let mut builder = self.context.to_builder();
        builder.set_traits(traits);
        // Only the traits changed, so the range is still valid.
        if let Ok(context) = builder.freeze() {
            self.context = context;
        }
    }

    fn children_mut(&mut self) -> Vec<&mut dyn LayoutElement> {
        self.children
            .iter_mut()
            .map(|child| child as &mut dyn LayoutElement)
            .collect()
    }
}
