//! Size-range constraints handed to elements when they are measured.
use crate::LayoutError;
use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;
use trellis_style::LayoutSize;
use trellis_types::{Axis, Size, TraitSnapshot};

/// Max extents at or below this on either axis are treated as "no area".
pub const SIGNIFICANT_AREA_THRESHOLD: f32 = 0.1;

const AXES: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

/// An immutable, inclusive `[min, max]` size range plus the trait snapshot
/// the element is measured under.
///
/// Invariants, checked at construction:
/// - `min` is finite and non-negative on both axes,
/// - `max` is non-negative and may be `+inf`,
/// - `min <= max` on both axes.
///
/// Equality is exact on every field. Contexts are plain `Copy` values, so a
/// published context can be shared across threads without synchronisation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutContext {
    min: Size,
    max: Size,
    traits: TraitSnapshot,
}

impl LayoutContext {
    pub const ZERO: LayoutContext = LayoutContext {
        min: Size::ZERO,
        max: Size::ZERO,
        traits: TraitSnapshot::DEFAULT,
    };

    pub const UNCONSTRAINED: LayoutContext = LayoutContext {
        min: Size::ZERO,
        max: Size::INFINITE,
        traits: TraitSnapshot::DEFAULT,
    };

    pub fn try_new(min: Size, max: Size, traits: TraitSnapshot) -> Result<Self, LayoutError> {
        validate_range(min, max)?;
        Ok(Self { min, max, traits })
    }

    /// # Panics
    ///
    /// Panics when the range is inverted or a bound is negative or not a number.
    pub fn new(min: Size, max: Size, traits: TraitSnapshot) -> Self {
        match Self::try_new(min, max, traits) {
            Ok(context) => context,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_exact(size: Size, traits: TraitSnapshot) -> Result<Self, LayoutError> {
        Self::try_new(size, size, traits)
    }

    /// # Panics
    ///
    /// Panics when `size` is negative or not finite.
    pub fn exact(size: Size, traits: TraitSnapshot) -> Self {
        Self::new(size, size, traits)
    }

    pub fn zero(traits: TraitSnapshot) -> Self {
        Self {
            traits,
            ..Self::ZERO
        }
    }

    pub fn unconstrained(traits: TraitSnapshot) -> Self {
        Self {
            traits,
            ..Self::UNCONSTRAINED
        }
    }

    pub fn min(&self) -> Size {
        self.min
    }

    pub fn max(&self) -> Size {
        self.max
    }

    pub fn traits(&self) -> &TraitSnapshot {
        &self.traits
    }

    pub fn has_significant_area(&self) -> bool {
        self.max.width > SIGNIFICANT_AREA_THRESHOLD && self.max.height > SIGNIFICANT_AREA_THRESHOLD
    }

    pub fn has_bounded_width(&self) -> bool {
        self.max.width.is_finite()
    }

    pub fn has_bounded_height(&self) -> bool {
        self.max.height.is_finite()
    }

    pub fn is_exact(&self) -> bool {
        self.min == self.max
    }

    /// Clamps `size` into `[min, max]` on each axis.
    pub fn clamp(&self, size: Size) -> Size {
        Size::new(
            self.min.width.max(self.max.width.min(size.width)),
            self.min.height.max(self.max.height.min(size.height)),
        )
    }

    /// Resolves `size` against the parent and clamps the result into this range.
    pub fn clamp_resolved(&self, size: &LayoutSize, parent_size: Size, auto_size: Size) -> Size {
        self.clamp(size.resolve(parent_size, auto_size))
    }

    /// Intersects both ranges axis by axis, keeping this context's traits.
    ///
    /// When the ranges do not overlap on an axis, `self` wins: the axis
    /// collapses to the point of `self`'s range closest to `other`. This makes
    /// the operation non-commutative for disjoint ranges.
    pub fn intersect(&self, other: &LayoutContext) -> LayoutContext {
        let mut min = self.min;
        let mut max = self.max;
        for axis in AXES {
            let (lo, hi) = intersect_axis(
                (self.min.get(axis), self.max.get(axis)),
                (other.min.get(axis), other.max.get(axis)),
            );
            min = min.with(axis, lo);
            max = max.with(axis, hi);
        }
        LayoutContext {
            min,
            max,
            traits: self.traits,
        }
    }

    pub fn is_equal(&self, other: &LayoutContext) -> bool {
        self == other
    }

    /// Same range, different traits.
    pub fn with_traits(&self, traits: TraitSnapshot) -> LayoutContext {
        LayoutContext { traits, ..*self }
    }

    /// A mutable copy for transient, single-threaded editing.
    pub fn to_builder(&self) -> LayoutContextBuilder {
        LayoutContextBuilder::from(*self)
    }
}

impl fmt::Display for LayoutContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<LayoutContext: min={}, max={}, traits={}>",
            self.min, self.max, self.traits
        )
    }
}

fn intersect_axis(this: (f32, f32), other: (f32, f32)) -> (f32, f32) {
    let lo = this.0.max(other.0);
    let hi = this.1.min(other.1);
    if lo <= hi {
        (lo, hi)
    } else if this.0 < other.0 {
        // `other` lies entirely above us.
        (this.1, this.1)
    } else {
        (this.0, this.0)
    }
}

fn validate_range(min: Size, max: Size) -> Result<(), LayoutError> {
    for axis in AXES {
        let lo = min.get(axis);
        let hi = max.get(axis);
        if !(lo.is_finite() && lo >= 0.0) {
            return Err(LayoutError::InvalidBound {
                field: bound_name("min", axis),
                value: lo,
            });
        }
        if hi.is_nan() || hi < 0.0 {
            return Err(LayoutError::InvalidBound {
                field: bound_name("max", axis),
                value: hi,
            });
        }
        if lo > hi {
            return Err(LayoutError::InvalidRange {
                axis,
                min: lo,
                max: hi,
            });
        }
    }
    Ok(())
}

fn bound_name(bound: &'static str, axis: Axis) -> &'static str {
    match (bound, axis) {
        ("min", Axis::Horizontal) => "min.width",
        ("min", Axis::Vertical) => "min.height",
        (_, Axis::Horizontal) => "max.width",
        (_, Axis::Vertical) => "max.height",
    }
}

/// Writable counterpart of [`LayoutContext`] used while constraints are
/// being assembled. It is `!Sync`; share the frozen context instead.
#[derive(Debug, Clone)]
pub struct LayoutContextBuilder {
    min: Size,
    max: Size,
    traits: TraitSnapshot,
    _not_sync: PhantomData<Cell<()>>,
}

impl LayoutContextBuilder {
    /// Starts from the zero range.
    pub fn new(traits: TraitSnapshot) -> Self {
        Self::from(LayoutContext::zero(traits))
    }

    pub fn min(&self) -> Size {
        self.min
    }

    pub fn max(&self) -> Size {
        self.max
    }

    pub fn traits(&self) -> &TraitSnapshot {
        &self.traits
    }

    pub fn set_min(&mut self, min: Size) -> &mut Self {
        self.min = min;
        self
    }

    pub fn set_max(&mut self, max: Size) -> &mut Self {
        self.max = max;
        self
    }

    pub fn set_traits(&mut self, traits: TraitSnapshot) -> &mut Self {
        self.traits = traits;
        self
    }

    /// Validates the current fields and produces an immutable context.
    pub fn freeze(&self) -> Result<LayoutContext, LayoutError> {
        LayoutContext::try_new(self.min, self.max, self.traits)
    }
}

impl From<LayoutContext> for LayoutContextBuilder {
    fn from(context: LayoutContext) -> Self {
        Self {
            min: context.min,
            max: context.max,
            traits: context.traits,
            _not_sync: PhantomData,
        }
    }
}
