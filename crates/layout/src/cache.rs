//! Per-element layout result cache.
//!
//! An element owns one [`LayoutCacheSlot`]. The slot holds an immutable
//! [`LayoutCacheEntry`] behind an `RwLock<Arc<_>>`: readers clone the `Arc`
//! and never see a half-written entry, writers publish a freshly built entry
//! in one swap.
use crate::context::LayoutContext;
use crate::perf::Profiler;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use trellis_types::{Size, TraitSnapshot};

// --- Version Counter ---

/// Monotonic counter an element bumps whenever its subtree changes
/// structurally (e.g. a child is inserted). A cached layout is only reusable
/// for the exact version it was computed at.
#[derive(Debug, Default)]
pub struct LayoutVersion(AtomicU64);

impl LayoutVersion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    /// Advances the counter and returns the new version.
    pub fn bump(&self) -> u64 {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }
}

// --- Validity ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleReason {
    VersionChanged,
    ContextChanged,
    ParentSizeChanged,
}

impl fmt::Display for StaleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaleReason::VersionChanged => f.write_str("version changed"),
            StaleReason::ContextChanged => f.write_str("context changed"),
            StaleReason::ParentSizeChanged => f.write_str("parent size changed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Nothing has been measured yet.
    Empty,
    Valid,
    Stale(StaleReason),
}

// --- Entry ---

/// A computed layout together with the inputs that produced it.
///
/// Entries are never edited; a new measurement produces a new entry.
#[derive(Debug)]
pub struct LayoutCacheEntry<L> {
    layout: Option<Arc<L>>,
    context: LayoutContext,
    parent_size: Size,
    requested_from_above: bool,
    version: u64,
}

impl<L> Clone for LayoutCacheEntry<L> {
    fn clone(&self) -> Self {
        Self {
            layout: self.layout.clone(),
            context: self.context,
            parent_size: self.parent_size,
            requested_from_above: self.requested_from_above,
            version: self.version,
        }
    }
}

impl<L> LayoutCacheEntry<L> {
    /// An entry with no layout, a zero context and version 0.
    pub fn empty(traits: TraitSnapshot) -> Self {
        Self {
            layout: None,
            context: LayoutContext::zero(traits),
            parent_size: Size::ZERO,
            requested_from_above: false,
            version: 0,
        }
    }

    pub fn new(layout: Arc<L>, context: LayoutContext, parent_size: Size, version: u64) -> Self {
        Self {
            layout: Some(layout),
            context,
            parent_size,
            requested_from_above: false,
            version,
        }
    }

    /// Marks the layout as having been requested by the parent's layout pass
    /// rather than by the element itself.
    pub fn with_requested_from_above(mut self, requested_from_above: bool) -> Self {
        self.requested_from_above = requested_from_above;
        self
    }

    pub fn layout(&self) -> Option<&Arc<L>> {
        self.layout.as_ref()
    }

    pub fn context(&self) -> &LayoutContext {
        &self.context
    }

    pub fn parent_size(&self) -> Size {
        self.parent_size
    }

    pub fn requested_from_above(&self) -> bool {
        self.requested_from_above
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_empty(&self) -> bool {
        self.layout.is_none()
    }

    /// Classifies this entry against a layout request.
    ///
    /// The version is checked first: a version mismatch is a miss even when
    /// context and parent size are identical. Otherwise the entry is stale if
    /// the context or the parent size differs in any bit. A layout requested
    /// from above is subject to the same checks.
    pub fn state(&self, context: &LayoutContext, parent_size: Size, version: u64) -> CacheState {
        if self.layout.is_none() {
            return CacheState::Empty;
        }
        if self.version != version {
            return CacheState::Stale(StaleReason::VersionChanged);
        }
        if !self.context.is_equal(context) {
            return CacheState::Stale(StaleReason::ContextChanged);
        }
        if self.parent_size != parent_size {
            return CacheState::Stale(StaleReason::ParentSizeChanged);
        }
        CacheState::Valid
    }

    pub fn is_valid(&self, context: &LayoutContext, parent_size: Size, version: u64) -> bool {
        self.state(context, parent_size, version) == CacheState::Valid
    }
}

// --- Slot ---

/// The cache cell owned by a single element.
#[derive(Debug)]
pub struct LayoutCacheSlot<L> {
    entry: RwLock<Arc<LayoutCacheEntry<L>>>,
}

impl<L> LayoutCacheSlot<L> {
    pub fn new(traits: TraitSnapshot) -> Self {
        Self {
            entry: RwLock::new(Arc::new(LayoutCacheEntry::empty(traits))),
        }
    }

    /// The currently published entry.
    pub fn load(&self) -> Arc<LayoutCacheEntry<L>> {
        // Entries are swapped whole, so a poisoned lock still guards a complete entry.
        let guard = self.entry.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Returns the cached layout if it is valid for this request.
    pub fn lookup(
        &self,
        context: &LayoutContext,
        parent_size: Size,
        version: u64,
        profiler: &dyn Profiler,
    ) -> Option<Arc<L>> {
        let entry = self.load();
        match entry.state(context, parent_size, version) {
            CacheState::Valid => {
                profiler.count_hit();
                log::trace!("layout cache hit at version {}", version);
                entry.layout.clone()
            }
            CacheState::Empty => {
                profiler.count_miss();
                log::trace!("layout cache miss: empty");
                None
            }
            CacheState::Stale(reason) => {
                profiler.count_miss();
                log::trace!(
                    "layout cache miss: {} (cached v{}, requested v{})",
                    reason,
                    entry.version,
                    version
                );
                None
            }
        }
    }

    /// Publishes `entry` unless the slot already holds a newer version.
    ///
    /// Returns whether the entry was published.
    pub fn publish(&self, entry: LayoutCacheEntry<L>) -> bool {
        let mut guard = self.entry.write().unwrap_or_else(PoisonError::into_inner);
        if entry.version < guard.version {
            log::warn!(
                "dropping layout for v{}: slot already holds v{}",
                entry.version,
                guard.version
            );
            return false;
        }
        log::debug!(
            "publishing layout v{} (replacing v{}) for {}",
            entry.version,
            guard.version,
            entry.context
        );
        *guard = Arc::new(entry);
        true
    }

    /// Builds and publishes a new entry in one step.
    pub fn replace(
        &self,
        layout: Arc<L>,
        context: LayoutContext,
        parent_size: Size,
        version: u64,
        requested_from_above: bool,
    ) -> bool {
        self.publish(
            LayoutCacheEntry::new(layout, context, parent_size, version)
                .with_requested_from_above(requested_from_above),
        )
    }

    /// Drops the cached layout, keeping the traits of the last context.
    pub fn discard(&self) {
        let mut guard = self.entry.write().unwrap_or_else(PoisonError::into_inner);
        let traits = *guard.context.traits();
        *guard = Arc::new(LayoutCacheEntry::empty(traits));
    }
}
