use crate::cache::LayoutCacheEntry;
use crate::context::LayoutContext;
use crate::perf::{DebugProfiler, NoOpProfiler, Profiler};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use trellis_types::TraitSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    /// The trait snapshot used for contexts and cache entries that are created
    /// before the platform has reported real traits.
    ///
    /// Defaults to [`TraitSnapshot::DEFAULT`].
    pub default_traits: TraitSnapshot,

    /// Whether cache lookups and measurements are counted.
    ///
    /// - **true**: [`LayoutConfig::profiler`] returns a [`DebugProfiler`].
    /// - **false**: a [`NoOpProfiler`] is returned and profiling costs nothing.
    ///
    /// Defaults to `true` only when the `profiling` feature is enabled.
    pub profiling: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_traits: TraitSnapshot::DEFAULT,
            profiling: cfg!(feature = "profiling"),
        }
    }
}

impl LayoutConfig {
    pub fn with_traits(default_traits: TraitSnapshot) -> Self {
        Self {
            default_traits,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn zero_context(&self) -> LayoutContext {
        LayoutContext::zero(self.default_traits)
    }

    pub fn unconstrained_context(&self) -> LayoutContext {
        LayoutContext::unconstrained(self.default_traits)
    }

    pub fn empty_entry<L>(&self) -> LayoutCacheEntry<L> {
        LayoutCacheEntry::empty(self.default_traits)
    }

    pub fn profiler(&self) -> Arc<dyn Profiler> {
        if self.profiling {
            Arc::new(DebugProfiler::new())
        } else {
            Arc::new(NoOpProfiler)
        }
    }
}
