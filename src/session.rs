//! Drives the measure-or-reuse protocol on top of the layout cache.
use crate::error::TrellisError;
use std::sync::Arc;
use std::time::Instant;
use trellis_layout::{LayoutCacheSlot, LayoutConfig, LayoutContext, Profiler};
use trellis_types::Size;

/// Shared, read-only state for layout requests: the configuration and the
/// profiler that cache lookups report to.
///
/// A session may be used from any number of threads. It does not serialise
/// measurement of the same element; callers that may measure one element
/// concurrently must coordinate that themselves.
pub struct LayoutSession {
    config: LayoutConfig,
    profiler: Arc<dyn Profiler>,
}

impl LayoutSession {
    pub fn new(config: LayoutConfig) -> Self {
        let profiler = config.profiler();
        Self { config, profiler }
    }

    pub fn with_profiler(config: LayoutConfig, profiler: Arc<dyn Profiler>) -> Self {
        Self { config, profiler }
    }

    pub fn from_json(json: &str) -> Result<Self, TrellisError> {
        Ok(Self::new(LayoutConfig::from_json(json)?))
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn profiler(&self) -> &dyn Profiler {
        self.profiler.as_ref()
    }

    /// A fresh, empty cache slot for a newly inserted element.
    pub fn new_slot<L>(&self) -> LayoutCacheSlot<L> {
        LayoutCacheSlot::new(self.config.default_traits)
    }

    /// Returns the cached layout for this request, or measures and caches a
    /// new one.
    ///
    /// Errors from `measure` are returned as they convert into
    /// [`TrellisError`], so a nested measurement failing with a
    /// [`LayoutError`](trellis_layout::LayoutError) surfaces as
    /// [`TrellisError::Layout`].
    ///
    /// If the slot already holds a layout for a newer version than `version`,
    /// the fresh layout is still returned but is not cached; the next request
    /// at the same stale version measures again.
    pub fn layout_that_fits<L, E, F>(
        &self,
        slot: &LayoutCacheSlot<L>,
        version: u64,
        context: &LayoutContext,
        parent_size: Size,
        measure: F,
    ) -> Result<Arc<L>, TrellisError>
    where
        F: FnOnce(&LayoutContext, Size) -> Result<L, E>,
        E: Into<TrellisError>,
    {
        self.resolve(slot, version, context, parent_size, false, measure)
    }

    /// Like [`layout_that_fits`](Self::layout_that_fits), for layouts the
    /// parent computes on the element's behalf during its own pass.
    pub fn layout_requested_from_above<L, E, F>(
        &self,
        slot: &LayoutCacheSlot<L>,
        version: u64,
        context: &LayoutContext,
        parent_size: Size,
        measure: F,
    ) -> Result<Arc<L>, TrellisError>
    where
        F: FnOnce(&LayoutContext, Size) -> Result<L, E>,
        E: Into<TrellisError>,
    {
        self.resolve(slot, version, context, parent_size, true, measure)
    }

    fn resolve<L, E, F>(
        &self,
        slot: &LayoutCacheSlot<L>,
        version: u64,
        context: &LayoutContext,
        parent_size: Size,
        requested_from_above: bool,
        measure: F,
    ) -> Result<Arc<L>, TrellisError>
    where
        F: FnOnce(&LayoutContext, Size) -> Result<L, E>,
        E: Into<TrellisError>,
    {
        if let Some(layout) = slot.lookup(context, parent_size, version, self.profiler()) {
            return Ok(layout);
        }

        if !context.has_significant_area() {
            log::debug!("measuring against a context without significant area: {}", context);
        }

        let started = Instant::now();
        let layout = measure(context, parent_size).map_err(Into::<TrellisError>::into)?;
        let elapsed = started.elapsed();
        self.profiler.record_measurement(elapsed);
        self.profiler.record("measure", elapsed);

        let layout = Arc::new(layout);
        let cached = slot.replace(
            Arc::clone(&layout),
            *context,
            parent_size,
            version,
            requested_from_above,
        );
        if !cached {
            log::debug!("returning uncached layout for superseded v{}", version);
        }
        Ok(layout)
    }
}

impl Default for LayoutSession {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use trellis_layout::{DebugProfiler, LayoutError};
    use trellis_types::TraitSnapshot;

    fn session() -> (LayoutSession, Arc<DebugProfiler>) {
        let profiler = Arc::new(DebugProfiler::new());
        let session = LayoutSession::with_profiler(LayoutConfig::default(), profiler.clone());
        (session, profiler)
    }

    #[test]
    fn test_second_request_is_served_from_cache() {
        let (session, profiler) = session();
        let slot = session.new_slot::<Size>();
        let context = LayoutContext::exact(Size::new(100.0, 44.0), TraitSnapshot::DEFAULT);
        let calls = Cell::new(0);
        let measure = |c: &LayoutContext, _: Size| -> Result<Size, TrellisError> {
            calls.set(calls.get() + 1);
            Ok(c.max())
        };

        let first = session
            .layout_that_fits(&slot, 1, &context, Size::new(200.0, 100.0), measure)
            .unwrap();
        let second = session
            .layout_that_fits(&slot, 1, &context, Size::new(200.0, 100.0), measure)
            .unwrap();

        assert_eq!(calls.get(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(profiler.hits(), 1);
        assert_eq!(profiler.misses(), 1);
        assert_eq!(profiler.measurements(), 1);
    }

    #[test]
    fn test_measurement_error_leaves_slot_untouched() {
        let (session, _) = session();
        let slot = session.new_slot::<Size>();
        let context = LayoutContext::UNCONSTRAINED;

        let err = session
            .layout_that_fits(&slot, 1, &context, Size::ZERO, |_, _| {
                Err::<Size, _>(TrellisError::Measurement("text shaper unavailable".into()))
            })
            .unwrap_err();

        assert!(matches!(err, TrellisError::Measurement(ref msg) if msg == "text shaper unavailable"));
        assert!(slot.load().is_empty());
    }

    #[test]
    fn test_requested_from_above_is_recorded() {
        let (session, _) = session();
        let slot = session.new_slot::<u8>();
        session
            .layout_requested_from_above(&slot, 3, &LayoutContext::ZERO, Size::ZERO, |_, _| {
                Ok::<_, TrellisError>(1u8)
            })
            .unwrap();
        let entry = slot.load();
        assert!(entry.requested_from_above());
        assert_eq!(entry.version(), 3);
    }

    #[test]
    fn test_typed_errors_pass_through() {
        let (session, _) = session();
        let slot = session.new_slot::<Size>();

        let err = session
            .layout_that_fits(&slot, 1, &LayoutContext::ZERO, Size::ZERO, |_, _| {
                LayoutContext::try_new(Size::new(5.0, 0.0), Size::ZERO, TraitSnapshot::DEFAULT)
                    .map(|c| c.max())
            })
            .unwrap_err();

        assert!(matches!(err, TrellisError::Layout(LayoutError::InvalidRange { .. })));
        assert_eq!(err.to_string(), "Layout error: inverted width range: min 5 > max 0");
    }

    #[test]
    fn test_superseded_version_is_returned_but_not_cached() {
        let (session, profiler) = session();
        let slot = session.new_slot::<u64>();
        let context = LayoutContext::UNCONSTRAINED;

        session
            .layout_that_fits(&slot, 5, &context, Size::ZERO, |_, _| Ok::<_, TrellisError>(5))
            .unwrap();
        let stale = session
            .layout_that_fits(&slot, 4, &context, Size::ZERO, |_, _| Ok::<_, TrellisError>(4))
            .unwrap();

        assert_eq!(*stale, 4);
        assert_eq!(slot.load().version(), 5);
        assert_eq!(slot.load().layout().map(|l| **l), Some(5));

        session
            .layout_that_fits(&slot, 4, &context, Size::ZERO, |_, _| Ok::<_, TrellisError>(4))
            .unwrap();
        assert_eq!(profiler.measurements(), 3);
    }

    #[test]
    fn test_from_json_rejects_bad_config() {
        assert!(matches!(
            LayoutSession::from_json("{ not json"),
            Err(TrellisError::Config(_))
        ));
        assert!(LayoutSession::from_json(r#"{"profiling": false}"#).is_ok());
    }
}
