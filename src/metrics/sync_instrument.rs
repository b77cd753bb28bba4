use crate::metrics::{noop, sdk_api, MetricsError, Number};
use crate::{Context, KeyValue};
use std::marker;
use std::sync::Arc;

/// Measurement is used for reporting a synchronous batch of metric values.
///
/// Instances are created by the synchronous instrument handles (e.g.
/// `Counter::measurement`) and submitted together via
/// `Meter::record_batch`. Constructing one has no side effect; a measurement
/// that is never submitted is simply dropped.
#[derive(Debug)]
pub struct Measurement {
    number: Number,
    instrument: Arc<dyn sdk_api::SyncInstrument + Send + Sync>,
}

impl Measurement {
    pub(crate) fn new(
        number: Number,
        instrument: Arc<dyn sdk_api::SyncInstrument + Send + Sync>,
    ) -> Self {
        Measurement { number, instrument }
    }

    /// The number recorded by this measurement.
    pub fn number(&self) -> &Number {
        &self.number
    }

    /// The instrument that created this measurement.
    ///
    /// This returns an implementation-level object for use by the backend;
    /// application code has no reason to call it.
    pub fn instrument(&self) -> &Arc<dyn sdk_api::SyncInstrument + Send + Sync> {
        &self.instrument
    }
}

/// Wrapper around a backend-implemented sync instrument for a given value
/// type.
#[derive(Debug)]
pub(crate) struct SyncInstrument<T> {
    instrument: Arc<dyn sdk_api::SyncInstrument + Send + Sync>,
    _marker: marker::PhantomData<T>,
}

impl<T> SyncInstrument<T> {
    /// Create a new sync instrument from a backend-implemented instrument.
    pub(crate) fn new(instrument: Arc<dyn sdk_api::SyncInstrument + Send + Sync>) -> Self {
        SyncInstrument {
            instrument,
            _marker: marker::PhantomData,
        }
    }

    /// Create a new bound sync instrument with the given labels
    /// pre-associated.
    pub(crate) fn bind(&self, labels: &[KeyValue]) -> SyncBoundInstrument<T> {
        let bound_instrument = self.instrument.bind(labels);
        SyncBoundInstrument {
            bound_instrument,
            _marker: marker::PhantomData,
        }
    }

    /// Record a value directly to the underlying instrument.
    pub(crate) fn direct_record_with_context(
        &self,
        cx: &Context,
        number: Number,
        labels: &[KeyValue],
    ) {
        self.instrument.record_one_with_context(cx, number, labels)
    }
}

impl<T: Into<Number>> SyncInstrument<T> {
    /// Construct a measurement of `value` without recording it.
    pub(crate) fn measurement(&self, value: T) -> Measurement {
        Measurement::new(value.into(), self.instrument.clone())
    }
}

/// Wrapper around a backend-implemented bound sync instrument.
#[derive(Debug)]
pub(crate) struct SyncBoundInstrument<T> {
    bound_instrument: Arc<dyn sdk_api::SyncBoundInstrument + Send + Sync>,
    _marker: marker::PhantomData<T>,
}

impl<T> SyncBoundInstrument<T> {
    /// Record a value directly to the underlying bound instrument.
    pub(crate) fn direct_record_with_context(&self, cx: &Context, number: Number) {
        self.bound_instrument.record_one_with_context(cx, number)
    }

    /// Release the label association held by the underlying bound
    /// instrument.
    pub(crate) fn unbind(&self) {
        self.bound_instrument.unbind()
    }
}

/// Checks a backend-supplied sync instrument and its accompanying error,
/// substituting the shared no-op implementation when the backend returned
/// none so the caller always receives a usable instrument.
///
/// An error returned by the backend passes through unchanged, even alongside
/// a present implementation. Only when the backend returned neither an
/// implementation nor an error is [`MetricsError::MissingImplementation`]
/// synthesized, so every construction call has a deterministic failure
/// signal.
pub(crate) fn check_new_sync(
    instrument: Option<Arc<dyn sdk_api::SyncInstrument + Send + Sync>>,
    err: Option<MetricsError>,
) -> (
    Arc<dyn sdk_api::SyncInstrument + Send + Sync>,
    Option<MetricsError>,
) {
    match instrument {
        Some(instrument) => (instrument, err),
        None => (
            noop::noop_sync_instrument(),
            err.or(Some(MetricsError::MissingImplementation)),
        ),
    }
}
