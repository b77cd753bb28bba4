//! Asynchronous (callback-driven) instrument support.
use crate::metrics::{noop, sdk_api, MetricsError, Number};
use crate::KeyValue;
use std::fmt;
use std::marker;
use std::sync::Arc;

/// Observation is used for reporting a batch of metric values observed from
/// within an asynchronous instrument callback.
#[derive(Debug)]
pub struct Observation {
    number: Number,
    instrument: Arc<dyn sdk_api::AsyncInstrument + Send + Sync>,
}

impl Observation {
    pub(crate) fn new(
        number: Number,
        instrument: Arc<dyn sdk_api::AsyncInstrument + Send + Sync>,
    ) -> Self {
        Observation { number, instrument }
    }

    /// The number recorded by this observation.
    pub fn number(&self) -> &Number {
        &self.number
    }

    /// The instrument that created this observation.
    ///
    /// This returns an implementation-level object for use by the backend;
    /// application code has no reason to call it.
    pub fn instrument(&self) -> &Arc<dyn sdk_api::AsyncInstrument + Send + Sync> {
        &self.instrument
    }
}

/// The handle an observer callback receives to report observed values.
///
/// Observations reported through one result are forwarded together to the
/// collector that triggered the callback, which is responsible for routing
/// them to the backend.
pub struct ObserverResult<T> {
    instrument: Arc<dyn sdk_api::AsyncInstrument + Send + Sync>,
    f: fn(&[KeyValue], &[Observation]),
    _marker: marker::PhantomData<T>,
}

impl<T> ObserverResult<T> {
    fn new(
        instrument: Arc<dyn sdk_api::AsyncInstrument + Send + Sync>,
        f: fn(&[KeyValue], &[Observation]),
    ) -> Self {
        ObserverResult {
            instrument,
            f,
            _marker: marker::PhantomData,
        }
    }
}

impl<T: Into<Number>> ObserverResult<T> {
    /// Report one observed value against the given labels.
    pub fn observe(&self, value: T, labels: &[KeyValue]) {
        (self.f)(
            labels,
            &[Observation::new(value.into(), self.instrument.clone())],
        )
    }
}

impl<T> fmt::Debug for ObserverResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverResult")
            .field("instrument", &self.instrument)
            .finish()
    }
}

/// The callback registered with an asynchronous instrument, typed by the
/// numeric kind the instrument was declared over.
///
/// A collector (backend-side, out of scope here) invokes the runner once per
/// collection cycle; the runner hands the user callback an
/// [`ObserverResult`] wired to the collector's sink.
pub enum AsyncRunner {
    /// A callback observing i64 values.
    I64(Box<dyn Fn(ObserverResult<i64>) + Send + Sync>),
    /// A callback observing f64 values.
    F64(Box<dyn Fn(ObserverResult<f64>) + Send + Sync>),
}

impl AsyncRunner {
    /// Run the callback once, delivering its observations to `collect`.
    pub fn run(
        &self,
        instrument: Arc<dyn sdk_api::AsyncInstrument + Send + Sync>,
        collect: fn(&[KeyValue], &[Observation]),
    ) {
        match self {
            AsyncRunner::I64(callback) => callback(ObserverResult::new(instrument, collect)),
            AsyncRunner::F64(callback) => callback(ObserverResult::new(instrument, collect)),
        }
    }
}

impl fmt::Debug for AsyncRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsyncRunner::I64(_) => f.write_str("AsyncRunner::I64(..)"),
            AsyncRunner::F64(_) => f.write_str("AsyncRunner::F64(..)"),
        }
    }
}

/// Wrapper around a backend-implemented async instrument for a given value
/// type.
#[derive(Debug)]
pub(crate) struct AsyncInstrument<T> {
    instrument: Arc<dyn sdk_api::AsyncInstrument + Send + Sync>,
    _marker: marker::PhantomData<T>,
}

impl<T> AsyncInstrument<T> {
    pub(crate) fn new(instrument: Arc<dyn sdk_api::AsyncInstrument + Send + Sync>) -> Self {
        AsyncInstrument {
            instrument,
            _marker: marker::PhantomData,
        }
    }
}

impl<T: Into<Number>> AsyncInstrument<T> {
    /// Construct an observation of `value` without recording it.
    pub(crate) fn observation(&self, value: T) -> Observation {
        Observation::new(value.into(), self.instrument.clone())
    }
}

/// Checks a backend-supplied async instrument and its accompanying error,
/// substituting the shared no-op implementation when the backend returned
/// none. Mirrors [`check_new_sync`](super::sync_instrument::check_new_sync).
pub(crate) fn check_new_async(
    instrument: Option<Arc<dyn sdk_api::AsyncInstrument + Send + Sync>>,
    err: Option<MetricsError>,
) -> (
    Arc<dyn sdk_api::AsyncInstrument + Send + Sync>,
    Option<MetricsError>,
) {
    match instrument {
        Some(instrument) => (instrument, err),
        None => (
            noop::noop_async_instrument(),
            err.or(Some(MetricsError::MissingImplementation)),
        ),
    }
}
