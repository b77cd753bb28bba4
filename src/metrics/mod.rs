//! # Metric instrument facade
//!
//! Instruments are declared through a [`Meter`], which delegates their
//! construction to a pluggable backend implementing
//! [`sdk_api::MeterCore`]. The handles returned to application code never
//! fail to construct and never need a null check: when a backend returns no
//! implementation, the construction safety net substitutes a shared no-op
//! and reports the anomaly as an advisory [`MetricsError`] alongside the
//! handle.
use crate::{Context, KeyValue};
use std::fmt;
use std::result;
use std::sync::{Arc, PoisonError, TryLockError};
use thiserror::Error;

mod async_instrument;
mod config;
mod counter;
mod descriptor;
pub mod noop;
mod number;
pub mod registry;
pub mod sdk_api;
mod sync_instrument;
mod value_observer;
mod value_recorder;

pub use async_instrument::{AsyncRunner, Observation, ObserverResult};
pub use config::InstrumentConfig;
pub use counter::{BoundCounter, Counter, CounterBuilder};
pub use descriptor::Descriptor;
pub use number::{AtomicNumber, Number, NumberKind};
pub use sync_instrument::Measurement;
pub use value_observer::{ValueObserver, ValueObserverBuilder};
pub use value_recorder::{BoundValueRecorder, ValueRecorder, ValueRecorderBuilder};

/// A specialized `Result` type for metric operations.
pub type Result<T> = result::Result<T, MetricsError>;

/// Errors returned by the metrics facade.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Other errors propagated from the backend, passed through verbatim.
    #[error("metrics error: {0}")]
    Other(String),
    /// The backend's instrument constructor returned neither an
    /// implementation nor an error.
    #[error("meter returned no instrument implementation")]
    MissingImplementation,
}

impl<T> From<TryLockError<T>> for MetricsError {
    fn from(err: TryLockError<T>) -> Self {
        MetricsError::Other(err.to_string())
    }
}

impl<T> From<PoisonError<T>> for MetricsError {
    fn from(err: PoisonError<T>) -> Self {
        MetricsError::Other(err.to_string())
    }
}

/// The kinds of metric instrument this facade can declare.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum InstrumentKind {
    /// A synchronous instrument accumulating monotonic increments.
    Counter,
    /// A synchronous instrument recording per-event values.
    ValueRecorder,
    /// An asynchronous instrument observing values from a callback.
    ValueObserver,
}

/// Meter is the entry point through which an instrumented library declares
/// its metric instruments.
///
/// Applications are expected to construct long-lived instruments; there is
/// no method to delete them, and instrument handles remain usable for the
/// life of the process.
#[derive(Debug, Clone)]
pub struct Meter {
    name: String,
    core: Arc<dyn sdk_api::MeterCore + Send + Sync>,
}

impl Meter {
    /// Create a new meter over the given backend core, named for the
    /// instrumenting library.
    pub fn new<T: Into<String>>(name: T, core: Arc<dyn sdk_api::MeterCore + Send + Sync>) -> Self {
        Meter {
            name: name.into(),
            core,
        }
    }

    /// The name of the instrumenting library this meter was created for.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declare a new i64 counter.
    pub fn i64_counter<T: Into<String>>(&self, name: T) -> CounterBuilder<'_, i64> {
        CounterBuilder::new(self, name.into(), NumberKind::I64)
    }

    /// Declare a new f64 counter.
    pub fn f64_counter<T: Into<String>>(&self, name: T) -> CounterBuilder<'_, f64> {
        CounterBuilder::new(self, name.into(), NumberKind::F64)
    }

    /// Declare a new i64 value recorder.
    pub fn i64_value_recorder<T: Into<String>>(&self, name: T) -> ValueRecorderBuilder<'_, i64> {
        ValueRecorderBuilder::new(self, name.into(), NumberKind::I64)
    }

    /// Declare a new f64 value recorder.
    pub fn f64_value_recorder<T: Into<String>>(&self, name: T) -> ValueRecorderBuilder<'_, f64> {
        ValueRecorderBuilder::new(self, name.into(), NumberKind::F64)
    }

    /// Declare a new i64 value observer whose `callback` is invoked on each
    /// collection cycle.
    pub fn i64_value_observer<T, F>(&self, name: T, callback: F) -> ValueObserverBuilder<'_, i64>
    where
        T: Into<String>,
        F: Fn(ObserverResult<i64>) + Send + Sync + 'static,
    {
        ValueObserverBuilder::new(
            self,
            Descriptor::new(
                name.into(),
                self.name.clone(),
                InstrumentKind::ValueObserver,
                NumberKind::I64,
            ),
            AsyncRunner::I64(Box::new(callback)),
        )
    }

    /// Declare a new f64 value observer whose `callback` is invoked on each
    /// collection cycle.
    pub fn f64_value_observer<T, F>(&self, name: T, callback: F) -> ValueObserverBuilder<'_, f64>
    where
        T: Into<String>,
        F: Fn(ObserverResult<f64>) + Send + Sync + 'static,
    {
        ValueObserverBuilder::new(
            self,
            Descriptor::new(
                name.into(),
                self.name.clone(),
                InstrumentKind::ValueObserver,
                NumberKind::F64,
            ),
            AsyncRunner::F64(Box::new(callback)),
        )
    }

    /// Atomically record a batch of measurements in the current context.
    pub fn record_batch<T: IntoIterator<Item = Measurement>>(
        &self,
        labels: &[KeyValue],
        measurements: T,
    ) {
        self.record_batch_with_context(&Context::current(), labels, measurements)
    }

    /// Atomically record a batch of measurements.
    ///
    /// The measurements are handed to the backend as an ordered sequence;
    /// any ordering guarantee across them is the backend's to define.
    pub fn record_batch_with_context<T: IntoIterator<Item = Measurement>>(
        &self,
        cx: &Context,
        labels: &[KeyValue],
        measurements: T,
    ) {
        self.core
            .record_batch_with_context(cx, labels, measurements.into_iter().collect())
    }

    pub(crate) fn new_sync_instrument(
        &self,
        descriptor: Descriptor,
    ) -> (
        Option<Arc<dyn sdk_api::SyncInstrument + Send + Sync>>,
        Option<MetricsError>,
    ) {
        self.core.new_sync_instrument(descriptor)
    }

    pub(crate) fn new_async_instrument(
        &self,
        descriptor: Descriptor,
        runner: AsyncRunner,
    ) -> (
        Option<Arc<dyn sdk_api::AsyncInstrument + Send + Sync>>,
        Option<MetricsError>,
    ) {
        self.core.new_async_instrument(descriptor, runner)
    }
}

/// Supports named meter instances backed by a single core.
pub trait MeterProvider: fmt::Debug {
    /// Create a meter named for the instrumenting library.
    fn meter(&self, name: &str) -> Meter;
}
