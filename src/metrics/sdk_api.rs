//! Capability interfaces a metrics backend implements.
//!
//! The facade owns none of the behavior behind these traits: aggregation,
//! export scheduling, and label comparison are all the backend's concern and
//! opaque to this crate. Every trait object stored by the facade is required
//! to be safe for concurrent use, a requirement levied on the backend rather
//! than enforced here.
use crate::metrics::{AsyncRunner, Descriptor, Measurement, MetricsError, Number};
use crate::{Context, KeyValue};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// The core interface a meter implementation provides.
///
/// The instrument constructors return an `(implementation, error)` pair
/// rather than a `Result`: a backend may legitimately return both a usable
/// implementation and an advisory error, and the facade passes both through
/// unaltered. The construction safety net in this crate is the sole consumer
/// of these pairs.
pub trait MeterCore: fmt::Debug {
    /// Create a new synchronous instrument described by `descriptor`.
    fn new_sync_instrument(
        &self,
        descriptor: Descriptor,
    ) -> (
        Option<Arc<dyn SyncInstrument + Send + Sync>>,
        Option<MetricsError>,
    );

    /// Create a new asynchronous instrument described by `descriptor`,
    /// registering `runner` to be invoked on each collection cycle.
    fn new_async_instrument(
        &self,
        descriptor: Descriptor,
        runner: AsyncRunner,
    ) -> (
        Option<Arc<dyn AsyncInstrument + Send + Sync>>,
        Option<MetricsError>,
    );

    /// Atomically record a batch of measurements gathered from any number of
    /// synchronous instruments belonging to this core.
    fn record_batch_with_context(
        &self,
        cx: &Context,
        labels: &[KeyValue],
        measurements: Vec<Measurement>,
    );
}

/// Common behavior of all backend instrument implementations.
pub trait Instrument: fmt::Debug {
    /// The descriptor this instrument was created from.
    fn descriptor(&self) -> &Descriptor;
}

/// A backend instrument accepting values recorded by application threads.
pub trait SyncInstrument: Instrument {
    /// Create an implementation-level bound instrument with the given labels
    /// pre-associated.
    fn bind(&self, labels: &[KeyValue]) -> Arc<dyn SyncBoundInstrument + Send + Sync>;

    /// Record one value against the given labels in the current context.
    fn record_one(&self, number: Number, labels: &[KeyValue]) {
        self.record_one_with_context(&Context::current(), number, labels)
    }

    /// Record one value against the given labels.
    fn record_one_with_context(&self, cx: &Context, number: Number, labels: &[KeyValue]);

    /// Returns self as any, for SDK-side downcasting in batch recording.
    fn as_any(&self) -> &dyn Any;
}

/// A backend instrument with a fixed label set.
pub trait SyncBoundInstrument: fmt::Debug {
    /// Record one value against the pre-associated labels in the current
    /// context.
    fn record_one(&self, number: Number) {
        self.record_one_with_context(&Context::current(), number)
    }

    /// Record one value against the pre-associated labels.
    fn record_one_with_context(&self, cx: &Context, number: Number);

    /// Signal that the label association held by this instrument may be
    /// released. Called at most once per bound instrument.
    fn unbind(&self);
}

/// A backend instrument recorded to only from within a collection callback.
pub trait AsyncInstrument: Instrument {
    /// Returns self as any, for SDK-side downcasting during collection.
    fn as_any(&self) -> &dyn Any;
}
