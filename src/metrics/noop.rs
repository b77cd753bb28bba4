//! # No-op metrics implementation
//!
//! This implementation is returned as the global meter if no provider has
//! been set, and is substituted by the construction safety net whenever a
//! backend fails to return an instrument implementation. It is also useful
//! for testing purposes as it is intended to have minimal resource
//! utilization and runtime impact.
use crate::metrics::{
    sdk_api::{
        AsyncInstrument, Instrument, MeterCore, SyncBoundInstrument, SyncInstrument,
    },
    AsyncRunner, Descriptor, InstrumentKind, Measurement, Meter, MeterProvider, MetricsError,
    Number, NumberKind,
};
use crate::{Context, KeyValue};
use std::any::Any;
use std::sync::Arc;

lazy_static::lazy_static! {
    static ref NOOP_DESCRIPTOR: Descriptor = Descriptor::new(
        String::new(),
        "noop".to_string(),
        InstrumentKind::Counter,
        NumberKind::I64,
    );
    static ref NOOP_SYNC_INSTRUMENT: Arc<NoopSyncInstrument> = Arc::new(NoopSyncInstrument);
    static ref NOOP_BOUND_SYNC_INSTRUMENT: Arc<NoopBoundSyncInstrument> =
        Arc::new(NoopBoundSyncInstrument);
    static ref NOOP_ASYNC_INSTRUMENT: Arc<NoopAsyncInstrument> = Arc::new(NoopAsyncInstrument);
}

/// The process-wide shared no-op sync instrument.
///
/// The no-op instruments are stateless and hold no resources, so a single
/// immutable instance serves every substitution.
pub(crate) fn noop_sync_instrument() -> Arc<dyn SyncInstrument + Send + Sync> {
    NOOP_SYNC_INSTRUMENT.clone()
}

/// The process-wide shared no-op async instrument.
pub(crate) fn noop_async_instrument() -> Arc<dyn AsyncInstrument + Send + Sync> {
    NOOP_ASYNC_INSTRUMENT.clone()
}

/// A no-op instance of a `MeterProvider`.
#[derive(Debug)]
pub struct NoopMeterProvider;

impl MeterProvider for NoopMeterProvider {
    fn meter(&self, name: &str) -> Meter {
        Meter::new(name, Arc::new(NoopMeterCore))
    }
}

/// A no-op instance of a `MeterCore`.
#[derive(Debug)]
pub struct NoopMeterCore;

impl MeterCore for NoopMeterCore {
    fn new_sync_instrument(
        &self,
        _descriptor: Descriptor,
    ) -> (
        Option<Arc<dyn SyncInstrument + Send + Sync>>,
        Option<MetricsError>,
    ) {
        (Some(noop_sync_instrument()), None)
    }

    fn new_async_instrument(
        &self,
        _descriptor: Descriptor,
        _runner: AsyncRunner,
    ) -> (
        Option<Arc<dyn AsyncInstrument + Send + Sync>>,
        Option<MetricsError>,
    ) {
        (Some(noop_async_instrument()), None)
    }

    fn record_batch_with_context(
        &self,
        _cx: &Context,
        _labels: &[KeyValue],
        _measurements: Vec<Measurement>,
    ) {
        // Ignored
    }
}

/// A no-op sync instrument.
#[derive(Debug)]
pub struct NoopSyncInstrument;

impl Instrument for NoopSyncInstrument {
    fn descriptor(&self) -> &Descriptor {
        &NOOP_DESCRIPTOR
    }
}

impl SyncInstrument for NoopSyncInstrument {
    fn bind(&self, _labels: &[KeyValue]) -> Arc<dyn SyncBoundInstrument + Send + Sync> {
        NOOP_BOUND_SYNC_INSTRUMENT.clone()
    }

    fn record_one_with_context(&self, _cx: &Context, _number: Number, _labels: &[KeyValue]) {
        // Ignored
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A no-op bound sync instrument.
#[derive(Debug)]
pub struct NoopBoundSyncInstrument;

impl SyncBoundInstrument for NoopBoundSyncInstrument {
    fn record_one_with_context(&self, _cx: &Context, _number: Number) {
        // Ignored
    }

    fn unbind(&self) {
        // Ignored
    }
}

/// A no-op async instrument.
#[derive(Debug)]
pub struct NoopAsyncInstrument;

impl Instrument for NoopAsyncInstrument {
    fn descriptor(&self) -> &Descriptor {
        &NOOP_DESCRIPTOR
    }
}

impl AsyncInstrument for NoopAsyncInstrument {
    fn as_any(&self) -> &dyn Any {
        self
    }
}
