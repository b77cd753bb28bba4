use crate::metrics::{
    sync_instrument::{check_new_sync, SyncBoundInstrument, SyncInstrument},
    Descriptor, InstrumentKind, Measurement, Meter, MetricsError, Number, NumberKind,
};
use crate::{Context, KeyValue};
use std::marker;

/// A metric instrument that records arbitrary per-event values, e.g. request
/// latencies.
#[derive(Debug)]
pub struct ValueRecorder<T> {
    instrument: SyncInstrument<T>,
}

impl<T> ValueRecorder<T>
where
    T: Into<Number>,
{
    /// Create a bound value recorder with the given labels pre-associated,
    /// for repeated low-overhead recording against that fixed label set.
    pub fn bind(&self, labels: &[KeyValue]) -> BoundValueRecorder<T> {
        BoundValueRecorder {
            instrument: self.instrument.bind(labels),
        }
    }

    /// Construct a measurement of `value` for later batch recording. This
    /// does not record anything.
    pub fn measurement(&self, value: T) -> Measurement {
        self.instrument.measurement(value)
    }

    /// Record `value` against the given labels, in the current context.
    pub fn record(&self, value: T, labels: &[KeyValue]) {
        self.record_with_context(&Context::current(), value, labels)
    }

    /// Record `value` against the given labels.
    pub fn record_with_context(&self, cx: &Context, value: T, labels: &[KeyValue]) {
        self.instrument
            .direct_record_with_context(cx, value.into(), labels)
    }
}

/// A value recorder with a fixed label set.
///
/// Call [`unbind`](BoundValueRecorder::unbind) when finished recording so
/// the backend may reclaim the label association.
#[derive(Debug)]
pub struct BoundValueRecorder<T> {
    instrument: SyncBoundInstrument<T>,
}

impl<T> BoundValueRecorder<T>
where
    T: Into<Number>,
{
    /// Record `value` in the current context.
    pub fn record(&self, value: T) {
        self.record_with_context(&Context::current(), value)
    }

    /// Record `value`.
    pub fn record_with_context(&self, cx: &Context, value: T) {
        self.instrument.direct_record_with_context(cx, value.into())
    }

    /// Release the label association held by this value recorder.
    pub fn unbind(self) {
        self.instrument.unbind()
    }
}

/// Configuration for building a value recorder.
#[derive(Debug)]
pub struct ValueRecorderBuilder<'a, T> {
    meter: &'a Meter,
    descriptor: Descriptor,
    _marker: marker::PhantomData<T>,
}

impl<'a, T> ValueRecorderBuilder<'a, T> {
    pub(crate) fn new(meter: &'a Meter, name: String, number_kind: NumberKind) -> Self {
        ValueRecorderBuilder {
            meter,
            descriptor: Descriptor::new(
                name,
                meter.name().to_string(),
                InstrumentKind::ValueRecorder,
                number_kind,
            ),
            _marker: marker::PhantomData,
        }
    }

    /// Set the description of this value recorder.
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.descriptor.set_description(description.into());
        self
    }

    /// Set the units of this value recorder.
    pub fn with_unit(mut self, unit: crate::Unit) -> Self {
        self.descriptor.set_unit(unit);
        self
    }

    /// Create the value recorder.
    ///
    /// The returned recorder is always usable: if the backend failed to
    /// supply an implementation a no-op is substituted, and the accompanying
    /// error describes the anomaly. A backend-reported error passes through
    /// unaltered.
    pub fn init(self) -> (ValueRecorder<T>, Option<MetricsError>) {
        let (instrument, err) = self.meter.new_sync_instrument(self.descriptor);
        let (instrument, err) = check_new_sync(instrument, err);
        (
            ValueRecorder {
                instrument: SyncInstrument::new(instrument),
            },
            err,
        )
    }
}
