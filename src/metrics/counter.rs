use crate::metrics::{
    sync_instrument::{check_new_sync, SyncBoundInstrument, SyncInstrument},
    Descriptor, InstrumentKind, Measurement, Meter, MetricsError, Number, NumberKind,
};
use crate::{Context, KeyValue};
use std::marker;

/// A metric instrument that records monotonically increasing values.
///
/// Whether negative increments are rejected, and how, is the backend's
/// policy; the facade forwards every value as given.
#[derive(Debug)]
pub struct Counter<T> {
    instrument: SyncInstrument<T>,
}

impl<T> Counter<T>
where
    T: Into<Number>,
{
    /// Create a bound counter with the given labels pre-associated, for
    /// repeated low-overhead recording against that fixed label set.
    pub fn bind(&self, labels: &[KeyValue]) -> BoundCounter<T> {
        BoundCounter {
            instrument: self.instrument.bind(labels),
        }
    }

    /// Construct a measurement of `value` for later batch recording. This
    /// does not record anything.
    pub fn measurement(&self, value: T) -> Measurement {
        self.instrument.measurement(value)
    }

    /// Increment this counter by `value` against the given labels, in the
    /// current context.
    pub fn add(&self, value: T, labels: &[KeyValue]) {
        self.add_with_context(&Context::current(), value, labels)
    }

    /// Increment this counter by `value` against the given labels.
    pub fn add_with_context(&self, cx: &Context, value: T, labels: &[KeyValue]) {
        self.instrument
            .direct_record_with_context(cx, value.into(), labels)
    }
}

/// A counter with a fixed label set.
///
/// Call [`unbind`](BoundCounter::unbind) when finished recording so the
/// backend may reclaim the label association.
#[derive(Debug)]
pub struct BoundCounter<T> {
    instrument: SyncBoundInstrument<T>,
}

impl<T> BoundCounter<T>
where
    T: Into<Number>,
{
    /// Increment this counter by `value` in the current context.
    pub fn add(&self, value: T) {
        self.add_with_context(&Context::current(), value)
    }

    /// Increment this counter by `value`.
    pub fn add_with_context(&self, cx: &Context, value: T) {
        self.instrument.direct_record_with_context(cx, value.into())
    }

    /// Release the label association held by this counter.
    pub fn unbind(self) {
        self.instrument.unbind()
    }
}

/// Configuration for building a counter.
#[derive(Debug)]
pub struct CounterBuilder<'a, T> {
    meter: &'a Meter,
    descriptor: Descriptor,
    _marker: marker::PhantomData<T>,
}

impl<'a, T> CounterBuilder<'a, T> {
    pub(crate) fn new(meter: &'a Meter, name: String, number_kind: NumberKind) -> Self {
        CounterBuilder {
            meter,
            descriptor: Descriptor::new(
                name,
                meter.name().to_string(),
                InstrumentKind::Counter,
                number_kind,
            ),
            _marker: marker::PhantomData,
        }
    }

    /// Set the description of this counter.
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.descriptor.set_description(description.into());
        self
    }

    /// Set the units of this counter.
    pub fn with_unit(mut self, unit: crate::Unit) -> Self {
        self.descriptor.set_unit(unit);
        self
    }

    /// Create the counter.
    ///
    /// The returned counter is always usable: if the backend failed to supply
    /// an implementation a no-op is substituted, and the accompanying error
    /// describes the anomaly. A backend-reported error passes through
    /// unaltered.
    pub fn init(self) -> (Counter<T>, Option<MetricsError>) {
        let (instrument, err) = self.meter.new_sync_instrument(self.descriptor);
        let (instrument, err) = check_new_sync(instrument, err);
        (
            Counter {
                instrument: SyncInstrument::new(instrument),
            },
            err,
        )
    }
}
