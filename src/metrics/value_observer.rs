use crate::metrics::{
    async_instrument::{check_new_async, AsyncInstrument},
    AsyncRunner, Descriptor, Meter, MetricsError, Number, Observation,
};
use std::marker;

/// A metric instrument that observes values on demand, from a callback
/// invoked by the backend's collector rather than by application threads.
#[derive(Debug)]
pub struct ValueObserver<T> {
    instrument: AsyncInstrument<T>,
}

impl<T> ValueObserver<T>
where
    T: Into<Number>,
{
    /// Construct an observation of `value` for delivery from within a batch
    /// observer callback. This does not record anything.
    pub fn observation(&self, value: T) -> Observation {
        self.instrument.observation(value)
    }
}

/// Configuration for building a value observer.
#[derive(Debug)]
pub struct ValueObserverBuilder<'a, T> {
    meter: &'a Meter,
    descriptor: Descriptor,
    runner: AsyncRunner,
    _marker: marker::PhantomData<T>,
}

impl<'a, T> ValueObserverBuilder<'a, T> {
    pub(crate) fn new(meter: &'a Meter, descriptor: Descriptor, runner: AsyncRunner) -> Self {
        ValueObserverBuilder {
            meter,
            descriptor,
            runner,
            _marker: marker::PhantomData,
        }
    }

    /// Set the description of this value observer.
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.descriptor.set_description(description.into());
        self
    }

    /// Set the units of this value observer.
    pub fn with_unit(mut self, unit: crate::Unit) -> Self {
        self.descriptor.set_unit(unit);
        self
    }

    /// Create the value observer.
    ///
    /// The returned observer is always usable: if the backend failed to
    /// supply an implementation a no-op is substituted, and the accompanying
    /// error describes the anomaly. A backend-reported error passes through
    /// unaltered.
    pub fn init(self) -> (ValueObserver<T>, Option<MetricsError>) {
        let (instrument, err) = self.meter.new_async_instrument(self.descriptor, self.runner);
        let (instrument, err) = check_new_async(instrument, err);
        (
            ValueObserver {
                instrument: AsyncInstrument::new(instrument),
            },
            err,
        )
    }
}
