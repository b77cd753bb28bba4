//! Facade behavior against a mock backend core.
use std::any::Any;
use std::cell::RefCell;
use std::sync::{Arc, Mutex};

use telemeter::metrics::{
    noop::NoopSyncInstrument, registry, sdk_api, AsyncRunner, Descriptor, InstrumentKind,
    Measurement, Meter, MeterProvider, MetricsError, Number, NumberKind, Observation,
};
use telemeter::{Context, KeyValue, Unit};

/// One backend call observed by the mock core or its instruments.
#[derive(Debug, Clone, PartialEq)]
enum Event {
    NewSync(Descriptor),
    NewAsync(Descriptor),
    Bind(Vec<KeyValue>),
    RecordOne(Number, Vec<KeyValue>),
    BoundRecordOne(Number),
    Unbind,
    Batch(Vec<Number>, Vec<KeyValue>),
}

#[derive(Debug, Default)]
struct Log(Mutex<Vec<Event>>);

impl Log {
    fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

/// What the mock core's instrument constructors should hand back.
#[derive(Debug, Clone)]
enum Construction {
    Implemented,
    ImplementedWithError(String),
    Missing,
    MissingWithError(String),
}

#[derive(Debug)]
struct MockSyncInstrument {
    descriptor: Descriptor,
    log: Arc<Log>,
}

impl sdk_api::Instrument for MockSyncInstrument {
    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }
}

impl sdk_api::SyncInstrument for MockSyncInstrument {
    fn bind(&self, labels: &[KeyValue]) -> Arc<dyn sdk_api::SyncBoundInstrument + Send + Sync> {
        self.log.push(Event::Bind(labels.to_vec()));
        Arc::new(MockBoundInstrument {
            log: self.log.clone(),
        })
    }

    fn record_one_with_context(&self, _cx: &Context, number: Number, labels: &[KeyValue]) {
        self.log.push(Event::RecordOne(number, labels.to_vec()));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
struct MockBoundInstrument {
    log: Arc<Log>,
}

impl sdk_api::SyncBoundInstrument for MockBoundInstrument {
    fn record_one_with_context(&self, _cx: &Context, number: Number) {
        self.log.push(Event::BoundRecordOne(number));
    }

    fn unbind(&self) {
        self.log.push(Event::Unbind);
    }
}

#[derive(Debug)]
struct MockAsyncInstrument {
    descriptor: Descriptor,
}

impl sdk_api::Instrument for MockAsyncInstrument {
    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }
}

impl sdk_api::AsyncInstrument for MockAsyncInstrument {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
struct MockCore {
    log: Arc<Log>,
    construction: Construction,
    runner: Mutex<Option<AsyncRunner>>,
}

impl MockCore {
    fn new(construction: Construction) -> Arc<Self> {
        Arc::new(MockCore {
            log: Arc::new(Log::default()),
            construction,
            runner: Mutex::new(None),
        })
    }
}

fn test_meter(core: &Arc<MockCore>) -> Meter {
    Meter::new("test", core.clone())
}

impl sdk_api::MeterCore for MockCore {
    fn new_sync_instrument(
        &self,
        descriptor: Descriptor,
    ) -> (
        Option<Arc<dyn sdk_api::SyncInstrument + Send + Sync>>,
        Option<MetricsError>,
    ) {
        self.log.push(Event::NewSync(descriptor.clone()));
        let instrument = || {
            Arc::new(MockSyncInstrument {
                descriptor,
                log: self.log.clone(),
            }) as Arc<dyn sdk_api::SyncInstrument + Send + Sync>
        };
        match &self.construction {
            Construction::Implemented => (Some(instrument()), None),
            Construction::ImplementedWithError(message) => {
                (Some(instrument()), Some(MetricsError::Other(message.clone())))
            }
            Construction::Missing => (None, None),
            Construction::MissingWithError(message) => {
                (None, Some(MetricsError::Other(message.clone())))
            }
        }
    }

    fn new_async_instrument(
        &self,
        descriptor: Descriptor,
        runner: AsyncRunner,
    ) -> (
        Option<Arc<dyn sdk_api::AsyncInstrument + Send + Sync>>,
        Option<MetricsError>,
    ) {
        self.log.push(Event::NewAsync(descriptor.clone()));
        *self.runner.lock().unwrap() = Some(runner);
        match &self.construction {
            Construction::Implemented => (Some(Arc::new(MockAsyncInstrument { descriptor })), None),
            Construction::ImplementedWithError(message) => (
                Some(Arc::new(MockAsyncInstrument { descriptor })),
                Some(MetricsError::Other(message.clone())),
            ),
            Construction::Missing => (None, None),
            Construction::MissingWithError(message) => {
                (None, Some(MetricsError::Other(message.clone())))
            }
        }
    }

    fn record_batch_with_context(
        &self,
        _cx: &Context,
        labels: &[KeyValue],
        measurements: Vec<Measurement>,
    ) {
        self.log.push(Event::Batch(
            measurements.iter().map(|m| *m.number()).collect(),
            labels.to_vec(),
        ));
    }
}

#[test]
fn wraps_exact_implementation_and_passes_error_through() {
    let core = MockCore::new(Construction::ImplementedWithError("warning".to_string()));
    let (counter, err) = test_meter(&core).i64_counter("hits").init();

    match err {
        Some(MetricsError::Other(message)) => assert_eq!(message, "warning"),
        other => panic!("expected the backend error, got {:?}", other),
    }

    // the handle wraps the backend's instrument, not a substitute
    let measurement = counter.measurement(1);
    let mock = measurement
        .instrument()
        .as_any()
        .downcast_ref::<MockSyncInstrument>();
    assert!(mock.is_some());
}

#[test]
fn missing_implementation_substitutes_noop_and_sentinel() {
    let core = MockCore::new(Construction::Missing);
    let (counter, err) = test_meter(&core).i64_counter("hits").init();

    assert!(matches!(err, Some(MetricsError::MissingImplementation)));

    let measurement = counter.measurement(1);
    assert!(measurement
        .instrument()
        .as_any()
        .downcast_ref::<NoopSyncInstrument>()
        .is_some());
}

#[test]
fn missing_implementation_keeps_backend_error() {
    let core = MockCore::new(Construction::MissingWithError("boom".to_string()));
    let (counter, err) = test_meter(&core).f64_counter("hits").init();

    match err {
        Some(MetricsError::Other(message)) => assert_eq!(message, "boom"),
        other => panic!("expected the backend error, got {:?}", other),
    }

    assert!(counter
        .measurement(1.0)
        .instrument()
        .as_any()
        .downcast_ref::<NoopSyncInstrument>()
        .is_some());
}

#[test]
fn missing_implementation_records_as_noop() {
    let core = MockCore::new(Construction::Missing);
    let meter = test_meter(&core);

    let (counter, _) = meter.i64_counter("hits").init();
    counter.add(1, &[KeyValue::new("k", "v")]);
    let bound = counter.bind(&[KeyValue::new("k", "v")]);
    bound.add(1);
    bound.unbind();

    let (recorder, _) = meter.f64_value_recorder("latency").init();
    recorder.record(0.5, &[]);

    // nothing reached the backend besides the construction attempts
    let events = core.log.take();
    assert!(events
        .iter()
        .all(|event| matches!(event, Event::NewSync(_))));
}

#[test]
fn measurement_preserves_value_and_kind() {
    let core = MockCore::new(Construction::Implemented);
    let meter = test_meter(&core);

    let (counter, _) = meter.i64_counter("hits").init();
    let measurement = counter.measurement(5);
    assert_eq!(*measurement.number(), Number::I64(5));
    assert_eq!(measurement.number().kind(), NumberKind::I64);

    let (recorder, _) = meter.f64_value_recorder("latency").init();
    let measurement = recorder.measurement(0.25);
    assert_eq!(*measurement.number(), Number::F64(0.25));
    assert_eq!(measurement.number().kind(), NumberKind::F64);
}

#[test]
fn bound_and_unbound_recording_reach_the_backend_alike() {
    let core = MockCore::new(Construction::Implemented);
    let (recorder, _) = test_meter(&core).i64_value_recorder("latency").init();
    let labels = [KeyValue::new("path", "/index")];
    core.log.take();

    recorder.record(7, &labels);
    let unbound_events = core.log.take();
    assert_eq!(
        unbound_events,
        vec![Event::RecordOne(Number::I64(7), labels.to_vec())]
    );

    let bound = recorder.bind(&labels);
    bound.record(7);
    let bound_events = core.log.take();
    assert_eq!(
        bound_events,
        vec![
            Event::Bind(labels.to_vec()),
            Event::BoundRecordOne(Number::I64(7)),
        ]
    );
}

#[test]
fn unbind_releases_the_backend_binding_once() {
    let core = MockCore::new(Construction::Implemented);
    let (counter, _) = test_meter(&core).i64_counter("hits").init();

    let bound = counter.bind(&[KeyValue::new("k", "v")]);
    bound.unbind();

    let unbinds = core
        .log
        .take()
        .into_iter()
        .filter(|event| *event == Event::Unbind)
        .count();
    assert_eq!(unbinds, 1);
}

#[test]
fn counter_bind_record_unbind_in_order() {
    let core = MockCore::new(Construction::Implemented);
    let (counter, err) = test_meter(&core).i64_counter("hits").init();
    assert!(err.is_none());
    let labels = [KeyValue::new("k", "v")];
    core.log.take();

    let bound = counter.bind(&labels);
    bound.add(5);
    bound.unbind();

    assert_eq!(
        core.log.take(),
        vec![
            Event::Bind(labels.to_vec()),
            Event::BoundRecordOne(Number::I64(5)),
            Event::Unbind,
        ]
    );
}

#[test]
fn record_batch_hands_measurements_over_in_order() {
    let core = MockCore::new(Construction::Implemented);
    let meter = test_meter(&core);
    let (hits, _) = meter.i64_counter("hits").init();
    let (latency, _) = meter.f64_value_recorder("latency").init();
    let labels = [KeyValue::new("path", "/index")];
    core.log.take();

    meter.record_batch(
        &labels,
        vec![hits.measurement(1), latency.measurement(0.25)],
    );

    assert_eq!(
        core.log.take(),
        vec![Event::Batch(
            vec![Number::I64(1), Number::F64(0.25)],
            labels.to_vec(),
        )]
    );
}

#[test]
fn builder_options_reach_the_backend_descriptor() {
    let core = MockCore::new(Construction::Implemented);
    let (_, err) = test_meter(&core)
        .f64_value_recorder("latency")
        .with_description("request latency")
        .with_unit(Unit::new("ms"))
        .init();
    assert!(err.is_none());

    match core.log.take().as_slice() {
        [Event::NewSync(descriptor)] => {
            assert_eq!(descriptor.name(), "latency");
            assert_eq!(descriptor.library_name(), "test");
            assert_eq!(*descriptor.instrument_kind(), InstrumentKind::ValueRecorder);
            assert_eq!(*descriptor.number_kind(), NumberKind::F64);
            assert_eq!(descriptor.description().map(String::as_str), Some("request latency"));
            assert_eq!(descriptor.unit(), Some("ms"));
        }
        other => panic!("expected one construction call, got {:?}", other),
    }
}

thread_local! {
    static OBSERVED: RefCell<Vec<(Vec<KeyValue>, Number)>> = RefCell::new(Vec::new());
}

fn collect(labels: &[KeyValue], observations: &[Observation]) {
    OBSERVED.with(|observed| {
        let mut observed = observed.borrow_mut();
        for observation in observations {
            observed.push((labels.to_vec(), *observation.number()));
        }
    });
}

#[test]
fn observer_callback_delivers_observations_to_the_collector() {
    let core = MockCore::new(Construction::Implemented);
    let (observer, err) = test_meter(&core)
        .i64_value_observer("queue_depth", |result| {
            result.observe(42, &[KeyValue::new("queue", "inbound")]);
        })
        .init();
    assert!(err.is_none());

    // drive one collection cycle the way a backend collector would
    let runner = core.runner.lock().unwrap().take().expect("runner registered");
    runner.run(observer.observation(0).instrument().clone(), collect);

    OBSERVED.with(|observed| {
        assert_eq!(
            *observed.borrow(),
            vec![(
                vec![KeyValue::new("queue", "inbound")],
                Number::I64(42),
            )]
        );
        observed.borrow_mut().clear();
    });
}

#[test]
fn observer_missing_implementation_substitutes_noop() {
    let core = MockCore::new(Construction::Missing);
    let (observer, err) = test_meter(&core)
        .f64_value_observer("temperature", |_| {})
        .init();

    assert!(matches!(err, Some(MetricsError::MissingImplementation)));

    // observation construction stays panic-free over the substitute
    let observation = observer.observation(21.5);
    assert_eq!(*observation.number(), Number::F64(21.5));
}

#[test]
fn registry_provider_shares_one_core() {
    let core = MockCore::new(Construction::Implemented);
    let provider = registry::meter_provider(core.clone());

    let (counter, err) = provider.meter("component-a").i64_counter("hits").init();
    assert!(err.is_none());
    core.log.take();

    counter.add(3, &[]);
    assert_eq!(
        core.log.take(),
        vec![Event::RecordOne(Number::I64(3), vec![])]
    );
}
