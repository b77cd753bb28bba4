//! Process-wide meter provider.
//!
//! Until [`set_meter_provider`] is called, the global provider is the no-op
//! provider, so instrumented libraries can record unconditionally and every
//! recording degrades silently when no backend has been installed.
use crate::metrics::{self, Meter, MeterProvider};
use std::sync::{Arc, RwLock};

lazy_static::lazy_static! {
    /// The global `Meter` provider singleton.
    static ref GLOBAL_METER_PROVIDER: RwLock<GlobalMeterProvider> =
        RwLock::new(GlobalMeterProvider::new(metrics::noop::NoopMeterProvider));
}

/// Wraps whichever provider is currently installed globally.
#[derive(Debug, Clone)]
pub struct GlobalMeterProvider {
    provider: Arc<dyn MeterProvider + Send + Sync>,
}

impl MeterProvider for GlobalMeterProvider {
    fn meter(&self, name: &str) -> Meter {
        self.provider.meter(name)
    }
}

impl GlobalMeterProvider {
    /// Create a new global provider wrapping the given provider.
    pub fn new<P>(provider: P) -> Self
    where
        P: MeterProvider + Send + Sync + 'static,
    {
        GlobalMeterProvider {
            provider: Arc::new(provider),
        }
    }
}

/// Install `new_provider` as the process-wide meter provider.
pub fn set_meter_provider<P>(new_provider: P)
where
    P: MeterProvider + Send + Sync + 'static,
{
    let mut global_provider = GLOBAL_METER_PROVIDER
        .write()
        .expect("GLOBAL_METER_PROVIDER RwLock poisoned");
    *global_provider = GlobalMeterProvider::new(new_provider);
}

/// The currently installed process-wide meter provider.
pub fn meter_provider() -> GlobalMeterProvider {
    GLOBAL_METER_PROVIDER
        .read()
        .expect("GLOBAL_METER_PROVIDER RwLock poisoned")
        .clone()
}

/// A meter named for the instrumenting library, from the process-wide
/// provider.
pub fn meter(name: &str) -> Meter {
    meter_provider().meter(name)
}
