//! Adapters from a backend [`MeterCore`] to a [`MeterProvider`].
//!
//! Policy questions such as how duplicately-named instruments are treated
//! remain with the backend core; this adapter adds nothing beyond naming.
use crate::metrics::{sdk_api::MeterCore, Meter, MeterProvider};
use std::sync::Arc;

/// Create a meter provider backed by the given core.
pub fn meter_provider(core: Arc<dyn MeterCore + Send + Sync>) -> RegistryMeterProvider {
    RegistryMeterProvider(core)
}

/// A [`MeterProvider`] handing out named meters over one shared core.
#[derive(Debug, Clone)]
pub struct RegistryMeterProvider(Arc<dyn MeterCore + Send + Sync>);

impl MeterProvider for RegistryMeterProvider {
    fn meter(&self, name: &str) -> Meter {
        Meter::new(name, self.0.clone())
    }
}
