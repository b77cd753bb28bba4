//! # Telemeter
//!
//! A thin, type-safe metric instrument facade over a pluggable telemetry
//! backend.
//!
//! Application code declares instruments (counters, value recorders, value
//! observers) through a [`Meter`] and records values through the typed handles
//! the meter returns. The facade never aggregates or exports anything itself:
//! every recorded value is delegated to a backend supplied as a
//! [`sdk_api::MeterCore`] trait object. When a backend fails to produce an
//! instrument implementation, the facade substitutes a shared no-op
//! implementation so the returned handle is always safe to use without any
//! `Option` or null check, and surfaces the anomaly as an advisory
//! [`MetricsError`] instead.
//!
//! ```
//! use telemeter::{global, KeyValue};
//!
//! let meter = global::meter("my-component");
//! let (requests, _) = meter.i64_counter("requests").init();
//!
//! // one-off recording
//! requests.add(1, &[KeyValue::new("path", "/index")]);
//!
//! // repeated recording against a fixed label set
//! let bound = requests.bind(&[KeyValue::new("path", "/healthz")]);
//! bound.add(1);
//! bound.add(1);
//! bound.unbind();
//! ```
//!
//! [`Meter`]: crate::metrics::Meter
//! [`sdk_api::MeterCore`]: crate::metrics::sdk_api::MeterCore
//! [`MetricsError`]: crate::metrics::MetricsError
#![deny(missing_docs, missing_debug_implementations)]

pub mod global;
pub mod metrics;

mod context;
mod kv;

pub use context::Context;
pub use kv::{Key, KeyValue, Unit, Value};
