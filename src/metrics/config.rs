use crate::Unit;

/// The configurable options of a metric instrument.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct InstrumentConfig {
    pub(crate) description: Option<String>,
    pub(crate) unit: Option<Unit>,
    pub(crate) library_name: String,
}

impl InstrumentConfig {
    /// Create a config identifying only the instrumenting library.
    pub fn with_library_name<S: Into<String>>(library_name: S) -> Self {
        InstrumentConfig {
            description: None,
            unit: None,
            library_name: library_name.into(),
        }
    }

    /// A human-readable description of the instrument.
    pub fn description(&self) -> Option<&String> {
        self.description.as_ref()
    }

    /// The units the instrument records in.
    pub fn unit(&self) -> Option<&Unit> {
        self.unit.as_ref()
    }

    /// The name of the library declaring the instrument.
    pub fn library_name(&self) -> &str {
        &self.library_name
    }
}
