use serde::{Deserialize, Serialize};

/// Storage backend powering the staffing stores.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Keep all records in process memory. Suitable for tests and demos.
    #[default]
    InMemory,
}

/// Settings controlling how the staffing service wires its stores.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaffingSettings {
    /// Selected storage backend.
    pub backend: StoreBackend,
}
