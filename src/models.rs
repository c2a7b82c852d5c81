use serde::{Deserialize, Serialize};

/// Store configuration, also accepted as `{"debug": true, "suppressErrors": false}`
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct StoreConfig {
    /// Log every statement before it runs
    pub debug: bool,
    /// Log engine failures instead of returning them
    pub suppress_errors: bool,
}

impl StoreConfig {
    pub fn from_record(record: serde_json::Value) -> crate::Result<Self> {
        Ok(serde_json::from_value(record)?)
    }
}
