//! # Revival Options
//!
//! Strictness toggles for a revival call. All three are independent and
//! default to `false`. Options files use camelCase keys (`failOnUnknownFields`,
//! `failOnMissingFields`, `assignOnly`); absent keys keep their default.

use serde::{Deserialize, Serialize};

/// Configuration controlling how strictly a document is revived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RevivalOptions {
    /// Fail when the JSON carries a key the target type has no field for.
    pub fail_on_unknown_fields: bool,
    /// Fail when a declared property has no key in the JSON.
    pub fail_on_missing_fields: bool,
    /// Skip self-reported schemas and post-revival hooks: pure structural
    /// copying onto bare instances.
    pub assign_only: bool,
}

impl RevivalOptions {
    /// Both unknown-field and missing-field checks enabled.
    pub fn strict() -> Self {
        Self {
            fail_on_unknown_fields: true,
            fail_on_missing_fields: true,
            assign_only: false,
        }
    }

    /// Set `fail_on_unknown_fields`.
    pub fn fail_on_unknown_fields(mut self, enabled: bool) -> Self {
        self.fail_on_unknown_fields = enabled;
        self
    }

    /// Set `fail_on_missing_fields`.
    pub fn fail_on_missing_fields(mut self, enabled: bool) -> Self {
        self.fail_on_missing_fields = enabled;
        self
    }

    /// Set `assign_only`.
    pub fn assign_only(mut self, enabled: bool) -> Self {
        self.assign_only = enabled;
        self
    }

    /// Parse options from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Parse options from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
