//! Pipeline descriptors from `PipelineSettings`
//!
//! Entries are either a bare pipeline name or a mapping with parameters:
//!
//! ```yaml
//! PipelineSettings:
//!   - fmri
//!   - name: hcp
//!     params:
//!       fs_license: /opt/freesurfer/license.txt
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A named pipeline with optional parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDescriptor")]
pub struct PipelineDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, Value>,
}

impl PipelineDescriptor {
    /// Create a descriptor without parameters.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: BTreeMap::new(),
        }
    }

    /// Builder-style parameter setter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDescriptor {
    Name(String),
    Full {
        name: String,
        #[serde(default, alias = "parameters")]
        params: BTreeMap<String, Value>,
    },
}

impl From<RawDescriptor> for PipelineDescriptor {
    fn from(raw: RawDescriptor) -> Self {
        match raw {
            RawDescriptor::Name(name) => PipelineDescriptor::named(name),
            RawDescriptor::Full { name, params } => PipelineDescriptor { name, params },
        }
    }
}
