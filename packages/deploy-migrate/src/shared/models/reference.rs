//! Block reference roles

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which block-valued argument of the deprecated call a reference came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceRole {
    /// `storage=`: where code is fetched from at run time
    RemoteSource,
    /// `infrastructure=`: compute configuration
    ExecutionEnvironment,
}

impl ReferenceRole {
    /// Keyword argument name in the deprecated call
    pub fn keyword(&self) -> &'static str {
        match self {
            ReferenceRole::RemoteSource => "storage",
            ReferenceRole::ExecutionEnvironment => "infrastructure",
        }
    }
}

impl fmt::Display for ReferenceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
