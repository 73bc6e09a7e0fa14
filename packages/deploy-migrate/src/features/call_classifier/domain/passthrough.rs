//! Pass-through configuration fields
//!
//! Keys carried from the deprecated call into `.serve()` / `.deploy()` as they
//! were written. Output order is the declaration order of `PassthroughKey`,
//! whatever order the script used.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::shared::models::{Keyword, PyExpr};

/// Allow-listed keyword, in canonical output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassthroughKey {
    Name,
    Description,
    Version,
    Tags,
    Schedule,
    Parameters,
    IsScheduleActive,
    WorkPoolName,
    WorkQueueName,
    JobVariables,
    Triggers,
    Image,
}

impl PassthroughKey {
    pub const ALL: [PassthroughKey; 12] = [
        PassthroughKey::Name,
        PassthroughKey::Description,
        PassthroughKey::Version,
        PassthroughKey::Tags,
        PassthroughKey::Schedule,
        PassthroughKey::Parameters,
        PassthroughKey::IsScheduleActive,
        PassthroughKey::WorkPoolName,
        PassthroughKey::WorkQueueName,
        PassthroughKey::JobVariables,
        PassthroughKey::Triggers,
        PassthroughKey::Image,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PassthroughKey::Name => "name",
            PassthroughKey::Description => "description",
            PassthroughKey::Version => "version",
            PassthroughKey::Tags => "tags",
            PassthroughKey::Schedule => "schedule",
            PassthroughKey::Parameters => "parameters",
            PassthroughKey::IsScheduleActive => "is_schedule_active",
            PassthroughKey::WorkPoolName => "work_pool_name",
            PassthroughKey::WorkQueueName => "work_queue_name",
            PassthroughKey::JobVariables => "job_variables",
            PassthroughKey::Triggers => "triggers",
            PassthroughKey::Image => "image",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == keyword)
    }

    /// Keys only `.deploy()` accepts
    pub fn is_deploy_only(self) -> bool {
        matches!(
            self,
            PassthroughKey::WorkPoolName
                | PassthroughKey::WorkQueueName
                | PassthroughKey::JobVariables
                | PassthroughKey::Image
        )
    }
}

impl fmt::Display for PassthroughKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Old spelling of `job_variables`
pub const INFRA_OVERRIDES: &str = "infra_overrides";

/// Hints the old API needed and the new ones compute themselves
pub const INTERNAL_KEYWORDS: &[&str] = &[
    "flow_name",
    "timestamp",
    "parameter_openapi_schema",
    "manifest_path",
];

/// Allow-listed keyword values keyed (and therefore ordered) by `PassthroughKey`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassthroughFields {
    fields: BTreeMap<PassthroughKey, PyExpr>,
}

impl PassthroughFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect allow-listed keywords; `skip` names keywords handled elsewhere.
    ///
    /// `infra_overrides` becomes `job_variables` and replaces an explicit
    /// `job_variables`. Unknown and internal keywords are dropped.
    pub fn collect(keywords: &[Keyword], skip: &[&str]) -> Self {
        let mut fields = Self::new();
        let mut infra_overrides = None;

        for keyword in keywords {
            let Some(arg) = keyword.arg.as_deref() else {
                debug!("dropping **mapping argument");
                continue;
            };
            if skip.contains(&arg) {
                continue;
            }
            if arg == INFRA_OVERRIDES {
                infra_overrides = Some(keyword.value.clone());
                continue;
            }
            match PassthroughKey::from_keyword(arg) {
                Some(key) => fields.insert(key, keyword.value.clone()),
                None if INTERNAL_KEYWORDS.contains(&arg) => {
                    debug!(keyword = arg, "dropping internal keyword");
                }
                None => debug!(keyword = arg, "dropping keyword outside the allow-list"),
            }
        }

        if let Some(value) = infra_overrides {
            fields.insert(PassthroughKey::JobVariables, value);
        }
        fields
    }

    pub fn insert(&mut self, key: PassthroughKey, value: PyExpr) {
        self.fields.insert(key, value);
    }

    pub fn get(&self, key: PassthroughKey) -> Option<&PyExpr> {
        self.fields.get(&key)
    }

    pub fn contains(&self, key: PassthroughKey) -> bool {
        self.fields.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = PassthroughKey> + '_ {
        self.fields.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PassthroughKey, &PyExpr)> {
        self.fields.iter().map(|(key, value)| (*key, value))
    }

    /// Same fields minus the ones `.serve()` does not accept
    pub fn without_deploy_only(&self) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .filter(|(key, _)| !key.is_deploy_only())
                .map(|(key, value)| (*key, value.clone()))
                .collect(),
        }
    }

    /// Keyword arguments in canonical order
    pub fn to_keywords(&self) -> Vec<Keyword> {
        self.iter()
            .map(|(key, value)| Keyword::new(key.as_str(), value.clone()))
            .collect()
    }
}
