//! Role-based feature gating.
//!
//! The host consults a [`PermissionPolicy`] before exposing retrieval to a
//! caller. Role and feature tables are static configuration; this module only
//! answers "may `role` use `feature`".

use std::collections::HashMap;
use std::collections::HashSet;

use tracing::warn;

use crate::config::PermissionsConfig;
use crate::errors::AskDeskError;
use crate::Result;

/// Asking questions and receiving composed answers
pub const FEATURE_AI_ASSISTANT: &str = "ai_assistant";
/// Ranked document search without an answer
pub const FEATURE_KNOWLEDGE_SEARCH: &str = "knowledge_search";

/// Answers whether a role may use a named feature
pub trait PermissionPolicy: Send + Sync {
    fn can_use_feature(&self, role: &str, feature: &str) -> bool;
}

/// Role table loaded from configuration. Unknown roles have no features.
#[derive(Debug, Clone, Default)]
pub struct StaticPermissions {
    roles: HashMap<String, HashSet<String>>,
}

impl StaticPermissions {
    /// Builds the table from `(role, features)` entries.
    pub fn from_entries<I, F>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, F)>,
        F: IntoIterator<Item = String>,
    {
        let roles = entries
            .into_iter()
            .map(|(role, features)| (role, features.into_iter().collect()))
            .collect();
        Self { roles }
    }

    #[must_use]
    pub fn from_config(config: &PermissionsConfig) -> Self {
        Self::from_entries(config.roles.clone())
    }

    /// Configured role names, sorted
    #[must_use]
    pub fn roles(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.roles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl PermissionPolicy for StaticPermissions {
    fn can_use_feature(&self, role: &str, feature: &str) -> bool {
        self.roles
            .get(role)
            .is_some_and(|features| features.contains(feature))
    }
}

/// Grants every feature to every role
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl PermissionPolicy for AllowAll {
    fn can_use_feature(&self, _role: &str, _feature: &str) -> bool {
        true
    }
}

/// Fail with `FeatureUnavailable` unless `role` may use `feature`.
pub fn ensure_feature(policy: &dyn PermissionPolicy, role: &str, feature: &str) -> Result<()> {
    if policy.can_use_feature(role, feature) {
        Ok(())
    } else {
        warn!("Role '{}' denied feature '{}'", role, feature);
        Err(AskDeskError::FeatureUnavailable {
            role: role.to_string(),
            feature: feature.to_string(),
        })
    }
}
