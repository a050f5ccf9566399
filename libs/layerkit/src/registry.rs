//! Role registry: the immutable rule table.
//!
//! Built once at startup by [`RoleRegistry::standard`] and shared by `Arc`
//! afterwards. There is no public registration API; application code can only
//! look rules up.

use std::collections::BTreeMap;

use crate::role::{Role, RoleKind};
use crate::rules::{self, ValidationRule};

#[derive(Debug, Clone, Default)]
pub struct RoleRegistry {
    rules: BTreeMap<RoleKind, ValidationRule>,
}

impl RoleRegistry {
    /// The standard rule table: Microservice, Controller, CommandService,
    /// QueryService and ApplicationService.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::default();
        registry.register(RoleKind::Microservice, rules::microservice());
        registry.register(RoleKind::Controller, rules::controller());
        registry.register(RoleKind::CommandService, rules::command_service());
        registry.register(RoleKind::QueryService, rules::query_service());
        registry.register(RoleKind::ApplicationService, rules::application_service());
        registry
    }

    pub(crate) fn register(&mut self, kind: RoleKind, rule: ValidationRule) {
        self.rules.insert(kind, rule);
    }

    /// Rules applicable to the given markers, in rule declaration order.
    ///
    /// Markers without a registered rule contribute nothing.
    #[must_use]
    pub fn rules_for(&self, roles: &[Role]) -> Vec<(RoleKind, &ValidationRule)> {
        self.rules
            .iter()
            .filter(|(kind, _)| roles.iter().any(|role| role.kind() == **kind))
            .map(|(kind, rule)| (*kind, rule))
            .collect()
    }

    #[must_use]
    pub fn contains(&self, kind: RoleKind) -> bool {
        self.rules.contains_key(&kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
