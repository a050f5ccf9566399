//! Role markers.
//!
//! A role marker declares the architectural layer of a component. Markers are
//! attached to component types at build time through their descriptor (see
//! [`crate::descriptor`]); the conformance checker dispatches validation rules
//! on the marker kind.

use std::fmt;

/// Parameters shared by the service roles (command, query and application).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ServiceSpec {
    /// Stateful services hold request/session state in plain fields and are
    /// exempt from the managed-dependency checks.
    pub stateful: bool,
    /// Name of the configuration profile the service is bound to (may be empty).
    pub config: &'static str,
}

impl ServiceSpec {
    #[must_use]
    pub const fn stateless() -> Self {
        Self {
            stateful: false,
            config: "",
        }
    }

    #[must_use]
    pub const fn stateful() -> Self {
        Self {
            stateful: true,
            config: "",
        }
    }

    #[must_use]
    pub const fn with_config(mut self, config: &'static str) -> Self {
        self.config = config;
        self
    }
}

/// Architectural role declared by a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Microservice,
    Controller,
    CommandService(ServiceSpec),
    QueryService(ServiceSpec),
    ApplicationService(ServiceSpec),
    Repository,
    FrameworkService,
    ServiceConfig,
}

impl Role {
    #[must_use]
    pub const fn kind(&self) -> RoleKind {
        match self {
            Self::Microservice => RoleKind::Microservice,
            Self::Controller => RoleKind::Controller,
            Self::CommandService(_) => RoleKind::CommandService,
            Self::QueryService(_) => RoleKind::QueryService,
            Self::ApplicationService(_) => RoleKind::ApplicationService,
            Self::Repository => RoleKind::Repository,
            Self::FrameworkService => RoleKind::FrameworkService,
            Self::ServiceConfig => RoleKind::ServiceConfig,
        }
    }

    /// Service parameters, for the three service roles.
    #[must_use]
    pub const fn service_spec(&self) -> Option<&ServiceSpec> {
        match self {
            Self::CommandService(spec)
            | Self::QueryService(spec)
            | Self::ApplicationService(spec) => Some(spec),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_stateful(&self) -> bool {
        self.service_spec().is_some_and(|spec| spec.stateful)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind(), f)
    }
}

/// Marker discriminant, used as the rule table key.
///
/// The derived ordering is the declaration order, which is also the order in
/// which rules run for a component carrying several markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoleKind {
    Microservice,
    Controller,
    CommandService,
    QueryService,
    ApplicationService,
    Repository,
    FrameworkService,
    ServiceConfig,
}

impl RoleKind {
    pub const ALL: [RoleKind; 8] = [
        RoleKind::Microservice,
        RoleKind::Controller,
        RoleKind::CommandService,
        RoleKind::QueryService,
        RoleKind::ApplicationService,
        RoleKind::Repository,
        RoleKind::FrameworkService,
        RoleKind::ServiceConfig,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Microservice => "Microservice",
            Self::Controller => "Controller",
            Self::CommandService => "CommandService",
            Self::QueryService => "QueryService",
            Self::ApplicationService => "ApplicationService",
            Self::Repository => "Repository",
            Self::FrameworkService => "FrameworkService",
            Self::ServiceConfig => "ServiceConfig",
        }
    }
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
