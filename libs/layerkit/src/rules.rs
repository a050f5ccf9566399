//! Validation rules for the five checked roles.
//!
//! A rule inspects one [`Subject`] (a component's descriptor joined with its
//! runtime bindings) and either passes or returns the diagnostic message of the
//! violated contract. Dependency legality is checked one level deep: only the
//! immediate target of each injected field is looked at.

use crate::descriptor::{Binding, ComponentDescriptor, FieldDescriptor};
use crate::namespace::NamespaceScope;
use crate::role::RoleKind;

pub const MICROSERVICE_MESSAGE: &str =
    "A Microservice component should not contain any field or more than one entry point";
pub const CONTROLLER_FIELD_COUNT_MESSAGE: &str =
    "A Controller component must have only one injectable field";
pub const CONTROLLER_TARGET_MESSAGE: &str = "A Controller component can only inject one CommandService, or one QueryService or one ApplicationService";
pub const UNMANAGED_FIELD_MESSAGE: &str = "All fields should have proper injection";
pub const COMMAND_SERVICE_MESSAGE: &str = "A CommandService component can only inject another CommandService, an ApplicationService, a FrameworkService, a Repository or a ServiceConfig; it cannot inject a QueryService";
pub const QUERY_SERVICE_MESSAGE: &str = "A QueryService component can only inject another QueryService, an ApplicationService, a FrameworkService, a Repository or a ServiceConfig; it cannot inject a CommandService";
pub const APPLICATION_SERVICE_MESSAGE: &str = "An ApplicationService component can only inject another ApplicationService, a FrameworkService or a ServiceConfig; it cannot inject a Repository, a CommandService or a QueryService";

/// Component under inspection.
pub struct Subject<'a> {
    descriptor: &'static ComponentDescriptor,
    bindings: &'a [Binding],
    scope: &'a NamespaceScope,
}

impl<'a> Subject<'a> {
    #[must_use]
    pub fn new(
        descriptor: &'static ComponentDescriptor,
        bindings: &'a [Binding],
        scope: &'a NamespaceScope,
    ) -> Self {
        Self {
            descriptor,
            bindings,
            scope,
        }
    }

    #[must_use]
    pub fn descriptor(&self) -> &'static ComponentDescriptor {
        self.descriptor
    }

    fn binding(&self, field: &str) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.field() == field)
    }

    fn is_stateful(&self, kind: RoleKind) -> bool {
        self.descriptor
            .service_spec(kind)
            .is_some_and(|spec| spec.stateful)
    }

    /// Whether an injected field's target carries one of `permitted`.
    ///
    /// Framework-scoped targets are always permitted, whether the declared field
    /// type points at a framework type or the resolved implementation is one.
    fn target_permitted(&self, field: &FieldDescriptor, permitted: &[RoleKind]) -> bool {
        if self.scope.is_framework(field.declared_type()) {
            return true;
        }
        let Some(target) = self.binding(field.name()).and_then(Binding::target) else {
            return false;
        };
        target.has_any_role(permitted) || self.scope.is_framework(target.type_name())
    }

    fn first_illegal_target(&self, permitted: &[RoleKind]) -> Option<&'static FieldDescriptor> {
        self.descriptor
            .injected_fields()
            .find(|field| !self.target_permitted(field, permitted))
    }
}

pub type RuleFn = fn(&Subject<'_>, &ValidationRule) -> Result<(), &'static str>;

/// A role's validation rule, parameterized by its permitted dependency targets.
#[derive(Clone, Copy)]
pub struct ValidationRule {
    permitted: &'static [RoleKind],
    message: &'static str,
    check: RuleFn,
}

impl std::fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationRule")
            .field("permitted", &self.permitted)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl ValidationRule {
    #[must_use]
    pub const fn new(permitted: &'static [RoleKind], message: &'static str, check: RuleFn) -> Self {
        Self {
            permitted,
            message,
            check,
        }
    }

    #[must_use]
    pub const fn permitted(&self) -> &'static [RoleKind] {
        self.permitted
    }

    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.message
    }

    /// Runs the rule.
    ///
    /// # Errors
    /// Returns the diagnostic message of the violated contract.
    pub fn check(&self, subject: &Subject<'_>) -> Result<(), &'static str> {
        (self.check)(subject, self)
    }
}

pub const CONTROLLER_TARGETS: &[RoleKind] = &[
    RoleKind::CommandService,
    RoleKind::QueryService,
    RoleKind::ApplicationService,
];

pub const COMMAND_SERVICE_TARGETS: &[RoleKind] = &[
    RoleKind::CommandService,
    RoleKind::ApplicationService,
    RoleKind::FrameworkService,
    RoleKind::Repository,
    RoleKind::ServiceConfig,
];

pub const QUERY_SERVICE_TARGETS: &[RoleKind] = &[
    RoleKind::QueryService,
    RoleKind::ApplicationService,
    RoleKind::FrameworkService,
    RoleKind::Repository,
    RoleKind::ServiceConfig,
];

pub const APPLICATION_SERVICE_TARGETS: &[RoleKind] = &[
    RoleKind::ApplicationService,
    RoleKind::FrameworkService,
    RoleKind::ServiceConfig,
];

#[must_use]
pub const fn microservice() -> ValidationRule {
    ValidationRule::new(&[], MICROSERVICE_MESSAGE, check_microservice)
}

#[must_use]
pub const fn controller() -> ValidationRule {
    ValidationRule::new(CONTROLLER_TARGETS, CONTROLLER_TARGET_MESSAGE, check_controller)
}

#[must_use]
pub const fn command_service() -> ValidationRule {
    ValidationRule::new(
        COMMAND_SERVICE_TARGETS,
        COMMAND_SERVICE_MESSAGE,
        check_command_service,
    )
}

#[must_use]
pub const fn query_service() -> ValidationRule {
    ValidationRule::new(
        QUERY_SERVICE_TARGETS,
        QUERY_SERVICE_MESSAGE,
        check_query_service,
    )
}

#[must_use]
pub const fn application_service() -> ValidationRule {
    ValidationRule::new(
        APPLICATION_SERVICE_TARGETS,
        APPLICATION_SERVICE_MESSAGE,
        check_application_service,
    )
}

fn check_microservice(subject: &Subject<'_>, rule: &ValidationRule) -> Result<(), &'static str> {
    let d = subject.descriptor();
    if !d.fields().is_empty() || d.operations().len() > 1 {
        return Err(rule.message());
    }
    Ok(())
}

fn check_controller(subject: &Subject<'_>, rule: &ValidationRule) -> Result<(), &'static str> {
    if subject.descriptor().injected_fields().count() != 1 {
        return Err(CONTROLLER_FIELD_COUNT_MESSAGE);
    }
    match subject.first_illegal_target(rule.permitted()) {
        Some(_) => Err(rule.message()),
        None => Ok(()),
    }
}

/// Shared body of the three service rules.
fn check_managed_service(
    subject: &Subject<'_>,
    rule: &ValidationRule,
    kind: RoleKind,
) -> Result<(), &'static str> {
    if subject.is_stateful(kind) {
        return Ok(());
    }
    if subject
        .descriptor()
        .fields()
        .iter()
        .any(|field| !field.is_injected())
    {
        return Err(UNMANAGED_FIELD_MESSAGE);
    }
    match subject.first_illegal_target(rule.permitted()) {
        Some(_) => Err(rule.message()),
        None => Ok(()),
    }
}

fn check_command_service(subject: &Subject<'_>, rule: &ValidationRule) -> Result<(), &'static str> {
    check_managed_service(subject, rule, RoleKind::CommandService)
}

fn check_query_service(subject: &Subject<'_>, rule: &ValidationRule) -> Result<(), &'static str> {
    check_managed_service(subject, rule, RoleKind::QueryService)
}

fn check_application_service(
    subject: &Subject<'_>,
    rule: &ValidationRule,
) -> Result<(), &'static str> {
    check_managed_service(subject, rule, RoleKind::ApplicationService)
}
