//! Conformance checker.
//!
//! The checker is the post-construction, pre-publish gate of the assembler: it
//! receives each component once its dependencies are populated and before any
//! other part of the system can see it, resolves the component's role markers
//! against the [`RoleRegistry`] and runs the matching rules. The first failing
//! rule aborts verification with a [`ViolationError`].

use std::sync::Arc;

use crate::descriptor::Component;
use crate::error::ViolationError;
use crate::namespace::NamespaceScope;
use crate::registry::RoleRegistry;
use crate::rules::Subject;

#[derive(Debug, Clone)]
pub struct ConformanceChecker {
    registry: Arc<RoleRegistry>,
    scope: NamespaceScope,
}

impl ConformanceChecker {
    #[must_use]
    pub fn new(registry: Arc<RoleRegistry>, scope: NamespaceScope) -> Self {
        Self { registry, scope }
    }

    /// Checker over the standard rule table.
    #[must_use]
    pub fn standard(scope: NamespaceScope) -> Self {
        Self::new(Arc::new(RoleRegistry::standard()), scope)
    }

    #[must_use]
    pub fn scope(&self) -> &NamespaceScope {
        &self.scope
    }

    #[must_use]
    pub fn registry(&self) -> &RoleRegistry {
        &self.registry
    }

    /// Verifies one constructed component.
    ///
    /// Capability wrappers are seen through: the concrete implementation's
    /// descriptor and bindings are inspected. Components outside the application
    /// namespace, or inside its framework segment, pass without inspection.
    /// Verification has no side effects, so repeated calls yield the same verdict.
    ///
    /// # Errors
    /// Returns [`ViolationError`] for the first rule the component violates.
    pub fn verify<C: ?Sized + Component>(&self, component: &C) -> Result<(), ViolationError> {
        let descriptor = component.resolve();
        let type_name = descriptor.type_name();

        if !self.scope.is_checked(type_name) {
            tracing::trace!(component = type_name, "outside checked namespace, skipping");
            return Ok(());
        }

        let rules = self.registry.rules_for(descriptor.roles());
        if rules.is_empty() {
            tracing::trace!(component = type_name, "no role rule applies");
            return Ok(());
        }

        let bindings = component.bindings();
        let subject = Subject::new(descriptor, &bindings, &self.scope);
        for (kind, rule) in &rules {
            if let Err(message) = rule.check(&subject) {
                tracing::error!(
                    component = type_name,
                    role = %kind,
                    violation = message,
                    "component rejected"
                );
                return Err(ViolationError::new(message, type_name));
            }
        }

        tracing::debug!(component = type_name, rules = rules.len(), "component verified");
        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::descriptor::{Binding, ComponentDescriptor, FieldDescriptor};
    use crate::role::{Role, ServiceSpec};
    use crate::rules::{CONTROLLER_FIELD_COUNT_MESSAGE, MICROSERVICE_MESSAGE};
    use std::sync::LazyLock;
    use tracing_test::traced_test;

    /// Component with a hand-written descriptor and bindings.
    struct Fixture {
        descriptor: &'static ComponentDescriptor,
        bindings: Vec<Binding>,
    }

    impl Component for Fixture {
        fn descriptor(&self) -> &'static ComponentDescriptor {
            self.descriptor
        }

        fn bindings(&self) -> Vec<Binding> {
            self.bindings.clone()
        }
    }

    static COMMANDS: LazyLock<ComponentDescriptor> = LazyLock::new(|| {
        ComponentDescriptor::new("app::service::Commands")
            .with_role(Role::CommandService(ServiceSpec::stateless()))
    });

    static BROKEN_MAIN: LazyLock<ComponentDescriptor> = LazyLock::new(|| {
        ComponentDescriptor::new("app::Main")
            .with_role(Role::Microservice)
            .with_field(FieldDescriptor::plain("port", "u16"))
    });

    static CONTROLLER_AND_MAIN: LazyLock<ComponentDescriptor> = LazyLock::new(|| {
        ComponentDescriptor::new("app::Everything")
            .with_role(Role::Controller)
            .with_role(Role::Microservice)
            .with_field(FieldDescriptor::plain("port", "u16"))
    });

    static FOREIGN: LazyLock<ComponentDescriptor> = LazyLock::new(|| {
        ComponentDescriptor::new("other::Main")
            .with_role(Role::Microservice)
            .with_field(FieldDescriptor::plain("port", "u16"))
    });

    fn checker() -> ConformanceChecker {
        ConformanceChecker::standard(NamespaceScope::new("app"))
    }

    #[test]
    fn foreign_component_passes_without_inspection() {
        let c = Fixture {
            descriptor: &FOREIGN,
            bindings: Vec::new(),
        };
        assert_eq!(checker().verify(&c), Ok(()));
    }

    #[test]
    fn violation_carries_message_and_component() {
        let c = Fixture {
            descriptor: &BROKEN_MAIN,
            bindings: Vec::new(),
        };
        let err = checker().verify(&c).unwrap_err();
        assert_eq!(err.message(), MICROSERVICE_MESSAGE);
        assert_eq!(err.component(), "app::Main");
    }

    #[test]
    fn first_failing_rule_in_declaration_order_wins() {
        let c = Fixture {
            descriptor: &CONTROLLER_AND_MAIN,
            bindings: Vec::new(),
        };
        let err = checker().verify(&c).unwrap_err();
        assert_eq!(err.message(), MICROSERVICE_MESSAGE);
        assert_ne!(err.message(), CONTROLLER_FIELD_COUNT_MESSAGE);
    }

    #[test]
    fn verdict_is_stable_across_calls() {
        let checker = checker();
        let broken = Fixture {
            descriptor: &BROKEN_MAIN,
            bindings: Vec::new(),
        };
        assert_eq!(checker.verify(&broken), checker.verify(&broken));

        let fine = Fixture {
            descriptor: &COMMANDS,
            bindings: Vec::new(),
        };
        assert_eq!(checker.verify(&fine), Ok(()));
        assert_eq!(checker.verify(&fine), Ok(()));
    }

    #[test]
    fn verify_accepts_trait_objects() {
        let c: Box<dyn Component> = Box::new(Fixture {
            descriptor: &COMMANDS,
            bindings: Vec::new(),
        });
        assert_eq!(checker().verify(c.as_ref()), Ok(()));
    }

    #[test]
    #[traced_test]
    fn verified_component_is_logged() {
        let c = Fixture {
            descriptor: &COMMANDS,
            bindings: Vec::new(),
        };
        checker().verify(&c).unwrap();
        assert!(logs_contain("component verified"));
    }

    #[test]
    #[traced_test]
    fn rejected_component_is_logged() {
        let c = Fixture {
            descriptor: &BROKEN_MAIN,
            bindings: Vec::new(),
        };
        assert!(checker().verify(&c).is_err());
        assert!(logs_contain("component rejected"));
    }
}
