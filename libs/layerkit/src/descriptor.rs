//! Role descriptors.
//!
//! Every component type carries a [`ComponentDescriptor`] produced at build time,
//! usually by `#[derive(Component)]`. The descriptor enumerates the type's role
//! markers, its declared fields (with their injected flag) and its declared entry
//! points. Runtime values of injected fields are reported separately as
//! [`Binding`]s, so the checker never needs reflection over live objects.
//!
//! ```rust
//! use std::sync::Arc;
//! use layerkit::Component;
//!
//! #[derive(Component)]
//! #[component(repository)]
//! pub struct VehicleRepository;
//!
//! #[derive(Component)]
//! #[component(command_service(config = "transunion"))]
//! pub struct VehicleCommands {
//!     #[inject]
//!     repository: Arc<VehicleRepository>,
//! }
//!
//! let commands = VehicleCommands { repository: Arc::new(VehicleRepository) };
//! let bindings = commands.bindings();
//! assert_eq!(bindings[0].field(), "repository");
//! assert!(bindings[0].target().is_some_and(|d| d.has_role(layerkit::RoleKind::Repository)));
//! ```

use std::sync::Arc;

use crate::role::{Role, RoleKind, ServiceSpec};

/// Build-time metadata of a component type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDescriptor {
    type_name: &'static str,
    roles: Vec<Role>,
    fields: Vec<FieldDescriptor>,
    operations: Vec<&'static str>,
}

impl ComponentDescriptor {
    /// Creates an empty descriptor for the fully-qualified `type_name`.
    #[must_use]
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            roles: Vec::new(),
            fields: Vec::new(),
            operations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        self.operations.push(operation);
        self
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    #[must_use]
    pub fn operations(&self) -> &[&'static str] {
        &self.operations
    }

    #[must_use]
    pub fn role(&self, kind: RoleKind) -> Option<&Role> {
        self.roles.iter().find(|role| role.kind() == kind)
    }

    #[must_use]
    pub fn has_role(&self, kind: RoleKind) -> bool {
        self.role(kind).is_some()
    }

    /// True if the descriptor carries any of `kinds`.
    #[must_use]
    pub fn has_any_role(&self, kinds: &[RoleKind]) -> bool {
        self.roles.iter().any(|role| kinds.contains(&role.kind()))
    }

    /// Service parameters of the marker `kind`, if present and a service role.
    #[must_use]
    pub fn service_spec(&self, kind: RoleKind) -> Option<&ServiceSpec> {
        self.role(kind).and_then(Role::service_spec)
    }

    /// Declared fields marked as injected.
    pub fn injected_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.injected)
    }
}

/// A declared field of a component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: &'static str,
    declared_type: &'static str,
    injected: bool,
}

impl FieldDescriptor {
    #[must_use]
    pub const fn new(name: &'static str, declared_type: &'static str, injected: bool) -> Self {
        Self {
            name,
            declared_type,
            injected,
        }
    }

    /// Field populated by the assembler.
    #[must_use]
    pub const fn injected(name: &'static str, declared_type: &'static str) -> Self {
        Self::new(name, declared_type, true)
    }

    /// Plain field, set by ordinary code.
    #[must_use]
    pub const fn plain(name: &'static str, declared_type: &'static str) -> Self {
        Self::new(name, declared_type, false)
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn declared_type(&self) -> &'static str {
        self.declared_type
    }

    #[must_use]
    pub const fn is_injected(&self) -> bool {
        self.injected
    }
}

/// Runtime value of an injected field, reduced to the descriptor of the concrete
/// component it resolves to. `None` means the slot was left unresolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    field: &'static str,
    target: Option<&'static ComponentDescriptor>,
}

impl Binding {
    #[must_use]
    pub const fn new(field: &'static str, target: Option<&'static ComponentDescriptor>) -> Self {
        Self { field, target }
    }

    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    #[must_use]
    pub const fn target(&self) -> Option<&'static ComponentDescriptor> {
        self.target
    }
}

/// A component participating in the assembled graph.
///
/// Service interfaces should use `Component` as a supertrait so that values held
/// as trait objects (`Arc<dyn VehicleRepository>`) still report their concrete
/// descriptor.
pub trait Component: Send + Sync {
    /// Descriptor of this value's own type.
    fn descriptor(&self) -> &'static ComponentDescriptor;

    /// Descriptor of the concrete implementation behind this value.
    ///
    /// Capability wrappers override this to forward to the wrapped value; for
    /// every other component it is the own descriptor.
    fn resolve(&self) -> &'static ComponentDescriptor {
        self.descriptor()
    }

    /// Resolved targets of the injected fields, in declaration order.
    fn bindings(&self) -> Vec<Binding> {
        Vec::new()
    }
}

/// Static access to a type's descriptor, without an instance.
pub trait Described {
    fn describe() -> &'static ComponentDescriptor;
}

/// Field types that can hold an injected dependency.
pub trait Injectable {
    /// Descriptor of the concrete component bound to the field.
    fn target(&self) -> Option<&'static ComponentDescriptor>;
}

impl<T: ?Sized + Component> Injectable for Arc<T> {
    fn target(&self) -> Option<&'static ComponentDescriptor> {
        Some((**self).resolve())
    }
}

impl<T: ?Sized + Component> Injectable for Box<T> {
    fn target(&self) -> Option<&'static ComponentDescriptor> {
        Some((**self).resolve())
    }
}

impl<T: Injectable> Injectable for Option<T> {
    fn target(&self) -> Option<&'static ComponentDescriptor> {
        self.as_ref().and_then(Injectable::target)
    }
}
