//! Capability wrappers.
//!
//! A [`Proxy`] stands in for a component and adds a capability around it
//! (transactions, caching, auditing). The wrapper is framework code and carries
//! its own descriptor, but for conformance purposes it is transparent: the
//! checker and [`crate::Injectable`] see the wrapped implementation.

use std::fmt;
use std::ops::Deref;
use std::sync::{Arc, LazyLock};

use crate::descriptor::{Binding, Component, ComponentDescriptor};
use crate::role::Role;

static PROXY_DESCRIPTOR: LazyLock<ComponentDescriptor> = LazyLock::new(|| {
    ComponentDescriptor::new("layerkit::proxy::Proxy").with_role(Role::FrameworkService)
});

pub struct Proxy<T: ?Sized> {
    advice: &'static str,
    inner: Arc<T>,
}

impl<T: ?Sized> Proxy<T> {
    /// Wraps `inner` with the named capability.
    #[must_use]
    pub fn new(advice: &'static str, inner: Arc<T>) -> Self {
        Self { advice, inner }
    }

    /// Name of the capability added by this wrapper, e.g. `"transactional"`.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        self.advice
    }

    #[must_use]
    pub fn underlying(&self) -> &Arc<T> {
        &self.inner
    }
}

impl<T: ?Sized> Deref for Proxy<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T: ?Sized> Clone for Proxy<T> {
    fn clone(&self) -> Self {
        Self {
            advice: self.advice,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Proxy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proxy")
            .field("advice", &self.advice)
            .field("target", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}

impl<T: ?Sized + Component> Component for Proxy<T> {
    fn descriptor(&self) -> &'static ComponentDescriptor {
        &PROXY_DESCRIPTOR
    }

    fn resolve(&self) -> &'static ComponentDescriptor {
        self.inner.resolve()
    }

    fn bindings(&self) -> Vec<Binding> {
        self.inner.bindings()
    }
}
