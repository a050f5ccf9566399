//! Type-safe component hub with a conformance gate.
//!
//! Components are published once, after construction, under their *interface
//! type* (often a trait object) and fetched by consumers the same way.
//! Publication is the post-construction, pre-publish hook: every component is
//! verified before it becomes visible, and a rejected component is never stored.
//!
//! Implementation details:
//! - Key = `type_name::<T>()`, which works for `T = dyn Trait`.
//! - Value = `Arc<T>` stored as `Box<dyn Any + Send + Sync>` (downcast on read).
//! - Re-publishing under the same key overwrites the previous value.

use parking_lot::RwLock;
use std::{any::Any, collections::HashMap, fmt, sync::Arc};

use crate::checker::ConformanceChecker;
use crate::descriptor::Component;
use crate::error::ViolationError;

/// Stable type key for trait objects.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct TypeKey(&'static str);

impl TypeKey {
    #[inline]
    fn of<T: ?Sized + 'static>() -> Self {
        TypeKey(std::any::type_name::<T>())
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HubError {
    #[error("component not found: type={type_key:?}")]
    NotFound { type_key: TypeKey },

    #[error("type mismatch in hub for type={type_key:?}")]
    TypeMismatch { type_key: TypeKey },

    #[error(transparent)]
    Rejected(#[from] ViolationError),
}

type Boxed = Box<dyn Any + Send + Sync>;

#[derive(Default)]
struct Entries {
    map: HashMap<TypeKey, Boxed>,
    order: Vec<&'static str>,
}

pub struct ComponentHub {
    checker: Option<ConformanceChecker>,
    entries: RwLock<Entries>,
}

impl ComponentHub {
    /// Hub that verifies every published component.
    #[must_use]
    pub fn new(checker: ConformanceChecker) -> Self {
        Self {
            checker: Some(checker),
            entries: RwLock::new(Entries::default()),
        }
    }

    /// Hub without a conformance gate, for tools and tests.
    #[must_use]
    pub fn unchecked() -> Self {
        Self {
            checker: None,
            entries: RwLock::new(Entries::default()),
        }
    }

    #[must_use]
    pub fn checker(&self) -> Option<&ConformanceChecker> {
        self.checker.as_ref()
    }

    /// Verify `component` and publish it under the interface type `T`.
    ///
    /// # Errors
    /// Returns [`HubError::Rejected`] if the component violates its role
    /// contract; the hub is left unchanged.
    pub fn publish<T>(&self, component: Arc<T>) -> Result<(), HubError>
    where
        T: ?Sized + Component + 'static,
    {
        if let Some(checker) = &self.checker {
            checker.verify(component.as_ref())?;
        }

        let type_key = TypeKey::of::<T>();
        let mut w = self.entries.write();
        if w.map.insert(type_key, Box::new(component)).is_none() {
            w.order.push(type_key.0);
        }
        tracing::debug!(interface = type_key.0, "component published");
        Ok(())
    }

    /// Fetch a published component by interface type `T`.
    ///
    /// # Errors
    /// [`HubError::NotFound`] if nothing was published under `T`.
    pub fn get<T>(&self) -> Result<Arc<T>, HubError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let type_key = TypeKey::of::<T>();
        let r = self.entries.read();
        let boxed = r.map.get(&type_key).ok_or(HubError::NotFound { type_key })?;

        // Stored value is exactly `Arc<T>`.
        if let Some(arc_t) = boxed.downcast_ref::<Arc<T>>() {
            return Ok(arc_t.clone());
        }
        Err(HubError::TypeMismatch { type_key })
    }

    #[must_use]
    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        self.entries.read().map.contains_key(&TypeKey::of::<T>())
    }

    /// Interface type names in publication order.
    #[must_use]
    pub fn published(&self) -> Vec<&'static str> {
        self.entries.read().order.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().map.is_empty()
    }
}

impl fmt::Debug for ComponentHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentHub")
            .field("checked", &self.checker.is_some())
            .field("published", &self.entries.read().order)
            .finish()
    }
}
