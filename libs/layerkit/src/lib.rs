#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Layered-architecture conformance checking for assembled component graphs.
//!
//! Components declare their architectural role with `#[derive(Component)]`.
//! When the application is assembled, every constructed component is published
//! through a [`ComponentHub`], which runs the [`ConformanceChecker`] before the
//! component becomes visible. A component that breaks the contract of its role
//! aborts startup with a [`ViolationError`].

pub mod checker;
pub mod descriptor;
pub mod error;
pub mod hub;
pub mod namespace;
pub mod proxy;
pub mod registry;
pub mod role;
pub mod rules;

#[cfg(feature = "bootstrap")]
pub mod bootstrap;

pub use checker::ConformanceChecker;
pub use descriptor::{Binding, Component, ComponentDescriptor, Described, FieldDescriptor, Injectable};
pub use error::ViolationError;
pub use hub::{ComponentHub, HubError};
pub use namespace::NamespaceScope;
pub use proxy::Proxy;
pub use registry::RoleRegistry;
pub use role::{Role, RoleKind, ServiceSpec};
pub use rules::ValidationRule;

// Derive macro; shares its name with the trait, like `serde::Serialize`.
pub use layerkit_macros::Component;
