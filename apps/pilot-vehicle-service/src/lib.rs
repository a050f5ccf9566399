#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Vehicle registry service.
//!
//! Every component carries a role marker and is verified by the conformance
//! checker while the service is assembled (see [`wiring::assemble`]).

pub mod application;
pub mod config;
pub mod controller;
pub mod domain;
pub mod framework;
pub mod repo;
pub mod service;
pub mod wiring;

pub use application::{PilotApplication, RunReport};
pub use domain::{Vehicle, VehicleError};
pub use wiring::assemble;
