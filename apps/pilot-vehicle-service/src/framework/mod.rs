//! Framework-provided services.
//!
//! Types under this module are exempt from conformance checks and may be
//! injected into any managed service.

pub mod clock;

pub use clock::{Clock, SystemClock};
