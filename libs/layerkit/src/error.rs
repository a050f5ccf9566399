//! Conformance violation error.

/// Raised when a component breaks the contract of its role.
///
/// There is a single error kind: unmanaged fields, illegal dependencies and
/// wrong field counts differ only in the message text. The assembler must treat
/// it as fatal and abort startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}: {component}")]
pub struct ViolationError {
    message: &'static str,
    component: &'static str,
}

impl ViolationError {
    #[must_use]
    pub const fn new(message: &'static str, component: &'static str) -> Self {
        Self { message, component }
    }

    /// Description of the violated rule.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.message
    }

    /// Fully-qualified type name of the offending component.
    #[must_use]
    pub const fn component(&self) -> &'static str {
        self.component
    }
}
