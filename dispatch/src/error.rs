//! Error types for handler registration.

use std::fmt;

use crate::event::WindowId;

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Errors raised by the handler registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// A handler is already attached to this window.
    DuplicateWindow { window: WindowId },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateWindow { window } => {
                write!(f, "{window} already has a handler")
            }
        }
    }
}

impl std::error::Error for DispatchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_duplicate() {
        let err = DispatchError::DuplicateWindow {
            window: WindowId::new(3),
        };
        assert_eq!(err.to_string(), "window#3 already has a handler");
    }
}
