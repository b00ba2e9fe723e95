//! Generic error handling utilities
//!
//! Provides unified fatal-error logging that works across the error types of
//! the crate while keeping user-facing output short.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// When `is_user_actionable()` returns `true`, `user_message()` must return
/// `Some(message)`; otherwise it returns `None`.
pub trait ContextualError: std::error::Error {
    /// Returns true if this error carries a message that should be shown
    /// to the user verbatim
    ///
    /// Examples of user-actionable errors:
    /// - Command line syntax errors
    /// - Unknown flags, options, users or channels
    /// - Configuration values that fail validation
    ///
    /// Examples of system errors:
    /// - Network failures while calling an app
    /// - Unreadable fixture or catalogue files
    fn is_user_actionable(&self) -> bool;

    /// Returns the user message if this is a user-actionable error
    fn user_message(&self) -> Option<&str>;
}

/// Log errors with a detail level based on error specificity
///
/// User-actionable errors log their own message; system errors log the
/// operation context, with the full error at debug level.
///
/// # Examples
/// ```rust,no_run
/// # use appcmd::core::error_handling::log_error_with_context;
/// # use appcmd::app::cli::config::ConfigError;
/// let err = ConfigError::InvalidValue {
///     key: "parser.max_concurrent_expansions".to_string(),
///     message: "must be greater than 0".to_string(),
/// };
/// log_error_with_context(&err, "Configuration loading");
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => log::error!("FATAL: {}", user_msg),
        _ => log::error!("FATAL: {}", operation_context),
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct TestUserError {
        message: String,
    }

    impl fmt::Display for TestUserError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.message)
        }
    }

    impl std::error::Error for TestUserError {}

    impl ContextualError for TestUserError {
        fn is_user_actionable(&self) -> bool {
            true
        }

        fn user_message(&self) -> Option<&str> {
            Some(&self.message)
        }
    }

    #[derive(Debug)]
    struct TestSystemError;

    impl fmt::Display for TestSystemError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "connection refused")
        }
    }

    impl std::error::Error for TestSystemError {}

    impl ContextualError for TestSystemError {
        fn is_user_actionable(&self) -> bool {
            false
        }

        fn user_message(&self) -> Option<&str> {
            None
        }
    }

    #[test]
    fn test_user_actionable_error_exposes_message() {
        let error = TestUserError {
            message: "Command does not accept flag `nope`.".to_string(),
        };
        assert!(error.is_user_actionable());
        assert_eq!(
            error.user_message(),
            Some("Command does not accept flag `nope`.")
        );
        log_error_with_context(&error, "Composing call");
    }

    #[test]
    fn test_system_error_uses_generic_context() {
        let error = TestSystemError;
        assert!(!error.is_user_actionable());
        assert_eq!(error.user_message(), None);
        log_error_with_context(&error, "Submitting call");
    }
}
