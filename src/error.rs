use thiserror::Error;
use tracing::{error, warn};

/// Domain errors for field mutation.
///
/// The surrounding editor supplies well-formed input, so the taxonomy stays
/// small: the only genuine failure at the field seam is a validator rejecting
/// an edit. Reentrant `set_text` calls and missing menu anchors are handled
/// as silent no-ops, not errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("field edit rejected: {reason}")]
    Rejected { reason: String },
}

impl FieldError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        FieldError::Rejected {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FieldError>;

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and the caller doesn't need the error.
///
/// # Examples
///
/// ```ignore
/// use blockpad_fields::error::ResultExt;
///
/// // Log and continue if a field edit is rejected
/// field.set_text(Some("count")).log_err();
/// ```
pub trait ResultExt<T> {
    /// Log error with caller location and return None. Use for recoverable failures.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation failed"
                );
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}

/// Panic in debug mode, log error in release mode.
///
/// Use for "impossible" states that should crash during development
/// but gracefully degrade in production.
///
/// # Examples
///
/// ```ignore
/// use blockpad_fields::debug_panic;
///
/// debug_panic!("mutation guard entered while already mutating");
/// ```
#[macro_export]
macro_rules! debug_panic {
    ( $($fmt_arg:tt)* ) => {
        if cfg!(debug_assertions) {
            panic!( $($fmt_arg)* );
        } else {
            tracing::error!("IMPOSSIBLE STATE: {}", format_args!($($fmt_arg)*));
        }
    };
}
