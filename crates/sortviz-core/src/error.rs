//! Error taxonomy for the sort-step engine.
//!
//! Both [`SortError`] variants are programmer errors: an algorithm that
//! touches an index outside `[0, N)` is a bug, and a zero-sized array or an
//! unknown algorithm name is a configuration mistake. Cancellation is not an
//! error and never shows up here.

/// Errors raised by array primitives and engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortError {
    /// An algorithm attempted to access an index outside the array.
    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Array size, value range, or algorithm selection is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl SortError {
    pub(crate) fn invalid(detail: impl Into<String>) -> Self {
        SortError::InvalidConfiguration(detail.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_error_message_names_bounds() {
        let err = SortError::IndexOutOfBounds { index: 7, len: 4 };
        assert_eq!(err.to_string(), "index 7 out of bounds for array of length 4");
    }

    #[test]
    fn invalid_configuration_message() {
        let err = SortError::invalid("array size must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid configuration: array size must be at least 1"
        );
    }
}
