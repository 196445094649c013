use thiserror::Error;

/// Errors raised by the scoring core.
#[derive(Debug, Error)]
pub enum HazardError {
    /// Two per-cell arrays that must be aligned have different lengths.
    #[error("{what} length mismatch: expected {expected} cells, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("grid has no cells")]
    EmptyGrid,

    #[error("unknown cell {0}")]
    UnknownCell(usize),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HazardError>;

/// Fail with [`HazardError::LengthMismatch`] unless `actual == expected`.
pub(crate) fn ensure_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(HazardError::LengthMismatch { what, expected, actual })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_mismatch_message_names_both_lengths() {
        let err = ensure_len("trigger", 4, 3).unwrap_err();
        assert_eq!(err.to_string(), "trigger length mismatch: expected 4 cells, got 3");
    }

    #[test]
    fn equal_lengths_pass() {
        assert!(ensure_len("trigger", 7, 7).is_ok());
    }
}
