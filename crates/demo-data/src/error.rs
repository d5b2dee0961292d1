//! Errors raised while building a demo snapshot.

use thiserror::Error;
use uuid::Uuid;

/// Result type used by every generator in this crate.
pub type Result<T> = std::result::Result<T, GenerationError>;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Seed table is empty: {table}")]
    EmptySeedTable { table: &'static str },

    #[error("Requested {requested} students per section but sections hold at most {capacity}")]
    SectionCapacityExceeded { requested: usize, capacity: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Dangling reference from {from} to {to}")]
    DanglingReference { from: Uuid, to: Uuid },

    #[error("Snapshot invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Date out of range: {0}")]
    Date(#[from] time::error::ComponentRange),
}

impl GenerationError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        GenerationError::InvalidConfig(message.into())
    }
}

/// Checks that `value` is a probability.
pub(crate) fn ensure_probability(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GenerationError::config(format!(
            "{name} must be within 0.0..=1.0, got {value}"
        )))
    }
}

/// Checks that an inclusive `(min, max)` range is ordered.
pub(crate) fn ensure_range<T: PartialOrd + std::fmt::Display>(
    name: &str,
    (min, max): (T, T),
) -> Result<()> {
    if min <= max {
        Ok(())
    } else {
        Err(GenerationError::config(format!(
            "{name} range is inverted: {min} > {max}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_bounds() {
        assert!(ensure_probability("p", 0.0).is_ok());
        assert!(ensure_probability("p", 1.0).is_ok());
        assert!(matches!(
            ensure_probability("p", 1.2),
            Err(GenerationError::InvalidConfig(_))
        ));
        assert!(ensure_probability("p", f64::NAN).is_err());
    }

    #[test]
    fn test_range_ordering() {
        assert!(ensure_range("r", (2, 6)).is_ok());
        assert!(ensure_range("r", (3, 3)).is_ok());
        assert!(ensure_range("r", (6, 2)).is_err());
    }
}
