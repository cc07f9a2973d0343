/// Errors raised when a configuration value is unusable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{min_field} ({min}) must not exceed {max_field} ({max})")]
    InvertedRange {
        min_field: &'static str,
        min: f32,
        max_field: &'static str,
        max: f32,
    },
}

impl ConfigError {
    /// Check that `value` is strictly positive
    pub fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
        if value > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::NonPositive { field, value })
        }
    }

    /// Check that `min <= max`
    pub fn require_ordered(
        min_field: &'static str,
        min: f32,
        max_field: &'static str,
        max: f32,
    ) -> Result<(), ConfigError> {
        if min <= max {
            Ok(())
        } else {
            Err(ConfigError::InvertedRange {
                min_field,
                min,
                max_field,
                max,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_check() {
        assert!(ConfigError::require_positive("speed", 1.0).is_ok());
        assert_eq!(
            ConfigError::require_positive("speed", 0.0),
            Err(ConfigError::NonPositive {
                field: "speed",
                value: 0.0
            })
        );
    }

    #[test]
    fn inverted_range_message() {
        let err = ConfigError::require_ordered("min_dash", 9.0, "max_dash", 8.0).unwrap_err();
        assert_eq!(err.to_string(), "min_dash (9) must not exceed max_dash (8)");
    }
}
