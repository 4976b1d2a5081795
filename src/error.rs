use thiserror::Error;

/// Errors raised by lookup construction and queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The source pairs can not be ordered, e.g. a `NaN` key.
    #[error("can not build lookup: {reason}")]
    Construction { reason: String },

    /// No stored key equals the queried one. `key` is the `Debug` rendering.
    #[error("key not found: {key}")]
    KeyNotFound { key: String },

    /// The lookup is read only once built.
    #[error("lookup does not support {op}")]
    UnsupportedOperation { op: &'static str },
}

impl LookupError {
    pub(crate) fn key_not_found<Q: ?Sized + std::fmt::Debug>(key: &Q) -> Self {
        Self::KeyNotFound {
            key: format!("{key:?}"),
        }
    }

    pub(crate) fn unsupported(op: &'static str) -> Self {
        Self::UnsupportedOperation { op }
    }

    /// Returns true for [`LookupError::KeyNotFound`]
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. })
    }
}

pub type Result<T, E = LookupError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            LookupError::key_not_found("m").to_string(),
            "key not found: \"m\""
        );
        assert_eq!(
            LookupError::unsupported("item assignment").to_string(),
            "lookup does not support item assignment"
        );
        assert_eq!(
            LookupError::Construction {
                reason: "NaN".into()
            }
            .to_string(),
            "can not build lookup: NaN"
        );
    }

    #[test]
    fn test_is_key_not_found() {
        assert!(LookupError::key_not_found(&3).is_key_not_found());
        assert!(!LookupError::unsupported("remove").is_key_not_found());
    }
}
