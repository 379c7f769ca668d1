use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("malformed identifier '{input}': {reason}")]
    Malformed { input: String, reason: String },

    #[error("invalid segment value '{value}': {reason}")]
    InvalidSegmentValue { value: String, reason: String },
}

impl IdentifierError {
    pub fn malformed(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_segment_value(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSegmentValue {
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}
