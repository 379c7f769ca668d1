//! Executable signatures: a name plus ordered parameter types.

use std::fmt;

use crate::error::IdentifierError;

const SEPARATOR: &str = ", ";

/// The value of an `Executable` segment: a name plus its parameter types in
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    name: String,
    parameter_types: Vec<String>,
}

impl Signature {
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        parameter_types: impl IntoIterator<Item = S>,
    ) -> Result<Self, IdentifierError> {
        let signature = Self {
            name: name.into(),
            parameter_types: parameter_types.into_iter().map(Into::into).collect(),
        };

        if !is_valid_token(&signature.name) {
            return Err(IdentifierError::invalid_segment_value(
                signature.to_string(),
                format!("invalid executable name '{}'", signature.name),
            ));
        }
        if let Some(bad) = signature
            .parameter_types
            .iter()
            .find(|t| !is_valid_token(t))
        {
            return Err(IdentifierError::invalid_segment_value(
                signature.to_string(),
                format!("invalid parameter type '{bad}'"),
            ));
        }

        Ok(signature)
    }

    /// Splits `name(T1, T2)` into its parts. Only the canonical rendering is
    /// accepted, so `parse(s).to_string() == s` whenever parsing succeeds.
    pub fn parse(value: &str) -> Result<Self, IdentifierError> {
        let malformed = |reason: &str| IdentifierError::malformed(value, reason);

        let (name, rest) = value
            .split_once('(')
            .ok_or_else(|| malformed("executable value has no parameter list"))?;
        let params = rest
            .strip_suffix(')')
            .ok_or_else(|| malformed("parameter list is not closed"))?;
        if params.contains(['(', ')']) {
            return Err(malformed("unbalanced parentheses in parameter list"));
        }

        let parameter_types: Vec<&str> = if params.is_empty() {
            Vec::new()
        } else {
            params.split(SEPARATOR).collect()
        };

        Self::new(name, parameter_types).map_err(|e| match e {
            IdentifierError::InvalidSegmentValue { reason, .. } => malformed(reason.as_str()),
            other => other,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameter_types(&self) -> &[String] {
        &self.parameter_types
    }

    pub fn matches<S: AsRef<str>>(&self, name: &str, parameter_types: &[S]) -> bool {
        self.name == name
            && self.parameter_types.len() == parameter_types.len()
            && self
                .parameter_types
                .iter()
                .zip(parameter_types)
                .all(|(a, b)| a == b.as_ref())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.parameter_types.join(SEPARATOR))
    }
}

fn is_valid_token(token: &str) -> bool {
    !token.trim().is_empty() && token.trim() == token && !token.contains(['(', ')', ','])
}
