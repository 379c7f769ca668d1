use thiserror::Error;

use super::IdentifierError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error(transparent)]
    Identifier(#[from] IdentifierError),

    #[error("no container matches '{name}'")]
    UnresolvableContainer { name: String },

    #[error("no executable matches '{signature}' in container '{container}'")]
    UnresolvableExecutable { container: String, signature: String },

    #[error("{count} containers match '{name}'")]
    AmbiguousContainer { name: String, count: usize },

    #[error("{count} executables match '{signature}' in container '{container}'")]
    AmbiguousExecutable {
        container: String,
        signature: String,
        count: usize,
    },

    #[error("identifier '{identifier}' names a container, not an executable")]
    NotAnExecutable { identifier: String },

    #[error("container '{name}' is nested deeper than {max_depth} levels")]
    NestingTooDeep { name: String, max_depth: usize },
}

impl ResolveError {
    pub fn unresolvable_container(name: impl Into<String>) -> Self {
        Self::UnresolvableContainer { name: name.into() }
    }

    pub fn unresolvable_executable(
        container: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        Self::UnresolvableExecutable {
            container: container.into(),
            signature: signature.into(),
        }
    }

    pub fn ambiguous_container(name: impl Into<String>, count: usize) -> Self {
        Self::AmbiguousContainer {
            name: name.into(),
            count,
        }
    }

    pub fn ambiguous_executable(
        container: impl Into<String>,
        signature: impl Into<String>,
        count: usize,
    ) -> Self {
        Self::AmbiguousExecutable {
            container: container.into(),
            signature: signature.into(),
            count,
        }
    }

    pub fn not_an_executable(identifier: impl Into<String>) -> Self {
        Self::NotAnExecutable {
            identifier: identifier.into(),
        }
    }

    pub fn nesting_too_deep(name: impl Into<String>, max_depth: usize) -> Self {
        Self::NestingTooDeep {
            name: name.into(),
            max_depth,
        }
    }

    /// True when the identifier was well formed but named nothing that exists.
    pub fn is_unresolvable(&self) -> bool {
        matches!(
            self,
            Self::UnresolvableContainer { .. } | Self::UnresolvableExecutable { .. }
        )
    }
}
