//! Memoizing front end for [`Resolver::decode`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tracing::trace;

use super::{ArtifactOf, IntoIdentifier, Resolver};
use crate::error::ResolveError;
use crate::identifier::Identifier;
use crate::introspect::Introspector;

type Outcome<I> = Result<ArtifactOf<I>, ResolveError>;
type Slot<I> = Arc<OnceLock<Outcome<I>>>;

/// Memoizes `decode` per `(parent, identifier)` pair.
///
/// Each key gets a `OnceLock`, so concurrent first lookups of the same key
/// run the resolution once and the others wait for its result. Failures are
/// cached too; entries are never invalidated.
pub struct CachingResolver<I: Introspector> {
    resolver: Resolver<I>,
    entries: Mutex<HashMap<(Identifier, Identifier), Slot<I>>>,
}

impl<I: Introspector> CachingResolver<I> {
    pub fn new(resolver: Resolver<I>) -> Self {
        Self {
            resolver,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn resolver(&self) -> &Resolver<I> {
        &self.resolver
    }

    pub fn decode<T: IntoIdentifier>(&self, identifier: T, parent: &Identifier) -> Outcome<I> {
        let identifier = identifier.into_identifier()?;
        let slot = {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(
                entries
                    .entry((parent.clone(), identifier.clone()))
                    .or_default(),
            )
        };

        slot.get_or_init(|| {
            trace!(%identifier, "resolving uncached identifier");
            self.resolver.decode(&identifier, parent)
        })
        .clone()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<I: Introspector> From<Resolver<I>> for CachingResolver<I> {
    fn from(resolver: Resolver<I>) -> Self {
        Self::new(resolver)
    }
}
