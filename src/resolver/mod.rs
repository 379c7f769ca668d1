//! Bidirectional mapping between identifiers and artifacts.
//!
//! Encoding walks a container's enclosing chain outward and emits it
//! outermost first: the top-level container by qualified name, every nested
//! one by simple name. An executable adds one trailing segment holding its
//! signature. Decoding walks the same segments inward and fails rather than
//! guess when a segment matches nothing or more than one thing.

pub mod cache;

pub use cache::CachingResolver;

use crate::error::{IdentifierError, ResolveError};
use crate::identifier::{Identifier, Segment, SegmentType, Signature};
use crate::introspect::Introspector;

const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub enum Artifact<C, E> {
    Container(C),
    /// An executable together with the container it was resolved through.
    Executable { container: C, executable: E },
}

impl<C, E> Artifact<C, E> {
    pub fn container(&self) -> &C {
        match self {
            Artifact::Container(container) => container,
            Artifact::Executable { container, .. } => container,
        }
    }

    pub fn executable(&self) -> Option<&E> {
        match self {
            Artifact::Container(_) => None,
            Artifact::Executable { executable, .. } => Some(executable),
        }
    }

    pub fn is_executable(&self) -> bool {
        matches!(self, Artifact::Executable { .. })
    }
}

/// An artifact paired with its identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Testable<C, E> {
    pub identifier: Identifier,
    pub artifact: Artifact<C, E>,
}

pub type ArtifactOf<I> = Artifact<<I as Introspector>::Container, <I as Introspector>::Executable>;
pub type TestableOf<I> = Testable<<I as Introspector>::Container, <I as Introspector>::Executable>;

/// Anything `decode` accepts: a built identifier or its text.
pub trait IntoIdentifier {
    fn into_identifier(self) -> Result<Identifier, IdentifierError>;
}

impl IntoIdentifier for Identifier {
    fn into_identifier(self) -> Result<Identifier, IdentifierError> {
        Ok(self)
    }
}

impl IntoIdentifier for &Identifier {
    fn into_identifier(self) -> Result<Identifier, IdentifierError> {
        Ok(self.clone())
    }
}

impl IntoIdentifier for &str {
    fn into_identifier(self) -> Result<Identifier, IdentifierError> {
        Identifier::parse(self)
    }
}

impl IntoIdentifier for &String {
    fn into_identifier(self) -> Result<Identifier, IdentifierError> {
        Identifier::parse(self)
    }
}

impl IntoIdentifier for String {
    fn into_identifier(self) -> Result<Identifier, IdentifierError> {
        Identifier::parse(&self)
    }
}

pub struct Resolver<I> {
    introspector: I,
    max_depth: usize,
}

impl<I: Introspector> Resolver<I> {
    pub fn new(introspector: I) -> Self {
        Self {
            introspector,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Caps the enclosing-chain length followed while encoding, so a cyclic
    /// chain reported by the introspector ends in an error.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn introspector(&self) -> &I {
        &self.introspector
    }

    pub fn encode_container(
        &self,
        container: &I::Container,
        parent: &Identifier,
    ) -> Result<Identifier, ResolveError> {
        let chain = self.enclosing_chain(container)?;
        let mut chain = chain.iter();

        let Some(top) = chain.next() else {
            return Err(ResolveError::unresolvable_container(
                self.introspector.qualified_name_of(container),
            ));
        };
        let qualified_name = self.introspector.qualified_name_of(top);
        let peers = self.top_level_containers_named(&qualified_name).len();
        if peers > 1 {
            return Err(ResolveError::ambiguous_container(qualified_name, peers));
        }
        let mut identifier = parent.append_container(qualified_name)?;

        let mut enclosing = top;
        for nested in chain {
            let simple_name = self.introspector.simple_name_of(nested);
            let peers = self.nested_containers_named(enclosing, &simple_name).len();
            if peers > 1 {
                return Err(ResolveError::ambiguous_container(
                    self.introspector.qualified_name_of(nested),
                    peers,
                ));
            }
            identifier = identifier.append_container(simple_name)?;
            enclosing = nested;
        }

        Ok(identifier)
    }

    pub fn encode_executable(
        &self,
        executable: &I::Executable,
        parent: &Identifier,
    ) -> Result<Identifier, ResolveError> {
        let container = self.introspector.declaring_container_of(executable);
        self.encode_executable_in(executable, &container, parent)
    }

    /// Encodes `executable` under an explicitly chosen container, which must
    /// list it among its declared executables.
    pub fn encode_executable_in(
        &self,
        executable: &I::Executable,
        container: &I::Container,
        parent: &Identifier,
    ) -> Result<Identifier, ResolveError> {
        let signature = self.signature_of(executable)?;
        if !self
            .introspector
            .declared_executables_of(container)
            .contains(executable)
        {
            return Err(ResolveError::unresolvable_executable(
                self.introspector.qualified_name_of(container),
                signature.to_string(),
            ));
        }

        let identifier = self.encode_container(container, parent)?;
        Ok(identifier.append_executable(&signature)?)
    }

    pub fn encode(
        &self,
        artifact: &ArtifactOf<I>,
        parent: &Identifier,
    ) -> Result<Identifier, ResolveError> {
        match artifact {
            Artifact::Container(container) => self.encode_container(container, parent),
            Artifact::Executable {
                container,
                executable,
            } => self.encode_executable_in(executable, container, parent),
        }
    }

    pub fn decode<T: IntoIdentifier>(
        &self,
        identifier: T,
        parent: &Identifier,
    ) -> Result<ArtifactOf<I>, ResolveError> {
        let identifier = identifier.into_identifier()?;
        let malformed = |reason: String| -> ResolveError {
            IdentifierError::malformed(identifier.to_string(), reason).into()
        };

        let segments = identifier
            .segments_after(parent)
            .ok_or_else(|| malformed(format!("not an identifier under '{parent}'")))?;
        let (last, containers) = segments
            .split_last()
            .ok_or_else(|| malformed("identifier names no artifact".to_string()))?;

        if let Some(stray) = containers
            .iter()
            .find(|s| s.segment_type() != SegmentType::Container)
        {
            return Err(malformed(format!(
                "'{}' segment must be followed by nothing",
                stray.segment_type()
            )));
        }

        match last.segment_type() {
            SegmentType::Container => {
                let container = self.resolve_containers(containers, last, parent)?;
                Ok(Artifact::Container(container))
            }
            SegmentType::Executable => {
                let (innermost, outer) = containers.split_last().ok_or_else(|| {
                    malformed("executable segment has no enclosing container".to_string())
                })?;
                let container = self.resolve_containers(outer, innermost, parent)?;
                let executable = self.resolve_executable(&container, last.value())?;
                Ok(Artifact::Executable {
                    container,
                    executable,
                })
            }
            SegmentType::Engine => Err(malformed(
                "engine segment may only appear at the root".to_string(),
            )),
        }
    }

    pub fn decode_container<T: IntoIdentifier>(
        &self,
        identifier: T,
        parent: &Identifier,
    ) -> Result<I::Container, ResolveError> {
        let identifier = identifier.into_identifier()?;
        match self.decode(&identifier, parent)? {
            Artifact::Container(container) => Ok(container),
            Artifact::Executable { .. } => Err(IdentifierError::malformed(
                identifier.to_string(),
                "expected a container identifier",
            )
            .into()),
        }
    }

    pub fn decode_executable<T: IntoIdentifier>(
        &self,
        identifier: T,
        parent: &Identifier,
    ) -> Result<(I::Container, I::Executable), ResolveError> {
        let identifier = identifier.into_identifier()?;
        match self.decode(&identifier, parent)? {
            Artifact::Executable {
                container,
                executable,
            } => Ok((container, executable)),
            Artifact::Container(_) => Err(ResolveError::not_an_executable(identifier.to_string())),
        }
    }

    pub fn from_class(
        &self,
        container: &I::Container,
        parent: &Identifier,
    ) -> Result<TestableOf<I>, ResolveError> {
        Ok(Testable {
            identifier: self.encode_container(container, parent)?,
            artifact: Artifact::Container(container.clone()),
        })
    }

    pub fn from_method(
        &self,
        executable: &I::Executable,
        parent: &Identifier,
    ) -> Result<TestableOf<I>, ResolveError> {
        let container = self.introspector.declaring_container_of(executable);
        self.from_method_in(executable, &container, parent)
    }

    pub fn from_method_in(
        &self,
        executable: &I::Executable,
        container: &I::Container,
        parent: &Identifier,
    ) -> Result<TestableOf<I>, ResolveError> {
        Ok(Testable {
            identifier: self.encode_executable_in(executable, container, parent)?,
            artifact: Artifact::Executable {
                container: container.clone(),
                executable: executable.clone(),
            },
        })
    }

    pub fn from_unique_id<T: IntoIdentifier>(
        &self,
        identifier: T,
        parent: &Identifier,
    ) -> Result<TestableOf<I>, ResolveError> {
        let identifier = identifier.into_identifier()?;
        let artifact = self.decode(&identifier, parent)?;
        Ok(Testable {
            identifier,
            artifact,
        })
    }

    /// The container followed by its enclosing containers, returned
    /// outermost first.
    fn enclosing_chain(&self, container: &I::Container) -> Result<Vec<I::Container>, ResolveError> {
        let mut chain = vec![container.clone()];
        while let Some(enclosing) = self.introspector.enclosing_container_of(&chain[chain.len() - 1]) {
            if chain.len() >= self.max_depth {
                return Err(ResolveError::nesting_too_deep(
                    self.introspector.qualified_name_of(container),
                    self.max_depth,
                ));
            }
            chain.push(enclosing);
        }
        chain.reverse();
        Ok(chain)
    }

    fn signature_of(&self, executable: &I::Executable) -> Result<Signature, ResolveError> {
        Ok(Signature::new(
            self.introspector.name_of(executable),
            self.introspector.parameter_types_of(executable),
        )?)
    }

    fn top_level_containers_named(&self, qualified_name: &str) -> Vec<I::Container> {
        self.introspector
            .containers_named(qualified_name)
            .into_iter()
            .filter(|c| self.introspector.enclosing_container_of(c).is_none())
            .collect()
    }

    fn nested_containers_named(
        &self,
        enclosing: &I::Container,
        simple_name: &str,
    ) -> Vec<I::Container> {
        self.introspector
            .nested_containers_of(enclosing)
            .into_iter()
            .filter(|c| self.introspector.simple_name_of(c) == simple_name)
            .collect()
    }

    /// Resolves `outer` then `innermost`, all `Container` segments.
    fn resolve_containers(
        &self,
        outer: &[&Segment],
        innermost: &Segment,
        parent: &Identifier,
    ) -> Result<I::Container, ResolveError> {
        let mut path = parent.clone();
        let mut current: Option<I::Container> = None;

        for segment in outer.iter().copied().chain(std::iter::once(innermost)) {
            path = path.append_container(segment.value())?;
            let mut matches = match &current {
                None => self.top_level_containers_named(segment.value()),
                Some(enclosing) => self.nested_containers_named(enclosing, segment.value()),
            };
            current = match matches.len() {
                0 => return Err(ResolveError::unresolvable_container(path.to_string())),
                1 => matches.pop(),
                count => return Err(ResolveError::ambiguous_container(path.to_string(), count)),
            };
        }

        current.ok_or_else(|| ResolveError::unresolvable_container(path.to_string()))
    }

    fn resolve_executable(
        &self,
        container: &I::Container,
        value: &str,
    ) -> Result<I::Executable, ResolveError> {
        let signature = Signature::parse(value)?;
        let mut matches: Vec<I::Executable> = self
            .introspector
            .declared_executables_of(container)
            .into_iter()
            .filter(|e| {
                signature.matches(
                    &self.introspector.name_of(e),
                    &self.introspector.parameter_types_of(e),
                )
            })
            .collect();

        match matches.len() {
            1 => Ok(matches.remove(0)),
            0 => Err(ResolveError::unresolvable_executable(
                self.introspector.qualified_name_of(container),
                signature.to_string(),
            )),
            count => Err(ResolveError::ambiguous_executable(
                self.introspector.qualified_name_of(container),
                signature.to_string(),
                count,
            )),
        }
    }
}
