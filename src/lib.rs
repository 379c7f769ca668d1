/// Testable identifiers
///
/// Canonical, round-trippable identifiers for test containers and
/// executables, and a resolver that maps them to and from the artifacts they
/// name through an [`introspect::Introspector`].
pub mod catalog;
pub mod cli;
pub mod error;
pub mod identifier;
pub mod introspect;
pub mod logging;
pub mod output;
pub mod resolver;

pub use catalog::Catalog;
pub use error::{Error, IdentifierError, ResolveError, Result};
pub use identifier::{Identifier, Segment, SegmentType, Signature};
pub use introspect::Introspector;
pub use resolver::{Artifact, CachingResolver, Resolver, Testable};
