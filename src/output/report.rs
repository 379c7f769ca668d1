use serde::Serialize;

use crate::identifier::{legacy, Identifier, Segment};
use crate::introspect::Introspector;
use crate::resolver::{Artifact, TestableOf};

#[derive(Debug, Clone, Serialize)]
pub struct IdentifierReport {
    pub identifier: Identifier,
    pub engine: String,
    pub segments: Vec<Segment>,
    /// Legacy flat rendering, for display only.
    pub display: String,
}

impl IdentifierReport {
    pub fn new(identifier: &Identifier) -> Self {
        Self {
            identifier: identifier.clone(),
            engine: identifier.engine_id().to_string(),
            segments: identifier.segments().into_iter().cloned().collect(),
            display: legacy::to_flat(identifier),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtifactReport {
    pub identifier: Identifier,
    pub kind: &'static str,
    pub container: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executable: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<String>,
}

impl ArtifactReport {
    pub fn new<I: Introspector>(introspector: &I, testable: &TestableOf<I>) -> Self {
        let (kind, container, executable, parameters) = match &testable.artifact {
            Artifact::Container(container) => (
                "container",
                introspector.qualified_name_of(container),
                None,
                Vec::new(),
            ),
            Artifact::Executable {
                container,
                executable,
            } => (
                "executable",
                introspector.qualified_name_of(container),
                Some(introspector.name_of(executable)),
                introspector.parameter_types_of(executable),
            ),
        };

        Self {
            identifier: testable.identifier.clone(),
            kind,
            container,
            executable,
            parameters,
        }
    }
}
