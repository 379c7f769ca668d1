//! A static registry of containers and executables.
//!
//! The catalog is an arena: containers and executables live in flat vectors
//! and are handed out as copyable ids. It can be built in code or loaded
//! from JSON/YAML metadata with [`Catalog::from_path`].

pub mod loader;

pub use loader::{CatalogFile, ContainerSpec, ExecutableSpec};

use std::collections::HashMap;
use tracing::warn;

use crate::introspect::Introspector;

const NESTING_SEPARATOR: char = '$';

/// Handle to a container. Only valid for the catalog that issued it (or a
/// clone of that catalog); every catalog method indexes with it directly and
/// panics on a handle from another catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(usize);

/// Handle to an executable, with the same validity rule as [`ContainerId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExecutableId(usize);

#[derive(Debug, Clone)]
struct ContainerEntry {
    qualified_name: String,
    simple_name: String,
    enclosing: Option<ContainerId>,
    nested: Vec<ContainerId>,
    executables: Vec<ExecutableId>,
}

#[derive(Debug, Clone)]
struct ExecutableEntry {
    name: String,
    parameter_types: Vec<String>,
    declaring: ContainerId,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    containers: Vec<ContainerEntry>,
    executables: Vec<ExecutableEntry>,
    by_qualified_name: HashMap<String, Vec<ContainerId>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a top-level container. The simple name is the part after the
    /// last `.` of the qualified name.
    pub fn add_container(&mut self, qualified_name: impl Into<String>) -> ContainerId {
        let qualified_name = qualified_name.into();
        let simple_name = qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&qualified_name)
            .to_string();
        self.add_container_named(qualified_name, simple_name)
    }

    pub fn add_container_named(
        &mut self,
        qualified_name: impl Into<String>,
        simple_name: impl Into<String>,
    ) -> ContainerId {
        self.insert_container(qualified_name.into(), simple_name.into(), None)
    }

    /// Adds a container nested in `enclosing`; its qualified name is
    /// `<enclosing>$<simple_name>`.
    pub fn add_nested_container(
        &mut self,
        enclosing: ContainerId,
        simple_name: impl Into<String>,
    ) -> ContainerId {
        let simple_name = simple_name.into();
        let qualified_name = format!(
            "{}{NESTING_SEPARATOR}{simple_name}",
            self.containers[enclosing.0].qualified_name
        );

        if self.containers[enclosing.0]
            .nested
            .iter()
            .any(|id| self.containers[id.0].simple_name == simple_name)
        {
            warn!(
                container = %self.containers[enclosing.0].qualified_name,
                nested = %simple_name,
                "duplicate nested container name"
            );
        }

        let id = self.insert_container(qualified_name, simple_name, Some(enclosing));
        self.containers[enclosing.0].nested.push(id);
        id
    }

    fn insert_container(
        &mut self,
        qualified_name: String,
        simple_name: String,
        enclosing: Option<ContainerId>,
    ) -> ContainerId {
        let id = ContainerId(self.containers.len());
        let ids = self
            .by_qualified_name
            .entry(qualified_name.clone())
            .or_default();
        if !ids.is_empty() {
            warn!(container = %qualified_name, "duplicate qualified container name");
        }
        ids.push(id);

        self.containers.push(ContainerEntry {
            qualified_name,
            simple_name,
            enclosing,
            nested: Vec::new(),
            executables: Vec::new(),
        });
        id
    }

    pub fn add_executable<S: Into<String>>(
        &mut self,
        container: ContainerId,
        name: impl Into<String>,
        parameter_types: impl IntoIterator<Item = S>,
    ) -> ExecutableId {
        let name = name.into();
        let parameter_types: Vec<String> = parameter_types.into_iter().map(Into::into).collect();

        if self.find_executable(container, &name, &parameter_types).is_some() {
            warn!(
                container = %self.containers[container.0].qualified_name,
                executable = %name,
                "duplicate executable signature"
            );
        }

        let id = ExecutableId(self.executables.len());
        self.executables.push(ExecutableEntry {
            name,
            parameter_types,
            declaring: container,
        });
        self.containers[container.0].executables.push(id);
        id
    }

    /// First container registered under `qualified_name`.
    pub fn container(&self, qualified_name: &str) -> Option<ContainerId> {
        self.by_qualified_name
            .get(qualified_name)
            .and_then(|ids| ids.first().copied())
    }

    pub fn nested(&self, enclosing: ContainerId, simple_name: &str) -> Option<ContainerId> {
        self.containers[enclosing.0]
            .nested
            .iter()
            .copied()
            .find(|id| self.containers[id.0].simple_name == simple_name)
    }

    pub fn find_executable<S: AsRef<str>>(
        &self,
        container: ContainerId,
        name: &str,
        parameter_types: &[S],
    ) -> Option<ExecutableId> {
        self.containers[container.0]
            .executables
            .iter()
            .copied()
            .find(|id| {
                let entry = &self.executables[id.0];
                entry.name == name
                    && entry.parameter_types.len() == parameter_types.len()
                    && entry
                        .parameter_types
                        .iter()
                        .zip(parameter_types)
                        .all(|(a, b)| a == b.as_ref())
            })
    }

    pub fn containers(&self) -> impl Iterator<Item = ContainerId> + '_ {
        (0..self.containers.len()).map(ContainerId)
    }

    pub fn executables(&self) -> impl Iterator<Item = ExecutableId> + '_ {
        (0..self.executables.len()).map(ExecutableId)
    }

    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    pub fn executable_count(&self) -> usize {
        self.executables.len()
    }

    pub fn extend_from(&mut self, file: &CatalogFile) {
        for spec in &file.containers {
            let id = match &spec.simple_name {
                Some(simple_name) => self.add_container_named(&spec.name, simple_name),
                None => self.add_container(&spec.name),
            };
            self.extend_container(id, spec);
        }
    }

    fn extend_container(&mut self, id: ContainerId, spec: &ContainerSpec) {
        for executable in &spec.executables {
            self.add_executable(id, &executable.name, &executable.parameters);
        }
        for nested in &spec.nested {
            let nested_id = self.add_nested_container(id, &nested.name);
            self.extend_container(nested_id, nested);
        }
    }
}

impl From<&CatalogFile> for Catalog {
    fn from(file: &CatalogFile) -> Self {
        let mut catalog = Catalog::new();
        catalog.extend_from(file);
        catalog
    }
}

impl Introspector for Catalog {
    type Container = ContainerId;
    type Executable = ExecutableId;

    fn containers_named(&self, qualified_name: &str) -> Vec<ContainerId> {
        self.by_qualified_name
            .get(qualified_name)
            .cloned()
            .unwrap_or_default()
    }

    fn enclosing_container_of(&self, container: &ContainerId) -> Option<ContainerId> {
        self.containers[container.0].enclosing
    }

    fn nested_containers_of(&self, container: &ContainerId) -> Vec<ContainerId> {
        self.containers[container.0].nested.clone()
    }

    fn declared_executables_of(&self, container: &ContainerId) -> Vec<ExecutableId> {
        self.containers[container.0].executables.clone()
    }

    fn declaring_container_of(&self, executable: &ExecutableId) -> ContainerId {
        self.executables[executable.0].declaring
    }

    fn parameter_types_of(&self, executable: &ExecutableId) -> Vec<String> {
        self.executables[executable.0].parameter_types.clone()
    }

    fn simple_name_of(&self, container: &ContainerId) -> String {
        self.containers[container.0].simple_name.clone()
    }

    fn qualified_name_of(&self, container: &ContainerId) -> String {
        self.containers[container.0].qualified_name.clone()
    }

    fn name_of(&self, executable: &ExecutableId) -> String {
        self.executables[executable.0].name.clone()
    }
}
