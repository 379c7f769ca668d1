//! The structural queries the resolver needs about containers and
//! executables. Implementations decide where the structure comes from; see
//! [`crate::catalog::Catalog`] for a registry loaded from metadata files.

use std::fmt::Debug;

pub trait Introspector {
    type Container: Clone + PartialEq + Debug;
    type Executable: Clone + PartialEq + Debug;

    /// Looks up a container by qualified name, nested or not. More than one
    /// result means the registry broke its uniqueness guarantee.
    fn containers_named(&self, qualified_name: &str) -> Vec<Self::Container>;

    fn enclosing_container_of(&self, container: &Self::Container) -> Option<Self::Container>;

    fn nested_containers_of(&self, container: &Self::Container) -> Vec<Self::Container>;

    fn declared_executables_of(&self, container: &Self::Container) -> Vec<Self::Executable>;

    fn declaring_container_of(&self, executable: &Self::Executable) -> Self::Container;

    /// Fully qualified parameter type names in declaration order.
    fn parameter_types_of(&self, executable: &Self::Executable) -> Vec<String>;

    fn simple_name_of(&self, container: &Self::Container) -> String;

    fn qualified_name_of(&self, container: &Self::Container) -> String;

    fn name_of(&self, executable: &Self::Executable) -> String;
}

impl<T: Introspector + ?Sized> Introspector for &T {
    type Container = T::Container;
    type Executable = T::Executable;

    fn containers_named(&self, qualified_name: &str) -> Vec<Self::Container> {
        (**self).containers_named(qualified_name)
    }

    fn enclosing_container_of(&self, container: &Self::Container) -> Option<Self::Container> {
        (**self).enclosing_container_of(container)
    }

    fn nested_containers_of(&self, container: &Self::Container) -> Vec<Self::Container> {
        (**self).nested_containers_of(container)
    }

    fn declared_executables_of(&self, container: &Self::Container) -> Vec<Self::Executable> {
        (**self).declared_executables_of(container)
    }

    fn declaring_container_of(&self, executable: &Self::Executable) -> Self::Container {
        (**self).declaring_container_of(executable)
    }

    fn parameter_types_of(&self, executable: &Self::Executable) -> Vec<String> {
        (**self).parameter_types_of(executable)
    }

    fn simple_name_of(&self, container: &Self::Container) -> String {
        (**self).simple_name_of(container)
    }

    fn qualified_name_of(&self, container: &Self::Container) -> String {
        (**self).qualified_name_of(container)
    }

    fn name_of(&self, executable: &Self::Executable) -> String {
        (**self).name_of(executable)
    }
}
