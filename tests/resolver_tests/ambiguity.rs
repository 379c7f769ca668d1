//! Catalogs that violate their uniqueness guarantees

use testable_id::catalog::Catalog;
use testable_id::{Introspector, ResolveError, Resolver};

use crate::fixtures::engine_root;

fn duplicates() -> Catalog {
    let mut catalog = Catalog::new();
    let first = catalog.add_container("org.example.Twice");
    catalog.add_executable(first, "run", Vec::<String>::new());
    catalog.add_container("org.example.Twice");

    let clashing = catalog.add_container("org.example.Clashing");
    catalog.add_executable(clashing, "run", ["int"]);
    catalog.add_executable(clashing, "run", ["int"]);
    catalog.add_nested_container(clashing, "Inner");
    catalog.add_nested_container(clashing, "Inner");
    catalog
}

#[test]
fn test_decode_duplicate_top_level_container() {
    let catalog = duplicates();
    let resolver = Resolver::new(&catalog);

    let err = resolver
        .decode("ENGINE_ID/container:org.example.Twice", &engine_root())
        .unwrap_err();

    assert_eq!(
        err,
        ResolveError::ambiguous_container("ENGINE_ID/container:org.example.Twice", 2)
    );
}

#[test]
fn test_encode_duplicate_top_level_container() {
    let catalog = duplicates();
    let resolver = Resolver::new(&catalog);
    let twice = catalog.container("org.example.Twice").unwrap();

    let err = resolver.encode_container(&twice, &engine_root()).unwrap_err();

    assert!(matches!(err, ResolveError::AmbiguousContainer { count: 2, .. }));
}

#[test]
fn test_duplicate_nested_container() {
    let catalog = duplicates();
    let resolver = Resolver::new(&catalog);
    let clashing = catalog.container("org.example.Clashing").unwrap();
    let inner = catalog.nested(clashing, "Inner").unwrap();

    let decoded = resolver.decode(
        "ENGINE_ID/container:org.example.Clashing/container:Inner",
        &engine_root(),
    );
    let encoded = resolver.encode_container(&inner, &engine_root());

    assert!(matches!(decoded, Err(ResolveError::AmbiguousContainer { .. })));
    assert!(matches!(encoded, Err(ResolveError::AmbiguousContainer { .. })));
}

#[test]
fn test_duplicate_executable_signature() {
    let catalog = duplicates();
    let resolver = Resolver::new(&catalog);

    let err = resolver
        .decode(
            "ENGINE_ID/container:org.example.Clashing/executable:run(int)",
            &engine_root(),
        )
        .unwrap_err();

    assert_eq!(
        err,
        ResolveError::ambiguous_executable("org.example.Clashing", "run(int)", 2)
    );
}

/// Two containers that each claim the other as their enclosing container.
struct Cyclic;

impl Introspector for Cyclic {
    type Container = u8;
    type Executable = u8;

    fn containers_named(&self, _qualified_name: &str) -> Vec<u8> {
        vec![0]
    }

    fn enclosing_container_of(&self, container: &u8) -> Option<u8> {
        Some(1 - container)
    }

    fn nested_containers_of(&self, container: &u8) -> Vec<u8> {
        vec![1 - container]
    }

    fn declared_executables_of(&self, _container: &u8) -> Vec<u8> {
        Vec::new()
    }

    fn declaring_container_of(&self, _executable: &u8) -> u8 {
        0
    }

    fn parameter_types_of(&self, _executable: &u8) -> Vec<String> {
        Vec::new()
    }

    fn simple_name_of(&self, container: &u8) -> String {
        format!("C{container}")
    }

    fn qualified_name_of(&self, container: &u8) -> String {
        format!("org.example.C{container}")
    }

    fn name_of(&self, _executable: &u8) -> String {
        "run".to_string()
    }
}

#[test]
fn test_cyclic_enclosing_chain() {
    let resolver = Resolver::new(Cyclic).with_max_depth(8);

    let err = resolver.encode_container(&0, &engine_root()).unwrap_err();

    assert_eq!(err, ResolveError::nesting_too_deep("org.example.C0", 8));
}
