//! Container encoding and decoding

use pretty_assertions::assert_eq;
use testable_id::{Artifact, Resolver};

use crate::fixtures::{engine_root, sample_catalog};

#[test]
fn test_from_unique_id_for_top_level_class() {
    let sample = sample_catalog();
    let resolver = Resolver::new(&sample.catalog);

    let testable = resolver
        .from_unique_id("ENGINE_ID/container:org.example.ATestClass", &engine_root())
        .unwrap();

    assert_eq!(
        testable.identifier.to_string(),
        "ENGINE_ID/container:org.example.ATestClass"
    );
    assert_eq!(testable.artifact, Artifact::Container(sample.a_test_class));
}

#[test]
fn test_static_inner_class_is_top_level() {
    let sample = sample_catalog();
    let resolver = Resolver::new(&sample.catalog);

    let id = resolver
        .encode_container(&sample.an_inner_static_class, &engine_root())
        .unwrap();

    assert_eq!(
        id.to_string(),
        "ENGINE_ID/container:org.example.ATestClass$AnInnerStaticClass"
    );
    assert_eq!(
        resolver.decode_container(&id, &engine_root()).unwrap(),
        sample.an_inner_static_class
    );
}

#[test]
fn test_nested_class_uses_simple_name() {
    let sample = sample_catalog();
    let resolver = Resolver::new(&sample.catalog);

    let id = resolver
        .encode_container(&sample.a_nested_test_class, &engine_root())
        .unwrap();

    assert_eq!(
        id.to_string(),
        "ENGINE_ID/container:org.example.ATestClass/container:ANestedTestClass"
    );
    let values: Vec<&str> = id.segments().into_iter().map(|s| s.value()).collect();
    assert_eq!(
        values,
        vec!["ENGINE_ID", "org.example.ATestClass", "ANestedTestClass"]
    );
}

#[test]
fn test_decode_nested_class_returns_inner() {
    let sample = sample_catalog();
    let resolver = Resolver::new(&sample.catalog);

    let container = resolver
        .decode_container(
            "ENGINE_ID/container:org.example.ATestClass/container:ANestedTestClass",
            &engine_root(),
        )
        .unwrap();

    assert_eq!(container, sample.a_nested_test_class);
    assert_ne!(container, sample.a_test_class);
}

#[test]
fn test_same_simple_name_under_different_parents() {
    let sample = sample_catalog();
    let resolver = Resolver::new(&sample.catalog);
    let root = engine_root();

    let deep = resolver.encode_container(&sample.deep_inner, &root).unwrap();
    let shallow = resolver.encode_container(&sample.other_inner, &root).unwrap();

    assert_eq!(
        deep.to_string(),
        "ENGINE_ID/container:org.example.deep.Outer/container:Middle/container:Inner"
    );
    assert_eq!(
        shallow.to_string(),
        "ENGINE_ID/container:org.example.deep.Outer/container:Inner"
    );
    assert_eq!(resolver.decode_container(&deep, &root).unwrap(), sample.deep_inner);
    assert_eq!(
        resolver.decode_container(&shallow, &root).unwrap(),
        sample.other_inner
    );
}

#[test]
fn test_from_class() {
    let sample = sample_catalog();
    let resolver = Resolver::new(&sample.catalog);

    let testable = resolver.from_class(&sample.middle, &engine_root()).unwrap();

    assert_eq!(
        testable.identifier.to_string(),
        "ENGINE_ID/container:org.example.deep.Outer/container:Middle"
    );
    assert_eq!(testable.artifact, Artifact::Container(sample.middle));
}

#[test]
fn test_encode_under_non_root_parent() {
    let sample = sample_catalog();
    let resolver = Resolver::new(&sample.catalog);
    let parent = engine_root()
        .append_container("suite")
        .unwrap();

    let id = resolver.encode_container(&sample.outer, &parent).unwrap();

    assert_eq!(
        id.to_string(),
        "ENGINE_ID/container:suite/container:org.example.deep.Outer"
    );
    assert_eq!(resolver.decode_container(&id, &parent).unwrap(), sample.outer);
}

#[test]
fn test_decode_container_rejects_executable_identifier() {
    let sample = sample_catalog();
    let resolver = Resolver::new(&sample.catalog);

    let err = resolver
        .decode_container(
            "ENGINE_ID/container:org.example.ATestClass/executable:test1()",
            &engine_root(),
        )
        .unwrap_err();

    assert!(matches!(err, testable_id::ResolveError::Identifier(_)));
}
