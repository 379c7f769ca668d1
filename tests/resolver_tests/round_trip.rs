//! Encode/decode over every artifact in the sample catalog

use std::collections::HashSet;

use pretty_assertions::assert_eq;
use testable_id::{Artifact, Identifier, Introspector, Resolver};

use crate::fixtures::{engine_root, sample_catalog};

#[test]
fn test_every_container_round_trips() {
    let sample = sample_catalog();
    let resolver = Resolver::new(&sample.catalog);
    let root = engine_root();

    for container in sample.catalog.containers() {
        let id = resolver.encode_container(&container, &root).unwrap();
        assert_eq!(
            resolver.decode(&id, &root).unwrap(),
            Artifact::Container(container),
            "{id}"
        );
        assert_eq!(resolver.encode(&Artifact::Container(container), &root).unwrap(), id);
    }
}

#[test]
fn test_every_executable_round_trips() {
    let sample = sample_catalog();
    let resolver = Resolver::new(&sample.catalog);
    let root = engine_root();

    for executable in sample.catalog.executables() {
        let id = resolver.encode_executable(&executable, &root).unwrap();
        let artifact = resolver.decode(&id, &root).unwrap();
        assert_eq!(artifact.executable(), Some(&executable), "{id}");
        assert_eq!(
            artifact.container(),
            &sample.catalog.declaring_container_of(&executable)
        );
        assert_eq!(resolver.encode(&artifact, &root).unwrap(), id);
    }
}

#[test]
fn test_identifiers_are_distinct() {
    let sample = sample_catalog();
    let resolver = Resolver::new(&sample.catalog);
    let root = engine_root();

    let mut seen = HashSet::new();
    for container in sample.catalog.containers() {
        assert!(seen.insert(resolver.encode_container(&container, &root).unwrap()));
    }
    for executable in sample.catalog.executables() {
        assert!(seen.insert(resolver.encode_executable(&executable, &root).unwrap()));
    }
    assert_eq!(
        seen.len(),
        sample.catalog.container_count() + sample.catalog.executable_count()
    );
}

#[test]
fn test_text_round_trip_through_resolver() {
    let sample = sample_catalog();
    let resolver = Resolver::new(&sample.catalog);
    let root = engine_root();

    for executable in sample.catalog.executables() {
        let text = resolver
            .encode_executable(&executable, &root)
            .unwrap()
            .serialize();
        let parsed = Identifier::parse(&text).unwrap();
        assert_eq!(parsed.serialize(), text);
        assert_eq!(
            resolver.decode(text.as_str(), &root).unwrap().executable(),
            Some(&executable)
        );
    }
}

#[test]
fn test_concrete_scenario() {
    let sample = sample_catalog();
    let resolver = Resolver::new(&sample.catalog);
    let root = engine_root();
    let text = "ENGINE_ID/container:org.example.ATestClass/executable:test1()";

    assert_eq!(
        resolver.encode_executable(&sample.test1, &root).unwrap().serialize(),
        text
    );
    assert_eq!(
        resolver.decode(text, &root).unwrap().executable(),
        Some(&sample.test1)
    );
}
