//! Executable encoding, decoding and overload disambiguation

use pretty_assertions::assert_eq;
use testable_id::{Artifact, ResolveError, Resolver};

use crate::fixtures::{engine_root, sample_catalog};

#[test]
fn test_from_unique_id_for_method() {
    let sample = sample_catalog();
    let resolver = Resolver::new(&sample.catalog);
    let text = "ENGINE_ID/container:org.example.ATestClass/executable:test1()";

    let testable = resolver.from_unique_id(text, &engine_root()).unwrap();

    assert_eq!(testable.identifier.to_string(), text);
    assert_eq!(
        testable.artifact,
        Artifact::Executable {
            container: sample.a_test_class,
            executable: sample.test1,
        }
    );
}

#[test]
fn test_from_unique_id_for_method_with_parameters() {
    let sample = sample_catalog();
    let resolver = Resolver::new(&sample.catalog);
    let text = "ENGINE_ID/container:org.example.BTestClass/executable:test4(java.lang.String, java.math.BigDecimal)";

    let (container, executable) = resolver.decode_executable(text, &engine_root()).unwrap();

    assert_eq!(container, sample.b_test_class);
    assert_eq!(executable, sample.test4);
}

#[test]
fn test_from_unique_id_for_method_in_static_inner_class() {
    let sample = sample_catalog();
    let resolver = Resolver::new(&sample.catalog);

    let (container, executable) = resolver
        .decode_executable(
            "ENGINE_ID/container:org.example.ATestClass$AnInnerStaticClass/executable:test2()",
            &engine_root(),
        )
        .unwrap();

    assert_eq!(container, sample.an_inner_static_class);
    assert_eq!(executable, sample.test2);
}

#[test]
fn test_from_method() {
    let sample = sample_catalog();
    let resolver = Resolver::new(&sample.catalog);

    let testable = resolver.from_method(&sample.test1, &engine_root()).unwrap();

    assert_eq!(
        testable.identifier.to_string(),
        "ENGINE_ID/container:org.example.ATestClass/executable:test1()"
    );
    assert_eq!(testable.artifact.executable(), Some(&sample.test1));
    assert_eq!(testable.artifact.container(), &sample.a_test_class);
}

#[test]
fn test_from_method_with_parameters_keeps_declaration_order() {
    let sample = sample_catalog();
    let resolver = Resolver::new(&sample.catalog);

    let testable = resolver.from_method(&sample.test4, &engine_root()).unwrap();

    assert_eq!(
        testable.identifier.last_segment().value(),
        "test4(java.lang.String, java.math.BigDecimal)"
    );
}

#[test]
fn test_method_in_nested_class() {
    let sample = sample_catalog();
    let resolver = Resolver::new(&sample.catalog);

    let id = resolver
        .encode_executable(&sample.deep_test, &engine_root())
        .unwrap();

    assert_eq!(
        id.to_string(),
        "ENGINE_ID/container:org.example.deep.Outer/container:Middle/container:Inner/executable:deepTest(long%5B%5D)"
    );
    let (container, executable) = resolver.decode_executable(&id, &engine_root()).unwrap();
    assert_eq!(container, sample.deep_inner);
    assert_eq!(executable, sample.deep_test);
}

#[test]
fn test_overloads_encode_distinctly() {
    let sample = sample_catalog();
    let resolver = Resolver::new(&sample.catalog);
    let root = engine_root();

    let values: Vec<String> = [
        sample.f_none,
        sample.f_string,
        sample.f_string_int,
        sample.f_int_string,
    ]
    .iter()
    .map(|e| {
        resolver
            .encode_executable(e, &root)
            .unwrap()
            .last_segment()
            .value()
            .to_string()
    })
    .collect();

    assert_eq!(
        values,
        vec![
            "f()",
            "f(java.lang.String)",
            "f(java.lang.String, int)",
            "f(int, java.lang.String)",
        ]
    );
}

#[test]
fn test_overloads_decode_to_the_right_executable() {
    let sample = sample_catalog();
    let resolver = Resolver::new(&sample.catalog);
    let root = engine_root();
    let prefix = "ENGINE_ID/container:org.example.OverloadedTestClass/executable:";

    let cases = [
        ("f()", sample.f_none),
        ("f(java.lang.String)", sample.f_string),
        ("f(java.lang.String, int)", sample.f_string_int),
        ("f(int, java.lang.String)", sample.f_int_string),
    ];
    for (signature, expected) in cases {
        let (_, executable) = resolver
            .decode_executable(format!("{prefix}{signature}"), &root)
            .unwrap();
        assert_eq!(executable, expected, "{signature}");
    }
}

#[test]
fn test_encode_executable_in_foreign_container() {
    let sample = sample_catalog();
    let resolver = Resolver::new(&sample.catalog);

    let err = resolver
        .encode_executable_in(&sample.test1, &sample.b_test_class, &engine_root())
        .unwrap_err();

    assert_eq!(
        err,
        ResolveError::unresolvable_executable("org.example.BTestClass", "test1()")
    );
}

#[test]
fn test_decode_executable_rejects_container_identifier() {
    let sample = sample_catalog();
    let resolver = Resolver::new(&sample.catalog);

    let err = resolver
        .decode_executable("ENGINE_ID/container:org.example.ATestClass", &engine_root())
        .unwrap_err();

    assert!(matches!(err, ResolveError::NotAnExecutable { .. }));
}
