//! Decorator instantiation.

use crate::helpers::decorator_assertions::{class_names, tag_like_values, tag_values};
use crate::helpers::fixtures::{Route, Tag, world};
use reflector::host::{AttributeFlags, AttributeSpec, ClassDecl, MatchMode};
use reflector::{Arguments, ConstructError, InstantiationError, Inspector, ReflectError};

#[test]
fn test_get_decorators_instantiates_in_order() {
    let registry = world();
    let decorators = Inspector::new(&registry)
        .get_decorators("GrandChild", "Tag", MatchMode::InstanceOf)
        .unwrap();
    assert_eq!(tag_like_values(&decorators), vec!["c", "special:s"]);
    assert_eq!(class_names(&decorators), vec!["Tag", "SpecialTag"]);
}

#[test]
fn test_exact_mode_excludes_subtype_decorators() {
    let registry = world();
    let decorators = Inspector::new(&registry)
        .get_decorators("GrandChild", "Tag", MatchMode::Exact)
        .unwrap();
    assert_eq!(tag_values(&decorators), vec!["c"]);
}

#[test]
fn test_named_arguments_reach_constructor() {
    let registry = world();
    let decorator = Inspector::new(&registry)
        .get_decorator("home", "Route", 0, MatchMode::InstanceOf)
        .unwrap()
        .unwrap();
    assert_eq!(
        decorator.downcast_ref::<Route>(),
        Some(&Route {
            path: "/".to_string(),
            method: "POST".to_string(),
        })
    );
}

#[test]
fn test_instantiation_is_repeatable() {
    let registry = world();
    let inspector = Inspector::new(&registry);
    let first = inspector
        .get_decorator("Base", "Tag", 0, MatchMode::InstanceOf)
        .unwrap()
        .unwrap();
    let second = inspector
        .get_decorator("Base", "Tag", 0, MatchMode::InstanceOf)
        .unwrap()
        .unwrap();
    assert_eq!(first.downcast_ref::<Tag>(), second.downcast_ref::<Tag>());
    assert!(!std::sync::Arc::ptr_eq(first.value(), second.value()));
}

#[test]
fn test_get_decorator_out_of_range_is_none() {
    let registry = world();
    let decorator = Inspector::new(&registry)
        .get_decorator("Base", "Tag", 3, MatchMode::InstanceOf)
        .unwrap();
    assert!(decorator.is_none());
}

#[test]
fn test_marker_decorator_from_trait_method() {
    let registry = world();
    let object = registry.new_object("Child").unwrap();
    let decorators = Inspector::new(&registry)
        .get_decorators((object, "touch"), "Deprecated", MatchMode::Exact)
        .unwrap();
    assert_eq!(decorators.len(), 1);
    assert!(decorators[0].is::<()>());
}

#[test]
fn test_constructor_failure_aborts_batch() {
    let registry = world();
    let inspector = Inspector::new(&registry);

    // Filtering out the broken attribute succeeds.
    let tags = inspector
        .get_decorators("Fragile", "Tag", MatchMode::Exact)
        .unwrap();
    assert_eq!(tag_values(&tags), vec!["ok"]);

    let err = inspector
        .get_decorators("Fragile", "Broken", MatchMode::Exact)
        .unwrap_err();
    match err {
        ReflectError::Instantiation(InstantiationError::Constructor { attribute, source }) => {
            assert_eq!(attribute.as_str(), "Broken");
            assert_eq!(source.to_string(), "refusing to construct");
        }
        other => panic!("Expected constructor failure, got {:?}", other),
    }

    let err = inspector
        .get_decorator("Fragile", "Broken", 5, MatchMode::Exact)
        .unwrap_err();
    assert!(matches!(err, ReflectError::Instantiation(_)));
}

#[test]
fn test_attribute_on_disallowed_target_fails() {
    let registry = world();
    registry
        .declare(
            ClassDecl::new_class("Misplaced")
                .with_attribute(AttributeSpec::new("Route").with("/x")),
        )
        .unwrap();
    let err = Inspector::new(&registry)
        .get_decorators("Misplaced", "Route", MatchMode::InstanceOf)
        .unwrap_err();
    assert!(matches!(
        err,
        ReflectError::Instantiation(InstantiationError::TargetNotAllowed { .. })
    ));
}

#[test]
fn test_one_failing_subtype_fails_whole_batch() {
    let registry = world();
    registry
        .declare(
            ClassDecl::new_class("BrokenTag")
                .extends("Tag")
                .as_attribute(AttributeFlags::TARGET_CLASS),
        )
        .unwrap();
    registry.register_constructor("BrokenTag", |_: &Arguments| -> Result<(), ConstructError> {
        Err(ConstructError::custom("no"))
    });
    registry
        .declare(
            ClassDecl::new_class("Shaky")
                .with_attribute(AttributeSpec::new("Tag").with("ok"))
                .with_attribute(AttributeSpec::new("BrokenTag")),
        )
        .unwrap();

    let inspector = Inspector::new(&registry);
    assert!(
        inspector
            .get_decorators("Shaky", "Tag", MatchMode::InstanceOf)
            .is_err()
    );
    // The exact filter never reaches the broken attribute.
    let tags = inspector
        .get_decorators("Shaky", "Tag", MatchMode::Exact)
        .unwrap();
    assert_eq!(tag_values(&tags), vec!["ok"]);
}
