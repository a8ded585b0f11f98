//! Ancestor walks: deep decorators, deep traits, interface checks.

use rstest::rstest;

use crate::helpers::decorator_assertions::{tag_like_values, tag_values};
use crate::helpers::fixtures::{declare_attributes, tag, world};
use reflector::host::{ClassDecl, ClassRegistry, MatchMode};
use reflector::{Inspector, Name, ReflectError, Target};

// ============================================================================
// Deep decorators
// ============================================================================

#[test]
fn test_child_first_then_base() {
    let registry = ClassRegistry::new();
    declare_attributes(&registry);
    registry
        .declare(ClassDecl::new_class("Base").with_attribute(tag("a")))
        .unwrap();
    registry
        .declare(
            ClassDecl::new_class("Child")
                .extends("Base")
                .with_attribute(tag("b")),
        )
        .unwrap();

    let decorators = Inspector::new(&registry)
        .get_decorators_deep("Child", "Tag", MatchMode::InstanceOf)
        .unwrap();
    assert_eq!(tag_values(&decorators), vec!["b", "a"]);
}

#[test]
fn test_three_levels_no_deduplication() {
    let registry = world();
    let decorators = Inspector::new(&registry)
        .get_decorators_deep("GrandChild", "Tag", MatchMode::Exact)
        .unwrap();
    assert_eq!(decorators.len(), 3);
    assert_eq!(tag_values(&decorators), vec!["c", "b", "a"]);
}

#[test]
fn test_deep_instance_of_includes_subtypes_per_level() {
    let registry = world();
    let decorators = Inspector::new(&registry)
        .get_decorators_deep("GrandChild", "Tag", MatchMode::InstanceOf)
        .unwrap();
    assert_eq!(tag_like_values(&decorators), vec!["c", "special:s", "b", "a"]);
}

#[rstest]
#[case::by_name(false)]
#[case::by_object(true)]
fn test_deep_walk_from_name_or_object(#[case] use_object: bool) {
    let registry = world();
    let target = if use_object {
        Target::Object(registry.new_object("GrandChild").unwrap())
    } else {
        Target::from("GrandChild")
    };
    let decorators = Inspector::new(&registry)
        .get_decorators_deep(target, "Tag", MatchMode::Exact)
        .unwrap();
    assert_eq!(tag_values(&decorators), vec!["c", "b", "a"]);
}

#[test]
fn test_deep_walk_from_handle_follows_parent_link() {
    let registry = world();
    let inspector = Inspector::new(&registry);
    let handle = inspector.get_reflector("Child").unwrap();
    let decorators = inspector
        .get_decorators_deep(handle, "Tag", MatchMode::Exact)
        .unwrap();
    assert_eq!(tag_values(&decorators), vec!["b", "a"]);
}

/// Child is declared up front; Base only arrives through the autoloader.
fn lazy_parent_registry() -> ClassRegistry {
    let registry = ClassRegistry::new();
    declare_attributes(&registry);
    registry.register_autoloader(|name: &str| {
        name.eq_ignore_ascii_case("Base").then(|| {
            ClassDecl::new_class("Base")
                .uses("Loggable")
                .with_attribute(tag("a"))
        })
    });
    registry
        .declare(ClassDecl::new_trait("Loggable"))
        .unwrap();
    registry
        .declare(
            ClassDecl::new_class("Child")
                .extends("Base")
                .with_attribute(tag("b")),
        )
        .unwrap();
    registry
}

#[rstest]
#[case::without_autoload(false, &["b"])]
#[case::with_autoload(true, &["b", "a"])]
fn test_deep_walk_start_does_not_change_ancestors(
    #[case] autoload: bool,
    #[case] expected: &[&str],
) {
    let registry = lazy_parent_registry();
    let inspector = Inspector::new(&registry).with_autoload(autoload);

    let handle = inspector.get_reflector("Child").unwrap();
    let object = registry.new_object("Child").unwrap();
    let starts = [Target::from(handle), Target::from("Child"), Target::from(object)];

    for start in starts {
        let decorators = inspector
            .get_decorators_deep(start, "Tag", MatchMode::Exact)
            .unwrap();
        assert_eq!(tag_values(&decorators), expected);
    }
}

#[rstest]
#[case::without_autoload(false, &[])]
#[case::with_autoload(true, &["Loggable"])]
fn test_class_uses_deep_respects_autoload(#[case] autoload: bool, #[case] expected: &[&str]) {
    let registry = lazy_parent_registry();
    let traits = Inspector::new(&registry)
        .class_uses_deep("Child", autoload)
        .unwrap();
    assert_eq!(traits, expected.iter().map(|name| Name::new(name)).collect::<Vec<_>>());
}

#[test]
fn test_deep_walk_on_method_reads_one_level() {
    let registry = world();
    let object = registry.new_object("GrandChild").unwrap();
    let decorators = Inspector::new(&registry)
        .get_decorators_deep((object, "show"), "Tag", MatchMode::Exact)
        .unwrap();
    assert_eq!(tag_values(&decorators), vec!["method"]);
}

#[test]
fn test_deep_walk_without_matches_is_empty() {
    let registry = world();
    let decorators = Inspector::new(&registry)
        .get_decorators_deep("GrandChild", "Deprecated", MatchMode::Exact)
        .unwrap();
    assert!(decorators.is_empty());
}

#[test]
fn test_deep_walk_detects_cycles() {
    let registry = ClassRegistry::new();
    declare_attributes(&registry);
    registry
        .declare(ClassDecl::new_class("Ping").extends("Pong"))
        .unwrap();
    registry
        .declare(ClassDecl::new_class("Pong").extends("Ping"))
        .unwrap();

    let err = Inspector::new(&registry)
        .get_decorators_deep("Ping", "Tag", MatchMode::Exact)
        .unwrap_err();
    assert!(matches!(err, ReflectError::CircularInheritance { class } if class == "Ping"));
}

#[test]
fn test_deep_walk_invalid_target() {
    let registry = world();
    let err = Inspector::new(&registry)
        .get_decorators_deep("Nope", "Tag", MatchMode::Exact)
        .unwrap_err();
    assert!(matches!(err, ReflectError::InvalidTarget { .. }));
}

// ============================================================================
// Deep traits
// ============================================================================

fn sorted(names: Vec<Name>) -> Vec<String> {
    let mut names: Vec<String> = names.iter().map(|name| name.to_string()).collect();
    names.sort();
    names
}

#[test]
fn test_class_uses_deep_collects_ancestors_and_nested_traits() {
    let registry = world();
    let traits = Inspector::new(&registry)
        .class_uses_deep("GrandChild", true)
        .unwrap();
    assert_eq!(
        sorted(traits),
        vec!["HasTimestamps", "Loggable", "Touches"]
    );
}

#[test]
fn test_class_uses_deep_is_unique_and_stable() {
    let registry = world();
    let inspector = Inspector::new(&registry);
    let first = inspector.class_uses_deep("GrandChild", true).unwrap();
    let second = inspector.class_uses_deep("grandchild", true).unwrap();
    assert_eq!(first, second);
    let unique: std::collections::HashSet<_> = first.iter().collect();
    assert_eq!(unique.len(), first.len());
}

#[test]
fn test_class_uses_deep_nested_pass_is_one_level() {
    let registry = ClassRegistry::new();
    registry.declare(ClassDecl::new_trait("Z2")).unwrap();
    registry
        .declare(ClassDecl::new_trait("Z1").uses("Z2"))
        .unwrap();
    registry
        .declare(ClassDecl::new_trait("X").uses("Z1"))
        .unwrap();
    registry.declare(ClassDecl::new_trait("Y")).unwrap();
    registry
        .declare(ClassDecl::new_class("Parent").uses("Y"))
        .unwrap();
    registry
        .declare(ClassDecl::new_class("Kid").extends("Parent").uses("X"))
        .unwrap();

    let traits = Inspector::new(&registry)
        .class_uses_deep("Kid", true)
        .unwrap();
    assert_eq!(sorted(traits), vec!["X", "Y", "Z1"]);
}

#[test]
fn test_class_uses_deep_with_object() {
    let registry = world();
    let object = registry.new_object("Base").unwrap();
    let traits = Inspector::new(&registry)
        .class_uses_deep(object, true)
        .unwrap();
    assert_eq!(traits, vec![Name::new("Loggable")]);
}

#[test]
fn test_class_uses_deep_unknown_class_is_empty() {
    let registry = world();
    let traits = Inspector::new(&registry)
        .class_uses_deep("Nope", true)
        .unwrap();
    assert!(traits.is_empty());
}

#[test]
fn test_class_uses_deep_rejects_non_class_values() {
    let registry = world();
    let err = Inspector::new(&registry)
        .class_uses_deep(Target::method("Base", "show"), true)
        .unwrap_err();
    assert!(matches!(err, ReflectError::InvalidTarget { .. }));
}

// ============================================================================
// Interface checks
// ============================================================================

#[rstest]
#[case("Base", "Sortable", true)]
#[case("Base", "Comparable", true)]
#[case("GrandChild", "comparable", true)]
#[case("Plain", "Comparable", false)]
#[case("Nope", "Comparable", false)]
#[case("Sortable", "Comparable", false)]
fn test_class_implements(#[case] class: &str, #[case] interface: &str, #[case] expected: bool) {
    let registry = world();
    assert_eq!(
        Inspector::new(&registry).class_implements(class, interface, true),
        expected
    );
}

#[test]
fn test_class_implements_with_object() {
    let registry = world();
    let object = registry.new_object("Child").unwrap();
    assert!(Inspector::new(&registry).class_implements(object, "Comparable", true));
}

#[test]
fn test_class_implements_unresolvable_object_class_is_false() {
    let registry = world();
    let elsewhere = ClassRegistry::new();
    elsewhere
        .declare(ClassDecl::new_class("Stranger").implements("Comparable"))
        .unwrap();
    let object = elsewhere.new_object("Stranger").unwrap();
    assert!(!Inspector::new(&registry).class_implements(object, "Comparable", true));
}

#[test]
fn test_class_implements_non_class_value_is_false() {
    let registry = world();
    assert!(!Inspector::new(&registry).class_implements(
        Target::method("Base", "show"),
        "Comparable",
        true
    ));
}
