#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

// ============================================================================
// Parameterized keyword parsing tests
// ============================================================================

#[test_case("string", PropertyType::String)]
#[test_case("TEXT", PropertyType::Text)]
#[test_case(" datetime ", PropertyType::Datetime)]
#[test_case("relation", PropertyType::Relation)]
fn PropertyType___from_str___accepts_known_keywords(raw: &str, expected: PropertyType) {
    assert_eq!(raw.parse::<PropertyType>().unwrap(), expected);
}

#[test]
fn PropertyType___from_str___rejects_unknown_keywords() {
    let err = "blob".parse::<PropertyType>().unwrap_err();
    assert!(matches!(err, GeneratorError::UnsupportedPropertyType(value) if value == "blob"));
}

#[test]
fn PropertyType___is_scalar___only_relation_is_not() {
    for ty in PropertyType::ALL {
        assert_eq!(ty.is_scalar(), ty != PropertyType::Relation);
    }
}

#[test_case("one-to-one", RelationKind::OneToOne)]
#[test_case("MANY-TO-ONE", RelationKind::ManyToOne)]
#[test_case("one-to-many", RelationKind::OneToMany)]
#[test_case("many-to-many", RelationKind::ManyToMany)]
fn RelationKind___from_str___accepts_known_keywords(raw: &str, expected: RelationKind) {
    assert_eq!(raw.parse::<RelationKind>().unwrap(), expected);
}

#[test]
fn RelationKind___from_str___rejects_unknown_keywords() {
    let err = "belongs-to".parse::<RelationKind>().unwrap_err();
    assert!(matches!(err, GeneratorError::UnsupportedRelationKind(_)));
}

#[test]
fn RelationKind___is_to_one___covers_single_reference_shapes() {
    assert!(RelationKind::ManyToOne.is_to_one());
    assert!(RelationKind::OneToOne.is_to_one());
    assert!(!RelationKind::OneToMany.is_to_one());
    assert!(!RelationKind::ManyToMany.is_to_one());
}

// ============================================================================
// Option bag tests
// ============================================================================

#[test]
fn PropertyModel___is_nullable___defaults_to_false() {
    let property = PropertyModel::scalar("title", PropertyType::String);
    assert!(!property.is_nullable());

    let property = property.with_option("nullable", true);
    assert!(property.is_nullable());
}

#[test]
fn PropertyModel___string_list_option___splits_and_trims() {
    let property = PropertyModel::scalar("tags", PropertyType::Relation)
        .with_option("cascade", "persist, remove , ");

    assert_eq!(property.string_list_option("cascade"), vec!["persist", "remove"]);
    assert!(property.string_list_option("missing").is_empty());
}

#[test]
fn PropertyModel___relation_kind___requires_the_option() {
    let property = PropertyModel::scalar("author", PropertyType::Relation);
    let err = property.relation_kind().unwrap_err();
    assert!(matches!(err, GeneratorError::MissingRelationKind(name) if name == "author"));

    let property = property.with_option("relationType", "many-to-one");
    assert_eq!(property.relation_kind().unwrap(), RelationKind::ManyToOne);
}

#[test]
fn PropertyModel___relation_target___rejects_blank_targets() {
    let property = PropertyModel::scalar("author", PropertyType::Relation);
    assert!(matches!(
        property.relation_target().unwrap_err(),
        GeneratorError::MissingRelationTarget(_)
    ));

    let property = property.with_option("target", "App\\Entity\\Author");
    assert_eq!(property.relation_target().unwrap(), "App\\Entity\\Author");
}

#[test]
fn OptionValue___accessors___are_type_strict() {
    assert_eq!(OptionValue::Bool(true).as_bool(), Some(true));
    assert_eq!(OptionValue::Int(64).as_int(), Some(64));
    assert_eq!(OptionValue::from("x").as_str(), Some("x"));
    assert_eq!(OptionValue::from("x").as_bool(), None);
    assert_eq!(OptionValue::Bool(false).as_int(), None);
}
