//! # Strictness Options and Failure Propagation
//!
//! Unknown-field and missing-field checks, assign-only mode, and the errors
//! raised by types themselves (construction, post-revival hooks, bad
//! self-reported schemas).

mod common;

use common::{Audited, Confused, Employee, Holder, Job, Person, Unbuildable};
use revive_core::{ObjectSchema, RevivalOptions, ReviveError, Schema, TypeRef};
use revive_engine::{from_str, unmarshal};

// ---------------------------------------------------------------------------
// Unknown fields
// ---------------------------------------------------------------------------

#[test]
fn test_unknown_fields_are_skipped_by_default() {
    let person: Person = from_str(r#"{ "name": "Ann", "age": 41 }"#).unwrap();
    assert_eq!(person.name(), "Ann");
}

#[test]
fn test_unknown_field_fails_when_strict() {
    let options = RevivalOptions::default().fail_on_unknown_fields(true);
    let err = unmarshal::<Person>(
        r#"{ "name": "Ann", "age": 41 }"#,
        TypeRef::of::<Person>(),
        &options,
    )
    .unwrap_err();
    match err {
        ReviveError::UnknownField {
            path,
            type_name,
            field,
        } => {
            assert!(path.is_root());
            assert_eq!(type_name, "Person");
            assert_eq!(field, "age");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_unknown_field_in_nested_object_names_enclosing_type() {
    let options = RevivalOptions::default().fail_on_unknown_fields(true);
    let schema = ObjectSchema::of::<Person>().property("job", Schema::of::<Job>());
    let err = unmarshal::<Person>(
        r#"{ "job": { "title": "Dev", "salary": 1 } }"#,
        schema,
        &options,
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "unknown field 'salary' for type Job at /job"
    );
}

// ---------------------------------------------------------------------------
// Missing fields
// ---------------------------------------------------------------------------

#[test]
fn test_missing_declared_property_defaults_silently() {
    let schema = ObjectSchema::of::<Person>().property("job", Schema::of::<Job>());
    let person: Person =
        unmarshal(r#"{ "name": "Ann" }"#, schema, &RevivalOptions::default()).unwrap();
    assert!(person.job().is_none());
}

#[test]
fn test_missing_declared_property_fails_when_strict() {
    let options = RevivalOptions::default().fail_on_missing_fields(true);
    let schema = ObjectSchema::of::<Person>().property("job", Schema::of::<Job>());
    let err = unmarshal::<Person>(r#"{ "name": "Ann" }"#, schema, &options).unwrap_err();
    assert!(matches!(
        err,
        ReviveError::MissingField { ref type_name, ref fields, .. }
            if type_name == "Person" && fields == &["job"]
    ));
}

#[test]
fn test_missing_check_reports_every_absent_property() {
    let options = RevivalOptions::default().fail_on_missing_fields(true);
    let err = unmarshal::<Employee>(r#"{ "name": "Ann" }"#, TypeRef::of::<Employee>(), &options)
        .unwrap_err();
    match err {
        ReviveError::MissingField { fields, .. } => assert_eq!(fields, ["friends", "job"]),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_missing_check_lists_explicit_properties_first() {
    let options = RevivalOptions::default().fail_on_missing_fields(true);
    let schema = ObjectSchema::of::<Employee>().property("job", Schema::of::<Job>());
    let err = unmarshal::<Employee>(r#"{}"#, schema, &options).unwrap_err();
    assert_eq!(
        err.to_string(),
        "missing fields 'job', 'friends' for type Employee at (root)"
    );
}

#[test]
fn test_missing_check_only_covers_declared_properties() {
    // `name` is a field but not a declared property, so its absence is fine.
    let options = RevivalOptions::default().fail_on_missing_fields(true);
    let schema = ObjectSchema::of::<Person>().property("job", Schema::of::<Job>());
    let person: Person = unmarshal(r#"{ "job": null }"#, schema, &options).unwrap();
    assert_eq!(person.name(), "");
}

#[test]
fn test_missing_check_covers_self_reported_properties() {
    let options = RevivalOptions::default().fail_on_missing_fields(true);
    let err = unmarshal::<Employee>(
        r#"{ "name": "Ann", "job": { "title": "Dev", "props": { "prop1": "x" } } }"#,
        TypeRef::of::<Employee>(),
        &options,
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "missing field 'friends' for type Employee at (root)"
    );
}

#[test]
fn test_strict_options_accept_complete_document() {
    let employee: Employee = unmarshal(
        r#"{
            "name": "Ann",
            "job": { "title": "Dev", "props": { "prop1": "x" } },
            "friends": []
        }"#,
        TypeRef::of::<Employee>(),
        &RevivalOptions::strict(),
    )
    .unwrap();
    assert!(employee.friends().is_empty());
}

// ---------------------------------------------------------------------------
// Assign-only mode
// ---------------------------------------------------------------------------

#[test]
fn test_assign_only_skips_self_reported_schema() {
    let options = RevivalOptions::default().assign_only(true);
    let err = unmarshal::<Employee>(
        r#"{ "friends": [ { "name": "Mary" } ] }"#,
        TypeRef::of::<Employee>(),
        &options,
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "type mismatch at /friends: expected array of revived instances, found array"
    );
}

#[test]
fn test_assign_only_still_honors_explicit_schema() {
    let options = RevivalOptions::default().assign_only(true);
    let schema = ObjectSchema::of::<Person>().property("job", Schema::of::<Job>());
    let person: Person =
        unmarshal(r#"{ "job": { "title": "Dev" } }"#, schema, &options).unwrap();
    assert_eq!(person.job().map(Job::title), Some("Dev"));
}

#[test]
fn test_post_revival_hook_runs_once() {
    let audited: Audited = from_str(r#"{ "label": "x" }"#).unwrap();
    assert_eq!(audited.label(), "x");
    assert_eq!(audited.hook_runs(), 1);
}

#[test]
fn test_assign_only_skips_post_revival_hook() {
    let options = RevivalOptions::default().assign_only(true);
    let audited: Audited =
        unmarshal(r#"{ "label": "" }"#, TypeRef::of::<Audited>(), &options).unwrap();
    assert_eq!(audited.hook_runs(), 0);
}

#[test]
fn test_failing_post_revival_hook_is_construction_error() {
    let err = from_str::<Audited>(r#"{ "label": "" }"#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to construct Audited at (root): label must not be empty"
    );
}

// ---------------------------------------------------------------------------
// Errors raised by types
// ---------------------------------------------------------------------------

#[test]
fn test_construction_error_at_root() {
    let err = from_str::<Unbuildable>("{}").unwrap_err();
    assert!(matches!(err, ReviveError::Construction { .. }));
}

#[test]
fn test_construction_error_nested_carries_path() {
    let schema = ObjectSchema::of::<Holder>().property("inner", Schema::of::<Unbuildable>());
    let err = unmarshal::<Holder>(
        r#"{ "inner": {} }"#,
        schema,
        &RevivalOptions::default(),
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to construct Unbuildable at /inner: no zero-argument form"
    );
}

#[test]
fn test_self_reported_schema_for_other_type_is_rejected() {
    let err = from_str::<Confused>(r#"{ "name": "x" }"#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid schema at (root): type Confused reported a schema for type Person"
    );
}

#[test]
fn test_self_reported_schema_ignored_in_assign_only_mode() {
    let options = RevivalOptions::default().assign_only(true);
    let confused: Result<Confused, _> =
        unmarshal(r#"{ "name": "x" }"#, TypeRef::of::<Confused>(), &options);
    assert!(confused.is_ok());
}
