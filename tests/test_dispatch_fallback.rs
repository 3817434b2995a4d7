extern crate proteus;

use proteus::protocol::target::{null, object_fallback, undefined};
use proteus::protocol::{Extension, Protocol, ProtocolError, Target};
use proteus::runtime::object::Class;
use proteus::runtime::value::Value;

/// Helper: a one-method rendering protocol.
fn show_protocol() -> Protocol {
    Protocol::named("Show")
        .method("show", "renders the receiver as text")
        .define()
}

/// Helper: an implementation returning a fixed tag.
fn tag(
    text: &'static str,
) -> impl Fn(Value, Vec<Value>) -> Result<Value, ProtocolError> + 'static {
    move |_receiver, _args| Ok(Value::from(text))
}

fn expect_miss(result: Result<Value, ProtocolError>, expected_type: &str) {
    match result {
        Err(ProtocolError::DispatchMiss { type_name, .. }) => {
            assert_eq!(type_name, expected_type)
        }
        Err(other) => panic!("expected a dispatch miss, got {}", other),
        Ok(value) => panic!("expected a dispatch miss, got {:?}", value),
    }
}

// ── Pseudo-constructors ──────────────────────────────────────────────

#[test]
fn test_pseudo_constructors_return_fixed_sentinels() {
    assert_eq!(null(), Value::Null);
    assert_eq!(undefined(), Value::Undefined);
    match object_fallback() {
        Value::Object(o) => {
            assert!(o.borrow().class().is_none());
            assert!(o.borrow().keys().is_empty());
        }
        other => panic!("expected a plain object, got {:?}", other),
    }
}

#[test]
fn test_object_fallback_constructor_returns_fresh_objects() {
    // Object identity is pointer identity; every call allocates anew.
    assert_ne!(object_fallback(), object_fallback());
}

#[test]
fn test_null_and_undefined_dispatch_to_their_pseudo_targets() {
    let show = show_protocol();
    show.extend(Target::Null, Extension::new().add_closure("show", tag("null")))
        .unwrap();
    show.extend(
        Target::Undefined,
        Extension::new().add_closure("show", tag("undefined")),
    )
    .unwrap();

    assert_eq!(show.call("show", null(), vec![]).unwrap(), Value::from("null"));
    assert_eq!(
        show.call("show", undefined(), vec![]).unwrap(),
        Value::from("undefined")
    );
}

// ── Object fallback scope ────────────────────────────────────────────

#[test]
fn test_object_fallback_applies_to_plain_objects() {
    let show = show_protocol();
    show.extend(
        Target::ObjectFallback,
        Extension::new().add_closure("show", tag("generic object")),
    )
    .unwrap();

    assert_eq!(
        show.call("show", object_fallback(), vec![]).unwrap(),
        Value::from("generic object")
    );
}

#[test]
fn test_object_fallback_applies_to_unregistered_class_instances() {
    let show = show_protocol();
    show.extend(
        Target::ObjectFallback,
        Extension::new().add_closure("show", tag("generic object")),
    )
    .unwrap();

    let point = Class::new("Point");
    assert_eq!(
        show.call("show", point.instantiate(), vec![]).unwrap(),
        Value::from("generic object")
    );
}

#[test]
fn test_dedicated_class_registration_beats_fallback() {
    let show = show_protocol();
    let point = Class::new("Point");
    show.extend(
        Target::ObjectFallback,
        Extension::new().add_closure("show", tag("generic object")),
    )
    .unwrap();
    show.extend(
        Target::from(&point),
        Extension::new().add_closure("show", tag("a point")),
    )
    .unwrap();

    assert_eq!(
        show.call("show", point.instantiate(), vec![]).unwrap(),
        Value::from("a point")
    );
    // Plain objects still use the fallback record.
    assert_eq!(
        show.call("show", object_fallback(), vec![]).unwrap(),
        Value::from("generic object")
    );
}

#[test]
fn test_object_fallback_never_applies_to_non_objects() {
    let show = show_protocol();
    show.extend(
        Target::ObjectFallback,
        Extension::new().add_closure("show", tag("generic object")),
    )
    .unwrap();

    expect_miss(show.call("show", Value::array(vec![]), vec![]), "Array");
    expect_miss(show.call("show", Value::from("abc"), vec![]), "String");
    expect_miss(show.call("show", Value::from(3), vec![]), "Number");
    expect_miss(show.call("show", Value::from(true), vec![]), "Boolean");
    expect_miss(show.call("show", Value::Null, vec![]), "null");
    expect_miss(show.call("show", Value::Undefined, vec![]), "undefined");
}

#[test]
fn test_arrays_keep_their_own_registration() {
    let show = show_protocol();
    show.extend(
        Target::ObjectFallback,
        Extension::new().add_closure("show", tag("generic object")),
    )
    .unwrap();
    show.extend(Target::Array, Extension::new().add_closure("show", tag("array")))
        .unwrap();

    assert_eq!(
        show.call("show", Value::array(vec![]), vec![]).unwrap(),
        Value::from("array")
    );
}

#[test]
fn test_class_miss_reports_class_name() {
    let show = show_protocol();
    let point = Class::new("Point");
    // Same display name, distinct identity: implementations do not leak
    // between classes.
    let other_point = Class::new("Point");
    show.extend(
        Target::from(&point),
        Extension::new().add_closure("show", tag("a point")),
    )
    .unwrap();

    assert_eq!(
        show.call("show", point.instantiate(), vec![]).unwrap(),
        Value::from("a point")
    );
    expect_miss(show.call("show", other_point.instantiate(), vec![]), "Point");
}

// ── Capability test scope ────────────────────────────────────────────

#[test]
fn test_satisfied_by_consults_fallback_for_objects_only() {
    let show = show_protocol();
    show.extend(
        Target::ObjectFallback,
        Extension::new().add_closure("show", tag("generic object")),
    )
    .unwrap();

    assert!(show.satisfied_by(&object_fallback()));
    assert!(show.satisfied_by(&Class::new("Point").instantiate()));
    assert!(!show.satisfied_by(&Value::array(vec![])));
    assert!(!show.satisfied_by(&Value::from(1)));
    assert!(!show.satisfied_by(&Value::from("s")));
    assert!(!show.satisfied_by(&Value::Null));
    assert!(!show.satisfied_by(&Value::Undefined));
}
