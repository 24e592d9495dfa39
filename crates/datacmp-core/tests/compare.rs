use datacmp_core::{
    compare_with, CompareConfig, CompareError, Comparator, ErrorKind, Path, Side,
};
use datacmp_value::{Handle, Key, ObjectRef, Value};
use proptest::prelude::*;
use serde_json::{json, Value as Json};

fn check(left: &Value, right: &Value) -> Result<(), CompareError> {
    Comparator::default().compare(left, right)
}

fn path(keys: &[&str]) -> Path {
    keys.iter().map(|k| Key::from(*k)).collect()
}

/// `{"deep": {"deeper": target}}`
fn nest(target: &ObjectRef) -> Value {
    Value::collection([("deep", Value::collection([("deeper", target.clone())]))])
}

fn test_object() -> ObjectRef {
    ObjectRef::new("TestObject")
        .with_field("byValue", "NOT_SET")
        .with_field("byReference", "NOT_SET")
        .with_private("private", Value::Null)
}

#[test]
fn scalar_equality() {
    assert!(check(&Value::Int(5), &Value::Int(5)).is_ok());
    let err = check(&Value::Int(5), &Value::Int(6)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValuesDiffer);
    assert!(matches!(err, CompareError::ValueMismatch { .. }));
}

#[test]
fn type_discrimination() {
    for (left, right) in [
        (Value::Int(1), Value::from("1")),
        (Value::Int(1), Value::Float(1.0)),
        (Value::Null, Value::Bool(false)),
        (Value::from(""), Value::Null),
        (Value::list([1]), Value::Int(1)),
        (Value::Object(test_object()), Value::list(Vec::<i64>::new())),
    ] {
        let err = check(&left, &right).unwrap_err();
        assert!(
            matches!(err, CompareError::TypeMismatch { .. }),
            "{left:?} vs {right:?}: {err}"
        );
    }
}

#[test]
fn distinct_scalars_of_each_type_differ() {
    let file_a = Handle::new("tmpfile");
    let file_b = Handle::new("tmpfile");
    let closure_a = Handle::new("closure");
    let closure_b = Handle::new("closure");

    let pairs = [
        (Value::Bool(true), Value::Bool(false)),
        (Value::Int(-123), Value::Int(0)),
        (Value::Float(-123.45), Value::Float(123.45)),
        (Value::from("hello"), Value::from("world")),
        (Value::Resource(file_a), Value::Resource(file_b)),
        (Value::Function(closure_a), Value::Function(closure_b)),
    ];
    for (left, right) in pairs {
        let err = check(&left, &right).unwrap_err();
        assert!(matches!(err, CompareError::ValueMismatch { .. }), "{err}");
    }
}

#[test]
fn collection_key_sets() {
    let ab = Value::from(json!({"a": 1, "b": 2}));
    let ac = Value::from(json!({"a": 1, "c": 2}));
    let ba = Value::collection([("b", 2), ("a", 1)]);

    let err = check(&ab, &ac).unwrap_err();
    assert!(matches!(err, CompareError::KeySetMismatch { .. }));
    assert!(check(&ab, &ba).is_ok());
}

#[test]
fn list_against_map_with_same_entries_differs() {
    let list = Value::list(["x"]);
    let map = Value::collection([("0", "x")]);
    let err = check(&list, &map).unwrap_err();
    assert!(matches!(err, CompareError::KeySetMismatch { .. }));
}

#[test]
fn ignored_keys_through_config() {
    let left = Value::from(json!({"a": 1, "b": 2}));
    let right = Value::from(json!({"a": 99, "b": 2}));

    let mut comparator = Comparator::default();
    comparator.ignore_key("a");
    assert!(comparator.compare(&left, &right).is_ok());

    comparator.unignore_key("a");
    let err = comparator.compare(&left, &right).unwrap_err();
    assert!(matches!(err, CompareError::ValueMismatch { .. }));
    assert_eq!(err.path(), &path(&["a"]));
}

#[test]
fn composite_objects_compare_by_fields() {
    let left = test_object().with_field("byValue", 1);
    let right = test_object().with_field("byValue", 1);
    assert!(check(&Value::Object(left.clone()), &Value::Object(right.clone())).is_ok());

    right.set("byValue", 2);
    let err = check(&Value::Object(left), &Value::Object(right)).unwrap_err();
    assert!(matches!(err, CompareError::ValueMismatch { .. }));
    assert_eq!(err.path(), &path(&["byValue"]));
}

#[test]
fn object_with_extra_field_is_key_set_mismatch() {
    let left = test_object();
    let right = test_object().with_field("extra", true);
    let err = check(&Value::Object(left), &Value::Object(right)).unwrap_err();
    assert!(matches!(err, CompareError::KeySetMismatch { .. }));
    assert!(err.path().is_empty());
}

#[test]
fn objects_nested_in_collections_by_value_and_reference() {
    let inner = test_object();
    let left = Value::collection([
        (Key::Int(0), Value::Object(inner.duplicate())),
        (Key::from("byReference"), Value::Object(inner.clone())),
    ]);
    let right = Value::collection([
        (Key::Int(0), Value::Object(inner.duplicate())),
        (Key::from("byReference"), Value::Object(inner)),
    ]);
    assert!(check(&left, &right).is_ok());
}

#[test]
fn reflexive_on_self_referential_object() {
    let obj = test_object();
    obj.set("byReference", obj.clone());
    let value = Value::Object(obj);
    assert!(check(&value, &value).is_ok());
}

#[test]
fn direct_self_reference_reports_left_loop() {
    let left = test_object();
    left.set("byReference", left.clone());
    let right = test_object();
    right.set("byReference", right.clone());

    let err = check(&Value::Object(left), &Value::Object(right)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CircularReference);
    assert_eq!(
        err.to_string(),
        r#"Left object at "byReference" references itself at the root, comparing cannot continue to avoid infinite recursion."#
    );
}

#[test]
fn different_depth_self_reference() {
    let left_deep = test_object();
    let left = test_object();
    left.set("byReference", left_deep.clone());
    left_deep.set("byReference", left.clone());
    let right = test_object();
    right.set("byReference", right.clone());

    let err = check(&Value::Object(left), &Value::Object(right)).unwrap_err();
    assert!(matches!(
        err,
        CompareError::CircularSelfReference { side: Side::Right, .. }
    ));
}

#[test]
fn deep_self_and_cross_references_resolve() {
    let left = test_object();
    left.set("byReference", nest(&left));
    let right = test_object();
    right.set("byReference", nest(&right));
    assert!(check(&Value::Object(left), &Value::Object(right)).is_ok());

    let left = test_object();
    let right = test_object();
    left.set("byReference", right.clone());
    right.set("byReference", left.clone());
    assert!(check(&Value::Object(left), &Value::Object(right)).is_ok());

    let left = test_object();
    let right = test_object();
    left.set("byReference", nest(&right));
    right.set("byReference", nest(&left));
    assert!(check(&Value::Object(left), &Value::Object(right)).is_ok());
}

#[test]
fn comparison_does_not_mutate_inputs() {
    let left = test_object().with_field("list", Value::list([1, 2]));
    let right = test_object().with_field("list", Value::list([1, 3]));
    let (l, r) = (Value::Object(left.clone()), Value::Object(right.clone()));

    let first = check(&l, &r);
    let second = check(&l, &r);
    assert_eq!(first, second);
    assert!(matches!(left.get("list"), Some(Value::Collection(c)) if c.len() == 2));
    assert_eq!(left.borrow().fields().count(), 4);
    assert_eq!(right.borrow().fields().count(), 4);
}

#[test]
fn asymmetric_cycle_hits_depth_ceiling() {
    // Left loops through two objects, right through three: the left object
    // is always last seen two levels up and the right one three, so neither
    // the one-step rule nor the equal-path rule ever fires.
    let ring = |len: usize| {
        let nodes: Vec<ObjectRef> = (0..len).map(|_| ObjectRef::new("Ring")).collect();
        for (i, node) in nodes.iter().enumerate() {
            node.set("next", nodes[(i + 1) % len].clone());
        }
        nodes[0].clone()
    };
    let config = CompareConfig::default().with_max_depth(Some(64));
    match compare_with(&config, &Value::Object(ring(2)), &Value::Object(ring(3))) {
        Err(CompareError::DepthExceeded { limit, path }) => {
            assert_eq!(limit, 64);
            assert_eq!(path.len(), 65);
        }
        other => panic!("expected DepthExceeded, got {other:?}"),
    }
}

fn json_value() -> impl Strategy<Value = Json> {
    let leaf = prop_oneof![
        Just(Json::Null),
        any::<bool>().prop_map(Json::Bool),
        (-5i64..5).prop_map(Json::from),
        prop::sample::select(vec![-1.5f64, 0.5, 2.25]).prop_map(Json::from),
        "[a-c]{0,2}".prop_map(Json::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            // Non-empty, so an empty list never meets an empty map.
            prop::collection::vec(inner.clone(), 1..4).prop_map(Json::Array),
            prop::collection::btree_map("[a-d]", inner, 0..4)
                .prop_map(|m| Json::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn reflexive(json in json_value()) {
        let value = Value::from(json);
        prop_assert!(check(&value, &value).is_ok());
        prop_assert!(check(&value, &value.clone()).is_ok());
    }

    #[test]
    fn agrees_with_json_equality(a in json_value(), b in json_value()) {
        let expected = a == b;
        let result = check(&Value::from(a), &Value::from(b));
        prop_assert_eq!(result.is_ok(), expected, "{:?}", result);
    }

    #[test]
    fn idempotent(a in json_value(), b in json_value()) {
        let (a, b) = (Value::from(a), Value::from(b));
        prop_assert_eq!(check(&a, &b), check(&a, &b));
    }

    #[test]
    fn ignored_key_masks_any_difference(base in json_value(), x in json_value(), y in json_value()) {
        let mut left = serde_json::Map::new();
        left.insert("payload".into(), base.clone());
        left.insert("skip".into(), x);
        let mut right = serde_json::Map::new();
        right.insert("payload".into(), base);
        right.insert("skip".into(), y);

        let comparator = Comparator::new(CompareConfig::default().ignoring("skip"));
        prop_assert!(comparator
            .compare(&Value::from(Json::Object(left)), &Value::from(Json::Object(right)))
            .is_ok());
    }

    #[test]
    fn wrapped_in_objects_matches_plain(a in json_value(), b in json_value()) {
        let plain = check(&Value::from(a.clone()), &Value::from(b.clone())).is_ok();
        let left = ObjectRef::new("Box").with_field("inner", Value::from(a));
        let right = ObjectRef::new("Box").with_field("inner", Value::from(b));
        prop_assert_eq!(check(&Value::Object(left), &Value::Object(right)).is_ok(), plain);
    }
}
