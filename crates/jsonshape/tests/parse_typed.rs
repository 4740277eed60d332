//! Happy-path parsing against concrete shapes.

use jsonshape::{parse_str, ArrayState, FieldDesc, TypeDesc, Value};

fn obj(entries: &[(&str, Value)]) -> Value {
    Value::Object(
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect(),
    )
}

#[test]
fn record_with_required_fields() {
    let shape = TypeDesc::record(
        "R",
        [
            FieldDesc::required("a", TypeDesc::Int),
            FieldDesc::required("b", TypeDesc::String),
        ],
        None,
    );
    let value = parse_str(r#"{"a":1,"b":"x"}"#, &shape).unwrap();
    assert_eq!(
        value,
        obj(&[("a", Value::Int(1)), ("b", Value::String("x".into()))])
    );
}

#[test]
fn scalar_roots() {
    assert_eq!(parse_str("null", &TypeDesc::Null).unwrap(), Value::Null);
    assert_eq!(
        parse_str("true", &TypeDesc::Boolean).unwrap(),
        Value::Boolean(true)
    );
    assert_eq!(parse_str("-42", &TypeDesc::Int).unwrap(), Value::Int(-42));
    assert_eq!(
        parse_str("2.5e1", &TypeDesc::Float).unwrap(),
        Value::Float(25.0)
    );
    assert_eq!(
        parse_str("1.25", &TypeDesc::Decimal).unwrap(),
        Value::Decimal(1.25)
    );
    assert_eq!(
        parse_str(r#""hi""#, &TypeDesc::String).unwrap(),
        Value::String("hi".into())
    );
}

#[test]
fn whitespace_padded_scalar_root() {
    let value = parse_str("  \n  true  ", &TypeDesc::Boolean).unwrap();
    assert_eq!(value, Value::Boolean(true));
}

#[test]
fn string_escapes_decode() {
    let value = parse_str(r#""hello\nworld""#, &TypeDesc::String).unwrap();
    assert_eq!(value, Value::String("hello\nworld".into()));

    let value = parse_str(r#""q\" b\\ s\/ \b\f\r\t""#, &TypeDesc::String).unwrap();
    assert_eq!(
        value,
        Value::String("q\" b\\ s/ \u{0008}\u{000C}\r\t".into())
    );
}

#[test]
fn unicode_escapes_decode() {
    let value = parse_str(r#""\u0041\u00e9""#, &TypeDesc::String).unwrap();
    assert_eq!(value, Value::String("Aé".into()));

    // Case-insensitive hex digits.
    let value = parse_str(r#""\u00E9""#, &TypeDesc::String).unwrap();
    assert_eq!(value, Value::String("é".into()));
}

#[test]
fn lone_surrogate_escapes_become_replacement_units() {
    let value = parse_str(r#""\uD800\uDC00""#, &TypeDesc::String).unwrap();
    assert_eq!(value, Value::String("\u{FFFD}\u{FFFD}".into()));
}

#[test]
fn escaped_field_names_resolve() {
    let shape = TypeDesc::record("R", [FieldDesc::required("ab", TypeDesc::Int)], None);
    let value = parse_str(r#"{"\u0061b": 5}"#, &shape).unwrap();
    assert_eq!(value, obj(&[("ab", Value::Int(5))]));
}

#[test]
fn any_builds_heterogeneous_trees() {
    let value = parse_str(r#"{"a":{"b":[1,"x"]}}"#, &TypeDesc::Any).unwrap();
    assert_eq!(
        value,
        obj(&[(
            "a",
            obj(&[(
                "b",
                Value::Array(vec![Value::Int(1), Value::String("x".into())])
            )])
        )])
    );
}

#[test]
fn any_infers_number_kinds() {
    let value = parse_str("[1, 2.5, -3e2]", &TypeDesc::Any).unwrap();
    assert_eq!(
        value,
        Value::Array(vec![
            Value::Int(1),
            Value::Float(2.5),
            Value::Float(-300.0)
        ])
    );
}

#[test]
fn open_arrays_accept_any_length() {
    let shape = TypeDesc::array_of(TypeDesc::Int);
    assert_eq!(
        parse_str("[1,2,3]", &shape).unwrap(),
        Value::Array(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
    );
    assert_eq!(parse_str("[]", &shape).unwrap(), Value::Array(vec![]));
}

#[test]
fn closed_array_with_exact_size() {
    let shape = TypeDesc::closed_array_of(TypeDesc::Int, 2);
    assert!(matches!(
        &shape,
        TypeDesc::Array(desc) if desc.state == ArrayState::Closed(2)
    ));
    assert_eq!(
        parse_str("[1,2]", &shape).unwrap(),
        Value::Array(vec![Value::Int(1), Value::Int(2)])
    );
}

#[test]
fn tuples_type_each_position() {
    let shape = TypeDesc::tuple(vec![TypeDesc::Int, TypeDesc::String], None);
    assert_eq!(
        parse_str(r#"[1, "x"]"#, &shape).unwrap(),
        Value::Array(vec![Value::Int(1), Value::String("x".into())])
    );
}

#[test]
fn tuple_rest_types_trailing_elements() {
    let shape = TypeDesc::tuple(vec![TypeDesc::Int], Some(TypeDesc::Boolean));
    assert_eq!(
        parse_str("[1, true, false]", &shape).unwrap(),
        Value::Array(vec![
            Value::Int(1),
            Value::Boolean(true),
            Value::Boolean(false)
        ])
    );
}

#[test]
fn maps_constrain_every_value() {
    let shape = TypeDesc::map_of(TypeDesc::Int);
    let value = parse_str(r#"{"a": 1, "b": 2}"#, &shape).unwrap();
    assert_eq!(value, obj(&[("a", Value::Int(1)), ("b", Value::Int(2))]));
}

#[test]
fn quoted_content_coerces_to_field_scalars() {
    let shape = TypeDesc::record(
        "R",
        [
            FieldDesc::required("n", TypeDesc::Int),
            FieldDesc::required("f", TypeDesc::Float),
            FieldDesc::required("b", TypeDesc::Boolean),
        ],
        None,
    );
    let value = parse_str(r#"{"n":"12","f":"2.5","b":"true"}"#, &shape).unwrap();
    assert_eq!(
        value,
        obj(&[
            ("n", Value::Int(12)),
            ("f", Value::Float(2.5)),
            ("b", Value::Boolean(true)),
        ])
    );
}

#[test]
fn union_root_resolves_members_in_order() {
    let shape = TypeDesc::union(vec![TypeDesc::Int, TypeDesc::String]);
    assert_eq!(parse_str("5", &shape).unwrap(), Value::Int(5));
    assert_eq!(
        parse_str(r#""x""#, &shape).unwrap(),
        Value::String("x".into())
    );
    // Quoted digits coerce to the first matching member.
    assert_eq!(parse_str(r#""5""#, &shape).unwrap(), Value::Int(5));
}

#[test]
fn union_typed_fields() {
    let member = TypeDesc::union(vec![TypeDesc::Null, TypeDesc::Int]);
    let shape = TypeDesc::record("R", [FieldDesc::required("a", member)], None);
    assert_eq!(
        parse_str(r#"{"a": null}"#, &shape).unwrap(),
        obj(&[("a", Value::Null)])
    );
    assert_eq!(
        parse_str(r#"{"a": 3}"#, &shape).unwrap(),
        obj(&[("a", Value::Int(3))])
    );
}

#[test]
fn nested_records() {
    let inner = TypeDesc::record("Inner", [FieldDesc::required("b", TypeDesc::Int)], None);
    let shape = TypeDesc::record("Outer", [FieldDesc::required("a", inner)], None);
    let value = parse_str(r#"{"a": {"b": 7}}"#, &shape).unwrap();
    assert_eq!(value, obj(&[("a", obj(&[("b", Value::Int(7))]))]));
}

#[test]
fn arrays_of_records() {
    let elem = TypeDesc::record("E", [FieldDesc::required("id", TypeDesc::Int)], None);
    let shape = TypeDesc::array_of(elem);
    let value = parse_str(r#"[{"id":1},{"id":2}]"#, &shape).unwrap();
    assert_eq!(
        value,
        Value::Array(vec![
            obj(&[("id", Value::Int(1))]),
            obj(&[("id", Value::Int(2))])
        ])
    );
}

#[test]
fn duplicate_field_resolves_against_rest() {
    // The first occurrence consumes the declared field; the duplicate falls
    // to the rest type.
    let shape = TypeDesc::record(
        "R",
        [FieldDesc::required("a", TypeDesc::Int)],
        Some(TypeDesc::String),
    );
    let value = parse_str(r#"{"a": 1, "a": "x"}"#, &shape).unwrap();
    assert_eq!(value, obj(&[("a", Value::String("x".into()))]));
}

#[test]
fn optional_fields_may_be_absent() {
    let shape = TypeDesc::record(
        "R",
        [
            FieldDesc::required("a", TypeDesc::Int),
            FieldDesc::optional("b", TypeDesc::String),
        ],
        None,
    );
    assert_eq!(
        parse_str(r#"{"a": 1}"#, &shape).unwrap(),
        obj(&[("a", Value::Int(1))])
    );
}

#[test]
fn empty_composites_under_any() {
    assert_eq!(parse_str("{}", &TypeDesc::Any).unwrap(), obj(&[]));
    assert_eq!(parse_str("[]", &TypeDesc::Any).unwrap(), Value::Array(vec![]));
}

#[test]
fn deeply_nested_any() {
    let doc = "[[[[[[[[1]]]]]]]]";
    let mut expected = Value::Int(1);
    for _ in 0..8 {
        expected = Value::Array(vec![expected]);
    }
    assert_eq!(parse_str(doc, &TypeDesc::Any).unwrap(), expected);
}

#[test]
fn documents_larger_than_one_chunk() {
    // Spans several 1024-char reader chunks.
    let mut doc = String::from("[");
    for i in 0..2000 {
        if i > 0 {
            doc.push(',');
        }
        doc.push_str(&i.to_string());
    }
    doc.push(']');
    let value = parse_str(&doc, &TypeDesc::array_of(TypeDesc::Int)).unwrap();
    let Value::Array(items) = value else {
        panic!("expected an array");
    };
    assert_eq!(items.len(), 2000);
    assert_eq!(items[1999], Value::Int(1999));
}
