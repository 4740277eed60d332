//! Property-based tests: round-tripping, chunk-partition invariance, and
//! projection monotonicity.

use jsonshape::{
    parse_str, FieldDesc, Map, ParseError, Parser, Reader, StringReader, TypeDesc, Value,
};
use quickcheck::{Arbitrary, Gen, QuickCheck};

#[derive(Clone, Debug)]
struct ArbValue(Value);

fn arbitrary_value(g: &mut Gen, depth: usize) -> Value {
    let choices = if depth == 0 { 5 } else { 7 };
    match usize::arbitrary(g) % choices {
        0 => Value::Null,
        1 => Value::Boolean(bool::arbitrary(g)),
        2 => Value::Int(i64::arbitrary(g)),
        3 => {
            let mut n = f64::arbitrary(g);
            while !n.is_finite() {
                n = f64::arbitrary(g);
            }
            Value::Float(n)
        }
        4 => Value::String(String::arbitrary(g)),
        5 => {
            let len = usize::arbitrary(g) % 4;
            Value::Array((0..len).map(|_| arbitrary_value(g, depth - 1)).collect())
        }
        _ => {
            let len = usize::arbitrary(g) % 4;
            Value::Object(
                (0..len)
                    .map(|_| (String::arbitrary(g), arbitrary_value(g, depth - 1)))
                    .collect(),
            )
        }
    }
}

impl Arbitrary for ArbValue {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = usize::arbitrary(g) % 3;
        ArbValue(arbitrary_value(g, depth))
    }
}

/// Structural equality modulo number representation: a round-trip may turn
/// `Float(1.0)` into `Int(1)`, so numeric leaves compare by value.
fn normalized_eq(a: &Value, b: &Value) -> bool {
    fn numeric(v: &Value) -> Option<f64> {
        match v {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) | Value::Decimal(n) => Some(*n),
            _ => None,
        }
    }
    match (a, b) {
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(a, b)| normalized_eq(a, b))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .zip(y)
                    .all(|((ka, va), (kb, vb))| ka == kb && normalized_eq(va, vb))
        }
        _ => match (numeric(a), numeric(b)) {
            (Some(x), Some(y)) => x == y,
            _ => a == b,
        },
    }
}

#[test]
fn any_round_trips_through_serialization() {
    fn prop(value: ArbValue) -> bool {
        let text = value.0.to_string();
        let reparsed = parse_str(&text, &TypeDesc::Any).unwrap();
        normalized_eq(&value.0, &reparsed)
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(ArbValue) -> bool);
}

/// Hands out at most `cap` characters per read.
struct TrickleReader<'a> {
    inner: StringReader<'a>,
    cap: usize,
}

impl Reader for TrickleReader<'_> {
    type Error = core::convert::Infallible;

    fn read(&mut self, buf: &mut [char]) -> Result<usize, Self::Error> {
        let cap = self.cap.min(buf.len()).max(1);
        self.inner.read(&mut buf[..cap])
    }
}

#[test]
fn chunk_partitioning_does_not_change_results() {
    fn prop(value: ArbValue, cap: u8) -> bool {
        let text = value.0.to_string();
        let whole = parse_str(&text, &TypeDesc::Any).unwrap();
        let mut reader = TrickleReader {
            inner: StringReader::new(&text),
            cap: usize::from(cap % 7) + 1,
        };
        let trickled = Parser::new().parse(&mut reader, &TypeDesc::Any).unwrap();
        whole == trickled
    }
    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(ArbValue, u8) -> bool);
}

fn required_a_shape() -> TypeDesc {
    TypeDesc::record("R", [FieldDesc::required("a", TypeDesc::Int)], None)
}

#[test]
fn extra_fields_never_change_the_projected_result() {
    fn prop(extras: Vec<(String, i64)>) -> bool {
        let mut doc = Map::new();
        doc.insert("a".into(), Value::Int(1));
        for (key, value) in extras {
            if key != "a" {
                doc.insert(key, Value::Int(value));
            }
        }
        let text = Value::Object(doc).to_string();
        let parsed = parse_str(&text, &required_a_shape()).unwrap();

        let mut expected = Map::new();
        expected.insert("a".into(), Value::Int(1));
        parsed == Value::Object(expected)
    }
    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(Vec<(String, i64)>) -> bool);
}

#[test]
fn extra_fields_never_mask_a_missing_required_field() {
    fn prop(extras: Vec<(String, bool)>) -> bool {
        let mut doc = Map::new();
        for (key, value) in extras {
            if key != "a" {
                doc.insert(key, Value::Boolean(value));
            }
        }
        let text = Value::Object(doc).to_string();
        parse_str(&text, &required_a_shape()).unwrap_err()
            == ParseError::RequiredFieldNotPresent("a".into())
    }
    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(Vec<(String, bool)>) -> bool);
}
