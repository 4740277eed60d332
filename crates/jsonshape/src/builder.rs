//! Value construction and scalar coercion.
//!
//! The parser never inspects concrete value representations; it drives a
//! [`ValueBuilder`] to allocate containers and coerce scalar lexemes, and
//! treats the resulting nodes as opaque handles. [`TreeBuilder`] is the
//! default implementation, materializing [`Value`] trees.

use alloc::borrow::ToOwned;
use alloc::string::ToString;

use crate::error::ParseError;
use crate::schema::TypeDesc;
use crate::value::{Array, Map, Value};

/// Constructs output values on behalf of the parser.
pub trait ValueBuilder {
    /// The handle for values under construction.
    type Node;

    /// Allocates the container for a JSON object against `expected`, which
    /// must be a record, map, or `Any` shape.
    fn new_map(&mut self, expected: &TypeDesc) -> Result<Self::Node, ParseError>;

    /// Allocates the container for a JSON list against `expected`, which
    /// must be an array, tuple, or `Any` shape.
    fn new_array(&mut self, expected: &TypeDesc) -> Result<Self::Node, ParseError>;

    /// Coerces a scalar lexeme to `expected`. `quoted` distinguishes string
    /// content from bareword literals (`true`, `null`, numbers).
    fn scalar(
        &mut self,
        lexeme: &str,
        quoted: bool,
        expected: &TypeDesc,
    ) -> Result<Self::Node, ParseError>;

    /// Stores `value` under `name` in an object node.
    fn set_field(&mut self, map: &mut Self::Node, name: &str, value: Self::Node);

    /// Appends `value` to a list node.
    fn push_element(&mut self, array: &mut Self::Node, value: Self::Node);
}

/// The default builder, producing [`Value`] trees.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeBuilder;

impl ValueBuilder for TreeBuilder {
    type Node = Value;

    fn new_map(&mut self, expected: &TypeDesc) -> Result<Value, ParseError> {
        match expected {
            TypeDesc::Record(_) | TypeDesc::Map(_) | TypeDesc::Any => Ok(Value::Object(Map::new())),
            other => Err(incompatible("{", other)),
        }
    }

    fn new_array(&mut self, expected: &TypeDesc) -> Result<Value, ParseError> {
        match expected {
            TypeDesc::Array(_) | TypeDesc::Tuple(_) | TypeDesc::Any => {
                Ok(Value::Array(Array::new()))
            }
            other => Err(incompatible("[", other)),
        }
    }

    fn scalar(
        &mut self,
        lexeme: &str,
        quoted: bool,
        expected: &TypeDesc,
    ) -> Result<Value, ParseError> {
        coerce(lexeme, quoted, expected)
    }

    fn set_field(&mut self, map: &mut Value, name: &str, value: Value) {
        if let Value::Object(fields) = map {
            fields.insert(name.to_owned(), value);
        }
    }

    fn push_element(&mut self, array: &mut Value, value: Value) {
        if let Value::Array(elements) = array {
            elements.push(value);
        }
    }
}

fn incompatible(lexeme: &str, expected: &TypeDesc) -> ParseError {
    ParseError::IncompatibleValue {
        value: lexeme.into(),
        expected: expected.to_string(),
    }
}

fn coerce(lexeme: &str, quoted: bool, expected: &TypeDesc) -> Result<Value, ParseError> {
    match expected {
        TypeDesc::Union(members) => {
            for member in members.iter() {
                if let Ok(value) = coerce(lexeme, quoted, member) {
                    return Ok(value);
                }
            }
            Err(incompatible(lexeme, expected))
        }
        TypeDesc::Any => {
            if quoted {
                Ok(Value::String(lexeme.into()))
            } else {
                any_literal(lexeme).ok_or_else(|| incompatible(lexeme, expected))
            }
        }
        TypeDesc::Null if !quoted && lexeme == "null" => Ok(Value::Null),
        TypeDesc::Boolean if lexeme == "true" => Ok(Value::Boolean(true)),
        TypeDesc::Boolean if lexeme == "false" => Ok(Value::Boolean(false)),
        TypeDesc::Int => parse_int(lexeme)
            .map(Value::Int)
            .ok_or_else(|| incompatible(lexeme, expected)),
        TypeDesc::Float => parse_number(lexeme)
            .map(Value::Float)
            .ok_or_else(|| incompatible(lexeme, expected)),
        TypeDesc::Decimal => parse_number(lexeme)
            .map(Value::Decimal)
            .ok_or_else(|| incompatible(lexeme, expected)),
        TypeDesc::String if quoted => Ok(Value::String(lexeme.into())),
        _ => Err(incompatible(lexeme, expected)),
    }
}

/// Interprets a bareword lexeme as an untyped JSON scalar: `null`, the
/// booleans, `Int` for integer syntax, `Float` for any other valid number.
fn any_literal(lexeme: &str) -> Option<Value> {
    match lexeme {
        "null" => Some(Value::Null),
        "true" => Some(Value::Boolean(true)),
        "false" => Some(Value::Boolean(false)),
        _ if is_integer_lexeme(lexeme) => lexeme
            .parse::<i64>()
            .ok()
            .map(Value::Int)
            // Magnitude beyond i64 still parses, as a float.
            .or_else(|| parse_number(lexeme).map(Value::Float)),
        _ => parse_number(lexeme).map(Value::Float),
    }
}

fn parse_int(lexeme: &str) -> Option<i64> {
    if is_integer_lexeme(lexeme) {
        lexeme.parse().ok()
    } else {
        None
    }
}

fn parse_number(lexeme: &str) -> Option<f64> {
    if !is_number_lexeme(lexeme) {
        return None;
    }
    // Lexemes whose magnitude overflows f64 parse to infinity; reject them
    // so every materialized number is finite.
    lexeme.parse().ok().filter(|n: &f64| n.is_finite())
}

/// `-?(0|[1-9][0-9]*)`, the integer production of RFC 8259.
fn is_integer_lexeme(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    match digits.as_bytes() {
        [] => false,
        [b'0'] => true,
        [b'0', ..] => false,
        bytes => bytes.iter().all(u8::is_ascii_digit),
    }
}

/// The full number production of RFC 8259.
fn is_number_lexeme(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    if bytes.first() == Some(&b'-') {
        i += 1;
    }
    match bytes.get(i).copied() {
        Some(b'0') => i += 1,
        Some(b) if b.is_ascii_digit() => {
            while bytes.get(i).is_some_and(u8::is_ascii_digit) {
                i += 1;
            }
        }
        _ => return false,
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        let start = i;
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        if i == start {
            return false;
        }
    }
    if matches!(bytes.get(i).copied(), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i).copied(), Some(b'+' | b'-')) {
            i += 1;
        }
        let start = i;
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        if i == start {
            return false;
        }
    }
    i == bytes.len()
}
