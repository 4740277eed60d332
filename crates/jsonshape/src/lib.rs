//! Streaming, shape-directed JSON parsing.
//!
//! `jsonshape` reads a character stream and materializes a value conforming
//! to a caller-supplied *shape* ([`TypeDesc`]). Instead of building a
//! dynamic tree and coercing afterwards, the parser drives its decisions
//! from the shape as it reads: it allocates the right containers, rejects
//! structurally incompatible input early, projects away fields the shape
//! does not mention, and enforces required fields and closed-list sizes at
//! the scope boundaries where they are cheapest to detect.
//!
//! ```
//! use jsonshape::{parse_str, FieldDesc, TypeDesc, Value};
//!
//! let shape = TypeDesc::record(
//!     "Point",
//!     [
//!         FieldDesc::required("x", TypeDesc::Int),
//!         FieldDesc::required("y", TypeDesc::Int),
//!     ],
//!     None,
//! );
//! let value = parse_str(r#"{"x": 1, "y": 2, "label": "origin"}"#, &shape).unwrap();
//! let Value::Object(point) = value else { unreachable!() };
//! assert_eq!(point.get("x"), Some(&Value::Int(1)));
//! // "label" is not part of the shape and the record has no rest type,
//! // so it was projected away while parsing.
//! assert_eq!(point.get("label"), None);
//! ```
//!
//! Callers that want a plain JSON tree pass [`TypeDesc::Any`]. Input is
//! strict RFC 8259: no comments, trailing commas, or single-quoted strings.

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod builder;
mod error;
mod parser;
mod reader;
mod schema;
mod value;

pub use builder::{TreeBuilder, ValueBuilder};
pub use error::ParseError;
pub use parser::Parser;
pub use reader::{Reader, StringReader};
pub use schema::{ArrayDesc, ArrayState, FieldDesc, RecordDesc, TupleDesc, TypeDesc};
pub use value::{Array, Map, Value};

#[cfg(feature = "std")]
mod cached {
    use std::cell::RefCell;

    use crate::{ParseError, Parser, Reader, StringReader, TypeDesc, Value};

    std::thread_local! {
        static MACHINE: RefCell<Parser> = RefCell::new(Parser::new());
    }

    /// Parses one JSON document from `reader` against `shape`.
    ///
    /// Each thread reuses a cached machine across calls, so steady-state
    /// parsing does not reallocate parser stacks. A re-entrant call on the
    /// same thread (e.g. from a [`Reader`] implementation) falls back to a
    /// transient machine.
    pub fn parse<R: Reader>(reader: &mut R, shape: &TypeDesc) -> Result<Value, ParseError> {
        MACHINE.with(|cell| match cell.try_borrow_mut() {
            Ok(mut machine) => machine.parse(reader, shape),
            Err(_) => Parser::new().parse(reader, shape),
        })
    }

    /// Parses a JSON document held in memory. See [`parse`].
    pub fn parse_str(input: &str, shape: &TypeDesc) -> Result<Value, ParseError> {
        parse(&mut StringReader::new(input), shape)
    }
}

#[cfg(feature = "std")]
pub use cached::{parse, parse_str};
