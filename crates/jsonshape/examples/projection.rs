//! Parses a document against a record shape, projecting unknown fields away.
//!
//! ```sh
//! cargo run --example projection
//! ```

use jsonshape::{parse_str, FieldDesc, TypeDesc};

fn main() {
    let shape = TypeDesc::record(
        "User",
        [
            FieldDesc::required("id", TypeDesc::Int),
            FieldDesc::required("name", TypeDesc::String),
            FieldDesc::optional("email", TypeDesc::String),
        ],
        None,
    );

    let doc = r#"{"id": 7, "name": "Ada", "role": "admin", "scores": [1, 2, 3]}"#;
    match parse_str(doc, &shape) {
        Ok(value) => println!("{value}"),
        Err(err) => eprintln!("parse failed: {err}"),
    }
}
