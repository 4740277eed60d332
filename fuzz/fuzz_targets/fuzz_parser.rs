#![no_main]

use jsonshape::{parse_str, FieldDesc, TypeDesc};
use libfuzzer_sys::fuzz_target;

fn shapes() -> [TypeDesc; 6] {
    [
        TypeDesc::Any,
        TypeDesc::Int,
        TypeDesc::String,
        TypeDesc::array_of(TypeDesc::Any),
        TypeDesc::map_of(TypeDesc::Int),
        TypeDesc::record(
            "Fuzz",
            [
                FieldDesc::required("a", TypeDesc::Int),
                FieldDesc::optional("b", TypeDesc::String),
            ],
            Some(TypeDesc::Any),
        ),
    ]
}

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let shapes = shapes();
    let shape = &shapes[usize::from(selector) % shapes.len()];
    let input = String::from_utf8_lossy(rest);

    // Must never panic, whatever the shape.
    let _ = parse_str(&input, shape);

    // Anything accepted as untyped JSON must reserialize to something the
    // parser accepts again.
    if let Ok(value) = parse_str(&input, &TypeDesc::Any) {
        let text = value.to_string();
        assert!(
            parse_str(&text, &TypeDesc::Any).is_ok(),
            "round-trip rejected: {text}"
        );
    }
});
