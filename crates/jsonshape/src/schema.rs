//! Shape descriptors that drive parsing.
//!
//! A [`TypeDesc`] tells the parser what the caller expects the document to
//! look like. Composite descriptors are `Arc`-backed so cloning a shape onto
//! the expected-type stack is cheap.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

/// The expected type for a value position.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeDesc {
    Null,
    Boolean,
    Int,
    Float,
    Decimal,
    String,
    /// Untyped JSON: any well-formed value is accepted and materialized with
    /// inferred scalar types.
    Any,
    Record(Arc<RecordDesc>),
    /// A map with a constrained value type.
    Map(Arc<TypeDesc>),
    Array(Arc<ArrayDesc>),
    Tuple(Arc<TupleDesc>),
    Union(Arc<[TypeDesc]>),
}

/// A record: named fields plus an optional rest type for extras.
///
/// A `rest` of `None` means unknown fields are projected away.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordDesc {
    pub name: String,
    pub fields: BTreeMap<String, FieldDesc>,
    pub rest: Option<TypeDesc>,
}

/// One record field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDesc {
    pub name: String,
    pub ty: TypeDesc,
    pub required: bool,
}

impl FieldDesc {
    #[must_use]
    pub fn required(name: &str, ty: TypeDesc) -> Self {
        Self {
            name: name.into(),
            ty,
            required: true,
        }
    }

    #[must_use]
    pub fn optional(name: &str, ty: TypeDesc) -> Self {
        Self {
            name: name.into(),
            ty,
            required: false,
        }
    }
}

/// Whether an array is open-ended or fixed-size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrayState {
    Open,
    Closed(usize),
}

/// A homogeneous list.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayDesc {
    pub elem: TypeDesc,
    pub state: ArrayState,
}

/// A positional product type with an optional trailing rest.
#[derive(Clone, Debug, PartialEq)]
pub struct TupleDesc {
    pub members: Vec<TypeDesc>,
    pub rest: Option<TypeDesc>,
}

impl TypeDesc {
    /// Builds a record shape from its fields.
    #[must_use]
    pub fn record(
        name: &str,
        fields: impl IntoIterator<Item = FieldDesc>,
        rest: Option<TypeDesc>,
    ) -> Self {
        let fields = fields
            .into_iter()
            .map(|field| (field.name.clone(), field))
            .collect();
        TypeDesc::Record(Arc::new(RecordDesc {
            name: name.into(),
            fields,
            rest,
        }))
    }

    #[must_use]
    pub fn map_of(value: TypeDesc) -> Self {
        TypeDesc::Map(Arc::new(value))
    }

    #[must_use]
    pub fn array_of(elem: TypeDesc) -> Self {
        TypeDesc::Array(Arc::new(ArrayDesc {
            elem,
            state: ArrayState::Open,
        }))
    }

    #[must_use]
    pub fn closed_array_of(elem: TypeDesc, size: usize) -> Self {
        TypeDesc::Array(Arc::new(ArrayDesc {
            elem,
            state: ArrayState::Closed(size),
        }))
    }

    #[must_use]
    pub fn tuple(members: Vec<TypeDesc>, rest: Option<TypeDesc>) -> Self {
        TypeDesc::Tuple(Arc::new(TupleDesc { members, rest }))
    }

    #[must_use]
    pub fn union(members: Vec<TypeDesc>) -> Self {
        TypeDesc::Union(members.into())
    }
}

/// A union can drive a parse only when no member needs its own container:
/// record, map, and `Any` members are rejected, as are nested unions that
/// contain them.
pub(crate) fn supported_union(members: &[TypeDesc]) -> bool {
    members.iter().all(|member| match member {
        TypeDesc::Record(_) | TypeDesc::Map(_) | TypeDesc::Any => false,
        TypeDesc::Union(inner) => supported_union(inner),
        _ => true,
    })
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDesc::Null => f.write_str("null"),
            TypeDesc::Boolean => f.write_str("boolean"),
            TypeDesc::Int => f.write_str("int"),
            TypeDesc::Float => f.write_str("float"),
            TypeDesc::Decimal => f.write_str("decimal"),
            TypeDesc::String => f.write_str("string"),
            TypeDesc::Any => f.write_str("json"),
            TypeDesc::Record(record) => {
                if record.name.is_empty() {
                    f.write_str("record")
                } else {
                    f.write_str(&record.name)
                }
            }
            TypeDesc::Map(value) => write!(f, "map<{value}>"),
            TypeDesc::Array(array) => match array.state {
                ArrayState::Open => write!(f, "{}[]", array.elem),
                ArrayState::Closed(size) => write!(f, "{}[{size}]", array.elem),
            },
            TypeDesc::Tuple(tuple) => {
                f.write_str("[")?;
                for (i, member) in tuple.members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{member}")?;
                }
                if let Some(rest) = &tuple.rest {
                    if !tuple.members.is_empty() {
                        f.write_str(", ")?;
                    }
                    write!(f, "{rest}...")?;
                }
                f.write_str("]")
            }
            TypeDesc::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str("|")?;
                    }
                    write!(f, "{member}")?;
                }
                Ok(())
            }
        }
    }
}
