//! The parallel stacks that let the parser resolve shapes in O(1) at every
//! structural boundary.
//!
//! `expected` holds the shape for each position being parsed, with `None` as
//! the projection sentinel: once a subtree resolves to `None`, every
//! descendant position resolves to `None` until the subtree closes. `fields`
//! and `rests` track, per open object scope, which declared fields are still
//! pending and what catch-all type extras fall to. `scopes` and `indexes`
//! identify the enclosing container kind and the element position per open
//! list.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::error::ParseError;
use crate::schema::{self, ArrayState, FieldDesc, TypeDesc};

/// The enclosing container kind, used to pick the continuation state after a
/// nested value completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scope {
    Map,
    Array,
}

#[derive(Debug, Default)]
pub(crate) struct ShapeContext {
    expected: Vec<Option<TypeDesc>>,
    fields: Vec<BTreeMap<String, FieldDesc>>,
    rests: Vec<Option<TypeDesc>>,
    scopes: Vec<Scope>,
    indexes: Vec<usize>,
    /// Nesting depth below the point where the expected type became `Any`.
    /// Field bookkeeping is disabled below that point.
    pub(crate) any_depth: usize,
    /// The descriptor resolved for the most recent field name, if it named a
    /// declared field rather than falling to the rest type.
    pub(crate) current_field: Option<FieldDesc>,
}

impl ShapeContext {
    pub(crate) fn reset(&mut self) {
        self.expected.clear();
        self.fields.clear();
        self.rests.clear();
        self.scopes.clear();
        self.indexes.clear();
        self.any_depth = 0;
        self.current_field = None;
    }

    /// Seeds the expected-type stack for the document root, rejecting shapes
    /// that cannot drive a parse. Container bookkeeping (field maps, element
    /// indexes) is pushed when the corresponding `{` or `[` is read, so a
    /// root shape that turns out not to match the input leaves nothing
    /// behind.
    pub(crate) fn bind_root(&mut self, ty: &TypeDesc) -> Result<(), ParseError> {
        if let TypeDesc::Union(members) = ty {
            if !schema::supported_union(members) {
                return Err(ParseError::UnsupportedType(ty.to_string()));
            }
        }
        self.expected.push(Some(ty.clone()));
        Ok(())
    }

    pub(crate) fn push_expected(&mut self, ty: Option<TypeDesc>) {
        self.expected.push(ty);
    }

    pub(crate) fn pop_expected(&mut self) -> Option<TypeDesc> {
        self.expected.pop().flatten()
    }

    pub(crate) fn top_expected(&self) -> Option<&TypeDesc> {
        self.expected.last().and_then(Option::as_ref)
    }

    /// The shape one below the top: the owner of the value currently being
    /// completed, before its own entry is popped.
    pub(crate) fn parent_expected(&self) -> Option<&TypeDesc> {
        let n = self.expected.len();
        if n < 2 {
            return None;
        }
        self.expected[n - 2].as_ref()
    }

    /// Whether the top of the expected stack is the projection sentinel.
    pub(crate) fn top_is_skip(&self) -> bool {
        matches!(self.expected.last(), Some(None))
    }

    pub(crate) fn push_scope(&mut self, scope: Scope) {
        self.scopes.push(scope);
    }

    pub(crate) fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    pub(crate) fn scope(&self) -> Option<Scope> {
        self.scopes.last().copied()
    }

    pub(crate) fn push_index(&mut self) {
        self.indexes.push(0);
    }

    pub(crate) fn pop_index(&mut self) -> usize {
        self.indexes.pop().unwrap_or(0)
    }

    pub(crate) fn bump_index(&mut self) {
        if let Some(index) = self.indexes.last_mut() {
            *index += 1;
        }
    }

    pub(crate) fn index(&self) -> usize {
        self.indexes.last().copied().unwrap_or(0)
    }

    /// Resolves a field name against the innermost object scope and pushes
    /// the resulting expected type.
    ///
    /// A tainted scope stays tainted; inside `Any` the scope's rest type
    /// (`Any`) applies without field bookkeeping; otherwise the name consumes
    /// its descriptor from the pending-field map, falling back to the rest
    /// type, which may be absent, starting a projection.
    pub(crate) fn resolve_field(&mut self, name: &str) {
        if self.top_is_skip() {
            self.current_field = None;
            self.expected.push(None);
            return;
        }
        if self.any_depth > 0 {
            self.current_field = None;
            let rest = self.rest_type();
            self.expected.push(rest);
            return;
        }
        match self.fields.last_mut().and_then(|map| map.remove(name)) {
            Some(field) => {
                self.expected.push(Some(field.ty.clone()));
                self.current_field = Some(field);
            }
            None => {
                self.current_field = None;
                let rest = self.rest_type();
                self.expected.push(rest);
            }
        }
    }

    fn rest_type(&self) -> Option<TypeDesc> {
        self.rests.last().cloned().flatten()
    }

    /// The expected type for the next element of the innermost list, `None`
    /// once tainted or past the members of a restless tuple.
    pub(crate) fn element_type(&self) -> Option<TypeDesc> {
        let ty = self.top_expected()?;
        match ty {
            TypeDesc::Array(array) => Some(array.elem.clone()),
            TypeDesc::Tuple(tuple) => tuple
                .members
                .get(self.index())
                .cloned()
                .or_else(|| tuple.rest.clone()),
            TypeDesc::Any => Some(TypeDesc::Any),
            _ => None,
        }
    }

    /// Opens the field bookkeeping for a nested object of shape `ty`.
    pub(crate) fn enter_map_scope(&mut self, ty: &TypeDesc) {
        match ty {
            TypeDesc::Record(record) => {
                self.fields.push(record.fields.clone());
                self.rests.push(record.rest.clone());
            }
            TypeDesc::Map(value) => {
                self.fields.push(BTreeMap::new());
                self.rests.push(Some((**value).clone()));
            }
            TypeDesc::Any => {
                self.fields.push(BTreeMap::new());
                self.rests.push(Some(TypeDesc::Any));
                self.any_depth += 1;
            }
            // Anything else was rejected when the container was allocated.
            _ => {}
        }
    }

    /// Closes an object scope, failing if a required field was never seen.
    pub(crate) fn close_record(&mut self) -> Result<(), ParseError> {
        let remaining = self.fields.pop().unwrap_or_default();
        self.rests.pop();
        for field in remaining.into_values() {
            if field.required {
                return Err(ParseError::RequiredFieldNotPresent(field.name));
            }
        }
        Ok(())
    }

    /// Enforces closed-array and tuple arity at `]`.
    pub(crate) fn validate_list_size(
        &self,
        count: usize,
        ty: Option<&TypeDesc>,
    ) -> Result<(), ParseError> {
        match ty {
            Some(TypeDesc::Array(array)) => {
                if let ArrayState::Closed(size) = array.state {
                    if size != count {
                        return Err(ParseError::ListSizeMismatch {
                            expected: size,
                            actual: count,
                        });
                    }
                }
                Ok(())
            }
            Some(TypeDesc::Tuple(tuple)) => {
                if count < tuple.members.len() {
                    return Err(ParseError::ListSizeMismatch {
                        expected: tuple.members.len(),
                        actual: count,
                    });
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Whether every stack has been fully drained.
    #[cfg(test)]
    pub(crate) fn is_drained(&self) -> bool {
        self.expected.is_empty()
            && self.fields.is_empty()
            && self.rests.is_empty()
            && self.scopes.is_empty()
            && self.indexes.is_empty()
            && self.any_depth == 0
    }
}
