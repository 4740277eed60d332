//! The shape-directed streaming parser.
//!
//! [`Parser`] consumes a [`Reader`] in chunks of up to 1024 characters and
//! drives a character-level state machine that interleaves lexical
//! recognition with shape resolution: at every structural boundary it
//! consults the [`ShapeContext`] stacks to decide what to allocate, what to
//! coerce, and what to project away, and invokes the [`ValueBuilder`] at
//! value completions. The root value is whatever `current` holds when the
//! machine reaches the document-end state.
//!
//! One machine is meant to be reused across parses: it is reset on every
//! exit path, success or failure, retaining its buffer allocations.

mod char_buffer;
mod context;
mod escape_buffer;


use alloc::string::{String, ToString};
use alloc::vec::Vec;

use self::char_buffer::CharBuffer;
use self::context::{Scope, ShapeContext};
use self::escape_buffer::HexEscapeBuffer;

use crate::builder::{TreeBuilder, ValueBuilder};
use crate::error::ParseError;
use crate::reader::Reader;
use crate::schema::{ArrayState, TypeDesc};

const CHUNK_SIZE: usize = 1024;

/// Which string-bearing state an escape sequence was entered from, so the
/// escape and hex states can return to it once the sequence is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StringSource {
    FieldName,
    FieldValue,
    ArrayElement,
    Value,
}

impl StringSource {
    fn state(self) -> State {
        match self {
            StringSource::FieldName => State::FieldName,
            StringSource::FieldValue => State::StringFieldValue,
            StringSource::ArrayElement => State::StringArrayElement,
            StringSource::Value => State::StringValue,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    DocStart,
    DocEnd,
    FirstFieldReady,
    NonFirstFieldReady,
    FieldName,
    EndFieldName,
    FieldValueReady,
    StringFieldValue,
    NonStringFieldValue,
    StringValue,
    NonStringValue,
    FieldEnd,
    FirstArrayElementReady,
    NonFirstArrayElementReady,
    StringArrayElement,
    NonStringArrayElement,
    ArrayElementEnd,
    Escape(StringSource),
    UnicodeHex(StringSource),
}

/// The four whitespace characters of RFC 8259.
fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

/// Whether an element at `index` still fits the list shape. Closed arrays
/// silently drop writes past their capacity; the arity error itself is
/// raised at `]`.
fn list_has_capacity(ty: Option<&TypeDesc>, index: usize) -> bool {
    match ty {
        Some(TypeDesc::Array(array)) => match array.state {
            ArrayState::Closed(size) => index < size,
            ArrayState::Open => true,
        },
        _ => true,
    }
}

/// A reusable shape-directed parsing machine.
///
/// `Parser` is single-threaded and blocking: one parse owns the machine for
/// its whole duration. Every parse resets the machine on the way out, so an
/// instance can be cached and reused indefinitely; the `std` entry points
/// keep one per thread.
pub struct Parser<B: ValueBuilder = TreeBuilder> {
    builder: B,
    current: Option<B::Node>,
    nodes: Vec<B::Node>,
    field_names: Vec<String>,
    context: ShapeContext,
    lexeme: CharBuffer,
    hex: HexEscapeBuffer,
    quote: char,
    index: usize,
    line: usize,
    column: usize,
}

impl Parser<TreeBuilder> {
    /// Creates a machine producing [`Value`](crate::Value) trees.
    #[must_use]
    pub fn new() -> Self {
        Self::with_builder(TreeBuilder)
    }
}

impl Default for Parser<TreeBuilder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: ValueBuilder> Parser<B> {
    /// Creates a machine with a custom [`ValueBuilder`].
    pub fn with_builder(builder: B) -> Self {
        Self {
            builder,
            current: None,
            nodes: Vec::new(),
            field_names: Vec::new(),
            context: ShapeContext::default(),
            lexeme: CharBuffer::new(),
            hex: HexEscapeBuffer::new(),
            quote: '"',
            index: 0,
            line: 1,
            column: 0,
        }
    }

    /// Parses one document from `reader` against `shape`.
    ///
    /// The machine is reset before returning, on success and on failure
    /// alike, so the next parse starts clean.
    pub fn parse<R: Reader>(
        &mut self,
        reader: &mut R,
        shape: &TypeDesc,
    ) -> Result<B::Node, ParseError> {
        let result = self.execute(reader, shape);
        self.reset();
        result
    }

    fn reset(&mut self) {
        self.current = None;
        self.nodes.clear();
        self.field_names.clear();
        self.context.reset();
        self.lexeme.clear();
        self.hex.reset();
        self.index = 0;
        self.line = 1;
        self.column = 0;
    }

    fn execute<R: Reader>(
        &mut self,
        reader: &mut R,
        shape: &TypeDesc,
    ) -> Result<B::Node, ParseError> {
        self.context.bind_root(shape)?;

        let mut state = State::DocStart;
        let mut buf = ['\0'; CHUNK_SIZE];
        loop {
            let count = reader
                .read(&mut buf)
                .map_err(|err| ParseError::ReaderFailure(err.to_string()))?;
            if count == 0 {
                break;
            }
            self.index = 0;
            while self.index < count {
                state = self.step(state, &buf[..count])?;
            }
        }
        state = self.end_of_input(state)?;
        if state != State::DocEnd {
            return Err(ParseError::InvalidDocument);
        }
        self.current.take().ok_or(ParseError::InvalidDocument)
    }

    fn step(&mut self, state: State, buf: &[char]) -> Result<State, ParseError> {
        match state {
            State::DocStart => self.doc_start(buf),
            State::DocEnd => self.doc_end(buf),
            State::FirstFieldReady => self.first_field_ready(buf),
            State::NonFirstFieldReady => self.non_first_field_ready(buf),
            State::FieldName => self.field_name(buf),
            State::EndFieldName => self.end_field_name(buf),
            State::FieldValueReady => self.field_value_ready(buf),
            State::StringFieldValue => self.string_field_value(buf),
            State::NonStringFieldValue => self.non_string_field_value(buf),
            State::StringValue => self.string_value(buf),
            State::NonStringValue => self.non_string_value(buf),
            State::FieldEnd => self.field_end(buf),
            State::FirstArrayElementReady => self.array_element_ready(buf, true),
            State::NonFirstArrayElementReady => self.array_element_ready(buf, false),
            State::StringArrayElement => self.string_array_element(buf),
            State::NonStringArrayElement => self.non_string_array_element(buf),
            State::ArrayElementEnd => self.array_element_end(buf),
            State::Escape(source) => self.escape(source, buf),
            State::UnicodeHex(source) => self.unicode_hex(source, buf),
        }
    }

    /// Consumes one character, advancing the location counters.
    #[inline]
    fn consume(&mut self, ch: char) {
        self.index += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }

    // ------------------------------------------------------------------
    // States
    // ------------------------------------------------------------------

    fn doc_start(&mut self, buf: &[char]) -> Result<State, ParseError> {
        while let Some(&ch) = buf.get(self.index) {
            if is_whitespace(ch) {
                self.consume(ch);
                continue;
            }
            return match ch {
                '{' => {
                    self.consume(ch);
                    let shape = self.root_shape()?;
                    let node = self.builder.new_map(&shape)?;
                    self.context.enter_map_scope(&shape);
                    self.current = Some(node);
                    self.context.push_scope(Scope::Map);
                    Ok(State::FirstFieldReady)
                }
                '[' => {
                    self.consume(ch);
                    let shape = self.root_shape()?;
                    let node = self.builder.new_array(&shape)?;
                    self.context.push_index();
                    self.current = Some(node);
                    self.context.push_scope(Scope::Array);
                    Ok(State::FirstArrayElementReady)
                }
                '"' => {
                    self.consume(ch);
                    self.quote = ch;
                    Ok(State::StringValue)
                }
                // Re-read the character as the start of a bareword literal.
                _ => Ok(State::NonStringValue),
            };
        }
        Ok(State::DocStart)
    }

    fn root_shape(&self) -> Result<TypeDesc, ParseError> {
        self.context
            .top_expected()
            .cloned()
            .ok_or(ParseError::InvalidDocument)
    }

    fn doc_end(&mut self, buf: &[char]) -> Result<State, ParseError> {
        while let Some(&ch) = buf.get(self.index) {
            self.consume(ch);
            if is_whitespace(ch) {
                continue;
            }
            return Err(self.syntax_error("JSON document has already ended"));
        }
        Ok(State::DocEnd)
    }

    fn first_field_ready(&mut self, buf: &[char]) -> Result<State, ParseError> {
        while let Some(&ch) = buf.get(self.index) {
            self.consume(ch);
            if is_whitespace(ch) {
                continue;
            }
            return match ch {
                '"' => {
                    self.quote = ch;
                    Ok(State::FieldName)
                }
                '}' => {
                    let state = self.finalize_non_array_object()?;
                    self.context.pop_expected();
                    Ok(state)
                }
                _ => Err(self.expected_error(&["\"", "}"])),
            };
        }
        Ok(State::FirstFieldReady)
    }

    fn non_first_field_ready(&mut self, buf: &[char]) -> Result<State, ParseError> {
        while let Some(&ch) = buf.get(self.index) {
            self.consume(ch);
            if is_whitespace(ch) {
                continue;
            }
            return match ch {
                '"' => {
                    self.quote = ch;
                    Ok(State::FieldName)
                }
                _ => Err(self.expected_error(&["\""])),
            };
        }
        Ok(State::NonFirstFieldReady)
    }

    fn field_name(&mut self, buf: &[char]) -> Result<State, ParseError> {
        while let Some(&ch) = buf.get(self.index) {
            self.consume(ch);
            if ch == self.quote {
                let name = self.lexeme.take();
                self.context.resolve_field(&name);
                self.field_names.push(name);
                return Ok(State::EndFieldName);
            }
            if ch == '\\' {
                return Ok(State::Escape(StringSource::FieldName));
            }
            self.lexeme.push(ch);
        }
        Ok(State::FieldName)
    }

    fn end_field_name(&mut self, buf: &[char]) -> Result<State, ParseError> {
        while let Some(&ch) = buf.get(self.index) {
            self.consume(ch);
            if is_whitespace(ch) {
                continue;
            }
            return if ch == ':' {
                Ok(State::FieldValueReady)
            } else {
                Err(self.expected_error(&[":"]))
            };
        }
        Ok(State::EndFieldName)
    }

    fn field_value_ready(&mut self, buf: &[char]) -> Result<State, ParseError> {
        while let Some(&ch) = buf.get(self.index) {
            if is_whitespace(ch) {
                self.consume(ch);
                continue;
            }
            return match ch {
                '"' => {
                    self.consume(ch);
                    self.quote = ch;
                    Ok(State::StringFieldValue)
                }
                '{' => {
                    self.consume(ch);
                    self.enter_nested_map()?;
                    Ok(State::FirstFieldReady)
                }
                '[' => {
                    self.consume(ch);
                    self.context.push_index();
                    self.enter_nested_array()?;
                    Ok(State::FirstArrayElementReady)
                }
                // Re-read as a bareword literal.
                _ => Ok(State::NonStringFieldValue),
            };
        }
        Ok(State::FieldValueReady)
    }

    fn string_field_value(&mut self, buf: &[char]) -> Result<State, ParseError> {
        while let Some(&ch) = buf.get(self.index) {
            self.consume(ch);
            if ch == self.quote {
                let text = self.lexeme.take();
                self.complete_string_field(&text)?;
                return Ok(State::FieldEnd);
            }
            if ch == '\\' {
                return Ok(State::Escape(StringSource::FieldValue));
            }
            self.lexeme.push(ch);
        }
        Ok(State::StringFieldValue)
    }

    /// Coerces and stores a quoted field value. A coercion failure under a
    /// rest-typed field is swallowed and the field dropped; under a declared
    /// field or inside an `Any` subtree it propagates.
    fn complete_string_field(&mut self, text: &str) -> Result<(), ParseError> {
        let Some(expected) = self.context.pop_expected() else {
            self.field_names.pop();
            return Ok(());
        };
        match self.builder.scalar(text, true, &expected) {
            Ok(node) => {
                self.store_field(node);
                Ok(())
            }
            Err(_) if self.context.any_depth == 0 && self.context.current_field.is_none() => {
                self.field_names.pop();
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    fn non_string_field_value(&mut self, buf: &[char]) -> Result<State, ParseError> {
        while let Some(&ch) = buf.get(self.index) {
            self.consume(ch);
            match ch {
                ',' => {
                    self.process_value()?;
                    return Ok(State::NonFirstFieldReady);
                }
                '}' => {
                    self.process_value()?;
                    let state = self.finalize_non_array_object()?;
                    self.context.pop_expected();
                    return Ok(state);
                }
                _ if is_whitespace(ch) => {
                    self.process_value()?;
                    return Ok(State::FieldEnd);
                }
                _ => self.lexeme.push(ch),
            }
        }
        Ok(State::NonStringFieldValue)
    }

    fn string_value(&mut self, buf: &[char]) -> Result<State, ParseError> {
        while let Some(&ch) = buf.get(self.index) {
            self.consume(ch);
            if ch == self.quote {
                let text = self.lexeme.take();
                let Some(expected) = self.context.pop_expected() else {
                    return Ok(State::DocEnd);
                };
                let node = self.builder.scalar(&text, true, &expected)?;
                self.current = Some(node);
                return Ok(State::DocEnd);
            }
            if ch == '\\' {
                return Ok(State::Escape(StringSource::Value));
            }
            self.lexeme.push(ch);
        }
        Ok(State::StringValue)
    }

    fn non_string_value(&mut self, buf: &[char]) -> Result<State, ParseError> {
        while let Some(&ch) = buf.get(self.index) {
            self.consume(ch);
            if is_whitespace(ch) {
                self.process_value()?;
                return Ok(State::DocEnd);
            }
            self.lexeme.push(ch);
        }
        Ok(State::NonStringValue)
    }

    fn field_end(&mut self, buf: &[char]) -> Result<State, ParseError> {
        while let Some(&ch) = buf.get(self.index) {
            self.consume(ch);
            if is_whitespace(ch) {
                continue;
            }
            return match ch {
                ',' => Ok(State::NonFirstFieldReady),
                '}' => {
                    let state = self.finalize_non_array_object()?;
                    self.context.pop_expected();
                    Ok(state)
                }
                _ => Err(self.expected_error(&[",", "}"])),
            };
        }
        Ok(State::FieldEnd)
    }

    fn array_element_ready(&mut self, buf: &[char], first: bool) -> Result<State, ParseError> {
        while let Some(&ch) = buf.get(self.index) {
            if is_whitespace(ch) {
                self.consume(ch);
                continue;
            }
            return match ch {
                '"' => {
                    self.consume(ch);
                    self.quote = ch;
                    let elem = self.context.element_type();
                    self.context.push_expected(elem);
                    Ok(State::StringArrayElement)
                }
                '{' => {
                    self.consume(ch);
                    let elem = self.context.element_type();
                    self.context.push_expected(elem);
                    self.enter_nested_map()?;
                    Ok(State::FirstFieldReady)
                }
                '[' => {
                    self.consume(ch);
                    let elem = self.context.element_type();
                    self.context.push_expected(elem);
                    self.context.push_index();
                    self.enter_nested_array()?;
                    Ok(State::FirstArrayElementReady)
                }
                ']' if first => {
                    self.consume(ch);
                    self.context.pop_index();
                    let state = self.finalize_object()?;
                    let list = self.context.pop_expected();
                    self.context.validate_list_size(0, list.as_ref())?;
                    Ok(state)
                }
                // Re-read as a bareword literal.
                _ => {
                    let elem = self.context.element_type();
                    self.context.push_expected(elem);
                    Ok(State::NonStringArrayElement)
                }
            };
        }
        Ok(if first {
            State::FirstArrayElementReady
        } else {
            State::NonFirstArrayElementReady
        })
    }

    fn string_array_element(&mut self, buf: &[char]) -> Result<State, ParseError> {
        while let Some(&ch) = buf.get(self.index) {
            self.consume(ch);
            if ch == self.quote {
                let text = self.lexeme.take();
                let Some(expected) = self.context.pop_expected() else {
                    return Ok(State::ArrayElementEnd);
                };
                let node = self.builder.scalar(&text, true, &expected)?;
                self.store_element(node);
                return Ok(State::ArrayElementEnd);
            }
            if ch == '\\' {
                return Ok(State::Escape(StringSource::ArrayElement));
            }
            self.lexeme.push(ch);
        }
        Ok(State::StringArrayElement)
    }

    fn non_string_array_element(&mut self, buf: &[char]) -> Result<State, ParseError> {
        while let Some(&ch) = buf.get(self.index) {
            self.consume(ch);
            match ch {
                ']' => {
                    self.process_value()?;
                    let count = self.context.pop_index() + 1;
                    let state = self.finalize_object()?;
                    let list = self.context.pop_expected();
                    self.context.validate_list_size(count, list.as_ref())?;
                    return Ok(state);
                }
                ',' => {
                    self.process_value()?;
                    self.context.bump_index();
                    return Ok(State::NonFirstArrayElementReady);
                }
                _ if is_whitespace(ch) => {
                    self.process_value()?;
                    return Ok(State::ArrayElementEnd);
                }
                _ => self.lexeme.push(ch),
            }
        }
        Ok(State::NonStringArrayElement)
    }

    fn array_element_end(&mut self, buf: &[char]) -> Result<State, ParseError> {
        while let Some(&ch) = buf.get(self.index) {
            self.consume(ch);
            if is_whitespace(ch) {
                continue;
            }
            return match ch {
                ',' => {
                    self.context.bump_index();
                    Ok(State::NonFirstArrayElementReady)
                }
                ']' => {
                    let count = self.context.pop_index() + 1;
                    let state = self.finalize_object()?;
                    let list = self.context.pop_expected();
                    self.context.validate_list_size(count, list.as_ref())?;
                    Ok(state)
                }
                _ => Err(self.expected_error(&[",", "]"])),
            };
        }
        Ok(State::ArrayElementEnd)
    }

    fn escape(&mut self, source: StringSource, buf: &[char]) -> Result<State, ParseError> {
        let Some(&ch) = buf.get(self.index) else {
            return Ok(State::Escape(source));
        };
        self.consume(ch);
        let decoded = match ch {
            '"' => '"',
            '\\' => '\\',
            '/' => '/',
            'b' => '\u{0008}',
            'f' => '\u{000C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'u' => return Ok(State::UnicodeHex(source)),
            _ => return Err(self.expected_error(&["escaped characters"])),
        };
        self.lexeme.push(decoded);
        Ok(source.state())
    }

    fn unicode_hex(&mut self, source: StringSource, buf: &[char]) -> Result<State, ParseError> {
        while let Some(&ch) = buf.get(self.index) {
            self.consume(ch);
            if !ch.is_ascii_hexdigit() {
                self.hex.reset();
                return Err(self.expected_error(&["hexadecimal value of an unicode character"]));
            }
            if let Some(decoded) = self.hex.feed(ch) {
                self.lexeme.push(decoded);
                return Ok(source.state());
            }
        }
        Ok(State::UnicodeHex(source))
    }

    // ------------------------------------------------------------------
    // Value completion and scope finalization
    // ------------------------------------------------------------------

    /// Completes a bareword literal: pops the expected type, coerces the
    /// lexeme, and wires the result into the enclosing container, or drops
    /// it when the position is projected.
    fn process_value(&mut self) -> Result<(), ParseError> {
        let text = self.lexeme.take();
        let Some(expected) = self.context.pop_expected() else {
            if self.context.scope() == Some(Scope::Map) {
                self.field_names.pop();
            }
            return Ok(());
        };
        let node = self.builder.scalar(&text, false, &expected)?;
        match self.context.scope() {
            None => self.current = Some(node),
            Some(Scope::Map) => self.store_field(node),
            Some(Scope::Array) => self.store_element(node),
        }
        Ok(())
    }

    fn store_field(&mut self, node: B::Node) {
        let name = self.field_names.pop().unwrap_or_default();
        if let Some(parent) = self.current.as_mut() {
            self.builder.set_field(parent, &name, node);
        }
    }

    fn store_element(&mut self, node: B::Node) {
        let index = self.context.index();
        if !list_has_capacity(self.context.top_expected(), index) {
            return;
        }
        if let Some(parent) = self.current.as_mut() {
            self.builder.push_element(parent, node);
        }
    }

    /// Opens a nested object. In a projected position only the scope marker
    /// is pushed; otherwise the parent moves to the pending stack and a
    /// fresh container becomes current.
    fn enter_nested_map(&mut self) -> Result<(), ParseError> {
        self.context.push_scope(Scope::Map);
        let Some(shape) = self.context.top_expected().cloned() else {
            return Ok(());
        };
        let node = self.builder.new_map(&shape)?;
        self.context.enter_map_scope(&shape);
        if let Some(open) = self.current.take() {
            self.nodes.push(open);
        }
        self.current = Some(node);
        Ok(())
    }

    /// Opens a nested list. The caller has already pushed the element index.
    fn enter_nested_array(&mut self) -> Result<(), ParseError> {
        self.context.push_scope(Scope::Array);
        let Some(shape) = self.context.top_expected().cloned() else {
            return Ok(());
        };
        let node = self.builder.new_array(&shape)?;
        if let Some(open) = self.current.take() {
            self.nodes.push(open);
        }
        self.current = Some(node);
        Ok(())
    }

    /// Closes an object scope: checks required fields, then hands off to
    /// [`finalize_object`](Self::finalize_object).
    fn finalize_non_array_object(&mut self) -> Result<State, ParseError> {
        if self.context.any_depth > 0 {
            self.context.any_depth -= 1;
        }
        if self.context.top_is_skip() {
            self.context.pop_scope();
            return Ok(self.skip_return_state());
        }
        self.context.close_record()?;
        self.finalize_object()
    }

    /// Closes a composite scope and wires the finished container into its
    /// parent, choosing the continuation state from the enclosing context.
    fn finalize_object(&mut self) -> Result<State, ParseError> {
        self.context.pop_scope();
        if self.context.top_is_skip() {
            return Ok(self.skip_return_state());
        }
        let Some(parent) = self.nodes.pop() else {
            // The root composite is complete; `current` already holds it.
            return Ok(State::DocEnd);
        };
        let child = core::mem::replace(&mut self.current, Some(parent));
        match self.context.scope() {
            Some(Scope::Map) => {
                if let Some(child) = child {
                    self.store_field(child);
                }
                Ok(State::FieldEnd)
            }
            Some(Scope::Array) => {
                if let Some(child) = child {
                    let index = self.context.index();
                    if list_has_capacity(self.context.parent_expected(), index) {
                        if let Some(parent) = self.current.as_mut() {
                            self.builder.push_element(parent, child);
                        }
                    }
                }
                Ok(State::ArrayElementEnd)
            }
            None => Ok(State::DocEnd),
        }
    }

    /// The continuation after a projected composite closes: the value was
    /// never materialized, so only the bookkeeping unwinds.
    fn skip_return_state(&mut self) -> State {
        match self.context.scope() {
            Some(Scope::Map) => {
                self.field_names.pop();
                State::FieldEnd
            }
            Some(Scope::Array) => State::ArrayElementEnd,
            None => State::DocEnd,
        }
    }

    /// Dispatches end-of-input against the current state. The end marker
    /// occupies one column, like any consumed character, so error locations
    /// point one past the last input character.
    fn end_of_input(&mut self, state: State) -> Result<State, ParseError> {
        self.column += 1;
        match state {
            State::DocStart => Err(self.syntax_error("empty JSON document")),
            State::DocEnd => Ok(State::DocEnd),
            State::NonStringValue => {
                self.process_value()?;
                Ok(State::DocEnd)
            }
            State::FieldName
            | State::StringValue
            | State::StringFieldValue
            | State::StringArrayElement
            | State::NonStringFieldValue
            | State::NonStringArrayElement
            | State::FieldValueReady
            | State::FirstArrayElementReady
            | State::NonFirstArrayElementReady => {
                Err(self.syntax_error("unexpected end of JSON document"))
            }
            State::Escape(_) => Err(self.expected_error(&["escaped characters"])),
            State::UnicodeHex(_) => {
                self.hex.reset();
                Err(self.expected_error(&["hexadecimal value of an unicode character"]))
            }
            State::FirstFieldReady => Err(self.expected_error(&["\"", "}"])),
            State::NonFirstFieldReady => Err(self.expected_error(&["\""])),
            State::EndFieldName => Err(self.expected_error(&[":"])),
            State::FieldEnd => Err(self.expected_error(&[",", "}"])),
            State::ArrayElementEnd => Err(self.expected_error(&[",", "]"])),
        }
    }

    // ------------------------------------------------------------------
    // Errors
    // ------------------------------------------------------------------

    fn syntax_error(&self, message: &str) -> ParseError {
        ParseError::Syntax {
            message: message.into(),
            line: self.line,
            column: self.column,
        }
    }

    fn expected_error(&self, tokens: &[&str]) -> ParseError {
        let mut message = String::from("expected '");
        for (i, token) in tokens.iter().enumerate() {
            if i > 0 {
                message.push_str("' or '");
            }
            message.push_str(token);
        }
        message.push('\'');
        ParseError::Syntax {
            message,
            line: self.line,
            column: self.column,
        }
    }
}
