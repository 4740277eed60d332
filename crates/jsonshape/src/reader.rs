//! Character sources consumed by the parser.
//!
//! The parser pulls its input through the [`Reader`] trait in chunks of up
//! to 1024 characters, so arbitrarily large documents stream through a
//! fixed-size buffer. Reader failures surface as
//! [`ParseError::ReaderFailure`](crate::ParseError::ReaderFailure) with the
//! upstream message.

use core::convert::Infallible;
use core::fmt;

/// A source of characters for the parser.
pub trait Reader {
    /// The error type produced when the source fails.
    type Error: fmt::Display;

    /// Fills `buf` with as many characters as are available, returning the
    /// number written. Returning `0` signals end of input.
    fn read(&mut self, buf: &mut [char]) -> Result<usize, Self::Error>;
}

/// A [`Reader`] over an in-memory string slice.
#[derive(Debug, Clone)]
pub struct StringReader<'a> {
    chars: core::str::Chars<'a>,
}

impl<'a> StringReader<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars(),
        }
    }
}

impl Reader for StringReader<'_> {
    type Error = Infallible;

    fn read(&mut self, buf: &mut [char]) -> Result<usize, Infallible> {
        let mut count = 0;
        for slot in buf.iter_mut() {
            let Some(ch) = self.chars.next() else { break };
            *slot = ch;
            count += 1;
        }
        Ok(count)
    }
}
