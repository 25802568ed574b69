//! Byte-level parsing model for the IPDR/XDR wire format
//!
//! This module defines the [`Parser`] trait, an abstraction over stateful
//! parse-objects that consume an immutable byte-buffer in a strictly
//! non-backtracking, zero-lookahead fashion: a byte can only be viewed by
//! consuming it, after all preceding bytes have been consumed, and once
//! consumed it cannot be consumed again.
//!
//! Because the IPDR/XDR encoding is the *unpadded* variant of XDR, every
//! field is read at its exact width with no alignment skips, and every
//! variable-length field carries its own length prefix that is consumed
//! inline. The only state a parser needs beyond its buffer is the current
//! offset, which doubles as the error context for truncated input.
//!
//! One query is load-bearing for the format itself: [`Parser::remainder`]
//! (and its convenience form [`Parser::is_exhausted`]) is consulted after
//! every decoded array element to honor the early-termination rule for
//! variable-length arrays, including the unbounded-length convention. This
//! is why parsers are constructed over size-queryable buffers rather than
//! unbounded pipes.
//!
//! For type-aware parsing, see the [`Decode`](crate::conv::Decode) trait,
//! which is built around the definitions in this module.

pub mod error;

pub use error::ParseResult;
use error::coerce_slice;

/// Stateful parse-object over an immutable byte-buffer.
///
/// Implementations must uphold the following properties:
///
/// * A fresh parser has `offset() == 0` and `len()` equal to the buffer length.
/// * `remainder() == len() - offset()` is the largest `n` for which
///   `consume(n)` succeeds; larger requests fail without consuming anything.
/// * A successful `consume(n)` advances `offset()` by exactly `n`; a failed
///   one leaves the offset untouched.
pub trait Parser {
    /// Buffer type a new parser can be infallibly instantiated from.
    type Buffer;

    /// Constructs an initialized parser over a buffer.
    fn from_buffer(buf: Self::Buffer) -> Self;

    /// Total length of the underlying buffer in bytes.
    fn len(&self) -> usize;

    /// Number of bytes consumed so far.
    fn offset(&self) -> usize;

    /// Number of bytes that can still be consumed.
    #[inline]
    fn remainder(&self) -> usize {
        self.len() - self.offset()
    }

    /// Returns `true` when every byte of the buffer has been consumed.
    ///
    /// This is the exhaustion query required by the variable-length-array
    /// termination rule (see [`crate::seq`]).
    #[inline]
    fn is_exhausted(&self) -> bool {
        self.remainder() == 0
    }

    /// Consumes and returns a single byte.
    fn consume_byte(&mut self) -> ParseResult<u8>;

    /// Attempts to consume and return a slice of length `nbytes`, starting
    /// from the first unconsumed byte in the buffer.
    ///
    /// # Invariants
    ///
    /// This method **must** return `Ok(s)` when and only when the buffer
    /// bounds are not violated, with `s.len()` equal to the requested
    /// length. Failure to guarantee this is an implementation bug.
    fn consume(&mut self, nbytes: usize) -> ParseResult<&[u8]>;

    /// Consumes `N` bytes and returns them in array form.
    fn consume_arr<const N: usize>(&mut self) -> ParseResult<[u8; N]> {
        coerce_slice(self.consume(N)?)
    }

    /// Consumes one byte and returns it as a `u8` value.
    #[inline]
    fn take_u8(&mut self) -> ParseResult<u8> {
        self.consume_byte()
    }

    /// Consumes one byte and returns it as an `i8` value.
    #[inline]
    fn take_i8(&mut self) -> ParseResult<i8> {
        Ok(self.consume_byte()? as i8)
    }

    /// Consumes two bytes and returns the corresponding `u16` value.
    ///
    /// As with all fixed-width multi-byte numeric `take_X` methods, the
    /// conversion is big-endian (network byte order).
    #[inline]
    fn take_u16(&mut self) -> ParseResult<u16> {
        self.consume_arr::<2>().map(u16::from_be_bytes)
    }

    /// Consumes two bytes and returns the corresponding `i16` value.
    #[inline]
    fn take_i16(&mut self) -> ParseResult<i16> {
        self.consume_arr::<2>().map(i16::from_be_bytes)
    }

    /// Consumes four bytes and returns the corresponding `u32` value.
    #[inline]
    fn take_u32(&mut self) -> ParseResult<u32> {
        self.consume_arr::<4>().map(u32::from_be_bytes)
    }

    /// Consumes four bytes and returns the corresponding `i32` value.
    #[inline]
    fn take_i32(&mut self) -> ParseResult<i32> {
        self.consume_arr::<4>().map(i32::from_be_bytes)
    }

    /// Consumes eight bytes and returns the corresponding `u64` value.
    #[inline]
    fn take_u64(&mut self) -> ParseResult<u64> {
        self.consume_arr::<8>().map(u64::from_be_bytes)
    }

    /// Consumes eight bytes and returns the corresponding `i64` value.
    #[inline]
    fn take_i64(&mut self) -> ParseResult<i64> {
        self.consume_arr::<8>().map(i64::from_be_bytes)
    }

    /// Consumes four bytes and returns the corresponding `f32` value.
    #[inline]
    fn take_f32(&mut self) -> ParseResult<f32> {
        self.consume_arr::<4>().map(f32::from_be_bytes)
    }

    /// Consumes eight bytes and returns the corresponding `f64` value.
    #[inline]
    fn take_f64(&mut self) -> ParseResult<f64> {
        self.consume_arr::<8>().map(f64::from_be_bytes)
    }

    /// Consumes a single byte and returns the boolean value it represents.
    ///
    /// The IPDR/XDR boolean occupies one byte; `0x00` is `false` and any
    /// nonzero byte is `true`. Encoders only ever emit `0x01`.
    #[inline]
    fn take_bool(&mut self) -> ParseResult<bool> {
        Ok(self.consume_byte()? != 0)
    }

    /// Consumes and returns a `Vec<u8>` of length `nbytes`, following the
    /// same behavioral guarantees as [`consume`](Parser::consume).
    #[inline]
    fn take_dynamic(&mut self, nbytes: usize) -> ParseResult<Vec<u8>> {
        self.consume(nbytes).map(Vec::from)
    }

    /// Consumes and returns an array of the constant length `N`.
    #[inline]
    fn take_fixed<const N: usize>(&mut self) -> ParseResult<[u8; N]> {
        self.consume_arr::<N>()
    }
}

pub mod buffer {
    //! Buffer types for [`Parser`](super::Parser) implementors.

    /// Newtype around `Vec<u8>` that only permits immutable access.
    ///
    /// Used as the underlying buffer of a [`ByteParser`]; none of the
    /// inherent methods defined here mutate the contents.
    ///
    /// [`ByteParser`]: super::byteparser::ByteParser
    #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[repr(transparent)]
    pub struct VecBuffer(Vec<u8>);

    impl VecBuffer {
        /// Returns the number of bytes in the buffer.
        pub fn len(&self) -> usize {
            self.0.len()
        }

        /// Returns `true` if the buffer contains zero bytes.
        pub fn is_empty(&self) -> bool {
            self.0.is_empty()
        }

        /// Borrows the range of bytes starting at index `ix`, of length `len`.
        ///
        /// # Panics
        ///
        /// Will panic if `ix + len` is out-of-bounds.
        pub fn get_slice(&self, ix: usize, len: usize) -> &[u8] {
            &self.0[ix..ix + len]
        }

        /// Returns the byte at the specified index.
        ///
        /// # Panics
        ///
        /// Will panic if `ix` is out-of-bounds.
        pub fn get_byte(&self, ix: usize) -> u8 {
            self.0[ix]
        }
    }

    impl std::fmt::Debug for VecBuffer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            <Vec<u8> as std::fmt::Debug>::fmt(&self.0, f)
        }
    }

    impl From<Vec<u8>> for VecBuffer {
        fn from(bytes: Vec<u8>) -> Self {
            Self(bytes)
        }
    }

    impl From<&[u8]> for VecBuffer {
        fn from(bytes: &[u8]) -> Self {
            Self(bytes.to_owned())
        }
    }

    impl From<&Vec<u8>> for VecBuffer {
        fn from(bytes: &Vec<u8>) -> Self {
            Self(bytes.clone())
        }
    }

    impl<const N: usize> From<[u8; N]> for VecBuffer {
        fn from(bytes: [u8; N]) -> Self {
            Self(bytes.to_vec())
        }
    }

    impl<const N: usize> From<&'_ [u8; N]> for VecBuffer {
        fn from(bytes: &'_ [u8; N]) -> Self {
            Self(bytes.to_vec())
        }
    }
}

pub mod byteparser {
    use super::buffer::VecBuffer;
    use super::error::{ParseError, ParseResult};
    use super::Parser;

    /// Monotonically increasing index into a bounded buffer.
    ///
    /// The index may reach, but never exceed, the limit fixed at
    /// construction time.
    #[derive(Debug, Clone, Copy)]
    struct Cursor {
        index: usize,
        limit: usize,
    }

    impl Cursor {
        fn with_limit(limit: usize) -> Self {
            Self { index: 0, limit }
        }

        /// Advances the index by `n` unless this would exceed the limit.
        ///
        /// Returns the pre-increment index along with a boolean that is
        /// `true` if and only if the increment occurred.
        #[inline]
        fn advance(&mut self, n: usize) -> (usize, bool) {
            let ret = self.index;
            let is_valid = n <= self.limit - self.index;
            if is_valid {
                self.index += n;
            }
            (ret, is_valid)
        }
    }

    /// [`Parser`] over an owned, immutable byte-buffer.
    #[derive(Debug)]
    pub struct ByteParser {
        buffer: VecBuffer,
        cursor: Cursor,
    }

    impl Parser for ByteParser {
        type Buffer = VecBuffer;

        fn from_buffer(buffer: Self::Buffer) -> Self {
            let cursor = Cursor::with_limit(buffer.len());
            Self { buffer, cursor }
        }

        #[inline]
        fn len(&self) -> usize {
            self.cursor.limit
        }

        #[inline]
        fn offset(&self) -> usize {
            self.cursor.index
        }

        fn consume_byte(&mut self) -> ParseResult<u8> {
            let (ix, advanced) = self.cursor.advance(1);
            if advanced {
                Ok(self.buffer.get_byte(ix))
            } else {
                Err(ParseError::Truncated {
                    offset: ix,
                    requested: 1,
                    remaining: self.cursor.limit - ix,
                })
            }
        }

        fn consume(&mut self, nbytes: usize) -> ParseResult<&[u8]> {
            let (ix, advanced) = self.cursor.advance(nbytes);
            if advanced {
                Ok(self.buffer.get_slice(ix, nbytes))
            } else {
                Err(ParseError::Truncated {
                    offset: ix,
                    requested: nbytes,
                    remaining: self.cursor.limit - ix,
                })
            }
        }
    }

    impl Iterator for ByteParser {
        type Item = u8;

        fn next(&mut self) -> Option<Self::Item> {
            self.consume_byte().ok()
        }
    }
}

use byteparser::ByteParser;

/// Helper trait marking types that can be converted into `Parser` objects
/// of the specified type.
///
/// When no generic argument is provided, the default parser type is
/// [`ByteParser`].
pub trait TryIntoParser<P = ByteParser>
where
    P: Parser,
{
    /// Produces a parser object of type `P` over the bytes represented by
    /// `self`.
    fn try_into_parser(self) -> ParseResult<P>;
}

impl<P, T> TryIntoParser<P> for T
where
    P: Parser,
    <P as Parser>::Buffer: From<T>,
{
    fn try_into_parser(self) -> ParseResult<P> {
        Ok(P::from_buffer(self.into()))
    }
}
