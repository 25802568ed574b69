//! Core of the binary-conversion API
//!
//! This module provides the trait definitions for [`Encode`] and
//! [`Decode`], which respectively define serialization and deserialization
//! of Rust values to and from the unpadded IPDR/XDR binary encoding.
//!
//! Context-free types (every elementary type, plus the fixed-shape
//! document structures) implement these traits directly. Structures whose
//! shape depends on schema state seen earlier in the same stream (records
//! and the stream elements that carry them) are instead decoded through
//! inherent `parse` functions that thread a
//! [`SchemaRegistry`](crate::schema::SchemaRegistry) alongside the parser;
//! see [`crate::document`].
//!
//! The sub-module [`len`] defines the serialized-length oracles
//! [`Estimable`](len::Estimable) and [`FixedLength`](len::FixedLength),
//! and [`target`] offers the write-side abstraction [`Target`] that is the
//! dual of [`Parser`](crate::parse::Parser).

use crate::parse::{ParseResult, Parser, TryIntoParser};

use self::len::Estimable;
use self::target::Target;

pub mod len;
pub mod target;

/// Trait providing methods for serializing values of a certain type.
///
/// Implementations are defined by one required method, [`write_to`]: it
/// appends the serialized bytes of the receiver to a generic [`Target`]
/// and returns the number of bytes written. It is infallible; encode-side
/// invariant violations are checked before serialization begins (see
/// [`crate::document::encode_document`]).
///
/// [`write_to`]: Encode::write_to
pub trait Encode {
    /// Appends the serialized bytes of `self` to `buf`, returning the
    /// number of bytes written.
    fn write_to<U: Target>(&self, buf: &mut U) -> usize;

    /// Appends the serialized bytes of `self` to `buf`.
    ///
    /// Specialized variant of [`write_to`](Encode::write_to) for `Vec<u8>`
    /// targets.
    fn write_to_vec(&self, buf: &mut Vec<u8>) {
        let _ = self.write_to(buf);
    }

    /// Constructs and returns a buffer of type `U` populated with the
    /// serialized bytes of `self`.
    fn encode<U: Target>(&self) -> U {
        let mut buf: U = U::create();
        let _ = self.write_to::<U>(&mut buf);
        buf
    }

    /// Constructs and returns a `Vec<u8>` containing the serialized bytes
    /// of `self`.
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.write_to_vec(&mut buf);
        buf
    }
}

/// Extension trait for [`Encode`] types with a serialized-length oracle.
///
/// Allows zero-realloc serialization by pre-sizing the output vector to
/// the exact byte count reported by [`Estimable::estimate`].
pub trait EncodeLength: Encode + Estimable {
    /// Pre-determines the exact number of bytes required to serialize
    /// `self` and returns a `Vec<u8>` initialized to that capacity,
    /// containing the serialized bytes of `self`.
    fn to_bytes_full(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.estimate());
        self.write_to_vec(&mut buf);
        buf
    }
}

impl<T: Encode + Estimable + ?Sized> EncodeLength for T {}

/// Trait providing methods for deserializing binary data into values of a
/// certain type, without reference to stream-scoped schema state.
pub trait Decode {
    /// Attempts to consume and interpret a value of type `Self` from an
    /// existing [`Parser`] object over a binary buffer.
    ///
    /// # Errors
    ///
    /// In most cases, the errors returned by this method are propagated
    /// from calls made to `Parser` methods in the implementation logic; in
    /// the remaining cases they are freshly minted
    /// [`Malformed`](crate::parse::error::ParseError::Malformed) values
    /// based on invariants of the type being parsed.
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self>
    where
        Self: Sized;

    /// Attempts to decode a value of type `Self` from a value `input` of
    /// the generic type `U: TryIntoParser<P>`.
    ///
    /// The default implementation produces a fresh `P: Parser` object from
    /// `input` and calls [`parse`](Decode::parse) on it.
    fn try_decode<U, P>(input: U) -> ParseResult<Self>
    where
        Self: Sized,
        P: Parser,
        U: TryIntoParser<P>,
    {
        let mut p: P = input.try_into_parser()?;
        Self::parse(&mut p)
    }

    /// Decodes a value of type `Self` from `input`, using
    /// [`ByteParser`](crate::parse::byteparser::ByteParser) internally.
    ///
    /// # Panics
    ///
    /// Panics if the interior call to [`try_decode`](Decode::try_decode)
    /// returns an `Err(_)` value; intended for tests and examples over
    /// known-good input.
    fn decode<U>(input: U) -> Self
    where
        Self: Sized,
        U: TryIntoParser,
    {
        Self::try_decode(input).unwrap_or_else(|err| {
            panic!(
                "<{} as Decode>::decode encountered error: {:?}",
                std::any::type_name::<Self>(),
                err
            )
        })
    }
}
