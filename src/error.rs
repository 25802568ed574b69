//! Document-level error types
//!
//! Low-level parsing failures are reported as
//! [`ParseError`](crate::parse::error::ParseError); this module defines
//! [`DecodeError`], which wraps those and adds the failure modes that only
//! exist at the document layer (unknown type ids, unresolved record
//! descriptors, invalid stream-element discriminants), together with
//! [`EncodeError`] for encode-side invariant violations.
//!
//! Every error is fatal to the enclosing decode or encode call: once a
//! field fails, subsequent bytes cannot be reliably re-synchronized, so
//! there is no partial-document recovery. Each variant carries the byte
//! offset at which the offending field began, and [`DecodeError::Element`]
//! layers on the index of the sequence element being decoded.

use crate::parse::error::ParseError;
use std::fmt::{Display, Formatter, Result};

/// Any error that may be encountered while decoding a document.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum DecodeError {
    /// Low-level parsing failure (truncated input, malformed value).
    Parse(ParseError),
    /// An attribute declared an elementary type id that is not in the
    /// type-id table.
    UnknownTypeId { type_id: i32, offset: usize },
    /// A record referenced a descriptor id never registered earlier in the
    /// same decode session.
    UnknownDescriptor { descriptor_id: i32, offset: usize },
    /// A stream element carried a discriminant outside the recognized set.
    InvalidDiscriminant { kind: i32, offset: usize },
    /// Positional wrapper: the error arose while decoding the sequence
    /// element with the given zero-based index.
    Element {
        index: usize,
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    /// Wraps `self` with the index of the sequence element being decoded
    /// when the failure occurred.
    #[must_use]
    pub fn at_element(self, index: usize) -> Self {
        Self::Element {
            index,
            source: Box::new(self),
        }
    }
}

impl From<ParseError> for DecodeError {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            DecodeError::Parse(err) => write!(f, "{}", err),
            DecodeError::UnknownTypeId { type_id, offset } => {
                write!(
                    f,
                    "unknown elementary type id {:#010x} at offset {}",
                    type_id, offset
                )
            }
            DecodeError::UnknownDescriptor {
                descriptor_id,
                offset,
            } => {
                write!(
                    f,
                    "record at offset {} references descriptor id {} with no previously streamed RecordDescriptor",
                    offset, descriptor_id
                )
            }
            DecodeError::InvalidDiscriminant { kind, offset } => {
                write!(
                    f,
                    "invalid stream-element discriminant {} at offset {}",
                    kind, offset
                )
            }
            DecodeError::Element { index, source } => {
                write!(f, "at element {}: {}", index, source)
            }
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Parse(err) => Some(err),
            DecodeError::Element { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Type alias for `Result` with an error type of [`DecodeError`].
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Encode-side invariant violations.
///
/// Serialization of well-formed values is infallible; the only failure
/// mode is a [`Document`](crate::document::Document) whose element
/// sequence is internally inconsistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// A record element references a descriptor id that no earlier
    /// descriptor element in the same document declares.
    UnknownDescriptor {
        descriptor_id: i32,
        element_index: usize,
    },
}

impl Display for EncodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            EncodeError::UnknownDescriptor {
                descriptor_id,
                element_index,
            } => {
                write!(
                    f,
                    "record element {} references descriptor id {} not declared by any earlier element",
                    element_index, descriptor_id
                )
            }
        }
    }
}

impl std::error::Error for EncodeError {}

/// Rejections of textual hexadecimal blobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HexError {
    /// A hex-string must contain an even number of digits.
    OddLength { len: usize },
    /// A character outside `[0-9a-fA-F]` was found at the given position.
    InvalidDigit { at: usize },
}

impl Display for HexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            HexError::OddLength { len } => {
                write!(f, "hex-string of odd length {} cannot be converted to binary", len)
            }
            HexError::InvalidDigit { at } => {
                write!(f, "invalid hexadecimal digit at position {}", at)
            }
        }
    }
}

impl std::error::Error for HexError {}
