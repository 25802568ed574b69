//! Error types used to report failure in low-level parsing
//!
//! This module defines the primary type [`ParseError`] and the alias
//! [`ParseResult`], along with [`ValueError`], the refinement covering
//! byte sequences that were consumed successfully but do not form a legal
//! value of the requested elementary type.

use std::{
    convert::Infallible,
    fmt::{Display, Formatter, Result},
    string::FromUtf8Error,
};

use crate::error::HexError;

/// Any error that may be encountered within `Parser`-related code.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Fewer bytes remain in the buffer than a read operation requires.
    ///
    /// Covers both fixed-size reads and variable-length reads whose
    /// declared length exceeds the remaining stream size.
    Truncated {
        offset: usize,
        requested: usize,
        remaining: usize,
    },
    /// Bytes were consumed successfully but cannot be interpreted as a
    /// legal value of the requested type.
    Malformed(ValueError),
    /// Internal invariant or precondition violation.
    ///
    /// Reaching this case signifies an implementation bug rather than bad
    /// input.
    Internal(InternalError),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            ParseError::Truncated {
                offset,
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "truncated input: {} bytes requested at offset {} with {} remaining",
                    requested, offset, remaining
                )
            }
            ParseError::Malformed(err) => write!(f, "malformed value: {}", err),
            ParseError::Internal(err) => write!(f, "internal error: {}", err),
        }
    }
}

impl From<Infallible> for ParseError {
    fn from(_: Infallible) -> Self {
        unreachable!()
    }
}

/// Type alias for `Result` with an error type of [`ParseError`].
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Contextually invalid results obtained from otherwise successful consume
/// operations, plus rejections of textual forms.
///
/// The wire-side cases (`Utf8`, `AddressLength`, `UuidLength`) indicate
/// that the buffer content differs from what the elementary type considers
/// valid; the text-side cases (`Timestamp`, `Mac`, `UuidText`, `Hex`) are
/// produced by the `FromStr` implementations of the corresponding types.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueError {
    /// A byte sequence destined for a string field is not valid UTF-8.
    Utf8(FromUtf8Error),
    /// A generic IP address carried a length prefix other than 4 or 16.
    AddressLength { declared: u32 },
    /// A UUID carried a length prefix other than 16.
    UuidLength { declared: u32 },
    /// A timestamp string did not match `YYYY-MM-DD HH:MM:SS[.fraction]`.
    Timestamp(String),
    /// A MAC address string did not match `XX:XX:XX:XX:XX:XX`.
    Mac(String),
    /// A UUID string did not match the hyphenated 8-4-4-4-12 form.
    UuidText(String),
    /// A hexBinary string was not a valid hexadecimal blob.
    Hex(HexError),
}

impl From<ValueError> for ParseError {
    fn from(err: ValueError) -> Self {
        Self::Malformed(err)
    }
}

impl From<FromUtf8Error> for ParseError {
    fn from(err: FromUtf8Error) -> Self {
        Self::Malformed(ValueError::Utf8(err))
    }
}

impl From<HexError> for ParseError {
    fn from(err: HexError) -> Self {
        Self::Malformed(ValueError::Hex(err))
    }
}

impl Display for ValueError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            ValueError::Utf8(err) => {
                write!(f, "string field is not valid UTF-8: {}", err)
            }
            ValueError::AddressLength { declared } => {
                write!(
                    f,
                    "IP address length must be 4 or 16, declared {}",
                    declared
                )
            }
            ValueError::UuidLength { declared } => {
                write!(f, "UUID length must be 16, declared {}", declared)
            }
            ValueError::Timestamp(s) => {
                write!(f, "unparseable timestamp `{}`", s)
            }
            ValueError::Mac(s) => {
                write!(f, "unparseable MAC address `{}`", s)
            }
            ValueError::UuidText(s) => {
                write!(f, "unparseable UUID `{}`", s)
            }
            ValueError::Hex(err) => {
                write!(f, "{}", err)
            }
        }
    }
}

/// Implementation-internal errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalError {
    /// A `consume(N)` call returned a slice of a different length.
    ConsumeLengthMismatch { expected: usize, actual: usize },
}

impl From<InternalError> for ParseError {
    fn from(err: InternalError) -> Self {
        Self::Internal(err)
    }
}

impl Display for InternalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            InternalError::ConsumeLengthMismatch { expected, actual } => {
                write!(
                    f,
                    "bug: consume({}) returned slice of length {}",
                    expected, actual
                )
            }
        }
    }
}

/// Converts a borrowed byte-slice into an owned byte-array.
///
/// The error branch is unreachable for conforming [`Parser`] impls, as
/// `consume(N)` guarantees a slice of length `N` on success.
///
/// [`Parser`]: crate::parse::Parser
pub(crate) fn coerce_slice<const N: usize>(bytes: &'_ [u8]) -> ParseResult<[u8; N]> {
    match <[u8; N] as std::convert::TryFrom<&'_ [u8]>>::try_from(bytes) {
        Ok(arr) => Ok(arr),
        Err(_) => Err(InternalError::ConsumeLengthMismatch {
            expected: N,
            actual: bytes.len(),
        }
        .into()),
    }
}

macro_rules! mk_error {
    ( $( $et:ty ),+ $(,)? ) => {
        $( impl std::error::Error for $et {} )+
    };
}

mk_error! {
    ParseError,
    ValueError,
    InternalError,
}
