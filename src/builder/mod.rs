//! Extension trait for Targets with finalization
//!
//! A [`Builder`] is a kind of [`Target`] that can be built up through the
//! `Target::push_*` methods and then *finalized* into a read-oriented
//! form: a raw byte vector, a hexadecimal string, or a binary string.
//! Tests and the command-line tools lean on the hex finalization to state
//! exact wire layouts compactly.

use crate::conv::target::Target;
use crate::util::hex_of_bytes;
use std::string::FromUtf8Error;

/// `Target` extension trait with terminal conversion operations.
///
/// `Final` is implementation-dependent, but at the very least is required
/// to implement `Into<Vec<u8>>`; it is intended to be a read-oriented
/// analogue of the write-optimized `Self`.
pub trait Builder
where
    Self: Target + Sized,
{
    /// Type suitable for presenting the finalized contents of a `Builder`.
    type Final: Into<Vec<u8>>;

    /// Creates a `Self` object containing a single byte.
    fn word(b: u8) -> Self;

    /// Creates a `Self` object containing a fixed number of bytes.
    fn words<const N: usize>(arr: [u8; N]) -> Self;

    /// Converts a fully-built `Self` value into a `Self::Final` value.
    fn finalize(self) -> Self::Final;

    /// Consumes the `Builder` and returns a vector of its contents.
    fn into_vec(self) -> Vec<u8> {
        self.finalize().into()
    }

    /// Returns a string consisting of the hexadecimal form of the bytes in
    /// the `Builder`.
    fn into_hex(self) -> String {
        hex_of_bytes(self.into_vec())
    }

    /// Attempts to convert the `Builder` contents into a UTF-8 string.
    fn into_bin(self) -> Result<String, FromUtf8Error> {
        String::from_utf8(self.into_vec())
    }

    /// Returns a `Builder` containing zero bytes.
    fn empty() -> Self {
        Self::words([])
    }

    /// Determines the length of the `Builder` value in bytes.
    fn len(&self) -> usize;

    /// Returns `true` if the receiver contains no bytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub mod strict;
