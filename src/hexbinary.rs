//! Opaque byte blobs with a hexadecimal textual form
//!
//! The `hexBinary` elementary type is serialized as a 4-byte byte-count
//! followed by that many raw bytes. Its textual form, used by the XML
//! projection and accepted by [`FromStr`], is the lowercase hexadecimal
//! rendering of those bytes.

use crate::conv::len::Estimable;
use crate::conv::{target::Target, Decode, Encode};
use crate::parse::{ParseResult, Parser};
use crate::util::{bytes_of_hex, write_all_hex};
use std::fmt::{Debug, Display};
use std::str::FromStr;

/// Opaque binary payload of the `hexBinary` elementary type.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct HexBinary(Vec<u8>);

impl HexBinary {
    /// Borrows the raw bytes of the blob.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Destructs `self` and returns the bytes it contained.
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    /// Returns the number of raw bytes in the blob.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the blob contains zero bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for HexBinary {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for HexBinary {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_owned())
    }
}

impl<const N: usize> From<[u8; N]> for HexBinary {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes.to_vec())
    }
}

impl Display for HexBinary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_all_hex(&self.0, f)
    }
}

impl Debug for HexBinary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HexBinary({})", self)
    }
}

impl FromStr for HexBinary {
    type Err = crate::error::HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(bytes_of_hex(s)?))
    }
}

impl Estimable for HexBinary {
    fn estimate(&self) -> usize {
        4 + self.0.len()
    }
}

impl Encode for HexBinary {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        buf.anticipate(4 + self.0.len());
        (self.0.len() as u32).write_to(buf) + buf.push_all(&self.0)
    }
}

impl Decode for HexBinary {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        let length = p.take_u32()? as usize;
        Ok(Self(p.take_dynamic(length)?))
    }
}
