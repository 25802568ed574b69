//! 128-bit universally unique identifiers
//!
//! Serialized as a 4-byte length word that must equal 16, followed by the
//! sixteen raw UUID bytes. The textual form is the usual lowercase
//! hyphenated `8-4-4-4-12` rendering.

use crate::conv::len::FixedLength;
use crate::conv::{target::Target, Decode, Encode};
use crate::parse::error::{ParseError, ValueError};
use crate::parse::{ParseResult, Parser};
use crate::util::{bytes_of_hex, write_all_hex};
use std::fmt::{Debug, Display};
use std::str::FromStr;

/// 128-bit UUID, held as its sixteen raw bytes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Uuid([u8; 16]);

/// Hyphen positions within the canonical textual form.
const GROUPS: [usize; 5] = [4, 2, 2, 2, 6];

impl Uuid {
    /// Constructs a UUID from its raw bytes.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes of the UUID.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Returns the UUID as a 128-bit integer.
    pub fn to_u128(self) -> u128 {
        u128::from_be_bytes(self.0)
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl Display for Uuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ix = 0;
        for (n, &width) in GROUPS.iter().enumerate() {
            if n > 0 {
                f.write_str("-")?;
            }
            write_all_hex(&self.0[ix..ix + width], f)?;
            ix += width;
        }
        Ok(())
    }
}

impl Debug for Uuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Uuid({})", self)
    }
}

impl FromStr for Uuid {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let reject = || ValueError::UuidText(s.to_owned());
        let mut bytes = [0u8; 16];
        let mut ix = 0;
        let mut segments = s.split('-');
        for &width in GROUPS.iter() {
            let segment = segments.next().ok_or_else(reject)?;
            if segment.len() != width * 2 {
                return Err(reject());
            }
            let decoded = bytes_of_hex(segment).map_err(|_| reject())?;
            bytes[ix..ix + width].copy_from_slice(&decoded);
            ix += width;
        }
        if segments.next().is_some() {
            return Err(reject());
        }
        Ok(Self(bytes))
    }
}

impl FixedLength for Uuid {
    const LEN: usize = 20;
}

impl Encode for Uuid {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        16u32.write_to(buf) + buf.push_many(self.0)
    }
}

impl Decode for Uuid {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        let declared = p.take_u32()?;
        if declared != 16 {
            return Err(ParseError::Malformed(ValueError::UuidLength { declared }));
        }
        Ok(Self(p.consume_arr::<16>()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{strict::StrictBuilder, Builder};

    const SAMPLE: &str = "12345678-1234-5678-1234-567812345678";

    #[test]
    fn textual_form() {
        let uuid: Uuid = SAMPLE.parse().unwrap();
        assert_eq!(uuid.to_string(), SAMPLE);
        assert_eq!(
            uuid.to_u128(),
            24_197_857_161_011_715_162_171_839_636_988_778_104
        );
    }

    #[test]
    fn wire_layout() {
        let uuid: Uuid = SAMPLE.parse().unwrap();
        assert_eq!(
            uuid.encode::<StrictBuilder>().into_hex(),
            "0000001012345678123456781234567812345678"
        );
        assert_eq!(Uuid::decode(uuid.to_bytes()), uuid);
    }

    #[test]
    fn rejects_wrong_length_word() {
        let err = Uuid::try_decode::<_, crate::ByteParser>(vec![
            0, 0, 0, 15, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ParseError::Malformed(ValueError::UuidLength { declared: 15 })
        );
    }

    #[test]
    fn rejects_bad_text() {
        assert!("12345678-1234-5678-1234".parse::<Uuid>().is_err());
        assert!("1234567x-1234-5678-1234-567812345678".parse::<Uuid>().is_err());
        assert!("123456781234-5678-1234-5678-12345678".parse::<Uuid>().is_err());
    }
}
