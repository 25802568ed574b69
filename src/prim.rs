//! Wire codecs for the scalar elementary types
//!
//! Every numeric type is serialized big-endian at its natural width with
//! no alignment padding. Booleans occupy a single byte (`0x01`/`0x00` on
//! encode, any nonzero byte accepted as `true` on decode). Strings are the
//! IPDR `UTF8String`: a 4-byte length prefix followed by that many raw
//! UTF-8 bytes, with no terminator and no padding.

use crate::conv::len::FixedLength;
use crate::conv::{target::Target, Decode, Encode};
use crate::parse::{ParseResult, Parser};

macro_rules! impl_scalar_codec {
    ( $( $t:ty => $take:ident ),+ $(,)? ) => {
        $(
            impl FixedLength for $t {
                const LEN: usize = std::mem::size_of::<$t>();
            }

            impl Encode for $t {
                fn write_to<U: Target>(&self, buf: &mut U) -> usize {
                    buf.push_many(self.to_be_bytes())
                }
            }

            impl Decode for $t {
                #[inline]
                fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
                    p.$take()
                }
            }
        )+
    };
}

impl_scalar_codec! {
    u8 => take_u8,
    i8 => take_i8,
    u16 => take_u16,
    i16 => take_i16,
    u32 => take_u32,
    i32 => take_i32,
    u64 => take_u64,
    i64 => take_i64,
    f32 => take_f32,
    f64 => take_f64,
}

impl FixedLength for bool {
    const LEN: usize = 1;
}

impl Encode for bool {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        buf.push_one(u8::from(*self))
    }
}

impl Decode for bool {
    #[inline]
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        p.take_bool()
    }
}

impl Encode for String {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        buf.anticipate(4 + self.len());
        (self.len() as u32).write_to(buf) + buf.push_all(self.as_bytes())
    }
}

impl Decode for String {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        let length = p.take_u32()? as usize;
        let bytes = p.take_dynamic(length)?;
        Ok(String::from_utf8(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{strict::StrictBuilder, Builder};
    use crate::parse::error::{ParseError, ValueError};

    fn check<T>(hex_val: (&str, T))
    where
        T: Encode + Decode + PartialEq + std::fmt::Debug,
    {
        let bytes = crate::util::bytes_of_hex(hex_val.0).unwrap();
        assert_eq!(T::decode(bytes), hex_val.1);
        assert_eq!(
            T::encode::<StrictBuilder>(&hex_val.1).into_hex(),
            hex_val.0
        );
    }

    #[test]
    fn byte_extremes() {
        check(("ff", 0xffu8));
        check(("ff", -1i8));
        check(("7f", i8::MAX));
        check(("80", i8::MIN));
    }

    #[test]
    fn short_extremes() {
        check(("ffff", 0xffffu16));
        check(("ffff", -1i16));
        check(("8000", i16::MIN));
    }

    #[test]
    fn int_extremes() {
        check(("ffffffff", u32::MAX));
        check(("ffffffff", -1i32));
        check(("7fffffff", i32::MAX));
        check(("80000000", i32::MIN));
    }

    #[test]
    fn long_extremes() {
        check(("ffffffffffffffff", u64::MAX));
        check(("ffffffffffffffff", -1i64));
        check(("7fffffffffffffff", i64::MAX));
        check(("8000000000000000", i64::MIN));
    }

    #[test]
    fn float_vectors() {
        check(("7f7fffff", f32::MAX));
        check(("00800000", f32::MIN_POSITIVE));
        // decode/encode of a double must preserve the exact bit pattern
        let bytes = crate::util::bytes_of_hex("ff7fffffffffffff").unwrap();
        let v = f64::decode(bytes);
        assert!(v < -1.4e306 && v > -1.5e306);
        assert_eq!(f64::encode::<StrictBuilder>(&v).into_hex(), "ff7fffffffffffff");
    }

    #[test]
    fn bool_bytes() {
        check(("01", true));
        check(("00", false));
    }

    #[test]
    fn string_layout() {
        check(("000000053132333435", String::from("12345")));
        check(("00000000", String::new()));
    }

    #[test]
    fn string_rejects_bad_utf8() {
        let err = String::try_decode::<_, crate::ByteParser>(vec![0, 0, 0, 2, 0xff, 0xfe])
            .unwrap_err();
        assert!(matches!(
            err,
            ParseError::Malformed(ValueError::Utf8(_))
        ));
    }

    #[test]
    fn string_length_overrun() {
        let err =
            String::try_decode::<_, crate::ByteParser>(vec![0, 0, 0, 9, b'x']).unwrap_err();
        assert_eq!(
            err,
            ParseError::Truncated {
                offset: 4,
                requested: 9,
                remaining: 1
            }
        );
    }
}
