//! Wire codecs for IP and MAC addresses
//!
//! Three distinct IP layouts exist in the format and are deliberately kept
//! on three distinct Rust types:
//!
//! * `ipV4Addr`: the four address octets, raw, no prefix
//!   ([`std::net::Ipv4Addr`]);
//! * `ipV6Addr`: four reserved bytes followed by the sixteen address
//!   octets ([`std::net::Ipv6Addr`]);
//! * the generic `ipAddr`: a 4-byte length prefix (4 or 16) followed by
//!   that many address octets, selecting the v4 or v6 interpretation at
//!   decode time ([`std::net::IpAddr`]).
//!
//! MAC addresses occupy eight bytes: two reserved bytes, then the six
//! address octets forming one big-endian 48-bit value. Their textual form
//! is `XX:XX:XX:XX:XX:XX` with uppercase hex digits.

use crate::conv::len::{Estimable, FixedLength};
use crate::conv::{target::Target, Decode, Encode};
use crate::parse::error::{ParseError, ValueError};
use crate::parse::{ParseResult, Parser};
use std::fmt::Display;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

impl FixedLength for Ipv4Addr {
    const LEN: usize = 4;
}

impl Encode for Ipv4Addr {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        buf.push_many(self.octets())
    }
}

impl Decode for Ipv4Addr {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        Ok(Self::from(p.consume_arr::<4>()?))
    }
}

impl FixedLength for Ipv6Addr {
    const LEN: usize = 20;
}

impl Encode for Ipv6Addr {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        buf.push_many([0u8; 4]) + buf.push_many(self.octets())
    }
}

impl Decode for Ipv6Addr {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        // reserved bytes, not validated
        let _ = p.consume_arr::<4>()?;
        Ok(Self::from(p.consume_arr::<16>()?))
    }
}

impl Estimable for IpAddr {
    fn estimate(&self) -> usize {
        match self {
            IpAddr::V4(_) => 8,
            IpAddr::V6(_) => 20,
        }
    }
}

impl Encode for IpAddr {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        match self {
            IpAddr::V4(addr) => 4u32.write_to(buf) + buf.push_many(addr.octets()),
            IpAddr::V6(addr) => 16u32.write_to(buf) + buf.push_many(addr.octets()),
        }
    }
}

impl Decode for IpAddr {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        let declared = p.take_u32()?;
        match declared {
            4 => Ok(Self::V4(Ipv4Addr::from(p.consume_arr::<4>()?))),
            16 => Ok(Self::V6(Ipv6Addr::from(p.consume_arr::<16>()?))),
            _ => Err(ParseError::Malformed(ValueError::AddressLength {
                declared,
            })),
        }
    }
}

/// 48-bit IEEE MAC address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct MacAddr([u8; 6]);

impl MacAddr {
    /// Constructs a MAC address from its six octets.
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    /// Returns the six address octets.
    pub const fn octets(self) -> [u8; 6] {
        self.0
    }

    /// Returns the address as a 48-bit integer.
    pub fn to_u64(self) -> u64 {
        let [a, b, c, d, e, f] = self.0;
        u64::from_be_bytes([0, 0, a, b, c, d, e, f])
    }
}

impl From<u64> for MacAddr {
    /// Takes the low 48 bits of `value` as the address.
    fn from(value: u64) -> Self {
        let [_, _, a, b, c, d, e, f] = value.to_be_bytes();
        Self([a, b, c, d, e, f])
    }
}

impl Display for MacAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            a, b, c, d, e, g
        )
    }
}

impl FromStr for MacAddr {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let reject = || ValueError::Mac(s.to_owned());
        let mut octets = [0u8; 6];
        let mut parts = s.split(':');
        for octet in &mut octets {
            let part = parts.next().ok_or_else(reject)?;
            if part.len() != 2 {
                return Err(reject());
            }
            *octet = u8::from_str_radix(part, 16).map_err(|_| reject())?;
        }
        if parts.next().is_some() {
            return Err(reject());
        }
        Ok(Self(octets))
    }
}

impl FixedLength for MacAddr {
    const LEN: usize = 8;
}

impl Encode for MacAddr {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        buf.push_many(self.to_u64().to_be_bytes())
    }
}

impl Decode for MacAddr {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        let raw = p.consume_arr::<8>()?;
        let [_, _, a, b, c, d, e, f] = raw;
        Ok(Self([a, b, c, d, e, f]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{strict::StrictBuilder, Builder};

    #[test]
    fn ipv4_layout() {
        let addr: Ipv4Addr = "254.253.252.251".parse().unwrap();
        assert_eq!(u32::from(addr), 4_278_058_235);
        assert_eq!(addr.encode::<StrictBuilder>().into_hex(), "fefdfcfb");
        assert_eq!(Ipv4Addr::decode([0xfe, 0xfd, 0xfc, 0xfb]), addr);
    }

    #[test]
    fn ipv6_layout() {
        let addr: Ipv6Addr = "ff:fe:fd:fc:fb:fa::1".parse().unwrap();
        assert_eq!(
            addr.encode::<StrictBuilder>().into_hex(),
            "0000000000ff00fe00fd00fc00fb00fa00000001"
        );
        assert_eq!(Ipv6Addr::decode(addr.to_bytes()), addr);
    }

    #[test]
    fn generic_ip_layout() {
        let v6 = IpAddr::V6("ff:fe:fd:fc:fb:fa::1".parse().unwrap());
        assert_eq!(
            v6.encode::<StrictBuilder>().into_hex(),
            "0000001000ff00fe00fd00fc00fb00fa00000001"
        );
        let v4 = IpAddr::V4("254.253.252.251".parse().unwrap());
        assert_eq!(
            v4.encode::<StrictBuilder>().into_hex(),
            "00000004fefdfcfb"
        );
        assert_eq!(IpAddr::decode(v4.to_bytes()), v4);
        assert_eq!(IpAddr::decode(v6.to_bytes()), v6);
    }

    #[test]
    fn generic_ip_rejects_bad_length() {
        let err = IpAddr::try_decode::<_, crate::ByteParser>(vec![0, 0, 0, 5, 1, 2, 3, 4, 5])
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::Malformed(ValueError::AddressLength { declared: 5 })
        );
    }

    #[test]
    fn mac_textual_and_integer_forms() {
        let mac: MacAddr = "FF:FE:FD:FC:FB:FA".parse().unwrap();
        assert_eq!(mac.to_u64(), 281_470_647_991_290);
        assert_eq!(mac.to_string(), "FF:FE:FD:FC:FB:FA");
        assert_eq!(MacAddr::from(281_470_647_991_290u64), mac);
    }

    #[test]
    fn mac_wire_layout() {
        let mac = MacAddr::new([0xff, 0xfe, 0xfd, 0xfc, 0xfb, 0xfa]);
        assert_eq!(
            mac.encode::<StrictBuilder>().into_hex(),
            "0000fffefdfcfbfa"
        );
        assert_eq!(MacAddr::decode(mac.to_bytes()), mac);
    }

    #[test]
    fn mac_rejects_bad_text() {
        assert!("FF:FE:FD:FC:FB".parse::<MacAddr>().is_err());
        assert!("FF:FE:FD:FC:FB:FA:00".parse::<MacAddr>().is_err());
        assert!("GG:FE:FD:FC:FB:FA".parse::<MacAddr>().is_err());
    }
}
