//! The elementary type system and its runtime dispatch
//!
//! Record descriptors reference elementary types by numeric id, so record
//! decoding requires turning an `i32` seen on the wire into a codec at
//! runtime. [`ElementaryType`] enumerates the fixed set of types the
//! format defines, [`ElementaryType::from_type_id`] performs the lookup
//! through a static table, and [`ElementaryType::parse_value`] dispatches
//! a parse to the matching codec, producing a [`Value`].
//!
//! `Value` is the tagged union of every elementary payload. Values are
//! immutable once constructed; their `Display` impls are the textual forms
//! consumed by the XML projection.

use crate::addr::MacAddr;
use crate::conv::len::Estimable;
use crate::conv::{target::Target, Decode, Encode};
use crate::hexbinary::HexBinary;
use crate::parse::{ParseResult, Parser};
use crate::timestamp::{DateTimeMsec, DateTimeSec, DateTimeUsec};
use crate::uuid::Uuid;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt::Display;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Numeric elementary-type identifiers, as assigned by the format.
pub mod type_id {
    pub const INT: i32 = 0x0000_0021;
    pub const UINT: i32 = 0x0000_0022;
    pub const LONG: i32 = 0x0000_0023;
    pub const ULONG: i32 = 0x0000_0024;
    pub const FLOAT: i32 = 0x0000_0025;
    pub const DOUBLE: i32 = 0x0000_0026;
    pub const HEX_BINARY: i32 = 0x0000_0027;
    pub const STRING: i32 = 0x0000_0028;
    pub const BOOL: i32 = 0x0000_0029;
    pub const BYTE: i32 = 0x0000_002a;
    pub const UBYTE: i32 = 0x0000_002b;
    pub const SHORT: i32 = 0x0000_002c;
    pub const USHORT: i32 = 0x0000_002d;
    pub const DATE_TIME: i32 = 0x0000_0122;
    pub const DATE_TIME_MSEC: i32 = 0x0000_0224;
    pub const IPV4_ADDR: i32 = 0x0000_0322;
    pub const IPV6_ADDR: i32 = 0x0000_0427;
    pub const UUID: i32 = 0x0000_0527;
    pub const DATE_TIME_USEC: i32 = 0x0000_0623;
    pub const MAC_ADDRESS: i32 = 0x0000_0723;
    pub const IP_ADDR: i32 = 0x0000_0827;
}

/// The closed set of elementary types defined by the format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementaryType {
    String,
    Bool,
    Byte,
    UByte,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Float,
    Double,
    HexBinary,
    DateTime,
    DateTimeMsec,
    DateTimeUsec,
    IpV4Addr,
    IpV6Addr,
    IpAddr,
    Uuid,
    MacAddress,
}

lazy_static! {
    static ref TYPE_TABLE: HashMap<i32, ElementaryType> = ElementaryType::ALL
        .iter()
        .map(|&ty| (ty.type_id(), ty))
        .collect();
}

impl ElementaryType {
    /// Every elementary type, in type-id registration order.
    pub const ALL: [ElementaryType; 21] = [
        ElementaryType::Int,
        ElementaryType::UInt,
        ElementaryType::Long,
        ElementaryType::ULong,
        ElementaryType::Float,
        ElementaryType::Double,
        ElementaryType::HexBinary,
        ElementaryType::String,
        ElementaryType::Bool,
        ElementaryType::Byte,
        ElementaryType::UByte,
        ElementaryType::Short,
        ElementaryType::UShort,
        ElementaryType::DateTime,
        ElementaryType::DateTimeMsec,
        ElementaryType::IpV4Addr,
        ElementaryType::IpV6Addr,
        ElementaryType::Uuid,
        ElementaryType::DateTimeUsec,
        ElementaryType::MacAddress,
        ElementaryType::IpAddr,
    ];

    /// The stable numeric id of this type.
    pub const fn type_id(self) -> i32 {
        match self {
            ElementaryType::String => type_id::STRING,
            ElementaryType::Bool => type_id::BOOL,
            ElementaryType::Byte => type_id::BYTE,
            ElementaryType::UByte => type_id::UBYTE,
            ElementaryType::Short => type_id::SHORT,
            ElementaryType::UShort => type_id::USHORT,
            ElementaryType::Int => type_id::INT,
            ElementaryType::UInt => type_id::UINT,
            ElementaryType::Long => type_id::LONG,
            ElementaryType::ULong => type_id::ULONG,
            ElementaryType::Float => type_id::FLOAT,
            ElementaryType::Double => type_id::DOUBLE,
            ElementaryType::HexBinary => type_id::HEX_BINARY,
            ElementaryType::DateTime => type_id::DATE_TIME,
            ElementaryType::DateTimeMsec => type_id::DATE_TIME_MSEC,
            ElementaryType::DateTimeUsec => type_id::DATE_TIME_USEC,
            ElementaryType::IpV4Addr => type_id::IPV4_ADDR,
            ElementaryType::IpV6Addr => type_id::IPV6_ADDR,
            ElementaryType::IpAddr => type_id::IP_ADDR,
            ElementaryType::Uuid => type_id::UUID,
            ElementaryType::MacAddress => type_id::MAC_ADDRESS,
        }
    }

    /// The schema-level name of this type, as it appears in IPDR service
    /// definitions and in the XML projection.
    pub const fn type_name(self) -> &'static str {
        match self {
            ElementaryType::String => "string",
            ElementaryType::Bool => "boolean",
            ElementaryType::Byte => "byte",
            ElementaryType::UByte => "unsignedbyte",
            ElementaryType::Short => "short",
            ElementaryType::UShort => "unsignedShort",
            ElementaryType::Int => "int",
            ElementaryType::UInt => "unsignedInt",
            ElementaryType::Long => "long",
            ElementaryType::ULong => "unsignedLong",
            ElementaryType::Float => "float",
            ElementaryType::Double => "double",
            ElementaryType::HexBinary => "hexBinary",
            ElementaryType::DateTime => "dateTime",
            ElementaryType::DateTimeMsec => "ipdr:dateTimeMsec",
            ElementaryType::DateTimeUsec => "ipdr:dateTimeUsec",
            ElementaryType::IpV4Addr => "ipdr:ipV4Addr",
            ElementaryType::IpV6Addr => "ipdr:ipV6Addr",
            ElementaryType::IpAddr => "ipdr:ipAddr",
            ElementaryType::Uuid => "ipdr:uuid",
            ElementaryType::MacAddress => "ipdr:macAddress",
        }
    }

    /// Resolves a numeric type id against the static type table.
    pub fn from_type_id(id: i32) -> Option<Self> {
        TYPE_TABLE.get(&id).copied()
    }

    /// Consumes one value of this type from the parser.
    ///
    /// This is the runtime dispatch point used by record decoding: the
    /// attribute's declared type id selects which codec interprets the
    /// next bytes of the stream.
    pub fn parse_value<P: Parser>(self, p: &mut P) -> ParseResult<Value> {
        Ok(match self {
            ElementaryType::String => Value::String(String::parse(p)?),
            ElementaryType::Bool => Value::Bool(bool::parse(p)?),
            ElementaryType::Byte => Value::Byte(i8::parse(p)?),
            ElementaryType::UByte => Value::UByte(u8::parse(p)?),
            ElementaryType::Short => Value::Short(i16::parse(p)?),
            ElementaryType::UShort => Value::UShort(u16::parse(p)?),
            ElementaryType::Int => Value::Int(i32::parse(p)?),
            ElementaryType::UInt => Value::UInt(u32::parse(p)?),
            ElementaryType::Long => Value::Long(i64::parse(p)?),
            ElementaryType::ULong => Value::ULong(u64::parse(p)?),
            ElementaryType::Float => Value::Float(f32::parse(p)?),
            ElementaryType::Double => Value::Double(f64::parse(p)?),
            ElementaryType::HexBinary => Value::HexBinary(HexBinary::parse(p)?),
            ElementaryType::DateTime => Value::DateTime(DateTimeSec::parse(p)?),
            ElementaryType::DateTimeMsec => Value::DateTimeMsec(DateTimeMsec::parse(p)?),
            ElementaryType::DateTimeUsec => Value::DateTimeUsec(DateTimeUsec::parse(p)?),
            ElementaryType::IpV4Addr => Value::IpV4Addr(Ipv4Addr::parse(p)?),
            ElementaryType::IpV6Addr => Value::IpV6Addr(Ipv6Addr::parse(p)?),
            ElementaryType::IpAddr => Value::IpAddr(IpAddr::parse(p)?),
            ElementaryType::Uuid => Value::Uuid(Uuid::parse(p)?),
            ElementaryType::MacAddress => Value::MacAddress(MacAddr::parse(p)?),
        })
    }
}

impl Display for ElementaryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

/// One decoded elementary value: the payload of a record attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    String(String),
    Bool(bool),
    Byte(i8),
    UByte(u8),
    Short(i16),
    UShort(u16),
    Int(i32),
    UInt(u32),
    Long(i64),
    ULong(u64),
    Float(f32),
    Double(f64),
    HexBinary(HexBinary),
    DateTime(DateTimeSec),
    DateTimeMsec(DateTimeMsec),
    DateTimeUsec(DateTimeUsec),
    IpV4Addr(Ipv4Addr),
    IpV6Addr(Ipv6Addr),
    IpAddr(IpAddr),
    Uuid(Uuid),
    MacAddress(MacAddr),
}

macro_rules! value_dispatch {
    ( $self:expr, $inner:ident => $body:expr ) => {
        match $self {
            Value::String($inner) => $body,
            Value::Bool($inner) => $body,
            Value::Byte($inner) => $body,
            Value::UByte($inner) => $body,
            Value::Short($inner) => $body,
            Value::UShort($inner) => $body,
            Value::Int($inner) => $body,
            Value::UInt($inner) => $body,
            Value::Long($inner) => $body,
            Value::ULong($inner) => $body,
            Value::Float($inner) => $body,
            Value::Double($inner) => $body,
            Value::HexBinary($inner) => $body,
            Value::DateTime($inner) => $body,
            Value::DateTimeMsec($inner) => $body,
            Value::DateTimeUsec($inner) => $body,
            Value::IpV4Addr($inner) => $body,
            Value::IpV6Addr($inner) => $body,
            Value::IpAddr($inner) => $body,
            Value::Uuid($inner) => $body,
            Value::MacAddress($inner) => $body,
        }
    };
}

impl Value {
    /// The elementary type this value is an instance of.
    pub const fn elementary_type(&self) -> ElementaryType {
        match self {
            Value::String(_) => ElementaryType::String,
            Value::Bool(_) => ElementaryType::Bool,
            Value::Byte(_) => ElementaryType::Byte,
            Value::UByte(_) => ElementaryType::UByte,
            Value::Short(_) => ElementaryType::Short,
            Value::UShort(_) => ElementaryType::UShort,
            Value::Int(_) => ElementaryType::Int,
            Value::UInt(_) => ElementaryType::UInt,
            Value::Long(_) => ElementaryType::Long,
            Value::ULong(_) => ElementaryType::ULong,
            Value::Float(_) => ElementaryType::Float,
            Value::Double(_) => ElementaryType::Double,
            Value::HexBinary(_) => ElementaryType::HexBinary,
            Value::DateTime(_) => ElementaryType::DateTime,
            Value::DateTimeMsec(_) => ElementaryType::DateTimeMsec,
            Value::DateTimeUsec(_) => ElementaryType::DateTimeUsec,
            Value::IpV4Addr(_) => ElementaryType::IpV4Addr,
            Value::IpV6Addr(_) => ElementaryType::IpV6Addr,
            Value::IpAddr(_) => ElementaryType::IpAddr,
            Value::Uuid(_) => ElementaryType::Uuid,
            Value::MacAddress(_) => ElementaryType::MacAddress,
        }
    }

    /// Shorthand for `self.elementary_type().type_id()`.
    pub const fn type_id(&self) -> i32 {
        self.elementary_type().type_id()
    }

    /// Shorthand for `self.elementary_type().type_name()`.
    pub const fn type_name(&self) -> &'static str {
        self.elementary_type().type_name()
    }
}

impl Encode for Value {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        value_dispatch!(self, inner => inner.write_to(buf))
    }
}

impl Estimable for Value {
    fn estimate(&self) -> usize {
        value_dispatch!(self, inner => inner.estimate())
    }
}

impl Display for Value {
    /// The textual form of the payload: `true`/`false` for booleans,
    /// decimal renderings for numerics, and the type-specific forms for
    /// the remaining variants.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        value_dispatch!(self, inner => Display::fmt(inner, f))
    }
}
