//! Record descriptors and the session-scoped schema registry
//!
//! A document carries its own schema: `RecordDescriptor` stream elements
//! declare, under a numeric id, the name and elementary type of every
//! field of the records that later reference that id. The
//! [`SchemaRegistry`] accumulates those declarations over the course of
//! one decode session.
//!
//! The registry is deliberately an explicit object constructed per decode
//! session and threaded through the decode calls that need it, never
//! process-global state, so that independent documents can be decoded
//! concurrently (or sequentially) without observing each other's
//! descriptor ids.

use crate::conv::len::Estimable;
use crate::conv::{target::Target, Decode, Encode};
use crate::elementary::ElementaryType;
use crate::error::{DecodeError, DecodeResult};
use crate::parse::Parser;
use crate::seq::{parse_seq, write_seq};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// Declaration that a record field has the given name and is encoded with
/// the elementary codec registered under `type_id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeDescriptor {
    pub attribute_name: String,
    pub type_id: i32,
}

impl AttributeDescriptor {
    /// Convenience constructor from a name and a resolved elementary type.
    pub fn new(attribute_name: impl Into<String>, ty: ElementaryType) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            type_id: ty.type_id(),
        }
    }

    /// The elementary type this attribute's `type_id` resolves to.
    ///
    /// Decoding guarantees resolution succeeds; `None` only arises on
    /// hand-constructed descriptors carrying an unregistered id.
    pub fn elementary_type(&self) -> Option<ElementaryType> {
        ElementaryType::from_type_id(self.type_id)
    }

    pub(crate) fn parse<P: Parser>(p: &mut P) -> DecodeResult<Self> {
        let attribute_name = String::parse(p)?;
        let offset = p.offset();
        let type_id = p.take_i32()?;
        if ElementaryType::from_type_id(type_id).is_none() {
            return Err(DecodeError::UnknownTypeId { type_id, offset });
        }
        Ok(Self {
            attribute_name,
            type_id,
        })
    }
}

impl Encode for AttributeDescriptor {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        self.attribute_name.write_to(buf) + self.type_id.write_to(buf)
    }
}

impl Estimable for AttributeDescriptor {
    fn estimate(&self) -> usize {
        self.attribute_name.estimate() + 4
    }
}

/// Schema declaration for all records that later carry this
/// `descriptor_id`.
///
/// Attribute order is significant: it is the order in which field values
/// appear in every subsequent record payload with this id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordDescriptor {
    pub descriptor_id: i32,
    pub type_name: String,
    pub attributes: Vec<AttributeDescriptor>,
}

impl RecordDescriptor {
    pub(crate) fn parse<P: Parser>(p: &mut P) -> DecodeResult<Self> {
        let descriptor_id = p.take_i32()?;
        let type_name = String::parse(p)?;
        let attributes = parse_seq(p, AttributeDescriptor::parse)?;
        Ok(Self {
            descriptor_id,
            type_name,
            attributes,
        })
    }
}

impl Encode for RecordDescriptor {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        self.descriptor_id.write_to(buf)
            + self.type_name.write_to(buf)
            + write_seq(buf, &self.attributes)
    }
}

impl Estimable for RecordDescriptor {
    fn estimate(&self) -> usize {
        4 + self.type_name.estimate() + self.attributes.estimate()
    }
}

/// Typed miss returned by [`SchemaRegistry::resolve`]; the decoder lifts
/// it into [`DecodeError::UnknownDescriptor`] with offset context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnknownDescriptorId(pub i32);

impl Display for UnknownDescriptorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "descriptor id {} has no registered RecordDescriptor",
            self.0
        )
    }
}

impl std::error::Error for UnknownDescriptorId {}

/// Append-only table mapping a descriptor id to the most recently seen
/// [`RecordDescriptor`] with that id.
///
/// Empty at the start of a decode session; populated as descriptor stream
/// elements are decoded; scoped to that one session. There is no deletion
/// operation.
#[derive(Clone, Debug, Default)]
pub struct SchemaRegistry {
    table: HashMap<i32, RecordDescriptor>,
}

impl SchemaRegistry {
    /// Constructs an empty registry for a fresh decode session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a descriptor, displacing and returning any prior entry
    /// registered under the same id.
    pub fn register(&mut self, descriptor: RecordDescriptor) -> Option<RecordDescriptor> {
        self.table.insert(descriptor.descriptor_id, descriptor)
    }

    /// Looks up the descriptor registered under `descriptor_id`.
    pub fn resolve(
        &self,
        descriptor_id: i32,
    ) -> Result<&RecordDescriptor, UnknownDescriptorId> {
        self.table
            .get(&descriptor_id)
            .ok_or(UnknownDescriptorId(descriptor_id))
    }

    /// Returns the number of registered descriptors.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if no descriptor has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{strict::StrictBuilder, Builder};
    use crate::parse::TryIntoParser;

    fn sample_descriptor() -> RecordDescriptor {
        RecordDescriptor {
            descriptor_id: 1,
            type_name: "usage".into(),
            attributes: vec![
                AttributeDescriptor::new("bytes", ElementaryType::Int),
                AttributeDescriptor::new("host", ElementaryType::IpV4Addr),
            ],
        }
    }

    #[test]
    fn descriptor_roundtrip() {
        let desc = sample_descriptor();
        let bytes = desc.to_bytes();
        assert_eq!(bytes.len(), desc.estimate());
        let mut p: crate::ByteParser = bytes.try_into_parser().unwrap();
        assert_eq!(RecordDescriptor::parse(&mut p).unwrap(), desc);
        assert!(p.is_exhausted());
    }

    #[test]
    fn descriptor_wire_layout() {
        let desc = RecordDescriptor {
            descriptor_id: 1,
            type_name: String::new(),
            attributes: vec![AttributeDescriptor::new("b", ElementaryType::Int)],
        };
        assert_eq!(
            desc.encode::<StrictBuilder>().into_hex(),
            // id, empty name, one attribute: name "b", type id 0x21
            "000000010000000000000001000000016200000021"
        );
    }

    #[test]
    fn unknown_type_id_rejected_at_descriptor_decode() {
        let mut bad = sample_descriptor();
        bad.attributes[1].type_id = 0x7777;
        let mut p: crate::ByteParser = bad.to_bytes().try_into_parser().unwrap();
        let err = RecordDescriptor::parse(&mut p).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Element { index: 1, source } if matches!(
                *source,
                DecodeError::UnknownTypeId { type_id: 0x7777, .. }
            )
        ));
    }

    #[test]
    fn register_overwrites_by_id() {
        let mut registry = SchemaRegistry::new();
        assert!(registry.register(sample_descriptor()).is_none());
        let mut updated = sample_descriptor();
        updated.type_name = "usage-v2".into();
        let displaced = registry.register(updated.clone()).unwrap();
        assert_eq!(displaced.type_name, "usage");
        assert_eq!(registry.resolve(1).unwrap(), &updated);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn resolve_reports_missing_id() {
        let registry = SchemaRegistry::new();
        assert_eq!(registry.resolve(7).unwrap_err(), UnknownDescriptorId(7));
    }
}
