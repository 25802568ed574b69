//! The IPDR/XDR document model and its stream decoder/encoder
//!
//! A document is a header followed by a variable-length sequence of
//! tagged stream elements. Elements are interdependent: a record can only
//! be interpreted through a descriptor registered by an *earlier* element
//! of the same stream, so decoding is a single sequential pass that
//! threads a [`SchemaRegistry`] through every element.
//!
//! The context-free structures ([`NameSpaceInfo`], [`DocEnd`]) implement
//! [`Decode`] directly; everything whose interpretation depends on the
//! registry is decoded through inherent `parse` functions taking the
//! registry alongside the parser. The top-level entry points
//! [`decode_document`] and [`encode_document`] construct a fresh registry
//! per call, so independent decodes never share schema state.

use crate::conv::len::{Estimable, FixedLength};
use crate::conv::{target::Target, Decode, Encode, EncodeLength};
use crate::elementary::{ElementaryType, Value};
use crate::error::{DecodeError, DecodeResult, EncodeError};
use crate::parse::{ParseResult, Parser, TryIntoParser};
use crate::schema::{RecordDescriptor, SchemaRegistry};
use crate::seq::{parse_seq, write_seq};
use crate::timestamp::DateTimeMsec;
use crate::uuid::Uuid;
use std::collections::HashSet;

/// Static namespace metadata carried by the header.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct NameSpaceInfo {
    pub name_space_uri: String,
    pub name_space_id: String,
}

impl Decode for NameSpaceInfo {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        Ok(Self {
            name_space_uri: String::parse(p)?,
            name_space_id: String::parse(p)?,
        })
    }
}

impl Encode for NameSpaceInfo {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        self.name_space_uri.write_to(buf) + self.name_space_id.write_to(buf)
    }
}

impl Estimable for NameSpaceInfo {
    fn estimate(&self) -> usize {
        self.name_space_uri.estimate() + self.name_space_id.estimate()
    }
}

/// Fixed-order document header.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    pub ipdr_version: i32,
    pub ipdr_recorder_info: String,
    pub start_time: DateTimeMsec,
    pub default_name_space_uri: String,
    pub other_name_spaces: Vec<NameSpaceInfo>,
    pub service_definition_uris: Vec<String>,
    pub doc_id: Uuid,
}

impl Header {
    pub(crate) fn parse<P: Parser>(p: &mut P) -> DecodeResult<Self> {
        Ok(Self {
            ipdr_version: p.take_i32()?,
            ipdr_recorder_info: String::parse(p)?,
            start_time: DateTimeMsec::parse(p)?,
            default_name_space_uri: String::parse(p)?,
            other_name_spaces: parse_seq(p, |p| Ok(NameSpaceInfo::parse(p)?))?,
            service_definition_uris: parse_seq(p, |p| Ok(String::parse(p)?))?,
            doc_id: Uuid::parse(p)?,
        })
    }
}

impl Encode for Header {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        self.ipdr_version.write_to(buf)
            + self.ipdr_recorder_info.write_to(buf)
            + self.start_time.write_to(buf)
            + self.default_name_space_uri.write_to(buf)
            + write_seq(buf, &self.other_name_spaces)
            + write_seq(buf, &self.service_definition_uris)
            + self.doc_id.write_to(buf)
    }
}

impl Estimable for Header {
    fn estimate(&self) -> usize {
        4 + self.ipdr_recorder_info.estimate()
            + 8
            + self.default_name_space_uri.estimate()
            + self.other_name_spaces.estimate()
            + self.service_definition_uris.estimate()
            + 20
    }
}

/// Ordered field payload of one record.
///
/// Not a fixed struct: its shape is determined entirely at decode time by
/// the resolved descriptor, so it is an insertion-ordered mapping from
/// attribute name to elementary value, with insertion order equal to the
/// descriptor's attribute order.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct RecordData(Vec<(String, Value)>);

impl RecordData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self(Vec::with_capacity(n))
    }

    /// Appends a field; ordering is the caller's responsibility.
    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        self.0.push((name.into(), value));
    }

    /// Returns the value of the first field with the given name, if any.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0
            .iter()
            .find_map(|(n, v)| (n == name).then_some(v))
    }

    /// Iterates fields in descriptor attribute order.
    pub fn iter(&self) -> impl Iterator<Item = &(String, Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Value)> for RecordData {
    fn from_iter<T: IntoIterator<Item = (S, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(n, v)| (n.into(), v)).collect())
    }
}

/// One usage record, interpreted through a previously registered
/// descriptor.
///
/// The record does not own its descriptor; it holds the id, resolved
/// through the session's registry, which must outlive every record
/// decoded against it.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub descriptor_id: i32,
    pub data: RecordData,
}

impl Record {
    pub(crate) fn parse<P: Parser>(
        p: &mut P,
        schema: &SchemaRegistry,
    ) -> DecodeResult<Self> {
        let offset = p.offset();
        let descriptor_id = p.take_i32()?;
        let descriptor = schema
            .resolve(descriptor_id)
            .map_err(|_| DecodeError::UnknownDescriptor {
                descriptor_id,
                offset,
            })?;
        let mut data = RecordData::with_capacity(descriptor.attributes.len());
        for attr in &descriptor.attributes {
            let offset = p.offset();
            let ty = ElementaryType::from_type_id(attr.type_id).ok_or(
                DecodeError::UnknownTypeId {
                    type_id: attr.type_id,
                    offset,
                },
            )?;
            data.push(attr.attribute_name.clone(), ty.parse_value(p)?);
        }
        tracing::trace!(descriptor_id, fields = data.len(), "decoded record");
        Ok(Self {
            descriptor_id,
            data,
        })
    }
}

impl Encode for Record {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        self.descriptor_id.write_to(buf)
            + self
                .data
                .iter()
                .map(|(_, value)| value.write_to(buf))
                .sum::<usize>()
    }
}

impl Estimable for Record {
    fn estimate(&self) -> usize {
        4 + self
            .data
            .iter()
            .map(|(_, value)| value.estimate())
            .sum::<usize>()
    }
}

/// Terminal marker element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DocEnd {
    pub count: i32,
    pub end_time: DateTimeMsec,
}

impl Decode for DocEnd {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        Ok(Self {
            count: p.take_i32()?,
            end_time: DateTimeMsec::parse(p)?,
        })
    }
}

impl Encode for DocEnd {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        self.count.write_to(buf) + self.end_time.write_to(buf)
    }
}

impl FixedLength for DocEnd {
    const LEN: usize = 12;
}

/// Discriminant of a stream element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    RecordDesc,
    IpdrRec,
    DocEnd,
}

impl ElementKind {
    /// The wire tag of this discriminant.
    pub const fn tag(self) -> i32 {
        match self {
            ElementKind::RecordDesc => 1,
            ElementKind::IpdrRec => 2,
            ElementKind::DocEnd => 3,
        }
    }

    /// The symbolic name used by the XML projection.
    pub const fn name(self) -> &'static str {
        match self {
            ElementKind::RecordDesc => "RECORDDESC",
            ElementKind::IpdrRec => "IPDRREC",
            ElementKind::DocEnd => "DOCEND",
        }
    }

    /// Resolves a wire tag; any value outside `{1, 2, 3}` is invalid.
    pub const fn from_tag(tag: i32) -> Option<Self> {
        match tag {
            1 => Some(ElementKind::RecordDesc),
            2 => Some(ElementKind::IpdrRec),
            3 => Some(ElementKind::DocEnd),
            _ => None,
        }
    }
}

/// One tagged unit within the document's element sequence.
///
/// A proper sum type: exactly one payload is present, matching the tag.
#[derive(Clone, Debug, PartialEq)]
pub enum StreamElement {
    Descriptor(RecordDescriptor),
    Record(Record),
    DocEnd(DocEnd),
}

impl StreamElement {
    /// The discriminant matching the active payload.
    pub const fn kind(&self) -> ElementKind {
        match self {
            StreamElement::Descriptor(_) => ElementKind::RecordDesc,
            StreamElement::Record(_) => ElementKind::IpdrRec,
            StreamElement::DocEnd(_) => ElementKind::DocEnd,
        }
    }

    pub(crate) fn parse<P: Parser>(
        p: &mut P,
        schema: &mut SchemaRegistry,
    ) -> DecodeResult<Self> {
        let offset = p.offset();
        let tag = p.take_i32()?;
        match ElementKind::from_tag(tag) {
            Some(ElementKind::RecordDesc) => {
                let descriptor = RecordDescriptor::parse(p)?;
                tracing::debug!(
                    descriptor_id = descriptor.descriptor_id,
                    type_name = %descriptor.type_name,
                    attributes = descriptor.attributes.len(),
                    "registered record descriptor"
                );
                schema.register(descriptor.clone());
                Ok(Self::Descriptor(descriptor))
            }
            Some(ElementKind::IpdrRec) => Ok(Self::Record(Record::parse(p, schema)?)),
            Some(ElementKind::DocEnd) => Ok(Self::DocEnd(DocEnd::parse(p)?)),
            None => Err(DecodeError::InvalidDiscriminant { kind: tag, offset }),
        }
    }
}

impl Encode for StreamElement {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        self.kind().tag().write_to(buf)
            + match self {
                StreamElement::Descriptor(descriptor) => descriptor.write_to(buf),
                StreamElement::Record(record) => record.write_to(buf),
                StreamElement::DocEnd(doc_end) => doc_end.write_to(buf),
            }
    }
}

impl Estimable for StreamElement {
    fn estimate(&self) -> usize {
        4 + match self {
            StreamElement::Descriptor(descriptor) => descriptor.estimate(),
            StreamElement::Record(record) => record.estimate(),
            StreamElement::DocEnd(doc_end) => doc_end.estimate(),
        }
    }
}

/// Root entity: one fully decoded IPDR/XDR document.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub header: Header,
    pub elements: Vec<StreamElement>,
}

impl Document {
    /// Decodes a document from `p`, populating `schema` as descriptor
    /// elements are seen.
    ///
    /// Most callers want [`decode_document`], which constructs the
    /// registry; this form exists for callers that need to inspect the
    /// session's accumulated schema afterwards.
    pub fn parse<P: Parser>(p: &mut P, schema: &mut SchemaRegistry) -> DecodeResult<Self> {
        let header = Header::parse(p)?;
        let elements = parse_seq(p, |p| StreamElement::parse(p, schema))?;
        tracing::debug!(
            elements = elements.len(),
            descriptors = schema.len(),
            "decoded document"
        );
        Ok(Self { header, elements })
    }

    /// Checks the encode-side invariant: every record element must
    /// reference a descriptor declared by an earlier element of this
    /// document.
    pub fn validate(&self) -> Result<(), EncodeError> {
        let mut declared: HashSet<i32> = HashSet::new();
        for (element_index, element) in self.elements.iter().enumerate() {
            match element {
                StreamElement::Descriptor(descriptor) => {
                    declared.insert(descriptor.descriptor_id);
                }
                StreamElement::Record(record) => {
                    if !declared.contains(&record.descriptor_id) {
                        return Err(EncodeError::UnknownDescriptor {
                            descriptor_id: record.descriptor_id,
                            element_index,
                        });
                    }
                }
                StreamElement::DocEnd(_) => {}
            }
        }
        Ok(())
    }
}

impl Encode for Document {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        self.header.write_to(buf) + write_seq(buf, &self.elements)
    }
}

impl Estimable for Document {
    fn estimate(&self) -> usize {
        self.header.estimate() + self.elements.estimate()
    }
}

/// Decodes one document from a byte source, using a schema registry
/// scoped to this call.
///
/// # Errors
///
/// Fails with a [`DecodeError`] carrying byte-offset (and, for sequence
/// elements, index) context; every error is fatal to the whole document.
pub fn decode_document<U>(input: U) -> DecodeResult<Document>
where
    U: TryIntoParser,
{
    let mut p = input.try_into_parser()?;
    let mut schema = SchemaRegistry::new();
    Document::parse(&mut p, &mut schema)
}

/// Serializes a document, re-checking its internal schema consistency
/// first.
///
/// Sequences are written with their true element counts; an
/// unbounded-length declaration seen on decode is not reproduced.
pub fn encode_document(document: &Document) -> Result<Vec<u8>, EncodeError> {
    document.validate()?;
    Ok(document.to_bytes_full())
}
