//! Model for representing and transcoding TM Forum IPDR/XDR usage records
//!
//! # Overview
//!
//! This library implements the binary record format defined by the TM
//! Forum's *IPDR/XDR Encoding Format* specification, used to exchange
//! usage and billing detail records between mediation systems. The format
//! is a variant of the eXternal Data Representation standard with one
//! crucial divergence: **nothing is padded**. Where classic XDR rounds
//! every item up to a four-byte boundary, IPDR/XDR writes every field at
//! its exact width, so the two formats are not wire-compatible and the
//! padded variant is deliberately unsupported here.
//!
//! An IPDR/XDR document is *self-describing*: record descriptors (schema
//! declarations mapping a numeric id to an ordered list of named, typed
//! attributes) are interleaved with the records that reference them, so
//! a conforming decoder must accumulate schema state while walking the
//! stream. That state lives in a [`SchemaRegistry`] constructed per
//! decode session and threaded explicitly through the decode calls; it is
//! never global, so independent documents may be decoded concurrently
//! without observing each other's descriptors.
//!
//! # Layout
//!
//! The low-level machinery mirrors the two directions of transcoding:
//! [`parse`] defines the [`Parser`] abstraction over an immutable byte
//! buffer, and [`conv`] defines the [`Encode`]/[`Decode`] traits together
//! with the [`Target`] write-side abstraction and the serialized-length
//! oracles. [`builder`] provides the [`StrictBuilder`] finalization
//! helper used widely in tests.
//!
//! The elementary types (integers, strings, timestamps, IP and MAC
//! addresses, UUIDs, opaque hex blobs) live in [`prim`], [`timestamp`],
//! [`addr`], [`uuid`], and [`hexbinary`], with the runtime type-id
//! dispatch in [`elementary`]. The document model and its sequential
//! stream decoder/encoder live in [`schema`], [`seq`], and [`document`],
//! and [`xml`] renders a decoded document as a one-way textual tree.
//!
//! # Example
//!
//! ```
//! use ipdrx::{decode_document, encode_document};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let bytes: Vec<u8> = {
//! #     use ipdrx::conv::Encode;
//! #     use ipdrx::{AttributeDescriptor, DocEnd, Document, ElementaryType, Header,
//! #                 Record, RecordDescriptor, StreamElement, Value};
//! #     let doc = Document {
//! #         header: Header {
//! #             ipdr_version: 4,
//! #             ipdr_recorder_info: "recorder".into(),
//! #             start_time: ipdrx::DateTimeMsec::new(0),
//! #             default_name_space_uri: "http://www.ipdr.org/namespaces".into(),
//! #             other_name_spaces: vec![],
//! #             service_definition_uris: vec![],
//! #             doc_id: ipdrx::Uuid::from_bytes([0; 16]),
//! #         },
//! #         elements: vec![
//! #             StreamElement::Descriptor(RecordDescriptor {
//! #                 descriptor_id: 1,
//! #                 type_name: "usage".into(),
//! #                 attributes: vec![AttributeDescriptor::new("bytes", ElementaryType::Int)],
//! #             }),
//! #             StreamElement::Record(Record {
//! #                 descriptor_id: 1,
//! #                 data: [("bytes", Value::Int(42))].into_iter().collect(),
//! #             }),
//! #             StreamElement::DocEnd(DocEnd { count: 1, end_time: ipdrx::DateTimeMsec::new(0) }),
//! #         ],
//! #     };
//! #     doc.to_bytes()
//! # };
//! let document = decode_document(bytes)?;
//! let reencoded = encode_document(&document)?;
//! assert_eq!(decode_document(reencoded)?, document);
//! # Ok(())
//! # }
//! ```

pub mod addr;
pub mod builder;
pub mod conv;
pub mod document;
pub mod elementary;
pub mod error;
pub mod hexbinary;
pub mod parse;
pub mod prim;
pub mod schema;
pub mod seq;
pub mod timestamp;
pub mod util;
pub mod uuid;
pub mod xml;

pub use crate::addr::MacAddr;
pub use crate::builder::{strict::StrictBuilder, Builder};
pub use crate::conv::{
    len::{Estimable, FixedLength},
    target::Target,
    Decode, Encode, EncodeLength,
};
pub use crate::document::{
    decode_document, encode_document, DocEnd, Document, ElementKind, Header, NameSpaceInfo,
    Record, RecordData, StreamElement,
};
pub use crate::elementary::{ElementaryType, Value};
pub use crate::error::{DecodeError, DecodeResult, EncodeError, HexError};
pub use crate::hexbinary::HexBinary;
pub use crate::parse::{
    byteparser::ByteParser, error::ParseError, ParseResult, Parser, TryIntoParser,
};
pub use crate::schema::{AttributeDescriptor, RecordDescriptor, SchemaRegistry};
pub use crate::timestamp::{DateTimeMsec, DateTimeSec, DateTimeUsec};
pub use crate::uuid::Uuid;
pub use crate::xml::ToXml;
