//! One-way XML projection of a decoded document
//!
//! Renders every structural entity wrapped in a tag named after its type,
//! with leaf elementary values rendered in their textual form and arrays
//! rendered as an `<array length="N">` container. Stream-element unions
//! render only their active variant.
//!
//! This projection is an export format only: it is never parsed back by
//! the codec.

use crate::document::{
    DocEnd, Document, Header, NameSpaceInfo, Record, StreamElement,
};
use crate::elementary::{ElementaryType, Value};
use crate::schema::{AttributeDescriptor, RecordDescriptor};
use std::fmt::Write;

/// Types with a tree-shaped XML rendering.
pub trait ToXml {
    /// Appends the XML rendering of `self` to `out`.
    fn write_xml(&self, out: &mut String);

    /// Returns the XML rendering of `self` as a fresh string.
    fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write_xml(&mut out);
        out
    }
}

/// `<array length="N">` container around a sequence of renderable items.
fn write_array<T: ToXml>(out: &mut String, items: &[T]) {
    let _ = write!(out, "<array length=\"{}\">", items.len());
    for item in items {
        item.write_xml(out);
    }
    out.push_str("</array>");
}

/// Leaf field carrying an elementary value: `<name type="...">value</name>`.
fn write_value_field(out: &mut String, name: &str, value: &Value) {
    let _ = write!(
        out,
        "<{name} type=\"{}\">{}</{name}>",
        value.type_name(),
        value
    );
}

impl ToXml for Value {
    fn write_xml(&self, out: &mut String) {
        let _ = write!(out, "{}", self);
    }
}

impl ToXml for String {
    fn write_xml(&self, out: &mut String) {
        out.push_str(self);
    }
}

impl ToXml for NameSpaceInfo {
    fn write_xml(&self, out: &mut String) {
        let _ = write!(
            out,
            "<NameSpaceInfo>\
             <nameSpaceURI type=\"string\">{}</nameSpaceURI>\
             <nameSpaceID type=\"string\">{}</nameSpaceID>\
             </NameSpaceInfo>",
            self.name_space_uri, self.name_space_id
        );
    }
}

impl ToXml for Header {
    fn write_xml(&self, out: &mut String) {
        out.push_str("<IPDRHeader>");
        let _ = write!(
            out,
            "<ipdrVersion type=\"int\">{}</ipdrVersion>\
             <ipdrRecorderInfo type=\"string\">{}</ipdrRecorderInfo>\
             <startTime type=\"ipdr:dateTimeMsec\">{}</startTime>\
             <defaultNameSpaceURI type=\"string\">{}</defaultNameSpaceURI>",
            self.ipdr_version,
            self.ipdr_recorder_info,
            self.start_time,
            self.default_name_space_uri
        );
        out.push_str("<otherNameSpaces>");
        write_array(out, &self.other_name_spaces);
        out.push_str("</otherNameSpaces><serviceDefinitionURIs>");
        write_array(out, &self.service_definition_uris);
        let _ = write!(
            out,
            "</serviceDefinitionURIs><docId type=\"ipdr:uuid\">{}</docId></IPDRHeader>",
            self.doc_id
        );
    }
}

impl ToXml for AttributeDescriptor {
    fn write_xml(&self, out: &mut String) {
        let derived = ElementaryType::from_type_id(self.type_id)
            .map_or("unknown", ElementaryType::type_name);
        let _ = write!(
            out,
            "<AttributeDescriptor attributeName=\"{}\" typeId=\"{}\" derivedType=\"{}\"/>",
            self.attribute_name, self.type_id, derived
        );
    }
}

impl ToXml for RecordDescriptor {
    fn write_xml(&self, out: &mut String) {
        let _ = write!(
            out,
            "<RecordDescriptor>\
             <descriptorId type=\"int\">{}</descriptorId>\
             <typeName type=\"string\">{}</typeName>\
             <attributes>",
            self.descriptor_id, self.type_name
        );
        write_array(out, &self.attributes);
        out.push_str("</attributes></RecordDescriptor>");
    }
}

impl ToXml for Record {
    fn write_xml(&self, out: &mut String) {
        let _ = write!(
            out,
            "<IPDRRecord descriptorId=\"{}\"><IPDRRecordData>",
            self.descriptor_id
        );
        for (name, value) in self.data.iter() {
            write_value_field(out, name, value);
        }
        out.push_str("</IPDRRecordData></IPDRRecord>");
    }
}

impl ToXml for DocEnd {
    fn write_xml(&self, out: &mut String) {
        let _ = write!(
            out,
            "<IPDRDocEnd>\
             <count type=\"int\">{}</count>\
             <endTime type=\"ipdr:dateTimeMsec\">{}</endTime>\
             </IPDRDocEnd>",
            self.count, self.end_time
        );
    }
}

impl ToXml for StreamElement {
    fn write_xml(&self, out: &mut String) {
        let _ = write!(out, "<IPDRStreamElement kind=\"{}\">", self.kind().name());
        match self {
            StreamElement::Descriptor(descriptor) => descriptor.write_xml(out),
            StreamElement::Record(record) => record.write_xml(out),
            StreamElement::DocEnd(doc_end) => doc_end.write_xml(out),
        }
        out.push_str("</IPDRStreamElement>");
    }
}

impl ToXml for Document {
    fn write_xml(&self, out: &mut String) {
        out.push_str("<IPDRDoc>");
        self.header.write_xml(out);
        write_array(out, &self.elements);
        out.push_str("</IPDRDoc>");
    }
}
