use ipdrx::conv::Encode;
use ipdrx::seq::UNBOUNDED;
use ipdrx::xml::ToXml;
use ipdrx::{
    decode_document, encode_document, AttributeDescriptor, DateTimeMsec, DecodeError, DocEnd,
    Document, ElementaryType, EncodeError, Header, ParseError, Record, RecordDescriptor,
    SchemaRegistry, StreamElement, Uuid, Value,
};

const DOC_ID: &str = "12345678-1234-5678-1234-567812345678";

fn sample_header() -> Header {
    Header {
        ipdr_version: 4,
        ipdr_recorder_info: "recorder-01".into(),
        start_time: DateTimeMsec::new(1_520_388_001_039),
        default_name_space_uri: "http://www.ipdr.org/namespaces/ipdr".into(),
        other_name_spaces: vec![],
        service_definition_uris: vec!["http://example.com/service.xsd".into()],
        doc_id: DOC_ID.parse().unwrap(),
    }
}

fn usage_descriptor() -> RecordDescriptor {
    RecordDescriptor {
        descriptor_id: 1,
        type_name: "usageRecord".into(),
        attributes: vec![
            AttributeDescriptor::new("bytes", ElementaryType::Int),
            AttributeDescriptor::new("host", ElementaryType::IpV4Addr),
            AttributeDescriptor::new("session", ElementaryType::String),
        ],
    }
}

fn usage_record(bytes: i32) -> Record {
    Record {
        descriptor_id: 1,
        data: [
            ("bytes", Value::Int(bytes)),
            ("host", Value::IpV4Addr("10.0.0.1".parse().unwrap())),
            ("session", Value::String("abc".into())),
        ]
        .into_iter()
        .collect(),
    }
}

fn sample_document() -> Document {
    Document {
        header: sample_header(),
        elements: vec![
            StreamElement::Descriptor(usage_descriptor()),
            StreamElement::Record(usage_record(42)),
            StreamElement::DocEnd(DocEnd {
                count: 1,
                end_time: DateTimeMsec::new(1_520_388_002_000),
            }),
        ],
    }
}

#[test]
fn end_to_end_byte_identical_roundtrip() {
    let original = sample_document().to_bytes();
    let document = decode_document(original.clone()).unwrap();

    assert_eq!(document.header.ipdr_version, 4);
    assert_eq!(document.header.doc_id.to_string(), DOC_ID);
    assert_eq!(document.elements.len(), 3);
    match &document.elements[1] {
        StreamElement::Record(record) => {
            assert_eq!(record.descriptor_id, 1);
            assert_eq!(record.data.get("bytes"), Some(&Value::Int(42)));
        }
        other => panic!("expected record element, got {:?}", other),
    }

    let reencoded = encode_document(&document).unwrap();
    assert_eq!(reencoded, original);
}

#[test]
fn record_field_order_follows_descriptor() {
    let document = decode_document(sample_document().to_bytes()).unwrap();
    let record = match &document.elements[1] {
        StreamElement::Record(record) => record,
        other => panic!("expected record element, got {:?}", other),
    };
    let names: Vec<&str> = record.data.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, ["bytes", "host", "session"]);
}

#[test]
fn unbounded_element_sequence_reads_to_exhaustion() {
    let mut bytes = sample_header().to_bytes();
    UNBOUNDED.write_to_vec(&mut bytes);
    StreamElement::Descriptor(usage_descriptor()).write_to_vec(&mut bytes);
    StreamElement::Record(usage_record(7)).write_to_vec(&mut bytes);
    StreamElement::DocEnd(DocEnd {
        count: 1,
        end_time: DateTimeMsec::new(0),
    })
    .write_to_vec(&mut bytes);

    let document = decode_document(bytes).unwrap();
    assert_eq!(document.elements.len(), 3);

    // re-encoding replaces the sentinel with the true count
    let reencoded = encode_document(&document).unwrap();
    let header_len = sample_header().to_bytes().len();
    assert_eq!(
        &reencoded[header_len..header_len + 4],
        3i32.to_be_bytes().as_slice()
    );
}

#[test]
fn declared_count_larger_than_contents_stops_at_exhaustion() {
    let mut bytes = sample_header().to_bytes();
    9i32.write_to_vec(&mut bytes);
    StreamElement::Descriptor(usage_descriptor()).write_to_vec(&mut bytes);
    StreamElement::Record(usage_record(7)).write_to_vec(&mut bytes);

    let document = decode_document(bytes).unwrap();
    assert_eq!(document.elements.len(), 2);
}

#[test]
fn record_before_descriptor_is_unknown() {
    let mut bytes = sample_header().to_bytes();
    2i32.write_to_vec(&mut bytes);
    StreamElement::Record(usage_record(7)).write_to_vec(&mut bytes);
    StreamElement::Descriptor(usage_descriptor()).write_to_vec(&mut bytes);

    let err = decode_document(bytes).unwrap_err();
    match err {
        DecodeError::Element { index: 0, source } => match *source {
            DecodeError::UnknownDescriptor { descriptor_id: 1, .. } => {}
            other => panic!("expected UnknownDescriptor, got {:?}", other),
        },
        other => panic!("expected element wrapper, got {:?}", other),
    }
}

#[test]
fn sessions_do_not_share_registered_descriptors() {
    // first session registers descriptor 1 and decodes fine
    decode_document(sample_document().to_bytes()).unwrap();

    // a second document that only carries a record for descriptor 1 must
    // not see the first session's registry
    let mut bytes = sample_header().to_bytes();
    1i32.write_to_vec(&mut bytes);
    StreamElement::Record(usage_record(7)).write_to_vec(&mut bytes);
    let err = decode_document(bytes).unwrap_err();
    assert!(matches!(err, DecodeError::Element { index: 0, .. }));
}

#[test]
fn explicit_registry_accumulates_within_one_session() {
    use ipdrx::TryIntoParser;

    let mut schema = SchemaRegistry::new();
    let mut parser: ipdrx::ByteParser =
        sample_document().to_bytes().try_into_parser().unwrap();
    Document::parse(&mut parser, &mut schema).unwrap();
    assert_eq!(schema.resolve(1).unwrap().type_name, "usageRecord");
    assert!(schema.resolve(2).is_err());
}

#[test]
fn redefined_descriptor_governs_later_records() {
    let redefined = RecordDescriptor {
        descriptor_id: 1,
        type_name: "usageRecordV2".into(),
        attributes: vec![AttributeDescriptor::new("label", ElementaryType::String)],
    };
    let mut bytes = sample_header().to_bytes();
    4i32.write_to_vec(&mut bytes);
    StreamElement::Descriptor(usage_descriptor()).write_to_vec(&mut bytes);
    StreamElement::Record(usage_record(7)).write_to_vec(&mut bytes);
    StreamElement::Descriptor(redefined).write_to_vec(&mut bytes);
    // a record in the new shape: just one string field
    let record = Record {
        descriptor_id: 1,
        data: [("label", Value::String("tail".into()))].into_iter().collect(),
    };
    StreamElement::Record(record).write_to_vec(&mut bytes);

    let document = decode_document(bytes).unwrap();
    match &document.elements[3] {
        StreamElement::Record(record) => {
            assert_eq!(record.data.get("label"), Some(&Value::String("tail".into())));
            assert_eq!(record.data.len(), 1);
        }
        other => panic!("expected record element, got {:?}", other),
    }
}

#[test]
fn invalid_discriminant_is_fatal() {
    let mut bytes = sample_header().to_bytes();
    1i32.write_to_vec(&mut bytes);
    7i32.write_to_vec(&mut bytes); // tag outside {1, 2, 3}

    let err = decode_document(bytes).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::Element { index: 0, source } if matches!(
            *source,
            DecodeError::InvalidDiscriminant { kind: 7, .. }
        )
    ));
}

#[test]
fn truncated_header_is_fatal() {
    let bytes = sample_header().to_bytes();
    let err = decode_document(bytes[..bytes.len() - 5].to_vec()).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::Parse(ParseError::Truncated { .. })
    ));
}

#[test]
fn encoding_validates_descriptor_references() {
    let mut document = sample_document();
    document.elements.remove(0); // drop the descriptor declaration
    let err = encode_document(&document).unwrap_err();
    assert_eq!(
        err,
        EncodeError::UnknownDescriptor {
            descriptor_id: 1,
            element_index: 0
        }
    );
}

#[test]
fn xml_projection_shape() {
    let document = decode_document(sample_document().to_bytes()).unwrap();
    let xml = document.to_xml();
    assert!(xml.starts_with("<IPDRDoc><IPDRHeader>"));
    assert!(xml.contains("<ipdrVersion type=\"int\">4</ipdrVersion>"));
    assert!(xml.contains(&format!("<docId type=\"ipdr:uuid\">{}</docId>", DOC_ID)));
    assert!(xml.contains("<IPDRStreamElement kind=\"RECORDDESC\">"));
    assert!(xml.contains(
        "<AttributeDescriptor attributeName=\"bytes\" typeId=\"33\" derivedType=\"int\"/>"
    ));
    assert!(xml.contains("<bytes type=\"int\">42</bytes>"));
    assert!(xml.contains("<host type=\"ipdr:ipV4Addr\">10.0.0.1</host>"));
    assert!(xml.contains("<IPDRStreamElement kind=\"DOCEND\">"));
    assert!(xml.ends_with("</array></IPDRDoc>"));
}

#[test]
fn wide_value_coverage_roundtrip() {
    let descriptor = RecordDescriptor {
        descriptor_id: 9,
        type_name: "everything".into(),
        attributes: vec![
            AttributeDescriptor::new("b", ElementaryType::Bool),
            AttributeDescriptor::new("u8", ElementaryType::UByte),
            AttributeDescriptor::new("i64", ElementaryType::Long),
            AttributeDescriptor::new("f64", ElementaryType::Double),
            AttributeDescriptor::new("blob", ElementaryType::HexBinary),
            AttributeDescriptor::new("when", ElementaryType::DateTimeUsec),
            AttributeDescriptor::new("v6", ElementaryType::IpV6Addr),
            AttributeDescriptor::new("any", ElementaryType::IpAddr),
            AttributeDescriptor::new("id", ElementaryType::Uuid),
            AttributeDescriptor::new("nic", ElementaryType::MacAddress),
        ],
    };
    let record = Record {
        descriptor_id: 9,
        data: [
            ("b", Value::Bool(true)),
            ("u8", Value::UByte(0xff)),
            ("i64", Value::Long(i64::MIN)),
            ("f64", Value::Double(2.5)),
            ("blob", Value::HexBinary(vec![0xde, 0xad].into())),
            ("when", Value::DateTimeUsec(ipdrx::DateTimeUsec::new(1))),
            ("v6", Value::IpV6Addr("ff:fe:fd:fc:fb:fa::1".parse().unwrap())),
            ("any", Value::IpAddr("10.0.0.7".parse().unwrap())),
            ("id", Value::Uuid(DOC_ID.parse::<Uuid>().unwrap())),
            ("nic", Value::MacAddress("FF:FE:FD:FC:FB:FA".parse().unwrap())),
        ]
        .into_iter()
        .collect(),
    };
    let document = Document {
        header: sample_header(),
        elements: vec![
            StreamElement::Descriptor(descriptor),
            StreamElement::Record(record),
            StreamElement::DocEnd(DocEnd {
                count: 1,
                end_time: DateTimeMsec::new(2),
            }),
        ],
    };
    let bytes = document.to_bytes();
    let decoded = decode_document(bytes.clone()).unwrap();
    assert_eq!(decoded, document);
    assert_eq!(encode_document(&decoded).unwrap(), bytes);
}
