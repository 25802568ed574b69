use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ipdrx::conv::Encode;
use ipdrx::{
    decode_document, AttributeDescriptor, DateTimeMsec, DocEnd, Document, ElementaryType,
    Header, Record, RecordDescriptor, StreamElement, Uuid, Value,
};

fn sample_document(records: usize) -> Document {
    let descriptor = RecordDescriptor {
        descriptor_id: 1,
        type_name: "usageRecord".into(),
        attributes: vec![
            AttributeDescriptor::new("bytes", ElementaryType::Int),
            AttributeDescriptor::new("host", ElementaryType::IpV4Addr),
            AttributeDescriptor::new("session", ElementaryType::String),
        ],
    };
    let mut elements = vec![StreamElement::Descriptor(descriptor)];
    for n in 0..records {
        elements.push(StreamElement::Record(Record {
            descriptor_id: 1,
            data: [
                ("bytes", Value::Int(n as i32)),
                ("host", Value::IpV4Addr("10.0.0.1".parse().unwrap())),
                ("session", Value::String("abcdef".into())),
            ]
            .into_iter()
            .collect(),
        }));
    }
    elements.push(StreamElement::DocEnd(DocEnd {
        count: records as i32,
        end_time: DateTimeMsec::new(1_520_388_002_000),
    }));
    Document {
        header: Header {
            ipdr_version: 4,
            ipdr_recorder_info: "recorder-01".into(),
            start_time: DateTimeMsec::new(1_520_388_001_039),
            default_name_space_uri: "http://www.ipdr.org/namespaces/ipdr".into(),
            other_name_spaces: vec![],
            service_definition_uris: vec![],
            doc_id: Uuid::from_bytes([0x42; 16]),
        },
        elements,
    }
}

fn decode_bench(c: &mut Criterion) {
    let bytes = sample_document(1000).to_bytes();
    c.bench_function("document_decode_1000_records", |b| {
        b.iter(|| black_box(decode_document(bytes.clone()).unwrap()))
    });
}

fn encode_bench(c: &mut Criterion) {
    let document = sample_document(1000);
    c.bench_function("document_encode_1000_records", |b| {
        b.iter(|| black_box(document.to_bytes()))
    });
}

criterion_group! {
    name = codec_benches;
    config = Criterion::default();
    targets = decode_bench, encode_bench
}

criterion_main!(codec_benches);
