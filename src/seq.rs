//! The variable-length-array codec
//!
//! Every `sequence<T>` in the document model, the top-level element
//! sequence included, is serialized as a signed 32-bit declared length
//! followed by the elements in order. Decoding honors two leniencies
//! mandated by the format:
//!
//! * a negative declared length (conventionally all-ones, `0xFFFFFFFF`)
//!   means *unbounded*: elements are consumed until the source is
//!   exhausted;
//! * even with a non-negative declared length, the source is checked for
//!   exhaustion after **each** decoded element, and decoding stops early,
//!   without error, if the source ran out before the declared count was
//!   reached.
//!
//! Both rules require the byte source to answer an exhaustion query after
//! every element, which is why [`Parser`] is constructed over
//! size-queryable buffers; unbounded unseekable pipes are out of scope.
//! The early-exit is a deliberate tolerance for producer/consumer count
//! mismatches, not an incidental one, and must not be tightened into
//! strict length-accounting.
//!
//! Encoding always writes the true element count and never re-emits the
//! unbounded sentinel: a document decoded from an unbounded-length input
//! re-encodes with an explicit count. This asymmetry is intentional.

use crate::conv::{target::Target, Encode};
use crate::error::DecodeResult;
use crate::parse::Parser;

/// Declared-length value conventionally used for unbounded sequences.
pub const UNBOUNDED: i32 = -1;

/// Decodes one variable-length array, driving each element through
/// `parse_elem`.
///
/// Element failures are wrapped with the zero-based index of the element
/// being decoded.
pub fn parse_seq<P, T, F>(p: &mut P, mut parse_elem: F) -> DecodeResult<Vec<T>>
where
    P: Parser,
    F: FnMut(&mut P) -> DecodeResult<T>,
{
    let declared = p.take_i32()?;
    let mut elems: Vec<T> = Vec::new();
    let mut decoded: i64 = 0;
    while declared < 0 || decoded < i64::from(declared) {
        let elem = parse_elem(p).map_err(|e| e.at_element(elems.len()))?;
        elems.push(elem);
        decoded += 1;
        if p.is_exhausted() {
            if declared >= 0 && decoded < i64::from(declared) {
                tracing::debug!(
                    declared,
                    decoded,
                    "source exhausted before declared element count"
                );
            }
            break;
        }
    }
    Ok(elems)
}

/// Serializes a sequence as its true element count followed by the
/// elements in order.
pub fn write_seq<U: Target, T: Encode>(buf: &mut U, elems: &[T]) -> usize {
    (elems.len() as i32).write_to(buf)
        + elems.iter().map(|e| e.write_to(buf)).sum::<usize>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conv::Decode;
    use crate::error::DecodeError;
    use crate::parse::error::ParseError;
    use crate::parse::TryIntoParser;

    fn take_int(p: &mut crate::ByteParser) -> DecodeResult<u32> {
        Ok(u32::parse(p)?)
    }

    #[test]
    fn declared_count_roundtrip() {
        let mut buf = Vec::new();
        let n = write_seq(&mut buf, &[1u32, 2, 3]);
        assert_eq!(n, 16);
        assert_eq!(&buf[..4], &[0, 0, 0, 3]);
        let mut p: crate::ByteParser = buf.try_into_parser().unwrap();
        assert_eq!(parse_seq(&mut p, take_int).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn zero_length() {
        let mut p: crate::ByteParser = [0u8; 4].try_into_parser().unwrap();
        assert_eq!(parse_seq(&mut p, take_int).unwrap(), Vec::<u32>::new());
        assert!(p.is_exhausted());
    }

    #[test]
    fn unbounded_sentinel_reads_to_exhaustion() {
        let mut buf = vec![0xff, 0xff, 0xff, 0xff];
        for v in [1u32, 2, 3] {
            buf.extend_from_slice(&v.to_be_bytes());
        }
        let mut p: crate::ByteParser = buf.try_into_parser().unwrap();
        assert_eq!(parse_seq(&mut p, take_int).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn early_exit_when_declared_count_exceeds_contents() {
        let mut buf = vec![0x00, 0x00, 0x00, 0x09];
        for v in [7u32, 8] {
            buf.extend_from_slice(&v.to_be_bytes());
        }
        let mut p: crate::ByteParser = buf.try_into_parser().unwrap();
        assert_eq!(parse_seq(&mut p, take_int).unwrap(), vec![7, 8]);
    }

    #[test]
    fn surplus_bytes_after_declared_count_are_left_unread() {
        let mut buf = vec![0x00, 0x00, 0x00, 0x01];
        buf.extend_from_slice(&1u32.to_be_bytes());
        buf.extend_from_slice(&2u32.to_be_bytes());
        let mut p: crate::ByteParser = buf.try_into_parser().unwrap();
        assert_eq!(parse_seq(&mut p, take_int).unwrap(), vec![1]);
        assert_eq!(p.remainder(), 4);
    }

    #[test]
    fn mid_element_truncation_is_an_error() {
        let mut buf = vec![0x00, 0x00, 0x00, 0x02];
        buf.extend_from_slice(&1u32.to_be_bytes());
        buf.extend_from_slice(&[0x00, 0x01]); // half an element
        let mut p: crate::ByteParser = buf.try_into_parser().unwrap();
        let err = parse_seq(&mut p, take_int).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Element { index: 1, source } if matches!(
                *source,
                DecodeError::Parse(ParseError::Truncated { .. })
            )
        ));
    }
}
