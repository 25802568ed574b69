//! Serialized-length oracles
//!
//! Every IPDR/XDR elementary type has either a constant wire width
//! ([`FixedLength`]) or a width cheaply computable from the value alone
//! ([`Estimable`]). The oracles let encoders pre-size their output buffers
//! exactly, and stand in for the `packed_size` notion of the format
//! specification.

/// Types whose serialized form has a constant byte width.
pub trait FixedLength {
    /// Exact number of bytes in the serialization of any value of this type.
    const LEN: usize;
}

/// Types whose serialized byte width can be computed without serializing.
///
/// A blanket implementation covers every [`FixedLength`] type.
pub trait Estimable {
    /// Number of bytes in the serialized form of `self`.
    fn estimate(&self) -> usize;
}

impl<T: FixedLength> Estimable for T {
    #[inline]
    fn estimate(&self) -> usize {
        Self::LEN
    }
}

impl Estimable for String {
    fn estimate(&self) -> usize {
        4 + self.len()
    }
}

/// Sequences serialize as a 4-byte count followed by their elements.
impl<T: Estimable> Estimable for Vec<T> {
    fn estimate(&self) -> usize {
        4 + self.iter().map(Estimable::estimate).sum::<usize>()
    }
}
