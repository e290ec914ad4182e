//! Table-driven little-endian field reads.

use crate::error::DecodeError;
use crate::header::CarIndex;
use crate::layout::{Encoding, FieldSpec};

/// Read-only view over one region of a datagram (the header or a single
/// car block). Every read is bounds-checked against the region, never
/// against the whole datagram.
#[derive(Debug, Clone, Copy)]
pub struct BlockReader<'a> {
    data: &'a [u8],
}

impl<'a> BlockReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Locate the block for `car_index` in a multi-car packet.
    ///
    /// The block starts at `header_len + block_size * car_index`. The whole
    /// block must be present in `buffer`, not only the fields that are read.
    ///
    /// # Errors
    ///
    /// [`DecodeError::BufferTooShort`] when `buffer` ends before the block
    /// does, [`DecodeError::OffsetOverflow`] if the offsets overflow.
    pub fn locate(
        buffer: &'a [u8],
        header_len: usize,
        block_size: usize,
        car_index: CarIndex,
        packet_id: u8,
    ) -> Result<Self, DecodeError> {
        let overflow = || DecodeError::OffsetOverflow {
            block_size,
            index: car_index.get(),
        };
        let start = block_size
            .checked_mul(car_index.as_usize())
            .and_then(|offset| offset.checked_add(header_len))
            .ok_or_else(overflow)?;
        let end = start.checked_add(block_size).ok_or_else(overflow)?;
        let data = buffer
            .get(start..end)
            .ok_or(DecodeError::BufferTooShort {
                packet_id,
                needed: end,
                actual: buffer.len(),
            })?;
        Ok(Self { data })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn field(&self, spec: FieldSpec, requested: Encoding) -> Result<&'a [u8], DecodeError> {
        if spec.encoding != requested {
            return Err(DecodeError::EncodingMismatch {
                offset: spec.offset,
                declared: spec.encoding,
                requested,
            });
        }
        let out_of_bounds = DecodeError::FieldOutOfBounds {
            offset: spec.offset,
            width: spec.width(),
            available: self.data.len(),
        };
        let end = spec.end().ok_or_else(|| out_of_bounds.clone())?;
        self.data.get(spec.offset..end).ok_or(out_of_bounds)
    }

    fn array<const N: usize>(
        &self,
        spec: FieldSpec,
        requested: Encoding,
    ) -> Result<[u8; N], DecodeError> {
        let bytes = self.field(spec, requested)?;
        let mut out = [0u8; N];
        if bytes.len() != N {
            return Err(DecodeError::FieldOutOfBounds {
                offset: spec.offset,
                width: N,
                available: bytes.len(),
            });
        }
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// # Errors
    ///
    /// Fails if `spec` is not a `U8` field inside this region.
    pub fn u8(&self, spec: FieldSpec) -> Result<u8, DecodeError> {
        self.array::<1>(spec, Encoding::U8).map(|[b]| b)
    }

    /// # Errors
    ///
    /// Fails if `spec` is not an `I8` field inside this region.
    pub fn i8(&self, spec: FieldSpec) -> Result<i8, DecodeError> {
        self.array::<1>(spec, Encoding::I8).map(i8::from_le_bytes)
    }

    /// A `U8` flag where any non-zero value is `true`.
    ///
    /// # Errors
    ///
    /// Fails if `spec` is not a `U8` field inside this region.
    pub fn flag(&self, spec: FieldSpec) -> Result<bool, DecodeError> {
        self.u8(spec).map(|b| b != 0)
    }

    /// # Errors
    ///
    /// Fails if `spec` is not a `U16Le` field inside this region.
    pub fn u16_le(&self, spec: FieldSpec) -> Result<u16, DecodeError> {
        self.array::<2>(spec, Encoding::U16Le).map(u16::from_le_bytes)
    }

    /// Raw IEEE-754 value; NaN and infinities are passed through.
    ///
    /// # Errors
    ///
    /// Fails if `spec` is not an `F32Le` field inside this region.
    pub fn f32_le(&self, spec: FieldSpec) -> Result<f32, DecodeError> {
        self.array::<4>(spec, Encoding::F32Le).map(f32::from_le_bytes)
    }

    /// # Errors
    ///
    /// Fails if `spec` is not a `U8Array(N)` field inside this region.
    pub fn u8_array<const N: usize>(&self, spec: FieldSpec) -> Result<[u8; N], DecodeError> {
        self.array::<N>(spec, Encoding::U8Array(N))
    }
}
