//! NDR array types
//!
//! NDR supports several array types:
//!
//! - Conformant arrays: `max_count` transmitted as prefix, then the elements
//! - Varying arrays: `offset` and `actual_count` transmitted, then that many
//!   elements
//! - Conformant varying arrays: both headers, `max_count` first
//!
//! A `Vec<T>` encodes as a conformant array sized by its own length. Arrays
//! whose dimensions come from other fields (`size_is`, `length_is`) go
//! through the `encode_conformant*`/`decode_conformant*` helpers, which the
//! declaring structure calls with the correlated values.

use crate::error::{MAX_NDR_ALLOCATION_SIZE, MAX_NDR_ARRAY_ELEMENTS};
use crate::{NdrContext, NdrDecode, NdrEncode, NdrError, Result};
use bytes::{Buf, BufMut};

impl<T: NdrEncode + Default> NdrEncode for Vec<T> {
    fn ndr_encode<B: BufMut>(&self, buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<()> {
        let count = u32::try_from(self.len()).map_err(|_| NdrError::IntegerOverflow)?;
        encode_conformance(buf, ctx, count, position);
        encode_elements(self, self.len(), buf, ctx, position)
    }

    fn ndr_encode_deferred<B: BufMut>(&self, buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<()> {
        encode_elements_deferred(self, self.len(), buf, ctx, position)
    }

    fn ndr_prepare(&mut self) -> Result<()> {
        self.iter_mut().try_for_each(|element| element.ndr_prepare())
    }

    fn ndr_align() -> usize {
        4 // For max_count
    }
}

impl<T: NdrDecode> NdrDecode for Vec<T> {
    fn ndr_decode<B: Buf>(buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<Self> {
        let max_count = decode_conformance(buf, ctx, position)?;
        let count = check_count::<T, B>("array", u64::from(max_count), buf)?;
        decode_elements(count, buf, ctx, position)
    }

    fn ndr_decode_deferred<B: Buf>(&mut self, buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<()> {
        for element in self.iter_mut() {
            element.ndr_decode_deferred(buf, ctx, position)?;
        }
        Ok(())
    }

    fn ndr_align() -> usize {
        4
    }
}

/// Encode conformance (max_count) for conformant arrays
pub fn encode_conformance<B: BufMut>(buf: &mut B, ctx: &NdrContext, max_count: u32, position: &mut usize) {
    ctx.write_align(buf, position, 4);
    ctx.put_u32(buf, max_count);
    *position += 4;
}

/// Decode conformance (max_count) for conformant arrays
pub fn decode_conformance<B: Buf>(buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<u32> {
    ctx.read_align(buf, position, 4, 4)?;
    let max_count = ctx.get_u32(buf);
    *position += 4;
    Ok(max_count)
}

/// Encode a `[size_is(size)]` array: `max_count = size`, followed by exactly
/// `size` elements. Elements beyond the slice are written as `T::default()`
/// and excess slice elements are cut off.
pub fn encode_conformant<T, B>(
    elements: &[T],
    size: u32,
    buf: &mut B,
    ctx: &NdrContext,
    position: &mut usize,
) -> Result<()>
where
    T: NdrEncode + Default,
    B: BufMut,
{
    encode_conformance(buf, ctx, size, position);
    encode_elements(elements, size as usize, buf, ctx, position)?;
    encode_elements_deferred(elements, size as usize, buf, ctx, position)
}

/// Encode a `[size_is(size), length_is(length)]` array:
/// `max_count = size`, `offset = 0`, `actual_count = min(length, size)`,
/// followed by `actual_count` elements (default-padded like
/// [`encode_conformant`]).
pub fn encode_conformant_varying<T, B>(
    elements: &[T],
    size: u32,
    length: u32,
    buf: &mut B,
    ctx: &NdrContext,
    position: &mut usize,
) -> Result<()>
where
    T: NdrEncode + Default,
    B: BufMut,
{
    let actual_count = length.min(size);
    encode_conformance(buf, ctx, size, position);
    ctx.put_u32(buf, 0);
    ctx.put_u32(buf, actual_count);
    *position += 8;
    encode_elements(elements, actual_count as usize, buf, ctx, position)?;
    encode_elements_deferred(elements, actual_count as usize, buf, ctx, position)
}

/// Decode a `[size_is(..)]` array.
///
/// `size_hint` is the current value of the correlated size field. When the
/// transmitted `max_count` is zero but the hint is not, the hint is used as
/// the element count.
pub fn decode_conformant<T, B>(
    field: &'static str,
    size_hint: u32,
    buf: &mut B,
    ctx: &NdrContext,
    position: &mut usize,
) -> Result<Vec<T>>
where
    T: NdrDecode,
    B: Buf,
{
    let mut max_count = decode_conformance(buf, ctx, position)?;
    if max_count == 0 && size_hint > 0 {
        max_count = size_hint;
    }
    let count = check_count::<T, B>(field, u64::from(max_count), buf)?;
    let mut elements = decode_elements(count, buf, ctx, position)?;
    elements.ndr_decode_deferred(buf, ctx, position)?;
    Ok(elements)
}

/// Decode a `[size_is(..), length_is(..)]` array, returning only the
/// transmitted elements.
///
/// The conformant maximum may legitimately exceed what is left in the
/// stub (an output buffer of capacity `size` carrying fewer bytes), so the
/// overflow check applies to `actual_count`.
pub fn decode_conformant_varying<T, B>(
    field: &'static str,
    size_hint: u32,
    buf: &mut B,
    ctx: &NdrContext,
    position: &mut usize,
) -> Result<Vec<T>>
where
    T: NdrDecode,
    B: Buf,
{
    let mut max_count = decode_conformance(buf, ctx, position)?;
    if max_count == 0 && size_hint > 0 {
        max_count = size_hint;
    }
    ctx.read_align(buf, position, 4, 8)?;
    let offset = ctx.get_u32(buf);
    let actual_count = ctx.get_u32(buf);
    *position += 8;

    if u64::from(offset) + u64::from(actual_count) > u64::from(max_count) {
        return Err(NdrError::ConformanceMismatch {
            max_count,
            offset,
            actual_count,
        });
    }

    let count = check_count::<T, B>(field, u64::from(actual_count), buf)?;
    let mut elements = decode_elements(count, buf, ctx, position)?;
    elements.ndr_decode_deferred(buf, ctx, position)?;
    Ok(elements)
}

fn encode_elements<T, B>(elements: &[T], count: usize, buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<()>
where
    T: NdrEncode + Default,
    B: BufMut,
{
    for element in elements.iter().take(count) {
        element.ndr_encode(buf, ctx, position)?;
    }
    if elements.len() < count {
        check_padding::<T>(count)?;
        let filler = T::default();
        for _ in elements.len()..count {
            filler.ndr_encode(buf, ctx, position)?;
        }
    }
    Ok(())
}

/// Bound the default-filled tail a caller-set size would make us write.
fn check_padding<T>(count: usize) -> Result<()> {
    if count > MAX_NDR_ARRAY_ELEMENTS {
        return Err(NdrError::AllocationLimitExceeded {
            requested: count,
            limit: MAX_NDR_ARRAY_ELEMENTS,
        });
    }
    let bytes = count
        .checked_mul(std::mem::size_of::<T>().max(1))
        .ok_or(NdrError::IntegerOverflow)?;
    if bytes > MAX_NDR_ALLOCATION_SIZE {
        return Err(NdrError::AllocationLimitExceeded {
            requested: bytes,
            limit: MAX_NDR_ALLOCATION_SIZE,
        });
    }
    Ok(())
}

fn encode_elements_deferred<T, B>(
    elements: &[T],
    count: usize,
    buf: &mut B,
    ctx: &NdrContext,
    position: &mut usize,
) -> Result<()>
where
    T: NdrEncode,
    B: BufMut,
{
    // Default filler elements carry no pointees
    for element in elements.iter().take(count) {
        element.ndr_encode_deferred(buf, ctx, position)?;
    }
    Ok(())
}

fn decode_elements<T: NdrDecode, B: Buf>(
    count: usize,
    buf: &mut B,
    ctx: &NdrContext,
    position: &mut usize,
) -> Result<Vec<T>> {
    let mut elements = Vec::with_capacity(count);
    for _ in 0..count {
        elements.push(T::ndr_decode(buf, ctx, position)?);
    }
    Ok(elements)
}

/// Sanity-check a transmitted element count before allocating for it.
///
/// Every element occupies at least one byte, so a count larger than the
/// remaining stub length can only come from a corrupt or hostile peer.
pub fn check_count<T, B: Buf>(field: &'static str, count: u64, buf: &B) -> Result<usize> {
    if count > buf.remaining() as u64 {
        return Err(NdrError::SizeOverflow {
            field,
            size: count,
            remaining: buf.remaining(),
        });
    }
    let count = count as usize;
    if count > MAX_NDR_ARRAY_ELEMENTS {
        return Err(NdrError::AllocationLimitExceeded {
            requested: count,
            limit: MAX_NDR_ARRAY_ELEMENTS,
        });
    }
    let bytes = count
        .checked_mul(std::mem::size_of::<T>().max(1))
        .ok_or(NdrError::IntegerOverflow)?;
    if bytes > MAX_NDR_ALLOCATION_SIZE {
        return Err(NdrError::AllocationLimitExceeded {
            requested: bytes,
            limit: MAX_NDR_ALLOCATION_SIZE,
        });
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode_complete, encode_complete};
    use bytes::BytesMut;

    #[test]
    fn test_conformant_array() {
        let ctx = NdrContext::new();
        let arr: Vec<u16> = vec![1, 2, 3];

        let mut buf = BytesMut::new();
        let mut pos = 0;
        encode_complete(&arr, &mut buf, &ctx, &mut pos).unwrap();
        assert_eq!(&buf[..], &[3, 0, 0, 0, 1, 0, 2, 0, 3, 0]);

        let mut reader = buf.freeze();
        let mut pos = 0;
        let decoded: Vec<u16> = decode_complete(&mut reader, &ctx, &mut pos).unwrap();
        assert_eq!(decoded, arr);
    }

    #[test]
    fn test_empty_conformant_array() {
        let ctx = NdrContext::new();
        let arr: Vec<u32> = vec![];

        let mut buf = BytesMut::new();
        let mut pos = 0;
        encode_complete(&arr, &mut buf, &ctx, &mut pos).unwrap();
        assert_eq!(&buf[..], &[0, 0, 0, 0]);

        let mut reader = buf.freeze();
        let mut pos = 0;
        let decoded: Vec<u32> = decode_complete(&mut reader, &ctx, &mut pos).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_array_of_unique_strings_defers_bodies() {
        let ctx = NdrContext::new();
        let arr = vec![Some("a".to_string()), None, Some("b".to_string())];

        let mut buf = BytesMut::new();
        let mut pos = 0;
        encode_complete(&arr, &mut buf, &ctx, &mut pos).unwrap();

        // max_count, three referents, then the two bodies
        assert_eq!(&buf[..4], &[3, 0, 0, 0]);
        assert_eq!(&buf[4..16], &[0, 0, 2, 0, 0, 0, 0, 0, 4, 0, 2, 0]);
        assert_eq!(&buf[16..28], &[2, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0]);
        assert_eq!(&buf[28..32], &[b'a', 0, 0, 0]);

        let mut reader = buf.freeze();
        let mut pos = 0;
        let decoded: Vec<Option<String>> = decode_complete(&mut reader, &ctx, &mut pos).unwrap();
        assert_eq!(decoded, arr);
    }

    #[test]
    fn test_conformant_pads_to_declared_size() {
        let ctx = NdrContext::new();
        let mut buf = BytesMut::new();
        let mut pos = 0;
        encode_conformant(&[0xAAu8, 0xBB], 5, &mut buf, &ctx, &mut pos).unwrap();
        assert_eq!(&buf[..], &[5, 0, 0, 0, 0xAA, 0xBB, 0, 0, 0]);

        let mut reader = buf.freeze();
        let mut pos = 0;
        let decoded: Vec<u8> = decode_conformant("data", 0, &mut reader, &ctx, &mut pos).unwrap();
        assert_eq!(decoded, vec![0xAA, 0xBB, 0, 0, 0]);
    }

    #[test]
    fn test_conformant_truncates_to_declared_size() {
        let ctx = NdrContext::new();
        let mut buf = BytesMut::new();
        let mut pos = 0;
        encode_conformant(&[1u8, 2, 3, 4], 2, &mut buf, &ctx, &mut pos).unwrap();
        assert_eq!(&buf[..], &[2, 0, 0, 0, 1, 2]);
    }

    #[test]
    fn test_padding_to_huge_size_rejected() {
        let ctx = NdrContext::new();
        let mut buf = BytesMut::new();
        let mut pos = 0;
        let err = encode_conformant(&[1u8, 2], 0xFFFF_FFFE, &mut buf, &ctx, &mut pos).unwrap_err();
        assert!(matches!(
            err,
            NdrError::AllocationLimitExceeded { requested: 0xFFFF_FFFE, limit: MAX_NDR_ARRAY_ELEMENTS }
        ));
        assert_eq!(buf.len(), 6);

        let mut buf = BytesMut::new();
        let mut pos = 0;
        let wide = [0u32; 1];
        let err = encode_conformant_varying(&wide, 0x0030_0000, 0x0030_0000, &mut buf, &ctx, &mut pos).unwrap_err();
        assert!(matches!(err, NdrError::AllocationLimitExceeded { .. }));
    }

    #[test]
    fn test_conformant_varying_header() {
        let ctx = NdrContext::new();
        let mut buf = BytesMut::new();
        let mut pos = 0;
        encode_conformant_varying(&[1u8, 2, 3], 16, 3, &mut buf, &ctx, &mut pos).unwrap();
        assert_eq!(
            &buf[..],
            &[16, 0, 0, 0, 0, 0, 0, 0, 3, 0, 0, 0, 1, 2, 3]
        );

        let mut reader = buf.freeze();
        let mut pos = 0;
        let decoded: Vec<u8> = decode_conformant_varying("out", 0, &mut reader, &ctx, &mut pos).unwrap();
        assert_eq!(decoded, vec![1, 2, 3]);
    }

    #[test]
    fn test_zero_size_hint_fallback() {
        let ctx = NdrContext::new();
        let mut buf = BytesMut::new();
        ctx.put_u32(&mut buf, 0);
        buf.put_slice(&[7, 8]);

        let mut reader = buf.freeze();
        let mut pos = 0;
        let decoded: Vec<u8> = decode_conformant("data", 2, &mut reader, &ctx, &mut pos).unwrap();
        assert_eq!(decoded, vec![7, 8]);
    }

    #[test]
    fn test_oversized_count_rejected() {
        let ctx = NdrContext::new();
        let mut buf = BytesMut::new();
        ctx.put_u32(&mut buf, 0xFFFF_FFF0);
        buf.put_slice(&[0; 8]);

        let mut reader = buf.freeze();
        let mut pos = 0;
        let err = decode_conformant::<u8, _>("lpData", 0, &mut reader, &ctx, &mut pos).unwrap_err();
        assert!(matches!(
            err,
            NdrError::SizeOverflow { field: "lpData", size: 0xFFFF_FFF0, remaining: 8 }
        ));
        assert!(err.to_string().contains("lpData"));
    }

    #[test]
    fn test_varying_beyond_max_rejected() {
        let ctx = NdrContext::new();
        let mut buf = BytesMut::new();
        ctx.put_u32(&mut buf, 2);
        ctx.put_u32(&mut buf, 0);
        ctx.put_u32(&mut buf, 3);
        buf.put_slice(&[1, 2, 3]);

        let mut reader = buf.freeze();
        let mut pos = 0;
        assert!(matches!(
            decode_conformant_varying::<u8, _>("out", 0, &mut reader, &ctx, &mut pos),
            Err(NdrError::ConformanceMismatch { max_count: 2, actual_count: 3, .. })
        ));
    }
}
