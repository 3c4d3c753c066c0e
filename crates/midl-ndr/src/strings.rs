//! NDR string types
//!
//! `[string] wchar_t*` values are conformant varying arrays of UTF-16 code
//! units, terminated by a zero unit that is counted in both the maximum and
//! the actual count:
//!
//! ```text
//! max_count: u32 | offset: u32 (0) | actual_count: u32 | units... | 0x0000
//! ```
//!
//! A Rust `String` encodes as such a (reference) string. An absent string is
//! `Option<String>`, which adds the unique-pointer referent in front.

use crate::error::MAX_NDR_ALLOCATION_SIZE;
use crate::{NdrContext, NdrDecode, NdrEncode, NdrError, Result};
use bytes::{Buf, BufMut};

impl NdrEncode for String {
    fn ndr_encode<B: BufMut>(&self, buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<()> {
        encode_wide(self, buf, ctx, position)
    }

    fn ndr_align() -> usize {
        4
    }
}

impl NdrDecode for String {
    fn ndr_decode<B: Buf>(buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<Self> {
        decode_wide(buf, ctx, position)
    }

    fn ndr_align() -> usize {
        4
    }
}

/// Encode `s` as a null-terminated conformant varying UTF-16 string.
pub fn encode_wide<B: BufMut>(s: &str, buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<()> {
    let units: Vec<u16> = s.encode_utf16().collect();
    let count = u32::try_from(units.len() + 1).map_err(|_| NdrError::IntegerOverflow)?;

    ctx.write_align(buf, position, 4);
    ctx.put_u32(buf, count);
    ctx.put_u32(buf, 0);
    ctx.put_u32(buf, count);
    *position += 12;

    for unit in units {
        ctx.put_u16(buf, unit);
    }
    ctx.put_u16(buf, 0);
    *position += count as usize * 2;
    Ok(())
}

/// Decode a conformant varying UTF-16 string, dropping the terminator.
pub fn decode_wide<B: Buf>(buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<String> {
    ctx.read_align(buf, position, 4, 12)?;
    let max_count = ctx.get_u32(buf);
    let offset = ctx.get_u32(buf);
    let actual_count = ctx.get_u32(buf);
    *position += 12;

    if offset != 0 {
        return Err(NdrError::InvalidString(format!("non-zero offset {}", offset)));
    }
    if actual_count > max_count {
        return Err(NdrError::ConformanceMismatch {
            max_count,
            offset,
            actual_count,
        });
    }

    let byte_count = (actual_count as usize)
        .checked_mul(2)
        .ok_or(NdrError::IntegerOverflow)?;
    if byte_count > buf.remaining() {
        return Err(NdrError::SizeOverflow {
            field: "string",
            size: u64::from(actual_count),
            remaining: buf.remaining(),
        });
    }
    if byte_count > MAX_NDR_ALLOCATION_SIZE {
        return Err(NdrError::AllocationLimitExceeded {
            requested: byte_count,
            limit: MAX_NDR_ALLOCATION_SIZE,
        });
    }

    let mut units = Vec::with_capacity(actual_count as usize);
    for _ in 0..actual_count {
        units.push(ctx.get_u16(buf));
    }
    *position += byte_count;

    if units.last() == Some(&0) {
        units.pop();
    }

    // Unpaired surrogates become U+FFFD rather than failing the stub.
    Ok(String::from_utf16_lossy(&units))
}
