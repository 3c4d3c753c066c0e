//! NDR primitive type implementations
//!
//! NDR primitive types and their encodings:
//!
//! | MIDL Type      | Rust Type | Size | Alignment |
//! |----------------|-----------|------|-----------|
//! | boolean        | bool      | 1    | 1         |
//! | BOOL           | bool      | 4    | 4         |
//! | byte/UCHAR     | u8        | 1    | 1         |
//! | WORD/wchar_t   | u16       | 2    | 2         |
//! | long           | i32       | 4    | 4         |
//! | DWORD          | u32       | 4    | 4         |
//! | unsigned hyper | u64       | 8    | 8         |
//! | GUID           | NdrUuid   | 16   | 4         |
//!
//! `BOOL` shares the Rust `bool` type with `boolean`, so it is written through
//! [`encode_bool32`]/[`decode_bool32`] by the declaring structure.

use crate::{NdrContext, NdrDecode, NdrEncode, NdrError, Result};
use bytes::{Buf, BufMut};

// Macro to implement NdrEncode/NdrDecode for primitive types
macro_rules! impl_ndr_primitive {
    ($ty:ty, $size:expr, $put:ident, $get:ident) => {
        impl NdrEncode for $ty {
            fn ndr_encode<B: BufMut>(&self, buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<()> {
                ctx.write_align(buf, position, $size);
                ctx.$put(buf, *self);
                *position += $size;
                Ok(())
            }

            fn ndr_align() -> usize {
                $size
            }
        }

        impl NdrDecode for $ty {
            fn ndr_decode<B: Buf>(buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<Self> {
                ctx.read_align(buf, position, $size, $size)?;
                let value = ctx.$get(buf);
                *position += $size;
                Ok(value)
            }

            fn ndr_align() -> usize {
                $size
            }
        }
    };
}

impl_ndr_primitive!(u16, 2, put_u16, get_u16);
impl_ndr_primitive!(u32, 4, put_u32, get_u32);
impl_ndr_primitive!(i32, 4, put_i32, get_i32);
impl_ndr_primitive!(u64, 8, put_u64, get_u64);

impl NdrEncode for u8 {
    fn ndr_encode<B: BufMut>(&self, buf: &mut B, _ctx: &NdrContext, position: &mut usize) -> Result<()> {
        buf.put_u8(*self);
        *position += 1;
        Ok(())
    }
}

impl NdrDecode for u8 {
    fn ndr_decode<B: Buf>(buf: &mut B, _ctx: &NdrContext, position: &mut usize) -> Result<Self> {
        if buf.remaining() < 1 {
            return Err(NdrError::underflow(1, buf.remaining()));
        }
        *position += 1;
        Ok(buf.get_u8())
    }
}

/// NDR boolean - encoded as a single byte (0x00 = false, 0x01 = true)
impl NdrEncode for bool {
    fn ndr_encode<B: BufMut>(&self, buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<()> {
        u8::from(*self).ndr_encode(buf, ctx, position)
    }
}

impl NdrDecode for bool {
    fn ndr_decode<B: Buf>(buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<Self> {
        Ok(u8::ndr_decode(buf, ctx, position)? != 0)
    }
}

/// Write a `BOOL` flag: a 32-bit integer, 0 or 1.
pub fn encode_bool32<B: BufMut>(value: bool, buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<()> {
    u32::from(value).ndr_encode(buf, ctx, position)
}

/// Read a `BOOL` flag. Any nonzero value is true.
pub fn decode_bool32<B: Buf>(buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<bool> {
    Ok(u32::ndr_decode(buf, ctx, position)? != 0)
}

/// Check a `[range(min, max)]` constrained value.
pub fn check_range(field: &'static str, value: u64, min: u64, max: u64) -> Result<()> {
    if value < min || value > max {
        return Err(NdrError::OutOfRange { field, value, min, max });
    }
    Ok(())
}

/// GUID/UUID type for NDR encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NdrUuid {
    pub data1: u32,
    pub data2: u16,
    pub data3: u16,
    pub data4: [u8; 8],
}

impl NdrUuid {
    /// Nil UUID
    pub const NIL: Self = Self {
        data1: 0,
        data2: 0,
        data3: 0,
        data4: [0; 8],
    };

    /// Parse from string "xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx"
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().trim_start_matches('{').trim_end_matches('}');
        if s.len() != 36 {
            return None;
        }
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 5 || parts[3].len() != 4 || parts[4].len() != 12 {
            return None;
        }

        let data1 = u32::from_str_radix(parts[0], 16).ok()?;
        let data2 = u16::from_str_radix(parts[1], 16).ok()?;
        let data3 = u16::from_str_radix(parts[2], 16).ok()?;
        let clock = u16::from_str_radix(parts[3], 16).ok()?;

        let mut data4 = [0u8; 8];
        data4[..2].copy_from_slice(&clock.to_be_bytes());
        for (i, byte) in data4[2..].iter_mut().enumerate() {
            *byte = u8::from_str_radix(parts[4].get(i * 2..i * 2 + 2)?, 16).ok()?;
        }

        Some(Self { data1, data2, data3, data4 })
    }

    pub fn is_nil(&self) -> bool {
        *self == Self::NIL
    }
}

impl std::fmt::Display for NdrUuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            self.data1,
            self.data2,
            self.data3,
            self.data4[0],
            self.data4[1],
            self.data4[2],
            self.data4[3],
            self.data4[4],
            self.data4[5],
            self.data4[6],
            self.data4[7],
        )
    }
}

impl NdrEncode for NdrUuid {
    fn ndr_encode<B: BufMut>(&self, buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<()> {
        ctx.write_align(buf, position, 4);
        ctx.put_u32(buf, self.data1);
        ctx.put_u16(buf, self.data2);
        ctx.put_u16(buf, self.data3);
        buf.put_slice(&self.data4);
        *position += 16;
        Ok(())
    }

    fn ndr_align() -> usize {
        4
    }
}

impl NdrDecode for NdrUuid {
    fn ndr_decode<B: Buf>(buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<Self> {
        ctx.read_align(buf, position, 4, 16)?;
        let data1 = ctx.get_u32(buf);
        let data2 = ctx.get_u16(buf);
        let data3 = ctx.get_u16(buf);
        let mut data4 = [0u8; 8];
        buf.copy_to_slice(&mut data4);
        *position += 16;

        Ok(Self { data1, data2, data3, data4 })
    }

    fn ndr_align() -> usize {
        4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn test_bool_is_one_byte_bool32_is_four() {
        let ctx = NdrContext::new();
        let mut buf = BytesMut::new();
        let mut pos = 0;

        true.ndr_encode(&mut buf, &ctx, &mut pos).unwrap();
        encode_bool32(true, &mut buf, &ctx, &mut pos).unwrap();
        false.ndr_encode(&mut buf, &ctx, &mut pos).unwrap();

        assert_eq!(&buf[..], &[1, 0, 0, 0, 1, 0, 0, 0, 0]);

        let mut reader = buf.freeze();
        let mut pos = 0;
        assert!(bool::ndr_decode(&mut reader, &ctx, &mut pos).unwrap());
        assert!(decode_bool32(&mut reader, &ctx, &mut pos).unwrap());
        assert!(!bool::ndr_decode(&mut reader, &ctx, &mut pos).unwrap());
        assert_eq!(pos, 9);
    }

    #[test]
    fn test_alignment() {
        let ctx = NdrContext::new();
        let mut buf = BytesMut::new();
        let mut pos = 0;

        // Write a byte then a u32 (should add 3 bytes padding)
        42u8.ndr_encode(&mut buf, &ctx, &mut pos).unwrap();
        0xDEADBEEFu32.ndr_encode(&mut buf, &ctx, &mut pos).unwrap();
        7u16.ndr_encode(&mut buf, &ctx, &mut pos).unwrap();

        assert_eq!(buf.len(), 10);
        assert_eq!(pos, 10);

        let mut reader = buf.freeze();
        let mut pos = 0;
        assert_eq!(u8::ndr_decode(&mut reader, &ctx, &mut pos).unwrap(), 42);
        assert_eq!(u32::ndr_decode(&mut reader, &ctx, &mut pos).unwrap(), 0xDEADBEEF);
        assert_eq!(u16::ndr_decode(&mut reader, &ctx, &mut pos).unwrap(), 7);
    }

    #[test]
    fn test_short_read_fails() {
        let ctx = NdrContext::new();
        let mut reader = &[1u8, 2, 3][..];
        let mut pos = 0;
        let err = u32::ndr_decode(&mut reader, &ctx, &mut pos).unwrap_err();
        assert!(matches!(err, NdrError::BufferUnderflow { needed: 4, have: 3 }));
    }

    #[test]
    fn test_range_check() {
        assert!(check_range("NetworkCount", 1000, 0, 1000).is_ok());
        let err = check_range("NetworkCount", 1001, 0, 1000).unwrap_err();
        assert_eq!(err.to_string(), "NetworkCount is out of range: 1001 not in 0..=1000");
    }

    #[test]
    fn test_uuid_wire_layout() {
        let ctx = NdrContext::new();
        let uuid = NdrUuid::parse("b97db8b2-4c63-11cf-bfe6-08002be23f2f").unwrap();

        let mut buf = BytesMut::new();
        let mut pos = 0;
        uuid.ndr_encode(&mut buf, &ctx, &mut pos).unwrap();
        assert_eq!(
            &buf[..],
            &[
                0xb2, 0xb8, 0x7d, 0xb9, 0x63, 0x4c, 0xcf, 0x11, 0xbf, 0xe6, 0x08, 0x00, 0x2b,
                0xe2, 0x3f, 0x2f
            ]
        );

        let mut reader = buf.freeze();
        let mut pos = 0;
        assert_eq!(NdrUuid::ndr_decode(&mut reader, &ctx, &mut pos).unwrap(), uuid);
    }

    #[test]
    fn test_uuid_parse_display() {
        let uuid_str = "12345678-abcd-ef01-2345-6789abcdef01";
        let uuid = NdrUuid::parse(uuid_str).unwrap();
        assert_eq!(format!("{}", uuid), uuid_str);
        assert!(NdrUuid::parse("not-a-uuid").is_none());
        assert!(NdrUuid::NIL.is_nil());
    }
}
