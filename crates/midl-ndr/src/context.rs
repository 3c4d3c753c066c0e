//! NDR encoding/decoding context
//!
//! The context tracks byte order and the unique-pointer referent counter for
//! one stub, and provides helpers for alignment and primitive encoding/decoding.

use std::cell::Cell;

use bytes::{Buf, BufMut};

use crate::error::{NdrError, Result};

/// First referent ID handed out for a non-null unique pointer.
pub const FIRST_REFERENT_ID: u32 = 0x0002_0000;

/// NDR encoding/decoding context
///
/// One context is created per marshaled stub. It is not shared between
/// calls: referent IDs restart for every stub.
#[derive(Debug, Clone)]
pub struct NdrContext {
    /// Whether to use little-endian byte order
    pub little_endian: bool,
    next_referent: Cell<u32>,
}

impl NdrContext {
    /// Create a new NDR context with little-endian byte order (default)
    pub fn new() -> Self {
        Self::with_byte_order(true)
    }

    /// Create a context with big-endian byte order
    pub fn big_endian() -> Self {
        Self::with_byte_order(false)
    }

    /// Create a context with specified byte order
    pub fn with_byte_order(little_endian: bool) -> Self {
        Self {
            little_endian,
            next_referent: Cell::new(FIRST_REFERENT_ID),
        }
    }

    /// Allocate the referent ID for the next non-null unique pointer.
    pub fn next_referent(&self) -> u32 {
        let id = self.next_referent.get();
        self.next_referent.set(id.wrapping_add(4));
        id
    }

    /// Calculate padding needed to align to the given boundary
    #[inline]
    pub fn align_padding(position: usize, alignment: usize) -> usize {
        if alignment <= 1 {
            return 0;
        }
        let remainder = position % alignment;
        if remainder == 0 {
            0
        } else {
            alignment - remainder
        }
    }

    /// Write zero padding up to the given boundary and advance `position`.
    pub fn write_align<B: BufMut>(&self, buf: &mut B, position: &mut usize, alignment: usize) {
        let padding = Self::align_padding(*position, alignment);
        buf.put_bytes(0, padding);
        *position += padding;
    }

    /// Skip padding up to the given boundary, then make sure `needed` more
    /// bytes are available.
    pub fn read_align<B: Buf>(
        &self,
        buf: &mut B,
        position: &mut usize,
        alignment: usize,
        needed: usize,
    ) -> Result<()> {
        let padding = Self::align_padding(*position, alignment);
        if buf.remaining() < padding + needed {
            return Err(NdrError::underflow(padding + needed, buf.remaining()));
        }
        buf.advance(padding);
        *position += padding;
        Ok(())
    }

    // Primitive encoding methods

    /// Put a u16
    #[inline]
    pub fn put_u16<B: BufMut>(&self, buf: &mut B, value: u16) {
        if self.little_endian {
            buf.put_u16_le(value);
        } else {
            buf.put_u16(value);
        }
    }

    /// Put a u32
    #[inline]
    pub fn put_u32<B: BufMut>(&self, buf: &mut B, value: u32) {
        if self.little_endian {
            buf.put_u32_le(value);
        } else {
            buf.put_u32(value);
        }
    }

    /// Put an i32
    #[inline]
    pub fn put_i32<B: BufMut>(&self, buf: &mut B, value: i32) {
        if self.little_endian {
            buf.put_i32_le(value);
        } else {
            buf.put_i32(value);
        }
    }

    /// Put a u64
    #[inline]
    pub fn put_u64<B: BufMut>(&self, buf: &mut B, value: u64) {
        if self.little_endian {
            buf.put_u64_le(value);
        } else {
            buf.put_u64(value);
        }
    }

    // Primitive decoding methods

    /// Get a u16
    #[inline]
    pub fn get_u16<B: Buf>(&self, buf: &mut B) -> u16 {
        if self.little_endian {
            buf.get_u16_le()
        } else {
            buf.get_u16()
        }
    }

    /// Get a u32
    #[inline]
    pub fn get_u32<B: Buf>(&self, buf: &mut B) -> u32 {
        if self.little_endian {
            buf.get_u32_le()
        } else {
            buf.get_u32()
        }
    }

    /// Get an i32
    #[inline]
    pub fn get_i32<B: Buf>(&self, buf: &mut B) -> i32 {
        if self.little_endian {
            buf.get_i32_le()
        } else {
            buf.get_i32()
        }
    }

    /// Get a u64
    #[inline]
    pub fn get_u64<B: Buf>(&self, buf: &mut B) -> u64 {
        if self.little_endian {
            buf.get_u64_le()
        } else {
            buf.get_u64()
        }
    }
}

impl Default for NdrContext {
    fn default() -> Self {
        Self::new()
    }
}
