//! NDR pointer types
//!
//! NDR supports three pointer semantics:
//!
//! - Reference (`[ref]`): Non-null, no wire representation. A reference
//!   parameter is written as its bare pointee, so the Rust type is just `T`.
//! - Unique (`[unique]`): Nullable, 4-byte referent ID. Modeled as `Option<T>`.
//! - Full (`[ptr]`): Nullable with aliasing. On the wire a full pointer that
//!   is never aliased is indistinguishable from a unique one.
//!
//! The referent ID of an embedded unique pointer is written inline; the
//! pointee body is deferred until the enclosing structure (or the top-level
//! parameter) has written all of its inline members.

use crate::decode::decode_complete;
use crate::encode::encode_complete;
use crate::{NdrContext, NdrDecode, NdrEncode, Result};
use bytes::{Buf, BufMut};

/// Write the referent ID of a unique pointer: a fresh nonzero ID when
/// `present`, zero otherwise.
pub fn encode_referent<B: BufMut>(present: bool, buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<()> {
    let referent = if present { ctx.next_referent() } else { 0 };
    referent.ndr_encode(buf, ctx, position)
}

/// Read the referent ID of a unique pointer and report whether a pointee
/// body follows in the deferred region.
pub fn decode_referent<B: Buf>(buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<bool> {
    Ok(u32::ndr_decode(buf, ctx, position)? != 0)
}

impl<T: NdrEncode> NdrEncode for Option<T> {
    fn ndr_encode<B: BufMut>(&self, buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<()> {
        encode_referent(self.is_some(), buf, ctx, position)
    }

    fn ndr_encode_deferred<B: BufMut>(&self, buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<()> {
        match self {
            Some(value) => encode_complete(value, buf, ctx, position),
            None => Ok(()),
        }
    }

    fn ndr_prepare(&mut self) -> Result<()> {
        match self {
            Some(value) => value.ndr_prepare(),
            None => Ok(()),
        }
    }

    fn ndr_align() -> usize {
        4 // For referent ID
    }
}

impl<T: NdrDecode + Default> NdrDecode for Option<T> {
    fn ndr_decode<B: Buf>(buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<Self> {
        // The body arrives in the deferred pass; keep a placeholder until then
        Ok(decode_referent(buf, ctx, position)?.then(T::default))
    }

    fn ndr_decode_deferred<B: Buf>(&mut self, buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<()> {
        if let Some(value) = self {
            *value = decode_complete(buf, ctx, position)?;
        }
        Ok(())
    }

    fn ndr_align() -> usize {
        4
    }
}
