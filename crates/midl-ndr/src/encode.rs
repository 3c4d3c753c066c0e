//! NDR encoding trait

use crate::{NdrContext, Result};
use bytes::BufMut;

/// Trait for types that can be encoded to NDR format
///
/// Encoding is two-phase. `ndr_encode` writes the inline representation
/// (scalars, referent IDs of embedded pointers), `ndr_encode_deferred`
/// writes the pointee bodies of those embedded pointers. A containing
/// structure emits every member's inline part before any member's deferred
/// part.
pub trait NdrEncode {
    /// Encode this value to the buffer at the current position.
    ///
    /// The `position` parameter tracks the current byte offset from the start
    /// of the stub data, which is needed for alignment calculations.
    fn ndr_encode<B: BufMut>(&self, buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<()>;

    /// Encode the pointee bodies deferred by `ndr_encode`, in member order.
    fn ndr_encode_deferred<B: BufMut>(
        &self,
        _buf: &mut B,
        _ctx: &NdrContext,
        _position: &mut usize,
    ) -> Result<()> {
        Ok(())
    }

    /// Normalize correlation fields before marshaling: fill zero size and
    /// length fields from the slices they describe, and check `[range]`
    /// constraints.
    fn ndr_prepare(&mut self) -> Result<()> {
        Ok(())
    }

    /// Get the NDR alignment requirement for this type
    fn ndr_align() -> usize
    where
        Self: Sized,
    {
        1
    }
}

/// Encode a value and flush its deferred pointees right behind it.
///
/// This is how top-level parameters and pointee bodies are written.
pub fn encode_complete<T: NdrEncode + ?Sized, B: BufMut>(
    value: &T,
    buf: &mut B,
    ctx: &NdrContext,
    position: &mut usize,
) -> Result<()> {
    value.ndr_encode(buf, ctx, position)?;
    value.ndr_encode_deferred(buf, ctx, position)
}
