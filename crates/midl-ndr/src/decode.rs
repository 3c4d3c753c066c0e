//! NDR decoding trait

use crate::{NdrContext, Result};
use bytes::Buf;

/// Trait for types that can be decoded from NDR format
///
/// Mirrors [`NdrEncode`](crate::NdrEncode): `ndr_decode` reads the inline
/// part and leaves placeholders for non-null embedded pointers,
/// `ndr_decode_deferred` fills those placeholders from the pointee bodies.
pub trait NdrDecode: Sized {
    /// Decode a value from the buffer at the current position.
    ///
    /// The `position` parameter tracks the current byte offset from the start
    /// of the stub data, which is needed for alignment calculations.
    fn ndr_decode<B: Buf>(buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<Self>;

    /// Read the pointee bodies deferred by `ndr_decode`, in member order.
    fn ndr_decode_deferred<B: Buf>(
        &mut self,
        _buf: &mut B,
        _ctx: &NdrContext,
        _position: &mut usize,
    ) -> Result<()> {
        Ok(())
    }

    /// Get the NDR alignment requirement for this type
    fn ndr_align() -> usize {
        1
    }
}

/// Decode a value together with its deferred pointees.
pub fn decode_complete<T: NdrDecode, B: Buf>(
    buf: &mut B,
    ctx: &NdrContext,
    position: &mut usize,
) -> Result<T> {
    let mut value = T::ndr_decode(buf, ctx, position)?;
    value.ndr_decode_deferred(buf, ctx, position)?;
    Ok(value)
}
