//! Context handles
//!
//! A context handle is the 20-byte token a server hands out for an opened
//! object:
//!
//! ```text
//! attributes: u32 | uuid: 16 bytes
//! ```
//!
//! Interfaces usually define several handle types with identical layout. The
//! `K` parameter is a zero-sized marker that keeps them apart in the type
//! system while sharing this one codec.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use bytes::{Buf, BufMut};

use crate::{NdrContext, NdrDecode, NdrEncode, NdrUuid, Result};

/// Marker for one kind of context handle.
pub trait HandleKind {
    /// IDL type name, used in diagnostics.
    const NAME: &'static str;
}

/// Wire size of a context handle.
pub const CONTEXT_HANDLE_SIZE: usize = 20;

/// Context handle of kind `K`.
///
/// `uuid` is `None` for a handle that has never been populated; it is sent
/// as the all-zero UUID. Decoding always yields `Some`.
pub struct ContextHandle<K> {
    pub attributes: u32,
    pub uuid: Option<NdrUuid>,
    kind: PhantomData<fn() -> K>,
}

impl<K> ContextHandle<K> {
    pub fn new(attributes: u32, uuid: NdrUuid) -> Self {
        Self {
            attributes,
            uuid: Some(uuid),
            kind: PhantomData,
        }
    }

    /// A handle with no UUID. Marshals as all zeroes.
    pub fn empty() -> Self {
        Self {
            attributes: 0,
            uuid: None,
            kind: PhantomData,
        }
    }

    /// True when the handle carries no object: no UUID, or the nil UUID
    /// servers return from close calls and failed opens.
    pub fn is_null(&self) -> bool {
        self.uuid.map_or(true, |uuid| uuid.is_nil())
    }

    /// The UUID as sent on the wire.
    pub fn wire_uuid(&self) -> NdrUuid {
        self.uuid.unwrap_or(NdrUuid::NIL)
    }
}

impl<K> Clone for ContextHandle<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for ContextHandle<K> {}

impl<K> Default for ContextHandle<K> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K> PartialEq for ContextHandle<K> {
    fn eq(&self, other: &Self) -> bool {
        self.attributes == other.attributes && self.uuid == other.uuid
    }
}

impl<K> Eq for ContextHandle<K> {}

impl<K> Hash for ContextHandle<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.attributes.hash(state);
        self.uuid.hash(state);
    }
}

impl<K: HandleKind> fmt::Debug for ContextHandle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(K::NAME)
            .field("attributes", &self.attributes)
            .field("uuid", &self.uuid)
            .finish()
    }
}

impl<K: HandleKind> fmt::Display for ContextHandle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:08x}:{})", K::NAME, self.attributes, self.wire_uuid())
    }
}

impl<K> NdrEncode for ContextHandle<K> {
    fn ndr_encode<B: BufMut>(&self, buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<()> {
        self.attributes.ndr_encode(buf, ctx, position)?;
        self.wire_uuid().ndr_encode(buf, ctx, position)
    }

    fn ndr_align() -> usize {
        4
    }
}

impl<K> NdrDecode for ContextHandle<K> {
    fn ndr_decode<B: Buf>(buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<Self> {
        ctx.read_align(buf, position, 4, CONTEXT_HANDLE_SIZE)?;
        let attributes = u32::ndr_decode(buf, ctx, position)?;
        let uuid = NdrUuid::ndr_decode(buf, ctx, position)?;
        Ok(Self::new(attributes, uuid))
    }

    fn ndr_align() -> usize {
        4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    struct Widget;

    impl HandleKind for Widget {
        const NAME: &'static str = "HWIDGET";
    }

    type HWidget = ContextHandle<Widget>;

    fn encode(handle: &HWidget, start: usize) -> BytesMut {
        let ctx = NdrContext::new();
        let mut buf = BytesMut::new();
        let mut pos = start;
        handle.ndr_encode(&mut buf, &ctx, &mut pos).unwrap();
        buf
    }

    #[test]
    fn test_empty_handle_matches_zero_uuid() {
        let empty = HWidget::empty();
        let zero = HWidget::new(0, NdrUuid::NIL);
        assert_eq!(encode(&empty, 0), encode(&zero, 0));
        assert_eq!(encode(&empty, 0).len(), CONTEXT_HANDLE_SIZE);
        assert!(empty.is_null());
        assert!(zero.is_null());
    }

    #[test]
    fn test_handle_aligns_to_four() {
        let handle = HWidget::new(1, NdrUuid::parse("00000001-0002-0003-0405-060708090a0b").unwrap());
        let buf = encode(&handle, 2);
        assert_eq!(buf.len(), 2 + CONTEXT_HANDLE_SIZE);
        assert_eq!(&buf[..6], &[0, 0, 1, 0, 0, 0]);
    }

    #[test]
    fn test_decode_always_populates_uuid() {
        let ctx = NdrContext::new();
        let mut reader = &[0u8; CONTEXT_HANDLE_SIZE][..];
        let mut pos = 0;
        let handle = HWidget::ndr_decode(&mut reader, &ctx, &mut pos).unwrap();
        assert_eq!(handle.uuid, Some(NdrUuid::NIL));
        assert_eq!(pos, CONTEXT_HANDLE_SIZE);
    }

    #[test]
    fn test_handle_roundtrip_and_display() {
        let uuid = NdrUuid::parse("6b3a1f20-9c1e-4a51-8f0e-0c2d5e7f9a11").unwrap();
        let handle = HWidget::new(0, uuid);

        let ctx = NdrContext::new();
        let mut reader = encode(&handle, 0).freeze();
        let mut pos = 0;
        let decoded = HWidget::ndr_decode(&mut reader, &ctx, &mut pos).unwrap();
        assert_eq!(decoded, handle);
        assert!(!decoded.is_null());
        assert_eq!(
            decoded.to_string(),
            "HWIDGET(00000000:6b3a1f20-9c1e-4a51-8f0e-0c2d5e7f9a11)"
        );
    }
}
