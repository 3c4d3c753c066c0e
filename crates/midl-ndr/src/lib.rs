//! NDR (Network Data Representation) runtime library
//!
//! This crate provides the runtime support for RPC stubs, implementing the
//! NDR20 wire format as specified in DCE RPC and MS-RPCE.
//!
//! # NDR Wire Format
//!
//! NDR is the standard encoding for DCE RPC data. Key characteristics:
//! - Primitives align to their natural size (1, 2, 4, or 8 bytes), measured
//!   from the start of the stub
//! - Structures align to their largest member
//! - Embedded pointers write a referent ID inline; the pointee follows after
//!   all inline members of the enclosing structure (deferred)
//! - Strings are conformant varying arrays with null terminator
//! - Context handles are 20 opaque bytes

mod arrays;
mod context;
mod decode;
mod encode;
mod error;
mod handle;
mod macros;
mod pointers;
mod primitives;
mod strings;

pub use arrays::{
    check_count, decode_conformance, decode_conformant, decode_conformant_varying, encode_conformance,
    encode_conformant, encode_conformant_varying,
};
pub use context::{NdrContext, FIRST_REFERENT_ID};
pub use decode::{decode_complete, NdrDecode};
pub use encode::{encode_complete, NdrEncode};
pub use error::{NdrError, Result, MAX_NDR_ALLOCATION_SIZE, MAX_NDR_ARRAY_ELEMENTS};
pub use handle::{ContextHandle, HandleKind, CONTEXT_HANDLE_SIZE};
pub use pointers::{decode_referent, encode_referent};
pub use primitives::{check_range, decode_bool32, encode_bool32, NdrUuid};
pub use strings::{decode_wide, encode_wide};

/// Re-export bytes for convenience
pub use bytes::{Buf, BufMut, Bytes, BytesMut};
