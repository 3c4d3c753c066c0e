//! Structures shared by several `clusapi2` methods

use std::fmt;

use midl_ndr::{
    check_count, decode_conformance, encode_conformance, ndr_struct, Buf, BufMut, NdrContext, NdrDecode,
    NdrEncode, NdrError, Result,
};

/// Object type masks for `ApiCreateEnum`
pub mod enum_type {
    pub const NODE: u32 = 0x0000_0001;
    pub const RESTYPE: u32 = 0x0000_0002;
    pub const RESOURCE: u32 = 0x0000_0004;
    pub const GROUP: u32 = 0x0000_0008;
    pub const NETWORK: u32 = 0x0000_0010;
    pub const NETINTERFACE: u32 = 0x0000_0020;
    pub const INTERNAL_NETWORK: u32 = 0x8000_0000;

    pub const ALL: u32 = NODE | RESTYPE | RESOURCE | GROUP | NETWORK | NETINTERFACE;
}

/// Type masks for the per-object enumerations
pub mod object_enum_type {
    /// `ApiCreateResEnum`: resources this one depends on
    pub const RESOURCE_DEPENDS: u32 = 0x0000_0001;
    /// `ApiCreateResEnum`: resources that depend on this one
    pub const RESOURCE_PROVIDES: u32 = 0x0000_0002;
    /// `ApiCreateResEnum`: possible owner nodes
    pub const RESOURCE_NODES: u32 = 0x0000_0004;
    /// `ApiCreateGroupResourceEnum`: resources in the group
    pub const GROUP_CONTAINS: u32 = 0x0000_0001;
    /// `ApiCreateGroupResourceEnum`: preferred owner nodes
    pub const GROUP_NODES: u32 = 0x0000_0002;
    /// `ApiCreateNodeEnum` and `ApiCreateNetworkEnum`
    pub const NETINTERFACES: u32 = 0x0000_0001;
    /// `ApiCreateResTypeEnum`: nodes that support the type
    pub const RESTYPE_NODES: u32 = 0x0000_0001;
}

ndr_struct! {
    /// One named object in an [`EnumList`]
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct EnumEntry {
        /// One bit of the requested type mask
        pub entry_type: u32,
        pub name: Option<String>,
    }
}

/// Result of the `Create*Enum` methods.
///
/// `entries` is an embedded conformant array sized by `entry_count`, so its
/// maximum count leads the structure on the wire:
///
/// ```text
/// max_count | entry_count | entries (type, name referent)... | names...
/// ```
///
/// A zero `max_count` is read as `entry_count`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumList {
    pub entry_count: u32,
    pub entries: Vec<EnumEntry>,
}

impl EnumList {
    pub fn new(entries: Vec<EnumEntry>) -> Self {
        Self { entry_count: 0, entries }
    }

    /// Names of all entries whose type matches `mask`
    pub fn names(&self, mask: u32) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |entry| entry.entry_type & mask != 0)
            .filter_map(|entry| entry.name.as_deref())
    }
}

impl NdrEncode for EnumList {
    fn ndr_encode<B: BufMut>(&self, buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<()> {
        encode_conformance(buf, ctx, self.entry_count, position);
        self.entry_count.ndr_encode(buf, ctx, position)?;
        let filler = EnumEntry::default();
        for index in 0..self.entry_count as usize {
            self.entries.get(index).unwrap_or(&filler).ndr_encode(buf, ctx, position)?;
        }
        Ok(())
    }

    fn ndr_encode_deferred<B: BufMut>(&self, buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<()> {
        for entry in self.entries.iter().take(self.entry_count as usize) {
            entry.ndr_encode_deferred(buf, ctx, position)?;
        }
        Ok(())
    }

    fn ndr_prepare(&mut self) -> Result<()> {
        if self.entry_count == 0 {
            self.entry_count = u32::try_from(self.entries.len()).map_err(|_| NdrError::IntegerOverflow)?;
        }
        self.entries.ndr_prepare()
    }

    fn ndr_align() -> usize {
        4
    }
}

impl NdrDecode for EnumList {
    fn ndr_decode<B: Buf>(buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<Self> {
        let max_count = decode_conformance(buf, ctx, position)?;
        let entry_count = u32::ndr_decode(buf, ctx, position)?;
        let size = if max_count == 0 { entry_count } else { max_count };
        let count = check_count::<EnumEntry, B>("entries", u64::from(size), buf)?;

        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            entries.push(EnumEntry::ndr_decode(buf, ctx, position)?);
        }
        Ok(Self { entry_count, entries })
    }

    fn ndr_decode_deferred<B: Buf>(&mut self, buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<()> {
        for entry in &mut self.entries {
            entry.ndr_decode_deferred(buf, ctx, position)?;
        }
        Ok(())
    }

    fn ndr_align() -> usize {
        4
    }
}

ndr_struct! {
    /// 100-nanosecond intervals since 1601-01-01 UTC
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct FileTime {
        pub low_date_time: u32,
        pub high_date_time: u32,
    }
}

impl FileTime {
    pub fn from_u64(value: u64) -> Self {
        Self {
            low_date_time: value as u32,
            high_date_time: (value >> 32) as u32,
        }
    }

    pub fn as_u64(&self) -> u64 {
        (u64::from(self.high_date_time) << 32) | u64::from(self.low_date_time)
    }
}

ndr_struct! {
    /// Self-relative security descriptor buffer.
    ///
    /// `in_security_descriptor_length` is the buffer capacity,
    /// `out_security_descriptor_length` the number of valid bytes.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct RpcSecurityDescriptor {
        pub security_descriptor: Option<Vec<u8>> =>
            unique_size_length_is(in_security_descriptor_length, out_security_descriptor_length),
        pub in_security_descriptor_length: u32,
        pub out_security_descriptor_length: u32,
    }
}

impl RpcSecurityDescriptor {
    pub fn new(descriptor: Vec<u8>) -> Self {
        Self {
            security_descriptor: Some(descriptor),
            ..Default::default()
        }
    }

    /// An empty buffer of `capacity` bytes for the server to fill.
    pub fn with_capacity(capacity: u32) -> Self {
        Self {
            security_descriptor: Some(Vec::new()),
            in_security_descriptor_length: capacity,
            out_security_descriptor_length: 0,
        }
    }
}

ndr_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct RpcSecurityAttributes {
        pub length: u32,
        pub security_descriptor: RpcSecurityDescriptor,
        pub inherit_handle: bool => bool32(),
    }
}

ndr_struct! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct ClusterOperationalVersionInfo {
        pub version_info_size: u32,
        pub major_version: u32,
        pub minor_version: u32,
        pub build_number: u32,
        pub reserved: u32,
    }
}

ndr_struct! {
    /// Per-node outcome of `ApiSetServiceAccountPassword`
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct ClusterSetPasswordStatus {
        pub node_id: u32,
        pub set_attempted: bool,
        pub return_status: u32,
    }
}

/// `IDL_CLUSTER_SET_PASSWORD_FLAGS`, a 16-bit enumeration.
///
/// Values without a name are carried as is.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ClusterSetPasswordFlags(pub u16);

impl ClusterSetPasswordFlags {
    pub const NONE: Self = Self(0);
    pub const IGNORE_DOWN_NODES: Self = Self(1);

    pub fn name(&self) -> Option<&'static str> {
        match *self {
            Self::IGNORE_DOWN_NODES => Some("IDL_CLUSTER_SET_PASSWORD_IGNORE_DOWN_NODES"),
            _ => None,
        }
    }
}

impl fmt::Debug for ClusterSetPasswordFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "ClusterSetPasswordFlags({})", self.0),
        }
    }
}

impl From<u16> for ClusterSetPasswordFlags {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl NdrEncode for ClusterSetPasswordFlags {
    fn ndr_encode<B: BufMut>(&self, buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<()> {
        self.0.ndr_encode(buf, ctx, position)
    }

    fn ndr_align() -> usize {
        2
    }
}

impl NdrDecode for ClusterSetPasswordFlags {
    fn ndr_decode<B: Buf>(buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<Self> {
        Ok(Self(u16::ndr_decode(buf, ctx, position)?))
    }

    fn ndr_align() -> usize {
        2
    }
}
