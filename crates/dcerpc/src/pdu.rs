//! Connection-oriented DCE RPC PDU types
//!
//! This module implements the subset of the DCE 1.1 (C706) and MS-RPCE
//! connection-oriented wire format a client needs: bind and alter-context
//! negotiation, requests, responses and faults.
//!
//! PDU Header Format:
//! ```text
//! +--------+--------+--------+--------+
//! |  vers  |vers_min| ptype  | pflags |
//! +--------+--------+--------+--------+
//! |        data representation        |
//! +--------+--------+--------+--------+
//! |   frag_len      |   auth_len      |
//! +--------+--------+--------+--------+
//! |             call_id               |
//! +--------+--------+--------+--------+
//! ```
//!
//! PDU bodies follow natural alignment measured from the first header byte,
//! so they are read and written with the NDR primitive codecs.

use crate::error::{Result, RpcError};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use midl_ndr::{NdrContext, NdrDecode, NdrEncode, NdrUuid};

/// DCE RPC protocol version
pub const DCE_RPC_VERSION: u8 = 5;
/// DCE RPC protocol minor version
pub const DCE_RPC_VERSION_MINOR: u8 = 0;
/// Fragment size proposed in bind requests
pub const DEFAULT_MAX_FRAG: u16 = 4280;

/// Connection-oriented packet types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PacketType {
    Request = 0,
    Response = 2,
    Fault = 3,
    Bind = 11,
    BindAck = 12,
    BindNak = 13,
    AlterContext = 14,
    AlterContextResp = 15,
    Auth3 = 16,
    Shutdown = 17,
    CoCancel = 18,
    Orphaned = 19,
}

impl PacketType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Request),
            2 => Some(Self::Response),
            3 => Some(Self::Fault),
            11 => Some(Self::Bind),
            12 => Some(Self::BindAck),
            13 => Some(Self::BindNak),
            14 => Some(Self::AlterContext),
            15 => Some(Self::AlterContextResp),
            16 => Some(Self::Auth3),
            17 => Some(Self::Shutdown),
            18 => Some(Self::CoCancel),
            19 => Some(Self::Orphaned),
            _ => None,
        }
    }
}

/// Packet flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PacketFlags(u8);

impl PacketFlags {
    /// First fragment
    pub const FIRST_FRAG: u8 = 0x01;
    /// Last fragment
    pub const LAST_FRAG: u8 = 0x02;
    /// Cancel was pending at sender
    pub const PENDING_CANCEL: u8 = 0x04;
    /// Supports concurrent multiplexing
    pub const CONC_MPX: u8 = 0x10;
    /// Fault: the call did not execute
    pub const DID_NOT_EXECUTE: u8 = 0x20;
    /// `maybe` call semantics
    pub const MAYBE: u8 = 0x40;
    /// Object UUID present in request
    pub const OBJECT_UUID: u8 = 0x80;

    pub fn new() -> Self {
        Self(0)
    }

    /// Both FIRST_FRAG and LAST_FRAG: an unfragmented PDU
    pub fn complete() -> Self {
        Self(Self::FIRST_FRAG | Self::LAST_FRAG)
    }

    pub fn set_first_frag(&mut self) -> &mut Self {
        self.0 |= Self::FIRST_FRAG;
        self
    }

    pub fn set_last_frag(&mut self) -> &mut Self {
        self.0 |= Self::LAST_FRAG;
        self
    }

    pub fn set_object_uuid(&mut self) -> &mut Self {
        self.0 |= Self::OBJECT_UUID;
        self
    }

    pub fn is_first_frag(&self) -> bool {
        self.0 & Self::FIRST_FRAG != 0
    }

    pub fn is_last_frag(&self) -> bool {
        self.0 & Self::LAST_FRAG != 0
    }

    pub fn has_object_uuid(&self) -> bool {
        self.0 & Self::OBJECT_UUID != 0
    }

    pub fn did_not_execute(&self) -> bool {
        self.0 & Self::DID_NOT_EXECUTE != 0
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    pub fn from_u8(value: u8) -> Self {
        Self(value)
    }
}

/// Data representation format label.
///
/// Byte 0 carries the integer representation in its upper nibble and the
/// character set in its lower nibble. Only the integer byte order matters
/// to this client; IEEE floats and ASCII are always advertised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataRepresentation {
    pub little_endian: bool,
}

impl DataRepresentation {
    /// NDR default: little-endian, ASCII, IEEE
    pub fn ndr() -> Self {
        Self { little_endian: true }
    }

    pub fn big_endian() -> Self {
        Self { little_endian: false }
    }

    pub fn encode(&self) -> [u8; 4] {
        [if self.little_endian { 0x10 } else { 0x00 }, 0, 0, 0]
    }

    pub fn decode(data: [u8; 4]) -> Self {
        Self {
            little_endian: data[0] & 0xF0 != 0,
        }
    }

    /// A fresh NDR context in this byte order.
    pub fn context(&self) -> NdrContext {
        NdrContext::with_byte_order(self.little_endian)
    }
}

impl Default for DataRepresentation {
    fn default() -> Self {
        Self::ndr()
    }
}

/// Syntax ID - interface UUID with version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyntaxId {
    pub uuid: NdrUuid,
    /// major in lower 16 bits, minor in upper 16 bits
    pub version: u32,
}

impl SyntaxId {
    pub const fn new(uuid: NdrUuid, major: u16, minor: u16) -> Self {
        Self {
            uuid,
            version: (major as u32) | ((minor as u32) << 16),
        }
    }

    pub fn major_version(&self) -> u16 {
        self.version as u16
    }

    pub fn minor_version(&self) -> u16 {
        (self.version >> 16) as u16
    }
}

impl std::fmt::Display for SyntaxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v{}.{}", self.uuid, self.major_version(), self.minor_version())
    }
}

impl NdrEncode for SyntaxId {
    fn ndr_encode<B: BufMut>(&self, buf: &mut B, ctx: &NdrContext, position: &mut usize) -> midl_ndr::Result<()> {
        self.uuid.ndr_encode(buf, ctx, position)?;
        self.version.ndr_encode(buf, ctx, position)
    }

    fn ndr_align() -> usize {
        4
    }
}

impl NdrDecode for SyntaxId {
    fn ndr_decode<B: Buf>(buf: &mut B, ctx: &NdrContext, position: &mut usize) -> midl_ndr::Result<Self> {
        let uuid = NdrUuid::ndr_decode(buf, ctx, position)?;
        let version = u32::ndr_decode(buf, ctx, position)?;
        Ok(Self { uuid, version })
    }

    fn ndr_align() -> usize {
        4
    }
}

/// NDR20 transfer syntax, 8a885d04-1ceb-11c9-9fe8-08002b104860 v2.0
pub const NDR_SYNTAX: SyntaxId = SyntaxId::new(
    NdrUuid {
        data1: 0x8a88_5d04,
        data2: 0x1ceb,
        data3: 0x11c9,
        data4: [0x9f, 0xe8, 0x08, 0x00, 0x2b, 0x10, 0x48, 0x60],
    },
    2,
    0,
);

/// Common PDU header (16 bytes)
#[derive(Debug, Clone)]
pub struct PduHeader {
    pub version: u8,
    pub version_minor: u8,
    pub packet_type: PacketType,
    pub packet_flags: PacketFlags,
    pub data_rep: DataRepresentation,
    /// Total length of the PDU fragment
    pub frag_length: u16,
    pub auth_length: u16,
    pub call_id: u32,
}

impl PduHeader {
    pub const SIZE: usize = 16;

    pub fn new(packet_type: PacketType, call_id: u32) -> Self {
        Self {
            version: DCE_RPC_VERSION,
            version_minor: DCE_RPC_VERSION_MINOR,
            packet_type,
            packet_flags: PacketFlags::complete(),
            data_rep: DataRepresentation::ndr(),
            frag_length: 0, // set when encoding
            auth_length: 0,
            call_id,
        }
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        let ctx = self.data_rep.context();
        buf.put_u8(self.version);
        buf.put_u8(self.version_minor);
        buf.put_u8(self.packet_type as u8);
        buf.put_u8(self.packet_flags.as_u8());
        buf.put_slice(&self.data_rep.encode());
        ctx.put_u16(buf, self.frag_length);
        ctx.put_u16(buf, self.auth_length);
        ctx.put_u32(buf, self.call_id);
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE {
            return Err(RpcError::InvalidPdu(format!("PDU header too short: {} bytes", data.len())));
        }

        let version = data[0];
        if version != DCE_RPC_VERSION {
            return Err(RpcError::RpcVersionMismatch(version));
        }

        let packet_type = PacketType::from_u8(data[2]).ok_or(RpcError::InvalidMessageType(data[2]))?;
        let data_rep = DataRepresentation::decode([data[4], data[5], data[6], data[7]]);

        let ctx = data_rep.context();
        let mut rest = &data[8..Self::SIZE];
        Ok(Self {
            version,
            version_minor: data[1],
            packet_type,
            packet_flags: PacketFlags::from_u8(data[3]),
            data_rep,
            frag_length: ctx.get_u16(&mut rest),
            auth_length: ctx.get_u16(&mut rest),
            call_id: ctx.get_u32(&mut rest),
        })
    }
}

/// Write a header placeholder, let `body` fill the rest, then patch in the
/// header with the final fragment length.
fn frame<F>(header: &PduHeader, capacity: usize, body: F) -> Result<Bytes>
where
    F: FnOnce(&mut BytesMut, &NdrContext, &mut usize) -> Result<()>,
{
    let mut buf = BytesMut::with_capacity(PduHeader::SIZE + capacity);
    buf.put_bytes(0, PduHeader::SIZE);

    let ctx = header.data_rep.context();
    let mut position = PduHeader::SIZE;
    body(&mut buf, &ctx, &mut position)?;

    let frag_length = u16::try_from(buf.len()).map_err(|_| RpcError::PduTooLarge {
        size: buf.len(),
        max: u16::MAX as usize,
    })?;
    let mut header = header.clone();
    header.frag_length = frag_length;

    let mut header_buf = BytesMut::with_capacity(PduHeader::SIZE);
    header.encode(&mut header_buf);
    buf[..PduHeader::SIZE].copy_from_slice(&header_buf);

    Ok(buf.freeze())
}

/// Decode the header of `data` and position a reader at the body.
fn body(data: &[u8], expected: PacketType) -> Result<(PduHeader, &[u8], NdrContext)> {
    let header = PduHeader::decode(data)?;
    if header.packet_type != expected {
        return Err(RpcError::InvalidMessageType(header.packet_type as u8));
    }
    let end = (header.frag_length as usize).clamp(PduHeader::SIZE, data.len());
    let ctx = header.data_rep.context();
    Ok((header, &data[PduHeader::SIZE..end], ctx))
}

fn put_stub(buf: &mut BytesMut, stub: &[u8], position: &mut usize) {
    buf.put_slice(stub);
    *position += stub.len();
}

/// Presentation context element of a bind or alter-context request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextElement {
    pub context_id: u16,
    pub abstract_syntax: SyntaxId,
    pub transfer_syntaxes: Vec<SyntaxId>,
}

impl ContextElement {
    pub fn new(context_id: u16, abstract_syntax: SyntaxId, transfer_syntax: SyntaxId) -> Self {
        Self {
            context_id,
            abstract_syntax,
            transfer_syntaxes: vec![transfer_syntax],
        }
    }

    fn encode(&self, buf: &mut BytesMut, ctx: &NdrContext, position: &mut usize) -> Result<()> {
        self.context_id.ndr_encode(buf, ctx, position)?;
        (self.transfer_syntaxes.len() as u8).ndr_encode(buf, ctx, position)?;
        0u8.ndr_encode(buf, ctx, position)?; // reserved
        self.abstract_syntax.ndr_encode(buf, ctx, position)?;
        for syntax in &self.transfer_syntaxes {
            syntax.ndr_encode(buf, ctx, position)?;
        }
        Ok(())
    }

    fn decode(reader: &mut &[u8], ctx: &NdrContext, position: &mut usize) -> Result<Self> {
        let context_id = u16::ndr_decode(reader, ctx, position)?;
        let count = u8::ndr_decode(reader, ctx, position)?;
        let _reserved = u8::ndr_decode(reader, ctx, position)?;
        let abstract_syntax = SyntaxId::ndr_decode(reader, ctx, position)?;
        let transfer_syntaxes = (0..count)
            .map(|_| SyntaxId::ndr_decode(reader, ctx, position))
            .collect::<midl_ndr::Result<Vec<_>>>()?;
        Ok(Self {
            context_id,
            abstract_syntax,
            transfer_syntaxes,
        })
    }
}

/// Bind or alter-context request. Both share one body layout; the packet
/// type in the header tells them apart.
#[derive(Debug, Clone)]
pub struct BindPdu {
    pub header: PduHeader,
    pub max_xmit_frag: u16,
    pub max_recv_frag: u16,
    pub assoc_group_id: u32,
    pub context_list: Vec<ContextElement>,
}

impl BindPdu {
    /// Bind `interface` on presentation context 0 with NDR20
    pub fn new(call_id: u32, interface: SyntaxId) -> Self {
        Self {
            header: PduHeader::new(PacketType::Bind, call_id),
            max_xmit_frag: DEFAULT_MAX_FRAG,
            max_recv_frag: DEFAULT_MAX_FRAG,
            assoc_group_id: 0,
            context_list: vec![ContextElement::new(0, interface, NDR_SYNTAX)],
        }
    }

    /// Alter-context request adding `interface` as presentation context
    /// `context_id` on an existing association
    pub fn alter_context(call_id: u32, context_id: u16, interface: SyntaxId) -> Self {
        Self {
            header: PduHeader::new(PacketType::AlterContext, call_id),
            max_xmit_frag: DEFAULT_MAX_FRAG,
            max_recv_frag: DEFAULT_MAX_FRAG,
            assoc_group_id: 0,
            context_list: vec![ContextElement::new(context_id, interface, NDR_SYNTAX)],
        }
    }

    pub fn encode(&self) -> Result<Bytes> {
        frame(&self.header, 64 + 44 * self.context_list.len(), |buf, ctx, pos| {
            self.max_xmit_frag.ndr_encode(buf, ctx, pos)?;
            self.max_recv_frag.ndr_encode(buf, ctx, pos)?;
            self.assoc_group_id.ndr_encode(buf, ctx, pos)?;

            (self.context_list.len() as u8).ndr_encode(buf, ctx, pos)?;
            0u8.ndr_encode(buf, ctx, pos)?; // reserved
            0u16.ndr_encode(buf, ctx, pos)?; // reserved2
            for element in &self.context_list {
                element.encode(buf, ctx, pos)?;
            }
            Ok(())
        })
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        let header = PduHeader::decode(data)?;
        let (header, mut reader, ctx) = match header.packet_type {
            PacketType::Bind | PacketType::AlterContext => body(data, header.packet_type)?,
            other => return Err(RpcError::InvalidMessageType(other as u8)),
        };
        let mut pos = PduHeader::SIZE;

        let max_xmit_frag = u16::ndr_decode(&mut reader, &ctx, &mut pos)?;
        let max_recv_frag = u16::ndr_decode(&mut reader, &ctx, &mut pos)?;
        let assoc_group_id = u32::ndr_decode(&mut reader, &ctx, &mut pos)?;

        let count = u8::ndr_decode(&mut reader, &ctx, &mut pos)?;
        let _reserved = u8::ndr_decode(&mut reader, &ctx, &mut pos)?;
        let _reserved2 = u16::ndr_decode(&mut reader, &ctx, &mut pos)?;
        let context_list = (0..count)
            .map(|_| ContextElement::decode(&mut reader, &ctx, &mut pos))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            header,
            max_xmit_frag,
            max_recv_frag,
            assoc_group_id,
            context_list,
        })
    }
}

/// Result of one presentation context negotiation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ContextResult {
    Acceptance = 0,
    UserRejection = 1,
    ProviderRejection = 2,
    NegotiateAck = 3,
}

impl ContextResult {
    fn from_u16(value: u16) -> Self {
        match value {
            0 => Self::Acceptance,
            1 => Self::UserRejection,
            3 => Self::NegotiateAck,
            _ => Self::ProviderRejection,
        }
    }
}

/// One entry of the result list in a bind or alter-context response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationResult {
    pub result: ContextResult,
    pub reason: u16,
    pub transfer_syntax: SyntaxId,
}

/// Bind acknowledgment or alter-context response
#[derive(Debug, Clone)]
pub struct BindAckPdu {
    pub header: PduHeader,
    pub max_xmit_frag: u16,
    pub max_recv_frag: u16,
    pub assoc_group_id: u32,
    /// Empty in alter-context responses
    pub secondary_addr: String,
    pub results: Vec<PresentationResult>,
}

impl BindAckPdu {
    pub fn new(call_id: u32, assoc_group_id: u32, accepted_syntax: SyntaxId) -> Self {
        Self {
            header: PduHeader::new(PacketType::BindAck, call_id),
            max_xmit_frag: DEFAULT_MAX_FRAG,
            max_recv_frag: DEFAULT_MAX_FRAG,
            assoc_group_id,
            secondary_addr: String::new(),
            results: vec![PresentationResult {
                result: ContextResult::Acceptance,
                reason: 0,
                transfer_syntax: accepted_syntax,
            }],
        }
    }

    pub fn encode(&self) -> Result<Bytes> {
        frame(&self.header, 64 + 24 * self.results.len(), |buf, ctx, pos| {
            self.max_xmit_frag.ndr_encode(buf, ctx, pos)?;
            self.max_recv_frag.ndr_encode(buf, ctx, pos)?;
            self.assoc_group_id.ndr_encode(buf, ctx, pos)?;

            let addr = self.secondary_addr.as_bytes();
            let addr_len = if addr.is_empty() { 0 } else { addr.len() + 1 };
            (addr_len as u16).ndr_encode(buf, ctx, pos)?;
            if addr_len > 0 {
                put_stub(buf, addr, pos);
                0u8.ndr_encode(buf, ctx, pos)?;
            }
            ctx.write_align(buf, pos, 4);

            (self.results.len() as u8).ndr_encode(buf, ctx, pos)?;
            0u8.ndr_encode(buf, ctx, pos)?;
            0u16.ndr_encode(buf, ctx, pos)?;
            for entry in &self.results {
                (entry.result as u16).ndr_encode(buf, ctx, pos)?;
                entry.reason.ndr_encode(buf, ctx, pos)?;
                entry.transfer_syntax.ndr_encode(buf, ctx, pos)?;
            }
            Ok(())
        })
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        let header = PduHeader::decode(data)?;
        let (header, mut reader, ctx) = match header.packet_type {
            PacketType::BindAck | PacketType::AlterContextResp => body(data, header.packet_type)?,
            other => return Err(RpcError::InvalidMessageType(other as u8)),
        };
        let mut pos = PduHeader::SIZE;

        let max_xmit_frag = u16::ndr_decode(&mut reader, &ctx, &mut pos)?;
        let max_recv_frag = u16::ndr_decode(&mut reader, &ctx, &mut pos)?;
        let assoc_group_id = u32::ndr_decode(&mut reader, &ctx, &mut pos)?;

        let addr_len = u16::ndr_decode(&mut reader, &ctx, &mut pos)? as usize;
        if reader.remaining() < addr_len {
            return Err(RpcError::InvalidPdu(format!(
                "secondary address of {} bytes exceeds PDU",
                addr_len
            )));
        }
        let mut addr = reader[..addr_len].to_vec();
        reader.advance(addr_len);
        pos += addr_len;
        if addr.last() == Some(&0) {
            addr.pop();
        }
        let secondary_addr = String::from_utf8_lossy(&addr).into_owned();
        ctx.read_align(&mut reader, &mut pos, 4, 0)?;

        let count = u8::ndr_decode(&mut reader, &ctx, &mut pos)?;
        let _reserved = u8::ndr_decode(&mut reader, &ctx, &mut pos)?;
        let _reserved2 = u16::ndr_decode(&mut reader, &ctx, &mut pos)?;

        let mut results = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let result = ContextResult::from_u16(u16::ndr_decode(&mut reader, &ctx, &mut pos)?);
            let reason = u16::ndr_decode(&mut reader, &ctx, &mut pos)?;
            let transfer_syntax = SyntaxId::ndr_decode(&mut reader, &ctx, &mut pos)?;
            results.push(PresentationResult {
                result,
                reason,
                transfer_syntax,
            });
        }

        Ok(Self {
            header,
            max_xmit_frag,
            max_recv_frag,
            assoc_group_id,
            secondary_addr,
            results,
        })
    }
}

/// Bind rejection
#[derive(Debug, Clone)]
pub struct BindNakPdu {
    pub header: PduHeader,
    pub reject_reason: u16,
}

impl BindNakPdu {
    pub fn new(call_id: u32, reject_reason: u16) -> Self {
        Self {
            header: PduHeader::new(PacketType::BindNak, call_id),
            reject_reason,
        }
    }

    pub fn encode(&self) -> Result<Bytes> {
        frame(&self.header, 4, |buf, ctx, pos| {
            self.reject_reason.ndr_encode(buf, ctx, pos)?;
            0u8.ndr_encode(buf, ctx, pos)?; // no protocol versions listed
            Ok(())
        })
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        let (header, mut reader, ctx) = body(data, PacketType::BindNak)?;
        let mut pos = PduHeader::SIZE;
        let reject_reason = u16::ndr_decode(&mut reader, &ctx, &mut pos)?;
        Ok(Self { header, reject_reason })
    }
}

/// Request PDU
#[derive(Debug, Clone)]
pub struct RequestPdu {
    pub header: PduHeader,
    pub alloc_hint: u32,
    pub context_id: u16,
    pub opnum: u16,
    pub object_uuid: Option<NdrUuid>,
    pub stub_data: Bytes,
}

impl RequestPdu {
    /// alloc_hint(4) + context_id(2) + opnum(2)
    pub const BODY_HEADER_SIZE: usize = 8;

    pub fn new(call_id: u32, opnum: u16, stub_data: Bytes) -> Self {
        Self {
            header: PduHeader::new(PacketType::Request, call_id),
            alloc_hint: stub_data.len() as u32,
            context_id: 0,
            opnum,
            object_uuid: None,
            stub_data,
        }
    }

    pub fn encode(&self) -> Result<Bytes> {
        let mut header = self.header.clone();
        if self.object_uuid.is_some() {
            header.packet_flags.set_object_uuid();
        }
        frame(&header, Self::BODY_HEADER_SIZE + 16 + self.stub_data.len(), |buf, ctx, pos| {
            self.alloc_hint.ndr_encode(buf, ctx, pos)?;
            self.context_id.ndr_encode(buf, ctx, pos)?;
            self.opnum.ndr_encode(buf, ctx, pos)?;
            if let Some(uuid) = &self.object_uuid {
                uuid.ndr_encode(buf, ctx, pos)?;
            }
            put_stub(buf, &self.stub_data, pos);
            Ok(())
        })
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        let (header, mut reader, ctx) = body(data, PacketType::Request)?;
        let mut pos = PduHeader::SIZE;

        let alloc_hint = u32::ndr_decode(&mut reader, &ctx, &mut pos)?;
        let context_id = u16::ndr_decode(&mut reader, &ctx, &mut pos)?;
        let opnum = u16::ndr_decode(&mut reader, &ctx, &mut pos)?;
        let object_uuid = if header.packet_flags.has_object_uuid() {
            Some(NdrUuid::ndr_decode(&mut reader, &ctx, &mut pos)?)
        } else {
            None
        };
        let stub_data = Bytes::copy_from_slice(reader);

        Ok(Self {
            header,
            alloc_hint,
            context_id,
            opnum,
            object_uuid,
            stub_data,
        })
    }
}

/// Response PDU
#[derive(Debug, Clone)]
pub struct ResponsePdu {
    pub header: PduHeader,
    pub alloc_hint: u32,
    pub context_id: u16,
    pub cancel_count: u8,
    pub stub_data: Bytes,
}

impl ResponsePdu {
    /// alloc_hint(4) + context_id(2) + cancel_count(1) + reserved(1)
    pub const BODY_HEADER_SIZE: usize = 8;

    pub fn new(call_id: u32, stub_data: Bytes) -> Self {
        Self {
            header: PduHeader::new(PacketType::Response, call_id),
            alloc_hint: stub_data.len() as u32,
            context_id: 0,
            cancel_count: 0,
            stub_data,
        }
    }

    pub fn encode(&self) -> Result<Bytes> {
        frame(&self.header, Self::BODY_HEADER_SIZE + self.stub_data.len(), |buf, ctx, pos| {
            self.alloc_hint.ndr_encode(buf, ctx, pos)?;
            self.context_id.ndr_encode(buf, ctx, pos)?;
            self.cancel_count.ndr_encode(buf, ctx, pos)?;
            0u8.ndr_encode(buf, ctx, pos)?;
            put_stub(buf, &self.stub_data, pos);
            Ok(())
        })
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        let (header, mut reader, ctx) = body(data, PacketType::Response)?;
        let mut pos = PduHeader::SIZE;

        let alloc_hint = u32::ndr_decode(&mut reader, &ctx, &mut pos)?;
        let context_id = u16::ndr_decode(&mut reader, &ctx, &mut pos)?;
        let cancel_count = u8::ndr_decode(&mut reader, &ctx, &mut pos)?;
        let _reserved = u8::ndr_decode(&mut reader, &ctx, &mut pos)?;

        Ok(Self {
            header,
            alloc_hint,
            context_id,
            cancel_count,
            stub_data: Bytes::copy_from_slice(reader),
        })
    }
}

/// Well-known fault status codes
pub mod fault {
    pub const NCA_S_OP_RNG_ERROR: u32 = 0x1c01_0002;
    pub const NCA_S_UNK_IF: u32 = 0x1c01_0003;
    pub const NCA_S_PROTO_ERROR: u32 = 0x1c01_000b;
    pub const NCA_S_FAULT_NDR: u32 = 0x0000_06f7;
    pub const NCA_S_FAULT_CONTEXT_MISMATCH: u32 = 0x1c00_001a;
    pub const RPC_S_ACCESS_DENIED: u32 = 0x0000_0005;
}

/// Fault PDU
#[derive(Debug, Clone)]
pub struct FaultPdu {
    pub header: PduHeader,
    pub alloc_hint: u32,
    pub context_id: u16,
    pub cancel_count: u8,
    pub status: u32,
}

impl FaultPdu {
    pub fn new(call_id: u32, status: u32) -> Self {
        Self {
            header: PduHeader::new(PacketType::Fault, call_id),
            alloc_hint: 0,
            context_id: 0,
            cancel_count: 0,
            status,
        }
    }

    pub fn encode(&self) -> Result<Bytes> {
        frame(&self.header, 16, |buf, ctx, pos| {
            self.alloc_hint.ndr_encode(buf, ctx, pos)?;
            self.context_id.ndr_encode(buf, ctx, pos)?;
            self.cancel_count.ndr_encode(buf, ctx, pos)?;
            0u8.ndr_encode(buf, ctx, pos)?;
            self.status.ndr_encode(buf, ctx, pos)?;
            0u32.ndr_encode(buf, ctx, pos)?; // reserved
            Ok(())
        })
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        let (header, mut reader, ctx) = body(data, PacketType::Fault)?;
        let mut pos = PduHeader::SIZE;

        let alloc_hint = u32::ndr_decode(&mut reader, &ctx, &mut pos)?;
        let context_id = u16::ndr_decode(&mut reader, &ctx, &mut pos)?;
        let cancel_count = u8::ndr_decode(&mut reader, &ctx, &mut pos)?;
        let _reserved = u8::ndr_decode(&mut reader, &ctx, &mut pos)?;
        let status = u32::ndr_decode(&mut reader, &ctx, &mut pos)?;

        Ok(Self {
            header,
            alloc_hint,
            context_id,
            cancel_count,
            status,
        })
    }
}

/// Any connection-oriented PDU this client sends or receives
#[derive(Debug, Clone)]
pub enum Pdu {
    Bind(BindPdu),
    BindAck(BindAckPdu),
    BindNak(BindNakPdu),
    AlterContext(BindPdu),
    AlterContextResp(BindAckPdu),
    Request(RequestPdu),
    Response(ResponsePdu),
    Fault(FaultPdu),
}

impl Pdu {
    /// Decode a PDU from raw bytes
    pub fn decode(data: &[u8]) -> Result<Self> {
        let header = PduHeader::decode(data)?;
        match header.packet_type {
            PacketType::Bind => Ok(Pdu::Bind(BindPdu::decode(data)?)),
            PacketType::BindAck => Ok(Pdu::BindAck(BindAckPdu::decode(data)?)),
            PacketType::BindNak => Ok(Pdu::BindNak(BindNakPdu::decode(data)?)),
            PacketType::AlterContext => Ok(Pdu::AlterContext(BindPdu::decode(data)?)),
            PacketType::AlterContextResp => Ok(Pdu::AlterContextResp(BindAckPdu::decode(data)?)),
            PacketType::Request => Ok(Pdu::Request(RequestPdu::decode(data)?)),
            PacketType::Response => Ok(Pdu::Response(ResponsePdu::decode(data)?)),
            PacketType::Fault => Ok(Pdu::Fault(FaultPdu::decode(data)?)),
            other => Err(RpcError::InvalidMessageType(other as u8)),
        }
    }

    pub fn encode(&self) -> Result<Bytes> {
        match self {
            Pdu::Bind(pdu) | Pdu::AlterContext(pdu) => pdu.encode(),
            Pdu::BindAck(pdu) | Pdu::AlterContextResp(pdu) => pdu.encode(),
            Pdu::BindNak(pdu) => pdu.encode(),
            Pdu::Request(pdu) => pdu.encode(),
            Pdu::Response(pdu) => pdu.encode(),
            Pdu::Fault(pdu) => pdu.encode(),
        }
    }

    pub fn header(&self) -> &PduHeader {
        match self {
            Pdu::Bind(pdu) | Pdu::AlterContext(pdu) => &pdu.header,
            Pdu::BindAck(pdu) | Pdu::AlterContextResp(pdu) => &pdu.header,
            Pdu::BindNak(pdu) => &pdu.header,
            Pdu::Request(pdu) => &pdu.header,
            Pdu::Response(pdu) => &pdu.header,
            Pdu::Fault(pdu) => &pdu.header,
        }
    }

    pub fn call_id(&self) -> u32 {
        self.header().call_id
    }
}
