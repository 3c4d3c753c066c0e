//! In-memory association for driving `Clusapi2Client` without a server.
//!
//! Requests are marshaled exactly as the TCP client would, recorded, and
//! answered from a queue of canned response stubs.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use cmrp::Clusapi2Client;
use dcerpc::{BoundConn, CallOptions, Operation, RpcError, SyntaxId};
use midl_ndr::{decode_complete, encode_complete, NdrContext, NdrDecode, NdrEncode};

/// One request as it went out
#[derive(Debug, Clone)]
pub struct Sent {
    pub opnum: u16,
    pub op_name: &'static str,
    pub stub: Vec<u8>,
}

#[derive(Default)]
pub struct MockConn {
    sent: Mutex<Vec<Sent>>,
    replies: Mutex<VecDeque<dcerpc::Result<Vec<u8>>>>,
    contexts: Mutex<Vec<SyntaxId>>,
}

impl MockConn {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response stub
    pub fn reply(self, stub: impl Into<Vec<u8>>) -> Self {
        self.replies.lock().unwrap().push_back(Ok(stub.into()));
        self
    }

    /// Queue a response stub marshaled from `response`
    pub fn reply_with<T: NdrEncode>(self, response: &T) -> Self {
        let stub = marshal(response);
        self.reply(stub)
    }

    /// Queue a transport failure
    pub fn fail(self, error: RpcError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn contexts(&self) -> Vec<SyntaxId> {
        self.contexts.lock().unwrap().clone()
    }
}

#[async_trait]
impl BoundConn for MockConn {
    async fn invoke(&self, op: &mut dyn Operation, _options: CallOptions) -> dcerpc::Result<()> {
        let ctx = NdrContext::new();
        let mut stub = BytesMut::new();
        op.marshal_request(&mut stub, &ctx)?;
        self.sent.lock().unwrap().push(Sent {
            opnum: op.opnum(),
            op_name: op.op_name(),
            stub: stub.to_vec(),
        });

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(RpcError::ConnectionClosed))?;
        let mut response = Bytes::from(reply);
        op.unmarshal_response(&mut response, &ctx)
    }

    async fn alter_context(&self, syntax: SyntaxId, _options: CallOptions) -> dcerpc::Result<()> {
        self.contexts.lock().unwrap().push(syntax);
        Ok(())
    }
}

pub fn client(conn: MockConn) -> Clusapi2Client<MockConn> {
    Clusapi2Client::new(conn)
}

/// Marshal a parameter list the way a stub would see it
pub fn marshal<T: NdrEncode>(value: &T) -> Vec<u8> {
    let ctx = NdrContext::new();
    let mut buf = BytesMut::new();
    let mut position = 0;
    encode_complete(value, &mut buf, &ctx, &mut position).unwrap();
    buf.to_vec()
}

/// Unmarshal a parameter list, requiring the whole stub to be consumed
pub fn unmarshal<T: NdrDecode>(stub: &[u8]) -> midl_ndr::Result<T> {
    let ctx = NdrContext::new();
    let mut reader = stub;
    let mut position = 0;
    let value = decode_complete(&mut reader, &ctx, &mut position)?;
    assert!(reader.is_empty(), "{} bytes left over", reader.len());
    Ok(value)
}

/// `[string] wchar_t*` body: max, offset, actual, UTF-16 with terminator
pub fn wide(s: &str) -> Vec<u8> {
    let units: Vec<u16> = s.encode_utf16().chain(std::iter::once(0)).collect();
    let count = units.len() as u32;
    let mut out = Vec::new();
    out.extend_from_slice(&count.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&count.to_le_bytes());
    for unit in units {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out
}

pub fn le(value: u32) -> [u8; 4] {
    value.to_le_bytes()
}
