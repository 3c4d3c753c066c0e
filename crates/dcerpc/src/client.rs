//! DCE RPC client
//!
//! A connection-oriented client over any byte stream, TCP by default.
//! [`DceRpcConnection`] is an unbound connection; binding it yields a
//! [`DceRpcClient`], which carries [`Operation`]s one at a time.

use crate::error::{Result, RpcError};
use crate::fragmentation::{FragmentAssembler, FragmentGenerator};
use crate::operation::{BoundConn, CallOptions, Conn, Operation};
use crate::pdu::{
    BindAckPdu, BindPdu, ContextResult, DataRepresentation, Pdu, RequestPdu, SyntaxId, DEFAULT_MAX_FRAG,
};
use crate::transport::{DceRpcTransport, DEFAULT_MAX_PDU_SIZE};
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use midl_ndr::{NdrContext, MAX_NDR_ALLOCATION_SIZE};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tracing::{debug, trace, warn};

/// Association settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub max_xmit_frag: u16,
    pub max_recv_frag: u16,
    /// Largest PDU accepted from the server
    pub max_pdu_size: usize,
    /// Default timeout for connect and for each call
    pub timeout: Option<Duration>,
    /// Association group to join; zero asks for a new one
    pub assoc_group_id: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_xmit_frag: DEFAULT_MAX_FRAG,
            max_recv_frag: DEFAULT_MAX_FRAG,
            max_pdu_size: DEFAULT_MAX_PDU_SIZE,
            timeout: None,
            assoc_group_id: 0,
        }
    }
}

async fn with_timeout<T, F>(timeout: Option<Duration>, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match timeout {
        Some(timeout) => tokio::time::timeout(timeout, future)
            .await
            .map_err(|_| RpcError::Timeout)?,
        None => future.await,
    }
}

/// Unbound connection
pub struct DceRpcConnection<S = TcpStream> {
    transport: DceRpcTransport<S>,
    config: ClientConfig,
}

impl DceRpcConnection<TcpStream> {
    /// Open a TCP connection
    pub async fn connect(addr: SocketAddr, config: ClientConfig) -> Result<Self> {
        debug!("Connecting to {}", addr);
        let stream = with_timeout(config.timeout, async { TcpStream::connect(addr).await.map_err(RpcError::from) }).await?;
        stream.set_nodelay(true)?;
        Ok(Self::from_stream(stream, config))
    }
}

impl<S> DceRpcConnection<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    /// Wrap an established stream
    pub fn from_stream(stream: S, config: ClientConfig) -> Self {
        Self {
            transport: DceRpcTransport::new(stream).with_max_pdu_size(config.max_pdu_size),
            config,
        }
    }

    async fn negotiate(mut self, interface: SyntaxId) -> Result<DceRpcClient<S>> {
        let call_id = 1;
        let mut bind = BindPdu::new(call_id, interface);
        bind.max_xmit_frag = self.config.max_xmit_frag;
        bind.max_recv_frag = self.config.max_recv_frag;
        bind.assoc_group_id = self.config.assoc_group_id;

        debug!("Sending bind request: call_id={}, interface={}", call_id, interface);
        self.transport.write_pdu(&bind.encode()?).await?;

        let ack = match self.transport.read_pdu_decoded().await? {
            Pdu::BindAck(ack) => ack,
            Pdu::BindNak(nak) => {
                return Err(RpcError::BindRejected(format!("bind_nak, reason {}", nak.reject_reason)));
            }
            Pdu::Fault(fault) => return Err(RpcError::Fault(fault.status)),
            other => {
                return Err(RpcError::UnexpectedPdu {
                    expected: "bind_ack",
                    got: other.header().packet_type,
                })
            }
        };
        check_acceptance(&ack, call_id)?;

        // The server's receive size bounds what we may send
        let max_xmit_frag = ack.max_recv_frag.min(self.config.max_xmit_frag);
        debug!(
            "Bind successful: max_xmit={}, max_recv={}, assoc_group=0x{:x}",
            max_xmit_frag, ack.max_xmit_frag, ack.assoc_group_id
        );

        Ok(DceRpcClient {
            association: Mutex::new(Association {
                transport: self.transport,
                context_id: 0,
                next_context_id: 1,
                interface,
                in_call: false,
            }),
            call_id_counter: AtomicU32::new(call_id + 1),
            max_xmit_frag,
            assoc_group_id: ack.assoc_group_id,
            config: self.config,
        })
    }
}

#[async_trait]
impl<S> Conn for DceRpcConnection<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    type Bound = DceRpcClient<S>;

    async fn bind(self, syntax: SyntaxId) -> Result<DceRpcClient<S>> {
        let timeout = self.config.timeout;
        with_timeout(timeout, self.negotiate(syntax)).await
    }
}

fn check_acceptance(ack: &BindAckPdu, call_id: u32) -> Result<()> {
    if ack.header.call_id != call_id {
        return Err(RpcError::CallIdMismatch {
            expected: call_id,
            got: ack.header.call_id,
        });
    }
    match ack.results.first() {
        Some(entry) if entry.result == ContextResult::Acceptance => Ok(()),
        Some(entry) => Err(RpcError::BindRejected(format!(
            "{:?}, reason {}",
            entry.result, entry.reason
        ))),
        None => Err(RpcError::BindRejected("no presentation result".to_string())),
    }
}

struct Association<S> {
    transport: DceRpcTransport<S>,
    context_id: u16,
    next_context_id: u16,
    interface: SyntaxId,
    /// Set while a call owns the stream; still set when a call was
    /// cancelled halfway, which leaves the stream out of step.
    in_call: bool,
}

/// Bound client
///
/// Calls are serialized: each one holds the association from its first
/// request fragment to its last response fragment.
pub struct DceRpcClient<S = TcpStream> {
    association: Mutex<Association<S>>,
    call_id_counter: AtomicU32,
    max_xmit_frag: u16,
    assoc_group_id: u32,
    config: ClientConfig,
}

impl<S> DceRpcClient<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    pub fn max_xmit_frag(&self) -> u16 {
        self.max_xmit_frag
    }

    pub fn assoc_group_id(&self) -> u32 {
        self.assoc_group_id
    }

    /// The presentation syntax calls currently use
    pub async fn interface(&self) -> SyntaxId {
        self.association.lock().await.interface
    }

    fn next_call_id(&self) -> u32 {
        self.call_id_counter.fetch_add(1, Ordering::SeqCst)
    }

    /// Send a marshaled stub and return the response stub together with the
    /// data representation the server used.
    pub async fn call(&self, opnum: u16, stub_data: Bytes) -> Result<(Bytes, DataRepresentation)> {
        let mut assoc = self.association.lock().await;
        if assoc.in_call {
            return Err(RpcError::ConnectionClosed);
        }
        assoc.in_call = true;

        let call_id = self.next_call_id();
        let mut request = RequestPdu::new(call_id, opnum, stub_data);
        request.context_id = assoc.context_id;

        let fragments = FragmentGenerator::fragment_request(&request, self.max_xmit_frag);
        debug!(
            "Sending request: call_id={}, opnum={}, stub_len={}, fragments={}",
            call_id,
            opnum,
            request.stub_data.len(),
            fragments.len()
        );
        for frag in &fragments {
            assoc.transport.write_pdu(&frag.encode()?).await?;
        }

        let result = self.receive_response(&mut assoc.transport, call_id).await;
        // A fault still completes the exchange
        if matches!(result, Ok(_) | Err(RpcError::Fault(_))) {
            assoc.in_call = false;
        }
        result
    }

    async fn receive_response(
        &self,
        transport: &mut DceRpcTransport<S>,
        call_id: u32,
    ) -> Result<(Bytes, DataRepresentation)> {
        let mut assembler = FragmentAssembler::new(call_id, MAX_NDR_ALLOCATION_SIZE);

        loop {
            match transport.read_pdu_decoded().await? {
                Pdu::Response(response) => {
                    let data_rep = response.header.data_rep;
                    if let Some(stub) = assembler.add_fragment(
                        &response.header,
                        &response.stub_data,
                        response.context_id,
                        response.alloc_hint,
                    )? {
                        trace!("Call succeeded: {} bytes result", stub.len());
                        return Ok((stub, data_rep));
                    }
                    trace!("Received response fragment: {} bytes", response.stub_data.len());
                }
                Pdu::Fault(fault) => {
                    if fault.header.call_id != call_id {
                        return Err(RpcError::CallIdMismatch {
                            expected: call_id,
                            got: fault.header.call_id,
                        });
                    }
                    warn!("Call {} faulted: status=0x{:08x}", call_id, fault.status);
                    return Err(RpcError::Fault(fault.status));
                }
                other => {
                    return Err(RpcError::UnexpectedPdu {
                        expected: "response",
                        got: other.header().packet_type,
                    })
                }
            }
        }
    }

    async fn invoke_inner(&self, op: &mut dyn Operation) -> Result<()> {
        let ctx = NdrContext::new();
        let mut stub = BytesMut::new();
        op.marshal_request(&mut stub, &ctx)?;

        debug!("Invoking {} (opnum {})", op.op_name(), op.opnum());
        let (mut response, data_rep) = self.call(op.opnum(), stub.freeze()).await?;
        op.unmarshal_response(&mut response, &data_rep.context())
    }

    async fn alter_context_inner(&self, syntax: SyntaxId) -> Result<()> {
        let mut assoc = self.association.lock().await;
        if assoc.in_call {
            return Err(RpcError::ConnectionClosed);
        }
        assoc.in_call = true;

        let call_id = self.next_call_id();
        let context_id = assoc.next_context_id;
        let mut alter = BindPdu::alter_context(call_id, context_id, syntax);
        alter.max_xmit_frag = self.config.max_xmit_frag;
        alter.max_recv_frag = self.config.max_recv_frag;
        alter.assoc_group_id = self.assoc_group_id;

        debug!(
            "Sending alter_context: call_id={}, context_id={}, syntax={}",
            call_id, context_id, syntax
        );
        assoc.transport.write_pdu(&alter.encode()?).await?;

        let resp = match assoc.transport.read_pdu_decoded().await? {
            Pdu::AlterContextResp(resp) => resp,
            Pdu::Fault(fault) => {
                assoc.in_call = false;
                return Err(RpcError::Fault(fault.status));
            }
            other => {
                return Err(RpcError::UnexpectedPdu {
                    expected: "alter_context_resp",
                    got: other.header().packet_type,
                })
            }
        };
        assoc.in_call = false;
        check_acceptance(&resp, call_id)?;

        assoc.context_id = context_id;
        assoc.next_context_id = context_id.wrapping_add(1);
        assoc.interface = syntax;
        debug!("Alter context accepted: context_id={}", context_id);
        Ok(())
    }
}

#[async_trait]
impl<S> BoundConn for DceRpcClient<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    async fn invoke(&self, op: &mut dyn Operation, options: CallOptions) -> Result<()> {
        with_timeout(options.timeout.or(self.config.timeout), self.invoke_inner(op)).await
    }

    async fn alter_context(&self, syntax: SyntaxId, options: CallOptions) -> Result<()> {
        with_timeout(options.timeout.or(self.config.timeout), self.alter_context_inner(syntax)).await
    }
}

/// Builder for DCE RPC clients
#[derive(Debug, Clone, Default)]
pub struct DceRpcClientBuilder {
    config: ClientConfig,
}

impl DceRpcClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_xmit_frag(mut self, size: u16) -> Self {
        self.config.max_xmit_frag = size;
        self
    }

    pub fn max_recv_frag(mut self, size: u16) -> Self {
        self.config.max_recv_frag = size;
        self
    }

    pub fn max_pdu_size(mut self, size: usize) -> Self {
        self.config.max_pdu_size = size;
        self
    }

    /// Timeout for connect, bind and each call
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    pub fn assoc_group_id(mut self, id: u32) -> Self {
        self.config.assoc_group_id = id;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Open an unbound TCP connection
    pub async fn connect(self, addr: SocketAddr) -> Result<DceRpcConnection> {
        DceRpcConnection::connect(addr, self.config).await
    }

    /// Wrap an established stream
    pub fn from_stream<S>(self, stream: S) -> DceRpcConnection<S>
    where
        S: AsyncRead + AsyncWrite + Unpin + Send,
    {
        DceRpcConnection::from_stream(stream, self.config)
    }

    /// Connect over TCP and bind `interface`
    pub async fn bind(self, addr: SocketAddr, interface: SyntaxId) -> Result<DceRpcClient> {
        self.connect(addr).await?.bind(interface).await
    }
}
