//! Connection-oriented DCE RPC (MS-RPCE) client
//!
//! This crate carries NDR-marshaled calls to a server over TCP
//! (`ncacn_ip_tcp`): bind and alter-context negotiation with the NDR20
//! transfer syntax, request fragmentation, response reassembly and fault
//! mapping.
//!
//! Interface bindings plug in through two seams:
//!
//! - [`Operation`]: one call, able to marshal its request and unmarshal its
//!   response. [`Call`] implements it for any [`Procedure`].
//! - [`Conn`] / [`BoundConn`]: the transport, abstract so bindings can be
//!   tested against in-memory peers.
//!
//! [`epm`] finds the dynamic TCP port of an interface through the endpoint
//! mapper on port 135.
//!
//! # Example
//!
//! ```no_run
//! use dcerpc::{DceRpcClientBuilder, SyntaxId};
//! use midl_ndr::NdrUuid;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> dcerpc::Result<()> {
//!     let interface = SyntaxId::new(
//!         NdrUuid::parse("b97db8b2-4c63-11cf-bfe6-08002be23f2f").unwrap(),
//!         2,
//!         0,
//!     );
//!
//!     let client = DceRpcClientBuilder::new()
//!         .timeout(Duration::from_secs(30))
//!         .bind("192.0.2.10:49152".parse().unwrap(), interface)
//!         .await?;
//!
//!     let (_stub, _data_rep) = client.call(3, bytes::Bytes::new()).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod epm;
pub mod error;
pub mod fragmentation;
pub mod operation;
pub mod pdu;
pub mod status;
pub mod transport;

pub use client::{ClientConfig, DceRpcClient, DceRpcClientBuilder, DceRpcConnection};
pub use epm::{resolve_tcp, EpmClient, ProtocolTower, EPM_PORT, EPM_SYNTAX};
pub use error::{Result, RpcError};
pub use fragmentation::{FragmentAssembler, FragmentGenerator};
pub use operation::{BoundConn, Call, CallOptions, CallStatus, Conn, Hook, Operation, Procedure, SuccessSignal};
pub use pdu::{
    BindAckPdu, BindNakPdu, BindPdu, ContextElement, ContextResult, DataRepresentation, FaultPdu, PacketFlags,
    PacketType, Pdu, PduHeader, PresentationResult, RequestPdu, ResponsePdu, SyntaxId, DCE_RPC_VERSION,
    DCE_RPC_VERSION_MINOR, DEFAULT_MAX_FRAG, NDR_SYNTAX,
};
pub use status::Win32Status;
pub use transport::{DceRpcTransport, DEFAULT_MAX_PDU_SIZE};
