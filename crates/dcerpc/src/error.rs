//! Error types for DCE RPC

use midl_ndr::NdrError;
use thiserror::Error;

use crate::pdu::PacketType;

/// RPC error types
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("NDR error: {0}")]
    Ndr(#[from] NdrError),

    #[error("RPC version mismatch: {0}")]
    RpcVersionMismatch(u8),

    #[error("invalid message type: {0}")]
    InvalidMessageType(u8),

    #[error("invalid PDU: {0}")]
    InvalidPdu(String),

    #[error("unexpected {got:?} PDU while waiting for {expected}")]
    UnexpectedPdu { expected: &'static str, got: PacketType },

    #[error("connection closed")]
    ConnectionClosed,

    #[error("timeout")]
    Timeout,

    #[error("bind rejected: {0}")]
    BindRejected(String),

    #[error("not bound")]
    NotBound,

    #[error("fault: status 0x{0:08x}")]
    Fault(u32),

    #[error("context mismatch")]
    ContextMismatch,

    #[error("call ID mismatch: expected {expected}, got {got}")]
    CallIdMismatch { expected: u32, got: u32 },

    #[error("PDU too large: {size} bytes exceeds maximum {max}")]
    PduTooLarge { size: usize, max: usize },

    #[error("fragment out of order")]
    FragmentOutOfOrder,

    #[error("fragment assembly error: {0}")]
    FragmentAssemblyError(String),

    #[error("invalid protocol tower: {0}")]
    InvalidTower(String),

    #[error("no endpoint registered for {interface} (status 0x{status:08x})")]
    EndpointNotFound { interface: String, status: u32 },
}

pub type Result<T> = std::result::Result<T, RpcError>;
