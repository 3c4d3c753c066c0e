//! Framed PDU transport
//!
//! Connection-oriented PDUs are self-delimiting: the frag_length field of
//! the common header gives the size of each one.

use crate::error::{Result, RpcError};
use crate::pdu::{Pdu, PduHeader};
use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::trace;

/// Largest PDU accepted from the peer unless configured otherwise
pub const DEFAULT_MAX_PDU_SIZE: usize = 65536;

/// Reads and writes whole PDUs over a byte stream
pub struct DceRpcTransport<T> {
    inner: T,
    max_pdu_size: usize,
    read_buf: BytesMut,
}

impl<T> DceRpcTransport<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            max_pdu_size: DEFAULT_MAX_PDU_SIZE,
            read_buf: BytesMut::with_capacity(8192),
        }
    }

    pub fn with_max_pdu_size(mut self, max_size: usize) -> Self {
        self.max_pdu_size = max_size;
        self
    }

    pub fn max_pdu_size(&self) -> usize {
        self.max_pdu_size
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: AsyncRead + Unpin> DceRpcTransport<T> {
    /// Read one complete PDU
    pub async fn read_pdu(&mut self) -> Result<Bytes> {
        while self.read_buf.len() < PduHeader::SIZE {
            if self.inner.read_buf(&mut self.read_buf).await? == 0 {
                return Err(if self.read_buf.is_empty() {
                    RpcError::ConnectionClosed
                } else {
                    RpcError::Io(std::io::Error::new(
                        std::io::ErrorKind::UnexpectedEof,
                        "incomplete PDU header",
                    ))
                });
            }
        }

        let header = PduHeader::decode(&self.read_buf)?;
        let frag_length = header.frag_length as usize;

        if frag_length < PduHeader::SIZE {
            return Err(RpcError::InvalidPdu(format!(
                "fragment length {} is shorter than the header",
                frag_length
            )));
        }
        if frag_length > self.max_pdu_size {
            return Err(RpcError::PduTooLarge {
                size: frag_length,
                max: self.max_pdu_size,
            });
        }

        while self.read_buf.len() < frag_length {
            self.read_buf.reserve(frag_length - self.read_buf.len());
            if self.inner.read_buf(&mut self.read_buf).await? == 0 {
                return Err(RpcError::Io(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    format!(
                        "incomplete PDU: expected {} bytes, got {}",
                        frag_length,
                        self.read_buf.len()
                    ),
                )));
            }
        }

        trace!(
            "read {:?} PDU: call_id={}, frag_length={}",
            header.packet_type,
            header.call_id,
            frag_length
        );
        Ok(self.read_buf.split_to(frag_length).freeze())
    }

    /// Read and decode one PDU
    pub async fn read_pdu_decoded(&mut self) -> Result<Pdu> {
        let data = self.read_pdu().await?;
        Pdu::decode(&data)
    }
}

impl<T: AsyncWrite + Unpin> DceRpcTransport<T> {
    /// Write an encoded PDU
    pub async fn write_pdu(&mut self, data: &[u8]) -> Result<()> {
        self.inner.write_all(data).await?;
        self.inner.flush().await?;
        Ok(())
    }

    /// Encode and write a PDU
    pub async fn write_pdu_encoded(&mut self, pdu: &Pdu) -> Result<()> {
        let data = pdu.encode()?;
        self.write_pdu(&data).await
    }
}
