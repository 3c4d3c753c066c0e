//! Operation and connection seams
//!
//! An [`Operation`] is one call in flight: it knows its opnum, writes its
//! request stub and reads its response stub. A [`BoundConn`] carries
//! operations to a server over an association that has negotiated an
//! interface. Interface bindings describe each method as a [`Procedure`]
//! (an NDR parameter list plus opnum, name and response type) and run it
//! through the generic [`Call`].

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use midl_ndr::{decode_complete, encode_complete, NdrContext, NdrDecode, NdrEncode};

use crate::error::Result;
use crate::pdu::SyntaxId;

/// One RPC call: request marshaling and response unmarshaling.
pub trait Operation: Send {
    fn opnum(&self) -> u16;

    /// `/interface/version/Method`, used in diagnostics
    fn op_name(&self) -> &'static str;

    fn marshal_request(&mut self, buf: &mut BytesMut, ctx: &NdrContext) -> Result<()>;

    fn unmarshal_response(&mut self, buf: &mut Bytes, ctx: &NdrContext) -> Result<()>;
}

/// Which response field decides whether a call succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessSignal {
    /// A `u32` return value; zero is success.
    ReturnCode,
    /// The return slot holds a handle; a separate `Status` out-parameter
    /// carries the error code.
    StatusField,
}

/// Access to the status code of a decoded response.
pub trait CallStatus {
    const SIGNAL: SuccessSignal;

    /// The status code selected by [`Self::SIGNAL`].
    fn status_code(&self) -> u32;

    fn is_success(&self) -> bool {
        self.status_code() == 0
    }
}

/// An interface method: its `[in]` parameter list, identity and response.
pub trait Procedure: NdrEncode + NdrDecode + Send + 'static {
    const OPNUM: u16;
    const NAME: &'static str;

    type Response: NdrEncode + NdrDecode + CallStatus + Default + Send + 'static;
}

/// Callback run on a parameter list between preparation and marshaling, or
/// right after unmarshaling.
pub type Hook<T> = Box<dyn Fn(&mut T) -> midl_ndr::Result<()> + Send + Sync>;

/// A [`Procedure`] in flight.
pub struct Call<P: Procedure> {
    pub request: P,
    pub response: Option<P::Response>,
    request_hook: Option<Hook<P>>,
    response_hook: Option<Hook<P::Response>>,
}

impl<P: Procedure> Call<P> {
    pub fn new(request: P) -> Self {
        Self {
            request,
            response: None,
            request_hook: None,
            response_hook: None,
        }
    }

    /// Run `hook` on the request after correlation fields are filled in.
    pub fn with_request_hook(mut self, hook: Hook<P>) -> Self {
        self.request_hook = Some(hook);
        self
    }

    /// Run `hook` on the response after it is decoded.
    pub fn with_response_hook(mut self, hook: Hook<P::Response>) -> Self {
        self.response_hook = Some(hook);
        self
    }

    pub fn into_response(self) -> Option<P::Response> {
        self.response
    }
}

impl<P: Procedure + fmt::Debug> fmt::Debug for Call<P>
where
    P::Response: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Call")
            .field("op", &P::NAME)
            .field("request", &self.request)
            .field("response", &self.response)
            .finish()
    }
}

impl<P: Procedure> Operation for Call<P> {
    fn opnum(&self) -> u16 {
        P::OPNUM
    }

    fn op_name(&self) -> &'static str {
        P::NAME
    }

    fn marshal_request(&mut self, buf: &mut BytesMut, ctx: &NdrContext) -> Result<()> {
        self.request.ndr_prepare()?;
        if let Some(hook) = &self.request_hook {
            hook(&mut self.request)?;
        }
        let mut position = 0;
        encode_complete(&self.request, buf, ctx, &mut position)?;
        Ok(())
    }

    fn unmarshal_response(&mut self, buf: &mut Bytes, ctx: &NdrContext) -> Result<()> {
        let mut position = 0;
        let mut response: P::Response = decode_complete(buf, ctx, &mut position)?;
        if let Some(hook) = &self.response_hook {
            hook(&mut response)?;
        }
        self.response = Some(response);
        Ok(())
    }
}

/// Per-call options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallOptions {
    /// Overrides the association's default timeout.
    pub timeout: Option<Duration>,
}

impl CallOptions {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// An unbound connection.
#[async_trait]
pub trait Conn: Send {
    type Bound: BoundConn;

    /// Negotiate `syntax` and return the bound association.
    async fn bind(self, syntax: SyntaxId) -> Result<Self::Bound>;
}

/// An association with a negotiated interface.
#[async_trait]
pub trait BoundConn: Send + Sync {
    /// Marshal `op`, send it, wait for the response and unmarshal it into
    /// `op`. Dropping the returned future cancels the call.
    async fn invoke(&self, op: &mut dyn Operation, options: CallOptions) -> Result<()>;

    /// Switch the association to presentation syntax `syntax`.
    async fn alter_context(&self, syntax: SyntaxId, options: CallOptions) -> Result<()>;
}
