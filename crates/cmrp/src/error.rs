//! Call errors

use dcerpc::{RpcError, Win32Status};
use thiserror::Error;

/// Failure of one `clusapi2` call with response type `R`.
#[derive(Debug, Error)]
pub enum CallError<R> {
    /// Marshaling, transport or unmarshaling failed; there is no response.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// The server answered with a failing status. `response` is the complete
    /// decoded response, since some out-parameters stay meaningful (such as
    /// `required` after `ERROR_MORE_DATA`).
    #[error("{op_name}: {status}")]
    Status {
        op_name: &'static str,
        status: Win32Status,
        response: R,
    },
}

impl<R> CallError<R> {
    /// The server's status, for application-level failures
    pub fn status(&self) -> Option<Win32Status> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Rpc(_) => None,
        }
    }

    pub fn response(&self) -> Option<&R> {
        match self {
            Self::Status { response, .. } => Some(response),
            Self::Rpc(_) => None,
        }
    }

    pub fn into_response(self) -> Option<R> {
        match self {
            Self::Status { response, .. } => Some(response),
            Self::Rpc(_) => None,
        }
    }

    /// True when the server reported `status`.
    pub fn is_status(&self, status: Win32Status) -> bool {
        self.status() == Some(status)
    }
}

/// Result of a call returning response type `T`
pub type Result<T> = std::result::Result<T, CallError<T>>;
