//! Request and response types of every `clusapi2` method
//!
//! Field order is wire order. Request types hold the `[in]` parameters,
//! response types the `[out]` parameters followed by the return value.
//!
//! Most methods return a Win32 status in `return_value`. The open and create
//! methods instead return the new handle in `handle` and report failure
//! through a separate `status` parameter that precedes it.
//!
//! Methods whose responses have the same shape share one response type; the
//! per-method names are aliases.

use dcerpc::{CallStatus, Procedure, SuccessSignal};
use midl_ndr::ndr_params;

use crate::types::{EnumEntry, EnumList};

macro_rules! procedure {
    ($request:ty => $response:ty, $opnum:path, $method:literal) => {
        impl dcerpc::Procedure for $request {
            const OPNUM: u16 = $opnum;
            const NAME: &'static str = concat!("/clusapi2/v2/", $method);
            type Response = $response;
        }
    };
}

macro_rules! return_code {
    ($($response:ty),* $(,)?) => {
        $(
            impl dcerpc::CallStatus for $response {
                const SIGNAL: dcerpc::SuccessSignal = dcerpc::SuccessSignal::ReturnCode;

                fn status_code(&self) -> u32 {
                    self.return_value
                }
            }
        )*
    };
}

macro_rules! status_field {
    ($($response:ty),* $(,)?) => {
        $(
            impl dcerpc::CallStatus for $response {
                const SIGNAL: dcerpc::SuccessSignal = dcerpc::SuccessSignal::StatusField;

                fn status_code(&self) -> u32 {
                    self.status
                }
            }
        )*
    };
}

mod cluster;
mod control;
mod group;
mod net_interface;
mod network;
mod node;
mod notify;
mod registry;
mod resource;

pub use cluster::*;
pub use control::*;
pub use group::*;
pub use net_interface::*;
pub use network::*;
pub use node::*;
pub use notify::*;
pub use registry::*;
pub use resource::*;

ndr_params! {
    /// Response of methods with no `[out]` parameters
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct ReturnResponse {
        pub return_value: u32,
    }
}

ndr_params! {
    /// Response of the `Create*Enum` methods
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct EnumResponse {
        pub return_enum: Option<EnumList>,
        pub return_value: u32,
    }
}

impl EnumResponse {
    /// The returned entries; empty when the server sent no list.
    pub fn entries(&self) -> &[EnumEntry] {
        self.return_enum.as_ref().map_or(&[], |list| list.entries.as_slice())
    }
}

ndr_params! {
    /// Response of the `Get*Id` methods
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct IdResponse {
        /// Object id as a GUID string
        pub guid: Option<String>,
        pub return_value: u32,
    }
}

ndr_params! {
    /// Response of the node, network and network interface state queries
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct StateResponse {
        pub state: u32,
        pub return_value: u32,
    }
}

ndr_params! {
    /// Response of the `AddNotify*` methods that report the object's state
    /// sequence number
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct StateSequenceResponse {
        pub state_sequence: u32,
        pub return_value: u32,
    }
}

return_code!(ReturnResponse, EnumResponse, IdResponse, StateResponse, StateSequenceResponse);

/// Success rule of `P`, for callers that dispatch on it.
pub fn success_signal<P: Procedure>() -> SuccessSignal {
    <P::Response as CallStatus>::SIGNAL
}
