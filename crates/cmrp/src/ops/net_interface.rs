//! Network interface methods

use midl_ndr::ndr_params;

use super::{IdResponse, StateResponse};
use crate::handles::HNetInterface;
use crate::opnum;

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct OpenNetInterfaceRequest {
        pub net_interface_name: String,
    }
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct OpenNetInterfaceResponse {
        pub status: u32,
        pub handle: HNetInterface,
    }
}

procedure!(OpenNetInterfaceRequest => OpenNetInterfaceResponse, opnum::OPEN_NET_INTERFACE, "ApiOpenNetInterface");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CloseNetInterfaceRequest {
        pub net_interface: HNetInterface,
    }
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CloseNetInterfaceResponse {
        pub net_interface: HNetInterface,
        pub return_value: u32,
    }
}

procedure!(CloseNetInterfaceRequest => CloseNetInterfaceResponse, opnum::CLOSE_NET_INTERFACE, "ApiCloseNetInterface");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetNetInterfaceStateRequest {
        pub net_interface: HNetInterface,
    }
}

pub type GetNetInterfaceStateResponse = StateResponse;

procedure!(
    GetNetInterfaceStateRequest => GetNetInterfaceStateResponse,
    opnum::GET_NET_INTERFACE_STATE,
    "ApiGetNetInterfaceState"
);

ndr_params! {
    /// Look up the interface connecting a node to a network
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetNetInterfaceRequest {
        pub node_name: String,
        pub network_name: String,
    }
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetNetInterfaceResponse {
        pub interface_name: Option<String>,
        pub return_value: u32,
    }
}

procedure!(GetNetInterfaceRequest => GetNetInterfaceResponse, opnum::GET_NET_INTERFACE, "ApiGetNetInterface");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetNetInterfaceIdRequest {
        pub net_interface: HNetInterface,
    }
}

pub type GetNetInterfaceIdResponse = IdResponse;

procedure!(GetNetInterfaceIdRequest => GetNetInterfaceIdResponse, opnum::GET_NET_INTERFACE_ID, "ApiGetNetInterfaceId");

status_field!(OpenNetInterfaceResponse);

return_code!(CloseNetInterfaceResponse, GetNetInterfaceResponse);
