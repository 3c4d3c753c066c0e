//! Network methods

use midl_ndr::ndr_params;

use super::{EnumResponse, IdResponse, ReturnResponse, StateResponse};
use crate::handles::HNetwork;
use crate::opnum;

/// Largest list `ApiSetNetworkPriorityOrder` accepts
pub const MAX_NETWORK_PRIORITY_COUNT: u32 = 1000;

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct OpenNetworkRequest {
        pub network_name: String,
    }
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct OpenNetworkResponse {
        pub status: u32,
        pub handle: HNetwork,
    }
}

procedure!(OpenNetworkRequest => OpenNetworkResponse, opnum::OPEN_NETWORK, "ApiOpenNetwork");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CloseNetworkRequest {
        pub network: HNetwork,
    }
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CloseNetworkResponse {
        pub network: HNetwork,
        pub return_value: u32,
    }
}

procedure!(CloseNetworkRequest => CloseNetworkResponse, opnum::CLOSE_NETWORK, "ApiCloseNetwork");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetNetworkStateRequest {
        pub network: HNetwork,
    }
}

pub type GetNetworkStateResponse = StateResponse;

procedure!(GetNetworkStateRequest => GetNetworkStateResponse, opnum::GET_NETWORK_STATE, "ApiGetNetworkState");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct SetNetworkNameRequest {
        pub network: HNetwork,
        pub network_name: String,
    }
}

pub type SetNetworkNameResponse = ReturnResponse;

procedure!(SetNetworkNameRequest => SetNetworkNameResponse, opnum::SET_NETWORK_NAME, "ApiSetNetworkName");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CreateNetworkEnumRequest {
        pub network: HNetwork,
        pub enum_type: u32,
    }
}

pub type CreateNetworkEnumResponse = EnumResponse;

procedure!(CreateNetworkEnumRequest => CreateNetworkEnumResponse, opnum::CREATE_NETWORK_ENUM, "ApiCreateNetworkEnum");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetNetworkIdRequest {
        pub network: HNetwork,
    }
}

pub type GetNetworkIdResponse = IdResponse;

procedure!(GetNetworkIdRequest => GetNetworkIdResponse, opnum::GET_NETWORK_ID, "ApiGetNetworkId");

ndr_params! {
    /// Order internal networks by preference.
    ///
    /// `network_count` is filled from the list when left at zero and must
    /// not exceed [`MAX_NETWORK_PRIORITY_COUNT`].
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct SetNetworkPriorityOrderRequest {
        pub network_count: u32 => range(0, 1000),
        pub network_id_list: Vec<Option<String>> => size_is(network_count),
    }
}

impl SetNetworkPriorityOrderRequest {
    pub fn new<I, S>(network_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            network_count: 0,
            network_id_list: network_ids.into_iter().map(|id| Some(id.into())).collect(),
        }
    }
}

pub type SetNetworkPriorityOrderResponse = ReturnResponse;

procedure!(
    SetNetworkPriorityOrderRequest => SetNetworkPriorityOrderResponse,
    opnum::SET_NETWORK_PRIORITY_ORDER,
    "ApiSetNetworkPriorityOrder"
);

status_field!(OpenNetworkResponse);

return_code!(CloseNetworkResponse);

#[cfg(test)]
mod tests {
    use super::*;
    use midl_ndr::{encode_complete, BytesMut, NdrContext, NdrEncode, NdrError};

    #[test]
    fn test_priority_list_layout() {
        let mut request = SetNetworkPriorityOrderRequest::new(["n1"]);
        request.ndr_prepare().unwrap();
        assert_eq!(request.network_count, 1);

        let ctx = NdrContext::new();
        let mut buf = BytesMut::new();
        let mut pos = 0;
        encode_complete(&request, &mut buf, &ctx, &mut pos).unwrap();
        assert_eq!(
            &buf[..],
            &[
                1, 0, 0, 0, // network_count
                1, 0, 0, 0, // max_count
                0, 0, 2, 0, // referent
                3, 0, 0, 0, 0, 0, 0, 0, 3, 0, 0, 0, b'n', 0, b'1', 0, 0, 0,
            ]
        );
    }

    #[test]
    fn test_priority_list_bound() {
        let mut request = SetNetworkPriorityOrderRequest::new((0..=MAX_NETWORK_PRIORITY_COUNT).map(|i| i.to_string()));
        request.ndr_prepare().unwrap();
        assert_eq!(request.network_count, 1001);

        let ctx = NdrContext::new();
        let mut buf = BytesMut::new();
        let mut pos = 0;
        assert!(matches!(
            request.ndr_encode(&mut buf, &ctx, &mut pos),
            Err(NdrError::OutOfRange {
                field: "network_count",
                value: 1001,
                ..
            })
        ));
    }
}
