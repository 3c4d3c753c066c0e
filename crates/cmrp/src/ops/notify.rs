//! Notification port methods
//!
//! A port collects change events for the objects registered on it with the
//! `AddNotify*` methods. `ApiGetNotify` blocks on the server until an event
//! arrives or its `timeout` (milliseconds, sent as data) expires;
//! `ApiUnblockGetNotifyCall` releases a waiting call.

use midl_ndr::ndr_params;

use super::{ReturnResponse, StateSequenceResponse};
use crate::handles::{HCluster, HGroup, HKey, HNetInterface, HNetwork, HNode, HNotify, HResource};
use crate::opnum;

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CreateNotifyRequest {}
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CreateNotifyResponse {
        pub status: u32,
        pub handle: HNotify,
    }
}

procedure!(CreateNotifyRequest => CreateNotifyResponse, opnum::CREATE_NOTIFY, "ApiCreateNotify");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CloseNotifyRequest {
        pub notify: HNotify,
    }
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CloseNotifyResponse {
        pub notify: HNotify,
        pub return_value: u32,
    }
}

procedure!(CloseNotifyRequest => CloseNotifyResponse, opnum::CLOSE_NOTIFY, "ApiCloseNotify");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct AddNotifyClusterRequest {
        pub notify: HNotify,
        pub cluster: HCluster,
        pub filter: u32,
        /// Caller-chosen value echoed back with each event
        pub notify_key: u32,
    }
}

pub type AddNotifyClusterResponse = ReturnResponse;

procedure!(AddNotifyClusterRequest => AddNotifyClusterResponse, opnum::ADD_NOTIFY_CLUSTER, "ApiAddNotifyCluster");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct AddNotifyNodeRequest {
        pub notify: HNotify,
        pub node: HNode,
        pub filter: u32,
        pub notify_key: u32,
    }
}

pub type AddNotifyNodeResponse = StateSequenceResponse;

procedure!(AddNotifyNodeRequest => AddNotifyNodeResponse, opnum::ADD_NOTIFY_NODE, "ApiAddNotifyNode");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct AddNotifyGroupRequest {
        pub notify: HNotify,
        pub group: HGroup,
        pub filter: u32,
        pub notify_key: u32,
    }
}

pub type AddNotifyGroupResponse = StateSequenceResponse;

procedure!(AddNotifyGroupRequest => AddNotifyGroupResponse, opnum::ADD_NOTIFY_GROUP, "ApiAddNotifyGroup");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct AddNotifyResourceRequest {
        pub notify: HNotify,
        pub resource: HResource,
        pub filter: u32,
        pub notify_key: u32,
    }
}

pub type AddNotifyResourceResponse = StateSequenceResponse;

procedure!(AddNotifyResourceRequest => AddNotifyResourceResponse, opnum::ADD_NOTIFY_RESOURCE, "ApiAddNotifyResource");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct AddNotifyKeyRequest {
        pub notify: HNotify,
        pub key: HKey,
        pub notify_key: u32,
        pub filter: u32,
        pub watch_sub_tree: bool => bool32(),
    }
}

pub type AddNotifyKeyResponse = ReturnResponse;

procedure!(AddNotifyKeyRequest => AddNotifyKeyResponse, opnum::ADD_NOTIFY_KEY, "ApiAddNotifyKey");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct ReAddNotifyNodeRequest {
        pub notify: HNotify,
        pub node: HNode,
        pub filter: u32,
        pub notify_key: u32,
        pub state_sequence: u32,
    }
}

pub type ReAddNotifyNodeResponse = ReturnResponse;

procedure!(ReAddNotifyNodeRequest => ReAddNotifyNodeResponse, opnum::READD_NOTIFY_NODE, "ApiReAddNotifyNode");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct ReAddNotifyGroupRequest {
        pub notify: HNotify,
        pub group: HGroup,
        pub filter: u32,
        pub notify_key: u32,
        pub state_sequence: u32,
    }
}

pub type ReAddNotifyGroupResponse = ReturnResponse;

procedure!(ReAddNotifyGroupRequest => ReAddNotifyGroupResponse, opnum::READD_NOTIFY_GROUP, "ApiReAddNotifyGroup");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct ReAddNotifyResourceRequest {
        pub notify: HNotify,
        pub resource: HResource,
        pub filter: u32,
        pub notify_key: u32,
        pub state_sequence: u32,
    }
}

pub type ReAddNotifyResourceResponse = ReturnResponse;

procedure!(
    ReAddNotifyResourceRequest => ReAddNotifyResourceResponse,
    opnum::READD_NOTIFY_RESOURCE,
    "ApiReAddNotifyResource"
);

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetNotifyRequest {
        pub notify: HNotify,
        pub timeout: u32,
    }
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetNotifyResponse {
        pub notify_key: u32,
        pub filter: u32,
        pub state_sequence: u32,
        /// Name of the object the event is about
        pub name: Option<String>,
        pub return_value: u32,
    }
}

procedure!(GetNotifyRequest => GetNotifyResponse, opnum::GET_NOTIFY, "ApiGetNotify");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct AddNotifyNetworkRequest {
        pub notify: HNotify,
        pub network: HNetwork,
        pub filter: u32,
        pub notify_key: u32,
    }
}

pub type AddNotifyNetworkResponse = StateSequenceResponse;

procedure!(AddNotifyNetworkRequest => AddNotifyNetworkResponse, opnum::ADD_NOTIFY_NETWORK, "ApiAddNotifyNetwork");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct ReAddNotifyNetworkRequest {
        pub notify: HNotify,
        pub network: HNetwork,
        pub filter: u32,
        pub notify_key: u32,
        pub state_sequence: u32,
    }
}

pub type ReAddNotifyNetworkResponse = ReturnResponse;

procedure!(
    ReAddNotifyNetworkRequest => ReAddNotifyNetworkResponse,
    opnum::READD_NOTIFY_NETWORK,
    "ApiReAddNotifyNetwork"
);

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct AddNotifyNetInterfaceRequest {
        pub notify: HNotify,
        pub net_interface: HNetInterface,
        pub filter: u32,
        pub notify_key: u32,
    }
}

pub type AddNotifyNetInterfaceResponse = StateSequenceResponse;

procedure!(
    AddNotifyNetInterfaceRequest => AddNotifyNetInterfaceResponse,
    opnum::ADD_NOTIFY_NET_INTERFACE,
    "ApiAddNotifyNetInterface"
);

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct ReAddNotifyNetInterfaceRequest {
        pub notify: HNotify,
        pub net_interface: HNetInterface,
        pub filter: u32,
        pub notify_key: u32,
        pub state_sequence: u32,
    }
}

pub type ReAddNotifyNetInterfaceResponse = ReturnResponse;

procedure!(
    ReAddNotifyNetInterfaceRequest => ReAddNotifyNetInterfaceResponse,
    opnum::READD_NOTIFY_NET_INTERFACE,
    "ApiReAddNotifyNetInterface"
);

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct UnblockGetNotifyCallRequest {
        pub notify: HNotify,
    }
}

pub type UnblockGetNotifyCallResponse = ReturnResponse;

procedure!(
    UnblockGetNotifyCallRequest => UnblockGetNotifyCallResponse,
    opnum::UNBLOCK_GET_NOTIFY_CALL,
    "ApiUnblockGetNotifyCall"
);

status_field!(CreateNotifyResponse);

return_code!(CloseNotifyResponse, GetNotifyResponse);
