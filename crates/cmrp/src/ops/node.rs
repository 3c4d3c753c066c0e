//! Node methods

use midl_ndr::ndr_params;

use super::{EnumResponse, IdResponse, ReturnResponse, StateResponse};
use crate::handles::HNode;
use crate::opnum;

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct OpenNodeRequest {
        pub node_name: String,
    }
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct OpenNodeResponse {
        pub status: u32,
        pub handle: HNode,
    }
}

procedure!(OpenNodeRequest => OpenNodeResponse, opnum::OPEN_NODE, "ApiOpenNode");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CloseNodeRequest {
        pub node: HNode,
    }
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CloseNodeResponse {
        pub node: HNode,
        pub return_value: u32,
    }
}

procedure!(CloseNodeRequest => CloseNodeResponse, opnum::CLOSE_NODE, "ApiCloseNode");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetNodeStateRequest {
        pub node: HNode,
    }
}

pub type GetNodeStateResponse = StateResponse;

procedure!(GetNodeStateRequest => GetNodeStateResponse, opnum::GET_NODE_STATE, "ApiGetNodeState");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetNodeIdRequest {
        pub node: HNode,
    }
}

pub type GetNodeIdResponse = IdResponse;

procedure!(GetNodeIdRequest => GetNodeIdResponse, opnum::GET_NODE_ID, "ApiGetNodeId");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct PauseNodeRequest {
        pub node: HNode,
    }
}

pub type PauseNodeResponse = ReturnResponse;

procedure!(PauseNodeRequest => PauseNodeResponse, opnum::PAUSE_NODE, "ApiPauseNode");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct ResumeNodeRequest {
        pub node: HNode,
    }
}

pub type ResumeNodeResponse = ReturnResponse;

procedure!(ResumeNodeRequest => ResumeNodeResponse, opnum::RESUME_NODE, "ApiResumeNode");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct EvictNodeRequest {
        pub node: HNode,
    }
}

pub type EvictNodeResponse = ReturnResponse;

procedure!(EvictNodeRequest => EvictNodeResponse, opnum::EVICT_NODE, "ApiEvictNode");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CreateNodeEnumRequest {
        pub node: HNode,
        pub enum_type: u32,
    }
}

pub type CreateNodeEnumResponse = EnumResponse;

procedure!(CreateNodeEnumRequest => CreateNodeEnumResponse, opnum::CREATE_NODE_ENUM, "ApiCreateNodeEnum");

status_field!(OpenNodeResponse);

return_code!(CloseNodeResponse);
