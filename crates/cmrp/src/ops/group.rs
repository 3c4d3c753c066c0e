//! Group methods

use midl_ndr::ndr_params;

use super::{EnumResponse, IdResponse, ReturnResponse};
use crate::handles::{HGroup, HNode};
use crate::opnum;

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct OpenGroupRequest {
        pub group_name: String,
    }
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct OpenGroupResponse {
        pub status: u32,
        pub handle: HGroup,
    }
}

procedure!(OpenGroupRequest => OpenGroupResponse, opnum::OPEN_GROUP, "ApiOpenGroup");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CreateGroupRequest {
        pub group_name: String,
    }
}

pub type CreateGroupResponse = OpenGroupResponse;

procedure!(CreateGroupRequest => CreateGroupResponse, opnum::CREATE_GROUP, "ApiCreateGroup");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct DeleteGroupRequest {
        pub group: HGroup,
        /// Delete the group's resources with it
        pub force: bool => bool32(),
    }
}

pub type DeleteGroupResponse = ReturnResponse;

procedure!(DeleteGroupRequest => DeleteGroupResponse, opnum::DELETE_GROUP, "ApiDeleteGroup");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CloseGroupRequest {
        pub group: HGroup,
    }
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CloseGroupResponse {
        pub group: HGroup,
        pub return_value: u32,
    }
}

procedure!(CloseGroupRequest => CloseGroupResponse, opnum::CLOSE_GROUP, "ApiCloseGroup");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetGroupStateRequest {
        pub group: HGroup,
    }
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetGroupStateResponse {
        pub state: u32,
        /// Current owner node
        pub node_name: Option<String>,
        pub return_value: u32,
    }
}

procedure!(GetGroupStateRequest => GetGroupStateResponse, opnum::GET_GROUP_STATE, "ApiGetGroupState");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct SetGroupNameRequest {
        pub group: HGroup,
        pub group_name: String,
    }
}

pub type SetGroupNameResponse = ReturnResponse;

procedure!(SetGroupNameRequest => SetGroupNameResponse, opnum::SET_GROUP_NAME, "ApiSetGroupName");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetGroupIdRequest {
        pub group: HGroup,
    }
}

pub type GetGroupIdResponse = IdResponse;

procedure!(GetGroupIdRequest => GetGroupIdResponse, opnum::GET_GROUP_ID, "ApiGetGroupId");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct OnlineGroupRequest {
        pub group: HGroup,
    }
}

pub type OnlineGroupResponse = ReturnResponse;

procedure!(OnlineGroupRequest => OnlineGroupResponse, opnum::ONLINE_GROUP, "ApiOnlineGroup");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct OfflineGroupRequest {
        pub group: HGroup,
    }
}

pub type OfflineGroupResponse = ReturnResponse;

procedure!(OfflineGroupRequest => OfflineGroupResponse, opnum::OFFLINE_GROUP, "ApiOfflineGroup");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct MoveGroupRequest {
        pub group: HGroup,
    }
}

pub type MoveGroupResponse = ReturnResponse;

procedure!(MoveGroupRequest => MoveGroupResponse, opnum::MOVE_GROUP, "ApiMoveGroup");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct MoveGroupToNodeRequest {
        pub group: HGroup,
        pub node: HNode,
    }
}

pub type MoveGroupToNodeResponse = ReturnResponse;

procedure!(MoveGroupToNodeRequest => MoveGroupToNodeResponse, opnum::MOVE_GROUP_TO_NODE, "ApiMoveGroupToNode");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CreateGroupResourceEnumRequest {
        pub group: HGroup,
        pub enum_type: u32,
    }
}

pub type CreateGroupResourceEnumResponse = EnumResponse;

procedure!(
    CreateGroupResourceEnumRequest => CreateGroupResourceEnumResponse,
    opnum::CREATE_GROUP_RESOURCE_ENUM,
    "ApiCreateGroupResourceEnum"
);

ndr_params! {
    /// Replace the preferred owner list of a group.
    ///
    /// `node_list` is a REG_MULTI_SZ of node names in UTF-16LE.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct SetGroupNodeListRequest {
        pub group: HGroup,
        pub node_list: Option<Vec<u8>> => unique_size_is(list_size),
        pub list_size: u32,
    }
}

impl SetGroupNodeListRequest {
    /// Build the request from node names in preference order.
    pub fn from_node_names<S: AsRef<str>>(group: HGroup, names: &[S]) -> Self {
        let mut node_list = Vec::new();
        for name in names {
            for unit in name.as_ref().encode_utf16().chain(std::iter::once(0)) {
                node_list.extend_from_slice(&unit.to_le_bytes());
            }
        }
        node_list.extend_from_slice(&[0, 0]);
        Self {
            group,
            node_list: Some(node_list),
            list_size: 0,
        }
    }
}

pub type SetGroupNodeListResponse = ReturnResponse;

procedure!(SetGroupNodeListRequest => SetGroupNodeListResponse, opnum::SET_GROUP_NODE_LIST, "ApiSetGroupNodeList");

status_field!(OpenGroupResponse);

return_code!(CloseGroupResponse, GetGroupStateResponse);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_list_is_multi_sz() {
        let request = SetGroupNodeListRequest::from_node_names(HGroup::empty(), &["A", "BC"]);
        assert_eq!(
            request.node_list.as_deref(),
            Some(&[b'A', 0, 0, 0, b'B', 0, b'C', 0, 0, 0, 0, 0][..])
        );
    }
}
