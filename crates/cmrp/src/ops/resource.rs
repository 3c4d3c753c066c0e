//! Resource and resource type methods

use midl_ndr::ndr_params;

use super::{EnumResponse, IdResponse, ReturnResponse};
use crate::handles::{HGroup, HNode, HResource};
use crate::opnum;

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct OpenResourceRequest {
        pub resource_name: String,
    }
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct OpenResourceResponse {
        pub status: u32,
        pub handle: HResource,
    }
}

procedure!(OpenResourceRequest => OpenResourceResponse, opnum::OPEN_RESOURCE, "ApiOpenResource");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CreateResourceRequest {
        pub group: HGroup,
        pub resource_name: String,
        pub resource_type: String,
        pub flags: u32,
    }
}

pub type CreateResourceResponse = OpenResourceResponse;

procedure!(CreateResourceRequest => CreateResourceResponse, opnum::CREATE_RESOURCE, "ApiCreateResource");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct DeleteResourceRequest {
        pub resource: HResource,
    }
}

pub type DeleteResourceResponse = ReturnResponse;

procedure!(DeleteResourceRequest => DeleteResourceResponse, opnum::DELETE_RESOURCE, "ApiDeleteResource");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CloseResourceRequest {
        pub resource: HResource,
    }
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CloseResourceResponse {
        pub resource: HResource,
        pub return_value: u32,
    }
}

procedure!(CloseResourceRequest => CloseResourceResponse, opnum::CLOSE_RESOURCE, "ApiCloseResource");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetResourceStateRequest {
        pub resource: HResource,
    }
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetResourceStateResponse {
        pub state: u32,
        pub node_name: Option<String>,
        pub group_name: Option<String>,
        pub return_value: u32,
    }
}

procedure!(GetResourceStateRequest => GetResourceStateResponse, opnum::GET_RESOURCE_STATE, "ApiGetResourceState");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct SetResourceNameRequest {
        pub resource: HResource,
        pub resource_name: String,
    }
}

pub type SetResourceNameResponse = ReturnResponse;

procedure!(SetResourceNameRequest => SetResourceNameResponse, opnum::SET_RESOURCE_NAME, "ApiSetResourceName");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetResourceIdRequest {
        pub resource: HResource,
    }
}

pub type GetResourceIdResponse = IdResponse;

procedure!(GetResourceIdRequest => GetResourceIdResponse, opnum::GET_RESOURCE_ID, "ApiGetResourceId");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetResourceTypeRequest {
        pub resource: HResource,
    }
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetResourceTypeResponse {
        pub resource_type: Option<String>,
        pub return_value: u32,
    }
}

procedure!(GetResourceTypeRequest => GetResourceTypeResponse, opnum::GET_RESOURCE_TYPE, "ApiGetResourceType");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct FailResourceRequest {
        pub resource: HResource,
    }
}

pub type FailResourceResponse = ReturnResponse;

procedure!(FailResourceRequest => FailResourceResponse, opnum::FAIL_RESOURCE, "ApiFailResource");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct OnlineResourceRequest {
        pub resource: HResource,
    }
}

pub type OnlineResourceResponse = ReturnResponse;

procedure!(OnlineResourceRequest => OnlineResourceResponse, opnum::ONLINE_RESOURCE, "ApiOnlineResource");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct OfflineResourceRequest {
        pub resource: HResource,
    }
}

pub type OfflineResourceResponse = ReturnResponse;

procedure!(OfflineResourceRequest => OfflineResourceResponse, opnum::OFFLINE_RESOURCE, "ApiOfflineResource");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct AddResourceDependencyRequest {
        pub resource: HResource,
        pub depends_on: HResource,
    }
}

pub type AddResourceDependencyResponse = ReturnResponse;

procedure!(
    AddResourceDependencyRequest => AddResourceDependencyResponse,
    opnum::ADD_RESOURCE_DEPENDENCY,
    "ApiAddResourceDependency"
);

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct RemoveResourceDependencyRequest {
        pub resource: HResource,
        pub depends_on: HResource,
    }
}

pub type RemoveResourceDependencyResponse = ReturnResponse;

procedure!(
    RemoveResourceDependencyRequest => RemoveResourceDependencyResponse,
    opnum::REMOVE_RESOURCE_DEPENDENCY,
    "ApiRemoveResourceDependency"
);

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CanResourceBeDependentRequest {
        pub resource: HResource,
        pub resource_dependent: HResource,
    }
}

pub type CanResourceBeDependentResponse = ReturnResponse;

procedure!(
    CanResourceBeDependentRequest => CanResourceBeDependentResponse,
    opnum::CAN_RESOURCE_BE_DEPENDENT,
    "ApiCanResourceBeDependent"
);

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CreateResEnumRequest {
        pub resource: HResource,
        pub enum_type: u32,
    }
}

pub type CreateResEnumResponse = EnumResponse;

procedure!(CreateResEnumRequest => CreateResEnumResponse, opnum::CREATE_RES_ENUM, "ApiCreateResEnum");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct AddResourceNodeRequest {
        pub resource: HResource,
        pub node: HNode,
    }
}

pub type AddResourceNodeResponse = ReturnResponse;

procedure!(AddResourceNodeRequest => AddResourceNodeResponse, opnum::ADD_RESOURCE_NODE, "ApiAddResourceNode");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct RemoveResourceNodeRequest {
        pub resource: HResource,
        pub node: HNode,
    }
}

pub type RemoveResourceNodeResponse = ReturnResponse;

procedure!(
    RemoveResourceNodeRequest => RemoveResourceNodeResponse,
    opnum::REMOVE_RESOURCE_NODE,
    "ApiRemoveResourceNode"
);

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct ChangeResourceGroupRequest {
        pub resource: HResource,
        pub group: HGroup,
    }
}

pub type ChangeResourceGroupResponse = ReturnResponse;

procedure!(
    ChangeResourceGroupRequest => ChangeResourceGroupResponse,
    opnum::CHANGE_RESOURCE_GROUP,
    "ApiChangeResourceGroup"
);

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CreateResourceTypeRequest {
        pub type_name: String,
        pub display_name: String,
        /// Resource DLL implementing the type
        pub dll_name: String,
        /// Poll intervals in milliseconds
        pub looks_alive: u32,
        pub is_alive: u32,
    }
}

pub type CreateResourceTypeResponse = ReturnResponse;

procedure!(
    CreateResourceTypeRequest => CreateResourceTypeResponse,
    opnum::CREATE_RESOURCE_TYPE,
    "ApiCreateResourceType"
);

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct DeleteResourceTypeRequest {
        pub type_name: String,
    }
}

pub type DeleteResourceTypeResponse = ReturnResponse;

procedure!(
    DeleteResourceTypeRequest => DeleteResourceTypeResponse,
    opnum::DELETE_RESOURCE_TYPE,
    "ApiDeleteResourceType"
);

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CreateResTypeEnumRequest {
        pub type_name: String,
        pub enum_type: u32,
    }
}

pub type CreateResTypeEnumResponse = EnumResponse;

procedure!(CreateResTypeEnumRequest => CreateResTypeEnumResponse, opnum::CREATE_RES_TYPE_ENUM, "ApiCreateResTypeEnum");

status_field!(OpenResourceResponse);

return_code!(CloseResourceResponse, GetResourceStateResponse, GetResourceTypeResponse);
