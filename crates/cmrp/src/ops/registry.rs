//! Cluster registry (database) methods

use midl_ndr::ndr_params;

use super::ReturnResponse;
use crate::handles::HKey;
use crate::opnum;
use crate::types::{FileTime, RpcSecurityAttributes, RpcSecurityDescriptor};

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetRootKeyRequest {
        pub sam_desired: u32,
    }
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetRootKeyResponse {
        pub status: u32,
        pub handle: HKey,
    }
}

procedure!(GetRootKeyRequest => GetRootKeyResponse, opnum::GET_ROOT_KEY, "ApiGetRootKey");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CreateKeyRequest {
        pub key: HKey,
        pub sub_key: String,
        pub options: u32,
        pub sam_desired: u32,
        pub security_attributes: Option<RpcSecurityAttributes>,
    }
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CreateKeyResponse {
        /// Whether the key was created or already existed
        pub disposition: u32,
        pub status: u32,
        pub handle: HKey,
    }
}

procedure!(CreateKeyRequest => CreateKeyResponse, opnum::CREATE_KEY, "ApiCreateKey");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct OpenKeyRequest {
        pub key: HKey,
        pub sub_key: String,
        pub sam_desired: u32,
    }
}

pub type OpenKeyResponse = GetRootKeyResponse;

procedure!(OpenKeyRequest => OpenKeyResponse, opnum::OPEN_KEY, "ApiOpenKey");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct EnumKeyRequest {
        pub key: HKey,
        pub index: u32,
    }
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct EnumKeyResponse {
        pub key_name: Option<String>,
        pub last_write_time: FileTime,
        pub return_value: u32,
    }
}

procedure!(EnumKeyRequest => EnumKeyResponse, opnum::ENUM_KEY, "ApiEnumKey");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct SetValueRequest {
        pub key: HKey,
        pub value_name: String,
        pub value_type: u32,
        pub data: Vec<u8> => size_is(data_length),
        pub data_length: u32,
    }
}

pub type SetValueResponse = ReturnResponse;

procedure!(SetValueRequest => SetValueResponse, opnum::SET_VALUE, "ApiSetValue");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct DeleteValueRequest {
        pub key: HKey,
        pub value_name: String,
    }
}

pub type DeleteValueResponse = ReturnResponse;

procedure!(DeleteValueRequest => DeleteValueResponse, opnum::DELETE_VALUE, "ApiDeleteValue");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct QueryValueRequest {
        pub key: HKey,
        pub value_name: String,
        /// Capacity of the returned data buffer
        pub data_size: u32,
    }
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct QueryValueResponse {
        pub value_type: u32,
        /// `data_size` bytes, of which `required` are meaningful on success
        pub data: Vec<u8>,
        pub required: u32,
        pub return_value: u32,
    }
}

procedure!(QueryValueRequest => QueryValueResponse, opnum::QUERY_VALUE, "ApiQueryValue");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct DeleteKeyRequest {
        pub key: HKey,
        pub sub_key: String,
    }
}

pub type DeleteKeyResponse = ReturnResponse;

procedure!(DeleteKeyRequest => DeleteKeyResponse, opnum::DELETE_KEY, "ApiDeleteKey");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct EnumValueRequest {
        pub key: HKey,
        pub index: u32,
        /// Capacity of the returned data buffer
        pub data_length: u32,
    }
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct EnumValueResponse {
        pub value_name: Option<String>,
        pub value_type: u32,
        pub data: Vec<u8> => size_is(data_length),
        pub data_length: u32,
        pub total_size: u32,
        pub return_value: u32,
    }
}

procedure!(EnumValueRequest => EnumValueResponse, opnum::ENUM_VALUE, "ApiEnumValue");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CloseKeyRequest {
        pub key: HKey,
    }
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CloseKeyResponse {
        pub key: HKey,
        pub return_value: u32,
    }
}

procedure!(CloseKeyRequest => CloseKeyResponse, opnum::CLOSE_KEY, "ApiCloseKey");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct QueryInfoKeyRequest {
        pub key: HKey,
    }
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct QueryInfoKeyResponse {
        pub sub_keys: u32,
        pub max_sub_key_length: u32,
        pub values: u32,
        pub max_value_name_length: u32,
        pub max_value_length: u32,
        pub security_descriptor_length: u32,
        pub last_write_time: FileTime,
        pub return_value: u32,
    }
}

procedure!(QueryInfoKeyRequest => QueryInfoKeyResponse, opnum::QUERY_INFO_KEY, "ApiQueryInfoKey");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct SetKeySecurityRequest {
        pub key: HKey,
        pub security_information: u32,
        pub security_descriptor: RpcSecurityDescriptor,
    }
}

pub type SetKeySecurityResponse = ReturnResponse;

procedure!(SetKeySecurityRequest => SetKeySecurityResponse, opnum::SET_KEY_SECURITY, "ApiSetKeySecurity");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetKeySecurityRequest {
        pub key: HKey,
        pub security_information: u32,
        /// Buffer to fill; see [`RpcSecurityDescriptor::with_capacity`]
        pub security_descriptor: RpcSecurityDescriptor,
    }
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetKeySecurityResponse {
        pub security_descriptor: RpcSecurityDescriptor,
        pub return_value: u32,
    }
}

procedure!(GetKeySecurityRequest => GetKeySecurityResponse, opnum::GET_KEY_SECURITY, "ApiGetKeySecurity");

status_field!(GetRootKeyResponse, CreateKeyResponse);

return_code!(
    EnumKeyResponse,
    QueryValueResponse,
    EnumValueResponse,
    CloseKeyResponse,
    QueryInfoKeyResponse,
    GetKeySecurityResponse,
);
