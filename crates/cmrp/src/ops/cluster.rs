//! Cluster-wide methods

use midl_ndr::ndr_params;

use super::{EnumResponse, ReturnResponse};
use crate::handles::{HCluster, HResource};
use crate::opnum;
use crate::types::{ClusterOperationalVersionInfo, ClusterSetPasswordFlags, ClusterSetPasswordStatus};

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct OpenClusterRequest {}
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct OpenClusterResponse {
        pub status: u32,
        pub handle: HCluster,
    }
}

procedure!(OpenClusterRequest => OpenClusterResponse, opnum::OPEN_CLUSTER, "ApiOpenCluster");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CloseClusterRequest {
        pub cluster: HCluster,
    }
}

ndr_params! {
    /// `cluster` comes back zeroed once the server has released it
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CloseClusterResponse {
        pub cluster: HCluster,
        pub return_value: u32,
    }
}

procedure!(CloseClusterRequest => CloseClusterResponse, opnum::CLOSE_CLUSTER, "ApiCloseCluster");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct SetClusterNameRequest {
        pub new_cluster_name: String,
    }
}

pub type SetClusterNameResponse = ReturnResponse;

procedure!(SetClusterNameRequest => SetClusterNameResponse, opnum::SET_CLUSTER_NAME, "ApiSetClusterName");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetClusterNameRequest {}
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetClusterNameResponse {
        pub cluster_name: Option<String>,
        /// Node that answered the call
        pub node_name: Option<String>,
        pub return_value: u32,
    }
}

procedure!(GetClusterNameRequest => GetClusterNameResponse, opnum::GET_CLUSTER_NAME, "ApiGetClusterName");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetClusterVersionRequest {}
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetClusterVersionResponse {
        pub major_version: u16,
        pub minor_version: u16,
        pub build_number: u16,
        pub vendor_id: Option<String>,
        pub csd_version: Option<String>,
        pub return_value: u32,
    }
}

procedure!(GetClusterVersionRequest => GetClusterVersionResponse, opnum::GET_CLUSTER_VERSION, "ApiGetClusterVersion");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetQuorumResourceRequest {}
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetQuorumResourceResponse {
        pub resource_name: Option<String>,
        pub device_name: Option<String>,
        pub max_quorum_log_size: u32,
        pub return_value: u32,
    }
}

procedure!(GetQuorumResourceRequest => GetQuorumResourceResponse, opnum::GET_QUORUM_RESOURCE, "ApiGetQuorumResource");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct SetQuorumResourceRequest {
        pub resource: HResource,
        pub device_name: String,
        pub max_quorum_log_size: u32,
    }
}

pub type SetQuorumResourceResponse = ReturnResponse;

procedure!(SetQuorumResourceRequest => SetQuorumResourceResponse, opnum::SET_QUORUM_RESOURCE, "ApiSetQuorumResource");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CreateEnumRequest {
        /// Mask of [`enum_type`](crate::types::enum_type) bits
        pub enum_type: u32,
    }
}

pub type CreateEnumResponse = EnumResponse;

procedure!(CreateEnumRequest => CreateEnumResponse, opnum::CREATE_ENUM, "ApiCreateEnum");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetClusterVersion2Request {}
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GetClusterVersion2Response {
        pub major_version: u16,
        pub minor_version: u16,
        pub build_number: u16,
        pub vendor_id: Option<String>,
        pub csd_version: Option<String>,
        pub cluster_op_version_info: Option<ClusterOperationalVersionInfo>,
        pub return_value: u32,
    }
}

procedure!(GetClusterVersion2Request => GetClusterVersion2Response, opnum::GET_CLUSTER_VERSION2, "ApiGetClusterVersion2");

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct BackupClusterDatabaseRequest {
        /// Directory on the server that receives the backup
        pub path_name: String,
    }
}

pub type BackupClusterDatabaseResponse = ReturnResponse;

procedure!(
    BackupClusterDatabaseRequest => BackupClusterDatabaseResponse,
    opnum::BACKUP_CLUSTER_DATABASE,
    "ApiBackupClusterDatabase"
);

ndr_params! {
    /// Change the cluster service account password on every node.
    ///
    /// `return_status_buffer_size` is the number of per-node status entries
    /// the caller can accept, at most 65536.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct SetServiceAccountPasswordRequest {
        pub new_password: String,
        pub flags: ClusterSetPasswordFlags,
        pub return_status_buffer_size: u32 => range(0, 65536),
    }
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct SetServiceAccountPasswordResponse {
        pub return_status_buffer: Vec<ClusterSetPasswordStatus> => length_is(size_returned),
        pub size_returned: u32,
        /// Entry count needed when the buffer was too small
        pub expected_buffer_size: u32,
        pub return_value: u32,
    }
}

procedure!(
    SetServiceAccountPasswordRequest => SetServiceAccountPasswordResponse,
    opnum::SET_SERVICE_ACCOUNT_PASSWORD,
    "ApiSetServiceAccountPassword"
);

status_field!(OpenClusterResponse);

return_code!(
    CloseClusterResponse,
    GetClusterNameResponse,
    GetClusterVersionResponse,
    GetQuorumResourceResponse,
    GetClusterVersion2Response,
    SetServiceAccountPasswordResponse,
);
