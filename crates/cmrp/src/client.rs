//! Typed `clusapi2` client

use dcerpc::{BoundConn, Call, CallOptions, CallStatus, Procedure, RpcError, Win32Status};
use tracing::debug;

use crate::error::{CallError, Result};
use crate::ops::*;

/// `clusapi2` client over a bound association.
///
/// Each method sends one request and returns the decoded response. A
/// response whose status signals failure comes back as
/// [`CallError::Status`] carrying that response.
pub struct Clusapi2Client<B> {
    conn: B,
    options: CallOptions,
}

impl<B: BoundConn> Clusapi2Client<B> {
    pub fn new(conn: B) -> Self {
        Self {
            conn,
            options: CallOptions::default(),
        }
    }

    /// Options applied to every call made through the typed methods.
    pub fn with_options(mut self, options: CallOptions) -> Self {
        self.options = options;
        self
    }

    pub fn conn(&self) -> &B {
        &self.conn
    }

    pub fn into_inner(self) -> B {
        self.conn
    }

    /// Re-establish `clusapi2` as the association's presentation context.
    pub async fn alter_context(&self) -> dcerpc::Result<()> {
        self.conn.alter_context(crate::CLUSAPI2_SYNTAX, self.options).await
    }

    /// Send `request` with the client's options.
    pub async fn invoke<P: Procedure>(&self, request: P) -> Result<P::Response> {
        self.invoke_call(Call::new(request), self.options).await
    }

    /// Send a prepared call, with its hooks and per-call options.
    pub async fn invoke_call<P: Procedure>(&self, mut call: Call<P>, options: CallOptions) -> Result<P::Response> {
        debug!("{} (opnum {})", P::NAME, P::OPNUM);
        self.conn.invoke(&mut call, options).await?;

        let response = call
            .into_response()
            .ok_or_else(|| RpcError::InvalidPdu(format!("{}: no response decoded", P::NAME)))?;

        if response.is_success() {
            return Ok(response);
        }

        let status = Win32Status(response.status_code());
        debug!("{} failed: {}", P::NAME, status);
        Err(CallError::Status {
            op_name: P::NAME,
            status,
            response,
        })
    }
}

macro_rules! methods {
    ($($(#[$meta:meta])* $method:ident($request:ty) -> $response:ty;)*) => {
        impl<B: BoundConn> Clusapi2Client<B> {
            $(
                $(#[$meta])*
                pub async fn $method(&self, request: $request) -> Result<$response> {
                    self.invoke(request).await
                }
            )*
        }
    };
}

methods! {
    /// Open the cluster the association is bound to. Check the result
    /// through `status`, not the handle.
    open_cluster(OpenClusterRequest) -> OpenClusterResponse;
    close_cluster(CloseClusterRequest) -> CloseClusterResponse;
    set_cluster_name(SetClusterNameRequest) -> SetClusterNameResponse;
    get_cluster_name(GetClusterNameRequest) -> GetClusterNameResponse;
    get_cluster_version(GetClusterVersionRequest) -> GetClusterVersionResponse;
    get_quorum_resource(GetQuorumResourceRequest) -> GetQuorumResourceResponse;
    set_quorum_resource(SetQuorumResourceRequest) -> SetQuorumResourceResponse;
    create_enum(CreateEnumRequest) -> CreateEnumResponse;
    open_resource(OpenResourceRequest) -> OpenResourceResponse;
    create_resource(CreateResourceRequest) -> CreateResourceResponse;
    delete_resource(DeleteResourceRequest) -> DeleteResourceResponse;
    close_resource(CloseResourceRequest) -> CloseResourceResponse;
    get_resource_state(GetResourceStateRequest) -> GetResourceStateResponse;
    set_resource_name(SetResourceNameRequest) -> SetResourceNameResponse;
    get_resource_id(GetResourceIdRequest) -> GetResourceIdResponse;
    get_resource_type(GetResourceTypeRequest) -> GetResourceTypeResponse;
    fail_resource(FailResourceRequest) -> FailResourceResponse;
    online_resource(OnlineResourceRequest) -> OnlineResourceResponse;
    offline_resource(OfflineResourceRequest) -> OfflineResourceResponse;
    add_resource_dependency(AddResourceDependencyRequest) -> AddResourceDependencyResponse;
    remove_resource_dependency(RemoveResourceDependencyRequest) -> RemoveResourceDependencyResponse;
    can_resource_be_dependent(CanResourceBeDependentRequest) -> CanResourceBeDependentResponse;
    create_res_enum(CreateResEnumRequest) -> CreateResEnumResponse;
    add_resource_node(AddResourceNodeRequest) -> AddResourceNodeResponse;
    remove_resource_node(RemoveResourceNodeRequest) -> RemoveResourceNodeResponse;
    change_resource_group(ChangeResourceGroupRequest) -> ChangeResourceGroupResponse;
    create_resource_type(CreateResourceTypeRequest) -> CreateResourceTypeResponse;
    delete_resource_type(DeleteResourceTypeRequest) -> DeleteResourceTypeResponse;
    get_root_key(GetRootKeyRequest) -> GetRootKeyResponse;
    create_key(CreateKeyRequest) -> CreateKeyResponse;
    open_key(OpenKeyRequest) -> OpenKeyResponse;
    enum_key(EnumKeyRequest) -> EnumKeyResponse;
    set_value(SetValueRequest) -> SetValueResponse;
    delete_value(DeleteValueRequest) -> DeleteValueResponse;
    query_value(QueryValueRequest) -> QueryValueResponse;
    delete_key(DeleteKeyRequest) -> DeleteKeyResponse;
    enum_value(EnumValueRequest) -> EnumValueResponse;
    close_key(CloseKeyRequest) -> CloseKeyResponse;
    query_info_key(QueryInfoKeyRequest) -> QueryInfoKeyResponse;
    set_key_security(SetKeySecurityRequest) -> SetKeySecurityResponse;
    get_key_security(GetKeySecurityRequest) -> GetKeySecurityResponse;
    open_group(OpenGroupRequest) -> OpenGroupResponse;
    create_group(CreateGroupRequest) -> CreateGroupResponse;
    delete_group(DeleteGroupRequest) -> DeleteGroupResponse;
    close_group(CloseGroupRequest) -> CloseGroupResponse;
    get_group_state(GetGroupStateRequest) -> GetGroupStateResponse;
    set_group_name(SetGroupNameRequest) -> SetGroupNameResponse;
    get_group_id(GetGroupIdRequest) -> GetGroupIdResponse;
    get_node_id(GetNodeIdRequest) -> GetNodeIdResponse;
    online_group(OnlineGroupRequest) -> OnlineGroupResponse;
    offline_group(OfflineGroupRequest) -> OfflineGroupResponse;
    move_group(MoveGroupRequest) -> MoveGroupResponse;
    move_group_to_node(MoveGroupToNodeRequest) -> MoveGroupToNodeResponse;
    create_group_resource_enum(CreateGroupResourceEnumRequest) -> CreateGroupResourceEnumResponse;
    set_group_node_list(SetGroupNodeListRequest) -> SetGroupNodeListResponse;
    create_notify(CreateNotifyRequest) -> CreateNotifyResponse;
    close_notify(CloseNotifyRequest) -> CloseNotifyResponse;
    add_notify_cluster(AddNotifyClusterRequest) -> AddNotifyClusterResponse;
    add_notify_node(AddNotifyNodeRequest) -> AddNotifyNodeResponse;
    add_notify_group(AddNotifyGroupRequest) -> AddNotifyGroupResponse;
    add_notify_resource(AddNotifyResourceRequest) -> AddNotifyResourceResponse;
    add_notify_key(AddNotifyKeyRequest) -> AddNotifyKeyResponse;
    readd_notify_node(ReAddNotifyNodeRequest) -> ReAddNotifyNodeResponse;
    readd_notify_group(ReAddNotifyGroupRequest) -> ReAddNotifyGroupResponse;
    readd_notify_resource(ReAddNotifyResourceRequest) -> ReAddNotifyResourceResponse;
    /// Wait for the next event on a notification port. The server gives up
    /// after `timeout` milliseconds; the client-side deadline comes from
    /// [`CallOptions`].
    get_notify(GetNotifyRequest) -> GetNotifyResponse;
    open_node(OpenNodeRequest) -> OpenNodeResponse;
    close_node(CloseNodeRequest) -> CloseNodeResponse;
    get_node_state(GetNodeStateRequest) -> GetNodeStateResponse;
    pause_node(PauseNodeRequest) -> PauseNodeResponse;
    resume_node(ResumeNodeRequest) -> ResumeNodeResponse;
    evict_node(EvictNodeRequest) -> EvictNodeResponse;
    node_resource_control(NodeResourceControlRequest) -> NodeResourceControlResponse;
    resource_control(ResourceControlRequest) -> ResourceControlResponse;
    node_resource_type_control(NodeResourceTypeControlRequest) -> NodeResourceTypeControlResponse;
    resource_type_control(ResourceTypeControlRequest) -> ResourceTypeControlResponse;
    node_group_control(NodeGroupControlRequest) -> NodeGroupControlResponse;
    group_control(GroupControlRequest) -> GroupControlResponse;
    node_node_control(NodeNodeControlRequest) -> NodeNodeControlResponse;
    node_control(NodeControlRequest) -> NodeControlResponse;
    open_network(OpenNetworkRequest) -> OpenNetworkResponse;
    close_network(CloseNetworkRequest) -> CloseNetworkResponse;
    get_network_state(GetNetworkStateRequest) -> GetNetworkStateResponse;
    set_network_name(SetNetworkNameRequest) -> SetNetworkNameResponse;
    create_network_enum(CreateNetworkEnumRequest) -> CreateNetworkEnumResponse;
    get_network_id(GetNetworkIdRequest) -> GetNetworkIdResponse;
    set_network_priority_order(SetNetworkPriorityOrderRequest) -> SetNetworkPriorityOrderResponse;
    node_network_control(NodeNetworkControlRequest) -> NodeNetworkControlResponse;
    network_control(NetworkControlRequest) -> NetworkControlResponse;
    add_notify_network(AddNotifyNetworkRequest) -> AddNotifyNetworkResponse;
    readd_notify_network(ReAddNotifyNetworkRequest) -> ReAddNotifyNetworkResponse;
    open_net_interface(OpenNetInterfaceRequest) -> OpenNetInterfaceResponse;
    close_net_interface(CloseNetInterfaceRequest) -> CloseNetInterfaceResponse;
    get_net_interface_state(GetNetInterfaceStateRequest) -> GetNetInterfaceStateResponse;
    get_net_interface(GetNetInterfaceRequest) -> GetNetInterfaceResponse;
    get_net_interface_id(GetNetInterfaceIdRequest) -> GetNetInterfaceIdResponse;
    node_net_interface_control(NodeNetInterfaceControlRequest) -> NodeNetInterfaceControlResponse;
    net_interface_control(NetInterfaceControlRequest) -> NetInterfaceControlResponse;
    add_notify_net_interface(AddNotifyNetInterfaceRequest) -> AddNotifyNetInterfaceResponse;
    readd_notify_net_interface(ReAddNotifyNetInterfaceRequest) -> ReAddNotifyNetInterfaceResponse;
    create_node_enum(CreateNodeEnumRequest) -> CreateNodeEnumResponse;
    get_cluster_version2(GetClusterVersion2Request) -> GetClusterVersion2Response;
    create_res_type_enum(CreateResTypeEnumRequest) -> CreateResTypeEnumResponse;
    backup_cluster_database(BackupClusterDatabaseRequest) -> BackupClusterDatabaseResponse;
    node_cluster_control(NodeClusterControlRequest) -> NodeClusterControlResponse;
    cluster_control(ClusterControlRequest) -> ClusterControlResponse;
    unblock_get_notify_call(UnblockGetNotifyCallRequest) -> UnblockGetNotifyCallResponse;
    set_service_account_password(SetServiceAccountPasswordRequest) -> SetServiceAccountPasswordResponse;
}
