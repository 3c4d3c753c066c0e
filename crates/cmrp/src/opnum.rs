//! Operation numbers of `clusapi2` v2.0
//!
//! Numbers are assigned by the interface definition and are what the server
//! dispatches on. Opnum 80 is reserved and never sent.

macro_rules! opnums {
    ($($name:ident = $value:literal, $method:literal;)*) => {
        $(pub const $name: u16 = $value;)*

        /// IDL method name for `opnum`, e.g. `ApiOpenCluster`
        pub fn method_name(opnum: u16) -> Option<&'static str> {
            match opnum {
                $($value => Some($method),)*
                _ => None,
            }
        }
    };
}

/// Reserved slot between `ApiNodeControl` and `ApiOpenNetwork`
pub const OPNUM80_NOT_USED_ON_WIRE: u16 = 80;

opnums! {
    OPEN_CLUSTER = 0, "ApiOpenCluster";
    CLOSE_CLUSTER = 1, "ApiCloseCluster";
    SET_CLUSTER_NAME = 2, "ApiSetClusterName";
    GET_CLUSTER_NAME = 3, "ApiGetClusterName";
    GET_CLUSTER_VERSION = 4, "ApiGetClusterVersion";
    GET_QUORUM_RESOURCE = 5, "ApiGetQuorumResource";
    SET_QUORUM_RESOURCE = 6, "ApiSetQuorumResource";
    CREATE_ENUM = 7, "ApiCreateEnum";
    OPEN_RESOURCE = 8, "ApiOpenResource";
    CREATE_RESOURCE = 9, "ApiCreateResource";
    DELETE_RESOURCE = 10, "ApiDeleteResource";
    CLOSE_RESOURCE = 11, "ApiCloseResource";
    GET_RESOURCE_STATE = 12, "ApiGetResourceState";
    SET_RESOURCE_NAME = 13, "ApiSetResourceName";
    GET_RESOURCE_ID = 14, "ApiGetResourceId";
    GET_RESOURCE_TYPE = 15, "ApiGetResourceType";
    FAIL_RESOURCE = 16, "ApiFailResource";
    ONLINE_RESOURCE = 17, "ApiOnlineResource";
    OFFLINE_RESOURCE = 18, "ApiOfflineResource";
    ADD_RESOURCE_DEPENDENCY = 19, "ApiAddResourceDependency";
    REMOVE_RESOURCE_DEPENDENCY = 20, "ApiRemoveResourceDependency";
    CAN_RESOURCE_BE_DEPENDENT = 21, "ApiCanResourceBeDependent";
    CREATE_RES_ENUM = 22, "ApiCreateResEnum";
    ADD_RESOURCE_NODE = 23, "ApiAddResourceNode";
    REMOVE_RESOURCE_NODE = 24, "ApiRemoveResourceNode";
    CHANGE_RESOURCE_GROUP = 25, "ApiChangeResourceGroup";
    CREATE_RESOURCE_TYPE = 26, "ApiCreateResourceType";
    DELETE_RESOURCE_TYPE = 27, "ApiDeleteResourceType";
    GET_ROOT_KEY = 28, "ApiGetRootKey";
    CREATE_KEY = 29, "ApiCreateKey";
    OPEN_KEY = 30, "ApiOpenKey";
    ENUM_KEY = 31, "ApiEnumKey";
    SET_VALUE = 32, "ApiSetValue";
    DELETE_VALUE = 33, "ApiDeleteValue";
    QUERY_VALUE = 34, "ApiQueryValue";
    DELETE_KEY = 35, "ApiDeleteKey";
    ENUM_VALUE = 36, "ApiEnumValue";
    CLOSE_KEY = 37, "ApiCloseKey";
    QUERY_INFO_KEY = 38, "ApiQueryInfoKey";
    SET_KEY_SECURITY = 39, "ApiSetKeySecurity";
    GET_KEY_SECURITY = 40, "ApiGetKeySecurity";
    OPEN_GROUP = 41, "ApiOpenGroup";
    CREATE_GROUP = 42, "ApiCreateGroup";
    DELETE_GROUP = 43, "ApiDeleteGroup";
    CLOSE_GROUP = 44, "ApiCloseGroup";
    GET_GROUP_STATE = 45, "ApiGetGroupState";
    SET_GROUP_NAME = 46, "ApiSetGroupName";
    GET_GROUP_ID = 47, "ApiGetGroupId";
    GET_NODE_ID = 48, "ApiGetNodeId";
    ONLINE_GROUP = 49, "ApiOnlineGroup";
    OFFLINE_GROUP = 50, "ApiOfflineGroup";
    MOVE_GROUP = 51, "ApiMoveGroup";
    MOVE_GROUP_TO_NODE = 52, "ApiMoveGroupToNode";
    CREATE_GROUP_RESOURCE_ENUM = 53, "ApiCreateGroupResourceEnum";
    SET_GROUP_NODE_LIST = 54, "ApiSetGroupNodeList";
    CREATE_NOTIFY = 55, "ApiCreateNotify";
    CLOSE_NOTIFY = 56, "ApiCloseNotify";
    ADD_NOTIFY_CLUSTER = 57, "ApiAddNotifyCluster";
    ADD_NOTIFY_NODE = 58, "ApiAddNotifyNode";
    ADD_NOTIFY_GROUP = 59, "ApiAddNotifyGroup";
    ADD_NOTIFY_RESOURCE = 60, "ApiAddNotifyResource";
    ADD_NOTIFY_KEY = 61, "ApiAddNotifyKey";
    READD_NOTIFY_NODE = 62, "ApiReAddNotifyNode";
    READD_NOTIFY_GROUP = 63, "ApiReAddNotifyGroup";
    READD_NOTIFY_RESOURCE = 64, "ApiReAddNotifyResource";
    GET_NOTIFY = 65, "ApiGetNotify";
    OPEN_NODE = 66, "ApiOpenNode";
    CLOSE_NODE = 67, "ApiCloseNode";
    GET_NODE_STATE = 68, "ApiGetNodeState";
    PAUSE_NODE = 69, "ApiPauseNode";
    RESUME_NODE = 70, "ApiResumeNode";
    EVICT_NODE = 71, "ApiEvictNode";
    NODE_RESOURCE_CONTROL = 72, "ApiNodeResourceControl";
    RESOURCE_CONTROL = 73, "ApiResourceControl";
    NODE_RESOURCE_TYPE_CONTROL = 74, "ApiNodeResourceTypeControl";
    RESOURCE_TYPE_CONTROL = 75, "ApiResourceTypeControl";
    NODE_GROUP_CONTROL = 76, "ApiNodeGroupControl";
    GROUP_CONTROL = 77, "ApiGroupControl";
    NODE_NODE_CONTROL = 78, "ApiNodeNodeControl";
    NODE_CONTROL = 79, "ApiNodeControl";
    OPEN_NETWORK = 81, "ApiOpenNetwork";
    CLOSE_NETWORK = 82, "ApiCloseNetwork";
    GET_NETWORK_STATE = 83, "ApiGetNetworkState";
    SET_NETWORK_NAME = 84, "ApiSetNetworkName";
    CREATE_NETWORK_ENUM = 85, "ApiCreateNetworkEnum";
    GET_NETWORK_ID = 86, "ApiGetNetworkId";
    SET_NETWORK_PRIORITY_ORDER = 87, "ApiSetNetworkPriorityOrder";
    NODE_NETWORK_CONTROL = 88, "ApiNodeNetworkControl";
    NETWORK_CONTROL = 89, "ApiNetworkControl";
    ADD_NOTIFY_NETWORK = 90, "ApiAddNotifyNetwork";
    READD_NOTIFY_NETWORK = 91, "ApiReAddNotifyNetwork";
    OPEN_NET_INTERFACE = 92, "ApiOpenNetInterface";
    CLOSE_NET_INTERFACE = 93, "ApiCloseNetInterface";
    GET_NET_INTERFACE_STATE = 94, "ApiGetNetInterfaceState";
    GET_NET_INTERFACE = 95, "ApiGetNetInterface";
    GET_NET_INTERFACE_ID = 96, "ApiGetNetInterfaceId";
    NODE_NET_INTERFACE_CONTROL = 97, "ApiNodeNetInterfaceControl";
    NET_INTERFACE_CONTROL = 98, "ApiNetInterfaceControl";
    ADD_NOTIFY_NET_INTERFACE = 99, "ApiAddNotifyNetInterface";
    READD_NOTIFY_NET_INTERFACE = 100, "ApiReAddNotifyNetInterface";
    CREATE_NODE_ENUM = 101, "ApiCreateNodeEnum";
    GET_CLUSTER_VERSION2 = 102, "ApiGetClusterVersion2";
    CREATE_RES_TYPE_ENUM = 103, "ApiCreateResTypeEnum";
    BACKUP_CLUSTER_DATABASE = 104, "ApiBackupClusterDatabase";
    NODE_CLUSTER_CONTROL = 105, "ApiNodeClusterControl";
    CLUSTER_CONTROL = 106, "ApiClusterControl";
    UNBLOCK_GET_NOTIFY_CALL = 107, "ApiUnblockGetNotifyCall";
    SET_SERVICE_ACCOUNT_PASSWORD = 108, "ApiSetServiceAccountPassword";
}
