//! Win32 status codes
//!
//! Application-level failures come back as Win32 error codes in a return
//! value or status out-parameter. [`Win32Status`] renders the ones cluster
//! and registry calls commonly produce; anything else prints as hex.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Win32Status(pub u32);

macro_rules! win32_codes {
    ($($name:ident = $value:literal, $text:literal;)*) => {
        impl Win32Status {
            $(pub const $name: Self = Self($value);)*

            /// Symbolic name, if the code is known
            pub fn name(&self) -> Option<&'static str> {
                match self.0 {
                    $($value => Some(stringify!($name)),)*
                    _ => None,
                }
            }

            /// Human-readable description, if the code is known
            pub fn description(&self) -> Option<&'static str> {
                match self.0 {
                    $($value => Some($text),)*
                    _ => None,
                }
            }
        }
    };
}

win32_codes! {
    ERROR_SUCCESS = 0, "The operation completed successfully.";
    ERROR_INVALID_FUNCTION = 1, "Incorrect function.";
    ERROR_FILE_NOT_FOUND = 2, "The system cannot find the file specified.";
    ERROR_PATH_NOT_FOUND = 3, "The system cannot find the path specified.";
    ERROR_ACCESS_DENIED = 5, "Access is denied.";
    ERROR_INVALID_HANDLE = 6, "The handle is invalid.";
    ERROR_NOT_ENOUGH_MEMORY = 8, "Not enough memory resources are available to process this command.";
    ERROR_INVALID_DATA = 13, "The data is invalid.";
    ERROR_NOT_READY = 21, "The device is not ready.";
    ERROR_SHARING_VIOLATION = 32, "The process cannot access the file because it is being used by another process.";
    ERROR_NOT_SUPPORTED = 50, "The request is not supported.";
    ERROR_INVALID_PARAMETER = 87, "The parameter is incorrect.";
    ERROR_INSUFFICIENT_BUFFER = 122, "The data area passed to a system call is too small.";
    ERROR_INVALID_NAME = 123, "The filename, directory name, or volume label syntax is incorrect.";
    ERROR_ALREADY_EXISTS = 183, "Cannot create a file when that file already exists.";
    ERROR_MORE_DATA = 234, "More data is available.";
    ERROR_NO_MORE_ITEMS = 259, "No more data is available.";
    ERROR_IO_PENDING = 997, "Overlapped I/O operation is in progress.";
    ERROR_KEY_DELETED = 1018, "Illegal operation attempted on a registry key that has been marked for deletion.";
    ERROR_DEPENDENT_SERVICES_RUNNING = 1051, "A stop control has been sent to a service that other running services are dependent on.";
    ERROR_INVALID_STATE = 5023, "The group or resource is not in the correct state to perform the requested operation.";
    ERROR_RESOURCE_FAILED = 5038, "The resource failed.";
    ERROR_SHUTDOWN_CLUSTER = 5008, "The cluster is being shut down.";
    ERROR_DEPENDENCY_NOT_FOUND = 5002, "The cluster resource dependency cannot be found.";
    ERROR_DEPENDENCY_ALREADY_EXISTS = 5003, "The cluster resource cannot be made dependent on the specified resource because it is already dependent.";
    ERROR_RESOURCE_NOT_ONLINE = 5004, "The cluster resource is not online.";
    ERROR_HOST_NODE_NOT_AVAILABLE = 5005, "A cluster node is not available for this operation.";
    ERROR_RESOURCE_NOT_AVAILABLE = 5006, "The cluster resource is not available.";
    ERROR_RESOURCE_NOT_FOUND = 5007, "The cluster resource could not be found.";
    ERROR_OBJECT_ALREADY_EXISTS = 5010, "The object already exists.";
    ERROR_OBJECT_IN_LIST = 5011, "The object is already in the list.";
    ERROR_GROUP_NOT_AVAILABLE = 5012, "The cluster group is not available for any new requests.";
    ERROR_GROUP_NOT_FOUND = 5013, "The cluster group could not be found.";
    ERROR_GROUP_NOT_ONLINE = 5014, "The operation could not be completed because the cluster group is not online.";
    ERROR_HOST_NODE_NOT_RESOURCE_OWNER = 5015, "The operation failed because either the specified cluster node is not the owner of the resource, or the node is not a possible owner of the resource.";
    ERROR_HOST_NODE_NOT_GROUP_OWNER = 5016, "The operation failed because either the specified cluster node is not the owner of the group, or the node is not a possible owner of the group.";
    ERROR_RESMON_CREATE_FAILED = 5017, "The cluster resource could not be created in the specified resource monitor.";
    ERROR_RESMON_ONLINE_FAILED = 5018, "The cluster resource could not be brought online by the resource monitor.";
    ERROR_RESOURCE_ONLINE = 5019, "The operation could not be completed because the cluster resource is online.";
    ERROR_QUORUM_RESOURCE = 5020, "The cluster resource could not be deleted or brought offline because it is the quorum resource.";
    ERROR_NOT_QUORUM_CAPABLE = 5021, "The cluster could not make the specified resource a quorum resource because it is not capable of being a quorum resource.";
    ERROR_CLUSTER_SHUTTING_DOWN = 5022, "The cluster software is shutting down.";
    ERROR_RESOURCE_PROPERTIES_STORED = 5024, "The cluster resource properties were stored but not all took effect.";
    ERROR_NOT_QUORUM_CLASS = 5025, "The cluster could not make the specified resource a quorum resource because it does not belong to a shared storage class.";
    ERROR_CORE_RESOURCE = 5026, "The cluster resource could not be deleted since it is a core resource.";
    ERROR_QUORUM_RESOURCE_ONLINE_FAILED = 5027, "The quorum resource failed to come online.";
    ERROR_CLUSTER_NODE_NOT_FOUND = 5042, "The cluster node was not found.";
    ERROR_CLUSTER_LOCAL_NODE_NOT_FOUND = 5043, "The cluster local node information was not found.";
    ERROR_CLUSTER_NETWORK_EXISTS = 5044, "The cluster network already exists.";
    ERROR_CLUSTER_NETWORK_NOT_FOUND = 5045, "The cluster network was not found.";
    ERROR_CLUSTER_NETINTERFACE_EXISTS = 5046, "The cluster network interface already exists.";
    ERROR_CLUSTER_NETINTERFACE_NOT_FOUND = 5047, "The cluster network interface was not found.";
    ERROR_CLUSTER_INVALID_REQUEST = 5048, "The cluster request is not valid for this object.";
    ERROR_CLUSTER_INVALID_NETWORK_PROVIDER = 5049, "The cluster network provider is not valid.";
    ERROR_CLUSTER_NODE_DOWN = 5050, "The cluster node is down.";
    ERROR_CLUSTER_NODE_UNREACHABLE = 5051, "The cluster node is not reachable.";
    ERROR_CLUSTER_NODE_NOT_MEMBER = 5052, "The cluster node is not a member of the cluster.";
    ERROR_CLUSTER_JOIN_NOT_IN_PROGRESS = 5053, "A cluster join operation is not in progress.";
    ERROR_CLUSTER_INVALID_NETWORK = 5054, "The cluster network is not valid.";
    ERROR_CLUSTER_NODE_UP = 5056, "The cluster node is up.";
    ERROR_CLUSTER_IPADDR_IN_USE = 5057, "The cluster IP address is already in use.";
    ERROR_CLUSTER_NODE_NOT_PAUSED = 5058, "The cluster node is not paused.";
    ERROR_CLUSTER_NO_SECURITY_CONTEXT = 5059, "No cluster security context is available.";
    ERROR_CLUSTER_NETWORK_NOT_INTERNAL = 5060, "The cluster network is not configured for internal cluster communication.";
    ERROR_CLUSTER_NODE_ALREADY_UP = 5061, "The cluster node is already up.";
    ERROR_CLUSTER_NODE_ALREADY_DOWN = 5062, "The cluster node is already down.";
    ERROR_CLUSTER_NETWORK_ALREADY_ONLINE = 5063, "The cluster network is already online.";
    ERROR_CLUSTER_NETWORK_ALREADY_OFFLINE = 5064, "The cluster network is already offline.";
    ERROR_CLUSTER_NODE_ALREADY_MEMBER = 5065, "The cluster node is already a member of the cluster.";
    ERROR_CLUSTER_LAST_INTERNAL_NETWORK = 5066, "The cluster network is the only one configured for internal cluster communication between two or more active cluster nodes.";
    ERROR_CLUSTER_NETWORK_HAS_DEPENDENTS = 5067, "One or more cluster resources depend on the network to provide service to clients.";
    ERROR_INVALID_OPERATION_ON_QUORUM = 5068, "This operation cannot currently be performed on the cluster group containing the quorum resource.";
    ERROR_DEPENDENCY_NOT_ALLOWED = 5069, "The cluster quorum resource is not allowed to have any dependencies.";
    ERROR_CLUSTER_NODE_PAUSED = 5070, "The cluster node is paused.";
    ERROR_NODE_CANT_HOST_RESOURCE = 5071, "The cluster resource cannot be brought online. The owner node cannot run this resource.";
    ERROR_CLUSTER_NODE_NOT_READY = 5072, "The cluster node is not ready to perform the requested operation.";
    ERROR_CLUSTER_NODE_SHUTTING_DOWN = 5073, "The cluster node is shutting down.";
    ERROR_CLUSTER_RESOURCE_TYPE_NOT_FOUND = 5078, "The specified resource type was not found.";
    ERROR_CLUSTER_RESNAME_NOT_FOUND = 5080, "A cluster resource name could not be found.";
    ERROR_CLUSTER_OLD_VERSION = 5904, "The cluster service version is too old for this operation.";
}

impl Win32Status {
    pub fn is_success(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for Win32Status {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

impl fmt::Display for Win32Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.name(), self.description()) {
            (Some(name), Some(text)) => write!(f, "{} ({}): {}", name, self.0, text),
            _ => write!(f, "status 0x{:08x}", self.0),
        }
    }
}
