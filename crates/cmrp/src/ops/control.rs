//! Control-code methods
//!
//! Every `Api*Control` method sends a control code and an optional input
//! buffer to an object (optionally on a specific node) and gets back up to
//! `out_buffer_size` bytes. The output is a varying array: the server sends
//! the full capacity as the maximum and `bytes_returned` as the count. When
//! the capacity is too small the call fails with `ERROR_MORE_DATA` and
//! `required` holds the size to retry with.

use midl_ndr::ndr_params;

use crate::handles::{HCluster, HGroup, HNetInterface, HNetwork, HNode, HResource};
use crate::opnum;

/// Object classes encoded in bits 24..32 of a control code
pub mod object {
    pub const RESOURCE: u32 = 1;
    pub const RESOURCE_TYPE: u32 = 2;
    pub const GROUP: u32 = 3;
    pub const NODE: u32 = 4;
    pub const NETWORK: u32 = 5;
    pub const NETINTERFACE: u32 = 6;
    pub const CLUSTER: u32 = 7;
}

pub const ACCESS_ANY: u32 = 0;
pub const ACCESS_READ: u32 = 1;
pub const ACCESS_WRITE: u32 = 2;

/// Compose a control code for `object` from a function number and access
/// mode. `modify` marks codes that change cluster state.
pub const fn control_code(object: u32, function: u32, access: u32, modify: bool) -> u32 {
    (object << 24) | ((modify as u32) << 22) | (function << 2) | access
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct ControlResponse {
        pub out_buffer: Vec<u8> => length_is(bytes_returned),
        pub bytes_returned: u32,
        pub required: u32,
        pub return_value: u32,
    }
}

impl ControlResponse {
    /// The valid prefix of the output buffer.
    pub fn output(&self) -> &[u8] {
        let len = (self.bytes_returned as usize).min(self.out_buffer.len());
        &self.out_buffer[..len]
    }
}

return_code!(ControlResponse);

macro_rules! control_requests {
    ($(
        $(#[$meta:meta])*
        $request:ident -> $response:ident { $($target:ident: $target_ty:ty),+ }
            => $opnum:path, $method:literal;
    )*) => {
        $(
            ndr_params! {
                $(#[$meta])*
                #[derive(Debug, Clone, Default, PartialEq, Eq)]
                pub struct $request {
                    $(pub $target: $target_ty,)+
                    pub control_code: u32,
                    pub in_buffer: Option<Vec<u8>> => unique_size_is(in_buffer_size),
                    pub in_buffer_size: u32,
                    pub out_buffer_size: u32,
                }
            }

            impl $request {
                pub fn with_input(mut self, input: Vec<u8>) -> Self {
                    self.in_buffer = Some(input);
                    self
                }

                pub fn with_output_capacity(mut self, capacity: u32) -> Self {
                    self.out_buffer_size = capacity;
                    self
                }
            }

            pub type $response = ControlResponse;

            procedure!($request => $response, $opnum, $method);
        )*
    };
}

control_requests! {
    /// Control a resource as hosted by `node`
    NodeResourceControlRequest -> NodeResourceControlResponse { resource: HResource, node: HNode }
        => opnum::NODE_RESOURCE_CONTROL, "ApiNodeResourceControl";
    ResourceControlRequest -> ResourceControlResponse { resource: HResource }
        => opnum::RESOURCE_CONTROL, "ApiResourceControl";
    NodeResourceTypeControlRequest -> NodeResourceTypeControlResponse {
        cluster: HCluster,
        resource_type_name: String,
        node: HNode
    } => opnum::NODE_RESOURCE_TYPE_CONTROL, "ApiNodeResourceTypeControl";
    ResourceTypeControlRequest -> ResourceTypeControlResponse { cluster: HCluster, resource_type_name: String }
        => opnum::RESOURCE_TYPE_CONTROL, "ApiResourceTypeControl";
    NodeGroupControlRequest -> NodeGroupControlResponse { group: HGroup, node: HNode }
        => opnum::NODE_GROUP_CONTROL, "ApiNodeGroupControl";
    GroupControlRequest -> GroupControlResponse { group: HGroup }
        => opnum::GROUP_CONTROL, "ApiGroupControl";
    /// Control `node` as seen from `host_node`
    NodeNodeControlRequest -> NodeNodeControlResponse { node: HNode, host_node: HNode }
        => opnum::NODE_NODE_CONTROL, "ApiNodeNodeControl";
    NodeControlRequest -> NodeControlResponse { node: HNode }
        => opnum::NODE_CONTROL, "ApiNodeControl";
    NodeNetworkControlRequest -> NodeNetworkControlResponse { network: HNetwork, node: HNode }
        => opnum::NODE_NETWORK_CONTROL, "ApiNodeNetworkControl";
    NetworkControlRequest -> NetworkControlResponse { network: HNetwork }
        => opnum::NETWORK_CONTROL, "ApiNetworkControl";
    NodeNetInterfaceControlRequest -> NodeNetInterfaceControlResponse { net_interface: HNetInterface, node: HNode }
        => opnum::NODE_NET_INTERFACE_CONTROL, "ApiNodeNetInterfaceControl";
    NetInterfaceControlRequest -> NetInterfaceControlResponse { net_interface: HNetInterface }
        => opnum::NET_INTERFACE_CONTROL, "ApiNetInterfaceControl";
    NodeClusterControlRequest -> NodeClusterControlResponse { cluster: HCluster, host_node: HNode }
        => opnum::NODE_CLUSTER_CONTROL, "ApiNodeClusterControl";
    ClusterControlRequest -> ClusterControlResponse { cluster: HCluster }
        => opnum::CLUSTER_CONTROL, "ApiClusterControl";
}
