//! Context handle kinds of `clusapi2`
//!
//! All eight share the 20-byte [`ContextHandle`] layout; the marker types
//! keep a node handle from being passed where a group handle is expected.

use midl_ndr::{ContextHandle, HandleKind};

macro_rules! handle_kinds {
    ($($(#[$meta:meta])* $marker:ident => $alias:ident, $name:literal;)*) => {
        $(
            #[doc = concat!("Marker for `", $name, "`")]
            #[derive(Debug)]
            pub enum $marker {}

            impl HandleKind for $marker {
                const NAME: &'static str = $name;
            }

            $(#[$meta])*
            pub type $alias = ContextHandle<$marker>;
        )*
    };
}

handle_kinds! {
    /// The cluster itself, from `ApiOpenCluster`
    Cluster => HCluster, "HCLUSTER_RPC";
    /// A node, from `ApiOpenNode`
    Node => HNode, "HNODE_RPC";
    /// A group, from `ApiOpenGroup` or `ApiCreateGroup`
    Group => HGroup, "HGROUP_RPC";
    /// A resource, from `ApiOpenResource` or `ApiCreateResource`
    Resource => HResource, "HRES_RPC";
    /// A cluster registry key, from `ApiGetRootKey`, `ApiCreateKey` or `ApiOpenKey`
    Key => HKey, "HKEY_RPC";
    /// A notification port, from `ApiCreateNotify`
    Notify => HNotify, "HNOTIFY_RPC";
    /// A network, from `ApiOpenNetwork`
    Network => HNetwork, "HNETWORK_RPC";
    /// A network interface, from `ApiOpenNetInterface`
    NetInterface => HNetInterface, "HNETINTERFACE_RPC";
}

#[cfg(test)]
mod tests {
    use super::*;
    use midl_ndr::NdrUuid;

    #[test]
    fn test_handle_names_in_diagnostics() {
        let uuid = NdrUuid::parse("11111111-2222-3333-4444-555555555555").unwrap();
        assert_eq!(
            HGroup::new(0, uuid).to_string(),
            "HGROUP_RPC(00000000:11111111-2222-3333-4444-555555555555)"
        );
        assert!(format!("{:?}", HNetInterface::empty()).starts_with("HNETINTERFACE_RPC"));
    }
}
