//! Client binding for the failover cluster management interface
//! (MS-CMRP `clusapi2`, version 2.0)
//!
//! Every method of the interface is described by a request type (its
//! `[in]` parameters) and a response type (its `[out]` parameters and return
//! value). Both are declared with [`midl_ndr::ndr_params!`], so they share
//! one NDR codec and can be marshaled and unmarshaled in either direction.
//! Each request type implements [`dcerpc::Procedure`], which names its
//! opnum, its diagnostic name and its response.
//!
//! [`Clusapi2Client`] runs requests over any [`dcerpc::BoundConn`] and turns
//! a failing status into [`CallError::Status`], keeping the decoded response.
//!
//! ```no_run
//! use cmrp::{ops::{CloseClusterRequest, CreateEnumRequest, OpenClusterRequest}, types::enum_type};
//! use dcerpc::ClientConfig;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = cmrp::connect_mapped("192.0.2.10".parse()?, ClientConfig::default()).await?;
//!
//! let cluster = client.open_cluster(OpenClusterRequest::default()).await?.handle;
//! let nodes = client
//!     .create_enum(CreateEnumRequest { enum_type: enum_type::NODE })
//!     .await?;
//! for entry in nodes.entries() {
//!     println!("{:?}", entry.name);
//! }
//! client.close_cluster(CloseClusterRequest { cluster }).await?;
//! # Ok(())
//! # }
//! ```

use std::net::{IpAddr, SocketAddr};

use dcerpc::{ClientConfig, Conn, DceRpcClient, DceRpcConnection, SyntaxId};
use midl_ndr::NdrUuid;

pub mod client;
pub mod error;
pub mod handles;
pub mod opnum;
pub mod ops;
pub mod types;

pub use client::Clusapi2Client;
pub use error::{CallError, Result};
pub use handles::{HCluster, HGroup, HKey, HNetInterface, HNetwork, HNode, HNotify, HResource};

/// Interface UUID of `clusapi2`
pub const CLUSAPI2_UUID: &str = "b97db8b2-4c63-11cf-bfe6-08002be23f2f";

pub const CLUSAPI2_VERSION_MAJOR: u16 = 2;
pub const CLUSAPI2_VERSION_MINOR: u16 = 0;

/// Abstract syntax negotiated at bind time
pub const CLUSAPI2_SYNTAX: SyntaxId = SyntaxId::new(
    NdrUuid {
        data1: 0xb97d_b8b2,
        data2: 0x4c63,
        data3: 0x11cf,
        data4: [0xbf, 0xe6, 0x08, 0x00, 0x2b, 0xe2, 0x3f, 0x2f],
    },
    CLUSAPI2_VERSION_MAJOR,
    CLUSAPI2_VERSION_MINOR,
);

/// Bind `conn` to `clusapi2` and wrap the association in a client.
pub async fn bind<C: Conn>(conn: C) -> dcerpc::Result<Clusapi2Client<C::Bound>> {
    let bound = conn.bind(CLUSAPI2_SYNTAX).await?;
    Ok(Clusapi2Client::new(bound))
}

/// Connect over TCP to the cluster service endpoint at `addr` and bind.
pub async fn connect(addr: SocketAddr, config: ClientConfig) -> dcerpc::Result<Clusapi2Client<DceRpcClient>> {
    bind(DceRpcConnection::connect(addr, config).await?).await
}

/// Find the `clusapi2` port through the endpoint mapper on `host`, then
/// connect and bind.
pub async fn connect_mapped(host: IpAddr, config: ClientConfig) -> dcerpc::Result<Clusapi2Client<DceRpcClient>> {
    let addr = dcerpc::resolve_tcp(host, CLUSAPI2_SYNTAX, config.clone()).await?;
    connect(addr, config).await
}
