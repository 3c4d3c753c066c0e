//! List the nodes, groups and resources of a failover cluster
//!
//! Run with: cargo run -p cluster-enum -- --host node1.example.com
//!
//! `clusapi2` listens on a dynamic TCP port. Without `--port` it is looked
//! up through the endpoint mapper on port 135.

use std::net::SocketAddr;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cmrp::ops::{CloseClusterRequest, CreateEnumRequest, GetClusterNameRequest, OpenClusterRequest};
use cmrp::types::enum_type;
use cmrp::Clusapi2Client;
use dcerpc::{ClientConfig, DceRpcClient, EPM_PORT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    Node,
    ResourceType,
    Resource,
    Group,
    Network,
    NetInterface,
}

impl Kind {
    fn mask(self) -> u32 {
        match self {
            Kind::Node => enum_type::NODE,
            Kind::ResourceType => enum_type::RESTYPE,
            Kind::Resource => enum_type::RESOURCE,
            Kind::Group => enum_type::GROUP,
            Kind::Network => enum_type::NETWORK,
            Kind::NetInterface => enum_type::NETINTERFACE,
        }
    }

    fn label(mask: u32) -> &'static str {
        match mask {
            enum_type::NODE => "node",
            enum_type::RESTYPE => "resource type",
            enum_type::RESOURCE => "resource",
            enum_type::GROUP => "group",
            enum_type::NETWORK => "network",
            enum_type::NETINTERFACE => "network interface",
            _ => "object",
        }
    }
}

#[derive(Parser)]
#[command(name = "cluster-enum")]
#[command(about = "Enumerate failover cluster objects over clusapi2")]
struct Args {
    /// Cluster node host
    #[arg(short = 'H', long)]
    host: String,

    /// TCP port of the clusapi2 endpoint; asks the endpoint mapper when absent
    #[arg(short, long)]
    port: Option<u16>,

    /// Object kinds to list
    #[arg(short, long, value_enum, value_delimiter = ',', default_value = "node,group,resource")]
    kinds: Vec<Kind>,

    /// Per-call timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Log protocol details
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let host = tokio::net::lookup_host((args.host.as_str(), EPM_PORT))
        .await?
        .next()
        .map(|addr| addr.ip())
        .ok_or_else(|| format!("{} has no address", args.host))?;
    let config = ClientConfig {
        timeout: Some(Duration::from_secs(args.timeout)),
        ..Default::default()
    };

    let client = match args.port {
        Some(port) => {
            let addr = SocketAddr::new(host, port);
            info!("Connecting to {}", addr);
            cmrp::connect(addr, config).await?
        }
        None => {
            info!("Looking up clusapi2 on {}", host);
            cmrp::connect_mapped(host, config).await?
        }
    };

    let cluster = client.open_cluster(OpenClusterRequest::default()).await?.handle;
    let listed = list(&client, &args.kinds).await;
    let closed = client.close_cluster(CloseClusterRequest { cluster }).await;
    listed?;
    closed?;
    Ok(())
}

async fn list(client: &Clusapi2Client<DceRpcClient>, kinds: &[Kind]) -> Result<(), Box<dyn std::error::Error>> {
    match client.get_cluster_name(GetClusterNameRequest::default()).await {
        Ok(names) => info!(
            "Cluster {} (answered by {})",
            names.cluster_name.as_deref().unwrap_or("?"),
            names.node_name.as_deref().unwrap_or("?")
        ),
        Err(e) => warn!("Cluster name unavailable: {}", e),
    }

    let mask = kinds.iter().fold(0, |mask, kind| mask | kind.mask());
    let listing = client.create_enum(CreateEnumRequest { enum_type: mask }).await?;
    for entry in listing.entries() {
        println!(
            "{:<18} {}",
            Kind::label(entry.entry_type),
            entry.name.as_deref().unwrap_or("")
        );
    }
    info!("{} objects", listing.entries().len());
    Ok(())
}
