//! Endpoint mapper (`epm` v3) lookups
//!
//! Interfaces such as `clusapi2` listen on dynamic TCP ports. The endpoint
//! mapper on port 135 answers `ept_map` with protocol towers naming the
//! endpoint an interface is currently registered on.
//!
//! A tower is a list of floors, each a pair of `(lhs, rhs)` octet strings:
//!
//! | Floor | lhs | rhs |
//! |-------|-----|-----|
//! | interface | `0x0d`, UUID, major version | minor version |
//! | transfer syntax | `0x0d`, UUID, major version | minor version |
//! | protocol | `0x0b` (connection-oriented RPC) | `0x0000` |
//! | port | `0x07` (TCP) | port, big-endian |
//! | host | `0x09` (IP) | IPv4 address |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use bytes::{Buf, BufMut};
use midl_ndr::{
    check_count, decode_conformance, encode_conformance, ndr_params, ContextHandle, HandleKind, NdrContext,
    NdrDecode, NdrEncode, NdrError, NdrUuid,
};
use tracing::debug;

use crate::client::{ClientConfig, DceRpcConnection};
use crate::error::{Result, RpcError};
use crate::operation::{BoundConn, Call, CallOptions, CallStatus, Conn, Procedure, SuccessSignal};
use crate::pdu::{SyntaxId, NDR_SYNTAX};

/// Well-known TCP port of the endpoint mapper
pub const EPM_PORT: u16 = 135;

/// Endpoint mapper interface, e1af8308-5d1f-11c9-91a4-08002b14a0fa v3.0
pub const EPM_SYNTAX: SyntaxId = SyntaxId::new(
    NdrUuid {
        data1: 0xe1af_8308,
        data2: 0x5d1f,
        data3: 0x11c9,
        data4: [0x91, 0xa4, 0x08, 0x00, 0x2b, 0x14, 0xa0, 0xfa],
    },
    3,
    0,
);

pub const EPT_MAP: u16 = 3;

/// `ept_map` status when no endpoint matches the tower
pub const EPT_S_NOT_REGISTERED: u32 = 0x16c9_a0d6;

/// Towers requested per lookup
pub const DEFAULT_MAX_TOWERS: u32 = 4;

/// Floor protocol identifiers
pub mod protocol_id {
    pub const UUID: u8 = 0x0d;
    /// Connection-oriented RPC
    pub const RPC_CO: u8 = 0x0b;
    pub const TCP: u8 = 0x07;
    pub const IP: u8 = 0x09;
}

/// A floor of a protocol tower
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TowerFloor {
    pub lhs: Vec<u8>,
    pub rhs: Vec<u8>,
}

impl TowerFloor {
    /// Interface or transfer syntax floor
    pub fn uuid(syntax: SyntaxId) -> Self {
        let uuid = syntax.uuid;
        let mut lhs = Vec::with_capacity(19);
        lhs.push(protocol_id::UUID);
        lhs.put_u32_le(uuid.data1);
        lhs.put_u16_le(uuid.data2);
        lhs.put_u16_le(uuid.data3);
        lhs.put_slice(&uuid.data4);
        lhs.put_u16_le(syntax.major_version());
        Self {
            lhs,
            rhs: syntax.minor_version().to_le_bytes().to_vec(),
        }
    }

    pub fn rpc_co() -> Self {
        Self {
            lhs: vec![protocol_id::RPC_CO],
            rhs: vec![0, 0],
        }
    }

    pub fn tcp(port: u16) -> Self {
        Self {
            lhs: vec![protocol_id::TCP],
            rhs: port.to_be_bytes().to_vec(),
        }
    }

    pub fn ip(addr: Ipv4Addr) -> Self {
        Self {
            lhs: vec![protocol_id::IP],
            rhs: addr.octets().to_vec(),
        }
    }

    pub fn protocol(&self) -> Option<u8> {
        self.lhs.first().copied()
    }

    /// The syntax named by a UUID floor
    pub fn syntax(&self) -> Option<SyntaxId> {
        if self.protocol() != Some(protocol_id::UUID) || self.lhs.len() != 19 {
            return None;
        }
        let mut lhs = &self.lhs[1..];
        let data1 = lhs.get_u32_le();
        let data2 = lhs.get_u16_le();
        let data3 = lhs.get_u16_le();
        let mut data4 = [0u8; 8];
        lhs.copy_to_slice(&mut data4);
        let major = lhs.get_u16_le();
        let minor = match self.rhs.as_slice() {
            [lo, hi, ..] => u16::from_le_bytes([*lo, *hi]),
            _ => 0,
        };
        let uuid = NdrUuid {
            data1,
            data2,
            data3,
            data4,
        };
        Some(SyntaxId::new(uuid, major, minor))
    }

    fn encode(&self, buf: &mut Vec<u8>) {
        buf.put_u16_le(self.lhs.len() as u16);
        buf.put_slice(&self.lhs);
        buf.put_u16_le(self.rhs.len() as u16);
        buf.put_slice(&self.rhs);
    }

    fn decode(data: &mut &[u8]) -> Result<Self> {
        let lhs = take_field(data, "floor lhs")?;
        let rhs = take_field(data, "floor rhs")?;
        Ok(Self { lhs, rhs })
    }
}

fn take_u16(data: &mut &[u8], what: &str) -> Result<u16> {
    if data.remaining() < 2 {
        return Err(RpcError::InvalidTower(format!("truncated {}", what)));
    }
    Ok(data.get_u16_le())
}

fn take_field(data: &mut &[u8], what: &str) -> Result<Vec<u8>> {
    let len = take_u16(data, what)? as usize;
    if data.remaining() < len {
        return Err(RpcError::InvalidTower(format!(
            "{} claims {} bytes, {} left",
            what,
            len,
            data.remaining()
        )));
    }
    let field = data[..len].to_vec();
    data.advance(len);
    Ok(field)
}

/// A decoded protocol tower
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtocolTower {
    pub floors: Vec<TowerFloor>,
}

impl ProtocolTower {
    /// `ncacn_ip_tcp` tower for `interface` over NDR20
    pub fn tcp(interface: SyntaxId, port: u16, ip: Ipv4Addr) -> Self {
        Self {
            floors: vec![
                TowerFloor::uuid(interface),
                TowerFloor::uuid(NDR_SYNTAX),
                TowerFloor::rpc_co(),
                TowerFloor::tcp(port),
                TowerFloor::ip(ip),
            ],
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.put_u16_le(self.floors.len() as u16);
        for floor in &self.floors {
            floor.encode(&mut buf);
        }
        buf
    }

    pub fn parse(mut data: &[u8]) -> Result<Self> {
        let count = take_u16(&mut data, "floor count")?;
        // each floor takes at least four bytes
        let mut floors = Vec::with_capacity((count as usize).min(data.len() / 4));
        for _ in 0..count {
            floors.push(TowerFloor::decode(&mut data)?);
        }
        Ok(Self { floors })
    }

    /// Interface the tower leads to
    pub fn interface(&self) -> Option<SyntaxId> {
        self.floors.first().and_then(TowerFloor::syntax)
    }

    pub fn tcp_port(&self) -> Option<u16> {
        self.find(protocol_id::TCP).and_then(|floor| match floor.rhs.as_slice() {
            [hi, lo] => Some(u16::from_be_bytes([*hi, *lo])),
            _ => None,
        })
    }

    pub fn ip_addr(&self) -> Option<Ipv4Addr> {
        self.find(protocol_id::IP).and_then(|floor| match floor.rhs.as_slice() {
            [a, b, c, d] => Some(Ipv4Addr::new(*a, *b, *c, *d)),
            _ => None,
        })
    }

    fn find(&self, protocol: u8) -> Option<&TowerFloor> {
        self.floors.iter().find(|floor| floor.lhs == [protocol])
    }
}

/// `twr_t`: a conformant structure holding the encoded tower octets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tower {
    pub octets: Vec<u8>,
}

impl Tower {
    pub fn new(tower: &ProtocolTower) -> Self {
        Self {
            octets: tower.to_bytes(),
        }
    }

    pub fn decode(&self) -> Result<ProtocolTower> {
        ProtocolTower::parse(&self.octets)
    }
}

impl NdrEncode for Tower {
    fn ndr_encode<B: BufMut>(&self, buf: &mut B, ctx: &NdrContext, position: &mut usize) -> midl_ndr::Result<()> {
        let length = u32::try_from(self.octets.len()).map_err(|_| NdrError::IntegerOverflow)?;
        encode_conformance(buf, ctx, length, position);
        length.ndr_encode(buf, ctx, position)?;
        buf.put_slice(&self.octets);
        *position += self.octets.len();
        Ok(())
    }

    fn ndr_align() -> usize {
        4
    }
}

impl NdrDecode for Tower {
    fn ndr_decode<B: Buf>(buf: &mut B, ctx: &NdrContext, position: &mut usize) -> midl_ndr::Result<Self> {
        let max_count = decode_conformance(buf, ctx, position)?;
        let tower_length = u32::ndr_decode(buf, ctx, position)?;
        if tower_length > max_count {
            return Err(NdrError::ConformanceMismatch {
                max_count,
                offset: 0,
                actual_count: tower_length,
            });
        }
        let count = check_count::<u8, B>("tower_octet_string", u64::from(max_count), buf)?;
        let mut octets = vec![0u8; count];
        buf.copy_to_slice(&mut octets);
        *position += count;
        octets.truncate(tower_length as usize);
        Ok(Self { octets })
    }

    fn ndr_align() -> usize {
        4
    }
}

/// Marker for `ept_lookup_handle_t`
#[derive(Debug)]
pub enum Lookup {}

impl HandleKind for Lookup {
    const NAME: &'static str = "ept_lookup_handle_t";
}

pub type LookupHandle = ContextHandle<Lookup>;

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct EptMapRequest {
        /// Object UUID; `None` maps any object
        pub object: Option<NdrUuid>,
        pub map_tower: Option<Tower>,
        /// Empty for a single-shot lookup
        pub entry_handle: LookupHandle,
        pub max_towers: u32,
    }
}

ndr_params! {
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct EptMapResponse {
        pub entry_handle: LookupHandle,
        pub num_towers: u32,
        pub towers: Vec<Option<Tower>> => length_is(num_towers),
        pub status: u32,
    }
}

impl Procedure for EptMapRequest {
    const OPNUM: u16 = EPT_MAP;
    const NAME: &'static str = "/epm/v3/ept_map";
    type Response = EptMapResponse;
}

impl CallStatus for EptMapResponse {
    const SIGNAL: SuccessSignal = SuccessSignal::ReturnCode;

    fn status_code(&self) -> u32 {
        self.status
    }
}

/// Endpoint mapper client over a bound association
pub struct EpmClient<B> {
    conn: B,
}

impl<B: BoundConn> EpmClient<B> {
    pub fn new(conn: B) -> Self {
        Self { conn }
    }

    /// Ask for up to `max_towers` TCP towers registered for `interface`
    pub async fn map(&self, interface: SyntaxId, max_towers: u32) -> Result<Vec<ProtocolTower>> {
        let query = ProtocolTower::tcp(interface, 0, Ipv4Addr::UNSPECIFIED);
        let mut call = Call::new(EptMapRequest {
            object: None,
            map_tower: Some(Tower::new(&query)),
            entry_handle: LookupHandle::empty(),
            max_towers,
        });
        debug!("ept_map for {}", interface);
        self.conn.invoke(&mut call, CallOptions::default()).await?;

        let response = call
            .into_response()
            .ok_or_else(|| RpcError::InvalidPdu("ept_map: no response decoded".to_string()))?;
        if !response.is_success() {
            return Err(RpcError::EndpointNotFound {
                interface: interface.to_string(),
                status: response.status,
            });
        }
        debug!("ept_map returned {} towers", response.num_towers);
        response.towers.iter().flatten().map(Tower::decode).collect()
    }

    /// TCP port `interface` is registered on
    pub async fn map_tcp_port(&self, interface: SyntaxId) -> Result<u16> {
        let towers = self.map(interface, DEFAULT_MAX_TOWERS).await?;
        towers
            .iter()
            .filter(|tower| tower.interface() == Some(interface))
            .find_map(ProtocolTower::tcp_port)
            .ok_or_else(|| RpcError::EndpointNotFound {
                interface: interface.to_string(),
                status: EPT_S_NOT_REGISTERED,
            })
    }

    pub fn into_inner(self) -> B {
        self.conn
    }
}

/// Look up the TCP endpoint of `interface` through the endpoint mapper on
/// `host`.
pub async fn resolve_tcp(host: IpAddr, interface: SyntaxId, config: ClientConfig) -> Result<SocketAddr> {
    let conn = DceRpcConnection::connect(SocketAddr::new(host, EPM_PORT), config).await?;
    let epm = EpmClient::new(conn.bind(EPM_SYNTAX).await?);
    let port = epm.map_tcp_port(interface).await?;
    debug!("{} is on {}:{}", interface, host, port);
    Ok(SocketAddr::new(host, port))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::Operation;
    use async_trait::async_trait;
    use bytes::{Bytes, BytesMut};
    use std::sync::Mutex;

    fn interface() -> SyntaxId {
        SyntaxId::new(NdrUuid::parse("b97db8b2-4c63-11cf-bfe6-08002be23f2f").unwrap(), 2, 0)
    }

    /// Answers every call with one canned stub and keeps the request stubs
    struct Canned {
        reply: Vec<u8>,
        sent: Mutex<Vec<(u16, Vec<u8>)>>,
    }

    impl Canned {
        fn new(reply: Vec<u8>) -> Self {
            Self {
                reply,
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl BoundConn for Canned {
        async fn invoke(&self, op: &mut dyn Operation, _options: CallOptions) -> Result<()> {
            let mut stub = BytesMut::new();
            op.marshal_request(&mut stub, &NdrContext::new())?;
            self.sent.lock().unwrap().push((op.opnum(), stub.to_vec()));
            op.unmarshal_response(&mut Bytes::from(self.reply.clone()), &NdrContext::new())
        }

        async fn alter_context(&self, _syntax: SyntaxId, _options: CallOptions) -> Result<()> {
            Ok(())
        }
    }

    fn le(value: u32) -> [u8; 4] {
        value.to_le_bytes()
    }

    fn map_reply(towers: &[ProtocolTower], status: u32) -> Vec<u8> {
        let mut stub = vec![0u8; 20];
        stub.extend_from_slice(&le(towers.len() as u32));
        stub.extend_from_slice(&le(DEFAULT_MAX_TOWERS));
        stub.extend_from_slice(&le(0));
        stub.extend_from_slice(&le(towers.len() as u32));
        for index in 0..towers.len() {
            stub.extend_from_slice(&le(0x0002_0000 + 4 * index as u32));
        }
        for tower in towers {
            let octets = tower.to_bytes();
            while stub.len() % 4 != 0 {
                stub.push(0);
            }
            stub.extend_from_slice(&le(octets.len() as u32));
            stub.extend_from_slice(&le(octets.len() as u32));
            stub.extend_from_slice(&octets);
        }
        while stub.len() % 4 != 0 {
            stub.push(0);
        }
        stub.extend_from_slice(&le(status));
        stub
    }

    #[test]
    fn test_tcp_tower_layout() {
        let bytes = ProtocolTower::tcp(interface(), 0xc000, Ipv4Addr::new(10, 0, 0, 5)).to_bytes();
        assert_eq!(bytes.len(), 75);
        assert_eq!(&bytes[..5], &[5, 0, 19, 0, protocol_id::UUID]);
        assert_eq!(&bytes[5..9], &[0xb2, 0xb8, 0x7d, 0xb9]);
        assert_eq!(&bytes[21..27], &[2, 0, 2, 0, 0, 0]);
        // NDR20 transfer syntax, version 2
        assert_eq!(&bytes[30..34], &[0x04, 0x5d, 0x88, 0x8a]);
        assert_eq!(&bytes[52..59], &[1, 0, protocol_id::RPC_CO, 2, 0, 0, 0]);
        assert_eq!(&bytes[59..66], &[1, 0, protocol_id::TCP, 2, 0, 0xc0, 0x00]);
        assert_eq!(&bytes[66..], &[1, 0, protocol_id::IP, 4, 0, 10, 0, 0, 5]);
    }

    #[test]
    fn test_tower_parse() {
        let tower = ProtocolTower::tcp(interface(), 49153, Ipv4Addr::new(192, 0, 2, 10));
        let parsed = ProtocolTower::parse(&tower.to_bytes()).unwrap();
        assert_eq!(parsed, tower);
        assert_eq!(parsed.interface(), Some(interface()));
        assert_eq!(parsed.floors[1].syntax(), Some(NDR_SYNTAX));
        assert_eq!(parsed.tcp_port(), Some(49153));
        assert_eq!(parsed.ip_addr(), Some(Ipv4Addr::new(192, 0, 2, 10)));

        let bytes = tower.to_bytes();
        assert!(matches!(ProtocolTower::parse(&bytes[..40]), Err(RpcError::InvalidTower(_))));
        assert!(matches!(ProtocolTower::parse(&[1]), Err(RpcError::InvalidTower(_))));
    }

    #[test]
    fn test_tower_length_beyond_max_count() {
        let mut stub = Vec::new();
        stub.extend_from_slice(&le(2));
        stub.extend_from_slice(&le(3));
        stub.extend_from_slice(&[1, 2, 0, 0]);
        let mut position = 0;
        let result = Tower::ndr_decode(&mut Bytes::from(stub), &NdrContext::new(), &mut position);
        assert!(matches!(result, Err(NdrError::ConformanceMismatch { max_count: 2, .. })));
    }

    #[tokio::test]
    async fn test_map_request_layout() {
        let epm = EpmClient::new(Canned::new(map_reply(&[], EPT_S_NOT_REGISTERED)));
        let _ = epm.map(interface(), 4).await;

        let sent = epm.into_inner().sent.into_inner().unwrap();
        let (opnum, stub) = &sent[0];
        assert_eq!(*opnum, EPT_MAP);

        let tower = ProtocolTower::tcp(interface(), 0, Ipv4Addr::UNSPECIFIED).to_bytes();
        let mut expected = le(0).to_vec(); // no object
        expected.extend_from_slice(&[0, 0, 2, 0]);
        expected.extend_from_slice(&le(75));
        expected.extend_from_slice(&le(75));
        expected.extend_from_slice(&tower);
        expected.push(0);
        expected.extend_from_slice(&[0u8; 20]);
        expected.extend_from_slice(&le(4));
        assert_eq!(stub, &expected);
    }

    #[tokio::test]
    async fn test_map_tcp_port() {
        let towers = [
            ProtocolTower::tcp(SyntaxId::new(NdrUuid::NIL, 1, 0), 5000, Ipv4Addr::new(10, 0, 0, 5)),
            ProtocolTower::tcp(interface(), 49152, Ipv4Addr::new(10, 0, 0, 5)),
        ];
        let epm = EpmClient::new(Canned::new(map_reply(&towers, 0)));

        let found = epm.map(interface(), DEFAULT_MAX_TOWERS).await.unwrap();
        assert_eq!(found, towers);
        assert_eq!(epm.map_tcp_port(interface()).await.unwrap(), 49152);
    }

    #[tokio::test]
    async fn test_not_registered() {
        let epm = EpmClient::new(Canned::new(map_reply(&[], EPT_S_NOT_REGISTERED)));
        let err = epm.map_tcp_port(interface()).await.unwrap_err();
        assert!(matches!(
            err,
            RpcError::EndpointNotFound {
                status: EPT_S_NOT_REGISTERED,
                ..
            }
        ));
        assert!(err.to_string().contains("b97db8b2-4c63-11cf-bfe6-08002be23f2f v2.0"));

        // success, but only towers for another interface
        let other = ProtocolTower::tcp(SyntaxId::new(NdrUuid::NIL, 1, 0), 5000, Ipv4Addr::LOCALHOST);
        let epm = EpmClient::new(Canned::new(map_reply(&[other], 0)));
        assert!(matches!(
            epm.map_tcp_port(interface()).await,
            Err(RpcError::EndpointNotFound { .. })
        ));
    }
}
