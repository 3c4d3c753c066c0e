//! Stub layouts of representative `clusapi2` calls, checked byte for byte
//! against what a server sends and expects.

mod common;

use cmrp::ops::*;
use cmrp::types::{enum_type, ClusterSetPasswordFlags, RpcSecurityAttributes, RpcSecurityDescriptor};
use cmrp::{opnum, CallError, HGroup, HKey, HNode};
use common::*;
use dcerpc::RpcError;
use midl_ndr::{NdrError, NdrUuid};

fn uuid() -> NdrUuid {
    NdrUuid::parse("6a3f0c2e-91d4-4b8a-a5e1-0c2d3e4f5a6b").unwrap()
}

#[tokio::test]
async fn test_set_value_fills_data_length() {
    let client = client(MockConn::new().reply(le(0)));
    client
        .set_value(SetValueRequest {
            key: HKey::empty(),
            value_name: "Foo".into(),
            value_type: 1,
            data: vec![1, 2, 3],
            data_length: 0,
        })
        .await
        .unwrap();

    let sent = client.conn().sent();
    assert_eq!(sent[0].opnum, opnum::SET_VALUE);

    let mut expected = vec![0u8; 20];
    expected.extend_from_slice(&wide("Foo"));
    expected.extend_from_slice(&le(1));
    expected.extend_from_slice(&[3, 0, 0, 0, 1, 2, 3]);
    expected.push(0);
    expected.extend_from_slice(&le(3));
    assert_eq!(sent[0].stub, expected);
}

#[tokio::test]
async fn test_enum_list_with_zero_max_count() {
    let mut stub = Vec::new();
    stub.extend_from_slice(&[0, 0, 2, 0]);
    stub.extend_from_slice(&le(0)); // max_count
    stub.extend_from_slice(&le(2)); // entry_count
    stub.extend_from_slice(&[1, 0, 0, 0, 4, 0, 2, 0]);
    stub.extend_from_slice(&[1, 0, 0, 0, 8, 0, 2, 0]);
    stub.extend_from_slice(&wide("n1"));
    stub.extend_from_slice(&[0, 0]);
    stub.extend_from_slice(&wide("n2"));
    stub.extend_from_slice(&[0, 0]);
    stub.extend_from_slice(&le(0));

    let client = client(MockConn::new().reply(stub));
    let response = client
        .create_enum(CreateEnumRequest {
            enum_type: enum_type::NODE,
        })
        .await
        .unwrap();

    assert_eq!(client.conn().sent()[0].stub, le(enum_type::NODE));
    let list = response.return_enum.as_ref().unwrap();
    assert_eq!(list.entry_count, 2);
    assert_eq!(list.names(enum_type::NODE).collect::<Vec<_>>(), vec!["n1", "n2"]);
    assert_eq!(list.names(enum_type::GROUP).count(), 0);
    assert_eq!(response.entries().len(), 2);
}

#[tokio::test]
async fn test_enum_list_larger_than_stub_is_rejected() {
    let mut stub = Vec::new();
    stub.extend_from_slice(&[0, 0, 2, 0]);
    stub.extend_from_slice(&le(0x0001_0000));
    stub.extend_from_slice(&le(0x0001_0000));
    stub.extend_from_slice(&le(0));

    let client = client(MockConn::new().reply(stub));
    let err = client
        .create_enum(CreateEnumRequest {
            enum_type: enum_type::ALL,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CallError::Rpc(RpcError::Ndr(NdrError::SizeOverflow { field: "entries", .. }))
    ));
}

#[tokio::test]
async fn test_empty_handle_marshals_as_nil() {
    let conn = MockConn::new()
        .reply_with(&CloseGroupResponse::default())
        .reply_with(&CloseGroupResponse::default());
    let client = client(conn);

    client
        .close_group(CloseGroupRequest { group: HGroup::empty() })
        .await
        .unwrap();
    client
        .close_group(CloseGroupRequest {
            group: HGroup::new(0, NdrUuid::NIL),
        })
        .await
        .unwrap();

    let sent = client.conn().sent();
    assert_eq!(sent[0].stub, vec![0u8; 20]);
    assert_eq!(sent[0].stub, sent[1].stub);
}

#[tokio::test]
async fn test_cluster_version2_layout() {
    let mut stub = vec![6, 0, 3, 0, 0x80, 0x25, 0, 0];
    stub.extend_from_slice(&[0, 0, 2, 0]);
    stub.extend_from_slice(&wide("MS"));
    stub.extend_from_slice(&[0, 0]);
    stub.extend_from_slice(&le(0)); // no CSD version
    stub.extend_from_slice(&[4, 0, 2, 0]);
    for field in [20, 9, 1, 9600, 0] {
        stub.extend_from_slice(&le(field));
    }
    stub.extend_from_slice(&le(0));
    assert_eq!(stub.len(), 64);

    let client = client(MockConn::new().reply(stub));
    let version = client
        .get_cluster_version2(GetClusterVersion2Request::default())
        .await
        .unwrap();

    assert!(client.conn().sent()[0].stub.is_empty());
    assert_eq!((version.major_version, version.minor_version, version.build_number), (6, 3, 9600));
    assert_eq!(version.vendor_id.as_deref(), Some("MS"));
    assert_eq!(version.csd_version, None);
    let info = version.cluster_op_version_info.unwrap();
    assert_eq!(info.version_info_size, 20);
    assert_eq!((info.major_version, info.minor_version, info.build_number), (9, 1, 9600));
}

#[tokio::test]
async fn test_create_key_defers_descriptor_bytes() {
    let handle = HKey::new(0, uuid());
    let client = client(MockConn::new().reply_with(&CreateKeyResponse {
        disposition: 1,
        status: 0,
        handle,
    }));

    let response = client
        .create_key(CreateKeyRequest {
            key: HKey::empty(),
            sub_key: "k".into(),
            options: 0,
            sam_desired: 0x0002_0019,
            security_attributes: Some(RpcSecurityAttributes {
                length: 12,
                security_descriptor: RpcSecurityDescriptor::new(vec![1, 2, 3]),
                inherit_handle: true,
            }),
        })
        .await
        .unwrap();
    assert_eq!(response.handle, handle);
    assert_eq!(response.disposition, 1);

    let mut expected = vec![0u8; 20];
    expected.extend_from_slice(&wide("k"));
    expected.extend_from_slice(&le(0));
    expected.extend_from_slice(&le(0x0002_0019));
    expected.extend_from_slice(&[0, 0, 2, 0]); // attributes referent
    expected.extend_from_slice(&le(12));
    expected.extend_from_slice(&[4, 0, 2, 0]); // descriptor referent
    expected.extend_from_slice(&le(3));
    expected.extend_from_slice(&le(3));
    expected.extend_from_slice(&le(1));
    expected.extend_from_slice(&[3, 0, 0, 0, 0, 0, 0, 0, 3, 0, 0, 0, 1, 2, 3]);
    assert_eq!(client.conn().sent()[0].stub, expected);
}

#[tokio::test]
async fn test_control_buffers() {
    let reply = [
        16, 0, 0, 0, 0, 0, 0, 0, 3, 0, 0, 0, b'a', b'b', b'c', 0, // out_buffer
        3, 0, 0, 0, 3, 0, 0, 0, 0, 0, 0, 0,
    ];
    let client = client(MockConn::new().reply(reply.to_vec()));

    let request = NodeControlRequest {
        node: HNode::empty(),
        control_code: control_code(object::NODE, 1, ACCESS_READ, false),
        in_buffer_size: 4,
        ..Default::default()
    }
    .with_input(vec![1, 2])
    .with_output_capacity(16);
    let response = client.node_control(request).await.unwrap();
    assert_eq!(response.output(), b"abc");
    assert_eq!(response.out_buffer.len(), 3);

    let mut expected = vec![0u8; 20];
    expected.extend_from_slice(&[5, 0, 0, 4]);
    expected.extend_from_slice(&[0, 0, 2, 0]);
    expected.extend_from_slice(&[4, 0, 0, 0, 1, 2, 0, 0]);
    expected.extend_from_slice(&le(4));
    expected.extend_from_slice(&le(16));
    assert_eq!(client.conn().sent()[0].stub, expected);
}

#[tokio::test]
async fn test_service_account_password() {
    let mut reply = vec![4, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0];
    reply.extend_from_slice(&[1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0]);
    reply.extend_from_slice(&[2, 0, 0, 0, 0, 0, 0, 0, 0xba, 6, 0, 0]);
    reply.extend_from_slice(&le(2));
    reply.extend_from_slice(&le(0));
    reply.extend_from_slice(&le(0));

    let client = client(MockConn::new().reply(reply));
    let response = client
        .set_service_account_password(SetServiceAccountPasswordRequest {
            new_password: "pw".into(),
            flags: ClusterSetPasswordFlags::IGNORE_DOWN_NODES,
            return_status_buffer_size: 4,
        })
        .await
        .unwrap();

    let mut expected = wide("pw");
    expected.extend_from_slice(&[1, 0]);
    expected.extend_from_slice(&le(4));
    assert_eq!(client.conn().sent()[0].stub, expected);

    assert_eq!(response.size_returned, 2);
    let statuses = &response.return_status_buffer;
    assert_eq!(statuses.len(), 2);
    assert_eq!((statuses[0].node_id, statuses[0].set_attempted), (1, true));
    assert_eq!((statuses[1].node_id, statuses[1].set_attempted, statuses[1].return_status), (2, false, 1722));
}

#[tokio::test]
async fn test_password_buffer_size_bound() {
    let client = client(MockConn::new());
    let err = client
        .set_service_account_password(SetServiceAccountPasswordRequest {
            new_password: "pw".into(),
            flags: ClusterSetPasswordFlags::NONE,
            return_status_buffer_size: 65537,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CallError::Rpc(RpcError::Ndr(NdrError::OutOfRange {
            field: "return_status_buffer_size",
            ..
        }))
    ));
    assert!(client.conn().sent().is_empty());
}

#[tokio::test]
async fn test_network_priority_count_bound() {
    let client = client(MockConn::new());
    let request = SetNetworkPriorityOrderRequest::new((0..1001).map(|i| format!("net{}", i)));
    let err = client.set_network_priority_order(request).await.unwrap_err();

    assert!(matches!(
        err,
        CallError::Rpc(RpcError::Ndr(NdrError::OutOfRange {
            field: "network_count",
            value: 1001,
            ..
        }))
    ));
    assert!(client.conn().sent().is_empty());
}
