//! Status handling, hooks and transport failures of `Clusapi2Client`

mod common;

use cmrp::ops::*;
use cmrp::{opnum, CallError, HCluster, HGroup, HKey, CLUSAPI2_SYNTAX};
use common::*;
use dcerpc::{Call, CallOptions, RpcError, Win32Status};
use midl_ndr::NdrUuid;

fn uuid() -> NdrUuid {
    NdrUuid::parse("0d1e2f30-4152-6374-8596-a7b8c9dae0f1").unwrap()
}

#[tokio::test]
async fn test_open_failure_reported_through_status() {
    let mut reply = le(Win32Status::ERROR_GROUP_NOT_FOUND.0).to_vec();
    reply.extend_from_slice(&[0u8; 20]);
    let client = client(MockConn::new().reply(reply));

    let err = client
        .open_group(OpenGroupRequest {
            group_name: "Missing".into(),
        })
        .await
        .unwrap_err();

    assert!(err.is_status(Win32Status::ERROR_GROUP_NOT_FOUND));
    assert!(err.to_string().starts_with("/clusapi2/v2/ApiOpenGroup: ERROR_GROUP_NOT_FOUND"));
    let response = err.into_response().unwrap();
    assert_eq!(response.status, 5013);
    assert!(response.handle.is_null());

    let sent = client.conn().sent();
    assert_eq!(sent[0].opnum, opnum::OPEN_GROUP);
    assert_eq!(sent[0].op_name, "/clusapi2/v2/ApiOpenGroup");
    assert_eq!(sent[0].stub, wide("Missing"));
}

#[tokio::test]
async fn test_open_success_returns_handle() {
    let handle = HGroup::new(0, uuid());
    let client = client(MockConn::new().reply_with(&OpenGroupResponse { status: 0, handle }));

    let response = client
        .open_group(OpenGroupRequest {
            group_name: "Cluster Group".into(),
        })
        .await
        .unwrap();
    assert_eq!(response.handle, handle);
    assert!(!response.handle.is_null());
}

#[tokio::test]
async fn test_status_wins_over_handle() {
    let client = client(MockConn::new().reply_with(&OpenClusterResponse {
        status: Win32Status::ERROR_ACCESS_DENIED.0,
        handle: HCluster::new(0, uuid()),
    }));

    let err = client.open_cluster(OpenClusterRequest::default()).await.unwrap_err();
    assert_eq!(err.status(), Some(Win32Status::ERROR_ACCESS_DENIED));
}

#[tokio::test]
async fn test_return_code_failure() {
    let client = client(MockConn::new().reply(le(Win32Status::ERROR_ACCESS_DENIED.0)));

    let err = client
        .delete_group(DeleteGroupRequest {
            group: HGroup::new(0, uuid()),
            force: true,
        })
        .await
        .unwrap_err();
    assert!(err.is_status(Win32Status::ERROR_ACCESS_DENIED));
    assert_eq!(err.response().map(|r| r.return_value), Some(5));

    let stub = &client.conn().sent()[0].stub;
    assert_eq!(stub.len(), 24);
    assert_eq!(&stub[20..], &le(1));
}

#[tokio::test]
async fn test_more_data_keeps_required_size() {
    let client = client(MockConn::new().reply_with(&QueryValueResponse {
        value_type: 3,
        data: vec![0; 4],
        required: 40,
        return_value: Win32Status::ERROR_MORE_DATA.0,
    }));

    let err = client
        .query_value(QueryValueRequest {
            key: HKey::new(0, uuid()),
            value_name: "Blob".into(),
            data_size: 4,
        })
        .await
        .unwrap_err();
    assert!(err.is_status(Win32Status::ERROR_MORE_DATA));
    assert_eq!(err.response().unwrap().required, 40);
}

#[tokio::test]
async fn test_control_more_data() {
    let mut reply = vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
    reply.extend_from_slice(&le(0));
    reply.extend_from_slice(&le(64));
    reply.extend_from_slice(&le(Win32Status::ERROR_MORE_DATA.0));
    let client = client(MockConn::new().reply(reply));

    let err = client
        .cluster_control(ClusterControlRequest {
            cluster: HCluster::new(0, uuid()),
            control_code: control_code(object::CLUSTER, 15, ACCESS_READ, false),
            ..Default::default()
        })
        .await
        .unwrap_err();
    let response = err.response().unwrap();
    assert_eq!(response.required, 64);
    assert!(response.output().is_empty());
}

#[tokio::test]
async fn test_transport_failure_has_no_response() {
    let client = client(MockConn::new().fail(RpcError::ConnectionClosed));

    let err = client
        .get_cluster_name(GetClusterNameRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CallError::Rpc(RpcError::ConnectionClosed)));
    assert_eq!(err.status(), None);
    assert!(err.into_response().is_none());
}

#[tokio::test]
async fn test_fault_surfaces_unchanged() {
    let client = client(MockConn::new().fail(RpcError::Fault(0x1c01_0003)));

    let err = client.get_cluster_version(GetClusterVersionRequest::default()).await.unwrap_err();
    assert!(matches!(err, CallError::Rpc(RpcError::Fault(0x1c01_0003))));
}

#[tokio::test]
async fn test_request_hook_runs_after_prepare() {
    let client = client(MockConn::new().reply(le(0)));

    let call = Call::new(SetValueRequest {
        key: HKey::empty(),
        value_name: "V".into(),
        value_type: 3,
        data: vec![7, 7],
        data_length: 0,
    })
    .with_request_hook(Box::new(|request: &mut SetValueRequest| {
        assert_eq!(request.data_length, 2);
        request.data_length = 4;
        Ok(())
    }));
    client.invoke_call(call, CallOptions::default()).await.unwrap();

    let stub = &client.conn().sent()[0].stub;
    let tail = &stub[stub.len() - 12..];
    assert_eq!(tail, &[4, 0, 0, 0, 7, 7, 0, 0, 4, 0, 0, 0]);
}

#[tokio::test]
async fn test_response_hook_sees_decoded_response() {
    let client = client(MockConn::new().reply_with(&GetNodeStateResponse {
        state: 3,
        return_value: 0,
    }));

    let call = Call::new(GetNodeStateRequest {
        node: Default::default(),
    })
    .with_response_hook(Box::new(|response: &mut GetNodeStateResponse| {
        response.state += 100;
        Ok(())
    }));
    let response = client.invoke_call(call, CallOptions::default()).await.unwrap();
    assert_eq!(response.state, 103);
}

#[tokio::test]
async fn test_alter_context_resends_interface() {
    let client = client(MockConn::new());
    client.alter_context().await.unwrap();
    assert_eq!(client.conn().contexts(), vec![CLUSAPI2_SYNTAX]);
}
