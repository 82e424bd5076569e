mod support;

use std::sync::Arc;

use nfs_mamont_proto::protocol::nfs::v3;
use nfs_mamont_proto::protocol::rpc::RpcMessage;
use nfs_mamont_proto::xdr::nfs3::{self, dir, file, nfsstat3, Nfs3Result};
use nfs_mamont_proto::xdr::{rpc, to_bytes};
use nfs_mamont_proto::{Context, Dispatcher, Error};

use support::{accept_status, call_header, frame, nfs_payload, reply_header, DemoHandler};

fn dispatcher() -> (Arc<DemoHandler>, Dispatcher<DemoHandler>) {
    support::init_tracing();
    let handler = Arc::new(DemoHandler::default());
    (handler.clone(), Dispatcher::new(handler))
}

fn context() -> Context {
    Context::new("127.0.0.1:800")
}

/// Payload of a typed call, i.e. its record without the mark.
fn payload<M: RpcMessage>(call: &M) -> Vec<u8> {
    call.encode().expect("cannot encode call")[4..].to_vec()
}

#[tokio::test]
async fn null_call() {
    let (_, dispatcher) = dispatcher();
    let call = v3::NullCall::new(42, Default::default());

    let reply = dispatcher.dispatch(&payload(&call), &context()).await.expect("reply");
    assert_eq!(reply.len(), 4 + 24);
    let reply = v3::NullReply::decode(&reply).expect("NULL reply");
    assert_eq!(reply.xid(), 42);
    assert_eq!(reply.status(), nfsstat3::NFS3_OK);
}

#[tokio::test]
async fn getattr_reply_carries_xid_and_attributes() {
    let (handler, dispatcher) = dispatcher();
    let call = v3::GetattrCall::new(
        0xdead_beef,
        nfs3::GETATTR3args { object: support::handle(support::LINK_HANDLE) },
    );

    let reply = dispatcher.dispatch(&payload(&call), &context()).await.expect("reply");
    let reply = v3::GetattrReply::decode(&reply).expect("GETATTR reply");
    assert_eq!(reply.xid(), 0xdead_beef);
    let Nfs3Result::Ok(resok) = reply.into_result() else {
        panic!("expected attributes");
    };
    assert_eq!(resok.obj_attributes.size, 42);
    assert_eq!(resok.obj_attributes.fileid, 7);
    assert_eq!(handler.calls(), 1);

    let call = v3::GetattrCall::new(2, nfs3::GETATTR3args { object: support::handle(b"gone") });
    let reply = dispatcher.dispatch(&payload(&call), &context()).await.expect("reply");
    let reply = v3::GetattrReply::decode(&reply).expect("GETATTR reply");
    assert_eq!(reply.status(), nfsstat3::NFS3ERR_STALE);
}

#[tokio::test]
async fn rpc_version_mismatch() {
    let (handler, dispatcher) = dispatcher();
    let header = call_header(7, 3, nfs3::PROGRAM, nfs3::VERSION, 0, Default::default());

    let reply = dispatcher.dispatch(&to_bytes(&header).expect("header"), &context()).await;
    let header = reply_header(&reply.expect("reply"));
    assert_eq!(header.xid, 7);
    assert_eq!(
        header.body,
        rpc::rpc_body::REPLY(rpc::reply_body::MSG_DENIED(rpc::rejected_reply::RPC_MISMATCH(
            rpc::mismatch_info { low: 2, high: 2 }
        )))
    );
    assert_eq!(handler.calls(), 0);
}

#[tokio::test]
async fn other_programs_are_unavailable() {
    let (_, dispatcher) = dispatcher();
    for prog in [100000, 100005, 100021] {
        let header = call_header(8, rpc::RPC_VERSION, prog, 3, 0, Default::default());
        let reply = dispatcher.dispatch(&to_bytes(&header).expect("header"), &context()).await;
        assert_eq!(accept_status(&reply.expect("reply")), rpc::accept_body::PROG_UNAVAIL);
    }
}

#[tokio::test]
async fn program_version_mismatch() {
    let (_, dispatcher) = dispatcher();
    for vers in [2, 4] {
        let header = call_header(9, rpc::RPC_VERSION, nfs3::PROGRAM, vers, 0, Default::default());
        let reply = dispatcher.dispatch(&to_bytes(&header).expect("header"), &context()).await;
        assert_eq!(
            accept_status(&reply.expect("reply")),
            rpc::accept_body::PROG_MISMATCH(rpc::mismatch_info { low: 3, high: 3 })
        );
    }
}

#[tokio::test]
async fn unknown_procedure_is_unavailable() {
    let (_, dispatcher) = dispatcher();
    let reply = dispatcher.dispatch(&nfs_payload(10, 22, &[]), &context()).await;
    let reply = reply.expect("reply");
    assert_eq!(reply_header(&reply).xid, 10);
    assert_eq!(accept_status(&reply), rpc::accept_body::PROC_UNAVAIL);
}

#[tokio::test]
async fn unimplemented_procedure_is_unavailable() {
    let (handler, dispatcher) = dispatcher();
    let call = v3::CommitCall::new(
        11,
        file::COMMIT3args { file: support::handle(b"file"), offset: 0, count: 0 },
    );

    let reply = dispatcher.dispatch(&payload(&call), &context()).await.expect("reply");
    assert_eq!(accept_status(&reply), rpc::accept_body::PROC_UNAVAIL);
    assert_eq!(handler.calls(), 0);
}

#[tokio::test]
async fn undecodable_arguments_are_garbage() {
    let (handler, dispatcher) = dispatcher();

    // handle longer than 64 bytes
    let mut args = 65u32.to_be_bytes().to_vec();
    args.extend_from_slice(&[0u8; 68]);
    let reply = dispatcher.dispatch(&nfs_payload(12, 1, &args), &context()).await;
    assert_eq!(accept_status(&reply.expect("reply")), rpc::accept_body::GARBAGE_ARGS);

    // truncated READ arguments
    let reply = dispatcher.dispatch(&nfs_payload(13, 6, &[0, 0, 0, 4, 1, 2]), &context()).await;
    assert_eq!(accept_status(&reply.expect("reply")), rpc::accept_body::GARBAGE_ARGS);

    assert_eq!(handler.calls(), 0);
}

#[tokio::test]
async fn handler_failure_is_server_fault() {
    let (handler, dispatcher) = dispatcher();
    let call = v3::ReadCall::new(
        14,
        file::READ3args { file: support::handle(b"file"), offset: 0, count: 100 },
    );

    let reply = dispatcher.dispatch(&payload(&call), &context()).await.expect("reply");
    let reply = v3::ReadReply::decode(&reply).expect("READ reply");
    assert_eq!(reply.status(), nfsstat3::NFS3ERR_SERVERFAULT);
    assert_eq!(handler.calls(), 1);
}

#[tokio::test]
async fn disallowed_handler_status_sends_nothing() {
    let (handler, dispatcher) = dispatcher();
    let call = v3::LookupCall::new(
        15,
        dir::LOOKUP3args {
            what: nfs3::diropargs3 { dir: support::handle(b"dir"), name: "x".into() },
        },
    );

    let err = dispatcher.dispatch(&payload(&call), &context()).await.expect_err("ROFS");
    assert!(matches!(
        err,
        Error::DisallowedStatus { procedure: "LOOKUP", status: nfsstat3::NFS3ERR_ROFS }
    ));
    assert_eq!(handler.calls(), 1);
}

#[tokio::test]
async fn reply_instead_of_call() {
    let (_, dispatcher) = dispatcher();
    let message = rpc::make_success_reply(16);

    let err = dispatcher
        .dispatch(&to_bytes(&message).expect("header"), &context())
        .await
        .expect_err("a reply is not a call");
    assert!(matches!(err, Error::UnexpectedMessage(_)));
}

#[tokio::test]
async fn garbage_header_is_a_decode_error() {
    let (_, dispatcher) = dispatcher();
    let err = dispatcher.dispatch(&[0, 0, 1], &context()).await.expect_err("no header");
    assert!(matches!(err, Error::Decode(_)));
}

#[tokio::test]
async fn unix_credentials_reach_the_handler() {
    let (_, dispatcher) = dispatcher();
    let auth = rpc::auth_unix {
        stamp: 1,
        machinename: b"client".to_vec(),
        uid: 1000,
        gid: 100,
        gids: vec![100, 27],
    };
    let call = v3::AccessCall::new(
        17,
        nfs3::ACCESS3args { object: support::handle(b"file"), access: nfs3::ACCESS3_READ },
    )
    .with_credentials(rpc::opaque_auth::unix(&auth).expect("credentials"));

    let reply = dispatcher.dispatch(&payload(&call), &context()).await.expect("reply");
    let reply = v3::AccessReply::decode(&reply).expect("ACCESS reply");
    let Nfs3Result::Ok(resok) = reply.into_result() else {
        panic!("expected access bits");
    };
    assert_eq!(resok.access, 1000);
}

#[tokio::test]
async fn malformed_credentials_are_rejected() {
    let (handler, dispatcher) = dispatcher();
    let cred = rpc::opaque_auth { flavor: rpc::auth_flavor::AUTH_UNIX, body: vec![0, 0, 0, 1, 9] };
    let header = call_header(18, rpc::RPC_VERSION, nfs3::PROGRAM, nfs3::VERSION, 4, cred);

    let reply = dispatcher.dispatch(&to_bytes(&header).expect("header"), &context()).await;
    assert_eq!(
        reply_header(&reply.expect("reply")).body,
        rpc::rpc_body::REPLY(rpc::reply_body::MSG_DENIED(rpc::rejected_reply::AUTH_ERROR(
            rpc::auth_stat::AUTH_BADCRED
        )))
    );
    assert_eq!(handler.calls(), 0);
}

#[tokio::test]
async fn unsupported_credential_flavor_is_rejected() {
    let (handler, dispatcher) = dispatcher();

    // NULL call with RPCSEC_GSS (6) credentials and an AUTH_NULL verifier
    let words: [u32; 10] = [20, 0, 2, nfs3::PROGRAM, nfs3::VERSION, 0, 6, 0, 0, 0];
    let payload: Vec<u8> = words.iter().flat_map(|word| word.to_be_bytes()).collect();

    let reply = dispatcher.dispatch(&payload, &context()).await.expect("reply");
    let header = reply_header(&reply);
    assert_eq!(header.xid, 20);
    assert_eq!(
        header.body,
        rpc::rpc_body::REPLY(rpc::reply_body::MSG_DENIED(rpc::rejected_reply::AUTH_ERROR(
            rpc::auth_stat::AUTH_REJECTEDCRED
        )))
    );

    let cred = rpc::opaque_auth { flavor: rpc::auth_flavor::AUTH_DES, body: vec![1, 2, 3, 4] };
    let header = call_header(21, rpc::RPC_VERSION, nfs3::PROGRAM, nfs3::VERSION, 1, cred);
    let reply = dispatcher.dispatch(&to_bytes(&header).expect("header"), &context()).await;
    assert_eq!(reply_header(&reply.expect("reply")).xid, 21);
    assert_eq!(handler.calls(), 0);
}

#[test]
fn unknown_flavors_survive_decoding() {
    let cred = rpc::opaque_auth { flavor: rpc::auth_flavor::Unknown(390003), body: vec![7; 5] };
    let header = call_header(22, rpc::RPC_VERSION, nfs3::PROGRAM, nfs3::VERSION, 0, cred);
    let bytes = to_bytes(&header).expect("header");
    assert_eq!(&bytes[24..28], &390003u32.to_be_bytes());
    assert_eq!(rpc::rpc_msg::decode_payload(&bytes).expect("decodable header"), header);
}

#[tokio::test]
async fn dispatch_framed_record() {
    let (_, dispatcher) = dispatcher();
    let record = frame(&nfs_payload(19, 0, &[]));

    let reply = dispatcher.dispatch_record(&record, &context()).await.expect("reply");
    assert_eq!(v3::NullReply::decode(&reply).expect("NULL reply").xid(), 19);

    let err = dispatcher
        .dispatch_record(&record[..record.len() - 1], &context())
        .await
        .expect_err("truncated record");
    assert!(matches!(err, Error::Framing(_)));
}
