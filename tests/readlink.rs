use nfs_mamont_proto::fs_util::{FileStat, S_IFLNK};
use nfs_mamont_proto::protocol::nfs::v3::{Procedure, Readlink, ReadlinkCall, ReadlinkReply};
use nfs_mamont_proto::protocol::rpc::RpcMessage;
use nfs_mamont_proto::xdr::nfs3::{self, fattr3, file, ftype3, nfsstat3, post_op_attr, Nfs3Result};

fn link_attributes() -> FileStat {
    FileStat { mode: S_IFLNK | 0o777, size: 11, fileid: 7, ..Default::default() }
}

#[test]
fn call_round_trip() {
    let args = file::READLINK3args { symlink: nfs3::nfs_fh3::new(b"link".to_vec()) };
    let record = ReadlinkCall::new(0x1234, args.clone()).encode().expect("cannot encode");

    // mark, xid, CALL, rpcvers, prog, vers, proc
    assert_eq!(&record[4..8], &0x1234u32.to_be_bytes());
    assert_eq!(&record[8..12], &0u32.to_be_bytes());
    assert_eq!(&record[12..16], &2u32.to_be_bytes());
    assert_eq!(&record[16..20], &100003u32.to_be_bytes());
    assert_eq!(&record[20..24], &3u32.to_be_bytes());
    assert_eq!(&record[24..28], &5u32.to_be_bytes());

    let call = ReadlinkCall::decode(&record).expect("cannot decode");
    assert_eq!(call.xid, 0x1234);
    assert_eq!(call.args, args);
}

#[test]
fn ok_reply_round_trip() {
    let resok = file::READLINK3resok { data: "/tmp/target".into(), ..Default::default() }
        .with_attributes(&link_attributes());
    let reply = ReadlinkReply::new(77, Nfs3Result::Ok(resok)).expect("NFS3_OK is allowed");
    let record = reply.encode().expect("cannot encode");

    let decoded = ReadlinkReply::decode(&record).expect("cannot decode");
    assert_eq!(decoded.xid(), 77);
    assert_eq!(decoded.status(), nfsstat3::NFS3_OK);
    let Nfs3Result::Ok(resok) = decoded.into_result() else {
        panic!("expected a successful result");
    };
    let attr = resok.symlink_attributes.as_attributes().expect("attributes present");
    assert_eq!(attr.ftype, ftype3::NF3LNK);
    assert_eq!(attr.size, 11);
    assert_eq!(attr.fileid, 7);
    assert_eq!(resok.data.as_ref(), b"/tmp/target");
}

#[test]
fn error_reply_carries_no_data() {
    let result = Nfs3Result::Err((nfsstat3::NFS3ERR_STALE, file::READLINK3resfail::default()));
    let reply = ReadlinkReply::new(5, result.clone()).expect("STALE is allowed");
    let record = reply.encode().expect("cannot encode");

    // header is mark + xid + REPLY + MSG_ACCEPTED + verf(8) + SUCCESS
    let payload = &record[4 + 24..];
    assert_eq!(payload, &[0, 0, 0, 70, 0, 0, 0, 0]);

    let decoded = ReadlinkReply::decode(&record).expect("cannot decode");
    assert_eq!(decoded.result(), &result);
}

#[test]
fn error_reply_keeps_attributes() {
    let resfail = file::READLINK3resfail {
        symlink_attributes: post_op_attr::attributes(fattr3::create(&link_attributes())),
    };
    let result = Nfs3Result::Err((nfsstat3::NFS3ERR_INVAL, resfail));
    let record = ReadlinkReply::new(6, result.clone())
        .expect("INVAL is allowed")
        .encode()
        .expect("cannot encode");
    assert_eq!(record.len(), 4 + 24 + 4 + 4 + fattr3::XDR_SIZE);

    let decoded = ReadlinkReply::decode(&record).expect("cannot decode");
    assert_eq!(decoded.into_result(), result);
}

#[test]
fn disallowed_status_is_rejected() {
    let result = Nfs3Result::Err((nfsstat3::NFS3ERR_ROFS, file::READLINK3resfail::default()));
    let err = ReadlinkReply::new(8, result).expect_err("ROFS is not a READLINK status");
    assert!(matches!(
        err,
        nfs_mamont_proto::Error::DisallowedStatus {
            procedure: "READLINK",
            status: nfsstat3::NFS3ERR_ROFS
        }
    ));
    assert!(Readlink::ALLOWED_ERRORS.contains(&nfsstat3::NFS3ERR_NOTSUPP));
}
