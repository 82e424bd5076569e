use std::time::{Duration, SystemTime};

use nfs_mamont_proto::fs_util::{FileStat, S_IFDIR, S_IFREG};
use nfs_mamont_proto::protocol::nfs::v3::{self, NfsReply, Procedure};
use nfs_mamont_proto::protocol::rpc::wire::RECORD_MARK_SIZE;
use nfs_mamont_proto::protocol::rpc::RpcMessage;
use nfs_mamont_proto::xdr::nfs3::{
    self, dir, fattr3, file, fs, nfsstat3, post_op_attr, post_op_fh3, wcc_data, Nfs3Result,
};
use nfs_mamont_proto::xdr::{Serialize, Void};
use nfs_mamont_proto::Error;

const XID: u32 = 0x5151;

fn stat(mode: u32, fileid: u64) -> FileStat {
    let time = SystemTime::UNIX_EPOCH + Duration::new(1_700_000_000, 250);
    FileStat {
        mode,
        nlink: 2,
        uid: 1000,
        gid: 100,
        size: 4096,
        used: 8192,
        rdev: (0, 0),
        fsid: 3,
        fileid,
        atime: time,
        mtime: time,
        ctime: time,
    }
}

fn file_attributes() -> post_op_attr {
    post_op_attr::attributes(fattr3::create(&stat(S_IFREG | 0o640, 11)))
}

fn dir_attributes() -> post_op_attr {
    post_op_attr::attributes(fattr3::create(&stat(S_IFDIR | 0o755, 2)))
}

/// Both `pre_op_attr` and `post_op_attr` present.
fn full_wcc() -> wcc_data {
    let before = stat(S_IFDIR | 0o755, 2);
    let after = FileStat { size: 8192, ..before.clone() };
    wcc_data::new(Some(&before), Some(&after))
}

fn fh(data: &[u8]) -> nfs3::nfs_fh3 {
    nfs3::nfs_fh3::new(data.to_vec())
}

/// Builds, encodes and decodes a reply, comparing the whole result.
fn reply_round_trip<P: Procedure>(result: P::Res) {
    let reply = NfsReply::<P>::new(XID, result.clone()).expect("status is allowed");
    let record = reply.encode().expect("cannot encode reply");
    assert_eq!(
        record.len(),
        RECORD_MARK_SIZE + reply.header().packed_size() + reply.payload_size(),
        "{}",
        P::NAME
    );

    let decoded = NfsReply::<P>::decode(&record).expect("cannot decode reply");
    assert_eq!(decoded.xid(), XID);
    assert_eq!(decoded.into_result(), result, "{}", P::NAME);
}

fn created(handle: &[u8]) -> dir::CREATE3resok {
    dir::CREATE3resok {
        obj: post_op_fh3::handle(fh(handle)),
        obj_attributes: file_attributes(),
        dir_wcc: full_wcc(),
    }
}

fn created_failure() -> dir::CREATE3resfail {
    dir::CREATE3resfail { dir_wcc: full_wcc() }
}

#[test]
fn attribute_replies() {
    reply_round_trip::<v3::Null>(Void);

    let getattr = nfs3::GETATTR3resok { obj_attributes: fattr3::create(&stat(S_IFREG, 11)) };
    reply_round_trip::<v3::Getattr>(Nfs3Result::Ok(getattr));
    reply_round_trip::<v3::Getattr>(Nfs3Result::Err((nfsstat3::NFS3ERR_STALE, Void)));

    reply_round_trip::<v3::Setattr>(Nfs3Result::Ok(nfs3::SETATTR3resok { obj_wcc: full_wcc() }));
    reply_round_trip::<v3::Setattr>(Nfs3Result::Err((
        nfsstat3::NFS3ERR_NOT_SYNC,
        nfs3::SETATTR3resfail { obj_wcc: full_wcc() },
    )));

    reply_round_trip::<v3::Access>(Nfs3Result::Ok(nfs3::ACCESS3resok {
        obj_attributes: file_attributes(),
        access: nfs3::ACCESS3_READ | nfs3::ACCESS3_LOOKUP,
    }));
    reply_round_trip::<v3::Access>(Nfs3Result::Err((
        nfsstat3::NFS3ERR_STALE,
        nfs3::ACCESS3resfail { obj_attributes: file_attributes() },
    )));
}

#[test]
fn file_replies() {
    reply_round_trip::<v3::Lookup>(Nfs3Result::Ok(dir::LOOKUP3resok {
        object: fh(b"found"),
        obj_attributes: file_attributes(),
        dir_attributes: dir_attributes(),
    }));
    reply_round_trip::<v3::Lookup>(Nfs3Result::Err((
        nfsstat3::NFS3ERR_NOENT,
        dir::LOOKUP3resfail { dir_attributes: dir_attributes() },
    )));

    reply_round_trip::<v3::Read>(Nfs3Result::Ok(file::READ3resok {
        file_attributes: file_attributes(),
        count: 5,
        eof: true,
        data: b"hello".to_vec(),
    }));
    reply_round_trip::<v3::Read>(Nfs3Result::Err((
        nfsstat3::NFS3ERR_IO,
        file::READ3resfail { file_attributes: file_attributes() },
    )));

    reply_round_trip::<v3::Write>(Nfs3Result::Ok(file::WRITE3resok {
        file_wcc: full_wcc(),
        count: 3,
        committed: file::stable_how::UNSTABLE,
        verf: [7; 8],
    }));
    reply_round_trip::<v3::Write>(Nfs3Result::Err((
        nfsstat3::NFS3ERR_NOSPC,
        file::WRITE3resfail { file_wcc: full_wcc() },
    )));

    reply_round_trip::<v3::Link>(Nfs3Result::Ok(file::LINK3resok {
        file_attributes: file_attributes(),
        linkdir_wcc: full_wcc(),
    }));
    reply_round_trip::<v3::Link>(Nfs3Result::Err((
        nfsstat3::NFS3ERR_XDEV,
        file::LINK3resfail { file_attributes: file_attributes(), linkdir_wcc: full_wcc() },
    )));

    reply_round_trip::<v3::Commit>(Nfs3Result::Ok(file::COMMIT3resok {
        file_wcc: full_wcc(),
        verf: [9; 8],
    }));
    reply_round_trip::<v3::Commit>(Nfs3Result::Err((
        nfsstat3::NFS3ERR_IO,
        file::COMMIT3resfail { file_wcc: full_wcc() },
    )));
}

#[test]
fn entry_creation_replies() {
    reply_round_trip::<v3::Create>(Nfs3Result::Ok(created(b"new")));
    // the server may omit the handle and attributes of the new object
    reply_round_trip::<v3::Create>(Nfs3Result::Ok(dir::CREATE3resok {
        obj: post_op_fh3::Void,
        obj_attributes: post_op_attr::Void,
        dir_wcc: full_wcc(),
    }));
    reply_round_trip::<v3::Create>(Nfs3Result::Err((nfsstat3::NFS3ERR_EXIST, created_failure())));

    reply_round_trip::<v3::Mkdir>(Nfs3Result::Ok(created(b"sub")));
    reply_round_trip::<v3::Mkdir>(Nfs3Result::Err((nfsstat3::NFS3ERR_EXIST, created_failure())));

    reply_round_trip::<v3::Symlink>(Nfs3Result::Ok(created(b"ln")));
    reply_round_trip::<v3::Symlink>(Nfs3Result::Err((nfsstat3::NFS3ERR_ROFS, created_failure())));

    reply_round_trip::<v3::Mknod>(Nfs3Result::Ok(created(b"tty")));
    reply_round_trip::<v3::Mknod>(Nfs3Result::Err((nfsstat3::NFS3ERR_BADTYPE, created_failure())));
}

#[test]
fn entry_removal_replies() {
    reply_round_trip::<v3::Remove>(Nfs3Result::Ok(dir::REMOVE3resok { dir_wcc: full_wcc() }));
    reply_round_trip::<v3::Remove>(Nfs3Result::Err((
        nfsstat3::NFS3ERR_NOENT,
        dir::REMOVE3resok { dir_wcc: full_wcc() },
    )));

    reply_round_trip::<v3::Rmdir>(Nfs3Result::Ok(dir::REMOVE3resok { dir_wcc: full_wcc() }));
    reply_round_trip::<v3::Rmdir>(Nfs3Result::Err((
        nfsstat3::NFS3ERR_NOTEMPTY,
        dir::REMOVE3resok { dir_wcc: full_wcc() },
    )));

    let renamed = dir::RENAME3resok { fromdir_wcc: full_wcc(), todir_wcc: full_wcc() };
    reply_round_trip::<v3::Rename>(Nfs3Result::Ok(renamed.clone()));
    reply_round_trip::<v3::Rename>(Nfs3Result::Err((nfsstat3::NFS3ERR_XDEV, renamed)));
}

#[test]
fn directory_listing_replies() {
    reply_round_trip::<v3::Readdir>(Nfs3Result::Ok(dir::READDIR3resok {
        dir_attributes: dir_attributes(),
        cookieverf: [4; 8],
        reply: dir::dirlist3 {
            entries: vec![
                dir::entry3 { fileid: 2, name: ".".into(), cookie: 1 },
                dir::entry3 { fileid: 11, name: "data.bin".into(), cookie: 2 },
            ],
            eof: false,
        },
    }));
    reply_round_trip::<v3::Readdir>(Nfs3Result::Ok(dir::READDIR3resok {
        dir_attributes: post_op_attr::Void,
        cookieverf: [0; 8],
        reply: dir::dirlist3 { entries: Vec::new(), eof: true },
    }));
    reply_round_trip::<v3::Readdir>(Nfs3Result::Err((
        nfsstat3::NFS3ERR_BAD_COOKIE,
        dir::READDIR3resfail { dir_attributes: dir_attributes() },
    )));

    reply_round_trip::<v3::Readdirplus>(Nfs3Result::Ok(dir::READDIRPLUS3resok {
        dir_attributes: dir_attributes(),
        cookieverf: [5; 8],
        reply: dir::dirlistplus3 {
            entries: vec![
                dir::entryplus3 {
                    fileid: 11,
                    name: "data.bin".into(),
                    cookie: 1,
                    name_attributes: file_attributes(),
                    name_handle: post_op_fh3::handle(fh(b"data.bin")),
                },
                dir::entryplus3 {
                    fileid: 12,
                    name: "gone".into(),
                    cookie: 2,
                    name_attributes: post_op_attr::Void,
                    name_handle: post_op_fh3::Void,
                },
            ],
            eof: true,
        },
    }));
    reply_round_trip::<v3::Readdirplus>(Nfs3Result::Err((
        nfsstat3::NFS3ERR_NOTSUPP,
        dir::READDIR3resfail { dir_attributes: dir_attributes() },
    )));
}

#[test]
fn file_system_replies() {
    reply_round_trip::<v3::Fsstat>(Nfs3Result::Ok(fs::FSSTAT3resok {
        obj_attributes: dir_attributes(),
        tbytes: 1 << 40,
        fbytes: 1 << 39,
        abytes: 1 << 38,
        tfiles: 1_000_000,
        ffiles: 500_000,
        afiles: 400_000,
        invarsec: 0,
    }));
    reply_round_trip::<v3::Fsstat>(Nfs3Result::Err((
        nfsstat3::NFS3ERR_IO,
        fs::FSSTAT3resfail { obj_attributes: dir_attributes() },
    )));

    reply_round_trip::<v3::Fsinfo>(Nfs3Result::Ok(fs::FSINFO3resok {
        obj_attributes: dir_attributes(),
        rtmax: 1 << 20,
        rtpref: 1 << 17,
        rtmult: 4096,
        wtmax: 1 << 20,
        wtpref: 1 << 17,
        wtmult: 4096,
        dtpref: 8192,
        maxfilesize: u64::MAX,
        time_delta: nfs3::nfstime3 { seconds: 0, nseconds: 1 },
        properties: 0x1b,
    }));
    reply_round_trip::<v3::Fsinfo>(Nfs3Result::Err((
        nfsstat3::NFS3ERR_STALE,
        fs::FSSTAT3resfail { obj_attributes: dir_attributes() },
    )));

    reply_round_trip::<v3::Pathconf>(Nfs3Result::Ok(fs::PATHCONF3resok {
        obj_attributes: file_attributes(),
        linkmax: 32000,
        name_max: 255,
        no_trunc: true,
        chown_restricted: true,
        case_insensitive: false,
        case_preserving: true,
    }));
    reply_round_trip::<v3::Pathconf>(Nfs3Result::Err((
        nfsstat3::NFS3ERR_BADHANDLE,
        fs::FSSTAT3resfail { obj_attributes: post_op_attr::Void },
    )));
}

#[test]
fn failure_body_with_ok_status_is_rejected() {
    let result = Nfs3Result::Err((nfsstat3::NFS3_OK, file::READLINK3resfail::default()));
    let err = v3::ReadlinkReply::new(1, result).expect_err("failure body needs an error status");
    assert!(matches!(
        err,
        Error::DisallowedStatus { procedure: "READLINK", status: nfsstat3::NFS3_OK }
    ));

    let result = Nfs3Result::Err((nfsstat3::NFS3_OK, created_failure()));
    assert!(v3::CreateReply::new(2, result).is_err());
}
