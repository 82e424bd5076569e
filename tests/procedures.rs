use std::fmt::Debug;

use nfs_mamont_proto::protocol::nfs::v3::{
    self, procedure_info, NfsCall, NfsReply, Procedure, PROCEDURES,
};
use nfs_mamont_proto::protocol::rpc::wire::{parse_record_mark, RECORD_MARK_SIZE};
use nfs_mamont_proto::protocol::rpc::RpcMessage;
use nfs_mamont_proto::xdr::nfs3::{self, dir, file, fs, nfsstat3, ReplyStatus};
use nfs_mamont_proto::xdr::Serialize;
use nfs_mamont_proto::Error;

fn fh(data: &[u8]) -> nfs3::nfs_fh3 {
    nfs3::nfs_fh3::new(data.to_vec())
}

fn dirop(name: &str) -> nfs3::diropargs3 {
    nfs3::diropargs3 { dir: fh(b"dir"), name: name.into() }
}

/// Encodes a call, checks the record length bookkeeping and decodes it back.
fn call_round_trip<P: Procedure + PartialEq + Debug>(args: P::Args) {
    let call = NfsCall::<P>::new(0xabcd, args);
    let record = call.encode().expect("cannot encode call");

    let mark = u32::from_be_bytes(record[..RECORD_MARK_SIZE].try_into().expect("mark"));
    let (length, is_last) = parse_record_mark(mark);
    assert!(is_last);
    assert_eq!(length, record.len() - RECORD_MARK_SIZE);
    assert_eq!(length, call.header().packed_size() + call.payload_size());

    let decoded = NfsCall::<P>::decode(&record).expect("cannot decode call");
    assert_eq!(decoded, call, "{}", P::NAME);
}

/// Every listed error builds, encodes and decodes; JUKEBOX never does.
fn check_allowed_errors<P: Procedure + Debug>() {
    for status in P::ALLOWED_ERRORS {
        let reply = NfsReply::<P>::new(1, P::Res::failure(*status)).expect("status is allowed");
        let record = reply.encode().expect("cannot encode reply");
        let decoded = NfsReply::<P>::decode(&record).expect("cannot decode reply");
        assert_eq!(decoded.status(), *status, "{}", P::NAME);
    }

    if P::NAME == "NULL" {
        return;
    }
    let err = NfsReply::<P>::new(1, P::Res::failure(nfsstat3::NFS3ERR_JUKEBOX))
        .expect_err("JUKEBOX is never allowed");
    match err {
        Error::DisallowedStatus { procedure, status } => {
            assert_eq!(procedure, P::NAME);
            assert_eq!(status, nfsstat3::NFS3ERR_JUKEBOX);
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn procedure_table() {
    let names: Vec<_> = PROCEDURES.iter().map(|info| info.name).collect();
    assert_eq!(
        names,
        [
            "NULL",
            "GETATTR",
            "SETATTR",
            "LOOKUP",
            "ACCESS",
            "READLINK",
            "READ",
            "WRITE",
            "CREATE",
            "MKDIR",
            "SYMLINK",
            "MKNOD",
            "REMOVE",
            "RMDIR",
            "RENAME",
            "LINK",
            "READDIR",
            "READDIRPLUS",
            "FSSTAT",
            "FSINFO",
            "PATHCONF",
            "COMMIT",
        ]
    );
    for (number, info) in PROCEDURES.iter().enumerate() {
        assert_eq!(info.procedure as usize, number);
        assert!(!info.allowed_errors.contains(&nfsstat3::NFS3ERR_JUKEBOX));
        assert!(!info.allowed_errors.contains(&nfsstat3::NFS3_OK));
        assert!(info.is_allowed(nfsstat3::NFS3_OK));
        if number != 0 {
            assert!(info.is_allowed(nfsstat3::NFS3ERR_SERVERFAULT), "{}", info.name);
        }
    }
    assert_eq!(procedure_info(5).map(|info| info.name), Some("READLINK"));
    assert!(procedure_info(22).is_none());
}

#[test]
fn selected_allow_lists() {
    let info = |number| procedure_info(number).expect("known procedure");

    assert!(info(1).is_allowed(nfsstat3::NFS3ERR_STALE));
    assert!(!info(1).is_allowed(nfsstat3::NFS3ERR_NOENT));
    assert!(info(2).is_allowed(nfsstat3::NFS3ERR_NOT_SYNC));
    assert!(!info(3).is_allowed(nfsstat3::NFS3ERR_ROFS));
    assert!(info(11).is_allowed(nfsstat3::NFS3ERR_BADTYPE));
    assert!(!info(8).is_allowed(nfsstat3::NFS3ERR_BADTYPE));
    assert!(info(13).is_allowed(nfsstat3::NFS3ERR_NOTEMPTY));
    assert!(info(15).is_allowed(nfsstat3::NFS3ERR_XDEV));
    assert!(info(16).is_allowed(nfsstat3::NFS3ERR_BAD_COOKIE));
    assert!(info(17).is_allowed(nfsstat3::NFS3ERR_TOOSMALL));
}

#[test]
fn call_round_trips() {
    let sattr = nfs3::sattr3 { mode: nfs3::set_mode3::mode(0o640), ..Default::default() };

    call_round_trip::<v3::Null>(Default::default());
    call_round_trip::<v3::Getattr>(nfs3::GETATTR3args { object: fh(b"file") });
    call_round_trip::<v3::Setattr>(nfs3::SETATTR3args {
        object: fh(b"file"),
        new_attribute: sattr,
        guard: nfs3::sattrguard3::obj_ctime(nfs3::nfstime3 { seconds: 1, nseconds: 2 }),
    });
    call_round_trip::<v3::Lookup>(dir::LOOKUP3args { what: dirop("a.txt") });
    call_round_trip::<v3::Access>(nfs3::ACCESS3args {
        object: fh(b"file"),
        access: nfs3::ACCESS3_READ | nfs3::ACCESS3_MODIFY,
    });
    call_round_trip::<v3::Readlink>(file::READLINK3args { symlink: fh(b"link") });
    call_round_trip::<v3::Read>(file::READ3args { file: fh(b"file"), offset: 4096, count: 512 });
    call_round_trip::<v3::Write>(file::WRITE3args {
        file: fh(b"file"),
        offset: 10,
        count: 5,
        stable: file::stable_how::DATA_SYNC,
        data: b"hello".to_vec(),
    });
    call_round_trip::<v3::Create>(dir::CREATE3args {
        dirops: dirop("new"),
        how: dir::createhow3::EXCLUSIVE([1, 2, 3, 4, 5, 6, 7, 8]),
    });
    call_round_trip::<v3::Mkdir>(dir::MKDIR3args { dirops: dirop("sub"), attributes: sattr });
    call_round_trip::<v3::Symlink>(dir::SYMLINK3args {
        dirops: dirop("ln"),
        symlink: nfs3::symlinkdata3 { symlink_attributes: sattr, symlink_data: "../x".into() },
    });
    call_round_trip::<v3::Mknod>(dir::MKNOD3args {
        where_dir: dirop("tty"),
        what: dir::mknoddata3::NF3CHR(dir::devicedata3 {
            dev_attributes: sattr,
            spec: nfs3::specdata3 { specdata1: 4, specdata2: 1 },
        }),
    });
    call_round_trip::<v3::Remove>(dir::REMOVE3args { object: dirop("old") });
    call_round_trip::<v3::Rmdir>(dir::RMDIR3args { object: dirop("sub") });
    call_round_trip::<v3::Rename>(dir::RENAME3args { from: dirop("a"), to: dirop("b") });
    call_round_trip::<v3::Link>(file::LINK3args { file: fh(b"file"), link: dirop("hard") });
    call_round_trip::<v3::Readdir>(dir::READDIR3args {
        dir: fh(b"dir"),
        cookie: 3,
        cookieverf: [9; 8],
        count: 4096,
    });
    call_round_trip::<v3::Readdirplus>(dir::READDIRPLUS3args {
        dir: fh(b"dir"),
        cookie: 0,
        cookieverf: [0; 8],
        dircount: 1024,
        maxcount: 8192,
    });
    call_round_trip::<v3::Fsstat>(fs::FSSTAT3args { fsroot: fh(b"root") });
    call_round_trip::<v3::Fsinfo>(fs::FSINFO3args { fsroot: fh(b"root") });
    call_round_trip::<v3::Pathconf>(fs::PATHCONF3args { object: fh(b"file") });
    call_round_trip::<v3::Commit>(file::COMMIT3args { file: fh(b"file"), offset: 0, count: 0 });
}

#[test]
fn call_union_arms() {
    let client_time = nfs3::nfstime3 { seconds: 1_700_000_000, nseconds: 5 };
    let sattr = nfs3::sattr3 {
        mode: nfs3::set_mode3::mode(0o600),
        uid: nfs3::set_uid3::uid(1000),
        gid: nfs3::set_gid3::gid(100),
        size: nfs3::set_size3::size(0),
        atime: nfs3::set_time3::SET_TO_SERVER_TIME,
        mtime: nfs3::set_time3::SET_TO_CLIENT_TIME(client_time),
    };

    for how in [
        dir::createhow3::UNCHECKED(sattr),
        dir::createhow3::GUARDED(nfs3::sattr3::default()),
        dir::createhow3::EXCLUSIVE([0; 8]),
    ] {
        call_round_trip::<v3::Create>(dir::CREATE3args { dirops: dirop("new"), how });
    }

    let device = dir::devicedata3 {
        dev_attributes: sattr,
        spec: nfs3::specdata3 { specdata1: 8, specdata2: 1 },
    };
    for what in [
        dir::mknoddata3::NF3CHR(device),
        dir::mknoddata3::NF3BLK(device),
        dir::mknoddata3::NF3SOCK(sattr),
        dir::mknoddata3::NF3FIFO(nfs3::sattr3::default()),
        dir::mknoddata3::NF3REG,
        dir::mknoddata3::NF3DIR,
        dir::mknoddata3::NF3LNK,
    ] {
        call_round_trip::<v3::Mknod>(dir::MKNOD3args { where_dir: dirop("node"), what });
    }

    call_round_trip::<v3::Setattr>(nfs3::SETATTR3args {
        object: fh(b"file"),
        new_attribute: sattr,
        guard: nfs3::sattrguard3::Void,
    });
}

#[test]
fn allowed_errors_of_every_procedure() {
    check_allowed_errors::<v3::Null>();
    check_allowed_errors::<v3::Getattr>();
    check_allowed_errors::<v3::Setattr>();
    check_allowed_errors::<v3::Lookup>();
    check_allowed_errors::<v3::Access>();
    check_allowed_errors::<v3::Readlink>();
    check_allowed_errors::<v3::Read>();
    check_allowed_errors::<v3::Write>();
    check_allowed_errors::<v3::Create>();
    check_allowed_errors::<v3::Mkdir>();
    check_allowed_errors::<v3::Symlink>();
    check_allowed_errors::<v3::Mknod>();
    check_allowed_errors::<v3::Remove>();
    check_allowed_errors::<v3::Rmdir>();
    check_allowed_errors::<v3::Rename>();
    check_allowed_errors::<v3::Link>();
    check_allowed_errors::<v3::Readdir>();
    check_allowed_errors::<v3::Readdirplus>();
    check_allowed_errors::<v3::Fsstat>();
    check_allowed_errors::<v3::Fsinfo>();
    check_allowed_errors::<v3::Pathconf>();
    check_allowed_errors::<v3::Commit>();
}

#[test]
fn call_of_another_procedure_is_rejected() {
    let record = v3::GetattrCall::new(1, nfs3::GETATTR3args { object: fh(b"file") })
        .encode()
        .expect("cannot encode call");
    let err = v3::AccessCall::decode(&record).expect_err("GETATTR is not ACCESS");
    assert!(matches!(err, Error::UnexpectedMessage(_)));
}

#[test]
fn oversized_handle_fails_to_encode() {
    let call = v3::GetattrCall::new(1, nfs3::GETATTR3args { object: fh(&[0u8; 65]) });
    let err = call.encode().expect_err("handle exceeds 64 bytes");
    assert!(matches!(err, Error::Encode(_)));
}

#[test]
fn readdir_reply_round_trip() {
    let resok = dir::READDIR3resok {
        cookieverf: [1; 8],
        reply: dir::dirlist3 {
            entries: vec![
                dir::entry3 { fileid: 2, name: ".".into(), cookie: 1 },
                dir::entry3 { fileid: 5, name: "notes.txt".into(), cookie: 2 },
            ],
            eof: true,
        },
        ..Default::default()
    };
    let reply = v3::ReaddirReply::new(3, nfs3::Nfs3Result::Ok(resok.clone())).expect("OK");
    let record = reply.encode().expect("cannot encode reply");
    assert_eq!(record.len() - RECORD_MARK_SIZE, 24 + reply.payload_size());

    let decoded = v3::ReaddirReply::decode(&record).expect("cannot decode reply");
    assert_eq!(decoded.into_result(), nfs3::Nfs3Result::Ok(resok));
}
