#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, UNIX_EPOCH};

use async_trait::async_trait;

use nfs_mamont_proto::fs_util::{FileStat, S_IFREG};
use nfs_mamont_proto::protocol::rpc::{wire, Context, RpcMessage};
use nfs_mamont_proto::xdr::nfs3::{self, dir, file, nfsstat3, Nfs3Result};
use nfs_mamont_proto::xdr::{rpc, to_bytes, Void};
use nfs_mamont_proto::{HandlerError, HandlerResult, NfsHandler};

pub const LINK_HANDLE: &[u8] = b"symlink";
pub const LINK_TARGET: &str = "/tmp/target";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Attributes served for [`LINK_HANDLE`].
pub fn link_stat() -> FileStat {
    FileStat {
        mode: S_IFREG | 0o644,
        size: 42,
        fileid: 7,
        mtime: UNIX_EPOCH + Duration::new(1_700_000_000, 5),
        ..Default::default()
    }
}

pub fn handle(data: &[u8]) -> nfs3::nfs_fh3 {
    nfs3::nfs_fh3::new(data)
}

/// Serves a handful of procedures and leaves the rest unimplemented.
#[derive(Default)]
pub struct DemoHandler {
    pub calls: AtomicUsize,
}

impl DemoHandler {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NfsHandler for DemoHandler {
    async fn getattr(
        &self,
        _context: &Context,
        args: nfs3::GETATTR3args,
    ) -> HandlerResult<nfs3::GETATTR3res> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if args.object.data != LINK_HANDLE {
            return Ok(Nfs3Result::Err((nfsstat3::NFS3ERR_STALE, Void)));
        }
        Ok(Nfs3Result::Ok(nfs3::GETATTR3resok::default().with_attributes(&link_stat())))
    }

    /// Grants exactly the caller's uid as access bits.
    async fn access(
        &self,
        context: &Context,
        _args: nfs3::ACCESS3args,
    ) -> HandlerResult<nfs3::ACCESS3res> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Nfs3Result::Ok(nfs3::ACCESS3resok { access: context.auth.uid, ..Default::default() }))
    }

    /// Answers with a status LOOKUP is not allowed to return.
    async fn lookup(
        &self,
        _context: &Context,
        _args: dir::LOOKUP3args,
    ) -> HandlerResult<dir::LOOKUP3res> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Nfs3Result::Err((nfsstat3::NFS3ERR_ROFS, dir::LOOKUP3resfail::default())))
    }

    async fn readlink(
        &self,
        _context: &Context,
        args: file::READLINK3args,
    ) -> HandlerResult<file::READLINK3res> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if args.symlink.data != LINK_HANDLE {
            return Ok(Nfs3Result::Err((nfsstat3::NFS3ERR_STALE, Default::default())));
        }
        let resok = file::READLINK3resok { data: LINK_TARGET.into(), ..Default::default() };
        Ok(Nfs3Result::Ok(resok.with_attributes(&link_stat())))
    }

    async fn read(
        &self,
        _context: &Context,
        _args: file::READ3args,
    ) -> HandlerResult<file::READ3res> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(HandlerError::Failed(anyhow::anyhow!("backend unavailable")))
    }

    /// Sleeps `offset` milliseconds, then reports the whole buffer written.
    async fn write(
        &self,
        _context: &Context,
        args: file::WRITE3args,
    ) -> HandlerResult<file::WRITE3res> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(args.offset)).await;
        Ok(Nfs3Result::Ok(file::WRITE3resok {
            count: args.data.len() as u32,
            committed: file::stable_how::FILE_SYNC,
            ..Default::default()
        }))
    }
}

/// Call header with arbitrary version, program and procedure numbers.
pub fn call_header(
    xid: u32,
    rpcvers: u32,
    prog: u32,
    vers: u32,
    proc: u32,
    cred: rpc::opaque_auth,
) -> rpc::rpc_msg {
    rpc::rpc_msg {
        xid,
        body: rpc::rpc_body::CALL(rpc::call_body {
            rpcvers,
            prog,
            vers,
            proc,
            cred,
            verf: rpc::opaque_auth::default(),
        }),
    }
}

/// Record payload, without record marking, of an NFS call with raw argument bytes.
pub fn nfs_payload(xid: u32, proc: u32, args: &[u8]) -> Vec<u8> {
    let header =
        call_header(xid, rpc::RPC_VERSION, nfs3::PROGRAM, nfs3::VERSION, proc, Default::default());
    let mut payload = to_bytes(&header).expect("cannot serialize header");
    payload.extend_from_slice(args);
    payload
}

/// Wraps `payload` into a single-fragment record.
pub fn frame(payload: &[u8]) -> Vec<u8> {
    let mut record = wire::record_mark(payload.len(), true).to_be_bytes().to_vec();
    record.extend_from_slice(payload);
    record
}

/// The RPC header of a reply record.
pub fn reply_header(record: &[u8]) -> rpc::rpc_msg {
    rpc::rpc_msg::decode(record).expect("cannot decode reply header")
}

/// The accept status of a reply record, panicking on denied replies.
pub fn accept_status(record: &[u8]) -> rpc::accept_body {
    match reply_header(record).body {
        rpc::rpc_body::REPLY(rpc::reply_body::MSG_ACCEPTED(reply)) => reply.reply_data,
        body => panic!("not an accepted reply: {body:?}"),
    }
}
