//! The `MKNOD` procedure (procedure 11), RFC 1813 section 3.3.11.
//!
//! `MKNOD` creates a special file: a character or block device (with major and
//! minor number), a socket or a FIFO. A request for any other type is answered
//! with `NFS3ERR_BADTYPE`.

use futures::future::BoxFuture;

use super::{NfsCall, NfsReply, Procedure};
use crate::error::HandlerResult;
use crate::handler::NfsHandler;
use crate::protocol::rpc::Context;
use crate::protocol::xdr::nfs3::{dir, nfsstat3, NFSProgram};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Mknod;

/// MKNOD can also reject the requested file type.
const MKNOD_ERRORS: &[nfsstat3] = &[
    nfsstat3::NFS3ERR_IO,
    nfsstat3::NFS3ERR_ACCES,
    nfsstat3::NFS3ERR_EXIST,
    nfsstat3::NFS3ERR_NOTDIR,
    nfsstat3::NFS3ERR_NOSPC,
    nfsstat3::NFS3ERR_ROFS,
    nfsstat3::NFS3ERR_NAMETOOLONG,
    nfsstat3::NFS3ERR_DQUOT,
    nfsstat3::NFS3ERR_STALE,
    nfsstat3::NFS3ERR_BADHANDLE,
    nfsstat3::NFS3ERR_NOTSUPP,
    nfsstat3::NFS3ERR_SERVERFAULT,
    nfsstat3::NFS3ERR_BADTYPE,
];

impl Procedure for Mknod {
    const PROCEDURE: NFSProgram = NFSProgram::NFSPROC3_MKNOD;
    const NAME: &'static str = "MKNOD";
    const ALLOWED_ERRORS: &'static [nfsstat3] = MKNOD_ERRORS;

    type Args = dir::MKNOD3args;
    type Res = dir::MKNOD3res;

    fn invoke<'a, H: NfsHandler + ?Sized>(
        handler: &'a H,
        context: &'a Context,
        args: Self::Args,
    ) -> BoxFuture<'a, HandlerResult<Self::Res>> {
        handler.mknod(context, args)
    }
}

pub type MknodCall = NfsCall<Mknod>;
pub type MknodReply = NfsReply<Mknod>;
