//! The `RMDIR` procedure (procedure 13), RFC 1813 section 3.3.13.

use futures::future::BoxFuture;

use super::{NfsCall, NfsReply, Procedure};
use crate::error::HandlerResult;
use crate::handler::NfsHandler;
use crate::protocol::rpc::Context;
use crate::protocol::xdr::nfs3::{dir, nfsstat3, NFSProgram};

/// RMDIR removes an empty subdirectory.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Rmdir;

impl Procedure for Rmdir {
    const PROCEDURE: NFSProgram = NFSProgram::NFSPROC3_RMDIR;
    const NAME: &'static str = "RMDIR";
    const ALLOWED_ERRORS: &'static [nfsstat3] = &[
        nfsstat3::NFS3ERR_NOENT,
        nfsstat3::NFS3ERR_IO,
        nfsstat3::NFS3ERR_ACCES,
        nfsstat3::NFS3ERR_INVAL,
        nfsstat3::NFS3ERR_EXIST,
        nfsstat3::NFS3ERR_NOTDIR,
        nfsstat3::NFS3ERR_NAMETOOLONG,
        nfsstat3::NFS3ERR_ROFS,
        nfsstat3::NFS3ERR_NOTEMPTY,
        nfsstat3::NFS3ERR_STALE,
        nfsstat3::NFS3ERR_BADHANDLE,
        nfsstat3::NFS3ERR_NOTSUPP,
        nfsstat3::NFS3ERR_SERVERFAULT,
    ];

    type Args = dir::RMDIR3args;
    type Res = dir::RMDIR3res;

    fn invoke<'a, H: NfsHandler + ?Sized>(
        handler: &'a H,
        context: &'a Context,
        args: Self::Args,
    ) -> BoxFuture<'a, HandlerResult<Self::Res>> {
        handler.rmdir(context, args)
    }
}

pub type RmdirCall = NfsCall<Rmdir>;
pub type RmdirReply = NfsReply<Rmdir>;
