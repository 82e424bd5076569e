//! The SETATTR procedure (procedure 2), RFC 1813 section 3.3.2.
//!
//! SETATTR changes mode, ownership, size and times of a file system object.
//! An optional guard carries the ctime the client expects; if the object's
//! ctime differs the server must answer `NFS3ERR_NOT_SYNC` without changing
//! anything.
//!
//! Success and failure both carry the object's weak cache consistency data.

use futures::future::BoxFuture;

use super::{NfsCall, NfsReply, Procedure};
use crate::error::HandlerResult;
use crate::handler::NfsHandler;
use crate::protocol::rpc::Context;
use crate::protocol::xdr::nfs3::{self, nfsstat3, NFSProgram};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Setattr;

impl Procedure for Setattr {
    const PROCEDURE: NFSProgram = NFSProgram::NFSPROC3_SETATTR;
    const NAME: &'static str = "SETATTR";
    const ALLOWED_ERRORS: &'static [nfsstat3] = &[
        nfsstat3::NFS3ERR_PERM,
        nfsstat3::NFS3ERR_IO,
        nfsstat3::NFS3ERR_ACCES,
        nfsstat3::NFS3ERR_INVAL,
        nfsstat3::NFS3ERR_NOSPC,
        nfsstat3::NFS3ERR_ROFS,
        nfsstat3::NFS3ERR_DQUOT,
        nfsstat3::NFS3ERR_NOT_SYNC,
        nfsstat3::NFS3ERR_STALE,
        nfsstat3::NFS3ERR_BADHANDLE,
        nfsstat3::NFS3ERR_SERVERFAULT,
    ];

    type Args = nfs3::SETATTR3args;
    type Res = nfs3::SETATTR3res;

    fn invoke<'a, H: NfsHandler + ?Sized>(
        handler: &'a H,
        context: &'a Context,
        args: Self::Args,
    ) -> BoxFuture<'a, HandlerResult<Self::Res>> {
        handler.setattr(context, args)
    }
}

pub type SetattrCall = NfsCall<Setattr>;
pub type SetattrReply = NfsReply<Setattr>;
