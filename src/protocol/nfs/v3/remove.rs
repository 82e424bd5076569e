//! The REMOVE procedure (procedure 12), RFC 1813 section 3.3.12.
//!
//! REMOVE deletes a non-directory entry from a directory. Both outcomes carry
//! the weak cache consistency data of the directory.

use futures::future::BoxFuture;

use super::{NfsCall, NfsReply, Procedure};
use crate::error::HandlerResult;
use crate::handler::NfsHandler;
use crate::protocol::rpc::Context;
use crate::protocol::xdr::nfs3::{dir, nfsstat3, NFSProgram};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Remove;

impl Procedure for Remove {
    const PROCEDURE: NFSProgram = NFSProgram::NFSPROC3_REMOVE;
    const NAME: &'static str = "REMOVE";
    const ALLOWED_ERRORS: &'static [nfsstat3] = &[
        nfsstat3::NFS3ERR_NOENT,
        nfsstat3::NFS3ERR_IO,
        nfsstat3::NFS3ERR_ACCES,
        nfsstat3::NFS3ERR_NOTDIR,
        nfsstat3::NFS3ERR_NAMETOOLONG,
        nfsstat3::NFS3ERR_ROFS,
        nfsstat3::NFS3ERR_STALE,
        nfsstat3::NFS3ERR_BADHANDLE,
        nfsstat3::NFS3ERR_SERVERFAULT,
    ];

    type Args = dir::REMOVE3args;
    type Res = dir::REMOVE3res;

    fn invoke<'a, H: NfsHandler + ?Sized>(
        handler: &'a H,
        context: &'a Context,
        args: Self::Args,
    ) -> BoxFuture<'a, HandlerResult<Self::Res>> {
        handler.remove(context, args)
    }
}

pub type RemoveCall = NfsCall<Remove>;
pub type RemoveReply = NfsReply<Remove>;
