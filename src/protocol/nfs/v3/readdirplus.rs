//! The `READDIRPLUS` procedure (procedure 17), RFC 1813 section 3.3.17.
//!
//! `READDIRPLUS` is READDIR with a file handle and attributes for every
//! entry, sparing clients a LOOKUP per name. Servers that do not support it
//! answer `NFS3ERR_NOTSUPP` and clients fall back to READDIR.

use futures::future::BoxFuture;

use super::{NfsCall, NfsReply, Procedure};
use crate::error::HandlerResult;
use crate::handler::NfsHandler;
use crate::protocol::rpc::Context;
use crate::protocol::xdr::nfs3::{dir, nfsstat3, NFSProgram};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Readdirplus;

impl Procedure for Readdirplus {
    const PROCEDURE: NFSProgram = NFSProgram::NFSPROC3_READDIRPLUS;
    const NAME: &'static str = "READDIRPLUS";
    const ALLOWED_ERRORS: &'static [nfsstat3] = &[
        nfsstat3::NFS3ERR_IO,
        nfsstat3::NFS3ERR_ACCES,
        nfsstat3::NFS3ERR_NOTDIR,
        nfsstat3::NFS3ERR_BAD_COOKIE,
        nfsstat3::NFS3ERR_TOOSMALL,
        nfsstat3::NFS3ERR_NOTSUPP,
        nfsstat3::NFS3ERR_STALE,
        nfsstat3::NFS3ERR_BADHANDLE,
        nfsstat3::NFS3ERR_SERVERFAULT,
    ];

    type Args = dir::READDIRPLUS3args;
    type Res = dir::READDIRPLUS3res;

    fn invoke<'a, H: NfsHandler + ?Sized>(
        handler: &'a H,
        context: &'a Context,
        args: Self::Args,
    ) -> BoxFuture<'a, HandlerResult<Self::Res>> {
        handler.readdirplus(context, args)
    }
}

pub type ReaddirplusCall = NfsCall<Readdirplus>;
pub type ReaddirplusReply = NfsReply<Readdirplus>;
