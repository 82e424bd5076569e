//! The `GETATTR` procedure (procedure 1), RFC 1813 section 3.3.1.
//!
//! `GETATTR` takes a file handle and returns the complete file attribute
//! structure ([`fattr3`](crate::protocol::xdr::nfs3::fattr3)). Clients use it to
//! check whether cached attributes are still valid.

use futures::future::BoxFuture;

use super::{NfsCall, NfsReply, Procedure};
use crate::error::HandlerResult;
use crate::handler::NfsHandler;
use crate::protocol::rpc::Context;
use crate::protocol::xdr::nfs3::{self, nfsstat3, NFSProgram};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Getattr;

impl Procedure for Getattr {
    const PROCEDURE: NFSProgram = NFSProgram::NFSPROC3_GETATTR;
    const NAME: &'static str = "GETATTR";
    const ALLOWED_ERRORS: &'static [nfsstat3] = &[
        nfsstat3::NFS3ERR_IO,
        nfsstat3::NFS3ERR_STALE,
        nfsstat3::NFS3ERR_BADHANDLE,
        nfsstat3::NFS3ERR_SERVERFAULT,
    ];

    type Args = nfs3::GETATTR3args;
    type Res = nfs3::GETATTR3res;

    fn invoke<'a, H: NfsHandler + ?Sized>(
        handler: &'a H,
        context: &'a Context,
        args: Self::Args,
    ) -> BoxFuture<'a, HandlerResult<Self::Res>> {
        handler.getattr(context, args)
    }
}

pub type GetattrCall = NfsCall<Getattr>;
pub type GetattrReply = NfsReply<Getattr>;
