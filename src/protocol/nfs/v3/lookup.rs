//! The `LOOKUP` procedure (procedure 3), RFC 1813 section 3.3.3.
//!
//! `LOOKUP` translates a file name inside a directory into a file handle.
//! The client specifies:
//! - The file handle for the directory to search
//! - The filename to look up within that directory
//!
//! On successful return, the server provides:
//! - The file handle of the requested file
//! - The attributes of the requested file
//! - The attributes of the directory (for cache validation)
//!
//! A failed lookup still carries the directory attributes.

use futures::future::BoxFuture;

use super::{NfsCall, NfsReply, Procedure};
use crate::error::HandlerResult;
use crate::handler::NfsHandler;
use crate::protocol::rpc::Context;
use crate::protocol::xdr::nfs3::{dir, nfsstat3, NFSProgram};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Lookup;

impl Procedure for Lookup {
    const PROCEDURE: NFSProgram = NFSProgram::NFSPROC3_LOOKUP;
    const NAME: &'static str = "LOOKUP";
    const ALLOWED_ERRORS: &'static [nfsstat3] = &[
        nfsstat3::NFS3ERR_IO,
        nfsstat3::NFS3ERR_NOENT,
        nfsstat3::NFS3ERR_ACCES,
        nfsstat3::NFS3ERR_NOTDIR,
        nfsstat3::NFS3ERR_NAMETOOLONG,
        nfsstat3::NFS3ERR_STALE,
        nfsstat3::NFS3ERR_BADHANDLE,
        nfsstat3::NFS3ERR_SERVERFAULT,
    ];

    type Args = dir::LOOKUP3args;
    type Res = dir::LOOKUP3res;

    fn invoke<'a, H: NfsHandler + ?Sized>(
        handler: &'a H,
        context: &'a Context,
        args: Self::Args,
    ) -> BoxFuture<'a, HandlerResult<Self::Res>> {
        handler.lookup(context, args)
    }
}

pub type LookupCall = NfsCall<Lookup>;
pub type LookupReply = NfsReply<Lookup>;
