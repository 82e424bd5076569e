//! The CREATE procedure (procedure 8), RFC 1813 section 3.3.8.
//!
//! CREATE makes a regular file in a directory. The three creation methods are:
//! - UNCHECKED: Creates the file or updates attributes if it exists
//! - GUARDED: Creates the file only if it doesn't exist
//! - EXCLUSIVE: Creates the file only if it doesn't exist, using a unique verifier
//!
//! On successful return, the server provides the new file handle and
//! attributes when it has them, and the directory's weak cache consistency data.

use futures::future::BoxFuture;

use super::{NfsCall, NfsReply, Procedure};
use crate::error::HandlerResult;
use crate::handler::NfsHandler;
use crate::protocol::rpc::Context;
use crate::protocol::xdr::nfs3::{dir, nfsstat3, NFSProgram};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Create;

/// Errors of every procedure that creates a directory entry.
pub(super) const CREATE_ERRORS: &[nfsstat3] = &[
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
];

impl Procedure for Create {
    const PROCEDURE: NFSProgram = NFSProgram::NFSPROC3_CREATE;
    const NAME: &'static str = "CREATE";
    const ALLOWED_ERRORS: &'static [nfsstat3] = CREATE_ERRORS;

    type Args = dir::CREATE3args;
    type Res = dir::CREATE3res;

    fn invoke<'a, H: NfsHandler + ?Sized>(
        handler: &'a H,
        context: &'a Context,
        args: Self::Args,
    ) -> BoxFuture<'a, HandlerResult<Self::Res>> {
        handler.create(context, args)
    }
}

pub type CreateCall = NfsCall<Create>;
pub type CreateReply = NfsReply<Create>;
