//! The READLINK procedure (procedure 5), RFC 1813 section 3.3.5.
//!
//! READLINK reads the data associated with a symbolic link.
//!
//! The client specifies:
//! - The file handle for the symbolic link
//!
//! On successful return, the server provides:
//! - The attributes of the symbolic link, if available
//! - The path string contained in the symbolic link
//!
//! On the wire the reply is the status, then an optional `fattr3` behind a
//! boolean, then the path. The path is present only when the status is
//! `NFS3_OK`; attributes may accompany any status.
//!
//! If the file handle passed to this procedure does not refer to a symbolic link,
//! the server should return NFS3ERR_INVAL. The READLINK operation is only allowed on
//! objects of type NF3LNK.

use futures::future::BoxFuture;

use super::{NfsCall, NfsReply, Procedure};
use crate::error::HandlerResult;
use crate::handler::NfsHandler;
use crate::protocol::rpc::Context;
use crate::protocol::xdr::nfs3::{file, nfsstat3, NFSProgram};

/// READLINK reads the data associated with a symbolic link.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Readlink;

impl Procedure for Readlink {
    const PROCEDURE: NFSProgram = NFSProgram::NFSPROC3_READLINK;
    const NAME: &'static str = "READLINK";
    const ALLOWED_ERRORS: &'static [nfsstat3] = &[
        nfsstat3::NFS3ERR_IO,
        nfsstat3::NFS3ERR_INVAL,
        nfsstat3::NFS3ERR_ACCES,
        nfsstat3::NFS3ERR_STALE,
        nfsstat3::NFS3ERR_BADHANDLE,
        nfsstat3::NFS3ERR_NOTSUPP,
        nfsstat3::NFS3ERR_SERVERFAULT,
    ];

    type Args = file::READLINK3args;
    type Res = file::READLINK3res;

    fn invoke<'a, H: NfsHandler + ?Sized>(
        handler: &'a H,
        context: &'a Context,
        args: Self::Args,
    ) -> BoxFuture<'a, HandlerResult<Self::Res>> {
        handler.readlink(context, args)
    }
}

pub type ReadlinkCall = NfsCall<Readlink>;
pub type ReadlinkReply = NfsReply<Readlink>;
