//! The `READDIR` procedure (procedure 16), RFC 1813 section 3.3.16.
//!
//! The client specifies:
//! - The file handle of the directory to read
//! - A cookie indicating where to start reading in the directory
//! - A cookie verifier to validate the cookie
//! - The maximum size of directory information to return
//!
//! On successful return, the server provides:
//! - The directory attributes
//! - A list of directory entries, each containing:
//!   * The file identifier (fileid)
//!   * The filename
//!   * A cookie for retrieving the next batch of entries
//! - A flag indicating whether the end of the directory was reached

use futures::future::BoxFuture;

use super::{NfsCall, NfsReply, Procedure};
use crate::error::HandlerResult;
use crate::handler::NfsHandler;
use crate::protocol::rpc::Context;
use crate::protocol::xdr::nfs3::{dir, nfsstat3, NFSProgram};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Readdir;

impl Procedure for Readdir {
    const PROCEDURE: NFSProgram = NFSProgram::NFSPROC3_READDIR;
    const NAME: &'static str = "READDIR";
    const ALLOWED_ERRORS: &'static [nfsstat3] = &[
        nfsstat3::NFS3ERR_IO,
        nfsstat3::NFS3ERR_ACCES,
        nfsstat3::NFS3ERR_NOTDIR,
        nfsstat3::NFS3ERR_BAD_COOKIE,
        nfsstat3::NFS3ERR_TOOSMALL,
        nfsstat3::NFS3ERR_STALE,
        nfsstat3::NFS3ERR_BADHANDLE,
        nfsstat3::NFS3ERR_SERVERFAULT,
    ];

    type Args = dir::READDIR3args;
    type Res = dir::READDIR3res;

    fn invoke<'a, H: NfsHandler + ?Sized>(
        handler: &'a H,
        context: &'a Context,
        args: Self::Args,
    ) -> BoxFuture<'a, HandlerResult<Self::Res>> {
        handler.readdir(context, args)
    }
}

pub type ReaddirCall = NfsCall<Readdir>;
pub type ReaddirReply = NfsReply<Readdir>;
