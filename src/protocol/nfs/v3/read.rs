//! The READ procedure (procedure 6), RFC 1813 section 3.3.6.
//!
//! READ retrieves data from a regular file at any offset. On success the
//! server returns the file attributes after the read, the number of bytes
//! read, an EOF flag and the data itself.

use futures::future::BoxFuture;

use super::{NfsCall, NfsReply, Procedure};
use crate::error::HandlerResult;
use crate::handler::NfsHandler;
use crate::protocol::rpc::Context;
use crate::protocol::xdr::nfs3::{file, nfsstat3, NFSProgram};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Read;

impl Procedure for Read {
    const PROCEDURE: NFSProgram = NFSProgram::NFSPROC3_READ;
    const NAME: &'static str = "READ";
    const ALLOWED_ERRORS: &'static [nfsstat3] = &[
        nfsstat3::NFS3ERR_IO,
        nfsstat3::NFS3ERR_NXIO,
        nfsstat3::NFS3ERR_ACCES,
        nfsstat3::NFS3ERR_INVAL,
        nfsstat3::NFS3ERR_STALE,
        nfsstat3::NFS3ERR_BADHANDLE,
        nfsstat3::NFS3ERR_SERVERFAULT,
    ];

    type Args = file::READ3args;
    type Res = file::READ3res;

    fn invoke<'a, H: NfsHandler + ?Sized>(
        handler: &'a H,
        context: &'a Context,
        args: Self::Args,
    ) -> BoxFuture<'a, HandlerResult<Self::Res>> {
        handler.read(context, args)
    }
}

pub type ReadCall = NfsCall<Read>;
pub type ReadReply = NfsReply<Read>;
