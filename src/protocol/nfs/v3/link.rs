//! The LINK procedure (procedure 15), RFC 1813 section 3.3.15.
//!
//! LINK creates a hard link: a second directory entry for an existing file.
//! Hard links can be created only within a single file system; servers
//! return NFS3ERR_XDEV otherwise.

use futures::future::BoxFuture;

use super::{NfsCall, NfsReply, Procedure};
use crate::error::HandlerResult;
use crate::handler::NfsHandler;
use crate::protocol::rpc::Context;
use crate::protocol::xdr::nfs3::{file, nfsstat3, NFSProgram};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Link;

impl Procedure for Link {
    const PROCEDURE: NFSProgram = NFSProgram::NFSPROC3_LINK;
    const NAME: &'static str = "LINK";
    const ALLOWED_ERRORS: &'static [nfsstat3] = &[
        nfsstat3::NFS3ERR_IO,
        nfsstat3::NFS3ERR_ACCES,
        nfsstat3::NFS3ERR_EXIST,
        nfsstat3::NFS3ERR_XDEV,
        nfsstat3::NFS3ERR_NOTDIR,
        nfsstat3::NFS3ERR_INVAL,
        nfsstat3::NFS3ERR_NOSPC,
        nfsstat3::NFS3ERR_ROFS,
        nfsstat3::NFS3ERR_MLINK,
        nfsstat3::NFS3ERR_NAMETOOLONG,
        nfsstat3::NFS3ERR_DQUOT,
        nfsstat3::NFS3ERR_STALE,
        nfsstat3::NFS3ERR_BADHANDLE,
        nfsstat3::NFS3ERR_NOTSUPP,
        nfsstat3::NFS3ERR_SERVERFAULT,
    ];

    type Args = file::LINK3args;
    type Res = file::LINK3res;

    fn invoke<'a, H: NfsHandler + ?Sized>(
        handler: &'a H,
        context: &'a Context,
        args: Self::Args,
    ) -> BoxFuture<'a, HandlerResult<Self::Res>> {
        handler.link(context, args)
    }
}

pub type LinkCall = NfsCall<Link>;
pub type LinkReply = NfsReply<Link>;
