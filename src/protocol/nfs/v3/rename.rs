//! The `RENAME` procedure (procedure 14), RFC 1813 section 3.3.14.
//!
//! `RENAME` changes the name of a file system object, possibly moving it to
//! a different directory. If the target already exists it is replaced.
//!
//! Both outcomes carry the weak cache consistency data of the source and the
//! target directory.

use futures::future::BoxFuture;

use super::{NfsCall, NfsReply, Procedure};
use crate::error::HandlerResult;
use crate::handler::NfsHandler;
use crate::protocol::rpc::Context;
use crate::protocol::xdr::nfs3::{dir, nfsstat3, NFSProgram};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Rename;

impl Procedure for Rename {
    const PROCEDURE: NFSProgram = NFSProgram::NFSPROC3_RENAME;
    const NAME: &'static str = "RENAME";
    const ALLOWED_ERRORS: &'static [nfsstat3] = &[
        nfsstat3::NFS3ERR_NOENT,
        nfsstat3::NFS3ERR_IO,
        nfsstat3::NFS3ERR_ACCES,
        nfsstat3::NFS3ERR_EXIST,
        nfsstat3::NFS3ERR_XDEV,
        nfsstat3::NFS3ERR_NOTDIR,
        nfsstat3::NFS3ERR_ISDIR,
        nfsstat3::NFS3ERR_INVAL,
        nfsstat3::NFS3ERR_NOSPC,
        nfsstat3::NFS3ERR_ROFS,
        nfsstat3::NFS3ERR_MLINK,
        nfsstat3::NFS3ERR_NAMETOOLONG,
        nfsstat3::NFS3ERR_NOTEMPTY,
        nfsstat3::NFS3ERR_DQUOT,
        nfsstat3::NFS3ERR_STALE,
        nfsstat3::NFS3ERR_BADHANDLE,
        nfsstat3::NFS3ERR_NOTSUPP,
        nfsstat3::NFS3ERR_SERVERFAULT,
    ];

    type Args = dir::RENAME3args;
    type Res = dir::RENAME3res;

    fn invoke<'a, H: NfsHandler + ?Sized>(
        handler: &'a H,
        context: &'a Context,
        args: Self::Args,
    ) -> BoxFuture<'a, HandlerResult<Self::Res>> {
        handler.rename(context, args)
    }
}

pub type RenameCall = NfsCall<Rename>;
pub type RenameReply = NfsReply<Rename>;
