//! The FSSTAT procedure (procedure 18), RFC 1813 section 3.3.18.
//!
//! FSSTAT retrieves volatile file system state: total, free and available
//! bytes and file slots, and how long this information remains valid.

use futures::future::BoxFuture;

use super::{NfsCall, NfsReply, Procedure};
use crate::error::HandlerResult;
use crate::handler::NfsHandler;
use crate::protocol::rpc::Context;
use crate::protocol::xdr::nfs3::{fs, nfsstat3, NFSProgram};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Fsstat;

impl Procedure for Fsstat {
    const PROCEDURE: NFSProgram = NFSProgram::NFSPROC3_FSSTAT;
    const NAME: &'static str = "FSSTAT";
    const ALLOWED_ERRORS: &'static [nfsstat3] = &[
        nfsstat3::NFS3ERR_IO,
        nfsstat3::NFS3ERR_STALE,
        nfsstat3::NFS3ERR_BADHANDLE,
        nfsstat3::NFS3ERR_SERVERFAULT,
    ];

    type Args = fs::FSSTAT3args;
    type Res = fs::FSSTAT3res;

    fn invoke<'a, H: NfsHandler + ?Sized>(
        handler: &'a H,
        context: &'a Context,
        args: Self::Args,
    ) -> BoxFuture<'a, HandlerResult<Self::Res>> {
        handler.fsstat(context, args)
    }
}

pub type FsstatCall = NfsCall<Fsstat>;
pub type FsstatReply = NfsReply<Fsstat>;
