//! The `FSINFO` procedure (procedure 19), RFC 1813 section 3.3.19.
//!
//! `FSINFO` retrieves static information about the exported file system:
//! - Maximum and preferred read and write transfer sizes
//! - Preferred directory read size
//! - Server time precision (`time_delta`)
//! - The file system properties (whether it supports hard links, symbolic links, etc.)
//! - The maximum file size supported by the server

use futures::future::BoxFuture;

use super::{NfsCall, NfsReply, Procedure};
use crate::error::HandlerResult;
use crate::handler::NfsHandler;
use crate::protocol::rpc::Context;
use crate::protocol::xdr::nfs3::{fs, nfsstat3, NFSProgram};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Fsinfo;

impl Procedure for Fsinfo {
    const PROCEDURE: NFSProgram = NFSProgram::NFSPROC3_FSINFO;
    const NAME: &'static str = "FSINFO";
    const ALLOWED_ERRORS: &'static [nfsstat3] = &[
        nfsstat3::NFS3ERR_STALE,
        nfsstat3::NFS3ERR_BADHANDLE,
        nfsstat3::NFS3ERR_SERVERFAULT,
    ];

    type Args = fs::FSINFO3args;
    type Res = fs::FSINFO3res;

    fn invoke<'a, H: NfsHandler + ?Sized>(
        handler: &'a H,
        context: &'a Context,
        args: Self::Args,
    ) -> BoxFuture<'a, HandlerResult<Self::Res>> {
        handler.fsinfo(context, args)
    }
}

pub type FsinfoCall = NfsCall<Fsinfo>;
pub type FsinfoReply = NfsReply<Fsinfo>;
