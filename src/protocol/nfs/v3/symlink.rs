//! The SYMLINK procedure (procedure 10), RFC 1813 section 3.3.10.
//!
//! SYMLINK creates a symbolic link holding an arbitrary path. The path is not
//! validated by the server and may point to a nonexistent file.

use futures::future::BoxFuture;

use super::create::CREATE_ERRORS;
use super::{NfsCall, NfsReply, Procedure};
use crate::error::HandlerResult;
use crate::handler::NfsHandler;
use crate::protocol::rpc::Context;
use crate::protocol::xdr::nfs3::{dir, nfsstat3, NFSProgram};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Symlink;

impl Procedure for Symlink {
    const PROCEDURE: NFSProgram = NFSProgram::NFSPROC3_SYMLINK;
    const NAME: &'static str = "SYMLINK";
    const ALLOWED_ERRORS: &'static [nfsstat3] = CREATE_ERRORS;

    type Args = dir::SYMLINK3args;
    type Res = dir::SYMLINK3res;

    fn invoke<'a, H: NfsHandler + ?Sized>(
        handler: &'a H,
        context: &'a Context,
        args: Self::Args,
    ) -> BoxFuture<'a, HandlerResult<Self::Res>> {
        handler.symlink(context, args)
    }
}

pub type SymlinkCall = NfsCall<Symlink>;
pub type SymlinkReply = NfsReply<Symlink>;
