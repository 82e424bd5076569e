//! The `MKDIR` procedure (procedure 9), RFC 1813 section 3.3.9.
//!
//! `MKDIR` creates a new directory with the given initial attributes. The
//! reply has the same shape as the CREATE reply.

use futures::future::BoxFuture;

use super::create::CREATE_ERRORS;
use super::{NfsCall, NfsReply, Procedure};
use crate::error::HandlerResult;
use crate::handler::NfsHandler;
use crate::protocol::rpc::Context;
use crate::protocol::xdr::nfs3::{dir, nfsstat3, NFSProgram};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Mkdir;

impl Procedure for Mkdir {
    const PROCEDURE: NFSProgram = NFSProgram::NFSPROC3_MKDIR;
    const NAME: &'static str = "MKDIR";
    const ALLOWED_ERRORS: &'static [nfsstat3] = CREATE_ERRORS;

    type Args = dir::MKDIR3args;
    type Res = dir::MKDIR3res;

    fn invoke<'a, H: NfsHandler + ?Sized>(
        handler: &'a H,
        context: &'a Context,
        args: Self::Args,
    ) -> BoxFuture<'a, HandlerResult<Self::Res>> {
        handler.mkdir(context, args)
    }
}

pub type MkdirCall = NfsCall<Mkdir>;
pub type MkdirReply = NfsReply<Mkdir>;
