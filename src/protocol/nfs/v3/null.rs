//! The NULL procedure (procedure 0), RFC 1813 section 3.3.0.
//!
//! NULL does no work and is typically used to:
//! - Check if the server is responding (ping)
//! - Measure basic RPC round-trip time
//! - Validate RPC credentials
//!
//! NULL takes no arguments and returns no results, just an RPC response indicating success.

use futures::future::BoxFuture;
use futures::FutureExt;

use super::{NfsCall, NfsReply, Procedure};
use crate::error::HandlerResult;
use crate::handler::NfsHandler;
use crate::protocol::rpc::Context;
use crate::protocol::xdr::nfs3::{nfsstat3, NFSProgram};
use crate::protocol::xdr::Void;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Null;

impl Procedure for Null {
    const PROCEDURE: NFSProgram = NFSProgram::NFSPROC3_NULL;
    const NAME: &'static str = "NULL";
    const ALLOWED_ERRORS: &'static [nfsstat3] = &[];

    type Args = Void;
    type Res = Void;

    fn invoke<'a, H: NfsHandler + ?Sized>(
        handler: &'a H,
        context: &'a Context,
        _args: Void,
    ) -> BoxFuture<'a, HandlerResult<Void>> {
        handler.null(context).map(|result| result.map(|()| Void)).boxed()
    }
}

pub type NullCall = NfsCall<Null>;
pub type NullReply = NfsReply<Null>;
